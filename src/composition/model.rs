use std::{fmt, str::FromStr, sync::Arc};

use image::RgbaImage;

use crate::foundation::{
    core::Rgba8,
    error::{FotorekError, FotorekResult},
};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
/// Photo-strip arrangement. Each variant maps to one entry of the layout table.
pub enum LayoutSpec {
    /// One photo.
    #[serde(rename = "single")]
    Single,
    /// Four photos stacked in one column.
    #[serde(rename = "vertical-4")]
    Vertical4,
    /// Four photos in a 2×2 grid.
    #[serde(rename = "horizontal-2x2")]
    Horizontal2x2,
    /// Six photos, two columns by three rows.
    #[serde(rename = "grid-2x3")]
    Grid2x3,
}

impl LayoutSpec {
    /// Every layout, in catalog order.
    pub const ALL: [Self; 4] = [
        Self::Single,
        Self::Vertical4,
        Self::Horizontal2x2,
        Self::Grid2x3,
    ];

    /// Stable identifier (`"vertical-4"`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Vertical4 => "vertical-4",
            Self::Horizontal2x2 => "horizontal-2x2",
            Self::Grid2x3 => "grid-2x3",
        }
    }
}

impl fmt::Display for LayoutSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayoutSpec {
    type Err = FotorekError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|l| l.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| FotorekError::validation(format!("unknown layout '{s}'")))
    }
}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
/// Per-slot color filter.
pub enum FilterKind {
    /// Identity.
    #[default]
    None,
    /// Unweighted channel average.
    Grayscale,
    /// Classic sepia matrix.
    Sepia,
    /// Red boost, green and blue cut.
    Vintage,
    /// Red cut, green and blue boost.
    Cool,
    /// Red and green boost, blue cut.
    Warm,
}

impl FilterKind {
    /// Every filter, in catalog order.
    pub const ALL: [Self; 6] = [
        Self::None,
        Self::Grayscale,
        Self::Sepia,
        Self::Vintage,
        Self::Cool,
        Self::Warm,
    ];

    /// Stable identifier (`"sepia"`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Grayscale => "grayscale",
            Self::Sepia => "sepia",
            Self::Vintage => "vintage",
            Self::Cool => "cool",
            Self::Warm => "warm",
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterKind {
    type Err = FotorekError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| FotorekError::validation(format!("unknown filter '{s}'")))
    }
}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
/// Background fill behind the photo slots.
pub enum FrameColor {
    /// `#ffffff`
    #[default]
    White,
    /// `#000000`
    Black,
    /// `#ffc0cb`
    Pink,
    /// `#90ee90`
    Green,
    /// `#87ceeb`
    Blue,
    /// `#ffeb3b`
    Yellow,
    /// `#da70d6`
    Purple,
    /// `#800000`
    Maroon,
    /// `#8b0032`
    Burgundy,
    /// Explicit user-picked color.
    Custom(Rgba8),
}

impl FrameColor {
    /// The named swatches, in catalog order.
    pub const NAMED: [Self; 9] = [
        Self::White,
        Self::Black,
        Self::Pink,
        Self::Green,
        Self::Blue,
        Self::Yellow,
        Self::Purple,
        Self::Maroon,
        Self::Burgundy,
    ];

    /// Parse a custom color from a hex string.
    pub fn custom_hex(hex: &str) -> FotorekResult<Self> {
        Rgba8::parse_hex(hex).map(Self::Custom)
    }

    /// Concrete fill color. Custom colors are forced opaque.
    pub fn resolve(self) -> Rgba8 {
        match self {
            Self::White => Rgba8::opaque(0xff, 0xff, 0xff),
            Self::Black => Rgba8::opaque(0x00, 0x00, 0x00),
            Self::Pink => Rgba8::opaque(0xff, 0xc0, 0xcb),
            Self::Green => Rgba8::opaque(0x90, 0xee, 0x90),
            Self::Blue => Rgba8::opaque(0x87, 0xce, 0xeb),
            Self::Yellow => Rgba8::opaque(0xff, 0xeb, 0x3b),
            Self::Purple => Rgba8::opaque(0xda, 0x70, 0xd6),
            Self::Maroon => Rgba8::opaque(0x80, 0x00, 0x00),
            Self::Burgundy => Rgba8::opaque(0x8b, 0x00, 0x32),
            Self::Custom(c) => Rgba8 { a: 255, ..c },
        }
    }

    /// Catalog name (`"custom"` for explicit colors).
    pub fn name(self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Black => "black",
            Self::Pink => "pink",
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Yellow => "yellow",
            Self::Purple => "purple",
            Self::Maroon => "maroon",
            Self::Burgundy => "burgundy",
            Self::Custom(_) => "custom",
        }
    }
}

impl FromStr for FrameColor {
    type Err = FotorekError;

    /// Accepts a swatch name or a hex color (which becomes [`FrameColor::Custom`]).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(named) = Self::NAMED
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s))
        {
            return Ok(named);
        }
        Self::custom_hex(s)
            .map_err(|_| FotorekError::validation(format!("unknown frame color '{s}'")))
    }
}

#[derive(Clone)]
/// Where a captured still comes from.
pub enum ImageSource {
    /// Encoded image bytes (JPEG, PNG, ...).
    Encoded(Arc<[u8]>),
    /// RFC 2397 `data:` URL, as produced by a browser canvas export.
    DataUrl(Arc<str>),
    /// Already-decoded RGBA8 bitmap.
    Bitmap(Arc<RgbaImage>),
}

impl ImageSource {
    /// Wrap encoded image bytes.
    pub fn encoded(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self::Encoded(bytes.into())
    }

    /// Wrap a `data:` URL.
    pub fn data_url(url: impl Into<Arc<str>>) -> Self {
        Self::DataUrl(url.into())
    }

    /// Wrap a decoded bitmap.
    pub fn bitmap(image: RgbaImage) -> Self {
        Self::Bitmap(Arc::new(image))
    }
}

impl fmt::Debug for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Encoded(b) => write!(f, "Encoded({} bytes)", b.len()),
            Self::DataUrl(u) => write!(f, "DataUrl({} chars)", u.len()),
            Self::Bitmap(i) => write!(f, "Bitmap({}x{})", i.width(), i.height()),
        }
    }
}

#[derive(Clone, Debug)]
/// One still captured during a session. Immutable once captured.
pub struct CapturedImage {
    /// Session-unique identifier.
    pub id: u64,
    /// Capture time in unix milliseconds.
    pub timestamp_ms: u64,
    /// Pixel source.
    pub source: ImageSource,
}

impl CapturedImage {
    /// Build a captured image.
    pub fn new(id: u64, timestamp_ms: u64, source: ImageSource) -> Self {
        Self {
            id,
            timestamp_ms,
            source,
        }
    }
}

#[derive(Clone, Debug)]
/// Everything that determines a composed strip. There is no hidden state.
pub struct CompositionRequest {
    /// Captured images, in slot order.
    pub images: Vec<CapturedImage>,
    /// Slot arrangement.
    pub layout: LayoutSpec,
    /// Per-slot filter.
    pub filter: FilterKind,
    /// Background fill.
    pub frame_color: FrameColor,
}

impl CompositionRequest {
    /// Build a request.
    pub fn new(
        images: Vec<CapturedImage>,
        layout: LayoutSpec,
        filter: FilterKind,
        frame_color: FrameColor,
    ) -> Self {
        Self {
            images,
            layout,
            filter,
            frame_color,
        }
    }

    /// Reject requests that cannot produce a strip.
    pub fn validate(&self) -> FotorekResult<()> {
        if self.images.is_empty() {
            return Err(FotorekError::NoImages);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/model.rs"]
mod tests;
