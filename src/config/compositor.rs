use std::time::Duration;

use anyhow::Context as _;

use crate::{
    composition::model::LayoutSpec,
    foundation::{
        core::Rgba8,
        error::{FotorekError, FotorekResult},
    },
    layout::geometry::{LayoutTable, StripGeometry},
};

/// Environment variable overriding [`CompositorConfig::load_timeout_ms`].
pub const ENV_LOAD_TIMEOUT_MS: &str = "FOTOREK_LOAD_TIMEOUT_MS";
/// Environment variable overriding [`CompositorConfig::export_quality`].
pub const ENV_EXPORT_QUALITY: &str = "FOTOREK_EXPORT_QUALITY";

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Compositor settings, injected once into [`crate::Compositor::new`].
///
/// Every field has a default, so a partial JSON document is a valid config.
pub struct CompositorConfig {
    /// Outer and inter-slot padding in pixels.
    pub padding: u32,
    /// Height reserved at the bottom of the canvas for the watermark.
    pub watermark_band_height: u32,
    /// JPEG quality of the exported strip, 1..=100.
    pub export_quality: u8,
    /// Per-image decode timeout in milliseconds.
    pub load_timeout_ms: u64,
    /// Export filename prefix (`<prefix>-<unixMillis>.jpg`).
    pub export_prefix: String,
    /// Slot border stroke.
    pub border: BorderStyle,
    /// Watermark text stamp.
    pub watermark: WatermarkStyle,
    /// Layout lookup table.
    pub layouts: LayoutTable,
}

impl Default for CompositorConfig {
    fn default() -> Self {
        Self {
            padding: 40,
            watermark_band_height: 60,
            export_quality: 95,
            load_timeout_ms: 5_000,
            export_prefix: "fotorek".to_string(),
            border: BorderStyle::default(),
            watermark: WatermarkStyle::default(),
            layouts: LayoutTable::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Stroke drawn around every filled slot.
pub struct BorderStyle {
    /// Stroke width in pixels, centered on the slot edge. 0 disables the border.
    pub width: u32,
    /// Stroke color.
    pub color: Rgba8,
}

impl Default for BorderStyle {
    fn default() -> Self {
        Self {
            width: 2,
            color: Rgba8::opaque(0x44, 0x44, 0x44),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Text stamped at the bottom of every strip.
pub struct WatermarkStyle {
    /// Label text.
    pub text: String,
    /// Distance from the canvas bottom edge to the text's vertical middle.
    pub offset_from_bottom: u32,
    /// Glyph height in pixels; rounded to a multiple of the 8 px base font.
    pub glyph_height: u32,
    /// Bold overstrike.
    pub bold: bool,
    /// Text color.
    pub color: Rgba8,
}

impl Default for WatermarkStyle {
    fn default() -> Self {
        Self {
            text: "FotoRek!".to_string(),
            offset_from_bottom: 30,
            glyph_height: 24,
            bold: true,
            color: Rgba8::opaque(0x66, 0x66, 0x66),
        }
    }
}

impl CompositorConfig {
    /// Parse a JSON config document. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> FotorekResult<Self> {
        let cfg: Self = serde_json::from_str(json).context("parse compositor config JSON")?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Apply `FOTOREK_*` environment overrides. Unparseable values are ignored.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(ms) = std::env::var(ENV_LOAD_TIMEOUT_MS)
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|&n| n > 0)
        {
            self.load_timeout_ms = ms;
        }
        if let Some(q) = std::env::var(ENV_EXPORT_QUALITY)
            .ok()
            .and_then(|v| v.parse::<u8>().ok())
            .filter(|q| (1..=100).contains(q))
        {
            self.export_quality = q;
        }
        self
    }

    /// Per-image decode timeout.
    pub fn load_timeout(&self) -> Duration {
        Duration::from_millis(self.load_timeout_ms)
    }

    /// Resolve slot geometry for `layout` with this config's padding and band.
    pub fn geometry(&self, layout: LayoutSpec) -> FotorekResult<StripGeometry> {
        StripGeometry::resolve(
            layout,
            &self.layouts,
            self.padding,
            self.watermark_band_height,
        )
    }

    /// Check ranges and make sure every layout yields drawable slots.
    pub fn validate(&self) -> FotorekResult<()> {
        if !(1..=100).contains(&self.export_quality) {
            return Err(FotorekError::validation(
                "export_quality must be within 1..=100",
            ));
        }
        if self.load_timeout_ms == 0 {
            return Err(FotorekError::validation("load_timeout_ms must be > 0"));
        }
        if self.export_prefix.is_empty()
            || self
                .export_prefix
                .chars()
                .any(|c| c == '/' || c == '\\' || c.is_control())
        {
            return Err(FotorekError::validation(
                "export_prefix must be a non-empty file name fragment",
            ));
        }
        self.layouts.validate()?;
        for layout in LayoutSpec::ALL {
            self.geometry(layout)
                .map_err(|e| FotorekError::validation(e.to_string()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/compositor.rs"]
mod tests;
