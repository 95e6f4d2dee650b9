use std::{sync::Arc, time::SystemTime};

use image::RgbaImage;

use crate::{
    assets::load::{ImageDecoder, StandardDecoder, load_all},
    composition::model::{CapturedImage, CompositionRequest, FilterKind, FrameColor, LayoutSpec},
    config::compositor::CompositorConfig,
    encode::jpeg::{ExportedStrip, encode_jpeg, export_filename},
    foundation::error::{FotorekError, FotorekResult},
    layout::geometry::StripGeometry,
    render::{
        composite::{blit_over, fill, stroke_rect},
        surface::SlotSurface,
        watermark::draw_watermark,
    },
    session::gate::RenderGate,
};

/// A fully rendered strip. Derived from its request and disposable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComposedStrip {
    layout: LayoutSpec,
    image: RgbaImage,
}

impl ComposedStrip {
    /// Layout this strip was rendered with.
    pub fn layout(&self) -> LayoutSpec {
        self.layout
    }

    /// Rendered pixels (straight RGBA8, always opaque).
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Canvas width.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Canvas height.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Take ownership of the pixels.
    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Downscaled copy whose longer edge is at most `max_edge`, for on-screen display.
    ///
    /// Derived from the full render, so preview and export never disagree on layout.
    pub fn preview(&self, max_edge: u32) -> RgbaImage {
        let (w, h) = self.image.dimensions();
        let max_edge = max_edge.max(1);
        if w.max(h) <= max_edge {
            return self.image.clone();
        }
        let (pw, ph) = if w >= h {
            (max_edge, ((u64::from(h) * u64::from(max_edge)) / u64::from(w)).max(1) as u32)
        } else {
            (((u64::from(w) * u64::from(max_edge)) / u64::from(h)).max(1) as u32, max_edge)
        };
        image::imageops::thumbnail(&self.image, pw, ph)
    }
}

/// Renders photo strips from captured images.
///
/// Holds the injected [`CompositorConfig`] and the decoder used for slot loads.
#[derive(Clone)]
pub struct Compositor {
    config: Arc<CompositorConfig>,
    decoder: Arc<dyn ImageDecoder>,
}

impl Compositor {
    /// Validate `config` and build a compositor with the [`StandardDecoder`].
    pub fn new(config: CompositorConfig) -> FotorekResult<Self> {
        config.validate()?;
        Ok(Self {
            config: Arc::new(config),
            decoder: Arc::new(StandardDecoder),
        })
    }

    /// Replace the decoder used for slot loads.
    pub fn with_decoder(mut self, decoder: Arc<dyn ImageDecoder>) -> Self {
        self.decoder = decoder;
        self
    }

    /// Active configuration.
    pub fn config(&self) -> &CompositorConfig {
        &self.config
    }

    /// Canvas and slot geometry for `layout`.
    pub fn geometry(&self, layout: LayoutSpec) -> FotorekResult<StripGeometry> {
        self.config.geometry(layout)
    }

    /// Load every slot's image concurrently, then render the strip.
    ///
    /// Images beyond the layout's capacity are ignored. Fails as a whole if
    /// any slot fails to load; no partial strip is ever returned.
    #[tracing::instrument(
        skip(self, request),
        fields(layout = %request.layout, filter = %request.filter, images = request.images.len())
    )]
    pub async fn compose(&self, request: &CompositionRequest) -> FotorekResult<ComposedStrip> {
        let (geometry, images) = self.prepare(request)?;
        let bitmaps = load_all(
            Arc::clone(&self.decoder),
            images,
            self.config.load_timeout(),
        )
        .await?;
        self.render_geometry(&geometry, &bitmaps, request.filter, request.frame_color)
    }

    /// [`Compositor::compose`] behind a [`RenderGate`].
    ///
    /// Returns `Ok(None)` when a newer compose started before this one
    /// finished; rendering is skipped if that is already known after loading.
    #[tracing::instrument(
        skip(self, gate, request),
        fields(layout = %request.layout, filter = %request.filter, images = request.images.len())
    )]
    pub async fn compose_gated(
        &self,
        gate: &RenderGate,
        request: &CompositionRequest,
    ) -> FotorekResult<Option<Arc<ComposedStrip>>> {
        let ticket = gate.begin();
        let (geometry, images) = self.prepare(request)?;

        let loaded = load_all(
            Arc::clone(&self.decoder),
            images,
            self.config.load_timeout(),
        )
        .await;
        if !gate.is_current(ticket) {
            tracing::debug!(
                generation = ticket.generation(),
                "compose superseded while loading"
            );
            return Ok(None);
        }

        let strip = Arc::new(self.render_geometry(
            &geometry,
            &loaded?,
            request.filter,
            request.frame_color,
        )?);
        Ok(gate.publish(ticket, Arc::clone(&strip)).then_some(strip))
    }

    /// Render already-decoded bitmaps. Deterministic: identical inputs give
    /// identical pixels.
    pub fn render(
        &self,
        layout: LayoutSpec,
        bitmaps: &[Arc<RgbaImage>],
        filter: FilterKind,
        frame_color: FrameColor,
    ) -> FotorekResult<ComposedStrip> {
        let geometry = self.geometry(layout)?;
        self.render_geometry(&geometry, bitmaps, filter, frame_color)
    }

    /// Encode `strip` for download, named after the current time.
    pub fn export(&self, strip: &ComposedStrip) -> FotorekResult<ExportedStrip> {
        self.export_at(strip, SystemTime::now())
    }

    /// Encode `strip` for download, named after `at`.
    pub fn export_at(&self, strip: &ComposedStrip, at: SystemTime) -> FotorekResult<ExportedStrip> {
        Ok(ExportedStrip {
            filename: export_filename(&self.config.export_prefix, at),
            bytes: encode_jpeg(strip.image(), self.config.export_quality)?,
        })
    }

    fn prepare<'r>(
        &self,
        request: &'r CompositionRequest,
    ) -> FotorekResult<(StripGeometry, &'r [CapturedImage])> {
        request.validate()?;
        let geometry = self.geometry(request.layout)?;
        let keep = request.images.len().min(geometry.max_slots());
        if keep < request.images.len() {
            tracing::warn!(
                layout = %request.layout,
                max = geometry.max_slots(),
                ignored = request.images.len() - keep,
                "ignoring images beyond layout capacity"
            );
        }
        Ok((geometry, &request.images[..keep]))
    }

    fn render_geometry(
        &self,
        geometry: &StripGeometry,
        bitmaps: &[Arc<RgbaImage>],
        filter: FilterKind,
        frame_color: FrameColor,
    ) -> FotorekResult<ComposedStrip> {
        if bitmaps.is_empty() {
            return Err(FotorekError::NoImages);
        }
        let mut canvas = allocate_canvas(geometry.canvas_width, geometry.canvas_height)?;
        fill(&mut canvas, frame_color.resolve());

        let border = self.config.border;
        for (index, bitmap) in bitmaps.iter().take(geometry.max_slots()).enumerate() {
            let rect = geometry
                .slot_rect(index)
                .ok_or_else(|| FotorekError::render(format!("slot {index} outside layout")))?;

            let mut surface = SlotSurface::new(rect.width, rect.height)?;
            let placed = surface.draw_contain(bitmap)?;
            surface.apply_filter(filter);
            blit_over(&mut canvas, surface.pixels(), rect.x, rect.y);
            stroke_rect(&mut canvas, rect, border.width, border.color);

            tracing::debug!(
                slot = index,
                x = rect.x,
                y = rect.y,
                drawn_w = placed.width,
                drawn_h = placed.height,
                "slot composited"
            );
        }

        draw_watermark(&mut canvas, &self.config.watermark);

        Ok(ComposedStrip {
            layout: geometry.layout,
            image: canvas,
        })
    }
}

fn allocate_canvas(width: u32, height: u32) -> FotorekResult<RgbaImage> {
    let fits = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .is_some();
    if width == 0 || height == 0 || !fits {
        return Err(FotorekError::render(format!(
            "no drawable surface for a {width}x{height} canvas"
        )));
    }
    Ok(RgbaImage::new(width, height))
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
