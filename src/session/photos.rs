use crate::{
    composition::model::{
        CapturedImage, CompositionRequest, FilterKind, FrameColor, ImageSource, LayoutSpec,
    },
    config::compositor::CompositorConfig,
    foundation::error::{FotorekError, FotorekResult},
};

/// Photos captured for one strip, in slot order.
///
/// Holds at most as many photos as the layout has slots. Ids are never
/// reused within a session, not even after a retake or reset.
#[derive(Clone, Debug)]
pub struct PhotoSession {
    layout: LayoutSpec,
    max: usize,
    next_id: u64,
    photos: Vec<CapturedImage>,
}

impl PhotoSession {
    /// Start an empty session for `layout`.
    pub fn new(layout: LayoutSpec, config: &CompositorConfig) -> FotorekResult<Self> {
        let max = config.geometry(layout)?.max_slots();
        Ok(Self {
            layout,
            max,
            next_id: 1,
            photos: Vec::with_capacity(max),
        })
    }

    /// Layout the session captures for.
    pub fn layout(&self) -> LayoutSpec {
        self.layout
    }

    /// Capacity of the layout.
    pub fn max_photos(&self) -> usize {
        self.max
    }

    /// Append a capture to the next free slot.
    pub fn capture(
        &mut self,
        source: ImageSource,
        timestamp_ms: u64,
    ) -> FotorekResult<&CapturedImage> {
        if self.is_complete() {
            return Err(FotorekError::SessionFull { max: self.max });
        }
        let id = self.next_id;
        self.next_id += 1;
        let slot = self.photos.len();
        self.photos.push(CapturedImage::new(id, timestamp_ms, source));
        tracing::debug!(id, slot, layout = %self.layout, "photo captured");
        Ok(&self.photos[slot])
    }

    /// Drop the most recent capture so its slot can be shot again.
    pub fn retake_last(&mut self) -> Option<CapturedImage> {
        self.photos.pop()
    }

    /// Drop every capture.
    pub fn reset(&mut self) {
        self.photos.clear();
    }

    /// Every slot is filled.
    pub fn is_complete(&self) -> bool {
        self.photos.len() >= self.max
    }

    /// Slots still free.
    pub fn remaining(&self) -> usize {
        self.max.saturating_sub(self.photos.len())
    }

    /// Captures so far, oldest first.
    pub fn photos(&self) -> &[CapturedImage] {
        &self.photos
    }

    /// Snapshot of the session as a compose request.
    pub fn request(&self, filter: FilterKind, frame_color: FrameColor) -> CompositionRequest {
        CompositionRequest::new(self.photos.clone(), self.layout, filter, frame_color)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/photos.rs"]
mod tests;
