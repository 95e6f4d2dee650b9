use std::{sync::Arc, time::Duration};

use image::RgbaImage;

use crate::{
    assets::decode::decode_source,
    composition::model::{CapturedImage, ImageSource},
    foundation::error::{FotorekError, FotorekResult},
};

/// Turns a captured [`ImageSource`] into pixels.
///
/// Called from tokio's blocking pool, one call per slot.
pub trait ImageDecoder: Send + Sync + 'static {
    /// Decode `source` into straight RGBA8.
    fn decode(&self, source: &ImageSource) -> FotorekResult<Arc<RgbaImage>>;
}

/// Decoder backed by the `image` and `base64` crates.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardDecoder;

impl ImageDecoder for StandardDecoder {
    fn decode(&self, source: &ImageSource) -> FotorekResult<Arc<RgbaImage>> {
        decode_source(source)
    }
}

/// Load every image concurrently, each raced against `timeout`.
///
/// Waits for all loads to settle. On failure, reports the lowest failing slot.
pub async fn load_all(
    decoder: Arc<dyn ImageDecoder>,
    images: &[CapturedImage],
    timeout: Duration,
) -> FotorekResult<Vec<Arc<RgbaImage>>> {
    let loads = images.iter().enumerate().map(|(slot, img)| {
        load_slot(Arc::clone(&decoder), slot, img.source.clone(), timeout)
    });
    let settled = futures::future::join_all(loads).await;
    settled.into_iter().collect()
}

async fn load_slot(
    decoder: Arc<dyn ImageDecoder>,
    slot: usize,
    source: ImageSource,
    timeout: Duration,
) -> FotorekResult<Arc<RgbaImage>> {
    if let ImageSource::Bitmap(img) = &source
        && img.width() > 0
        && img.height() > 0
    {
        return Ok(Arc::clone(img));
    }

    let task = tokio::task::spawn_blocking(move || decoder.decode(&source));
    match tokio::time::timeout(timeout, task).await {
        Ok(Ok(Ok(img))) => {
            tracing::debug!(slot, width = img.width(), height = img.height(), "slot image loaded");
            Ok(img)
        }
        Ok(Ok(Err(e))) => Err(FotorekError::ImageLoad {
            slot,
            reason: e.to_string(),
        }),
        Ok(Err(join)) => Err(FotorekError::ImageLoad {
            slot,
            reason: format!("decode task failed: {join}"),
        }),
        Err(_) => {
            // Blocking decodes cannot be cancelled; the task runs to completion
            // and its result is dropped.
            tracing::debug!(slot, "slot load timed out, abandoning blocking decode");
            Err(FotorekError::ImageTimeout {
                slot,
                timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            })
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/load.rs"]
mod tests;
