use std::{
    io::Cursor,
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};

use anyhow::Context as _;
use image::{RgbaImage, codecs::jpeg::JpegEncoder};

use crate::{
    assets::decode::encode_data_url,
    foundation::error::{FotorekError, FotorekResult},
};

/// MIME type of exported strips.
pub const EXPORT_MIME: &str = "image/jpeg";

/// Encode `image` as baseline JPEG at `quality` (1..=100). Alpha is dropped.
pub fn encode_jpeg(image: &RgbaImage, quality: u8) -> FotorekResult<Vec<u8>> {
    if !(1..=100).contains(&quality) {
        return Err(FotorekError::encode(format!(
            "jpeg quality {quality} outside 1..=100"
        )));
    }
    let rgb = image::DynamicImage::ImageRgba8(image.clone()).into_rgb8();

    let mut buf = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buf, quality)
        .encode_image(&rgb)
        .map_err(|e| FotorekError::encode(format!("jpeg encode failed: {e}")))?;
    Ok(buf.into_inner())
}

/// `<prefix>-<unixMillis>.jpg` for the moment `at`.
pub fn export_filename(prefix: &str, at: SystemTime) -> String {
    let millis = at
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    format!("{prefix}-{millis}.jpg")
}

/// Encoded strip ready for download.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportedStrip {
    /// Suggested download file name.
    pub filename: String,
    /// JPEG bytes.
    pub bytes: Vec<u8>,
}

impl ExportedStrip {
    /// `data:image/jpeg;base64,...` form for browser downloads.
    pub fn to_data_url(&self) -> String {
        encode_data_url(EXPORT_MIME, &self.bytes)
    }

    /// Write the JPEG into `dir` under [`ExportedStrip::filename`].
    pub fn write_to_dir(&self, dir: &Path) -> FotorekResult<PathBuf> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("create output dir '{}'", dir.display()))?;
        let path = dir.join(&self.filename);
        std::fs::write(&path, &self.bytes)
            .with_context(|| format!("write jpeg '{}'", path.display()))?;
        Ok(path)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/jpeg.rs"]
mod tests;
