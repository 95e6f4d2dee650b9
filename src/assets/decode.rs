use std::sync::Arc;

use anyhow::Context;
use base64::Engine;
use image::RgbaImage;

use crate::{
    composition::model::ImageSource,
    foundation::error::{FotorekError, FotorekResult},
};

/// Scheme prefix of RFC 2397 URLs.
pub const DATA_URL_PREFIX: &str = "data:";

/// Payload of a decoded `data:` URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataUrlPayload {
    /// Declared media type, e.g. `image/jpeg`. Empty when the URL omits it.
    pub media_type: String,
    /// Decoded bytes.
    pub bytes: Vec<u8>,
}

/// Decode encoded image bytes into straight RGBA8.
pub fn decode_image(bytes: &[u8]) -> FotorekResult<RgbaImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    if rgba.width() == 0 || rgba.height() == 0 {
        return Err(FotorekError::validation("decoded image has zero size"));
    }
    Ok(rgba)
}

/// Split an RFC 2397 `data:` URL and decode its payload.
pub fn decode_data_url(url: &str) -> FotorekResult<DataUrlPayload> {
    let rest = url
        .strip_prefix(DATA_URL_PREFIX)
        .ok_or_else(|| FotorekError::validation("URL does not start with 'data:'"))?;
    let (metadata, data) = rest
        .split_once(',')
        .ok_or_else(|| FotorekError::validation("missing comma in data URL"))?;

    let mut parts = metadata.split(';');
    let media_type = parts.next().unwrap_or("").trim().to_ascii_lowercase();
    let is_base64 = parts.any(|p| p.trim().eq_ignore_ascii_case("base64"));

    let bytes = if is_base64 {
        let compact: String = data.chars().filter(|c| !c.is_ascii_whitespace()).collect();
        base64::engine::general_purpose::STANDARD
            .decode(compact.as_bytes())
            .context("decode base64 data URL payload")?
    } else {
        data.as_bytes().to_vec()
    };

    Ok(DataUrlPayload { media_type, bytes })
}

/// Produce the bitmap behind any [`ImageSource`].
pub fn decode_source(source: &ImageSource) -> FotorekResult<Arc<RgbaImage>> {
    match source {
        ImageSource::Bitmap(img) => {
            if img.width() == 0 || img.height() == 0 {
                return Err(FotorekError::validation("bitmap has zero size"));
            }
            Ok(Arc::clone(img))
        }
        ImageSource::Encoded(bytes) => decode_image(bytes).map(Arc::new),
        ImageSource::DataUrl(url) => {
            let payload = decode_data_url(url)?;
            if !payload.media_type.is_empty() && !payload.media_type.starts_with("image/") {
                return Err(FotorekError::validation(format!(
                    "data URL carries '{}', not an image",
                    payload.media_type
                )));
            }
            decode_image(&payload.bytes).map(Arc::new)
        }
    }
}

/// Encode bytes as a base64 `data:` URL.
pub fn encode_data_url(media_type: &str, bytes: &[u8]) -> String {
    let b64 = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("{DATA_URL_PREFIX}{media_type};base64,{b64}")
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
