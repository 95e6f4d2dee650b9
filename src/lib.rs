//! Fotorek composes photobooth captures into a printable photo strip.
//!
//! A strip is a pure function of its [`CompositionRequest`]: the captured images,
//! a [`LayoutSpec`], a [`FilterKind`] and a [`FrameColor`]. Nothing else feeds
//! into the pixels.
//!
//! # Pipeline overview
//!
//! 1. **Load**: decode every capture concurrently, each bounded by a timeout ([`load_all`])
//! 2. **Place**: contain-fit each image into its slot on a transparent [`SlotSurface`]
//! 3. **Filter**: apply the per-pixel [`FilterKind`] to that slot only
//! 4. **Composite**: draw slots over the frame color, stroke borders, stamp the watermark
//! 5. **Export** (optional): encode the strip as JPEG ([`Compositor::export`])
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: identical requests give identical pixels and identical JPEG bytes.
//! - **All or nothing**: if any slot fails to load, no strip is produced.
//! - **Straight RGBA8** end-to-end; composed strips are always opaque.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod composition;
mod config;
mod effects;
mod encode;
mod foundation;
mod layout;
mod render;
mod session;

pub use assets::decode::{
    DATA_URL_PREFIX, DataUrlPayload, decode_data_url, decode_image, decode_source,
    encode_data_url,
};
pub use assets::load::{ImageDecoder, StandardDecoder, load_all};
pub use composition::model::{
    CapturedImage, CompositionRequest, FilterKind, FrameColor, ImageSource, LayoutSpec,
};
pub use config::compositor::{
    BorderStyle, CompositorConfig, ENV_EXPORT_QUALITY, ENV_LOAD_TIMEOUT_MS, WatermarkStyle,
};
pub use effects::filters::{apply_filter, apply_filter_image, filter_rgb};
pub use encode::jpeg::{EXPORT_MIME, ExportedStrip, encode_jpeg, export_filename};
pub use foundation::core::{Rgba8, SlotRect};
pub use foundation::error::{FotorekError, FotorekResult};
pub use layout::geometry::{LayoutEntry, LayoutTable, StripGeometry};
pub use render::composite::{StraightRgba8, blit_over, fill, over, stroke_rect};
pub use render::compositor::{ComposedStrip, Compositor};
pub use render::surface::{SlotSurface, contain_fit};
pub use render::watermark::{draw_watermark, measure as measure_watermark};
pub use session::gate::{RenderGate, RenderTicket};
pub use session::photos::PhotoSession;
