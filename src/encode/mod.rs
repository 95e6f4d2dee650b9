/// JPEG export.
pub mod jpeg;
