//! Turning captured sources into pixels.
//!
//! Decoding is synchronous and lives in [`decode`]; [`load`] fans it out over
//! tokio's blocking pool with a per-slot timeout.

/// Encoded bytes, data URLs and bitmaps to straight RGBA8.
pub mod decode;
/// Concurrent per-slot loading.
pub mod load;
