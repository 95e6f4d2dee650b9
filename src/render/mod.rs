//! CPU strip rendering.
//!
//! All pixels are straight RGBA8. Slots are drawn into their own transparent
//! [`surface::SlotSurface`], filtered there, then composited onto the canvas.

/// Straight-alpha blending and rectangle fills.
pub mod composite;
/// The strip compositor.
pub mod compositor;
/// Slot scratch surfaces and contain-fit.
pub mod surface;
/// Bitmap-font watermark stamp.
pub mod watermark;
