//! Booth-side state: the photos captured so far and the strip currently on screen.

/// Last-write-wins gate for composed strips.
pub mod gate;
/// Captured photos for one strip.
pub mod photos;
