/// Request-side model: layouts, filters, frame colors and captured images.
pub mod model;
