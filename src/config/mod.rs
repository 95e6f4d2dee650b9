/// Compositor configuration and its environment overrides.
pub mod compositor;
