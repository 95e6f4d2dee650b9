/// Per-pixel color filters.
pub mod filters;
