/// Layout table and slot geometry.
pub mod geometry;
