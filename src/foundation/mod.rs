/// Color and rectangle primitives.
pub mod core;
/// Crate error type.
pub mod error;
