//! Common types and utilities shared across the container reader and the
//! graphics parsers.

// Submodule declarations
pub mod binary;
pub mod error;

// Re-exports for convenience
pub use error::{Error, Result};
