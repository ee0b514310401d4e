//! Unified error types for wpgraphics.
//!
//! This module provides a unified error type that encompasses errors from the
//! compound document reader and the graphics parsers, presenting a consistent
//! API to users.

// Submodule declarations
pub mod conversions;
pub mod types;

// Re-exports
pub use types::{Error, Result};
