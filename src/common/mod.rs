//! Common types and utilities shared across conversion targets.
//!
//! This module provides the unified error type used by both the document
//! (rich-text) and spreadsheet conversion paths, ensuring a consistent API
//! for users.

// Submodule declarations
pub mod error;

// Re-exports for convenience
pub use error::{Error, Result};
