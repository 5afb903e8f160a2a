//! Unified error types for the Longan library.
//!
//! This module provides a unified error type shared by the document and
//! spreadsheet conversion paths, presenting a consistent API to users.

// Submodule declarations
pub mod types;

// Re-exports
pub use types::{Error, Result};
