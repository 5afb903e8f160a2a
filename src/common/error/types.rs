//! Unified error types for the Longan library.
//!
//! This module provides a unified error type that encompasses errors from both
//! the document and spreadsheet conversion paths, presenting a consistent API
//! to users.
use thiserror::Error;

/// Main error type for Longan operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error occurred
    #[error("Parse error: {0}")]
    Parse(String),

    /// Inline or list nesting exceeded the configured depth limit
    #[error("Nesting depth limit of {limit} exceeded")]
    DepthExceeded { limit: usize },

    /// A writer collaborator rejected an emitted element or cell
    #[error("Sink error: {0}")]
    Sink(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Result type for Longan operations.
pub type Result<T> = std::result::Result<T, Error>;
