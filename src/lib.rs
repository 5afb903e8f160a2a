//! Longan - A Rust library for converting constrained Markdown into rich
//! documents and spreadsheets
//!
//! This library parses the Markdown subset used by report generators and
//! turns it into two targets:
//!
//! - **Document model**: headings, paragraphs, nested lists, tables, block
//!   quotes, images, alignment blocks, page breaks, and inline formatting
//!   runs (bold, italic, strikethrough, underline, code, links), streamed
//!   into a [`document::DocumentSink`]
//! - **Spreadsheet model**: multi-sheet workbooks via `## Sheet: Name`
//!   markers, with typed cells and symbolic formula references
//!   (`Sheet!T1.B[0]`) resolved to absolute addresses, streamed into a
//!   [`sheet::CellSink`]
//!
//! Actual file writers are external collaborators; this crate builds and
//! resolves the in-memory models.
//!
//! # Example - Parsing a document
//!
//! ```rust
//! use longan::ConvertOptions;
//! use longan::document::{BlockElement, parse_document};
//!
//! let markdown = "# Report\n\nRevenue was **up** this quarter.";
//! let blocks = parse_document(markdown, &ConvertOptions::default())?;
//!
//! assert!(matches!(blocks[0], BlockElement::Heading { level: 1, .. }));
//! let BlockElement::Paragraph { runs } = &blocks[1] else { unreachable!() };
//! assert!(runs.iter().any(|run| run.as_run().is_some_and(|r| r.bold)));
//! # Ok::<(), longan::Error>(())
//! ```
//!
//! # Example - Resolving a formula reference
//!
//! ```rust
//! use longan::ConvertOptions;
//! use longan::sheet::{resolve_references, scan_positions};
//!
//! let markdown = "## Sheet: Revenue\n\n| Q | Amount |\n|---|---|\n| Q1 | 1000 |";
//! let lines: Vec<&str> = markdown.lines().collect();
//! let positions = scan_positions(&lines, &ConvertOptions::default());
//!
//! let resolved = resolve_references("=Revenue!T1.B[0]", 1, &Default::default(), &positions);
//! assert_eq!(resolved, "=Revenue!B2");
//! ```

pub mod common;
pub mod config;
pub mod document;
pub mod grid;
pub mod inline;
pub mod sheet;

pub use common::{Error, Result};
pub use config::ConvertOptions;
