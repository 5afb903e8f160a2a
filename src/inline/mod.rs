//! Inline formatting: escape protection and the run parser.
//!
//! The [`EscapeContext`] replaces backslash-escaped characters with
//! private-use placeholders before any pattern matching; the parser resolves
//! a line of text into an ordered sequence of [`FormattingRun`]s, honoring
//! nesting and nested nesting; see [`parser`](self) for the precedence
//! contract.

// Submodule declarations
mod escape;
mod parser;
mod types;


// Re-export public API
pub use escape::EscapeContext;
pub use parser::{parse_inline, parse_inline_inherited};
pub use types::{FormattingRun, Inline};
