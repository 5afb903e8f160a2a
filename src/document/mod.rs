//! Rich-text document model.
//!
//! Markdown text is classified line by line into [`BlockElement`]s, then
//! streamed into a [`DocumentSink`] implementation that renders each element
//! into the target document format. The conversion driver itself retains
//! nothing across blocks, so sinks of any size stream in constant memory.
//!
//! ## Examples
//!
//! ```rust
//! use longan::config::ConvertOptions;
//! use longan::document::{BlockElement, parse_document};
//!
//! let blocks = parse_document("# Title\n\nBody text", &ConvertOptions::default())?;
//! assert_eq!(blocks.len(), 2);
//! assert!(matches!(blocks[0], BlockElement::Heading { level: 1, .. }));
//! # Ok::<(), longan::common::Error>(())
//! ```

// Submodule declarations
mod block;
mod classify;
mod list;


// Re-export public API
pub use block::{Alignment, BlockElement, ListItem};
pub use classify::contains_block_markdown;
pub use list::ListStyle;

use crate::common::Result;
use crate::config::ConvertOptions;
use crate::inline::Inline;

/// Receiver for the elements of a converted document.
///
/// One method per element kind; runs are handed over as slices so a sink can
/// translate them without taking ownership. Quotes default to plain
/// paragraphs for sinks whose format has no quote concept.
pub trait DocumentSink {
    /// A heading with level 1 through 6.
    fn add_heading(&mut self, level: u8, runs: &[Inline]) -> Result<()>;

    /// A paragraph, optionally with an explicit alignment.
    fn add_paragraph(&mut self, runs: &[Inline], alignment: Option<Alignment>) -> Result<()>;

    /// A block quote.
    fn add_quote(&mut self, runs: &[Inline]) -> Result<()> {
        self.add_paragraph(runs, None)
    }

    /// A single list item at its resolved visual style.
    fn add_list_item(&mut self, style: ListStyle, runs: &[Inline]) -> Result<()>;

    /// A table as a rectangular grid of cell strings.
    fn add_table(&mut self, grid: &[Vec<String>]) -> Result<()>;

    /// An image reference.
    fn add_image(&mut self, url: &str, alt: &str) -> Result<()>;

    /// A page break.
    fn add_page_break(&mut self) -> Result<()>;

    /// A horizontal rule.
    fn add_horizontal_rule(&mut self) -> Result<()>;
}

/// Parse markdown text into its block elements without rendering them.
pub fn parse_document(markdown: &str, options: &ConvertOptions) -> Result<Vec<BlockElement>> {
    let lines: Vec<&str> = markdown.lines().collect();
    classify::classify_blocks(&lines, options)
}

/// Convert markdown text by streaming its block elements into `sink`.
///
/// List item trees are flattened depth-first, each item emitted at the
/// visual style of its own nesting level.
pub fn convert_document<S: DocumentSink>(
    markdown: &str,
    sink: &mut S,
    options: &ConvertOptions,
) -> Result<()> {
    for block in parse_document(markdown, options)? {
        emit_block(block, sink)?;
    }
    Ok(())
}

fn emit_block<S: DocumentSink>(block: BlockElement, sink: &mut S) -> Result<()> {
    match block {
        BlockElement::Heading { level, runs } => sink.add_heading(level, &runs),
        BlockElement::Paragraph { runs } => sink.add_paragraph(&runs, None),
        BlockElement::Quote { runs } => sink.add_quote(&runs),
        BlockElement::ListItem(item) => emit_list_item(item, sink),
        BlockElement::Table { grid } => sink.add_table(&grid),
        BlockElement::AlignmentBlock {
            alignment,
            paragraphs,
        } => {
            for runs in paragraphs {
                sink.add_paragraph(&runs, Some(alignment))?;
            }
            Ok(())
        }
        BlockElement::PageBreak => sink.add_page_break(),
        BlockElement::HorizontalRule => sink.add_horizontal_rule(),
        BlockElement::Image { url, alt } => sink.add_image(&url, &alt),
    }
}

fn emit_list_item<S: DocumentSink>(item: ListItem, sink: &mut S) -> Result<()> {
    let style = ListStyle::for_level(item.ordered, item.level);
    sink.add_list_item(style, &item.runs)?;
    for child in item.children {
        emit_list_item(child, sink)?;
    }
    Ok(())
}
