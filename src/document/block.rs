//! Block-level document model.
//!
//! One [`BlockElement`] is one structural unit of the document: a heading, a
//! paragraph, a list item with its nested children, a table grid, and so on.
//! Elements are ephemeral per-block outputs: the conversion driver hands each
//! one to the writer collaborator immediately and retains nothing across
//! blocks.

use serde::{Deserialize, Serialize};

use crate::inline::Inline;

/// Paragraph alignment inside an alignment block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Alignment {
    Left,
    Center,
    Right,
    Justify,
}

/// Alignment keywords as they appear in `<div align="…">` tags.
static ALIGNMENTS: phf::Map<&'static str, Alignment> = phf::phf_map! {
    "left" => Alignment::Left,
    "center" => Alignment::Center,
    "right" => Alignment::Right,
    "justify" => Alignment::Justify,
};

impl Alignment {
    /// Look up an alignment keyword, case-insensitively.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        ALIGNMENTS.get(keyword.to_ascii_lowercase().as_str()).copied()
    }
}

/// A list item with its run content and nested sub-items.
///
/// `level` is the nesting depth the item was found at (0 = top level); the
/// visual style for a level is chosen by
/// [`ListStyle::for_level`](super::ListStyle::for_level).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    /// Whether the item belongs to an ordered (numbered) list.
    pub ordered: bool,
    /// Nesting level, 0-based.
    pub level: usize,
    /// Run content of the item itself.
    pub runs: Vec<Inline>,
    /// Nested sub-items, which may switch between ordered and unordered.
    pub children: Vec<ListItem>,
}

/// One structural unit of the document model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BlockElement {
    /// A heading with level 1–6.
    Heading { level: u8, runs: Vec<Inline> },
    /// A plain paragraph.
    Paragraph { runs: Vec<Inline> },
    /// A block quote line.
    Quote { runs: Vec<Inline> },
    /// A top-level list item (children hang off the item itself).
    ListItem(ListItem),
    /// A table as a rectangular grid of cell strings.
    Table { grid: Vec<Vec<String>> },
    /// One or more paragraphs sharing an explicit alignment.
    AlignmentBlock {
        alignment: Alignment,
        paragraphs: Vec<Vec<Inline>>,
    },
    /// A page break (`---`).
    PageBreak,
    /// A horizontal rule (`***`).
    HorizontalRule,
    /// An image reference.
    Image { url: String, alt: String },
}
