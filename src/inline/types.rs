//! Value types produced by the inline formatting parser.

use serde::{Deserialize, Serialize};

/// A contiguous span of text sharing one formatting combination.
///
/// Runs are the atoms handed to the document-writer collaborator: every
/// piece of paragraph, heading, quote, or list-item text arrives as an
/// ordered run sequence.
///
/// A code run is never combined with a link, strikethrough, or underline in
/// this grammar; bold and italic may combine freely with everything except
/// links through nesting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattingRun {
    /// The literal text of the span, with escapes already restored.
    pub text: String,
    /// Bold formatting, inherited through nesting.
    pub bold: bool,
    /// Italic formatting, inherited through nesting.
    pub italic: bool,
    /// Strikethrough formatting.
    pub strikethrough: bool,
    /// Underline formatting.
    pub underline: bool,
    /// Monospace code span.
    pub code: bool,
    /// Hyperlink target, if this run is link text.
    pub link_url: Option<String>,
}

impl FormattingRun {
    /// Create a plain, unformatted run.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}

/// One entry of parsed inline content.
///
/// A hard line break (`<space><space>` at the end of a physical line) is an
/// explicit marker between independently parsed segments, not a new
/// paragraph, so it travels inside the run sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Inline {
    /// A formatted text span.
    Run(FormattingRun),
    /// An explicit hard line break within the same paragraph.
    LineBreak,
}

impl Inline {
    /// Get the run if this entry is one.
    pub fn as_run(&self) -> Option<&FormattingRun> {
        match self {
            Inline::Run(run) => Some(run),
            Inline::LineBreak => None,
        }
    }
}

/// Bold/italic context inherited down the inline parse recursion.
///
/// The flags accumulate via logical OR and are never reset by an inner span.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct FormatState {
    pub bold: bool,
    pub italic: bool,
}

impl FormatState {
    /// Derive the state for a nested span.
    pub(crate) fn nested(self, bold: bool, italic: bool) -> Self {
        Self {
            bold: self.bold | bold,
            italic: self.italic | italic,
        }
    }
}
