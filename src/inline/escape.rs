//! Escape protection for backslash-escaped characters.
//!
//! Before any delimiter matching, every `\X` sequence is replaced with a
//! placeholder codepoint from the Unicode private-use area so that escaped
//! characters (e.g. `\*`) are never treated as markdown markers. The
//! placeholders are mapped back to their literal characters when run text is
//! finalized.
//!
//! The context is a plain value created at the start of each top-level parse
//! and threaded through every restoration call; it is never shared across
//! conversions, so parallel conversions of different documents cannot
//! corrupt each other's escape tables.

use smallvec::SmallVec;

/// First codepoint of the private-use range used for placeholders.
const PLACEHOLDER_BASE: u32 = 0xE000;

/// Number of codepoints available in the U+E000..U+F8FF private-use area.
const PLACEHOLDER_CAPACITY: u32 = 0x1900;

/// Request-scoped table mapping placeholder codepoints to escaped literals.
///
/// The n-th protected character is stored at index n and stands behind the
/// placeholder `U+E000 + n`.
#[derive(Debug, Clone, Default)]
pub struct EscapeContext {
    entries: SmallVec<[char; 8]>,
}

impl EscapeContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any escape has been protected.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replace every `\X` with a unique private-use placeholder.
    ///
    /// A trailing lone backslash has nothing to escape and is kept literal.
    /// Should the private-use range ever be exhausted, remaining escapes are
    /// kept literal rather than colliding with earlier placeholders.
    pub fn protect(&mut self, text: &str) -> String {
        if !text.contains('\\') {
            return text.to_string();
        }

        let mut out = String::with_capacity(text.len());
        let mut chars = text.chars();
        while let Some(ch) = chars.next() {
            if ch != '\\' {
                out.push(ch);
                continue;
            }
            match chars.next() {
                Some(escaped) if (self.entries.len() as u32) < PLACEHOLDER_CAPACITY => {
                    let placeholder = PLACEHOLDER_BASE + self.entries.len() as u32;
                    // The range U+E000..U+F8FF contains no surrogates, so
                    // the conversion cannot fail.
                    if let Some(placeholder) = char::from_u32(placeholder) {
                        self.entries.push(escaped);
                        out.push(placeholder);
                    } else {
                        out.push(escaped);
                    }
                }
                Some(escaped) => {
                    out.push('\\');
                    out.push(escaped);
                }
                None => out.push('\\'),
            }
        }
        out
    }

    /// Replace every placeholder with its original literal character.
    ///
    /// Total and idempotent: every placeholder inserted by [`protect`] is
    /// removed, and text without placeholders passes through unchanged.
    ///
    /// [`protect`]: EscapeContext::protect
    pub fn restore(&self, text: &str) -> String {
        if self.entries.is_empty() {
            return text.to_string();
        }
        text.chars()
            .map(|ch| {
                let code = ch as u32;
                if (PLACEHOLDER_BASE..PLACEHOLDER_BASE + self.entries.len() as u32).contains(&code)
                {
                    self.entries[(code - PLACEHOLDER_BASE) as usize]
                } else {
                    ch
                }
            })
            .collect()
    }
}
