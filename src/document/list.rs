//! List nesting reconstruction.
//!
//! A run of indented list lines is rebuilt into a leveled item tree. The
//! nesting level of a line is its leading whitespace divided by the
//! configured indent width (three spaces per level by default); ordered and
//! unordered lists may nest inside each other at different levels.

use once_cell::sync::Lazy;
use regex::Regex;

use super::block::ListItem;
use crate::common::{Error, Result};
use crate::config::ConvertOptions;
use crate::inline::parse_inline;

pub(crate) static ORDERED_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\.\s+(.+)").unwrap());
pub(crate) static UNORDERED_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-*+]\s+(.+)").unwrap());

/// Visual style for a list item, one fixed 3-entry table per list kind.
///
/// Levels at or beyond the deepest defined style reuse that deepest style;
/// the clamp is an explicit rule, not an artifact of indexing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStyle {
    Bullet,
    Bullet2,
    Bullet3,
    Number,
    Number2,
    Number3,
}

impl ListStyle {
    /// Choose the style for a list kind and nesting level, clamping deep
    /// levels to the last defined entry.
    pub fn for_level(ordered: bool, level: usize) -> Self {
        match (ordered, level.min(2)) {
            (false, 0) => ListStyle::Bullet,
            (false, 1) => ListStyle::Bullet2,
            (false, _) => ListStyle::Bullet3,
            (true, 0) => ListStyle::Number,
            (true, 1) => ListStyle::Number2,
            (true, _) => ListStyle::Number3,
        }
    }

    /// The writer-facing style name.
    pub fn name(&self) -> &'static str {
        match self {
            ListStyle::Bullet => "List Bullet",
            ListStyle::Bullet2 => "List Bullet 2",
            ListStyle::Bullet3 => "List Bullet 3",
            ListStyle::Number => "List Number",
            ListStyle::Number2 => "List Number 2",
            ListStyle::Number3 => "List Number 3",
        }
    }
}

/// Nesting level of a raw line: leading whitespace / indent width.
pub(crate) fn nesting_level(line: &str, options: &ConvertOptions) -> usize {
    let indent = line.len() - line.trim_start().len();
    indent / options.list_indent
}

/// Rebuild consecutive list lines into an item tree.
///
/// Consumes items at exactly `level`; blank lines between items are skipped;
/// deeper list lines (of either kind) recurse as children of the item that
/// precedes them; a shallower line or a non-list line returns control to the
/// caller. Returns the index of the first unconsumed line and the items
/// built at this level.
pub(crate) fn parse_list(
    lines: &[&str],
    start: usize,
    ordered: bool,
    level: usize,
    depth: usize,
    options: &ConvertOptions,
) -> Result<(usize, Vec<ListItem>)> {
    if depth > options.max_depth {
        return Err(Error::DepthExceeded {
            limit: options.max_depth,
        });
    }

    let mut items = Vec::new();
    let mut i = start;
    while i < lines.len() {
        let stripped = lines[i].trim();
        if nesting_level(lines[i], options) != level {
            break;
        }
        let pattern = if ordered { &ORDERED_ITEM } else { &UNORDERED_ITEM };
        let Some(captures) = pattern.captures(stripped) else {
            break;
        };

        let runs = parse_inline(&captures[1], options)?;
        let mut item = ListItem {
            ordered,
            level,
            runs,
            children: Vec::new(),
        };
        i += 1;

        // Look ahead for nested items.
        while i < lines.len() {
            let next = lines[i].trim();
            if next.is_empty() {
                i += 1;
                continue;
            }
            let next_level = nesting_level(lines[i], options);
            if next_level <= level {
                break;
            }
            let nested_ordered = ORDERED_ITEM.is_match(next);
            if nested_ordered || UNORDERED_ITEM.is_match(next) {
                let (next_index, nested) =
                    parse_list(lines, i, nested_ordered, next_level, depth + 1, options)?;
                i = next_index;
                item.children.extend(nested);
            } else {
                break;
            }
        }

        items.push(item);
    }
    Ok((i, items))
}
