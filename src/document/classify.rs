//! Block structure classification.
//!
//! A document is consumed as a sequence of lines; each line or line group is
//! classified into one block element. First match wins, in this order: page
//! break, horizontal rule, image, alignment (inline or block-open), ordered
//! list, unordered list, table, soft-line-break group, heading, block quote,
//! plain paragraph. Headings never collide with the structural patterns
//! checked before them, so checking them after the structural passes is
//! order-equivalent; a heading ending in a soft line break is folded into
//! its group.
//!
//! A failing sub-parser degrades its block to a plain paragraph and the
//! conversion continues; only depth exhaustion is propagated, since it
//! signals pathological input rather than one malformed block.

use once_cell::sync::Lazy;
use regex::Regex;

use super::block::{Alignment, BlockElement};
use super::list::{ORDERED_ITEM, UNORDERED_ITEM, nesting_level, parse_list};
use crate::common::{Error, Result};
use crate::config::ConvertOptions;
use crate::grid::parse_grid;
use crate::inline::{FormattingRun, Inline, parse_inline};

static HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(#{1,6})\s+(.+)$").unwrap());
static PAGE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-{3,}\s*$").unwrap());
static HORIZONTAL_RULE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\*{3,}\s*$").unwrap());
static IMAGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^!\[([^\]]*)\]\(([^)]+)\)$").unwrap());

// Inline (single-line):  <center>text</center>  or  <div align="x">text</div>
static ALIGN_INLINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)^(?:<center>(.*)</center>|<div\s+align="(right|center|justify|left)">(.*)</div>)$"#)
        .unwrap()
});
// Block open:  <center>  or  <div align="x">  (content on following lines)
static ALIGN_OPEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)^(?:<center>|<div\s+align="(right|center|justify|left)">)\s*$"#).unwrap()
});
// Block close:  </center>  or  </div>
static ALIGN_CLOSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^</(?:center|div)>\s*$").unwrap());

/// Detect an alignment tag (inline or block-open) on `line`.
///
/// Returns `(Some(inner_text), alignment)` for an inline tag,
/// `(None, alignment)` for a block-open tag, or `None` if no match.
pub(crate) fn detect_alignment(line: &str) -> Option<(Option<String>, Alignment)> {
    if let Some(captures) = ALIGN_INLINE.captures(line) {
        if let Some(inner) = captures.get(1) {
            return Some((Some(inner.as_str().trim().to_string()), Alignment::Center));
        }
        let alignment = captures
            .get(2)
            .and_then(|keyword| Alignment::from_keyword(keyword.as_str()))
            .unwrap_or(Alignment::Left);
        let inner = captures.get(3).map_or("", |m| m.as_str()).trim();
        return Some((Some(inner.to_string()), alignment));
    }
    if let Some(captures) = ALIGN_OPEN.captures(line) {
        let alignment = captures
            .get(1)
            .and_then(|keyword| Alignment::from_keyword(keyword.as_str()))
            .unwrap_or(Alignment::Center);
        return Some((None, alignment));
    }
    None
}

/// Whether any line of `value` contains block-level markdown content.
///
/// Callers use this to decide between plain-text and markdown handling for
/// text of unknown provenance.
pub fn contains_block_markdown(value: &str) -> bool {
    value.lines().any(|line| {
        let stripped = line.trim();
        HEADING.is_match(stripped)
            || PAGE_BREAK.is_match(stripped)
            || HORIZONTAL_RULE.is_match(stripped)
            || IMAGE.is_match(stripped)
            || ORDERED_ITEM.is_match(stripped)
            || UNORDERED_ITEM.is_match(stripped)
            || detect_alignment(stripped).is_some()
    })
}

/// Classify all lines of a document into block elements.
///
/// One malformed block never aborts the conversion: its error is logged and
/// the block degrades to a plain paragraph of its raw text.
pub(crate) fn classify_blocks(
    lines: &[&str],
    options: &ConvertOptions,
) -> Result<Vec<BlockElement>> {
    let mut blocks = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        let stripped = lines[i].trim();
        if stripped.is_empty() {
            i += 1;
            continue;
        }
        match classify_one(lines, i, options) {
            Ok((next, mut emitted)) => {
                blocks.append(&mut emitted);
                i = next;
            }
            Err(Error::DepthExceeded { limit }) => {
                return Err(Error::DepthExceeded { limit });
            }
            Err(err) => {
                log::warn!("failed to classify block at line {i}: {err}; keeping it as a plain paragraph");
                blocks.push(BlockElement::Paragraph {
                    runs: vec![Inline::Run(FormattingRun::plain(stripped))],
                });
                i += 1;
            }
        }
    }
    Ok(blocks)
}

/// Classify the block starting at line `i`.
///
/// Returns the index of the first unconsumed line together with the emitted
/// elements (a list block emits one element per top-level item).
fn classify_one(
    lines: &[&str],
    i: usize,
    options: &ConvertOptions,
) -> Result<(usize, Vec<BlockElement>)> {
    let raw = lines[i];
    let stripped = raw.trim();

    // Page break (---) before lists so `---` is never an empty list item;
    // horizontal rule (***) before emphasis ever gets a chance.
    if PAGE_BREAK.is_match(stripped) {
        return Ok((i + 1, vec![BlockElement::PageBreak]));
    }
    if HORIZONTAL_RULE.is_match(stripped) {
        return Ok((i + 1, vec![BlockElement::HorizontalRule]));
    }

    if let Some(captures) = IMAGE.captures(stripped) {
        return Ok((
            i + 1,
            vec![BlockElement::Image {
                url: captures[2].to_string(),
                alt: captures[1].to_string(),
            }],
        ));
    }

    if let Some((inner, alignment)) = detect_alignment(stripped) {
        return classify_alignment(lines, i, inner, alignment, options);
    }

    let ordered = ORDERED_ITEM.is_match(stripped);
    if ordered || UNORDERED_ITEM.is_match(stripped) {
        let level = nesting_level(raw, options);
        let (next, items) = parse_list(lines, i, ordered, level, 0, options)?;
        if next > i {
            let elements = items.into_iter().map(BlockElement::ListItem).collect();
            return Ok((next, elements));
        }
        // No progress means the line only looked like a list item; fall
        // through to the text arms below.
    }

    if stripped.starts_with('|') && stripped.ends_with('|') {
        let (grid, next) = parse_grid(lines, i);
        if let Some(grid) = grid {
            return Ok((next, vec![BlockElement::Table { grid }]));
        }
        // A lone pipe-bounded line is rejected and handled as a paragraph.
    }

    if raw.ends_with("  ") {
        return classify_soft_group(lines, i, options);
    }

    if let Some(captures) = HEADING.captures(stripped) {
        let level = captures[1].len() as u8;
        let runs = parse_inline(&captures[2], options)?;
        return Ok((i + 1, vec![BlockElement::Heading { level, runs }]));
    }

    if let Some(rest) = stripped.strip_prefix('>') {
        let runs = parse_inline(rest.trim_start(), options)?;
        return Ok((i + 1, vec![BlockElement::Quote { runs }]));
    }

    let runs = parse_inline(stripped, options)?;
    Ok((i + 1, vec![BlockElement::Paragraph { runs }]))
}

/// Handle an alignment tag: a single aligned paragraph for the inline form,
/// or a multi-line region terminated by a close tag for the block form.
fn classify_alignment(
    lines: &[&str],
    i: usize,
    inner: Option<String>,
    alignment: Alignment,
    options: &ConvertOptions,
) -> Result<(usize, Vec<BlockElement>)> {
    if let Some(inner) = inner {
        let runs = parse_inline(&inner, options)?;
        return Ok((
            i + 1,
            vec![BlockElement::AlignmentBlock {
                alignment,
                paragraphs: vec![runs],
            }],
        ));
    }

    // Lines inside the region accumulate as independent aligned paragraphs
    // until the close tag; an unterminated region runs to the end of input.
    let mut paragraphs = Vec::new();
    let mut j = i + 1;
    while j < lines.len() {
        let stripped = lines[j].trim();
        if ALIGN_CLOSE.is_match(stripped) {
            j += 1;
            break;
        }
        if !stripped.is_empty() {
            paragraphs.push(parse_inline(stripped, options)?);
        }
        j += 1;
    }
    Ok((
        j,
        vec![BlockElement::AlignmentBlock {
            alignment,
            paragraphs,
        }],
    ))
}

/// Group consecutive soft-break lines (up to and including the first line
/// without the trailing two-space marker) into one element, joined by hard
/// break markers. Heading and quote prefixes on the first line decide what
/// the whole group becomes.
fn classify_soft_group(
    lines: &[&str],
    i: usize,
    options: &ConvertOptions,
) -> Result<(usize, Vec<BlockElement>)> {
    let mut parts: Vec<&str> = Vec::new();
    let mut j = i;
    while j < lines.len() && lines[j].ends_with("  ") {
        parts.push(lines[j].trim());
        j += 1;
    }
    if j < lines.len() && !lines[j].trim().is_empty() {
        parts.push(lines[j].trim());
        j += 1;
    }

    if let Some(captures) = HEADING.captures(parts[0]) {
        let level = captures[1].len() as u8;
        let mut joined = captures[2].to_string();
        for part in &parts[1..] {
            joined.push_str("  \n");
            joined.push_str(part);
        }
        let runs = parse_inline(&joined, options)?;
        return Ok((j, vec![BlockElement::Heading { level, runs }]));
    }

    if parts[0].starts_with('>') {
        let joined = parts
            .iter()
            .map(|part| part.strip_prefix('>').map_or(*part, str::trim_start))
            .collect::<Vec<_>>()
            .join("  \n");
        let runs = parse_inline(&joined, options)?;
        return Ok((j, vec![BlockElement::Quote { runs }]));
    }

    let runs = parse_inline(&parts.join("  \n"), options)?;
    Ok((j, vec![BlockElement::Paragraph { runs }]))
}
