//! Recursive-descent parser for inline markdown formatting.
//!
//! A line of text is resolved into an ordered sequence of formatting runs by
//! scanning for delimiter spans and re-entering each span's content
//! recursively with updated inherited flags. The delimiter rules are tried in
//! a fixed priority order which is the authoritative precedence contract:
//!
//! 1. `***x***`: bold + italic (recursive)
//! 2. `**x**`: bold (recursive)
//! 3. `~~x~~`: strikethrough (terminal run)
//! 4. `__x__`: underline (terminal run; `___` is rejected so the form never
//!    clashes with bold-italic notation)
//! 5. `*x*`: italic (recursive; tolerates an inner `**bold**` span without
//!    terminating early)
//! 6. `` `x` ``: code (terminal; content is literal)
//! 7. `[text](url)`: link (terminal; content is literal)
//!
//! Bold and italic accumulate via logical OR down the recursion and are
//! never reset, so combinations like bold-containing-italic-containing-
//! strikethrough come out naturally. Unmatched delimiters degrade to literal
//! text because each matcher only accepts balanced forms; nothing here
//! panics on malformed input. Recursion depth is bounded by
//! [`ConvertOptions::max_depth`] and fails closed.

use std::ops::Range;

use memchr::memchr;

use super::escape::EscapeContext;
use super::types::{FormatState, FormattingRun, Inline};
use crate::common::{Error, Result};
use crate::config::ConvertOptions;

/// Delimiter kinds, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Delimiter {
    BoldItalic,
    Bold,
    Strikethrough,
    Underline,
    Italic,
    Code,
    Link,
}

/// A matched delimiter span, with ranges relative to the candidate position.
#[derive(Debug)]
struct Span {
    kind: Delimiter,
    content: Range<usize>,
    /// URL range for link spans.
    url: Option<Range<usize>>,
    /// Total length of the span including delimiters.
    len: usize,
}

/// Parse a line of text into an ordered run sequence.
///
/// Escapes are protected before any delimiter matching and restored in the
/// final run text. A `<space><space>` line ending splits the text into
/// independently parsed segments joined by [`Inline::LineBreak`] markers.
///
/// # Examples
///
/// ```rust
/// use longan::ConvertOptions;
/// use longan::inline::{Inline, parse_inline};
///
/// let runs = parse_inline("**a *b* c**", &ConvertOptions::default())?;
/// assert_eq!(runs.len(), 3);
/// let Inline::Run(middle) = &runs[1] else { unreachable!() };
/// assert_eq!(middle.text, "b");
/// assert!(middle.bold && middle.italic);
/// # Ok::<(), longan::Error>(())
/// ```
pub fn parse_inline(text: &str, options: &ConvertOptions) -> Result<Vec<Inline>> {
    parse_inline_inherited(text, false, false, options)
}

/// Parse a line of text with an inherited bold/italic context.
///
/// The inherited flags apply to every run produced, in addition to whatever
/// nested delimiters contribute.
pub fn parse_inline_inherited(
    text: &str,
    bold: bool,
    italic: bool,
    options: &ConvertOptions,
) -> Result<Vec<Inline>> {
    let mut ctx = EscapeContext::new();
    let protected = ctx.protect(text);

    let segments: Vec<&str> = protected.split("  \n").collect();
    let last = segments.len() - 1;
    let mut out = Vec::new();
    for (idx, segment) in segments.iter().enumerate() {
        if segment.is_empty() && idx == last {
            continue;
        }
        parse_segment(
            segment,
            FormatState { bold, italic },
            0,
            options,
            &ctx,
            &mut out,
        )?;
        if idx < last {
            out.push(Inline::LineBreak);
        }
    }
    Ok(out)
}

/// Parse one break-free segment, appending runs to `out`.
fn parse_segment(
    text: &str,
    state: FormatState,
    depth: usize,
    options: &ConvertOptions,
    ctx: &EscapeContext,
    out: &mut Vec<Inline>,
) -> Result<()> {
    if depth > options.max_depth {
        return Err(Error::DepthExceeded {
            limit: options.max_depth,
        });
    }

    let bytes = text.as_bytes();
    let mut i = 0;
    let mut literal_start = 0;
    while i < bytes.len() {
        // All delimiters are ASCII, so a bytewise scan only ever stops at
        // character boundaries.
        if matches!(bytes[i], b'*' | b'~' | b'_' | b'`' | b'[')
            && let Some(span) = match_delimiter(&bytes[i..])
        {
            flush_literal(text, literal_start..i, state, ctx, out);
            let content = &text[i + span.content.start..i + span.content.end];
            match span.kind {
                Delimiter::BoldItalic => {
                    parse_segment(content, state.nested(true, true), depth + 1, options, ctx, out)?
                }
                Delimiter::Bold => {
                    parse_segment(content, state.nested(true, false), depth + 1, options, ctx, out)?
                }
                Delimiter::Italic => {
                    parse_segment(content, state.nested(false, true), depth + 1, options, ctx, out)?
                }
                Delimiter::Strikethrough => out.push(Inline::Run(FormattingRun {
                    text: ctx.restore(content),
                    bold: state.bold,
                    italic: state.italic,
                    strikethrough: true,
                    ..FormattingRun::default()
                })),
                Delimiter::Underline => out.push(Inline::Run(FormattingRun {
                    text: ctx.restore(content),
                    bold: state.bold,
                    italic: state.italic,
                    underline: true,
                    ..FormattingRun::default()
                })),
                Delimiter::Code => out.push(Inline::Run(FormattingRun {
                    text: ctx.restore(content),
                    bold: state.bold,
                    italic: state.italic,
                    code: true,
                    ..FormattingRun::default()
                })),
                Delimiter::Link => {
                    let url = span.url.as_ref().map_or("", |u| &text[i + u.start..i + u.end]);
                    out.push(Inline::Run(FormattingRun {
                        text: ctx.restore(content),
                        link_url: Some(ctx.restore(url)),
                        ..FormattingRun::default()
                    }));
                }
            }
            i += span.len;
            literal_start = i;
            continue;
        }
        i += 1;
    }
    flush_literal(text, literal_start..bytes.len(), state, ctx, out);
    Ok(())
}

/// Emit the pending literal fragment, if any, inheriting the current context.
fn flush_literal(
    text: &str,
    range: Range<usize>,
    state: FormatState,
    ctx: &EscapeContext,
    out: &mut Vec<Inline>,
) {
    if range.is_empty() {
        return;
    }
    out.push(Inline::Run(FormattingRun {
        text: ctx.restore(&text[range]),
        bold: state.bold,
        italic: state.italic,
        ..FormattingRun::default()
    }));
}

/// Try each delimiter rule at the start of `rest`, in priority order.
fn match_delimiter(rest: &[u8]) -> Option<Span> {
    match rest[0] {
        b'*' => match_bold_italic(rest)
            .or_else(|| match_bold(rest))
            .or_else(|| match_italic(rest)),
        b'~' => match_strikethrough(rest),
        b'_' => match_underline(rest),
        b'`' => match_code(rest),
        b'[' => match_link(rest),
        _ => None,
    }
}

/// Find the next occurrence of `needle` in `bytes` at or after `start`.
fn find_seq(bytes: &[u8], start: usize, needle: &[u8]) -> Option<usize> {
    let mut i = start;
    while let Some(offset) = memchr(needle[0], bytes.get(i..)?) {
        let pos = i + offset;
        if pos + needle.len() > bytes.len() {
            return None;
        }
        if &bytes[pos..pos + needle.len()] == needle {
            return Some(pos);
        }
        i = pos + 1;
    }
    None
}

/// `***x***` with non-empty content.
fn match_bold_italic(rest: &[u8]) -> Option<Span> {
    if !rest.starts_with(b"***") {
        return None;
    }
    let close = find_seq(rest, 3, b"***")?;
    (close > 3).then(|| Span {
        kind: Delimiter::BoldItalic,
        content: 3..close,
        url: None,
        len: close + 3,
    })
}

/// `**x**`, closing at the first `**` after non-empty content.
fn match_bold(rest: &[u8]) -> Option<Span> {
    if !rest.starts_with(b"**") {
        return None;
    }
    let close = find_seq(rest, 2, b"**")?;
    (close > 2).then(|| Span {
        kind: Delimiter::Bold,
        content: 2..close,
        url: None,
        len: close + 2,
    })
}

/// `~~x~~` with non-empty content.
fn match_strikethrough(rest: &[u8]) -> Option<Span> {
    if !rest.starts_with(b"~~") {
        return None;
    }
    let close = find_seq(rest, 2, b"~~")?;
    (close > 2).then(|| Span {
        kind: Delimiter::Strikethrough,
        content: 2..close,
        url: None,
        len: close + 2,
    })
}

/// `__x__` with non-empty content; `___` openers are rejected.
fn match_underline(rest: &[u8]) -> Option<Span> {
    if !rest.starts_with(b"__") || rest.get(2) == Some(&b'_') {
        return None;
    }
    let close = find_seq(rest, 2, b"__")?;
    (close > 2).then(|| Span {
        kind: Delimiter::Underline,
        content: 2..close,
        url: None,
        len: close + 2,
    })
}

/// `*x*` where the content may contain complete `**bold**` groups.
///
/// The scan consumes nested `**…**` groups whole so an inner bold span does
/// not terminate the italic early. If the end of input is reached without a
/// closing `*`, the span closes at the first lone `*` instead, which is what
/// the balanced-forms rule degrades to when a trailing group is incomplete.
fn match_italic(rest: &[u8]) -> Option<Span> {
    debug_assert_eq!(rest[0], b'*');
    let mut j = 1;
    while j < rest.len() {
        if rest[j] == b'*' {
            if rest.get(j + 1) == Some(&b'*') {
                // Candidate nested `**bold**` group; consume it whole when
                // complete, otherwise this star closes the italic.
                let mut k = j + 2;
                while k < rest.len() && rest[k] != b'*' {
                    k += 1;
                }
                if k > j + 2 && rest.get(k) == Some(&b'*') && rest.get(k + 1) == Some(&b'*') {
                    j = k + 2;
                    continue;
                }
            }
            return italic_close(j);
        }
        j += 1;
    }
    // No closer found after consuming groups; retry closing at the first
    // lone star, surrendering any groups that were consumed.
    let close = find_seq(rest, 2, b"*")?;
    italic_close(close)
}

fn italic_close(close: usize) -> Option<Span> {
    (close > 1).then_some(Span {
        kind: Delimiter::Italic,
        content: 1..close,
        url: None,
        len: close + 1,
    })
}

/// `` `x` `` with non-empty content.
fn match_code(rest: &[u8]) -> Option<Span> {
    debug_assert_eq!(rest[0], b'`');
    let close = 1 + memchr(b'`', rest.get(1..)?)?;
    (close > 1).then(|| Span {
        kind: Delimiter::Code,
        content: 1..close,
        url: None,
        len: close + 1,
    })
}

/// `[text](url)`; text may not contain `]`, url may not contain `)`.
/// Both may be empty.
fn match_link(rest: &[u8]) -> Option<Span> {
    debug_assert_eq!(rest[0], b'[');
    let bracket = 1 + memchr(b']', rest.get(1..)?)?;
    if rest.get(bracket + 1) != Some(&b'(') {
        return None;
    }
    let paren = bracket + 2 + memchr(b')', rest.get(bracket + 2..)?)?;
    Some(Span {
        kind: Delimiter::Link,
        content: 1..bracket,
        url: Some(bracket + 2..paren),
        len: paren + 1,
    })
}
