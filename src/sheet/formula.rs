//! Formula reference resolution.
//!
//! Formula cells reference table data symbolically, as `T<id>.<Col>[<idx>]`
//! tokens with an optional `Sheet!` qualifier, where `idx` is a zero-based
//! data row index below the table's header row. The resolver rewrites these
//! tokens into absolute addresses using the position map built by the
//! scanner. Shapes are rewritten most-specific first, so a function-wrapped
//! range is never picked apart by the single-cell pass:
//!
//! 1. `Sheet!T1.SUM(B[0]:D[0])` becomes `SUM(Sheet!B2:Sheet!D2)`, the
//!    function name hoisted outside the sheet-qualified range
//! 2. `Sheet!T1.B[0]:T1.B[2]` becomes `Sheet!B2:Sheet!B4`
//! 3. `Sheet!T1.B[0]` becomes `Sheet!B2` (`'Sheet Name'!B2` when the name
//!    contains a space)
//! 4. `T1.B[0]` resolves against the current sheet's tables
//! 5. bare `B[0]` resolves against the table currently being placed
//!
//! A token whose sheet or table is absent from the position map is left in
//! the output unchanged and reported through `log::warn!`; a wrong address
//! is never fabricated. To keep that guarantee across passes, a pass that
//! declines a token swaps it for an opaque marker first, so no later pass
//! can rewrite fragments inside it (a bare `B[0]` inside an unresolved
//! `Missing!T1.SUM(B[0]:D[0])` must not resolve against the current table);
//! markers are swapped back verbatim at the end.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::types::{SheetPositions, TablePositions};

const SHEET: &str = "[A-Za-z0-9_][A-Za-z0-9_ ]*";

static CROSS_FUNC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"({SHEET})!T(\d+)\.([A-Z]+)\(([A-Z]{{1,3}})\[(\d+)\]:([A-Z]{{1,3}})\[(\d+)\]\)"
    ))
    .unwrap()
});

static CROSS_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"({SHEET})!T(\d+)\.([A-Z]{{1,3}})\[(\d+)\]:T(\d+)\.([A-Z]{{1,3}})\[(\d+)\]"
    ))
    .unwrap()
});

static CROSS_SINGLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"({SHEET})!T(\d+)\.([A-Z]{{1,3}})\[(\d+)\]")).unwrap()
});

// The regex engine has no lookbehind; the guard character before the token
// is captured and re-emitted instead. `!` and `.` in the guard class keep
// these passes off the remnants of an unresolved qualified token.
static LOCAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(^|[^A-Za-z0-9_!.'])T(\d+)\.([A-Z]{1,3})\[(\d+)\]").unwrap());

static BARE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(^|[^A-Za-z0-9_.!\]])([A-Z]{1,3})\[(\d+)\]").unwrap());

/// Marker delimiter for frozen tokens. A private-use codepoint, so it can
/// never collide with formula text, and distinct from the escape
/// protector's placeholder range.
const FROZEN_MARKER: char = '\u{F8FF}';

/// Tokens a pass declined to resolve, parked behind opaque markers.
///
/// The marker text contains nothing the token patterns can match, which is
/// what keeps later passes from rewriting fragments of an unresolved token.
#[derive(Default)]
struct FrozenTokens {
    tokens: Vec<String>,
}

impl FrozenTokens {
    /// Park `token` and return the marker standing in for it.
    fn freeze(&mut self, token: &str) -> String {
        let marker = format!("{FROZEN_MARKER}{}{FROZEN_MARKER}", self.tokens.len());
        self.tokens.push(token.to_string());
        marker
    }

    /// Swap every marker back for its original token text.
    fn thaw(&self, text: &str) -> String {
        if self.tokens.is_empty() {
            return text.to_string();
        }
        let mut out = text.to_string();
        for (index, token) in self.tokens.iter().enumerate() {
            out = out.replace(&format!("{FROZEN_MARKER}{index}{FROZEN_MARKER}"), token);
        }
        out
    }
}

/// `Sheet!` output prefix, single-quoted when the name contains a space.
fn sheet_prefix(name: &str) -> String {
    if name.contains(' ') {
        format!("'{name}'!")
    } else {
        format!("{name}!")
    }
}

/// Absolute row of data index `idx` in a table starting at `start`; the
/// `+ 1` steps over the header row occupying the start row itself.
fn data_row(start: u32, idx: u32) -> u32 {
    start + 1 + idx
}

fn cell(column: &str, row: u32) -> String {
    let mut buffer = itoa::Buffer::new();
    format!("{column}{}", buffer.format(row))
}

/// Rewrite every symbolic table reference in `formula` to an absolute
/// address.
///
/// `current_table_start` is the start row of the table the formula cell
/// belongs to and anchors bare `Col[idx]` tokens; `local` holds the current
/// sheet's table positions; `all` is the full document position map.
pub fn resolve_references(
    formula: &str,
    current_table_start: u32,
    local: &TablePositions,
    all: &SheetPositions,
) -> String {
    let mut frozen = FrozenTokens::default();

    let pass1 = CROSS_FUNC.replace_all(formula, |caps: &Captures| {
        let sheet = caps[1].trim();
        let table = format!("T{}", &caps[2]);
        match all.table_start(sheet, &table) {
            Some(start) => {
                let prefix = sheet_prefix(sheet);
                let first = cell(&caps[4], data_row(start, caps[5].parse().unwrap_or(0)));
                let second = cell(&caps[6], data_row(start, caps[7].parse().unwrap_or(0)));
                format!("{}({prefix}{first}:{prefix}{second})", &caps[3])
            }
            None => {
                log::warn!("unresolved table reference {sheet}!{table}");
                frozen.freeze(&caps[0])
            }
        }
    });

    let pass2 = CROSS_RANGE.replace_all(&pass1, |caps: &Captures| {
        let sheet = caps[1].trim();
        let first_table = format!("T{}", &caps[2]);
        let second_table = format!("T{}", &caps[5]);
        let starts = all
            .table_start(sheet, &first_table)
            .zip(all.table_start(sheet, &second_table));
        match starts {
            Some((first_start, second_start)) => {
                let prefix = sheet_prefix(sheet);
                let first = cell(&caps[3], data_row(first_start, caps[4].parse().unwrap_or(0)));
                let second = cell(&caps[6], data_row(second_start, caps[7].parse().unwrap_or(0)));
                format!("{prefix}{first}:{prefix}{second}")
            }
            None => {
                log::warn!(
                    "unresolved range endpoints {sheet}!{first_table}:{second_table}"
                );
                frozen.freeze(&caps[0])
            }
        }
    });

    let pass3 = CROSS_SINGLE.replace_all(&pass2, |caps: &Captures| {
        let sheet = caps[1].trim();
        let table = format!("T{}", &caps[2]);
        match all.table_start(sheet, &table) {
            Some(start) => {
                let address = cell(&caps[3], data_row(start, caps[4].parse().unwrap_or(0)));
                format!("{}{address}", sheet_prefix(sheet))
            }
            None => {
                log::warn!("unresolved table reference {sheet}!{table}");
                frozen.freeze(&caps[0])
            }
        }
    });

    let pass4 = LOCAL.replace_all(&pass3, |caps: &Captures| {
        let table = format!("T{}", &caps[2]);
        match local.get(&table) {
            Some(&start) => {
                let address = cell(&caps[3], data_row(start, caps[4].parse().unwrap_or(0)));
                format!("{}{address}", &caps[1])
            }
            None => {
                log::warn!("unresolved local table reference {table}");
                // The guard prefix is outside the token; only the token
                // itself gets parked.
                format!("{}{}", &caps[1], frozen.freeze(&caps[0][caps[1].len()..]))
            }
        }
    });

    let resolved = BARE.replace_all(&pass4, |caps: &Captures| {
        let address = cell(
            &caps[2],
            data_row(current_table_start, caps[3].parse().unwrap_or(0)),
        );
        format!("{}{address}", &caps[1])
    });

    frozen.thaw(&resolved)
}
