//! Spreadsheet position scanner.
//!
//! Dry-run first pass over the whole document. It simulates exactly the row
//! accounting of the placement pass, recording the start row of every table
//! on every sheet, and mutates nothing. The placement pass consumes the
//! resulting map, which is what makes forward references resolvable: a
//! formula may name a sheet or table that only appears later in the source.

use once_cell::sync::Lazy;
use regex::Regex;

use super::types::SheetPositions;
use crate::config::ConvertOptions;
use crate::grid::parse_grid;

/// Multi-sheet marker: `## Sheet: Name`.
pub(crate) static SHEET_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^##\s+Sheet:\s+(.+)$").unwrap());

/// Walk `lines` and compute the start row of every table on every sheet.
///
/// Row accounting mirrors the placement pass: headings advance the cursor by
/// 2 (content plus spacing), a table with `n` rows advances it by `n + 2`.
/// The first `## Sheet:` marker renames the default sheet when nothing has
/// been written yet; every other marker starts a new sheet with the row
/// cursor and table counter reset.
pub fn scan_positions(lines: &[&str], options: &ConvertOptions) -> SheetPositions {
    let mut positions = SheetPositions::new();
    let mut sheet = options.default_sheet_name.clone();
    let mut current_row: u32 = 1;
    let mut table_counter: u32 = 1;
    let mut first_sheet_named = false;

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i].trim();
        if line.is_empty() {
            i += 1;
            continue;
        }

        if let Some(captures) = SHEET_MARKER.captures(line) {
            let name = captures[1].trim().to_string();
            if first_sheet_named || current_row != 1 {
                current_row = 1;
                table_counter = 1;
            }
            sheet = name;
            first_sheet_named = true;
            i += 1;
            continue;
        }

        if line.starts_with('#') {
            current_row += 2;
            i += 1;
            continue;
        }

        if line.starts_with('|') {
            let (grid, next) = parse_grid(lines, i);
            i = next;
            if let Some(grid) = grid {
                positions.record(&sheet, format!("T{table_counter}"), current_row);
                current_row += grid.len() as u32 + 2;
                table_counter += 1;
            }
            continue;
        }

        // Other content is ignored on the spreadsheet path.
        i += 1;
    }
    positions
}
