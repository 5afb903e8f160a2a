//! Multi-sheet placement driver.
//!
//! Second pass of the spreadsheet pipeline. The position scan over the whole
//! document completes first; only then does this pass walk the lines again
//! and mutate the sink, so a formula can reference a table that appears
//! later in the source. The two phases must never interleave.

use super::CellSink;
use super::formula::resolve_references;
use super::scan::{SHEET_MARKER, scan_positions};
use super::types::{CellFont, CellValue, SheetPositions, TablePositions};
use crate::common::Result;
use crate::config::ConvertOptions;
use crate::grid::parse_grid;

/// Counters reported after a conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionSummary {
    /// Sheets written to, including the default sheet.
    pub sheets: usize,
    /// Heading cells written.
    pub headings: usize,
    /// Tables placed.
    pub tables: usize,
}

/// Convert markdown into a multi-sheet workbook through `sink`.
///
/// Recognizes `## Sheet:` markers, headings, and tables; everything else is
/// skipped on this path. Heading cells get level-dependent fonts, table
/// header rows are bold, data cells are type-inferred, and `=`-prefixed
/// cells pass through the formula resolver.
pub fn convert_to_workbook<S: CellSink>(
    markdown: &str,
    sink: &mut S,
    options: &ConvertOptions,
) -> Result<ConversionSummary> {
    log::debug!("starting workbook conversion");
    let lines: Vec<&str> = markdown.lines().collect();
    let positions = scan_positions(&lines, options);

    let mut summary = ConversionSummary {
        sheets: 1,
        ..Default::default()
    };
    let mut sheet = options.default_sheet_name.clone();
    let mut current_row: u32 = 1;
    let mut first_sheet_named = false;

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i].trim();
        if line.is_empty() {
            i += 1;
            continue;
        }

        if let Some(captures) = SHEET_MARKER.captures(line) {
            let name = captures[1].trim();
            if !first_sheet_named && current_row == 1 {
                sink.rename_default_sheet(name)?;
            } else {
                sink.create_sheet(name)?;
                current_row = 1;
                summary.sheets += 1;
            }
            sheet = name.to_string();
            first_sheet_named = true;
            i += 1;
            continue;
        }

        if line.starts_with('#') {
            let level = line.bytes().take_while(|&b| b == b'#').count();
            let text = line.trim_start_matches('#').trim();
            sink.set_cell(
                &sheet,
                current_row,
                1,
                CellValue::String(text.to_string()),
                Some(&CellFont::heading(level.min(u8::MAX as usize) as u8)),
            )?;
            summary.headings += 1;
            current_row += 2;
            i += 1;
            continue;
        }

        if line.starts_with('|') {
            let (grid, next) = parse_grid(&lines, i);
            i = next;
            if let Some(grid) = grid {
                let empty = TablePositions::new();
                let local = positions.sheet(&sheet).unwrap_or(&empty);
                place_grid(&grid, sink, &sheet, current_row, local, &positions)?;
                current_row += grid.len() as u32 + 2;
                summary.tables += 1;
            }
            continue;
        }

        i += 1;
    }
    log::debug!(
        "workbook conversion done (sheets={}, headings={}, tables={})",
        summary.sheets,
        summary.headings,
        summary.tables
    );
    Ok(summary)
}

/// Write one grid at `table_start`: header row first, data rows below it.
fn place_grid<S: CellSink>(
    grid: &[Vec<String>],
    sink: &mut S,
    sheet: &str,
    table_start: u32,
    local: &TablePositions,
    all: &SheetPositions,
) -> Result<()> {
    let header_font = CellFont::header();
    for (row_offset, cells) in grid.iter().enumerate() {
        let row = table_start + row_offset as u32;
        for (col_offset, text) in cells.iter().enumerate() {
            let col = col_offset as u32 + 1;
            if row_offset == 0 {
                sink.set_cell(
                    sheet,
                    row,
                    col,
                    CellValue::String(text.clone()),
                    Some(&header_font),
                )?;
            } else if text.starts_with('=') {
                let resolved = resolve_references(text, table_start, local, all);
                sink.set_cell(sheet, row, col, CellValue::Formula(resolved), None)?;
            } else {
                sink.set_cell(sheet, row, col, CellValue::infer_from_str(text), None)?;
            }
        }
    }
    Ok(())
}
