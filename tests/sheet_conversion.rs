//! End-to-end spreadsheet conversion through an in-memory workbook.

use std::collections::HashMap;

use longan::sheet::{CellFont, CellSink, CellValue, convert_to_workbook};
use longan::{ConvertOptions, Result};

struct Sheet {
    name: String,
    cells: HashMap<(u32, u32), (CellValue, Option<CellFont>)>,
}

/// Minimal workbook that stores written cells keyed by (row, col).
struct MemoryWorkbook {
    sheets: Vec<Sheet>,
}

impl MemoryWorkbook {
    fn new() -> Self {
        MemoryWorkbook {
            sheets: vec![Sheet {
                name: "Data Report".into(),
                cells: HashMap::new(),
            }],
        }
    }

    fn names(&self) -> Vec<&str> {
        self.sheets.iter().map(|sheet| sheet.name.as_str()).collect()
    }

    fn cell(&self, sheet: &str, row: u32, col: u32) -> &CellValue {
        let sheet = self
            .sheets
            .iter()
            .find(|entry| entry.name == sheet)
            .unwrap_or_else(|| panic!("no sheet named {sheet}"));
        &sheet
            .cells
            .get(&(row, col))
            .unwrap_or_else(|| panic!("no cell at ({row}, {col})"))
            .0
    }

    fn font(&self, sheet: &str, row: u32, col: u32) -> Option<&CellFont> {
        let sheet = self.sheets.iter().find(|entry| entry.name == sheet)?;
        sheet.cells.get(&(row, col))?.1.as_ref()
    }

    fn formula(&self, sheet: &str, row: u32, col: u32) -> &str {
        match self.cell(sheet, row, col) {
            CellValue::Formula(text) => text,
            other => panic!("expected a formula, got {other:?}"),
        }
    }
}

impl CellSink for MemoryWorkbook {
    fn rename_default_sheet(&mut self, name: &str) -> Result<()> {
        self.sheets[0].name = name.to_string();
        Ok(())
    }

    fn create_sheet(&mut self, name: &str) -> Result<()> {
        self.sheets.push(Sheet {
            name: name.to_string(),
            cells: HashMap::new(),
        });
        Ok(())
    }

    fn set_cell(
        &mut self,
        sheet: &str,
        row: u32,
        col: u32,
        value: CellValue,
        font: Option<&CellFont>,
    ) -> Result<()> {
        let sheet = self
            .sheets
            .iter_mut()
            .find(|entry| entry.name == sheet)
            .expect("cells are only written to named sheets");
        sheet.cells.insert((row, col), (value, font.cloned()));
        Ok(())
    }
}

fn convert(markdown: &str) -> MemoryWorkbook {
    let mut workbook = MemoryWorkbook::new();
    convert_to_workbook(markdown, &mut workbook, &ConvertOptions::default()).unwrap();
    workbook
}

#[test]
fn single_sheet_default_name() {
    let workbook = convert("# Report\n\n| Name | Value |\n|------|-------|\n| A | 1 |");
    assert_eq!(workbook.names(), vec!["Data Report"]);
}

#[test]
fn sheet_markers_create_named_sheets_in_order() {
    let markdown = "\
## Sheet: Alpha

| A |
|---|
| 1 |

## Sheet: Beta

| B |
|---|
| 2 |

## Sheet: Gamma

| C |
|---|
| 3 |
";
    let workbook = convert(markdown);
    assert_eq!(workbook.names(), vec!["Alpha", "Beta", "Gamma"]);
}

#[test]
fn first_marker_after_content_keeps_default_sheet() {
    let markdown = "\
| A |
|---|
| 1 |

## Sheet: Second

| B |
|---|
| 2 |
";
    let workbook = convert(markdown);
    assert_eq!(workbook.names(), vec!["Data Report", "Second"]);
    assert_eq!(
        workbook.cell("Second", 2, 1),
        &CellValue::Int(2)
    );
}

#[test]
fn heading_fonts_and_row_spacing() {
    let workbook = convert("# Big\n\n## Smaller\n\n### Small");
    let first = workbook.font("Data Report", 1, 1).unwrap();
    assert_eq!((first.size, first.color), (16, Some("2F5597")));
    let second = workbook.font("Data Report", 3, 1).unwrap();
    assert_eq!((second.size, second.color), (14, Some("4472C4")));
    let third = workbook.font("Data Report", 5, 1).unwrap();
    assert_eq!((third.size, third.color), (12, None));
    assert!(third.bold);
}

#[test]
fn table_cells_are_typed_and_header_is_bold() {
    let markdown = "| Name | Count | Ratio | Active |\n|---|---|---|---|\n| A | 3 | 1.5 | true |";
    let workbook = convert(markdown);
    assert_eq!(
        workbook.cell("Data Report", 1, 1),
        &CellValue::String("Name".into())
    );
    assert!(workbook.font("Data Report", 1, 1).unwrap().bold);
    assert_eq!(workbook.cell("Data Report", 2, 2), &CellValue::Int(3));
    assert_eq!(workbook.cell("Data Report", 2, 3), &CellValue::Float(1.5));
    assert_eq!(workbook.cell("Data Report", 2, 4), &CellValue::Bool(true));
    assert!(workbook.font("Data Report", 2, 2).is_none());
}

#[test]
fn cross_sheet_reference() {
    let markdown = "\
## Sheet: Revenue

| Quarter | Amount |
|---------|--------|
| Q1      | 1000   |
| Q2      | 1200   |

## Sheet: Dashboard

| Metric | Value |
|--------|-------|
| Q1 Rev | =Revenue!T1.B[0] |
| Q2 Rev | =Revenue!T1.B[1] |
";
    let workbook = convert(markdown);
    assert_eq!(workbook.formula("Dashboard", 2, 2), "=Revenue!B2");
    assert_eq!(workbook.formula("Dashboard", 3, 2), "=Revenue!B3");
}

#[test]
fn forward_reference_resolves() {
    let markdown = "\
## Sheet: Dashboard

| Metric | Value |
|--------|-------|
| Total  | =Details!T1.B[0] |

## Sheet: Details

| Item | Amount |
|------|--------|
| Rent | 3000   |
";
    let workbook = convert(markdown);
    assert_eq!(workbook.formula("Dashboard", 2, 2), "=Details!B2");
}

#[test]
fn quoted_sheet_name_in_formula() {
    let markdown = "\
## Sheet: Sales Data

| Product | Revenue |
|---------|---------|
| Widget  | 5000    |

## Sheet: Summary

| Metric | Value |
|--------|-------|
| Total  | =Sales Data!T1.B[0] |
";
    let workbook = convert(markdown);
    assert_eq!(workbook.formula("Summary", 2, 2), "='Sales Data'!B2");
}

#[test]
fn mixed_local_and_cross_sheet_formula() {
    let markdown = "\
## Sheet: Revenue

| Quarter | Amount |
|---------|--------|
| Q1      | 1000   |

## Sheet: Costs

| Quarter | Amount |
|---------|--------|
| Q1      | 400    |

## Sheet: Profit

| Quarter | Revenue | Cost | Profit |
|---------|---------|------|--------|
| Q1      | =Revenue!T1.B[0] | =Costs!T1.B[0] | =B[0]-C[0] |
";
    let workbook = convert(markdown);
    assert_eq!(workbook.formula("Profit", 2, 2), "=Revenue!B2");
    assert_eq!(workbook.formula("Profit", 2, 3), "=Costs!B2");
    assert_eq!(workbook.formula("Profit", 2, 4), "=B2-C2");
}

#[test]
fn reference_into_sheet_with_leading_heading() {
    let markdown = "\
## Sheet: Source

# Monthly Data

| Month | Value |
|-------|-------|
| Jan   | 100   |
| Feb   | 200   |

## Sheet: Target

| Metric | Value |
|--------|-------|
| Jan    | =Source!T1.B[0] |
| Feb    | =Source!T1.B[1] |
";
    let workbook = convert(markdown);
    // The Source heading pushes its table down to row 3, so data rows are 4-5.
    assert_eq!(workbook.formula("Target", 2, 2), "=Source!B4");
    assert_eq!(workbook.formula("Target", 3, 2), "=Source!B5");
}

#[test]
fn cross_sheet_range_in_sum() {
    let markdown = "\
## Sheet: Data

| Name | Score |
|------|-------|
| A    | 10    |
| B    | 20    |
| C    | 30    |

## Sheet: Summary

| Metric | Value |
|--------|-------|
| Total  | =SUM(Data!T1.B[0]:T1.B[2]) |
";
    let workbook = convert(markdown);
    assert_eq!(
        workbook.formula("Summary", 2, 2),
        "=SUM(Data!B2:Data!B4)"
    );
}

#[test]
fn unresolved_reference_passes_through() {
    let markdown = "| Metric | Value |\n|---|---|\n| X | =Nowhere!T1.B[0] |";
    let workbook = convert(markdown);
    assert_eq!(
        workbook.formula("Data Report", 2, 2),
        "=Nowhere!T1.B[0]"
    );
}

#[test]
fn summary_counts() {
    let markdown = "\
# Title

| A |
|---|
| 1 |

## Sheet: Next

## Other heading

| B |
|---|
| 2 |
";
    let summary =
        convert_to_workbook(markdown, &mut MemoryWorkbook::new(), &ConvertOptions::default())
            .unwrap();
    assert_eq!(summary.sheets, 2);
    assert_eq!(summary.headings, 2);
    assert_eq!(summary.tables, 2);
}
