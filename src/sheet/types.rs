//! Spreadsheet model value types and the position map.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Value of a single spreadsheet cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    /// Empty cell
    Empty,
    /// Boolean value
    Bool(bool),
    /// 64-bit signed integer
    Int(i64),
    /// 64-bit floating point number
    Float(f64),
    /// String value
    String(String),
    /// Formula text, including the leading `=`
    Formula(String),
}

impl CellValue {
    /// Infer a typed value from raw cell text.
    ///
    /// Integers win over floats; `true`/`false` (case-insensitive) become
    /// booleans; anything else stays a string. Formula cells are the
    /// caller's concern, since the resolver has to run on them first.
    pub fn infer_from_str(text: &str) -> Self {
        if text.is_empty() {
            CellValue::Empty
        } else if let Ok(int_val) = text.parse::<i64>() {
            CellValue::Int(int_val)
        } else if let Ok(float_val) = text.parse::<f64>() {
            CellValue::Float(float_val)
        } else if text.eq_ignore_ascii_case("true") {
            CellValue::Bool(true)
        } else if text.eq_ignore_ascii_case("false") {
            CellValue::Bool(false)
        } else {
            CellValue::String(text.to_string())
        }
    }
}

/// Font attributes attached to a written cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellFont {
    /// Point size.
    pub size: u8,
    pub bold: bool,
    /// RGB hex color without the leading `#`, if not the default.
    pub color: Option<&'static str>,
}

impl CellFont {
    /// Font for a heading cell of the given level.
    pub fn heading(level: u8) -> Self {
        match level {
            1 => CellFont {
                size: 16,
                bold: true,
                color: Some("2F5597"),
            },
            2 => CellFont {
                size: 14,
                bold: true,
                color: Some("4472C4"),
            },
            _ => CellFont {
                size: 12,
                bold: true,
                color: None,
            },
        }
    }

    /// Font for a table header row cell.
    pub fn header() -> Self {
        CellFont {
            size: 11,
            bold: true,
            color: None,
        }
    }
}

/// Start rows of the tables on one sheet, keyed by table id (`"T1"`, …).
pub type TablePositions = HashMap<String, u32>;

/// Table start rows for every sheet of a document, keyed by sheet name.
///
/// Built once per document by the position scanner and read-only during the
/// placement pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SheetPositions {
    sheets: HashMap<String, TablePositions>,
}

impl SheetPositions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the start row of `table_id` on `sheet`.
    pub fn record(&mut self, sheet: &str, table_id: String, start_row: u32) {
        self.sheets
            .entry(sheet.to_string())
            .or_default()
            .insert(table_id, start_row);
    }

    /// Start row of `table_id` on `sheet`, if both are known.
    pub fn table_start(&self, sheet: &str, table_id: &str) -> Option<u32> {
        self.sheets.get(sheet)?.get(table_id).copied()
    }

    /// All table positions of one sheet.
    pub fn sheet(&self, name: &str) -> Option<&TablePositions> {
        self.sheets.get(name)
    }

    /// Number of sheets that have at least one table recorded.
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_inference() {
        assert_eq!(CellValue::infer_from_str(""), CellValue::Empty);
        assert_eq!(CellValue::infer_from_str("42"), CellValue::Int(42));
        assert_eq!(CellValue::infer_from_str("-7"), CellValue::Int(-7));
        assert_eq!(CellValue::infer_from_str("3.5"), CellValue::Float(3.5));
        assert_eq!(CellValue::infer_from_str("TRUE"), CellValue::Bool(true));
        assert_eq!(CellValue::infer_from_str("false"), CellValue::Bool(false));
        assert_eq!(
            CellValue::infer_from_str("hello"),
            CellValue::String("hello".into())
        );
        // Digits win over the boolean arm.
        assert_eq!(CellValue::infer_from_str("1"), CellValue::Int(1));
    }

    #[test]
    fn test_heading_fonts() {
        assert_eq!(CellFont::heading(1).size, 16);
        assert_eq!(CellFont::heading(1).color, Some("2F5597"));
        assert_eq!(CellFont::heading(2).color, Some("4472C4"));
        assert_eq!(CellFont::heading(3).size, 12);
        assert_eq!(CellFont::heading(6).color, None);
        assert!(CellFont::header().bold);
    }

    #[test]
    fn test_position_map() {
        let mut positions = SheetPositions::new();
        positions.record("Revenue", "T1".into(), 1);
        positions.record("Revenue", "T2".into(), 7);
        positions.record("Costs", "T1".into(), 3);
        assert_eq!(positions.table_start("Revenue", "T2"), Some(7));
        assert_eq!(positions.table_start("Costs", "T1"), Some(3));
        assert_eq!(positions.table_start("Costs", "T2"), None);
        assert_eq!(positions.table_start("Missing", "T1"), None);
        assert_eq!(positions.sheet_count(), 2);
    }
}
