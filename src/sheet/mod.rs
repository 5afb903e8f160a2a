//! Spreadsheet model.
//!
//! The spreadsheet path runs in two strictly ordered phases: a dry-run
//! [`scan_positions`] pass over the whole document computes where every
//! table will land, then [`convert_to_workbook`] walks the document again
//! and writes cells through a [`CellSink`], resolving formula references
//! against the scanned positions. The scan must fully complete before any
//! cell is written; formulas may reference sheets and tables that appear
//! later in the source.
//!
//! ## Examples
//!
//! ```rust
//! use longan::config::ConvertOptions;
//! use longan::sheet::scan_positions;
//!
//! let markdown = "# Title\n\n| A | B |\n|---|---|\n| 1 | 2 |";
//! let lines: Vec<&str> = markdown.lines().collect();
//! let positions = scan_positions(&lines, &ConvertOptions::default());
//! // The heading occupies rows 1-2, so the table header lands on row 3.
//! assert_eq!(positions.table_start("Data Report", "T1"), Some(3));
//! ```

// Submodule declarations
mod formula;
mod place;
mod scan;
mod types;


// Re-export public API
pub use formula::resolve_references;
pub use place::{ConversionSummary, convert_to_workbook};
pub use scan::scan_positions;
pub use types::{CellFont, CellValue, SheetPositions, TablePositions};

use crate::common::Result;

/// Receiver for the cells of a converted workbook.
///
/// Rows and columns are 1-based. The driver only ever writes to the sheet
/// it most recently named, but the sheet name is passed on every call so a
/// sink needs no cursor state of its own.
pub trait CellSink {
    /// Rename the workbook's initial sheet before anything is written to it.
    fn rename_default_sheet(&mut self, name: &str) -> Result<()>;

    /// Create a new sheet and make it current.
    fn create_sheet(&mut self, name: &str) -> Result<()>;

    /// Write one cell.
    fn set_cell(
        &mut self,
        sheet: &str,
        row: u32,
        col: u32,
        value: CellValue,
        font: Option<&CellFont>,
    ) -> Result<()>;
}
