//! Table grid parsing.
//!
//! A markdown table is a run of consecutive pipe-bounded lines. The parser
//! extracts it into a rectangular grid of trimmed cell strings, dropping the
//! header separator row, and reports how many input lines it consumed.

use once_cell::sync::Lazy;
use regex::Regex;

/// A separator cell: optional alignment colons around one or more dashes.
static SEPARATOR_CELL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^:?-+:?$").unwrap());

/// Parse a table grid starting at `lines[start]`.
///
/// Collects consecutive lines that both start and end with `|`. Fewer than
/// two such lines is not a table: the result is `(None, start + 1)` so the
/// caller treats the line as ordinary text. Separator rows (every cell
/// matching `:?-+:?`) are dropped wherever they appear; a run that consists
/// of nothing but separators also yields `None`. The returned index is the
/// first line after the collected run.
pub fn parse_grid(lines: &[&str], start: usize) -> (Option<Vec<Vec<String>>>, usize) {
    let mut end = start;
    while end < lines.len() {
        let stripped = lines[end].trim();
        if stripped.len() < 2 || !stripped.starts_with('|') || !stripped.ends_with('|') {
            break;
        }
        end += 1;
    }
    if end - start < 2 {
        return (None, start + 1);
    }

    let grid: Vec<Vec<String>> = lines[start..end]
        .iter()
        .map(|line| split_row(line.trim()))
        .filter(|row| !is_separator_row(row))
        .collect();

    if grid.is_empty() {
        return (None, end);
    }
    (Some(grid), end)
}

/// Split one pipe-bounded line into trimmed cells, discarding the empty
/// fields produced by the bounding pipes.
fn split_row(line: &str) -> Vec<String> {
    let inner = line
        .strip_prefix('|')
        .and_then(|rest| rest.strip_suffix('|'))
        .unwrap_or(line);
    inner.split('|').map(|cell| cell.trim().to_string()).collect()
}

fn is_separator_row(row: &[String]) -> bool {
    !row.is_empty() && row.iter().all(|cell| SEPARATOR_CELL.is_match(cell))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_table_with_separator() {
        let lines = vec!["| A | B |", "|---|---|", "| 1 | 2 |"];
        let (grid, next) = parse_grid(&lines, 0);
        assert_eq!(next, 3);
        let grid = grid.unwrap();
        assert_eq!(grid, vec![vec!["A", "B"], vec!["1", "2"]]);
    }

    #[test]
    fn test_alignment_colons_in_separator() {
        let lines = vec!["| A | B | C |", "|:---|:--:|---:|", "| 1 | 2 | 3 |"];
        let (grid, _) = parse_grid(&lines, 0);
        assert_eq!(grid.unwrap().len(), 2);
    }

    #[test]
    fn test_single_line_rejected() {
        let lines = vec!["| lonely |", "not a table"];
        let (grid, next) = parse_grid(&lines, 0);
        assert!(grid.is_none());
        assert_eq!(next, 1);
    }

    #[test]
    fn test_two_lines_without_separator_accepted() {
        let lines = vec!["| A | B |", "| 1 | 2 |"];
        let (grid, next) = parse_grid(&lines, 0);
        assert_eq!(next, 2);
        assert_eq!(grid.unwrap().len(), 2);
    }

    #[test]
    fn test_all_separator_rows_yield_none() {
        let lines = vec!["|---|---|", "|---|---|"];
        let (grid, next) = parse_grid(&lines, 0);
        assert!(grid.is_none());
        assert_eq!(next, 2);
    }

    #[test]
    fn test_stops_at_non_table_line() {
        let lines = vec!["| A |", "| 1 |", "after"];
        let (grid, next) = parse_grid(&lines, 0);
        assert_eq!(next, 2);
        assert_eq!(grid.unwrap(), vec![vec!["A"], vec!["1"]]);
    }

    #[test]
    fn test_empty_cells_preserved() {
        let lines = vec!["| A |  | C |", "| 1 | 2 |  |"];
        let (grid, _) = parse_grid(&lines, 0);
        let grid = grid.unwrap();
        assert_eq!(grid[0], vec!["A", "", "C"]);
        assert_eq!(grid[1], vec!["1", "2", ""]);
    }
}
