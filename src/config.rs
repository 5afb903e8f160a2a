//! Configuration types for Markdown conversion.
//!
//! This module defines the options used to customize both conversion paths.

/// Configuration options for Markdown conversion.
///
/// This struct controls aspects shared by the document and spreadsheet
/// targets: the worksheet name used before any `## Sheet:` marker is seen,
/// the indentation width that advances one list nesting level, and the
/// recursion depth guard for pathological inputs.
///
/// # Examples
///
/// ```rust
/// use longan::ConvertOptions;
///
/// // Create with defaults
/// let options = ConvertOptions::default();
///
/// // Or customize
/// let options = ConvertOptions::new()
///     .with_default_sheet_name("Report")
///     .with_list_indent(3);
/// ```
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Worksheet name used until the first `## Sheet: Name` marker is seen
    pub default_sheet_name: String,
    /// Number of leading spaces that advance one list nesting level
    pub list_indent: usize,
    /// Maximum recursion depth for inline formatting and list nesting
    pub max_depth: usize,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            default_sheet_name: "Data Report".to_string(),
            list_indent: 3,
            max_depth: 32,
        }
    }
}

impl ConvertOptions {
    /// Create a new `ConvertOptions` with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the worksheet name used before any sheet marker.
    #[inline]
    pub fn with_default_sheet_name(mut self, name: impl Into<String>) -> Self {
        self.default_sheet_name = name.into();
        self
    }

    /// Set the number of leading spaces per list nesting level.
    ///
    /// A value of 0 is clamped to 1 so the level computation stays defined.
    #[inline]
    pub fn with_list_indent(mut self, indent: usize) -> Self {
        self.list_indent = indent.max(1);
        self
    }

    /// Set the maximum recursion depth for nested formatting and lists.
    ///
    /// Inputs nesting deeper than this fail closed with
    /// [`Error::DepthExceeded`](crate::Error::DepthExceeded) instead of
    /// exhausting the call stack.
    #[inline]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_builder() {
        let options = ConvertOptions::new()
            .with_default_sheet_name("Summary")
            .with_list_indent(4)
            .with_max_depth(8);

        assert_eq!(options.default_sheet_name, "Summary");
        assert_eq!(options.list_indent, 4);
        assert_eq!(options.max_depth, 8);
    }

    #[test]
    fn test_options_default() {
        let options = ConvertOptions::default();
        assert_eq!(options.default_sheet_name, "Data Report");
        assert_eq!(options.list_indent, 3);
        assert_eq!(options.max_depth, 32);
    }

    #[test]
    fn test_zero_values_clamped() {
        let options = ConvertOptions::new().with_list_indent(0).with_max_depth(0);
        assert_eq!(options.list_indent, 1);
        assert_eq!(options.max_depth, 1);
    }
}
