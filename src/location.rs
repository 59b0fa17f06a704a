//! Source locations for diagnostics
//!
//! Every syntax node and directive carries a (template, line, column) triple.
//! All error messages format it through [`format_location`] so file errors
//! share one shape across the engine.

use std::fmt;

/// Position of a node or directive within a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Name of the template this location belongs to, if known
    pub template: Option<String>,
    /// 1-based line number
    pub line: u32,
    /// 1-based column number
    pub column: u32,
}

impl Location {
    /// Create a location inside a named template
    pub fn new(template: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            template: Some(template.into()),
            line,
            column,
        }
    }

    /// Create a location with no template name attached
    pub fn unknown(line: u32, column: u32) -> Self {
        Self {
            template: None,
            line,
            column,
        }
    }

    /// The template name, if known and non-empty
    pub fn template_name(&self) -> Option<&str> {
        self.template.as_deref().filter(|t| !t.is_empty())
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_location(
            self.template.as_deref(),
            self.line,
            self.column,
        ))
    }
}

/// Format a template filename with line and column.
///
/// An absent or empty template name becomes the literal `<unknown template>`.
pub fn format_location(template: Option<&str>, line: u32, column: u32) -> String {
    let template = match template {
        Some(t) if !t.is_empty() => t,
        _ => "<unknown template>",
    };
    format!("{}[line {}, column {}]", template, line, column)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_with_template() {
        assert_eq!(
            format_location(Some("t.vm"), 3, 5),
            "t.vm[line 3, column 5]"
        );
    }

    #[test]
    fn test_format_without_template() {
        assert_eq!(
            format_location(None, 3, 5),
            "<unknown template>[line 3, column 5]"
        );
    }

    #[test]
    fn test_format_empty_template() {
        assert_eq!(
            format_location(Some(""), 7, 1),
            "<unknown template>[line 7, column 1]"
        );
    }

    #[test]
    fn test_location_display_matches_formatter() {
        let loc = Location::new("page.vm", 12, 40);
        assert_eq!(loc.to_string(), "page.vm[line 12, column 40]");

        let loc = Location::unknown(1, 1);
        assert_eq!(loc.to_string(), "<unknown template>[line 1, column 1]");
    }

    #[test]
    fn test_template_name_filters_empty() {
        assert_eq!(Location::new("a.vm", 1, 1).template_name(), Some("a.vm"));
        assert_eq!(Location::new("", 1, 1).template_name(), None);
        assert_eq!(Location::unknown(1, 1).template_name(), None);
    }
}
