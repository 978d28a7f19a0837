//! Table generation options

/// How documentation element names are compared to the requested field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldMatch {
    /// Tag name equals the field name
    #[default]
    Exact,
    /// Tag name contains the field name (`<summaryx>` matches `summary`)
    Contains,
}

impl FieldMatch {
    pub fn matches(self, tag: &str, field: &str) -> bool {
        match self {
            FieldMatch::Exact => tag == field,
            FieldMatch::Contains => tag.contains(field),
        }
    }
}

/// How member rows are grouped by their enclosing type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OwnerKeyStyle {
    /// Innermost class or struct name (`Inner`)
    #[default]
    Simple,
    /// Every enclosing class or struct name, outermost first (`Outer.Inner`)
    Qualified,
}

/// Options for collecting documentation into tables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableOptions {
    /// Documentation element rendered in the description column
    pub summary_field: String,
    /// Element name lookup mode
    pub field_match: FieldMatch,
    /// Grouping key for member tables
    pub owner_keys: OwnerKeyStyle,
    /// Decode `&lt;` and friends before escaping
    pub decode_entities: bool,
    /// Column spec of the two-column description cell in field and
    /// constructor rows
    pub wide_cell_spec: String,
    /// Appended after field and constructor rows
    pub row_continuation: String,
    /// Do not look past enums, interfaces, events and other unsupported
    /// declarations when resolving what a comment documents
    pub strict_ownership: bool,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            summary_field: "summary".to_string(),
            field_match: FieldMatch::Exact,
            owner_keys: OwnerKeyStyle::Simple,
            decode_entities: true,
            wide_cell_spec: r"p{0.45\linewidth}|".to_string(),
            row_continuation: r"\noalign{\nobreak}".to_string(),
            strict_ownership: false,
        }
    }
}

impl TableOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reproduce the output of the original generator: substring element
    /// lookup and entities passed through as written
    pub fn compat() -> Self {
        Self {
            field_match: FieldMatch::Contains,
            decode_entities: false,
            ..Default::default()
        }
    }

    pub fn with_summary_field(mut self, field: impl Into<String>) -> Self {
        self.summary_field = field.into();
        self
    }

    pub fn with_owner_keys(mut self, style: OwnerKeyStyle) -> Self {
        self.owner_keys = style;
        self
    }

    pub fn with_strict_ownership(mut self, strict: bool) -> Self {
        self.strict_ownership = strict;
        self
    }

    /// Keep or drop the vertical rule closing the wide cell. Tables without
    /// vertical rules (booktabs) need it dropped.
    pub fn with_vertical_rules(mut self, rules: bool) -> Self {
        let spec = self.wide_cell_spec.trim_end_matches('|');
        self.wide_cell_spec = if rules {
            format!("{}|", spec)
        } else {
            spec.to_string()
        };
        self
    }

    /// `\multicolumn` cell spanning the last two columns
    pub fn wide_cell(&self, content: &str) -> String {
        format!("\\multicolumn{{2}}{{{}}}{{{}}}", self.wide_cell_spec, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_match() {
        assert!(FieldMatch::Exact.matches("summary", "summary"));
        assert!(!FieldMatch::Exact.matches("summaryx", "summary"));
        assert!(FieldMatch::Contains.matches("summaryx", "summary"));
        assert!(!FieldMatch::Contains.matches("Summary", "summary"));
    }

    #[test]
    fn test_compat_preset() {
        let options = TableOptions::compat();
        assert_eq!(options.field_match, FieldMatch::Contains);
        assert!(!options.decode_entities);
        assert_eq!(options.summary_field, "summary");
    }

    #[test]
    fn test_wide_cell() {
        let options = TableOptions::default();
        assert_eq!(
            options.wide_cell("counter"),
            r"\multicolumn{2}{p{0.45\linewidth}|}{counter}"
        );
    }

    #[test]
    fn test_wide_cell_without_vertical_rules() {
        let options = TableOptions::default().with_vertical_rules(false);
        assert_eq!(options.wide_cell_spec, r"p{0.45\linewidth}");
        assert_eq!(
            options.clone().with_vertical_rules(true).wide_cell_spec,
            r"p{0.45\linewidth}|"
        );
        assert_eq!(
            options.with_vertical_rules(false).wide_cell("x"),
            r"\multicolumn{2}{p{0.45\linewidth}}{x}"
        );
    }
}
