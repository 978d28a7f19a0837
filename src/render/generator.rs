//! LaTeX table generator for pre-rendered rows

use std::fmt::Write;

use super::cell::{ColumnAlign, HeaderCell};
use super::rule::RuleStyle;

/// Builds one `tabular` or `longtable` environment around a header row and
/// a blob of body rows
#[derive(Debug, Clone)]
pub struct TableGenerator {
    /// Column types, left to right
    pub columns: Vec<ColumnAlign>,
    /// Header row; empty for no header
    pub header: Vec<HeaderCell>,
    /// Optional caption (already escaped)
    pub caption: Option<String>,
    /// Whether to use booktabs rules
    pub use_booktabs: bool,
    /// `longtable` instead of `tabular`; the header repeats on every page
    pub use_longtable: bool,
    /// Body rows, each ending in `\\` and a newline
    rows: String,
}

impl TableGenerator {
    pub fn new(columns: Vec<ColumnAlign>) -> Self {
        TableGenerator {
            columns,
            header: Vec::new(),
            caption: None,
            use_booktabs: false,
            use_longtable: false,
            rows: String::new(),
        }
    }

    pub fn with_header(mut self, header: Vec<HeaderCell>) -> Self {
        self.header = header;
        self
    }

    /// Append pre-rendered rows, one per line
    pub fn push_rows(&mut self, rows: &str) {
        for line in rows.lines().filter(|l| !l.trim().is_empty()) {
            self.rows.push_str(line);
            self.rows.push('\n');
        }
    }

    /// Vertical rules go with plain tables only
    fn vertical_rules(&self) -> bool {
        !self.use_booktabs
    }

    /// Column specification, e.g. `|l|l|p{3cm}|`
    fn build_column_spec(&self) -> String {
        let separator = if self.vertical_rules() { "|" } else { "" };
        let mut spec = String::from(separator);
        for column in &self.columns {
            spec.push_str(&column.to_spec());
            spec.push_str(separator);
        }
        spec
    }

    fn environment(&self) -> &'static str {
        if self.use_longtable {
            "longtable"
        } else {
            "tabular"
        }
    }

    /// Generate the complete environment
    pub fn generate_latex(&self) -> String {
        let mut output = String::new();
        let floating = self.caption.is_some() && !self.use_longtable;

        if floating {
            let _ = writeln!(output, "\\begin{{table}}[htbp]");
            let _ = writeln!(output, "\\centering");
            if let Some(caption) = &self.caption {
                let _ = writeln!(output, "\\caption{{{}}}", caption);
            }
        }

        let _ = writeln!(
            output,
            "\\begin{{{}}}{{{}}}",
            self.environment(),
            self.build_column_spec()
        );
        if self.use_longtable {
            if let Some(caption) = &self.caption {
                let _ = writeln!(output, "\\caption{{{}}} \\\\", caption);
            }
        }

        let _ = writeln!(output, "{}", RuleStyle::Top.to_latex(self.use_booktabs));

        if !self.header.is_empty() {
            let cells: Vec<String> = self
                .header
                .iter()
                .map(|cell| cell.to_latex(self.vertical_rules()))
                .collect();
            let _ = writeln!(output, "  {} \\\\", cells.join(" & "));
            let _ = writeln!(output, "{}", RuleStyle::Mid.to_latex(self.use_booktabs));
            if self.use_longtable {
                let _ = writeln!(output, "\\endhead");
            }
        }

        for row in self.rows.lines() {
            let _ = writeln!(output, "  {}", row);
        }

        let _ = writeln!(output, "{}", RuleStyle::Bottom.to_latex(self.use_booktabs));
        let _ = write!(output, "\\end{{{}}}", self.environment());

        if floating {
            let _ = write!(output, "\n\\end{{table}}");
        }

        output
    }
}
