//! Diagnostics for parsing and table generation
//!
//! Nothing in the library prints or aborts on a problem in the input.
//! Problems are collected as [`Diagnostic`]s:
//!
//! - Errors: the parser met tokens it could not place in a declaration
//! - Warnings: a documented member produced a row with an empty summary
//! - Info: a documentation block had no owning declaration and was skipped
//!
//! ## Example
//!
//! ```rust
//! use xmldoc_tables::syntax::parse;
//!
//! let parse = parse("class C { ) }");
//! assert!(parse.diagnostics().has_errors());
//! ```

use std::fmt;

#[cfg(feature = "json")]
use serde::Serialize;

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "json", derive(Serialize), serde(rename_all = "lowercase"))]
pub enum DiagnosticLevel {
    /// Informational note
    Info,
    /// Warning - output was produced but is probably not what was intended
    Warning,
    /// Error - the input is not valid C#
    Error,
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticLevel::Info => write!(f, "info"),
            DiagnosticLevel::Warning => write!(f, "warning"),
            DiagnosticLevel::Error => write!(f, "error"),
        }
    }
}

/// A single diagnostic message
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Serialize))]
pub struct Diagnostic {
    /// Severity level
    pub level: DiagnosticLevel,
    /// Human-readable message
    pub message: String,
    /// Line number (1-indexed)
    pub line: Option<usize>,
    /// Column number (1-indexed)
    pub column: Option<usize>,
    /// Relevant source text
    pub source_text: Option<String>,
    /// Suggested fix
    pub suggestion: Option<String>,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(level: DiagnosticLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            line: None,
            column: None,
            source_text: None,
            suggestion: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Warning, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Info, message)
    }

    /// Add location information
    pub fn with_location(mut self, line: usize, column: usize) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    /// Add source text
    pub fn with_source(mut self, text: impl Into<String>) -> Self {
        self.source_text = Some(text.into());
        self
    }

    /// Add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

/// `[level] line:col: message`, followed by the offending source text and
/// the suggested fix on their own lines
impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] ", self.level)?;
        match (self.line, self.column) {
            (Some(line), Some(column)) => write!(f, "{}:{}: ", line, column)?,
            (Some(line), None) => write!(f, "{}: ", line)?,
            _ => {}
        }
        write!(f, "{}", self.message)?;
        if let Some(source) = &self.source_text {
            write!(f, "\n    | {}", source)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n    = help: {}", suggestion)?;
        }
        Ok(())
    }
}

/// Collected diagnostics with per-level counts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Serialize))]
pub struct Diagnostics {
    /// All diagnostics, in the order they were reported
    pub items: Vec<Diagnostic>,
    /// Number of errors
    pub errors: usize,
    /// Number of warnings
    pub warnings: usize,
    /// Number of info messages
    pub infos: usize,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic
    pub fn add(&mut self, diag: Diagnostic) {
        match diag.level {
            DiagnosticLevel::Error => self.errors += 1,
            DiagnosticLevel::Warning => self.warnings += 1,
            DiagnosticLevel::Info => self.infos += 1,
        }
        self.items.push(diag);
    }

    /// Append every diagnostic of `other`
    pub fn extend(&mut self, other: Diagnostics) {
        for diag in other.items {
            self.add(diag);
        }
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }

    /// Check if there are any issues at all
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.items.iter()
    }

    /// First error, if any
    pub fn first_error(&self) -> Option<&Diagnostic> {
        self.items
            .iter()
            .find(|d| d.level == DiagnosticLevel::Error)
    }

    /// Counts per level, e.g. `1 error, 2 warnings`
    pub fn summary(&self) -> String {
        let parts: Vec<String> = [
            (self.errors, "error"),
            (self.warnings, "warning"),
            (self.infos, "note"),
        ]
        .iter()
        .filter(|(count, _)| *count > 0)
        .map(|&(count, noun)| plural(count, noun))
        .collect();

        if parts.is_empty() {
            "no issues found".to_string()
        } else {
            parts.join(", ")
        }
    }
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {}", noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Byte offset to line/column conversion
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Byte offset of each line start
    line_starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(input: &str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(input.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        LineIndex { line_starts }
    }

    /// Convert a byte offset to a 1-indexed (line, column) pair. Columns
    /// count bytes.
    pub fn location(&self, offset: usize) -> (usize, usize) {
        let line = self.line_starts.partition_point(|&start| start <= offset) - 1;
        (line + 1, offset - self.line_starts[line] + 1)
    }
}

const RESET: &str = "\x1b[0m";

fn level_color(level: DiagnosticLevel) -> &'static str {
    match level {
        DiagnosticLevel::Error => "\x1b[31m",
        DiagnosticLevel::Warning => "\x1b[33m",
        DiagnosticLevel::Info => "\x1b[34m",
    }
}

/// One diagnostic per line block, then a summary line. With `use_color`
/// each block is colored by its level and the summary by the worst level.
pub fn format_diagnostics(diagnostics: &Diagnostics, use_color: bool) -> String {
    let paint = |text: String, color: &str| {
        if use_color {
            format!("{}{}{}", color, text, RESET)
        } else {
            text
        }
    };

    let mut output = String::new();
    for diag in diagnostics {
        output.push_str(&paint(diag.to_string(), level_color(diag.level)));
        output.push('\n');
    }

    let summary_color = match diagnostics.iter().map(|d| d.level).max() {
        Some(level) => level_color(level),
        None => "\x1b[32m",
    };
    output.push_str(&paint(
        format!("Summary: {}", diagnostics.summary()),
        summary_color,
    ));
    output
}
