//! Error handling for xmldoc-tables
//!
//! Table generation itself never fails; malformed documentation degrades to
//! empty cells or skipped rows. Errors only arise when a caller asks for a
//! clean parse or when sources and tables are read from or written to disk.

use std::path::PathBuf;

use thiserror::Error;

use super::diagnostics::Diagnostic;

/// Library error type
#[derive(Debug, Error)]
pub enum XmlDocError {
    /// Parse error - the source is not valid C#
    #[error("{}", parse_message(.message, .line, .column))]
    Parse {
        message: String,
        line: Option<usize>,
        column: Option<usize>,
    },
    /// IO error on a source or output file
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn parse_message(message: &str, line: &Option<usize>, column: &Option<usize>) -> String {
    match (line, column) {
        (Some(l), Some(c)) => format!("Parse error at line {}, column {}: {}", l, c, message),
        (Some(l), None) => format!("Parse error at line {}: {}", l, message),
        _ => format!("Parse error: {}", message),
    }
}

/// Result type for xmldoc-tables operations
pub type Result<T> = std::result::Result<T, XmlDocError>;

impl XmlDocError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        XmlDocError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<&Diagnostic> for XmlDocError {
    fn from(diag: &Diagnostic) -> Self {
        XmlDocError::Parse {
            message: diag.message.clone(),
            line: diag.line,
            column: diag.column,
        }
    }
}
