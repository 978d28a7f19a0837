//! Utility modules
//!
//! - Diagnostics collected while parsing and assembling
//! - Error and result types

pub mod diagnostics;
pub mod error;

pub use diagnostics::{format_diagnostics, Diagnostic, DiagnosticLevel, Diagnostics, LineIndex};
pub use error::{Result, XmlDocError};
