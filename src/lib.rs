//! # xmldoc-tables
//!
//! Generates LaTeX reference tables from the XML documentation comments of
//! C# source files.
//!
//! ## Features
//!
//! - **Lossless parsing**: error-tolerant `rowan` syntax tree of the
//!   declaration skeleton, so broken files still produce tables
//! - **Ownership resolution**: each `///` or `/** */` block is attached to
//!   the class, struct, field, property, method or constructor it documents
//! - **LaTeX-safe cells**: special characters, dash runs, angle brackets and
//!   camelCase hyphenation points are escaped for narrow table columns
//! - **Row blobs or full tables**: raw `\\`-terminated rows for `\input`, or
//!   complete `tabular`/`longtable` environments via [`render`]
//!
//! ## Usage
//!
//! ```rust
//! use xmldoc_tables::generate_tables;
//!
//! let tables = generate_tables(r#"
//!     /// <summary>A counter.</summary>
//!     public class Counter
//!     {
//!         /// <summary>Current value.</summary>
//!         public int Value { get; private set; }
//!     }
//! "#);
//!
//! assert_eq!(tables.class_table(), "Counter & A counter. \\\\\n");
//! let counter = tables.member("Counter").unwrap();
//! assert_eq!(
//!     counter.properties_table(),
//!     "Value & public & int & \\{ get; private set; \\} & Current value. \\\\\n"
//! );
//! ```
//!
//! ## Options
//!
//! ```rust
//! use xmldoc_tables::{generate_tables_with_options, OwnerKeyStyle, TableOptions};
//!
//! let options = TableOptions::new()
//!     .with_summary_field("remarks")
//!     .with_owner_keys(OwnerKeyStyle::Qualified);
//! let tables = generate_tables_with_options(
//!     "class Outer { class Inner { /// <remarks>r</remarks>\n int x; } }",
//!     &options,
//! );
//! assert!(tables.member("Outer.Inner").is_some());
//! ```

/// Documentation table pipeline
pub mod core;

/// Static keyword and escape tables
pub mod data;

/// Complete LaTeX table environments
pub mod render;

/// C# declaration syntax tree
pub mod syntax;

/// Diagnostics and error types
pub mod utils;

pub use core::{
    decode_entities, escape, extract, group_key, resolve, walk, walk_with_options, ClassMembers,
    DocHandler, DocTables, FieldMatch, MemberTables, OwnerKeyStyle, TableAssembler, TableOptions,
    WalkOptions, DEFAULT_ACCESSORS, OWNER_NOT_FOUND,
};
pub use render::{render_document, RenderOptions, Section};
pub use syntax::{parse, DeclKind, Declaration, Parse};
pub use utils::diagnostics::{format_diagnostics, Diagnostic, DiagnosticLevel, Diagnostics};
pub use utils::error::{Result, XmlDocError};

/// Generate tables for one source file with default options
pub fn generate_tables(source: &str) -> DocTables {
    generate_tables_with_options(source, &TableOptions::default())
}

/// Generate tables for one source file
pub fn generate_tables_with_options(source: &str, options: &TableOptions) -> DocTables {
    let mut assembler = TableAssembler::new(options.clone());
    assembler.add_source(source);
    assembler.finish()
}
