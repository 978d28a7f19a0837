//! Complete LaTeX tables
//!
//! The assembler produces bare row blobs meant to be `\input` inside a
//! hand-written table. This module wraps them into ready-made environments:
//! a two-column class summary table and one five-column table per member
//! section of every owner.
//!
//! # Example
//!
//! ```rust
//! use xmldoc_tables::render::{render_document, RenderOptions};
//!
//! let tables = xmldoc_tables::generate_tables("/// <summary>Does X.</summary>\nclass Foo { }");
//! let latex = render_document(&tables, &RenderOptions::default());
//! assert!(latex.contains("\\begin{tabular}"));
//! assert!(latex.contains("Foo & Does X. \\\\"));
//! ```

mod cell;
mod generator;
mod rule;


pub use cell::{ColumnAlign, HeaderCell};
pub use generator::TableGenerator;
pub use rule::RuleStyle;

use crate::core::escape;
use crate::core::{ClassMembers, DocTables};

/// Options for the generated environments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Booktabs rules instead of `\hline` and vertical rules. Field and
    /// constructor rows carry their own `\multicolumn` spec, so pair this
    /// with [`TableOptions::with_vertical_rules`]`(false)` when collecting.
    ///
    /// [`TableOptions::with_vertical_rules`]: crate::core::TableOptions::with_vertical_rules
    pub booktabs: bool,
    /// `longtable` instead of `tabular`
    pub longtable: bool,
    /// Caption every table, starting with this text
    pub caption_prefix: Option<String>,
    /// Width of the description column
    pub description_width: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            booktabs: false,
            longtable: false,
            caption_prefix: None,
            description_width: r"0.4\linewidth".to_string(),
        }
    }
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    fn generator(&self, columns: Vec<ColumnAlign>) -> TableGenerator {
        let mut generator = TableGenerator::new(columns);
        generator.use_booktabs = self.booktabs;
        generator.use_longtable = self.longtable;
        generator
    }
}

/// The four member tables of an owner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Fields,
    Properties,
    Methods,
    Constructors,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Fields,
        Section::Properties,
        Section::Methods,
        Section::Constructors,
    ];

    /// File name part, e.g. `Foo.fields.tex`
    pub fn name(self) -> &'static str {
        match self {
            Section::Fields => "fields",
            Section::Properties => "properties",
            Section::Methods => "methods",
            Section::Constructors => "constructors",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Section::Fields => "Fields",
            Section::Properties => "Properties",
            Section::Methods => "Methods",
            Section::Constructors => "Constructors",
        }
    }

    pub fn rows(self, members: &ClassMembers) -> &str {
        match self {
            Section::Fields => members.fields_table(),
            Section::Properties => members.properties_table(),
            Section::Methods => members.methods_table(),
            Section::Constructors => members.constructors_table(),
        }
    }

    pub fn count(self, members: &ClassMembers) -> usize {
        match self {
            Section::Fields => members.fields_count(),
            Section::Properties => members.properties_count(),
            Section::Methods => members.methods_count(),
            Section::Constructors => members.constructors_count(),
        }
    }

    /// Header cells; field and constructor descriptions span two columns
    pub fn header(self) -> Vec<HeaderCell> {
        let mut cells = vec![HeaderCell::new("Name"), HeaderCell::new("Modifiers")];
        match self {
            Section::Fields => {
                cells.push(HeaderCell::new("Type"));
                cells.push(HeaderCell::spanning("Description", 2));
            }
            Section::Properties => {
                cells.push(HeaderCell::new("Type"));
                cells.push(HeaderCell::new("Accessors"));
                cells.push(HeaderCell::new("Description"));
            }
            Section::Methods => {
                cells.push(HeaderCell::new("Returns"));
                cells.push(HeaderCell::new("Parameters"));
                cells.push(HeaderCell::new("Description"));
            }
            Section::Constructors => {
                cells.push(HeaderCell::new("Parameters"));
                cells.push(HeaderCell::spanning("Description", 2));
            }
        }
        cells
    }
}

/// Two-column table of every documented class and struct
pub fn render_class_table(tables: &DocTables, options: &RenderOptions) -> String {
    let mut generator = options
        .generator(vec![
            ColumnAlign::Left,
            ColumnAlign::Para(options.description_width.clone()),
        ])
        .with_header(vec![HeaderCell::new("Type"), HeaderCell::new("Description")]);
    generator.caption = options
        .caption_prefix
        .as_ref()
        .map(|prefix| format!("{}Types", prefix));
    generator.push_rows(tables.class_table());
    generator.generate_latex()
}

/// Five-column table for one member section of `owner`
pub fn render_section(
    owner: &str,
    members: &ClassMembers,
    section: Section,
    options: &RenderOptions,
) -> String {
    let mut generator = options
        .generator(vec![
            ColumnAlign::Left,
            ColumnAlign::Left,
            ColumnAlign::Left,
            ColumnAlign::Left,
            ColumnAlign::Para(options.description_width.clone()),
        ])
        .with_header(section.header());
    generator.caption = options
        .caption_prefix
        .as_ref()
        .map(|prefix| format!("{}{}: {}", prefix, escape(owner), section.title()));
    generator.push_rows(section.rows(members));
    generator.generate_latex()
}

/// Every non-empty table, separated by blank lines and labelled with a
/// LaTeX comment
pub fn render_document(tables: &DocTables, options: &RenderOptions) -> String {
    let mut parts = Vec::new();

    if tables.class_count() > 0 {
        parts.push(format!("% Types\n{}", render_class_table(tables, options)));
    }

    for (owner, members) in tables.members() {
        for section in Section::ALL {
            if section.count(members) == 0 {
                continue;
            }
            parts.push(format!(
                "% {}: {}\n{}",
                owner,
                section.title(),
                render_section(owner, members, section, options)
            ));
        }
    }

    if parts.is_empty() {
        return String::new();
    }
    let mut document = parts.join("\n\n");
    document.push('\n');
    document
}
