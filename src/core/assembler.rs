//! Table assembly
//!
//! [`TableAssembler`] is the [`DocHandler`] that turns documented
//! declarations into LaTeX table rows: one class summary table, plus four
//! member tables (fields, properties, methods, constructors) per owning
//! class or struct. Rows are newline-terminated and appear in the order the
//! walker reports them, which is source order.

use std::fs;
use std::path::Path;

use fxhash::FxBuildHasher;
use indexmap::IndexMap;
#[cfg(feature = "json")]
use serde::Serialize;
use tracing::debug;

use crate::core::escape::escape;
use crate::core::extract::{decode_entities, extract};
use crate::core::options::TableOptions;
use crate::core::resolver::group_key;
use crate::core::walker::{walk_with_options, DocHandler, WalkOptions};
use crate::syntax::ast::AstNode;
use crate::syntax::{
    parse, ClassDecl, ConstructorDecl, DeclKind, Declaration, DocComment, FieldDecl, MethodDecl,
    PropertyDecl, StructDecl, SyntaxNode,
};
use crate::utils::diagnostics::{Diagnostic, Diagnostics, LineIndex};
use crate::utils::error::{Result, XmlDocError};

/// Accessor text used when a property has no accessor list
pub const DEFAULT_ACCESSORS: &str = "{ get; }";

/// Member owner -> member tables, in first-seen order
pub type MemberTables = IndexMap<String, ClassMembers, FxBuildHasher>;

/// Rendered member rows of one class or struct
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Serialize))]
pub struct ClassMembers {
    fields: String,
    properties: String,
    methods: String,
    constructors: String,
    fields_count: usize,
    properties_count: usize,
    methods_count: usize,
    constructors_count: usize,
}

fn push_row(table: &mut String, row: &str) {
    table.push_str(row);
    table.push('\n');
}

impl ClassMembers {
    pub fn fields_table(&self) -> &str {
        &self.fields
    }

    pub fn properties_table(&self) -> &str {
        &self.properties
    }

    pub fn methods_table(&self) -> &str {
        &self.methods
    }

    pub fn constructors_table(&self) -> &str {
        &self.constructors
    }

    pub fn fields_count(&self) -> usize {
        self.fields_count
    }

    pub fn properties_count(&self) -> usize {
        self.properties_count
    }

    pub fn methods_count(&self) -> usize {
        self.methods_count
    }

    pub fn constructors_count(&self) -> usize {
        self.constructors_count
    }

    /// Total number of rows over all four sections
    pub fn len(&self) -> usize {
        self.fields_count + self.properties_count + self.methods_count + self.constructors_count
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn add_field(&mut self, row: &str) {
        push_row(&mut self.fields, row);
        self.fields_count += 1;
    }

    fn add_property(&mut self, row: &str) {
        push_row(&mut self.properties, row);
        self.properties_count += 1;
    }

    fn add_method(&mut self, row: &str) {
        push_row(&mut self.methods, row);
        self.methods_count += 1;
    }

    fn add_constructor(&mut self, row: &str) {
        push_row(&mut self.constructors, row);
        self.constructors_count += 1;
    }
}

/// Finished tables of one or more source files
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Serialize))]
pub struct DocTables {
    class_table: String,
    class_count: usize,
    members: MemberTables,
    diagnostics: Diagnostics,
}

impl DocTables {
    /// `Name & Summary \\` rows for every documented class and struct
    pub fn class_table(&self) -> &str {
        &self.class_table
    }

    pub fn class_count(&self) -> usize {
        self.class_count
    }

    pub fn members(&self) -> &MemberTables {
        &self.members
    }

    pub fn member(&self, owner: &str) -> Option<&ClassMembers> {
        self.members.get(owner)
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// No rows at all
    pub fn is_empty(&self) -> bool {
        self.class_count == 0 && self.members.values().all(ClassMembers::is_empty)
    }
}

/// Collects documentation rows while the walker visits a tree
#[derive(Debug, Default)]
pub struct TableAssembler {
    options: TableOptions,
    class_table: String,
    class_count: usize,
    members: MemberTables,
    diagnostics: Diagnostics,
    /// Locations for diagnostics of the tree being collected
    line_index: Option<LineIndex>,
}

impl TableAssembler {
    pub fn new(options: TableOptions) -> Self {
        Self {
            options,
            ..Default::default()
        }
    }

    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    /// Parse `source` and collect its documentation. Parse diagnostics are
    /// kept alongside the table diagnostics.
    pub fn add_source(&mut self, source: &str) {
        let parse = parse(source);
        self.diagnostics.extend(parse.diagnostics().clone());
        self.collect(&parse.syntax());
    }

    /// Read `path` and collect its documentation
    pub fn add_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| XmlDocError::io(path, source))?;
        debug!(path = %path.display(), bytes = source.len(), "collecting documentation");
        self.add_source(&source);
        Ok(())
    }

    /// Collect the documentation of an already parsed tree
    pub fn collect(&mut self, root: &SyntaxNode) {
        self.line_index = Some(LineIndex::new(&root.text().to_string()));
        let options = WalkOptions {
            strict_ownership: self.options.strict_ownership,
        };
        walk_with_options(root, self, options);
        self.line_index = None;
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Hand out the diagnostics gathered so far, e.g. between files
    pub fn take_diagnostics(&mut self) -> Diagnostics {
        std::mem::take(&mut self.diagnostics)
    }

    pub fn finish(self) -> DocTables {
        DocTables {
            class_table: self.class_table,
            class_count: self.class_count,
            members: self.members,
            diagnostics: self.diagnostics,
        }
    }

    /// Member tables for the owner of `declaration`, created on first use
    fn owner(&mut self, declaration: Declaration) -> &mut ClassMembers {
        let key = group_key(&declaration, self.options.owner_keys);
        self.members.entry(key).or_default()
    }

    fn diagnostic_at(&self, diag: Diagnostic, doc: &DocComment) -> Diagnostic {
        match &self.line_index {
            Some(index) => {
                let (line, column) = index.location(doc.syntax().text_range().start().into());
                diag.with_location(line, column)
            }
            None => diag,
        }
    }

    /// Escaped summary cell. Records a warning when the summary is empty.
    fn summary(&mut self, doc: &DocComment, kind: DeclKind, name: &str) -> String {
        let mut text = extract(doc, &self.options.summary_field, self.options.field_match);
        if self.options.decode_entities {
            text = decode_entities(&text);
        }
        if text.is_empty() {
            let diag = Diagnostic::warning(format!(
                "{} '{}' has no <{}> text",
                kind, name, self.options.summary_field
            ));
            let diag = self.diagnostic_at(diag, doc);
            self.diagnostics.add(diag);
        }
        escape(&text)
    }

    fn add_type_row(&mut self, kind: DeclKind, name: &str, doc: &DocComment) {
        let summary = self.summary(doc, kind, name);
        let row = format!("{} & {} \\\\", escape(name), summary);
        push_row(&mut self.class_table, &row);
        self.class_count += 1;
    }

    /// `\\` followed by the continuation marker, if there is one
    fn wide_row_end(&self) -> String {
        if self.options.row_continuation.is_empty() {
            "\\\\".to_string()
        } else {
            format!("\\\\ {}", self.options.row_continuation)
        }
    }
}

impl DocHandler for TableAssembler {
    fn on_class(&mut self, class: &ClassDecl, doc: &DocComment) {
        self.add_type_row(DeclKind::Class, &class.name(), doc);
    }

    fn on_struct(&mut self, st: &StructDecl, doc: &DocComment) {
        self.add_type_row(DeclKind::Struct, &st.name(), doc);
    }

    fn on_field(&mut self, field: &FieldDecl, doc: &DocComment) {
        let names: Vec<String> = field.variables().map(|v| v.name()).collect();
        let summary = self.summary(doc, DeclKind::Field, &names.join(", "));
        let modifiers = escape(&field.modifiers());
        let ty = escape(&field.ty());
        let wide = self.options.wide_cell(&summary);
        let end = self.wide_row_end();

        let rows: Vec<String> = names
            .iter()
            .map(|name| format!("{} & {} & {} & {} {}", escape(name), modifiers, ty, wide, end))
            .collect();
        let members = self.owner(Declaration::Field(field.clone()));
        for row in &rows {
            members.add_field(row);
        }
    }

    fn on_property(&mut self, property: &PropertyDecl, doc: &DocComment) {
        let name = property.name();
        let summary = self.summary(doc, DeclKind::Property, &name);
        let accessors = property
            .accessor_list()
            .map(|list| list.signature())
            .unwrap_or_else(|| DEFAULT_ACCESSORS.to_string());
        let row = format!(
            "{} & {} & {} & {} & {} \\\\",
            escape(&name),
            escape(&property.modifiers()),
            escape(&property.ty()),
            escape(&accessors),
            summary
        );
        self.owner(Declaration::Property(property.clone()))
            .add_property(&row);
    }

    fn on_method(&mut self, method: &MethodDecl, doc: &DocComment) {
        let name = method.name();
        let summary = self.summary(doc, DeclKind::Method, &name);
        let row = format!(
            "{} & {} & {} & {} & {} \\\\",
            escape(&name),
            escape(&method.modifiers()),
            escape(&method.return_type()),
            escape(&method.parameter_list()),
            summary
        );
        self.owner(Declaration::Method(method.clone())).add_method(&row);
    }

    fn on_constructor(&mut self, constructor: &ConstructorDecl, doc: &DocComment) {
        let name = constructor.name();
        let summary = self.summary(doc, DeclKind::Constructor, &name);
        let row = format!(
            "{} & {} & {} & {} {}",
            escape(&name),
            escape(&constructor.modifiers()),
            escape(&constructor.parameter_list()),
            self.options.wide_cell(&summary),
            self.wide_row_end()
        );
        self.owner(Declaration::Constructor(constructor.clone()))
            .add_constructor(&row);
    }

    fn on_unresolved(&mut self, doc: &DocComment) {
        let diag = Diagnostic::info(
            "documentation comment is not attached to a class, struct, field, property, method or constructor",
        );
        let diag = self.diagnostic_at(diag, doc);
        self.diagnostics.add(diag);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::options::OwnerKeyStyle;
    use crate::utils::diagnostics::DiagnosticLevel;
    use pretty_assertions::assert_eq;

    fn tables(source: &str, options: TableOptions) -> DocTables {
        let mut assembler = TableAssembler::new(options);
        assembler.add_source(source);
        assembler.finish()
    }

    #[test]
    fn test_class_and_field_rows() {
        let source = r#"
/// <summary>Does X.</summary>
class Foo
{
    /// <summary>counter</summary>
    private int x;
}
"#;
        let tables = tables(source, TableOptions::default());
        assert_eq!(tables.class_table(), "Foo & Does X. \\\\\n");
        let foo = tables.member("Foo").expect("Foo members");
        assert_eq!(
            foo.fields_table(),
            "x & private & int & \\multicolumn{2}{p{0.45\\linewidth}|}{counter} \\\\ \\noalign{\\nobreak}\n"
        );
        assert_eq!(foo.fields_count(), 1);
    }

    #[test]
    fn test_one_row_per_variable() {
        let source = "class C {\n  /// <summary>pair</summary>\n  public static double a, b, c = 1.0;\n}";
        let tables = tables(source, TableOptions::default());
        let c = tables.member("C").expect("C members");
        assert_eq!(c.fields_count(), 3);
        let rows: Vec<&str> = c.fields_table().lines().collect();
        assert!(rows[0].starts_with("a & public static & double & "));
        assert!(rows[1].starts_with("b & public static & double & "));
        assert!(rows[2].starts_with("c & public static & double & "));
        assert!(rows.iter().all(|r| r.contains("{pair}")));
    }

    #[test]
    fn test_property_rows() {
        let source = r#"
class C
{
    /// <summary>Computed</summary>
    public int Total => a + b;

    /// <summary>Stored</summary>
    public string Name { get { return name; } set { name = value; } }
}
"#;
        let tables = tables(source, TableOptions::default());
        assert_eq!(
            tables.member("C").map(|c| c.properties_table()),
            Some(
                "Total & public & int & \\{ get; \\} & Computed \\\\\n\
                 Name & public & string & \\{ get set \\} & Stored \\\\\n"
            )
        );
    }

    #[test]
    fn test_method_and_constructor_rows() {
        let source = r#"
struct Vec2
{
    /// <summary>Create.</summary>
    public Vec2(double x, double y) { }

    /// <summary>Length of <paramref name="v"/>.</summary>
    public static double Length(Vec2 v) => 0;
}
"#;
        let tables = tables(source, TableOptions::default());
        let members = tables.member("Vec2").expect("Vec2 members");
        assert_eq!(
            members.methods_table(),
            "Length & public static & double & (Vec2 v) & Length of . \\\\\n"
        );
        assert_eq!(
            members.constructors_table(),
            "Vec2 & public & (double x, double y) & \\multicolumn{2}{p{0.45\\linewidth}|}{Create.} \\\\ \\noalign{\\nobreak}\n"
        );
    }

    #[test]
    fn test_nested_members_group_under_inner_type() {
        let source = r#"
class Outer
{
    /// <summary>outer field</summary>
    int a;

    class Inner
    {
        /// <summary>inner field</summary>
        int b;
    }

    /// <summary>after inner</summary>
    int c;
}
"#;
        let tables = tables(source, TableOptions::default());
        let owners: Vec<&String> = tables.members().keys().collect();
        assert_eq!(owners, vec!["Outer", "Inner"]);
        assert_eq!(tables.member("Outer").map(|m| m.fields_count()), Some(2));
        assert_eq!(tables.member("Inner").map(|m| m.fields_count()), Some(1));

        let qualified = tables_with_qualified(source);
        assert!(qualified.member("Outer.Inner").is_some());
    }

    fn tables_with_qualified(source: &str) -> DocTables {
        tables(
            source,
            TableOptions::default().with_owner_keys(OwnerKeyStyle::Qualified),
        )
    }

    #[test]
    fn test_entities_and_escaping() {
        let source = "class C {\n  /// <summary>Maps &lt;key&gt; &amp; value_1</summary>\n  int m;\n}";
        let tables = tables(source, TableOptions::default());
        let row = tables.member("C").map(|m| m.fields_table().to_string()).unwrap_or_default();
        assert!(row.contains(
            r"{Maps \texttt{<}\allowbreak{}key\texttt{>}\allowbreak{} \& value\_1}"
        ));

        let compat = self::tables(source, TableOptions::compat());
        let row = compat.member("C").map(|m| m.fields_table().to_string()).unwrap_or_default();
        assert!(row.contains(r"{Maps \&lt;key\&gt; \&amp; value\_1}"));
    }

    #[test]
    fn test_unresolved_and_empty_summary_diagnostics() {
        let source = "/// <summary>orphan</summary>\nnamespace N {\n  /// <remarks>no summary</remarks>\n  class C { }\n}";
        let tables = tables(source, TableOptions::default());
        assert_eq!(tables.class_table(), "C &  \\\\\n");
        assert!(tables.members().is_empty());

        let levels: Vec<DiagnosticLevel> = tables.diagnostics().iter().map(|d| d.level).collect();
        assert_eq!(levels, vec![DiagnosticLevel::Info, DiagnosticLevel::Warning]);
        let info = &tables.diagnostics().items[0];
        assert_eq!((info.line, info.column), (Some(1), Some(1)));
    }

    #[test]
    fn test_owner_without_type() {
        let source = "interface I {\n  /// <summary>m</summary>\n  void M();\n}";
        let tables = tables(source, TableOptions::default());
        assert!(tables.member(crate::core::OWNER_NOT_FOUND).is_some());
    }

    #[test]
    fn test_add_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Foo.cs");
        std::fs::write(&path, "/// <summary>From disk</summary>\nclass Foo { }").unwrap();

        let mut assembler = TableAssembler::new(TableOptions::default());
        assembler.add_file(&path).unwrap();
        let missing = assembler.add_file(dir.path().join("Missing.cs"));
        assert!(matches!(missing, Err(XmlDocError::Io { .. })));
        assert_eq!(assembler.finish().class_table(), "Foo & From disk \\\\\n");
    }

    #[test]
    fn test_custom_markers() {
        let options = TableOptions {
            wide_cell_spec: "l".to_string(),
            row_continuation: String::new(),
            ..TableOptions::default()
        };
        let tables = tables("class C {\n  /// <summary>s</summary>\n  int x;\n}", options);
        assert_eq!(
            tables.member("C").map(|m| m.fields_table()),
            Some("x &  & int & \\multicolumn{2}{l}{s} \\\\\n")
        );
    }
}
