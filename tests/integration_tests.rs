//! End-to-end tests for table generation

use pretty_assertions::assert_eq;
use xmldoc_tables::{
    escape, extract, generate_tables, generate_tables_with_options, parse, render_document,
    syntax::ast::AstNode, syntax::DocComment, DiagnosticLevel, OwnerKeyStyle, RenderOptions,
    TableOptions,
};

const WIDE: &str = r"\multicolumn{2}{p{0.45\linewidth}|}";
const CONT: &str = r"\noalign{\nobreak}";

// ============================================================================
// Rows
// ============================================================================

mod rows {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_class_with_field() {
        let tables = generate_tables(
            r#"
/// <summary>
/// Does X.
/// </summary>
public class Foo
{
    /// <summary>counter</summary>
    private int x;
}
"#,
        );
        assert_eq!(tables.class_table(), "Foo & Does X. \\\\\n");
        let foo = tables.member("Foo").expect("Foo has members");
        assert_eq!(
            foo.fields_table(),
            format!("x & private & int & {}{{counter}} \\\\ {}\n", WIDE, CONT)
        );
        assert_eq!(foo.len(), 1);
    }

    #[test]
    fn test_declarations_without_modifiers() {
        let tables = generate_tables(
            r#"
/// <summary>Does X.</summary>
class Foo
{
    /// <summary>counter</summary>
    int x;

    /// <summary>prop</summary>
    int P { get; }

    /// <summary>run</summary>
    void Run() { }

    /// <summary>make</summary>
    Foo() { }

    /// <summary>nested</summary>
    class Inner { }
}
"#,
        );
        assert_eq!(tables.class_table(), "Foo & Does X. \\\\\nInner & nested \\\\\n");
        let foo = tables.member("Foo").expect("Foo has members");
        assert_eq!(
            foo.fields_table(),
            format!("x &  & int & {}{{counter}} \\\\ {}\n", WIDE, CONT)
        );
        assert_eq!(foo.properties_table(), "P &  & int & \\{ get; \\} & prop \\\\\n");
        assert_eq!(foo.methods_table(), "Run &  & void & () & run \\\\\n");
        assert_eq!(
            foo.constructors_table(),
            format!("Foo &  & () & {}{{make}} \\\\ {}\n", WIDE, CONT)
        );
    }

    #[test]
    fn test_member_after_event_keeps_its_row() {
        let tables = generate_tables(
            r#"
public class C
{
    /// <summary>f</summary>
    public event Action E { add { } remove { } }

    /// <summary>g</summary>
    int g;
}
"#,
        );
        assert_eq!(tables.class_table(), "C & f \\\\\n");
        assert!(tables.member("C").unwrap().fields_table().starts_with("g &  & int"));
    }

    #[test]
    fn test_one_row_per_declared_variable() {
        let tables = generate_tables(
            "class P {\n  /// <summary>coordinates</summary>\n  public static double x, y, z = 1.0;\n}",
        );
        let rows: Vec<&str> = tables.member("P").unwrap().fields_table().lines().collect();
        assert_eq!(rows.len(), 3);
        for (row, name) in rows.iter().zip(["x", "y", "z"]) {
            assert_eq!(
                *row,
                format!(
                    "{} & public static & double & {}{{coordinates}} \\\\ {}",
                    name, WIDE, CONT
                )
            );
        }
    }

    #[test]
    fn test_property_rows() {
        let tables = generate_tables(
            r#"
class Bag
{
    /// <summary>Item count</summary>
    public int Count => items.Count;

    /// <summary>Name</summary>
    public string Name { get; protected set; } = "";
}
"#,
        );
        let bag = tables.member("Bag").unwrap();
        assert_eq!(
            bag.properties_table(),
            "Count & public & int & \\{ get; \\} & Item count \\\\\n\
             Name & public & string & \\{ get; protected set; \\} & Name \\\\\n"
        );
    }

    #[test]
    fn test_method_and_constructor_rows() {
        let tables = generate_tables(
            r#"
class Cache
{
    /// <summary>Creates an empty cache</summary>
    public Cache(int capacity) { }

    /// <summary>Looks up a value</summary>
    public bool TryGet(string key, out int value) { value = 0; return false; }
}
"#,
        );
        let cache = tables.member("Cache").unwrap();
        assert_eq!(
            cache.constructors_table(),
            format!(
                "Cache & public & (int capacity) & {}{{Creates an empty cache}} \\\\ {}\n",
                WIDE, CONT
            )
        );
        assert_eq!(
            cache.methods_table(),
            "Try\\-Get & public & bool & (string key, out int value) & Looks up a value \\\\\n"
        );
    }

    #[test]
    fn test_generic_types_are_escaped() {
        let tables = generate_tables(
            "class C {\n  /// <summary>all</summary>\n  List<int> items;\n}",
        );
        assert_eq!(
            tables.member("C").unwrap().fields_table(),
            format!(
                "items &  & List\\texttt{{<}}\\allowbreak{{}}int\\texttt{{>}}\\allowbreak{{}} & {}{{all}} \\\\ {}\n",
                WIDE, CONT
            )
        );
    }

    #[test]
    fn test_row_order_follows_source() {
        let tables = generate_tables(
            r#"
/// <summary>first</summary>
class B {
    /// <summary>b</summary>
    void Second() { }
    /// <summary>a</summary>
    void First() { }
}
/// <summary>second</summary>
struct A { }
"#,
        );
        assert_eq!(tables.class_table(), "B & first \\\\\nA & second \\\\\n");
        let methods: Vec<&str> = tables.member("B").unwrap().methods_table().lines().collect();
        assert!(methods[0].starts_with("Second"));
        assert!(methods[1].starts_with("First"));
    }

    #[test]
    fn test_missing_summary_gives_empty_cell_and_warning() {
        let tables = generate_tables("/// <remarks>only remarks</remarks>\nclass R { }");
        assert_eq!(tables.class_table(), "R &  \\\\\n");
        let warning = tables
            .diagnostics()
            .iter()
            .find(|d| d.level == DiagnosticLevel::Warning)
            .expect("empty summary warning");
        assert_eq!(warning.line, Some(1));
    }
}

// ============================================================================
// Ownership
// ============================================================================

mod ownership {
    use super::*;
    use pretty_assertions::assert_eq;

    const NESTED: &str = r#"
namespace N
{
    class Outer
    {
        class Inner
        {
            /// <summary>inner field</summary>
            int value;
        }

        /// <summary>outer field</summary>
        int other;
    }
}
"#;

    #[test]
    fn test_nested_members_group_under_innermost_type() {
        let tables = generate_tables(NESTED);
        assert!(tables.member("Inner").unwrap().fields_table().starts_with("value &"));
        assert!(tables.member("Outer").unwrap().fields_table().starts_with("other &"));
        let owners: Vec<&String> = tables.members().keys().collect();
        assert_eq!(owners, vec!["Inner", "Outer"]);
    }

    #[test]
    fn test_qualified_owner_keys() {
        let options = TableOptions::new().with_owner_keys(OwnerKeyStyle::Qualified);
        let tables = generate_tables_with_options(NESTED, &options);
        assert!(tables.member("Outer.Inner").is_some());
        assert!(tables.member("Inner").is_none());
    }

    #[test]
    fn test_unowned_block_produces_no_rows() {
        let tables = generate_tables(
            "/// <summary>stray</summary>\nnamespace N { }\n/// <summary>end</summary>\n",
        );
        assert!(tables.is_empty());
        assert!(tables
            .diagnostics()
            .iter()
            .all(|d| d.level == DiagnosticLevel::Info));
    }

    #[test]
    fn test_comment_inside_method_body_documents_the_method() {
        let tables = generate_tables(
            "class C {\n  void Run() {\n    /// <summary>inside</summary>\n    Step();\n  }\n}",
        );
        assert_eq!(
            tables.member("C").unwrap().methods_table(),
            "Run &  & void & () & inside \\\\\n"
        );
    }

    #[test]
    fn test_attributes_do_not_change_ownership() {
        let tables = generate_tables(
            "class C {\n  /// <summary>ser</summary>\n  [Serializable, Obsolete(\"x\")]\n  public int Id;\n}",
        );
        assert!(tables.member("C").unwrap().fields_table().starts_with("Id & public & int"));
    }

    #[test]
    fn test_strict_ownership_skips_unsupported_members() {
        let source = r#"
class C
{
    /// <summary>changed</summary>
    public event EventHandler Changed;

    /// <summary>colours</summary>
    enum Colour { Red }
}
"#;
        let loose = generate_tables(source);
        assert_eq!(loose.class_table(), "C & changed \\\\\nC & colours \\\\\n");

        let strict = generate_tables_with_options(
            source,
            &TableOptions::new().with_strict_ownership(true),
        );
        assert!(strict.is_empty());
    }
}

// ============================================================================
// Documentation blocks
// ============================================================================

mod documentation {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_block_comments_behave_like_line_comments() {
        let line = generate_tables("/// <summary>Same text</summary>\nclass C { }");
        let block = generate_tables("/** <summary>Same text</summary> */\nclass C { }");
        assert_eq!(line.class_table(), block.class_table());
    }

    #[test]
    fn test_exact_and_substring_lookup() {
        let source = "/// <summaryx>near miss</summaryx>\nclass C { }";
        assert_eq!(generate_tables(source).class_table(), "C &  \\\\\n");
        assert_eq!(
            generate_tables_with_options(source, &TableOptions::compat()).class_table(),
            "C & near miss \\\\\n"
        );
    }

    #[test]
    fn test_entities() {
        let source = "/// <summary>Wraps a &lt;T&gt;</summary>\nclass C { }";
        assert_eq!(
            generate_tables(source).class_table(),
            "C & Wraps a \\texttt{<}\\allowbreak{}T\\texttt{>}\\allowbreak{} \\\\\n"
        );
        assert_eq!(
            generate_tables_with_options(source, &TableOptions::compat()).class_table(),
            "C & Wraps a \\&lt;T\\&gt; \\\\\n"
        );
    }

    #[test]
    fn test_extract_missing_field_is_empty() {
        let parse = parse("/// <remarks>r</remarks>\nclass C { }");
        let doc = parse
            .syntax()
            .descendants()
            .find_map(DocComment::cast)
            .expect("doc comment");
        assert_eq!(extract(&doc, "summary", Default::default()), "");
        assert_eq!(extract(&doc, "remarks", Default::default()), "r");
    }

    #[test]
    fn test_escape_examples() {
        assert_eq!(escape("A&B"), "A\\&B");
        assert_eq!(escape("a--b"), "a\\mbox{-{}-}b");
        assert_eq!(escape("GetValue"), "Get\\-Value");
    }
}

// ============================================================================
// Rendering and robustness
// ============================================================================

mod document {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_rendered_document_has_one_table_per_non_empty_section() {
        let tables = generate_tables(
            r#"
/// <summary>A</summary>
class A
{
    /// <summary>f</summary>
    int f;
    /// <summary>m</summary>
    void M() { }
}
/// <summary>B</summary>
class B
{
    /// <summary>p</summary>
    int P { get; }
}
"#,
        );
        let latex = render_document(&tables, &RenderOptions::default());
        assert_eq!(latex.matches("\\begin{tabular}").count(), 4);
    }

    #[test]
    fn test_broken_source_still_produces_tables() {
        let tables = generate_tables(
            "/// <summary>kept</summary>\nclass C {\n  ) ]\n  /// <summary>f</summary>\n  int f;\n",
        );
        assert_eq!(tables.class_table(), "C & kept \\\\\n");
        assert_eq!(tables.member("C").unwrap().fields_count(), 1);
        assert!(tables.diagnostics().has_errors());
    }

    mod properties {
        use proptest::prelude::*;
        use xmldoc_tables::{generate_tables, parse};

        proptest! {
            #[test]
            fn parse_is_lossless(source in "\\PC{0,200}") {
                prop_assert_eq!(parse(&source).syntax().text().to_string(), source);
            }

            #[test]
            fn generation_never_panics(
                source in "(/// <summary>[a-z &<>]{0,10}</summary>\n|class C \\{|\\}|int x;|void M\\(\\) \\{ \\}|[ \n])*"
            ) {
                let _ = generate_tables(&source);
            }
        }
    }
}
