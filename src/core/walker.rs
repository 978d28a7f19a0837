//! Documentation tree walker
//!
//! Visits every documentation comment in document order, resolves the
//! declaration it documents and hands both to a [`DocHandler`].

use rowan::WalkEvent;
use tracing::debug;

use crate::core::resolver::resolve;
use crate::syntax::ast::AstNode;
use crate::syntax::{
    ClassDecl, ConstructorDecl, Declaration, DocComment, FieldDecl, MethodDecl, PropertyDecl,
    StructDecl, SyntaxNode,
};

/// Receives each documentation comment together with its declaration.
/// Exactly one method is called per comment.
pub trait DocHandler {
    fn on_class(&mut self, class: &ClassDecl, doc: &DocComment);
    fn on_struct(&mut self, st: &StructDecl, doc: &DocComment);
    fn on_field(&mut self, field: &FieldDecl, doc: &DocComment);
    fn on_property(&mut self, property: &PropertyDecl, doc: &DocComment);
    fn on_method(&mut self, method: &MethodDecl, doc: &DocComment);
    fn on_constructor(&mut self, constructor: &ConstructorDecl, doc: &DocComment);

    /// A comment that documents none of the supported declarations
    fn on_unresolved(&mut self, _doc: &DocComment) {}
}

/// Options for [`walk_with_options`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WalkOptions {
    /// Stop the ownership walk at unsupported declarations
    pub strict_ownership: bool,
}

/// Walk `root` with default options
pub fn walk<H: DocHandler + ?Sized>(root: &SyntaxNode, handler: &mut H) {
    walk_with_options(root, handler, WalkOptions::default())
}

pub fn walk_with_options<H: DocHandler + ?Sized>(
    root: &SyntaxNode,
    handler: &mut H,
    options: WalkOptions,
) {
    // Pre-order, without skipping comment subtrees
    for event in root.preorder() {
        let WalkEvent::Enter(node) = event else {
            continue;
        };
        if let Some(doc) = DocComment::cast(node) {
            visit(&doc, handler, options);
        }
    }
}

fn visit<H: DocHandler + ?Sized>(doc: &DocComment, handler: &mut H, options: WalkOptions) {
    let declaration = doc
        .owning_token()
        .and_then(|token| token.parent())
        .and_then(|position| resolve(&position, options.strict_ownership));

    let Some(declaration) = declaration else {
        debug!(
            offset = u32::from(doc.syntax().text_range().start()),
            "documentation comment without a supported declaration"
        );
        handler.on_unresolved(doc);
        return;
    };

    debug!(kind = %declaration.kind(), name = %declaration.name(), "documentation comment");
    match &declaration {
        Declaration::Class(class) => handler.on_class(class, doc),
        Declaration::Struct(st) => handler.on_struct(st, doc),
        Declaration::Field(field) => handler.on_field(field, doc),
        Declaration::Property(property) => handler.on_property(property, doc),
        Declaration::Method(method) => handler.on_method(method, doc),
        Declaration::Constructor(constructor) => handler.on_constructor(constructor, doc),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::parse;
    use pretty_assertions::assert_eq;

    /// Records `kind:name` for each call
    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl DocHandler for Recorder {
        fn on_class(&mut self, class: &ClassDecl, _doc: &DocComment) {
            self.calls.push(format!("class:{}", class.name()));
        }
        fn on_struct(&mut self, st: &StructDecl, _doc: &DocComment) {
            self.calls.push(format!("struct:{}", st.name()));
        }
        fn on_field(&mut self, field: &FieldDecl, _doc: &DocComment) {
            let names: Vec<_> = field.variables().map(|v| v.name()).collect();
            self.calls.push(format!("field:{}", names.join(",")));
        }
        fn on_property(&mut self, property: &PropertyDecl, _doc: &DocComment) {
            self.calls.push(format!("property:{}", property.name()));
        }
        fn on_method(&mut self, method: &MethodDecl, _doc: &DocComment) {
            self.calls.push(format!("method:{}", method.name()));
        }
        fn on_constructor(&mut self, constructor: &ConstructorDecl, _doc: &DocComment) {
            self.calls.push(format!("constructor:{}", constructor.name()));
        }
        fn on_unresolved(&mut self, _doc: &DocComment) {
            self.calls.push("unresolved".to_string());
        }
    }

    fn calls(source: &str, options: WalkOptions) -> Vec<String> {
        let mut recorder = Recorder::default();
        walk_with_options(&parse(source).syntax(), &mut recorder, options);
        recorder.calls
    }

    const SOURCE: &str = r#"
/// <summary>file level</summary>
namespace Demo
{
    /// <summary>Foo</summary>
    public class Foo
    {
        /// <summary>fields</summary>
        private int a, b;

        /// <summary>prop</summary>
        public int P { get; set; }

        /// <summary>ctor</summary>
        public Foo() { }

        /// <summary>run</summary>
        public void Run() { }

        /// <summary>event</summary>
        public event EventHandler Changed;

        /// <summary>nested</summary>
        public struct Point { }
    }
}
"#;

    #[test]
    fn test_dispatch_in_document_order() {
        assert_eq!(
            calls(SOURCE, WalkOptions::default()),
            vec![
                "unresolved",
                "class:Foo",
                "field:a,b",
                "property:P",
                "constructor:Foo",
                "method:Run",
                "class:Foo",
                "struct:Point",
            ]
        );
    }

    #[test]
    fn test_strict_ownership() {
        let calls = calls(
            SOURCE,
            WalkOptions {
                strict_ownership: true,
            },
        );
        assert_eq!(calls[6], "unresolved");
        assert_eq!(calls.len(), 8);
    }

    #[test]
    fn test_ordinary_comments_are_ignored() {
        let source = "class C {\n  // <summary>plain</summary>\n  /* <summary>block</summary> */\n  //// <summary>four</summary>\n  /**/\n  int x;\n}";
        assert!(calls(source, WalkOptions::default()).is_empty());
    }

    #[test]
    fn test_block_documentation_comment() {
        let source = "class C {\n  /** <summary>block doc</summary> */\n  int x;\n}";
        assert_eq!(calls(source, WalkOptions::default()), vec!["field:x"]);
    }
}
