//! Typed views over syntax nodes
//!
//! Each wrapper is a cheap handle around a `SyntaxNode` of one kind. The
//! six declaration kinds that documentation tables support form the closed
//! [`Declaration`] enum; everything else (interfaces, enums, events, ...) is
//! only visible as raw nodes.

use rowan::{Direction, NodeOrToken};

use super::SyntaxKind::{self, *};
use super::{SyntaxNode, SyntaxToken};

/// A typed view over a node of a known kind
pub trait AstNode: Sized {
    fn can_cast(kind: SyntaxKind) -> bool;
    fn cast(node: SyntaxNode) -> Option<Self>;
    fn syntax(&self) -> &SyntaxNode;
}

macro_rules! ast_node {
    ($(#[$meta:meta])* $name:ident, $kind:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl AstNode for $name {
            fn can_cast(kind: SyntaxKind) -> bool {
                kind == $kind
            }

            fn cast(node: SyntaxNode) -> Option<Self> {
                Self::can_cast(node.kind()).then(|| $name(node))
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

ast_node!(
    /// `class Name { ... }`
    ClassDecl,
    CLASS_DECL
);
ast_node!(
    /// `struct Name { ... }`
    StructDecl,
    STRUCT_DECL
);
ast_node!(
    /// `modifiers Type a, b = 1;`
    FieldDecl,
    FIELD_DECL
);
ast_node!(
    /// One name bound by a field declaration
    VariableDeclarator,
    VARIABLE_DECLARATOR
);
ast_node!(
    /// `modifiers Type Name { get; set; }` or `... Name => expr;`
    PropertyDecl,
    PROPERTY_DECL
);
ast_node!(
    /// `{ get; private set; }`
    AccessorList,
    ACCESSOR_LIST
);
ast_node!(
    /// `modifiers ReturnType Name<T>(params) ...`
    MethodDecl,
    METHOD_DECL
);
ast_node!(
    /// `modifiers Name(params) : base(...) { ... }`
    ConstructorDecl,
    CONSTRUCTOR_DECL
);
ast_node!(
    /// A `///` run or `/** */` block
    DocComment,
    DOC_COMMENT
);
ast_node!(
    /// `<name ...>content</name>` inside a documentation comment
    XmlElement,
    XML_ELEMENT
);

fn child_of_kind(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxNode> {
    node.children().find(|c| c.kind() == kind)
}

/// Identifier held by the `NAME` child. Explicit interface qualifiers are
/// dropped (`IFoo.Bar` -> `Bar`) and so is a verbatim `@` prefix.
fn identifier(node: &SyntaxNode) -> String {
    child_of_kind(node, NAME)
        .and_then(|name| {
            name.children_with_tokens()
                .filter_map(NodeOrToken::into_token)
                .filter(|t| t.kind() == IDENT)
                .last()
        })
        .map(|t| t.text().trim_start_matches('@').to_string())
        .unwrap_or_default()
}

fn child_text(node: &SyntaxNode, kind: SyntaxKind) -> String {
    child_of_kind(node, kind)
        .map(|n| collapsed_text(&n))
        .unwrap_or_default()
}

/// Source text of `node` with comments and documentation dropped and every
/// run of whitespace collapsed to one space
pub fn collapsed_text(node: &SyntaxNode) -> String {
    collapsed_text_filtered(node, |_| true)
}

/// Like [`collapsed_text`], skipping child nodes for which `keep` is false.
/// A skipped node counts as whitespace.
pub fn collapsed_text_filtered<F>(node: &SyntaxNode, mut keep: F) -> String
where
    F: FnMut(&SyntaxNode) -> bool,
{
    let mut collector = TextCollector::default();
    collector.collect(node, &mut keep);
    collector.out
}

#[derive(Default)]
struct TextCollector {
    out: String,
    pending_space: bool,
}

impl TextCollector {
    fn collect<F>(&mut self, node: &SyntaxNode, keep: &mut F)
    where
        F: FnMut(&SyntaxNode) -> bool,
    {
        for element in node.children_with_tokens() {
            match element {
                NodeOrToken::Node(child) => {
                    if child.kind() == DOC_COMMENT || !keep(&child) {
                        self.pending_space = true;
                    } else {
                        self.collect(&child, keep);
                    }
                }
                NodeOrToken::Token(token) => self.push(&token),
            }
        }
    }

    fn push(&mut self, token: &SyntaxToken) {
        if token.kind().is_trivia() {
            self.pending_space = true;
            return;
        }
        if self.pending_space && !self.out.is_empty() {
            self.out.push(' ');
        }
        self.pending_space = false;
        self.out.push_str(token.text());
    }
}

impl ClassDecl {
    pub fn name(&self) -> String {
        identifier(&self.0)
    }

    pub fn modifiers(&self) -> String {
        child_text(&self.0, MODIFIER_LIST)
    }
}

impl StructDecl {
    pub fn name(&self) -> String {
        identifier(&self.0)
    }

    pub fn modifiers(&self) -> String {
        child_text(&self.0, MODIFIER_LIST)
    }
}

impl FieldDecl {
    pub fn modifiers(&self) -> String {
        child_text(&self.0, MODIFIER_LIST)
    }

    fn declaration(&self) -> Option<SyntaxNode> {
        child_of_kind(&self.0, VARIABLE_DECLARATION)
    }

    /// Declared type, shared by every variable
    pub fn ty(&self) -> String {
        self.declaration()
            .map(|d| child_text(&d, TYPE))
            .unwrap_or_default()
    }

    /// Variables in declaration order
    pub fn variables(&self) -> impl Iterator<Item = VariableDeclarator> {
        self.declaration()
            .into_iter()
            .flat_map(|d| d.children())
            .filter_map(VariableDeclarator::cast)
    }
}

impl VariableDeclarator {
    pub fn name(&self) -> String {
        identifier(&self.0)
    }
}

impl PropertyDecl {
    pub fn name(&self) -> String {
        identifier(&self.0)
    }

    pub fn modifiers(&self) -> String {
        child_text(&self.0, MODIFIER_LIST)
    }

    pub fn ty(&self) -> String {
        child_text(&self.0, TYPE)
    }

    /// `None` for expression-bodied properties
    pub fn accessor_list(&self) -> Option<AccessorList> {
        self.0.children().find_map(AccessorList::cast)
    }
}

impl AccessorList {
    /// The accessor list with every accessor body collapsed to its keyword:
    /// `{ get { return x; } private set => x = value; }` -> `{ get private set }`
    pub fn signature(&self) -> String {
        let mut collector = TextCollector::default();
        for element in self.0.children_with_tokens() {
            match element {
                NodeOrToken::Node(accessor) if accessor.kind() == ACCESSOR_DECL => {
                    let mut has_body = false;
                    for part in accessor.children_with_tokens() {
                        match part {
                            NodeOrToken::Node(n) if matches!(n.kind(), BLOCK | ARROW_EXPR) => {
                                has_body = true;
                                collector.pending_space = true;
                            }
                            NodeOrToken::Node(n) => collector.collect(&n, &mut |_| true),
                            // `;` after an arrow body goes with the body
                            NodeOrToken::Token(t) if t.kind() == SEMICOLON && has_body => {}
                            NodeOrToken::Token(t) => collector.push(&t),
                        }
                    }
                }
                NodeOrToken::Node(other) => collector.collect(&other, &mut |_| true),
                NodeOrToken::Token(t) => collector.push(&t),
            }
        }
        collector.out
    }
}

impl MethodDecl {
    pub fn name(&self) -> String {
        identifier(&self.0)
    }

    pub fn modifiers(&self) -> String {
        child_text(&self.0, MODIFIER_LIST)
    }

    pub fn return_type(&self) -> String {
        child_text(&self.0, TYPE)
    }

    /// `(int a, string b)`, parentheses included
    pub fn parameter_list(&self) -> String {
        child_text(&self.0, PARAMETER_LIST)
    }
}

impl ConstructorDecl {
    pub fn name(&self) -> String {
        identifier(&self.0)
    }

    pub fn modifiers(&self) -> String {
        child_text(&self.0, MODIFIER_LIST)
    }

    pub fn parameter_list(&self) -> String {
        child_text(&self.0, PARAMETER_LIST)
    }
}

impl DocComment {
    /// Every element in the comment, nested ones included, in document order
    pub fn elements(&self) -> impl Iterator<Item = XmlElement> {
        self.0.descendants().filter_map(XmlElement::cast)
    }

    /// The first significant token after the comment: the token the comment
    /// is leading trivia of. `None` at the end of the file.
    ///
    /// Empty nodes (a missing modifier list, say) are stepped over, so the
    /// search never stops early at a node without tokens.
    pub fn owning_token(&self) -> Option<SyntaxToken> {
        let mut node = self.0.clone();
        loop {
            for sibling in node.siblings_with_tokens(Direction::Next).skip(1) {
                let found = match sibling {
                    NodeOrToken::Token(token) => Some(token).filter(|t| !t.kind().is_trivia()),
                    NodeOrToken::Node(child) if child.kind() == DOC_COMMENT => None,
                    NodeOrToken::Node(child) => first_significant_token(&child),
                };
                if found.is_some() {
                    return found;
                }
            }
            node = node.parent()?;
        }
    }
}

/// First non-trivia token inside `node` that is not part of a documentation
/// comment
fn first_significant_token(node: &SyntaxNode) -> Option<SyntaxToken> {
    node.descendants_with_tokens()
        .filter_map(NodeOrToken::into_token)
        .find(|token| {
            !token.kind().is_trivia()
                && !token.parent_ancestors().any(|n| n.kind() == DOC_COMMENT)
        })
}

impl XmlElement {
    /// Tag name from the start tag
    pub fn name(&self) -> String {
        child_of_kind(&self.0, XML_START_TAG)
            .and_then(|tag| {
                tag.children_with_tokens()
                    .filter_map(NodeOrToken::into_token)
                    .find(|t| t.kind() == XML_NAME)
            })
            .map(|t| t.text().to_string())
            .unwrap_or_default()
    }

    /// Raw text between the start and end tag. Nested markup is kept;
    /// comment exteriors (`///`, `*`) are dropped.
    pub fn content(&self) -> String {
        let mut out = String::new();
        for element in self.0.children_with_tokens() {
            match element {
                NodeOrToken::Node(n) if matches!(n.kind(), XML_START_TAG | XML_END_TAG) => {
                    // A stray end tag inside the content is still content
                    if n.kind() == XML_END_TAG && n.next_sibling_or_token().is_some() {
                        out.push_str(&n.text().to_string());
                    }
                }
                NodeOrToken::Node(n) => {
                    for token in n
                        .descendants_with_tokens()
                        .filter_map(NodeOrToken::into_token)
                        .filter(|t| t.kind() != DOC_EXTERIOR)
                    {
                        out.push_str(token.text());
                    }
                }
                NodeOrToken::Token(t) if t.kind() == DOC_EXTERIOR => {}
                NodeOrToken::Token(t) => out.push_str(t.text()),
            }
        }
        out
    }
}

/// Field-less tag for the [`Declaration`] variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize), serde(rename_all = "lowercase"))]
pub enum DeclKind {
    Class,
    Struct,
    Field,
    Property,
    Method,
    Constructor,
}

impl DeclKind {
    /// Handler dispatch order: a member's own kind wins over its container
    pub const PRIORITY: [DeclKind; 6] = [
        DeclKind::Field,
        DeclKind::Property,
        DeclKind::Method,
        DeclKind::Constructor,
        DeclKind::Struct,
        DeclKind::Class,
    ];

    pub fn syntax_kind(self) -> SyntaxKind {
        match self {
            DeclKind::Class => CLASS_DECL,
            DeclKind::Struct => STRUCT_DECL,
            DeclKind::Field => FIELD_DECL,
            DeclKind::Property => PROPERTY_DECL,
            DeclKind::Method => METHOD_DECL,
            DeclKind::Constructor => CONSTRUCTOR_DECL,
        }
    }

    pub fn from_syntax_kind(kind: SyntaxKind) -> Option<DeclKind> {
        match kind {
            CLASS_DECL => Some(DeclKind::Class),
            STRUCT_DECL => Some(DeclKind::Struct),
            FIELD_DECL => Some(DeclKind::Field),
            PROPERTY_DECL => Some(DeclKind::Property),
            METHOD_DECL => Some(DeclKind::Method),
            CONSTRUCTOR_DECL => Some(DeclKind::Constructor),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DeclKind::Class => "class",
            DeclKind::Struct => "struct",
            DeclKind::Field => "field",
            DeclKind::Property => "property",
            DeclKind::Method => "method",
            DeclKind::Constructor => "constructor",
        }
    }
}

impl std::fmt::Display for DeclKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A declaration a documentation comment can annotate
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Declaration {
    Class(ClassDecl),
    Struct(StructDecl),
    Field(FieldDecl),
    Property(PropertyDecl),
    Method(MethodDecl),
    Constructor(ConstructorDecl),
}

impl Declaration {
    pub fn cast(node: SyntaxNode) -> Option<Declaration> {
        let decl = match node.kind() {
            CLASS_DECL => Declaration::Class(ClassDecl(node)),
            STRUCT_DECL => Declaration::Struct(StructDecl(node)),
            FIELD_DECL => Declaration::Field(FieldDecl(node)),
            PROPERTY_DECL => Declaration::Property(PropertyDecl(node)),
            METHOD_DECL => Declaration::Method(MethodDecl(node)),
            CONSTRUCTOR_DECL => Declaration::Constructor(ConstructorDecl(node)),
            _ => return None,
        };
        Some(decl)
    }

    pub fn kind(&self) -> DeclKind {
        match self {
            Declaration::Class(_) => DeclKind::Class,
            Declaration::Struct(_) => DeclKind::Struct,
            Declaration::Field(_) => DeclKind::Field,
            Declaration::Property(_) => DeclKind::Property,
            Declaration::Method(_) => DeclKind::Method,
            Declaration::Constructor(_) => DeclKind::Constructor,
        }
    }

    pub fn syntax(&self) -> &SyntaxNode {
        match self {
            Declaration::Class(d) => d.syntax(),
            Declaration::Struct(d) => d.syntax(),
            Declaration::Field(d) => d.syntax(),
            Declaration::Property(d) => d.syntax(),
            Declaration::Method(d) => d.syntax(),
            Declaration::Constructor(d) => d.syntax(),
        }
    }

    /// Declared name; for a field, the names of all its variables joined
    /// with `, `
    pub fn name(&self) -> String {
        match self {
            Declaration::Class(d) => d.name(),
            Declaration::Struct(d) => d.name(),
            Declaration::Field(d) => d
                .variables()
                .map(|v| v.name())
                .collect::<Vec<_>>()
                .join(", "),
            Declaration::Property(d) => d.name(),
            Declaration::Method(d) => d.name(),
            Declaration::Constructor(d) => d.name(),
        }
    }

    pub fn modifiers(&self) -> String {
        match self {
            Declaration::Class(d) => d.modifiers(),
            Declaration::Struct(d) => d.modifiers(),
            Declaration::Field(d) => d.modifiers(),
            Declaration::Property(d) => d.modifiers(),
            Declaration::Method(d) => d.modifiers(),
            Declaration::Constructor(d) => d.modifiers(),
        }
    }
}
