//! Ownership resolution
//!
//! Pure upward walks over the syntax tree: which declaration a
//! documentation comment belongs to, and which class or struct groups it.

use crate::core::options::OwnerKeyStyle;
use crate::syntax::{DeclKind, Declaration, SyntaxNode};

/// Group key used when a member has no enclosing class or struct
pub const OWNER_NOT_FOUND: &str = "<not found>";

/// First node on the ancestor chain of `node` (itself included) for which
/// `predicate` holds
pub fn ancestors_until<F>(node: &SyntaxNode, mut predicate: F) -> Option<SyntaxNode>
where
    F: FnMut(&SyntaxNode) -> bool,
{
    node.ancestors().find(|n| predicate(n))
}

/// Nearest declaration of `kind` enclosing `node`, `node` itself included
pub fn nearest_enclosing(node: &SyntaxNode, kind: DeclKind) -> Option<Declaration> {
    let target = kind.syntax_kind();
    ancestors_until(node, |n| n.kind() == target).and_then(Declaration::cast)
}

/// The declaration a comment positioned at `node` documents.
///
/// Each kind is looked up independently and the first hit in
/// [`DeclKind::PRIORITY`] order wins, so a comment inside a method body
/// belongs to the method rather than its class. With `strict`, the walk
/// ends at the first declaration the tables do not support (an enum,
/// event, interface, ...), so comments on those resolve to nothing.
pub fn resolve(node: &SyntaxNode, strict: bool) -> Option<Declaration> {
    let scope: Vec<SyntaxNode> = if strict {
        node.ancestors()
            .take_while(|n| !n.kind().is_declaration() || DeclKind::from_syntax_kind(n.kind()).is_some())
            .collect()
    } else {
        node.ancestors().collect()
    };

    DeclKind::PRIORITY.iter().find_map(|kind| {
        let target = kind.syntax_kind();
        scope
            .iter()
            .find(|n| n.kind() == target)
            .cloned()
            .and_then(Declaration::cast)
    })
}

fn owner_name(node: &SyntaxNode) -> Option<String> {
    match Declaration::cast(node.clone())? {
        Declaration::Class(class) => Some(class.name()),
        Declaration::Struct(st) => Some(st.name()),
        _ => None,
    }
}

/// Group key for the member tables: the name of the innermost class or
/// struct around `declaration`, or [`OWNER_NOT_FOUND`]
pub fn group_key(declaration: &Declaration, style: OwnerKeyStyle) -> String {
    let node = declaration.syntax();
    match style {
        OwnerKeyStyle::Simple => ancestors_until(node, |n| owner_name(n).is_some())
            .and_then(|n| owner_name(&n))
            .unwrap_or_else(|| OWNER_NOT_FOUND.to_string()),
        OwnerKeyStyle::Qualified => {
            let mut names: Vec<String> = node.ancestors().filter_map(|n| owner_name(&n)).collect();
            if names.is_empty() {
                return OWNER_NOT_FOUND.to_string();
            }
            names.reverse();
            names.join(".")
        }
    }
}
