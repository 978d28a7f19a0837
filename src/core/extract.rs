//! Field text extraction from documentation comments

use lazy_static::lazy_static;
use regex::Regex;

use crate::core::options::FieldMatch;
use crate::data::entities::resolve_entity;
use crate::syntax::DocComment;

lazy_static! {
    /// Anything delimited by angle brackets
    static ref MARKUP: Regex = Regex::new(r"<[^>]*>").unwrap();
    /// Comment markers left at the start of a line
    static ref LINE_MARKER: Regex = Regex::new(r"(?m)^([ \t]*)///").unwrap();
    static ref ENTITY: Regex = Regex::new(r"&(#[xX]?[0-9a-fA-F]+|[A-Za-z]+);").unwrap();
}

/// Plain text of every element of `doc` whose tag name matches `field`.
///
/// Contents are concatenated in document order, markup tags are stripped,
/// leftover `///` markers are removed and the result is trimmed. Returns an
/// empty string when no element matches.
///
/// ```rust
/// use xmldoc_tables::core::{extract, FieldMatch};
/// use xmldoc_tables::syntax::{parse, ast::AstNode, DocComment};
///
/// let tree = parse("/// <summary>Does <c>X</c>.</summary>\nclass Foo {}").syntax();
/// let doc = tree.descendants().find_map(DocComment::cast).unwrap();
/// assert_eq!(extract(&doc, "summary", FieldMatch::Exact), "Does X.");
/// assert_eq!(extract(&doc, "returns", FieldMatch::Exact), "");
/// ```
pub fn extract(doc: &DocComment, field: &str, mode: FieldMatch) -> String {
    let content: String = doc
        .elements()
        .filter(|element| mode.matches(&element.name(), field))
        .map(|element| element.content())
        .collect();

    let stripped = MARKUP.replace_all(&content, "");
    let unmarked = LINE_MARKER.replace_all(&stripped, "$1");
    unmarked.trim().to_string()
}

/// Replace XML character entities with the characters they stand for.
/// Unknown entities are left as written.
pub fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    ENTITY
        .replace_all(text, |caps: &regex::Captures| match resolve_entity(&caps[1]) {
            Some(c) => c.to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}
