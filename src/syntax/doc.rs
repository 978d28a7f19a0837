//! Documentation comment structure
//!
//! Turns the raw text of a documentation comment (a run of `///` lines or a
//! single `/** ... */` block) into a `DOC_COMMENT` subtree:
//!
//! ```text
//! DOC_COMMENT
//!   DOC_EXTERIOR "///"
//!   XML_ELEMENT
//!     XML_START_TAG  "<" XML_NAME ">"
//!     XML_TEXT ...   (DOC_EXTERIOR/NEWLINE tokens between lines)
//!     XML_END_TAG    "</" XML_NAME ">"
//! ```
//!
//! The XML is parsed leniently: unclosed elements are closed at the end of
//! the comment, end tags close every element opened after their match, and
//! end tags without a matching start tag are kept as stray `XML_END_TAG`s.

use rowan::GreenNodeBuilder;

use super::SyntaxKind::{self, *};

/// Build a `DOC_COMMENT` node for `text` into `builder`
pub(crate) fn build_doc_comment(builder: &mut GreenNodeBuilder<'static>, text: &str) {
    let tokens = DocScanner::new(text).scan();

    builder.start_node(DOC_COMMENT.into());
    let mut open: Vec<&str> = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
        let (kind, tok) = tokens[i];
        match kind {
            XML_LT => {
                let end = tag_end(&tokens, i);
                let self_closing = tokens[end].0 == XML_SLASH_GT;
                if self_closing {
                    builder.start_node(XML_EMPTY_ELEMENT.into());
                    emit_tag(builder, &tokens[i..=end]);
                    builder.finish_node();
                } else {
                    builder.start_node(XML_ELEMENT.into());
                    builder.start_node(XML_START_TAG.into());
                    emit_tag(builder, &tokens[i..=end]);
                    builder.finish_node();
                    open.push(tag_name(&tokens[i..=end]));
                }
                i = end + 1;
            }
            XML_LT_SLASH => {
                let end = tag_end(&tokens, i);
                let name = tag_name(&tokens[i..=end]);
                match open.iter().rposition(|n| *n == name) {
                    Some(pos) => {
                        // Elements opened after the match are left unclosed
                        while open.len() > pos + 1 {
                            builder.finish_node();
                            open.pop();
                        }
                        builder.start_node(XML_END_TAG.into());
                        emit_tag(builder, &tokens[i..=end]);
                        builder.finish_node();
                        builder.finish_node();
                        open.pop();
                    }
                    None => {
                        builder.start_node(XML_END_TAG.into());
                        emit_tag(builder, &tokens[i..=end]);
                        builder.finish_node();
                    }
                }
                i = end + 1;
            }
            _ => {
                builder.token(kind.into(), tok);
                i += 1;
            }
        }
    }

    for _ in open {
        builder.finish_node();
    }
    builder.finish_node();
}

/// Index of the token closing the tag that starts at `start`
fn tag_end(tokens: &[(SyntaxKind, &str)], start: usize) -> usize {
    tokens[start + 1..]
        .iter()
        .position(|(kind, _)| matches!(kind, XML_GT | XML_SLASH_GT))
        .map(|offset| start + 1 + offset)
        .unwrap_or(tokens.len() - 1)
}

fn tag_name<'a>(tag: &[(SyntaxKind, &'a str)]) -> &'a str {
    match tag.get(1) {
        Some((XML_NAME, name)) => name,
        _ => "",
    }
}

/// Emit the tokens of a start, end or empty tag, grouping `name="value"`
/// pairs into `XML_ATTRIBUTE` nodes
fn emit_tag(builder: &mut GreenNodeBuilder<'static>, tag: &[(SyntaxKind, &str)]) {
    let mut i = 0;
    let mut seen_name = false;

    while i < tag.len() {
        let (kind, text) = tag[i];
        if kind == XML_NAME && seen_name {
            builder.start_node(XML_ATTRIBUTE.into());
            builder.token(kind.into(), text);
            i += 1;
            while i < tag.len() && matches!(tag[i].0, WHITESPACE | XML_EQ | XML_ATTR_VALUE) {
                let stop = tag[i].0 == XML_ATTR_VALUE;
                builder.token(tag[i].0.into(), tag[i].1);
                i += 1;
                if stop {
                    break;
                }
            }
            builder.finish_node();
            continue;
        }
        if kind == XML_NAME {
            seen_name = true;
        }
        builder.token(kind.into(), text);
        i += 1;
    }
}

/// Flat scanner over the comment text
struct DocScanner<'a> {
    text: &'a str,
    pos: usize,
    /// Doc comment delimited by `/** */` instead of `///`
    block: bool,
    /// End of the scannable content (before a closing `*/`)
    end: usize,
    in_tag: bool,
    line_start: bool,
    tokens: Vec<(SyntaxKind, &'a str)>,
}

impl<'a> DocScanner<'a> {
    fn new(text: &'a str) -> Self {
        let block = text.starts_with("/**");
        let end = if block && text.len() >= 5 && text.ends_with("*/") {
            text.len() - 2
        } else {
            text.len()
        };
        DocScanner {
            text,
            pos: 0,
            block,
            end,
            in_tag: false,
            line_start: true,
            tokens: Vec::new(),
        }
    }

    fn scan(mut self) -> Vec<(SyntaxKind, &'a str)> {
        if self.block {
            self.push(DOC_EXTERIOR, 3);
            self.line_start = false;
        }

        while self.pos < self.end {
            if self.line_start {
                self.line_start = false;
                self.exterior();
                continue;
            }
            let rest = self.rest();
            if rest.starts_with("\r\n") {
                self.newline(2);
            } else if rest.starts_with('\n') || rest.starts_with('\r') {
                self.newline(1);
            } else if self.in_tag {
                self.tag_token();
            } else {
                self.content_token();
            }
        }

        if self.end < self.text.len() {
            self.push(DOC_EXTERIOR, self.text.len() - self.end);
        }
        self.tokens
    }

    fn rest(&self) -> &'a str {
        &self.text[self.pos..self.end]
    }

    fn push(&mut self, kind: SyntaxKind, len: usize) {
        let len = len.max(1).min(self.text.len() - self.pos);
        let len = ceil_char_boundary(self.text, self.pos + len) - self.pos;
        self.tokens.push((kind, &self.text[self.pos..self.pos + len]));
        self.pos += len;
    }

    fn newline(&mut self, len: usize) {
        self.push(NEWLINE, len);
        self.line_start = true;
    }

    /// Leading indentation and the comment marker of a line
    fn exterior(&mut self) {
        let indent = self.rest().len() - self.rest().trim_start_matches([' ', '\t']).len();
        if indent > 0 {
            self.push(WHITESPACE, indent);
        }
        let rest = self.rest();
        if !self.block && rest.starts_with("///") {
            self.push(DOC_EXTERIOR, 3);
        } else if self.block && rest.starts_with('*') && !rest.starts_with("*/") {
            self.push(DOC_EXTERIOR, 1);
        }
    }

    fn content_token(&mut self) {
        let rest = self.rest();
        if rest.starts_with("<!--") {
            let len = rest.find("-->").map(|i| i + 3).unwrap_or(rest.len());
            self.push(XML_COMMENT, len);
        } else if rest.starts_with("<![CDATA[") {
            let len = rest.find("]]>").map(|i| i + 3).unwrap_or(rest.len());
            self.push(XML_CDATA, len);
        } else if rest.starts_with("</") && starts_name(&rest[2..]) {
            self.push(XML_LT_SLASH, 2);
            self.in_tag = true;
        } else if rest.starts_with('<') && starts_name(&rest[1..]) {
            self.push(XML_LT, 1);
            self.in_tag = true;
        } else if let Some(len) = entity_len(rest) {
            self.push(XML_ENTITY, len);
        } else {
            // Text runs to the next markup character or line end; a lone
            // `<` or `&` is text
            let len = rest
                .char_indices()
                .skip(1)
                .find(|(_, c)| matches!(c, '<' | '&' | '\n' | '\r'))
                .map(|(i, _)| i)
                .unwrap_or(rest.len());
            self.push(XML_TEXT, len);
        }
    }

    fn tag_token(&mut self) {
        let rest = self.rest();
        let first = rest.chars().next().unwrap_or(' ');
        if rest.starts_with("/>") {
            self.push(XML_SLASH_GT, 2);
            self.in_tag = false;
        } else if first == '>' {
            self.push(XML_GT, 1);
            self.in_tag = false;
        } else if first == ' ' || first == '\t' {
            let len = rest.len() - rest.trim_start_matches([' ', '\t']).len();
            self.push(WHITESPACE, len);
        } else if first == '=' {
            self.push(XML_EQ, 1);
        } else if first == '"' || first == '\'' {
            let len = rest[1..]
                .find([first, '\n', '\r'])
                .map(|i| if rest[1..].as_bytes()[i] as char == first { i + 2 } else { i + 1 })
                .unwrap_or(rest.len());
            self.push(XML_ATTR_VALUE, len);
        } else if starts_name(rest) {
            let len = rest
                .char_indices()
                .find(|(_, c)| !is_name_char(*c))
                .map(|(i, _)| i)
                .unwrap_or(rest.len());
            self.push(XML_NAME, len);
        } else {
            self.push(XML_TEXT, first.len_utf8());
        }
    }
}

fn starts_name(s: &str) -> bool {
    s.chars()
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == ':')
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | ':' | '.' | '-')
}

/// Length of an entity reference (`&lt;`, `&#60;`) at the start of `s`
fn entity_len(s: &str) -> Option<usize> {
    let body = s.strip_prefix('&')?;
    let semi = body.find(';')?;
    let name = &body[..semi];
    let valid = !name.is_empty()
        && name
            .chars()
            .enumerate()
            .all(|(i, c)| c.is_ascii_alphanumeric() || (i == 0 && c == '#'));
    valid.then_some(semi + 2)
}

fn ceil_char_boundary(s: &str, mut index: usize) -> usize {
    while index < s.len() && !s.is_char_boundary(index) {
        index += 1;
    }
    index.min(s.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::SyntaxNode;

    fn doc(text: &str) -> SyntaxNode {
        let mut builder = GreenNodeBuilder::new();
        build_doc_comment(&mut builder, text);
        SyntaxNode::new_root(builder.finish())
    }

    fn element_names(node: &SyntaxNode) -> Vec<String> {
        node.descendants()
            .filter(|n| n.kind() == XML_ELEMENT)
            .filter_map(|n| {
                n.descendants_with_tokens()
                    .filter_map(|e| e.into_token())
                    .find(|t| t.kind() == XML_NAME)
                    .map(|t| t.text().to_string())
            })
            .collect()
    }

    #[test]
    fn test_lossless() {
        let text = "/// <summary>\n    /// Hello &lt;b&gt; <see cref=\"X\"/>\n    /// </summary>";
        assert_eq!(doc(text).text().to_string(), text);
    }

    #[test]
    fn test_single_element() {
        let node = doc("/// <summary>Does X.</summary>");
        assert_eq!(node.kind(), DOC_COMMENT);
        assert_eq!(element_names(&node), vec!["summary"]);
        let exteriors = node
            .descendants_with_tokens()
            .filter(|e| e.kind() == DOC_EXTERIOR)
            .count();
        assert_eq!(exteriors, 1);
    }

    #[test]
    fn test_multiline_exteriors() {
        let node = doc("/// <summary>\n/// a\n/// </summary>\n/// <returns>r</returns>");
        assert_eq!(element_names(&node), vec!["summary", "returns"]);
        let exteriors = node
            .descendants_with_tokens()
            .filter(|e| e.kind() == DOC_EXTERIOR)
            .count();
        assert_eq!(exteriors, 4);
    }

    #[test]
    fn test_nested_and_empty_elements() {
        let node = doc("/// <summary>Use <c>Foo</c> or <see cref=\"Bar\"/>.</summary>");
        assert_eq!(element_names(&node), vec!["summary", "c"]);
        let empty = node
            .descendants()
            .filter(|n| n.kind() == XML_EMPTY_ELEMENT)
            .count();
        assert_eq!(empty, 1);
        let attrs = node
            .descendants()
            .filter(|n| n.kind() == XML_ATTRIBUTE)
            .count();
        assert_eq!(attrs, 1);
    }

    #[test]
    fn test_unclosed_element_is_closed_at_end() {
        let node = doc("/// <summary>never closed");
        assert_eq!(element_names(&node), vec!["summary"]);
        assert_eq!(node.text().to_string(), "/// <summary>never closed");
    }

    #[test]
    fn test_stray_end_tag() {
        let node = doc("/// text</para>");
        assert!(element_names(&node).is_empty());
        assert!(node.descendants().any(|n| n.kind() == XML_END_TAG));
    }

    #[test]
    fn test_block_comment() {
        let text = "/**\n * <summary>Block doc.</summary>\n */";
        let node = doc(text);
        assert_eq!(node.text().to_string(), text);
        assert_eq!(element_names(&node), vec!["summary"]);
        let exteriors: Vec<String> = node
            .descendants_with_tokens()
            .filter(|e| e.kind() == DOC_EXTERIOR)
            .map(|e| e.to_string())
            .collect();
        assert_eq!(exteriors, vec!["/**", "*", "*/"]);
    }

    #[test]
    fn test_lone_angle_bracket_is_text() {
        let node = doc("/// <summary>a < b</summary>");
        assert_eq!(element_names(&node), vec!["summary"]);
        assert_eq!(node.text().to_string(), "/// <summary>a < b</summary>");
    }
}
