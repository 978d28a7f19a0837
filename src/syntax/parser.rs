//! C# declaration skeleton parser
//!
//! Builds a lossless `rowan` tree from the token stream. Only the
//! declaration structure is parsed; bodies and initializers are consumed as
//! balanced token runs. Parsing never fails: anything that does not fit is
//! wrapped in an `ERROR` node and reported as a diagnostic.
//!
//! Leading trivia, documentation comments included, belongs to the
//! declaration that follows it, so the first significant token after a doc
//! comment is always inside the declaration it documents.

use rowan::{Checkpoint, GreenNode, GreenNodeBuilder};
use tracing::trace;

use super::doc::build_doc_comment;
use super::lexer::{tokenize, Token, TokenKind};
use super::SyntaxKind::{self, *};
use super::SyntaxNode;
use crate::data::keywords::{is_accessor_keyword, is_modifier, is_type_declaration_keyword};
use crate::utils::diagnostics::{Diagnostic, Diagnostics, LineIndex};
use crate::utils::error::{Result, XmlDocError};

/// Result of parsing a source file
#[derive(Debug, Clone)]
pub struct Parse {
    green: GreenNode,
    diagnostics: Diagnostics,
}

impl Parse {
    /// Root `COMPILATION_UNIT` node
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    pub fn green(&self) -> &GreenNode {
        &self.green
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors()
    }

    /// Fail with the first parse error, if there is one
    pub fn ok(self) -> Result<Parse> {
        match self.diagnostics.first_error() {
            Some(diag) => Err(XmlDocError::from(diag)),
            None => Ok(self),
        }
    }
}

/// Parse C# source text
pub fn parse(source: &str) -> Parse {
    let mut parser = Parser::new(source);
    parser.compilation_unit();
    parser.finish()
}

/// Where a member declaration appears
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Context {
    /// Compilation unit or namespace body
    Namespace,
    /// Class, struct, interface or record body
    Type,
}

/// What a member declaration turns out to be after lookahead
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MemberShape {
    Field,
    Property,
    Method,
    Constructor,
    Other,
}

struct Parser<'a> {
    source: &'a str,
    tokens: Vec<Token<'a>>,
    /// Indices of the non-trivia tokens
    significant: Vec<usize>,
    /// Next token to emit (index into `tokens`)
    pos: usize,
    /// Next significant token (index into `significant`)
    cursor: usize,
    builder: GreenNodeBuilder<'static>,
    diagnostics: Diagnostics,
    line_index: LineIndex,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Self {
        let tokens = tokenize(source);
        let significant = tokens
            .iter()
            .enumerate()
            .filter(|(_, t)| !t.is_trivia())
            .map(|(i, _)| i)
            .collect();

        Parser {
            source,
            tokens,
            significant,
            pos: 0,
            cursor: 0,
            builder: GreenNodeBuilder::new(),
            diagnostics: Diagnostics::new(),
            line_index: LineIndex::new(source),
        }
    }

    fn finish(mut self) -> Parse {
        for token in &self.tokens {
            if token.kind == TokenKind::Error {
                let (line, column) = self.line_index.location(token.offset);
                self.diagnostics.add(
                    Diagnostic::error(format!("unrecognized input '{}'", token.text.trim()))
                        .with_location(line, column),
                );
            }
        }
        Parse {
            green: self.builder.finish(),
            diagnostics: self.diagnostics,
        }
    }

    // =========================================================================
    // Token access
    // =========================================================================

    /// Significant token `n` positions ahead of the cursor
    fn nth(&self, n: usize) -> Option<&Token<'a>> {
        self.peek_at(self.cursor + n)
    }

    /// Significant token at an absolute lookahead index
    fn peek_at(&self, k: usize) -> Option<&Token<'a>> {
        self.significant.get(k).map(|&i| &self.tokens[i])
    }

    fn at_end(&self) -> bool {
        self.cursor >= self.significant.len()
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.nth(0).is_some_and(|t| t.kind == kind)
    }

    fn at_ident(&self, text: &str) -> bool {
        self.nth_ident(0) == Some(text)
    }

    fn nth_ident(&self, n: usize) -> Option<&'a str> {
        self.nth(n)
            .filter(|t| t.kind == TokenKind::Ident)
            .map(|t| t.text)
    }

    fn kind_at(&self, k: usize) -> Option<TokenKind> {
        self.peek_at(k).map(|t| t.kind)
    }

    fn ident_at(&self, k: usize) -> Option<&'a str> {
        self.peek_at(k)
            .filter(|t| t.kind == TokenKind::Ident)
            .map(|t| t.text)
    }

    // =========================================================================
    // Tree building
    // =========================================================================

    /// Emit pending trivia into the current node. Runs of `///` lines and
    /// `/** */` blocks become `DOC_COMMENT` nodes.
    fn eat_trivia(&mut self) {
        let stop = self
            .significant
            .get(self.cursor)
            .copied()
            .unwrap_or(self.tokens.len());

        while self.pos < stop {
            let token = self.tokens[self.pos];
            if token.is_doc() {
                let last = self.doc_run_end(self.pos, stop);
                let end = self.tokens[last].offset + self.tokens[last].text.len();
                build_doc_comment(&mut self.builder, &self.source[token.offset..end]);
                self.pos = last + 1;
            } else {
                self.builder
                    .token(token.syntax_kind().into(), token.text);
                self.pos += 1;
            }
        }
    }

    /// Index of the last token in the documentation comment starting at
    /// `start`. Consecutive `///` lines separated only by a line break and
    /// indentation form one comment.
    fn doc_run_end(&self, start: usize, stop: usize) -> usize {
        if self.tokens[start].kind == TokenKind::DocBlock {
            return start;
        }
        let mut last = start;
        let mut i = start + 1;
        loop {
            if i < stop && self.tokens[i].kind == TokenKind::Newline {
                i += 1;
            } else {
                return last;
            }
            if i < stop && self.tokens[i].kind == TokenKind::Whitespace {
                i += 1;
            }
            if i < stop && self.tokens[i].kind == TokenKind::DocLine && self.tokens[i].is_doc() {
                last = i;
                i += 1;
            } else {
                return last;
            }
        }
    }

    /// Emit trivia, then the current significant token
    fn bump(&mut self) {
        self.eat_trivia();
        if let Some(&index) = self.significant.get(self.cursor) {
            let token = self.tokens[index];
            self.builder.token(token.syntax_kind().into(), token.text);
            self.pos = index + 1;
            self.cursor += 1;
        }
    }

    /// Bump significant tokens up to (not including) lookahead index `k`
    fn bump_to(&mut self, k: usize) {
        while self.cursor < k && !self.at_end() {
            self.bump();
        }
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Start a node after the pending trivia
    fn start(&mut self, kind: SyntaxKind) {
        self.eat_trivia();
        self.builder.start_node(kind.into());
    }

    fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    /// Checkpoint that places pending trivia inside the next node
    fn checkpoint(&self) -> Checkpoint {
        self.builder.checkpoint()
    }

    fn start_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        self.builder.start_node_at(checkpoint, kind.into());
    }

    fn error(&mut self, message: impl Into<String>) {
        self.report(message, None);
    }

    fn report(&mut self, message: impl Into<String>, suggestion: Option<&str>) {
        let offset = self
            .nth(0)
            .map(|t| t.offset)
            .unwrap_or(self.source.len());
        let (line, column) = self.line_index.location(offset);
        let mut diag = Diagnostic::error(message).with_location(line, column);
        if let Some(token) = self.nth(0) {
            diag = diag.with_source(token.text);
        }
        if let Some(suggestion) = suggestion {
            diag = diag.with_suggestion(suggestion);
        }
        self.diagnostics.add(diag);
    }

    fn expect(&mut self, kind: TokenKind, what: &str) {
        if self.eat(kind) {
            return;
        }
        let suggestion = match kind {
            TokenKind::Semicolon => Some("insert ';'"),
            TokenKind::RBrace => Some("insert the missing '}'"),
            _ => None,
        };
        self.report(format!("expected {}", what), suggestion);
    }

    // =========================================================================
    // Lookahead scanners (indices into `significant`, nothing is emitted)
    // =========================================================================

    /// Skip a bracketed group opening at `k`; returns the index after its
    /// closer, or the end of input
    fn scan_balanced(&self, k: usize) -> usize {
        let mut depth = 0usize;
        let mut i = k;
        while let Some(kind) = self.kind_at(i) {
            match kind {
                TokenKind::LParen | TokenKind::LBrack | TokenKind::LBrace => depth += 1,
                TokenKind::RParen | TokenKind::RBrack | TokenKind::RBrace => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return i + 1;
                    }
                }
                _ => {}
            }
            i += 1;
        }
        i
    }

    /// Generic argument or parameter list `<...>` at `k`. Only type-like
    /// tokens may appear inside, which tells `List<int, string>` apart from
    /// `a < b, c > d` inside initializers.
    fn scan_type_args(&self, k: usize) -> Option<usize> {
        if self.kind_at(k) != Some(TokenKind::LAngle) {
            return None;
        }
        let mut depth = 0usize;
        let mut i = k;
        while let Some(kind) = self.kind_at(i) {
            match kind {
                TokenKind::LAngle => depth += 1,
                TokenKind::RAngle => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(i + 1);
                    }
                }
                TokenKind::Ident
                | TokenKind::Comma
                | TokenKind::Dot
                | TokenKind::Question
                | TokenKind::Star
                | TokenKind::LBrack
                | TokenKind::RBrack
                | TokenKind::LParen
                | TokenKind::RParen => {}
                TokenKind::Operator if self.peek_at(i).is_some_and(|t| t.text == "::") => {}
                _ => return None,
            }
            i += 1;
        }
        None
    }

    /// A type starting at `k`; returns the index after it
    fn scan_type(&self, k: usize) -> Option<usize> {
        let mut i = k;
        if self.ident_at(i) == Some("ref") {
            i += 1;
            if self.ident_at(i) == Some("readonly") {
                i += 1;
            }
        }

        match self.kind_at(i)? {
            TokenKind::LParen => {
                // Tuple type
                i = self.scan_balanced(i);
            }
            TokenKind::Ident => {
                i += 1;
                loop {
                    if let Some(next) = self.scan_type_args(i) {
                        i = next;
                    }
                    let qualifier = match self.peek_at(i) {
                        Some(t) if t.kind == TokenKind::Dot => true,
                        Some(t) if t.kind == TokenKind::Operator && t.text == "::" => true,
                        _ => false,
                    };
                    if qualifier && self.kind_at(i + 1) == Some(TokenKind::Ident) {
                        i += 2;
                    } else {
                        break;
                    }
                }
            }
            _ => return None,
        }

        loop {
            match self.kind_at(i) {
                Some(TokenKind::Question) | Some(TokenKind::Star) => i += 1,
                Some(TokenKind::LBrack)
                    if matches!(
                        self.kind_at(i + 1),
                        Some(TokenKind::RBrack) | Some(TokenKind::Comma)
                    ) =>
                {
                    i = self.scan_balanced(i);
                }
                _ => break,
            }
        }
        Some(i)
    }

    /// A member name starting at `k`, including an explicit interface
    /// qualifier (`IEnumerable<T>.GetEnumerator`)
    fn scan_member_name(&self, k: usize) -> Option<usize> {
        self.ident_at(k)?;
        let mut i = k + 1;
        loop {
            let after_args = self.scan_type_args(i).unwrap_or(i);
            if self.kind_at(after_args) == Some(TokenKind::Dot)
                && self.kind_at(after_args + 1) == Some(TokenKind::Ident)
            {
                i = after_args + 2;
            } else {
                return Some(i);
            }
        }
    }

    /// Classify the member at the cursor (after attributes and modifiers)
    fn member_shape(&self) -> MemberShape {
        let k = self.cursor;
        if self.ident_at(k).is_some() && self.kind_at(k + 1) == Some(TokenKind::LParen) {
            return MemberShape::Constructor;
        }
        let Some(after_type) = self.scan_type(k) else {
            return MemberShape::Other;
        };
        if matches!(self.ident_at(after_type), Some("operator") | Some("this")) {
            return MemberShape::Other;
        }
        let Some(after_name) = self.scan_member_name(after_type) else {
            return MemberShape::Other;
        };
        match self.kind_at(after_name) {
            Some(TokenKind::LParen) | Some(TokenKind::LAngle) => MemberShape::Method,
            Some(TokenKind::LBrace) | Some(TokenKind::FatArrow) => MemberShape::Property,
            Some(TokenKind::Eq)
            | Some(TokenKind::Comma)
            | Some(TokenKind::Semicolon)
            | Some(TokenKind::LBrack) => MemberShape::Field,
            _ => MemberShape::Other,
        }
    }

    // =========================================================================
    // Grammar
    // =========================================================================

    fn compilation_unit(&mut self) {
        self.builder.start_node(COMPILATION_UNIT.into());
        while !self.at_end() {
            if self.at(TokenKind::RBrace) {
                self.error("unexpected '}'");
                self.start(ERROR);
                self.bump();
                self.finish_node();
                continue;
            }
            self.member(Context::Namespace);
        }
        self.eat_trivia();
        self.finish_node();
    }

    /// One declaration in a namespace or type body
    fn member(&mut self, context: Context) {
        let checkpoint = self.checkpoint();

        if context == Context::Namespace {
            if self.at_ident("using")
                || (self.at_ident("global") && self.nth_ident(1) == Some("using"))
                || (self.at_ident("extern") && self.nth_ident(1) == Some("alias"))
            {
                self.skip_statement();
                self.start_at(checkpoint, USING_DIRECTIVE);
                self.finish_node();
                return;
            }
            if self.at(TokenKind::LBrack)
                && matches!(self.nth_ident(1), Some("assembly") | Some("module"))
                && self.nth(2).is_some_and(|t| t.kind == TokenKind::Colon)
            {
                let end = self.scan_balanced(self.cursor);
                self.bump_to(end);
                self.start_at(checkpoint, GLOBAL_ATTRIBUTE);
                self.finish_node();
                return;
            }
        }

        self.attributes();
        self.modifiers();

        let keyword = self.nth_ident(0);
        if keyword.is_some_and(is_type_declaration_keyword) {
            self.type_declaration(checkpoint);
            return;
        }
        match keyword {
            Some("namespace") if context == Context::Namespace => {
                self.namespace_declaration(checkpoint);
                return;
            }
            Some("delegate") => {
                self.skip_member();
                self.start_at(checkpoint, DELEGATE_DECL);
                self.finish_node();
                return;
            }
            Some("event") => {
                self.skip_member();
                self.start_at(checkpoint, OTHER_MEMBER);
                self.finish_node();
                return;
            }
            _ => {}
        }

        if context == Context::Namespace {
            self.skip_statement();
            self.start_at(checkpoint, GLOBAL_STATEMENT);
            self.finish_node();
            return;
        }

        if self.at(TokenKind::Tilde) {
            // Destructor
            self.skip_member();
            self.start_at(checkpoint, OTHER_MEMBER);
            self.finish_node();
            return;
        }

        match self.member_shape() {
            MemberShape::Field => self.field(checkpoint),
            MemberShape::Property => self.property(checkpoint),
            MemberShape::Method => self.method(checkpoint),
            MemberShape::Constructor => self.constructor(checkpoint),
            MemberShape::Other => {
                let is_known_other = self.scan_type(self.cursor).is_some_and(|k| {
                    matches!(self.ident_at(k), Some("operator") | Some("this"))
                });
                if is_known_other {
                    self.skip_member();
                    self.start_at(checkpoint, OTHER_MEMBER);
                } else {
                    // Resynchronise on the next token so the following
                    // member still parses
                    self.error("expected member declaration");
                    if !self.at(TokenKind::RBrace) {
                        self.bump_group();
                    }
                    self.start_at(checkpoint, ERROR);
                }
                self.finish_node();
            }
        }
    }

    /// `[...]` attribute sections
    fn attributes(&mut self) {
        while self.at(TokenKind::LBrack) {
            self.start(ATTRIBUTE_LIST);
            let end = self.scan_balanced(self.cursor);
            self.bump_to(end);
            self.finish_node();
        }
    }

    /// Always emits a `MODIFIER_LIST`, possibly empty
    fn modifiers(&mut self) {
        self.start(MODIFIER_LIST);
        loop {
            match self.nth_ident(0) {
                Some(word) if is_modifier(word) => {
                    // `partial` and `new` double as return type / expression
                    // starts; they are modifiers only when a name follows
                    if matches!(word, "partial" | "new" | "async")
                        && !matches!(self.kind_at(self.cursor + 1), Some(TokenKind::Ident))
                    {
                        break;
                    }
                    self.bump();
                }
                Some("ref")
                    if matches!(
                        self.nth_ident(1),
                        Some("struct") | Some("partial") | Some("readonly")
                    ) =>
                {
                    self.bump();
                }
                _ => break,
            }
        }
        self.finish_node();
    }

    fn name(&mut self) {
        if self.nth_ident(0).is_some() {
            self.start(NAME);
            self.bump();
            self.finish_node();
        } else {
            self.error("expected identifier");
        }
    }

    /// Member name, possibly qualified by an explicit interface
    fn member_name(&mut self) {
        match self.scan_member_name(self.cursor) {
            Some(end) => {
                self.start(NAME);
                self.bump_to(end);
                self.finish_node();
            }
            None => self.error("expected identifier"),
        }
    }

    fn ty(&mut self) {
        match self.scan_type(self.cursor) {
            Some(end) => {
                self.start(TYPE);
                self.bump_to(end);
                self.finish_node();
            }
            None => self.error("expected type"),
        }
    }

    fn type_parameters(&mut self) {
        if let Some(end) = self.scan_type_args(self.cursor) {
            self.start(TYPE_PARAMETER_LIST);
            self.bump_to(end);
            self.finish_node();
        }
    }

    fn parameter_list(&mut self) {
        if self.at(TokenKind::LParen) {
            self.start(PARAMETER_LIST);
            let end = self.scan_balanced(self.cursor);
            self.bump_to(end);
            self.finish_node();
        } else {
            self.error("expected '('");
        }
    }

    /// `where T : ...` clauses up to the body
    fn constraint_clauses(&mut self) {
        while self.at_ident("where") {
            self.start(CONSTRAINT_CLAUSE);
            self.bump();
            while !self.at_end()
                && !self.at(TokenKind::LBrace)
                && !self.at(TokenKind::Semicolon)
                && !self.at(TokenKind::FatArrow)
                && !self.at(TokenKind::RBrace)
                && !self.at_ident("where")
            {
                self.bump_group();
            }
            self.finish_node();
        }
    }

    /// Bump one token, or a whole bracketed group
    fn bump_group(&mut self) {
        match self.nth(0).map(|t| t.kind) {
            Some(TokenKind::LParen) | Some(TokenKind::LBrack) | Some(TokenKind::LBrace) => {
                let end = self.scan_balanced(self.cursor);
                self.bump_to(end);
            }
            Some(TokenKind::RBrace) => {
                // Stray closer inside an expression; leave it to the caller
            }
            _ => self.bump(),
        }
    }

    // -------------------------------------------------------------------------
    // Namespaces and types
    // -------------------------------------------------------------------------

    fn namespace_declaration(&mut self, checkpoint: Checkpoint) {
        self.bump(); // namespace
        match self.scan_type(self.cursor) {
            Some(end) => {
                self.start(NAME);
                self.bump_to(end);
                self.finish_node();
            }
            None => self.error("expected namespace name"),
        }

        if self.eat(TokenKind::Semicolon) {
            // File-scoped: the rest of the file belongs to it
            while !self.at_end() {
                if self.at(TokenKind::RBrace) {
                    self.error("unexpected '}'");
                    self.start(ERROR);
                    self.bump();
                    self.finish_node();
                    continue;
                }
                self.member(Context::Namespace);
            }
        } else if self.at(TokenKind::LBrace) {
            self.bump();
            while !self.at_end() && !self.at(TokenKind::RBrace) {
                self.member(Context::Namespace);
            }
            self.expect(TokenKind::RBrace, "'}'");
        } else {
            self.error("expected '{' or ';'");
        }

        self.start_at(checkpoint, NAMESPACE_DECL);
        self.finish_node();
    }

    fn type_declaration(&mut self, checkpoint: Checkpoint) {
        let keyword = self.nth_ident(0).unwrap_or_default();
        let kind = match keyword {
            "class" => CLASS_DECL,
            "struct" => STRUCT_DECL,
            "interface" => INTERFACE_DECL,
            "enum" => ENUM_DECL,
            _ => RECORD_DECL,
        };
        self.bump();
        if kind == RECORD_DECL && matches!(self.nth_ident(0), Some("class") | Some("struct")) {
            self.bump();
        }
        trace!(keyword, name = self.nth_ident(0), "type declaration");

        self.name();
        self.type_parameters();
        if self.at(TokenKind::LParen) {
            // Primary constructor
            self.parameter_list();
        }
        if self.at(TokenKind::Colon) {
            self.start(BASE_LIST);
            self.bump();
            while !self.at_end()
                && !self.at(TokenKind::LBrace)
                && !self.at(TokenKind::Semicolon)
                && !self.at_ident("where")
            {
                self.bump_group();
                if self.at(TokenKind::RBrace) {
                    break;
                }
            }
            self.finish_node();
        }
        self.constraint_clauses();

        if self.at(TokenKind::LBrace) {
            self.start(MEMBER_LIST);
            self.bump();
            if kind == ENUM_DECL {
                self.enum_members();
            } else {
                while !self.at_end() && !self.at(TokenKind::RBrace) {
                    self.member(Context::Type);
                }
            }
            self.expect(TokenKind::RBrace, "'}'");
            self.finish_node();
            self.eat(TokenKind::Semicolon);
        } else if !self.eat(TokenKind::Semicolon) {
            self.error("expected '{'");
        }

        self.start_at(checkpoint, kind);
        self.finish_node();
    }

    fn enum_members(&mut self) {
        while !self.at_end() && !self.at(TokenKind::RBrace) {
            let checkpoint = self.checkpoint();
            self.attributes();
            if self.nth_ident(0).is_some() {
                self.name();
                if self.at(TokenKind::Eq) {
                    self.initializer(&[TokenKind::Comma]);
                }
                self.start_at(checkpoint, ENUM_MEMBER);
                self.finish_node();
            } else if !self.at(TokenKind::Comma) {
                self.error("expected enum member");
                self.start(ERROR);
                self.bump_group();
                self.finish_node();
            }
            self.eat(TokenKind::Comma);
        }
    }

    // -------------------------------------------------------------------------
    // Members
    // -------------------------------------------------------------------------

    fn field(&mut self, checkpoint: Checkpoint) {
        let declaration = self.checkpoint();
        self.ty();
        trace!(name = self.nth_ident(0), "field");
        loop {
            self.start(VARIABLE_DECLARATOR);
            self.name();
            if self.at(TokenKind::LBrack) {
                // Fixed size buffer
                let end = self.scan_balanced(self.cursor);
                self.bump_to(end);
            }
            if self.at(TokenKind::Eq) {
                self.initializer(&[TokenKind::Comma]);
            }
            self.finish_node();
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.start_at(declaration, VARIABLE_DECLARATION);
        self.finish_node();
        self.expect(TokenKind::Semicolon, "';'");
        self.start_at(checkpoint, FIELD_DECL);
        self.finish_node();
    }

    fn property(&mut self, checkpoint: Checkpoint) {
        self.ty();
        trace!(name = self.nth_ident(0), "property");
        self.member_name();
        if self.at(TokenKind::LBrace) {
            self.accessor_list();
            if self.at(TokenKind::Eq) {
                self.initializer(&[]);
                self.expect(TokenKind::Semicolon, "';'");
            }
        } else {
            self.arrow_body();
        }
        self.start_at(checkpoint, PROPERTY_DECL);
        self.finish_node();
    }

    fn accessor_list(&mut self) {
        self.start(ACCESSOR_LIST);
        self.bump(); // {
        while !self.at_end() && !self.at(TokenKind::RBrace) {
            let checkpoint = self.checkpoint();
            self.attributes();
            while self.nth_ident(0).is_some_and(|w| is_modifier(w)) {
                self.bump();
            }
            if self.nth_ident(0).is_some_and(is_accessor_keyword) {
                self.bump();
                self.body();
                self.start_at(checkpoint, ACCESSOR_DECL);
            } else {
                self.error("expected accessor");
                self.bump_group();
                self.start_at(checkpoint, ERROR);
            }
            self.finish_node();
        }
        self.expect(TokenKind::RBrace, "'}'");
        self.finish_node();
    }

    fn method(&mut self, checkpoint: Checkpoint) {
        self.ty();
        trace!(name = self.nth_ident(0), "method");
        self.member_name();
        self.type_parameters();
        self.parameter_list();
        self.constraint_clauses();
        self.body();
        self.start_at(checkpoint, METHOD_DECL);
        self.finish_node();
    }

    fn constructor(&mut self, checkpoint: Checkpoint) {
        trace!(name = self.nth_ident(0), "constructor");
        self.name();
        self.parameter_list();
        if self.at(TokenKind::Colon) {
            self.start(CONSTRUCTOR_INITIALIZER);
            self.bump();
            if self.nth_ident(0).is_some() {
                self.bump();
            }
            if self.at(TokenKind::LParen) {
                let end = self.scan_balanced(self.cursor);
                self.bump_to(end);
            }
            self.finish_node();
        }
        self.body();
        self.start_at(checkpoint, CONSTRUCTOR_DECL);
        self.finish_node();
    }

    /// `{ ... }`, `=> expr;` or `;`
    fn body(&mut self) {
        if self.at(TokenKind::LBrace) {
            self.start(BLOCK);
            let end = self.scan_balanced(self.cursor);
            self.bump_to(end);
            self.finish_node();
        } else if self.at(TokenKind::FatArrow) {
            self.arrow_body();
        } else {
            self.expect(TokenKind::Semicolon, "'{', '=>' or ';'");
        }
    }

    /// `=> expr;`
    fn arrow_body(&mut self) {
        self.start(ARROW_EXPR);
        self.bump(); // =>
        self.expression(&[]);
        self.finish_node();
        self.expect(TokenKind::Semicolon, "';'");
    }

    /// `= expr` up to `;`, `}` or one of `stops` at depth zero
    fn initializer(&mut self, stops: &[TokenKind]) {
        self.start(INITIALIZER);
        self.bump(); // =
        self.expression(stops);
        self.finish_node();
    }

    fn expression(&mut self, stops: &[TokenKind]) {
        let mut previous = None;
        while let Some(kind) = self.nth(0).map(|t| t.kind) {
            if kind == TokenKind::Semicolon || kind == TokenKind::RBrace || stops.contains(&kind) {
                break;
            }
            if kind == TokenKind::LAngle && previous == Some(TokenKind::Ident) {
                if let Some(end) = self.scan_type_args(self.cursor) {
                    self.bump_to(end);
                    previous = Some(TokenKind::RAngle);
                    continue;
                }
            }
            self.bump_group();
            previous = Some(kind);
        }
    }

    /// Skip an unsupported member: up to `;`, or through a body block
    fn skip_member(&mut self) {
        let start = self.cursor;
        while let Some(kind) = self.nth(0).map(|t| t.kind) {
            match kind {
                TokenKind::Semicolon => {
                    self.bump();
                    return;
                }
                TokenKind::RBrace => break,
                TokenKind::LBrace => {
                    self.bump_group();
                    if self.at(TokenKind::Eq) || self.at(TokenKind::Semicolon) {
                        continue;
                    }
                    return;
                }
                _ => self.bump_group(),
            }
        }
        if self.cursor == start && !self.at_end() {
            self.bump();
        }
    }

    /// Skip a top-level statement: up to `;` or through a block
    fn skip_statement(&mut self) {
        let start = self.cursor;
        while let Some(kind) = self.nth(0).map(|t| t.kind) {
            match kind {
                TokenKind::Semicolon => {
                    self.bump();
                    return;
                }
                TokenKind::RBrace => break,
                TokenKind::LBrace => {
                    self.bump_group();
                    return;
                }
                _ => self.bump_group(),
            }
        }
        if self.cursor == start && !self.at_end() && !self.at(TokenKind::RBrace) {
            self.bump();
        }
    }
}
