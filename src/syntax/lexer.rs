//! Lossless C# lexer
//!
//! Every byte of the input ends up in exactly one token, trivia included, so
//! the parser can rebuild the source text from the tree. Keywords are not
//! distinguished here: most C# keywords are contextual, so the parser checks
//! identifier text against the tables in `data::keywords`.

use logos::Logos;

use super::SyntaxKind;

/// Raw token kinds produced by logos
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    #[regex(r"[ \t\x0B\x0C\u{FEFF}]+")]
    Whitespace,

    #[regex(r"\r\n|\n|\r")]
    Newline,

    #[regex(r"//[^\r\n]*")]
    LineComment,

    /// One `///` line; consecutive lines are grouped by the parser
    #[regex(r"///[^\r\n]*", priority = 10)]
    DocLine,

    #[token("/*", block_comment)]
    BlockComment,

    /// `/** ... */`; `/**/` is an ordinary comment, see [`Token::syntax_kind`]
    #[token("/**", block_comment)]
    DocBlock,

    #[regex(r"#[^\r\n]*")]
    Directive,

    #[regex(r"@?[\p{XID_Start}_][\p{XID_Continue}]*")]
    Ident,

    #[regex(r"[0-9][0-9a-zA-Z_]*(\.[0-9][0-9a-zA-Z_]*)?")]
    Number,

    #[regex(r#""([^"\\\r\n]|\\[^\r\n])*""#)]
    #[regex(r#"@"([^"]|"")*""#)]
    #[token("$\"", interpolated)]
    #[token("$@\"", interpolated_verbatim)]
    #[token("@$\"", interpolated_verbatim)]
    #[regex(r#"\$*""""*"#, raw_string)]
    String,

    #[regex(r"'(\\[^\r\n]|[^'\\\r\n])+'")]
    Char,

    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBrack,
    #[token("]")]
    RBrack,
    #[token("<")]
    LAngle,
    #[token(">")]
    RAngle,
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token(":")]
    Colon,
    #[token("?")]
    Question,
    #[token("=")]
    Eq,
    #[token("=>")]
    FatArrow,
    #[token("*")]
    Star,
    #[token("~")]
    Tilde,

    /// Everything else that can appear in expressions. `>` is never merged
    /// into a compound token so nested generic arguments stay balanced.
    #[token("::")]
    #[token("&&")]
    #[token("||")]
    #[token("??")]
    #[token("++")]
    #[token("--")]
    #[token("->")]
    #[regex(r"[+\-/%&|^!@$]")]
    Operator,

    /// Bytes logos could not match (unterminated literals, stray characters)
    Error,
}

/// A token with its text and byte offset in the source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub offset: usize,
}

impl Token<'_> {
    /// The tree kind this token is stored as. Doc comment tokens never reach
    /// the tree directly; the parser replaces them with a `DOC_COMMENT` node.
    pub fn syntax_kind(&self) -> SyntaxKind {
        match self.kind {
            TokenKind::Whitespace => SyntaxKind::WHITESPACE,
            TokenKind::Newline => SyntaxKind::NEWLINE,
            TokenKind::LineComment | TokenKind::BlockComment => SyntaxKind::COMMENT,
            TokenKind::DocLine | TokenKind::DocBlock if !self.is_doc() => SyntaxKind::COMMENT,
            TokenKind::DocLine | TokenKind::DocBlock => SyntaxKind::DOC_COMMENT,
            TokenKind::Directive => SyntaxKind::DIRECTIVE,
            TokenKind::Ident => SyntaxKind::IDENT,
            TokenKind::Number => SyntaxKind::NUMBER,
            TokenKind::String => SyntaxKind::STRING,
            TokenKind::Char => SyntaxKind::CHAR,
            TokenKind::LBrace => SyntaxKind::L_BRACE,
            TokenKind::RBrace => SyntaxKind::R_BRACE,
            TokenKind::LParen => SyntaxKind::L_PAREN,
            TokenKind::RParen => SyntaxKind::R_PAREN,
            TokenKind::LBrack => SyntaxKind::L_BRACK,
            TokenKind::RBrack => SyntaxKind::R_BRACK,
            TokenKind::LAngle => SyntaxKind::L_ANGLE,
            TokenKind::RAngle => SyntaxKind::R_ANGLE,
            TokenKind::Semicolon => SyntaxKind::SEMICOLON,
            TokenKind::Comma => SyntaxKind::COMMA,
            TokenKind::Dot => SyntaxKind::DOT,
            TokenKind::Colon => SyntaxKind::COLON,
            TokenKind::Question => SyntaxKind::QUESTION,
            TokenKind::Eq => SyntaxKind::EQ,
            TokenKind::FatArrow => SyntaxKind::FAT_ARROW,
            TokenKind::Star => SyntaxKind::STAR,
            TokenKind::Tilde => SyntaxKind::TILDE,
            TokenKind::Operator => SyntaxKind::OPERATOR,
            TokenKind::Error => SyntaxKind::ERROR_TOKEN,
        }
    }

    /// Whether this token starts or continues a documentation comment.
    /// `////` lines and the empty `/**/` comment are ordinary comments.
    pub fn is_doc(&self) -> bool {
        match self.kind {
            TokenKind::DocLine => !self.text.starts_with("////"),
            TokenKind::DocBlock => self.text != "/**/",
            _ => false,
        }
    }

    /// Trivia as seen by the declaration parser (doc comments included)
    pub fn is_trivia(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Whitespace
                | TokenKind::Newline
                | TokenKind::LineComment
                | TokenKind::BlockComment
                | TokenKind::DocLine
                | TokenKind::DocBlock
                | TokenKind::Directive
        )
    }
}

/// Split `source` into tokens. Never fails; unmatched bytes become
/// [`TokenKind::Error`] tokens.
pub fn tokenize(source: &str) -> Vec<Token<'_>> {
    let mut lexer = TokenKind::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let kind = result.unwrap_or(TokenKind::Error);
        tokens.push(Token {
            kind,
            text: &source[span.clone()],
            offset: span.start,
        });
    }

    tokens
}

fn block_comment(lex: &mut logos::Lexer<TokenKind>) -> bool {
    // `/**/`: the opening `/**` already holds the closing star
    if lex.slice() == "/**" && lex.remainder().starts_with('/') {
        lex.bump(1);
        return true;
    }
    let len = match lex.remainder().find("*/") {
        Some(end) => end + 2,
        None => lex.remainder().len(),
    };
    lex.bump(len);
    true
}

fn interpolated(lex: &mut logos::Lexer<TokenKind>) -> bool {
    scan_interpolated(lex, false)
}

fn interpolated_verbatim(lex: &mut logos::Lexer<TokenKind>) -> bool {
    scan_interpolated(lex, true)
}

/// Scan the rest of an interpolated string, skipping over `{ ... }` holes
/// which may themselves contain string literals and braces
fn scan_interpolated(lex: &mut logos::Lexer<TokenKind>, verbatim: bool) -> bool {
    let rest = lex.remainder();
    let bytes = rest.as_bytes();
    let mut depth = 0usize;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        if depth == 0 {
            match b {
                b'\\' if !verbatim => i += 2,
                b'"' if verbatim && bytes.get(i + 1) == Some(&b'"') => i += 2,
                b'"' => {
                    lex.bump(i + 1);
                    return true;
                }
                b'{' if bytes.get(i + 1) == Some(&b'{') => i += 2,
                b'{' => {
                    depth = 1;
                    i += 1;
                }
                b'\n' | b'\r' if !verbatim => return false,
                _ => i += 1,
            }
        } else {
            match b {
                b'{' => {
                    depth += 1;
                    i += 1;
                }
                b'}' => {
                    depth -= 1;
                    i += 1;
                }
                b'"' => {
                    i += 1;
                    while i < bytes.len() && bytes[i] != b'"' {
                        if bytes[i] == b'\\' {
                            i += 1;
                        }
                        i += 1;
                    }
                    i += 1;
                }
                _ => i += 1,
            }
        }
    }

    false
}

/// Raw string literals: an opening run of three or more quotes closes at the
/// next run of the same length
fn raw_string(lex: &mut logos::Lexer<TokenKind>) -> bool {
    let quotes = lex.slice().trim_start_matches('$').len();
    let closing = "\"".repeat(quotes);
    match lex.remainder().find(&closing) {
        Some(end) => {
            lex.bump(end + quotes);
            true
        }
        None => false,
    }
}
