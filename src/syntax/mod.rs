//! C# declaration syntax tree
//!
//! A lossless, error-tolerant syntax tree for the declaration skeleton of a C#
//! source file, built on `rowan`:
//! - `lexer`: source text -> tokens (trivia included)
//! - `doc`: `///` and `/** */` runs -> structured XML documentation subtree
//! - `parser`: tokens -> green tree + diagnostics
//! - `ast`: typed views over nodes and the closed `Declaration` set
//!
//! Method and accessor bodies, initializers and attribute arguments are kept
//! as balanced token runs; only declarations get structure.

pub mod ast;
pub mod doc;
pub mod lexer;
pub mod parser;

pub use ast::{
    AccessorList, ClassDecl, ConstructorDecl, DeclKind, Declaration, DocComment, FieldDecl,
    MethodDecl, PropertyDecl, StructDecl, VariableDeclarator, XmlElement,
};
pub use parser::{parse, Parse};

/// Kinds of tokens and nodes in the C# syntax tree
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum SyntaxKind {
    // Trivia
    WHITESPACE = 0,
    NEWLINE,
    COMMENT,
    DIRECTIVE,

    // Code tokens
    IDENT,
    NUMBER,
    STRING,
    CHAR,
    L_BRACE,
    R_BRACE,
    L_PAREN,
    R_PAREN,
    L_BRACK,
    R_BRACK,
    L_ANGLE,
    R_ANGLE,
    SEMICOLON,
    COMMA,
    DOT,
    COLON,
    QUESTION,
    EQ,
    FAT_ARROW,
    STAR,
    TILDE,
    OPERATOR,
    ERROR_TOKEN,

    // Documentation comment tokens
    DOC_EXTERIOR,
    XML_LT,
    XML_LT_SLASH,
    XML_GT,
    XML_SLASH_GT,
    XML_NAME,
    XML_EQ,
    XML_ATTR_VALUE,
    XML_TEXT,
    XML_ENTITY,
    XML_COMMENT,
    XML_CDATA,

    // Nodes
    COMPILATION_UNIT,
    USING_DIRECTIVE,
    GLOBAL_ATTRIBUTE,
    GLOBAL_STATEMENT,
    NAMESPACE_DECL,
    CLASS_DECL,
    STRUCT_DECL,
    INTERFACE_DECL,
    ENUM_DECL,
    RECORD_DECL,
    DELEGATE_DECL,
    ENUM_MEMBER,
    FIELD_DECL,
    PROPERTY_DECL,
    METHOD_DECL,
    CONSTRUCTOR_DECL,
    OTHER_MEMBER,
    ATTRIBUTE_LIST,
    MODIFIER_LIST,
    NAME,
    TYPE,
    TYPE_PARAMETER_LIST,
    BASE_LIST,
    CONSTRAINT_CLAUSE,
    PARAMETER_LIST,
    VARIABLE_DECLARATION,
    VARIABLE_DECLARATOR,
    INITIALIZER,
    CONSTRUCTOR_INITIALIZER,
    MEMBER_LIST,
    ACCESSOR_LIST,
    ACCESSOR_DECL,
    BLOCK,
    ARROW_EXPR,
    DOC_COMMENT,
    XML_ELEMENT,
    XML_START_TAG,
    XML_END_TAG,
    XML_EMPTY_ELEMENT,
    XML_ATTRIBUTE,
    ERROR,
}

use SyntaxKind::*;

/// Every kind, indexed by its discriminant
const ALL_KINDS: &[SyntaxKind] = &[
    WHITESPACE,
    NEWLINE,
    COMMENT,
    DIRECTIVE,
    IDENT,
    NUMBER,
    STRING,
    CHAR,
    L_BRACE,
    R_BRACE,
    L_PAREN,
    R_PAREN,
    L_BRACK,
    R_BRACK,
    L_ANGLE,
    R_ANGLE,
    SEMICOLON,
    COMMA,
    DOT,
    COLON,
    QUESTION,
    EQ,
    FAT_ARROW,
    STAR,
    TILDE,
    OPERATOR,
    ERROR_TOKEN,
    DOC_EXTERIOR,
    XML_LT,
    XML_LT_SLASH,
    XML_GT,
    XML_SLASH_GT,
    XML_NAME,
    XML_EQ,
    XML_ATTR_VALUE,
    XML_TEXT,
    XML_ENTITY,
    XML_COMMENT,
    XML_CDATA,
    COMPILATION_UNIT,
    USING_DIRECTIVE,
    GLOBAL_ATTRIBUTE,
    GLOBAL_STATEMENT,
    NAMESPACE_DECL,
    CLASS_DECL,
    STRUCT_DECL,
    INTERFACE_DECL,
    ENUM_DECL,
    RECORD_DECL,
    DELEGATE_DECL,
    ENUM_MEMBER,
    FIELD_DECL,
    PROPERTY_DECL,
    METHOD_DECL,
    CONSTRUCTOR_DECL,
    OTHER_MEMBER,
    ATTRIBUTE_LIST,
    MODIFIER_LIST,
    NAME,
    TYPE,
    TYPE_PARAMETER_LIST,
    BASE_LIST,
    CONSTRAINT_CLAUSE,
    PARAMETER_LIST,
    VARIABLE_DECLARATION,
    VARIABLE_DECLARATOR,
    INITIALIZER,
    CONSTRUCTOR_INITIALIZER,
    MEMBER_LIST,
    ACCESSOR_LIST,
    ACCESSOR_DECL,
    BLOCK,
    ARROW_EXPR,
    DOC_COMMENT,
    XML_ELEMENT,
    XML_START_TAG,
    XML_END_TAG,
    XML_EMPTY_ELEMENT,
    XML_ATTRIBUTE,
    ERROR,
];

impl SyntaxKind {
    /// Whitespace, newlines, plain comments and preprocessor lines.
    /// Documentation comments are nodes, not trivia tokens.
    pub fn is_trivia(self) -> bool {
        matches!(self, WHITESPACE | NEWLINE | COMMENT | DIRECTIVE)
    }

    /// Kinds of nodes that declare a type or a member, whether or not the
    /// tables support them
    pub fn is_declaration(self) -> bool {
        matches!(
            self,
            CLASS_DECL
                | STRUCT_DECL
                | INTERFACE_DECL
                | ENUM_DECL
                | RECORD_DECL
                | DELEGATE_DECL
                | ENUM_MEMBER
                | FIELD_DECL
                | PROPERTY_DECL
                | METHOD_DECL
                | CONSTRUCTOR_DECL
                | OTHER_MEMBER
        )
    }

    fn from_raw(raw: u16) -> SyntaxKind {
        ALL_KINDS.get(raw as usize).copied().unwrap_or(ERROR)
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        rowan::SyntaxKind(kind as u16)
    }
}

/// The `rowan` language tag for C#
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CSharp {}

impl rowan::Language for CSharp {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        SyntaxKind::from_raw(raw.0)
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

pub type SyntaxNode = rowan::SyntaxNode<CSharp>;
pub type SyntaxToken = rowan::SyntaxToken<CSharp>;
pub type SyntaxElement = rowan::SyntaxElement<CSharp>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_table_matches_discriminants() {
        for (index, kind) in ALL_KINDS.iter().enumerate() {
            assert_eq!(*kind as usize, index, "{:?} out of place", kind);
        }
        assert_eq!(ALL_KINDS.last(), Some(&ERROR));
    }

    #[test]
    fn test_raw_round_trip() {
        let raw: rowan::SyntaxKind = FIELD_DECL.into();
        assert_eq!(<CSharp as rowan::Language>::kind_from_raw(raw), FIELD_DECL);
        assert_eq!(SyntaxKind::from_raw(u16::MAX), ERROR);
    }

    #[test]
    fn test_trivia() {
        assert!(COMMENT.is_trivia());
        assert!(!IDENT.is_trivia());
        assert!(!DOC_COMMENT.is_trivia());
    }
}
