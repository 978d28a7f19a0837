//! C# keyword tables used by the declaration parser
//!
//! Most C# keywords are contextual, so the lexer emits plain identifiers and
//! the parser consults these sets when it needs to classify one.

use phf::phf_set;

/// Declaration modifiers, in the order they may appear in any combination
pub static MODIFIERS: phf::Set<&'static str> = phf_set! {
    "public",
    "private",
    "protected",
    "internal",
    "file",
    "static",
    "readonly",
    "const",
    "volatile",
    "virtual",
    "override",
    "abstract",
    "sealed",
    "extern",
    "unsafe",
    "new",
    "async",
    "partial",
    "required",
    "fixed",
};

/// Keywords that introduce a type declaration
pub static TYPE_DECLARATION_KEYWORDS: phf::Set<&'static str> = phf_set! {
    "class",
    "struct",
    "interface",
    "enum",
    "record",
};

/// Accessor keywords inside a property accessor list
pub static ACCESSOR_KEYWORDS: phf::Set<&'static str> = phf_set! {
    "get",
    "set",
    "init",
    "add",
    "remove",
};

/// Check if an identifier is a declaration modifier
#[inline]
pub fn is_modifier(ident: &str) -> bool {
    MODIFIERS.contains(ident)
}

/// Check if an identifier starts a type declaration
#[inline]
pub fn is_type_declaration_keyword(ident: &str) -> bool {
    TYPE_DECLARATION_KEYWORDS.contains(ident)
}

/// Check if an identifier is an accessor keyword
#[inline]
pub fn is_accessor_keyword(ident: &str) -> bool {
    ACCESSOR_KEYWORDS.contains(ident)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifiers() {
        assert!(is_modifier("public"));
        assert!(is_modifier("const"));
        assert!(!is_modifier("class"));
        assert!(!is_modifier("Public"));
    }

    #[test]
    fn test_type_keywords() {
        assert!(is_type_declaration_keyword("record"));
        assert!(!is_type_declaration_keyword("delegate"));
    }

    #[test]
    fn test_accessors() {
        assert!(is_accessor_keyword("init"));
        assert!(!is_accessor_keyword("value"));
    }
}
