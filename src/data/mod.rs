//! Static data
//!
//! - `keywords`: C# modifier, type declaration and accessor keywords
//! - `latex`: character escapes and fixed LaTeX snippets
//! - `entities`: predefined XML entities

pub mod entities;
pub mod keywords;
pub mod latex;

pub use entities::{resolve_entity, XML_ENTITIES};
pub use keywords::{
    is_accessor_keyword, is_modifier, is_type_declaration_keyword, ACCESSOR_KEYWORDS, MODIFIERS,
    TYPE_DECLARATION_KEYWORDS,
};
pub use latex::{char_escape, TEXT_COMMANDS};
