//! LaTeX escaping tables and markup constants
//!
//! Single source of truth for what the typesetting escaper emits.

use phf::phf_map;

/// Characters that need a text-mode command rather than a backslash prefix
pub static TEXT_COMMANDS: phf::Map<char, &'static str> = phf_map! {
    '\\' => "\\textbackslash{}",
    '^' => "\\textasciicircum{}",
    '~' => "\\textasciitilde{}",
};

/// Characters escaped by prefixing a backslash
pub const BACKSLASH_ESCAPED: &[char] = &['#', '$', '%', '&', '_', '{', '}'];

/// Angle brackets are set in monospace (the text font has no `<`/`>` glyph
/// in OT1) and followed by a break opportunity for long generic types
pub static ANGLE_BRACKETS: phf::Map<char, &'static str> = phf_map! {
    '<' => "\\texttt{<}\\allowbreak{}",
    '>' => "\\texttt{>}\\allowbreak{}",
};

/// Discretionary hyphen inserted at camelCase boundaries
pub const SOFT_HYPHEN: &str = "\\-";

/// "LaTeX" after camelCase hyphenation
pub const HYPHENATED_LATEX: &str = "La\\-Te\\-X";

/// Replacement for [`HYPHENATED_LATEX`]
pub const LATEX_LOGO: &str = "\\LaTeX{}";

/// Look up the replacement for a single character, if it needs one
#[inline]
pub fn char_escape(c: char) -> Option<&'static str> {
    TEXT_COMMANDS.get(&c).copied()
}
