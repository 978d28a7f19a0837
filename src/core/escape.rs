//! LaTeX escaping for table cells
//!
//! The rules run in a fixed order and each one only looks at text produced
//! by the ones before it:
//!
//! 1. `\ ^ ~` become text commands and `# $ % & _ { }` get a backslash, in
//!    a single character pass
//! 2. dash runs become unbreakable, ligature-free `\mbox{-{}-}` sequences
//! 3. angle brackets are set in monospace with a break opportunity after
//! 4. `\-` is inserted at camelCase boundaries
//! 5. the hyphenated "LaTeX" is replaced by the logo command

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::data::latex::{
    char_escape, ANGLE_BRACKETS, BACKSLASH_ESCAPED, HYPHENATED_LATEX, LATEX_LOGO, SOFT_HYPHEN,
};

lazy_static! {
    static ref LONG_DASH_RUN: Regex = Regex::new(r"-{3,}").unwrap();
    static ref CAMEL_BOUNDARY: Regex = Regex::new(r"([a-z])([A-Z])").unwrap();
}

/// Escape `text` for use inside a LaTeX table cell
///
/// ```rust
/// use xmldoc_tables::core::escape;
///
/// assert_eq!(escape("A&B"), r"A\&B");
/// assert_eq!(escape("GetValue"), r"Get\-Value");
/// assert_eq!(escape("a--b"), r"a\mbox{-{}-}b");
/// ```
pub fn escape(text: &str) -> String {
    let escaped = escape_chars(text);
    let dashed = replace_dashes(&escaped);
    let bracketed = replace_angle_brackets(&dashed);
    let hyphenated = CAMEL_BOUNDARY.replace_all(&bracketed, |caps: &Captures| {
        format!("{}{}{}", &caps[1], SOFT_HYPHEN, &caps[2])
    });
    hyphenated.replace(HYPHENATED_LATEX, LATEX_LOGO)
}

/// Rules 1 and 2. One pass, so the braces of `\textbackslash{}` are not
/// escaped again.
fn escape_chars(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 4);
    for c in text.chars() {
        if let Some(command) = char_escape(c) {
            out.push_str(command);
        } else if BACKSLASH_ESCAPED.contains(&c) {
            out.push('\\');
            out.push(c);
        } else {
            out.push(c);
        }
    }
    out
}

fn unbreakable_dashes(run: &str) -> String {
    let dashes = vec!["-"; run.len()].join("{}");
    format!("\\mbox{{{}}}", dashes)
}

/// Longest runs first; what is left afterwards is at most two dashes long
fn replace_dashes(text: &str) -> String {
    if !text.contains("--") {
        return text.to_string();
    }
    let long = LONG_DASH_RUN.replace_all(text, |caps: &Captures| unbreakable_dashes(&caps[0]));
    long.replace("--", &unbreakable_dashes("--"))
}

fn replace_angle_brackets(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match ANGLE_BRACKETS.get(&c) {
            Some(markup) => out.push_str(markup),
            None => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_special_characters() {
        assert_eq!(escape("A&B"), r"A\&B");
        assert_eq!(escape("100% of $x"), r"100\% of \$x");
        assert_eq!(escape("#tag_name"), r"\#tag\_name");
        assert_eq!(escape("{x}"), r"\{x\}");
    }

    #[test]
    fn test_text_commands_are_not_reescaped() {
        assert_eq!(escape(r"C:\dir"), r"C:\textbackslash{}dir");
        assert_eq!(escape("x^2"), r"x\textasciicircum{}2");
        assert_eq!(escape("~/home"), r"\textasciitilde{}/home");
    }

    #[test]
    fn test_dashes() {
        assert_eq!(escape("a-b"), "a-b");
        assert_eq!(escape("a--b"), r"a\mbox{-{}-}b");
        assert_eq!(escape("a---b"), r"a\mbox{-{}-{}-}b");
        assert_eq!(escape("----"), r"\mbox{-{}-{}-{}-}");
    }

    #[test]
    fn test_angle_brackets() {
        assert_eq!(
            escape("List<int>"),
            r"List\texttt{<}\allowbreak{}int\texttt{>}\allowbreak{}"
        );
    }

    #[test]
    fn test_camel_case() {
        assert_eq!(escape("GetValue"), r"Get\-Value");
        assert_eq!(escape("getHTTPResponse"), r"get\-HTTPResponse");
        assert_eq!(escape("ALLCAPS lower"), "ALLCAPS lower");
    }

    #[test]
    fn test_latex_logo() {
        assert_eq!(escape("Renders LaTeX tables"), r"Renders \LaTeX{} tables");
    }

    #[test]
    fn test_rule_order() {
        // The dash rule must not see dashes produced by escaping, and the
        // camelCase rule must not split the commands inserted before it
        assert_eq!(
            escape("isValid--List<T>"),
            r"is\-Valid\mbox{-{}-}List\texttt{<}\allowbreak{}T\texttt{>}\allowbreak{}"
        );
    }

    proptest! {
        #[test]
        fn prop_specials_are_always_escaped(s in r"[a-zA-Z0-9 #$%&_<>\-\\^~]{0,40}") {
            let out = escape(&s);
            for (i, c) in out.char_indices() {
                if matches!(c, '#' | '$' | '%' | '&' | '_') {
                    prop_assert!(i > 0 && out[..i].ends_with('\\'), "bare {:?} in {:?}", c, out);
                }
            }
            prop_assert!(!out.contains("--"));
        }

        #[test]
        fn prop_plain_lowercase_text_is_unchanged(s in "[a-z0-9 .,]{0,40}") {
            prop_assert_eq!(escape(&s), s);
        }
    }
}
