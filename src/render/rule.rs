//! Horizontal rules

/// Position of a horizontal rule in a table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleStyle {
    Top,
    Mid,
    Bottom,
}

impl RuleStyle {
    /// Booktabs rule, or `\hline` for plain tables
    pub fn to_latex(self, booktabs: bool) -> &'static str {
        if !booktabs {
            return "\\hline";
        }
        match self {
            RuleStyle::Top => "\\toprule",
            RuleStyle::Mid => "\\midrule",
            RuleStyle::Bottom => "\\bottomrule",
        }
    }
}
