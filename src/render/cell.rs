//! Column specs and header cells

/// Column type of a generated table
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ColumnAlign {
    #[default]
    Left,
    /// Paragraph column with a width, e.g. `p{0.25\linewidth}`
    Para(String),
}

impl ColumnAlign {
    /// Column specification without rules
    pub fn to_spec(&self) -> String {
        match self {
            ColumnAlign::Left => "l".to_string(),
            ColumnAlign::Para(width) => format!("p{{{}}}", width),
        }
    }
}

/// A header cell; body rows come pre-rendered from the assembler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    pub content: String,
    pub colspan: usize,
}

impl HeaderCell {
    pub fn new(content: impl Into<String>) -> Self {
        HeaderCell {
            content: content.into(),
            colspan: 1,
        }
    }

    pub fn spanning(content: impl Into<String>, colspan: usize) -> Self {
        HeaderCell {
            content: content.into(),
            colspan,
        }
    }

    /// Bold header text, wrapped in `\multicolumn` when it spans
    pub fn to_latex(&self, vertical_rules: bool) -> String {
        let inner = format!("\\textbf{{{}}}", self.content);
        if self.colspan > 1 {
            let spec = if vertical_rules { "l|" } else { "l" };
            format!("\\multicolumn{{{}}}{{{}}}{{{}}}", self.colspan, spec, inner)
        } else {
            inner
        }
    }
}
