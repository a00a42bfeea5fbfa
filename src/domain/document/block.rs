//! Block elements a generated document is made of.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{is_filled, single_line};

/// Heading depth, mapped to `#`, `##` and `###` markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HeadingLevel {
    One,
    Two,
    Three,
}

impl HeadingLevel {
    /// All levels, shallowest first.
    pub const ALL: [HeadingLevel; 3] = [HeadingLevel::One, HeadingLevel::Two, HeadingLevel::Three];

    /// Markup marker for this level (without the trailing space).
    pub fn marker(&self) -> &'static str {
        match self {
            HeadingLevel::One => "#",
            HeadingLevel::Two => "##",
            HeadingLevel::Three => "###",
        }
    }

    /// Numeric depth (1-3).
    pub fn depth(&self) -> u8 {
        match self {
            HeadingLevel::One => 1,
            HeadingLevel::Two => 2,
            HeadingLevel::Three => 3,
        }
    }
}

/// Column alignment in a markup table separator row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Alignment {
    Left,
    Right,
}

/// A table column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub title: String,
    pub align: Alignment,
}

impl Column {
    pub fn left(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            align: Alignment::Left,
        }
    }

    pub fn right(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            align: Alignment::Right,
        }
    }
}

/// A literal pipe table, indented under a list item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Indentation placed before every table line.
    const INDENT: &'static str = "  ";

    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Appends a data row.
    pub fn with_row<I, S>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
        self
    }

    /// Header, separator and data rows as markup lines.
    pub fn lines(&self) -> Vec<String> {
        let header = self
            .columns
            .iter()
            .map(|c| c.title.as_str())
            .collect::<Vec<_>>();
        let separator = self
            .columns
            .iter()
            .map(|c| match c.align {
                Alignment::Left => "---",
                Alignment::Right => "---:",
            })
            .collect::<Vec<_>>();

        let mut lines = Vec::with_capacity(self.rows.len() + 2);
        lines.push(format!("{}| {} |", Self::INDENT, header.join(" | ")));
        lines.push(format!("{}|{}|", Self::INDENT, separator.join("|")));
        for row in &self.rows {
            lines.push(format!("{}| {} |", Self::INDENT, row.join(" | ")));
        }
        lines
    }
}

/// One block of a generated document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Block {
    /// Section heading.
    Heading { level: HeadingLevel, text: String },

    /// A raw markup line (boilerplate, list item, bold lead-in).
    Paragraph(String),

    /// A labeled summary entry, `- **label:** value`.
    Entry { label: String, value: String },

    /// A literal table.
    Table(Table),

    /// An empty spacing line.
    Blank,

    /// A horizontal rule.
    Rule,
}

impl Block {
    pub fn heading(level: HeadingLevel, text: impl Into<String>) -> Self {
        Block::Heading {
            level,
            text: text.into(),
        }
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Block::Paragraph(text.into())
    }

    /// Builds a summary entry, or nothing when the value is blank.
    ///
    /// The value is collapsed onto a single trimmed line. A blank value
    /// yields `None` so the label is never printed on its own.
    pub fn entry(label: impl Into<String>, value: &str) -> Option<Self> {
        if !is_filled(value) {
            return None;
        }
        Some(Block::Entry {
            label: label.into(),
            value: single_line(value),
        })
    }

    /// Markup lines for this block, without line terminators.
    pub fn markup_lines(&self) -> Vec<String> {
        match self {
            Block::Heading { level, text } => vec![format!("{} {}", level.marker(), text)],
            Block::Paragraph(text) => vec![text.clone()],
            Block::Entry { label, value } => vec![format!("- **{}:** {}", label, value)],
            Block::Table(table) => table.lines(),
            Block::Blank => vec![String::new()],
            Block::Rule => vec!["---".to_string()],
        }
    }
}
