//! The assembled Term of Reference.

use super::block::{Block, HeadingLevel};

/// An assembled document: an immutable, ordered sequence of blocks.
///
/// Created once per generation call and serialized to markup for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedDocument {
    blocks: Vec<Block>,
}

impl GeneratedDocument {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    /// Texts of the headings at the given level, in document order.
    pub fn headings(&self, level: HeadingLevel) -> Vec<&str> {
        self.blocks
            .iter()
            .filter_map(|block| match block {
                Block::Heading { level: l, text } if *l == level => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Summary-block entries as `(label, value)` pairs.
    pub fn entries(&self) -> Vec<(&str, &str)> {
        self.blocks
            .iter()
            .filter_map(|block| match block {
                Block::Entry { label, value } => Some((label.as_str(), value.as_str())),
                _ => None,
            })
            .collect()
    }

    /// Serializes to line-oriented markup, every line terminated by `\n`.
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        for block in &self.blocks {
            for line in block.markup_lines() {
                out.push_str(&line);
                out.push('\n');
            }
        }
        out
    }
}
