//! Line classification of document markup.
//!
//! Each line becomes either a heading (by its `#`, `##` or `###` prefix) or
//! a verbatim paragraph. Tables, emphasis and lists are not interpreted.

use super::block::HeadingLevel;

/// A classified markup line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutlineItem {
    Heading { level: HeadingLevel, text: String },
    Paragraph(String),
}

/// Classifies a single line.
///
/// Prefixes are checked shallowest first: `"# "`, then `"## "`, then
/// `"### "`. Anything else, blank lines included, is a paragraph.
pub fn classify_line(line: &str) -> OutlineItem {
    for level in HeadingLevel::ALL {
        let prefix = format!("{} ", level.marker());
        if let Some(text) = line.strip_prefix(prefix.as_str()) {
            return OutlineItem::Heading {
                level,
                text: text.to_string(),
            };
        }
    }
    OutlineItem::Paragraph(line.to_string())
}

/// Splits markup on `\n` and classifies every line.
pub fn parse_outline(markup: &str) -> Vec<OutlineItem> {
    markup.split('\n').map(classify_line).collect()
}
