//! DOCX export service adapter.
//!
//! Converts Term of Reference markup into a minimal Office Open XML
//! word-processing package. The conversion is line-granular: heading
//! markers become Heading1-3 paragraphs, every other line (tables, bold
//! text, blank lines) becomes a plain paragraph carrying the raw text.
//!
//! # Architecture
//!
//! This adapter implements the `DocumentExportService` port. The package is
//! a zip container (`zip`) whose XML parts are written with `quick-xml`.

use std::io::{Cursor, Write};

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::domain::document::{parse_outline, HeadingLevel, OutlineItem};
use crate::ports::{DocumentExportService, ExportError};

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/></Types>"#;

const PACKAGE_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

const DOCUMENT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#;

const WORDML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Package part names.
pub(crate) mod parts {
    pub const CONTENT_TYPES: &str = "[Content_Types].xml";
    pub const PACKAGE_RELS: &str = "_rels/.rels";
    pub const DOCUMENT: &str = "word/document.xml";
    pub const DOCUMENT_RELS: &str = "word/_rels/document.xml.rels";
    pub const STYLES: &str = "word/styles.xml";
}

/// Word style id used for a heading level.
pub fn heading_style_id(level: HeadingLevel) -> &'static str {
    match level {
        HeadingLevel::One => "Heading1",
        HeadingLevel::Two => "Heading2",
        HeadingLevel::Three => "Heading3",
    }
}

/// Export service producing DOCX packages from markup.
///
/// # Example
///
/// ```rust,ignore
/// let service = DocxExportService::new();
/// let bytes = service.to_docx("# TERMO\n## 1. Objeto\ntexto")?;
/// ```
#[derive(Debug, Clone)]
pub struct DocxExportService {
    /// Body font for the Normal style.
    font: String,

    /// Body font size in half-points.
    font_size_half_points: u32,
}

impl DocxExportService {
    /// Create a new export service with default settings.
    pub fn new() -> Self {
        Self {
            font: "Calibri".to_string(),
            font_size_half_points: 22,
        }
    }

    /// Set the body font.
    pub fn with_font(mut self, font: impl Into<String>) -> Self {
        self.font = font.into();
        self
    }

    /// Set the body font size in points.
    pub fn with_font_size(mut self, points: u32) -> Self {
        self.font_size_half_points = points * 2;
        self
    }

    /// Render `word/document.xml` for the given markup.
    fn document_xml(&self, markup: &str) -> Result<Vec<u8>, ExportError> {
        let mut writer = Writer::new(Cursor::new(Vec::new()));

        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))
            .map_err(xml_failed)?;

        let mut document = BytesStart::new("w:document");
        document.push_attribute(("xmlns:w", WORDML_NS));
        writer
            .write_event(Event::Start(document))
            .map_err(xml_failed)?;
        writer
            .write_event(Event::Start(BytesStart::new("w:body")))
            .map_err(xml_failed)?;

        for item in parse_outline(markup) {
            match item {
                OutlineItem::Heading { level, text } => {
                    write_paragraph(&mut writer, Some(heading_style_id(level)), &text)?
                }
                OutlineItem::Paragraph(text) => write_paragraph(&mut writer, None, &text)?,
            }
        }

        writer
            .write_event(Event::Empty(BytesStart::new("w:sectPr")))
            .map_err(xml_failed)?;
        writer
            .write_event(Event::End(BytesEnd::new("w:body")))
            .map_err(xml_failed)?;
        writer
            .write_event(Event::End(BytesEnd::new("w:document")))
            .map_err(xml_failed)?;

        Ok(writer.into_inner().into_inner())
    }

    /// Render `word/styles.xml` with Normal and the three heading styles.
    fn styles_xml(&self) -> String {
        let mut styles = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="{ns}"><w:docDefaults><w:rPrDefault><w:rPr><w:rFonts w:ascii="{font}" w:hAnsi="{font}" w:cs="{font}"/><w:sz w:val="{size}"/><w:lang w:val="pt-BR"/></w:rPr></w:rPrDefault></w:docDefaults><w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:qFormat/></w:style>"#,
            ns = WORDML_NS,
            font = escape_attr(&self.font),
            size = self.font_size_half_points,
        );

        for (level, size) in [
            (HeadingLevel::One, 32),
            (HeadingLevel::Two, 28),
            (HeadingLevel::Three, 24),
        ] {
            styles.push_str(&format!(
                r#"<w:style w:type="paragraph" w:styleId="{id}"><w:name w:val="heading {depth}"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/><w:pPr><w:keepNext/><w:spacing w:before="240" w:after="60"/><w:outlineLvl w:val="{outline}"/></w:pPr><w:rPr><w:b/><w:sz w:val="{size}"/></w:rPr></w:style>"#,
                id = heading_style_id(level),
                depth = level.depth(),
                outline = level.depth() - 1,
                size = size,
            ));
        }

        styles.push_str("</w:styles>");
        styles
    }
}

impl Default for DocxExportService {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentExportService for DocxExportService {
    fn to_docx(&self, markup: &str) -> Result<Vec<u8>, ExportError> {
        let document = self.document_xml(markup)?;
        let styles = self.styles_xml();

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options =
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        let entries: [(&str, &[u8]); 5] = [
            (parts::CONTENT_TYPES, CONTENT_TYPES_XML.as_bytes()),
            (parts::PACKAGE_RELS, PACKAGE_RELS_XML.as_bytes()),
            (parts::DOCUMENT, &document),
            (parts::DOCUMENT_RELS, DOCUMENT_RELS_XML.as_bytes()),
            (parts::STYLES, styles.as_bytes()),
        ];

        for (name, content) in entries {
            zip.start_file(name, options)
                .map_err(|e| ExportError::docx_failed(format!("{}: {}", name, e)))?;
            zip.write_all(content)
                .map_err(|e| ExportError::io_error(format!("{}: {}", name, e)))?;
        }

        let cursor = zip
            .finish()
            .map_err(|e| ExportError::docx_failed(e.to_string()))?;

        let bytes = cursor.into_inner();
        tracing::debug!(size_bytes = bytes.len(), "DOCX package written");
        Ok(bytes)
    }
}

/// Writes one `w:p`, optionally styled, holding `text` as a single run.
fn write_paragraph<W: Write>(
    writer: &mut Writer<W>,
    style: Option<&str>,
    text: &str,
) -> Result<(), ExportError> {
    let text = xml_safe(text);

    if style.is_none() && text.is_empty() {
        return writer
            .write_event(Event::Empty(BytesStart::new("w:p")))
            .map_err(xml_failed);
    }

    writer
        .write_event(Event::Start(BytesStart::new("w:p")))
        .map_err(xml_failed)?;

    if let Some(style) = style {
        writer
            .write_event(Event::Start(BytesStart::new("w:pPr")))
            .map_err(xml_failed)?;
        let mut p_style = BytesStart::new("w:pStyle");
        p_style.push_attribute(("w:val", style));
        writer
            .write_event(Event::Empty(p_style))
            .map_err(xml_failed)?;
        writer
            .write_event(Event::End(BytesEnd::new("w:pPr")))
            .map_err(xml_failed)?;
    }

    if !text.is_empty() {
        writer
            .write_event(Event::Start(BytesStart::new("w:r")))
            .map_err(xml_failed)?;
        let mut t = BytesStart::new("w:t");
        t.push_attribute(("xml:space", "preserve"));
        writer.write_event(Event::Start(t)).map_err(xml_failed)?;
        writer
            .write_event(Event::Text(BytesText::new(&text)))
            .map_err(xml_failed)?;
        writer
            .write_event(Event::End(BytesEnd::new("w:t")))
            .map_err(xml_failed)?;
        writer
            .write_event(Event::End(BytesEnd::new("w:r")))
            .map_err(xml_failed)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("w:p")))
        .map_err(xml_failed)
}

/// Keeps only characters of the XML 1.0 `Char` production. Line breaks
/// are already split off, so tab is the only whitespace control kept.
fn xml_safe(text: &str) -> String {
    text.chars().filter(|c| is_xml_char(*c)).collect()
}

fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}'
    )
}

fn escape_attr(value: &str) -> String {
    quick_xml::escape::escape(value).into_owned()
}

fn xml_failed<E: std::fmt::Display>(err: E) -> ExportError {
    ExportError::docx_failed(format!("XML write failed: {}", err))
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════
