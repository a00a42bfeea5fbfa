//! Reads the paragraph outline back out of a DOCX package.
//!
//! Only understands what `DocxExportService` writes: paragraphs with an
//! optional Heading1-3 style and plain text runs.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

use crate::domain::document::{HeadingLevel, OutlineItem};
use crate::ports::ExportError;

use super::docx_export_service::{heading_style_id, parts};

/// Extracts headings and paragraphs, in order, from DOCX bytes.
pub fn docx_outline(bytes: &[u8]) -> Result<Vec<OutlineItem>, ExportError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ExportError::docx_failed(format!("not a DOCX package: {}", e)))?;
    let mut document = archive
        .by_name(parts::DOCUMENT)
        .map_err(|e| ExportError::docx_failed(format!("{}: {}", parts::DOCUMENT, e)))?;

    let mut xml = String::new();
    document
        .read_to_string(&mut xml)
        .map_err(|e| ExportError::io_error(e.to_string()))?;

    parse_document_xml(&xml)
}

fn parse_document_xml(xml: &str) -> Result<Vec<OutlineItem>, ExportError> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();
    let mut items = Vec::new();

    let mut style: Option<String> = None;
    let mut text = String::new();
    let mut in_paragraph = false;
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"w:p" => {
                    in_paragraph = true;
                    style = None;
                    text.clear();
                }
                b"w:t" => in_text = true,
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"w:p" => items.push(OutlineItem::Paragraph(String::new())),
                b"w:pStyle" if in_paragraph => {
                    if let Some(attr) = e.try_get_attribute("w:val").map_err(read_failed)? {
                        style = Some(attr.unescape_value().map_err(read_failed)?.into_owned());
                    }
                }
                _ => {}
            },
            Ok(Event::Text(t)) if in_text => {
                text.push_str(&t.unescape().map_err(read_failed)?);
            }
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:p" => {
                    in_paragraph = false;
                    let content = std::mem::take(&mut text);
                    items.push(match style.take().as_deref().and_then(level_for_style) {
                        Some(level) => OutlineItem::Heading {
                            level,
                            text: content,
                        },
                        None => OutlineItem::Paragraph(content),
                    });
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(read_failed(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(items)
}

fn level_for_style(style: &str) -> Option<HeadingLevel> {
    HeadingLevel::ALL
        .into_iter()
        .find(|level| heading_style_id(*level) == style)
}

fn read_failed<E: std::fmt::Display>(err: E) -> ExportError {
    ExportError::docx_failed(format!("XML read failed: {}", err))
}
