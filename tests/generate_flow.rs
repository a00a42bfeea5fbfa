//! Integration tests for the generate-and-write flow.
//!
//! These tests verify the end-to-end path the command line takes:
//! 1. A request file is read from disk
//! 2. GenerateTermsHandler assembles the document and converts it
//! 3. LocalArtifactStorage writes both artifacts
//! 4. The written .docx reproduces the markup's heading hierarchy
//!
//! Uses the mock completion provider, so no network access is needed.

use std::io::Write;
use std::sync::Arc;

use chrono::NaiveDate;
use tempfile::{Builder, TempDir};

use termref::adapters::document::docx_outline;
use termref::adapters::{
    read_request, DocxExportService, LocalArtifactStorage, MockAIProvider,
    TemplateDocumentGenerator,
};
use termref::application::{
    DraftJustificationHandler, DraftSettings, GenerateTermsCommand, GenerateTermsHandler,
    JustificationStatus, RequestBudget,
};
use termref::domain::document::{HeadingLevel, Jurisdiction, OutlineItem};
use termref::ports::{ArtifactStorage, TemplateVariant};

// =============================================================================
// Test Infrastructure
// =============================================================================

const PREDIAL_REQUEST: &str = "\
object: Contratação de empresa especializada para manutenção predial preventiva e corretiva
requesting_units: Secretaria Municipal de Obras
quantities: 12 meses de serviço contínuo
locations: Prédios públicos da sede do município
term_months: 12
include_hybrid_option: true
include_standard_kpis: true
";

fn handler() -> GenerateTermsHandler {
    GenerateTermsHandler::new(
        Arc::new(TemplateDocumentGenerator::new()),
        Arc::new(DocxExportService::new()),
        Jurisdiction::new("Brasnorte-MT", NaiveDate::from_ymd_opt(2026, 3, 9).unwrap()),
    )
}

fn request_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = Builder::new().suffix(".yaml").tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn headings(outline: &[OutlineItem]) -> Vec<(HeadingLevel, String)> {
    outline
        .iter()
        .filter_map(|item| match item {
            OutlineItem::Heading { level, text } => Some((*level, text.clone())),
            OutlineItem::Paragraph(_) => None,
        })
        .collect()
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn request_file_to_artifacts_on_disk() {
    let file = request_file(PREDIAL_REQUEST);
    let out = TempDir::new().unwrap();

    let request = read_request(file.path()).await.unwrap();
    let result = handler()
        .handle(GenerateTermsCommand::new(request))
        .await
        .unwrap();

    let storage = LocalArtifactStorage::new(out.path());
    let md = storage.write(&result.markdown).await.unwrap();
    let docx = storage.write(result.docx.as_ref().unwrap()).await.unwrap();

    assert_eq!(md.path, out.path().join("TR_Lei_14133_Brasnorte.md"));
    assert_eq!(docx.path, out.path().join("TR_Lei_14133_Brasnorte.docx"));

    let markdown = std::fs::read_to_string(&md.path).unwrap();
    assert!(markdown.starts_with("# TERMO DE REFERÊNCIA — Lei nº 14.133/2021\n"));
    assert!(markdown.contains("**Data:** 09/03/2026"));
    assert!(markdown.contains("manutenção predial preventiva e corretiva"));
    assert!(markdown.contains("Opção C — Híbrida/Colaborativa"));

    let bytes = std::fs::read(&docx.path).unwrap();
    assert_eq!(&bytes[..2], b"PK");
    assert_eq!(docx.size_bytes, bytes.len() as u64);
}

#[tokio::test]
async fn docx_headings_match_markdown_headings() {
    let file = request_file(PREDIAL_REQUEST);
    let request = read_request(file.path()).await.unwrap();
    let result = handler()
        .handle(GenerateTermsCommand::new(request))
        .await
        .unwrap();

    let from_docx = headings(&docx_outline(&result.docx.unwrap().content).unwrap());
    let from_markup = headings(&termref::domain::document::parse_outline(
        &result.document.to_markdown(),
    ));

    assert_eq!(from_docx, from_markup);
    assert_eq!(from_docx[0].0, HeadingLevel::One);
    assert_eq!(
        from_docx.iter().filter(|(level, _)| *level == HeadingLevel::Two).count(),
        6
    );
}

#[tokio::test]
async fn multi_line_field_keeps_six_sections_in_docx() {
    let file = request_file(
        "object: Papel A4\nrisks: |\n  sazonalidade\n  ## 7. SEÇÃO INJETADA\n",
    );
    let request = read_request(file.path()).await.unwrap();
    let result = handler()
        .handle(GenerateTermsCommand::new(request))
        .await
        .unwrap();

    let outline = docx_outline(&result.docx.unwrap().content).unwrap();
    assert_eq!(
        headings(&outline)
            .iter()
            .filter(|(level, _)| *level == HeadingLevel::Two)
            .count(),
        6
    );
}

#[tokio::test]
async fn unit_selection_request_cites_decrees() {
    let file = request_file(
        "object: Aquisição de papel A4\nselected_units: [health, education]\nterm_months: 6\n",
    );
    let request = read_request(file.path()).await.unwrap();

    let result = handler()
        .handle(GenerateTermsCommand::new(request).with_variant(TemplateVariant::UnitSelection))
        .await
        .unwrap();

    let markdown = result.document.to_markdown();
    assert!(markdown.contains("Decreto Municipal nº 03/2024"));
    assert!(markdown.contains("será de 6 meses"));
    assert!(markdown.contains("- **Prazo de vigência (meses):** 6"));
}

#[tokio::test]
async fn drafted_justification_reaches_the_docx() {
    let file = request_file(PREDIAL_REQUEST);
    let request = read_request(file.path()).await.unwrap();
    let drafter = DraftJustificationHandler::new(
        Arc::new(MockAIProvider::new().with_response("## Justificativa\nOs prédios exigem reparos.")),
        Arc::new(RequestBudget::per_minute(5)),
        DraftSettings::default(),
    );

    let result = handler()
        .with_drafter(Arc::new(drafter))
        .handle(GenerateTermsCommand::new(request).with_draft_justification(true))
        .await
        .unwrap();

    assert_eq!(result.justification, JustificationStatus::Drafted);
    let outline = docx_outline(&result.docx.unwrap().content).unwrap();
    assert!(outline.contains(&OutlineItem::Paragraph("Os prédios exigem reparos.".to_string())));
    assert!(!headings(&outline).iter().any(|(_, text)| text == "Justificativa"));
}
