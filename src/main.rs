//! `termref` command line front end.
//!
//! Reads a contract request from a YAML or JSON file, generates the Term of
//! Reference and writes the `.md` and `.docx` artifacts.
//!
//! # Environment Variables
//! - `TERMREF__JURISDICTION__MUNICIPALITY`: Municipality named in the document (default: "Brasnorte-MT")
//! - `TERMREF__OUTPUT__DIRECTORY`: Where artifacts are written (default: ".")
//! - `TERMREF__AI__OPENAI_API_KEY`: Completion service key, only needed for `--draft-justification`
//! - `RUST_LOG`: Log filter (default: "termref=info")

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use termref::adapters::document::docx_outline;
use termref::adapters::{
    read_request, DocxExportService, LocalArtifactStorage, OpenAIConfig, OpenAIProvider,
    TemplateDocumentGenerator,
};
use termref::application::{
    DraftJustificationHandler, DraftSettings, GenerateTermsCommand, GenerateTermsHandler,
    GenerateTermsResult, JustificationStatus, RequestBudget,
};
use termref::config::AppConfig;
use termref::domain::document::OutlineItem;
use termref::domain::request::{RequestingUnit, TermMonths};
use termref::ports::{ArtifactStorage, TemplateVariant};

#[derive(Parser)]
#[command(name = "termref")]
#[command(about = "Term of Reference generator (Lei nº 14.133/2021)")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a Term of Reference from a request file
    Generate {
        /// Request file (.yaml, .yml or .json)
        request: PathBuf,
        /// Output directory (overrides configuration)
        #[arg(long)]
        out_dir: Option<PathBuf>,
        /// Template variant: free-text or unit-selection
        #[arg(long)]
        variant: Option<TemplateVariant>,
        /// Municipality named in the document
        #[arg(long)]
        municipality: Option<String>,
        /// Reference date (dd/mm/yyyy), today when absent
        #[arg(long)]
        date: Option<String>,
        /// Leave out the hybrid/collaborative option
        #[arg(long)]
        no_hybrid: bool,
        /// Leave out the standard KPI/SLA indicators
        #[arg(long)]
        no_kpis: bool,
        /// Contract term in months (1-60)
        #[arg(long)]
        term_months: Option<u32>,
        /// Requesting units from the catalog (comma-separated keys)
        #[arg(long, value_delimiter = ',')]
        units: Vec<RequestingUnit>,
        /// Draft the justification with the completion service
        #[arg(long)]
        draft_justification: bool,
        /// Print the markup to stdout instead of writing files
        #[arg(long)]
        stdout: bool,
    },
    /// List the requesting unit catalog
    Units,
    /// Print the heading outline of a generated .docx
    Outline {
        /// Path to the .docx file
        docx: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("termref=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            request,
            out_dir,
            variant,
            municipality,
            date,
            no_hybrid,
            no_kpis,
            term_months,
            units,
            draft_justification,
            stdout,
        } => {
            let mut config = AppConfig::load()?;
            if let Some(dir) = out_dir {
                config.output.directory = dir;
            }
            if let Some(variant) = variant {
                config.features.template_variant = variant;
            }
            if let Some(municipality) = municipality {
                config.jurisdiction.municipality = municipality;
            }
            if date.is_some() {
                config.jurisdiction.reference_date = date;
            }
            if draft_justification {
                config.features.draft_justification = true;
            }
            config.validate()?;

            let mut contract = read_request(&request).await?;
            if no_hybrid {
                contract.include_hybrid_option = false;
            }
            if no_kpis {
                contract.include_standard_kpis = false;
            }
            if let Some(months) = term_months {
                contract.term_months = Some(TermMonths::new(months)?);
            }
            if !units.is_empty() {
                contract.selected_units = units;
            }

            let handler = build_handler(&config)?;
            let result = handler
                .handle(
                    GenerateTermsCommand::new(contract)
                        .with_variant(config.features.template_variant)
                        .with_draft_justification(config.features.draft_justification),
                )
                .await?;

            report_justification(&result.justification);

            if stdout {
                print!("{}", result.document.to_markdown());
                return Ok(());
            }
            write_artifacts(&config, result).await?;
        }
        Commands::Units => {
            for unit in RequestingUnit::ALL {
                println!("{:<24} {}", unit.key(), unit.label());
            }
        }
        Commands::Outline { docx } => {
            print_outline(&docx).await?;
        }
    }

    Ok(())
}

fn build_handler(config: &AppConfig) -> anyhow::Result<GenerateTermsHandler> {
    let jurisdiction = config.jurisdiction.to_jurisdiction()?;
    let handler = GenerateTermsHandler::new(
        Arc::new(TemplateDocumentGenerator::new()),
        Arc::new(DocxExportService::new()),
        jurisdiction,
    );

    if !config.drafting_configured() {
        return Ok(handler);
    }
    let Some(api_key) = config.ai.openai_api_key.clone() else {
        return Ok(handler);
    };

    let provider = OpenAIProvider::new(
        OpenAIConfig::new(api_key)
            .with_model(config.ai.model.clone())
            .with_base_url(config.ai.base_url.clone())
            .with_timeout(config.ai.timeout())
            .with_max_retries(config.ai.max_retries),
    )?;
    let drafter = DraftJustificationHandler::new(
        Arc::new(provider),
        Arc::new(RequestBudget::per_minute(config.ai.requests_per_minute)),
        DraftSettings {
            temperature: config.ai.temperature,
            max_tokens: config.ai.max_tokens,
            deadline: config.ai.draft_deadline(),
        },
    );

    Ok(handler.with_drafter(Arc::new(drafter)))
}

fn report_justification(status: &JustificationStatus) {
    match status {
        JustificationStatus::NotRequested | JustificationStatus::Drafted => {}
        JustificationStatus::Unavailable => {
            eprintln!("warning: no completion service configured, justification not drafted");
        }
        JustificationStatus::Fallback { reason } => {
            eprintln!("warning: justification not drafted ({}), static text kept", reason);
        }
    }
}

/// Writes the enabled artifacts. A failed DOCX conversion still leaves the
/// Markdown artifact on disk before the error is returned.
async fn write_artifacts(config: &AppConfig, result: GenerateTermsResult) -> anyhow::Result<()> {
    let storage = LocalArtifactStorage::new(&config.output.directory);

    if config.output.write_markdown {
        let stored = storage.write(&result.markdown).await?;
        println!(
            "{}  {} bytes  sha256:{}",
            stored.path.display(),
            stored.size_bytes,
            stored.checksum
        );
    }

    if config.output.write_docx {
        let docx = result
            .docx
            .with_context(|| format!("DOCX conversion failed (trace {})", result.trace_id))?;
        let stored = storage.write(&docx).await?;
        println!(
            "{}  {} bytes  sha256:{}",
            stored.path.display(),
            stored.size_bytes,
            stored.checksum
        );
    }

    Ok(())
}

async fn print_outline(path: &Path) -> anyhow::Result<()> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("cannot read {}", path.display()))?;

    for item in docx_outline(&bytes)? {
        if let OutlineItem::Heading { level, text } = item {
            let indent = "  ".repeat(usize::from(level.depth()) - 1);
            println!("{}{}", indent, text);
        }
    }

    Ok(())
}
