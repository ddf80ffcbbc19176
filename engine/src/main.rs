// Billing CLI entry point: CSV export in, "faturamento" spreadsheet out.
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use faturamento_engine::config::EngineSettings;
use faturamento_engine::data::preview::render_preview;
use faturamento_engine::logging;
use faturamento_engine::services::BillingService;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "faturamento", version, about = "Gera a base de faturamento a partir do export de participações (.csv)")]
struct Cli {
    /// Enrollment export (.csv, ';'-delimited, Latin-1 by default)
    input: PathBuf,

    /// Output spreadsheet; defaults to the configured file name in the current directory
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON settings file overriding the bundled defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Date used as "today" for ages (YYYY-MM-DD); defaults to the local date
    #[arg(long, value_parser = parse_reference_date)]
    reference_date: Option<NaiveDate>,

    /// Rows shown in the raw and treated previews
    #[arg(long)]
    preview: Option<usize>,

    /// Also write the run report (drop counts, categories) as JSON
    #[arg(long)]
    report: Option<PathBuf>,
}

fn parse_reference_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("expected YYYY-MM-DD: {e}"))
}

fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();

    let mut settings = match &cli.config {
        Some(path) => EngineSettings::from_file(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => EngineSettings::load_default().context("loading bundled settings")?,
    };
    if let Some(rows) = cli.preview {
        settings.preview_rows = rows;
        settings.validate().context("invalid --preview")?;
    }

    let reference_date = cli.reference_date.unwrap_or_else(|| Local::now().date_naive());
    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&settings.output_file_name));

    info!(input = %cli.input.display(), %reference_date, "Starting billing run");

    let service = BillingService::new(settings);
    let outcome = service
        .process_file(&cli.input, &output, reference_date)
        .with_context(|| format!("processing {}", cli.input.display()))?;

    let preview_rows = service.settings().preview_rows;
    println!("Prévia dos dados recebidos:");
    println!("{}", render_preview(&outcome.raw, preview_rows));
    println!("Arquivo tratado com sucesso!");
    println!("Prévia dos dados tratados:");
    println!("{}", render_preview(&outcome.treated, preview_rows));
    println!("Arquivo gerado: {}", output.display());

    if let Some(path) = &cli.report {
        let json = serde_json::to_string_pretty(&outcome.report).context("serializing report")?;
        std::fs::write(path, json).with_context(|| format!("writing report to {}", path.display()))?;
        info!(path = %path.display(), "Wrote run report");
    }

    Ok(())
}
