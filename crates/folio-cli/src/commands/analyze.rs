//! Analyze command - extract data from a single report PDF.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use folio_core::models::config::FolioConfig;
use folio_core::{AnalysisReport, AnthropicClient, ExtractionPipeline, ReportingPeriod};

/// Arguments for the analyze command.
#[derive(Args)]
pub struct AnalyzeArgs {
    /// Input report PDF
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Extraction engine
    #[arg(long, value_enum, default_value = "ai")]
    engine: Engine,

    /// Fall back to heuristic matching when AI extraction fails
    #[arg(long)]
    fallback: bool,

    /// Reporting year for quarter-end date fallbacks (heuristic engine)
    #[arg(long)]
    year: Option<i32>,

    /// Reporting quarter (1-4) for quarter-end date fallbacks (heuristic engine)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=4))]
    quarter: Option<u8>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output (one row per investment)
    Csv,
    /// Plain text summary
    Text,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum Engine {
    /// AI-assisted extraction
    Ai,
    /// Regex-based heuristic extraction
    Heuristic,
}

pub async fn run(args: AnalyzeArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    // Load configuration
    let mut config = if let Some(path) = config_path {
        FolioConfig::from_file(std::path::Path::new(path))?
    } else {
        FolioConfig::default()
    };
    if args.fallback {
        config.extraction.fallback_to_heuristics = true;
    }

    // Check input file exists
    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let extension = args
        .input
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    if extension != "pdf" {
        anyhow::bail!("Unsupported file format: {}", extension);
    }

    info!("Processing report: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap(),
    );
    pb.set_message("Extracting report data...");

    let client = AnthropicClient::from_env(config.ai.clone());
    let pipeline = ExtractionPipeline::new(client, config);

    let report = match args.engine {
        Engine::Ai => pipeline.analyze_file(&args.input).await?,
        Engine::Heuristic => {
            let period = match (args.year, args.quarter) {
                (Some(year), Some(quarter)) => Some(ReportingPeriod { year, quarter }),
                _ => None,
            };
            pipeline.analyze_file_heuristic(&args.input, period)?
        }
    };

    pb.finish_with_message("Done");

    // Format output
    let output = format_report(&report, args.format)?;

    // Write output
    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    // Show summary
    println!();
    if report.success {
        println!("{} {}", style("✓").green(), report.message);
    } else {
        println!("{} {}", style("✗").red(), report.message);
        if let Some(error) = &report.error {
            println!("  {}", style(error).red());
        }
    }
    println!(
        "{} {} investments extracted in {:?}",
        style("ℹ").blue(),
        report.count,
        start.elapsed()
    );

    Ok(())
}

pub fn format_report(report: &AnalysisReport, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(report)?),
        OutputFormat::Csv => format_csv(report),
        OutputFormat::Text => Ok(format_text(report)),
    }
}

fn format_csv(report: &AnalysisReport) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["company_name", "investment_date", "cost", "current_value"])?;

    for investment in &report.investments {
        wtr.write_record([
            investment.company_name.clone(),
            investment
                .investment_date
                .map(|d| d.to_string())
                .unwrap_or_default(),
            investment.cost.to_string(),
            investment.current_value.to_string(),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(report: &AnalysisReport) -> String {
    let mut output = String::new();

    if let Some(fund) = &report.metadata.fund_name {
        output.push_str(&format!("Fund: {}\n", fund));
    }
    if let (Some(year), Some(quarter)) = (report.metadata.year, report.metadata.quarter) {
        output.push_str(&format!("Period: Q{} {}\n", quarter, year));
    }
    output.push('\n');

    output.push_str(&format!("Investments ({}):\n", report.count));
    for investment in &report.investments {
        let date = investment
            .investment_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());
        output.push_str(&format!(
            "  {}  {}  cost {}  value {}\n",
            investment.company_name, date, investment.cost, investment.current_value
        ));
    }

    let financials = &report.financials;
    if financials != &Default::default() {
        output.push('\n');
        output.push_str("Fund financials:\n");
        output.push_str(&format!(
            "  Capital commitments: {}\n",
            financials.capital_commitments
        ));
        output.push_str(&format!("  Management fees:     {}\n", financials.management_fees));
        output.push_str(&format!("  Operating costs:     {}\n", financials.operating_costs));
        output.push_str(&format!("  Formation costs:     {}\n", financials.formation_costs));
    }

    output
}
