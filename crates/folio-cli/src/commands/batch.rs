//! Batch command - analyze multiple report PDFs.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use rust_decimal::Decimal;
use tracing::{debug, error, warn};

use folio_core::models::config::FolioConfig;
use folio_core::{AnalysisReport, AnthropicClient, ExtractionPipeline, ReportingPeriod};

use super::analyze::{Engine, OutputFormat, format_report};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
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

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of analyzing a single file.
struct BatchResult {
    path: PathBuf,
    report: Option<AnalysisReport>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
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

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            ext.eq_ignore_ascii_case("pdf")
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching PDF files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} reports to analyze",
        style("ℹ").blue(),
        files.len()
    );

    // Create output directory if specified
    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    let client = AnthropicClient::from_env(config.ai.clone());
    let pipeline = ExtractionPipeline::new(client, config);

    let period = match (args.year, args.quarter) {
        (Some(year), Some(quarter)) => Some(ReportingPeriod { year, quarter }),
        _ => None,
    };

    let mut results = Vec::with_capacity(files.len());

    for path in files {
        let file_start = Instant::now();

        let outcome = match args.engine {
            Engine::Ai => pipeline.analyze_file(&path).await,
            Engine::Heuristic => pipeline.analyze_file_heuristic(&path, period),
        };

        let processing_time_ms = file_start.elapsed().as_millis() as u64;

        match outcome {
            Ok(report) => {
                results.push(BatchResult {
                    path: path.clone(),
                    report: Some(report),
                    error: None,
                    processing_time_ms,
                });
            }
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to analyze {}: {}", path.display(), error_msg);
                    results.push(BatchResult {
                        path: path.clone(),
                        report: None,
                        error: Some(error_msg),
                        processing_time_ms,
                    });
                } else {
                    error!("Failed to analyze {}: {}", path.display(), error_msg);
                    anyhow::bail!("Batch analysis failed: {}", error_msg);
                }
            }
        }

        pb.inc(1);
    }

    pb.finish_with_message("Complete");

    // Write per-file outputs
    if let Some(ref output_dir) = args.output_dir {
        for result in &results {
            let Some(report) = &result.report else { continue };

            let output_name = result
                .path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("report");

            let extension = match args.format {
                OutputFormat::Json => "json",
                OutputFormat::Csv => "csv",
                OutputFormat::Text => "txt",
            };

            let output_path = output_dir.join(format!("{}.{}", output_name, extension));
            fs::write(&output_path, format_report(report, args.format)?)?;
            debug!("Wrote output to {}", output_path.display());
        }
    }

    // Generate summary if requested
    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    // Print summary
    let successful = results
        .iter()
        .filter(|r| r.report.as_ref().is_some_and(|rep| rep.success))
        .count();
    let failed: Vec<_> = results
        .iter()
        .filter(|r| r.error.is_some() || r.report.as_ref().is_none_or(|rep| !rep.success))
        .collect();

    println!();
    println!(
        "{} Analyzed {} reports in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(successful).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed reports:").red());
        for result in &failed {
            let reason = result
                .error
                .clone()
                .or_else(|| result.report.as_ref().and_then(|rep| rep.error.clone()))
                .unwrap_or_else(|| "no investments extracted".to_string());
            println!("  - {}: {}", result.path.display(), reason);
        }
    }

    Ok(())
}

fn write_summary(path: &PathBuf, results: &[BatchResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "fund_name",
        "year",
        "quarter",
        "investments",
        "total_cost",
        "total_value",
        "processing_time_ms",
        "error",
    ])?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_string();

        match &result.report {
            Some(report) => {
                let total_cost: Decimal = report.investments.iter().map(|i| i.cost).sum();
                let total_value: Decimal =
                    report.investments.iter().map(|i| i.current_value).sum();

                wtr.write_record([
                    filename,
                    if report.success { "ok" } else { "failed" }.to_string(),
                    report.metadata.fund_name.clone().unwrap_or_default(),
                    report.metadata.year.map(|y| y.to_string()).unwrap_or_default(),
                    report
                        .metadata
                        .quarter
                        .map(|q| q.to_string())
                        .unwrap_or_default(),
                    report.count.to_string(),
                    total_cost.to_string(),
                    total_value.to_string(),
                    result.processing_time_ms.to_string(),
                    report.error.clone().unwrap_or_default(),
                ])?;
            }
            None => {
                wtr.write_record([
                    filename,
                    "error".to_string(),
                    String::new(),
                    String::new(),
                    String::new(),
                    "0".to_string(),
                    "0".to_string(),
                    "0".to_string(),
                    result.processing_time_ms.to_string(),
                    result.error.clone().unwrap_or_default(),
                ])?;
            }
        }
    }

    wtr.flush()?;
    Ok(())
}
