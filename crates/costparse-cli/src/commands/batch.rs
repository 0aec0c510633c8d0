//! Batch command - parse many documents at once.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use costparse_core::{CostParser, ParseResult, StyleOverride};

use super::input::{is_supported, load_document};
use super::output::{format_result, OutputFormat};
use super::parse::build_matcher;

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Document layout: auto, new or old
    #[arg(long)]
    style: Option<StyleOverride>,

    /// Customer registry JSON file
    #[arg(long)]
    customers: Option<PathBuf>,

    /// Skip customer matching
    #[arg(long)]
    no_match: bool,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

const PROGRESS_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files {msg}";

/// Outcome for a single input file.
struct FileOutcome {
    path: PathBuf,
    result: Option<ParseResult>,
    error: Option<String>,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| is_supported(p))
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to parse",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(PROGRESS_TEMPLATE)?
            .progress_chars("=>-"),
    );

    // Reading is sequential; parsing below runs across all cores.
    let mut loaded: Vec<(PathBuf, Vec<String>)> = Vec::with_capacity(files.len());
    let mut outcomes: Vec<FileOutcome> = Vec::new();

    for path in files {
        match load_document(&path, &config.extraction.page_separator) {
            Ok(pages) => loaded.push((path, pages)),
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to read {}: {}", path.display(), error_msg);
                    outcomes.push(FileOutcome {
                        path,
                        result: None,
                        error: Some(error_msg),
                    });
                } else {
                    error!("Failed to read {}: {}", path.display(), error_msg);
                    anyhow::bail!("Batch failed: {}", error_msg);
                }
            }
        }
        pb.inc(1);
    }

    pb.finish_with_message("Loaded");

    let parser = CostParser::from_config(&config.extraction);
    let matcher = build_matcher(args.customers.as_ref(), args.no_match, &config)?;
    let style_override = args.style.unwrap_or(config.extraction.style);

    let (paths, documents): (Vec<PathBuf>, Vec<Vec<String>>) = loaded.into_iter().unzip();
    let results = parser.parse_documents(&documents, style_override, matcher.as_ref());

    for (path, result) in paths.into_iter().zip(results) {
        outcomes.push(FileOutcome {
            path,
            result: Some(result),
            error: None,
        });
    }
    outcomes.sort_by(|a, b| a.path.cmp(&b.path));

    if let Some(output_dir) = &args.output_dir {
        let mut written: HashSet<PathBuf> = HashSet::new();

        for outcome in outcomes.iter_mut() {
            let Some(result) = &outcome.result else {
                continue;
            };

            let output_path = output_path_for(output_dir, &outcome.path, args.format);
            let write = if written.insert(output_path.clone()) {
                write_output(&output_path, result, args.format, config.output.pretty)
            } else {
                Err(anyhow::anyhow!(
                    "Output {} was already written for another input",
                    output_path.display()
                ))
            };

            if let Err(e) = write {
                let error_msg = e.to_string();
                if !args.continue_on_error {
                    error!("Failed to write {}: {}", outcome.path.display(), error_msg);
                    anyhow::bail!("Batch failed: {}", error_msg);
                }
                warn!("Failed to write {}: {}", outcome.path.display(), error_msg);
                outcome.result = None;
                outcome.error = Some(error_msg);
            }
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &outcomes)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let successful = outcomes.iter().filter(|o| o.result.is_some()).count();
    let failed: Vec<&FileOutcome> = outcomes.iter().filter(|o| o.error.is_some()).collect();
    let records: usize = outcomes
        .iter()
        .filter_map(|o| o.result.as_ref())
        .map(|r| r.item_count())
        .sum();

    println!();
    println!(
        "{} Parsed {} files into {} records in {:?}",
        style("✓").green(),
        outcomes.len(),
        records,
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(successful).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for outcome in &failed {
            println!(
                "  - {}: {}",
                outcome.path.display(),
                outcome.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

/// Output path for an input: its full file name plus the format extension,
/// so `a.txt` and `a.json` land in `a.txt.json` and `a.json.json`.
fn output_path_for(output_dir: &Path, input: &Path, format: OutputFormat) -> PathBuf {
    let name = input
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("document");
    output_dir.join(format!("{}.{}", name, format.extension()))
}

fn write_output(
    output_path: &Path,
    result: &ParseResult,
    format: OutputFormat,
    pretty: bool,
) -> anyhow::Result<()> {
    fs::write(output_path, format_result(result, format, pretty)?)?;
    debug!("Wrote output to {}", output_path.display());
    Ok(())
}

fn write_summary(path: &Path, outcomes: &[FileOutcome]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(["file", "status", "style", "item_count", "matched_count", "error"])?;

    for outcome in outcomes {
        let filename = outcome
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");

        if let Some(result) = &outcome.result {
            wtr.write_record([
                filename,
                "success",
                result.style.as_str(),
                &result.item_count().to_string(),
                &result.matched_count().to_string(),
                "",
            ])?;
        } else {
            wtr.write_record([
                filename,
                "error",
                "",
                "",
                "",
                outcome.error.as_deref().unwrap_or(""),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
