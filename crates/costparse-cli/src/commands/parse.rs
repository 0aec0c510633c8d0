//! Parse command - extract cost records from a single document.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use costparse_core::{CostParseConfig, CostParser, CustomerMatcher, StyleOverride};

use super::input::{load_document, load_registry};
use super::output::{format_result, OutputFormat};

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Input file (.txt with form-feed page breaks, or .json with a "pages" array)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
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
}

/// Build the registry matcher if matching is enabled and a registry is known.
pub(super) fn build_matcher(
    customers: Option<&PathBuf>,
    no_match: bool,
    config: &CostParseConfig,
) -> anyhow::Result<Option<CustomerMatcher>> {
    if no_match || !config.matching.enabled {
        return Ok(None);
    }

    let Some(path) = customers.or(config.matching.registry.as_ref()) else {
        return Ok(None);
    };

    let registry = load_registry(path)?;
    let matcher = CustomerMatcher::new(&registry);
    debug!("Matcher holds {} usable registry names", matcher.len());
    Ok(Some(matcher))
}

pub async fn run(args: ParseArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;

    info!("Parsing file: {}", args.input.display());

    let pages = load_document(&args.input, &config.extraction.page_separator)?;
    let style_override = args.style.unwrap_or(config.extraction.style);
    let parser = CostParser::from_config(&config.extraction);

    let result = match build_matcher(args.customers.as_ref(), args.no_match, &config)? {
        Some(matcher) => parser.parse_and_match(&pages, style_override, &matcher),
        None => parser.parse_pages(&pages, style_override),
    };

    let output = format_result(&result, args.format, config.output.pretty)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Wrote {} {} records to {}",
            style("✓").green(),
            result.item_count(),
            result.style,
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}
