//! Rendering parse results as JSON, CSV or a plain-text summary.

use costparse_core::{ParseResult, ParsedCostItem};

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output, one row per record
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    /// File extension for written outputs.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

const CSV_HEADER: [&str; 18] = [
    "style",
    "customer_name",
    "retail_customer",
    "legal_name",
    "org_name",
    "matched_customer_id",
    "location",
    "ordered_by",
    "amount",
    "currency",
    "invoice_number",
    "order_number",
    "description",
    "serial_number",
    "contract_start",
    "contract_end",
    "due_date",
    "raw_text",
];

pub fn format_result(
    result: &ParseResult,
    format: OutputFormat,
    pretty: bool,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json if pretty => Ok(serde_json::to_string_pretty(result)?),
        OutputFormat::Json => Ok(serde_json::to_string(result)?),
        OutputFormat::Csv => format_csv(&result.items),
        OutputFormat::Text => Ok(format_text(result)),
    }
}

fn opt(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

fn format_csv(items: &[ParsedCostItem]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(CSV_HEADER)?;

    for item in items {
        wtr.write_record([
            item.style.as_str(),
            opt(&item.customer_name),
            opt(&item.retail_customer),
            opt(&item.legal_name),
            opt(&item.org_name),
            opt(&item.matched_customer_id),
            opt(&item.location),
            opt(&item.ordered_by),
            &item.amount.map(|a| a.to_string()).unwrap_or_default(),
            &item.currency,
            opt(&item.invoice_number),
            opt(&item.order_number),
            opt(&item.description),
            opt(&item.serial_number),
            &item.contract_start.map(|d| d.to_string()).unwrap_or_default(),
            &item.contract_end.map(|d| d.to_string()).unwrap_or_default(),
            &item.due_date.map(|d| d.to_string()).unwrap_or_default(),
            &item.raw_text,
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(result: &ParseResult) -> String {
    let mut output = String::new();

    output.push_str(&format!("Style: {}\n", result.style));
    output.push_str(&format!(
        "Records: {} ({} matched)\n",
        result.item_count(),
        result.matched_count()
    ));

    for (i, item) in result.items.iter().enumerate() {
        output.push('\n');
        output.push_str(&format!(
            "#{} {}\n",
            i + 1,
            item.customer_name.as_deref().unwrap_or("(unknown customer)")
        ));
        if let Some(id) = &item.matched_customer_id {
            output.push_str(&format!("  Customer id: {}\n", id));
        }
        if let Some(location) = &item.location {
            output.push_str(&format!("  Location: {}\n", location));
        }
        if let Some(amount) = item.amount {
            output.push_str(&format!("  Amount: {} {}\n", amount, item.currency));
        }
        if let Some(description) = &item.description {
            output.push_str(&format!("  Description: {}\n", description));
        }
        if let Some(serial) = &item.serial_number {
            output.push_str(&format!("  Serial: {}\n", serial));
        }
        if let (Some(start), Some(end)) = (item.contract_start, item.contract_end) {
            output.push_str(&format!("  Contract: {} to {}\n", start, end));
        }
        if let Some(due) = item.due_date {
            output.push_str(&format!("  Due: {}\n", due));
        }
    }

    output
}
