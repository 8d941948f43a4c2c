//! Extract command - fields and single-page PDFs for every page of a document.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use holerite_core::payslip::rules::{format_cpf, FIELD_RULES};
use holerite_core::{ExtractionReport, PayslipProcessor};

use super::{load_config, read_input};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input PDF file, or "-" to read from stdin
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Also write each page's standalone PDF into this directory
    #[arg(long)]
    pages_dir: Option<PathBuf>,

    /// Declared content type of the input (e.g. from an upload)
    #[arg(long)]
    content_type: Option<String>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON array, one object per page, page PDFs in base64
    Json,
    /// CSV with one row per page (no page PDFs)
    Csv,
    /// Plain text summary
    Text,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;
    let data = read_input(&args.input, args.content_type.as_deref()).await?;

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {msg}")?
            .progress_chars("##-"),
    );
    pb.set_message("Loading PDF...");

    let processor = PayslipProcessor::with_config(config);
    let progress = pb.clone();
    let report = tokio::task::spawn_blocking(move || {
        processor.process_with_progress(&data, |page, total| {
            progress.set_length(total as u64);
            progress.set_position(page as u64);
            progress.set_message(format!("Page {}/{}", page, total));
        })
    })
    .await?;

    let report = match report {
        Ok(report) => {
            pb.finish_with_message("Done");
            report
        }
        Err(e) => {
            pb.abandon();
            return Err(e.into());
        }
    };

    if let Some(dir) = &args.pages_dir {
        write_pages(&report, dir).await?;
    }

    let output = format_report(&report, args.format, args.pretty)?;

    if let Some(output_path) = &args.output {
        tokio::fs::write(output_path, &output).await?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Write `page-<n>.pdf` for every page whose split succeeded.
async fn write_pages(report: &ExtractionReport, dir: &Path) -> anyhow::Result<()> {
    tokio::fs::create_dir_all(dir).await?;

    let mut written = 0;
    for page in report {
        if page.page_document.is_empty() {
            continue;
        }
        let path = dir.join(format!("page-{}.pdf", page.page_number));
        tokio::fs::write(&path, &page.page_document).await?;
        written += 1;
    }

    info!("Wrote {} page PDFs to {}", written, dir.display());
    Ok(())
}

fn format_report(report: &ExtractionReport, format: OutputFormat, pretty: bool) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json if pretty => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Json => Ok(serde_json::to_string(report)?),
        OutputFormat::Csv => format_csv(report),
        OutputFormat::Text => Ok(format_text(report)),
    }
}

fn format_csv(report: &ExtractionReport) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    let mut header = vec!["page"];
    header.extend(FIELD_RULES.iter().map(|rule| rule.field.key()));
    wtr.write_record(&header)?;

    for page in report {
        wtr.write_record([
            page.page_number.to_string(),
            page.fields.name.clone(),
            page.fields.tax_id.clone(),
            page.fields
                .net_value
                .map(|v| v.to_string())
                .unwrap_or_default(),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(report: &ExtractionReport) -> String {
    let mut output = String::new();

    for page in report {
        output.push_str(&format!("Page {}:\n", page.page_number));
        output.push_str(&format!("  Name:    {}\n", or_dash(&page.fields.name)));
        output.push_str(&format!("  CPF:     {}\n", or_dash(&format_cpf(&page.fields.tax_id))));
        match page.fields.net_value {
            Some(value) => output.push_str(&format!("  Net pay: R$ {}\n", value)),
            None => output.push_str("  Net pay: -\n"),
        }
        if page.page_document.is_empty() {
            output.push_str("  Page PDF: unavailable\n");
        }
        for warning in &page.warnings {
            output.push_str(&format!("  ! {}\n", warning));
        }
    }

    output
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}

#[cfg(test)]
mod tests {
    use super::*;
    use holerite_core::{PageFields, PageResult};

    fn report(tax_id: &str) -> ExtractionReport {
        let mut report = ExtractionReport::new();
        report.push(PageResult {
            page_number: 1,
            fields: PageFields {
                name: "ANA".to_string(),
                tax_id: tax_id.to_string(),
                net_value: None,
            },
            page_document: Vec::new(),
            warnings: vec!["split failed: disk full".to_string()],
        });
        report
    }

    #[test]
    fn test_text_shows_cpf_punctuated() {
        let text = format_text(&report("52998224725"));
        assert!(text.contains("  CPF:     529.982.247-25\n"));
        assert!(text.contains("  Net pay: -\n"));
        assert!(text.contains("  Page PDF: unavailable\n"));
        assert!(text.contains("  ! split failed: disk full\n"));
    }

    #[test]
    fn test_text_keeps_unusual_cpf_as_captured() {
        let text = format_text(&report("123.456"));
        assert!(text.contains("  CPF:     123.456\n"));
    }

    #[test]
    fn test_csv_header_uses_wire_keys() {
        let csv = format_csv(&report("")).unwrap();
        assert_eq!(csv.lines().next(), Some("page,nome,cpf,valor_liquido"));
        assert_eq!(csv.lines().nth(1), Some("1,ANA,,"));
    }
}
