//! Page command - one page of a document as a standalone PDF.

use std::path::PathBuf;

use clap::Args;
use console::style;
use tokio::io::AsyncWriteExt;
use tracing::info;

use holerite_core::PayslipProcessor;

use super::{load_config, read_input};

/// Arguments for the page command.
#[derive(Args)]
pub struct PageArgs {
    /// Input PDF file, or "-" to read from stdin
    #[arg(required = true)]
    input: PathBuf,

    /// Page number (1-based)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    index: u32,

    /// Output file (default: raw PDF bytes on stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Declared content type of the input (e.g. from an upload)
    #[arg(long)]
    content_type: Option<String>,
}

pub async fn run(args: PageArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let data = read_input(&args.input, args.content_type.as_deref()).await?;

    let processor = PayslipProcessor::with_config(config);
    let index = args.index;
    let page_pdf =
        tokio::task::spawn_blocking(move || processor.process_single_page(&data, index)).await??;

    info!("Page {} is {} bytes", args.index, page_pdf.len());

    if let Some(output_path) = &args.output {
        tokio::fs::write(output_path, &page_pdf).await?;
        println!(
            "{} Page {} written to {}",
            style("✓").green(),
            args.index,
            output_path.display()
        );
    } else {
        let mut stdout = tokio::io::stdout();
        stdout.write_all(&page_pdf).await?;
        stdout.flush().await?;
    }

    Ok(())
}
