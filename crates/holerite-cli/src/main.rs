//! CLI application for payslip PDF extraction.

mod commands;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use console::style;
use holerite_core::HoleriteError;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{config, extract, page};

/// Payslip extraction - pull name, CPF and net pay out of every page of a payslip PDF
#[derive(Parser)]
#[command(name = "holerite")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract fields and single-page PDFs from every page
    Extract(extract::ExtractArgs),

    /// Write one page of a document as a standalone PDF
    Page(page::PageArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to install logger: {}", e);
    }

    // Execute command
    let result = match cli.command {
        Commands::Extract(args) => extract::run(args, cli.config.as_deref()).await,
        Commands::Page(args) => page::run(args, cli.config.as_deref()).await,
        Commands::Config(args) => config::run(args).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {:#}", style("✗").red(), err);
            let code = err
                .downcast_ref::<HoleriteError>()
                .map(|e| e.kind().exit_code())
                .unwrap_or(1);
            ExitCode::from(code as u8)
        }
    }
}
