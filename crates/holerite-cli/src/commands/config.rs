//! Config command - inspect and edit the configuration file.

use std::path::{Path, PathBuf};

use clap::{Args, Subcommand, ValueEnum};
use console::style;

use holerite_core::models::config::HoleriteConfig;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the effective configuration as JSON
    Show,

    /// Write a configuration file with default values
    Init {
        /// Where to write the file (default: the user config directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print one setting
    Get { key: ConfigKey },

    /// Change one setting in the default configuration file
    Set {
        key: ConfigKey,
        /// "true" or "false"
        value: String,
    },

    /// Print the default configuration file location
    Path,
}

/// Every setting the configuration file holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ConfigKey {
    #[value(name = "pdf.decrypt_with_empty_password")]
    DecryptWithEmptyPassword,
    #[value(name = "pdf.strip_outlines")]
    StripOutlines,
    #[value(name = "extraction.text_fallback")]
    TextFallback,
    #[value(name = "extraction.validate_cpf")]
    ValidateCpf,
}

impl ConfigKey {
    fn flag_mut(self, config: &mut HoleriteConfig) -> &mut bool {
        match self {
            ConfigKey::DecryptWithEmptyPassword => &mut config.pdf.decrypt_with_empty_password,
            ConfigKey::StripOutlines => &mut config.pdf.strip_outlines,
            ConfigKey::TextFallback => &mut config.extraction.text_fallback,
            ConfigKey::ValidateCpf => &mut config.extraction.validate_cpf,
        }
    }

    fn flag(self, config: &HoleriteConfig) -> bool {
        match self {
            ConfigKey::DecryptWithEmptyPassword => config.pdf.decrypt_with_empty_password,
            ConfigKey::StripOutlines => config.pdf.strip_outlines,
            ConfigKey::TextFallback => config.extraction.text_fallback,
            ConfigKey::ValidateCpf => config.extraction.validate_cpf,
        }
    }

    fn name(self) -> String {
        self.to_possible_value()
            .map(|v| v.get_name().to_string())
            .unwrap_or_default()
    }
}

pub async fn run(args: ConfigArgs) -> anyhow::Result<()> {
    let path = default_config_path();
    match args.command {
        ConfigCommand::Show => show(&path),
        ConfigCommand::Init { output, force } => init(output.unwrap_or(path), force),
        ConfigCommand::Get { key } => {
            println!("{}", key.flag(&read_or_default(&path)?));
            Ok(())
        }
        ConfigCommand::Set { key, value } => set(&path, key, &value),
        ConfigCommand::Path => show_path(&path),
    }
}

/// `<config_dir>/holerite/config.json`, or `./holerite/config.json` when the
/// platform has no config directory.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("holerite")
        .join("config.json")
}

fn read_or_default(path: &Path) -> anyhow::Result<HoleriteConfig> {
    if path.exists() {
        Ok(HoleriteConfig::from_file(path)?)
    } else {
        Ok(HoleriteConfig::default())
    }
}

fn write(path: &Path, config: &HoleriteConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    config.save(path)?;
    Ok(())
}

fn show(path: &Path) -> anyhow::Result<()> {
    if !path.exists() {
        eprintln!("{} {} not found, using defaults", style("ℹ").blue(), path.display());
    }
    println!("{}", serde_json::to_string_pretty(&read_or_default(path)?)?);
    Ok(())
}

fn init(path: PathBuf, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("{} already exists (use --force to replace it)", path.display());
    }

    write(&path, &HoleriteConfig::default())?;
    println!("{} Wrote defaults to {}", style("✓").green(), path.display());
    Ok(())
}

fn set(path: &Path, key: ConfigKey, value: &str) -> anyhow::Result<()> {
    let value: bool = value
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("{} takes true or false, got {:?}", key.name(), value))?;

    let mut config = read_or_default(path)?;
    *key.flag_mut(&mut config) = value;
    write(path, &config)?;

    println!("{} {} = {}", style("✓").green(), key.name(), value);
    Ok(())
}

fn show_path(path: &Path) -> anyhow::Result<()> {
    let status = if path.exists() {
        style("exists").green()
    } else {
        style("not created, run 'holerite config init'").yellow()
    };
    println!("{} ({})", path.display(), status);
    Ok(())
}
