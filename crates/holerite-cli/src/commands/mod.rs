//! Subcommands and the input handling they share.

pub mod config;
pub mod extract;
pub mod page;

use std::path::Path;

use tokio::io::AsyncReadExt;
use tracing::debug;

use holerite_core::models::config::HoleriteConfig;
use holerite_core::{is_pdf_content_type, HoleriteError};

/// Load configuration from `--config`, else the default file, else defaults.
pub fn load_config(config_path: Option<&str>) -> Result<HoleriteConfig, HoleriteError> {
    let path = match config_path {
        Some(path) => Path::new(path).to_path_buf(),
        None => {
            let default_path = config::default_config_path();
            if !default_path.exists() {
                return Ok(HoleriteConfig::default());
            }
            default_path
        }
    };

    debug!("Loading configuration from {}", path.display());
    HoleriteConfig::from_file(&path)
        .map_err(|e| HoleriteError::Config(format!("{}: {}", path.display(), e)))
}

/// Read document bytes from a file, or stdin when `input` is `-`.
///
/// A declared content type is checked first; absent means acceptable.
pub async fn read_input(input: &Path, content_type: Option<&str>) -> Result<Vec<u8>, HoleriteError> {
    if !is_pdf_content_type(content_type) {
        return Err(HoleriteError::UnsupportedContentType(
            content_type.unwrap_or_default().to_string(),
        ));
    }

    let data = if input == Path::new("-") {
        let mut data = Vec::new();
        tokio::io::stdin().read_to_end(&mut data).await?;
        data
    } else {
        if !input.exists() {
            return Err(HoleriteError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("input file not found: {}", input.display()),
            )));
        }
        tokio::fs::read(input).await?
    };

    debug!("Read {} bytes from {}", data.len(), input.display());
    Ok(data)
}
