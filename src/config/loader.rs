//! Configuration loading from disk.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::{ConfigDocument, ValidatedConfig};
use crate::config::validation::{validate, SchemaError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Validation failed: {0}")]
    Schema(#[from] SchemaError),
}

/// On-disk encoding of a configuration document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Toml,
}

impl DocumentFormat {
    /// Pick the format from the file extension. Anything but `.toml` is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => DocumentFormat::Toml,
            _ => DocumentFormat::Json,
        }
    }
}

/// Parse a document from a string without validating it.
pub fn parse_document(
    content: &str,
    format: DocumentFormat,
) -> Result<ConfigDocument, ConfigError> {
    let doc = match format {
        DocumentFormat::Json => serde_json::from_str(content)?,
        DocumentFormat::Toml => toml::from_str(content)?,
    };
    Ok(doc)
}

/// Read and parse a document from a file without validating it.
pub fn load_document(path: &Path) -> Result<ConfigDocument, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_document(&content, DocumentFormat::from_path(path))
}

/// Load and validate configuration from a file.
pub fn load_config(path: &Path) -> Result<ValidatedConfig, ConfigError> {
    let doc = load_document(path)?;
    Ok(validate(&doc)?)
}
