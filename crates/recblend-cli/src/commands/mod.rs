//! Subcommand implementations

pub(crate) mod recommend;
pub(crate) mod seed;
pub(crate) mod users;

use crate::error::{CliError, Result};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Reject missing paths and directories before reading.
pub(crate) fn validate_path(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(CliError::FileNotFound(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(CliError::InvalidInput(format!(
            "not a file: {}",
            path.display()
        )));
    }
    Ok(())
}

/// Read and deserialize a JSON document.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    validate_path(path)?;
    let text = fs::read_to_string(path)?;
    debug!(path = %path.display(), bytes = text.len(), "read json");
    serde_json::from_str(&text)
        .map_err(|e| CliError::InvalidInput(format!("{}: {e}", path.display())))
}
