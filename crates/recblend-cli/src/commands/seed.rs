//! Seed command: write a synthetic movie dataset

use crate::error::{CliError, Result};
use crate::output;
use recblend::recommend::Dataset;
use std::fs;
use std::path::Path;
use tracing::info;

/// Run the seed command
pub(crate) fn run(seed: u64, density: f64, path: Option<&Path>) -> Result<()> {
    let data = Dataset::synthetic_movies(seed, density)?;
    let json = serde_json::to_string_pretty(&data)
        .map_err(|e| CliError::Recommend(e.to_string()))?;

    match path {
        Some(path) => {
            fs::write(path, json)?;
            info!(path = %path.display(), ratings = data.ratings.len(), "dataset written");
            output::success(&format!(
                "{} users, {} items, {} ratings -> {}",
                data.users.len(),
                data.items.len(),
                data.ratings.len(),
                path.display()
            ));
        }
        None => println!("{json}"),
    }
    Ok(())
}
