//! Users command: list the users of a dataset

use super::read_json;
use crate::error::{CliError, Result};
use crate::output;
use recblend::recommend::Dataset;
use std::path::Path;

/// Run the users command
pub(crate) fn run(input: &Path, json: bool) -> Result<()> {
    let data: Dataset = read_json(input)?;

    if json {
        let ids: Vec<&str> = data.users.iter().map(|u| u.id.as_str()).collect();
        let text =
            serde_json::to_string_pretty(&ids).map_err(|e| CliError::Recommend(e.to_string()))?;
        println!("{text}");
        return Ok(());
    }

    output::section(&format!("Users ({})", data.users.len()));
    for user in &data.users {
        let count = data.ratings.iter().filter(|r| r.user_id == user.id).count();
        output::kv(&user.id, format!("{count} ratings"));
    }
    Ok(())
}
