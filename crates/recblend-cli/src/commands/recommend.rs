//! Recommend command: rank unrated items for one user

use super::read_json;
use crate::error::{CliError, Result};
use crate::output;
use recblend::recommend::{Dataset, HybridRecommender, RankPolicy, RecommenderConfig};
use std::path::Path;
use tracing::debug;

/// Parsed arguments of `recblend recommend`
pub(crate) struct Options<'a> {
    pub(crate) input: &'a Path,
    pub(crate) user: &'a str,
    pub(crate) top_n: Option<usize>,
    pub(crate) rank: Option<&'a str>,
    pub(crate) config: Option<&'a Path>,
    pub(crate) json: bool,
}

/// Run the recommend command
pub(crate) fn run(opts: &Options<'_>) -> Result<()> {
    let config = resolve_config(opts)?;
    let recommender = HybridRecommender::new(config)?;
    let data: Dataset = read_json(opts.input)?;
    debug!(?config, "recommender configured");

    let recs = recommender.recommend(opts.user, &data.users, &data.items, &data.ratings)?;

    if opts.json {
        let text = output::recommendations_json(&recs)
            .map_err(|e| CliError::Recommend(e.to_string()))?;
        println!("{text}");
    } else {
        output::recommendations_table(opts.user, &recs, &data);
    }
    Ok(())
}

/// Config file first, then command-line overrides.
fn resolve_config(opts: &Options<'_>) -> Result<RecommenderConfig> {
    let mut config = match opts.config {
        Some(path) => read_json(path)?,
        None => RecommenderConfig::default(),
    };
    if let Some(rank) = opts.rank {
        config = config.with_rank(rank.parse::<RankPolicy>()?);
    }
    if let Some(top_n) = opts.top_n {
        config = config.with_top_n(top_n);
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options<'a>(rank: Option<&'a str>, top_n: Option<usize>) -> Options<'a> {
        Options {
            input: Path::new("unused.json"),
            user: "alice",
            top_n,
            rank,
            config: None,
            json: false,
        }
    }

    #[test]
    fn test_defaults_without_overrides() {
        let config = resolve_config(&options(None, None)).expect("defaults");
        assert_eq!(config, RecommenderConfig::default());
    }

    #[test]
    fn test_overrides_applied() {
        let config = resolve_config(&options(Some("energy:0.5"), Some(3))).expect("valid");
        assert_eq!(config.rank, RankPolicy::Energy(0.5));
        assert_eq!(config.top_n, 3);
    }

    #[test]
    fn test_bad_rank_is_invalid_input() {
        let err = resolve_config(&options(Some("lots"), None)).unwrap_err();
        assert!(matches!(err, CliError::InvalidInput(_)));
    }
}
