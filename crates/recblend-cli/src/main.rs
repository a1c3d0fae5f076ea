//! recblend - hybrid recommendations from the command line
//!
//! Usage:
//!   recblend seed --output movies.json            # Write a synthetic movie catalog
//!   recblend users --input movies.json            # List users and their rating counts
//!   recblend recommend -i movies.json -u alice    # Top-10 for alice
//!   recblend recommend -i movies.json -u alice --json --top-n 5 --rank energy:0.8

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod commands;
mod error;
mod output;

use commands::{recommend, seed, users};

/// recblend - hybrid SVD + item-similarity recommender
///
/// Loads users, items and ratings from a JSON dataset and ranks the
/// unrated items for one user.
#[derive(Parser)]
#[command(name = "recblend")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output (debug logs on stderr)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a synthetic movie dataset
    Seed {
        /// RNG seed; the same seed always yields the same dataset
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Probability that a user rated a given movie
        #[arg(long, default_value_t = recblend::recommend::DEFAULT_RATING_DENSITY)]
        density: f64,

        /// Write to FILE instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Recommend unrated items for a user
    Recommend {
        /// Dataset JSON file
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Target user id
        #[arg(short, long)]
        user: String,

        /// Number of recommendations (defaults to the config value)
        #[arg(short = 'n', long)]
        top_n: Option<usize>,

        /// Truncation rank: full, <k> or energy:<fraction>
        #[arg(long)]
        rank: Option<String>,

        /// Recommender config JSON file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// List users in a dataset
    Users {
        /// Dataset JSON file
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,
    },
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Seed {
            seed,
            density,
            output,
        } => seed::run(seed, density, output.as_deref()),
        Commands::Recommend {
            input,
            user,
            top_n,
            rank,
            config,
        } => recommend::run(&recommend::Options {
            input: &input,
            user: &user,
            top_n,
            rank: rank.as_deref(),
            config: config.as_deref(),
            json: cli.json,
        }),
        Commands::Users { input } => users::run(&input, cli.json),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            e.exit_code()
        }
    }
}
