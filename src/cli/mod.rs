//! Command-line interface definitions.

pub mod analyze;
pub mod check;
pub mod odds;
pub mod output;
pub mod scan;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Config;
use crate::domain::AmericanOdds;
use crate::error::Result;

/// Sharpline - fair odds, +EV and arbitrage signals from sportsbook quotes.
#[derive(Parser, Debug)]
#[command(name = "sharpline")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, default_value = "config.toml")]
    pub config: PathBuf,

    /// Override log level (debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Use JSON log format instead of pretty
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze every event in a snapshot file and print its rows
    Analyze(AnalyzeArgs),

    /// Analyze many events in parallel and write rows as JSON lines
    Scan(ScanArgs),

    /// Odds calculator for one price or a two-sided pair
    Odds(OddsArgs),

    /// Run diagnostic checks
    #[command(subcommand)]
    Check(CheckCommand),
}

/// Subcommands for `sharpline check`
#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Validate configuration file
    Config,
}

/// Detector thresholds shared by `analyze` and `scan`.
#[derive(Parser, Debug, Default)]
pub struct DetectorArgs {
    /// Override minimum expected value for a +EV signal (0.02 = 2%)
    #[arg(long)]
    pub min_ev: Option<f64>,

    /// Override minimum number of bookmakers quoting an outcome
    #[arg(long)]
    pub min_bookmakers: Option<usize>,
}

/// Arguments for the `analyze` subcommand.
#[derive(Parser, Debug)]
pub struct AnalyzeArgs {
    /// Snapshot JSON file or directory of snapshot files
    pub file: PathBuf,

    /// Print rows as JSON lines instead of a table
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub detector: DetectorArgs,
}

/// Arguments for the `scan` subcommand.
#[derive(Parser, Debug)]
pub struct ScanArgs {
    /// Snapshot JSON file or directory of snapshot files
    #[arg(short, long)]
    pub input: PathBuf,

    /// Destination for JSON lines output
    #[arg(short, long)]
    pub output: PathBuf,

    /// Override number of events analyzed at the same time
    #[arg(long)]
    pub concurrency: Option<usize>,

    #[command(flatten)]
    pub detector: DetectorArgs,
}

/// Arguments for the `odds` subcommand.
#[derive(Parser, Debug)]
pub struct OddsArgs {
    /// American price, e.g. -110 or +130
    #[arg(allow_negative_numbers = true)]
    pub price: AmericanOdds,

    /// Price of the opposite side of the same market
    #[arg(allow_negative_numbers = true)]
    pub counter: Option<AmericanOdds>,

    /// Fair win probability to price against (0 < p < 1)
    #[arg(long)]
    pub fair: Option<f64>,
}

impl Cli {
    /// Load configuration and apply global and detector overrides.
    ///
    /// A missing file at the default path falls back to defaults.
    pub fn load_config(&self, detector: &DetectorArgs) -> Result<Config> {
        let mut config = Config::load_or_default(&self.config)?;

        if let Some(ref level) = self.log_level {
            config.logging.level = level.clone();
        }
        if self.json_logs {
            config.logging.format = "json".to_string();
        }
        if let Some(min_ev) = detector.min_ev {
            config.detector.min_ev = min_ev;
        }
        if let Some(min_bookmakers) = detector.min_bookmakers {
            config.detector.min_bookmakers = min_bookmakers;
        }

        config.validate()?;
        Ok(config)
    }
}
