//! Sharpline - fair odds, +EV and arbitrage signals from sportsbook quotes.
//!
//! This crate turns per-event snapshots of bookmaker quotes (moneylines,
//! spreads, totals, binary props) into one row per outcome per line with
//! de-vigged fair probabilities, best available price, expected value,
//! break-even price and cross-book arbitrage flags.
//!
//! # Pipeline
//!
//! Each event goes through four pure stages:
//!
//! - **ingest** - flatten the raw snapshot into validated [`domain::Quote`]s
//! - **pair** - remove the vig from each two-sided line at each bookmaker
//! - **aggregate** - collapse bookmakers per outcome, keeping the best price
//! - **detect** - derive EV, break-even price and arbitrage per row
//!
//! # Modules
//!
//! - [`domain`] - Odds math, outcomes, events and identifiers
//! - [`pipeline`] - The per-event stages and [`pipeline::analyze_event`]
//! - [`source`] - Snapshot sources and the provider data shape
//! - [`scan`] - Parallel multi-event scans with cancellation
//! - [`config`] - Configuration loading from TOML files
//! - [`error`] - Error types for the crate
//! - [`cli`] - The `sharpline` command-line interface
//!
//! # Example
//!
//! ```
//! use sharpline::domain::{no_vig_probabilities, AmericanOdds};
//!
//! let home = AmericanOdds::try_new(-150).unwrap();
//! let away = AmericanOdds::try_new(130).unwrap();
//! let (p_home, p_away) = no_vig_probabilities(home, away);
//! assert!((p_home + p_away - 1.0).abs() < 1e-12);
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod pipeline;
pub mod scan;
pub mod source;
