//! Bookmaker quotes and their per-bookmaker fair values.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::ids::{BookmakerId, EventId, LineId};
use super::odds::AmericanOdds;
use super::outcome::Outcome;

/// One bookmaker's price for one outcome of one line at one event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    pub event_id: EventId,
    pub market_key: String,
    pub line_id: LineId,
    pub bookmaker: BookmakerId,
    pub label: String,
    /// Structured outcome, `None` when no counterpart rule applies.
    pub outcome: Option<Outcome>,
    pub price: AmericanOdds,
    /// Market update time reported by the bookmaker, when present.
    pub last_updated_at: Option<DateTime<Utc>>,
}

/// A quote after pairing: its counterpart label and the bookmaker's
/// vig-free probability for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FairQuote {
    #[serde(flatten)]
    pub quote: Quote,
    /// Label of the opposite outcome, when resolvable.
    pub counterpart: Option<String>,
    /// Vig-free probability at this bookmaker; unset when the bookmaker
    /// does not quote the counterpart.
    pub no_vig_probability: Option<f64>,
}
