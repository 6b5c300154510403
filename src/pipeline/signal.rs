//! Expected-value and arbitrage signals on aggregated rows.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::aggregate::AggregatedOutcome;
use crate::domain::{
    arbitrage_profit, arbitrage_stake_split, break_even_price, expected_value, is_arbitrage,
    AmericanOdds, BookmakerId, LineId,
};

/// Configuration for signal detection.
#[derive(Debug, Clone, Deserialize)]
pub struct DetectorConfig {
    /// Minimum expected value per unit staked for a positive-EV signal.
    #[serde(default = "default_min_ev")]
    pub min_ev: f64,

    /// Minimum number of bookmakers behind a row's fair probability.
    #[serde(default = "default_min_bookmakers")]
    pub min_bookmakers: usize,

    /// Only report arbitrage when at least one positive-EV row exists.
    #[serde(default = "default_arbitrage_requires_positive_ev")]
    pub arbitrage_requires_positive_ev: bool,
}

const fn default_min_ev() -> f64 {
    0.0
}

const fn default_min_bookmakers() -> usize {
    1
}

const fn default_arbitrage_requires_positive_ev() -> bool {
    true
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            min_ev: default_min_ev(),
            min_bookmakers: default_min_bookmakers(),
            arbitrage_requires_positive_ev: default_arbitrage_requires_positive_ev(),
        }
    }
}

/// Stake allocation that locks in profit across two books.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ArbitragePlan {
    /// Share of bankroll on this outcome.
    pub stake: f64,
    /// Share of bankroll on the counterpart.
    pub counterpart_stake: f64,
    /// Net profit per unit bankroll if this outcome wins.
    pub profit_if_win: f64,
    /// Net profit per unit bankroll if the counterpart wins.
    pub profit_if_counterpart_wins: f64,
}

/// An aggregated row with its derived signals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedOutcomeRow {
    #[serde(flatten)]
    pub aggregate: AggregatedOutcome,
    pub min_price_for_positive_ev: Option<AmericanOdds>,
    pub ev_pct: Option<f64>,
    pub counterpart_best_price: Option<AmericanOdds>,
    pub counterpart_bookmaker: Option<BookmakerId>,
    pub is_arbitrage: bool,
    pub arbitrage: Option<ArbitragePlan>,
}

impl AggregatedOutcomeRow {
    /// Whether this row clears the positive-EV thresholds.
    #[must_use]
    pub fn is_positive_ev(&self, config: &DetectorConfig) -> bool {
        self.aggregate.num_bookmakers >= config.min_bookmakers
            && self.ev_pct.is_some_and(|ev| ev > config.min_ev)
    }
}

/// Derive EV and arbitrage fields for every row of one event.
///
/// Each row is joined to the row for its counterpart on the same line to
/// find the best opposing price, which may sit at a different bookmaker.
pub fn detect(rows: Vec<AggregatedOutcome>) -> Vec<AggregatedOutcomeRow> {
    // Keyed by (line, outcome, counterpart) so a row only joins a row that
    // names it back as its counterpart.
    let best_by_outcome: HashMap<(&LineId, &str, &str), (AmericanOdds, &BookmakerId)> = rows
        .iter()
        .filter_map(|r| {
            let counterpart = r.counterpart.as_deref()?;
            Some((
                (&r.line_id, r.outcome.as_str(), counterpart),
                (r.best_price, &r.bookmaker_with_best_price),
            ))
        })
        .collect();

    let derived: Vec<_> = rows
        .iter()
        .map(|row| {
            let min_price = row.avg_no_vig_prob.and_then(|p| match break_even_price(p) {
                Ok(price) => Some(price),
                Err(e) => {
                    debug!(line = %row.line_id, outcome = %row.outcome, error = %e, "No break-even price");
                    None
                }
            });
            let ev = row
                .avg_no_vig_prob
                .map(|p| expected_value(row.best_price, p));

            let counter = row
                .counterpart
                .as_deref()
                .and_then(|c| best_by_outcome.get(&(&row.line_id, c, row.outcome.as_str())))
                .map(|(price, book)| (*price, (*book).clone()));

            let arbitrage = counter.as_ref().and_then(|(price, _)| {
                is_arbitrage(row.best_price, *price).then(|| {
                    let (stake, counterpart_stake) = arbitrage_stake_split(row.best_price, *price);
                    let (profit_if_win, profit_if_counterpart_wins) =
                        arbitrage_profit(row.best_price, stake, *price, counterpart_stake);
                    ArbitragePlan {
                        stake,
                        counterpart_stake,
                        profit_if_win,
                        profit_if_counterpart_wins,
                    }
                })
            });

            (min_price, ev, counter, arbitrage)
        })
        .collect();

    rows.into_iter()
        .zip(derived)
        .map(|(aggregate, (min_price, ev, counter, arbitrage))| {
            let (counterpart_best_price, counterpart_bookmaker) = counter.unzip();
            AggregatedOutcomeRow {
                aggregate,
                min_price_for_positive_ev: min_price,
                ev_pct: ev,
                counterpart_best_price,
                counterpart_bookmaker,
                is_arbitrage: arbitrage.is_some(),
                arbitrage,
            }
        })
        .collect()
}

/// What a caller should act on after one detection pass.
#[derive(Debug, Clone, PartialEq)]
pub enum Opportunities<'a> {
    /// No row cleared the positive-EV bar.
    None,
    Found {
        positive_ev: Vec<&'a AggregatedOutcomeRow>,
        arbitrage: Vec<&'a AggregatedOutcomeRow>,
    },
}

impl<'a> Opportunities<'a> {
    /// Partition rows into positive-EV and arbitrage views.
    ///
    /// With `arbitrage_requires_positive_ev` set, an event without any
    /// positive-EV row reports nothing, arbitrage included.
    pub fn classify(rows: &'a [AggregatedOutcomeRow], config: &DetectorConfig) -> Self {
        let positive_ev: Vec<_> = rows.iter().filter(|r| r.is_positive_ev(config)).collect();
        let arbitrage: Vec<_> = rows.iter().filter(|r| r.is_arbitrage).collect();

        if positive_ev.is_empty() && (config.arbitrage_requires_positive_ev || arbitrage.is_empty()) {
            return Self::None;
        }

        Self::Found {
            positive_ev,
            arbitrage,
        }
    }

    /// True when nothing was found.
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Positive-EV rows.
    #[must_use]
    pub fn positive_ev(&self) -> &[&'a AggregatedOutcomeRow] {
        match self {
            Self::None => &[],
            Self::Found { positive_ev, .. } => positive_ev,
        }
    }

    /// Arbitrage rows.
    #[must_use]
    pub fn arbitrage(&self) -> &[&'a AggregatedOutcomeRow] {
        match self {
            Self::None => &[],
            Self::Found { arbitrage, .. } => arbitrage,
        }
    }
}
