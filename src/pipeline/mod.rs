//! The per-event pipeline: ingest, pair, aggregate, detect.
//!
//! One call to [`analyze_event`] turns one raw snapshot into flagged rows.
//! It is synchronous, owns all of its data, and shares nothing with other
//! runs, so events can be analyzed in parallel freely.

mod aggregate;
mod ingest;
mod pairing;
mod signal;

pub use aggregate::{aggregate, AggregatedOutcome};
pub use ingest::{ingest, Ingested};
pub use pairing::{devig_pair, pair_quotes, PairingReport};
pub use signal::{detect, AggregatedOutcomeRow, ArbitragePlan, DetectorConfig, Opportunities};

use tracing::{debug, info};

use crate::domain::EventContext;
use crate::error::PipelineError;
use crate::source::RawEvent;

/// Complete result for one event.
#[derive(Debug, Clone)]
pub struct EventAnalysis {
    pub context: EventContext,
    pub rows: Vec<AggregatedOutcomeRow>,
    /// Lines or outcomes that were skipped or left without signals.
    pub issues: Vec<PipelineError>,
    /// Quotes dropped at ingestion for invalid prices.
    pub rejected_quotes: usize,
}

impl EventAnalysis {
    /// Positive-EV and arbitrage views of the rows.
    pub fn opportunities<'a>(&'a self, config: &DetectorConfig) -> Opportunities<'a> {
        Opportunities::classify(&self.rows, config)
    }
}

/// Run the whole pipeline on one raw snapshot.
///
/// Per-line failures are collected in [`EventAnalysis::issues`]. Only an
/// event with no usable quotes at all fails, with
/// [`PipelineError::NoData`].
pub fn analyze_event(raw: &RawEvent) -> Result<EventAnalysis, PipelineError> {
    let Ingested {
        context,
        quotes,
        rejected,
    } = ingest(raw);

    if quotes.is_empty() {
        return Err(PipelineError::NoData {
            event_id: context.event_id,
        });
    }

    let PairingReport { records, issues } = pair_quotes(&context, &quotes);
    if records.is_empty() {
        return Err(PipelineError::NoData {
            event_id: context.event_id,
        });
    }

    let rows = detect(aggregate(&context, &records));

    debug!(
        event = %context.event_id,
        quotes = quotes.len(),
        rows = rows.len(),
        issues = issues.len(),
        "Pipeline complete"
    );
    if rows.iter().any(|r| r.is_arbitrage) {
        info!(event = %context.event_id, name = %context.display_name(), "Arbitrage detected");
    }

    Ok(EventAnalysis {
        context,
        rows,
        issues,
        rejected_quotes: rejected,
    })
}
