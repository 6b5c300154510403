//! Grouping quotes into lines and pairing counterpart outcomes.
//!
//! Quotes are grouped by line, then by bookmaker. Inside one bookmaker's
//! slice of a line each outcome is matched to the quote carrying its
//! structural counterpart, so the provider's outcome order never matters.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::domain::{
    no_vig_probabilities, BookmakerId, EventContext, FairQuote, LineId, MarketFamily, Quote,
};
use crate::error::PipelineError;

/// Result of pairing one event's quotes.
#[derive(Debug, Clone, Default)]
pub struct PairingReport {
    /// Every quote that survived pairing, with its fair value attached
    /// where a counterpart was found.
    pub records: Vec<FairQuote>,
    /// Non-fatal problems encountered along the way.
    pub issues: Vec<PipelineError>,
}

/// Vig-free probabilities for two quotes claimed to be counterparts.
///
/// Fails with [`PipelineError::InvalidPair`] unless both quotes sit on the
/// same line at the same bookmaker and their outcomes are each other's
/// counterpart.
pub fn devig_pair(a: &Quote, b: &Quote) -> Result<(f64, f64), PipelineError> {
    let structural = match (a.outcome, b.outcome) {
        (Some(x), Some(y)) => x.counterpart() == y,
        _ => false,
    };

    if !structural || a.line_id != b.line_id || a.bookmaker != b.bookmaker {
        return Err(PipelineError::InvalidPair {
            line: a.line_id.clone(),
            bookmaker: a.bookmaker.clone(),
            first: a.label.clone(),
            second: b.label.clone(),
        });
    }

    Ok(no_vig_probabilities(a.price, b.price))
}

/// Pair every quote of one event and compute per-bookmaker fair values.
///
/// A malformed bookmaker slice is skipped and reported; the rest of the
/// event is unaffected.
pub fn pair_quotes(ctx: &EventContext, quotes: &[Quote]) -> PairingReport {
    let mut lines: BTreeMap<&LineId, BTreeMap<&BookmakerId, Vec<&Quote>>> = BTreeMap::new();
    for quote in quotes {
        lines
            .entry(&quote.line_id)
            .or_default()
            .entry(&quote.bookmaker)
            .or_default()
            .push(quote);
    }

    let mut report = PairingReport::default();

    for (line, books) in lines {
        for (bookmaker, slice) in books {
            match pair_slice(ctx, &slice) {
                Ok((records, issues)) => {
                    report.records.extend(records);
                    report.issues.extend(issues);
                }
                Err(e) => {
                    warn!(line = %line, bookmaker = %bookmaker, error = %e, "Skipping line");
                    report.issues.push(e);
                }
            }
        }
    }

    report
}

type SliceResult = Result<(Vec<FairQuote>, Vec<PipelineError>), PipelineError>;

fn pair_slice(ctx: &EventContext, slice: &[&Quote]) -> SliceResult {
    let Some(first) = slice.first() else {
        return Ok((Vec::new(), Vec::new()));
    };
    let family = MarketFamily::from_market_key(&first.market_key);
    let malformed = |reason: String| PipelineError::MalformedLine {
        line: first.line_id.clone(),
        bookmaker: first.bookmaker.clone(),
        reason,
    };

    for (i, a) in slice.iter().enumerate() {
        if slice[i + 1..]
            .iter()
            .any(|b| a.outcome.is_some() && a.outcome == b.outcome)
        {
            return Err(malformed(format!("outcome '{}' quoted twice", a.label)));
        }
    }

    if family.is_strictly_two_sided() && slice.len() % 2 == 1 {
        return Err(malformed(format!(
            "odd number of outcomes ({}) in a two-sided market",
            slice.len()
        )));
    }

    let mut issues = Vec::new();
    for quote in slice.iter().filter(|q| q.outcome.is_none()) {
        debug!(line = %quote.line_id, bookmaker = %quote.bookmaker, label = %quote.label, "Unresolvable counterpart");
        issues.push(PipelineError::UnresolvableCounterpart {
            line: quote.line_id.clone(),
            bookmaker: quote.bookmaker.clone(),
            label: quote.label.clone(),
        });
    }

    // A three-way market (moneyline plus draw) is not two independent
    // pairs; normalizing home/away alone would overstate both.
    let devig = family.is_strictly_two_sided() || issues.is_empty();

    let mut probabilities: Vec<Option<f64>> = vec![None; slice.len()];
    if devig {
        for i in 0..slice.len() {
            if probabilities[i].is_some() {
                continue;
            }
            let Some(outcome) = slice[i].outcome else {
                continue;
            };
            let target = Some(outcome.counterpart());
            if let Some(j) = slice.iter().position(|q| q.outcome == target) {
                let (pa, pb) = devig_pair(slice[i], slice[j])?;
                probabilities[i] = Some(pa);
                probabilities[j] = Some(pb);
            } else {
                debug!(line = %slice[i].line_id, bookmaker = %slice[i].bookmaker, label = %slice[i].label, "Counterpart not quoted");
            }
        }
    }

    // Outcomes of a multi-way line have no single opposing side.
    let records = slice
        .iter()
        .zip(probabilities)
        .map(|(quote, no_vig_probability)| FairQuote {
            quote: (*quote).clone(),
            counterpart: quote
                .outcome
                .filter(|_| devig)
                .map(|o| o.counterpart().label(ctx)),
            no_vig_probability,
        })
        .collect();

    Ok((records, issues))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AmericanOdds, EventId, Outcome};
    use chrono::Utc;

    fn ctx() -> EventContext {
        EventContext::new("e1", "basketball_nba", "Lakers", "Celtics", Utc::now())
    }

    fn quote(ctx: &EventContext, market: &str, line: &str, book: &str, label: &str, price: i64) -> Quote {
        Quote {
            event_id: EventId::new("e1"),
            market_key: market.into(),
            line_id: LineId::from(line),
            bookmaker: BookmakerId::from(book),
            label: label.into(),
            outcome: Outcome::parse_label(label, ctx),
            price: AmericanOdds::try_new(price).unwrap(),
            last_updated_at: None,
        }
    }

    fn prob(report: &PairingReport, book: &str, label: &str) -> Option<f64> {
        report
            .records
            .iter()
            .find(|r| r.quote.bookmaker.as_str() == book && r.quote.label == label)
            .and_then(|r| r.no_vig_probability)
    }

    #[test]
    fn pairs_by_counterpart_not_position() {
        let ctx = ctx();
        let quotes = vec![
            quote(&ctx, "totals", "totals@7.5", "a", "Under 7.5", 130),
            quote(&ctx, "h2h", "h2h", "a", "Lakers", -150),
            quote(&ctx, "totals", "totals@7.5", "a", "Over 7.5", -150),
            quote(&ctx, "h2h", "h2h", "a", "Celtics", 130),
        ];
        let report = pair_quotes(&ctx, &quotes);

        assert!(report.issues.is_empty());
        assert!((prob(&report, "a", "Over 7.5").unwrap() - 0.5798).abs() < 1e-4);
        assert!((prob(&report, "a", "Under 7.5").unwrap() - 0.4202).abs() < 1e-4);
        assert!((prob(&report, "a", "Lakers").unwrap() - 0.5798).abs() < 1e-4);

        let over = report
            .records
            .iter()
            .find(|r| r.quote.label == "Over 7.5")
            .unwrap();
        assert_eq!(over.counterpart.as_deref(), Some("Under 7.5"));
    }

    #[test]
    fn odd_two_sided_slice_is_skipped_for_that_bookmaker_only() {
        let ctx = ctx();
        let quotes = vec![
            quote(&ctx, "spreads", "spreads@3.5", "a", "Lakers -3.5", -110),
            quote(&ctx, "spreads", "spreads@3.5", "b", "Lakers -3.5", -105),
            quote(&ctx, "spreads", "spreads@3.5", "b", "Celtics 3.5", -115),
        ];
        let report = pair_quotes(&ctx, &quotes);

        assert_eq!(report.records.len(), 2);
        assert!(report
            .records
            .iter()
            .all(|r| r.quote.bookmaker.as_str() == "b"));
        assert!(matches!(
            report.issues.as_slice(),
            [PipelineError::MalformedLine { .. }]
        ));
    }

    #[test]
    fn duplicate_outcome_is_malformed() {
        let ctx = ctx();
        let quotes = vec![
            quote(&ctx, "h2h", "h2h", "a", "Lakers", -150),
            quote(&ctx, "h2h", "h2h", "a", "Lakers", -140),
        ];
        let report = pair_quotes(&ctx, &quotes);
        assert!(report.records.is_empty());
        assert_eq!(report.issues.len(), 1);
    }

    #[test]
    fn missing_counterpart_passes_through_unset() {
        let ctx = ctx();
        let quotes = vec![quote(&ctx, "h2h", "h2h", "a", "Lakers", -150)];
        let report = pair_quotes(&ctx, &quotes);

        assert_eq!(report.records.len(), 1);
        assert_eq!(report.records[0].no_vig_probability, None);
        assert_eq!(report.records[0].counterpart.as_deref(), Some("Celtics"));
    }

    #[test]
    fn three_way_moneyline_is_not_devigged() {
        let ctx = ctx();
        let quotes = vec![
            quote(&ctx, "h2h", "h2h", "a", "Lakers", 150),
            quote(&ctx, "h2h", "h2h", "a", "Celtics", 180),
            quote(&ctx, "h2h", "h2h", "a", "Draw", 220),
        ];
        let report = pair_quotes(&ctx, &quotes);

        assert_eq!(report.records.len(), 3);
        assert!(report.records.iter().all(|r| r.no_vig_probability.is_none()));
        assert!(report.records.iter().all(|r| r.counterpart.is_none()));
        assert!(matches!(
            report.issues.as_slice(),
            [PipelineError::UnresolvableCounterpart { label, .. }] if label == "Draw"
        ));
    }

    #[test]
    fn devig_pair_rejects_non_counterparts() {
        let ctx = ctx();
        let over = quote(&ctx, "totals", "totals@7.5", "a", "Over 7.5", -110);
        let other_book = quote(&ctx, "totals", "totals@7.5", "b", "Under 7.5", -110);
        let same_side = quote(&ctx, "totals", "totals@7.5", "a", "Over 7.5", -120);

        assert!(matches!(
            devig_pair(&over, &other_book),
            Err(PipelineError::InvalidPair { .. })
        ));
        assert!(devig_pair(&over, &same_side).is_err());

        let under = quote(&ctx, "totals", "totals@7.5", "a", "Under 7.5", -110);
        let (p, q) = devig_pair(&over, &under).unwrap();
        assert!((p - 0.5).abs() < 1e-12 && (q - 0.5).abs() < 1e-12);
    }
}
