//! Cross-bookmaker consolidation of fair quotes.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{AmericanOdds, BookmakerId, EventContext, EventId, FairQuote, LineId};

/// One outcome of one line, combined across every bookmaker quoting it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedOutcome {
    pub event_id: EventId,
    pub event: String,
    pub commence_time: DateTime<Utc>,
    pub snapshot_at: Option<DateTime<Utc>>,
    pub market_key: String,
    pub line_id: LineId,
    pub outcome: String,
    pub counterpart: Option<String>,
    pub avg_price: f64,
    pub best_price: AmericanOdds,
    pub bookmaker_with_best_price: BookmakerId,
    /// Mean fair probability over bookmakers whose pairing succeeded.
    pub avg_no_vig_prob: Option<f64>,
    pub num_bookmakers: usize,
    pub last_updated_at: Option<DateTime<Utc>>,
}

type RowKey<'a> = (&'a LineId, &'a str, Option<&'a str>);

/// Collapse per-bookmaker records into one row per outcome.
///
/// Rows are ordered by line then outcome label. The best price is the one
/// paying the most per unit staked; ties go to the bookmaker that sorts
/// first.
pub fn aggregate(ctx: &EventContext, records: &[FairQuote]) -> Vec<AggregatedOutcome> {
    let mut groups: BTreeMap<RowKey<'_>, Vec<&FairQuote>> = BTreeMap::new();
    for record in records {
        let key = (
            &record.quote.line_id,
            record.quote.label.as_str(),
            record.counterpart.as_deref(),
        );
        groups.entry(key).or_default().push(record);
    }

    let event = ctx.display_name();

    groups
        .into_iter()
        .filter_map(|((line_id, outcome, counterpart), mut quotes)| {
            quotes.sort_by(|a, b| a.quote.bookmaker.cmp(&b.quote.bookmaker));

            let best = quotes.iter().copied().reduce(|best, q| {
                if q.quote.price.payout_multiple() > best.quote.price.payout_multiple() {
                    q
                } else {
                    best
                }
            })?;

            let avg_price = quotes
                .iter()
                .map(|q| f64::from(q.quote.price.value()))
                .sum::<f64>()
                / quotes.len() as f64;

            let fair: Vec<f64> = quotes.iter().filter_map(|q| q.no_vig_probability).collect();
            let avg_no_vig_prob =
                (!fair.is_empty()).then(|| fair.iter().sum::<f64>() / fair.len() as f64);

            let mut bookmakers: Vec<&BookmakerId> = quotes.iter().map(|q| &q.quote.bookmaker).collect();
            bookmakers.dedup();

            Some(AggregatedOutcome {
                event_id: ctx.event_id.clone(),
                event: event.clone(),
                commence_time: ctx.commence_time,
                snapshot_at: ctx.snapshot_at,
                market_key: best.quote.market_key.clone(),
                line_id: line_id.clone(),
                outcome: outcome.to_string(),
                counterpart: counterpart.map(str::to_string),
                avg_price,
                best_price: best.quote.price,
                bookmaker_with_best_price: best.quote.bookmaker.clone(),
                avg_no_vig_prob,
                num_bookmakers: bookmakers.len(),
                last_updated_at: quotes.iter().filter_map(|q| q.quote.last_updated_at).max(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Quote;

    fn ctx() -> EventContext {
        EventContext::new("e1", "basketball_nba", "Lakers", "Celtics", Utc::now())
    }

    fn record(book: &str, label: &str, price: i64, fair: Option<f64>) -> FairQuote {
        FairQuote {
            quote: Quote {
                event_id: EventId::new("e1"),
                market_key: "h2h".into(),
                line_id: LineId::from("h2h"),
                bookmaker: BookmakerId::from(book),
                label: label.into(),
                outcome: None,
                price: AmericanOdds::try_new(price).unwrap(),
                last_updated_at: None,
            },
            counterpart: Some(if label == "Lakers" { "Celtics" } else { "Lakers" }.into()),
            no_vig_probability: fair,
        }
    }

    #[test]
    fn combines_bookmakers() {
        let records = vec![
            record("fanduel", "Lakers", -150, Some(0.58)),
            record("draftkings", "Lakers", -140, Some(0.56)),
            record("betmgm", "Lakers", -160, None),
        ];
        let rows = aggregate(&ctx(), &records);

        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.best_price.value(), -140);
        assert_eq!(row.bookmaker_with_best_price.as_str(), "draftkings");
        assert!((row.avg_price + 150.0).abs() < 1e-9);
        assert!((row.avg_no_vig_prob.unwrap() - 0.57).abs() < 1e-9);
        assert_eq!(row.num_bookmakers, 3);
        assert_eq!(row.event, "Celtics @ Lakers");
    }

    #[test]
    fn best_price_prefers_plus_side_and_breaks_ties_lexicographically() {
        let records = vec![
            record("zed", "Celtics", 130, None),
            record("alpha", "Celtics", 130, None),
            record("mid", "Celtics", 120, None),
        ];
        let row = &aggregate(&ctx(), &records)[0];
        assert_eq!(row.best_price.value(), 130);
        assert_eq!(row.bookmaker_with_best_price.as_str(), "alpha");
        assert_eq!(row.avg_no_vig_prob, None);
    }

    #[test]
    fn single_bookmaker_still_produces_row() {
        let records = vec![record("fanduel", "Lakers", -150, Some(0.58))];
        let row = &aggregate(&ctx(), &records)[0];
        assert_eq!(row.num_bookmakers, 1);
        assert_eq!(row.avg_no_vig_prob, Some(0.58));
    }

    #[test]
    fn rows_are_ordered_by_label() {
        let records = vec![
            record("a", "Lakers", -150, None),
            record("a", "Celtics", 130, None),
        ];
        let rows = aggregate(&ctx(), &records);
        assert_eq!(rows[0].outcome, "Celtics");
        assert_eq!(rows[1].outcome, "Lakers");
    }
}
