//! Raw snapshot to domain quotes.

use tracing::warn;

use crate::domain::{
    format_point, AmericanOdds, BookmakerId, EventContext, EventId, LineId, Outcome, Quote,
};
use crate::source::RawEvent;

/// The event context plus every valid quote of one snapshot.
#[derive(Debug, Clone)]
pub struct Ingested {
    pub context: EventContext,
    pub quotes: Vec<Quote>,
    /// Outcomes dropped because their price was not valid American odds.
    pub rejected: usize,
}

/// Flatten a raw event into quotes.
///
/// Each provider outcome gets a structured [`Outcome`] where one applies.
/// Invalid prices are logged and skipped; they never fail the event.
pub fn ingest(raw: &RawEvent) -> Ingested {
    let context = EventContext::new(
        EventId::new(raw.id.clone()),
        raw.sport_key.clone(),
        raw.home_team.clone(),
        raw.away_team.clone(),
        raw.commence_time,
    )
    .with_snapshot_at(raw.snapshot_at);

    let mut quotes = Vec::new();
    let mut rejected = 0;

    for bookmaker in &raw.bookmakers {
        let bookmaker_id = BookmakerId::new(bookmaker.key.clone());

        for market in &bookmaker.markets {
            let updated = market.last_update.or(bookmaker.last_update);

            for outcome in &market.outcomes {
                let price = match AmericanOdds::try_new(outcome.price) {
                    Ok(price) => price,
                    Err(e) => {
                        warn!(
                            event = %context.event_id,
                            bookmaker = %bookmaker_id,
                            market = %market.key,
                            outcome = %outcome.name,
                            error = %e,
                            "Skipping quote"
                        );
                        rejected += 1;
                        continue;
                    }
                };

                let structured = Outcome::from_provider(&outcome.name, outcome.point, &context);
                let label = match (&structured, outcome.point) {
                    (Some(o), _) => o.label(&context),
                    (None, Some(point)) => format!("{} {}", outcome.name, format_point(point)),
                    (None, None) => outcome.name.clone(),
                };

                quotes.push(Quote {
                    event_id: context.event_id.clone(),
                    market_key: market.key.clone(),
                    line_id: LineId::from_parts(
                        &market.key,
                        outcome.description.as_deref(),
                        outcome.point,
                    ),
                    bookmaker: bookmaker_id.clone(),
                    label,
                    outcome: structured,
                    price,
                    last_updated_at: updated,
                });
            }
        }
    }

    Ingested {
        context,
        quotes,
        rejected,
    }
}
