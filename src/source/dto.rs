//! Raw snapshot shapes as delivered by the odds provider.
//!
//! These mirror the provider's JSON one to one; ingestion turns them into
//! domain quotes.

use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

/// One event with every bookmaker's markets.
#[derive(Debug, Clone, Deserialize)]
pub struct RawEvent {
    pub id: String,
    #[serde(default)]
    pub sport_key: String,
    pub commence_time: DateTime<Utc>,
    pub home_team: String,
    pub away_team: String,
    #[serde(default)]
    pub bookmakers: Vec<RawBookmaker>,
    /// Time of the historical pull this snapshot came from.
    #[serde(default)]
    pub snapshot_at: Option<DateTime<Utc>>,
}

impl RawEvent {
    /// Key unique per event and snapshot time, e.g. `e1` or
    /// `e1@2024-01-09T20:00:00Z`.
    #[must_use]
    pub fn snapshot_key(&self) -> String {
        match self.snapshot_at {
            Some(at) => format!("{}@{}", self.id, at.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            None => self.id.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawBookmaker {
    pub key: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub last_update: Option<DateTime<Utc>>,
    #[serde(default)]
    pub markets: Vec<RawMarket>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawMarket {
    pub key: String,
    #[serde(default)]
    pub last_update: Option<DateTime<Utc>>,
    #[serde(default)]
    pub outcomes: Vec<RawOutcome>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawOutcome {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub point: Option<Decimal>,
    pub price: i64,
}

/// Any of the document layouts a snapshot file may hold.
///
/// Historical pulls wrap the payload in `{"timestamp": .., "data": ..}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SnapshotDocument {
    Historical {
        #[serde(default)]
        timestamp: Option<DateTime<Utc>>,
        data: Box<SnapshotDocument>,
    },
    Many(Vec<RawEvent>),
    One(Box<RawEvent>),
}

impl SnapshotDocument {
    /// Flatten the document into its events.
    pub fn into_events(self) -> Vec<RawEvent> {
        match self {
            Self::Historical { timestamp, data } => data
                .into_events()
                .into_iter()
                .map(|mut event| {
                    event.snapshot_at = event.snapshot_at.or(timestamp);
                    event
                })
                .collect(),
            Self::Many(events) => events,
            Self::One(event) => vec![*event],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const EVENT: &str = r#"{
        "id": "e1",
        "sport_key": "basketball_nba",
        "commence_time": "2024-01-10T00:00:00Z",
        "home_team": "Lakers",
        "away_team": "Celtics",
        "bookmakers": [{
            "key": "draftkings",
            "title": "DraftKings",
            "markets": [{
                "key": "spreads",
                "last_update": "2024-01-09T20:00:00Z",
                "outcomes": [
                    {"name": "Lakers", "price": -110, "point": -3.5},
                    {"name": "Celtics", "price": -110, "point": 3.5}
                ]
            }]
        }]
    }"#;

    #[test]
    fn parses_single_event() {
        let doc: SnapshotDocument = serde_json::from_str(EVENT).unwrap();
        let events = doc.into_events();
        assert_eq!(events.len(), 1);
        let outcome = &events[0].bookmakers[0].markets[0].outcomes[0];
        assert_eq!(outcome.point, Some(dec!(-3.5)));
        assert_eq!(outcome.price, -110);
    }

    #[test]
    fn parses_historical_wrapper_and_arrays() {
        let wrapped = format!(r#"{{"timestamp": "2024-01-09T20:00:00Z", "data": [{EVENT}, {EVENT}]}}"#);
        let doc: SnapshotDocument = serde_json::from_str(&wrapped).unwrap();
        let events = doc.into_events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].snapshot_key(), "e1@2024-01-09T20:00:00Z");
    }

    #[test]
    fn plain_events_have_no_snapshot_time() {
        let doc: SnapshotDocument = serde_json::from_str(EVENT).unwrap();
        let event = &doc.into_events()[0];
        assert_eq!(event.snapshot_at, None);
        assert_eq!(event.snapshot_key(), "e1");
    }
}
