//! Raw snapshot builders for integration tests.

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde_json::{json, Value};

use sharpline::source::{RawBookmaker, RawEvent, RawMarket, RawOutcome};

pub const HOME: &str = "Lakers";
pub const AWAY: &str = "Celtics";

pub fn kickoff() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 0, 30, 0).unwrap()
}

pub fn outcome(name: &str, price: i64) -> RawOutcome {
    RawOutcome {
        name: name.into(),
        description: None,
        point: None,
        price,
    }
}

pub fn point_outcome(name: &str, point: Decimal, price: i64) -> RawOutcome {
    RawOutcome {
        point: Some(point),
        ..outcome(name, price)
    }
}

pub fn prop_outcome(name: &str, player: &str, point: Decimal, price: i64) -> RawOutcome {
    RawOutcome {
        description: Some(player.into()),
        ..point_outcome(name, point, price)
    }
}

pub fn market(key: &str, outcomes: Vec<RawOutcome>) -> RawMarket {
    RawMarket {
        key: key.into(),
        last_update: None,
        outcomes,
    }
}

pub fn moneyline(home_price: i64, away_price: i64) -> RawMarket {
    market("h2h", vec![outcome(HOME, home_price), outcome(AWAY, away_price)])
}

pub fn bookmaker(key: &str, markets: Vec<RawMarket>) -> RawBookmaker {
    RawBookmaker {
        key: key.into(),
        title: key.to_uppercase(),
        last_update: Some(kickoff() - chrono::Duration::hours(1)),
        markets,
    }
}

pub fn event(id: &str, bookmakers: Vec<RawBookmaker>) -> RawEvent {
    RawEvent {
        id: id.into(),
        sport_key: "basketball_nba".into(),
        commence_time: kickoff(),
        snapshot_at: None,
        home_team: HOME.into(),
        away_team: AWAY.into(),
        bookmakers,
    }
}

/// Provider-shaped JSON for a two-book moneyline event.
pub fn moneyline_json(id: &str, books: &[(&str, i64, i64)]) -> Value {
    let bookmakers: Vec<Value> = books
        .iter()
        .map(|(key, home, away)| {
            json!({
                "key": key,
                "title": key,
                "last_update": "2024-02-29T23:00:00Z",
                "markets": [{
                    "key": "h2h",
                    "outcomes": [
                        {"name": HOME, "price": home},
                        {"name": AWAY, "price": away}
                    ]
                }]
            })
        })
        .collect();

    json!({
        "id": id,
        "sport_key": "basketball_nba",
        "commence_time": "2024-03-01T00:30:00Z",
        "home_team": HOME,
        "away_team": AWAY,
        "bookmakers": bookmakers
    })
}
