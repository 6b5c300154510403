//! Structured outcomes and counterpart resolution.
//!
//! A quote's outcome is parsed once into an [`Outcome`] variant. The
//! logically opposite outcome is then a structural flip on that variant,
//! and labels are rendered back through the [`EventContext`] team names.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::error::DomainError;
use super::event::{EventContext, Side};

/// Answer of a yes/no proposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Answer {
    Yes,
    No,
}

/// Direction of a totals bet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Direction {
    Over,
    Under,
}

impl Direction {
    fn flip(self) -> Self {
        match self {
            Self::Over => Self::Under,
            Self::Under => Self::Over,
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "Over" => Some(Self::Over),
            "Under" => Some(Self::Under),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Over => write!(f, "Over"),
            Self::Under => write!(f, "Under"),
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yes => write!(f, "Yes"),
            Self::No => write!(f, "No"),
        }
    }
}

/// A wagerable outcome whose counterpart is known structurally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    Moneyline { side: Side },
    Total { direction: Direction, point: Decimal },
    Spread { side: Side, point: Decimal },
    Binary { answer: Answer },
}

impl Outcome {
    /// The logically opposite outcome on the same line.
    ///
    /// Applying this twice returns the original outcome.
    #[must_use]
    pub fn counterpart(&self) -> Self {
        match *self {
            Self::Moneyline { side } => Self::Moneyline {
                side: side.opposite(),
            },
            Self::Total { direction, point } => Self::Total {
                direction: direction.flip(),
                point,
            },
            Self::Spread { side, point } => Self::Spread {
                side: side.opposite(),
                point: -point,
            },
            Self::Binary { answer } => Self::Binary {
                answer: match answer {
                    Answer::Yes => Answer::No,
                    Answer::No => Answer::Yes,
                },
            },
        }
    }

    /// Build an outcome from provider fields (`name` plus optional `point`).
    ///
    /// Returns `None` for anything outside the supported families, such as
    /// a soccer draw or a point on a yes/no outcome.
    #[must_use]
    pub fn from_provider(name: &str, point: Option<Decimal>, ctx: &EventContext) -> Option<Self> {
        match (name, point) {
            ("Yes", None) => Some(Self::Binary {
                answer: Answer::Yes,
            }),
            ("No", None) => Some(Self::Binary { answer: Answer::No }),
            (name, None) => ctx.side_of(name).map(|side| Self::Moneyline { side }),
            (name, Some(point)) => match Direction::parse(name) {
                Some(direction) => Some(Self::Total { direction, point }),
                None => ctx.side_of(name).map(|side| Self::Spread { side, point }),
            },
        }
    }

    /// Parse a human-readable label such as `Over 7.5` or `Lakers -3.5`.
    ///
    /// Rules are tried in order: yes/no, exact team name, totals, spread.
    /// Labels matching none of them yield `None`; nothing is guessed.
    #[must_use]
    pub fn parse_label(label: &str, ctx: &EventContext) -> Option<Self> {
        match label {
            "Yes" => {
                return Some(Self::Binary {
                    answer: Answer::Yes,
                })
            }
            "No" => return Some(Self::Binary { answer: Answer::No }),
            _ => {}
        }

        if let Some(side) = ctx.side_of(label) {
            return Some(Self::Moneyline { side });
        }

        let (head, tail) = label.rsplit_once(' ')?;
        let point = parse_point(tail)?;

        if let Some(direction) = Direction::parse(head) {
            return Some(Self::Total { direction, point });
        }

        ctx.side_of(head).map(|side| Self::Spread { side, point })
    }

    /// Render the label for this outcome using the event's team names.
    #[must_use]
    pub fn label(&self, ctx: &EventContext) -> String {
        match self {
            Self::Moneyline { side } => ctx.team(*side).to_string(),
            Self::Total { direction, point } => format!("{direction} {}", format_point(*point)),
            Self::Spread { side, point } => {
                format!("{} {}", ctx.team(*side), format_point(*point))
            }
            Self::Binary { answer } => answer.to_string(),
        }
    }
}

/// Market families the pairing stage knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarketFamily {
    Moneyline,
    Spread,
    Total,
    Binary,
    Other,
}

impl MarketFamily {
    /// Classify a provider market key.
    #[must_use]
    pub fn from_market_key(key: &str) -> Self {
        match key {
            "h2h" | "h2h_lay" => Self::Moneyline,
            "spreads" | "alternate_spreads" => Self::Spread,
            "totals" | "alternate_totals" | "team_totals" | "alternate_team_totals" => Self::Total,
            "btts" => Self::Binary,
            k if k.starts_with("player_") || k.starts_with("pitcher_") || k.starts_with("batter_") => {
                Self::Total
            }
            _ => Self::Other,
        }
    }

    /// Whether every bookmaker's slice of a line must split into pairs.
    ///
    /// Moneylines are excluded because three-way markets carry a draw.
    #[must_use]
    pub const fn is_strictly_two_sided(self) -> bool {
        matches!(self, Self::Spread | Self::Total | Self::Binary)
    }
}

/// Resolve the counterpart label of `label` for an event between `home`
/// and `away`.
///
/// ```
/// use sharpline::domain::resolve_counterpart;
///
/// assert_eq!(resolve_counterpart("Over 7.5", "Lakers", "Celtics").unwrap(), "Under 7.5");
/// assert_eq!(resolve_counterpart("Lakers -3.5", "Lakers", "Celtics").unwrap(), "Celtics 3.5");
/// assert!(resolve_counterpart("Draw", "Lakers", "Celtics").is_err());
/// ```
pub fn resolve_counterpart(label: &str, home: &str, away: &str) -> Result<String, DomainError> {
    let ctx = EventContext::new("", "", home, away, DateTime::<Utc>::default());
    Outcome::parse_label(label, &ctx)
        .map(|outcome| outcome.counterpart().label(&ctx))
        .ok_or_else(|| DomainError::UnresolvableCounterpart {
            label: label.to_string(),
        })
}

/// Format a point without a leading `+` or trailing zeros.
#[must_use]
pub fn format_point(point: Decimal) -> String {
    if point.is_zero() {
        return "0".to_string();
    }
    point.normalize().to_string()
}

fn parse_point(s: &str) -> Option<Decimal> {
    let digits = s.strip_prefix('+').unwrap_or(s);
    if digits.is_empty() || digits.starts_with(['+', ' ']) {
        return None;
    }
    Decimal::from_str(digits).ok()
}
