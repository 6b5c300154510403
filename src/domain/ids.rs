//! Domain identifier types with proper encapsulation.

use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

/// Provider event identifier - newtype for type safety.
///
/// The inner String is private to ensure all construction goes through
/// the defined constructors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    /// Create a new EventId from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the event ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for EventId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for EventId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Bookmaker key, e.g. `draftkings`.
///
/// Ordering is lexicographic, which is what best-price tie breaking uses.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct BookmakerId(String);

impl BookmakerId {
    /// Create a new BookmakerId from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the bookmaker key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookmakerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for BookmakerId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for BookmakerId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Identifies one betting line inside an event.
///
/// Built from the market key, the optional outcome description (the
/// subject of a player prop) and the absolute point value, so both sides
/// of `Lakers -3.5` / `Celtics +3.5` land on the same line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct LineId(String);

impl LineId {
    /// Build a line id from its parts.
    pub fn from_parts(market_key: &str, description: Option<&str>, point: Option<Decimal>) -> Self {
        let mut id = market_key.to_string();
        if let Some(description) = description.filter(|d| !d.is_empty()) {
            id.push('/');
            id.push_str(description);
        }
        if let Some(point) = point {
            id.push('@');
            id.push_str(&point.abs().normalize().to_string());
        }
        Self(id)
    }

    /// Get the line id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for LineId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
