//! Per-event context carried alongside every quote.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::ids::EventId;

/// Which team an outcome refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Home,
    Away,
}

impl Side {
    /// The other team.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Home => Self::Away,
            Self::Away => Self::Home,
        }
    }
}

/// Identity of the event a snapshot belongs to.
///
/// Passed explicitly into every pipeline stage; nothing about the event
/// is remembered between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventContext {
    pub event_id: EventId,
    pub sport_key: String,
    pub home_team: String,
    pub away_team: String,
    pub commence_time: DateTime<Utc>,
    /// When the snapshot was taken, for historical pulls.
    pub snapshot_at: Option<DateTime<Utc>>,
}

impl EventContext {
    pub fn new(
        event_id: impl Into<EventId>,
        sport_key: impl Into<String>,
        home_team: impl Into<String>,
        away_team: impl Into<String>,
        commence_time: DateTime<Utc>,
    ) -> Self {
        Self {
            event_id: event_id.into(),
            sport_key: sport_key.into(),
            home_team: home_team.into(),
            away_team: away_team.into(),
            commence_time,
            snapshot_at: None,
        }
    }

    /// Tag the context with the time its snapshot was taken.
    #[must_use]
    pub fn with_snapshot_at(mut self, snapshot_at: Option<DateTime<Utc>>) -> Self {
        self.snapshot_at = snapshot_at;
        self
    }

    /// Team name for a side.
    #[must_use]
    pub fn team(&self, side: Side) -> &str {
        match side {
            Side::Home => &self.home_team,
            Side::Away => &self.away_team,
        }
    }

    /// Which side a team name refers to.
    ///
    /// Returns `None` for unknown names, and for every name when both
    /// teams share one, since the side would be ambiguous.
    #[must_use]
    pub fn side_of(&self, team: &str) -> Option<Side> {
        if self.home_team == self.away_team {
            return None;
        }
        if team == self.home_team {
            Some(Side::Home)
        } else if team == self.away_team {
            Some(Side::Away)
        } else {
            None
        }
    }

    /// Display name, `Away @ Home`.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} @ {}", self.away_team, self.home_team)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> EventContext {
        EventContext::new("evt", "basketball_nba", "Lakers", "Celtics", Utc::now())
    }

    #[test]
    fn side_lookup() {
        let ctx = ctx();
        assert_eq!(ctx.side_of("Lakers"), Some(Side::Home));
        assert_eq!(ctx.side_of("Celtics"), Some(Side::Away));
        assert_eq!(ctx.side_of("Knicks"), None);
        assert_eq!(ctx.team(Side::Home.opposite()), "Celtics");
    }

    #[test]
    fn identical_team_names_are_ambiguous() {
        let ctx = EventContext::new("evt", "x", "Same", "Same", Utc::now());
        assert_eq!(ctx.side_of("Same"), None);
    }

    #[test]
    fn display_name_is_away_at_home() {
        assert_eq!(ctx().display_name(), "Celtics @ Lakers");
    }
}
