use thiserror::Error;

use crate::domain::error::DomainError;
use crate::domain::{BookmakerId, EventId, LineId};

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Per-line and per-event pipeline failures.
///
/// Everything except [`PipelineError::NoData`] is local: the offending
/// line or outcome is skipped and the rest of the event is processed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    #[error("quotes '{first}' and '{second}' on {line} at {bookmaker} are not counterpart sides")]
    InvalidPair {
        line: LineId,
        bookmaker: BookmakerId,
        first: String,
        second: String,
    },

    #[error("line {line} at {bookmaker} cannot be paired: {reason}")]
    MalformedLine {
        line: LineId,
        bookmaker: BookmakerId,
        reason: String,
    },

    #[error("no counterpart for '{label}' on {line} at {bookmaker}")]
    UnresolvableCounterpart {
        line: LineId,
        bookmaker: BookmakerId,
        label: String,
    },

    #[error("event {event_id} has no usable quotes")]
    NoData { event_id: EventId },
}

/// Failures of the snapshot data source.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("failed to read snapshot {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse snapshot {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown snapshot: {0}")]
    UnknownEvent(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
