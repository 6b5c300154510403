//! Snapshot data sources.
//!
//! The pipeline never talks to a provider directly. A [`SnapshotSource`]
//! hands it one raw snapshot at a time; fetching, retries and timeouts are the
//! source's business.

mod dto;
mod file;

pub use dto::{RawBookmaker, RawEvent, RawMarket, RawOutcome, SnapshotDocument};
pub use file::FileSource;

use async_trait::async_trait;

use crate::error::SourceError;

/// Supplier of raw per-event snapshots.
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Keys of every snapshot this source holds.
    ///
    /// A key is the event id, suffixed with the snapshot time for
    /// historical pulls (see [`RawEvent::snapshot_key`]).
    async fn snapshot_ids(&self) -> Result<Vec<String>, SourceError>;

    /// Snapshot for one key.
    async fn snapshot(&self, key: &str) -> Result<RawEvent, SourceError>;

    /// Source name for logging.
    fn name(&self) -> &'static str;
}
