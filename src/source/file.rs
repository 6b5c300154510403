//! Snapshot source backed by JSON files on disk.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, warn};

use super::dto::{RawEvent, SnapshotDocument};
use super::SnapshotSource;
use crate::error::SourceError;

/// Serves events parsed from a single JSON file or a directory of them.
///
/// Files may hold one event, an array of events, or a historical
/// `{"timestamp", "data"}` wrapper. Snapshots are keyed by event id and
/// snapshot time, so repeated historical pulls of one event are all kept.
/// When two files carry the same key the one read last (in path order)
/// wins.
#[derive(Debug, Default)]
pub struct FileSource {
    events: BTreeMap<String, RawEvent>,
}

impl FileSource {
    /// Load every snapshot under `path`.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|source| io_error(path, source))?;

        let files = if metadata.is_dir() {
            json_files_in(path).await?
        } else {
            vec![path.to_path_buf()]
        };

        let mut events = Vec::new();
        for file in &files {
            let content = tokio::fs::read_to_string(file)
                .await
                .map_err(|source| io_error(file, source))?;
            let document: SnapshotDocument =
                serde_json::from_str(&content).map_err(|source| SourceError::Json {
                    path: file.display().to_string(),
                    source,
                })?;
            let parsed = document.into_events();
            debug!(file = %file.display(), events = parsed.len(), "Loaded snapshot file");
            events.extend(parsed);
        }

        if events.is_empty() {
            warn!(path = %path.display(), "No events found in snapshot path");
        }

        Ok(Self::from_events(events))
    }

    /// Build a source from already-parsed events.
    pub fn from_events(events: impl IntoIterator<Item = RawEvent>) -> Self {
        Self {
            events: events.into_iter().map(|e| (e.snapshot_key(), e)).collect(),
        }
    }

    /// Number of distinct snapshots held.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True when no events were loaded.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[async_trait]
impl SnapshotSource for FileSource {
    async fn snapshot_ids(&self) -> Result<Vec<String>, SourceError> {
        Ok(self.events.keys().cloned().collect())
    }

    async fn snapshot(&self, key: &str) -> Result<RawEvent, SourceError> {
        self.events
            .get(key)
            .cloned()
            .ok_or_else(|| SourceError::UnknownEvent(key.to_string()))
    }

    fn name(&self) -> &'static str {
        "file"
    }
}

async fn json_files_in(dir: &Path) -> Result<Vec<PathBuf>, SourceError> {
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .map_err(|source| io_error(dir, source))?;

    let mut files = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|source| io_error(dir, source))?
    {
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn io_error(path: &Path, source: std::io::Error) -> SourceError {
    SourceError::Io {
        path: path.display().to_string(),
        source,
    }
}
