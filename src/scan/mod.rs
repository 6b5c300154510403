//! Multi-event scans.
//!
//! Every event runs as its own task with private data; the only shared
//! thing is the sink, which receives each event once it is complete.

mod sink;

pub use sink::{JsonLinesSink, RowSink};

use std::sync::Arc;

use tokio::sync::{watch, Semaphore};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::error::{Error, PipelineError, Result};
use crate::pipeline::{analyze_event, DetectorConfig, EventAnalysis};
use crate::source::SnapshotSource;

/// Counters for one scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub events: usize,
    pub analyzed: usize,
    pub no_data: usize,
    pub failed: usize,
    pub rows: usize,
    pub positive_ev: usize,
    pub arbitrage: usize,
    pub cancelled: bool,
}

/// Runs the pipeline over every event of a source.
pub struct Scanner<S> {
    source: Arc<S>,
    max_concurrent_events: usize,
}

impl<S: SnapshotSource + 'static> Scanner<S> {
    pub fn new(source: Arc<S>, max_concurrent_events: usize) -> Self {
        Self {
            source,
            max_concurrent_events: max_concurrent_events.max(1),
        }
    }

    /// Analyze every event and hand finished events to `sink`.
    ///
    /// Setting `shutdown` to `true` stops the scan between events: pending
    /// tasks are aborted and everything already written stays intact.
    pub async fn run<K: RowSink>(
        &self,
        sink: &mut K,
        detector: &DetectorConfig,
        mut shutdown: watch::Receiver<bool>,
    ) -> Result<ScanSummary> {
        let ids = self.source.snapshot_ids().await?;
        let mut summary = ScanSummary {
            events: ids.len(),
            ..ScanSummary::default()
        };

        if *shutdown.borrow() {
            summary.cancelled = true;
            return Ok(summary);
        }

        info!(
            source = self.source.name(),
            events = ids.len(),
            workers = self.max_concurrent_events,
            "Starting scan"
        );

        let permits = Arc::new(Semaphore::new(self.max_concurrent_events));
        let mut tasks = JoinSet::new();
        for id in ids {
            let source = Arc::clone(&self.source);
            let permits = Arc::clone(&permits);
            tasks.spawn(async move {
                let _permit = permits.acquire_owned().await;
                let result = analyze(source.as_ref(), &id).await;
                (id, result)
            });
        }

        let mut watching = true;
        loop {
            tokio::select! {
                biased;
                changed = shutdown.changed(), if watching => {
                    match changed {
                        Ok(()) if *shutdown.borrow() => {
                            info!(remaining = tasks.len(), "Scan cancelled");
                            tasks.abort_all();
                            summary.cancelled = true;
                            break;
                        }
                        Ok(()) => {}
                        Err(_) => watching = false,
                    }
                }
                joined = tasks.join_next() => {
                    let Some(joined) = joined else { break };
                    let (id, result) = match joined {
                        Ok(done) => done,
                        Err(e) => {
                            warn!(error = %e, "Worker task failed");
                            summary.failed += 1;
                            continue;
                        }
                    };
                    match result {
                        Ok(analysis) => {
                            sink.write_event(&analysis)?;
                            record(&mut summary, &analysis, detector);
                        }
                        Err(Error::Pipeline(PipelineError::NoData { .. })) => {
                            debug!(event = %id, "No usable quotes");
                            summary.no_data += 1;
                        }
                        Err(e) => {
                            warn!(event = %id, error = %e, "Event failed");
                            summary.failed += 1;
                        }
                    }
                }
            }
        }

        sink.flush()?;
        info!(
            analyzed = summary.analyzed,
            rows = summary.rows,
            positive_ev = summary.positive_ev,
            arbitrage = summary.arbitrage,
            "Scan finished"
        );
        Ok(summary)
    }
}

async fn analyze<S: SnapshotSource + ?Sized>(source: &S, id: &str) -> Result<EventAnalysis> {
    let raw = source.snapshot(id).await?;
    Ok(analyze_event(&raw)?)
}

fn record(summary: &mut ScanSummary, analysis: &EventAnalysis, detector: &DetectorConfig) {
    let opportunities = analysis.opportunities(detector);
    summary.analyzed += 1;
    summary.rows += analysis.rows.len();
    summary.positive_ev += opportunities.positive_ev().len();
    summary.arbitrage += opportunities.arbitrage().len();
}
