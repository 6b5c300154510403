//! Multi-event scan configuration.

use serde::Deserialize;

/// Scan configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ScanConfig {
    /// Events analyzed at the same time.
    #[serde(default = "default_max_concurrent_events")]
    pub max_concurrent_events: usize,
}

fn default_max_concurrent_events() -> usize {
    num_cpus::get()
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_concurrent_events: default_max_concurrent_events(),
        }
    }
}
