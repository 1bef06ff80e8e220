//! Application state for the API server

use std::sync::Arc;

use reposcribe_analysis::{FileAnalyzer, RepositoryAggregator};

/// Application state shared across all API handlers
#[derive(Clone)]
pub struct AppState {
    /// Repository aggregator driving `/analyze`
    pub aggregator: Arc<RepositoryAggregator>,
    /// File analyzer driving `/generate-feature`
    pub analyzer: Arc<FileAnalyzer>,
    /// Inline delivery ceiling used when packaging responses
    pub max_inline_chars: usize,
    /// Server start time for uptime calculation
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Create new application state
    pub fn new(
        aggregator: Arc<RepositoryAggregator>,
        analyzer: Arc<FileAnalyzer>,
        max_inline_chars: usize,
    ) -> Self {
        Self {
            aggregator,
            analyzer,
            max_inline_chars,
            start_time: std::time::Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
