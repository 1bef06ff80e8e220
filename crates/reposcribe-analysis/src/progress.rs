//! Progress events for long-running analyses
//!
//! The aggregator emits events on an unbounded channel; a delivery surface
//! may subscribe and render a heartbeat. Sends never block and a dropped
//! receiver is silently tolerated, so the pipeline is indifferent to
//! whether anyone is listening.

use tokio::sync::mpsc;

/// Progress notification from a repository analysis
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// Tree resolved; analysis is starting
    Started {
        /// Number of blob entries that will be considered
        total_files: usize,
    },
    /// One file finished analyzing
    FileAnalyzed {
        /// Path of the analyzed file
        path: String,
        /// Files completed so far
        completed: usize,
        /// Total files under consideration
        total: usize,
    },
    /// One file was skipped for exceeding the size ceiling
    FileSkipped {
        /// Path of the skipped file
        path: String,
        /// Character count that tripped the ceiling
        chars: usize,
    },
    /// The report is assembled
    Completed {
        /// Character count of the final report
        report_chars: usize,
    },
}

/// Receiving half of a progress channel
pub type ProgressReceiver = mpsc::UnboundedReceiver<ProgressEvent>;

/// Sending half of a progress channel
#[derive(Debug, Clone)]
pub struct ProgressSender {
    inner: mpsc::UnboundedSender<ProgressEvent>,
}

impl ProgressSender {
    /// Create a connected sender/receiver pair
    pub fn channel() -> (Self, ProgressReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { inner: tx }, rx)
    }

    /// Emit an event. A closed receiver is not an error.
    pub fn send(&self, event: ProgressEvent) {
        let _ = self.inner.send(event);
    }
}
