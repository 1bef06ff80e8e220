//! Error types for the analysis pipeline

use thiserror::Error;

/// Errors the aggregation boundary can observe.
///
/// Summarization itself never fails: the summarizer, refiner and file
/// analyzer degrade to sentinel text instead of propagating. The only
/// fallible edge is the source tree.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Tree resolution or blob retrieval failed
    #[error("Source tree error: {0}")]
    Tree(#[from] reposcribe_github::GitHubError),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type for analysis operations
pub type Result<T> = std::result::Result<T, AnalysisError>;
