//! RepoScribe analysis - map-reduce summarization pipeline
//!
//! Given file content too large for a single bounded generation request,
//! the pipeline deterministically partitions it, summarizes each partition
//! independently and refines the partials into one coherent result. The
//! aggregator repeats that per file across a repository tree and packages
//! the final report under a delivery size ceiling.

pub mod aggregator;
pub mod analyzer;
pub mod chunker;
pub mod config;
pub mod error;
pub mod models;
pub mod packager;
pub mod progress;
pub mod summarizer;

// Re-export main types for convenience
pub use aggregator::{RepositoryAggregator, ANALYSIS_FAILURE_TEXT};
pub use analyzer::{
    FileAnalyzer, FEATURE_FAILURE_TEXT, FILE_FAILURE_TEXT, NO_OUTPUT_TEXT, NO_SUMMARY_TEXT,
};
pub use chunker::chunk;
pub use config::AnalysisConfig;
pub use error::{AnalysisError, Result};
pub use models::{DeliverablePayload, FileSummary, Segment, SegmentSummary};
pub use packager::{
    package, package_as, ATTACHMENT_CAPTION, FEATURE_FILENAME, REPORT_FILENAME,
};
pub use progress::{ProgressEvent, ProgressReceiver, ProgressSender};
pub use summarizer::{Refiner, SegmentSummarizer, CHUNK_FAILURE_TEXT};
