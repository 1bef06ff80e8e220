//! Per-file analysis
//!
//! Chooses between the single-pass path (content fits one request) and the
//! chunked map-reduce path (chunk, summarize each segment under a
//! concurrency bound, refine). Also hosts feature generation, which shares
//! the provider but needs no chunking since feature descriptions are short.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use reposcribe_providers::{ChatRequest, Message, Provider};

use crate::chunker::chunk;
use crate::config::AnalysisConfig;
use crate::models::{Segment, SegmentSummary};
use crate::summarizer::{Refiner, SegmentSummarizer, CHUNK_FAILURE_TEXT};

/// Sentinel returned when a single-pass file summary fails
pub const FILE_FAILURE_TEXT: &str = "Error summarizing code.";

/// Returned when the provider produced no usable single-pass summary
pub const NO_SUMMARY_TEXT: &str = "No summary received.";

/// Sentinel returned when feature generation fails
pub const FEATURE_FAILURE_TEXT: &str = "Error generating feature code.";

/// Returned when the provider produced no usable feature code
pub const NO_OUTPUT_TEXT: &str = "No output received.";

/// Analyzes one file's content into a summary
pub struct FileAnalyzer {
    provider: Arc<dyn Provider>,
    summarizer: SegmentSummarizer,
    refiner: Refiner,
    config: AnalysisConfig,
    cancel: CancellationToken,
}

impl FileAnalyzer {
    /// Create a new file analyzer
    pub fn new(provider: Arc<dyn Provider>, config: AnalysisConfig) -> Self {
        Self::with_cancellation(provider, config, CancellationToken::new())
    }

    /// Create a file analyzer that stops issuing generation calls once the
    /// given token is cancelled
    pub fn with_cancellation(
        provider: Arc<dyn Provider>,
        config: AnalysisConfig,
        cancel: CancellationToken,
    ) -> Self {
        let summarizer =
            SegmentSummarizer::new(Arc::clone(&provider), config.clone(), cancel.clone());
        let refiner = Refiner::new(Arc::clone(&provider), config.clone(), cancel.clone());
        Self {
            provider,
            summarizer,
            refiner,
            config,
            cancel,
        }
    }

    /// Analyze one file. Never fails; failures yield degraded but
    /// non-empty text.
    pub async fn analyze_file(&self, content: &str, path: &str) -> String {
        let char_count = content.chars().count();

        if char_count <= self.config.max_chars {
            debug!(path, chars = char_count, "Analyzing file in a single pass");
            return self.summarize_whole_file(content, path).await;
        }

        debug!(path, chars = char_count, "Chunking file for analysis");
        let segments = chunk(content, self.config.max_chars, path);
        let partials = self.summarize_segments(&segments).await;
        self.refiner.refine(&partials, path).await
    }

    /// Generate code for a feature description. Never fails.
    pub async fn generate_feature(&self, description: &str) -> String {
        if self.cancel.is_cancelled() {
            return FEATURE_FAILURE_TEXT.to_string();
        }

        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                Message::system(
                    "You are an expert software engineer. Generate code based on a given feature description.",
                ),
                Message::user(format!(
                    "Generate code for a new feature: \"{}\". The feature should be implemented \
                     in a style consistent with the surrounding project, following modular design \
                     best practices.",
                    description
                )),
            ],
            temperature: Some(self.config.feature_temperature),
            max_tokens: Some(self.config.feature_max_tokens),
        };

        match self.provider.chat(request).await {
            Ok(response) => {
                let code = response.content.trim();
                if code.is_empty() {
                    NO_OUTPUT_TEXT.to_string()
                } else {
                    code.to_string()
                }
            }
            Err(err) => {
                warn!(error = %err, "Feature generation failed");
                FEATURE_FAILURE_TEXT.to_string()
            }
        }
    }

    /// Single-pass path: the whole file in one request, with a larger
    /// output budget than a chunk since no refinement follows.
    async fn summarize_whole_file(&self, content: &str, path: &str) -> String {
        if self.cancel.is_cancelled() {
            return FILE_FAILURE_TEXT.to_string();
        }

        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                Message::system(
                    "You are an expert software engineer. Provide a detailed summary of the code provided.",
                ),
                Message::user(format!(
                    "Analyze the following code from file \"{}\" and provide a detailed summary:\n\n{}\n\nSummary:",
                    path, content
                )),
            ],
            temperature: Some(self.config.summary_temperature),
            max_tokens: Some(self.config.file_summary_max_tokens),
        };

        match self.provider.chat(request).await {
            Ok(response) => {
                let summary = response.content.trim();
                if summary.is_empty() {
                    NO_SUMMARY_TEXT.to_string()
                } else {
                    summary.to_string()
                }
            }
            Err(err) => {
                warn!(path, error = %err, "File summarization failed");
                FILE_FAILURE_TEXT.to_string()
            }
        }
    }

    /// Summarize all segments under the configured concurrency bound.
    ///
    /// Futures are joined in input order, so the returned partials are
    /// index-aligned with the segments no matter which call finishes first.
    async fn summarize_segments(&self, segments: &[Segment]) -> Vec<SegmentSummary> {
        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent_segments));

        let tasks = segments.iter().map(|segment| {
            let semaphore = Arc::clone(&semaphore);
            async move {
                let _permit = match semaphore.acquire().await {
                    Ok(permit) => permit,
                    Err(_) => {
                        return SegmentSummary {
                            index: segment.index,
                            text: CHUNK_FAILURE_TEXT.to_string(),
                        }
                    }
                };
                self.summarizer.summarize(segment).await
            }
        });

        futures::future::join_all(tasks).await
    }
}
