//! Segment summarization and refinement
//!
//! Both passes talk to the generation provider and both are infallible by
//! contract: any provider failure degrades to sentinel text so one bad
//! segment can never sink a whole file or repository analysis.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::warn;

use reposcribe_providers::{ChatRequest, Message, Provider};

use crate::config::AnalysisConfig;
use crate::models::{Segment, SegmentSummary};

/// Sentinel summary recorded when a chunk cannot be summarized
pub const CHUNK_FAILURE_TEXT: &str = "Error summarizing this chunk.";

/// Summarizes one bounded text segment
pub struct SegmentSummarizer {
    provider: Arc<dyn Provider>,
    config: AnalysisConfig,
    cancel: CancellationToken,
}

impl SegmentSummarizer {
    /// Create a new segment summarizer
    pub fn new(
        provider: Arc<dyn Provider>,
        config: AnalysisConfig,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            provider,
            config,
            cancel,
        }
    }

    /// Summarize one segment. Never fails; failures yield sentinel text.
    pub async fn summarize(&self, segment: &Segment) -> SegmentSummary {
        if self.cancel.is_cancelled() {
            return SegmentSummary {
                index: segment.index,
                text: CHUNK_FAILURE_TEXT.to_string(),
            };
        }

        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                Message::system("You are an expert software engineer."),
                Message::user(format!(
                    "Analyze the following chunk of code from file \"{}\" and provide a concise summary:\n\n{}\n\nSummary:",
                    segment.source_path, segment.text
                )),
            ],
            temperature: Some(self.config.summary_temperature),
            max_tokens: Some(self.config.chunk_summary_max_tokens),
        };

        match self.provider.chat(request).await {
            Ok(response) => SegmentSummary {
                index: segment.index,
                text: response.content.trim().to_string(),
            },
            Err(err) => {
                warn!(
                    path = %segment.source_path,
                    index = segment.index,
                    error = %err,
                    "Segment summarization failed; recording sentinel"
                );
                SegmentSummary {
                    index: segment.index,
                    text: CHUNK_FAILURE_TEXT.to_string(),
                }
            }
        }
    }
}

/// Unifies partial summaries into one coherent analysis
///
/// The second pass is what distinguishes the pipeline from naive
/// chunk-and-concatenate: one extra generation call buys coherence across
/// chunk boundaries.
pub struct Refiner {
    provider: Arc<dyn Provider>,
    config: AnalysisConfig,
    cancel: CancellationToken,
}

impl Refiner {
    /// Create a new refiner
    pub fn new(
        provider: Arc<dyn Provider>,
        config: AnalysisConfig,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            provider,
            config,
            cancel,
        }
    }

    /// Refine ordered partial summaries into a unified file analysis.
    ///
    /// Falls back to the raw joined partials on any failure.
    pub async fn refine(&self, partials: &[SegmentSummary], source_path: &str) -> String {
        let joined = partials
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        if self.cancel.is_cancelled() {
            return joined;
        }

        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                Message::system("You are an expert software engineer."),
                Message::user(format!(
                    "The following are partial summaries of consecutive chunks of the file \"{}\". \
                     Combine them into one unified analysis of the file, covering its purpose, \
                     key structures, design patterns, interactions, and possible improvements:\n\n{}\n\nUnified analysis:",
                    source_path, joined
                )),
            ],
            temperature: Some(self.config.summary_temperature),
            max_tokens: Some(self.config.refined_summary_max_tokens),
        };

        match self.provider.chat(request).await {
            Ok(response) => {
                let refined = response.content.trim();
                if refined.is_empty() {
                    joined
                } else {
                    refined.to_string()
                }
            }
            Err(err) => {
                warn!(
                    path = %source_path,
                    error = %err,
                    "Refinement failed; returning joined partial summaries"
                );
                joined
            }
        }
    }
}
