//! Configuration for the analysis pipeline

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};

/// Pipeline configuration
///
/// Defaults reproduce the size ceilings the system is tuned for: a file at
/// most `max_chars` characters long is summarized in a single request;
/// anything larger is chunked at `max_chars` and each chunk gets a smaller
/// output budget than the single-pass path, since refinement compresses the
/// partials again afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Model submitted with every generation request
    #[serde(default = "default_model")]
    pub model: String,
    /// Per-request character ceiling; also the chunk size
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,
    /// Output ceiling for one chunk summary
    #[serde(default = "default_chunk_summary_max_tokens")]
    pub chunk_summary_max_tokens: usize,
    /// Output ceiling for a single-pass file summary
    #[serde(default = "default_file_summary_max_tokens")]
    pub file_summary_max_tokens: usize,
    /// Output ceiling for the refinement pass
    #[serde(default = "default_refined_summary_max_tokens")]
    pub refined_summary_max_tokens: usize,
    /// Sampling temperature for summarization (low: factual over creative)
    #[serde(default = "default_summary_temperature")]
    pub summary_temperature: f32,
    /// Output ceiling for feature generation
    #[serde(default = "default_feature_max_tokens")]
    pub feature_max_tokens: usize,
    /// Sampling temperature for feature generation
    #[serde(default = "default_feature_temperature")]
    pub feature_temperature: f32,
    /// Files longer than this many characters are skipped entirely
    #[serde(default = "default_max_file_chars")]
    pub max_file_chars: usize,
    /// Concurrent segment summarization calls per file
    #[serde(default = "default_max_concurrent_segments")]
    pub max_concurrent_segments: usize,
    /// Concurrent file analyses per repository run
    #[serde(default = "default_max_concurrent_files")]
    pub max_concurrent_files: usize,
    /// Inline delivery ceiling for packaged output
    #[serde(default = "default_max_inline_chars")]
    pub max_inline_chars: usize,
}

fn default_model() -> String {
    "gpt-4".to_string()
}

fn default_max_chars() -> usize {
    2000
}

fn default_chunk_summary_max_tokens() -> usize {
    150
}

fn default_file_summary_max_tokens() -> usize {
    250
}

fn default_refined_summary_max_tokens() -> usize {
    400
}

fn default_summary_temperature() -> f32 {
    0.3
}

fn default_feature_max_tokens() -> usize {
    500
}

fn default_feature_temperature() -> f32 {
    0.7
}

fn default_max_file_chars() -> usize {
    50_000
}

fn default_max_concurrent_segments() -> usize {
    4
}

fn default_max_concurrent_files() -> usize {
    2
}

fn default_max_inline_chars() -> usize {
    4000
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            max_chars: default_max_chars(),
            chunk_summary_max_tokens: default_chunk_summary_max_tokens(),
            file_summary_max_tokens: default_file_summary_max_tokens(),
            refined_summary_max_tokens: default_refined_summary_max_tokens(),
            summary_temperature: default_summary_temperature(),
            feature_max_tokens: default_feature_max_tokens(),
            feature_temperature: default_feature_temperature(),
            max_file_chars: default_max_file_chars(),
            max_concurrent_segments: default_max_concurrent_segments(),
            max_concurrent_files: default_max_concurrent_files(),
            max_inline_chars: default_max_inline_chars(),
        }
    }
}

impl AnalysisConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.model.is_empty() {
            return Err(AnalysisError::Internal("Model must not be empty".into()));
        }
        if self.max_chars == 0 {
            return Err(AnalysisError::Internal(
                "max_chars must be greater than 0".into(),
            ));
        }
        if self.chunk_summary_max_tokens == 0
            || self.file_summary_max_tokens == 0
            || self.refined_summary_max_tokens == 0
            || self.feature_max_tokens == 0
        {
            return Err(AnalysisError::Internal(
                "Output token ceilings must be greater than 0".into(),
            ));
        }
        if self.max_concurrent_segments == 0 || self.max_concurrent_files == 0 {
            return Err(AnalysisError::Internal(
                "Concurrency bounds must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
