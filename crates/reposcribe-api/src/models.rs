//! Request and response DTOs for the API

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};

use reposcribe_analysis::DeliverablePayload;

/// Request body for repository analysis
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeRequest {
    /// Repository owner
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Branch to analyze (defaults to `main`)
    pub branch: Option<String>,
}

/// Response body for repository analysis
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeResponse {
    /// Packaged analysis result
    pub analysis: PayloadDto,
}

/// Request body for feature generation
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateFeatureRequest {
    /// Free-text feature description
    pub feature: String,
}

/// Response body for feature generation
#[derive(Debug, Clone, Serialize)]
pub struct GenerateFeatureResponse {
    /// Packaged generated code
    pub feature_code: PayloadDto,
}

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
}

/// Wire form of a packaged deliverable
///
/// Attachment bytes travel base64-encoded so the payload stays valid JSON
/// regardless of content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PayloadDto {
    /// Short enough to deliver in the response body
    Inline {
        /// The text, unchanged
        text: String,
    },
    /// Too long to display inline
    Attachment {
        /// Attachment filename
        filename: String,
        /// Caption describing why the content is attached
        caption: String,
        /// Base64-encoded UTF-8 content
        content_base64: String,
    },
}

impl From<DeliverablePayload> for PayloadDto {
    fn from(payload: DeliverablePayload) -> Self {
        match payload {
            DeliverablePayload::Inline { text } => PayloadDto::Inline { text },
            DeliverablePayload::Attachment {
                bytes,
                filename,
                caption,
            } => PayloadDto::Attachment {
                filename,
                caption,
                content_base64: BASE64.encode(bytes),
            },
        }
    }
}
