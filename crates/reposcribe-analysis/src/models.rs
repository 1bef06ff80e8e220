//! Data models for the analysis pipeline

use serde::{Deserialize, Serialize};

/// A contiguous, size-bounded slice of a file's text content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Position of this segment within the file (order-significant)
    pub index: usize,
    /// Segment text, exactly as it appears in the file
    pub text: String,
    /// Path of the file the segment came from
    pub source_path: String,
}

/// Summary of one segment, index-aligned with its segment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentSummary {
    /// Position of the summarized segment
    pub index: usize,
    /// Summary text, or a sentinel error string on generation failure
    pub text: String,
}

/// Summary of one analyzed file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSummary {
    /// Path of the analyzed file
    pub path: String,
    /// Summary text
    pub text: String,
}

impl FileSummary {
    /// Render this summary as a report entry
    pub fn as_report_entry(&self) -> String {
        format!("**{}**: {}", self.path, self.text)
    }
}

/// Final packaged form of a report or generated-code result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeliverablePayload {
    /// Short enough to deliver in place
    Inline {
        /// The text, unchanged
        text: String,
    },
    /// Too long to display inline; delivered as a file
    Attachment {
        /// UTF-8 encoded report bytes
        bytes: Vec<u8>,
        /// Fixed attachment filename
        filename: String,
        /// Short caption shown alongside the attachment
        caption: String,
    },
}
