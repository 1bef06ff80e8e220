//! Size-bounded output packaging
//!
//! Decides between inline delivery and attachment delivery for a final
//! text blob. Pure decision logic: no knowledge of the transport.

use crate::models::DeliverablePayload;

/// Default attachment filename for repository reports
pub const REPORT_FILENAME: &str = "analysis.txt";

/// Attachment filename for generated feature code
pub const FEATURE_FILENAME: &str = "feature.txt";

/// Caption attached when output exceeds the inline ceiling
pub const ATTACHMENT_CAPTION: &str = "Output is too long to display inline; see attached file.";

/// Package `text` for delivery under an inline size ceiling, using the
/// default report filename for the attachment case.
pub fn package(text: &str, max_inline_length: usize) -> DeliverablePayload {
    package_as(text, max_inline_length, REPORT_FILENAME)
}

/// Package `text` with an explicit attachment filename.
pub fn package_as(text: &str, max_inline_length: usize, filename: &str) -> DeliverablePayload {
    if text.chars().count() <= max_inline_length {
        DeliverablePayload::Inline {
            text: text.to_string(),
        }
    } else {
        DeliverablePayload::Attachment {
            bytes: text.as_bytes().to_vec(),
            filename: filename.to_string(),
            caption: ATTACHMENT_CAPTION.to_string(),
        }
    }
}
