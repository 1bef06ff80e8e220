//! Data models for the source-tree provider

use serde::{Deserialize, Serialize};

/// Kind of an entry in a git tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// A file
    Blob,
    /// A directory
    Tree,
    /// A submodule
    Commit,
}

/// One row of a recursive git tree listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeEntry {
    /// Path relative to the repository root
    pub path: String,
    /// Content-addressable identifier of the entry
    pub sha: String,
    /// Entry kind
    pub kind: EntryKind,
    /// Size in bytes (present for blobs)
    pub size: Option<u64>,
}

impl TreeEntry {
    /// Whether this entry is a file
    pub fn is_blob(&self) -> bool {
        self.kind == EntryKind::Blob
    }
}

/// A file retrieved from the repository, decoded to text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoFile {
    /// Path relative to the repository root
    pub path: String,
    /// Blob identifier the content was fetched by
    pub sha: String,
    /// Decoded UTF-8 content
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_kind_deserializes_from_github_strings() {
        let kind: EntryKind = serde_json::from_str("\"blob\"").unwrap();
        assert_eq!(kind, EntryKind::Blob);
        let kind: EntryKind = serde_json::from_str("\"tree\"").unwrap();
        assert_eq!(kind, EntryKind::Tree);
        let kind: EntryKind = serde_json::from_str("\"commit\"").unwrap();
        assert_eq!(kind, EntryKind::Commit);
    }

    #[test]
    fn test_is_blob() {
        let entry = TreeEntry {
            path: "src/main.rs".to_string(),
            sha: "abc123".to_string(),
            kind: EntryKind::Blob,
            size: Some(1024),
        };
        assert!(entry.is_blob());

        let dir = TreeEntry {
            path: "src".to_string(),
            sha: "def456".to_string(),
            kind: EntryKind::Tree,
            size: None,
        };
        assert!(!dir.is_blob());
    }
}
