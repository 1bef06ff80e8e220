//! RepoScribe GitHub integration - source-tree provider
//!
//! Exposes a repository's file tree as an ordered list of blobs with
//! retrievable, decoded content. The analysis pipeline consumes this
//! through the [`TreeProvider`] trait so tests can substitute an in-memory
//! tree.

pub mod errors;
pub mod models;
pub mod tree;

pub use errors::{GitHubError, Result};
pub use models::{EntryKind, RepoFile, TreeEntry};
pub use tree::{decode_blob_content, GitHubConfig, GitHubTreeProvider, TreeProvider};
