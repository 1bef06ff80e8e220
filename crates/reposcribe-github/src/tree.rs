//! Source-tree provider backed by the GitHub git data API
//!
//! Resolves a branch to its latest commit, lists the recursive file tree and
//! fetches blob contents, base64-decoded to UTF-8 text.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::{GitHubError, Result};
use crate::models::{EntryKind, TreeEntry};

/// GitHub configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubConfig {
    /// GitHub API token
    pub token: String,
    /// API timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_timeout() -> u64 {
    30
}

impl GitHubConfig {
    /// Create a new GitHub configuration
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            timeout_secs: default_timeout(),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.token.is_empty() {
            return Err(GitHubError::config_error("GitHub token is required"));
        }
        if self.timeout_secs == 0 {
            return Err(GitHubError::config_error("Timeout must be greater than 0"));
        }
        Ok(())
    }
}

/// Capability to resolve and read a repository's file tree
#[async_trait]
pub trait TreeProvider: Send + Sync {
    /// Resolve a branch to the sha of its latest commit
    async fn latest_commit(&self, owner: &str, repo: &str, branch: &str) -> Result<String>;

    /// List the full recursive tree of a commit
    async fn tree(&self, owner: &str, repo: &str, commit_sha: &str) -> Result<Vec<TreeEntry>>;

    /// Fetch a blob and decode it to UTF-8 text
    async fn blob_text(&self, owner: &str, repo: &str, sha: &str) -> Result<String>;
}

/// Tree provider backed by octocrab
pub struct GitHubTreeProvider {
    client: octocrab::Octocrab,
}

impl GitHubTreeProvider {
    /// Create a new provider from configuration
    pub fn new(config: GitHubConfig) -> Result<Self> {
        config.validate()?;

        let client = octocrab::OctocrabBuilder::new()
            .personal_token(config.token)
            .build()
            .map_err(|e| {
                GitHubError::auth_error(format!("Failed to create GitHub client: {}", e))
            })?;

        Ok(Self { client })
    }

    fn validate_coordinates(owner: &str, repo: &str) -> Result<()> {
        if owner.is_empty() {
            return Err(GitHubError::invalid_input("Owner cannot be empty"));
        }
        if repo.is_empty() {
            return Err(GitHubError::invalid_input("Repository name cannot be empty"));
        }
        Ok(())
    }
}

#[async_trait]
impl TreeProvider for GitHubTreeProvider {
    async fn latest_commit(&self, owner: &str, repo: &str, branch: &str) -> Result<String> {
        Self::validate_coordinates(owner, repo)?;
        if branch.is_empty() {
            return Err(GitHubError::invalid_input("Branch cannot be empty"));
        }

        debug!(owner, repo, branch, "Resolving branch to latest commit");

        let reference: GitRefResponse = self
            .client
            .get(
                format!("/repos/{}/{}/git/ref/heads/{}", owner, repo, branch),
                None::<&()>,
            )
            .await
            .map_err(map_octocrab_error)?;

        Ok(reference.object.sha)
    }

    async fn tree(&self, owner: &str, repo: &str, commit_sha: &str) -> Result<Vec<TreeEntry>> {
        Self::validate_coordinates(owner, repo)?;
        if commit_sha.is_empty() {
            return Err(GitHubError::invalid_input("Commit sha cannot be empty"));
        }

        debug!(owner, repo, commit_sha, "Fetching recursive tree");

        let response: GitTreeResponse = self
            .client
            .get(
                format!(
                    "/repos/{}/{}/git/trees/{}?recursive=1",
                    owner, repo, commit_sha
                ),
                None::<&()>,
            )
            .await
            .map_err(map_octocrab_error)?;

        if response.truncated {
            warn!(
                owner,
                repo, "GitHub truncated the recursive tree listing; analysis will be partial"
            );
        }

        let entries = response
            .tree
            .into_iter()
            .filter_map(|node| {
                let sha = node.sha?;
                let kind = match node.kind.as_str() {
                    "blob" => EntryKind::Blob,
                    "tree" => EntryKind::Tree,
                    "commit" => EntryKind::Commit,
                    other => {
                        warn!(path = %node.path, kind = other, "Unknown tree entry kind");
                        return None;
                    }
                };
                Some(TreeEntry {
                    path: node.path,
                    sha,
                    kind,
                    size: node.size,
                })
            })
            .collect();

        Ok(entries)
    }

    async fn blob_text(&self, owner: &str, repo: &str, sha: &str) -> Result<String> {
        Self::validate_coordinates(owner, repo)?;
        if sha.is_empty() {
            return Err(GitHubError::invalid_input("Blob sha cannot be empty"));
        }

        let blob: GitBlobResponse = self
            .client
            .get(
                format!("/repos/{}/{}/git/blobs/{}", owner, repo, sha),
                None::<&()>,
            )
            .await
            .map_err(map_octocrab_error)?;

        decode_blob_content(&blob.content, &blob.encoding)
    }
}

/// Decode blob content as returned by the git data API.
///
/// GitHub base64-encodes blob bodies and inserts line breaks; invalid UTF-8
/// sequences are replaced rather than rejected, matching how the analysis
/// pipeline treats file content as best-effort text.
pub fn decode_blob_content(content: &str, encoding: &str) -> Result<String> {
    match encoding {
        "base64" => {
            let compact: String = content.chars().filter(|c| !c.is_whitespace()).collect();
            let bytes = BASE64
                .decode(compact.as_bytes())
                .map_err(|e| GitHubError::decode_error(format!("Invalid base64 blob: {}", e)))?;
            Ok(String::from_utf8_lossy(&bytes).into_owned())
        }
        "utf-8" => Ok(content.to_string()),
        other => Err(GitHubError::decode_error(format!(
            "Unsupported blob encoding: {}",
            other
        ))),
    }
}

fn map_octocrab_error(err: octocrab::Error) -> GitHubError {
    match err {
        octocrab::Error::GitHub { source, .. } => {
            let message = source.message.clone();
            if message.contains("Not Found") {
                GitHubError::not_found(message)
            } else if message.contains("rate limit") {
                GitHubError::RateLimitExceeded
            } else if message.contains("Bad credentials") {
                GitHubError::auth_error(message)
            } else {
                GitHubError::api_error(message)
            }
        }
        other => GitHubError::network_error(other.to_string()),
    }
}

/// Git ref lookup response
#[derive(Debug, Deserialize)]
struct GitRefResponse {
    object: GitRefObject,
}

#[derive(Debug, Deserialize)]
struct GitRefObject {
    sha: String,
}

/// Recursive tree listing response
#[derive(Debug, Deserialize)]
struct GitTreeResponse {
    tree: Vec<GitTreeNode>,
    #[serde(default)]
    truncated: bool,
}

#[derive(Debug, Deserialize)]
struct GitTreeNode {
    path: String,
    sha: Option<String>,
    #[serde(rename = "type")]
    kind: String,
    size: Option<u64>,
}

/// Blob fetch response
#[derive(Debug, Deserialize)]
struct GitBlobResponse {
    content: String,
    encoding: String,
}
