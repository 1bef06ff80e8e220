//! Repository-level aggregation
//!
//! Walks a repository's blob entries in tree order, analyzes each file and
//! concatenates the per-file summaries into one report. Tree-resolution
//! failures degrade to a single user-facing error string; per-file
//! summarization cannot fail by construction.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::{debug, error, info};

use reposcribe_github::{RepoFile, TreeEntry, TreeProvider};

use crate::analyzer::FileAnalyzer;
use crate::config::AnalysisConfig;
use crate::error::{AnalysisError, Result};
use crate::models::FileSummary;
use crate::progress::{ProgressEvent, ProgressSender};

/// User-facing text returned when the repository cannot be analyzed
pub const ANALYSIS_FAILURE_TEXT: &str = "Error analyzing repository.";

/// Aggregates per-file analyses into a repository report
pub struct RepositoryAggregator {
    tree: Arc<dyn TreeProvider>,
    analyzer: Arc<FileAnalyzer>,
    config: AnalysisConfig,
    progress: Option<ProgressSender>,
}

impl RepositoryAggregator {
    /// Create a new aggregator
    pub fn new(
        tree: Arc<dyn TreeProvider>,
        analyzer: Arc<FileAnalyzer>,
        config: AnalysisConfig,
    ) -> Self {
        Self {
            tree,
            analyzer,
            config,
            progress: None,
        }
    }

    /// Attach a progress channel the delivery surface can render from
    pub fn with_progress(mut self, progress: ProgressSender) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Analyze a repository branch into a textual report.
    ///
    /// Degrades to [`ANALYSIS_FAILURE_TEXT`] on any tree or blob error;
    /// the caller always receives renderable text.
    pub async fn analyze_repository(&self, owner: &str, repo: &str, branch: &str) -> String {
        match self.try_analyze_repository(owner, repo, branch).await {
            Ok(report) => report,
            Err(err) => {
                error!(owner, repo, branch, error = %err, "Repository analysis failed");
                ANALYSIS_FAILURE_TEXT.to_string()
            }
        }
    }

    /// Fallible analysis used internally and by callers that want the
    /// underlying error instead of the degraded string.
    pub async fn try_analyze_repository(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
    ) -> Result<String> {
        info!(owner, repo, branch, "Starting repository analysis");

        let commit = self.tree.latest_commit(owner, repo, branch).await?;
        let entries = self.tree.tree(owner, repo, &commit).await?;

        let blobs: Vec<TreeEntry> = entries.into_iter().filter(TreeEntry::is_blob).collect();
        let total = blobs.len();
        debug!(owner, repo, commit = %commit, files = total, "Resolved file tree");
        self.emit(ProgressEvent::Started { total_files: total });

        let summaries = self.analyze_blobs(owner, repo, &blobs).await?;

        let body = summaries
            .iter()
            .map(FileSummary::as_report_entry)
            .collect::<Vec<_>>()
            .join("\n\n");
        let report = format!(
            "**Analysis of {}/{} (branch: {})**\n\n{}",
            owner, repo, branch, body
        );

        info!(
            owner,
            repo,
            files_analyzed = summaries.len(),
            files_skipped = total - summaries.len(),
            "Repository analysis complete"
        );
        self.emit(ProgressEvent::Completed {
            report_chars: report.chars().count(),
        });

        Ok(report)
    }

    /// Fetch and analyze blobs under the configured concurrency bound.
    ///
    /// Results are collected by input position, so report order always
    /// matches tree order regardless of completion order. Oversized files
    /// resolve to `None` and are omitted, not replaced with a placeholder.
    async fn analyze_blobs(
        &self,
        owner: &str,
        repo: &str,
        blobs: &[TreeEntry],
    ) -> Result<Vec<FileSummary>> {
        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent_files));
        let completed = AtomicUsize::new(0);
        let total = blobs.len();

        let tasks = blobs.iter().map(|entry| {
            let semaphore = Arc::clone(&semaphore);
            let completed = &completed;
            async move {
                let _permit = semaphore
                    .acquire()
                    .await
                    .map_err(|_| AnalysisError::Internal("Semaphore closed".into()))?;

                let file = RepoFile {
                    path: entry.path.clone(),
                    sha: entry.sha.clone(),
                    content: self.tree.blob_text(owner, repo, &entry.sha).await?,
                };

                let char_count = file.content.chars().count();
                if char_count > self.config.max_file_chars {
                    debug!(path = %file.path, chars = char_count, "Skipping oversized file");
                    self.emit(ProgressEvent::FileSkipped {
                        path: file.path,
                        chars: char_count,
                    });
                    return Ok(None);
                }

                let text = self.analyzer.analyze_file(&file.content, &file.path).await;
                let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
                self.emit(ProgressEvent::FileAnalyzed {
                    path: file.path.clone(),
                    completed: done,
                    total,
                });

                Ok(Some(FileSummary {
                    path: file.path,
                    text,
                }))
            }
        });

        let results: Vec<Result<Option<FileSummary>>> = futures::future::join_all(tasks).await;

        let mut summaries = Vec::with_capacity(results.len());
        for result in results {
            if let Some(summary) = result? {
                summaries.push(summary);
            }
        }
        Ok(summaries)
    }

    fn emit(&self, event: ProgressEvent) {
        if let Some(progress) = &self.progress {
            progress.send(event);
        }
    }
}
