//! Integration tests for the analysis pipeline with scripted capabilities
//!
//! The generation provider and the tree provider are replaced by in-memory
//! doubles so every property can be asserted deterministically: failure
//! isolation, ordering, skip thresholds and end-to-end report shape.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use reposcribe_analysis::{
    AnalysisConfig, FileAnalyzer, RepositoryAggregator, ANALYSIS_FAILURE_TEXT, CHUNK_FAILURE_TEXT,
};
use reposcribe_github::{EntryKind, GitHubError, TreeEntry, TreeProvider};
use reposcribe_providers::{
    ChatRequest, ChatResponse, FinishReason, ModelInfo, Provider, ProviderError, TokenUsage,
};

type RespondFn = dyn Fn(&ChatRequest) -> Result<String, ProviderError> + Send + Sync;
type DelayFn = dyn Fn(&ChatRequest) -> Duration + Send + Sync;

/// Generation double driven by a response rule over the incoming prompt
struct ScriptedProvider {
    respond: Box<RespondFn>,
    delay: Option<Box<DelayFn>>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedProvider {
    fn new<F>(respond: F) -> Self
    where
        F: Fn(&ChatRequest) -> Result<String, ProviderError> + Send + Sync + 'static,
    {
        Self {
            respond: Box::new(respond),
            delay: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    fn with_delay<F>(mut self, delay: F) -> Self
    where
        F: Fn(&ChatRequest) -> Duration + Send + Sync + 'static,
    {
        self.delay = Some(Box::new(delay));
        self
    }

    fn recorded_requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

/// Content of the user message of a request
fn user_content(request: &ChatRequest) -> &str {
    request
        .messages
        .iter()
        .rev()
        .find(|m| m.role == "user")
        .map(|m| m.content.as_str())
        .unwrap_or("")
}

fn is_refine_request(request: &ChatRequest) -> bool {
    user_content(request).contains("Unified analysis:")
}

#[async_trait]
impl Provider for ScriptedProvider {
    fn id(&self) -> &str {
        "scripted"
    }

    fn name(&self) -> &str {
        "Scripted"
    }

    fn models(&self) -> Vec<ModelInfo> {
        vec![ModelInfo {
            id: "gpt-4".to_string(),
            name: "GPT-4".to_string(),
            provider: "scripted".to_string(),
            context_window: 8192,
        }]
    }

    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, ProviderError> {
        self.requests.lock().unwrap().push(request.clone());

        if let Some(delay) = &self.delay {
            tokio::time::sleep(delay(&request)).await;
        }

        let content = (self.respond)(&request)?;
        Ok(ChatResponse {
            content,
            model: request.model,
            usage: TokenUsage {
                prompt_tokens: 0,
                completion_tokens: 0,
                total_tokens: 0,
            },
            finish_reason: FinishReason::Stop,
        })
    }

    async fn health_check(&self) -> Result<bool, ProviderError> {
        Ok(true)
    }
}

/// In-memory tree provider holding (path, content) pairs in tree order
struct MemoryTree {
    files: Vec<(String, String)>,
    fail_commit: bool,
    fail_blobs: bool,
}

impl MemoryTree {
    fn new(files: Vec<(&str, String)>) -> Self {
        Self {
            files: files
                .into_iter()
                .map(|(path, content)| (path.to_string(), content))
                .collect(),
            fail_commit: false,
            fail_blobs: false,
        }
    }

    fn failing_commit() -> Self {
        Self {
            files: Vec::new(),
            fail_commit: true,
            fail_blobs: false,
        }
    }

    fn failing_blobs(files: Vec<(&str, String)>) -> Self {
        let mut tree = Self::new(files);
        tree.fail_blobs = true;
        tree
    }
}

#[async_trait]
impl TreeProvider for MemoryTree {
    async fn latest_commit(
        &self,
        _owner: &str,
        _repo: &str,
        branch: &str,
    ) -> reposcribe_github::Result<String> {
        if self.fail_commit {
            return Err(GitHubError::not_found(format!("No branch {}", branch)));
        }
        Ok("commit-sha".to_string())
    }

    async fn tree(
        &self,
        _owner: &str,
        _repo: &str,
        _commit_sha: &str,
    ) -> reposcribe_github::Result<Vec<TreeEntry>> {
        let mut entries = vec![TreeEntry {
            path: "src".to_string(),
            sha: "dir-sha".to_string(),
            kind: EntryKind::Tree,
            size: None,
        }];
        entries.extend(self.files.iter().enumerate().map(|(i, (path, content))| {
            TreeEntry {
                path: path.clone(),
                sha: format!("sha-{}", i),
                kind: EntryKind::Blob,
                size: Some(content.len() as u64),
            }
        }));
        Ok(entries)
    }

    async fn blob_text(
        &self,
        _owner: &str,
        _repo: &str,
        sha: &str,
    ) -> reposcribe_github::Result<String> {
        if self.fail_blobs {
            return Err(GitHubError::network_error("connection reset"));
        }
        let index: usize = sha
            .strip_prefix("sha-")
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| GitHubError::not_found(sha.to_string()))?;
        self.files
            .get(index)
            .map(|(_, content)| content.clone())
            .ok_or_else(|| GitHubError::not_found(sha.to_string()))
    }
}

fn test_config() -> AnalysisConfig {
    AnalysisConfig {
        max_chars: 2000,
        ..Default::default()
    }
}

/// File content whose three 2000-char chunks are distinguishable
fn three_chunk_content() -> String {
    let mut content = String::new();
    content.push_str(&"A".repeat(2000));
    content.push_str(&"B".repeat(2000));
    content.push_str(&"C".repeat(500));
    content
}

fn echo_summaries(request: &ChatRequest) -> Result<String, ProviderError> {
    let content = user_content(request);
    if is_refine_request(request) {
        return Ok(format!("refined[{}]", request.messages.len()));
    }
    if content.contains("AAAA") {
        Ok("alpha summary".to_string())
    } else if content.contains("BBBB") {
        Ok("beta summary".to_string())
    } else if content.contains("CCCC") {
        Ok("gamma summary".to_string())
    } else {
        Ok("plain summary".to_string())
    }
}

#[tokio::test]
async fn test_single_pass_for_small_files() {
    let provider = Arc::new(ScriptedProvider::new(|_| Ok("small file summary".to_string())));
    let analyzer = FileAnalyzer::new(provider.clone(), test_config());

    let summary = analyzer.analyze_file(&"x".repeat(500), "src/small.rs").await;

    assert_eq!(summary, "small file summary");
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn test_chunked_path_summarizes_each_segment_then_refines() {
    let provider = Arc::new(ScriptedProvider::new(echo_summaries));
    let analyzer = FileAnalyzer::new(provider.clone(), test_config());

    let _summary = analyzer
        .analyze_file(&three_chunk_content(), "src/big.rs")
        .await;

    // 3 chunk summaries + 1 refinement
    assert_eq!(provider.call_count(), 4);
    let refines: Vec<ChatRequest> = provider
        .recorded_requests()
        .into_iter()
        .filter(is_refine_request)
        .collect();
    assert_eq!(refines.len(), 1);
    let refine_prompt = user_content(&refines[0]).to_string();
    assert!(refine_prompt.contains("alpha summary\nbeta summary\ngamma summary"));
}

#[tokio::test]
async fn test_analyze_file_is_idempotent() {
    let provider = Arc::new(ScriptedProvider::new(echo_summaries));
    let analyzer = FileAnalyzer::new(provider, test_config());
    let content = three_chunk_content();

    let first = analyzer.analyze_file(&content, "src/big.rs").await;
    let second = analyzer.analyze_file(&content, "src/big.rs").await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_one_failing_chunk_does_not_sink_the_file() {
    // Fail exactly the middle chunk; refinement also fails so the joined
    // partials become the file summary and stay observable.
    let provider = Arc::new(ScriptedProvider::new(|request: &ChatRequest| {
        let content = user_content(request);
        if is_refine_request(request) {
            return Err(ProviderError::NetworkError("refine down".to_string()));
        }
        if content.contains("BBBB") {
            return Err(ProviderError::RateLimited(60));
        }
        if content.contains("AAAA") {
            Ok("alpha summary".to_string())
        } else {
            Ok("gamma summary".to_string())
        }
    }));
    let analyzer = FileAnalyzer::new(provider, test_config());

    let summary = analyzer
        .analyze_file(&three_chunk_content(), "src/big.rs")
        .await;

    assert!(!summary.is_empty());
    assert!(summary.contains("alpha summary"));
    assert!(summary.contains(CHUNK_FAILURE_TEXT));
    assert!(summary.contains("gamma summary"));
    // The failed slot sits between the healthy ones, never dropped
    assert_eq!(
        summary,
        format!("alpha summary\n{}\ngamma summary", CHUNK_FAILURE_TEXT)
    );
}

#[tokio::test]
async fn test_partials_keep_index_order_despite_completion_order() {
    // First chunk resolves slowest, last resolves fastest
    let provider = Arc::new(
        ScriptedProvider::new(echo_summaries).with_delay(|request: &ChatRequest| {
            let content = user_content(request);
            if content.contains("AAAA") {
                Duration::from_millis(40)
            } else if content.contains("BBBB") {
                Duration::from_millis(20)
            } else {
                Duration::from_millis(0)
            }
        }),
    );
    let analyzer = FileAnalyzer::new(provider.clone(), test_config());

    let _summary = analyzer
        .analyze_file(&three_chunk_content(), "src/big.rs")
        .await;

    let refines: Vec<ChatRequest> = provider
        .recorded_requests()
        .into_iter()
        .filter(is_refine_request)
        .collect();
    let refine_prompt = user_content(&refines[0]).to_string();
    assert!(
        refine_prompt.contains("alpha summary\nbeta summary\ngamma summary"),
        "partials must stay in segment order: {}",
        refine_prompt
    );
}

#[tokio::test]
async fn test_refinement_failure_falls_back_to_joined_partials() {
    let provider = Arc::new(ScriptedProvider::new(|request: &ChatRequest| {
        if is_refine_request(request) {
            Err(ProviderError::NetworkError("timeout".to_string()))
        } else {
            echo_summaries(request)
        }
    }));
    let analyzer = FileAnalyzer::new(provider, test_config());

    let summary = analyzer
        .analyze_file(&three_chunk_content(), "src/big.rs")
        .await;

    assert_eq!(summary, "alpha summary\nbeta summary\ngamma summary");
}

#[tokio::test]
async fn test_cancellation_stops_generation_calls() {
    let provider = Arc::new(ScriptedProvider::new(echo_summaries));
    let cancel = CancellationToken::new();
    cancel.cancel();
    let analyzer = FileAnalyzer::with_cancellation(provider.clone(), test_config(), cancel);

    let summary = analyzer
        .analyze_file(&three_chunk_content(), "src/big.rs")
        .await;

    assert_eq!(provider.call_count(), 0);
    assert!(!summary.is_empty());
}

#[tokio::test]
async fn test_end_to_end_two_file_repository() {
    let provider = Arc::new(ScriptedProvider::new(|request: &ChatRequest| {
        if is_refine_request(request) {
            Ok("unified analysis of the large file".to_string())
        } else {
            echo_summaries(request)
        }
    }));
    let config = test_config();
    let analyzer = Arc::new(FileAnalyzer::new(provider.clone(), config.clone()));
    let tree = Arc::new(MemoryTree::new(vec![
        ("src/app.rs", "x".repeat(500)),
        ("src/engine.rs", three_chunk_content()),
    ]));
    let aggregator = RepositoryAggregator::new(tree, analyzer, config);

    let report = aggregator
        .analyze_repository("acme", "widgets", "main")
        .await;

    assert!(report.starts_with("**Analysis of acme/widgets (branch: main)**\n\n"));

    let entries: Vec<&str> = report
        .lines()
        .filter(|line| line.starts_with("**src/"))
        .collect();
    assert_eq!(entries.len(), 2);
    assert!(entries[0].starts_with("**src/app.rs**: "));
    assert!(entries[1].starts_with("**src/engine.rs**: unified analysis of the large file"));

    // File A: 1 single-pass call; file B: 3 chunk calls + 1 refinement
    assert_eq!(provider.call_count(), 5);
    let refine_prompt = provider
        .recorded_requests()
        .into_iter()
        .filter(is_refine_request)
        .map(|r| user_content(&r).to_string())
        .next()
        .expect("one refinement call");
    assert!(refine_prompt.contains("alpha summary\nbeta summary\ngamma summary"));
}

#[tokio::test]
async fn test_oversized_file_is_omitted_not_placeholdered() {
    let provider = Arc::new(ScriptedProvider::new(|_| Ok("summary".to_string())));
    let config = test_config();
    let analyzer = Arc::new(FileAnalyzer::new(provider, config.clone()));
    let tree = Arc::new(MemoryTree::new(vec![
        ("src/huge.rs", "h".repeat(50_001)),
        ("src/kept.rs", "k".repeat(200)),
    ]));
    let aggregator = RepositoryAggregator::new(tree, analyzer, config);

    let report = aggregator.analyze_repository("acme", "widgets", "main").await;

    assert!(!report.contains("src/huge.rs"));
    assert!(report.contains("**src/kept.rs**: summary"));
}

#[tokio::test]
async fn test_file_at_exact_size_ceiling_is_kept() {
    let provider = Arc::new(ScriptedProvider::new(|request: &ChatRequest| {
        if is_refine_request(request) {
            Ok("refined boundary summary".to_string())
        } else {
            Ok("chunk summary".to_string())
        }
    }));
    let config = test_config();
    let analyzer = Arc::new(FileAnalyzer::new(provider, config.clone()));
    let tree = Arc::new(MemoryTree::new(vec![(
        "src/boundary.rs",
        "b".repeat(50_000),
    )]));
    let aggregator = RepositoryAggregator::new(tree, analyzer, config);

    let report = aggregator.analyze_repository("acme", "widgets", "main").await;

    assert!(report.contains("**src/boundary.rs**: "));
}

#[tokio::test]
async fn test_tree_resolution_failure_degrades_to_error_text() {
    let provider = Arc::new(ScriptedProvider::new(|_| Ok("summary".to_string())));
    let config = test_config();
    let analyzer = Arc::new(FileAnalyzer::new(provider, config.clone()));
    let aggregator =
        RepositoryAggregator::new(Arc::new(MemoryTree::failing_commit()), analyzer, config);

    let report = aggregator
        .analyze_repository("acme", "widgets", "no-such-branch")
        .await;

    assert_eq!(report, ANALYSIS_FAILURE_TEXT);
}

#[tokio::test]
async fn test_blob_fetch_failure_degrades_to_error_text() {
    let provider = Arc::new(ScriptedProvider::new(|_| Ok("summary".to_string())));
    let config = test_config();
    let analyzer = Arc::new(FileAnalyzer::new(provider, config.clone()));
    let tree = Arc::new(MemoryTree::failing_blobs(vec![(
        "src/app.rs",
        "x".repeat(100),
    )]));
    let aggregator = RepositoryAggregator::new(tree, analyzer, config);

    let report = aggregator.analyze_repository("acme", "widgets", "main").await;

    assert_eq!(report, ANALYSIS_FAILURE_TEXT);
}

#[tokio::test]
async fn test_progress_events_track_the_run() {
    use reposcribe_analysis::{ProgressEvent, ProgressSender};

    let provider = Arc::new(ScriptedProvider::new(|_| Ok("summary".to_string())));
    let config = test_config();
    let analyzer = Arc::new(FileAnalyzer::new(provider, config.clone()));
    let tree = Arc::new(MemoryTree::new(vec![
        ("src/a.rs", "a".repeat(100)),
        ("src/skipped.rs", "s".repeat(50_001)),
    ]));
    let (sender, mut receiver) = ProgressSender::channel();
    let aggregator = RepositoryAggregator::new(tree, analyzer, config).with_progress(sender);

    let _report = aggregator.analyze_repository("acme", "widgets", "main").await;

    let mut events = Vec::new();
    while let Ok(event) = receiver.try_recv() {
        events.push(event);
    }

    assert_eq!(events.first(), Some(&ProgressEvent::Started { total_files: 2 }));
    assert!(events.iter().any(|e| matches!(
        e,
        ProgressEvent::FileAnalyzed { path, .. } if path == "src/a.rs"
    )));
    assert!(events.iter().any(|e| matches!(
        e,
        ProgressEvent::FileSkipped { path, chars: 50_001 } if path == "src/skipped.rs"
    )));
    assert!(matches!(
        events.last(),
        Some(ProgressEvent::Completed { .. })
    ));
}

#[tokio::test]
async fn test_feature_generation_is_deterministic() {
    let calls = Arc::new(AtomicUsize::new(0));
    let calls_clone = Arc::clone(&calls);
    let provider = Arc::new(ScriptedProvider::new(move |request: &ChatRequest| {
        calls_clone.fetch_add(1, Ordering::SeqCst);
        Ok(format!("fn feature() {{ /* {} */ }}", user_content(request).len()))
    }));
    let analyzer = FileAnalyzer::new(provider, test_config());

    let first = analyzer.generate_feature("add retry logic").await;
    let second = analyzer.generate_feature("add retry logic").await;

    assert_eq!(first, second);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_feature_generation_failure_degrades() {
    use reposcribe_analysis::FEATURE_FAILURE_TEXT;

    let provider = Arc::new(ScriptedProvider::new(|_| {
        Err(ProviderError::NetworkError("down".to_string()))
    }));
    let analyzer = FileAnalyzer::new(provider, test_config());

    let code = analyzer.generate_feature("add retry logic").await;
    assert_eq!(code, FEATURE_FAILURE_TEXT);
}
