//! RepoScribe API entry point

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use reposcribe_analysis::{
    AnalysisConfig, FileAnalyzer, ProgressEvent, ProgressReceiver, ProgressSender,
    RepositoryAggregator,
};
use reposcribe_api::{ApiServer, AppState};
use reposcribe_github::{GitHubConfig, GitHubTreeProvider};
use reposcribe_providers::{load_openai_settings, OpenAiProvider, Provider};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(err) = run().await {
        error!("Startup failed: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let provider = build_provider()?;
    let tree = build_tree_provider()?;

    let config = AnalysisConfig::default();
    config.validate()?;

    let analyzer = Arc::new(FileAnalyzer::new(Arc::clone(&provider), config.clone()));

    let (progress, receiver) = ProgressSender::channel();
    spawn_progress_renderer(receiver);

    let aggregator = Arc::new(
        RepositoryAggregator::new(tree, Arc::clone(&analyzer), config.clone())
            .with_progress(progress),
    );

    let state = AppState::new(aggregator, analyzer, config.max_inline_chars);

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!(port, "Starting RepoScribe API");
    ApiServer::new(addr, state).run().await?;
    Ok(())
}

fn build_provider() -> Result<Arc<dyn Provider>, Box<dyn std::error::Error>> {
    let settings = load_openai_settings()?;
    let api_key = settings.api_key.ok_or("OPENAI_API_KEY is not set")?;

    let provider = match settings.base_url {
        Some(base_url) => OpenAiProvider::with_base_url(api_key, base_url)?,
        None => OpenAiProvider::new(api_key)?,
    };
    Ok(Arc::new(provider))
}

fn build_tree_provider() -> Result<Arc<GitHubTreeProvider>, Box<dyn std::error::Error>> {
    let token = std::env::var("GITHUB_TOKEN")
        .map_err(|_| "GITHUB_TOKEN is not set")?;
    let provider = GitHubTreeProvider::new(GitHubConfig::new(token))?;
    Ok(Arc::new(provider))
}

/// Render progress events as log lines so long analyses have a heartbeat
fn spawn_progress_renderer(mut receiver: ProgressReceiver) {
    tokio::spawn(async move {
        while let Some(event) = receiver.recv().await {
            match event {
                ProgressEvent::Started { total_files } => {
                    info!(total_files, "Analysis started");
                }
                ProgressEvent::FileAnalyzed {
                    path,
                    completed,
                    total,
                } => {
                    info!(path = %path, completed, total, "File analyzed");
                }
                ProgressEvent::FileSkipped { path, chars } => {
                    info!(path = %path, chars, "File skipped: exceeds size ceiling");
                }
                ProgressEvent::Completed { report_chars } => {
                    info!(report_chars, "Analysis complete");
                }
            }
        }
    });
}
