//! RepoScribe AI Providers - abstraction layer for text-generation services
//!
//! This crate provides a consistent interface for submitting bounded chat
//! completion requests to an AI provider without the rest of the pipeline
//! knowing which vendor is behind it.

pub mod config;
pub mod error;
pub mod models;
pub mod provider;
pub mod providers;

// Re-export commonly used types
pub use config::load_openai_settings;
pub use error::ProviderError;
pub use models::{
    ChatRequest, ChatResponse, FinishReason, Message, ModelInfo, ProviderSettings, TokenUsage,
};
pub use provider::Provider;
pub use providers::OpenAiProvider;
