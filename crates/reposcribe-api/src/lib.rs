//! RepoScribe HTTP API
//!
//! Thin delivery surface over the analysis pipeline: request parsing,
//! response packaging and progress rendering. No pipeline logic lives here.

pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod server;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use server::ApiServer;
pub use state::AppState;
