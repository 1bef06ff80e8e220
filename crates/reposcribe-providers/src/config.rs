//! Configuration management for providers

use crate::error::ProviderError;
use crate::models::ProviderSettings;

/// Environment variable holding the OpenAI API key
const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Environment variable overriding the OpenAI base URL
const OPENAI_BASE_URL_VAR: &str = "OPENAI_BASE_URL";

/// Load OpenAI provider settings from the environment.
///
/// Environment variables take precedence over anything baked into the
/// binary; `.env` loading is the caller's concern.
pub fn load_openai_settings() -> Result<ProviderSettings, ProviderError> {
    let api_key = std::env::var(OPENAI_API_KEY_VAR)
        .map_err(|_| ProviderError::ConfigError(format!("{} is not set", OPENAI_API_KEY_VAR)))?;

    if api_key.is_empty() {
        return Err(ProviderError::ConfigError(format!(
            "{} is empty",
            OPENAI_API_KEY_VAR
        )));
    }

    Ok(ProviderSettings {
        api_key: Some(api_key),
        base_url: std::env::var(OPENAI_BASE_URL_VAR).ok(),
        timeout: None,
    })
}
