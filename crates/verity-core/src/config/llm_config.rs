use serde::{Deserialize, Serialize};

use super::defaults;

/// LLM inference service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Base URL of the generative API.
    pub endpoint: String,
    /// Model identifier.
    pub model: String,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    /// Per-request timeout.
    pub timeout_secs: u64,
    /// Retries after the first attempt, with exponential backoff.
    pub max_retries: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: defaults::DEFAULT_LLM_ENDPOINT.to_string(),
            model: defaults::DEFAULT_LLM_MODEL.to_string(),
            api_key_env: defaults::DEFAULT_LLM_API_KEY_ENV.to_string(),
            timeout_secs: defaults::DEFAULT_LLM_TIMEOUT_SECS,
            max_retries: defaults::DEFAULT_LLM_MAX_RETRIES,
        }
    }
}
