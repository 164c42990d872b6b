use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::VerityResult;

/// Requested shape of the model reply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseFormat {
    #[default]
    Text,
    Json,
}

/// LLM inference service. Non-streaming, one prompt in, one string out.
#[async_trait]
pub trait ILlmClient: Send + Sync {
    async fn generate(&self, prompt: &str, format: ResponseFormat) -> VerityResult<String>;

    /// Model identifier, for logs.
    fn model(&self) -> &str;
}
