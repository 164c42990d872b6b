//! HTTP embedding provider for the Generative Language `embedContent` API.
//!
//! Bounded retry with exponential backoff. Authentication failures mark the
//! provider unavailable so the chain stops calling it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use verity_core::config::EmbeddingConfig;
use verity_core::errors::{EmbeddingError, VerityResult};
use verity_core::traits::IEmbeddingProvider;

const MAX_RETRIES: u32 = 3;
const BASE_BACKOFF_MS: u64 = 250;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    content: Content<'a>,
    #[serde(rename = "outputDimensionality")]
    output_dimensionality: usize,
}

#[derive(Deserialize)]
struct EmbedValues {
    values: Vec<f32>,
}

#[derive(Deserialize)]
struct EmbedResponse {
    embedding: EmbedValues,
}

/// Remote embedding provider.
pub struct ApiEmbeddingProvider {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
    dimensions: usize,
    available: AtomicBool,
}

impl ApiEmbeddingProvider {
    pub fn new(config: &EmbeddingConfig, api_key: impl Into<String>) -> VerityResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| EmbeddingError::ProviderUnavailable {
                provider: format!("api: {e}"),
            })?;
        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: api_key.into(),
            dimensions: config.dimensions,
            available: AtomicBool::new(true),
        })
    }

    /// Build from config, reading the key from `config.api_key_env`.
    pub fn from_env(config: &EmbeddingConfig) -> VerityResult<Self> {
        let key = std::env::var(&config.api_key_env).map_err(|_| {
            EmbeddingError::ProviderUnavailable {
                provider: format!("api: {} is not set", config.api_key_env),
            }
        })?;
        Self::new(config, key)
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:embedContent?key={}",
            self.endpoint, self.model, self.api_key
        )
    }

    async fn request_once(&self, text: &str) -> Result<Vec<f32>, (bool, String)> {
        let body = EmbedRequest {
            content: Content {
                parts: [Part { text }],
            },
            output_dimensionality: self.dimensions,
        };
        let resp = self
            .client
            .post(self.url())
            .json(&body)
            .send()
            .await
            .map_err(|e| (true, format!("request failed: {e}")))?;

        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            self.available.store(false, Ordering::Relaxed);
            return Err((false, format!("authentication rejected ({status})")));
        }
        if !status.is_success() {
            let retryable = status.is_server_error() || status == reqwest::StatusCode::TOO_MANY_REQUESTS;
            let text = resp.text().await.unwrap_or_default();
            return Err((retryable, format!("status {status}: {text}")));
        }

        let parsed: EmbedResponse = resp
            .json()
            .await
            .map_err(|e| (false, format!("malformed response: {e}")))?;
        Ok(parsed.embedding.values)
    }
}

#[async_trait]
impl IEmbeddingProvider for ApiEmbeddingProvider {
    async fn embed(&self, text: &str) -> VerityResult<Vec<f32>> {
        let mut attempt = 0;
        let values = loop {
            match self.request_once(text).await {
                Ok(values) => break values,
                Err((retryable, reason)) if retryable && attempt < MAX_RETRIES => {
                    let backoff = Duration::from_millis(BASE_BACKOFF_MS * 2u64.pow(attempt));
                    warn!(attempt, ?backoff, reason = %reason, "embedding request failed, retrying");
                    tokio::time::sleep(backoff).await;
                    attempt += 1;
                }
                Err((_, reason)) => {
                    return Err(EmbeddingError::InferenceFailed { reason }.into());
                }
            }
        };

        if values.len() != self.dimensions {
            return Err(EmbeddingError::DimensionMismatch {
                expected: self.dimensions,
                actual: values.len(),
            }
            .into());
        }
        debug!(model = %self.model, dims = values.len(), "remote embedding generated");
        Ok(values)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        &self.model
    }

    fn is_available(&self) -> bool {
        self.available.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_shape() {
        let body = EmbedRequest {
            content: Content {
                parts: [Part { text: "売上" }],
            },
            output_dimensionality: 8,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["content"]["parts"][0]["text"], "売上");
        assert_eq!(json["outputDimensionality"], 8);
    }

    #[test]
    fn url_includes_model_and_key() {
        let config = EmbeddingConfig {
            endpoint: "http://localhost:9/v1beta/".into(),
            model: "text-embedding-004".into(),
            ..Default::default()
        };
        let p = ApiEmbeddingProvider::new(&config, "k").unwrap();
        assert_eq!(
            p.url(),
            "http://localhost:9/v1beta/models/text-embedding-004:embedContent?key=k"
        );
    }

    #[tokio::test]
    async fn unreachable_endpoint_fails_without_panicking() {
        let config = EmbeddingConfig {
            endpoint: "http://127.0.0.1:9".into(),
            dimensions: 4,
            ..Default::default()
        };
        let p = ApiEmbeddingProvider::new(&config, "k").unwrap();
        assert!(p.embed("test").await.is_err());
    }
}
