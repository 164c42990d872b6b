//! HTTP client for the Generative Language `generateContent` API.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use verity_core::config::LlmConfig;
use verity_core::errors::{LlmError, VerityResult};
use verity_core::traits::{ILlmClient, ResponseFormat};

const BASE_BACKOFF_MS: u64 = 500;

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'static str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
    generation_config: GenerationConfig,
}

#[derive(Debug, Deserialize)]
struct ReplyPart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize, Default)]
struct ReplyContent {
    #[serde(default)]
    parts: Vec<ReplyPart>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: ReplyContent,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate.
    fn text(&self) -> Option<String> {
        let candidate = self.candidates.first()?;
        let text: String = candidate
            .content
            .parts
            .iter()
            .map(|p| p.text.as_str())
            .collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

enum Attempt {
    Retry(String),
    Fatal(LlmError),
}

/// Non-streaming Gemini client with bounded retry and exponential backoff.
pub struct GeminiClient {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
    max_retries: u32,
}

impl GeminiClient {
    pub fn new(config: &LlmConfig, api_key: impl Into<String>) -> VerityResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LlmError::Unavailable {
                reason: e.to_string(),
            })?;
        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: api_key.into(),
            max_retries: config.max_retries,
        })
    }

    /// Build from config, reading the key from `config.api_key_env`.
    pub fn from_env(config: &LlmConfig) -> VerityResult<Self> {
        let key = std::env::var(&config.api_key_env).map_err(|_| LlmError::Unavailable {
            reason: format!("{} is not set", config.api_key_env),
        })?;
        Self::new(config, key)
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.endpoint, self.model, self.api_key
        )
    }

    fn request_body(prompt: &str, format: ResponseFormat) -> GenerateRequest<'_> {
        GenerateRequest {
            contents: [Content {
                role: "user",
                parts: [Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: match format {
                    ResponseFormat::Json => Some("application/json"),
                    ResponseFormat::Text => None,
                },
            },
        }
    }

    async fn attempt(&self, body: &GenerateRequest<'_>) -> Result<String, Attempt> {
        let resp = self
            .client
            .post(self.url())
            .json(body)
            .send()
            .await
            .map_err(|e| Attempt::Retry(format!("request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            if status.is_server_error() || status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                return Err(Attempt::Retry(format!("status {status}: {text}")));
            }
            return Err(Attempt::Fatal(LlmError::Status {
                status: status.as_u16(),
                body: text,
            }));
        }

        let parsed: GenerateResponse = resp.json().await.map_err(|e| {
            Attempt::Fatal(LlmError::RequestFailed {
                reason: format!("malformed response: {e}"),
            })
        })?;
        parsed.text().ok_or_else(|| {
            Attempt::Fatal(LlmError::EmptyReply {
                model: self.model.clone(),
            })
        })
    }
}

#[async_trait]
impl ILlmClient for GeminiClient {
    async fn generate(&self, prompt: &str, format: ResponseFormat) -> VerityResult<String> {
        let body = Self::request_body(prompt, format);
        let mut attempt = 0;
        loop {
            match self.attempt(&body).await {
                Ok(text) => {
                    debug!(model = %self.model, ?format, chars = text.chars().count(), "llm reply received");
                    return Ok(text);
                }
                Err(Attempt::Retry(reason)) if attempt < self.max_retries => {
                    let backoff = Duration::from_millis(BASE_BACKOFF_MS * 2u64.pow(attempt));
                    warn!(attempt, ?backoff, reason = %reason, "llm request failed, retrying");
                    tokio::time::sleep(backoff).await;
                    attempt += 1;
                }
                Err(Attempt::Retry(reason)) => {
                    return Err(LlmError::RequestFailed { reason }.into());
                }
                Err(Attempt::Fatal(e)) => return Err(e.into()),
            }
        }
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_mode_sets_mime_type() {
        let body = GeminiClient::request_body("p", ResponseFormat::Json);
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "p");
        assert_eq!(
            json["generationConfig"]["responseMimeType"],
            "application/json"
        );
    }

    #[test]
    fn text_mode_omits_mime_type() {
        let body = GeminiClient::request_body("p", ResponseFormat::Text);
        let json = serde_json::to_value(&body).unwrap();
        assert!(json["generationConfig"].get("responseMimeType").is_none());
    }

    #[test]
    fn response_text_joins_parts() {
        let raw = r#"{"candidates":[{"content":{"parts":[{"text":"売上は"},{"text":"増加しました。"}]}}]}"#;
        let parsed: GenerateResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.text().unwrap(), "売上は増加しました。");
    }

    #[test]
    fn blank_response_is_empty() {
        let parsed: GenerateResponse = serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
        assert!(parsed.text().is_none());
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_request_failed() {
        let config = LlmConfig {
            endpoint: "http://127.0.0.1:9".into(),
            max_retries: 0,
            timeout_secs: 2,
            ..Default::default()
        };
        let client = GeminiClient::new(&config, "k").unwrap();
        let err = client.generate("p", ResponseFormat::Text).await.unwrap_err();
        assert!(err.to_string().contains("request failed"));
    }
}
