//! Fallback chain for embedding generation.
//!
//! Providers are tried in order; every fallback is logged.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::warn;
use verity_core::errors::{EmbeddingError, VerityError, VerityResult};
use verity_core::traits::IEmbeddingProvider;

#[derive(Default)]
pub struct DegradationChain {
    chain: Vec<Box<dyn IEmbeddingProvider>>,
    fallbacks: AtomicU64,
}

impl DegradationChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a provider to the end of the chain.
    pub fn push(&mut self, provider: Box<dyn IEmbeddingProvider>) {
        self.chain.push(provider);
    }

    /// Name of the first available provider.
    pub fn active_provider_name(&self) -> &str {
        self.chain
            .iter()
            .find(|p| p.is_available())
            .map(|p| p.name())
            .unwrap_or("none")
    }

    /// Times a request was served by something other than the primary provider.
    pub fn fallback_count(&self) -> u64 {
        self.fallbacks.load(Ordering::Relaxed)
    }

    /// Embed with the first provider that succeeds.
    pub async fn embed(&self, text: &str) -> VerityResult<Vec<f32>> {
        let mut last_error: Option<VerityError> = None;
        for (i, provider) in self.chain.iter().enumerate() {
            if !provider.is_available() {
                continue;
            }
            match provider.embed(text).await {
                Ok(vec) => {
                    if i > 0 {
                        self.fallbacks.fetch_add(1, Ordering::Relaxed);
                    }
                    return Ok(vec);
                }
                Err(e) => {
                    warn!(
                        provider = provider.name(),
                        error = %e,
                        "provider failed, trying next in chain"
                    );
                    last_error = Some(e);
                }
            }
        }
        Err(last_error.unwrap_or_else(|| {
            EmbeddingError::ProviderUnavailable {
                provider: "all providers exhausted".to_string(),
            }
            .into()
        }))
    }

    /// Embed a batch with the first provider that succeeds for the whole batch.
    pub async fn embed_batch(&self, texts: &[String]) -> VerityResult<Vec<Vec<f32>>> {
        let mut last_error: Option<VerityError> = None;
        for (i, provider) in self.chain.iter().enumerate() {
            if !provider.is_available() {
                continue;
            }
            match provider.embed_batch(texts).await {
                Ok(vecs) => {
                    if i > 0 {
                        self.fallbacks.fetch_add(1, Ordering::Relaxed);
                    }
                    return Ok(vecs);
                }
                Err(e) => {
                    warn!(
                        provider = provider.name(),
                        error = %e,
                        "batch embedding failed, trying next in chain"
                    );
                    last_error = Some(e);
                }
            }
        }
        Err(last_error.unwrap_or_else(|| {
            EmbeddingError::ProviderUnavailable {
                provider: "all providers exhausted".to_string(),
            }
            .into()
        }))
    }
}
