//! EmbeddingEngine: provider chain plus query cache. Implements `IEmbeddingProvider`.

use async_trait::async_trait;
use tracing::{debug, info};
use verity_core::config::EmbeddingConfig;
use verity_core::errors::{EmbeddingError, VerityResult};
use verity_core::traits::IEmbeddingProvider;

use crate::cache::QueryCache;
use crate::degradation::DegradationChain;
use crate::providers;

pub struct EmbeddingEngine {
    chain: DegradationChain,
    cache: QueryCache,
    dimensions: usize,
}

impl EmbeddingEngine {
    /// Configured primary provider, with the hashed provider as last resort.
    pub fn new(config: &EmbeddingConfig) -> Self {
        let mut chain = DegradationChain::new();
        chain.push(providers::create_provider(config));
        chain.push(Box::new(providers::HashedTfProvider::new(config.dimensions)));
        Self::from_chain(chain, config)
    }

    /// Engine over an explicit chain.
    pub fn from_chain(chain: DegradationChain, config: &EmbeddingConfig) -> Self {
        info!(
            provider = chain.active_provider_name(),
            dims = config.dimensions,
            "EmbeddingEngine initialized"
        );
        Self {
            chain,
            cache: QueryCache::new(config.cache_size),
            dimensions: config.dimensions,
        }
    }

    /// Embed a query, serving repeats from the cache.
    pub async fn embed_query(&self, query: &str) -> VerityResult<Vec<f32>> {
        let key = QueryCache::key(query);
        if let Some(vec) = self.cache.get(&key) {
            debug!(hash = %key, "query embedding cache hit");
            return Ok(vec);
        }
        let vec = self.chain.embed(query).await?;
        self.validate(&vec)?;
        self.cache.insert(key, vec.clone());
        Ok(vec)
    }

    pub fn active_provider(&self) -> &str {
        self.chain.active_provider_name()
    }

    pub fn fallback_count(&self) -> u64 {
        self.chain.fallback_count()
    }

    fn validate(&self, vec: &[f32]) -> VerityResult<()> {
        if vec.len() != self.dimensions {
            return Err(EmbeddingError::DimensionMismatch {
                expected: self.dimensions,
                actual: vec.len(),
            }
            .into());
        }
        Ok(())
    }
}

#[async_trait]
impl IEmbeddingProvider for EmbeddingEngine {
    async fn embed(&self, text: &str) -> VerityResult<Vec<f32>> {
        self.embed_query(text).await
    }

    async fn embed_batch(&self, texts: &[String]) -> VerityResult<Vec<Vec<f32>>> {
        let vecs = self.chain.embed_batch(texts).await?;
        for v in &vecs {
            self.validate(v)?;
        }
        Ok(vecs)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "verity-embedding-engine"
    }

    fn is_available(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hashed_engine() -> EmbeddingEngine {
        EmbeddingEngine::new(&EmbeddingConfig {
            provider: "hashed".to_string(),
            dimensions: 128,
            cache_size: 100,
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn embed_query_returns_correct_dims() {
        let engine = hashed_engine();
        assert_eq!(engine.embed_query("事業内容").await.unwrap().len(), 128);
    }

    #[tokio::test]
    async fn embed_query_caches() {
        let engine = hashed_engine();
        let a = engine.embed_query("cached query").await.unwrap();
        let b = engine.embed_query("cached query").await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn trait_impl_batch() {
        let engine = hashed_engine();
        let provider: &dyn IEmbeddingProvider = &engine;
        let texts = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let vecs = provider.embed_batch(&texts).await.unwrap();
        assert_eq!(vecs.len(), 3);
        assert!(vecs.iter().all(|v| v.len() == 128));
    }

    #[test]
    fn unknown_provider_falls_back_to_hashed() {
        let engine = EmbeddingEngine::new(&EmbeddingConfig {
            provider: "onnx".to_string(),
            ..Default::default()
        });
        assert_eq!(engine.active_provider(), "hashed-tf");
    }
}
