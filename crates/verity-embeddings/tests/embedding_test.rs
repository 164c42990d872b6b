//! Fallback-chain behaviour of the embedding engine.

use async_trait::async_trait;
use verity_core::config::EmbeddingConfig;
use verity_core::errors::{EmbeddingError, VerityResult};
use verity_core::traits::IEmbeddingProvider;
use verity_embeddings::degradation::DegradationChain;
use verity_embeddings::{EmbeddingEngine, HashedTfProvider};

struct BrokenProvider;

#[async_trait]
impl IEmbeddingProvider for BrokenProvider {
    async fn embed(&self, _: &str) -> VerityResult<Vec<f32>> {
        Err(EmbeddingError::InferenceFailed {
            reason: "offline".into(),
        }
        .into())
    }
    fn dimensions(&self) -> usize {
        64
    }
    fn name(&self) -> &str {
        "broken"
    }
    fn is_available(&self) -> bool {
        true
    }
}

struct WrongDims;

#[async_trait]
impl IEmbeddingProvider for WrongDims {
    async fn embed(&self, _: &str) -> VerityResult<Vec<f32>> {
        Ok(vec![1.0; 3])
    }
    fn dimensions(&self) -> usize {
        3
    }
    fn name(&self) -> &str {
        "wrong-dims"
    }
    fn is_available(&self) -> bool {
        true
    }
}

fn config(dims: usize) -> EmbeddingConfig {
    EmbeddingConfig {
        provider: "hashed".into(),
        dimensions: dims,
        cache_size: 16,
        ..Default::default()
    }
}

#[tokio::test]
async fn failing_primary_falls_back_to_hashed() {
    let mut chain = DegradationChain::new();
    chain.push(Box::new(BrokenProvider));
    chain.push(Box::new(HashedTfProvider::new(64)));
    let engine = EmbeddingEngine::from_chain(chain, &config(64));

    let v = engine.embed_query("業績").await.unwrap();
    assert_eq!(v.len(), 64);
    assert_eq!(engine.fallback_count(), 1);
}

#[tokio::test]
async fn exhausted_chain_is_an_error_not_a_panic() {
    let mut chain = DegradationChain::new();
    chain.push(Box::new(BrokenProvider));
    let engine = EmbeddingEngine::from_chain(chain, &config(64));
    assert!(engine.embed_query("業績").await.is_err());
}

#[tokio::test]
async fn dimension_mismatch_is_rejected() {
    let mut chain = DegradationChain::new();
    chain.push(Box::new(WrongDims));
    let engine = EmbeddingEngine::from_chain(chain, &config(64));
    let err = engine.embed_query("業績").await.unwrap_err();
    assert!(err.to_string().contains("dimension mismatch"));
}

#[tokio::test]
async fn trait_dims_match_engine_dims() {
    let engine = EmbeddingEngine::new(&config(96));
    let provider: &dyn IEmbeddingProvider = &engine;
    assert_eq!(provider.dimensions(), 96);
    assert_eq!(provider.embed("").await.unwrap().len(), 96);
}
