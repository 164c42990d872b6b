//! # verity-embeddings
//!
//! Embedding generation for the vector index. A configured primary provider
//! (HTTP API or the local hashed fallback) sits in a fallback chain that always
//! ends with the hashed provider, and query embeddings are cached by content hash.

pub mod cache;
pub mod degradation;
pub mod engine;
pub mod providers;

pub use engine::EmbeddingEngine;
pub use providers::{ApiEmbeddingProvider, HashedTfProvider};
