//! # verity-retrieval
//!
//! Hybrid retrieval over the knowledge corpus.
//! - FTS5 lexical index over tokenized chunks, built once per corpus fingerprint
//! - in-memory cosine vector index over record embeddings
//! - weighted Reciprocal Rank Fusion with category-dependent weights
//! - deterministic post-fusion priority overrides and exclusions

pub mod chunker;
pub mod engine;
pub mod faq;
pub mod lexical;
pub mod overrides;
pub mod search;
pub mod tokenizer;
pub mod weights;

pub use engine::HybridRetriever;
pub use faq::FaqRetriever;
pub use lexical::{CachedLexicalIndex, Fts5LexicalIndex, LexicalIndexCache};
pub use search::vector_index::InMemoryVectorIndex;
pub use tokenizer::Tokenizer;
pub use weights::{FusionWeights, WeightMatrix};
