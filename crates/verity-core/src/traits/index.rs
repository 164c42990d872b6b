use async_trait::async_trait;

use crate::errors::VerityResult;
use crate::models::RetrievedCandidate;

/// Term-frequency ranking index over chunked corpus text.
#[async_trait]
pub trait ILexicalIndex: Send + Sync {
    /// Up to `k` hits, best first. Scores are not comparable across indices.
    async fn search(&self, query: &str, k: usize) -> VerityResult<Vec<RetrievedCandidate>>;
}

/// Nearest-neighbour index over corpus embeddings.
#[async_trait]
pub trait IVectorIndex: Send + Sync {
    /// Up to `k` hits, best first, each carrying its similarity score.
    async fn search(&self, query: &str, k: usize) -> VerityResult<Vec<RetrievedCandidate>>;
}
