use async_trait::async_trait;

use crate::errors::VerityResult;
use crate::models::FusedRanking;

/// Ranked retrieval over the knowledge corpus.
#[async_trait]
pub trait IRetriever: Send + Sync {
    /// At most `top_k` candidates, best first.
    async fn retrieve(&self, query: &str, top_k: usize) -> VerityResult<FusedRanking>;
}
