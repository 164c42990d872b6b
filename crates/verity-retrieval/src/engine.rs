//! HybridRetriever: implements IRetriever over one lexical and one vector index.
//!
//! query → lexical + vector search → category weights → weighted RRF →
//! category override → truncate to top_k

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};
use verity_core::config::RetrievalConfig;
use verity_core::errors::{RetrievalError, VerityResult};
use verity_core::models::{FusedRanking, RetrievedCandidate};
use verity_core::traits::{ILexicalIndex, IRetriever, IVectorIndex};
use verity_core::QueryCategory;

use crate::overrides;
use crate::search::rrf_fusion;
use crate::weights::WeightMatrix;

pub struct HybridRetriever {
    lexical: Arc<dyn ILexicalIndex>,
    vector: Arc<dyn IVectorIndex>,
    weights: WeightMatrix,
    config: RetrievalConfig,
}

impl HybridRetriever {
    pub fn new(
        lexical: Arc<dyn ILexicalIndex>,
        vector: Arc<dyn IVectorIndex>,
        config: RetrievalConfig,
    ) -> Self {
        Self {
            lexical,
            vector,
            weights: WeightMatrix::default_weights(),
            config,
        }
    }

    /// Replace the category weight table.
    pub fn with_weights(mut self, weights: WeightMatrix) -> Self {
        self.weights = weights;
        self
    }

    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }

    /// Both searches run concurrently. One failing index degrades to an empty
    /// list; both failing is [`RetrievalError::Unavailable`].
    async fn gather(
        &self,
        query: &str,
        top_k: usize,
    ) -> VerityResult<(Vec<RetrievedCandidate>, Vec<RetrievedCandidate>)> {
        let (lexical, vector) = tokio::join!(
            self.lexical.search(query, top_k),
            self.vector.search(query, top_k)
        );
        match (lexical, vector) {
            (Ok(l), Ok(v)) => Ok((l, v)),
            (Ok(l), Err(e)) => {
                warn!(error = %e, "vector search failed, continuing lexical-only");
                Ok((l, Vec::new()))
            }
            (Err(e), Ok(v)) => {
                warn!(error = %e, "lexical search failed, continuing vector-only");
                Ok((Vec::new(), v))
            }
            (Err(le), Err(ve)) => Err(RetrievalError::Unavailable {
                lexical: le.to_string(),
                vector: ve.to_string(),
            }
            .into()),
        }
    }
}

#[async_trait]
impl IRetriever for HybridRetriever {
    async fn retrieve(&self, query: &str, top_k: usize) -> VerityResult<FusedRanking> {
        if top_k == 0 {
            return Ok(FusedRanking::default());
        }

        let (lexical, vector) = self.gather(query, top_k).await?;

        let category = QueryCategory::classify(query);
        let weights = self.weights.for_category(category);
        debug!(
            category = category.name(),
            w_lex = weights.lexical,
            w_vec = weights.vector,
            lexical = lexical.len(),
            vector = vector.len(),
            "fusing rankings"
        );

        let fused = rrf_fusion::fuse(&lexical, &vector, weights, self.config.rrf_k);
        let mut ranked = overrides::apply(category, fused, &self.config);
        ranked.truncate(top_k);

        info!(
            category = category.name(),
            candidates = ranked.len(),
            top = ranked.first().map(|c| c.evidence_ref()).unwrap_or(""),
            "retrieval complete"
        );
        Ok(FusedRanking::new(ranked))
    }
}
