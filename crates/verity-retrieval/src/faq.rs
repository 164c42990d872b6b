//! FAQ retrieval: top entries from the FAQ vector index joined into one excerpt.

use std::sync::Arc;

use tracing::{debug, warn};
use verity_core::traits::IVectorIndex;

pub struct FaqRetriever {
    index: Arc<dyn IVectorIndex>,
    top_k: usize,
    default_text: String,
}

impl FaqRetriever {
    pub fn new(index: Arc<dyn IVectorIndex>, top_k: usize, default_text: impl Into<String>) -> Self {
        Self {
            index,
            top_k,
            default_text: default_text.into(),
        }
    }

    /// Newline-joined FAQ excerpt. Never fails: an index error or an empty
    /// result yields the default FAQ text.
    pub async fn excerpt(&self, query: &str) -> String {
        match self.index.search(query, self.top_k).await {
            Ok(hits) if !hits.is_empty() => {
                debug!(hits = hits.len(), "faq retrieved");
                hits.into_iter()
                    .map(|h| h.content)
                    .collect::<Vec<_>>()
                    .join("\n")
            }
            Ok(_) => self.default_text.clone(),
            Err(e) => {
                warn!(error = %e, "faq retrieval failed, using default faq");
                self.default_text.clone()
            }
        }
    }

    pub fn default_text(&self) -> &str {
        &self.default_text
    }
}
