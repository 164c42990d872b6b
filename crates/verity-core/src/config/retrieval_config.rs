use serde::{Deserialize, Serialize};

use super::defaults;

/// Hybrid retrieval configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Candidates retrieved ahead of LLM evidence selection.
    pub selection_top_k: usize,
    /// Candidates retrieved for the hallucination retry.
    pub retry_top_k: usize,
    /// Zero-based position of the alternate candidate used by the retry.
    pub retry_position: usize,
    /// Candidates joined into the evidence for audit mode.
    pub audit_top_k: usize,
    /// RRF smoothing constant for weighted rank fusion.
    pub rrf_k: u32,
    /// Maximum characters per lexical chunk.
    pub chunk_size: usize,
    /// Below this many survivors the analytics exclusion re-prepends the overview anchor.
    pub exclusion_min_remaining: usize,
    /// Evidence stem of the introductory/overview record.
    pub overview_anchor: String,
    /// Evidence stem prioritized for performance queries.
    pub performance_anchor: String,
    /// Evidence stem removed from analytics queries.
    pub excluded_anchor: String,
    /// Content term removed from analytics queries.
    pub excluded_term: String,
    /// Optional newline-separated stopword list replacing the built-in one.
    pub stopwords_path: Option<String>,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            selection_top_k: defaults::DEFAULT_SELECTION_TOP_K,
            retry_top_k: defaults::DEFAULT_RETRY_TOP_K,
            retry_position: defaults::DEFAULT_RETRY_POSITION,
            audit_top_k: defaults::DEFAULT_AUDIT_TOP_K,
            rrf_k: defaults::DEFAULT_RRF_K,
            chunk_size: defaults::DEFAULT_CHUNK_SIZE,
            exclusion_min_remaining: defaults::DEFAULT_EXCLUSION_MIN_REMAINING,
            overview_anchor: defaults::DEFAULT_OVERVIEW_ANCHOR.to_string(),
            performance_anchor: defaults::DEFAULT_PERFORMANCE_ANCHOR.to_string(),
            excluded_anchor: defaults::DEFAULT_EXCLUDED_ANCHOR.to_string(),
            excluded_term: defaults::DEFAULT_EXCLUDED_TERM.to_string(),
            stopwords_path: None,
        }
    }
}
