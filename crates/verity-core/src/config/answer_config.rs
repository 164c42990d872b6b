use serde::{Deserialize, Serialize};

use super::defaults;
use crate::models::RetrievalMode;

/// Answer synthesis and selection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnswerConfig {
    /// Hard ceiling on answer length, in characters.
    pub max_chars: usize,
    /// A sentence cut is only taken at or beyond this character position.
    pub min_sentence_cut: usize,
    /// Position of the hard cut when no usable sentence boundary exists.
    pub hard_cut: usize,
    /// Evidence shorter than this is considered too weak to cite.
    pub min_evidence_chars: usize,
    /// FAQ entries folded into the prompt.
    pub faq_top_k: usize,
    /// Upper bound on candidates requested from multi-best selection.
    pub multi_top_n: usize,
    /// Characters of each candidate shown to the selector.
    pub excerpt_chars: usize,
    /// Retrieval mode used when the caller does not choose one.
    pub default_mode: RetrievalMode,
}

impl Default for AnswerConfig {
    fn default() -> Self {
        Self {
            max_chars: defaults::DEFAULT_MAX_CHARS,
            min_sentence_cut: defaults::DEFAULT_MIN_SENTENCE_CUT,
            hard_cut: defaults::DEFAULT_HARD_CUT,
            min_evidence_chars: defaults::DEFAULT_MIN_EVIDENCE_CHARS,
            faq_top_k: defaults::DEFAULT_FAQ_TOP_K,
            multi_top_n: defaults::DEFAULT_MULTI_TOP_N,
            excerpt_chars: defaults::DEFAULT_EXCERPT_CHARS,
            default_mode: RetrievalMode::Single,
        }
    }
}
