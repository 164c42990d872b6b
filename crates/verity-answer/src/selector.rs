//! Evidence selector: the model picks the most relevant candidate(s) from the
//! fused ranking, or rejects them all.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info};
use verity_core::config::AnswerConfig;
use verity_core::models::{Evidence, RetrievalMode, RetrievedCandidate};
use verity_core::traits::{ILlmClient, ResponseFormat};
use verity_llm::{decode_index_list, first_integer};
use verity_observability::tracing_setup::events;

use crate::prompts;

/// Result of evidence selection.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    One(RetrievedCandidate),
    /// Most relevant first.
    Many(Vec<RetrievedCandidate>),
    /// Nothing qualified.
    None,
}

impl Selection {
    /// Evidence for the selected candidate(s); `None` when nothing was selected.
    pub fn into_evidence(self) -> Option<Evidence> {
        match self {
            Self::One(c) => Some(Evidence::from_candidate(&c)),
            Self::Many(cs) => Evidence::from_candidates(&cs),
            Self::None => None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

pub struct EvidenceSelector {
    llm: Arc<dyn ILlmClient>,
    excerpt_chars: usize,
    top_n: usize,
}

impl EvidenceSelector {
    pub fn new(llm: Arc<dyn ILlmClient>, config: &AnswerConfig) -> Self {
        Self {
            llm,
            excerpt_chars: config.excerpt_chars,
            top_n: config.multi_top_n,
        }
    }

    pub async fn select(
        &self,
        mode: RetrievalMode,
        query: &str,
        candidates: &[RetrievedCandidate],
    ) -> Selection {
        match mode {
            RetrievalMode::Single => self.select_single(query, candidates).await,
            RetrievalMode::Multi => self.select_multi(query, candidates).await,
            RetrievalMode::Direct => Self::select_direct(candidates),
        }
    }

    /// Top fused candidate, no model call.
    pub fn select_direct(candidates: &[RetrievedCandidate]) -> Selection {
        candidates
            .first()
            .cloned()
            .map_or(Selection::None, Selection::One)
    }

    /// The model answers one index, 1-based, or 0 for none. Anything it says
    /// that is not a usable index falls back to the first candidate.
    pub async fn select_single(&self, query: &str, candidates: &[RetrievedCandidate]) -> Selection {
        let Some(first) = candidates.first() else {
            return Selection::None;
        };
        let prompt = prompts::single_selection(query, candidates, self.excerpt_chars);
        let reply = match self.llm.generate(&prompt, ResponseFormat::Text).await {
            Ok(r) => r,
            Err(e) => {
                events::selection_degraded("single", &e.to_string());
                return Selection::One(first.clone());
            }
        };

        match first_integer(&reply) {
            Ok(0) => {
                info!("selector rejected every candidate");
                Selection::None
            }
            Ok(n) if (n as usize) <= candidates.len() => {
                let chosen = &candidates[n as usize - 1];
                debug!(index = n, evidence_ref = %chosen.evidence_ref(), "single-best selected");
                Selection::One(chosen.clone())
            }
            Ok(n) => {
                events::selection_degraded("single", &format!("index {n} out of range"));
                Selection::One(first.clone())
            }
            Err(e) => {
                events::selection_degraded("single", &e.to_string());
                Selection::One(first.clone())
            }
        }
    }

    /// The model answers `{"results": [..]}`, most relevant first. Indices
    /// outside the presented list are dropped, repeats are ignored, and at
    /// most `multi_top_n` survive. A failed call or unreadable reply selects
    /// nothing.
    pub async fn select_multi(&self, query: &str, candidates: &[RetrievedCandidate]) -> Selection {
        if candidates.is_empty() {
            return Selection::None;
        }
        let prompt = prompts::multi_selection(query, candidates, self.top_n);
        let indices = match self.llm.generate(&prompt, ResponseFormat::Json).await {
            Ok(reply) => match decode_index_list(&reply, "results") {
                Ok(indices) => indices,
                Err(e) => {
                    events::selection_degraded("multi", &e.to_string());
                    Vec::new()
                }
            },
            Err(e) => {
                events::selection_degraded("multi", &e.to_string());
                Vec::new()
            }
        };

        let mut seen = HashSet::new();
        let chosen: Vec<RetrievedCandidate> = indices
            .into_iter()
            .filter(|&i| i >= 1 && (i as usize) <= candidates.len())
            .filter(|&i| seen.insert(i))
            .take(self.top_n)
            .map(|i| candidates[i as usize - 1].clone())
            .collect();

        debug!(selected = chosen.len(), "multi-best selected");
        if chosen.is_empty() {
            Selection::None
        } else {
            Selection::Many(chosen)
        }
    }
}
