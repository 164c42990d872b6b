use serde::{Deserialize, Serialize};

use super::candidate::{CandidateMetadata, RetrievedCandidate};

/// Text grounding an answer, with the reference that travels to the response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evidence {
    pub text: String,
    pub metadata: CandidateMetadata,
    /// False when the text is a stand-in rather than retrieved corpus content.
    pub from_corpus: bool,
}

impl Evidence {
    /// Evidence from one selected candidate.
    pub fn from_candidate(candidate: &RetrievedCandidate) -> Self {
        Self {
            text: candidate.content.clone(),
            metadata: candidate.metadata.clone(),
            from_corpus: true,
        }
    }

    /// Evidence from several candidates, most relevant first. The reference
    /// is taken from the first one. Returns `None` for an empty slice.
    pub fn from_candidates(candidates: &[RetrievedCandidate]) -> Option<Self> {
        let first = candidates.first()?;
        let text = candidates
            .iter()
            .map(|c| c.content.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        Some(Self {
            text,
            metadata: first.metadata.clone(),
            from_corpus: true,
        })
    }

    /// Stand-in evidence carrying the fallback reference.
    pub fn fallback(text: impl Into<String>, row: usize, evidence_ref: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            metadata: CandidateMetadata::new(row, evidence_ref),
            from_corpus: false,
        }
    }

    pub fn evidence_ref(&self) -> &str {
        &self.metadata.evidence_ref
    }

    /// Character count, not bytes.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}
