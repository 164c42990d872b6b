use std::path::Path;

use serde::{Deserialize, Serialize};

/// Metadata every index adapter attaches to a hit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CandidateMetadata {
    pub row: usize,
    pub evidence_ref: String,
}

impl CandidateMetadata {
    pub fn new(row: usize, evidence_ref: impl Into<String>) -> Self {
        Self {
            row,
            evidence_ref: evidence_ref.into(),
        }
    }

    /// File stem of the evidence reference (`nitto_PDF/slide_31.png` -> `slide_31`).
    pub fn evidence_stem(&self) -> &str {
        Path::new(&self.evidence_ref)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&self.evidence_ref)
    }

    /// Whether this reference names the given anchor. Whole-stem comparison,
    /// so `slide_1` does not match `slide_10`.
    pub fn matches_anchor(&self, anchor: &str) -> bool {
        self.evidence_stem() == anchor
    }
}

/// One hit from an index, transient per query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievedCandidate {
    pub content: String,
    pub metadata: CandidateMetadata,
    /// Similarity score when the index reports one.
    pub score: Option<f64>,
}

impl RetrievedCandidate {
    pub fn new(content: impl Into<String>, metadata: CandidateMetadata) -> Self {
        Self {
            content: content.into(),
            metadata,
            score: None,
        }
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    pub fn evidence_ref(&self) -> &str {
        &self.metadata.evidence_ref
    }
}

/// Ordered, deduplicated retrieval result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FusedRanking {
    candidates: Vec<RetrievedCandidate>,
}

impl FusedRanking {
    pub fn new(candidates: Vec<RetrievedCandidate>) -> Self {
        Self { candidates }
    }

    pub fn candidates(&self) -> &[RetrievedCandidate] {
        &self.candidates
    }

    pub fn first(&self) -> Option<&RetrievedCandidate> {
        self.candidates.first()
    }

    pub fn get(&self, index: usize) -> Option<&RetrievedCandidate> {
        self.candidates.get(index)
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RetrievedCandidate> {
        self.candidates.iter()
    }

    pub fn into_vec(self) -> Vec<RetrievedCandidate> {
        self.candidates
    }
}

impl IntoIterator for FusedRanking {
    type Item = RetrievedCandidate;
    type IntoIter = std::vec::IntoIter<RetrievedCandidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.candidates.into_iter()
    }
}
