//! Brute-force cosine index over record embeddings.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;
use verity_core::errors::{RetrievalError, VerityResult};
use verity_core::models::{CandidateMetadata, Corpus, FaqEntry, RetrievedCandidate};
use verity_core::traits::{IEmbeddingProvider, IVectorIndex};

struct Entry {
    content: String,
    metadata: CandidateMetadata,
    embedding: Vec<f32>,
}

pub struct InMemoryVectorIndex {
    entries: Vec<Entry>,
    embedder: Arc<dyn IEmbeddingProvider>,
}

fn cosine(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() {
        return 0.0;
    }
    let mut dot = 0.0f64;
    let mut na = 0.0f64;
    let mut nb = 0.0f64;
    for (x, y) in a.iter().zip(b) {
        dot += (*x as f64) * (*y as f64);
        na += (*x as f64) * (*x as f64);
        nb += (*y as f64) * (*y as f64);
    }
    if na <= f64::EPSILON || nb <= f64::EPSILON {
        return 0.0;
    }
    dot / (na.sqrt() * nb.sqrt())
}

impl InMemoryVectorIndex {
    /// Embed every `(content, metadata)` item once.
    pub async fn build(
        items: Vec<(String, CandidateMetadata)>,
        embedder: Arc<dyn IEmbeddingProvider>,
    ) -> VerityResult<Self> {
        let texts: Vec<String> = items.iter().map(|(c, _)| c.clone()).collect();
        let embeddings = embedder.embed_batch(&texts).await.map_err(|e| {
            RetrievalError::IndexBuild {
                reason: format!("embedding failed: {e}"),
            }
        })?;
        let entries = items
            .into_iter()
            .zip(embeddings)
            .map(|((content, metadata), embedding)| Entry {
                content,
                metadata,
                embedding,
            })
            .collect::<Vec<_>>();
        debug!(entries = entries.len(), provider = embedder.name(), "vector index built");
        Ok(Self { entries, embedder })
    }

    /// One entry per corpus record, over its page content.
    pub async fn from_corpus(
        corpus: &Corpus,
        embedder: Arc<dyn IEmbeddingProvider>,
    ) -> VerityResult<Self> {
        let items = corpus
            .records()
            .iter()
            .map(|r| {
                (
                    r.page_content(),
                    CandidateMetadata::new(r.row, r.evidence_ref.clone()),
                )
            })
            .collect();
        Self::build(items, embedder).await
    }

    /// One entry per FAQ pair. FAQ hits carry `faq_{i}` as their reference.
    pub async fn from_faq(
        entries: &[FaqEntry],
        embedder: Arc<dyn IEmbeddingProvider>,
    ) -> VerityResult<Self> {
        let items = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.text(), CandidateMetadata::new(i, format!("faq_{i}"))))
            .collect();
        Self::build(items, embedder).await
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl IVectorIndex for InMemoryVectorIndex {
    async fn search(&self, query: &str, k: usize) -> VerityResult<Vec<RetrievedCandidate>> {
        if k == 0 || self.entries.is_empty() {
            return Ok(Vec::new());
        }
        let q = self.embedder.embed(query).await.map_err(|e| RetrievalError::IndexFailed {
            index: "vector".to_string(),
            reason: e.to_string(),
        })?;

        let mut scored: Vec<(usize, f64)> = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, e)| (i, cosine(&q, &e.embedding)))
            .collect();
        // Stable: equal scores keep insertion order.
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        Ok(scored
            .into_iter()
            .take(k)
            .map(|(i, score)| {
                let e = &self.entries[i];
                RetrievedCandidate::new(e.content.clone(), e.metadata.clone()).with_score(score)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cosine_of_identical_is_one() {
        let v = [0.3f32, 0.4, 0.5];
        assert!((cosine(&v, &v) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn cosine_handles_zero_and_mismatch() {
        assert_eq!(cosine(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
        assert_eq!(cosine(&[1.0], &[1.0, 0.0]), 0.0);
    }
}
