//! Build-once lexical index cache.
//!
//! One index per corpus fingerprint, guarded by a single async lock so
//! concurrent first callers wait for one build instead of racing. A new
//! fingerprint replaces the index wholesale.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::info;
use verity_core::errors::{RetrievalError, VerityResult};
use verity_core::models::{Corpus, RetrievedCandidate};
use verity_core::traits::ILexicalIndex;

use super::fts5::Fts5LexicalIndex;
use crate::chunker;
use crate::tokenizer::Tokenizer;

struct Slot {
    fingerprint: String,
    index: Arc<Fts5LexicalIndex>,
}

pub struct LexicalIndexCache {
    slot: Mutex<Option<Slot>>,
    tokenizer: Arc<Tokenizer>,
    chunk_size: usize,
    builds: AtomicU64,
}

impl LexicalIndexCache {
    pub fn new(tokenizer: Arc<Tokenizer>, chunk_size: usize) -> Self {
        Self {
            slot: Mutex::new(None),
            tokenizer,
            chunk_size,
            builds: AtomicU64::new(0),
        }
    }

    /// The index for `corpus`, building it on first use or after the corpus changed.
    pub async fn index_for(&self, corpus: &Corpus) -> VerityResult<Arc<Fts5LexicalIndex>> {
        let mut slot = self.slot.lock().await;
        if let Some(existing) = slot.as_ref() {
            if existing.fingerprint == corpus.fingerprint() {
                return Ok(Arc::clone(&existing.index));
            }
        }

        let chunks = chunker::chunk_corpus(corpus, self.chunk_size);
        let index = Arc::new(Fts5LexicalIndex::build(&chunks, Arc::clone(&self.tokenizer))?);
        self.builds.fetch_add(1, Ordering::Relaxed);
        info!(
            fingerprint = %corpus.fingerprint(),
            records = corpus.len(),
            chunks = chunks.len(),
            "lexical index built"
        );
        *slot = Some(Slot {
            fingerprint: corpus.fingerprint().to_string(),
            index: Arc::clone(&index),
        });
        Ok(index)
    }

    /// Number of builds performed so far.
    pub fn build_count(&self) -> u64 {
        self.builds.load(Ordering::Relaxed)
    }
}

/// `ILexicalIndex` over a corpus, resolved through the shared cache on every search.
pub struct CachedLexicalIndex {
    cache: Arc<LexicalIndexCache>,
    corpus: Arc<Corpus>,
}

impl CachedLexicalIndex {
    pub fn new(cache: Arc<LexicalIndexCache>, corpus: Arc<Corpus>) -> Self {
        Self { cache, corpus }
    }
}

#[async_trait]
impl ILexicalIndex for CachedLexicalIndex {
    async fn search(&self, query: &str, k: usize) -> VerityResult<Vec<RetrievedCandidate>> {
        let index = self.cache.index_for(&self.corpus).await?;
        let query = query.to_string();
        tokio::task::spawn_blocking(move || index.search_sync(&query, k))
            .await
            .map_err(|e| RetrievalError::IndexFailed {
                index: "lexical".to_string(),
                reason: format!("search task failed: {e}"),
            })?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use verity_core::models::CorpusRecord;

    fn corpus(body: &str) -> Corpus {
        Corpus::new(vec![CorpusRecord {
            row: 0,
            title: "概要".into(),
            body: body.into(),
            evidence_ref: "deck/slide_1.png".into(),
        }])
        .unwrap()
    }

    #[tokio::test]
    async fn same_fingerprint_builds_once() {
        let cache = LexicalIndexCache::new(Arc::new(Tokenizer::default()), 300);
        let c = corpus("粘着テープ");
        cache.index_for(&c).await.unwrap();
        cache.index_for(&c).await.unwrap();
        assert_eq!(cache.build_count(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn concurrent_searches_share_one_index() {
        let cache = Arc::new(LexicalIndexCache::new(Arc::new(Tokenizer::default()), 300));
        let index = Arc::new(CachedLexicalIndex::new(
            Arc::clone(&cache),
            Arc::new(corpus("粘着テープと光学フィルム")),
        ));
        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let index = Arc::clone(&index);
                tokio::spawn(async move { index.search("粘着テープ", 5).await })
            })
            .collect();
        for task in tasks {
            let hits = task.await.unwrap().unwrap();
            assert_eq!(hits[0].metadata.evidence_ref, "deck/slide_1.png");
        }
        assert_eq!(cache.build_count(), 1);
    }

    #[tokio::test]
    async fn changed_corpus_rebuilds() {
        let cache = LexicalIndexCache::new(Arc::new(Tokenizer::default()), 300);
        cache.index_for(&corpus("粘着テープ")).await.unwrap();
        cache.index_for(&corpus("光学フィルム")).await.unwrap();
        assert_eq!(cache.build_count(), 2);
    }
}
