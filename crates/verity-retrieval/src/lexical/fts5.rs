//! In-memory SQLite FTS5 index ranked by BM25.

use std::sync::{Arc, Mutex};

use rusqlite::{params, Connection};
use tracing::debug;
use verity_core::errors::{RetrievalError, VerityResult};
use verity_core::models::{CandidateMetadata, RetrievedCandidate};

use crate::chunker::Chunk;
use crate::tokenizer::Tokenizer;

fn index_err(e: impl std::fmt::Display) -> RetrievalError {
    RetrievalError::IndexFailed {
        index: "lexical".to_string(),
        reason: e.to_string(),
    }
}

fn build_err(e: impl std::fmt::Display) -> RetrievalError {
    RetrievalError::IndexBuild {
        reason: e.to_string(),
    }
}

/// FTS5 table over pre-tokenized chunk text. Immutable once built.
pub struct Fts5LexicalIndex {
    conn: Mutex<Connection>,
    tokenizer: Arc<Tokenizer>,
    chunk_count: usize,
}

impl std::fmt::Debug for Fts5LexicalIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fts5LexicalIndex")
            .field("chunk_count", &self.chunk_count)
            .finish()
    }
}

impl Fts5LexicalIndex {
    pub fn build(chunks: &[Chunk], tokenizer: Arc<Tokenizer>) -> VerityResult<Self> {
        if chunks.is_empty() {
            return Err(RetrievalError::EmptyCorpus.into());
        }

        let mut conn = Connection::open_in_memory().map_err(build_err)?;
        conn.execute_batch(
            "CREATE VIRTUAL TABLE chunk_fts USING fts5(
                tokens,
                body UNINDEXED,
                row_idx UNINDEXED,
                evidence_ref UNINDEXED,
                tokenize = 'unicode61'
            );",
        )
        .map_err(build_err)?;

        let tx = conn.transaction().map_err(build_err)?;
        {
            let mut stmt = tx
                .prepare(
                    "INSERT INTO chunk_fts (tokens, body, row_idx, evidence_ref)
                     VALUES (?1, ?2, ?3, ?4)",
                )
                .map_err(build_err)?;
            for chunk in chunks {
                let tokens = tokenizer.tokenize(&chunk.content).join(" ");
                stmt.execute(params![
                    tokens,
                    chunk.content,
                    chunk.metadata.row as i64,
                    chunk.metadata.evidence_ref,
                ])
                .map_err(build_err)?;
            }
        }
        tx.commit().map_err(build_err)?;

        debug!(chunks = chunks.len(), "fts5 lexical index built");
        Ok(Self {
            conn: Mutex::new(conn),
            tokenizer,
            chunk_count: chunks.len(),
        })
    }

    pub fn chunk_count(&self) -> usize {
        self.chunk_count
    }

    /// OR of quoted query tokens, or `None` when the query has no indexable terms.
    fn match_expression(&self, query: &str) -> Option<String> {
        let mut seen = std::collections::HashSet::new();
        let tokens: Vec<String> = self
            .tokenizer
            .tokenize(query)
            .into_iter()
            .filter(|t| seen.insert(t.clone()))
            .collect();
        if tokens.is_empty() {
            return None;
        }
        Some(
            tokens
                .iter()
                .map(|t| format!("\"{}\"", t.replace('"', "\"\"")))
                .collect::<Vec<_>>()
                .join(" OR "),
        )
    }

    /// Blocking query. Async callers go through [`super::CachedLexicalIndex`],
    /// which runs it on the blocking pool.
    pub fn search_sync(&self, query: &str, k: usize) -> VerityResult<Vec<RetrievedCandidate>> {
        let Some(expr) = self.match_expression(query) else {
            return Ok(Vec::new());
        };
        if k == 0 {
            return Ok(Vec::new());
        }

        let conn = self
            .conn
            .lock()
            .map_err(|e| index_err(format!("connection lock poisoned: {e}")))?;
        let mut stmt = conn
            .prepare(
                "SELECT body, row_idx, evidence_ref, rank
                 FROM chunk_fts
                 WHERE chunk_fts MATCH ?1
                 ORDER BY rank
                 LIMIT ?2",
            )
            .map_err(index_err)?;

        let rows = stmt
            .query_map(params![expr, k as i64], |row| {
                let content: String = row.get(0)?;
                let row_idx: i64 = row.get(1)?;
                let evidence_ref: String = row.get(2)?;
                let rank: f64 = row.get(3)?;
                Ok((content, row_idx, evidence_ref, rank))
            })
            .map_err(index_err)?;

        let mut results = Vec::new();
        for r in rows {
            let (content, row_idx, evidence_ref, rank) = r.map_err(index_err)?;
            // FTS5 rank is negated BM25; flip so higher is better.
            results.push(
                RetrievedCandidate::new(
                    content,
                    CandidateMetadata::new(row_idx.max(0) as usize, evidence_ref),
                )
                .with_score(-rank),
            );
        }
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(row: usize, content: &str) -> Chunk {
        Chunk {
            content: content.to_string(),
            metadata: CandidateMetadata::new(row, format!("deck/slide_{row}.png")),
        }
    }

    fn index() -> Fts5LexicalIndex {
        Fts5LexicalIndex::build(
            &[
                chunk(1, "Title: 会社概要\n 日東電工は粘着テープの会社です"),
                chunk(31, "Title: 業績\n 2024年度の売上収益は増加しました"),
                chunk(40, "Title: 環境\n 環境負荷の低減に取り組んでいます"),
            ],
            Arc::new(Tokenizer::default()),
        )
        .unwrap()
    }

    #[test]
    fn matching_chunk_ranks_first() {
        let hits = index().search_sync("売上について", 3).unwrap();
        assert_eq!(hits[0].metadata.row, 31);
        assert!(hits[0].score.unwrap() > 0.0);
    }

    #[test]
    fn limit_is_respected() {
        let hits = index().search_sync("会社 売上 環境", 2).unwrap();
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn query_without_terms_returns_nothing() {
        assert!(index().search_sync("の？", 5).unwrap().is_empty());
    }

    #[test]
    fn quotes_in_query_are_escaped() {
        assert!(index().search_sync("\"売上\" OR", 5).is_ok());
    }

    #[test]
    fn empty_chunks_rejected() {
        let err = Fts5LexicalIndex::build(&[], Arc::new(Tokenizer::default())).unwrap_err();
        assert!(err.to_string().contains("empty"));
    }
}
