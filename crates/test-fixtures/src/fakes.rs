//! Fake collaborators with call counters.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use verity_core::errors::{LlmError, RetrievalError, VerityResult};
use verity_core::models::{FusedRanking, RetrievedCandidate};
use verity_core::traits::{ILexicalIndex, ILlmClient, IRetriever, IVectorIndex, ResponseFormat};

// ── LLM ─────────────────────────────────────────────────────────────────────

/// One scripted LLM outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedReply {
    Text(String),
    Fail,
}

impl From<&str> for ScriptedReply {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// LLM fake. Each call is resolved in order: the first rule whose marker
/// appears in the prompt, else the next queued reply, else the default.
pub struct ScriptedLlm {
    rules: Vec<(String, ScriptedReply)>,
    queue: Mutex<VecDeque<ScriptedReply>>,
    default: ScriptedReply,
    prompts: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl ScriptedLlm {
    /// Replies served in call order, then the default (`"0"`).
    pub fn new<R: Into<ScriptedReply>>(replies: impl IntoIterator<Item = R>) -> Self {
        Self {
            rules: Vec::new(),
            queue: Mutex::new(replies.into_iter().map(Into::into).collect()),
            default: ScriptedReply::Text("0".to_string()),
            prompts: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Every call fails.
    pub fn failing() -> Self {
        Self::new(Vec::<ScriptedReply>::new()).with_default(ScriptedReply::Fail)
    }

    /// Answer any prompt containing `marker` with `reply`.
    pub fn with_rule(mut self, marker: &str, reply: impl Into<ScriptedReply>) -> Self {
        self.rules.push((marker.to_string(), reply.into()));
        self
    }

    pub fn with_default(mut self, reply: impl Into<ScriptedReply>) -> Self {
        self.default = reply.into();
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Every prompt received, in order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }

    /// Number of prompts containing `marker`.
    pub fn calls_matching(&self, marker: &str) -> usize {
        self.prompts().iter().filter(|p| p.contains(marker)).count()
    }

    fn resolve(&self, prompt: &str) -> ScriptedReply {
        if let Some((_, reply)) = self.rules.iter().find(|(m, _)| prompt.contains(m.as_str())) {
            return reply.clone();
        }
        self.queue
            .lock()
            .ok()
            .and_then(|mut q| q.pop_front())
            .unwrap_or_else(|| self.default.clone())
    }
}

#[async_trait]
impl ILlmClient for ScriptedLlm {
    async fn generate(&self, prompt: &str, _format: ResponseFormat) -> VerityResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut p) = self.prompts.lock() {
            p.push(prompt.to_string());
        }
        match self.resolve(prompt) {
            ScriptedReply::Text(t) => Ok(t),
            ScriptedReply::Fail => Err(LlmError::RequestFailed {
                reason: "scripted failure".to_string(),
            }
            .into()),
        }
    }

    fn model(&self) -> &str {
        "scripted"
    }
}

// ── Indices ─────────────────────────────────────────────────────────────────

/// Index returning a fixed ranking, truncated to `k`. Serves as either a
/// lexical or a vector index.
pub struct StaticIndex {
    hits: Vec<RetrievedCandidate>,
    calls: AtomicUsize,
}

impl StaticIndex {
    pub fn new(hits: Vec<RetrievedCandidate>) -> Self {
        Self {
            hits,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hits(&self, k: usize) -> Vec<RetrievedCandidate> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.hits.iter().take(k).cloned().collect()
    }
}

#[async_trait]
impl ILexicalIndex for StaticIndex {
    async fn search(&self, _query: &str, k: usize) -> VerityResult<Vec<RetrievedCandidate>> {
        Ok(self.hits(k))
    }
}

#[async_trait]
impl IVectorIndex for StaticIndex {
    async fn search(&self, _query: &str, k: usize) -> VerityResult<Vec<RetrievedCandidate>> {
        Ok(self.hits(k))
    }
}

/// Index that always fails.
pub struct FailingIndex {
    name: &'static str,
    calls: AtomicUsize,
}

impl FailingIndex {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn fail(&self) -> VerityResult<Vec<RetrievedCandidate>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(RetrievalError::IndexFailed {
            index: self.name.to_string(),
            reason: "offline".to_string(),
        }
        .into())
    }
}

#[async_trait]
impl ILexicalIndex for FailingIndex {
    async fn search(&self, _query: &str, _k: usize) -> VerityResult<Vec<RetrievedCandidate>> {
        self.fail()
    }
}

#[async_trait]
impl IVectorIndex for FailingIndex {
    async fn search(&self, _query: &str, _k: usize) -> VerityResult<Vec<RetrievedCandidate>> {
        self.fail()
    }
}

// ── Retriever ───────────────────────────────────────────────────────────────

/// Retriever returning a fixed candidate list truncated to `top_k`, or
/// failing with [`RetrievalError::Unavailable`].
pub struct StaticRetriever {
    candidates: Option<Vec<RetrievedCandidate>>,
    calls: AtomicUsize,
    requested: Mutex<Vec<usize>>,
}

impl StaticRetriever {
    pub fn new(candidates: Vec<RetrievedCandidate>) -> Self {
        Self {
            candidates: Some(candidates),
            calls: AtomicUsize::new(0),
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            candidates: None,
            calls: AtomicUsize::new(0),
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// `top_k` of every call, in order.
    pub fn requested_top_k(&self) -> Vec<usize> {
        self.requested.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl IRetriever for StaticRetriever {
    async fn retrieve(&self, _query: &str, top_k: usize) -> VerityResult<FusedRanking> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut r) = self.requested.lock() {
            r.push(top_k);
        }
        match &self.candidates {
            Some(c) => Ok(FusedRanking::new(c.iter().take(top_k).cloned().collect())),
            None => Err(RetrievalError::Unavailable {
                lexical: "offline".to_string(),
                vector: "offline".to_string(),
            }
            .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use verity_core::models::CandidateMetadata;

    fn cand(i: usize) -> RetrievedCandidate {
        RetrievedCandidate::new(format!("c{i}"), CandidateMetadata::new(i, format!("s/slide_{i}.png")))
    }

    #[tokio::test]
    async fn scripted_llm_rules_then_queue_then_default() {
        let llm = ScriptedLlm::new(["first", "second"]).with_rule("CLASSIFY", "2");
        assert_eq!(llm.generate("CLASSIFY this", ResponseFormat::Text).await.unwrap(), "2");
        assert_eq!(llm.generate("a", ResponseFormat::Text).await.unwrap(), "first");
        assert_eq!(llm.generate("b", ResponseFormat::Text).await.unwrap(), "second");
        assert_eq!(llm.generate("c", ResponseFormat::Text).await.unwrap(), "0");
        assert_eq!(llm.call_count(), 4);
        assert_eq!(llm.calls_matching("CLASSIFY"), 1);
    }

    #[tokio::test]
    async fn failing_llm_errors() {
        let llm = ScriptedLlm::failing();
        assert!(llm.generate("x", ResponseFormat::Json).await.is_err());
        assert_eq!(llm.call_count(), 1);
    }

    #[tokio::test]
    async fn static_retriever_truncates_and_records() {
        let r = StaticRetriever::new((0..5).map(cand).collect());
        assert_eq!(r.retrieve("q", 3).await.unwrap().len(), 3);
        assert_eq!(r.requested_top_k(), vec![3]);
        assert!(StaticRetriever::unavailable().retrieve("q", 3).await.is_err());
    }

    #[tokio::test]
    async fn failing_index_counts() {
        let idx = FailingIndex::new("lexical");
        assert!(ILexicalIndex::search(&idx, "q", 3).await.is_err());
        assert_eq!(idx.call_count(), 1);
    }
}
