//! Wire a ready-to-serve pipeline from configuration and corpus data.

use std::path::Path;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::info;
use verity_core::errors::{ConfigError, RetrievalError, VerityResult};
use verity_core::models::{Corpus, CorpusRecord, FaqEntry};
use verity_core::traits::{IEmbeddingProvider, ILlmClient};
use verity_core::VerityConfig;
use verity_embeddings::EmbeddingEngine;
use verity_llm::GeminiClient;
use verity_observability::FileInteractionSink;
use verity_retrieval::{
    CachedLexicalIndex, FaqRetriever, HybridRetriever, InMemoryVectorIndex, LexicalIndexCache,
    Tokenizer,
};

use crate::pipeline::AnswerPipeline;

fn read_json<T: DeserializeOwned>(path: &Path) -> VerityResult<T> {
    let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    Ok(serde_json::from_str(&raw)?)
}

/// Load a JSON array of corpus records.
pub fn load_corpus(path: impl AsRef<Path>) -> VerityResult<Corpus> {
    Corpus::new(read_json::<Vec<CorpusRecord>>(path.as_ref())?)
}

/// Load a JSON array of FAQ entries.
pub fn load_faq(path: impl AsRef<Path>) -> VerityResult<Vec<FaqEntry>> {
    read_json(path.as_ref())
}

/// Production wiring: Gemini for generation, key read from the environment.
pub async fn build_pipeline(
    config: VerityConfig,
    corpus: Corpus,
    faq: &[FaqEntry],
) -> VerityResult<AnswerPipeline> {
    let llm: Arc<dyn ILlmClient> = Arc::new(GeminiClient::from_env(&config.llm)?);
    build_with_llm(config, corpus, faq, llm).await
}

/// Build indices over `corpus` and `faq`, then the pipeline around `llm`.
///
/// The lexical index is built here so the first request does not pay for it.
/// Interaction logs go to the configured files.
pub async fn build_with_llm(
    config: VerityConfig,
    corpus: Corpus,
    faq: &[FaqEntry],
    llm: Arc<dyn ILlmClient>,
) -> VerityResult<AnswerPipeline> {
    if corpus.is_empty() {
        return Err(RetrievalError::EmptyCorpus.into());
    }
    let corpus = Arc::new(corpus);
    let embedder: Arc<dyn IEmbeddingProvider> = Arc::new(EmbeddingEngine::new(&config.embedding));

    let tokenizer = Tokenizer::from_optional_file(config.retrieval.stopwords_path.as_deref())?;
    let cache = Arc::new(LexicalIndexCache::new(
        Arc::new(tokenizer),
        config.retrieval.chunk_size,
    ));
    cache.index_for(&corpus).await?;
    let lexical = Arc::new(CachedLexicalIndex::new(cache, Arc::clone(&corpus)));
    let vector = Arc::new(InMemoryVectorIndex::from_corpus(&corpus, Arc::clone(&embedder)).await?);
    let retriever = Arc::new(HybridRetriever::new(lexical, vector, config.retrieval.clone()));

    let sink = Arc::new(FileInteractionSink::from_config(&config.logging));
    let faq_top_k = config.answer.faq_top_k;
    let default_faq = config.persona.default_faq.clone();

    let mut pipeline = AnswerPipeline::new(config, retriever, llm)?.with_sink(sink);
    if !faq.is_empty() {
        let index = InMemoryVectorIndex::from_faq(faq, embedder).await?;
        pipeline = pipeline.with_faq(FaqRetriever::new(Arc::new(index), faq_top_k, default_faq));
    }

    info!(
        records = corpus.len(),
        faq = faq.len(),
        fingerprint = %corpus.fingerprint(),
        "answer pipeline ready"
    );
    Ok(pipeline)
}
