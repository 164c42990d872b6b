/// Verify every trait is implementable by creating mock structs.
use async_trait::async_trait;
use verity_core::errors::VerityResult;
use verity_core::models::*;
use verity_core::traits::*;

struct MockLexical;
#[async_trait]
impl ILexicalIndex for MockLexical {
    async fn search(&self, _: &str, _: usize) -> VerityResult<Vec<RetrievedCandidate>> {
        Ok(vec![])
    }
}

struct MockVector;
#[async_trait]
impl IVectorIndex for MockVector {
    async fn search(&self, _: &str, _: usize) -> VerityResult<Vec<RetrievedCandidate>> {
        Ok(vec![])
    }
}

struct MockLlm;
#[async_trait]
impl ILlmClient for MockLlm {
    async fn generate(&self, prompt: &str, _: ResponseFormat) -> VerityResult<String> {
        Ok(prompt.to_string())
    }
    fn model(&self) -> &str {
        "mock"
    }
}

struct MockEmbedder;
#[async_trait]
impl IEmbeddingProvider for MockEmbedder {
    async fn embed(&self, text: &str) -> VerityResult<Vec<f32>> {
        Ok(vec![text.len() as f32])
    }
    fn dimensions(&self) -> usize {
        1
    }
    fn name(&self) -> &str {
        "mock"
    }
    fn is_available(&self) -> bool {
        true
    }
}

struct MockRetriever;
#[async_trait]
impl IRetriever for MockRetriever {
    async fn retrieve(&self, _: &str, _: usize) -> VerityResult<FusedRanking> {
        Ok(FusedRanking::default())
    }
}

struct MockSink;
#[async_trait]
impl IInteractionSink for MockSink {
    async fn append(&self, _: &InteractionLogEntry) -> VerityResult<()> {
        Ok(())
    }
}

#[tokio::test]
async fn all_traits_are_object_safe_and_callable() {
    let lexical: Box<dyn ILexicalIndex> = Box::new(MockLexical);
    let vector: Box<dyn IVectorIndex> = Box::new(MockVector);
    let llm: Box<dyn ILlmClient> = Box::new(MockLlm);
    let embedder: Box<dyn IEmbeddingProvider> = Box::new(MockEmbedder);
    let retriever: Box<dyn IRetriever> = Box::new(MockRetriever);
    let sink: Box<dyn IInteractionSink> = Box::new(MockSink);

    assert!(lexical.search("q", 3).await.unwrap().is_empty());
    assert!(vector.search("q", 3).await.unwrap().is_empty());
    assert_eq!(llm.generate("p", ResponseFormat::Text).await.unwrap(), "p");
    let batch = embedder
        .embed_batch(&["ab".to_string(), "abc".to_string()])
        .await
        .unwrap();
    assert_eq!(batch, vec![vec![2.0], vec![3.0]]);
    assert!(retriever.retrieve("q", 3).await.unwrap().is_empty());

    let entry = InteractionLogEntry {
        timestamp: chrono::Utc::now(),
        retrieval_mode: RetrievalMode::Direct,
        question: "q".into(),
        faq: String::new(),
        evidence: String::new(),
        evidence_ref: "slide_1".into(),
        row: 0,
        answer: "a。".into(),
        latency_secs: 0.5,
    };
    sink.append(&entry).await.unwrap();
    assert_eq!(entry.row_values()[1], "direct");
}
