//! Full wiring over the fixture deck: real indices, scripted model, file logs.

use std::sync::Arc;

use test_fixtures::{deck_corpus, faq_entries, fixture_path, ScriptedLlm};
use verity_answer::bootstrap::{build_with_llm, load_corpus, load_faq};
use verity_answer::prompts::markers;
use verity_core::models::{Corpus, LogStatus, RetrievalMode};
use verity_core::VerityConfig;

fn config_logging_to(dir: &std::path::Path) -> VerityConfig {
    let mut config = VerityConfig::default();
    config.logging.dir = dir.display().to_string();
    config
}

#[tokio::test]
async fn business_question_cites_overview_and_logs_both_files() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_logging_to(dir.path());
    let llm = Arc::new(
        ScriptedLlm::new(Vec::<&str>::new())
            .with_rule(markers::CLASSIFICATION, "0")
            .with_rule(markers::SYNTHESIS, "Nittoは粘着テープや光学フィルムの事業を展開しています"),
    );

    let pipeline = build_with_llm(config, deck_corpus(), &faq_entries(), llm.clone())
        .await
        .unwrap();
    let response = pipeline
        .respond_with_mode("事業内容を教えて", RetrievalMode::Direct)
        .await;

    assert_eq!(response.evidence_ref, "nitto_PDF/slide_1.png");
    assert_eq!(response.log_status, LogStatus::Persisted);
    assert!(response.answer.ends_with('。'));

    // FAQ excerpt reached the synthesis prompt.
    let synthesis = llm
        .prompts()
        .into_iter()
        .find(|p| p.contains(markers::SYNTHESIS))
        .unwrap();
    assert!(synthesis.contains("Q: "));

    let json = std::fs::read_to_string(dir.path().join("interactions.jsonl")).unwrap();
    let csv = std::fs::read_to_string(dir.path().join("interactions.csv")).unwrap();
    assert_eq!(json.lines().count(), 1);
    assert!(csv.starts_with("timestamp,"));
}

#[tokio::test]
async fn fixture_files_load_through_bootstrap_helpers() {
    let corpus = load_corpus(fixture_path("corpus/nitto_deck.json")).unwrap();
    assert_eq!(corpus.len(), deck_corpus().len());
    assert_eq!(load_faq(fixture_path("faq/faq.json")).unwrap().len(), faq_entries().len());
    assert!(load_corpus(fixture_path("corpus/missing.json")).is_err());
}

#[tokio::test]
async fn empty_corpus_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let llm = Arc::new(ScriptedLlm::new(["0"]));
    let result = build_with_llm(
        config_logging_to(dir.path()),
        Corpus::new(Vec::new()).unwrap(),
        &[],
        llm,
    )
    .await;
    assert!(result.is_err());
}
