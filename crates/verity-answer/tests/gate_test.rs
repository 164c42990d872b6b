//! Hallucination gate tests: classification and the single retry.

use std::sync::Arc;

use test_fixtures::{ScriptedLlm, StaticRetriever};
use verity_answer::prompts::markers;
use verity_answer::{AnswerSynthesizer, HallucinationGate, RetryOutcome};
use verity_core::config::{AnswerConfig, PersonaConfig, RetrievalConfig};
use verity_core::models::{CandidateMetadata, HallucinationVerdict, RetrievedCandidate};

fn candidates(n: usize) -> Vec<RetrievedCandidate> {
    (1..=n)
        .map(|i| {
            RetrievedCandidate::new(
                format!("代替スライド{i}の本文"),
                CandidateMetadata::new(i, format!("nitto_PDF/slide_{i}.png")),
            )
        })
        .collect()
}

fn gate(llm: Arc<ScriptedLlm>, retriever: Arc<StaticRetriever>) -> HallucinationGate {
    HallucinationGate::new(llm, retriever, &RetrievalConfig::default())
}

fn synthesizer(llm: Arc<ScriptedLlm>) -> AnswerSynthesizer {
    AnswerSynthesizer::new(llm, PersonaConfig::default(), AnswerConfig::default())
}

#[tokio::test]
async fn classify_reads_first_integer() {
    let retriever = Arc::new(StaticRetriever::new(Vec::new()));
    for (reply, expected) in [
        ("0", HallucinationVerdict::Grounded),
        ("判定: 1", HallucinationVerdict::Ungrounded),
        ("２", HallucinationVerdict::Contradictory),
        ("わかりません", HallucinationVerdict::Grounded),
        ("7", HallucinationVerdict::Grounded),
    ] {
        let g = gate(Arc::new(ScriptedLlm::new([reply])), retriever.clone());
        assert_eq!(g.classify("a", "e", "f").await, expected, "{reply}");
    }
}

#[tokio::test]
async fn classify_failure_is_grounded() {
    let g = gate(
        Arc::new(ScriptedLlm::failing()),
        Arc::new(StaticRetriever::new(Vec::new())),
    );
    assert_eq!(g.classify("a", "e", "f").await, HallucinationVerdict::Grounded);
}

#[tokio::test]
async fn retry_uses_fourth_of_ten() {
    let llm = Arc::new(ScriptedLlm::new(Vec::<&str>::new()).with_rule(markers::SYNTHESIS, "代替の回答です"));
    let retriever = Arc::new(StaticRetriever::new(candidates(12)));
    let g = gate(llm.clone(), retriever.clone());

    match g.retry("q", "faq", &synthesizer(llm.clone())).await {
        RetryOutcome::Answered { answer, evidence } => {
            assert_eq!(answer, "代替の回答です。");
            // Fixed position: the 4th candidate, regardless of its quality.
            assert_eq!(evidence.evidence_ref(), "nitto_PDF/slide_4.png");
        }
        other => panic!("expected answer, got {other:?}"),
    }
    assert_eq!(retriever.requested_top_k(), vec![10]);
    assert_eq!(llm.calls_matching(markers::CLASSIFICATION), 0);
}

#[tokio::test]
async fn retry_gives_up_with_too_few_candidates() {
    let llm = Arc::new(ScriptedLlm::new(["unused"]));
    let g = gate(llm.clone(), Arc::new(StaticRetriever::new(candidates(3))));
    assert!(matches!(
        g.retry("q", "faq", &synthesizer(llm.clone())).await,
        RetryOutcome::GaveUp { .. }
    ));
    assert_eq!(llm.call_count(), 0);
}

#[tokio::test]
async fn retry_gives_up_on_any_error() {
    let llm = Arc::new(ScriptedLlm::new(["unused"]));
    let g = gate(llm.clone(), Arc::new(StaticRetriever::unavailable()));
    assert!(matches!(
        g.retry("q", "faq", &synthesizer(llm)).await,
        RetryOutcome::GaveUp { .. }
    ));

    let failing = Arc::new(ScriptedLlm::failing());
    let g = gate(failing.clone(), Arc::new(StaticRetriever::new(candidates(10))));
    assert!(matches!(
        g.retry("q", "faq", &synthesizer(failing)).await,
        RetryOutcome::GaveUp { .. }
    ));
}
