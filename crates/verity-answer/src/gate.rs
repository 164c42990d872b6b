//! Hallucination gate: classify an answer against its evidence and, when it
//! is not grounded, make exactly one retry with alternate evidence.

use std::sync::Arc;

use tracing::{debug, info};
use verity_core::config::RetrievalConfig;
use verity_core::models::{Evidence, HallucinationVerdict};
use verity_core::traits::{ILlmClient, IRetriever, ResponseFormat};
use verity_llm::first_integer;
use verity_observability::tracing_setup::events;

use crate::prompts;
use crate::synthesizer::AnswerSynthesizer;

/// Result of the single retry.
#[derive(Debug, Clone, PartialEq)]
pub enum RetryOutcome {
    Answered { answer: String, evidence: Evidence },
    /// Too few candidates, or any failure along the way.
    GaveUp { reason: String },
}

pub struct HallucinationGate {
    llm: Arc<dyn ILlmClient>,
    retriever: Arc<dyn IRetriever>,
    retry_top_k: usize,
    retry_position: usize,
}

impl HallucinationGate {
    pub fn new(
        llm: Arc<dyn ILlmClient>,
        retriever: Arc<dyn IRetriever>,
        config: &RetrievalConfig,
    ) -> Self {
        Self {
            llm,
            retriever,
            retry_top_k: config.retry_top_k,
            retry_position: config.retry_position,
        }
    }

    /// Never fails: an unusable reply or a failed call counts as grounded.
    pub async fn classify(&self, answer: &str, evidence: &str, faq: &str) -> HallucinationVerdict {
        let prompt = prompts::classification(answer, evidence, faq);
        let reply = match self.llm.generate(&prompt, ResponseFormat::Text).await {
            Ok(r) => r,
            Err(e) => {
                debug!(error = %e, "classification call failed, treating as grounded");
                return HallucinationVerdict::Grounded;
            }
        };
        match first_integer(&reply) {
            Ok(code) => {
                let verdict = HallucinationVerdict::from_code(u32::try_from(code).unwrap_or(u32::MAX));
                debug!(code, ?verdict, "answer classified");
                verdict
            }
            Err(e) => {
                debug!(error = %e, "classification unparsable, treating as grounded");
                HallucinationVerdict::Grounded
            }
        }
    }

    /// Re-retrieve `retry_top_k` candidates and re-synthesize from the one at
    /// `retry_position`. Called at most once per request.
    pub async fn retry(&self, query: &str, faq: &str, synthesizer: &AnswerSynthesizer) -> RetryOutcome {
        let ranking = match self.retriever.retrieve(query, self.retry_top_k).await {
            Ok(r) => r,
            Err(e) => return self.give_up(format!("retrieval failed: {e}")),
        };
        let Some(alternate) = ranking.get(self.retry_position) else {
            return self.give_up(format!(
                "only {} candidates, need position {}",
                ranking.len(),
                self.retry_position
            ));
        };
        let evidence = Evidence::from_candidate(alternate);
        info!(evidence_ref = %evidence.evidence_ref(), "retrying with alternate evidence");

        match synthesizer.synthesize(query, &evidence.text, faq).await {
            Ok(answer) => {
                events::retry_outcome("answered", evidence.evidence_ref());
                RetryOutcome::Answered { answer, evidence }
            }
            Err(e) => self.give_up(format!("regeneration failed: {e}")),
        }
    }

    fn give_up(&self, reason: String) -> RetryOutcome {
        events::retry_outcome(&reason, "");
        RetryOutcome::GaveUp { reason }
    }
}
