//! AnswerPipeline: the request-scoped flow from question to `(answer, evidence_ref)`.
//!
//! safety filter → small-talk short-circuit → retrieval + FAQ → selection →
//! weak-evidence check → synthesis → hallucination gate (one retry) → log
//!
//! Every branch produces a complete response; only the interaction log can
//! fail, and that is reported in the response rather than raised.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use serde::Deserialize;
use tracing::{debug, info};
use verity_core::category::is_smalltalk;
use verity_core::errors::{SinkError, VerityResult};
use verity_core::models::{
    AuditReport, CandidateMetadata, Evidence, HallucinationVerdict, InteractionLogEntry,
    LogStatus, PipelineResponse, RetrievalMode,
};
use verity_core::traits::{IInteractionSink, ILlmClient, IRetriever, ResponseFormat};
use verity_core::{FallbackTopic, VerityConfig};
use verity_llm::decode_json;
use verity_observability::tracing_setup::events;
use verity_retrieval::FaqRetriever;
use verity_safety::{SafetyDecision, SafetyFilter};

use crate::gate::{HallucinationGate, RetryOutcome};
use crate::prompts;
use crate::selector::EvidenceSelector;
use crate::synthesizer::AnswerSynthesizer;
use crate::triage::CommentTriage;

/// Answer, grounding and FAQ for one request, before logging.
struct Draft {
    answer: String,
    evidence: Evidence,
    faq: String,
}

#[derive(Deserialize)]
struct AuditReply {
    response: String,
}

pub struct AnswerPipeline {
    config: VerityConfig,
    safety: SafetyFilter,
    retriever: Arc<dyn IRetriever>,
    faq: Option<FaqRetriever>,
    selector: EvidenceSelector,
    synthesizer: AnswerSynthesizer,
    gate: HallucinationGate,
    triage: CommentTriage,
    llm: Arc<dyn ILlmClient>,
    sink: Option<Arc<dyn IInteractionSink>>,
}

impl AnswerPipeline {
    /// Wire the pipeline around a retriever and a model. Fails only when a
    /// configured safety rules file cannot be read.
    pub fn new(
        config: VerityConfig,
        retriever: Arc<dyn IRetriever>,
        llm: Arc<dyn ILlmClient>,
    ) -> VerityResult<Self> {
        let safety = SafetyFilter::from_config(&config.safety, config.persona.ng_message.clone())?;
        let selector = EvidenceSelector::new(Arc::clone(&llm), &config.answer);
        let synthesizer = AnswerSynthesizer::new(
            Arc::clone(&llm),
            config.persona.clone(),
            config.answer.clone(),
        );
        let gate = HallucinationGate::new(Arc::clone(&llm), Arc::clone(&retriever), &config.retrieval);
        let triage = CommentTriage::new(Arc::clone(&llm));
        Ok(Self {
            config,
            safety,
            retriever,
            faq: None,
            selector,
            synthesizer,
            gate,
            triage,
            llm,
            sink: None,
        })
    }

    pub fn with_faq(mut self, faq: FaqRetriever) -> Self {
        self.faq = Some(faq);
        self
    }

    pub fn with_sink(mut self, sink: Arc<dyn IInteractionSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn config(&self) -> &VerityConfig {
        &self.config
    }

    /// Answer with the configured default retrieval mode.
    pub async fn respond(&self, query: &str) -> PipelineResponse {
        self.respond_with_mode(query, self.config.answer.default_mode).await
    }

    pub async fn respond_with_mode(&self, query: &str, mode: RetrievalMode) -> PipelineResponse {
        let started = Instant::now();

        if let SafetyDecision::Blocked { reply, matched } = self.safety.check(query) {
            events::query_blocked(&matched);
            return PipelineResponse {
                answer: reply,
                evidence_ref: self.config.fallback_evidence_ref.clone(),
                log_status: LogStatus::Skipped,
            };
        }

        let draft = self.draft(query, mode).await;
        let log_status = self.log(query, mode, &draft, started.elapsed()).await;
        info!(
            mode = %mode,
            evidence_ref = %draft.evidence.evidence_ref(),
            chars = draft.answer.chars().count(),
            latency_ms = started.elapsed().as_millis() as u64,
            "request answered"
        );
        PipelineResponse {
            evidence_ref: draft.evidence.evidence_ref().to_string(),
            answer: draft.answer,
            log_status,
        }
    }

    /// Like [`Self::respond_with_mode`], but a failed log append is an error
    /// when `[logging] required` is set.
    pub async fn respond_persisted(
        &self,
        query: &str,
        mode: RetrievalMode,
    ) -> VerityResult<PipelineResponse> {
        let response = self.respond_with_mode(query, mode).await;
        match &response.log_status {
            LogStatus::Failed { reason } if self.config.logging.required => {
                Err(SinkError::NotPersisted {
                    reason: reason.clone(),
                }
                .into())
            }
            _ => Ok(response),
        }
    }

    /// Generate once against the top fused evidence and classify it, without
    /// retry. Anything not grounded is replaced by the refusal.
    pub async fn audit(&self, query: &str) -> AuditReport {
        let persona = &self.config.persona;
        if let SafetyDecision::Blocked { reply, matched } = self.safety.check(query) {
            events::query_blocked(&matched);
            return AuditReport {
                answer: reply,
                faq: String::new(),
                evidence: String::new(),
                verdict: HallucinationVerdict::Grounded,
                evidence_ref: self.config.fallback_evidence_ref.clone(),
            };
        }

        let evidence = match self
            .retriever
            .retrieve(query, self.config.retrieval.audit_top_k)
            .await
        {
            Ok(ranking) => Evidence::from_candidates(ranking.candidates())
                .unwrap_or_else(|| self.fallback_evidence(&persona.greeting_knowledge)),
            Err(e) => {
                events::retrieval_degraded("audit", &e.to_string());
                self.fallback_evidence(&persona.greeting_knowledge)
            }
        };
        let faq = self.faq_excerpt(query).await;

        let prompt = prompts::audit(
            persona,
            self.config.answer.max_chars,
            query,
            &faq,
            &evidence.text,
        );
        let answer = match self.llm.generate(&prompt, ResponseFormat::Json).await {
            Ok(reply) => match decode_json::<AuditReply>(&reply) {
                Ok(parsed) => self.synthesizer.finish(&parsed.response),
                Err(e) => {
                    events::generation_fallback("audit", &e.to_string());
                    persona.ng_message.clone()
                }
            },
            Err(e) => {
                events::generation_fallback("audit", &e.to_string());
                persona.ng_message.clone()
            }
        };

        let verdict = self.gate.classify(&answer, &evidence.text, &faq).await;
        let answer = if verdict.is_grounded() {
            answer
        } else {
            events::hallucination_detected(verdict.code(), evidence.evidence_ref());
            persona.ng_message.clone()
        };

        AuditReport {
            answer,
            faq,
            evidence_ref: evidence.evidence_ref().to_string(),
            evidence: evidence.text,
            verdict,
        }
    }

    /// Live-stream comments worth answering.
    pub async fn triage_comments(&self, comments: &[String]) -> Vec<String> {
        self.triage.filter(comments).await
    }

    // ── Stages ──────────────────────────────────────────────────────────────

    async fn draft(&self, query: &str, mode: RetrievalMode) -> Draft {
        let persona = &self.config.persona;

        if is_smalltalk(query) {
            debug!("small talk, skipping retrieval and hallucination check");
            let evidence = self.fallback_evidence(&persona.greeting_knowledge);
            let faq = persona.default_faq.clone();
            let answer = self.generate_or_fallback(query, &evidence.text, &faq).await;
            return Draft {
                answer: answer.unwrap_or_else(|canned| canned),
                evidence,
                faq,
            };
        }

        let ranking = match self
            .retriever
            .retrieve(query, self.config.retrieval.selection_top_k)
            .await
        {
            Ok(r) => r,
            Err(e) => {
                events::retrieval_degraded("knowledge", &e.to_string());
                return Draft {
                    answer: persona.retrieval_unavailable.clone(),
                    evidence: self.fallback_evidence(""),
                    faq: persona.default_faq.clone(),
                };
            }
        };
        let faq = self.faq_excerpt(query).await;

        let mut evidence = match self
            .selector
            .select(mode, query, ranking.candidates())
            .await
            .into_evidence()
        {
            Some(e) => e,
            None if mode == RetrievalMode::Multi => {
                debug!("multi-best selection empty, returning insufficient-evidence reply");
                return Draft {
                    answer: persona.insufficient_evidence.clone(),
                    evidence: self.fallback_evidence(""),
                    faq,
                };
            }
            None => self.fallback_evidence(&persona.no_knowledge),
        };
        self.cite_only_if_substantial(&mut evidence);

        let answer = match self.generate_or_fallback(query, &evidence.text, &faq).await {
            Ok(answer) => answer,
            Err(canned) => {
                evidence.metadata = self.fallback_metadata();
                return Draft {
                    answer: canned,
                    evidence,
                    faq,
                };
            }
        };

        let verdict = self.gate.classify(&answer, &evidence.text, &faq).await;
        if verdict.is_grounded() {
            return Draft {
                answer,
                evidence,
                faq,
            };
        }

        events::hallucination_detected(verdict.code(), evidence.evidence_ref());
        match self.gate.retry(query, &faq, &self.synthesizer).await {
            RetryOutcome::Answered {
                answer,
                mut evidence,
            } => {
                self.cite_only_if_substantial(&mut evidence);
                Draft {
                    answer,
                    evidence,
                    faq,
                }
            }
            RetryOutcome::GaveUp { .. } => Draft {
                answer: persona.retry_refusal.clone(),
                evidence: Evidence {
                    metadata: self.fallback_metadata(),
                    from_corpus: false,
                    ..evidence
                },
                faq,
            },
        }
    }

    /// `Ok(answer)` from the model, or `Err(canned)` when generation failed.
    async fn generate_or_fallback(
        &self,
        query: &str,
        evidence: &str,
        faq: &str,
    ) -> Result<String, String> {
        self.synthesizer
            .synthesize(query, evidence, faq)
            .await
            .map_err(|e| {
                let canned = self.synthesizer.fallback_answer(query);
                events::generation_fallback(FallbackTopic::of(query).name(), &e.to_string());
                canned
            })
    }

    async fn faq_excerpt(&self, query: &str) -> String {
        match &self.faq {
            Some(faq) => faq.excerpt(query).await,
            None => self.config.persona.default_faq.clone(),
        }
    }

    async fn log(
        &self,
        query: &str,
        mode: RetrievalMode,
        draft: &Draft,
        elapsed: Duration,
    ) -> LogStatus {
        let Some(sink) = &self.sink else {
            return LogStatus::Skipped;
        };
        let entry = InteractionLogEntry {
            timestamp: Utc::now(),
            retrieval_mode: mode,
            question: query.to_string(),
            faq: draft.faq.clone(),
            evidence: draft.evidence.text.clone(),
            evidence_ref: draft.evidence.evidence_ref().to_string(),
            row: draft.evidence.metadata.row,
            answer: draft.answer.clone(),
            latency_secs: elapsed.as_secs_f64(),
        };
        match sink.append(&entry).await {
            Ok(()) => {
                events::interaction_logged(mode.as_str(), entry.latency_secs, true);
                LogStatus::Persisted
            }
            Err(e) => {
                events::interaction_logged(mode.as_str(), entry.latency_secs, false);
                LogStatus::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Evidence shorter than `min_evidence_chars` keeps its text but cites the fallback reference.
    fn cite_only_if_substantial(&self, evidence: &mut Evidence) {
        if evidence.text.trim().chars().count() < self.config.answer.min_evidence_chars {
            debug!(
                chars = evidence.char_len(),
                "evidence too weak to cite, using fallback reference"
            );
            evidence.metadata = self.fallback_metadata();
        }
    }

    fn fallback_metadata(&self) -> CandidateMetadata {
        CandidateMetadata::new(
            self.config.fallback_row,
            self.config.fallback_evidence_ref.clone(),
        )
    }

    fn fallback_evidence(&self, text: &str) -> Evidence {
        Evidence::fallback(
            text,
            self.config.fallback_row,
            self.config.fallback_evidence_ref.clone(),
        )
    }
}
