//! Answer synthesizer: one grounded prompt, one model call, mandatory post-processing.

use std::sync::Arc;

use tracing::debug;
use verity_core::config::{AnswerConfig, PersonaConfig};
use verity_core::errors::VerityResult;
use verity_core::traits::{ILlmClient, ResponseFormat};
use verity_core::FallbackTopic;

use crate::postprocess::postprocess;
use crate::prompts;

pub struct AnswerSynthesizer {
    llm: Arc<dyn ILlmClient>,
    persona: PersonaConfig,
    config: AnswerConfig,
}

impl AnswerSynthesizer {
    pub fn new(llm: Arc<dyn ILlmClient>, persona: PersonaConfig, config: AnswerConfig) -> Self {
        Self {
            llm,
            persona,
            config,
        }
    }

    /// Generate and post-process. Errors only when the model call fails.
    pub async fn synthesize(&self, query: &str, evidence: &str, faq: &str) -> VerityResult<String> {
        let prompt = prompts::synthesis(&self.persona, self.config.max_chars, query, faq, evidence);
        let raw = self.llm.generate(&prompt, ResponseFormat::Text).await?;
        let answer = self.finish(&raw);
        debug!(
            raw_chars = raw.chars().count(),
            chars = answer.chars().count(),
            "answer synthesized"
        );
        Ok(answer)
    }

    /// Post-process any answer text with this synthesizer's limits.
    pub fn finish(&self, raw: &str) -> String {
        postprocess(raw, &self.config)
    }

    /// Canned answer for a failed generation, chosen by query topic.
    pub fn fallback_answer(&self, query: &str) -> String {
        let text = match FallbackTopic::of(query) {
            FallbackTopic::Greeting => &self.persona.fallback_greeting,
            FallbackTopic::Brand => &self.persona.fallback_brand,
            FallbackTopic::Philosophy => &self.persona.fallback_philosophy,
            FallbackTopic::Generic => &self.persona.fallback_generic,
        };
        self.finish(text)
    }

    pub fn persona(&self) -> &PersonaConfig {
        &self.persona
    }

    pub fn config(&self) -> &AnswerConfig {
        &self.config
    }
}
