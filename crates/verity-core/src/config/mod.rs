pub mod answer_config;
pub mod defaults;
pub mod embedding_config;
pub mod llm_config;
pub mod logging_config;
pub mod observability_config;
pub mod persona_config;
pub mod retrieval_config;
pub mod safety_config;

use std::path::Path;

pub use answer_config::AnswerConfig;
pub use embedding_config::EmbeddingConfig;
pub use llm_config::LlmConfig;
pub use logging_config::LoggingConfig;
pub use observability_config::ObservabilityConfig;
pub use persona_config::PersonaConfig;
pub use retrieval_config::RetrievalConfig;
pub use safety_config::{SafetyConfig, SafetyRule, SafetyRulesFile};

use serde::{Deserialize, Serialize};

use crate::errors::{ConfigError, VerityResult};

/// Top-level configuration aggregating all subsystem configs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VerityConfig {
    /// Evidence reference attached whenever no real evidence qualifies.
    pub fallback_evidence_ref: String,
    /// Row reported alongside the fallback evidence reference.
    pub fallback_row: usize,
    pub retrieval: RetrievalConfig,
    pub answer: AnswerConfig,
    pub persona: PersonaConfig,
    pub safety: SafetyConfig,
    pub llm: LlmConfig,
    pub embedding: EmbeddingConfig,
    pub logging: LoggingConfig,
    pub observability: ObservabilityConfig,
}

impl Default for VerityConfig {
    fn default() -> Self {
        Self {
            fallback_evidence_ref: defaults::DEFAULT_FALLBACK_EVIDENCE_REF.to_string(),
            fallback_row: defaults::DEFAULT_FALLBACK_ROW,
            retrieval: RetrievalConfig::default(),
            answer: AnswerConfig::default(),
            persona: PersonaConfig::default(),
            safety: SafetyConfig::default(),
            llm: LlmConfig::default(),
            embedding: EmbeddingConfig::default(),
            logging: LoggingConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl VerityConfig {
    /// Load config from a TOML string, falling back to defaults for missing fields.
    pub fn from_toml(toml_str: &str) -> VerityResult<Self> {
        toml::from_str(toml_str).map_err(|e| {
            ConfigError::Parse {
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Load config from a TOML file on disk.
    pub fn from_file(path: impl AsRef<Path>) -> VerityResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml(&raw)
    }
}

impl SafetyConfig {
    /// Read the external rules file, if one is configured.
    pub fn load_rules_file(&self) -> VerityResult<Vec<SafetyRule>> {
        let Some(path) = &self.rules_path else {
            return Ok(Vec::new());
        };
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        let file: SafetyRulesFile = toml::from_str(&raw).map_err(|e| ConfigError::Parse {
            reason: format!("{path}: {e}"),
        })?;
        Ok(file.rules)
    }
}

impl LoggingConfig {
    /// Resolved JSON Lines path.
    pub fn json_path(&self) -> std::path::PathBuf {
        match &self.json_path {
            Some(p) => p.into(),
            None => Path::new(&self.dir).join("interactions.jsonl"),
        }
    }

    /// Resolved CSV path.
    pub fn csv_path(&self) -> std::path::PathBuf {
        match &self.csv_path {
            Some(p) => p.into(),
            None => Path::new(&self.dir).join("interactions.csv"),
        }
    }
}
