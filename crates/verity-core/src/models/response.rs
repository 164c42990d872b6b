use serde::{Deserialize, Serialize};

use super::verdict::HallucinationVerdict;

/// Outcome of the interaction-log append for one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum LogStatus {
    /// No sink configured.
    Skipped,
    Persisted,
    Failed { reason: String },
}

impl LogStatus {
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Final `(answer, evidence_ref)` pair returned for every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineResponse {
    pub answer: String,
    pub evidence_ref: String,
    pub log_status: LogStatus,
}

/// Single-pass generate-and-classify result, no retry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditReport {
    pub answer: String,
    pub faq: String,
    pub evidence: String,
    pub verdict: HallucinationVerdict,
    pub evidence_ref: String,
}
