use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How evidence was chosen from the fused ranking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetrievalMode {
    /// LLM picks the single most relevant candidate.
    #[default]
    Single,
    /// LLM picks an ordered subset.
    Multi,
    /// Top fused candidate, no LLM call.
    Direct,
}

impl RetrievalMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Multi => "multi",
            Self::Direct => "direct",
        }
    }
}

impl std::fmt::Display for RetrievalMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One append-only interaction log entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionLogEntry {
    pub timestamp: DateTime<Utc>,
    pub retrieval_mode: RetrievalMode,
    pub question: String,
    pub faq: String,
    pub evidence: String,
    pub evidence_ref: String,
    pub row: usize,
    pub answer: String,
    pub latency_secs: f64,
}

impl InteractionLogEntry {
    /// Column order shared by every tabular representation.
    pub const COLUMNS: [&'static str; 9] = [
        "timestamp",
        "retrieval_mode",
        "question",
        "faq",
        "evidence",
        "evidence_ref",
        "row",
        "answer",
        "latency_secs",
    ];

    /// Field values in [`Self::COLUMNS`] order.
    pub fn row_values(&self) -> [String; 9] {
        [
            self.timestamp.to_rfc3339(),
            self.retrieval_mode.to_string(),
            self.question.clone(),
            self.faq.clone(),
            self.evidence.clone(),
            self.evidence_ref.clone(),
            self.row.to_string(),
            self.answer.clone(),
            format!("{:.3}", self.latency_secs),
        ]
    }
}
