//! # verity-answer
//!
//! The answer pipeline: safety filter → hybrid retrieval (+ FAQ) → evidence
//! selection → grounded synthesis → hallucination gate with one bounded retry
//! → interaction log. Every request yields an `(answer, evidence_ref)` pair.

pub mod bootstrap;
pub mod gate;
pub mod pipeline;
pub mod postprocess;
pub mod prompts;
pub mod selector;
pub mod synthesizer;
pub mod triage;

pub use gate::{HallucinationGate, RetryOutcome};
pub use pipeline::AnswerPipeline;
pub use selector::{EvidenceSelector, Selection};
pub use synthesizer::AnswerSynthesizer;
pub use triage::CommentTriage;
