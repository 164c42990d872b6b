//! # verity-core
//!
//! Foundation crate for the Verity answer pipeline.
//! Defines the corpus and candidate models, collaborator traits, errors,
//! configuration, and the query-category taxonomy shared by retrieval and synthesis.
//! Every other crate in the workspace depends on this.

pub mod category;
pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use category::{FallbackTopic, QueryCategory};
pub use config::VerityConfig;
pub use errors::{VerityError, VerityResult};
pub use models::{
    CandidateMetadata, Corpus, CorpusRecord, Evidence, FusedRanking, HallucinationVerdict,
    RetrievalMode, RetrievedCandidate,
};
