mod candidate;
mod corpus;
mod evidence;
mod interaction;
mod response;
mod verdict;

pub use candidate::{CandidateMetadata, FusedRanking, RetrievedCandidate};
pub use corpus::{Corpus, CorpusRecord, FaqEntry};
pub use evidence::Evidence;
pub use interaction::{InteractionLogEntry, RetrievalMode};
pub use response::{AuditReport, LogStatus, PipelineResponse};
pub use verdict::HallucinationVerdict;
