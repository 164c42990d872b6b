//! Error taxonomy. One enum per subsystem, unified under [`VerityError`].

mod config_error;
mod embedding_error;
mod llm_error;
mod parse_error;
mod retrieval_error;
mod sink_error;

pub use config_error::ConfigError;
pub use embedding_error::EmbeddingError;
pub use llm_error::LlmError;
pub use parse_error::ReplyParseError;
pub use retrieval_error::RetrievalError;
pub use sink_error::SinkError;

/// Top-level error for every fallible operation in the workspace.
#[derive(Debug, thiserror::Error)]
pub enum VerityError {
    #[error("retrieval error: {0}")]
    RetrievalError(#[from] RetrievalError),

    #[error("llm error: {0}")]
    LlmError(#[from] LlmError),

    #[error("reply parse error: {0}")]
    ReplyParseError(#[from] ReplyParseError),

    #[error("embedding error: {0}")]
    EmbeddingError(#[from] EmbeddingError),

    #[error("interaction sink error: {0}")]
    SinkError(#[from] SinkError),

    #[error("config error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("corpus record not found: row {row}")]
    RecordNotFound { row: usize },

    #[error("invalid corpus: {reason}")]
    InvalidCorpus { reason: String },

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Convenience alias used across the workspace.
pub type VerityResult<T> = Result<T, VerityError>;
