/// LLM inference errors.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("request failed: {reason}")]
    RequestFailed { reason: String },

    #[error("service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("empty reply from model {model}")]
    EmptyReply { model: String },

    #[error("llm unavailable: {reason}")]
    Unavailable { reason: String },
}
