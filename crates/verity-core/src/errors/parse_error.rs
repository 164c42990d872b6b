/// Failures decoding a model reply into the shape a call site expects.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReplyParseError {
    #[error("no integer found in reply: {reply:?}")]
    NoInteger { reply: String },

    #[error("reply is not valid JSON: {reason}")]
    InvalidJson { reason: String },

    #[error("reply is missing field `{field}`")]
    MissingField { field: String },
}
