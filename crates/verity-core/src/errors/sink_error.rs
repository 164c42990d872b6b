/// Interaction-log sink errors.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("io error on {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("serialization failed: {reason}")]
    Serialization { reason: String },

    #[error("interaction not persisted: {reason}")]
    NotPersisted { reason: String },
}
