/// Retrieval subsystem errors.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("{index} index failed: {reason}")]
    IndexFailed { index: String, reason: String },

    #[error("retrieval unavailable: lexical: {lexical}; vector: {vector}")]
    Unavailable { lexical: String, vector: String },

    #[error("corpus is empty")]
    EmptyCorpus,

    #[error("index build failed: {reason}")]
    IndexBuild { reason: String },
}
