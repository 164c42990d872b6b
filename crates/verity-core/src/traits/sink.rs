use async_trait::async_trait;

use crate::errors::VerityResult;
use crate::models::InteractionLogEntry;

/// Append-only interaction log.
#[async_trait]
pub trait IInteractionSink: Send + Sync {
    async fn append(&self, entry: &InteractionLogEntry) -> VerityResult<()>;
}
