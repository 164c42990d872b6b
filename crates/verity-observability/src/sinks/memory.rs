use async_trait::async_trait;
use tokio::sync::Mutex;
use verity_core::errors::VerityResult;
use verity_core::models::InteractionLogEntry;
use verity_core::traits::IInteractionSink;

/// In-process sink, for tests and embedding hosts that persist elsewhere.
#[derive(Default)]
pub struct MemoryInteractionSink {
    entries: Mutex<Vec<InteractionLogEntry>>,
}

impl MemoryInteractionSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn entries(&self) -> Vec<InteractionLogEntry> {
        self.entries.lock().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

#[async_trait]
impl IInteractionSink for MemoryInteractionSink {
    async fn append(&self, entry: &InteractionLogEntry) -> VerityResult<()> {
        self.entries.lock().await.push(entry.clone());
        Ok(())
    }
}
