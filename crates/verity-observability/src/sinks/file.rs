//! JSON Lines + CSV interaction log.
//!
//! Both files are appended under one lock so the structured and tabular
//! logs always hold the same entries in the same order.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::debug;
use verity_core::config::LoggingConfig;
use verity_core::errors::{SinkError, VerityResult};
use verity_core::models::InteractionLogEntry;
use verity_core::traits::IInteractionSink;

fn io_err(path: &Path, e: impl std::fmt::Display) -> SinkError {
    SinkError::Io {
        path: path.display().to_string(),
        reason: e.to_string(),
    }
}

fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

fn csv_line<S: AsRef<str>>(fields: &[S]) -> String {
    let mut line = fields
        .iter()
        .map(|f| escape_csv(f.as_ref()))
        .collect::<Vec<_>>()
        .join(",");
    line.push('\n');
    line
}

pub struct FileInteractionSink {
    json_path: PathBuf,
    csv_path: PathBuf,
    lock: Mutex<()>,
}

impl FileInteractionSink {
    pub fn new(json_path: impl Into<PathBuf>, csv_path: impl Into<PathBuf>) -> Self {
        Self {
            json_path: json_path.into(),
            csv_path: csv_path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn from_config(config: &LoggingConfig) -> Self {
        Self::new(config.json_path(), config.csv_path())
    }

    pub fn json_path(&self) -> &Path {
        &self.json_path
    }

    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }

    async fn append_to(path: &Path, text: &str) -> Result<(), SinkError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|e| io_err(parent, e))?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await
            .map_err(|e| io_err(path, e))?;
        file.write_all(text.as_bytes())
            .await
            .map_err(|e| io_err(path, e))?;
        file.flush().await.map_err(|e| io_err(path, e))
    }

    async fn csv_is_new(&self) -> bool {
        match fs::metadata(&self.csv_path).await {
            Ok(meta) => meta.len() == 0,
            Err(_) => true,
        }
    }
}

#[async_trait]
impl IInteractionSink for FileInteractionSink {
    async fn append(&self, entry: &InteractionLogEntry) -> VerityResult<()> {
        let mut json = serde_json::to_string(entry).map_err(|e| SinkError::Serialization {
            reason: e.to_string(),
        })?;
        json.push('\n');

        let _guard = self.lock.lock().await;

        let mut csv = String::new();
        if self.csv_is_new().await {
            csv.push_str(&csv_line(&InteractionLogEntry::COLUMNS));
        }
        csv.push_str(&csv_line(&entry.row_values()));

        Self::append_to(&self.json_path, &json).await?;
        Self::append_to(&self.csv_path, &csv).await?;
        debug!(
            json = %self.json_path.display(),
            csv = %self.csv_path.display(),
            "interaction appended"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_only_when_needed() {
        assert_eq!(escape_csv("plain"), "plain");
        assert_eq!(escape_csv("a,b"), "\"a,b\"");
        assert_eq!(escape_csv("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_csv("line1\nline2"), "\"line1\nline2\"");
    }

    #[test]
    fn csv_line_joins_and_terminates() {
        assert_eq!(csv_line(&["a", "b,c"]), "a,\"b,c\"\n");
    }
}
