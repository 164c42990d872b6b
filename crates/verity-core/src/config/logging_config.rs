use serde::{Deserialize, Serialize};

use super::defaults;

/// Interaction-log sink configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Directory receiving the JSON Lines and CSV logs.
    pub dir: String,
    /// Explicit JSON Lines path; derived from `dir` when unset.
    pub json_path: Option<String>,
    /// Explicit CSV path; derived from `dir` when unset.
    pub csv_path: Option<String>,
    /// Whether the request boundary must treat a failed append as a failed request.
    pub required: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: defaults::DEFAULT_LOG_DIR.to_string(),
            json_path: None,
            csv_path: None,
            required: defaults::DEFAULT_LOG_REQUIRED,
        }
    }
}
