use serde::{Deserialize, Serialize};

/// One `(pattern, reply)` deny rule. An empty reply means the shared NG message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyRule {
    pub pattern: String,
    #[serde(default)]
    pub reply: String,
}

/// Safety/topic filter configuration. Entries here are appended to the built-in tables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SafetyConfig {
    /// Extra `(pattern, reply)` rules, evaluated after the built-in ones in file order.
    pub rules: Vec<SafetyRule>,
    /// Extra off-topic terms mapped to the NG message.
    pub off_topic_terms: Vec<String>,
    /// Extra legitimate words that must never be blocked.
    pub guard_exceptions: Vec<String>,
    /// Optional TOML file with `[[rules]]` entries.
    pub rules_path: Option<String>,
}

/// Shape of the external rules file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SafetyRulesFile {
    #[serde(default)]
    pub rules: Vec<SafetyRule>,
}
