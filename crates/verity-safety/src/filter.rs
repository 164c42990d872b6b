use serde::{Deserialize, Serialize};
use tracing::debug;
use verity_core::config::{SafetyConfig, SafetyRule};
use verity_core::errors::VerityResult;

use crate::patterns;

/// Outcome of a safety check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "decision")]
pub enum SafetyDecision {
    Allowed,
    Blocked {
        /// Fixed reply returned to the asker.
        reply: String,
        /// Table entry that fired.
        matched: String,
    },
}

impl SafetyDecision {
    pub fn is_blocked(&self) -> bool {
        matches!(self, Self::Blocked { .. })
    }

    /// `(blocked, fixed_reply)`; the reply is empty when allowed.
    pub fn into_pair(self) -> (bool, String) {
        match self {
            Self::Allowed => (false, String::new()),
            Self::Blocked { reply, .. } => (true, reply),
        }
    }
}

/// Pure, ordered substring filter. Matching is case-insensitive.
#[derive(Debug, Clone)]
pub struct SafetyFilter {
    guard_exceptions: Vec<String>,
    off_topic_terms: Vec<String>,
    rules: Vec<SafetyRule>,
    ng_message: String,
}

impl SafetyFilter {
    /// Built-in tables only.
    pub fn with_defaults(ng_message: impl Into<String>) -> Self {
        Self::from_tables(
            patterns::GUARD_EXCEPTIONS.iter().map(|s| s.to_string()),
            patterns::OFF_TOPIC_TERMS.iter().map(|s| s.to_string()),
            patterns::DEFAULT_RULES.iter().map(|(p, r)| SafetyRule {
                pattern: p.to_string(),
                reply: r.to_string(),
            }),
            ng_message.into(),
        )
    }

    /// Built-in tables followed by configured entries (inline rules, then the rules file).
    pub fn from_config(config: &SafetyConfig, ng_message: impl Into<String>) -> VerityResult<Self> {
        let file_rules = config.load_rules_file()?;
        let builtin_rules = patterns::DEFAULT_RULES.iter().map(|(p, r)| SafetyRule {
            pattern: p.to_string(),
            reply: r.to_string(),
        });
        Ok(Self::from_tables(
            patterns::GUARD_EXCEPTIONS
                .iter()
                .map(|s| s.to_string())
                .chain(config.guard_exceptions.iter().cloned()),
            patterns::OFF_TOPIC_TERMS
                .iter()
                .map(|s| s.to_string())
                .chain(config.off_topic_terms.iter().cloned()),
            builtin_rules
                .chain(config.rules.iter().cloned())
                .chain(file_rules),
            ng_message.into(),
        ))
    }

    fn from_tables(
        guard_exceptions: impl Iterator<Item = String>,
        off_topic_terms: impl Iterator<Item = String>,
        rules: impl Iterator<Item = SafetyRule>,
        ng_message: String,
    ) -> Self {
        // Empty patterns would match everything.
        let normalize = |s: String| {
            let s = s.trim().to_lowercase();
            (!s.is_empty()).then_some(s)
        };
        Self {
            guard_exceptions: guard_exceptions.filter_map(normalize).collect(),
            off_topic_terms: off_topic_terms.filter_map(normalize).collect(),
            rules: rules
                .filter_map(|r| {
                    normalize(r.pattern).map(|pattern| SafetyRule {
                        pattern,
                        reply: r.reply,
                    })
                })
                .collect(),
            ng_message,
        }
    }

    /// Check one request. First match wins, table order preserved.
    pub fn check(&self, text: &str) -> SafetyDecision {
        let lower = text.to_lowercase();

        if let Some(guard) = self.guard_exceptions.iter().find(|g| lower.contains(g.as_str())) {
            debug!(guard = %guard, "guard exception matched, request allowed");
            return SafetyDecision::Allowed;
        }

        if let Some(term) = self.off_topic_terms.iter().find(|t| lower.contains(t.as_str())) {
            return SafetyDecision::Blocked {
                reply: self.ng_message.clone(),
                matched: term.clone(),
            };
        }

        for rule in &self.rules {
            if lower.contains(rule.pattern.as_str()) {
                let reply = if rule.reply.trim().is_empty() {
                    self.ng_message.clone()
                } else {
                    rule.reply.clone()
                };
                return SafetyDecision::Blocked {
                    reply,
                    matched: rule.pattern.clone(),
                };
            }
        }

        SafetyDecision::Allowed
    }

    pub fn ng_message(&self) -> &str {
        &self.ng_message
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }
}
