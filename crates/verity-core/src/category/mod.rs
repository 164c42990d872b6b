//! Query-category taxonomy shared by the retriever (fusion weights, overrides)
//! and the synthesizer (canned fallback answers).

pub mod keywords;

use serde::{Deserialize, Serialize};

use keywords::contains_any;

/// Query category. Checks run in declaration order; the first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryCategory {
    BusinessOverview,
    /// `anchored` is set when a narrower performance keyword matched.
    Financial { anchored: bool },
    Greeting,
    AnalyticsExclusion,
    Default,
}

impl QueryCategory {
    pub fn classify(query: &str) -> Self {
        if contains_any(query, keywords::BUSINESS_OVERVIEW) {
            Self::BusinessOverview
        } else if contains_any(query, keywords::FINANCIAL) {
            Self::Financial {
                anchored: contains_any(query, keywords::PERFORMANCE),
            }
        } else if contains_any(query, keywords::GREETING) {
            Self::Greeting
        } else if contains_any(query, keywords::ANALYTICS) {
            Self::AnalyticsExclusion
        } else {
            Self::Default
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::BusinessOverview => "business_overview",
            Self::Financial { .. } => "financial",
            Self::Greeting => "greeting",
            Self::AnalyticsExclusion => "analytics_exclusion",
            Self::Default => "default",
        }
    }
}

/// Greeting or "I don't know" queries that skip retrieval and the hallucination check.
pub fn is_smalltalk(query: &str) -> bool {
    contains_any(query, keywords::GREETING) || contains_any(query, keywords::UNKNOWN_INTENT)
}

/// Topic of the canned answer used when generation fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackTopic {
    Greeting,
    Brand,
    Philosophy,
    Generic,
}

impl FallbackTopic {
    pub fn of(query: &str) -> Self {
        let lower = query.to_lowercase();
        if contains_any(query, keywords::SALUTATIONS) {
            Self::Greeting
        } else if contains_any(&lower, keywords::BRAND) {
            Self::Brand
        } else if contains_any(&lower, keywords::PHILOSOPHY) {
            Self::Philosophy
        } else {
            Self::Generic
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Greeting => "greeting",
            Self::Brand => "brand",
            Self::Philosophy => "philosophy",
            Self::Generic => "generic",
        }
    }
}
