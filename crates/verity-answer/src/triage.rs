//! Comment triage for live-stream chat: keep questions, requests and
//! supportive comments; drop the rest.

use std::sync::Arc;

use tracing::{debug, warn};
use verity_core::traits::{ILlmClient, ResponseFormat};
use verity_llm::decode_index_list;

use crate::prompts;

/// Comments addressed to the stream itself start with one of these and are never answered.
const STREAM_PREFIXES: [char; 2] = ['#', '＃'];

pub struct CommentTriage {
    llm: Arc<dyn ILlmClient>,
}

impl CommentTriage {
    pub fn new(llm: Arc<dyn ILlmClient>) -> Self {
        Self { llm }
    }

    /// Comments worth answering, in input order. Empty and `#`-prefixed
    /// comments are dropped first; if the model call or its reply fails,
    /// every remaining comment is returned.
    pub async fn filter(&self, comments: &[String]) -> Vec<String> {
        let targets: Vec<String> = comments
            .iter()
            .filter(|c| c.chars().next().is_some_and(|f| !STREAM_PREFIXES.contains(&f)))
            .cloned()
            .collect();
        if targets.is_empty() {
            return targets;
        }

        let listing = match serde_json::to_string(&targets) {
            Ok(s) => s,
            Err(e) => {
                warn!(error = %e, "could not encode comments, passing all through");
                return targets;
            }
        };
        let prompt = prompts::comment_triage(&listing);

        let indices = match self.llm.generate(&prompt, ResponseFormat::Json).await {
            Ok(reply) => match decode_index_list(&reply, "question_index") {
                Ok(indices) => indices,
                Err(e) => {
                    warn!(error = %e, "triage reply unreadable, passing all through");
                    return targets;
                }
            },
            Err(e) => {
                warn!(error = %e, "triage call failed, passing all through");
                return targets;
            }
        };

        let mut keep = vec![false; targets.len()];
        for i in indices {
            if let Some(slot) = usize::try_from(i).ok().and_then(|i| keep.get_mut(i)) {
                *slot = true;
            }
        }
        let selected: Vec<String> = targets
            .into_iter()
            .zip(keep)
            .filter_map(|(c, k)| k.then_some(c))
            .collect();
        debug!(selected = selected.len(), "comments triaged");
        selected
    }
}
