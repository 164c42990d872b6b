//! Structured log events for pipeline outcomes.
//!
//! Each function emits a `tracing` event with an `event` field naming it.

/// Safety filter short-circuited a request.
pub fn query_blocked(matched: &str) {
    tracing::info!(event = "query_blocked", matched = %matched, "query blocked");
}

/// Retrieval (or FAQ retrieval) failed and a fallback was used.
pub fn retrieval_degraded(stage: &str, error: &str) {
    tracing::warn!(
        event = "retrieval_degraded",
        stage = %stage,
        error = %error,
        "retrieval degraded"
    );
}

/// Selector reply could not be used as given.
pub fn selection_degraded(mode: &str, reason: &str) {
    tracing::warn!(
        event = "selection_degraded",
        mode = %mode,
        reason = %reason,
        "selection degraded"
    );
}

/// Generation failed; a canned answer was substituted.
pub fn generation_fallback(topic: &str, error: &str) {
    tracing::warn!(
        event = "generation_fallback",
        topic = %topic,
        error = %error,
        "generation failed, canned answer used"
    );
}

pub fn hallucination_detected(verdict: u32, evidence_ref: &str) {
    tracing::warn!(
        event = "hallucination_detected",
        verdict = verdict,
        evidence_ref = %evidence_ref,
        "hallucination detected"
    );
}

/// Result of the single hallucination retry.
pub fn retry_outcome(outcome: &str, evidence_ref: &str) {
    tracing::info!(
        event = "retry_outcome",
        outcome = %outcome,
        evidence_ref = %evidence_ref,
        "hallucination retry finished"
    );
}

pub fn interaction_logged(mode: &str, latency_secs: f64, persisted: bool) {
    if persisted {
        tracing::info!(
            event = "interaction_logged",
            mode = %mode,
            latency_secs = latency_secs,
            "interaction logged"
        );
    } else {
        tracing::warn!(
            event = "interaction_logged",
            mode = %mode,
            latency_secs = latency_secs,
            persisted = false,
            "interaction log append failed"
        );
    }
}
