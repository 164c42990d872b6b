//! Deterministic post-fusion reorderings and exclusions, one per category.

use tracing::debug;
use verity_core::config::RetrievalConfig;
use verity_core::models::RetrievedCandidate;
use verity_core::QueryCategory;

/// Move candidates matching `anchor` to the front, keeping relative order on both sides.
pub fn prioritize(candidates: Vec<RetrievedCandidate>, anchor: &str) -> Vec<RetrievedCandidate> {
    let (mut front, rest): (Vec<_>, Vec<_>) = candidates
        .into_iter()
        .partition(|c| c.metadata.matches_anchor(anchor));
    front.extend(rest);
    front
}

/// Drop the excluded reference and any content naming the excluded term. When
/// fewer than `min_remaining` survive, the overview anchor candidates from the
/// unfiltered list are put back in front.
pub fn exclude(candidates: Vec<RetrievedCandidate>, config: &RetrievalConfig) -> Vec<RetrievedCandidate> {
    let kept: Vec<RetrievedCandidate> = candidates
        .iter()
        .filter(|c| {
            !c.metadata.matches_anchor(&config.excluded_anchor)
                && !c.content.contains(config.excluded_term.as_str())
        })
        .cloned()
        .collect();

    if kept.len() >= config.exclusion_min_remaining {
        return kept;
    }

    debug!(
        remaining = kept.len(),
        anchor = %config.overview_anchor,
        "exclusion left too few candidates, re-prepending overview anchor"
    );
    let mut out: Vec<RetrievedCandidate> = candidates
        .into_iter()
        .filter(|c| c.metadata.matches_anchor(&config.overview_anchor))
        .filter(|c| !kept.contains(c))
        .collect();
    out.extend(kept);
    out
}

/// Apply the override for `category`.
pub fn apply(
    category: QueryCategory,
    candidates: Vec<RetrievedCandidate>,
    config: &RetrievalConfig,
) -> Vec<RetrievedCandidate> {
    match category {
        QueryCategory::BusinessOverview | QueryCategory::Greeting => {
            prioritize(candidates, &config.overview_anchor)
        }
        QueryCategory::Financial { anchored: true } => {
            prioritize(candidates, &config.performance_anchor)
        }
        QueryCategory::AnalyticsExclusion => exclude(candidates, config),
        QueryCategory::Financial { anchored: false } | QueryCategory::Default => candidates,
    }
}
