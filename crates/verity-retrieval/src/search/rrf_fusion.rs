//! Weighted Reciprocal Rank Fusion: score = Σ w_i / (k + rank_i)
//!
//! Ranks are 1-based. Candidates are identified by `(evidence_ref, content)`;
//! the first occurrence (lexical list first) supplies the candidate and breaks ties.

use std::collections::HashMap;

use verity_core::models::RetrievedCandidate;

use crate::weights::FusionWeights;

/// Fuse a lexical and a vector ranking. The result is deduplicated and sorted
/// by fused score, descending; the fused score replaces each candidate's score.
pub fn fuse(
    lexical: &[RetrievedCandidate],
    vector: &[RetrievedCandidate],
    weights: FusionWeights,
    k: u32,
) -> Vec<RetrievedCandidate> {
    let mut order: Vec<RetrievedCandidate> = Vec::new();
    let mut scores: Vec<f64> = Vec::new();
    let mut positions: HashMap<(String, String), usize> = HashMap::new();

    for (list, weight) in [(lexical, weights.lexical), (vector, weights.vector)] {
        for (i, candidate) in list.iter().enumerate() {
            let rrf = weight / (k as f64 + (i + 1) as f64);
            let key = (
                candidate.metadata.evidence_ref.clone(),
                candidate.content.clone(),
            );
            match positions.get(&key) {
                Some(&pos) => scores[pos] += rrf,
                None => {
                    positions.insert(key, order.len());
                    order.push(candidate.clone());
                    scores.push(rrf);
                }
            }
        }
    }

    let mut fused: Vec<(RetrievedCandidate, f64)> = order.into_iter().zip(scores).collect();
    // Stable sort keeps first-seen order among equal scores.
    fused.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    fused
        .into_iter()
        .map(|(c, score)| c.with_score(score))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use verity_core::models::CandidateMetadata;

    fn cand(stem: &str) -> RetrievedCandidate {
        RetrievedCandidate::new(
            format!("content of {stem}"),
            CandidateMetadata::new(0, format!("deck/{stem}.png")),
        )
    }

    #[test]
    fn item_in_both_lists_wins() {
        let lex = vec![cand("a"), cand("b")];
        let vec = vec![cand("b"), cand("c")];
        let fused = fuse(&lex, &vec, FusionWeights::new(0.5, 0.5), 60);
        assert_eq!(fused[0].metadata.evidence_ref, "deck/b.png");
        assert_eq!(fused.len(), 3);
    }

    #[test]
    fn lexical_weight_dominates() {
        let lex = vec![cand("a")];
        let vec = vec![cand("z")];
        let fused = fuse(&lex, &vec, FusionWeights::new(0.8, 0.2), 60);
        assert_eq!(fused[0].metadata.evidence_ref, "deck/a.png");
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let lex = vec![cand("a")];
        let vec = vec![cand("z")];
        let fused = fuse(&lex, &vec, FusionWeights::new(0.5, 0.5), 60);
        assert_eq!(fused[0].metadata.evidence_ref, "deck/a.png");
        assert_eq!(fused[1].metadata.evidence_ref, "deck/z.png");
    }

    #[test]
    fn fused_score_uses_one_based_ranks() {
        let fused = fuse(&[cand("a")], &[], FusionWeights::new(1.0, 0.0), 60);
        assert!((fused[0].score.unwrap() - 1.0 / 61.0).abs() < 1e-12);
    }

    #[test]
    fn empty_inputs() {
        assert!(fuse(&[], &[], FusionWeights::default(), 60).is_empty());
    }
}
