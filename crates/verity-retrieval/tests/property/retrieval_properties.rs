//! Property tests for fusion and the hybrid retriever.

use std::collections::HashSet;
use std::sync::Arc;

use proptest::prelude::*;
use test_fixtures::StaticIndex;
use verity_core::config::RetrievalConfig;
use verity_core::models::{CandidateMetadata, RetrievedCandidate};
use verity_core::traits::IRetriever;
use verity_retrieval::search::rrf_fusion::fuse;
use verity_retrieval::{FusionWeights, HybridRetriever};

fn candidates(slides: Vec<u8>) -> Vec<RetrievedCandidate> {
    let mut seen = HashSet::new();
    slides
        .into_iter()
        .filter(|s| seen.insert(*s))
        .map(|s| {
            RetrievedCandidate::new(
                format!("content {s}"),
                CandidateMetadata::new(s as usize, format!("nitto_PDF/slide_{s}.png")),
            )
        })
        .collect()
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
}

const QUERIES: &[&str] = &["事業内容", "2024年度の業績", "AI分析", "こんにちは", "テープ"];

proptest! {
    #[test]
    fn fused_refs_subset_of_union(
        lex in prop::collection::vec(1u8..60, 0..15),
        vec in prop::collection::vec(1u8..60, 0..15),
    ) {
        let lex = candidates(lex);
        let vec = candidates(vec);
        let union: HashSet<String> = lex.iter().chain(vec.iter())
            .map(|c| c.metadata.evidence_ref.clone())
            .collect();
        let fused = fuse(&lex, &vec, FusionWeights::default(), 60);
        for c in &fused {
            prop_assert!(union.contains(&c.metadata.evidence_ref));
        }
        prop_assert_eq!(fused.len(), union.len());
    }

    #[test]
    fn retrieve_bounded_and_within_union(
        lex in prop::collection::vec(1u8..60, 0..15),
        vec in prop::collection::vec(1u8..60, 0..15),
        top_k in 0usize..20,
        q in 0usize..5,
    ) {
        let lex = candidates(lex);
        let vec = candidates(vec);
        let union: HashSet<String> = lex.iter().chain(vec.iter())
            .map(|c| c.metadata.evidence_ref.clone())
            .collect();
        let retriever = HybridRetriever::new(
            Arc::new(StaticIndex::new(lex)),
            Arc::new(StaticIndex::new(vec)),
            RetrievalConfig::default(),
        );
        let ranking = runtime().block_on(retriever.retrieve(QUERIES[q], top_k)).unwrap();
        prop_assert!(ranking.len() <= top_k);
        for c in ranking.iter() {
            prop_assert!(union.contains(&c.metadata.evidence_ref));
        }
    }

    #[test]
    fn business_query_overview_first_when_in_union(
        lex in prop::collection::vec(1u8..60, 0..15),
        vec in prop::collection::vec(1u8..60, 0..15),
        top_k in 1usize..20,
    ) {
        let lex = candidates(lex);
        let vec = candidates(vec);
        // Indices only return their first top_k hits.
        let in_union = lex.iter().take(top_k).chain(vec.iter().take(top_k))
            .any(|c| c.metadata.matches_anchor("slide_1"));
        let retriever = HybridRetriever::new(
            Arc::new(StaticIndex::new(lex)),
            Arc::new(StaticIndex::new(vec)),
            RetrievalConfig::default(),
        );
        let ranking = runtime().block_on(retriever.retrieve("事業内容", top_k)).unwrap();
        if in_union {
            prop_assert!(ranking.first().unwrap().metadata.matches_anchor("slide_1"));
        }
    }
}
