use proptest::prelude::*;
use verity_llm::{decode_index_list, first_integer};

proptest! {
    #[test]
    fn first_integer_finds_embedded_number(
        prefix in "[ぁ-ん ]{0,8}",
        n in 0u32..100_000,
        suffix in "[ぁ-ん ]{0,8}"
    ) {
        let reply = format!("{prefix}{n}{suffix}");
        prop_assert_eq!(first_integer(&reply).unwrap(), n as u64);
    }

    #[test]
    fn first_integer_never_panics(reply in "\\PC{0,40}") {
        let _ = first_integer(&reply);
    }

    #[test]
    fn index_list_roundtrips_ints(indices in proptest::collection::vec(-5i64..50, 0..10)) {
        let reply = serde_json::json!({ "results": indices }).to_string();
        prop_assert_eq!(decode_index_list(&reply, "results").unwrap(), indices);
    }

    #[test]
    fn index_list_never_panics(reply in "\\PC{0,60}") {
        let _ = decode_index_list(&reply, "results");
    }
}
