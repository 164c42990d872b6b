use proptest::prelude::*;
use verity_safety::SafetyFilter;

// ── Checking is pure: the same text always yields the same decision ───────

proptest! {
    #[test]
    fn check_is_idempotent(text in "\\PC{0,60}") {
        let filter = SafetyFilter::with_defaults("NG");
        let first = filter.check(&text);
        let second = filter.check(&text);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn off_topic_term_anywhere_blocks(
        prefix in "[a-z ]{0,10}",
        suffix in "[a-z ]{0,10}",
        idx in 0usize..19
    ) {
        let term = verity_safety::patterns::OFF_TOPIC_TERMS[idx];
        let text = format!("{prefix}{term}{suffix}");
        let filter = SafetyFilter::with_defaults("NG");
        let (blocked, reply) = filter.check(&text).into_pair();
        prop_assert!(blocked);
        prop_assert_eq!(reply, "NG");
    }

    #[test]
    fn guard_exception_always_allows(
        suffix in "\\PC{0,30}",
        idx in 0usize..3
    ) {
        let guard = verity_safety::patterns::GUARD_EXCEPTIONS[idx];
        let text = format!("{guard}{suffix}");
        let filter = SafetyFilter::with_defaults("NG");
        prop_assert!(!filter.check(&text).is_blocked());
    }
}
