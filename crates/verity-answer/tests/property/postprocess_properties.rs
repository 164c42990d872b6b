//! Property tests for answer post-processing.

use proptest::prelude::*;
use verity_answer::postprocess::postprocess;
use verity_core::config::AnswerConfig;

/// Japanese-ish text with the characters post-processing cares about.
fn answer_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            4 => prop::sample::select(vec!['あ', 'い', '粘', '着', 'N', 't', 'o', '1']),
            1 => prop::sample::select(vec!['。', '、', '™', '®', ' ', '\n', '\u{3000}']),
        ],
        0..400,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

proptest! {
    #[test]
    fn output_is_bounded_and_terminated(raw in answer_text()) {
        let out = postprocess(&raw, &AnswerConfig::default());
        prop_assert!(out.chars().count() <= 200);
        prop_assert!(out.ends_with('。'));
        prop_assert!(!out.ends_with("。。"));
    }

    #[test]
    fn output_has_no_marks_or_terminator_runs(raw in answer_text()) {
        let out = postprocess(&raw, &AnswerConfig::default());
        prop_assert!(!out.contains('™'));
        prop_assert!(!out.contains('®'));
        prop_assert!(!out.contains("。。"));
    }

    #[test]
    fn postprocess_is_idempotent(raw in answer_text()) {
        let config = AnswerConfig::default();
        let once = postprocess(&raw, &config);
        prop_assert_eq!(postprocess(&once, &config), once);
    }

    #[test]
    fn short_clean_answers_only_gain_a_terminator(body in "[あいうえお粘着]{1,150}") {
        let out = postprocess(&body, &AnswerConfig::default());
        prop_assert_eq!(out, format!("{body}。"));
    }
}
