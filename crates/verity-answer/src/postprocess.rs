//! Answer post-processing.
//!
//! Steps run in a fixed order: truncate, collapse terminator runs, strip ™/®,
//! terminate. Output is at most `max_chars` characters, free of ™/®, without
//! runs of sentence terminators, and ends with exactly one terminator.
//! Applying it to its own output is a no-op.

use verity_core::config::AnswerConfig;
use verity_core::constants::{CLAUSE_SEPARATOR, SENTENCE_TERMINATOR, STRIPPED_MARKS};

/// Cut an over-long answer: at the last terminator inside the limit when that
/// lies at or beyond `min_sentence_cut`, otherwise hard at `hard_cut` with a
/// terminator appended.
fn truncate(text: &str, config: &AnswerConfig) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= config.max_chars {
        return text.to_string();
    }
    let head = &chars[..config.max_chars];
    match head.iter().rposition(|&c| c == SENTENCE_TERMINATOR) {
        Some(pos) if pos >= config.min_sentence_cut => head[..=pos].iter().collect(),
        _ => {
            let cut: String = chars[..config.hard_cut.min(config.max_chars.saturating_sub(1))].iter().collect();
            let mut cut = trim_trailing(&cut).to_string();
            cut.push(SENTENCE_TERMINATOR);
            cut
        }
    }
}

fn collapse_terminators(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_terminator = false;
    for c in text.chars() {
        let is_terminator = c == SENTENCE_TERMINATOR;
        if !(is_terminator && prev_terminator) {
            out.push(c);
        }
        prev_terminator = is_terminator;
    }
    out
}

fn strip_marks(text: &str) -> String {
    text.chars().filter(|c| !STRIPPED_MARKS.contains(c)).collect()
}

fn trim_trailing(text: &str) -> &str {
    text.trim_end_matches(|c: char| {
        c == SENTENCE_TERMINATOR || c == CLAUSE_SEPARATOR || c.is_whitespace()
    })
}

fn terminate(text: &str) -> String {
    let mut out = trim_trailing(text).to_string();
    out.push(SENTENCE_TERMINATOR);
    out
}

/// Apply every post-processing rule to a raw model reply.
pub fn postprocess(raw: &str, config: &AnswerConfig) -> String {
    let text = truncate(raw.trim(), config);
    let text = collapse_terminators(&text);
    let text = strip_marks(&text);
    // Stripping can expose a run ("。™。") or leading whitespace ("™ ").
    let text = collapse_terminators(&text);
    let text = terminate(text.trim_start());
    // Terminating can add one character to an answer sitting exactly at the limit.
    if text.chars().count() > config.max_chars {
        terminate(&truncate(&text, config))
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> AnswerConfig {
        AnswerConfig::default()
    }

    #[test]
    fn short_answer_gets_single_terminator() {
        assert_eq!(postprocess("粘着テープの会社です", &cfg()), "粘着テープの会社です。");
        assert_eq!(postprocess("粘着テープの会社です。。。", &cfg()), "粘着テープの会社です。");
        assert_eq!(postprocess("会社です、\n", &cfg()), "会社です。");
    }

    #[test]
    fn marks_are_stripped() {
        assert_eq!(postprocess("Nitto™の製品®です。", &cfg()), "Nittoの製品です。");
    }

    #[test]
    fn marks_count_toward_the_cut_window() {
        // Hard cut at 190 on the raw text, then the ten marks are removed.
        let raw = "™".repeat(10) + &"あ".repeat(195);
        let out = postprocess(&raw, &cfg());
        assert_eq!(out, "あ".repeat(180) + "。");
    }

    #[test]
    fn mark_between_terminators_leaves_no_run() {
        assert_eq!(postprocess("一文目。™。二文目", &cfg()), "一文目。二文目。");
    }

    #[test]
    fn runs_collapse_inside_text() {
        assert_eq!(postprocess("一文目。。二文目。", &cfg()), "一文目。二文目。");
    }

    #[test]
    fn long_answer_cut_at_late_sentence_boundary() {
        let first = "あ".repeat(120) + "。";
        let raw = first.clone() + &"い".repeat(150) + "。";
        let out = postprocess(&raw, &cfg());
        assert_eq!(out, first);
    }

    #[test]
    fn early_boundary_forces_hard_cut() {
        let raw = "あ".repeat(50) + "。" + &"い".repeat(300);
        let out = postprocess(&raw, &cfg());
        assert_eq!(out.chars().count(), 191);
        assert!(out.ends_with("い。"));
    }

    #[test]
    fn boundary_exactly_at_min_cut_is_used() {
        // Terminator at index 80.
        let raw = "あ".repeat(80) + "。" + &"い".repeat(300);
        assert_eq!(postprocess(&raw, &cfg()).chars().count(), 81);
    }

    #[test]
    fn exactly_max_without_terminator_stays_within_limit() {
        let raw = "あ".repeat(200);
        let out = postprocess(&raw, &cfg());
        assert!(out.chars().count() <= 200);
        assert!(out.ends_with('。'));
    }

    #[test]
    fn idempotent_on_own_output() {
        for raw in [
            "こんにちは",
            "Nitto™は、",
            &("あ".repeat(50) + "。" + &"い".repeat(300)),
            &("う".repeat(199) + "、"),
            "® 先頭の記号",
        ] {
            let once = postprocess(raw, &cfg());
            assert_eq!(postprocess(&once, &cfg()), once);
        }
    }
}
