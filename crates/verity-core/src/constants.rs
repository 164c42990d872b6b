/// Verity system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Sentence terminator used by generated answers.
pub const SENTENCE_TERMINATOR: char = '。';

/// Clause separator trimmed before the final terminator is appended.
pub const CLAUSE_SEPARATOR: char = '、';

/// Marks removed from generated answers before they are returned.
pub const STRIPPED_MARKS: [char; 2] = ['™', '®'];

/// Hallucination verdict codes understood by the classifier prompt.
pub const VERDICT_GROUNDED: u32 = 0;
pub const VERDICT_UNGROUNDED: u32 = 1;
pub const VERDICT_CONTRADICTORY: u32 = 2;
