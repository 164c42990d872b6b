//! Built-in tables. Configured entries are appended after these.

/// Legitimate words containing a blocked substring. Any hit short-circuits to "allowed".
pub const GUARD_EXCEPTIONS: &[&str] = &["核家族", "中核", "核心"];

/// Off-topic subjects. All map to the shared NG message.
pub const OFF_TOPIC_TERMS: &[&str] = &[
    "関東大震災",
    "地震",
    "災害",
    "戦争",
    "政治",
    "選挙",
    "天気",
    "料理",
    "レシピ",
    "芸能",
    "スポーツ",
    "映画",
    "音楽",
    "ゲーム",
    "アニメ",
    "小説",
    "あなたの名前",
    "個人情報",
    "秘密",
];

/// `(pattern, reply)` rules. An empty reply means the shared NG message.
pub const DEFAULT_RULES: &[(&str, &str)] = &[
    // Prompt disclosure / instruction override.
    ("systemprompt", ""),
    ("system prompt", ""),
    ("システムプロンプト", ""),
    ("プロンプトを教えて", ""),
    ("上記の命令", ""),
    ("以上の指示", ""),
    ("指示を無視", ""),
    ("ignore previous instructions", ""),
    // Violence.
    ("核兵器", "申し訳ございませんが、兵器に関するご質問にはお答えできません。"),
    ("爆弾", "申し訳ございませんが、危険物に関するご質問にはお答えできません。"),
    // Insider information.
    ("株価予想", "申し訳ございませんが、株価の見通しについてはお答えできません。"),
    ("未公開", "申し訳ございませんが、未公開の情報についてはお答えできません。"),
];
