//! Keyword tables behind query categorization. Matching is plain substring.

/// Business / company-overview questions.
pub const BUSINESS_OVERVIEW: &[&str] = &[
    "事業",
    "事業内容",
    "ビジネス",
    "何をしている",
    "会社概要",
    "概要",
];

/// Financial-performance questions (drives fusion weights).
pub const FINANCIAL: &[&str] = &[
    "売上",
    "業績",
    "収益",
    "営業利益",
    "セグメント",
    "2024年度",
    "決算",
];

/// Narrower performance subset that prioritizes the performance anchor.
pub const PERFORMANCE: &[&str] = &["売上", "業績", "収益", "2024年度", "決算"];

pub const GREETING: &[&str] = &["こんにちは", "はじめまして", "初めて", "挨拶", "よろしく"];

/// Data-science / analytics questions that must not surface IP-related slides.
pub const ANALYTICS: &[&str] = &["データサイエンス", "AI", "機械学習", "分析"];

/// The asker is saying they do not know or cannot answer.
pub const UNKNOWN_INTENT: &[&str] = &["知らない", "分からない", "わからない", "不明", "答えられない"];

// --- Canned-answer topics (generation failure) ---

pub const SALUTATIONS: &[&str] = &["こんにちは", "おはよう", "こんばんは", "はじめまして"];

/// Matched case-insensitively; entries are lowercase.
pub const BRAND: &[&str] = &["nitto", "日東電工", "創る", "wonder"];

/// Matched case-insensitively; entries are lowercase.
pub const PHILOSOPHY: &[&str] = &["経営理念", "mission", "vision"];

pub(crate) fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}
