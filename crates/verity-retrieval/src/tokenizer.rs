//! Japanese-aware tokenizer shared by indexing and querying.
//!
//! Kana/kanji runs of two or more characters are split at script boundaries;
//! hiragana segments (particles, inflections) are dropped and kanji/katakana
//! segments become character bigrams. ASCII alphanumeric words of two or more
//! characters are lowercased. Stopwords are removed last.

use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use verity_core::errors::{ConfigError, VerityResult};

static TOKEN_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?P<cjk>[\x{3040}-\x{309f}\x{30a0}-\x{30ff}\x{4e00}-\x{9faf}]{2,})|(?P<ascii>[A-Za-z0-9]{2,})").ok()
});

/// Built-in stopwords, used when no stopword file is configured.
pub const DEFAULT_STOPWORDS: &[&str] = &[
    "the", "and", "for", "are", "is", "of", "to", "in", "on", "what", "about", "please", "tell",
    "me", "質問", "回答", "教示",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Script {
    Hiragana,
    Katakana,
    Kanji,
}

fn script_of(c: char) -> Script {
    match c {
        '\u{3040}'..='\u{309f}' => Script::Hiragana,
        '\u{30a0}'..='\u{30ff}' => Script::Katakana,
        _ => Script::Kanji,
    }
}

#[derive(Debug, Clone)]
pub struct Tokenizer {
    stopwords: HashSet<String>,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::with_stopwords(DEFAULT_STOPWORDS.iter().map(|s| s.to_string()))
    }
}

impl Tokenizer {
    pub fn with_stopwords(stopwords: impl IntoIterator<Item = String>) -> Self {
        Self {
            stopwords: stopwords
                .into_iter()
                .map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    /// Load a newline-separated stopword file.
    pub fn from_stopword_file(path: impl AsRef<Path>) -> VerityResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self::with_stopwords(raw.lines().map(str::to_string)))
    }

    /// Built-in stopwords unless a file path is given.
    pub fn from_optional_file(path: Option<&str>) -> VerityResult<Self> {
        match path {
            Some(p) => Self::from_stopword_file(p),
            None => Ok(Self::default()),
        }
    }

    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let Some(re) = TOKEN_RE.as_ref() else {
            return Vec::new();
        };
        let mut tokens = Vec::new();
        for caps in re.captures_iter(text) {
            if let Some(m) = caps.name("cjk") {
                self.push_cjk(m.as_str(), &mut tokens);
            } else if let Some(m) = caps.name("ascii") {
                let word = m.as_str().to_lowercase();
                if !self.stopwords.contains(&word) {
                    tokens.push(word);
                }
            }
        }
        tokens
    }

    fn push_cjk(&self, run: &str, tokens: &mut Vec<String>) {
        let chars: Vec<char> = run.chars().collect();
        let mut start = 0;
        while start < chars.len() {
            let script = script_of(chars[start]);
            let mut end = start + 1;
            while end < chars.len() && script_of(chars[end]) == script {
                end += 1;
            }
            let segment = &chars[start..end];
            start = end;

            if script == Script::Hiragana || segment.len() < 2 {
                continue;
            }
            let whole: String = segment.iter().collect();
            if self.stopwords.contains(&whole) {
                continue;
            }
            for pair in segment.windows(2) {
                let bigram: String = pair.iter().collect();
                if !self.stopwords.contains(&bigram) {
                    tokens.push(bigram);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kanji_segments_become_bigrams() {
        let t = Tokenizer::default();
        assert_eq!(t.tokenize("事業内容を教えて"), vec!["事業", "業内", "内容"]);
    }

    #[test]
    fn katakana_kept_hiragana_dropped() {
        let t = Tokenizer::default();
        assert_eq!(t.tokenize("データです"), vec!["デー", "ータ"]);
    }

    #[test]
    fn ascii_words_lowercased_and_filtered() {
        let t = Tokenizer::default();
        assert_eq!(t.tokenize("What is AI and IoT?"), vec!["ai", "iot"]);
    }

    #[test]
    fn mixed_digits_and_kanji() {
        let t = Tokenizer::default();
        assert_eq!(t.tokenize("2024年度の売上"), vec!["2024", "年度", "売上"]);
    }

    #[test]
    fn stopword_segment_dropped_whole() {
        let t = Tokenizer::with_stopwords(vec!["売上高".to_string()]);
        assert!(t.tokenize("売上高").is_empty());
    }

    #[test]
    fn single_kanji_is_not_a_token() {
        let t = Tokenizer::default();
        assert!(t.tokenize("何の").is_empty());
    }
}
