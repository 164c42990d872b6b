//! Test fixture loader and fake collaborators for the Verity workspace.
//!
//! Fixture JSON lives under this crate's `fixtures/` directory. The fakes
//! implement the core traits with scripted behaviour and call counters.

pub mod fakes;

use std::path::PathBuf;

use serde::de::DeserializeOwned;
use verity_core::models::{Corpus, CorpusRecord, FaqEntry};

pub use fakes::{FailingIndex, ScriptedLlm, ScriptedReply, StaticIndex, StaticRetriever};

/// Root directory of the fixture files.
pub fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixture_path(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Get the absolute path to a fixture file.
pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

/// The sample slide deck: overview, philosophy, segments, performance,
/// analytics and IP-strategy slides.
pub fn deck_records() -> Vec<CorpusRecord> {
    load_fixture("corpus/nitto_deck.json")
}

/// [`deck_records`] as a [`Corpus`].
pub fn deck_corpus() -> Corpus {
    Corpus::new(deck_records()).unwrap_or_else(|e| panic!("invalid deck fixture: {e}"))
}

pub fn faq_entries() -> Vec<FaqEntry> {
    load_fixture("faq/faq.json")
}
