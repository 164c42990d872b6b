//! Lexical index: FTS5 over tokenized chunks, plus the build-once cache.

pub mod cache;
pub mod fts5;

pub use cache::{CachedLexicalIndex, LexicalIndexCache};
pub use fts5::Fts5LexicalIndex;
