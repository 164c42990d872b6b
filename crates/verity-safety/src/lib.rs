//! # verity-safety
//!
//! Pre-generation safety and topic filter. Ordered substring tables, no regex:
//! guard exceptions first, then the off-topic deny-list, then `(pattern, reply)` rules.

pub mod filter;
pub mod patterns;

pub use filter::{SafetyDecision, SafetyFilter};
