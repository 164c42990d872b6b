//! # verity-llm
//!
//! The LLM collaborator: an HTTP client for the Generative Language API and
//! the decode step every call site runs before trusting a reply.

pub mod decode;
pub mod gemini;

pub use decode::{decode_index_list, decode_json, first_integer};
pub use gemini::GeminiClient;
