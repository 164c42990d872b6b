//! # verity-observability
//!
//! Tracing subscriber setup, one structured event per notable pipeline
//! outcome, and the append-only interaction-log sinks.

pub mod sinks;
pub mod tracing_setup;

pub use sinks::{FileInteractionSink, MemoryInteractionSink};
pub use tracing_setup::init_tracing;
