//! Interaction-log sinks.

mod file;
mod memory;

pub use file::FileInteractionSink;
pub use memory::MemoryInteractionSink;
