//! Collaborator seams. Every external service the pipeline awaits sits behind one of these.

mod embedding;
mod index;
mod llm;
mod retriever;
mod sink;

pub use embedding::IEmbeddingProvider;
pub use index::{ILexicalIndex, IVectorIndex};
pub use llm::{ILlmClient, ResponseFormat};
pub use retriever::IRetriever;
pub use sink::IInteractionSink;
