//! Newline-separated chunking with no overlap.

use verity_core::models::{CandidateMetadata, Corpus};

/// One indexed chunk of a corpus record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub content: String,
    pub metadata: CandidateMetadata,
}

/// Split `text` on newlines and greedily pack lines into chunks of at most
/// `chunk_size` characters. A single line longer than `chunk_size` becomes its own chunk.
pub fn split_text(text: &str, chunk_size: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut current_len = 0usize;

    for piece in text.split('\n').filter(|p| !p.is_empty()) {
        let piece_len = piece.chars().count();
        let sep = usize::from(!current.is_empty());
        if !current.is_empty() && current_len + sep + piece_len > chunk_size {
            push_chunk(&mut chunks, &current);
            current.clear();
            current_len = 0;
        }
        current_len += usize::from(!current.is_empty()) + piece_len;
        current.push(piece);
    }
    push_chunk(&mut chunks, &current);
    chunks
}

fn push_chunk(chunks: &mut Vec<String>, pieces: &[&str]) {
    let joined = pieces.join("\n");
    let trimmed = joined.trim();
    if !trimmed.is_empty() {
        chunks.push(trimmed.to_string());
    }
}

/// Chunk every record's page content, keeping `{row, evidence_ref}` on each chunk.
pub fn chunk_corpus(corpus: &Corpus, chunk_size: usize) -> Vec<Chunk> {
    corpus
        .records()
        .iter()
        .flat_map(|record| {
            let metadata = CandidateMetadata::new(record.row, record.evidence_ref.clone());
            split_text(&record.page_content(), chunk_size)
                .into_iter()
                .map(move |content| Chunk {
                    content,
                    metadata: metadata.clone(),
                })
        })
        .collect()
}
