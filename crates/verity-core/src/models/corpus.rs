use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::errors::{VerityError, VerityResult};

/// One knowledge record: a titled passage and the reference shown next to answers it grounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusRecord {
    pub row: usize,
    pub title: String,
    pub body: String,
    /// Usually an image path such as `nitto_PDF/slide_12.png`.
    pub evidence_ref: String,
}

impl CorpusRecord {
    /// Text indexed for retrieval.
    pub fn page_content(&self) -> String {
        format!("Title: {}\n {}", self.title, self.body)
    }
}

/// One FAQ question/answer pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

impl FaqEntry {
    pub fn text(&self) -> String {
        format!("Q: {}\nA: {}", self.question, self.answer)
    }
}

/// An immutable corpus version, identified by a blake3 fingerprint over every record.
#[derive(Debug, Clone)]
pub struct Corpus {
    records: Vec<CorpusRecord>,
    fingerprint: String,
}

impl Corpus {
    /// Build a corpus. Rows must be unique.
    pub fn new(records: Vec<CorpusRecord>) -> VerityResult<Self> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.row) {
                return Err(VerityError::InvalidCorpus {
                    reason: format!("duplicate row {}", record.row),
                });
            }
        }
        let fingerprint = Self::compute_fingerprint(&records);
        Ok(Self {
            records,
            fingerprint,
        })
    }

    /// Parse a JSON array of records.
    pub fn from_json(json: &str) -> VerityResult<Self> {
        let records: Vec<CorpusRecord> = serde_json::from_str(json)?;
        Self::new(records)
    }

    fn compute_fingerprint(records: &[CorpusRecord]) -> String {
        let mut hasher = blake3::Hasher::new();
        for r in records {
            hasher.update(&r.row.to_le_bytes());
            for field in [&r.title, &r.body, &r.evidence_ref] {
                hasher.update(&(field.len() as u64).to_le_bytes());
                hasher.update(field.as_bytes());
            }
        }
        hasher.finalize().to_hex().to_string()
    }

    pub fn records(&self) -> &[CorpusRecord] {
        &self.records
    }

    pub fn get(&self, row: usize) -> VerityResult<&CorpusRecord> {
        self.records
            .iter()
            .find(|r| r.row == row)
            .ok_or(VerityError::RecordNotFound { row })
    }

    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
