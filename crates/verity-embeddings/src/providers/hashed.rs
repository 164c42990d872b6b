//! Hashed term-frequency fallback provider.
//!
//! Projects terms into fixed-dimension buckets. No network, always available.

use std::collections::HashMap;

use async_trait::async_trait;
use verity_core::errors::VerityResult;
use verity_core::traits::IEmbeddingProvider;

/// Hashed term-frequency embedding provider.
///
/// ASCII words are terms as-is; runs of other letters (kana, kanji) contribute
/// character bigrams, so unsegmented Japanese still shares features.
pub struct HashedTfProvider {
    dimensions: usize,
}

impl HashedTfProvider {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.max(1),
        }
    }

    /// Hash a term into a bucket index using FNV-1a.
    fn hash_term(term: &str, dims: usize) -> usize {
        let mut h: u64 = 0xcbf29ce484222325;
        for b in term.as_bytes() {
            h ^= *b as u64;
            h = h.wrapping_mul(0x100000001b3);
        }
        (h as usize) % dims
    }

    fn terms(text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        let mut terms = Vec::new();
        let mut ascii = String::new();
        let mut wide: Vec<char> = Vec::new();

        let flush_ascii = |buf: &mut String, out: &mut Vec<String>| {
            if buf.len() >= 2 {
                out.push(std::mem::take(buf));
            }
            buf.clear();
        };
        let flush_wide = |buf: &mut Vec<char>, out: &mut Vec<String>| {
            match buf.len() {
                0 => {}
                1 => out.push(buf[0].to_string()),
                _ => out.extend(buf.windows(2).map(|w| w.iter().collect::<String>())),
            }
            buf.clear();
        };

        for c in lower.chars() {
            if c.is_ascii_alphanumeric() {
                flush_wide(&mut wide, &mut terms);
                ascii.push(c);
            } else if c.is_alphanumeric() {
                flush_ascii(&mut ascii, &mut terms);
                wide.push(c);
            } else {
                flush_ascii(&mut ascii, &mut terms);
                flush_wide(&mut wide, &mut terms);
            }
        }
        flush_ascii(&mut ascii, &mut terms);
        flush_wide(&mut wide, &mut terms);
        terms
    }

    fn vector(&self, text: &str) -> Vec<f32> {
        let terms = Self::terms(text);
        let mut vec = vec![0.0f32; self.dimensions];
        if terms.is_empty() {
            return vec;
        }

        let mut tf: HashMap<&str, f32> = HashMap::new();
        for t in &terms {
            *tf.entry(t.as_str()).or_default() += 1.0;
        }

        let total = terms.len() as f32;
        for (term, count) in tf {
            // Longer terms are rarer; weight them up.
            let idf = 1.0 + (term.chars().count() as f32).ln();
            vec[Self::hash_term(term, self.dimensions)] += (count / total) * idf;
        }

        let norm: f32 = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > f32::EPSILON {
            for v in &mut vec {
                *v /= norm;
            }
        }
        vec
    }
}

#[async_trait]
impl IEmbeddingProvider for HashedTfProvider {
    async fn embed(&self, text: &str) -> VerityResult<Vec<f32>> {
        Ok(self.vector(text))
    }

    async fn embed_batch(&self, texts: &[String]) -> VerityResult<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.vector(t)).collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "hashed-tf"
    }

    fn is_available(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cosine(a: &[f32], b: &[f32]) -> f32 {
        a.iter().zip(b).map(|(x, y)| x * y).sum()
    }

    #[tokio::test]
    async fn empty_text_returns_zero_vector() {
        let p = HashedTfProvider::new(128);
        let v = p.embed("").await.unwrap();
        assert_eq!(v.len(), 128);
        assert!(v.iter().all(|&x| x == 0.0));
    }

    #[tokio::test]
    async fn output_is_normalized() {
        let p = HashedTfProvider::new(256);
        let v = p.embed("粘着テープの技術 adhesive").await.unwrap();
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5, "expected unit norm, got {norm}");
    }

    #[tokio::test]
    async fn deterministic() {
        let p = HashedTfProvider::new(256);
        assert_eq!(
            p.embed("決算の概要").await.unwrap(),
            p.embed("決算の概要").await.unwrap()
        );
    }

    #[test]
    fn japanese_runs_become_bigrams() {
        let terms = HashedTfProvider::terms("売上高、AI");
        assert_eq!(terms, vec!["売上", "上高", "ai"]);
    }

    #[tokio::test]
    async fn similar_japanese_texts_have_higher_cosine() {
        let p = HashedTfProvider::new(512);
        let a = p.embed("2024年度の売上収益").await.unwrap();
        let b = p.embed("売上収益の推移").await.unwrap();
        let c = p.embed("環境への取り組み").await.unwrap();
        assert!(cosine(&a, &b) > cosine(&a, &c));
    }
}
