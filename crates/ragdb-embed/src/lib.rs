//! Deterministic local embedder.
//!
//! A real sentence-transformer model (local inference or a remote service)
//! is an external collaborator behind the [`Embedder`] trait. This crate
//! ships the hashed bag-of-words stand-in used for offline operation and
//! tests: each whitespace token hashes to one dimension with a hash-derived
//! positive weight, and the result is L2-normalized. All components are
//! non-negative, so cosine distance between two embeddings stays in [0, 1].

use anyhow::Result;
use ragdb_core::traits::Embedder;

pub const DEFAULT_DIM: usize = 384;

pub struct HashEmbedder {
    dim: usize,
}

impl HashEmbedder {
    pub fn new(dim: usize) -> Self {
        Self { dim }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    fn hashed_bow(&self, text: &str) -> Vec<f32> {
        use std::hash::{Hash, Hasher};
        use twox_hash::XxHash64;
        let mut v = vec![0f32; self.dim];
        for (i, token) in text.split_whitespace().enumerate() {
            let mut hasher = XxHash64::with_seed(0);
            token.hash(&mut hasher);
            let h = hasher.finish();
            let idx = (h as usize) % self.dim;
            let val = (((h >> 32) as u32) as f32) / (u32::MAX as f32);
            v[idx] += val + (i as f32 % 3.0) * 0.01;
        }
        let norm = (v.iter().map(|x| x * x).sum::<f32>()).sqrt().max(1e-6);
        for x in &mut v {
            *x /= norm;
        }
        v
    }
}

impl Embedder for HashEmbedder {
    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.hashed_bow(t)).collect())
    }

    fn embed_query(&self, text: &str) -> Result<Vec<f32>> {
        Ok(self.hashed_bow(text))
    }
}

pub fn get_default_embedder() -> Result<Box<dyn Embedder>> {
    Ok(Box::new(HashEmbedder::new(DEFAULT_DIM)))
}
