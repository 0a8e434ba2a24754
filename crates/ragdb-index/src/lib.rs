//! In-memory brute-force vector index.
//!
//! The production-grade index (ANN structures, persistence) is an external
//! collaborator behind the [`VectorIndex`] trait; this implementation keeps
//! the pipeline runnable and testable without one. Entries live in
//! insertion order inside an `RwLock`, queries score every entry with
//! `distance = 1 - dot(q, v)` (cosine distance for L2-normalized inputs)
//! and stable-sort ascending, so ties keep insertion order.

use anyhow::{anyhow, Result};
use std::sync::RwLock;

use ragdb_core::traits::VectorIndex;
use ragdb_core::types::{Provenance, QueryBundle};

struct Entry {
    id: String,
    vector: Vec<f32>,
    provenance: Provenance,
    document: String,
}

#[derive(Default)]
pub struct MemoryIndex {
    entries: RwLock<Vec<Entry>>,
}

impl MemoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

impl VectorIndex for MemoryIndex {
    fn upsert(
        &self,
        ids: &[String],
        vectors: &[Vec<f32>],
        provenances: &[Provenance],
        documents: &[String],
    ) -> Result<()> {
        if ids.len() != vectors.len() || ids.len() != provenances.len() || ids.len() != documents.len() {
            return Err(anyhow!(
                "upsert columns must be aligned: {} ids, {} vectors, {} provenances, {} documents",
                ids.len(),
                vectors.len(),
                provenances.len(),
                documents.len()
            ));
        }
        let mut entries = self.entries.write().map_err(|_| anyhow!("index lock poisoned"))?;
        if let Some(first) = entries.first() {
            let dim = first.vector.len();
            if let Some(bad) = vectors.iter().find(|v| v.len() != dim) {
                return Err(anyhow!("vector dimension mismatch: index holds {}D, got {}D", dim, bad.len()));
            }
        }
        for i in 0..ids.len() {
            let entry = Entry {
                id: ids[i].clone(),
                vector: vectors[i].clone(),
                provenance: provenances[i].clone(),
                document: documents[i].clone(),
            };
            // Last write wins for a shared id; new ids append in order.
            match entries.iter_mut().find(|e| e.id == entry.id) {
                Some(existing) => *existing = entry,
                None => entries.push(entry),
            }
        }
        Ok(())
    }

    fn query(&self, vector: &[f32], k: usize) -> Result<QueryBundle> {
        let entries = self.entries.read().map_err(|_| anyhow!("index lock poisoned"))?;
        if entries.is_empty() {
            return Ok(QueryBundle::default());
        }
        if entries[0].vector.len() != vector.len() {
            return Err(anyhow!(
                "query dimension mismatch: index holds {}D, got {}D",
                entries[0].vector.len(),
                vector.len()
            ));
        }

        let mut scored: Vec<(usize, f32)> = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (i, 1.0 - dot(vector, &e.vector)))
            .collect();
        scored.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k);

        let mut bundle = QueryBundle::default();
        for (i, distance) in scored {
            let e = &entries[i];
            bundle.ids.push(e.id.clone());
            bundle.documents.push(e.document.clone());
            bundle.provenances.push(e.provenance.clone());
            bundle.distances.push(distance);
        }
        Ok(bundle)
    }
}
