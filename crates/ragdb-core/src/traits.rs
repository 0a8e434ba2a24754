use crate::types::{Provenance, QueryBundle};

/// Text embedding capability. Implementations must return L2-normalized
/// vectors, one per input text, in input order, all in the same space.
pub trait Embedder: Send + Sync {
    fn embed(&self, texts: &[String]) -> anyhow::Result<Vec<Vec<f32>>>;
    fn embed_query(&self, text: &str) -> anyhow::Result<Vec<f32>>;
}

/// Nearest-neighbor store. `upsert` takes four positionally aligned columns
/// of equal length and overwrites existing entries sharing an id. `query`
/// returns at most `k` neighbors in the index's native ranking order.
pub trait VectorIndex: Send + Sync {
    fn upsert(
        &self,
        ids: &[String],
        vectors: &[Vec<f32>],
        provenances: &[Provenance],
        documents: &[String],
    ) -> anyhow::Result<()>;
    fn query(&self, vector: &[f32], k: usize) -> anyhow::Result<QueryBundle>;
}

/// Single-shot text generation capability. One round trip, no retry; any
/// transport or auth failure surfaces to the caller.
pub trait Generator: Send + Sync {
    fn complete(&self, system: &str, user: &str) -> anyhow::Result<String>;
}
