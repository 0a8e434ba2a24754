//! Domain types shared by the ingestion and query paths.

use serde::{Deserialize, Serialize};

/// A window of normalized document text, independently embedded and indexed.
///
/// `start`/`end` are character offsets into the normalized text of the block
/// the chunk was cut from (paragraphs trimmed and rejoined with `"\n\n"`).
/// Invariant: `0 <= start < end <= len`, and consecutive chunks from one
/// block overlap by exactly the configured overlap except the final chunk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    pub text: String,
    pub start: usize,
    pub end: usize,
}

/// Where an indexed chunk came from: source document identifier plus the
/// `[start, end)` character range inside that document's normalized text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    pub source: String,
    pub start: usize,
    pub end: usize,
}

/// One retrieval result. `relevance` is normalized so higher is always
/// better, regardless of the metric the backing index reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hit {
    pub id: String,
    pub relevance: f32,
    pub text: String,
    pub provenance: Provenance,
}

/// Raw nearest-neighbor result bundle as returned by a vector index.
///
/// All four columns are positionally aligned and at most `k` long. The
/// order is the index's native ranking and is preserved downstream.
#[derive(Debug, Clone, Default)]
pub struct QueryBundle {
    pub ids: Vec<String>,
    pub documents: Vec<String>,
    pub provenances: Vec<Provenance>,
    pub distances: Vec<f32>,
}

/// Final response from the question-answering path: the answer text plus
/// the relevance-ranked hits it was drawn from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    pub answer: String,
    pub sources: Vec<Hit>,
}
