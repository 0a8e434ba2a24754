//! Orchestration of the retrieval pipeline: chunk + embed + upsert on
//! ingest, embed + search + normalize + generate on answer. Capabilities
//! are injected at construction and only borrowed per call; the pipeline
//! holds no other state across calls.

use uuid::Uuid;

use ragdb_answer::generate::{generate, AnswerMode};
use ragdb_core::chunker;
use ragdb_core::config::RagConfig;
use ragdb_core::error::{Error, Result};
use ragdb_core::traits::{Embedder, Generator, VectorIndex};
use ragdb_core::types::{Answer, Hit, Provenance, QueryBundle};

pub struct RagPipeline {
    embedder: Box<dyn Embedder>,
    index: Box<dyn VectorIndex>,
    generator: Option<Box<dyn Generator>>,
    config: RagConfig,
}

impl std::fmt::Debug for RagPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RagPipeline")
            .field("generator", &self.generator.is_some())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl RagPipeline {
    /// Wire explicitly constructed capabilities together. The configuration
    /// is validated here so a bad chunk window or zero `top_k` is rejected
    /// before anything external is touched.
    pub fn new(
        embedder: Box<dyn Embedder>,
        index: Box<dyn VectorIndex>,
        generator: Option<Box<dyn Generator>>,
        config: RagConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self { embedder, index, generator, config })
    }

    /// Replace the generation capability; takes effect on the next call.
    pub fn set_generator(&mut self, generator: Option<Box<dyn Generator>>) {
        self.generator = generator;
    }

    /// Chunk, embed, and index one document's text blocks under `source`.
    /// Returns the number of chunks indexed.
    ///
    /// Ids are random UUIDs, so two documents sharing a filename can never
    /// overwrite each other; the flip side is that re-ingesting a document
    /// adds fresh entries instead of replacing the old ones. The upsert is
    /// issued once, only after every embedding has been computed; if it
    /// fails partway the index's own partial state is what remains, which
    /// this layer does not attempt to roll back.
    pub fn ingest(&self, source: &str, blocks: &[String]) -> Result<usize> {
        let chunks = chunker::chunk_many(blocks, self.config.chunk_size, self.config.chunk_overlap)?;
        if chunks.is_empty() {
            tracing::debug!(source, "nothing to index");
            return Ok(0);
        }

        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
        let vectors = self.embedder.embed(&texts).map_err(Error::Embedding)?;
        let ids: Vec<String> = chunks.iter().map(|_| Uuid::new_v4().to_string()).collect();
        let provenances: Vec<Provenance> = chunks
            .iter()
            .map(|c| Provenance { source: source.to_string(), start: c.start, end: c.end })
            .collect();

        self.index.upsert(&ids, &vectors, &provenances, &texts).map_err(Error::Index)?;
        tracing::info!(source, chunks = ids.len(), "indexed document");
        Ok(ids.len())
    }

    /// Embed the query and return up to `k` hits ranked by the index.
    /// Fewer than `k` hits (including none) is not an error.
    pub fn retrieve(&self, query: &str, k: usize) -> Result<Vec<Hit>> {
        if k == 0 {
            return Err(Error::InvalidConfig("k must be positive".to_string()));
        }
        let query_vector = self.embedder.embed_query(query).map_err(Error::Embedding)?;
        let bundle = self.index.query(&query_vector, k).map_err(Error::Index)?;
        let hits = hits_from_bundle(bundle);
        tracing::debug!(hits = hits.len(), k, "retrieved");
        Ok(hits)
    }

    /// Answer a question from the indexed corpus. The generation mode is
    /// resolved fresh on every call from whether a generator is currently
    /// configured.
    pub fn answer(&self, question: &str) -> Result<Answer> {
        let hits = self.retrieve(question, self.config.top_k)?;
        let mode = AnswerMode::resolve(self.generator.as_deref());
        let answer = generate(&mode, question, &hits, self.config.max_context_chars)?;
        Ok(Answer { answer, sources: hits })
    }
}

/// Normalize a raw index result into relevance-ranked hits.
///
/// `relevance = 1 - distance`. This assumes the index reports a cosine
/// distance bounded in [0, 1] (the case for L2-normalized, non-negative
/// embeddings); if the index ever changes metric spaces this conversion
/// must change with it or relevance values become meaningless. The bundle's
/// order is kept as-is: ties are broken by the index's native return order,
/// never re-sorted here.
pub fn hits_from_bundle(bundle: QueryBundle) -> Vec<Hit> {
    let QueryBundle { ids, documents, provenances, distances } = bundle;
    ids.into_iter()
        .zip(documents)
        .zip(provenances)
        .zip(distances)
        .map(|(((id, text), provenance), distance)| Hit {
            id,
            relevance: 1.0 - distance,
            text,
            provenance,
        })
        .collect()
}
