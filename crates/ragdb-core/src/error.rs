use thiserror::Error;

/// Failure taxonomy for the retrieval pipeline.
///
/// `InvalidConfig` is raised before any external capability is touched.
/// The remaining variants carry the capability's own error verbatim; the
/// pipeline never retries and never downgrades a failure to a fallback.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Extraction failed: {0}")]
    Extraction(anyhow::Error),

    #[error("Embedding failed: {0}")]
    Embedding(anyhow::Error),

    #[error("Vector index operation failed: {0}")]
    Index(anyhow::Error),

    #[error("Generation failed: {0}")]
    Generation(anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
