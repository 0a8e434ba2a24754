//! Configuration loader and path helpers.
//!
//! Uses Figment to merge built-in defaults + `ragdb.toml` +
//! `ragdb.<env>.toml` (selected by `RUST_ENV`) + `RAGDB_*` env vars into a
//! typed [`RagConfig`]. Provides helpers to expand `~` and `${VAR}` and to
//! resolve relative paths against a known base directory.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::chunker::{DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE};
use crate::error::{Error, Result};

/// Tunables for the retrieval pipeline. Sizes and the context budget are
/// in characters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RagConfig {
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub top_k: usize,
    pub max_context_chars: usize,
    pub openai_api_key: Option<String>,
    pub openai_model: String,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
            top_k: 5,
            max_context_chars: 8000,
            openai_api_key: None,
            openai_model: "gpt-4o-mini".to_string(),
        }
    }
}

impl RagConfig {
    pub fn load() -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment =
            Figment::from(Serialized::defaults(RagConfig::default())).merge(Toml::file("ragdb.toml"));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file("ragdb.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("ragdb.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("ragdb.test.toml")),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("RAGDB_"));

        let config: RagConfig = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject unusable parameter combinations before any capability call.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(Error::InvalidConfig("chunk_size must be positive".to_string()));
        }
        if self.chunk_overlap >= self.chunk_size {
            return Err(Error::InvalidConfig(format!(
                "chunk_overlap ({}) must be smaller than chunk_size ({})",
                self.chunk_overlap, self.chunk_size
            )));
        }
        if self.top_k == 0 {
            return Err(Error::InvalidConfig("top_k must be positive".to_string()));
        }
        if self.max_context_chars == 0 {
            return Err(Error::InvalidConfig("max_context_chars must be positive".to_string()));
        }
        Ok(())
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    // Expand env vars first
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    // Expand ~ at start
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
/// If `p` is absolute, it's returned as-is; otherwise `base.join(p)` is returned.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}
