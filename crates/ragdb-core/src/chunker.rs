//! Sliding-window text segmentation.
//!
//! Raw block text is normalized first: split on blank-line paragraph
//! boundaries, each paragraph trimmed, empty paragraphs dropped, and the
//! rest rejoined with `"\n\n"`. Chunk offsets are character offsets into
//! that normalized text, not into the raw input.

use crate::error::{Error, Result};
use crate::types::Chunk;

pub const DEFAULT_CHUNK_SIZE: usize = 800; // characters
pub const DEFAULT_CHUNK_OVERLAP: usize = 120; // characters

const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Trim paragraphs, drop empty ones, rejoin with the fixed separator.
pub fn normalize(text: &str) -> String {
    text.split(PARAGRAPH_SEPARATOR)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(PARAGRAPH_SEPARATOR)
}

/// Cut one block of text into overlapping chunks.
///
/// The window advances by `chunk_size - overlap` characters each step and
/// the final chunk may be shorter than `chunk_size`. Empty input yields no
/// chunks; input shorter than the window yields exactly one chunk spanning
/// the whole normalized text. Parameters are checked before any work:
/// `overlap >= chunk_size` would never advance the window.
pub fn chunk(text: &str, chunk_size: usize, overlap: usize) -> Result<Vec<Chunk>> {
    validate(chunk_size, overlap)?;

    let chars: Vec<char> = normalize(text).chars().collect();
    let n = chars.len();
    let mut chunks = Vec::new();
    let mut start = 0usize;
    while start < n {
        let end = (start + chunk_size).min(n);
        chunks.push(Chunk { text: chars[start..end].iter().collect(), start, end });
        if end == n {
            break;
        }
        start = end.saturating_sub(overlap);
    }
    Ok(chunks)
}

/// Chunk each block independently and concatenate in block order.
///
/// Offsets restart at 0 for every block; block boundaries are deliberately
/// not recorded here because provenance is attached per document by the
/// caller at upsert time.
pub fn chunk_many(blocks: &[String], chunk_size: usize, overlap: usize) -> Result<Vec<Chunk>> {
    validate(chunk_size, overlap)?;

    let mut all_chunks = Vec::new();
    for block in blocks {
        all_chunks.extend(chunk(block, chunk_size, overlap)?);
    }
    Ok(all_chunks)
}

fn validate(chunk_size: usize, overlap: usize) -> Result<()> {
    if chunk_size == 0 {
        return Err(Error::InvalidConfig("chunk_size must be positive".to_string()));
    }
    if overlap >= chunk_size {
        return Err(Error::InvalidConfig(format!(
            "overlap ({overlap}) must be smaller than chunk_size ({chunk_size})"
        )));
    }
    Ok(())
}
