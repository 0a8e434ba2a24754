//! Answer generation over assembled context.
//!
//! Two modes, resolved fresh on every call from the injected generator so a
//! reconfigured capability takes effect on the next question: `LlmBacked`
//! when a generation capability is present, `Extractive` when none is
//! configured. Absence of configuration is the only trigger for the
//! extractive path; a failing generator is surfaced, never papered over.

use ragdb_core::error::{Error, Result};
use ragdb_core::traits::Generator;
use ragdb_core::types::Hit;

use crate::context::assemble;

pub const SYSTEM_PROMPT: &str = "You are a helpful assistant. Answer the user's question using ONLY the provided context. \
     If the answer cannot be found in the context, say you don't know and suggest where to look. \
     Always cite sources inline like (source: <filename>).";

pub const NO_CONTEXT_MESSAGE: &str = "No relevant context found. Please ingest documents first.";

pub const EXTRACTIVE_PREAMBLE: &str =
    "(No LLM configured) Here are the most relevant excerpts from your documents.";

/// How the answer will be produced for one call.
pub enum AnswerMode<'a> {
    LlmBacked(&'a dyn Generator),
    Extractive,
}

impl<'a> AnswerMode<'a> {
    pub fn resolve(generator: Option<&'a dyn Generator>) -> Self {
        match generator {
            Some(g) => AnswerMode::LlmBacked(g),
            None => AnswerMode::Extractive,
        }
    }
}

/// Produce an answer for `question` from relevance-ranked `hits`.
///
/// Context is assembled identically in both modes. The LLM-backed path
/// makes exactly one completion call and returns the trimmed response; the
/// extractive path returns the assembled context verbatim behind a fixed
/// preamble, or the fixed no-context message when nothing was retrieved.
pub fn generate(
    mode: &AnswerMode<'_>,
    question: &str,
    hits: &[Hit],
    max_context_chars: usize,
) -> Result<String> {
    let context = assemble(hits, max_context_chars);
    match mode {
        AnswerMode::LlmBacked(generator) => {
            let user = format!("Question: {question}\n\nContext:\n{context}");
            let response = generator.complete(SYSTEM_PROMPT, &user).map_err(Error::Generation)?;
            Ok(response.trim().to_string())
        }
        AnswerMode::Extractive => {
            if context.is_empty() {
                return Ok(NO_CONTEXT_MESSAGE.to_string());
            }
            Ok(format!("{EXTRACTIVE_PREAMBLE}\n\n{context}"))
        }
    }
}
