//! Deterministic packing of ranked hits into a bounded context string.

use ragdb_core::types::Hit;

/// Greedily pack hits, in the order given, into `budget` characters.
///
/// Each included fragment is prefixed with a provenance header naming the
/// source and the `[start-end)` character range; fragments are joined with
/// a blank line. Only fragment text counts against the budget. A hit whose
/// text truncates to nothing ends assembly without emitting its header.
/// Output is byte-identical for identical inputs.
pub fn assemble(hits: &[Hit], budget: usize) -> String {
    let mut fragments = Vec::new();
    let mut consumed = 0usize;
    for hit in hits {
        let remaining = budget.saturating_sub(consumed);
        let snippet: String = hit.text.chars().take(remaining).collect();
        if snippet.is_empty() {
            break;
        }
        consumed += snippet.chars().count();
        fragments.push(format!(
            "[SOURCE: {} @ {}-{}]\n{}",
            hit.provenance.source, hit.provenance.start, hit.provenance.end, snippet
        ));
    }
    fragments.join("\n\n")
}
