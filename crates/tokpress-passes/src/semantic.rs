//! Semantic compression: a fixed verbose → concise phrase mapping.
//!
//! Unlike the filler stripper this pass has no levels; the whole mapping
//! always applies. Protection rules are identical (masked regions are
//! opaque, the adverb guard holds).

use tokpress_scan::Protected;
use tokpress_types::{PassMeta, PassOutput};

use crate::rules::{apply_rules, semantic_rules};

/// Applies the phrase mapping over already-normalized text. Total.
#[must_use]
pub fn compress_semantic(normalized: &str) -> PassOutput {
    let protected = Protected::mask(normalized);
    let (compressed, fired, count) =
        apply_rules(&protected, protected.masked(), semantic_rules());
    let text = protected.restore(&compressed);
    let changed = text != normalized;
    tracing::debug!(replacements = count, changed, "semantic pass");
    PassOutput {
        meta: PassMeta {
            changed,
            preserved: protected.preserved(),
            replacements: count,
            rules: fired,
            ..PassMeta::default()
        },
        text,
    }
}
