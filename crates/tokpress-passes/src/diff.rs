//! Unified diff rendering between two texts.
//!
//! Headers are normalized to exactly `--- before` and `+++ after` no
//! matter what names the caller passes — diffs feed token-budget tooling,
//! and embedding caller paths or timestamps would make byte-identical
//! inputs produce different outputs. Three lines of context.

use similar::TextDiff;
use tokpress_scan::{Eol, apply_eol};

/// Options for [`unified_diff`].
#[derive(Clone, Copy, Debug, Default)]
pub struct DiffOptions {
    /// Emit `\r\n` line endings when the `after` text is CRLF-dominant.
    pub keep_eol: bool,
}

/// Renders a unified diff of `before` → `after`.
///
/// The name arguments identify the inputs for the caller's own logging;
/// the emitted headers are always `--- before` / `+++ after`.
#[must_use]
pub fn unified_diff(
    before_name: &str,
    before: &str,
    after_name: &str,
    after: &str,
    options: &DiffOptions,
) -> String {
    tracing::debug!(before = before_name, after = after_name, "diffing");

    let before_unixed = before.replace("\r\n", "\n");
    let after_unixed = after.replace("\r\n", "\n");

    let diff = TextDiff::from_lines(before_unixed.as_str(), after_unixed.as_str());
    let rendered = diff
        .unified_diff()
        .context_radius(3)
        .header("before", "after")
        .to_string();

    if options.keep_eol && after.matches("\r\n").count() * 2 > after.matches('\n').count() {
        apply_eol(&rendered, Eol::CrLf)
    } else {
        rendered
    }
}
