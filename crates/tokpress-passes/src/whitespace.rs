//! Whitespace compression outside protected regions.
//!
//! Two rewrites: runs of two or more spaces/tabs collapse to one space,
//! and runs of three or more blank lines collapse to two. Indentation is
//! untouched only where it lives inside a protected region; prose
//! indentation is fair game, matching the token-reduction goal.

use std::sync::LazyLock;

use regex::Regex;
use tokpress_scan::Protected;
use tokpress_types::{PassMeta, PassOutput};

static SPACE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]{2,}").expect("static pattern"));

/// Three blank lines are four consecutive newlines; the replacement keeps
/// exactly two blank lines.
static BLANK_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{4,}").expect("static pattern"));

/// Collapses whitespace over already-normalized text. Total.
#[must_use]
pub fn compress_whitespace(normalized: &str) -> PassOutput {
    let protected = Protected::mask(normalized);
    let masked = protected.masked();

    let replacements =
        SPACE_RUNS.find_iter(masked).count() + BLANK_RUNS.find_iter(masked).count();
    let collapsed = SPACE_RUNS.replace_all(masked, " ");
    let collapsed = BLANK_RUNS.replace_all(&collapsed, "\n\n\n");

    let text = protected.restore(&collapsed);
    let changed = text != normalized;
    PassOutput {
        meta: PassMeta {
            changed,
            preserved: protected.preserved(),
            replacements,
            ..PassMeta::default()
        },
        text,
    }
}
