//! Optimization-potential precheck.
//!
//! A cheap scan that lets the engine skip inputs with nothing to gain.
//! Returns true when any of these fire:
//!
//! - a common filler token appears,
//! - average line length exceeds [`LONG_LINE_THRESHOLD`],
//! - two or more consecutive blank lines exist,
//! - a sentence repeats within the first [`SENTENCE_PROBE_LIMIT`]
//!   sentences.
//!
//! False positives cost one wasted pipeline run; false negatives leave
//! tokens on the table. The probe set errs toward firing.

use std::collections::HashSet;

/// Average line length beyond which text is assumed compressible.
pub const LONG_LINE_THRESHOLD: usize = 120;

/// How many leading sentences the repeat probe inspects.
pub const SENTENCE_PROBE_LIMIT: usize = 16;

const FILLER_PROBES: &[&str] = &[
    "basically",
    "actually",
    "really",
    "very",
    "just",
    "simply",
    "obviously",
    "in order to",
    "due to the fact",
    "in fact",
    "at this point in time",
    "it is important to note",
];

/// True when the input looks optimizable.
#[must_use]
pub fn has_optimization_potential(text: &str) -> bool {
    if text.contains("\n\n\n") {
        return true;
    }

    let lowered = text.to_lowercase();
    if FILLER_PROBES.iter().any(|probe| lowered.contains(probe)) {
        return true;
    }

    let mut lines = 0usize;
    let mut line_chars = 0usize;
    for line in text.lines() {
        lines += 1;
        line_chars += line.chars().count();
    }
    if lines > 0 && line_chars / lines > LONG_LINE_THRESHOLD {
        return true;
    }

    let mut seen = HashSet::new();
    for sentence in lowered
        .split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .take(SENTENCE_PROBE_LIMIT)
    {
        let key: String = sentence.split_whitespace().collect::<Vec<_>>().join(" ");
        if !seen.insert(key) {
            return true;
        }
    }

    false
}
