//! Duplicate removal: sentence-level then paragraph-level.
//!
//! Both levels dedup under a normalization key (lower-cased, whitespace
//! collapsed, trailing punctuation stripped) and keep the first
//! occurrence with its original casing and punctuation. A sentence or
//! paragraph containing a protection placeholder is never dropped — the
//! preservation contract outranks deduplication.

use std::collections::HashSet;

use tokpress_scan::{Protected, has_placeholder};
use tokpress_types::{PassMeta, PassOutput};

/// Removes repeated sentences and paragraphs over already-normalized
/// text. Total.
#[must_use]
pub fn remove_duplicates(normalized: &str) -> PassOutput {
    let protected = Protected::mask(normalized);

    let (by_sentence, sentence_hits) = dedup_sentences(protected.masked());
    let (by_paragraph, paragraph_hits) = dedup_paragraphs(&by_sentence);

    let text = protected.restore(&by_paragraph);
    let changed = text != normalized;
    let removed = sentence_hits + paragraph_hits;
    tracing::debug!(removed, changed, "duplicate pass");
    PassOutput {
        meta: PassMeta {
            changed,
            preserved: protected.preserved(),
            duplicates_removed: removed,
            ..PassMeta::default()
        },
        text,
    }
}

/// Splits masked text into sentence segments.
///
/// A segment runs up to and including a terminator run (`.` `!` `?`);
/// inter-sentence whitespace is carried as the *leading* part of the next
/// segment, so dropping a duplicate drops its separator with it.
/// Concatenating the segments reproduces the input exactly.
pub(crate) fn split_sentences(text: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start = 0;
    let mut in_terminator = false;

    for (idx, ch) in text.char_indices() {
        let terminator = matches!(ch, '.' | '!' | '?');
        if in_terminator && !terminator {
            segments.push(&text[start..idx]);
            start = idx;
        }
        in_terminator = terminator;
    }
    if start < text.len() {
        segments.push(&text[start..]);
    }
    segments
}

/// The dedup key: lower-cased, whitespace collapsed to single spaces,
/// trailing punctuation stripped.
pub(crate) fn normalization_key(segment: &str) -> String {
    let lowered = segment.to_lowercase();
    let collapsed: Vec<&str> = lowered.split_whitespace().collect();
    collapsed
        .join(" ")
        .trim_end_matches(['.', '!', '?', ',', ';', ':'])
        .to_string()
}

fn dedup_sentences(masked: &str) -> (String, usize) {
    let mut seen = HashSet::new();
    let mut out = String::with_capacity(masked.len());
    let mut removed = 0;

    for segment in split_sentences(masked) {
        let key = normalization_key(segment);
        if key.is_empty() || has_placeholder(segment) {
            out.push_str(segment);
            continue;
        }
        if seen.insert(key) {
            out.push_str(segment);
        } else {
            removed += 1;
        }
    }
    (out, removed)
}

fn dedup_paragraphs(masked: &str) -> (String, usize) {
    // Paragraphs are runs of non-blank lines; each carries the blank-line
    // separator that follows it so structure survives removal.
    let mut paragraphs: Vec<(String, String)> = Vec::new();
    let mut body = String::new();
    let mut separator = String::new();

    for line in masked.split_inclusive('\n') {
        if line.trim().is_empty() {
            separator.push_str(line);
        } else {
            if !separator.is_empty() {
                paragraphs.push((std::mem::take(&mut body), std::mem::take(&mut separator)));
            }
            body.push_str(line);
        }
    }
    paragraphs.push((body, separator));

    let mut seen = HashSet::new();
    let mut out = String::with_capacity(masked.len());
    let mut removed = 0;

    for (body, separator) in paragraphs {
        let key = normalization_key(&body);
        if !key.is_empty() && !has_placeholder(&body) && !seen.insert(key) {
            removed += 1;
            continue;
        }
        out.push_str(&body);
        out.push_str(&separator);
    }
    (out, removed)
}
