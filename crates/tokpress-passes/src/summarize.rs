//! Extractive summarization for very long inputs.
//!
//! Sentences are scored by keyword frequency with a length penalty, a
//! position weight favouring the first and last paragraphs, and a bonus
//! for structural marker lines. The highest-scoring sentences are kept
//! until the token budget is met or the compression ratio is reached,
//! then re-emitted in their original order. Sentences holding a protected
//! region are always kept.

use std::collections::HashMap;

use tokpress_estimate::{Model, token_count};
use tokpress_scan::{Protected, has_placeholder};
use tokpress_types::{PassMeta, PassOutput};

use crate::dedup::split_sentences;

/// Options for [`summarize`].
#[derive(Clone, Copy, Debug)]
pub struct SummaryOptions {
    /// Stop selecting once the kept sentences reach this estimate.
    pub target_tokens: Option<u32>,
    /// Stop selecting once kept characters reach this share of the input.
    pub max_ratio: f64,
    pub model: Model,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            target_tokens: None,
            max_ratio: 0.3,
            model: Model::default(),
        }
    }
}

const STOPWORDS: &[&str] = &[
    "that", "this", "with", "from", "have", "will", "been", "were", "they", "their", "there",
    "which", "would", "about", "when", "what", "your", "into", "then", "than", "them", "some",
    "each", "other", "more", "very", "also",
];

/// Summarizes already-normalized text. Total: when nothing scores above
/// zero or the input has no sentence structure, the input comes back
/// unchanged.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn summarize(normalized: &str, options: &SummaryOptions) -> PassOutput {
    let protected = Protected::mask(normalized);
    let masked = protected.masked();

    let segments = split_sentences(masked);
    if segments.len() < 2 {
        return PassOutput {
            text: normalized.to_owned(),
            meta: PassMeta {
                preserved: protected.preserved(),
                ..PassMeta::default()
            },
        };
    }

    // Document-wide keyword frequencies.
    let mut frequency: HashMap<String, usize> = HashMap::new();
    for word in keywords(masked) {
        *frequency.entry(word).or_default() += 1;
    }

    // Byte ranges of the first and last paragraphs for position weighting.
    let first_paragraph_end = masked.find("\n\n").unwrap_or(masked.len());
    let last_paragraph_start = masked.rfind("\n\n").map_or(0, |i| i + 2);

    let mut offset = 0usize;
    let mut scored: Vec<(usize, f64, bool)> = Vec::new();
    for (index, segment) in segments.iter().enumerate() {
        let start = offset;
        offset += segment.len();
        let forced = has_placeholder(segment);

        let words: Vec<String> = keywords(segment).collect();
        let keyword_sum: usize = words.iter().filter_map(|w| frequency.get(w)).sum();
        let mut score = keyword_sum as f64 / (words.len().max(1) as f64).sqrt();
        // Position of the sentence body, not of its leading separator.
        let body_start = start + (segment.len() - segment.trim_start().len());
        if body_start < first_paragraph_end || body_start >= last_paragraph_start {
            score *= 1.5;
        }
        if matches!(
            segment.trim_start().chars().next(),
            Some('#' | '-' | '*' | '>')
        ) {
            score *= 1.25;
        }
        scored.push((index, score, forced));
    }

    // Highest score first; original order breaks ties so selection is
    // deterministic.
    let mut ranked: Vec<usize> = (0..segments.len()).collect();
    ranked.sort_by(|&a, &b| {
        scored[b].1
            .partial_cmp(&scored[a].1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.cmp(&b))
    });

    let total_chars = masked.chars().count();
    let char_ceiling = (total_chars as f64 * options.max_ratio) as usize;
    let token_ceiling = options.target_tokens.unwrap_or(u32::MAX);

    let mut keep = vec![false; segments.len()];
    let mut kept_tokens = 0u32;
    let mut kept_chars = 0usize;
    for &(index, _, forced) in &scored {
        if forced {
            keep[index] = true;
            kept_tokens += token_count(segments[index], options.model);
            kept_chars += segments[index].chars().count();
        }
    }
    for &index in &ranked {
        if keep[index] {
            continue;
        }
        if kept_tokens >= token_ceiling || kept_chars >= char_ceiling {
            break;
        }
        keep[index] = true;
        kept_tokens += token_count(segments[index], options.model);
        kept_chars += segments[index].chars().count();
    }

    let summary: String = segments
        .iter()
        .enumerate()
        .filter(|(i, _)| keep[*i])
        .map(|(_, s)| *s)
        .collect();

    if summary.trim().is_empty() {
        return PassOutput {
            text: normalized.to_owned(),
            meta: PassMeta {
                preserved: protected.preserved(),
                ..PassMeta::default()
            },
        };
    }

    let text = protected.restore(&summary);
    let changed = text != normalized;
    tracing::debug!(
        kept = keep.iter().filter(|k| **k).count(),
        total = segments.len(),
        changed,
        "summary pass"
    );
    PassOutput {
        meta: PassMeta {
            changed,
            preserved: protected.preserved(),
            ..PassMeta::default()
        },
        text,
    }
}

/// Lower-cased words of length ≥ 4, stopwords removed.
fn keywords(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.len() >= 4)
        .map(str::to_lowercase)
        .filter(|w| !STOPWORDS.contains(&w.as_str()))
}
