use serde::Serialize;

use crate::ContentType;

/// Result of content-type detection: the winning category, a confidence in
/// `[0, 1]`, and the raw feature counts the decision was based on.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    pub content_type: ContentType,
    pub confidence: f64,
    pub features: ContentFeatures,
}

/// Per-document feature breakdown computed by the classifier.
///
/// Character counts are over the whole document; the percentage fields are
/// each count divided by the total character count (0 when the document is
/// empty). `log_patterns` and `doc_patterns` are signature hit counts, not
/// character totals.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentFeatures {
    /// Full document length when the whole document parses as JSON, else 0.
    pub json_chars: usize,
    /// ISO timestamps, bracketed levels, and bare level words.
    pub log_patterns: usize,
    /// Markdown headings, fences, list items, and link syntax.
    pub doc_patterns: usize,
    /// Characters on lines judged structural (code-like).
    pub code_chars: usize,
    /// Characters on the remaining lines.
    pub prose_chars: usize,
    pub json_percent: f64,
    pub code_percent: f64,
    pub prose_percent: f64,
}
