//! Content-type detection.
//!
//! Feature extraction is one pass over the document; the decision table
//! is then evaluated strictly in order:
//!
//! ```text
//! ┌───┬────────────────────────────────────┬───────────────┬─────────────────────────┐
//! │ # │ Condition                          │ Type          │ Confidence              │
//! ├───┼────────────────────────────────────┼───────────────┼─────────────────────────┤
//! │ 1 │ jsonPercent > 0.8                  │ json          │ 0.9                     │
//! │ 2 │ logPatterns > 5                    │ log           │ min(0.9, 0.5 + hits/20) │
//! │ 3 │ codePercent > 0.6                  │ code          │ min(0.9, 0.5 + pct)     │
//! │ 4 │ docPatterns > 3 ∧ prosePercent>0.7 │ documentation │ 0.8                     │
//! │ 5 │ prosePercent > 0.7                 │ prose         │ min(0.9, prosePercent)  │
//! │ 6 │ otherwise                          │ mixed         │ 0.5                     │
//! └───┴────────────────────────────────────┴───────────────┴─────────────────────────┘
//! ```

use std::sync::LazyLock;

use regex::Regex;
use tokpress_types::{Classification, ContentFeatures, ContentType};

static ISO_TIMESTAMP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{4}-\d{2}-\d{2}[T ]\d{2}:\d{2}:\d{2}").expect("static pattern"));

static BRACKET_LEVEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(?:ERROR|WARN|INFO|DEBUG|TRACE)\]").expect("static pattern"));

/// Bare level words are matched uppercase only; lowercase "info" in prose
/// is not a log signature.
static BARE_LEVEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:ERROR|WARN|INFO|DEBUG|TRACE)\b").expect("static pattern"));

static LIST_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*[-*+] ").expect("static pattern"));

static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[^\]]*\]\([^)]+\)").expect("static pattern"));

/// Characters that make a line read as code rather than prose.
const STRUCTURAL: &[char] = &['{', '}', '(', ')', ';', '=', '<', '>', '[', ']'];

/// Classifies a document.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn detect_content_type(text: &str) -> Classification {
    let mut features = ContentFeatures::default();

    let trimmed = text.trim();
    if !trimmed.is_empty() && serde_json::from_str::<serde_json::Value>(trimmed).is_ok() {
        features.json_chars = text.len();
    }

    features.log_patterns = ISO_TIMESTAMP.find_iter(text).count()
        + BRACKET_LEVEL.find_iter(text).count()
        + BARE_LEVEL.find_iter(text).count();

    let mut in_fence = false;
    for line in text.lines() {
        let stripped = line.trim_start();
        if stripped.starts_with("```") {
            // The fence delimiter counts as one doc signature per block.
            if !in_fence {
                features.doc_patterns += 1;
            }
            in_fence = !in_fence;
            features.code_chars += line.len();
            continue;
        }
        if in_fence {
            features.code_chars += line.len();
            continue;
        }
        if stripped.starts_with('#') && stripped.chars().take_while(|c| *c == '#').count() <= 6 {
            let after_hashes = stripped.trim_start_matches('#');
            if after_hashes.starts_with(' ') {
                features.doc_patterns += 1;
            }
        }
        if line.trim().is_empty() {
            continue;
        }
        let punctuation = line.chars().filter(|c| STRUCTURAL.contains(c)).count();
        let words = line.split_whitespace().count();
        if punctuation as f64 > 0.3 * words as f64 {
            features.code_chars += line.len();
        } else {
            features.prose_chars += line.len();
        }
    }
    features.doc_patterns += LIST_ITEM.find_iter(text).count() + LINK.find_iter(text).count();

    if !text.is_empty() {
        features.json_percent = features.json_chars as f64 / text.len() as f64;
    }
    // Code/prose shares are over classified characters only, so blank
    // lines and separators do not dilute the ratios.
    let classified = features.code_chars + features.prose_chars;
    if classified > 0 {
        features.code_percent = features.code_chars as f64 / classified as f64;
        features.prose_percent = features.prose_chars as f64 / classified as f64;
    }

    let (content_type, confidence) = decide(&features);
    tracing::debug!(%content_type, confidence, "classified");
    Classification {
        content_type,
        confidence,
        features,
    }
}

#[allow(clippy::cast_precision_loss)]
fn decide(features: &ContentFeatures) -> (ContentType, f64) {
    if features.json_percent > 0.8 {
        return (ContentType::Json, 0.9);
    }
    if features.log_patterns > 5 {
        let confidence = (0.5 + features.log_patterns as f64 / 20.0).min(0.9);
        return (ContentType::Log, confidence);
    }
    if features.code_percent > 0.6 {
        return (ContentType::Code, (0.5 + features.code_percent).min(0.9));
    }
    if features.doc_patterns > 3 && features.prose_percent > 0.7 {
        return (ContentType::Documentation, 0.8);
    }
    if features.prose_percent > 0.7 {
        return (ContentType::Prose, features.prose_percent.min(0.9));
    }
    (ContentType::Mixed, 0.5)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_document() {
        let c = detect_content_type("{\"key\":\"value\"}");
        assert_eq!(c.content_type, ContentType::Json);
        assert!(c.confidence >= 0.8);
        assert_eq!(c.features.json_chars, 15);
    }

    #[test]
    fn log_stream() {
        let text = "\
2024-01-31T10:00:00 [INFO] started
2024-01-31T10:00:01 [WARN] slow response
2024-01-31T10:00:02 [ERROR] timeout
2024-01-31T10:00:03 [INFO] retry
";
        let c = detect_content_type(text);
        assert_eq!(c.content_type, ContentType::Log);
        assert!(c.features.log_patterns > 5);
        assert!(c.confidence > 0.5 && c.confidence <= 0.9);
    }

    #[test]
    fn rust_source() {
        let text = "\
fn main() {
    let total = compute(1, 2);
    println!(\"{}\", total);
}
";
        let c = detect_content_type(text);
        assert_eq!(c.content_type, ContentType::Code);
        assert!(c.features.code_percent > 0.6);
    }

    #[test]
    fn markdown_documentation() {
        let text = "\
# Guide

Some prose introduces the tool and then keeps going for a while longer.

## Usage

- [link one](https://example.com) explains the basic workflow here
- another list item with a longer plain sentence inside it as well

More explanatory prose sits here so prose characters dominate the page.
";
        let c = detect_content_type(text);
        assert_eq!(c.content_type, ContentType::Documentation);
        assert!(c.features.doc_patterns > 3);
    }

    #[test]
    fn plain_prose() {
        let c = detect_content_type(
            "The quick brown fox jumps over the lazy dog and keeps running through the field.",
        );
        assert_eq!(c.content_type, ContentType::Prose);
        assert!(c.confidence > 0.7);
    }

    #[test]
    fn half_and_half_is_mixed() {
        let text = "\
Prose line explaining the function below in a full sentence here today.
Another prose line that keeps the words flowing with no punctuation mark.
fn alpha() { return (1 + 2) * 3; }
fn beta() { let x = vec![1, 2]; x.len(); }
fn gamma() { let y = (4, 5); y.0; }
";
        let c = detect_content_type(text);
        assert_eq!(c.content_type, ContentType::Mixed);
        assert!((c.confidence - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_input_is_mixed() {
        let c = detect_content_type("");
        assert_eq!(c.content_type, ContentType::Mixed);
    }
}
