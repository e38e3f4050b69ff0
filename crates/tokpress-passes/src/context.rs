//! Context-specific optimizers for logs, documentation, and code.
//!
//! Each optimizer is a total pass tuned to one detected content type and
//! reports its own before/after token estimates so the orchestrator can
//! attribute savings.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tokpress_estimate::{Model, token_count};
use tokpress_scan::{Protected, Region, RegionKind};

/// Outcome of a context optimizer run.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextResult {
    pub output: String,
    pub original_tokens: u32,
    pub optimized_tokens: u32,
    pub savings_percent: f64,
}

impl ContextResult {
    fn measure(original: &str, output: String, model: Model) -> Self {
        let original_tokens = token_count(original, model);
        let optimized_tokens = token_count(&output, model);
        let savings_percent = if original_tokens == 0 {
            0.0
        } else {
            f64::from(original_tokens.saturating_sub(optimized_tokens))
                / f64::from(original_tokens)
                * 100.0
        };
        Self {
            output,
            original_tokens,
            optimized_tokens,
            savings_percent,
        }
    }
}

// ── Logs ──────────────────────────────────────────────────────────────────────

/// Leading timestamp formats stripped from log lines. The recognized list:
///
/// ```text
/// 2024-01-31T12:34:56.789Z      ISO 8601, optional fraction and zone
/// 2024-01-31 12:34:56           date-time with a space
/// [2024-01-31 12:34:56]         either of the above, bracketed
/// Jan 31 12:34:56               syslog
/// 12:34:56.123                  bare time, optional fraction
/// ```
static LOG_TIMESTAMP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\[?(?:\d{4}-\d{2}-\d{2}[T ]\d{2}:\d{2}:\d{2}(?:[.,]\d{1,9})?(?:Z|[+-]\d{2}:?\d{2})?|[A-Z][a-z]{2} [ 0-9]\d \d{2}:\d{2}:\d{2}|\d{2}:\d{2}:\d{2}(?:[.,]\d{1,9})?)\]?[ \t]*",
    )
    .expect("static pattern")
});

/// Log optimizer: strips leading timestamps and collapses consecutive
/// identical lines into `<line> (×N)`.
#[must_use]
pub fn optimize_logs(normalized: &str, model: Model) -> ContextResult {
    let protected = Protected::mask(normalized);
    let masked = protected.masked();

    let trailing_newline = masked.ends_with('\n');
    let mut collapsed: Vec<(String, usize)> = Vec::new();
    for line in masked.lines() {
        let stripped = LOG_TIMESTAMP.replace(line, "").into_owned();
        match collapsed.last_mut() {
            // Blank lines are structure, not repetition; never counted.
            Some((previous, count)) if *previous == stripped && !stripped.trim().is_empty() => {
                *count += 1;
            }
            _ => collapsed.push((stripped, 1)),
        }
    }

    let mut out = String::with_capacity(masked.len());
    for (index, (line, count)) in collapsed.iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        out.push_str(line);
        if *count > 1 {
            out.push_str(&format!(" (×{count})"));
        }
    }
    if trailing_newline && !out.is_empty() {
        out.push('\n');
    }

    ContextResult::measure(normalized, protected.restore(&out), model)
}

// ── Documentation ─────────────────────────────────────────────────────────────

static DOC_FRAMING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bas (?:mentioned|noted|described) (?:above|below|earlier|previously)\b[,:]? ?")
        .expect("static pattern")
});

static NOTE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?im)^note:[ \t]*").expect("static pattern"));

/// Documentation optimizer: removes self-referential framing and "Note:"
/// prefixes, and drops a fenced example block that repeats the previous
/// one byte-for-byte.
#[must_use]
pub fn optimize_documentation(normalized: &str, model: Model) -> ContextResult {
    let protected = Protected::mask(normalized);
    let masked = protected.masked();

    let unframed = DOC_FRAMING.replace_all(masked, "");
    let unframed = NOTE_PREFIX.replace_all(&unframed, "");

    // Consecutive identical example blocks: compare region contents of
    // fence placeholders separated only by blank lines.
    let trailing_newline = unframed.ends_with('\n');
    let mut out_lines: Vec<&str> = Vec::new();
    let mut previous_fence: Option<&Region> = None;
    let mut pending_blanks = 0usize;

    for line in unframed.lines() {
        if line.trim().is_empty() {
            pending_blanks += 1;
            continue;
        }
        let fence = protected
            .sole_placeholder(line)
            .filter(|region| region.kind == RegionKind::FencedCode);
        let duplicate = match (fence, previous_fence) {
            (Some(current), Some(last)) => current.text == last.text,
            _ => false,
        };
        if duplicate {
            pending_blanks = 0;
            continue;
        }
        for _ in 0..pending_blanks {
            out_lines.push("");
        }
        pending_blanks = 0;
        out_lines.push(line);
        previous_fence = fence;
    }
    for _ in 0..pending_blanks {
        out_lines.push("");
    }

    let mut out = out_lines.join("\n");
    if trailing_newline && !out.is_empty() {
        out.push('\n');
    }

    ContextResult::measure(normalized, protected.restore(&out), model)
}

// ── Code comments ─────────────────────────────────────────────────────────────

/// Code optimizer: drops a single-line comment that merely restates the
/// statement on the following line.
///
/// "Restates" means at least half of the comment's content words
/// (stopwords aside) already appear in the statement, with identifiers
/// split on case and underscore boundaries. `// increment retry count`
/// above `retry_count += 1;` is dropped; a comment whose vocabulary the
/// code does not carry is kept.
#[must_use]
pub fn optimize_code_comments(normalized: &str, model: Model) -> ContextResult {
    let protected = Protected::mask(normalized);
    let masked = protected.masked();

    let lines: Vec<&str> = masked.lines().collect();
    let trailing_newline = masked.ends_with('\n');
    let mut kept: Vec<&str> = Vec::new();

    for (index, line) in lines.iter().enumerate() {
        if let Some(comment) = comment_text(line)
            && let Some(statement) = next_statement(&lines, index + 1)
            && restates(comment, statement)
        {
            continue;
        }
        kept.push(line);
    }

    let mut out = kept.join("\n");
    if trailing_newline && !out.is_empty() {
        out.push('\n');
    }

    ContextResult::measure(normalized, protected.restore(&out), model)
}

/// Extracts the text of a comment-only line (`//` or `#` style).
fn comment_text(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    if let Some(rest) = trimmed.strip_prefix("//") {
        return Some(rest.trim_start_matches('/').trim());
    }
    if let Some(rest) = trimmed.strip_prefix('#') {
        // Shebangs and attribute-like lines are not comments to drop.
        if rest.starts_with('!') || rest.starts_with('[') {
            return None;
        }
        return Some(rest.trim());
    }
    None
}

fn next_statement<'a>(lines: &[&'a str], from: usize) -> Option<&'a str> {
    lines[from..]
        .iter()
        .map(|l| l.trim())
        .find(|l| !l.is_empty() && comment_text(l).is_none())
}

const COMMENT_STOPWORDS: &[&str] = &[
    "the", "a", "an", "to", "of", "is", "are", "this", "that", "it", "and", "for", "we", "then",
];

fn restates(comment: &str, statement: &str) -> bool {
    let comment_words: Vec<String> = identifier_words(comment)
        .into_iter()
        .filter(|w| !COMMENT_STOPWORDS.contains(&w.as_str()))
        .collect();
    if comment_words.is_empty() {
        return false;
    }
    let statement_words = identifier_words(statement);
    let matched = comment_words
        .iter()
        .filter(|w| statement_words.contains(w))
        .count();
    matched >= 1 && matched * 2 >= comment_words.len()
}

/// Lower-cased word list with identifiers split on `_` and case
/// boundaries, so `retryCount` and `retry_count` both yield
/// `[retry, count]`.
fn identifier_words(text: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    for ch in text.chars() {
        if ch.is_alphanumeric() {
            if ch.is_uppercase() && current.chars().last().is_some_and(char::is_lowercase) {
                words.push(std::mem::take(&mut current));
            }
            current.extend(ch.to_lowercase());
        } else if !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_timestamps_are_stripped() {
        let result = optimize_logs(
            "2024-01-31T12:34:56Z server started\n[2024-01-31 12:34:57] ready\n",
            Model::Generic,
        );
        assert_eq!(result.output, "server started\nready\n");
        assert!(result.savings_percent > 0.0);
    }

    #[test]
    fn repeated_log_lines_collapse_with_count() {
        let result = optimize_logs(
            "12:00:01 connection refused\n12:00:02 connection refused\n12:00:03 connection refused\nok\n",
            Model::Generic,
        );
        assert_eq!(result.output, "connection refused (×3)\nok\n");
    }

    #[test]
    fn syslog_format_recognized() {
        let result = optimize_logs("Jan  3 04:05:06 daemon up\n", Model::Generic);
        assert_eq!(result.output, "daemon up\n");
    }

    #[test]
    fn doc_framing_removed() {
        let result = optimize_documentation(
            "As mentioned above, the API is stable.\nNote: see the changelog.\n",
            Model::Generic,
        );
        assert_eq!(result.output, "the API is stable.\nsee the changelog.\n");
    }

    #[test]
    fn consecutive_identical_examples_deduped() {
        let input = "Usage:\n\n```\nrun --all\n```\n\n```\nrun --all\n```\n\ndone\n";
        let result = optimize_documentation(input, Model::Generic);
        assert_eq!(result.output, "Usage:\n\n```\nrun --all\n```\n\ndone\n");
    }

    #[test]
    fn differing_examples_survive() {
        let input = "```\na\n```\n\n```\nb\n```\n";
        let result = optimize_documentation(input, Model::Generic);
        assert_eq!(result.output, input);
    }

    #[test]
    fn restating_comment_dropped() {
        let result = optimize_code_comments(
            "// increment retry count\nretry_count += 1;\nlet x = 2; // untouched trailing\n",
            Model::Generic,
        );
        assert_eq!(
            result.output,
            "retry_count += 1;\nlet x = 2; // untouched trailing\n"
        );
    }

    #[test]
    fn informative_comment_kept() {
        let input = "// compensates for clock skew on ARM hosts\nretry_count += 1;\n";
        let result = optimize_code_comments(input, Model::Generic);
        assert_eq!(result.output, input);
    }

    #[test]
    fn hash_comments_handled_and_shebang_kept() {
        let input = "#!/bin/sh\n# remove tmp dir\nrm -r tmp_dir\n";
        let result = optimize_code_comments(input, Model::Generic);
        assert_eq!(result.output, "#!/bin/sh\nrm -r tmp_dir\n");
    }
}
