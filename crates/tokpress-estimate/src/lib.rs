#![warn(clippy::pedantic)]

//! Heuristic token estimation.
//!
//! No model tokenizer is consulted — the estimate divides the character
//! count by a fixed per-model ratio and rounds up. The ratios are part of
//! the crate's external contract and must not drift:
//!
//! ```text
//! ┌─────────────┬───────┐
//! │ Model       │ Ratio │
//! ├─────────────┼───────┤
//! │ gpt-4o-mini │  4.0  │
//! │ gpt-4.1     │  3.7  │
//! │ claude-3.5  │  3.8  │
//! │ gemini-1.5  │  3.9  │
//! │ generic     │  4.0  │
//! └─────────────┴───────┘
//! ```
//!
//! Symbol-dense inputs (diffs, patches) under-estimate badly at these
//! ratios, so callers can request a ×1.15 bump which also tags the
//! estimate with an explanatory note.

use serde::Serialize;

/// Note attached to an estimate produced with the symbol-density bump.
pub const DIFF_NOTE: &str = "Heuristic – Code Context";

/// Model whose character-per-token ratio is applied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Model {
    #[serde(rename = "gpt-4o-mini")]
    Gpt4oMini,
    #[serde(rename = "gpt-4.1")]
    Gpt41,
    #[serde(rename = "claude-3.5")]
    Claude35,
    #[serde(rename = "gemini-1.5")]
    Gemini15,
    #[default]
    #[serde(rename = "generic")]
    Generic,
}

impl Model {
    /// Parses a model name. Unknown names degrade silently to
    /// [`Model::Generic`]; estimation never fails.
    #[must_use]
    pub fn parse(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "gpt-4o-mini" => Model::Gpt4oMini,
            "gpt-4.1" => Model::Gpt41,
            "claude-3.5" => Model::Claude35,
            "gemini-1.5" => Model::Gemini15,
            _ => Model::Generic,
        }
    }

    /// Characters per token for this model.
    #[must_use]
    pub fn ratio(self) -> f64 {
        match self {
            Model::Gpt4oMini | Model::Generic => 4.0,
            Model::Gpt41 => 3.7,
            Model::Claude35 => 3.8,
            Model::Gemini15 => 3.9,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Model::Gpt4oMini => "gpt-4o-mini",
            Model::Gpt41 => "gpt-4.1",
            Model::Claude35 => "claude-3.5",
            Model::Gemini15 => "gemini-1.5",
            Model::Generic => "generic",
        }
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A heuristic token estimate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Estimate {
    /// Unicode scalar values in the input (not bytes).
    pub chars: usize,
    pub tokens: u32,
    pub model: Model,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<&'static str>,
}

/// Estimates the token count of `text` for `model`.
///
/// `tokens = ⌈chars / ratio⌉`; when `diff_heuristic_bump` is set the
/// ceiled base is multiplied by 1.15 and ceiled again, and
/// [`DIFF_NOTE`] is attached. Total for every input.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn estimate_tokens(text: &str, model: Model, diff_heuristic_bump: bool) -> Estimate {
    let chars = text.chars().count();
    let base = (chars as f64 / model.ratio()).ceil() as u32;
    let (tokens, note) = if diff_heuristic_bump {
        ((f64::from(base) * 1.15).ceil() as u32, Some(DIFF_NOTE))
    } else {
        (base, None)
    };
    Estimate {
        chars,
        tokens,
        model,
        note,
    }
}

/// Token count only, for callers that do not need the full record.
#[must_use]
pub fn token_count(text: &str, model: Model) -> u32 {
    estimate_tokens(text, model, false).tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_table_is_exact() {
        assert!((Model::Gpt4oMini.ratio() - 4.0).abs() < f64::EPSILON);
        assert!((Model::Gpt41.ratio() - 3.7).abs() < f64::EPSILON);
        assert!((Model::Claude35.ratio() - 3.8).abs() < f64::EPSILON);
        assert!((Model::Gemini15.ratio() - 3.9).abs() < f64::EPSILON);
        assert!((Model::Generic.ratio() - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn unknown_model_degrades_to_generic() {
        assert_eq!(Model::parse("gpt-7"), Model::Generic);
        assert_eq!(Model::parse(""), Model::Generic);
    }

    #[test]
    fn tokens_are_ceiled_char_ratio() {
        // 10 chars at ratio 4.0 → ceil(2.5) = 3
        let est = estimate_tokens("abcdefghij", Model::Generic, false);
        assert_eq!(est.chars, 10);
        assert_eq!(est.tokens, 3);
        assert_eq!(est.note, None);

        // 10 chars at ratio 3.7 → ceil(2.70…) = 3
        assert_eq!(estimate_tokens("abcdefghij", Model::Gpt41, false).tokens, 3);
    }

    #[test]
    fn empty_input_is_zero_tokens() {
        let est = estimate_tokens("", Model::Generic, false);
        assert_eq!(est.chars, 0);
        assert_eq!(est.tokens, 0);
    }

    #[test]
    fn chars_count_scalars_not_bytes() {
        // "héllo" is 6 bytes but 5 chars.
        let est = estimate_tokens("héllo", Model::Generic, false);
        assert_eq!(est.chars, 5);
        assert_eq!(est.tokens, 2);
    }

    #[test]
    fn diff_bump_multiplies_and_notes() {
        // 400 chars → 100 tokens base → ceil(115.0) = 115 bumped.
        let text = "a".repeat(400);
        let est = estimate_tokens(&text, Model::Generic, true);
        assert_eq!(est.tokens, 115);
        assert_eq!(est.note, Some(DIFF_NOTE));
    }

    #[test]
    fn bump_ceils_fractional_products() {
        // 8 chars → 2 tokens base → ceil(2.3) = 3 bumped.
        let est = estimate_tokens("abcdefgh", Model::Generic, true);
        assert_eq!(est.tokens, 3);
    }
}
