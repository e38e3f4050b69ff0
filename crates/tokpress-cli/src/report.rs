//! The `--report` JSON object shared by the text-producing commands.

use serde::Serialize;
use tokpress_estimate::{Model, token_count};

/// Savings report emitted on stderr when `--report` is set.
///
/// Shape: `{before:{chars,tokens}, after:{chars,tokens}, savedPercent,
/// strategies[], preset, rules[]}`. Fields a command has nothing to say
/// about stay empty rather than disappearing, so consumers can parse one
/// shape for every command.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub before: Measurement,
    pub after: Measurement,
    pub saved_percent: f64,
    pub strategies: Vec<String>,
    pub preset: Option<String>,
    pub rules: Vec<String>,
}

#[derive(Serialize)]
pub struct Measurement {
    pub chars: usize,
    pub tokens: u32,
}

pub fn measure(text: &str, model: Model) -> Measurement {
    Measurement {
        chars: text.chars().count(),
        tokens: token_count(text, model),
    }
}

impl Report {
    pub fn from_texts(before: &str, after: &str, model: Model) -> Self {
        let before = measure(before, model);
        let after = measure(after, model);
        let saved_percent = if before.tokens == 0 {
            0.0
        } else {
            f64::from(before.tokens.saturating_sub(after.tokens)) / f64::from(before.tokens)
                * 100.0
        };
        Self {
            before,
            after,
            saved_percent,
            strategies: Vec::new(),
            preset: None,
            rules: Vec::new(),
        }
    }

    /// Prints the report as one JSON line on stderr.
    pub fn emit(&self) -> anyhow::Result<()> {
        eprintln!("{}", serde_json::to_string(self)?);
        Ok(())
    }
}
