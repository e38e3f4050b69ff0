/// Implementation of `tokpress sentry`.
///
/// The budget gate for surrounding tooling: estimates the input and
/// exits 3 when the estimate exceeds `--max-tokens`, printing suggested
/// next steps as JSON on stderr:
///
/// ```text
/// {"estimatedTokens":1234,"maxTokens":800,
///  "suggestedActions":["diff-only","strip-fillers","summarize"]}
/// ```
///
/// Within budget, a one-line confirmation goes to stdout and the exit
/// code is 0. The input is never modified.
use anyhow::Result;
use serde::Serialize;
use tokpress_estimate::{Model, token_count};

use crate::{SentryArgs, read_input};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SentryAdvice {
    estimated_tokens: u32,
    max_tokens: u32,
    suggested_actions: [&'static str; 3],
}

pub fn run(args: &SentryArgs) -> Result<i32> {
    let input = read_input(args.file.as_deref())?;
    let estimated = token_count(&input, Model::parse(&args.model));

    if estimated > args.max_tokens {
        let advice = SentryAdvice {
            estimated_tokens: estimated,
            max_tokens: args.max_tokens,
            suggested_actions: ["diff-only", "strip-fillers", "summarize"],
        };
        eprintln!("{}", serde_json::to_string(&advice)?);
        return Ok(3);
    }

    println!("ok: {estimated} tokens within budget of {}", args.max_tokens);
    Ok(0)
}
