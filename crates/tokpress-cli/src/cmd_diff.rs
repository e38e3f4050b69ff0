/// Implementation of `tokpress diff`.
///
/// Renders a unified diff of the two files with headers normalized to
/// `--- before` / `+++ after`. With `--report`, the savings compare the
/// diff against sending the whole "after" text, which is the decision
/// the caller is usually weighing.
use anyhow::{Context, Result};
use std::fs;
use tokpress_estimate::{Model, estimate_tokens};
use tokpress_passes::{DiffOptions, unified_diff};

use crate::report::{Measurement, Report, measure};
use crate::{DiffArgs, write_output};

pub fn run(args: &DiffArgs) -> Result<i32> {
    let before_text = fs::read_to_string(&args.before)
        .with_context(|| format!("cannot read {}", args.before.display()))?;
    let after_text = fs::read_to_string(&args.after)
        .with_context(|| format!("cannot read {}", args.after.display()))?;

    let diff = unified_diff(
        &args.before.display().to_string(),
        &before_text,
        &args.after.display().to_string(),
        &after_text,
        &DiffOptions {
            keep_eol: args.keep_eol,
        },
    );

    if args.report {
        // Diff text is symbol-dense; the bumped estimate is honest here.
        let bumped = estimate_tokens(&diff, Model::Generic, true);
        let full = measure(&after_text, Model::Generic);
        let saved_percent = if full.tokens == 0 {
            0.0
        } else {
            f64::from(full.tokens.saturating_sub(bumped.tokens)) / f64::from(full.tokens) * 100.0
        };
        Report {
            before: full,
            after: Measurement {
                chars: bumped.chars,
                tokens: bumped.tokens,
            },
            saved_percent,
            strategies: vec!["diff-only".to_owned()],
            preset: None,
            rules: Vec::new(),
        }
        .emit()?;
    }
    write_output(args.out.as_deref(), &diff)?;
    Ok(0)
}
