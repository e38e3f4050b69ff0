/// Implementation of `tokpress optimize`.
///
/// Runs the full pipeline through the process-wide default engine, so
/// repeated invocations inside one process (tests, library embedders)
/// share its cache. Budget flags map straight onto the engine options.
use anyhow::Result;
use tokpress_engine::{EngineOptions, optimize_advanced};
use tokpress_types::Preset;

use crate::report::{Measurement, Report};
use crate::{OptimizeArgs, read_input, write_output};

pub fn run(args: &OptimizeArgs) -> Result<i32> {
    let input = read_input(args.file.as_deref())?;

    let options = EngineOptions {
        preset: Preset::parse(&args.preset),
        target_savings_percent: args.target_savings,
        max_tokens: args.max_tokens,
        enable_semantic_compression: !args.no_semantic,
        enable_whitespace_compression: !args.no_whitespace,
        enable_duplicate_removal: !args.no_duplicates,
        enable_summarization: !args.no_summarization,
        enable_context_optimization: !args.no_context,
        ..EngineOptions::default()
    };

    let result = optimize_advanced(&input, &options)?;

    if args.report {
        Report {
            before: Measurement {
                chars: input.chars().count(),
                tokens: result.original_tokens,
            },
            after: Measurement {
                chars: result.output.chars().count(),
                tokens: result.optimized_tokens,
            },
            saved_percent: result.savings_percent,
            strategies: result.strategies.clone(),
            preset: Some(options.preset.to_string()),
            rules: Vec::new(),
        }
        .emit()?;
    }
    write_output(None, &result.output)?;
    Ok(0)
}
