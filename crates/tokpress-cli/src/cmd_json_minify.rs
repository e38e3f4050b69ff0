/// Implementation of `tokpress json-minify`.
///
/// Reads a JSON document or NDJSON stream, minifies it, and writes the
/// result to stdout or `--out`. Exit codes: 0 on success, 1 when the
/// input exceeds the size ceiling, 2 when the input is not valid
/// JSON/NDJSON (the error message cites the offending line for NDJSON).
use anyhow::Result;
use tokpress_estimate::Model;
use tokpress_passes::{MinifyOptions, json_minify};

use crate::report::Report;
use crate::{JsonMinifyArgs, read_input, write_output};

pub fn run(args: &JsonMinifyArgs) -> Result<i32> {
    let input = read_input(args.file.as_deref())?;

    let minified = json_minify(
        &input,
        &MinifyOptions {
            keep_eol: args.keep_eol,
            ..MinifyOptions::default()
        },
    )?;

    if args.report {
        Report::from_texts(&input, &minified.text, Model::Generic).emit()?;
    }
    write_output(args.out.as_deref(), &minified.text)?;
    Ok(0)
}
