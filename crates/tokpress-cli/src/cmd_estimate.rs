/// Implementation of `tokpress estimate`.
///
/// Prints the heuristic estimate as one JSON object on stdout:
/// `{"chars":N,"tokens":N,"model":"...","note":"..."}` (the note appears
/// only with `--diff`). Estimation is total, so this command only fails
/// on I/O.
use anyhow::Result;
use tokpress_estimate::{Model, estimate_tokens};

use crate::{EstimateArgs, read_input};

pub fn run(args: &EstimateArgs) -> Result<i32> {
    let input = read_input(args.file.as_deref())?;
    let estimate = estimate_tokens(&input, Model::parse(&args.model), args.diff);
    println!("{}", serde_json::to_string(&estimate)?);
    Ok(0)
}
