/// Implementation of `tokpress classify`.
///
/// Prints the content-type classification as one JSON object on stdout,
/// feature breakdown included, e.g.:
///
/// ```text
/// {"contentType":"log","confidence":0.9,"features":{...}}
/// ```
use anyhow::Result;
use tokpress_engine::detect_content_type;

use crate::{ClassifyArgs, read_input};

pub fn run(args: &ClassifyArgs) -> Result<i32> {
    let input = read_input(args.file.as_deref())?;
    let classification = detect_content_type(&input);
    println!("{}", serde_json::to_string(&classification)?);
    Ok(0)
}
