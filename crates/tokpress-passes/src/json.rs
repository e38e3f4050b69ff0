//! JSON minification: parse and re-serialize with no whitespace.
//!
//! Two modes, tried in order:
//!
//! 1. **Single document** — the whole text parses as one JSON value
//!    (pretty-printed multi-line documents land here).
//! 2. **NDJSON** — the whole-text parse failed and the trimmed input spans
//!    multiple lines: every non-empty line must parse independently and is
//!    minified in place; blank lines stay blank.
//!
//! Key order is preserved on re-serialization, so minification commutes
//! with parsing. This pass deliberately skips Unicode normalization:
//! rewriting string contents to NFC would change the parsed value.

use serde_json::Value;
use tokpress_scan::DEFAULT_MAX_BYTES;
use tokpress_types::{PassMeta, PassOutput, Preserved};

use crate::error::MinifyError;

/// Options for [`json_minify`].
#[derive(Clone, Copy, Debug)]
pub struct MinifyOptions {
    /// Restore the input's dominant EOL style on NDJSON output.
    pub keep_eol: bool,
    pub max_bytes: usize,
}

impl Default for MinifyOptions {
    fn default() -> Self {
        Self {
            keep_eol: false,
            max_bytes: DEFAULT_MAX_BYTES,
        }
    }
}

/// Minifies a JSON document or an NDJSON stream.
///
/// # Errors
///
/// - [`MinifyError::InputTooLarge`] before any parsing when the input
///   exceeds `options.max_bytes`.
/// - [`MinifyError::InvalidJson`] when a single-line input is not JSON.
/// - [`MinifyError::InvalidNdjson`] citing the 1-based line of the first
///   line that fails to parse in NDJSON mode.
pub fn json_minify(text: &str, options: &MinifyOptions) -> Result<PassOutput, MinifyError> {
    if text.len() > options.max_bytes {
        return Err(MinifyError::InputTooLarge {
            len: text.len(),
            max: options.max_bytes,
        });
    }

    let had_crlf = text.contains("\r\n");
    let unixed = if had_crlf {
        text.replace("\r\n", "\n")
    } else {
        text.to_owned()
    };
    let trimmed = unixed.trim();

    let whole = serde_json::from_str::<Value>(trimmed);
    let minified = match whole {
        Ok(value) => serde_json::to_string(&value)
            .map_err(|e| MinifyError::InvalidJson {
                message: e.to_string(),
            })?,
        Err(_) if trimmed.contains('\n') => minify_lines(&unixed)?,
        Err(single_err) => {
            return Err(MinifyError::InvalidJson {
                message: single_err.to_string(),
            });
        }
    };

    let output = if options.keep_eol && had_crlf {
        minified.replace('\n', "\r\n")
    } else {
        minified
    };

    Ok(PassOutput {
        meta: PassMeta {
            changed: output != text,
            preserved: Preserved {
                json: true,
                ..Preserved::default()
            },
            ..PassMeta::default()
        },
        text: output,
    })
}

/// NDJSON mode: each non-empty line minified independently, blank lines
/// preserved as blank.
fn minify_lines(unixed: &str) -> Result<String, MinifyError> {
    let mut out_lines = Vec::new();
    for (index, line) in unixed.split('\n').enumerate() {
        if line.trim().is_empty() {
            out_lines.push(String::new());
            continue;
        }
        let value = serde_json::from_str::<Value>(line).map_err(|e| MinifyError::InvalidNdjson {
            line: index + 1,
            message: e.to_string(),
        })?;
        out_lines.push(
            serde_json::to_string(&value).map_err(|e| MinifyError::InvalidNdjson {
                line: index + 1,
                message: e.to_string(),
            })?,
        );
    }
    Ok(out_lines.join("\n"))
}
