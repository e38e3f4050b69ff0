/// Errors surfaced by the JSON minifier.
///
/// The minifier is the one pass allowed to fail: malformed JSON is a
/// caller problem, not something to silently pass through. Every other
/// pass in this crate is total.
///
/// ```text
/// ┌───────────────┬─────────────────────────────────────────────┬──────┐
/// │ Variant       │ Cause                                       │ kind │
/// ├───────────────┼─────────────────────────────────────────────┼──────┤
/// │ InputTooLarge │ Byte length over the configured ceiling     │ size │
/// │ InvalidJson   │ Single-document parse failed                │ json │
/// │ InvalidNdjson │ A line of a multi-line input failed, cited  │ json │
/// │               │ by 1-based line number                      │      │
/// └───────────────┴─────────────────────────────────────────────┴──────┘
/// ```
#[derive(Debug, thiserror::Error)]
pub enum MinifyError {
    #[error("input is {len} bytes, exceeding the {max} byte ceiling")]
    InputTooLarge { len: usize, max: usize },

    #[error("invalid JSON: {message}")]
    InvalidJson { message: String },

    #[error("invalid NDJSON at line {line}: {message}")]
    InvalidNdjson { line: usize, message: String },
}

impl MinifyError {
    /// Stable machine-readable error kind.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            MinifyError::InputTooLarge { .. } => "input-too-large",
            MinifyError::InvalidJson { .. } => "invalid-json",
            MinifyError::InvalidNdjson { .. } => "invalid-ndjson",
        }
    }
}
