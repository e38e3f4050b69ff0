/// Errors raised at the scanning boundary.
///
/// Only size violations surface from this crate; every other scanning
/// operation is total. The protector in particular never fails — malformed
/// structure (an unclosed fence, a lone backtick) is handled by treating
/// the remainder conservatively, not by erroring.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// Input exceeded the configured byte ceiling.
    ///
    /// Raised before any allocation proportional to the input, so callers
    /// can rely on it as an admission check.
    #[error("input is {len} bytes, exceeding the {max} byte ceiling")]
    InputTooLarge { len: usize, max: usize },
}

impl ScanError {
    /// Stable machine-readable error kind.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            ScanError::InputTooLarge { .. } => "input-too-large",
        }
    }
}
