//! Filler stripping: preset-driven removal of hedge words and verbose
//! phrasing outside protected regions.

use tokpress_scan::{DEFAULT_MAX_BYTES, Protected, ScanError, apply_eol, normalize};
use tokpress_types::{PassMeta, PassOutput, Preset};

use crate::rules::{apply_rules, preset_rules};

/// Options for [`strip_fillers`].
#[derive(Clone, Copy, Debug)]
pub struct FillerOptions {
    pub preset: Preset,
    /// Restore the input's dominant EOL style on output.
    pub keep_eol: bool,
    pub max_bytes: usize,
}

impl Default for FillerOptions {
    fn default() -> Self {
        Self {
            preset: Preset::default(),
            keep_eol: false,
            max_bytes: DEFAULT_MAX_BYTES,
        }
    }
}

/// Strips filler according to the preset's rule list, in order.
///
/// Fenced code, inline code, and whole-document JSON literals pass through
/// byte-exact; a rule match adjacent to an inline code span is suppressed
/// (the adverb guard). On a JSON-literal document this is a no-op that
/// reports `meta.preserved.json == true`.
///
/// # Errors
///
/// [`ScanError::InputTooLarge`] when the input exceeds `options.max_bytes`.
pub fn strip_fillers(text: &str, options: &FillerOptions) -> Result<PassOutput, ScanError> {
    let normalized = normalize(text, options.max_bytes)?;
    let mut output = strip_fillers_normalized(&normalized.text, options.preset);
    if options.keep_eol {
        output.text = apply_eol(&output.text, normalized.eol);
    }
    Ok(output)
}

/// Rule application over already-normalized text. Total.
#[must_use]
pub fn strip_fillers_normalized(normalized: &str, preset: Preset) -> PassOutput {
    let protected = Protected::mask(normalized);
    let (stripped, fired, count) = apply_rules(&protected, protected.masked(), preset_rules(preset));
    let text = protected.restore(&stripped);
    let changed = text != normalized;
    tracing::debug!(preset = %preset, replacements = count, changed, "filler pass");
    PassOutput {
        meta: PassMeta {
            changed,
            preserved: protected.preserved(),
            replacements: count,
            rules: fired,
            ..PassMeta::default()
        },
        text,
    }
}
