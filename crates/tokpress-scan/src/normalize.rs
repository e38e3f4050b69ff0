//! Input normalization: Unicode NFC and end-of-line canonicalization.
//!
//! Every pipeline entry point funnels through [`normalize`] so downstream
//! passes only ever see NFC text with `\n` line endings. The dominant
//! original EOL style is recorded so output stages can restore it when the
//! caller asked to keep it.

use unicode_normalization::{UnicodeNormalization, is_nfc};

use crate::error::ScanError;

/// Default input ceiling: 32 MiB.
pub const DEFAULT_MAX_BYTES: usize = 32 * 1024 * 1024;

/// Dominant end-of-line convention of an input document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Eol {
    #[default]
    Lf,
    CrLf,
}

/// Normalized text plus the EOL style it arrived with.
#[derive(Clone, Debug)]
pub struct Normalized {
    /// NFC text with `\n` line endings.
    pub text: String,
    /// EOL style detected on the way in; [`apply_eol`] restores it.
    pub eol: Eol,
}

/// Normalizes `input` to NFC with `\n` line endings.
///
/// The dominant EOL is decided by count: `\r\n` wins only when CRLF
/// terminators strictly outnumber bare LF ones, so inputs without line
/// breaks (and exact ties) record [`Eol::Lf`].
///
/// # Errors
///
/// [`ScanError::InputTooLarge`] when the byte length exceeds `max_bytes`.
pub fn normalize(input: &str, max_bytes: usize) -> Result<Normalized, ScanError> {
    if input.len() > max_bytes {
        return Err(ScanError::InputTooLarge {
            len: input.len(),
            max: max_bytes,
        });
    }

    let crlf = input.matches("\r\n").count();
    let bare_lf = input.matches('\n').count() - crlf;
    let eol = if crlf > bare_lf { Eol::CrLf } else { Eol::Lf };

    let composed = if is_nfc(input) {
        input.to_owned()
    } else {
        input.nfc().collect()
    };
    let text = if crlf > 0 {
        composed.replace("\r\n", "\n")
    } else {
        composed
    };

    Ok(Normalized { text, eol })
}

/// Rewrites `\n`-terminated text back to the given EOL style.
#[must_use]
pub fn apply_eol(text: &str, eol: Eol) -> String {
    match eol {
        Eol::Lf => text.to_owned(),
        Eol::CrLf => text.replace('\n', "\r\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lf_input_stays_lf() {
        let n = normalize("a\nb\n", DEFAULT_MAX_BYTES).unwrap();
        assert_eq!(n.text, "a\nb\n");
        assert_eq!(n.eol, Eol::Lf);
    }

    #[test]
    fn crlf_input_rewritten_and_recorded() {
        let n = normalize("a\r\nb\r\n", DEFAULT_MAX_BYTES).unwrap();
        assert_eq!(n.text, "a\nb\n");
        assert_eq!(n.eol, Eol::CrLf);
    }

    #[test]
    fn mixed_eol_majority_wins() {
        let n = normalize("a\r\nb\r\nc\n", DEFAULT_MAX_BYTES).unwrap();
        assert_eq!(n.eol, Eol::CrLf);
        assert_eq!(n.text, "a\nb\nc\n");

        let n = normalize("a\r\nb\nc\n", DEFAULT_MAX_BYTES).unwrap();
        assert_eq!(n.eol, Eol::Lf, "ties and LF majorities record LF");
    }

    #[test]
    fn no_line_breaks_records_lf() {
        assert_eq!(normalize("abc", DEFAULT_MAX_BYTES).unwrap().eol, Eol::Lf);
    }

    #[test]
    fn nfc_composition_applied() {
        // "e" + combining acute (U+0301) composes to "é" (U+00E9).
        let n = normalize("cafe\u{0301}", DEFAULT_MAX_BYTES).unwrap();
        assert_eq!(n.text, "caf\u{00e9}");
    }

    #[test]
    fn size_guard_rejects_oversize() {
        let err = normalize("abcdef", 4).unwrap_err();
        assert!(matches!(err, ScanError::InputTooLarge { len: 6, max: 4 }));
        assert_eq!(err.kind(), "input-too-large");
    }

    #[test]
    fn apply_eol_roundtrips_crlf() {
        let n = normalize("a\r\nb\r\n", DEFAULT_MAX_BYTES).unwrap();
        assert_eq!(apply_eol(&n.text, n.eol), "a\r\nb\r\n");
    }
}
