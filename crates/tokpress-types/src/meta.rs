use serde::Serialize;

/// Counts of protected structures a pass left untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Preserved {
    /// Fenced code blocks masked during the pass.
    pub code_blocks: usize,
    /// Inline code spans masked during the pass.
    pub inline: usize,
    /// True when the whole document was a JSON literal (pass was a no-op).
    pub json: bool,
}

/// Bookkeeping attached to every pass output.
///
/// `changed` is the one field every pass maintains; the counters are
/// pass-specific and stay zero where they do not apply (a whitespace pass
/// never removes duplicates, a dedup pass never fires rules).
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PassMeta {
    pub changed: bool,
    pub preserved: Preserved,
    /// Rule or phrase substitutions performed.
    pub replacements: usize,
    /// Sentences plus paragraphs dropped by deduplication.
    pub duplicates_removed: usize,
    /// Patterns of the rules that fired, in application order.
    pub rules: Vec<&'static str>,
}

/// A pass result: the transformed text and what happened to it.
#[derive(Clone, Debug)]
pub struct PassOutput {
    pub text: String,
    pub meta: PassMeta,
}

impl PassOutput {
    /// An output that hands the input back untouched.
    #[must_use]
    pub fn unchanged(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            meta: PassMeta::default(),
        }
    }
}
