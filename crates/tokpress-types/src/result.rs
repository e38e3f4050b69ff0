use serde::Serialize;

use crate::ContentType;

/// Aggregate outcome of an advanced-engine run.
///
/// ```text
/// ┌──────────────────┬───────────────────────────────────────────────────┐
/// │ Field            │ Meaning                                           │
/// ├──────────────────┼───────────────────────────────────────────────────┤
/// │ output           │ Optimized text                                    │
/// │ original_tokens  │ Heuristic estimate of the input                   │
/// │ optimized_tokens │ Heuristic estimate of the output                  │
/// │ saved            │ original_tokens - optimized_tokens (floored at 0) │
/// │ savings_percent  │ saved / original_tokens × 100                     │
/// │ strategies       │ Names of passes that produced a nonzero change,   │
/// │                  │ or ["cached"] for a fresh cache hit               │
/// │ content_type     │ Detected (or caller-forced) category              │
/// └──────────────────┴───────────────────────────────────────────────────┘
/// ```
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineResult {
    pub output: String,
    pub original_tokens: u32,
    pub optimized_tokens: u32,
    pub saved: u32,
    pub savings_percent: f64,
    pub strategies: Vec<String>,
    pub content_type: ContentType,
}

impl PipelineResult {
    /// A result that reports the input passed through unmodified.
    #[must_use]
    pub fn passthrough(output: String, tokens: u32, content_type: ContentType) -> Self {
        Self {
            output,
            original_tokens: tokens,
            optimized_tokens: tokens,
            saved: 0,
            savings_percent: 0.0,
            strategies: Vec::new(),
            content_type,
        }
    }
}
