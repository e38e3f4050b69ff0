use std::time::Duration;

use tokpress_estimate::Model;
use tokpress_scan::DEFAULT_MAX_BYTES;
use tokpress_types::{ContentType, Preset};

/// Construction-time engine settings.
///
/// These bound the engine's resources and fix behavior that should not
/// vary per call:
///
/// ```text
/// ┌────────────────────┬───────────────────────────────┬──────────┐
/// │ Field              │ Purpose                       │ Default  │
/// ├────────────────────┼───────────────────────────────┼──────────┤
/// │ cache_capacity     │ LRU entry bound               │ 1000     │
/// │ cache_ttl          │ Entry freshness window        │ 1 hour   │
/// │ summary_high_water │ Token count above which the   │ 10 000   │
/// │                    │ summarizer may run            │          │
/// │ max_bytes          │ Input admission ceiling       │ 32 MiB   │
/// │ model              │ Ratio used for token math     │ generic  │
/// └────────────────────┴───────────────────────────────┴──────────┘
/// ```
#[derive(Clone, Copy, Debug)]
pub struct EngineConfig {
    pub cache_capacity: usize,
    pub cache_ttl: Duration,
    pub summary_high_water: u32,
    pub max_bytes: usize,
    pub model: Model,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cache_capacity: 1000,
            cache_ttl: Duration::from_secs(3600),
            summary_high_water: 10_000,
            max_bytes: DEFAULT_MAX_BYTES,
            model: Model::Generic,
        }
    }
}

/// Per-call pipeline options.
///
/// The recognized fields are exactly these; passes not covered by an
/// `enable_*` flag (normalization, protection, estimation) cannot be
/// turned off. The default runs every pass at the `standard` preset with
/// no budget, so the pipeline only stops when it runs out of passes.
#[derive(Clone, Debug)]
#[allow(clippy::struct_excessive_bools)]
pub struct EngineOptions {
    pub preset: Preset,
    /// Budget: stop once savings reach this percentage.
    pub target_savings_percent: Option<f64>,
    /// Budget: stop once the estimate drops to this many tokens.
    pub max_tokens: Option<u32>,
    pub enable_semantic_compression: bool,
    pub enable_whitespace_compression: bool,
    pub enable_duplicate_removal: bool,
    pub enable_summarization: bool,
    pub enable_context_optimization: bool,
    /// Skip detection and force this content type.
    pub content_type: Option<ContentType>,
    /// Restore the input's dominant EOL style on output.
    pub keep_eol: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            preset: Preset::default(),
            target_savings_percent: None,
            max_tokens: None,
            enable_semantic_compression: true,
            enable_whitespace_compression: true,
            enable_duplicate_removal: true,
            enable_summarization: true,
            enable_context_optimization: true,
            content_type: None,
            keep_eol: false,
        }
    }
}
