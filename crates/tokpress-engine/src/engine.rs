//! The advanced engine: classification, pass scheduling, budget checks,
//! and the result cache, behind one entry point.
//!
//! ```text
//! input ──▶ normalize ──▶ cache? ──▶ oracle? ──▶ classify
//!                                                   │
//!                         ┌─────────────────────────┘
//!                         ▼
//!            context → duplicates → semantic → fillers ladder
//!                         → whitespace → summary
//!                         │ (budget checked between passes)
//!                         ▼
//!                  estimate ──▶ cache store ──▶ PipelineResult
//! ```
//!
//! Every pass is total; the engine itself only fails on oversize input at
//! the normalizer boundary. Given identical input and options the output
//! is byte-identical across runs, which is what makes the racing-writers
//! cache policy sound.

use std::sync::LazyLock;

use tokpress_estimate::token_count;
use tokpress_passes::{
    SummaryOptions, compress_semantic, compress_whitespace, optimize_code_comments,
    optimize_documentation, optimize_logs, remove_duplicates, strip_fillers_normalized, summarize,
};
use tokpress_scan::{ScanError, apply_eol, normalize};
use tokpress_types::{ContentType, PipelineResult, Preset};

use crate::cache::{CacheStats, Digest, ResultCache};
use crate::classify::detect_content_type;
use crate::config::{EngineConfig, EngineOptions};
use crate::oracle::has_optimization_potential;

/// Fixed pass schedule. The orchestrator walks this list in order,
/// checking the budget between entries.
#[derive(Clone, Copy, Debug)]
enum PassKind {
    Context,
    Duplicates,
    Semantic,
    Fillers,
    Whitespace,
    Summary,
}

const PASS_ORDER: [PassKind; 6] = [
    PassKind::Context,
    PassKind::Duplicates,
    PassKind::Semantic,
    PassKind::Fillers,
    PassKind::Whitespace,
    PassKind::Summary,
];

/// Token-reduction engine owning its pipeline state and result cache.
///
/// Construct one per configuration, or use the convenience functions
/// ([`optimize_advanced`], [`cache_stats`], [`clear_cache`]) which share
/// a lazily-initialized default engine.
pub struct Engine {
    config: EngineConfig,
    cache: ResultCache,
}

impl Engine {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        let cache = ResultCache::new(config.cache_capacity, config.cache_ttl);
        Self { config, cache }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Runs the optimization pipeline.
    ///
    /// # Errors
    ///
    /// [`ScanError::InputTooLarge`] when the input exceeds the configured
    /// byte ceiling. Well-formed input below the ceiling never fails.
    pub fn optimize(
        &self,
        input: &str,
        options: &EngineOptions,
    ) -> Result<PipelineResult, ScanError> {
        let normalized = normalize(input, self.config.max_bytes)?;
        let model = self.config.model;
        let original_tokens = token_count(&normalized.text, model);
        let digest = options_digest(&normalized.text, options);

        if let Some(hit) = self.cache.get(&digest) {
            tracing::debug!(tokens = hit.tokens, "cache hit");
            let saved = original_tokens.saturating_sub(hit.tokens);
            return Ok(PipelineResult {
                output: restore_eol(hit.output, options, normalized.eol),
                original_tokens,
                optimized_tokens: hit.tokens,
                saved,
                savings_percent: percent(original_tokens, hit.tokens),
                strategies: vec!["cached".to_owned()],
                content_type: hit.content_type,
            });
        }

        if !has_optimization_potential(&normalized.text) {
            tracing::debug!("oracle: nothing to optimize");
            let content_type = self.resolve_type(&normalized.text, options);
            return Ok(PipelineResult::passthrough(
                restore_eol(normalized.text.clone(), options, normalized.eol),
                original_tokens,
                content_type,
            ));
        }

        let content_type = self.resolve_type(&normalized.text, options);

        let mut current = normalized.text.clone();
        let mut tokens = original_tokens;
        let mut strategies: Vec<String> = Vec::new();

        let budget_exists =
            options.target_savings_percent.is_some() || options.max_tokens.is_some();
        let met = |tokens: u32| {
            options
                .target_savings_percent
                .is_some_and(|target| percent(original_tokens, tokens) >= target)
                || options.max_tokens.is_some_and(|ceiling| tokens <= ceiling)
        };

        for pass in PASS_ORDER {
            if met(tokens) {
                break;
            }
            match pass {
                PassKind::Context if options.enable_context_optimization => {
                    let optimized = match content_type {
                        ContentType::Log => Some(("context-logs", optimize_logs(&current, model))),
                        ContentType::Documentation => {
                            Some(("context-docs", optimize_documentation(&current, model)))
                        }
                        ContentType::Code => {
                            Some(("context-code", optimize_code_comments(&current, model)))
                        }
                        _ => None,
                    };
                    if let Some((name, result)) = optimized
                        && result.output != current
                    {
                        current = result.output;
                        tokens = token_count(&current, model);
                        strategies.push(name.to_owned());
                    }
                }
                PassKind::Duplicates if options.enable_duplicate_removal => {
                    let result = remove_duplicates(&current);
                    if result.meta.changed {
                        current = result.text;
                        tokens = token_count(&current, model);
                        strategies.push("duplicates".to_owned());
                    }
                }
                PassKind::Semantic if options.enable_semantic_compression => {
                    let result = compress_semantic(&current);
                    if result.meta.changed {
                        current = result.text;
                        tokens = token_count(&current, model);
                        strategies.push("semantic".to_owned());
                    }
                }
                PassKind::Fillers => {
                    // Escalate through the preset ladder, halting as soon
                    // as the budget is met.
                    let mut strongest: Option<Preset> = None;
                    for level in Preset::LADDER {
                        if level > options.preset {
                            break;
                        }
                        let result = strip_fillers_normalized(&current, level);
                        if result.meta.changed {
                            current = result.text;
                            tokens = token_count(&current, model);
                            strongest = Some(level);
                        }
                        if met(tokens) {
                            break;
                        }
                    }
                    if let Some(level) = strongest {
                        strategies.push(format!("fillers-{level}"));
                    }
                }
                PassKind::Whitespace if options.enable_whitespace_compression => {
                    let result = compress_whitespace(&current);
                    if result.meta.changed {
                        current = result.text;
                        tokens = token_count(&current, model);
                        strategies.push("whitespace".to_owned());
                    }
                }
                PassKind::Summary if options.enable_summarization => {
                    // Last resort: only with a budget still unmet and a
                    // genuinely long document.
                    if budget_exists && tokens > self.config.summary_high_water {
                        let result = summarize(
                            &current,
                            &SummaryOptions {
                                target_tokens: summary_target(original_tokens, options),
                                model,
                                ..SummaryOptions::default()
                            },
                        );
                        if result.meta.changed {
                            current = result.text;
                            tokens = token_count(&current, model);
                            strategies.push("summary".to_owned());
                        }
                    }
                }
                _ => {}
            }
        }

        let optimized_tokens = token_count(&current, model);
        let saved = original_tokens.saturating_sub(optimized_tokens);
        let savings_percent = percent(original_tokens, optimized_tokens);
        tracing::debug!(
            original_tokens,
            optimized_tokens,
            savings_percent,
            ?strategies,
            "pipeline finished"
        );

        self.cache.put(
            digest,
            current.clone(),
            optimized_tokens,
            content_type,
            strategies.clone(),
        );

        Ok(PipelineResult {
            output: restore_eol(current, options, normalized.eol),
            original_tokens,
            optimized_tokens,
            saved,
            savings_percent,
            strategies,
            content_type,
        })
    }

    fn resolve_type(&self, normalized: &str, options: &EngineOptions) -> ContentType {
        options
            .content_type
            .unwrap_or_else(|| detect_content_type(normalized).content_type)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

fn percent(original: u32, now: u32) -> f64 {
    if original == 0 {
        0.0
    } else {
        f64::from(original.saturating_sub(now)) / f64::from(original) * 100.0
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn summary_target(original_tokens: u32, options: &EngineOptions) -> Option<u32> {
    options.max_tokens.or_else(|| {
        options
            .target_savings_percent
            .map(|p| (f64::from(original_tokens) * (1.0 - p / 100.0)).ceil().max(0.0) as u32)
    })
}

/// Digest of the normalized input and every recognized option field, in a
/// fixed order. `keep_eol` is deliberately excluded: the cache stores the
/// `\n`-normalized output and EOL restoration happens after retrieval.
fn options_digest(normalized: &str, options: &EngineOptions) -> Digest {
    let mut hasher = blake3::Hasher::new();
    hasher.update(normalized.as_bytes());
    hasher.update(&[0u8]);
    hasher.update(&[options.preset as u8]);
    hasher.update(&[u8::from(options.enable_semantic_compression)
        | u8::from(options.enable_whitespace_compression) << 1
        | u8::from(options.enable_duplicate_removal) << 2
        | u8::from(options.enable_summarization) << 3
        | u8::from(options.enable_context_optimization) << 4]);
    match options.target_savings_percent {
        Some(target) => {
            hasher.update(&[1]);
            hasher.update(&target.to_bits().to_le_bytes());
        }
        None => {
            hasher.update(&[0]);
        }
    }
    match options.max_tokens {
        Some(ceiling) => {
            hasher.update(&[1]);
            hasher.update(&ceiling.to_le_bytes());
        }
        None => {
            hasher.update(&[0]);
        }
    }
    match options.content_type {
        Some(content_type) => {
            hasher.update(&[1, content_type as u8]);
        }
        None => {
            hasher.update(&[0]);
        }
    }
    *hasher.finalize().as_bytes()
}

fn restore_eol(text: String, options: &EngineOptions, eol: tokpress_scan::Eol) -> String {
    if options.keep_eol {
        apply_eol(&text, eol)
    } else {
        text
    }
}

// ── Convenience global ────────────────────────────────────────────────────────

static DEFAULT_ENGINE: LazyLock<Engine> = LazyLock::new(Engine::default);

/// Optimizes with a process-wide default [`Engine`]. The engine (and its
/// cache) is created on first use, never at import time.
///
/// # Errors
///
/// See [`Engine::optimize`].
pub fn optimize_advanced(text: &str, options: &EngineOptions) -> Result<PipelineResult, ScanError> {
    DEFAULT_ENGINE.optimize(text, options)
}

/// Counters of the default engine's cache.
pub fn cache_stats() -> CacheStats {
    DEFAULT_ENGINE.cache_stats()
}

/// Empties the default engine's cache.
pub fn clear_cache() {
    DEFAULT_ENGINE.clear_cache()
}
