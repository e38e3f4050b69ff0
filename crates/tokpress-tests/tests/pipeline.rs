//! End-to-end pipeline tests: preservation, idempotence, budgets, and
//! the cache control surface.

use tokpress_engine::{Engine, EngineConfig, EngineOptions, optimize_advanced};
use tokpress_tests::{hedge_fixture, log_fixture, markdown_fixture};
use tokpress_types::Preset;

// ── Preservation invariant ────────────────────────────────────────────────────

#[test]
fn protected_regions_survive_the_full_pipeline() {
    let input = markdown_fixture();
    let result = Engine::default()
        .optimize(&input, &EngineOptions::default())
        .unwrap();
    assert!(
        result.output.contains("```sh\nworker start --pool 4\n```"),
        "fenced example must survive byte-exact:\n{}",
        result.output
    );
    assert!(result.output.contains("`worker start`"));
    assert!(result.savings_percent > 0.0, "fixture has plenty to strip");
}

#[test]
fn json_document_passes_through_whole_pipeline() {
    let input = "{\n  \"text\": \"this is basically very verbose. this is basically very verbose.\"\n}";
    let result = Engine::default()
        .optimize(input, &EngineOptions::default())
        .unwrap();
    assert_eq!(result.output, input, "JSON literals are opaque to prose passes");
}

// ── Idempotence ───────────────────────────────────────────────────────────────

#[test]
fn second_pass_savings_are_negligible() {
    let engine = Engine::default();
    let options = EngineOptions::default();
    for input in [hedge_fixture(), markdown_fixture(), log_fixture()] {
        let first = engine.optimize(&input, &options).unwrap();
        let second = engine.optimize(&first.output, &options).unwrap();
        assert!(
            second.savings_percent <= 2.0,
            "pipeline must be near-idempotent; second run saved {:.2}% on:\n{}",
            second.savings_percent,
            first.output
        );
    }
}

// ── Budgets ───────────────────────────────────────────────────────────────────

#[test]
fn hedge_flood_meets_target_savings() {
    let input = "basically ".repeat(100) + &"actually ".repeat(100);
    let result = optimize_advanced(
        &input,
        &EngineOptions {
            preset: Preset::Ultra,
            target_savings_percent: Some(30.0),
            ..EngineOptions::default()
        },
    )
    .unwrap();
    assert!(result.savings_percent >= 25.0, "got {}", result.savings_percent);
}

#[test]
fn max_tokens_budget_short_circuits() {
    // A generous ceiling is met by the very first effective pass, so
    // later strategies never fire.
    let input = log_fixture();
    let result = Engine::default()
        .optimize(
            &input,
            &EngineOptions {
                max_tokens: Some(60),
                ..EngineOptions::default()
            },
        )
        .unwrap();
    assert!(result.optimized_tokens <= 60);
    assert_eq!(result.strategies, vec!["context-logs".to_owned()]);
}

// ── Cache control ─────────────────────────────────────────────────────────────

#[test]
fn cache_stats_and_clear() {
    let engine = Engine::new(EngineConfig {
        cache_capacity: 8,
        ..EngineConfig::default()
    });
    let input = hedge_fixture();
    engine.optimize(&input, &EngineOptions::default()).unwrap();
    let stats = engine.cache_stats();
    assert_eq!(stats.entries, 1);
    assert_eq!(stats.capacity, 8);
    assert_eq!(stats.misses, 1);

    let again = engine.optimize(&input, &EngineOptions::default()).unwrap();
    assert_eq!(again.strategies, vec!["cached".to_owned()]);
    assert_eq!(engine.cache_stats().hits, 1);

    engine.clear_cache();
    assert_eq!(engine.cache_stats().entries, 0);
}

#[test]
fn concurrent_callers_share_one_engine() {
    let engine = std::sync::Arc::new(Engine::default());
    let input = std::sync::Arc::new(hedge_fixture());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let engine = std::sync::Arc::clone(&engine);
            let input = std::sync::Arc::clone(&input);
            std::thread::spawn(move || engine.optimize(&input, &EngineOptions::default()).unwrap())
        })
        .collect();
    let outputs: Vec<String> = handles
        .into_iter()
        .map(|h| h.join().unwrap().output)
        .collect();
    for output in &outputs[1..] {
        assert_eq!(output, &outputs[0], "racing callers must agree");
    }
}
