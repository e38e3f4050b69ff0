//! Filler stripper integration tests: protection scenarios and the
//! monotonic-preset property.

use tokpress_passes::{FillerOptions, strip_fillers};
use tokpress_tests::hedge_fixture;
use tokpress_types::Preset;

fn strip(text: &str, preset: Preset) -> String {
    strip_fillers(
        text,
        &FillerOptions {
            preset,
            ..FillerOptions::default()
        },
    )
    .expect("inputs are under the ceiling")
    .text
}

// ── Scenario: protected structure survives verbatim ───────────────────────────

#[test]
fn inline_and_fenced_code_survive() {
    let input = "Here `fn()` is used\n```\nactually do x\n```\n";
    let out = strip(input, Preset::Standard);
    assert!(out.contains("`fn()`"));
    assert!(out.contains("```\nactually do x\n```"));
    assert_eq!(out, input);
}

// ── Scenario: adverb guard ────────────────────────────────────────────────────

#[test]
fn hedge_adjacent_to_inline_code_is_kept() {
    let out = strip("This is really `doSomething()` fast", Preset::Standard);
    assert!(out.contains("really"), "adverb guard must hold: {out}");
}

// ── Scenario: hedge-dense sentence shrinks ≥ 20% ─────────────────────────────

#[test]
fn hedge_dense_sentence_shrinks() {
    let input = "This is basically actually very simple in fact and simply verbose.";
    let out = strip(input, Preset::Standard);
    let reduction = 1.0 - out.chars().count() as f64 / input.chars().count() as f64;
    assert!(
        reduction >= 0.2,
        "expected ≥20% reduction, got {:.1}% ({out})",
        reduction * 100.0
    );
}

// ── Property: savings grow monotonically with the preset ─────────────────────

#[test]
fn preset_savings_are_monotonic() {
    let input = hedge_fixture();
    let mut previous_len = usize::MAX;
    for preset in Preset::LADDER {
        let len = strip(&input, preset).chars().count();
        assert!(
            len <= previous_len,
            "{preset} output grew: {len} > {previous_len}"
        );
        previous_len = len;
    }
}

#[test]
fn each_ladder_step_actually_bites_on_the_fixture() {
    // The fixture carries conservative phrases, generic hedges, opinion
    // hedges, and ultra rewrites, so every escalation shortens it.
    let input = hedge_fixture();
    let conservative = strip(&input, Preset::Conservative).chars().count();
    let standard = strip(&input, Preset::Standard).chars().count();
    let aggressive = strip(&input, Preset::Aggressive).chars().count();
    let ultra = strip(&input, Preset::Ultra).chars().count();
    assert!(conservative < input.chars().count());
    assert!(standard < conservative);
    assert!(aggressive < standard);
    assert!(ultra < aggressive);
}

// ── JSON documents are opaque ─────────────────────────────────────────────────

#[test]
fn valid_json_input_is_returned_verbatim() {
    let input = "{\n  \"hint\": \"this is basically very verbose\"\n}";
    let result = strip_fillers(input, &FillerOptions::default()).unwrap();
    assert_eq!(result.text, input);
    assert!(result.meta.preserved.json);
}
