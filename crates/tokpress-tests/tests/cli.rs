//! CLI exit-code and stream-discipline tests.
//!
//! These drive the installed `tokpress` binary end-to-end: exit codes per
//! the documented table, output on stdout, reports and errors on stderr.

use assert_cmd::Command;
use predicates::prelude::*;

fn tokpress() -> Command {
    Command::cargo_bin("tokpress").expect("tokpress binary builds with the workspace")
}

// ── json-minify ───────────────────────────────────────────────────────────────

#[test]
fn json_minify_reads_stdin_and_exits_zero() {
    tokpress()
        .arg("json-minify")
        .write_stdin("{\n  \"a\": 1,\n  \"b\": [1, 2]\n}\n")
        .assert()
        .success()
        .stdout("{\"a\":1,\"b\":[1,2]}\n");
}

#[test]
fn json_minify_invalid_input_exits_two() {
    tokpress()
        .arg("json-minify")
        .write_stdin("not json")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid JSON"));
}

#[test]
fn json_minify_broken_ndjson_exits_two_and_cites_line() {
    tokpress()
        .arg("json-minify")
        .write_stdin("{\"x\":1}\n{\"y\":2}\n{\"z\":oops}\n")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("line 3"));
}

#[test]
fn json_minify_report_is_json_on_stderr() {
    tokpress()
        .args(["json-minify", "--report"])
        .write_stdin("{ \"k\" : 1 }")
        .assert()
        .success()
        .stderr(predicate::str::contains("\"savedPercent\""));
}

// ── strip-fillers ─────────────────────────────────────────────────────────────

#[test]
fn strip_fillers_strips_on_stdout() {
    tokpress()
        .args(["strip-fillers", "--preset", "standard"])
        .write_stdin("This is basically fine.")
        .assert()
        .success()
        .stdout("This is fine.\n");
}

#[test]
fn strip_fillers_unknown_preset_degrades_silently() {
    tokpress()
        .args(["strip-fillers", "--preset", "turbo"])
        .write_stdin("This is basically fine.")
        .assert()
        .success()
        .stdout("This is fine.\n");
}

// ── diff ──────────────────────────────────────────────────────────────────────

#[test]
fn diff_normalizes_headers() {
    let dir = std::env::temp_dir().join("tokpress-cli-diff-test");
    std::fs::create_dir_all(&dir).unwrap();
    let before = dir.join("before.txt");
    let after = dir.join("after.txt");
    std::fs::write(&before, "line1\nline2\n").unwrap();
    std::fs::write(&after, "line1\nline2 changed\n").unwrap();

    tokpress()
        .arg("diff")
        .arg(&before)
        .arg(&after)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("--- before\n+++ after\n"))
        .stdout(predicate::str::contains("@@"));
}

#[test]
fn diff_missing_file_exits_one() {
    tokpress()
        .args(["diff", "/nonexistent/a", "/nonexistent/b"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cannot read"));
}

// ── optimize ──────────────────────────────────────────────────────────────────

#[test]
fn optimize_emits_report_on_stderr_and_text_on_stdout() {
    tokpress()
        .args(["optimize", "--preset", "ultra", "--report"])
        .write_stdin("This is basically actually very verbose. This is basically actually very verbose.")
        .assert()
        .success()
        .stdout(predicate::str::contains("verbose."))
        .stderr(predicate::str::contains("\"strategies\""));
}

// ── estimate / classify ───────────────────────────────────────────────────────

#[test]
fn estimate_prints_token_json() {
    tokpress()
        .args(["estimate", "--model", "claude-3.5"])
        .write_stdin("abcdefghij")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"tokens\":3"))
        .stdout(predicate::str::contains("\"model\":\"claude-3.5\""));
}

#[test]
fn classify_prints_type_json() {
    tokpress()
        .arg("classify")
        .write_stdin("{\"key\":\"value\"}")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"contentType\":\"json\""));
}

// ── sentry ────────────────────────────────────────────────────────────────────

#[test]
fn sentry_within_budget_exits_zero() {
    tokpress()
        .args(["sentry", "--max-tokens", "100"])
        .write_stdin("short text")
        .assert()
        .success()
        .stdout(predicate::str::contains("within budget"));
}

#[test]
fn sentry_over_budget_exits_three_with_advice() {
    tokpress()
        .args(["sentry", "--max-tokens", "2"])
        .write_stdin("this input is comfortably longer than two tokens")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("\"suggestedActions\""))
        .stderr(predicate::str::contains("strip-fillers"));
}
