//! Diff producer integration tests, including the patchability property:
//! applying the rendered diff to the "before" text reconstructs "after".

use tokpress_passes::{DiffOptions, unified_diff};

/// Minimal unified-diff applier for the patchability property. Assumes
/// the hunks came from `unified_diff` itself (ordered, non-overlapping,
/// `\n`-terminated inputs).
fn apply_unified(original: &str, diff: &str) -> String {
    let source: Vec<&str> = original.split_inclusive('\n').collect();
    let mut out = String::new();
    let mut cursor = 0usize;

    for line in diff.lines() {
        if line.starts_with("--- ") || line.starts_with("+++ ") {
            continue;
        }
        if let Some(header) = line.strip_prefix("@@") {
            let old_start: usize = header
                .split_whitespace()
                .next()
                .and_then(|tok| tok.trim_start_matches('-').split(',').next())
                .and_then(|n| n.parse().ok())
                .expect("hunk header");
            while cursor + 1 < old_start {
                out.push_str(source[cursor]);
                cursor += 1;
            }
        } else if line.starts_with(' ') {
            out.push_str(source[cursor]);
            cursor += 1;
        } else if line.starts_with('-') {
            cursor += 1;
        } else if let Some(added) = line.strip_prefix('+') {
            out.push_str(added);
            out.push('\n');
        }
    }
    while cursor < source.len() {
        out.push_str(source[cursor]);
        cursor += 1;
    }
    out
}

// ── Scenario: normalized headers and hunk marker ──────────────────────────────

#[test]
fn headers_and_hunks_present() {
    let out = unified_diff(
        "a",
        "line1\nline2\n",
        "b",
        "line1\nline2 changed\n",
        &DiffOptions::default(),
    );
    assert!(
        out.lines().next() == Some("--- before"),
        "first line must be the normalized before header: {out}"
    );
    assert!(out.lines().nth(1) == Some("+++ after"));
    assert!(out.contains("@@"));
}

// ── Patchability property ─────────────────────────────────────────────────────

#[test]
fn applying_the_diff_reconstructs_after() {
    let cases = [
        ("line1\nline2\n", "line1\nline2 changed\n"),
        ("a\nb\nc\nd\ne\nf\ng\n", "a\nb\nc\nX\ne\nf\ng\n"),
        ("only\n", "only\nplus a new line\n"),
        ("drop me\nkeep me\n", "keep me\n"),
        (
            "1\n2\n3\n4\n5\n6\n7\n8\n9\n10\n11\n12\n",
            "1\n2\nTWO-B\n3\n4\n5\n6\n7\n8\n9\n10\n11 edited\n12\n",
        ),
    ];
    for (before, after) in cases {
        let diff = unified_diff("a", before, "b", after, &DiffOptions::default());
        let reconstructed = apply_unified(before, &diff);
        assert_eq!(
            reconstructed, after,
            "patch application failed\nbefore:\n{before}\ndiff:\n{diff}"
        );
    }
}

#[test]
fn no_timestamps_or_names_leak_into_output() {
    let out = unified_diff(
        "/tmp/secret-path-a.txt",
        "x\n",
        "/tmp/secret-path-b.txt",
        "y\n",
        &DiffOptions::default(),
    );
    assert!(!out.contains("secret-path"));
    assert!(!out.contains("202"), "no dates embedded: {out}");
}
