//! Rule tables for the filler stripper and the semantic compressor.
//!
//! Every table is a build-time constant; compilation to [`regex::Regex`]
//! happens once behind a [`LazyLock`]. Later presets are supersets of
//! earlier ones via concatenation, never mutation. Within a table, rules
//! run top to bottom and are ordered specific → general so a later rule
//! cannot undo an earlier replacement.
//!
//! Pattern conventions: every pattern is compiled case-insensitive with the
//! regex crate's Unicode word boundaries; replacements are spliced in
//! literally, so `$` and `\` carry no meaning. Hedge-word removals also eat
//! an optional trailing comma and space so "Basically, this" collapses to
//! "this" instead of ", this".

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};
use tokpress_scan::Protected;
use tokpress_types::Preset;

/// One `(pattern, replacement)` rewrite.
pub(crate) struct Rule {
    pub pattern: &'static str,
    pub replacement: &'static str,
}

const fn rule(pattern: &'static str, replacement: &'static str) -> Rule {
    Rule {
        pattern,
        replacement,
    }
}

// ── Preset tables ─────────────────────────────────────────────────────────────

/// Base phrase rewrites applied at every level.
const CONSERVATIVE: &[Rule] = &[
    rule(r"\bin order to\b", "to"),
    rule(r"\bdue to the fact that\b", "because"),
    rule(r"\bin the event that\b", "if"),
    rule(r"\bfor the purpose of\b", "for"),
    rule(r"\bat the end of the day\b", "ultimately"),
];

/// Generic hedge words dropped at `standard` and above.
const STANDARD_EXTRA: &[Rule] = &[
    rule(r"\bbasically\b,? ?", ""),
    rule(r"\bactually\b,? ?", ""),
    rule(r"\bsimply\b,? ?", ""),
    rule(r"\breally\b,? ?", ""),
    rule(r"\bvery\b,? ?", ""),
    rule(r"\bjust\b,? ?", ""),
    rule(r"\bquite\b,? ?", ""),
    rule(r"\bliterally\b,? ?", ""),
    rule(r"\bcertainly\b,? ?", ""),
    rule(r"\bdefinitely\b,? ?", ""),
    rule(r"\bin fact\b,? ?", ""),
];

/// Opinion hedges dropped at `aggressive` and above.
const AGGRESSIVE_EXTRA: &[Rule] = &[
    rule(r"\bobviously\b,? ?", ""),
    rule(r"\bclearly\b,? ?", ""),
    rule(r"\bfrankly\b,? ?", ""),
    rule(r"\bhonestly\b,? ?", ""),
    rule(r"\bimho\b,? ?", ""),
    rule(r"\bimo\b,? ?", ""),
];

/// Verbose-phrase rewrites applied only at `ultra`.
const ULTRA_EXTRA: &[Rule] = &[
    rule(r"\bit is important to note that ?", ""),
    rule(r"\bit should be noted that ?", ""),
    rule(r"\bin spite of the fact that\b", "although"),
    rule(r"\bat this point in time\b", "now"),
    rule(r"\buntil such time as\b", "until"),
    rule(r"\bwith the exception of\b", "except"),
    rule(r"\bin close proximity to\b", "near"),
    rule(r"\ba sufficient amount of\b", "enough"),
    rule(r"\bfor the reason that\b", "because"),
    rule(r"\bhas the ability to\b", "can"),
    rule(r"\bcome to the conclusion\b", "conclude"),
    rule(r"\btake into consideration\b", "consider"),
    rule(r"\bgive consideration to\b", "consider"),
    rule(r"\ba large number of\b", "many"),
    rule(r"\bin the near future\b", "soon"),
    rule(r"\bin a timely manner\b", "promptly"),
    rule(r"\bin the absence of\b", "without"),
    rule(r"\bon a daily basis\b", "daily"),
    rule(r"\bthe majority of\b", "most"),
    rule(r"\bin the course of\b", "during"),
    rule(r"\bin connection with\b", "about"),
    rule(r"\bmake a decision\b", "decide"),
    rule(r"\bwith regard to\b", "about"),
    rule(r"\bwith respect to\b", "about"),
    rule(r"\bsubsequent to\b", "after"),
    rule(r"\bin excess of\b", "more than"),
    rule(r"\bis able to\b", "can"),
    rule(r"\bby means of\b", "by"),
    rule(r"\bprior to\b", "before"),
];

/// Fixed verbose → concise mapping for the semantic compressor.
const SEMANTIC: &[Rule] = &[
    rule(r"\bnotwithstanding the fact that\b", "although"),
    rule(r"\bin the majority of cases\b", "usually"),
    rule(r"\bit is important to remember that ?", ""),
    rule(r"\bas a consequence of\b", "because of"),
    rule(r"\bon the grounds that\b", "because"),
    rule(r"\bit is possible that\b", "perhaps"),
    rule(r"\bit is necessary to\b", "must"),
    rule(r"\bhas a tendency to\b", "tends to"),
    rule(r"\bat the present time\b", "now"),
    rule(r"\bin the vicinity of\b", "near"),
    rule(r"\bin the process of\b", "while"),
    rule(r"\bin the context of\b", "in"),
    rule(r"\bas a result of\b", "because of"),
    rule(r"\bfor the most part\b", "mostly"),
    rule(r"\bon the occasion of\b", "when"),
    rule(r"\bfirst and foremost\b", "first"),
    rule(r"\blast but not least\b", "finally"),
    rule(r"\bin an effort to\b", "to"),
    rule(r"\bis capable of\b", "can"),
    rule(r"\bare capable of\b", "can"),
    rule(r"\bin many cases\b", "often"),
    rule(r"\bin most cases\b", "usually"),
    rule(r"\bin some cases\b", "sometimes"),
    rule(r"\bwith reference to\b", "about"),
    rule(r"\bin relation to\b", "about"),
    rule(r"\bin regard to\b", "about"),
    rule(r"\beach and every\b", "every"),
    rule(r"\bnull and void\b", "void"),
    rule(r"\bin terms of\b", "for"),
    rule(r"\bin order for\b", "for"),
    rule(r"\ba number of\b", "several"),
    rule(r"\bat all times\b", "always"),
];

// ── Compilation ───────────────────────────────────────────────────────────────

/// A rule with its compiled pattern.
pub(crate) struct CompiledRule {
    pub regex: Regex,
    pub pattern: &'static str,
    pub replacement: &'static str,
}

fn compile<'a>(tables: impl IntoIterator<Item = &'a [Rule]>) -> Vec<CompiledRule> {
    tables
        .into_iter()
        .flatten()
        .map(|r| CompiledRule {
            regex: RegexBuilder::new(r.pattern)
                .case_insensitive(true)
                .build()
                .expect("static rule pattern"),
            pattern: r.pattern,
            replacement: r.replacement,
        })
        .collect()
}

static CONSERVATIVE_RULES: LazyLock<Vec<CompiledRule>> = LazyLock::new(|| compile([CONSERVATIVE]));
static STANDARD_RULES: LazyLock<Vec<CompiledRule>> =
    LazyLock::new(|| compile([CONSERVATIVE, STANDARD_EXTRA]));
static AGGRESSIVE_RULES: LazyLock<Vec<CompiledRule>> =
    LazyLock::new(|| compile([CONSERVATIVE, STANDARD_EXTRA, AGGRESSIVE_EXTRA]));
static ULTRA_RULES: LazyLock<Vec<CompiledRule>> =
    LazyLock::new(|| compile([CONSERVATIVE, STANDARD_EXTRA, AGGRESSIVE_EXTRA, ULTRA_EXTRA]));
static SEMANTIC_RULES: LazyLock<Vec<CompiledRule>> = LazyLock::new(|| compile([SEMANTIC]));

/// The full rule list for a preset, weakest rules first.
pub(crate) fn preset_rules(preset: Preset) -> &'static [CompiledRule] {
    match preset {
        Preset::Conservative => &CONSERVATIVE_RULES,
        Preset::Standard => &STANDARD_RULES,
        Preset::Aggressive => &AGGRESSIVE_RULES,
        Preset::Ultra => &ULTRA_RULES,
    }
}

/// The semantic compressor's mapping.
pub(crate) fn semantic_rules() -> &'static [CompiledRule] {
    &SEMANTIC_RULES
}

// ── Application ───────────────────────────────────────────────────────────────

/// Applies `rules` in order over masked text, honouring the adverb guard:
/// a match whose nearest non-whitespace neighbour is an inline-code
/// placeholder is suppressed. Returns the rewritten text, the patterns
/// that fired, and the total replacement count.
pub(crate) fn apply_rules(
    protected: &Protected,
    masked: &str,
    rules: &[CompiledRule],
) -> (String, Vec<&'static str>, usize) {
    let mut current = masked.to_owned();
    let mut fired = Vec::new();
    let mut total = 0;

    for rule in rules {
        let mut out = String::with_capacity(current.len());
        let mut last = 0;
        let mut hit = false;
        for m in rule.regex.find_iter(&current) {
            if protected.inline_adjacent(&current, m.start(), m.end()) {
                continue;
            }
            out.push_str(&current[last..m.start()]);
            out.push_str(rule.replacement);
            last = m.end();
            hit = true;
            total += 1;
        }
        if hit {
            out.push_str(&current[last..]);
            current = out;
            fired.push(rule.pattern);
        }
    }

    (current, fired, total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_rule_counts() {
        assert_eq!(preset_rules(Preset::Conservative).len(), 5);
        assert_eq!(preset_rules(Preset::Standard).len(), 16);
        assert_eq!(preset_rules(Preset::Aggressive).len(), 22);
        assert_eq!(preset_rules(Preset::Ultra).len(), 51);
        assert!(semantic_rules().len() >= 30);
    }

    #[test]
    fn presets_are_supersets_by_concatenation() {
        let standard: Vec<_> = preset_rules(Preset::Standard)
            .iter()
            .map(|r| r.pattern)
            .collect();
        let ultra: Vec<_> = preset_rules(Preset::Ultra)
            .iter()
            .map(|r| r.pattern)
            .collect();
        assert_eq!(&ultra[..standard.len()], &standard[..]);
    }

    #[test]
    fn replacements_are_literal() {
        let protected = Protected::mask("x");
        let rules = compile([&[rule(r"\bx\b", "$1")][..]]);
        let (out, _, _) = apply_rules(&protected, "x", &rules);
        assert_eq!(out, "$1", "no backreference expansion");
    }

    #[test]
    fn patterns_match_case_insensitively() {
        let protected = Protected::mask("In Order To win");
        let (out, fired, count) =
            apply_rules(&protected, "In Order To win", preset_rules(Preset::Conservative));
        assert_eq!(out, "to win");
        assert_eq!(count, 1);
        assert_eq!(fired, vec![r"\bin order to\b"]);
    }

    #[test]
    fn hedge_removal_eats_comma() {
        let protected = Protected::mask("Basically, it works.");
        let (out, _, _) = apply_rules(
            &protected,
            "Basically, it works.",
            preset_rules(Preset::Standard),
        );
        assert_eq!(out, "it works.");
    }
}
