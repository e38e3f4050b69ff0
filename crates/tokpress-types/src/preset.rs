use serde::Serialize;

/// Filler-stripper aggressiveness level.
///
/// Each preset resolves to an ordered rule list, and later presets are
/// strict supersets of earlier ones (concatenation, never mutation):
///
/// ```text
/// ┌──────────────┬──────────────────────────────────────────────────────┐
/// │ Preset       │ Rule set                                             │
/// ├──────────────┼──────────────────────────────────────────────────────┤
/// │ Conservative │ 5 base phrase rewrites ("in order to" → "to", …)     │
/// │ Standard     │ base + generic hedges ("basically", "actually", …)   │
/// │ Aggressive   │ standard + opinion hedges ("obviously", "IMO", …)    │
/// │ Ultra        │ aggressive + verbose-phrase rewrites ("prior to" →   │
/// │              │ "before", "at this point in time" → "now", …)        │
/// └──────────────┴──────────────────────────────────────────────────────┘
/// ```
///
/// Ordering on the enum follows aggressiveness, so
/// `Preset::Conservative < Preset::Ultra`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    Conservative,
    #[default]
    Standard,
    Aggressive,
    Ultra,
}

impl Preset {
    /// All presets in escalation order, weakest first.
    pub const LADDER: [Preset; 4] = [
        Preset::Conservative,
        Preset::Standard,
        Preset::Aggressive,
        Preset::Ultra,
    ];

    /// Parses a preset name.
    ///
    /// Unrecognised names degrade silently to [`Preset::Standard`] rather
    /// than erroring, so a stale flag value in a caller's tooling still
    /// produces a sensible run.
    #[must_use]
    pub fn parse(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "conservative" => Preset::Conservative,
            "aggressive" => Preset::Aggressive,
            "ultra" => Preset::Ultra,
            _ => Preset::Standard,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Preset::Conservative => "conservative",
            Preset::Standard => "standard",
            Preset::Aggressive => "aggressive",
            Preset::Ultra => "ultra",
        }
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_names() {
        assert_eq!(Preset::parse("conservative"), Preset::Conservative);
        assert_eq!(Preset::parse("standard"), Preset::Standard);
        assert_eq!(Preset::parse("aggressive"), Preset::Aggressive);
        assert_eq!(Preset::parse("ULTRA"), Preset::Ultra);
    }

    #[test]
    fn parse_unknown_degrades_to_standard() {
        assert_eq!(Preset::parse("turbo"), Preset::Standard);
        assert_eq!(Preset::parse(""), Preset::Standard);
    }

    #[test]
    fn ladder_is_ordered_by_aggressiveness() {
        for pair in Preset::LADDER.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }
}
