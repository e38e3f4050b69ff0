use serde::Serialize;

/// Detected content category of an input document.
///
/// Drives which context-specific optimizer the engine schedules first and
/// whether prose passes are allowed to touch the text at all (`Json`
/// documents are opaque to them).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Code,
    Prose,
    Log,
    Json,
    Documentation,
    Mixed,
}

impl ContentType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::Code => "code",
            ContentType::Prose => "prose",
            ContentType::Log => "log",
            ContentType::Json => "json",
            ContentType::Documentation => "documentation",
            ContentType::Mixed => "mixed",
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
