//! Structural protection: masking fenced code, inline code, and JSON
//! literals behind opaque placeholders.
//!
//! The scanner is an explicit line automaton with two states:
//!
//! ```text
//! ┌───────┐  line whose trimmed content starts with ```   ┌────────┐
//! │ TEXT  │ ──────────────────────────────────────────▶   │ FENCED │
//! │       │ ◀──────────────────────────────────────────   │        │
//! └───────┘  next such line closes the block              └────────┘
//! ```
//!
//! Within a TEXT line, substrings delimited by single backticks form
//! inline-code regions (a within-line substate, not a scanner state).
//! Before the automaton runs at all, a document that parses wholesale as
//! JSON becomes a single json-literal region, which makes every prose pass
//! a structural no-op.
//!
//! Each region is replaced in the masked stream by `U+E000 <index> U+E001`.
//! The private-use sentinels cannot be produced by any rule pattern,
//! whitespace run, or sentence terminator, so passes treat placeholders as
//! opaque words and [`Protected::restore`] puts the original bytes back.

use tokpress_types::Preserved;

/// Opens a placeholder in the masked stream.
const OPEN: char = '\u{E000}';
/// Closes a placeholder in the masked stream.
const CLOSE: char = '\u{E001}';

/// What a protected region is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegionKind {
    /// A whole fenced block, delimiter lines included.
    FencedCode,
    /// A backtick-delimited span within a TEXT line, backticks included.
    InlineCode,
    /// The entire document, when it parses as one JSON value.
    JsonLiteral,
}

/// A protected substring of the normalized input.
#[derive(Clone, Debug)]
pub struct Region {
    pub kind: RegionKind,
    /// The original substring, restored byte-for-byte on output.
    pub text: String,
}

/// A masked view of a document plus the regions needed to unmask it.
#[derive(Clone, Debug)]
pub struct Protected {
    masked: String,
    regions: Vec<Region>,
    whole_json: bool,
}

/// True when `text` contains a protection placeholder.
#[must_use]
pub fn has_placeholder(text: &str) -> bool {
    text.contains(OPEN)
}

fn placeholder(index: usize) -> String {
    format!("{OPEN}{index}{CLOSE}")
}

impl Protected {
    /// Scans `text` and masks every protected region. Total: malformed
    /// structure degrades conservatively (an unclosed fence protects
    /// through end of input; an unmatched backtick stays literal).
    #[must_use]
    pub fn mask(text: &str) -> Self {
        let trimmed = text.trim();
        if !trimmed.is_empty() && serde_json::from_str::<serde_json::Value>(trimmed).is_ok() {
            return Self {
                masked: placeholder(0),
                regions: vec![Region {
                    kind: RegionKind::JsonLiteral,
                    text: text.to_owned(),
                }],
                whole_json: true,
            };
        }

        let mut masked = String::with_capacity(text.len());
        let mut regions = Vec::new();
        let mut fence: Option<String> = None;

        for line in text.split_inclusive('\n') {
            let opens_or_closes = line.trim_start().starts_with("```");
            if let Some(mut block) = fence.take() {
                block.push_str(line);
                if opens_or_closes {
                    close_fence(block, &mut masked, &mut regions);
                } else {
                    fence = Some(block);
                }
            } else if opens_or_closes {
                fence = Some(line.to_owned());
            } else {
                mask_inline_spans(line, &mut masked, &mut regions);
            }
        }
        if let Some(block) = fence {
            close_fence(block, &mut masked, &mut regions);
        }

        Self {
            masked,
            regions,
            whole_json: false,
        }
    }

    /// The placeholder stream passes operate on.
    #[must_use]
    pub fn masked(&self) -> &str {
        &self.masked
    }

    #[must_use]
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// True when the whole document was one JSON literal.
    #[must_use]
    pub fn whole_json(&self) -> bool {
        self.whole_json
    }

    /// Counts for pass metadata.
    #[must_use]
    pub fn preserved(&self) -> Preserved {
        let mut preserved = Preserved {
            json: self.whole_json,
            ..Preserved::default()
        };
        for region in &self.regions {
            match region.kind {
                RegionKind::FencedCode => preserved.code_blocks += 1,
                RegionKind::InlineCode => preserved.inline += 1,
                RegionKind::JsonLiteral => {}
            }
        }
        preserved
    }

    /// Replaces every placeholder in `edited` with its original region
    /// text. A sentinel that no longer forms a valid placeholder (a pass
    /// would have to manufacture private-use characters for that to
    /// happen) is dropped rather than leaked into the output.
    #[must_use]
    pub fn restore(&self, edited: &str) -> String {
        let mut out = String::with_capacity(edited.len());
        let mut rest = edited;
        while let Some(start) = rest.find(OPEN) {
            out.push_str(&rest[..start]);
            let after = &rest[start + OPEN.len_utf8()..];
            match after.find(CLOSE) {
                Some(close) => {
                    if let Ok(index) = after[..close].parse::<usize>()
                        && let Some(region) = self.regions.get(index)
                    {
                        out.push_str(&region.text);
                    }
                    rest = &after[close + CLOSE.len_utf8()..];
                }
                None => rest = after,
            }
        }
        out.push_str(rest);
        out
    }

    /// True when the byte span `[start, end)` of `masked` text is
    /// immediately adjacent (no intervening non-whitespace) to an
    /// inline-code placeholder on either side. This is the adverb guard:
    /// rules may not rewrite phrasing that leans on a code identifier.
    #[must_use]
    pub fn inline_adjacent(&self, masked: &str, start: usize, end: usize) -> bool {
        let before = masked[..start].trim_end();
        if before.ends_with(CLOSE)
            && let Some(open) = before.rfind(OPEN)
        {
            let digits = &before[open + OPEN.len_utf8()..before.len() - CLOSE.len_utf8()];
            if self.is_inline_region(digits) {
                return true;
            }
        }

        let after = masked[end..].trim_start();
        if let Some(rest) = after.strip_prefix(OPEN)
            && let Some(close) = rest.find(CLOSE)
            && self.is_inline_region(&rest[..close])
        {
            return true;
        }
        false
    }

    /// When `text` (after trimming) is exactly one placeholder, returns
    /// the region it stands for. Lets downstream passes reason about
    /// placeholder-only lines without knowing the sentinel encoding.
    #[must_use]
    pub fn sole_placeholder(&self, text: &str) -> Option<&Region> {
        let inner = text.trim().strip_prefix(OPEN)?.strip_suffix(CLOSE)?;
        let index: usize = inner.parse().ok()?;
        self.regions.get(index)
    }

    fn is_inline_region(&self, digits: &str) -> bool {
        digits
            .parse::<usize>()
            .ok()
            .and_then(|index| self.regions.get(index))
            .is_some_and(|region| region.kind == RegionKind::InlineCode)
    }
}

/// Emits a fenced block as one region. The block's final newline stays in
/// the masked stream so line structure around the fence survives masking.
fn close_fence(block: String, masked: &mut String, regions: &mut Vec<Region>) {
    let (body, had_newline) = match block.strip_suffix('\n') {
        Some(stripped) => (stripped.to_owned(), true),
        None => (block, false),
    };
    masked.push_str(&placeholder(regions.len()));
    if had_newline {
        masked.push('\n');
    }
    regions.push(Region {
        kind: RegionKind::FencedCode,
        text: body,
    });
}

/// Masks backtick spans within one TEXT line.
fn mask_inline_spans(line: &str, masked: &mut String, regions: &mut Vec<Region>) {
    let mut rest = line;
    while let Some(open) = rest.find('`') {
        let Some(close) = rest[open + 1..].find('`') else {
            break;
        };
        let end = open + 1 + close + 1;
        masked.push_str(&rest[..open]);
        masked.push_str(&placeholder(regions.len()));
        regions.push(Region {
            kind: RegionKind::InlineCode,
            text: rest[open..end].to_owned(),
        });
        rest = &rest[end..];
    }
    masked.push_str(rest);
}
