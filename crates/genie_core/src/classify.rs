use std::sync::LazyLock;

use regex::Regex;

/// A fenced code block labelled `html`. Group 1 is the block content.
pub(crate) static FENCED_HTML: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)```html\s*([\s\S]*?)\s*```").expect("fenced html pattern")
});

/// Shortest span from a doctype declaration to the next closing `html` tag.
pub(crate) static INLINE_DOCUMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<!DOCTYPE\s+html[\s\S]*?</html\s*>").expect("inline document pattern")
});

pub(crate) static LEADING_DOCTYPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\A<!DOCTYPE\s+html").expect("doctype pattern"));

pub(crate) static CLOSING_HTML: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</html\s*>").expect("closing html pattern"));

pub(crate) static OPENING_HTML: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<html[\s>]").expect("opening html pattern"));

/// Shape of an agent response with respect to an embedded HTML document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// The whole (trimmed) response is an HTML document.
    FullDocument,
    /// Prose with at least one fenced ```` ```html ```` block.
    FencedBlock,
    /// Prose with an unfenced `<!DOCTYPE html> … </html>` span.
    InlineDocument,
    /// No embedded document.
    PlainText,
}

impl Classification {
    /// Tie-break order used by [`classify`]. The first variant that matches wins.
    pub const PRIORITY: [Classification; 4] = [
        Classification::FullDocument,
        Classification::FencedBlock,
        Classification::InlineDocument,
        Classification::PlainText,
    ];

    /// Whether `text` has this shape, ignoring higher-priority variants.
    pub fn matches(self, text: &str) -> bool {
        match self {
            Classification::FullDocument => {
                let trimmed = text.trim();
                LEADING_DOCTYPE
                    .find(trimmed)
                    .is_some_and(|doctype| CLOSING_HTML.is_match(&trimmed[doctype.end()..]))
            }
            Classification::FencedBlock => FENCED_HTML.is_match(text),
            Classification::InlineDocument => INLINE_DOCUMENT.is_match(text),
            Classification::PlainText => true,
        }
    }

    /// True for every variant that carries a document.
    pub fn embeds_document(self) -> bool {
        !matches!(self, Classification::PlainText)
    }
}

/// Classify a raw agent response.
pub fn classify(text: &str) -> Classification {
    Classification::PRIORITY
        .into_iter()
        .find(|candidate| candidate.matches(text))
        .unwrap_or(Classification::PlainText)
}
