use crate::classify::{Classification, FENCED_HTML, INLINE_DOCUMENT};

/// Pull the HTML document out of a response according to its classification.
///
/// `None` is the normal outcome for [`Classification::PlainText`] and for
/// matches that are empty once trimmed.
pub fn extract(text: &str, classification: Classification) -> Option<String> {
    let html = match classification {
        Classification::FullDocument => text.trim(),
        // Only the first fenced block counts; later ones are ignored.
        Classification::FencedBlock => FENCED_HTML
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|inner| inner.as_str().trim())?,
        Classification::InlineDocument => INLINE_DOCUMENT.find(text)?.as_str().trim(),
        Classification::PlainText => return None,
    };

    if html.is_empty() {
        None
    } else {
        Some(html.to_string())
    }
}
