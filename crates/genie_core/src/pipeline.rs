use crate::classify::{classify, Classification};
use crate::extract::extract;
use crate::preview::ExtractedDocument;
use crate::sanitize::{sanitize, to_hard_breaks, ParseSettings, DOCUMENT_ONLY_REPLY};

/// Replaces [`DOCUMENT_ONLY_REPLY`] when the embedded markup was not a full page.
pub const INCOMPLETE_DOCUMENT_REPLY: &str =
    "The agent sent markup that isn't a complete HTML page, so the preview was left unchanged.";

/// Everything the controller needs from one agent response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedResponse {
    pub classification: Classification,
    /// Chat-safe text with markdown hard breaks applied.
    pub chat_text: String,
    /// Present only when a complete document was found.
    pub document: Option<ExtractedDocument>,
}

/// Classify, extract and sanitize a raw agent response in one pass.
pub fn parse_response(raw: &str, settings: &ParseSettings) -> ParsedResponse {
    let classification = classify(raw);
    let document = extract(raw, classification).and_then(ExtractedDocument::new);
    let mut chat = sanitize(raw, classification, settings);
    let claims_document =
        classification == Classification::FullDocument || chat == DOCUMENT_ONLY_REPLY;
    if document.is_none() && claims_document {
        chat = INCOMPLETE_DOCUMENT_REPLY.to_string();
    }
    let chat_text = to_hard_breaks(&chat);
    ParsedResponse {
        classification,
        chat_text,
        document,
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_response, INCOMPLETE_DOCUMENT_REPLY};
    use crate::classify::Classification;
    use crate::sanitize::ParseSettings;

    #[test]
    fn mixed_response_yields_text_and_document() {
        let raw = "Here you go:\n```html\n<!DOCTYPE html><html></html>\n```\nEnjoy!";
        let parsed = parse_response(raw, &ParseSettings::default());
        assert_eq!(parsed.classification, Classification::FencedBlock);
        assert_eq!(parsed.chat_text, "Here you go:  \nEnjoy!");
        assert_eq!(
            parsed.document.as_ref().map(|d| d.as_str()),
            Some("<!DOCTYPE html><html></html>")
        );
    }

    #[test]
    fn fenced_fragment_is_not_a_document() {
        let raw = "```html\n<div class=\"hero\">Hi</div>\n```";
        let parsed = parse_response(raw, &ParseSettings::default());
        assert_eq!(parsed.classification, Classification::FencedBlock);
        assert_eq!(parsed.document, None);
        assert_eq!(parsed.chat_text, INCOMPLETE_DOCUMENT_REPLY);
    }
}
