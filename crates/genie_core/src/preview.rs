use crate::classify::{CLOSING_HTML, LEADING_DOCTYPE, OPENING_HTML};

/// Document shown before the agent has produced anything.
pub const PLACEHOLDER_DOCUMENT: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Generated Website</title>
    <style>
        body {
            font-family: Arial, sans-serif;
            margin: 0;
            padding: 20px;
            min-height: 100vh;
            display: flex;
            align-items: center;
            justify-content: center;
            background: linear-gradient(135deg, #3a7bd5 0%, #6d4ab0 100%);
            color: #fff;
        }
        .card {
            text-align: center;
            padding: 40px;
            border-radius: 20px;
            background: rgba(255, 255, 255, 0.12);
        }
        h1 { font-size: 3em; margin-bottom: 20px; }
        p { font-size: 1.2em; opacity: 0.9; }
    </style>
</head>
<body>
    <div class="card">
        <h1>Welcome!</h1>
        <p>Describe a website in the chat and it will show up here.</p>
    </div>
</body>
</html>"#;

/// A non-empty HTML document: a doctype or `html` start tag followed by a
/// closing `html` tag. The `<html>` start tag itself is optional after a doctype.
///
/// The only way into [`PreviewState`]; fragments and blank text are rejected
/// at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedDocument {
    html: String,
}

impl ExtractedDocument {
    pub fn new(html: impl Into<String>) -> Option<Self> {
        let html = html.into();
        if html.trim().is_empty() || !is_complete_document(&html) {
            return None;
        }
        Some(Self { html })
    }

    pub fn as_str(&self) -> &str {
        &self.html
    }

    pub fn into_inner(self) -> String {
        self.html
    }
}

fn is_complete_document(html: &str) -> bool {
    let html = html.trim_start();
    LEADING_DOCTYPE
        .find(html)
        .or_else(|| OPENING_HTML.find(html))
        .is_some_and(|open| CLOSING_HTML.is_match(&html[open.end()..]))
}

/// The single document currently shown in the preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewState {
    current: String,
}

impl Default for PreviewState {
    fn default() -> Self {
        Self {
            current: PLACEHOLDER_DOCUMENT.to_string(),
        }
    }
}

impl PreviewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset to the placeholder document.
    pub fn initialize(&mut self) {
        self.current = PLACEHOLDER_DOCUMENT.to_string();
    }

    /// Replace the current document; the previous one is discarded.
    pub fn update(&mut self, document: ExtractedDocument) {
        self.current = document.into_inner();
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    pub fn is_placeholder(&self) -> bool {
        self.current == PLACEHOLDER_DOCUMENT
    }
}
