use scraper::{Html, Selector};

/// Text of the document's `<title>`, if present and non-blank.
pub fn document_title(html: &str) -> Option<String> {
    let doc = Html::parse_document(html);
    let selector = Selector::parse("title").ok()?;
    doc.select(&selector)
        .next()
        .map(|title| title.text().collect::<String>())
        .map(|title| title.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|title| !title.is_empty())
}
