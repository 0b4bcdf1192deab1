//! HTML text extraction

use scraper::Html;
use std::borrow::Cow;

use super::TextExtractor;
use crate::error::ExtractError;
use crate::types::DocumentKind;

/// Elements whose text never reaches the output
const SKIPPED_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Extracts the text nodes of an HTML document, one per line
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlExtractor {
    strict_utf8: bool,
}

impl HtmlExtractor {
    /// Create an extractor that decodes input lossily
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail with an encoding error on invalid UTF-8 instead of replacing it
    pub fn strict(mut self, strict_utf8: bool) -> Self {
        self.strict_utf8 = strict_utf8;
        self
    }

    fn decode<'a>(&self, bytes: &'a [u8]) -> Result<Cow<'a, str>, ExtractError> {
        if self.strict_utf8 {
            std::str::from_utf8(bytes)
                .map(Cow::Borrowed)
                .map_err(|e| ExtractError::encoding(DocumentKind::Html, e.to_string()))
        } else {
            Ok(String::from_utf8_lossy(bytes))
        }
    }
}

impl TextExtractor for HtmlExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractError> {
        let html = self.decode(bytes)?;
        let document = Html::parse_document(&html);

        let mut content = String::new();
        for node in document.root_element().descendants() {
            let Some(text) = node.value().as_text() else {
                continue;
            };
            let hidden = node.ancestors().any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .is_some_and(|el| SKIPPED_ELEMENTS.contains(&el.name()))
            });
            if hidden {
                continue;
            }
            content.push_str(text);
            content.push('\n');
        }

        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize_text;

    #[test]
    fn test_extracts_visible_text() {
        let html = br#"<html>
            <head><title>Quarterly</title><style>p { color: red; }</style></head>
            <body>
              <h1>Results</h1>
              <p>Revenue <b>grew</b></p>
              <script>var hidden = 1;</script>
            </body>
        </html>"#;

        let text = HtmlExtractor::new().extract(html).unwrap();
        let normalized = normalize_text(&text);

        assert_eq!(normalized, "Quarterly\nResults\nRevenue\ngrew");
        assert!(!normalized.contains("hidden"));
        assert!(!normalized.contains("color"));
    }

    #[test]
    fn test_lossy_decoding_by_default() {
        let bytes = b"<p>caf\xe9</p>";
        let text = HtmlExtractor::new().extract(bytes).unwrap();
        assert!(text.contains("caf"));
    }

    #[test]
    fn test_strict_decoding_rejects_invalid_utf8() {
        let bytes = b"<p>caf\xe9</p>";
        let result = HtmlExtractor::new().strict(true).extract(bytes);
        assert!(matches!(
            result,
            Err(ExtractError::Encoding {
                kind: DocumentKind::Html,
                ..
            })
        ));
    }
}
