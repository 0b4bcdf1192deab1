//! Kind -> extractor lookup shared by the extraction workers

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::{HtmlExtractor, PdfExtractor, TextExtractor};
use crate::config::ExtractConfig;
use crate::error::{Error, Result};
use crate::types::DocumentKind;

/// Extractors keyed by document kind
#[derive(Clone, Default)]
pub struct ExtractorRegistry {
    extractors: HashMap<DocumentKind, Arc<dyn TextExtractor>>,
}

impl ExtractorRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in PDF and HTML extractors
    pub fn with_defaults(config: &ExtractConfig) -> Self {
        Self::new()
            .with(DocumentKind::Pdf, PdfExtractor)
            .with(
                DocumentKind::Html,
                HtmlExtractor::new().strict(config.strict_utf8),
            )
    }

    /// Builder-style [`register`](Self::register)
    pub fn with(mut self, kind: DocumentKind, extractor: impl TextExtractor + 'static) -> Self {
        self.register(kind, extractor);
        self
    }

    /// Register or replace the extractor for a kind
    pub fn register(&mut self, kind: DocumentKind, extractor: impl TextExtractor + 'static) {
        self.extractors.insert(kind, Arc::new(extractor));
    }

    /// Look up the extractor for a kind
    pub fn get(&self, kind: DocumentKind) -> Result<&Arc<dyn TextExtractor>> {
        self.extractors
            .get(&kind)
            .ok_or(Error::UnknownKind(kind))
    }

    /// Resolve one extractor per kind so workers never look up a missing one
    pub fn resolve(&self) -> Result<ExtractorSet> {
        Ok(ExtractorSet {
            pdf: Arc::clone(self.get(DocumentKind::Pdf)?),
            html: Arc::clone(self.get(DocumentKind::Html)?),
        })
    }
}

/// A complete kind -> extractor mapping, checked when it was built
#[derive(Clone)]
pub struct ExtractorSet {
    pdf: Arc<dyn TextExtractor>,
    html: Arc<dyn TextExtractor>,
}

impl ExtractorSet {
    pub fn for_kind(&self, kind: DocumentKind) -> &dyn TextExtractor {
        match kind {
            DocumentKind::Pdf => self.pdf.as_ref(),
            DocumentKind::Html => self.html.as_ref(),
        }
    }
}

impl fmt::Debug for ExtractorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<_> = self.extractors.keys().collect();
        kinds.sort();
        f.debug_struct("ExtractorRegistry")
            .field("kinds", &kinds)
            .finish()
    }
}
