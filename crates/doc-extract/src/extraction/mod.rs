//! Text extractors, one per document kind

mod html;
mod pdf;
mod registry;

pub use html::HtmlExtractor;
pub use pdf::PdfExtractor;
pub use registry::{ExtractorRegistry, ExtractorSet};

use crate::error::ExtractError;

/// Converts the raw bytes of one document into text.
///
/// Implementations are shared by every extraction worker, so they must be
/// `Send + Sync` and must not rely on the bytes living anywhere but memory.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractError>;
}

impl<F> TextExtractor for F
where
    F: Fn(&[u8]) -> Result<String, ExtractError> + Send + Sync,
{
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractError> {
        self(bytes)
    }
}
