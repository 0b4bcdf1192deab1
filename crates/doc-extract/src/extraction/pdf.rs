//! PDF text extraction

use super::TextExtractor;
use crate::error::ExtractError;
use crate::types::DocumentKind;

/// Extracts text from PDF bytes with `pdf-extract`
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractError> {
        let text = pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| ExtractError::parse(DocumentKind::Pdf, e.to_string()))?;

        // pdf-extract leaves NULs behind for some embedded fonts
        Ok(text.replace('\0', ""))
    }
}
