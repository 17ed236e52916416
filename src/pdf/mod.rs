// src/pdf/mod.rs
use crate::utils::error::PdfError;
use lopdf::Document;
use std::path::Path;

/// Produces the plain text of one document.
///
/// The batch runner only depends on this trait, so tests can feed text
/// without real PDFs.
pub trait TextSource {
    fn document_text(&self, path: &Path) -> Result<String, PdfError>;
}

/// Reads PDFs from disk with `lopdf`, one page at a time.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfTextSource;

impl PdfTextSource {
    pub fn new() -> Self {
        Self
    }
}

impl TextSource for PdfTextSource {
    /// Loads the document and joins page texts with `\n`, in page order.
    /// A page whose text cannot be extracted contributes an empty string and
    /// a document with no pages gives empty text. Only a file that cannot be
    /// read or parsed is an error.
    fn document_text(&self, path: &Path) -> Result<String, PdfError> {
        let bytes = std::fs::read(path)?;
        let doc = Document::load_mem(&bytes).map_err(|source| PdfError::Load {
            path: path.display().to_string(),
            source,
        })?;

        // BTreeMap keyed by page number, so iteration is already in page order
        let pages = doc.get_pages();
        if pages.is_empty() {
            tracing::warn!("{} has no pages, using empty text", path.display());
            return Ok(String::new());
        }

        let mut page_texts = Vec::with_capacity(pages.len());
        for page_num in pages.keys() {
            match doc.extract_text(&[*page_num]) {
                Ok(text) => page_texts.push(text),
                Err(e) => {
                    tracing::warn!("Page {} of {}: text extraction failed ({}), using empty text", page_num, path.display(), e);
                    page_texts.push(String::new());
                }
            }
        }

        let text = page_texts.join("\n");
        tracing::debug!("Extracted {} characters from {} pages of {}", text.len(), pages.len(), path.display());
        Ok(text)
    }
}
