//! PDF loading and per-page text extraction using lopdf and pdf-extract.

use std::cell::OnceCell;
use std::panic::{self, AssertUnwindSafe};

use lopdf::Document;
use tracing::{debug, trace, warn};

use super::splitter::split_document_page;
use super::{PageIndex, PdfProcessor, Result};
use crate::error::PdfError;
use crate::models::config::{ExtractionConfig, PdfConfig};

/// PDF content extractor: lopdf for structure, pdf-extract for page text.
///
/// Holds one parsed document for the duration of a request. Splitting works
/// on a copy, so the loaded document is never modified after `load`.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
    decrypt_with_empty_password: bool,
    strip_outlines: bool,
    text_fallback: bool,
    /// Per-page texts from pdf-extract, computed on first use.
    layout_pages: OnceCell<std::result::Result<Vec<String>, String>>,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
            decrypt_with_empty_password: true,
            strip_outlines: true,
            text_fallback: true,
            layout_pages: OnceCell::new(),
        }
    }

    /// Create an extractor from configuration sections.
    pub fn from_config(pdf: &PdfConfig, extraction: &ExtractionConfig) -> Self {
        Self::new()
            .with_empty_password_decryption(pdf.decrypt_with_empty_password)
            .with_outline_stripping(pdf.strip_outlines)
            .with_text_fallback(extraction.text_fallback)
    }

    /// Set whether encrypted documents are opened with an empty password.
    pub fn with_empty_password_decryption(mut self, enabled: bool) -> Self {
        self.decrypt_with_empty_password = enabled;
        self
    }

    /// Set whether split pages drop the outline tree.
    pub fn with_outline_stripping(mut self, enabled: bool) -> Self {
        self.strip_outlines = enabled;
        self
    }

    /// Set whether lopdf is tried when pdf-extract cannot read a page.
    pub fn with_text_fallback(mut self, enabled: bool) -> Self {
        self.text_fallback = enabled;
        self
    }

    /// The loaded document.
    pub fn document(&self) -> Result<&Document> {
        self.document
            .as_ref()
            .ok_or_else(|| PdfError::Parse("No document loaded".to_string()))
    }

    /// Map a zero-based index to lopdf's page number key.
    fn page_key(&self, doc: &Document, index: PageIndex) -> Result<u32> {
        let pages = doc.get_pages();
        index.check(pages.len() as u32)?;
        pages
            .keys()
            .nth(index.get())
            .copied()
            .ok_or(PdfError::PageOutOfRange {
                index: index.get(),
                page_count: pages.len() as u32,
            })
    }

    /// Page text from pdf-extract, which lays glyphs out into lines.
    ///
    /// The whole document is extracted on first use and cached.
    fn layout_page_text(&self, index: PageIndex) -> std::result::Result<String, String> {
        let pages = self.layout_pages.get_or_init(|| {
            let raw = &self.raw_data;
            let extracted = panic::catch_unwind(AssertUnwindSafe(|| {
                pdf_extract::extract_text_from_mem_by_pages(raw)
            }));
            let pages = match extracted {
                Ok(Ok(pages)) => Ok(pages),
                Ok(Err(e)) => Err(format!("pdf-extract failed: {}", e)),
                Err(_) => Err("pdf-extract panicked".to_string()),
            };
            if let Err(reason) = &pages {
                warn!("{}", reason);
            }
            pages
        });

        match pages {
            Ok(pages) => pages.get(index.get()).cloned().ok_or_else(|| {
                format!("pdf-extract returned only {} pages", pages.len())
            }),
            Err(reason) => Err(reason.clone()),
        }
    }

    /// Page text from lopdf's content stream walk. Lines inside one text
    /// block run together, so this only backs up pdf-extract.
    fn fallback_page_text(
        &self,
        doc: &Document,
        page_number: u32,
        index: PageIndex,
        reason: String,
    ) -> Result<String> {
        if !self.text_fallback {
            return Err(PdfError::TextExtraction(reason));
        }

        debug!(
            "Page {}: {}, falling back to lopdf",
            index.page_number(),
            reason
        );

        let extracted = panic::catch_unwind(AssertUnwindSafe(|| doc.extract_text(&[page_number])));
        match extracted {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(e)) => Err(PdfError::TextExtraction(format!("{}; lopdf: {}", reason, e))),
            Err(_) => Err(PdfError::TextExtraction(format!("{}; lopdf panicked", reason))),
        }
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        if doc.is_encrypted() {
            if !self.decrypt_with_empty_password || doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            doc.trailer.remove(b"Encrypt");
            debug!("Decrypted PDF with empty password");

            // Keep a plain copy for pdf-extract
            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted_data;
        } else {
            self.raw_data = data.to_vec();
        }

        debug!("Loaded PDF with {} pages", doc.get_pages().len());
        self.document = Some(doc);
        self.layout_pages = OnceCell::new();
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn extract_page_text(&self, index: PageIndex) -> Result<String> {
        let doc = self.document()?;
        let page_number = self.page_key(doc, index)?;

        match self.layout_page_text(index) {
            Ok(text) => {
                trace!("Page {}: {} chars of text", index.page_number(), text.len());
                Ok(text)
            }
            Err(reason) => self.fallback_page_text(doc, page_number, index, reason),
        }
    }

    fn split_page(&self, index: PageIndex) -> Result<Vec<u8>> {
        split_document_page(self.document()?, index, self.strip_outlines)
    }
}
