//! PDF processing module.

mod extractor;
mod splitter;

pub use extractor::PdfExtractor;
pub use splitter::{split_document_page, split_page};

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Zero-based position of a page within a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageIndex(usize);

impl PageIndex {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Convert a 1-based page number. Page number 0 has no index.
    pub fn from_page_number(page_number: u32) -> Option<Self> {
        page_number.checked_sub(1).map(|i| Self(i as usize))
    }

    pub fn get(self) -> usize {
        self.0
    }

    /// 1-based page number.
    pub fn page_number(self) -> u64 {
        self.0 as u64 + 1
    }

    /// Fail with `PageOutOfRange` unless `0 <= index < page_count`.
    pub fn check(self, page_count: u32) -> Result<()> {
        if self.0 < page_count as usize {
            Ok(())
        } else {
            Err(PdfError::PageOutOfRange {
                index: self.0,
                page_count,
            })
        }
    }
}

/// Trait for PDF processing implementations.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Extract the text layer of a single page.
    fn extract_page_text(&self, index: PageIndex) -> Result<String>;

    /// Build a standalone PDF holding only the given page.
    fn split_page(&self, index: PageIndex) -> Result<Vec<u8>>;
}

/// Permissive check of an upload's declared content type.
///
/// Absent or blank values are accepted, as some clients send none.
pub fn is_pdf_content_type(content_type: Option<&str>) -> bool {
    let Some(content_type) = content_type else {
        return true;
    };
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    matches!(
        essence.as_str(),
        "" | "application/pdf" | "application/octet-stream"
    )
}
