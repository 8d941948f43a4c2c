//! Payslip extraction data models.

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

/// Fields extracted from the text of one payslip page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageFields {
    /// Employee name (`""` when not found).
    pub name: String,

    /// Employee tax ID, a CPF as printed (`""` when not found).
    pub tax_id: String,

    /// Net pay. `None` when not found or not parseable; distinct from zero.
    pub net_value: Option<Decimal>,
}

impl PageFields {
    /// True when no field was extracted.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.tax_id.is_empty() && self.net_value.is_none()
    }
}

/// Result for a single page of the uploaded document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResult {
    /// Page number (1-indexed).
    pub page_number: u32,

    /// Extracted fields.
    pub fields: PageFields,

    /// Standalone single-page PDF, empty when splitting this page failed.
    pub page_document: Vec<u8>,

    /// Notes about stages that degraded on this page. Not serialized.
    pub warnings: Vec<String>,
}

impl PageResult {
    /// Base64 (standard alphabet, padded) of the page document.
    pub fn page_document_base64(&self) -> String {
        if self.page_document.is_empty() {
            String::new()
        } else {
            BASE64.encode(&self.page_document)
        }
    }
}

/// Wire shape of a page entry.
#[derive(Serialize)]
struct PageRecord<'a> {
    page: u32,
    nome: &'a str,
    cpf: &'a str,
    #[serde(serialize_with = "rust_decimal::serde::float_option::serialize")]
    valor_liquido: Option<Decimal>,
    page_pdf_base64: String,
}

impl Serialize for PageResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        PageRecord {
            page: self.page_number,
            nome: &self.fields.name,
            cpf: &self.fields.tax_id,
            valor_liquido: self.fields.net_value,
            page_pdf_base64: self.page_document_base64(),
        }
        .serialize(serializer)
    }
}

/// Ordered per-page results for a whole document.
///
/// Serializes as a JSON array with one object per page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ExtractionReport {
    pages: Vec<PageResult>,
}

impl ExtractionReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a report with room for `page_count` pages.
    pub fn with_capacity(page_count: usize) -> Self {
        Self {
            pages: Vec::with_capacity(page_count),
        }
    }

    /// Append the next page. Pages must be pushed in ascending order.
    pub fn push(&mut self, page: PageResult) {
        debug_assert!(
            self.pages.last().map_or(true, |last| last.page_number < page.page_number),
            "pages must be appended in ascending order"
        );
        self.pages.push(page);
    }

    /// Pages in ascending page order.
    pub fn pages(&self) -> &[PageResult] {
        &self.pages
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// True when every page has entirely empty fields (vacuously true for no pages).
    pub fn all_fields_empty(&self) -> bool {
        self.pages.iter().all(|p| p.fields.is_empty())
    }

    pub fn into_pages(self) -> Vec<PageResult> {
        self.pages
    }
}

impl IntoIterator for ExtractionReport {
    type Item = PageResult;
    type IntoIter = std::vec::IntoIter<PageResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages.into_iter()
    }
}

impl<'a> IntoIterator for &'a ExtractionReport {
    type Item = &'a PageResult;
    type IntoIter = std::slice::Iter<'a, PageResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages.iter()
    }
}
