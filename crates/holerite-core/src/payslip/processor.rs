//! Whole-document orchestration: per-page extraction and splitting.

use std::fmt::Display;

use tracing::{debug, info, warn};

use crate::error::{HoleriteError, Result};
use crate::models::config::HoleriteConfig;
use crate::models::payslip::{ExtractionReport, PageResult};
use crate::pdf::{PageIndex, PdfExtractor, PdfProcessor};

use super::parser::PayslipParser;

/// Outcome of a per-page stage that is allowed to fail.
///
/// A failing stage does not abort the document; it yields `Degraded` and
/// the page keeps going with the stage's empty default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome<T> {
    /// The stage produced a value.
    Ready(T),
    /// The stage failed; the reason is kept for diagnostics.
    Degraded { reason: String },
}

impl<T> PageOutcome<T> {
    pub fn from_result<E: Display>(result: std::result::Result<T, E>) -> Self {
        match result {
            Ok(value) => PageOutcome::Ready(value),
            Err(e) => PageOutcome::Degraded {
                reason: e.to_string(),
            },
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, PageOutcome::Degraded { .. })
    }
}

impl<T: Default> PageOutcome<T> {
    /// The value, or the empty default when degraded.
    pub fn into_value(self) -> T {
        match self {
            PageOutcome::Ready(value) => value,
            PageOutcome::Degraded { .. } => T::default(),
        }
    }
}

/// Processes uploaded payslip documents.
///
/// Stateless between calls: every call parses its input afresh, so the same
/// bytes always produce the same report.
pub struct PayslipProcessor {
    config: HoleriteConfig,
    parser: PayslipParser,
}

impl PayslipProcessor {
    /// Create a processor with default settings.
    pub fn new() -> Self {
        Self::with_config(HoleriteConfig::default())
    }

    /// Create a processor from configuration.
    pub fn with_config(config: HoleriteConfig) -> Self {
        let parser = PayslipParser::from_config(&config.extraction);
        Self { config, parser }
    }

    pub fn config(&self) -> &HoleriteConfig {
        &self.config
    }

    fn load(&self, data: &[u8]) -> Result<PdfExtractor> {
        let mut extractor = PdfExtractor::from_config(&self.config.pdf, &self.config.extraction);
        extractor.load(data)?;
        Ok(extractor)
    }

    /// Extract fields and a standalone PDF for every page.
    ///
    /// Fails with `InvalidDocument` when `data` is not a PDF, and with
    /// `EmptyExtraction` when no page yields any field.
    pub fn process(&self, data: &[u8]) -> Result<ExtractionReport> {
        self.process_with_progress(data, |_, _| {})
    }

    /// Like [`process`](Self::process), calling `on_page(page_number, page_count)`
    /// after each page.
    pub fn process_with_progress<F>(&self, data: &[u8], on_page: F) -> Result<ExtractionReport>
    where
        F: FnMut(u32, u32),
    {
        let extractor = self.load(data)?;
        self.process_document(&extractor, on_page)
    }

    /// Run the bulk flow over an already loaded document.
    pub fn process_document<P, F>(&self, pdf: &P, mut on_page: F) -> Result<ExtractionReport>
    where
        P: PdfProcessor,
        F: FnMut(u32, u32),
    {
        let page_count = pdf.page_count();
        debug!("Processing {} pages", page_count);

        let mut report = ExtractionReport::with_capacity(page_count as usize);
        for i in 0..page_count as usize {
            let page = self.process_page(pdf, PageIndex::new(i));
            on_page(page.page_number, page_count);
            report.push(page);
        }

        if report.all_fields_empty() {
            info!("No fields found on any of {} pages", page_count);
            return Err(HoleriteError::EmptyExtraction);
        }

        Ok(report)
    }

    fn process_page<P: PdfProcessor>(&self, pdf: &P, index: PageIndex) -> PageResult {
        let page_number = index.page_number() as u32;
        let mut warnings = Vec::new();

        let text = PageOutcome::from_result(pdf.extract_page_text(index));
        if let PageOutcome::Degraded { reason } = &text {
            warn!("Page {}: text extraction failed: {}", page_number, reason);
            warnings.push(format!("text extraction failed: {}", reason));
        }
        let fields = self.parser.parse(&text.into_value());

        let document = PageOutcome::from_result(pdf.split_page(index));
        if let PageOutcome::Degraded { reason } = &document {
            warn!("Page {}: split failed: {}", page_number, reason);
            warnings.push(format!("split failed: {}", reason));
        }

        debug!(
            "Page {}: name={:?} cpf={:?} net={:?}",
            page_number, fields.name, fields.tax_id, fields.net_value
        );

        PageResult {
            page_number,
            fields,
            page_document: document.into_value(),
            warnings,
        }
    }

    /// Return the standalone PDF for 1-based `page_number`.
    ///
    /// No field extraction happens here, and nothing degrades: any failure
    /// is returned as `InvalidDocument` or `PageOutOfRange`.
    pub fn process_single_page(&self, data: &[u8], page_number: u32) -> Result<Vec<u8>> {
        let extractor = self.load(data)?;
        let index = PageIndex::from_page_number(page_number).ok_or(HoleriteError::PageOutOfRange {
            page: page_number as u64,
            page_count: extractor.page_count(),
        })?;
        Ok(extractor.split_page(index)?)
    }
}

impl Default for PayslipProcessor {
    fn default() -> Self {
        Self::new()
    }
}

/// Run the bulk flow with default settings.
pub fn process(data: &[u8]) -> Result<ExtractionReport> {
    PayslipProcessor::new().process(data)
}

/// Run the single-page flow with default settings.
pub fn process_single_page(data: &[u8], page_number: u32) -> Result<Vec<u8>> {
    PayslipProcessor::new().process_single_page(data, page_number)
}
