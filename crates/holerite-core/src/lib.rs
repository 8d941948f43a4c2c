//! Core library for payslip (holerite) PDF processing.
//!
//! This crate provides:
//! - Per-page text isolation and page splitting for PDFs (lopdf, pdf-extract)
//! - Rule-based extraction of employee name, CPF and net pay
//! - Whole-document processing with per-page graceful degradation

pub mod error;
pub mod models;
pub mod pdf;
pub mod payslip;

pub use error::{ErrorKind, HoleriteError, PdfError, Result};
pub use models::config::HoleriteConfig;
pub use models::payslip::{ExtractionReport, PageFields, PageResult};
pub use pdf::{is_pdf_content_type, split_page, PageIndex, PdfExtractor, PdfProcessor};
pub use payslip::{
    extract_fields, process, process_single_page, PageOutcome, PayslipParser, PayslipProcessor,
};
pub use payslip::rules::normalize_br_amount;
