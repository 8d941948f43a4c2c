//! Data models and configuration.

pub mod config;
pub mod payslip;

pub use config::{ExtractionConfig, HoleriteConfig, PdfConfig};
pub use payslip::{ExtractionReport, PageFields, PageResult};
