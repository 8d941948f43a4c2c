//! Payslip field extraction and document processing.

mod parser;
mod processor;
pub mod rules;

pub use parser::{extract_fields, PayslipParser};
pub use processor::{process, process_single_page, PageOutcome, PayslipProcessor};
