//! Page field parser combining the individual rule extractors.

use std::fmt::Debug;

use tracing::trace;

use crate::models::config::ExtractionConfig;
use crate::models::payslip::PageFields;

use super::rules::{
    CpfExtractor, ExtractionMatch, Field, FieldExtractor, NameExtractor, NetPayExtractor,
};

/// Rule-based parser turning one page's text into [`PageFields`].
///
/// Never fails: a field whose label is missing, or whose value does not
/// survive post-processing, takes its empty default without affecting the
/// other fields.
pub struct PayslipParser {
    name: NameExtractor,
    cpf: CpfExtractor,
    net_pay: NetPayExtractor,
}

impl PayslipParser {
    /// Create a new parser with default settings.
    pub fn new() -> Self {
        Self {
            name: NameExtractor::new(),
            cpf: CpfExtractor::new(),
            net_pay: NetPayExtractor::new(),
        }
    }

    /// Create a parser from the extraction configuration.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new().with_cpf_validation(config.validate_cpf)
    }

    /// Set CPF check digit validation.
    pub fn with_cpf_validation(mut self, validate: bool) -> Self {
        self.cpf = CpfExtractor::new().with_validation(validate);
        self
    }

    /// Extract all fields from a page's text.
    pub fn parse(&self, page_text: &str) -> PageFields {
        let name = self.name.extract(page_text);
        let tax_id = self.cpf.extract(page_text);
        let net_value = self.net_pay.extract(page_text);

        trace_match(Field::Name, name.as_ref());
        trace_match(Field::TaxId, tax_id.as_ref());
        trace_match(Field::NetValue, net_value.as_ref());

        PageFields {
            name: name.map(|m| m.value).unwrap_or_default(),
            tax_id: tax_id.map(|m| m.value).unwrap_or_default(),
            net_value: net_value.map(|m| m.value),
        }
    }
}

impl Default for PayslipParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract fields from a page's text with default settings.
pub fn extract_fields(page_text: &str) -> PageFields {
    PayslipParser::new().parse(page_text)
}

fn trace_match<T: Debug>(field: Field, found: Option<&ExtractionMatch<T>>) {
    match found {
        Some(m) => trace!(
            "{}: {:?} from {:?} at {:?}",
            field.key(),
            m.value,
            m.source,
            m.position
        ),
        None => trace!("{}: no match", field.key()),
    }
}
