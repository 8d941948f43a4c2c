//! Rule-based field extractors for payslips.
//!
//! Each field is described by a [`FieldRule`]: a labelled pattern with a
//! single capture group. Extractors add the per-field post-processing
//! (CPF check digits, amount normalization) on top of the rule's match.

pub mod cpf;
pub mod name;
pub mod net_pay;
pub mod patterns;

pub use cpf::{extract_cpf, format_cpf, validate_cpf, CpfExtractor};
pub use name::{extract_name, NameExtractor};
pub use net_pay::{extract_net_pay, normalize_br_amount, NetPayExtractor};

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use patterns::{CPF_LABELED, EMPLOYEE_NAME, NET_PAY};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;
}

/// A value matched in page text.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Byte range of the whole match in the source text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, source: impl Into<String>) -> Self {
        Self {
            value,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }

    /// Replace the value, keeping where it came from.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ExtractionMatch<U> {
        ExtractionMatch {
            value: f(self.value),
            position: self.position,
            source: self.source,
        }
    }
}

/// Payslip fields known to the extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Employee name.
    Name,
    /// CPF.
    TaxId,
    /// Net pay.
    NetValue,
}

impl Field {
    /// Key used for this field in the wire format.
    pub fn key(self) -> &'static str {
        match self {
            Field::Name => "nome",
            Field::TaxId => "cpf",
            Field::NetValue => "valor_liquido",
        }
    }
}

/// A labelled pattern whose first capture group holds the field value.
#[derive(Debug)]
pub struct FieldRule {
    pub field: Field,
    pattern: &'static Regex,
}

impl FieldRule {
    pub fn new(field: Field, pattern: &'static Regex) -> Self {
        Self { field, pattern }
    }

    /// First match anywhere in `text`, with the capture trimmed.
    pub fn find(&self, text: &str) -> Option<ExtractionMatch<String>> {
        self.pattern.captures(text).and_then(Self::to_match)
    }

    /// Every match in `text`, in order of appearance.
    pub fn find_all(&self, text: &str) -> Vec<ExtractionMatch<String>> {
        self.pattern
            .captures_iter(text)
            .filter_map(Self::to_match)
            .collect()
    }

    fn to_match(caps: Captures<'_>) -> Option<ExtractionMatch<String>> {
        let full = caps.get(0)?;
        let value = caps.get(1)?.as_str().trim().to_string();
        Some(ExtractionMatch::new(value, full.as_str()).with_position(full.start(), full.end()))
    }
}

lazy_static! {
    pub static ref NAME_RULE: FieldRule = FieldRule::new(Field::Name, &EMPLOYEE_NAME);
    pub static ref CPF_RULE: FieldRule = FieldRule::new(Field::TaxId, &CPF_LABELED);
    pub static ref NET_PAY_RULE: FieldRule = FieldRule::new(Field::NetValue, &NET_PAY);

    /// All rules, in output order.
    pub static ref FIELD_RULES: [&'static FieldRule; 3] = [&*NAME_RULE, &*CPF_RULE, &*NET_PAY_RULE];
}
