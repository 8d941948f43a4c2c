//! CPF (Brazilian individual taxpayer number) extraction and validation.

use super::{ExtractionMatch, FieldExtractor, CPF_RULE};

/// CPF field extractor.
pub struct CpfExtractor {
    validate: bool,
}

impl CpfExtractor {
    /// Create a new CPF extractor. Validation is off by default.
    pub fn new() -> Self {
        Self { validate: false }
    }

    /// Set whether to drop CPFs with wrong check digits.
    pub fn with_validation(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }
}

impl Default for CpfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for CpfExtractor {
    type Output = ExtractionMatch<String>;

    /// With validation on, the first CPF whose check digits match.
    fn extract(&self, text: &str) -> Option<Self::Output> {
        CPF_RULE
            .find_all(text)
            .into_iter()
            .find(|m| !self.validate || validate_cpf(&m.value))
    }
}

/// Extract the CPF as printed, or `""` when the label is missing.
pub fn extract_cpf(text: &str) -> String {
    CpfExtractor::new()
        .extract(text)
        .map(|m| m.value)
        .unwrap_or_default()
}

/// Validate a CPF using its two mod-11 check digits.
///
/// Punctuation is ignored. Numbers made of one repeated digit pass the
/// checksum but are not issued, so they are rejected.
pub fn validate_cpf(cpf: &str) -> bool {
    let digits: Vec<u32> = cpf.chars().filter_map(|c| c.to_digit(10)).collect();

    if digits.len() != 11 {
        return false;
    }

    if digits.iter().all(|&d| d == digits[0]) {
        return false;
    }

    let check_digit = |len: usize| -> u32 {
        let sum: u32 = digits
            .iter()
            .take(len)
            .enumerate()
            .map(|(i, d)| d * (len as u32 + 1 - i as u32))
            .sum();
        (sum * 10) % 11 % 10
    };

    check_digit(9) == digits[9] && check_digit(10) == digits[10]
}

/// Format CPF as XXX.XXX.XXX-XX.
pub fn format_cpf(cpf: &str) -> String {
    let digits: String = cpf.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.len() != 11 {
        return cpf.to_string();
    }

    format!(
        "{}.{}.{}-{}",
        &digits[0..3],
        &digits[3..6],
        &digits[6..9],
        &digits[9..11]
    )
}
