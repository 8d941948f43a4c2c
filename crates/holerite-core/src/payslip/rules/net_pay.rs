//! Net pay extraction and Brazilian amount normalization.

use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::trace;

use super::{ExtractionMatch, FieldExtractor, NET_PAY_RULE};

/// Net pay ("salário líquido") field extractor.
pub struct NetPayExtractor;

impl NetPayExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NetPayExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for NetPayExtractor {
    type Output = ExtractionMatch<Decimal>;

    /// Only the first labelled amount is considered; if it does not parse,
    /// the field is absent.
    fn extract(&self, text: &str) -> Option<Self::Output> {
        let found = NET_PAY_RULE.find(text)?;
        let amount = normalize_br_amount(Some(&found.value));
        if amount.is_none() {
            trace!("Unparseable net pay amount: {:?}", found.value);
        }
        amount.map(|value| found.map(|_| value))
    }
}

/// Extract the net pay amount.
pub fn extract_net_pay(text: &str) -> Option<Decimal> {
    NetPayExtractor::new().extract(text).map(|m| m.value)
}

/// Parse a Brazilian-formatted amount (e.g., "2.987,32").
///
/// Every `.` is a thousands separator and `,` is the decimal separator.
/// Best effort: anything that doesn't parse yields `None`.
pub fn normalize_br_amount(raw: Option<&str>) -> Option<Decimal> {
    let raw = raw?;
    if raw.is_empty() {
        return None;
    }

    let normalized = raw.replace('.', "").replace(',', ".");
    Decimal::from_str(normalized.trim()).ok()
}
