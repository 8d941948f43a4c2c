//! Employee name extraction.

use super::{ExtractionMatch, FieldExtractor, NAME_RULE};

/// Employee name field extractor.
pub struct NameExtractor;

impl NameExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NameExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for NameExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        NAME_RULE.find(text)
    }
}

/// Extract the employee name, or `""` when the label is missing.
pub fn extract_name(text: &str) -> String {
    NameExtractor::new()
        .extract(text)
        .map(|m| m.value)
        .unwrap_or_default()
}
