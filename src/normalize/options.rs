//! Normalization options.

use serde::{Deserialize, Serialize};

/// Default character budget for aggregated related-topics/results text.
pub const DEFAULT_TEXT_BUDGET: usize = 1000;

/// Options for normalizing upstream responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeOptions {
    /// Character budget for aggregated list sections (related topics, results)
    pub text_budget: usize,

    /// Normalize Unicode to NFC form
    pub normalize_unicode: bool,
}

impl NormalizeOptions {
    /// Create new normalize options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the aggregated text budget.
    pub fn with_text_budget(mut self, budget: usize) -> Self {
        self.text_budget = budget;
        self
    }

    /// Enable or disable NFC normalization of lines.
    pub fn with_unicode_normalization(mut self, enabled: bool) -> Self {
        self.normalize_unicode = enabled;
        self
    }
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            text_budget: DEFAULT_TEXT_BUDGET,
            normalize_unicode: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_options_builder() {
        let options = NormalizeOptions::new()
            .with_text_budget(50)
            .with_unicode_normalization(false);

        assert_eq!(options.text_budget, 50);
        assert!(!options.normalize_unicode);
    }

    #[test]
    fn test_normalize_options_partial_json() {
        let options: NormalizeOptions = serde_json::from_str(r#"{"text_budget": 10}"#).unwrap();
        assert_eq!(options.text_budget, 10);
        assert!(options.normalize_unicode);
    }
}
