//! Flat text rendering.

use crate::model::QueryResult;

/// Wrap text in a monospace code block.
///
/// Blank input yields an empty string rather than an empty block.
pub fn code_block(text: &str, lang: &str) -> String {
    if text.trim().is_empty() {
        return String::new();
    }
    format!("```{}\n{}\n```", lang, text)
}

/// Join every line of every section with a blank line, ignoring grouping.
pub fn flatten(result: &QueryResult) -> String {
    result.lines().collect::<Vec<_>>().join("\n\n")
}

/// Flatten a result and wrap it as a flat text block.
pub fn to_flat_text(result: &QueryResult, lang: &str) -> String {
    code_block(&flatten(result), lang)
}
