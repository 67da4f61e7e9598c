//! # answerkit
//!
//! Turn knowledge-engine and search API answers into chat-sized output.
//!
//! Upstream responses come in unrelated shapes. This library flattens them
//! into ordered [`Section`]s, tries to lay them out as an aligned table, and
//! falls back to flat text or a paste-service link when the table is not
//! possible or the text does not fit the transport. Images are split off
//! into their own paged sequence.
//!
//! ## Quick Start
//!
//! ```
//! use answerkit::{normalize_json, render_text, NormalizeOptions};
//!
//! let result = normalize_json(
//!     r#"{"pods": [{"subpods": [{"plaintext": "4"}]}, {"subpods": [{"plaintext": "2+2=4"}]}]}"#,
//!     &NormalizeOptions::default(),
//! )?;
//! let table = render_text(&result);
//! assert!(table.contains("| 2+2=4 |"));
//! # Ok::<(), answerkit::Error>(())
//! ```
//!
//! ## Features
//!
//! - **Two upstream shapes**: pod trees and instant-answer search objects
//! - **Table first**: uniform rows render as an ASCII grid in a code block
//! - **Overflow-safe**: flat text, then paste links, never an oversized send
//! - **Images apart**: ordered, duplicate-preserving image pages

pub mod error;
pub mod model;
pub mod normalize;
pub mod paste;
pub mod pipeline;
pub mod quick;
pub mod render;
pub mod transport;

// Re-export commonly used types
pub use error::{Error, Result};
pub use model::{QueryResult, Section};
pub use normalize::{NormalizeOptions, PodTree, RawResponse, ResponseKind, SearchResponse};
pub use paste::PasteUploader;
pub use pipeline::{Answer, Outcome, Pipeline, PipelineConfig};
pub use render::{
    ImagePages, Layout, OverflowDispatcher, RenderKind, RenderOptions, RenderedText, TableOutcome,
};
pub use transport::{clean_content, ImagePager, Transport};

/// Decode and normalize a raw JSON response, detecting its shape.
pub fn normalize_json(json: &str, options: &NormalizeOptions) -> Result<QueryResult> {
    let raw = RawResponse::from_json_str(json)?;
    normalize::normalize(&raw, options)
}

/// Render a result as a table, or as flat text when it is not tabular.
///
/// No size limit is applied; use [`OverflowDispatcher`] for bounded output.
pub fn render_text(result: &QueryResult) -> String {
    match render::to_table(result) {
        TableOutcome::Table(table) => table.text,
        TableOutcome::StructuralFallback(_) => render::to_flat_text(result, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_json_pod_tree() {
        let result = normalize_json(
            r#"{"pods": [{"title": "Result", "subpods": [{"plaintext": "4"}]}]}"#,
            &NormalizeOptions::default(),
        )
        .unwrap();
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_normalize_json_search() {
        let result = normalize_json(
            r#"{"Definition": "A number", "DefinitionSource": "Wiki", "DefinitionURL": "http://x"}"#,
            &NormalizeOptions::default(),
        )
        .unwrap();
        assert_eq!(result.sections()[0].title.as_deref(), Some("Definition"));
    }

    #[test]
    fn test_normalize_json_no_results() {
        let result = normalize_json(r#"{"queryresult": {"success": false}}"#, &Default::default());
        assert!(matches!(result, Err(Error::NoResultsFound)));
    }

    #[test]
    fn test_render_text_fallback() {
        let result = QueryResult::new(vec![
            Section::with_line("4"),
            Section::with_line("a").line("b"),
        ]);
        assert_eq!(render_text(&result), "```\n4\n\na\n\nb\n```");
    }

    #[test]
    fn test_render_text_empty() {
        assert_eq!(render_text(&QueryResult::default()), "");
    }
}
