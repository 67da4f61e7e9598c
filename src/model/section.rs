//! Section and query result types.

use serde::{Deserialize, Serialize};

/// One logical chunk of an answer.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Section {
    /// Section heading (pod title, "Definition", ...)
    pub title: Option<String>,

    /// Row-oriented text lines; a line may span several physical lines
    pub lines: Vec<String>,

    /// Image references discovered for this section, in discovery order
    pub images: Vec<String>,
}

impl Section {
    /// Create an untitled, empty section.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty section with a title.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Create a section holding a single line.
    pub fn with_line(line: impl Into<String>) -> Self {
        Self {
            lines: vec![line.into()],
            ..Self::default()
        }
    }

    /// Append a line and return self.
    pub fn line(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }

    /// Append an image reference and return self.
    pub fn image(mut self, url: impl Into<String>) -> Self {
        self.images.push(url.into());
        self
    }

    /// Append a line.
    pub fn push_line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Append an image reference.
    pub fn push_image(&mut self, url: impl Into<String>) {
        self.images.push(url.into());
    }

    /// First image reference, if any.
    pub fn image_url(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Check whether the section carries any text.
    pub fn has_text(&self) -> bool {
        self.lines.iter().any(|l| !l.trim().is_empty())
    }

    /// A section with no text and no image is semantically empty.
    pub fn is_empty(&self) -> bool {
        !self.has_text() && self.images.iter().all(|u| u.trim().is_empty())
    }
}

/// The normalized answer to one query.
///
/// Built once and never mutated afterwards; empty sections are dropped on
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "QueryResultRepr")]
pub struct QueryResult {
    sections: Vec<Section>,
}

/// Wire form of [`QueryResult`]; decoding goes through [`QueryResult::new`].
#[derive(Deserialize)]
struct QueryResultRepr {
    #[serde(default)]
    sections: Vec<Section>,
}

impl From<QueryResultRepr> for QueryResult {
    fn from(repr: QueryResultRepr) -> Self {
        QueryResult::new(repr.sections)
    }
}

impl QueryResult {
    /// Build a result from sections, discarding empty ones.
    pub fn new(sections: impl IntoIterator<Item = Section>) -> Self {
        Self {
            sections: sections.into_iter().filter(|s| !s.is_empty()).collect(),
        }
    }

    /// Sections in answer order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Check if there are no sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// All lines of all sections, ignoring section grouping.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.sections
            .iter()
            .flat_map(|s| s.lines.iter().map(String::as_str))
    }
}

impl FromIterator<Section> for QueryResult {
    fn from_iter<I: IntoIterator<Item = Section>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_drops_empty_sections() {
        let result: QueryResult = serde_json::from_str(
            r#"{"sections":[{"title":null,"lines":[],"images":[]},{"title":"Result","lines":["4"],"images":[]}]}"#,
        )
        .unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result.sections()[0].title.as_deref(), Some("Result"));
    }

    #[test]
    fn test_section_builder() {
        let section = Section::titled("Result").line("4").image("http://img/1.gif");
        assert_eq!(section.title.as_deref(), Some("Result"));
        assert_eq!(section.lines, vec!["4"]);
        assert_eq!(section.image_url(), Some("http://img/1.gif"));
        assert!(!section.is_empty());
    }

    #[test]
    fn test_section_empty() {
        assert!(Section::new().is_empty());
        assert!(Section::titled("Only a title").is_empty());
        assert!(Section::with_line("   ").is_empty());
        assert!(!Section::new().image("http://img").is_empty());
    }

    #[test]
    fn test_query_result_drops_empty_sections() {
        let result = QueryResult::new(vec![
            Section::with_line("a"),
            Section::titled("empty"),
            Section::new().image("http://img"),
        ]);
        assert_eq!(result.len(), 2);
        assert_eq!(result.sections()[0].lines, vec!["a"]);
    }

    #[test]
    fn test_query_result_lines() {
        let result: QueryResult = vec![
            Section::with_line("a").line("b"),
            Section::with_line("c"),
        ]
        .into_iter()
        .collect();
        assert_eq!(result.lines().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    }
}
