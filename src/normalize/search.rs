//! Instant-answer search API responses.

use log::debug;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::model::{QueryResult, Section};

use super::{clean_line, Normalize, NormalizeOptions};

/// Flat instant-answer object with abstract, definition, related topics and
/// results.
///
/// Decoding is lenient field by field: a field of the wrong JSON type reads as
/// absent, so one bad field never hides the others.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResponse {
    /// Topic heading, used in the abstract title
    #[serde(rename = "Heading", deserialize_with = "lenient_string")]
    pub heading: Option<String>,

    /// Abstract source link; the abstract exists only when this is non-empty
    #[serde(rename = "AbstractURL", deserialize_with = "lenient_string")]
    pub abstract_url: Option<String>,

    /// Abstract body
    #[serde(rename = "AbstractText", deserialize_with = "lenient_string")]
    pub abstract_text: Option<String>,

    /// Abstract source name (e.g. "Wikipedia")
    #[serde(rename = "AbstractSource", deserialize_with = "lenient_string")]
    pub abstract_source: Option<String>,

    /// Abstract image URL
    #[serde(rename = "Image", deserialize_with = "lenient_string")]
    pub image: Option<String>,

    /// Dictionary definition
    #[serde(rename = "Definition", deserialize_with = "lenient_string")]
    pub definition: Option<String>,

    /// Definition source name
    #[serde(rename = "DefinitionSource", deserialize_with = "lenient_string")]
    pub definition_source: Option<String>,

    /// Definition source link
    #[serde(rename = "DefinitionURL", deserialize_with = "lenient_string")]
    pub definition_url: Option<String>,

    /// Related topics, in response order
    #[serde(rename = "RelatedTopics", deserialize_with = "lenient_topics")]
    pub related_topics: Vec<Topic>,

    /// Direct results, in response order
    #[serde(rename = "Results", deserialize_with = "lenient_topics")]
    pub results: Vec<Topic>,
}

/// A related topic or result entry.
///
/// Every field is optional: topic groups (`{"Name": ..., "Topics": [...]}`)
/// decode with no text and are skipped during normalization.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Topic {
    /// Entry text
    #[serde(rename = "Text")]
    pub text: Option<String>,

    /// Entry link
    #[serde(rename = "FirstURL")]
    pub first_url: Option<String>,

    /// Entry icon
    #[serde(rename = "Icon")]
    pub icon: Option<Icon>,
}

/// Topic icon.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Icon {
    /// Icon image URL; often empty
    #[serde(rename = "URL")]
    pub url: Option<String>,
}

/// Decode a string field, reading any non-string value as absent.
fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(Some(s)),
        _ => Ok(None),
    }
}

/// Decode a topic list, dropping entries that are not topic objects.
///
/// Anything other than an array reads as an empty list.
fn lenient_topics<'de, D>(deserializer: D) -> std::result::Result<Vec<Topic>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Array(raw) = Value::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };
    Ok(raw
        .into_iter()
        .filter_map(|v| Topic::deserialize(v).ok())
        .collect())
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

impl Topic {
    /// Create a topic with text and link.
    pub fn new(text: impl Into<String>, first_url: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            first_url: Some(first_url.into()),
            icon: None,
        }
    }

    /// Attach an icon and return self.
    pub fn with_icon(mut self, url: impl Into<String>) -> Self {
        self.icon = Some(Icon {
            url: Some(url.into()),
        });
        self
    }

    /// Markdown link entry, or `None` when text or link is missing.
    fn entry(&self) -> Option<String> {
        let text = self.text.as_deref()?;
        let url = self.first_url.as_deref()?;
        Some(format!("[**{}**]({})", text, url))
    }

    fn icon_url(&self) -> Option<&str> {
        self.icon.as_ref().and_then(|i| non_empty(&i.url))
    }
}

impl SearchResponse {
    /// Decode a search response from a JSON value.
    pub fn from_value(value: &Value) -> Result<Self> {
        Ok(Self::deserialize(value)?)
    }

    fn abstract_section(&self, options: &NormalizeOptions) -> Option<Section> {
        let url = non_empty(&self.abstract_url)?;
        let title = format!(
            "Abstract: {} ({})",
            self.heading.as_deref().unwrap_or_default(),
            self.abstract_source.as_deref().unwrap_or_default()
        );
        let text = format!(
            "{}\n\n{}",
            self.abstract_text.as_deref().unwrap_or_default(),
            url
        );

        let mut section = Section::titled(title).line(clean_line(&text, options));
        if let Some(image) = non_empty(&self.image) {
            section.push_image(image);
        }
        Some(section)
    }

    fn definition_section(&self, options: &NormalizeOptions) -> Option<Section> {
        let definition = non_empty(&self.definition)?;
        let text = format!(
            "{}\n([{}]({}))",
            definition,
            self.definition_source.as_deref().unwrap_or_default(),
            self.definition_url.as_deref().unwrap_or_default()
        );
        Some(Section::titled("Definition").line(clean_line(&text, options)))
    }

    fn list_section(
        title: &str,
        topics: &[Topic],
        options: &NormalizeOptions,
    ) -> Option<Section> {
        let mut section = Section::titled(title);
        // Length of the entries joined by newlines, in characters.
        let mut joined_len = 0usize;

        for entry in topics.iter().filter_map(Topic::entry) {
            if joined_len > options.text_budget {
                debug!("{}: text budget of {} reached", title, options.text_budget);
                break;
            }
            let entry = clean_line(&entry, options);
            if !section.lines.is_empty() {
                joined_len += 1;
            }
            joined_len += entry.chars().count();
            section.push_line(entry);
        }

        if section.lines.is_empty() {
            return None;
        }
        if let Some(icon) = topics.first().and_then(Topic::icon_url) {
            section.push_image(icon);
        }
        Some(section)
    }
}

impl Normalize for SearchResponse {
    fn normalize(&self, options: &NormalizeOptions) -> Result<QueryResult> {
        let sections = [
            self.abstract_section(options),
            self.definition_section(options),
            Self::list_section("Related", &self.related_topics, options),
            Self::list_section("Top Results", &self.results, options),
        ];

        let result = QueryResult::new(sections.into_iter().flatten());
        if result.is_empty() {
            return Err(Error::NoResultsFound);
        }
        Ok(result)
    }
}
