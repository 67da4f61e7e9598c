//! Knowledge-engine pod tree responses.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::model::{QueryResult, Section};

use super::{clean_line, Normalize, NormalizeOptions};

/// A pod/subpod tree as returned by a computational-knowledge engine.
///
/// `pods` is `None` when the upstream structure was absent or could not be
/// traversed; that is reported as [`Error::NoResultsFound`], while an empty
/// pod list is a valid, empty answer.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PodTree {
    /// Top-level answer groups
    pub pods: Option<Vec<Pod>>,
}

/// A top-level answer group.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Pod {
    /// Pod title (e.g. "Input interpretation")
    #[serde(default)]
    pub title: Option<String>,

    /// Leaf results of this pod
    pub subpods: Vec<Subpod>,
}

/// A leaf result inside a pod.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Subpod {
    /// Plain-text rendition, if the engine produced one
    #[serde(default)]
    pub plaintext: Option<String>,

    /// Image descriptor
    #[serde(default, alias = "img")]
    pub image: Option<ImageRef>,
}

/// Image descriptor of a subpod.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImageRef {
    /// Image URL
    #[serde(default)]
    pub src: Option<String>,
}

impl PodTree {
    /// Create a tree from pods.
    pub fn new(pods: Vec<Pod>) -> Self {
        Self { pods: Some(pods) }
    }

    /// A tree whose structure could not be traversed.
    pub fn missing() -> Self {
        Self { pods: None }
    }

    /// Build a tree from a JSON value.
    ///
    /// Accepts both a bare `{"pods": [...]}` object and the engine's
    /// `{"queryresult": {...}}` envelope. Shape errors never fail here; they
    /// leave `pods` unset.
    pub fn from_value(value: &Value) -> Self {
        let root = value.get("queryresult").unwrap_or(value);
        let Some(pods) = root.get("pods") else {
            debug!("pod tree has no pods field");
            return Self::missing();
        };

        match Vec::<Pod>::deserialize(pods) {
            Ok(pods) => Self::new(pods),
            Err(e) => {
                warn!("malformed pod tree: {}", e);
                Self::missing()
            }
        }
    }
}

impl Pod {
    /// Create a pod with subpods.
    pub fn new(title: Option<&str>, subpods: Vec<Subpod>) -> Self {
        Self {
            title: title.map(str::to_string),
            subpods,
        }
    }
}

impl Subpod {
    /// Create a text-only subpod.
    pub fn text(plaintext: impl Into<String>) -> Self {
        Self {
            plaintext: Some(plaintext.into()),
            image: None,
        }
    }

    /// Create an image-only subpod.
    pub fn image(src: impl Into<String>) -> Self {
        Self {
            plaintext: None,
            image: Some(ImageRef {
                src: Some(src.into()),
            }),
        }
    }

    /// Attach an image and return self.
    pub fn with_image(mut self, src: impl Into<String>) -> Self {
        self.image = Some(ImageRef {
            src: Some(src.into()),
        });
        self
    }

    fn image_src(&self) -> Option<&str> {
        self.image
            .as_ref()
            .and_then(|i| i.src.as_deref())
            .filter(|s| !s.trim().is_empty())
    }
}

impl Normalize for PodTree {
    fn normalize(&self, options: &NormalizeOptions) -> Result<QueryResult> {
        let pods = self.pods.as_ref().ok_or(Error::NoResultsFound)?;

        let sections = pods.iter().map(|pod| {
            let mut section = Section {
                title: pod.title.clone(),
                ..Section::default()
            };
            for sub in &pod.subpods {
                if let Some(text) = sub.plaintext.as_deref().filter(|t| !t.is_empty()) {
                    section.push_line(clean_line(text, options));
                }
                if let Some(src) = sub.image_src() {
                    section.push_image(src);
                }
            }
            section
        });

        let result = QueryResult::new(sections);
        debug!(
            "pod tree: {} pods -> {} sections",
            pods.len(),
            result.len()
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pods_become_sections() {
        let tree = PodTree::new(vec![
            Pod::new(Some("Input"), vec![Subpod::text("2+2")]),
            Pod::new(
                Some("Result"),
                vec![Subpod::text("4").with_image("http://img/4.gif")],
            ),
        ]);

        let result = tree.normalize(&NormalizeOptions::default()).unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(result.sections()[0].title.as_deref(), Some("Input"));
        assert_eq!(result.sections()[1].lines, vec!["4"]);
        assert_eq!(result.sections()[1].images, vec!["http://img/4.gif"]);
    }

    #[test]
    fn test_images_are_not_inlined() {
        let tree = PodTree::new(vec![Pod::new(
            None,
            vec![Subpod::image("http://img/a.gif"), Subpod::image("http://img/b.gif")],
        )]);

        let result = tree.normalize(&NormalizeOptions::default()).unwrap();
        let section = &result.sections()[0];
        assert!(section.lines.is_empty());
        assert_eq!(section.images.len(), 2);
    }

    #[test]
    fn test_empty_plaintext_skipped() {
        let tree = PodTree::new(vec![Pod::new(
            None,
            vec![Subpod::text(""), Subpod::text("x")],
        )]);
        let result = tree.normalize(&NormalizeOptions::default()).unwrap();
        assert_eq!(result.sections()[0].lines, vec!["x"]);
    }

    #[test]
    fn test_missing_pods_is_no_results() {
        let result = PodTree::missing().normalize(&NormalizeOptions::default());
        assert!(matches!(result, Err(Error::NoResultsFound)));
    }

    #[test]
    fn test_empty_pods_is_valid() {
        let result = PodTree::new(vec![])
            .normalize(&NormalizeOptions::default())
            .unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_from_value_envelope_and_img_alias() {
        let value = json!({
            "queryresult": {
                "success": true,
                "pods": [
                    {"title": "Plot", "subpods": [{"plaintext": "", "img": {"src": "http://p.gif", "alt": "plot"}}]}
                ]
            }
        });
        let tree = PodTree::from_value(&value);
        let result = tree.normalize(&NormalizeOptions::default()).unwrap();
        assert_eq!(result.sections()[0].images, vec!["http://p.gif"]);
    }

    #[test]
    fn test_from_value_malformed() {
        let value = json!({"pods": "not a list"});
        assert_eq!(PodTree::from_value(&value), PodTree::missing());

        let value = json!({"pods": [{"title": "no subpods"}]});
        assert_eq!(PodTree::from_value(&value), PodTree::missing());

        let value = json!({"queryresult": {"success": false}});
        assert_eq!(PodTree::from_value(&value), PodTree::missing());
    }
}
