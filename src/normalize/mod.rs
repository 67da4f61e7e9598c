//! Response normalization.
//!
//! Upstream services answer in unrelated shapes. Each shape is a variant of
//! [`RawResponse`] with an explicit, total mapping onto a [`QueryResult`].
//!
//! # Example
//!
//! ```
//! use answerkit::normalize::{normalize, NormalizeOptions, RawResponse};
//!
//! let raw = RawResponse::from_json_str(
//!     r#"{"pods": [{"title": "Result", "subpods": [{"plaintext": "4"}]}]}"#,
//! )?;
//! let result = normalize(&raw, &NormalizeOptions::default())?;
//! assert_eq!(result.sections()[0].lines, vec!["4"]);
//! # Ok::<(), answerkit::Error>(())
//! ```

mod options;
mod pod_tree;
mod search;

pub use options::{NormalizeOptions, DEFAULT_TEXT_BUDGET};
pub use pod_tree::{ImageRef, Pod, PodTree, Subpod};
pub use search::{Icon, SearchResponse, Topic};

use serde_json::Value;
use unicode_normalization::UnicodeNormalization;

use crate::error::{Error, Result};
use crate::model::QueryResult;

/// A shape that can be flattened into sections.
pub trait Normalize {
    /// Map this response onto an ordered sequence of sections.
    ///
    /// Returns [`Error::NoResultsFound`] when the response holds no usable
    /// structure.
    fn normalize(&self, options: &NormalizeOptions) -> Result<QueryResult>;
}

/// Which upstream shape a raw payload is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    /// Knowledge-engine pod tree
    PodTree,
    /// Instant-answer search object
    Search,
}

/// A raw upstream response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawResponse {
    /// Knowledge-engine pod tree
    PodTree(PodTree),
    /// Instant-answer search object
    Search(SearchResponse),
}

impl RawResponse {
    /// Which variant this is.
    pub fn kind(&self) -> ResponseKind {
        match self {
            RawResponse::PodTree(_) => ResponseKind::PodTree,
            RawResponse::Search(_) => ResponseKind::Search,
        }
    }

    /// Decode a JSON payload, detecting its shape.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(s)?;
        Self::from_value(&value, detect_kind(&value)?)
    }

    /// Decode a JSON payload as the given shape.
    pub fn from_json_str_as(s: &str, kind: ResponseKind) -> Result<Self> {
        let value: Value = serde_json::from_str(s)?;
        Self::from_value(&value, kind)
    }

    /// Build a response from an already parsed JSON value.
    pub fn from_value(value: &Value, kind: ResponseKind) -> Result<Self> {
        match kind {
            ResponseKind::PodTree => Ok(RawResponse::PodTree(PodTree::from_value(value))),
            ResponseKind::Search => Ok(RawResponse::Search(SearchResponse::from_value(value)?)),
        }
    }
}

impl Normalize for RawResponse {
    fn normalize(&self, options: &NormalizeOptions) -> Result<QueryResult> {
        match self {
            RawResponse::PodTree(tree) => tree.normalize(options),
            RawResponse::Search(search) => search.normalize(options),
        }
    }
}

impl From<PodTree> for RawResponse {
    fn from(tree: PodTree) -> Self {
        RawResponse::PodTree(tree)
    }
}

impl From<SearchResponse> for RawResponse {
    fn from(search: SearchResponse) -> Self {
        RawResponse::Search(search)
    }
}

/// Normalize a raw response into a query result.
pub fn normalize(raw: &RawResponse, options: &NormalizeOptions) -> Result<QueryResult> {
    raw.normalize(options)
}

/// Guess the shape of a JSON payload.
///
/// Objects with `pods` or a `queryresult` envelope are pod trees; any other
/// object is treated as a search response.
pub fn detect_kind(value: &Value) -> Result<ResponseKind> {
    let Some(obj) = value.as_object() else {
        return Err(Error::Other("Response is not a JSON object".into()));
    };
    if obj.contains_key("pods") || obj.contains_key("queryresult") {
        Ok(ResponseKind::PodTree)
    } else {
        Ok(ResponseKind::Search)
    }
}

pub(crate) fn clean_line(text: &str, options: &NormalizeOptions) -> String {
    if options.normalize_unicode {
        text.nfc().collect()
    } else {
        text.to_string()
    }
}
