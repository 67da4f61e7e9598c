//! Rendering options and configuration.

use serde::{Deserialize, Serialize};

/// Default transport message limit in bytes.
pub const DEFAULT_MAX_LEN: usize = 2000;

/// Default paste service base URL.
pub const DEFAULT_PASTE_BASE_URL: &str = "https://hastebin.com";

/// Options for rendering and bounding answer text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Maximum message length the transport accepts, in bytes
    pub max_len: usize,

    /// Base URL paste keys are appended to
    pub paste_base_url: String,

    /// Language tag for the monospace code block (empty = none)
    pub code_block_lang: String,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the transport size limit.
    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = max_len;
        self
    }

    /// Set the paste service base URL.
    pub fn with_paste_base_url(mut self, url: impl Into<String>) -> Self {
        self.paste_base_url = url.into();
        self
    }

    /// Set the code block language tag.
    pub fn with_code_block_lang(mut self, lang: impl Into<String>) -> Self {
        self.code_block_lang = lang.into();
        self
    }

    /// Format a paste link for a key returned by the paste service.
    pub fn paste_link(&self, key: &str) -> String {
        format!("{}/{}", self.paste_base_url.trim_end_matches('/'), key)
    }

    /// Check whether text fits the transport limit.
    pub fn fits(&self, text: &str) -> bool {
        text.len() <= self.max_len
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            max_len: DEFAULT_MAX_LEN,
            paste_base_url: DEFAULT_PASTE_BASE_URL.to_string(),
            code_block_lang: String::new(),
        }
    }
}
