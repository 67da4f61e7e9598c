//! Hastebin-compatible paste client.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::Deserialize;

use answerkit::{Error, PasteUploader};

/// Reply of `POST /documents`.
#[derive(Debug, Deserialize)]
struct DocumentKey {
    key: String,
}

/// Uploads text to a hastebin-style service (`POST {base}/documents`).
pub struct HastebinClient {
    client: Client,
    base_url: String,
}

impl HastebinClient {
    /// Create a client for the given service base URL.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> reqwest::Result<Self> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: base_url.into(),
        })
    }

    fn documents_url(&self) -> String {
        format!("{}/documents", self.base_url.trim_end_matches('/'))
    }
}

fn upload_error(err: reqwest::Error) -> Error {
    Error::Upload(err.to_string())
}

#[async_trait]
impl PasteUploader for HastebinClient {
    async fn upload(&self, text: &str) -> answerkit::Result<String> {
        let url = self.documents_url();
        debug!("uploading {} bytes to {}", text.len(), url);

        let res = self
            .client
            .post(url)
            .body(text.to_string())
            .send()
            .await
            .map_err(upload_error)?;
        let doc: DocumentKey = res
            .error_for_status()
            .map_err(upload_error)?
            .json()
            .await
            .map_err(upload_error)?;
        Ok(doc.key)
    }
}
