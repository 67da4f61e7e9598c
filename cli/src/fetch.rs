//! Upstream API clients.

use std::time::Duration;

use log::debug;
use reqwest::Client;
use serde_json::Value;

use answerkit::{RawResponse, ResponseKind};

const WOLFRAM_QUERY_URL: &str = "https://api.wolframalpha.com/v2/query";
const WOLFRAM_RESULT_URL: &str = "https://api.wolframalpha.com/v2/result";
const DUCKDUCKGO_URL: &str = "https://api.duckduckgo.com";

type FetchResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Clients for the knowledge engine and the instant-answer search API.
pub struct Upstream {
    client: Client,
    app_name: String,
}

impl Upstream {
    /// Create clients sharing one HTTP connection pool.
    pub fn new(timeout: Duration, app_name: impl Into<String>) -> reqwest::Result<Self> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            app_name: app_name.into(),
        })
    }

    /// Full pod tree for a query.
    pub async fn wolfram(&self, appid: &str, query: &str) -> FetchResult<RawResponse> {
        debug!("wolfram query: {}", query);
        let value: Value = self
            .client
            .get(WOLFRAM_QUERY_URL)
            .query(&[("input", query), ("appid", appid), ("output", "json")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(RawResponse::from_value(&value, ResponseKind::PodTree)?)
    }

    /// One-line short answer for a query.
    ///
    /// The endpoint answers "no short answer" with an error status but a
    /// meaningful body, so the status is not checked.
    pub async fn wolfram_short(&self, appid: &str, query: &str) -> FetchResult<String> {
        debug!("wolfram short answer: {}", query);
        let text = self
            .client
            .get(WOLFRAM_RESULT_URL)
            .query(&[("i", query), ("appid", appid)])
            .send()
            .await?
            .text()
            .await?;
        Ok(text)
    }

    /// Instant answer for a query.
    pub async fn duckduckgo(&self, query: &str) -> FetchResult<RawResponse> {
        debug!("duckduckgo query: {}", query);
        // Served as application/x-javascript, so decode the body by hand.
        let body = self
            .client
            .get(DUCKDUCKGO_URL)
            .query(&[
                ("q", query),
                ("t", self.app_name.as_str()),
                ("format", "json"),
                ("no_html", "1"),
            ])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(RawResponse::from_json_str_as(&body, ResponseKind::Search)?)
    }
}
