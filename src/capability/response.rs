use anyhow::{Context, Result};
use serde_json::Value;

/// A snapshot of a proxied HTTP response. The body is captured up front so
/// `json()` and `text()` can each be called any number of times without
/// consuming anything.
#[derive(Clone, Debug)]
pub struct ProxyResponse {
    status: u16,
    status_text: String,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl ProxyResponse {
    pub fn new(
        status: u16,
        status_text: impl Into<String>,
        headers: Vec<(String, String)>,
        body: Vec<u8>,
    ) -> Self {
        let headers = headers
            .into_iter()
            .map(|(name, value)| (name.to_ascii_lowercase(), value))
            .collect();
        Self {
            status,
            status_text: status_text.into(),
            headers,
            body,
        }
    }

    pub(super) async fn from_reqwest(resp: reqwest::Response) -> Result<Self> {
        let status = resp.status();
        let status_text = status.canonical_reason().unwrap_or("").to_string();
        let headers = resp
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = resp.bytes().await.context("read response body")?.to_vec();
        Ok(Self::new(status.as_u16(), status_text, headers, body))
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    /// Case-insensitive header lookup; first match wins.
    pub fn header(&self, name: &str) -> Option<&str> {
        let wanted = name.to_ascii_lowercase();
        self.headers
            .iter()
            .find(|(n, _)| *n == wanted)
            .map(|(_, v)| v.as_str())
    }

    pub fn json(&self) -> Result<Value> {
        serde_json::from_slice(&self.body).context("parse response body as JSON")
    }

    pub fn text(&self) -> Result<String> {
        String::from_utf8(self.body.clone()).context("decode response body as UTF-8")
    }
}
