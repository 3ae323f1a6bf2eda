use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;

use crate::config::HostConfig;

use super::{Capability, FetchOptions, ProxyResponse, UiSurface};

/// Capability gateway backed by a real host over HTTP with bearer auth.
pub struct HostCapability {
    config: HostConfig,
    client: reqwest::Client,
    ui: Option<Arc<dyn UiSurface>>,
}

impl HostCapability {
    pub fn new(config: HostConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("opconsole")
            .build()
            .context("build reqwest client")?;
        Ok(Self {
            config,
            client,
            ui: None,
        })
    }

    /// Attach a UI surface (the embedding front-end's toast/modal handles).
    pub fn with_ui(mut self, ui: Arc<dyn UiSurface>) -> Self {
        self.ui = Some(ui);
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}/openapi{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn auth(&self) -> String {
        format!("Bearer {}", self.config.token)
    }
}

#[async_trait]
impl Capability for HostCapability {
    fn locale(&self) -> String {
        self.config.locale.clone()
    }

    fn timezone(&self) -> String {
        self.config.timezone.clone()
    }

    fn supports_team_info(&self) -> bool {
        true
    }

    async fn team_info(&self) -> Result<Value> {
        let resp = self
            .client
            .get(self.url("/v2/team/info"))
            .header(reqwest::header::AUTHORIZATION, self.auth())
            .send()
            .await
            .context("team info request")?
            .error_for_status()
            .context("team info status")?;
        resp.json().await.context("parse team info")
    }

    async fn app_token(&self) -> Result<String> {
        Ok(self.config.token.clone())
    }

    async fn fetch(&self, path: &str, options: FetchOptions) -> Result<ProxyResponse> {
        let method = match options.method.as_deref() {
            None => reqwest::Method::GET,
            Some(m) => m
                .to_ascii_uppercase()
                .parse::<reqwest::Method>()
                .with_context(|| format!("unsupported method `{m}`"))?,
        };

        let mut req = self
            .client
            .request(method, self.url(path))
            .header(reqwest::header::AUTHORIZATION, self.auth());
        for (name, value) in &options.headers {
            req = req.header(name, value);
        }
        if let Some(body) = &options.body {
            req = req.json(body);
        }

        let resp = req.send().await.with_context(|| format!("fetch {path}"))?;
        ProxyResponse::from_reqwest(resp).await
    }

    fn ui(&self) -> Option<&dyn UiSurface> {
        self.ui.as_deref()
    }
}
