use std::collections::BTreeMap;

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

mod host;
pub use self::host::HostCapability;
mod response;
pub use self::response::ProxyResponse;

/// Severity tag carried by notifications and toast requests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Error => "error",
        }
    }

    /// Lenient mapping from a host-style `type` string; anything that is not
    /// `error` is treated as informational.
    pub fn from_kind(kind: &str) -> Self {
        if kind.eq_ignore_ascii_case("error") {
            Severity::Error
        } else {
            Severity::Info
        }
    }
}

#[derive(Clone, Debug)]
pub struct ToastRequest {
    pub kind: Severity,
    pub title: String,
}

#[derive(Clone, Debug)]
pub struct ModalRequest {
    pub kind: Severity,
    pub title: String,
    pub children: String,
}

/// Optional UI surface a host may expose. Absence is not an error: callers
/// fall back to the local diagnostic channel.
pub trait UiSurface: Send + Sync {
    fn toast(&self, req: ToastRequest);
    fn modal(&self, req: ModalRequest);
}

/// Options accepted by the network-proxy call, decoded from an expression's
/// object-literal argument.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct FetchOptions {
    #[serde(default)]
    pub method: Option<String>,

    #[serde(default)]
    pub headers: BTreeMap<String, String>,

    #[serde(default)]
    pub body: Option<Value>,
}

/// The host-supplied capability object, injected explicitly into every
/// component that needs it.
#[async_trait]
pub trait Capability: Send + Sync {
    fn locale(&self) -> String;
    fn timezone(&self) -> String;

    /// Whether this gateway exposes a team-info accessor at all.
    fn supports_team_info(&self) -> bool;
    async fn team_info(&self) -> Result<Value>;

    async fn app_token(&self) -> Result<String>;

    async fn fetch(&self, path: &str, options: FetchOptions) -> Result<ProxyResponse>;

    fn ui(&self) -> Option<&dyn UiSurface>;
}
