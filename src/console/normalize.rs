use anyhow::Result;
use serde::Serialize;
use serde_json::Value;

use crate::capability::ProxyResponse;

use super::EvalValue;

/// Text bodies longer than this are cut before display.
pub const TEXT_BODY_LIMIT: usize = 500;
pub const TRUNCATION_MARKER: &str = "...";

/// Bounded, display-safe reduction of a response-like value.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ResponseSummary {
    pub status: u16,
    pub status_text: String,
    pub body: Value,
    pub truncated: bool,
}

#[derive(Clone, Debug)]
pub enum NormalizedDisplay {
    /// Pass-through scalar or JSON-rendered string.
    Text(String),
    Summary(ResponseSummary),
    /// Best-effort degradation: the original value, unchanged.
    Raw(EvalValue),
}

impl NormalizedDisplay {
    /// Scalar rendering for the notification sink.
    pub fn to_text(&self) -> String {
        match self {
            NormalizedDisplay::Text(s) => s.clone(),
            NormalizedDisplay::Summary(summary) => serde_json::to_string(summary)
                .unwrap_or_else(|_| {
                    format!("response {} {}", summary.status, summary.status_text)
                }),
            NormalizedDisplay::Raw(value) => coerce_value(value),
        }
    }
}

/// Textual classification over the expression source: only getter-style
/// accessors and the network-proxy call have results worth surfacing.
pub fn should_surface(text: &str) -> bool {
    let t = text.trim_start();
    t.starts_with("host.get") || t.starts_with("host.fetch")
}

/// Reduce an outcome value to a renderable representation. Deterministic and
/// total: no input may cause this to fail, and any internal failure degrades
/// to returning the original value unchanged.
pub fn normalize(value: EvalValue) -> NormalizedDisplay {
    match value {
        EvalValue::Undefined => NormalizedDisplay::Text("undefined".to_string()),
        EvalValue::Json(Value::Null) => NormalizedDisplay::Text("null".to_string()),
        EvalValue::Json(Value::String(s)) => NormalizedDisplay::Text(s),
        EvalValue::Response(resp) => match summarize_response(&resp) {
            Ok(summary) => NormalizedDisplay::Summary(summary),
            Err(_) => NormalizedDisplay::Raw(EvalValue::Response(resp)),
        },
        EvalValue::Json(other) => match serde_json::to_string(&other) {
            Ok(s) => NormalizedDisplay::Text(s),
            Err(_) => NormalizedDisplay::Text(coerce_value(&EvalValue::Json(other))),
        },
    }
}

fn summarize_response(resp: &ProxyResponse) -> Result<ResponseSummary> {
    let content_type = resp.header("content-type").unwrap_or("");
    let (body, truncated) = if content_type.contains("application/json") {
        (resp.json()?, false)
    } else {
        let text = resp.text()?;
        if text.chars().count() > TEXT_BODY_LIMIT {
            let cut: String = text.chars().take(TEXT_BODY_LIMIT).collect();
            (Value::String(format!("{cut}{TRUNCATION_MARKER}")), true)
        } else {
            (Value::String(text), false)
        }
    };
    Ok(ResponseSummary {
        status: resp.status(),
        status_text: resp.status_text().to_string(),
        body,
        truncated,
    })
}

/// Generic string coercion, used for diagnostics and as the last-resort
/// rendering of values no other branch handled.
pub(super) fn coerce_value(value: &EvalValue) -> String {
    match value {
        EvalValue::Undefined => "undefined".to_string(),
        EvalValue::Json(v) => v.to_string(),
        EvalValue::Response(r) => format!("[response {} {}]", r.status(), r.status_text()),
    }
}

#[cfg(test)]
#[path = "../tests/console/normalize_tests.rs"]
mod tests;
