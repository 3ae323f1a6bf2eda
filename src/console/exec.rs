use std::sync::Arc;

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use serde_json::Value;

use crate::capability::{Capability, FetchOptions, Severity};
use crate::expr::{self, Expr};

use super::notify::NotificationSink;
use super::{EvalValue, ExecutionOutcome};

/// Compiles slot text into an invocable unit bound to the capability object,
/// runs it, and unifies compile-time and run-time failures into one outcome.
#[derive(Clone)]
pub struct Executor {
    capability: Arc<dyn Capability>,
    sink: NotificationSink,
}

#[derive(Debug, Deserialize)]
struct ToastArgs {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    title: String,
}

#[derive(Debug, Deserialize)]
struct ModalArgs {
    #[serde(rename = "type", default)]
    _kind: Option<String>,
    title: String,
    #[serde(default)]
    children: Option<String>,
}

impl Executor {
    pub fn new(capability: Arc<dyn Capability>, sink: NotificationSink) -> Self {
        Self { capability, sink }
    }

    /// Blank text is a silent no-op, not an error.
    pub async fn execute(&self, text: &str) -> Option<ExecutionOutcome> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(match self.run(trimmed).await {
            Ok(value) => ExecutionOutcome::Success(value),
            Err(err) => ExecutionOutcome::Failure(format!("{err:#}")),
        })
    }

    async fn run(&self, text: &str) -> Result<EvalValue> {
        match expr::parse(text)? {
            Expr::Literal(value) => Ok(EvalValue::Json(value)),
            Expr::Call { path, args } => self.dispatch(&path, args).await,
        }
    }

    async fn dispatch(&self, path: &[String], args: Vec<Value>) -> Result<EvalValue> {
        let name = Expr::path_display(path);
        match name.as_str() {
            "host.getLocale" => {
                expect_arity(&name, &args, 0)?;
                Ok(EvalValue::Json(Value::String(self.capability.locale())))
            }
            "host.getTimezone" => {
                expect_arity(&name, &args, 0)?;
                Ok(EvalValue::Json(Value::String(self.capability.timezone())))
            }
            "host.getTeamInfo" => {
                expect_arity(&name, &args, 0)?;
                Ok(EvalValue::Json(self.capability.team_info().await?))
            }
            "host.getAppToken" => {
                expect_arity(&name, &args, 0)?;
                Ok(EvalValue::Json(Value::String(
                    self.capability.app_token().await?,
                )))
            }
            "host.fetch" => {
                if args.is_empty() || args.len() > 2 {
                    bail!("{name} takes a path and optional options");
                }
                let mut args = args.into_iter();
                let Some(Value::String(fetch_path)) = args.next() else {
                    bail!("{name}: first argument must be a path string");
                };
                let options = match args.next() {
                    None => FetchOptions::default(),
                    Some(v) => serde_json::from_value(v)
                        .with_context(|| format!("{name}: invalid options"))?,
                };
                let resp = self.capability.fetch(&fetch_path, options).await?;
                Ok(EvalValue::Response(resp))
            }
            "host.ui.toast" => {
                let toast: ToastArgs = one_object_arg(&name, args)?;
                let severity = Severity::from_kind(toast.kind.as_deref().unwrap_or("info"));
                self.sink.notify(&toast.title, severity);
                Ok(EvalValue::Undefined)
            }
            "host.ui.modal" => {
                let modal: ModalArgs = one_object_arg(&name, args)?;
                let children = modal.children.unwrap_or_else(|| modal.title.clone());
                self.sink.modal(&modal.title, &children);
                Ok(EvalValue::Undefined)
            }
            _ => bail!("unknown capability operation `{name}`"),
        }
    }
}

fn expect_arity(name: &str, args: &[Value], wanted: usize) -> Result<()> {
    if args.len() != wanted {
        bail!("{name} takes {wanted} argument(s), got {}", args.len());
    }
    Ok(())
}

fn one_object_arg<T: serde::de::DeserializeOwned>(name: &str, args: Vec<Value>) -> Result<T> {
    let [arg] = <[Value; 1]>::try_from(args)
        .map_err(|_| anyhow::anyhow!("{name} takes exactly one object argument"))?;
    serde_json::from_value(arg).with_context(|| format!("{name}: invalid argument"))
}

#[cfg(test)]
#[path = "../tests/console/exec_tests.rs"]
mod tests;
