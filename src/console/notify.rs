use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;

use crate::capability::{Capability, ModalRequest, Severity, ToastRequest};

use super::ConsoleEvent;

/// Local diagnostic channel: the console's scroll log when a front-end is
/// attached, stderr in one-shot mode. Nothing routed here is ever dropped.
#[derive(Clone)]
pub enum DiagChannel {
    Events(UnboundedSender<ConsoleEvent>),
    Stderr,
}

impl DiagChannel {
    pub fn push(&self, severity: Severity, line: String) {
        match self {
            DiagChannel::Events(tx) => {
                let _ = tx.send(ConsoleEvent::Diagnostic { severity, line });
            }
            DiagChannel::Stderr => {
                eprintln!("[{}] {}", severity.as_str(), line);
            }
        }
    }
}

/// Delivers pre-rendered payloads to the host's UI surface when one exists,
/// otherwise to the local diagnostic channel.
#[derive(Clone)]
pub struct NotificationSink {
    capability: Arc<dyn Capability>,
    diag: DiagChannel,
}

impl NotificationSink {
    pub fn new(capability: Arc<dyn Capability>, diag: DiagChannel) -> Self {
        Self { capability, diag }
    }

    pub fn diag(&self) -> &DiagChannel {
        &self.diag
    }

    /// Toast path. `title` must already be reduced to text; the sink does not
    /// re-run classification.
    pub fn notify(&self, title: &str, severity: Severity) {
        match self.capability.ui() {
            Some(ui) => ui.toast(ToastRequest {
                kind: severity,
                title: title.to_string(),
            }),
            None => self
                .diag
                .push(severity, format!("[toast:{}] {}", severity.as_str(), title)),
        }
    }

    /// Modal path, used only for deliberate user-triggered demonstration
    /// actions, never for automatic execution results.
    pub fn modal(&self, title: &str, children: &str) {
        match self.capability.ui() {
            Some(ui) => ui.modal(ModalRequest {
                kind: Severity::Info,
                title: title.to_string(),
                children: children.to_string(),
            }),
            None => self
                .diag
                .push(Severity::Info, format!("[modal] {title}: {children}")),
        }
    }
}

#[cfg(test)]
#[path = "../tests/console/notify_tests.rs"]
mod tests;
