use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};

use crate::capability::{FetchOptions, ProxyResponse, UiSurface};

use super::*;

#[derive(Default)]
struct RecordingUi {
    toasts: Mutex<Vec<ToastRequest>>,
    modals: Mutex<Vec<ModalRequest>>,
}

impl UiSurface for RecordingUi {
    fn toast(&self, req: ToastRequest) {
        self.toasts.lock().expect("lock").push(req);
    }

    fn modal(&self, req: ModalRequest) {
        self.modals.lock().expect("lock").push(req);
    }
}

struct StubCapability {
    ui: Option<Arc<RecordingUi>>,
}

#[async_trait]
impl Capability for StubCapability {
    fn locale(&self) -> String {
        "en-US".to_string()
    }

    fn timezone(&self) -> String {
        "UTC".to_string()
    }

    fn supports_team_info(&self) -> bool {
        false
    }

    async fn team_info(&self) -> anyhow::Result<Value> {
        anyhow::bail!("no team info")
    }

    async fn app_token(&self) -> anyhow::Result<String> {
        Ok("tok-1".to_string())
    }

    async fn fetch(&self, _path: &str, _options: FetchOptions) -> anyhow::Result<ProxyResponse> {
        Ok(ProxyResponse::new(200, "OK", Vec::new(), Vec::new()))
    }

    fn ui(&self) -> Option<&dyn UiSurface> {
        self.ui.as_deref().map(|u| u as &dyn UiSurface)
    }
}

fn sink_with_ui(
    ui: Option<Arc<RecordingUi>>,
) -> (NotificationSink, UnboundedReceiver<ConsoleEvent>) {
    let (tx, rx) = unbounded_channel();
    let capability: Arc<dyn Capability> = Arc::new(StubCapability { ui });
    (
        NotificationSink::new(capability, DiagChannel::Events(tx)),
        rx,
    )
}

#[test]
fn toast_goes_to_the_ui_surface_when_present() {
    let ui = Arc::new(RecordingUi::default());
    let (sink, mut rx) = sink_with_ui(Some(ui.clone()));

    sink.notify("saved", Severity::Info);

    let toasts = ui.toasts.lock().expect("lock");
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].title, "saved");
    assert_eq!(toasts[0].kind, Severity::Info);
    // Nothing doubled onto the diagnostic channel.
    assert!(rx.try_recv().is_err());
}

#[test]
fn toast_without_a_ui_surface_is_never_dropped() {
    let (sink, mut rx) = sink_with_ui(None);

    sink.notify("boom", Severity::Error);

    match rx.try_recv().expect("one event") {
        ConsoleEvent::Diagnostic { severity, line } => {
            assert_eq!(severity, Severity::Error);
            assert_eq!(line, "[toast:error] boom");
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn modal_goes_to_the_ui_surface_when_present() {
    let ui = Arc::new(RecordingUi::default());
    let (sink, _rx) = sink_with_ui(Some(ui.clone()));

    sink.modal("title", "body text");

    let modals = ui.modals.lock().expect("lock");
    assert_eq!(modals.len(), 1);
    assert_eq!(modals[0].title, "title");
    assert_eq!(modals[0].children, "body text");
}

#[test]
fn modal_without_a_ui_surface_falls_back_to_diagnostics() {
    let (sink, mut rx) = sink_with_ui(None);

    sink.modal("title", "body text");

    match rx.try_recv().expect("one event") {
        ConsoleEvent::Diagnostic { severity, line } => {
            assert_eq!(severity, Severity::Info);
            assert_eq!(line, "[modal] title: body text");
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn stderr_channel_accepts_pushes() {
    // Smoke check only: the stderr path has no observable side effect here,
    // it just must not panic.
    DiagChannel::Stderr.push(Severity::Info, "line".to_string());
}
