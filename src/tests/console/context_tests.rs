use anyhow::Result;
use async_trait::async_trait;
use serde_json::json;
use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};

use crate::capability::{FetchOptions, ProxyResponse, UiSurface};
use crate::console::{DiagChannel, SEED_COMMANDS};

use super::*;

struct StubCapability {
    supported: bool,
    info: Result<Value, String>,
}

impl StubCapability {
    fn with_info(info: Value) -> Self {
        Self {
            supported: true,
            info: Ok(info),
        }
    }

    fn failing(message: &str) -> Self {
        Self {
            supported: true,
            info: Err(message.to_string()),
        }
    }
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
        self.supported
    }

    async fn team_info(&self) -> anyhow::Result<Value> {
        match &self.info {
            Ok(v) => Ok(v.clone()),
            Err(msg) => anyhow::bail!("{msg}"),
        }
    }

    async fn app_token(&self) -> anyhow::Result<String> {
        Ok("tok-1".to_string())
    }

    async fn fetch(&self, _path: &str, _options: FetchOptions) -> anyhow::Result<ProxyResponse> {
        Ok(ProxyResponse::new(200, "OK", Vec::new(), Vec::new()))
    }

    fn ui(&self) -> Option<&dyn UiSurface> {
        None
    }
}

struct Fixture {
    capability: Arc<dyn Capability>,
    slots: Arc<Mutex<SlotStore>>,
    sink: NotificationSink,
    events_rx: UnboundedReceiver<ConsoleEvent>,
    events_tx: tokio::sync::mpsc::UnboundedSender<ConsoleEvent>,
}

fn fixture(capability: StubCapability) -> Fixture {
    let (tx, rx) = unbounded_channel();
    let capability: Arc<dyn Capability> = Arc::new(capability);
    Fixture {
        sink: NotificationSink::new(capability.clone(), DiagChannel::Events(tx.clone())),
        capability,
        slots: Arc::new(Mutex::new(SlotStore::seeded())),
        events_rx: rx,
        events_tx: tx,
    }
}

async fn resolve(fx: &mut Fixture, cancelled: Arc<AtomicBool>) {
    run(
        fx.capability.clone(),
        fx.slots.clone(),
        fx.sink.clone(),
        fx.events_tx.clone(),
        cancelled,
    )
    .await;
}

#[test]
fn alias_order_prefers_team_uuid() {
    let info = json!({ "teamID": "c", "teamId": "b", "teamUUID": "a" });
    assert_eq!(extract_team_id(&info), Some("a".to_string()));
}

#[test]
fn empty_aliases_are_skipped() {
    let info = json!({ "teamUUID": "", "teamId": "b" });
    assert_eq!(extract_team_id(&info), Some("b".to_string()));

    let info = json!({ "teamUUID": "", "teamId": "", "teamID": "" });
    assert_eq!(extract_team_id(&info), None);

    assert_eq!(extract_team_id(&json!({ "name": "Alpha" })), None);
}

#[test]
fn non_string_aliases_do_not_match() {
    let info = json!({ "teamUUID": 42, "teamId": "b" });
    assert_eq!(extract_team_id(&info), Some("b".to_string()));
}

#[tokio::test]
async fn resolver_fills_the_designated_slot_once() {
    let mut fx = fixture(StubCapability::with_info(json!({ "teamUUID": "team-1" })));
    let cancelled = Arc::new(AtomicBool::new(false));

    resolve(&mut fx, cancelled.clone()).await;

    let expected = fetch_projects_command("team-1");
    assert_eq!(
        fx.slots.lock().expect("lock").text(0),
        Some(expected.as_str())
    );
    assert!(matches!(
        fx.events_rx.try_recv().expect("rewrite event"),
        ConsoleEvent::SlotRewritten { index: 0 }
    ));

    // Running again with the same team id writes nothing and emits nothing.
    resolve(&mut fx, cancelled).await;
    assert!(fx.events_rx.try_recv().is_err());
}

#[tokio::test]
async fn cancellation_suppresses_the_write() {
    let mut fx = fixture(StubCapability::with_info(json!({ "teamUUID": "team-1" })));
    let cancelled = Arc::new(AtomicBool::new(false));

    let resolver = ContextResolver::new(cancelled.clone());
    resolver.cancel();
    resolve(&mut fx, cancelled).await;

    assert_eq!(
        fx.slots.lock().expect("lock").text(0),
        Some(SEED_COMMANDS[0])
    );
    assert!(fx.events_rx.try_recv().is_err());
}

#[tokio::test]
async fn missing_team_id_leaves_the_slot_alone() {
    let mut fx = fixture(StubCapability::with_info(json!({ "name": "Alpha" })));
    resolve(&mut fx, Arc::new(AtomicBool::new(false))).await;

    assert_eq!(
        fx.slots.lock().expect("lock").text(0),
        Some(SEED_COMMANDS[0])
    );
    assert!(fx.events_rx.try_recv().is_err());
}

#[tokio::test]
async fn unsupported_capability_is_a_no_op() {
    let mut fx = fixture(StubCapability {
        supported: false,
        info: Ok(json!({ "teamUUID": "team-1" })),
    });
    resolve(&mut fx, Arc::new(AtomicBool::new(false))).await;

    assert_eq!(
        fx.slots.lock().expect("lock").text(0),
        Some(SEED_COMMANDS[0])
    );
}

#[tokio::test]
async fn accessor_failure_is_surfaced_through_the_sink() {
    let mut fx = fixture(StubCapability::failing("team info unavailable"));
    resolve(&mut fx, Arc::new(AtomicBool::new(false))).await;

    match fx.events_rx.try_recv().expect("one event") {
        ConsoleEvent::Diagnostic { severity, line } => {
            assert_eq!(severity, Severity::Error);
            assert!(line.contains("team info unavailable"));
        }
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(
        fx.slots.lock().expect("lock").text(0),
        Some(SEED_COMMANDS[0])
    );
}
