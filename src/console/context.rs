use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use serde_json::Value;
use tokio::sync::mpsc::UnboundedSender;

use crate::capability::{Capability, Severity};

use super::notify::NotificationSink;
use super::slots::SlotStore;
use super::ConsoleEvent;

/// Identifier aliases tried in order; first non-empty wins.
const TEAM_ID_ALIASES: &[&str] = &["teamUUID", "teamId", "teamID"];

/// Handle to the one-shot bootstrap spawned at console startup. Dropping it
/// does nothing; `cancel` must be called at teardown to suppress a late
/// store write.
pub struct ContextResolver {
    cancelled: Arc<AtomicBool>,
}

impl ContextResolver {
    pub(super) fn new(cancelled: Arc<AtomicBool>) -> Self {
        Self { cancelled }
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }
}

/// Runs once per console lifetime. A missing accessor or designated slot
/// makes this a no-op; an accessor failure is always surfaced through the
/// sink since it has no slot of its own.
pub(super) async fn run(
    capability: Arc<dyn Capability>,
    slots: Arc<Mutex<SlotStore>>,
    sink: NotificationSink,
    events: UnboundedSender<ConsoleEvent>,
    cancelled: Arc<AtomicBool>,
) {
    if !capability.supports_team_info() {
        return;
    }
    let Some(index) = slots
        .lock()
        .expect("slot store lock")
        .designated_fetch_slot()
    else {
        return;
    };

    match capability.team_info().await {
        Ok(info) => {
            let Some(team_id) = extract_team_id(&info) else {
                return;
            };
            // Checked immediately before the single store write. A user edit
            // made while the accessor was in flight is still overwritten;
            // that matches the observed behavior of the host platform demo.
            if cancelled.load(Ordering::SeqCst) {
                return;
            }
            let command = fetch_projects_command(&team_id);
            let wrote = slots
                .lock()
                .expect("slot store lock")
                .rewrite_if_different(index, &command);
            if wrote {
                let _ = events.send(ConsoleEvent::SlotRewritten { index });
            }
        }
        Err(err) => sink.notify(&format!("{err:#}"), Severity::Error),
    }
}

pub(super) fn extract_team_id(info: &Value) -> Option<String> {
    TEAM_ID_ALIASES.iter().find_map(|key| {
        info.get(*key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    })
}

pub(super) fn fetch_projects_command(team_id: &str) -> String {
    format!(r#"host.fetch("/v2/project/projects?teamID={team_id}", {{ method: "GET" }})"#)
}

#[cfg(test)]
#[path = "../tests/console/context_tests.rs"]
mod tests;
