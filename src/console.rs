//! The interactive command console: seeded command slots, asynchronous
//! execution of the restricted expression grammar against the injected
//! capability gateway, result classification, and notification routing.

use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use serde_json::Value;
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;

use crate::capability::{Capability, ProxyResponse};

pub use crate::capability::Severity;

mod slots;
pub use self::slots::{CommandSlot, SEED_COMMANDS, SlotOrigin, SlotStore};
mod context;
pub use self::context::ContextResolver;
mod exec;
pub use self::exec::Executor;
mod normalize;
pub use self::normalize::{
    NormalizedDisplay, ResponseSummary, TEXT_BODY_LIMIT, TRUNCATION_MARKER, normalize,
    should_surface,
};
mod notify;
pub use self::notify::{DiagChannel, NotificationSink};

/// Everything the front-end needs to observe about the console: diagnostic
/// lines, UI-surface fallbacks, and programmatic slot rewrites.
#[derive(Clone, Debug)]
pub enum ConsoleEvent {
    Diagnostic { severity: Severity, line: String },
    Toast { severity: Severity, title: String },
    Modal { title: String, children: String },
    SlotRewritten { index: usize },
}

/// Unified settlement of one trigger. Callers never need to distinguish
/// compile-time from run-time failure.
#[derive(Clone, Debug)]
pub enum ExecutionOutcome {
    Success(EvalValue),
    Failure(String),
}

/// Runtime value produced by an executed expression.
#[derive(Clone, Debug)]
pub enum EvalValue {
    /// Void capability calls (toast/modal) produce no value.
    Undefined,
    Json(Value),
    Response(ProxyResponse),
}

pub struct Console {
    slots: Arc<Mutex<SlotStore>>,
    capability: Arc<dyn Capability>,
    sink: NotificationSink,
    handle: Handle,
    events_tx: UnboundedSender<ConsoleEvent>,
}

impl Console {
    pub fn new(
        capability: Arc<dyn Capability>,
        handle: Handle,
        events_tx: UnboundedSender<ConsoleEvent>,
    ) -> Self {
        let sink = NotificationSink::new(
            capability.clone(),
            DiagChannel::Events(events_tx.clone()),
        );
        Self {
            slots: Arc::new(Mutex::new(SlotStore::seeded())),
            capability,
            sink,
            handle,
            events_tx,
        }
    }

    pub fn sink(&self) -> &NotificationSink {
        &self.sink
    }

    pub fn slot_snapshot(&self) -> Vec<CommandSlot> {
        self.slots.lock().expect("slot store lock").snapshot()
    }

    /// User edit: always accepted verbatim, no validation.
    pub fn edit_slot(&self, index: usize, text: String) {
        self.slots.lock().expect("slot store lock").set(index, text);
    }

    /// Spawn the one-shot context resolver. The returned handle's `cancel`
    /// suppresses the store write if the accessor resolves after teardown.
    pub fn start_context_resolver(&self) -> ContextResolver {
        let cancelled = Arc::new(AtomicBool::new(false));
        self.handle.spawn(context::run(
            self.capability.clone(),
            self.slots.clone(),
            self.sink.clone(),
            self.events_tx.clone(),
            cancelled.clone(),
        ));
        ContextResolver::new(cancelled)
    }

    /// Trigger one slot. Returns immediately; the outcome is routed to the
    /// notification sink or the diagnostic channel when it settles.
    pub fn trigger(&self, index: usize) {
        let Some(text) = self
            .slots
            .lock()
            .expect("slot store lock")
            .text(index)
            .map(str::to_string)
        else {
            return;
        };

        let surfacing = normalize::should_surface(&text);
        let executor = Executor::new(self.capability.clone(), self.sink.clone());
        let sink = self.sink.clone();

        self.handle.spawn(async move {
            let Some(outcome) = executor.execute(&text).await else {
                return;
            };
            match outcome {
                ExecutionOutcome::Success(value) if surfacing => {
                    let display = normalize::normalize(value);
                    sink.notify(&display.to_text(), Severity::Info);
                }
                ExecutionOutcome::Success(value) => {
                    sink.diag().push(
                        Severity::Info,
                        format!("invoke: {}", normalize::coerce_value(&value)),
                    );
                }
                ExecutionOutcome::Failure(err) if surfacing => {
                    sink.notify(&err, Severity::Error);
                }
                ExecutionOutcome::Failure(err) => {
                    sink.diag().push(Severity::Error, format!("error: {err}"));
                }
            }
        });
    }
}

#[cfg(test)]
#[path = "tests/console_tests.rs"]
mod tests;
