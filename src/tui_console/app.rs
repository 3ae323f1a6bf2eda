use std::io::{self, IsTerminal};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use time::OffsetDateTime;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

use crate::capability::{HostCapability, ModalRequest, Severity, ToastRequest, UiSurface};
use crate::config::HostConfig;
use crate::console::{CommandSlot, Console, ConsoleEvent, ContextResolver};

use super::input::Input;
use super::modal;
use super::render;

const TOAST_TTL: Duration = Duration::from_secs(5);
const LOG_CAP: usize = 500;

pub(super) fn run(config_path: &Path) -> Result<()> {
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        anyhow::bail!("console requires an interactive terminal (TTY)");
    }

    let mut stdout = io::stdout();
    enable_raw_mode().context("enable raw mode")?;
    execute!(stdout, EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;
    terminal.clear().ok();

    let res = App::boot(config_path).and_then(|mut app| {
        let res = run_loop(&mut terminal, &mut app);
        // Suppress a late context-resolver write after teardown.
        app.resolver.cancel();
        res
    });

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    res
}

/// The TUI is the embedding front-end, so it also plays the host UI surface:
/// toast and modal requests come back through the console event channel.
struct TuiSurface {
    tx: UnboundedSender<ConsoleEvent>,
}

impl UiSurface for TuiSurface {
    fn toast(&self, req: ToastRequest) {
        let _ = self.tx.send(ConsoleEvent::Toast {
            severity: req.kind,
            title: req.title,
        });
    }

    fn modal(&self, req: ModalRequest) {
        let _ = self.tx.send(ConsoleEvent::Modal {
            title: req.title,
            children: req.children,
        });
    }
}

pub(super) struct LogEntry {
    pub(super) at: String,
    pub(super) severity: Severity,
    pub(super) line: String,
}

pub(super) struct ToastBanner {
    pub(super) severity: Severity,
    pub(super) title: String,
    shown_at: Instant,
}

pub(super) struct ModalState {
    pub(super) title: String,
    pub(super) lines: Vec<String>,
    pub(super) scroll: usize,
}

pub(super) struct App {
    console: Console,
    resolver: ContextResolver,
    events_rx: UnboundedReceiver<ConsoleEvent>,

    pub(super) slots: Vec<CommandSlot>,
    pub(super) selected: usize,
    pub(super) editing: Option<Input>,
    pub(super) log: Vec<LogEntry>,
    pub(super) toast: Option<ToastBanner>,
    pub(super) modal: Option<ModalState>,

    quit: bool,

    // Owns the executor threads for in-flight triggers.
    _runtime: tokio::runtime::Runtime,
}

impl App {
    fn boot(config_path: &Path) -> Result<Self> {
        let config = HostConfig::load_or_default(config_path)?;
        let runtime = tokio::runtime::Runtime::new().context("start runtime")?;
        let (tx, rx) = unbounded_channel();

        let capability = HostCapability::new(config)?.with_ui(Arc::new(TuiSurface {
            tx: tx.clone(),
        }));
        let console = Console::new(Arc::new(capability), runtime.handle().clone(), tx);
        let resolver = console.start_context_resolver();
        let slots = console.slot_snapshot();

        Ok(Self {
            console,
            resolver,
            events_rx: rx,
            slots,
            selected: 0,
            editing: None,
            log: Vec::new(),
            toast: None,
            modal: None,
            quit: false,
            _runtime: runtime,
        })
    }

    fn drain_events(&mut self) {
        while let Ok(ev) = self.events_rx.try_recv() {
            match ev {
                ConsoleEvent::Diagnostic { severity, line } => self.push_log(severity, line),
                ConsoleEvent::Toast { severity, title } => {
                    self.push_log(severity, format!("toast: {title}"));
                    self.toast = Some(ToastBanner {
                        severity,
                        title,
                        shown_at: Instant::now(),
                    });
                }
                ConsoleEvent::Modal { title, children } => {
                    self.modal = Some(ModalState {
                        title,
                        lines: children.lines().map(str::to_string).collect(),
                        scroll: 0,
                    });
                }
                ConsoleEvent::SlotRewritten { index } => {
                    self.slots = self.console.slot_snapshot();
                    self.push_log(
                        Severity::Info,
                        format!("slot {} pre-filled with the current team id", index + 1),
                    );
                }
            }
        }

        if let Some(t) = &self.toast
            && t.shown_at.elapsed() > TOAST_TTL
        {
            self.toast = None;
        }
    }

    fn push_log(&mut self, severity: Severity, line: String) {
        self.log.push(LogEntry {
            at: now_clock(),
            severity,
            line,
        });
        if self.log.len() > LOG_CAP {
            let excess = self.log.len() - LOG_CAP;
            self.log.drain(..excess);
        }
    }

}

fn now_clock() -> String {
    let now = OffsetDateTime::now_utc();
    format!("{:02}:{:02}:{:02}", now.hour(), now.minute(), now.second())
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        app.drain_events();

        terminal
            .draw(|f| render::draw(f, app))
            .context("draw")?;
        if app.quit {
            return Ok(());
        }

        if event::poll(Duration::from_millis(50)).context("poll")? {
            match event::read().context("read event")? {
                Event::Key(k) if k.kind == KeyEventKind::Press => handle_key(app, k),
                _ => {}
            }
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if app.modal.is_some() {
        modal::handle_modal_key(app, key);
        return;
    }

    if app.editing.is_some() {
        handle_edit_key(app, key);
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            app.quit = true;
        }

        KeyCode::Up => {
            app.selected = app.selected.saturating_sub(1);
        }
        KeyCode::Down => {
            if app.selected + 1 < app.slots.len() {
                app.selected += 1;
            }
        }

        KeyCode::Enter => {
            app.console.trigger(app.selected);
        }

        KeyCode::Char('e') => {
            let text = app
                .slots
                .get(app.selected)
                .map(|s| s.text.clone())
                .unwrap_or_default();
            app.editing = Some(Input::with_text(text));
        }

        _ => {}
    }
}

fn handle_edit_key(app: &mut App, key: KeyEvent) {
    let Some(input) = app.editing.as_mut() else {
        return;
    };

    match key.code {
        KeyCode::Esc => {
            app.editing = None;
        }
        KeyCode::Enter => {
            let text = input.buf.clone();
            app.editing = None;
            app.console.edit_slot(app.selected, text);
            app.slots = app.console.slot_snapshot();
        }
        KeyCode::Backspace => input.backspace(),
        KeyCode::Delete => input.delete(),
        KeyCode::Left => input.move_left(),
        KeyCode::Right => input.move_right(),
        KeyCode::Home => input.move_home(),
        KeyCode::End => input.move_end(),
        KeyCode::Char(c) => {
            if !key.modifiers.contains(KeyModifiers::CONTROL)
                && !key.modifiers.contains(KeyModifiers::ALT)
            {
                input.insert_char(c);
            }
        }
        _ => {}
    }
}
