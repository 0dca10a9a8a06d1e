//! TUI runtime - owns terminal, runs event loop, executes effects.
//!
//! This is the "Elm runtime" boundary: all side effects happen here.
//! The reducer stays pure and produces effects; this module executes them.
//!
//! ## Inbox Pattern
//!
//! Async handlers are spawned as tasks whose results are sent to `inbox_tx`
//! wrapped in `TaskCompleted`. The runtime drains `inbox_rx` each frame.
//! Session notifications are forwarded from the session context's watch
//! channel after every reducer step.

mod handlers;

use std::future::Future;
use std::io::Stdout;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use cvlens_core::config::Config;
use cvlens_core::credentials::CredentialStore;
use cvlens_core::service::ServiceClient;
use cvlens_core::session::SessionChange;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;

use crate::common::{TaskCompleted, TaskId, TaskKind, TaskStarted};
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::{render, terminal, update};

/// Poll duration while tasks are running (spinner cadence).
pub const FRAME_DURATION: Duration = Duration::from_millis(80);

/// Poll duration when idle.
pub const IDLE_POLL_DURATION: Duration = Duration::from_millis(250);

/// Full-screen TUI runtime.
///
/// Owns the terminal and state. Terminal state is restored on drop or panic.
pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub state: AppState,
    client: ServiceClient,
    store: Arc<dyn CredentialStore>,
    session_rx: watch::Receiver<SessionChange>,
    inbox_tx: mpsc::UnboundedSender<UiEvent>,
    inbox_rx: mpsc::UnboundedReceiver<UiEvent>,
    last_tick: Instant,
}

impl TuiRuntime {
    /// Creates the runtime and enters the alternate screen.
    ///
    /// # Errors
    /// Returns an error if the HTTP client or the terminal cannot be set up.
    pub fn new(config: &Config, store: Arc<dyn CredentialStore>) -> Result<Self> {
        let client = ServiceClient::from_config(config)?;

        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        let state = AppState::new(config.success_delay());
        let session_rx = state.auth.session.subscribe();
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();

        Ok(Self {
            terminal,
            state,
            client,
            store,
            session_rx,
            inbox_tx,
            inbox_rx,
            last_tick: Instant::now(),
        })
    }

    /// Runs the main event loop until the user quits.
    ///
    /// # Errors
    /// Returns an error on terminal I/O failure.
    pub fn run(&mut self) -> Result<()> {
        terminal::enable_input_features()?;

        let stored = match self.store.load() {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!(error = %e, "failed to load stored session");
                None
            }
        };
        let effects = self.state.start(stored);
        self.execute_effects(effects);

        let result = self.event_loop();
        let _ = terminal::disable_input_features();
        result
    }

    fn event_loop(&mut self) -> Result<()> {
        let mut dirty = true;

        while !self.state.should_quit {
            let events = self.collect_events()?;
            if !events.is_empty() {
                dirty = true;
            }

            for event in events {
                self.dispatch_event(event);
                if self.state.should_quit {
                    break;
                }
            }

            if dirty {
                self.terminal.draw(|frame| render::render(&self.state, frame))?;
                dirty = false;
            }
        }

        Ok(())
    }

    /// Collects terminal input, inbox results and a tick if one is due.
    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        let tick_interval = if self.state.tasks.is_any_running() {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        let poll_duration = if events.is_empty() {
            tick_interval.saturating_sub(self.last_tick.elapsed())
        } else {
            Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }

        Ok(events)
    }

    /// Runs the reducer, forwards session notifications, executes effects.
    fn dispatch_event(&mut self, event: UiEvent) {
        let mut effects = update::update(&mut self.state, event);

        while self.session_rx.has_changed().unwrap_or(false) {
            let change = self.session_rx.borrow_and_update().clone();
            tracing::debug!(?change, "session changed");
            effects.extend(update::update(
                &mut self.state,
                UiEvent::SessionChanged(change),
            ));
        }

        self.execute_effects(effects);
    }

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    /// Spawns an async task with a uniform TaskStarted/TaskCompleted lifecycle.
    fn spawn_task<F, Fut>(&self, kind: TaskKind, id: TaskId, cancelable: bool, f: F)
    where
        F: FnOnce(Option<CancellationToken>) -> Fut + Send + 'static,
        Fut: Future<Output = UiEvent> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        let cancel = cancelable.then(CancellationToken::new);
        let started = TaskStarted {
            id,
            cancel: cancel.clone(),
        };
        let _ = tx.send(UiEvent::TaskStarted { kind, started });
        tokio::spawn(async move {
            let inner = f(cancel).await;
            let completed = TaskCompleted {
                id,
                result: Box::new(inner),
            };
            let _ = tx.send(UiEvent::TaskCompleted { kind, completed });
        });
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.should_quit = true;
            }
            UiEffect::CancelTask { token, .. } => {
                if let Some(cancel) = token {
                    cancel.cancel();
                }
            }
            UiEffect::SubmitCredentials {
                task,
                mode,
                email,
                password,
            } => {
                let client = self.client.clone();
                self.spawn_task(TaskKind::Credentials, task, false, move |_| {
                    handlers::submit_credentials(client, mode, email, password)
                });
            }
            UiEffect::StartSuccessDelay { task, delay } => {
                self.spawn_task(TaskKind::SuccessDelay, task, true, move |cancel| {
                    handlers::success_delay(delay, cancel)
                });
            }
            UiEffect::CheckSession {
                task,
                purpose,
                token,
            } => {
                let client = self.client.clone();
                self.spawn_task(TaskKind::SessionCheck, task, false, move |_| {
                    handlers::check_session(client, purpose, token)
                });
            }
            UiEffect::LoadCandidate { task, source, path } => {
                self.spawn_task(TaskKind::FileLoad, task, false, move |_| {
                    handlers::load_candidate(source, path)
                });
            }
            UiEffect::SubmitAnalysis { task, token, file } => {
                let client = self.client.clone();
                self.spawn_task(TaskKind::Analysis, task, false, move |_| {
                    handlers::submit_analysis(client, token, file)
                });
            }
            UiEffect::PersistToken { token } => {
                handlers::persist_token(self.store.as_ref(), &token);
            }
            UiEffect::ClearCredentials => {
                handlers::clear_credentials(self.store.as_ref());
            }
        }
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
