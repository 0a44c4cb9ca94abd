//! Headless mode for the folio TUI.
//!
//! Runs the page against a `TestBackend` terminal instead of a real one,
//! enabling E2E testing and automation. Actions are sent via channels and
//! the rendered screen is published after each draw.

use crate::app::{App, Focus};
use crate::event::Action;
use crate::page;
use crate::tasks::ChatTasks;
use folio_engine::{ChatBackend, Profile};
use ratatui::{backend::TestBackend, Terminal};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

/// Default terminal dimensions for headless mode.
pub const DEFAULT_WIDTH: u16 = 80;
pub const DEFAULT_HEIGHT: u16 = 24;

/// State captured from the headless page after each render.
#[derive(Debug, Clone, Default)]
pub struct HeadlessState {
    /// Text contents of the terminal buffer.
    pub screen_contents: String,
    /// Current draft.
    pub draft: String,
    /// Number of completed turns.
    pub turns: usize,
    /// Whether a request is in flight.
    pub in_flight: bool,
    /// Current error message, if any.
    pub error: Option<String>,
    /// Focused control.
    pub focus: Focus,
    /// Whether the page should quit.
    pub should_quit: bool,
    /// Whether help overlay is visible.
    pub show_help: bool,
}

impl HeadlessState {
    fn capture(app: &App, screen_contents: String) -> Self {
        Self {
            screen_contents,
            draft: app.widget.draft().to_string(),
            turns: app.widget.turns().len(),
            in_flight: app.widget.is_in_flight(),
            error: app.widget.error().map(str::to_owned),
            focus: app.focus,
            should_quit: app.should_quit,
            show_help: app.show_help,
        }
    }
}

/// Handle to control a headless page.
///
/// Use this to send actions and observe state changes.
pub struct HeadlessHandle {
    action_tx: mpsc::UnboundedSender<Action>,
    state_rx: watch::Receiver<HeadlessState>,
}

impl HeadlessHandle {
    /// Send an action to the page.
    ///
    /// Returns `true` if the action was sent successfully.
    pub fn send_action(&self, action: Action) -> bool {
        self.action_tx.send(action).is_ok()
    }

    /// Type text into the input, one character at a time.
    pub fn type_text(&self, text: &str) -> bool {
        text.chars().all(|ch| self.send_action(Action::Insert(ch)))
    }

    /// Get the current state of the page.
    pub fn state(&self) -> HeadlessState {
        self.state_rx.borrow().clone()
    }

    /// Wait for the state to change, with a timeout.
    ///
    /// Returns `true` if state changed, `false` if timed out.
    pub async fn wait_for_change(&mut self, timeout: Duration) -> bool {
        tokio::time::timeout(timeout, self.state_rx.changed())
            .await
            .is_ok_and(|r| r.is_ok())
    }

    /// Wait until a condition is met on the state.
    ///
    /// Returns the state when the condition is met, or `None` if timed out.
    pub async fn wait_for<F>(&mut self, condition: F, timeout: Duration) -> Option<HeadlessState>
    where
        F: Fn(&HeadlessState) -> bool,
    {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            {
                let state = self.state_rx.borrow_and_update();
                if condition(&*state) {
                    return Some(state.clone());
                }
            }
            let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
            if remaining.is_zero() {
                return None;
            }
            match tokio::time::timeout(remaining, self.state_rx.changed()).await {
                Ok(Ok(())) => {}
                Ok(Err(_)) | Err(_) => return None,
            }
        }
    }

    /// Wait until the rendered screen contains `text`.
    pub async fn wait_for_text(&mut self, text: &str, timeout: Duration) -> Option<HeadlessState> {
        self.wait_for(|s| s.screen_contents.contains(text), timeout)
            .await
    }
}

/// Configuration for headless mode.
#[derive(Debug, Clone)]
pub struct HeadlessConfig {
    /// Terminal width.
    pub width: u16,
    /// Terminal height.
    pub height: u16,
    /// Tick rate in milliseconds.
    pub tick_rate_ms: u64,
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            tick_rate_ms: 50,
        }
    }
}

/// Run the page in headless mode.
///
/// Returns a handle to control the page and a join handle for the task.
/// The task ends when the page quits or the handle is dropped.
pub fn run_tui_headless(
    profile: Profile,
    backend: Arc<dyn ChatBackend>,
    config: HeadlessConfig,
) -> (HeadlessHandle, JoinHandle<Result<(), String>>) {
    let (action_tx, action_rx) = mpsc::unbounded_channel();
    let (state_tx, state_rx) = watch::channel(HeadlessState::default());

    let handle = HeadlessHandle {
        action_tx,
        state_rx,
    };

    let task = tokio::spawn(async move {
        run_headless_loop(profile, backend, config, action_rx, state_tx)
            .await
            .map_err(|e| e.to_string())
    });

    (handle, task)
}

async fn run_headless_loop(
    profile: Profile,
    backend: Arc<dyn ChatBackend>,
    config: HeadlessConfig,
    mut action_rx: mpsc::UnboundedReceiver<Action>,
    state_tx: watch::Sender<HeadlessState>,
) -> Result<(), std::io::Error> {
    let terminal_backend = TestBackend::new(config.width, config.height);
    let mut terminal = Terminal::new(terminal_backend)?;
    let mut app = App::new(profile);
    let mut tasks = ChatTasks::new(backend);
    let tick_duration = Duration::from_millis(config.tick_rate_ms);

    loop {
        terminal.draw(|frame| {
            let area = frame.area();
            page::render(&app, area, frame.buffer_mut());
        })?;

        let screen_contents = page::buffer_to_string(terminal.backend().buffer());
        let _ = state_tx.send(HeadlessState::capture(&app, screen_contents));

        if app.should_quit {
            tasks.abort_all();
            break;
        }

        let action = tokio::select! {
            action = action_rx.recv() => match action {
                Some(action) => action,
                None => {
                    tasks.abort_all();
                    break;
                }
            },
            () = tokio::time::sleep(tick_duration) => {
                app.tick();
                Action::None
            }
        };

        if let Some(submission) = app.handle_action(action) {
            tasks.dispatch(submission);
        }
        tasks.collect_finished(&mut app).await;
    }

    Ok(())
}
