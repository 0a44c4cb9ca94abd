//! folio-tui: Terminal portfolio page with an embedded chat widget
//!
//! This crate provides the terminal surface of folio:
//! - The portfolio page (header, conversation, input, Send button, footer)
//! - Keyboard and mouse handling
//! - Headless mode for testing and automation

mod app;
mod conversation;
mod event;
pub mod headless;
mod page;
mod tasks;
#[cfg(test)]
pub mod test_utils;
mod text;
mod theme;
mod widgets;

pub use app::{App, Focus};
pub use event::{key_to_action, Action, Event, EventHandler};
pub use folio_engine;

use crossterm::{
    cursor::Show as ShowCursor,
    event::{DisableMouseCapture, EnableMouseCapture, MouseButton, MouseEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use folio_engine::{ChatBackend, Profile};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Position, Rect},
    Terminal,
};
use std::io::{self, stdout};
use std::sync::Arc;
use tasks::ChatTasks;
use tracing::info;

/// RAII guard for terminal state restoration.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(stdout(), DisableMouseCapture, LeaveAlternateScreen, ShowCursor);
    }
}

/// Run the portfolio page in the terminal.
///
/// Sets up the terminal, runs the event loop until the user quits, and
/// restores the terminal on exit.
pub async fn run_tui(
    profile: Profile,
    backend: Arc<dyn ChatBackend>,
) -> Result<(), Box<dyn std::error::Error>> {
    enable_raw_mode()?;
    let _guard = TerminalGuard;

    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let terminal_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(terminal_backend)?;

    let mut app = App::new(profile);

    // 4 Hz tick rate
    let mut events = EventHandler::new(250);

    info!("terminal page opened");
    let result = run_loop(&mut terminal, &mut app, &mut events, backend).await;

    terminal.show_cursor()?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &mut EventHandler,
    backend: Arc<dyn ChatBackend>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut tasks = ChatTasks::new(backend);

    loop {
        terminal.draw(|frame| {
            let area = frame.area();
            page::render(app, area, frame.buffer_mut());
        })?;

        if let Some(event) = events.next().await {
            let action = match event {
                Event::Key(key) => key_to_action(key, app.focus),
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::ScrollUp => Action::ScrollUp,
                    MouseEventKind::ScrollDown => Action::ScrollDown,
                    MouseEventKind::Down(MouseButton::Left) => {
                        let size = terminal.size()?;
                        let area = Rect::new(0, 0, size.width, size.height);
                        if clicked_send(app, area, Position::new(mouse.column, mouse.row)) {
                            app.focus = Focus::SendButton;
                            Action::Submit
                        } else {
                            Action::None
                        }
                    }
                    _ => Action::None,
                },
                Event::Tick => {
                    app.tick();
                    Action::None
                }
                // Terminal will handle resize automatically
                Event::Resize(_, _) => Action::None,
            };

            if let Some(submission) = app.handle_action(action) {
                tasks.dispatch(submission);
            }
        }

        tasks.collect_finished(app).await;

        if app.should_quit {
            tasks.abort_all();
            info!("terminal page closed");
            break;
        }
    }

    Ok(())
}

/// Whether a click at `position` lands on the Send button.
fn clicked_send(app: &App, area: Rect, position: Position) -> bool {
    page::fits(area) && page::layout(area, &app.profile.copy).button.contains(position)
}

/// Get the TUI version.
pub fn tui_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
