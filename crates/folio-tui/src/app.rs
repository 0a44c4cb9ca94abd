//! Application state for the folio TUI.

use std::cell::Cell;

use folio_engine::{
    ChatResponse, ChatWidget, Profile, RequestFailure, RequestId, SendOutcome, Submission,
};

use crate::event::Action;
use crate::theme::Theme;
use crate::widgets::TextInputState;

/// Lines moved by PageUp / PageDown.
const PAGE_SCROLL: usize = 10;

/// Which control receives key input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// The text entry bound to the draft.
    #[default]
    Input,
    /// The Send button.
    SendButton,
}

impl Focus {
    /// The other control. There are only two, so next and previous agree.
    pub fn toggle(self) -> Self {
        match self {
            Focus::Input => Focus::SendButton,
            Focus::SendButton => Focus::Input,
        }
    }
}

/// Application state.
#[derive(Debug)]
pub struct App {
    /// Whether the app should quit.
    pub should_quit: bool,

    /// Whether the help overlay is visible.
    pub show_help: bool,

    /// Conversation, draft and request state.
    pub widget: ChatWidget,

    /// Editor state of the text entry. Mirrors `widget.draft()`.
    pub input: TextInputState,

    /// Focused control.
    pub focus: Focus,

    /// Page content and widget strings.
    pub profile: Profile,

    /// Colors and styles for every widget.
    pub theme: Theme,

    /// Lines scrolled back from the newest message.
    pub scroll_back: usize,

    /// Largest useful `scroll_back`, updated by the conversation pane on render.
    pub(crate) scroll_limit: Cell<usize>,

    /// Tick counter for animations.
    pub tick: usize,
}

impl App {
    /// Create the app for a profile.
    pub fn new(profile: Profile) -> Self {
        Self {
            should_quit: false,
            show_help: false,
            widget: ChatWidget::new(),
            input: TextInputState::new(),
            focus: Focus::Input,
            profile,
            theme: Theme::default(),
            scroll_back: 0,
            scroll_limit: Cell::new(0),
            tick: 0,
        }
    }

    /// Handle an action. Returns the request to perform when it submitted.
    pub fn handle_action(&mut self, action: Action) -> Option<Submission> {
        match action {
            Action::Quit => {
                self.should_quit = true;
                return None;
            }
            Action::Help => {
                self.show_help = !self.show_help;
                return None;
            }
            Action::None => return None,
            _ => {}
        }

        // Any key closes the help overlay
        if self.show_help {
            self.show_help = false;
            return None;
        }

        match action {
            Action::Back => self.should_quit = true,
            Action::Submit => return self.submit(),
            Action::Insert(ch) => {
                self.focus = Focus::Input;
                self.input.insert(ch);
                self.sync_draft();
            }
            Action::Backspace => {
                self.input.backspace();
                self.sync_draft();
            }
            Action::Delete => {
                self.input.delete();
                self.sync_draft();
            }
            Action::Left => self.input.move_left(),
            Action::Right => self.input.move_right(),
            Action::Home => self.input.move_home(),
            Action::End => self.input.move_end(),
            Action::HistoryPrev => {
                self.input.history_prev();
                self.sync_draft();
            }
            Action::HistoryNext => {
                self.input.history_next();
                self.sync_draft();
            }
            Action::FocusNext | Action::FocusPrev => self.focus = self.focus.toggle(),
            Action::ScrollUp => self.scroll_up(1),
            Action::ScrollDown => self.scroll_down(1),
            Action::PageUp => self.scroll_up(PAGE_SCROLL),
            Action::PageDown => self.scroll_down(PAGE_SCROLL),
            Action::Quit | Action::Help | Action::None => {}
        }
        None
    }

    /// Start sending the draft, the same way for Enter and the Send button.
    pub fn submit(&mut self) -> Option<Submission> {
        let submission = self.widget.submit()?;
        self.input.push_history(submission.request.message.clone());
        self.scroll_back = 0;
        Some(submission)
    }

    /// Fold a finished request back into the page.
    pub fn complete(
        &mut self,
        id: RequestId,
        result: Result<ChatResponse, RequestFailure>,
    ) -> SendOutcome {
        let outcome = self.widget.complete(id, result);
        if self.input.content() != self.widget.draft() {
            self.input.set_content(self.widget.draft());
        }
        if matches!(outcome, SendOutcome::Answered(_)) {
            self.scroll_back = 0;
        }
        outcome
    }

    /// Advance animations.
    pub fn tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    fn sync_draft(&mut self) {
        self.widget.set_draft(self.input.content());
    }

    fn scroll_up(&mut self, lines: usize) {
        self.scroll_back = (self.scroll_back + lines).min(self.scroll_limit.get());
    }

    fn scroll_down(&mut self, lines: usize) {
        self.scroll_back = self.scroll_back.saturating_sub(lines);
    }
}
