//! The portfolio page: header, conversation, entry row and footer.
//!
//! ```text
//!            Devasena Vangavolu — Portfolio
//!   Ask about projects, certifications, and experience.
//! ────────────────────────────────────────────────────────
//! ┌ Chat ────────────────────────────────────────────────┐
//! │                                                      │
//! └──────────────────────────────────────────────────────┘
//! ┌──────────────────────────────────────┐┌──────────────┐
//! │> Ask me something about Devasena...  ││     Send     │
//! └──────────────────────────────────────┘└──────────────┘
//!        footer note / contact links / key hints
//! ```

use folio_engine::WidgetCopy;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::app::{App, Focus};
use crate::conversation::ConversationPane;
use crate::theme::Theme;
use crate::widgets::{hints_for, Footer, Header, InputBar, SendButton};

/// Widest the page content grows before it is centered.
pub const MAX_CONTENT_WIDTH: u16 = 100;

/// Smallest terminal the page is drawn in.
pub const MIN_WIDTH: u16 = 40;
pub const MIN_HEIGHT: u16 = 15;

/// Areas of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLayout {
    pub header: Rect,
    pub conversation: Rect,
    pub input: Rect,
    pub button: Rect,
    pub footer: Rect,
}

/// Split `area` into the page regions.
pub fn layout(area: Rect, copy: &WidgetCopy) -> PageLayout {
    let width = area.width.min(MAX_CONTENT_WIDTH);
    let content = Rect::new(
        area.x + (area.width - width) / 2,
        area.y,
        width,
        area.height,
    );

    let [header, conversation, entry, footer] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(3),
        Constraint::Length(3),
        Constraint::Length(3),
    ])
    .areas(content);

    let button_width = SendButton::width_for(&copy.send_label, &copy.working_label)
        .min(entry.width / 2);
    let [input, button] =
        Layout::horizontal([Constraint::Min(10), Constraint::Length(button_width)]).areas(entry);

    PageLayout {
        header,
        conversation,
        input,
        button,
        footer,
    }
}

/// Whether the page fits in `area`.
pub fn fits(area: Rect) -> bool {
    area.width >= MIN_WIDTH && area.height >= MIN_HEIGHT
}

/// Render the whole page, including the help overlay when open.
pub fn render(app: &App, area: Rect, buf: &mut Buffer) {
    Block::default()
        .style(Style::default().bg(app.theme.base))
        .render(area, buf);

    if !fits(area) {
        render_too_small(&app.theme, area, buf);
        return;
    }

    let copy = &app.profile.copy;
    let page = layout(area, copy);

    Header::new(&app.profile.title, &app.profile.tagline, &app.theme).render(page.header, buf);
    ConversationPane::new(&app.widget, copy, &app.theme)
        .scroll_back(app.scroll_back)
        .report_scroll_limit(&app.scroll_limit)
        .render(page.conversation, buf);
    InputBar::new(&app.input, &app.theme)
        .placeholder(&copy.placeholder)
        .focused(app.focus == Focus::Input)
        .render(page.input, buf);
    SendButton::new(&copy.send_label, &copy.working_label, &app.theme)
        .focused(app.focus == Focus::SendButton)
        .disabled(app.widget.is_in_flight())
        .render(page.button, buf);
    let hints = hints_for(app.focus);
    Footer::new(&app.profile, &hints, &app.theme).render(page.footer, buf);

    if app.show_help {
        render_help_overlay(&app.theme, area, buf);
    }
}

fn render_too_small(theme: &Theme, area: Rect, buf: &mut Buffer) {
    let message = format!("Terminal too small (need {MIN_WIDTH}x{MIN_HEIGHT})");
    let y = area.y + area.height / 2;
    Paragraph::new(Line::styled(message, Style::default().fg(theme.muted)).centered())
        .render(Rect::new(area.x, y, area.width, 1.min(area.height)), buf);
}

/// Render the help overlay.
pub fn render_help_overlay(theme: &Theme, area: Rect, buf: &mut Buffer) {
    let help_text = r"
  Chat
    Enter             Send the message
    Tab / Shift+Tab   Move between input and Send
    Space             Press Send when focused
    Up / Down         Recall sent messages
    PgUp / PgDn       Scroll the conversation
    F1                Toggle this help
    Esc / Ctrl+C      Quit

  [Press any key to close]
";

    let width = 50.min(area.width.saturating_sub(4));
    let height = 14.min(area.height.saturating_sub(4));
    let overlay_area = centered_fixed(width, height, area);

    Clear.render(overlay_area, buf);

    let block = Block::default()
        .title(" Help ")
        .title_style(theme.label(theme.primary))
        .borders(Borders::ALL)
        .border_style(theme.border_style(true))
        .style(Style::default().fg(theme.text).bg(theme.surface));

    Paragraph::new(help_text).block(block).render(overlay_area, buf);
}

/// Create a centered rect with fixed dimensions.
fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

/// Convert a rendered buffer to text, one line per row.
///
/// Trailing whitespace is trimmed from each line.
pub fn buffer_to_string(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut result = String::new();

    for y in area.y..area.y + area.height {
        for x in area.x..area.x + area.width {
            if let Some(cell) = buffer.cell((x, y)) {
                result.push_str(cell.symbol());
            }
        }
        while result.ends_with(' ') {
            result.pop();
        }
        result.push('\n');
    }

    if result.ends_with('\n') {
        result.pop();
    }

    result
}
