//! Conversation pane: the turn log, or the welcome message while it is empty.
//!
//! ```text
//! ┌ Chat ──────────────────────────────────────┐
//! │                         You: What projects? │
//! │ Devasena’s AI: Quite a few! The robotics... │
//! │                                             │
//! │ ⚠ Request failed                            │
//! └─────────────────────────────────────────────┘
//! ```

use std::cell::Cell;

use folio_engine::{ChatWidget, WidgetCopy};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::text::{wrap_lines, wrap_text};
use crate::theme::Theme;

pub struct ConversationPane<'a> {
    widget: &'a ChatWidget,
    copy: &'a WidgetCopy,
    theme: &'a Theme,
    scroll_back: usize,
    scroll_limit: Option<&'a Cell<usize>>,
}

impl<'a> ConversationPane<'a> {
    pub fn new(widget: &'a ChatWidget, copy: &'a WidgetCopy, theme: &'a Theme) -> Self {
        Self {
            widget,
            copy,
            theme,
            scroll_back: 0,
            scroll_limit: None,
        }
    }

    /// Lines scrolled back from the newest message.
    #[must_use]
    pub fn scroll_back(mut self, lines: usize) -> Self {
        self.scroll_back = lines;
        self
    }

    /// Cell that receives the largest useful scroll-back after rendering.
    #[must_use]
    pub fn report_scroll_limit(mut self, cell: &'a Cell<usize>) -> Self {
        self.scroll_limit = Some(cell);
        self
    }

    fn welcome_lines(&self, width: usize, height: usize) -> Vec<Line<'static>> {
        let style = Style::default().fg(self.theme.subtext);
        let text: Vec<Line<'static>> = wrap_text(&self.copy.welcome, width.saturating_sub(4))
            .into_iter()
            .map(|row| Line::styled(row, style).centered())
            .collect();
        let pad = height.saturating_sub(text.len() + 1) / 2;
        let mut lines = vec![Line::from(""); pad];
        lines.extend(text);
        lines
    }

    fn turn_lines(&self) -> Vec<Line<'static>> {
        let user_label = self.theme.label(self.theme.secondary);
        let bot_label = self.theme.label(self.theme.primary);
        let body = Style::default().fg(self.theme.text);

        let mut lines = Vec::new();
        for (i, turn) in self.widget.turns().iter().enumerate() {
            if i > 0 {
                lines.push(Line::from(""));
            }
            lines.extend(
                labelled(&self.copy.user_label, user_label, &turn.user, body)
                    .into_iter()
                    .map(Line::right_aligned),
            );
            lines.extend(labelled(&self.copy.bot_label, bot_label, &turn.bot, body));
        }
        lines
    }
}

/// `label text` on the first line, continuation lines as they are.
fn labelled(label: &str, label_style: Style, text: &str, body: Style) -> Vec<Line<'static>> {
    let mut rows = text.lines();
    let first = rows.next().unwrap_or_default();
    let mut lines = vec![Line::from(vec![
        Span::styled(format!("{label} "), label_style),
        Span::styled(first.to_string(), body),
    ])];
    lines.extend(rows.map(|row| Line::styled(row.to_string(), body)));
    lines
}

#[allow(clippy::cast_possible_truncation)]
impl Widget for ConversationPane<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Chat ")
            .title_style(Style::default().fg(self.theme.text))
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(false));
        let inner = block.inner(area);
        block.render(area, buf);

        let width = inner.width as usize;
        let height = inner.height as usize;

        let mut lines = if self.widget.turns().is_empty() {
            self.welcome_lines(width, height)
        } else {
            wrap_lines(self.turn_lines(), width)
        };
        if let Some(error) = self.widget.error() {
            lines.push(Line::from(""));
            lines.extend(wrap_lines(
                vec![Line::styled(
                    format!("⚠ {error}"),
                    Style::default().fg(self.theme.error),
                )],
                width,
            ));
        }

        // Pin to the newest line, then step back by the requested amount
        let limit = lines.len().saturating_sub(height);
        if let Some(cell) = self.scroll_limit {
            cell.set(limit);
        }
        let offset = limit - self.scroll_back.min(limit);

        Paragraph::new(lines)
            .scroll((offset.min(u16::MAX as usize) as u16, 0))
            .render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::buffer_to_string;
    use folio_engine::{ChatResponse, RequestFailure};

    fn copy() -> WidgetCopy {
        WidgetCopy {
            welcome: "Ask me anything!".into(),
            bot_label: "Bot:".into(),
            ..WidgetCopy::default()
        }
    }

    fn answered(widget: &mut ChatWidget, question: &str, answer: &str) {
        widget.set_draft(question);
        let submission = widget.submit().unwrap();
        widget.complete(submission.id, Ok(ChatResponse::text(answer)));
    }

    fn render(widget: &ChatWidget, scroll_back: usize, height: u16) -> (String, usize) {
        let theme = Theme::default();
        let copy = copy();
        let limit = Cell::new(0);
        let area = Rect::new(0, 0, 40, height);
        let mut buf = Buffer::empty(area);
        ConversationPane::new(widget, &copy, &theme)
            .scroll_back(scroll_back)
            .report_scroll_limit(&limit)
            .render(area, &mut buf);
        (buffer_to_string(&buf), limit.get())
    }

    #[test]
    fn test_empty_log_shows_welcome() {
        let widget = ChatWidget::new();
        let (out, _) = render(&widget, 0, 10);
        assert!(out.contains("Ask me anything!"));
        assert!(!out.contains("You:"));
    }

    #[test]
    fn test_turns_render_user_then_bot() {
        let mut widget = ChatWidget::new();
        answered(&mut widget, "Hi", "Hello!");
        answered(&mut widget, "Projects?", "Several.");

        let (out, _) = render(&widget, 0, 12);

        assert!(!out.contains("Ask me anything!"));
        let pos = |needle: &str| out.find(needle).unwrap();
        assert!(pos("You: Hi") < pos("Bot: Hello!"));
        assert!(pos("Bot: Hello!") < pos("You: Projects?"));
        assert!(pos("You: Projects?") < pos("Bot: Several."));
    }

    #[test]
    fn test_user_lines_are_right_aligned() {
        let mut widget = ChatWidget::new();
        answered(&mut widget, "Hi", "Hello!");

        let (out, _) = render(&widget, 0, 6);
        let user_row = out.lines().find(|l| l.contains("You: Hi")).unwrap();

        assert!(user_row.ends_with("You: Hi│"));
    }

    #[test]
    fn test_multiline_answer_keeps_rows() {
        let mut widget = ChatWidget::new();
        answered(&mut widget, "List", "one\ntwo");

        let (out, _) = render(&widget, 0, 8);

        assert!(out.contains("Bot: one"));
        assert!(out.lines().any(|l| l.starts_with("│two")));
    }

    #[test]
    fn test_error_line_below_log() {
        let mut widget = ChatWidget::new();
        answered(&mut widget, "Hi", "Hello!");
        widget.set_draft("again");
        let submission = widget.submit().unwrap();
        widget.complete(submission.id, Err(RequestFailure::Network(String::new())));

        let (out, _) = render(&widget, 0, 10);

        assert!(out.find("Bot: Hello!").unwrap() < out.find("⚠ Request failed").unwrap());
    }

    #[test]
    fn test_error_shown_with_empty_log() {
        let mut widget = ChatWidget::new();
        widget.set_draft("hello");
        let submission = widget.submit().unwrap();
        widget.complete(submission.id, Err(RequestFailure::Network(String::new())));

        let (out, _) = render(&widget, 0, 10);

        assert!(out.contains("Ask me anything!"));
        assert!(out.contains("⚠ Request failed"));
    }

    #[test]
    fn test_scrolls_to_newest_and_back() {
        let mut widget = ChatWidget::new();
        for i in 0..5 {
            answered(&mut widget, &format!("q{i}"), &format!("a{i}"));
        }

        // 5 turns = 14 lines; 4 visible rows
        let (newest, limit) = render(&widget, 0, 6);
        assert_eq!(limit, 10);
        assert!(newest.contains("Bot: a4"));
        assert!(!newest.contains("You: q0"));

        let (oldest, _) = render(&widget, 99, 6);
        assert!(oldest.contains("You: q0"));
        assert!(!oldest.contains("Bot: a4"));
    }
}
