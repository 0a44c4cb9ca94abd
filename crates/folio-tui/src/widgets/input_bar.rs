//! Text entry bound to the chat draft.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use unicode_width::UnicodeWidthChar;

use super::TextInputState;
use crate::theme::Theme;

const PROMPT: &str = "> ";
const CURSOR: &str = "█";

/// Single-line input with a placeholder and a block cursor.
pub struct InputBar<'a> {
    input: &'a TextInputState,
    theme: &'a Theme,
    placeholder: &'a str,
    focused: bool,
}

impl<'a> InputBar<'a> {
    pub fn new(input: &'a TextInputState, theme: &'a Theme) -> Self {
        Self {
            input,
            theme,
            placeholder: "",
            focused: false,
        }
    }

    /// Text shown while the input is empty.
    #[must_use]
    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    #[must_use]
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn build_line(&self, width: usize) -> Line<'static> {
        let prompt = Span::styled(PROMPT, Style::default().fg(self.theme.primary));
        let cursor = Span::styled(CURSOR, Style::default().fg(self.theme.text));

        if self.input.is_empty() {
            let placeholder =
                Span::styled(self.placeholder.to_string(), Style::default().fg(self.theme.muted));
            return if self.focused {
                Line::from(vec![prompt, cursor, placeholder])
            } else {
                Line::from(vec![prompt, placeholder])
            };
        }

        let chars: Vec<char> = self.input.content().chars().collect();
        let cursor_at = self.input.cursor.min(chars.len());
        let room = width.saturating_sub(PROMPT.len());
        let start = window_start(&chars, cursor_at, room);
        let text = Style::default().fg(self.theme.text);

        let before: String = chars[start..cursor_at].iter().collect();
        let after: String = chars[cursor_at..].iter().collect();
        let mut spans = vec![prompt, Span::styled(before, text)];
        if self.focused {
            spans.push(cursor);
        }
        spans.push(Span::styled(after, text));
        Line::from(spans)
    }
}

/// First character to show so the cursor cell stays inside `room` cells.
fn window_start(chars: &[char], cursor: usize, room: usize) -> usize {
    let mut start = cursor;
    let mut used = 1;
    while start > 0 {
        let w = chars[start - 1].width().unwrap_or(0);
        if used + w > room {
            break;
        }
        used += w;
        start -= 1;
    }
    start
}

impl Widget for InputBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(self.focused));
        let inner = block.inner(area);
        let line = self.build_line(inner.width as usize);

        Paragraph::new(line).block(block).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::buffer_to_string;

    fn render(input: &TextInputState, focused: bool, width: u16) -> String {
        let theme = Theme::default();
        let area = Rect::new(0, 0, width, 3);
        let mut buf = Buffer::empty(area);
        InputBar::new(input, &theme)
            .placeholder("Ask me something...")
            .focused(focused)
            .render(area, &mut buf);
        buffer_to_string(&buf)
    }

    #[test]
    fn test_empty_shows_placeholder() {
        let input = TextInputState::new();
        let out = render(&input, false, 40);
        assert!(out.contains("> Ask me something..."));
    }

    #[test]
    fn test_cursor_drawn_when_focused() {
        let mut input = TextInputState::new();
        input.set_content("hello");
        input.move_left();

        assert!(render(&input, true, 40).contains("> hell█o"));
        assert!(render(&input, false, 40).contains("> hello"));
    }

    #[test]
    fn test_long_draft_keeps_cursor_visible() {
        let mut input = TextInputState::new();
        input.set_content("the quick brown fox jumps over the lazy dog");

        let out = render(&input, true, 20);

        assert!(out.contains("lazy dog█"));
        assert!(!out.contains("quick"));
    }

    #[test]
    fn test_window_start() {
        let chars: Vec<char> = "abcdef".chars().collect();
        assert_eq!(window_start(&chars, 6, 10), 0);
        assert_eq!(window_start(&chars, 6, 3), 4);
        assert_eq!(window_start(&chars, 0, 3), 0);
    }
}
