//! The Send button.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::text::visual_width;
use crate::theme::Theme;

/// Button that submits the draft.
///
/// While a request is in flight it is drawn disabled with the working label.
pub struct SendButton<'a> {
    label: &'a str,
    working_label: &'a str,
    theme: &'a Theme,
    focused: bool,
    disabled: bool,
}

impl<'a> SendButton<'a> {
    pub fn new(label: &'a str, working_label: &'a str, theme: &'a Theme) -> Self {
        Self {
            label,
            working_label,
            theme,
            focused: false,
            disabled: false,
        }
    }

    #[must_use]
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Cells needed to show either label inside the border.
    pub fn width_for(label: &str, working_label: &str) -> u16 {
        let widest = visual_width(label).max(visual_width(working_label));
        u16::try_from(widest + 4).unwrap_or(u16::MAX)
    }
}

impl Widget for SendButton<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (label, label_style, border_style) = if self.disabled {
            let dim = Style::default()
                .fg(self.theme.muted)
                .add_modifier(Modifier::DIM);
            (self.working_label, dim, dim)
        } else if self.focused {
            (
                self.label,
                Style::default()
                    .fg(self.theme.base)
                    .bg(self.theme.primary)
                    .add_modifier(Modifier::BOLD),
                self.theme.border_style(true),
            )
        } else {
            (
                self.label,
                self.theme.label(self.theme.primary),
                self.theme.border_style(false),
            )
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style);
        Paragraph::new(Line::styled(label.to_string(), label_style).centered())
            .block(block)
            .render(area, buf);
    }
}
