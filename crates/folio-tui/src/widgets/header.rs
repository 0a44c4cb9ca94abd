//! Page header: owner title and tagline.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::theme::Theme;

pub struct Header<'a> {
    title: &'a str,
    tagline: &'a str,
    theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(title: &'a str, tagline: &'a str, theme: &'a Theme) -> Self {
        Self {
            title,
            tagline,
            theme,
        }
    }
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = vec![
            Line::styled(self.title.to_string(), self.theme.label(self.theme.primary)).centered(),
            Line::styled(
                self.tagline.to_string(),
                Style::default().fg(self.theme.subtext),
            )
            .centered(),
        ];
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(self.theme.border_style(false));
        Paragraph::new(lines).block(block).render(area, buf);
    }
}
