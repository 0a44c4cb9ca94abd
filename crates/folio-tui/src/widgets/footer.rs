//! Page footer: assistant note, contact links and key hints.
//!
//! ```text
//! 💬 I’m Devasena’s AI-powered portfolio. If something feels off, let me know.
//! ✉ someone@example.com │ 📅 https://calendly.com/someone
//! [Enter] send │ [Tab] button │ [PgUp/PgDn] scroll │ [F1] help │ [Esc] quit
//! ```

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use folio_engine::Profile;

use crate::app::Focus;
use crate::theme::Theme;

/// A single keybinding hint.
#[derive(Debug, Clone)]
pub struct KeyHint {
    /// The key or key combination (e.g., "Tab", "Ctrl+C").
    pub key: &'static str,
    /// What it does.
    pub action: &'static str,
}

impl KeyHint {
    pub const fn new(key: &'static str, action: &'static str) -> Self {
        Self { key, action }
    }
}

/// Hints for the focused control.
pub fn hints_for(focus: Focus) -> Vec<KeyHint> {
    let mut hints = match focus {
        Focus::Input => vec![KeyHint::new("Enter", "send"), KeyHint::new("Tab", "button")],
        Focus::SendButton => vec![
            KeyHint::new("Enter/Space", "send"),
            KeyHint::new("Tab", "input"),
        ],
    };
    hints.extend([
        KeyHint::new("PgUp/PgDn", "scroll"),
        KeyHint::new("F1", "help"),
        KeyHint::new("Esc", "quit"),
    ]);
    hints
}

pub struct Footer<'a> {
    profile: &'a Profile,
    hints: &'a [KeyHint],
    theme: &'a Theme,
}

impl<'a> Footer<'a> {
    pub fn new(profile: &'a Profile, hints: &'a [KeyHint], theme: &'a Theme) -> Self {
        Self {
            profile,
            hints,
            theme,
        }
    }

    fn contact_line(&self) -> Option<Line<'static>> {
        let sub = Style::default().fg(self.theme.secondary);
        let sep = Span::styled(" │ ", Style::default().fg(self.theme.muted));

        let mut spans = Vec::new();
        if let Some(email) = &self.profile.contact_email {
            spans.push(Span::styled(format!("✉ {email}"), sub));
        }
        if let Some(url) = &self.profile.meeting_url {
            if !spans.is_empty() {
                spans.push(sep);
            }
            spans.push(Span::styled(format!("📅 {url}"), sub));
        }
        (!spans.is_empty()).then(|| Line::from(spans).centered())
    }

    fn hint_line(&self) -> Line<'static> {
        let muted = Style::default().fg(self.theme.muted);
        let mut spans = Vec::new();
        for (i, hint) in self.hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" │ ", muted));
            }
            spans.push(Span::styled("[", muted));
            spans.push(Span::styled(hint.key, Style::default().fg(self.theme.primary)));
            spans.push(Span::styled("] ", muted));
            spans.push(Span::styled(hint.action, Style::default().fg(self.theme.subtext)));
        }
        Line::from(spans).centered()
    }
}

impl Widget for Footer<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut lines = vec![Line::styled(
            self.profile.footer_note.clone(),
            Style::default().fg(self.theme.subtext),
        )
        .centered()];
        lines.extend(self.contact_line());
        lines.push(self.hint_line());

        // Keep the key hints on the last row when space is short
        let skip = lines.len().saturating_sub(area.height as usize);
        Paragraph::new(lines.split_off(skip)).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::buffer_to_string;

    fn render(profile: &Profile, focus: Focus, height: u16) -> String {
        let theme = Theme::default();
        let hints = hints_for(focus);
        let area = Rect::new(0, 0, 100, height);
        let mut buf = Buffer::empty(area);
        Footer::new(profile, &hints, &theme).render(area, &mut buf);
        buffer_to_string(&buf)
    }

    #[test]
    fn test_footer_shows_contacts_and_hints() {
        let profile = Profile {
            contact_email: Some("ada@example.com".into()),
            meeting_url: Some("https://example.com/meet".into()),
            ..Profile::default()
        };
        let out = render(&profile, Focus::Input, 3);

        assert!(out.contains("ada@example.com"));
        assert!(out.contains("https://example.com/meet"));
        assert!(out.contains("[Enter] send"));
    }

    #[test]
    fn test_footer_hides_missing_contacts() {
        let profile = Profile {
            footer_note: "Note".into(),
            contact_email: None,
            meeting_url: None,
            ..Profile::default()
        };
        let out = render(&profile, Focus::SendButton, 3);

        assert!(!out.contains('✉'));
        assert!(out.contains("Note"));
        assert!(out.contains("[Enter/Space] send"));
    }

    #[test]
    fn test_input_hint_line() {
        let theme = Theme::default();
        let profile = Profile::default();
        let hints = hints_for(Focus::Input);
        let area = Rect::new(0, 0, 73, 1);
        let mut buf = Buffer::empty(area);
        Footer::new(&profile, &hints, &theme).render(area, &mut buf);

        insta::assert_snapshot!(
            buffer_to_string(&buf),
            @"[Enter] send │ [Tab] button │ [PgUp/PgDn] scroll │ [F1] help │ [Esc] quit"
        );
    }

    #[test]
    fn test_short_footer_keeps_hints() {
        let out = render(&Profile::default(), Focus::Input, 1);
        assert!(out.contains("[F1] help"));
        assert!(!out.contains("portfolio"));
    }
}
