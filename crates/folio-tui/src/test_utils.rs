//! Test utilities for folio-tui rendering tests.

use crate::app::App;
use crate::page;
use folio_engine::{Profile, WidgetCopy};
use ratatui::{buffer::Buffer, layout::Rect};

/// Default terminal width for tests.
pub const TEST_WIDTH: u16 = 80;

/// Default terminal height for tests.
pub const TEST_HEIGHT: u16 = 24;

/// Profile with short strings that never wrap at test sizes.
pub fn test_profile() -> Profile {
    Profile {
        title: "Test Portfolio".into(),
        tagline: "Projects and experience".into(),
        footer_note: "Footer note".into(),
        contact_email: Some("owner@example.com".into()),
        meeting_url: None,
        copy: WidgetCopy {
            welcome: "Ask me anything!".into(),
            placeholder: "Ask something...".into(),
            bot_label: "Bot:".into(),
            ..WidgetCopy::default()
        },
    }
}

/// Create a test app with the test profile.
pub fn create_test_app() -> App {
    App::new(test_profile())
}

pub use crate::page::buffer_to_string;

/// Render the page at the default test size and return it as a string.
pub fn render_page_to_string(app: &App) -> String {
    render_page_to_string_sized(app, TEST_WIDTH, TEST_HEIGHT)
}

/// Render the page at a custom size and return it as a string.
pub fn render_page_to_string_sized(app: &App, width: u16, height: u16) -> String {
    let area = Rect::new(0, 0, width, height);
    let mut buffer = Buffer::empty(area);
    page::render(app, area, &mut buffer);
    buffer_to_string(&buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_to_string() {
        let area = Rect::new(0, 0, 10, 3);
        let mut buffer = Buffer::empty(area);
        buffer.set_string(0, 0, "Hello", ratatui::style::Style::default());
        buffer.set_string(0, 1, "World", ratatui::style::Style::default());

        assert_eq!(buffer_to_string(&buffer), "Hello\nWorld\n");
    }
}
