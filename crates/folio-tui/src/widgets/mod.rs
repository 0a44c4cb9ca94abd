//! Widgets of the portfolio page.
//!
//! - [`Header`] - owner title and tagline
//! - [`InputBar`] - text entry bound to the draft
//! - [`SendButton`] - submit button with its in-flight state
//! - [`Footer`] - contact links and key hints

mod footer;
mod header;
mod input_bar;
mod send_button;
mod text_input;

pub use footer::{hints_for, Footer};
pub use header::Header;
pub use input_bar::InputBar;
pub use send_button::SendButton;
pub use text_input::TextInputState;
