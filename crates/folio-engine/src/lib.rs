//! folio-engine: Headless core of the folio portfolio assistant
//!
//! This crate provides everything except the terminal surface:
//! - Conversation types and the chat wire format
//! - The chat widget state machine (draft, log, in-flight guard, errors)
//! - The HTTP backend client
//! - Endpoint and profile configuration

pub mod chat;
pub mod client;
pub mod config;
pub mod widget;

// Re-export commonly used types
pub use chat::{
    project_history, ChatRequest, ChatResponse, ConversationTurn, RequestFailure, GENERIC_FAILURE,
};
pub use client::{ChatBackend, HealthStatus, HttpBackend};
pub use config::{
    ChatConfig, ConfigError, Profile, WidgetCopy, DEFAULT_ENDPOINT, ENDPOINT_ENV, PROFILE_ENV,
};
pub use widget::{ChatWidget, RequestId, RequestState, SendOutcome, Submission};

/// Returns the engine version.
pub fn engine_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
