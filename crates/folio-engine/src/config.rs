//! Configuration for folio.
//!
//! Two pieces of configuration exist:
//! - [`ChatConfig`]: where chat requests are sent.
//! - [`Profile`]: the page copy (owner title, footer, widget strings).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

/// Endpoint used when nothing else is configured.
pub const DEFAULT_ENDPOINT: &str = "https://pentastyle-ungesticular-carylon.ngrok-free.dev/chat";

/// Environment variable overriding the chat endpoint.
pub const ENDPOINT_ENV: &str = "FOLIO_API_URL";

/// Environment variable pointing at a profile JSON file.
pub const PROFILE_ENV: &str = "FOLIO_PROFILE";

/// Where chat requests go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatConfig {
    /// Full URL of the chat endpoint.
    pub endpoint: Url,
}

impl ChatConfig {
    /// Resolve the endpoint: explicit flag, then `FOLIO_API_URL`, then the default.
    pub fn resolve(flag: Option<&str>) -> Result<Self, ConfigError> {
        Self::resolve_with(flag, std::env::var(ENDPOINT_ENV).ok())
    }

    /// Resolve the endpoint from explicit sources.
    ///
    /// Blank values count as unset.
    pub fn resolve_with(flag: Option<&str>, env: Option<String>) -> Result<Self, ConfigError> {
        let raw = flag
            .map(str::to_owned)
            .filter(|v| !v.trim().is_empty())
            .or_else(|| env.filter(|v| !v.trim().is_empty()))
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        Self::from_url(&raw)
    }

    /// Parse and validate an endpoint URL.
    pub fn from_url(raw: &str) -> Result<Self, ConfigError> {
        let raw = raw.trim();
        let endpoint = Url::parse(raw).map_err(|e| ConfigError::InvalidEndpoint {
            url: raw.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidEndpoint {
                url: raw.to_string(),
                reason: format!("unsupported scheme '{}'", endpoint.scheme()),
            });
        }
        Ok(Self { endpoint })
    }
}

/// User-facing strings of the chat widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetCopy {
    /// Shown in place of the conversation while it is empty.
    pub welcome: String,
    /// Placeholder of the empty text entry.
    pub placeholder: String,
    /// Label in front of user lines.
    pub user_label: String,
    /// Label in front of assistant lines.
    pub bot_label: String,
    /// Send button label while idle.
    pub send_label: String,
    /// Send button label while a request is in flight.
    pub working_label: String,
}

impl Default for WidgetCopy {
    fn default() -> Self {
        Self {
            welcome: "💬 Devasena’s Personal Assistant AI is here — ask me anything about her \
                      projects, skills, or achievements!"
                .into(),
            placeholder: "Ask me something about Devasena...".into(),
            user_label: "You:".into(),
            bot_label: "Devasena’s AI:".into(),
            send_label: "Send".into(),
            working_label: "✨ Thinking…".into(),
        }
    }
}

/// Portfolio page content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    /// Page title shown in the header.
    pub title: String,
    /// One-line description under the title.
    pub tagline: String,
    /// Footer line introducing the assistant.
    pub footer_note: String,
    /// Address for feedback. `null` hides it.
    pub contact_email: Option<String>,
    /// Link for booking a meeting. `null` hides it.
    pub meeting_url: Option<String>,
    /// Chat widget strings.
    pub copy: WidgetCopy,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            title: "Devasena Vangavolu — Portfolio".into(),
            tagline: "Ask about projects, certifications, and experience.".into(),
            footer_note: "💬 I’m Devasena’s AI-powered portfolio. If something feels off, let me know."
                .into(),
            contact_email: Some("vangavoludevasena@gmail.com".into()),
            meeting_url: Some("https://calendly.com/devasena".into()),
            copy: WidgetCopy::default(),
        }
    }
}

impl Profile {
    /// Load a profile from a JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        serde_json::from_str(&content).map_err(ConfigError::Parse)
    }

    /// Save the profile as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::Io)?;
        }
        std::fs::write(path, content).map_err(ConfigError::Io)
    }

    /// Resolve the profile: explicit path, then `FOLIO_PROFILE`, then defaults.
    pub fn resolve(flag: Option<&Path>) -> Result<Self, ConfigError> {
        let env = std::env::var_os(PROFILE_ENV).map(PathBuf::from);
        Self::resolve_with(flag, env.as_deref())
    }

    /// Resolve the profile from explicit sources.
    pub fn resolve_with(flag: Option<&Path>, env: Option<&Path>) -> Result<Self, ConfigError> {
        match flag.or(env) {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

/// Errors that can occur while resolving configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading or writing a profile.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing profile JSON.
    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),

    /// Error serializing a profile to JSON.
    #[error("Serialize error: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The chat endpoint is not a usable URL.
    #[error("Invalid endpoint '{url}': {reason}")]
    InvalidEndpoint {
        /// The rejected value.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    HttpClient(String),
}
