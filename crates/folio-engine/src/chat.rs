//! Conversation types and the chat wire format.
//!
//! A conversation is an append-only list of [`ConversationTurn`]s. Each
//! request to the backend carries the new message plus the prior turns
//! projected into `(user, bot)` pairs.

use serde::{Deserialize, Serialize};

/// Message shown when a failure carries no text of its own.
pub const GENERIC_FAILURE: &str = "Request failed";

/// One completed user/bot exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    /// What the user asked.
    pub user: String,
    /// What the assistant answered.
    pub bot: String,
}

impl ConversationTurn {
    /// Create a new turn.
    pub fn new(user: impl Into<String>, bot: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            bot: bot.into(),
        }
    }

    /// The `(user, bot)` pair sent to the backend as history.
    pub fn as_pair(&self) -> (String, String) {
        (self.user.clone(), self.bot.clone())
    }
}

/// Project a conversation into the history pairs sent with a request.
pub fn project_history(turns: &[ConversationTurn]) -> Vec<(String, String)> {
    turns.iter().map(ConversationTurn::as_pair).collect()
}

/// Request body for the chat endpoint.
///
/// Serializes as `{"message": "...", "history": [["user", "bot"], ...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The message being sent.
    pub message: String,
    /// Prior turns, oldest first.
    #[serde(default)]
    pub history: Vec<(String, String)>,
}

impl ChatRequest {
    /// Build a request for `message` on top of the given conversation.
    pub fn new(message: impl Into<String>, turns: &[ConversationTurn]) -> Self {
        Self {
            message: message.into(),
            history: project_history(turns),
        }
    }
}

/// Response body from the chat endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// The answer text.
    pub response: String,
    /// Documents the answer was drawn from. Accepted in any shape, never displayed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<serde_json::Value>,
}

impl ChatResponse {
    /// Create a response with no sources.
    pub fn text(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            sources: None,
        }
    }
}

/// Why a chat request did not produce an answer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestFailure {
    /// The request never got a response (connection refused, DNS, TLS...).
    #[error("{0}")]
    Network(String),

    /// The backend answered with a non-success status.
    #[error("Request failed with status code {status}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, kept for logging.
        body: String,
    },

    /// The response body was not a valid chat response.
    #[error("Invalid response: {0}")]
    Decode(String),
}

impl RequestFailure {
    /// Text to show the user, falling back to [`GENERIC_FAILURE`].
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            GENERIC_FAILURE.to_string()
        } else {
            message
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    #[test]
    fn test_project_history_keeps_order() {
        let turns = vec![
            ConversationTurn::new("first", "one"),
            ConversationTurn::new("second", "two"),
        ];
        assert_eq!(
            project_history(&turns),
            vec![
                ("first".to_string(), "one".to_string()),
                ("second".to_string(), "two".to_string()),
            ]
        );
    }

    #[test]
    fn test_request_wire_format() {
        let turns = vec![ConversationTurn::new("Hi", "Hello!")];
        let request = ChatRequest::new("What are the projects?", &turns);
        let json = serde_json::to_string(&request).unwrap();
        assert_snapshot!(json, @r#"{"message":"What are the projects?","history":[["Hi","Hello!"]]}"#);
    }

    #[test]
    fn test_request_without_history() {
        let request = ChatRequest::new("Hello", &[]);
        let json = serde_json::to_string(&request).unwrap();
        assert_snapshot!(json, @r#"{"message":"Hello","history":[]}"#);
    }

    #[test]
    fn test_response_sources_are_optional() {
        let bare: ChatResponse = serde_json::from_str(r#"{"response":"Hello from test"}"#).unwrap();
        assert_eq!(bare, ChatResponse::text("Hello from test"));

        let with_sources: ChatResponse =
            serde_json::from_str(r#"{"response":"Hi","sources":["resume.txt"]}"#).unwrap();
        assert_eq!(with_sources.response, "Hi");
        assert_eq!(with_sources.sources, Some(serde_json::json!(["resume.txt"])));
    }

    #[test]
    fn test_response_sources_of_any_shape_keep_the_answer() {
        let null: ChatResponse =
            serde_json::from_str(r#"{"response":"hi","sources":null}"#).unwrap();
        assert_eq!(null, ChatResponse::text("hi"));

        let objects: ChatResponse =
            serde_json::from_str(r#"{"response":"hi","sources":[{"doc":"a"}, 3]}"#).unwrap();
        assert_eq!(objects.response, "hi");
    }

    #[test]
    fn test_response_missing_text_is_rejected() {
        let result = serde_json::from_str::<ChatResponse>(r#"{"answer":"nope"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_failure_messages() {
        assert_eq!(
            RequestFailure::Network("Network Error".into()).user_message(),
            "Network Error"
        );
        assert_eq!(
            RequestFailure::Status {
                status: 500,
                body: String::new()
            }
            .user_message(),
            "Request failed with status code 500"
        );
        assert_eq!(
            RequestFailure::Network("  ".into()).user_message(),
            GENERIC_FAILURE
        );
    }
}
