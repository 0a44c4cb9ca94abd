//! The chat widget state machine.
//!
//! [`ChatWidget`] owns the conversation, the draft, the request state and
//! the last error. It never performs I/O itself: [`ChatWidget::submit`]
//! returns a [`Submission`] describing the request to make, and the caller
//! hands the result back through [`ChatWidget::complete`]. This keeps the
//! state transitions independent of any UI or runtime.
//!
//! ```text
//!            submit() ─► Submission
//!   Idle ────────────────────────────► InFlight
//!    ▲                                     │
//!    └──────── complete(id, result) ◄──────┘
//! ```

use tracing::{debug, info, warn};

use crate::chat::{ChatRequest, ChatResponse, ConversationTurn, RequestFailure};
use crate::client::ChatBackend;

/// Whether a request is outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestState {
    /// Ready to send.
    #[default]
    Idle,
    /// Exactly one request is awaiting its result.
    InFlight,
}

/// Identifies one dispatched request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

impl RequestId {
    /// Numeric value, for logging.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// A request the widget wants performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// Id to pass back to [`ChatWidget::complete`].
    pub id: RequestId,
    /// Body to send to the backend.
    pub request: ChatRequest,
}

/// What happened to a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Nothing was sent (blank draft or a request already in flight).
    Skipped,
    /// The backend answered; the turn was appended.
    Answered(String),
    /// The request failed; the message is now the widget's error.
    Failed(String),
    /// The completion did not belong to the outstanding request.
    Stale,
}

/// The request currently awaiting a result.
#[derive(Debug, Clone)]
struct Outstanding {
    id: RequestId,
    message: String,
}

/// Conversation state of the chat widget.
#[derive(Debug, Default)]
pub struct ChatWidget {
    turns: Vec<ConversationTurn>,
    draft: String,
    outstanding: Option<Outstanding>,
    error: Option<String>,
    next_id: u64,
}

impl ChatWidget {
    /// Create an empty widget.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the draft. Allowed at any time, including while in flight.
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// The current draft.
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Completed turns, oldest first.
    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    /// Message of the most recent failure, if it has not been cleared.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Current request state.
    pub fn request_state(&self) -> RequestState {
        if self.outstanding.is_some() {
            RequestState::InFlight
        } else {
            RequestState::Idle
        }
    }

    /// Whether a request is outstanding.
    pub fn is_in_flight(&self) -> bool {
        self.outstanding.is_some()
    }

    /// Whether [`submit`](Self::submit) would dispatch a request right now.
    pub fn can_submit(&self) -> bool {
        !self.is_in_flight() && !self.draft.trim().is_empty()
    }

    /// The history a request sent now would carry.
    pub fn history(&self) -> Vec<(String, String)> {
        crate::chat::project_history(&self.turns)
    }

    /// Start sending the draft.
    ///
    /// Returns `None` without touching any state when the draft is blank or
    /// a request is already in flight. Otherwise the widget enters
    /// [`RequestState::InFlight`], clears the previous error and returns the
    /// request to perform.
    pub fn submit(&mut self) -> Option<Submission> {
        if let Some(outstanding) = &self.outstanding {
            debug!(
                request_id = outstanding.id.get(),
                "submit ignored: request in flight"
            );
            return None;
        }
        if self.draft.trim().is_empty() {
            debug!("submit ignored: empty draft");
            return None;
        }

        self.next_id += 1;
        let id = RequestId(self.next_id);
        let request = ChatRequest::new(self.draft.clone(), &self.turns);

        self.error = None;
        self.outstanding = Some(Outstanding {
            id,
            message: request.message.clone(),
        });

        info!(
            request_id = id.get(),
            history = request.history.len(),
            "chat request dispatched"
        );
        Some(Submission { id, request })
    }

    /// Fold the result of a dispatched request back into the widget.
    ///
    /// On success the turn is appended and the draft cleared. On failure the
    /// error is recorded and the draft kept so it can be resent. Either way
    /// the widget returns to [`RequestState::Idle`]. Results for any id
    /// other than the outstanding one are ignored.
    pub fn complete(
        &mut self,
        id: RequestId,
        result: Result<ChatResponse, RequestFailure>,
    ) -> SendOutcome {
        let outstanding = match self.outstanding.take() {
            Some(outstanding) if outstanding.id == id => outstanding,
            other => {
                self.outstanding = other;
                warn!(request_id = id.get(), "ignoring completion for unknown request");
                return SendOutcome::Stale;
            }
        };

        match result {
            Ok(response) => {
                info!(request_id = id.get(), "chat answer received");
                self.turns.push(ConversationTurn::new(
                    outstanding.message,
                    response.response.clone(),
                ));
                self.draft.clear();
                self.error = None;
                SendOutcome::Answered(response.response)
            }
            Err(failure) => {
                let message = failure.user_message();
                warn!(request_id = id.get(), error = %failure, "chat request failed");
                self.error = Some(message.clone());
                SendOutcome::Failed(message)
            }
        }
    }

    /// Submit the draft to `backend` and wait for the result.
    pub async fn send<B>(&mut self, backend: &B) -> SendOutcome
    where
        B: ChatBackend + ?Sized,
    {
        let Some(submission) = self.submit() else {
            return SendOutcome::Skipped;
        };
        let result = backend.send(submission.request).await;
        self.complete(submission.id, result)
    }
}
