//! Chat requests running in the background.
//!
//! Each [`Submission`] becomes a tokio task against the shared backend.
//! Finished tasks are polled after every event and folded into the [`App`].

use std::sync::Arc;

use folio_engine::{ChatBackend, ChatResponse, RequestFailure, RequestId, Submission};
use tokio::task::JoinHandle;
use tracing::warn;

use crate::app::App;

type ChatHandle = JoinHandle<Result<ChatResponse, RequestFailure>>;

/// Outstanding chat requests.
pub(crate) struct ChatTasks {
    backend: Arc<dyn ChatBackend>,
    handles: Vec<(RequestId, ChatHandle)>,
}

impl ChatTasks {
    pub(crate) fn new(backend: Arc<dyn ChatBackend>) -> Self {
        Self {
            backend,
            handles: Vec::new(),
        }
    }

    /// Start performing a submission.
    pub(crate) fn dispatch(&mut self, submission: Submission) {
        let backend = Arc::clone(&self.backend);
        let handle = tokio::spawn(async move { backend.send(submission.request).await });
        self.handles.push((submission.id, handle));
    }

    /// Hand every finished request back to the app.
    pub(crate) async fn collect_finished(&mut self, app: &mut App) {
        let mut completed = Vec::new();
        for (i, (_, handle)) in self.handles.iter().enumerate() {
            if handle.is_finished() {
                completed.push(i);
            }
        }
        for i in completed.into_iter().rev() {
            let (id, handle) = self.handles.remove(i);
            let result = match handle.await {
                Ok(result) => result,
                Err(e) => {
                    warn!(request_id = id.get(), error = %e, "chat task did not finish");
                    Err(RequestFailure::Network(String::new()))
                }
            };
            app.complete(id, result);
        }
    }

    /// Abort anything still running.
    pub(crate) fn abort_all(self) {
        for (_, handle) in self.handles {
            handle.abort();
        }
    }
}
