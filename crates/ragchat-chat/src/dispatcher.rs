use std::sync::Arc;

use ragchat_api::{ChatBackend, ChatRequest};
use ragchat_types::{DispatchError, SessionId, SubmitError};

use crate::history::HistoryWindow;
use crate::session::SessionState;

/// A request that has been recorded in the session but not yet answered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDispatch {
    session_id: SessionId,
    request: ChatRequest,
}

impl PendingDispatch {
    /// Session the request was issued for
    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn request(&self) -> &ChatRequest {
        &self.request
    }
}

/// How a finished dispatch affected the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// An assistant turn was appended
    Replied(String),
    /// A SystemError turn was appended
    Failed(DispatchError),
    /// The session was reset while the request was in flight; nothing changed
    Discarded { session_id: SessionId },
}

/// Runs request/response cycles against the chat backend and records the
/// results in a [`SessionState`].
///
/// A cycle is split into [`begin`](Self::begin), [`send`](Self::send) and
/// [`complete`](Self::complete) so that the session can stay usable (and be
/// reset) while the network call is outstanding. [`submit`](Self::submit)
/// chains the three.
pub struct RequestDispatcher {
    backend: Arc<dyn ChatBackend>,
    window: HistoryWindow,
}

impl RequestDispatcher {
    pub fn new(backend: Arc<dyn ChatBackend>, window: HistoryWindow) -> Self {
        Self { backend, window }
    }

    pub fn window(&self) -> &HistoryWindow {
        &self.window
    }

    /// Record the user turn and build the outbound request.
    ///
    /// The history carries the turns preceding the new message; the message
    /// itself travels in `query`.
    pub fn begin(&self, session: &mut SessionState, text: &str) -> Result<PendingDispatch, SubmitError> {
        let history = session.history(&self.window);
        session.append_user_turn(text)?;

        let session_id = session.id();
        let request = ChatRequest {
            query: text.trim().to_string(),
            session_id: session_id.to_string(),
            history,
        };
        log::debug!(
            "session {}: dispatching message with {} history lines",
            session_id,
            request.history.len()
        );
        Ok(PendingDispatch { session_id, request })
    }

    /// Perform the network call; exactly one request, no retries
    pub async fn send(&self, pending: &PendingDispatch) -> Result<String, DispatchError> {
        self.backend.send(&pending.request).await
    }

    /// Apply the result to the session it was issued for.
    ///
    /// Results for a session that has since been reset are dropped.
    pub fn complete(
        &self,
        session: &mut SessionState,
        pending: PendingDispatch,
        result: Result<String, DispatchError>,
    ) -> DispatchOutcome {
        if pending.session_id != session.id() {
            log::info!(
                "discarding reply for session {} (current session is {})",
                pending.session_id,
                session.id()
            );
            return DispatchOutcome::Discarded {
                session_id: pending.session_id,
            };
        }

        let result = result.and_then(|reply| {
            if reply.trim().is_empty() {
                Err(DispatchError::MalformedResponse("empty reply".to_string()))
            } else {
                Ok(reply)
            }
        });

        match result {
            Ok(reply) => {
                // Non-empty by the check above
                let _ = session.append_assistant_turn(&reply);
                DispatchOutcome::Replied(reply)
            }
            Err(err) => {
                log::warn!("session {}: {}", pending.session_id, err);
                let _ = session.append_error_turn(&err.user_message());
                DispatchOutcome::Failed(err)
            }
        }
    }

    /// Full cycle: record the user turn, call the backend, record the outcome
    pub async fn submit(&self, session: &mut SessionState, text: &str) -> Result<DispatchOutcome, SubmitError> {
        let pending = self.begin(session, text)?;
        let result = self.send(&pending).await;
        Ok(self.complete(session, pending, result))
    }
}
