use ragchat_types::{Role, SessionId, SubmitError, Turn};

use crate::history::HistoryWindow;
use crate::observer::{Observers, SessionEvent, SubscriptionId};

/// Single source of truth for the current conversation.
///
/// Owned by the UI layer and handed to the dispatcher by `&mut`. At most one
/// request is outstanding at a time: while `pending` is set, new user turns
/// are refused with [`SubmitError::Busy`].
#[derive(Debug)]
pub struct SessionState {
    id: SessionId,
    turns: Vec<Turn>,
    pending: bool,
    next_seq: u64,
    observers: Observers,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            id: SessionId::new(),
            turns: Vec::new(),
            pending: false,
            next_seq: 1,
            observers: Observers::new(),
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn last_turn(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Register a callback invoked after every state change
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: Fn(&SessionEvent) + Send + 'static,
    {
        self.observers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Append a user turn and mark a request as in flight.
    ///
    /// Blank input and submissions while a request is pending leave the
    /// state untouched.
    pub fn append_user_turn(&mut self, text: &str) -> Result<(), SubmitError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SubmitError::EmptyInput);
        }
        if self.pending {
            log::debug!("session {}: refusing submission while a request is pending", self.id);
            return Err(SubmitError::Busy);
        }
        self.push(Role::User, text, true)
    }

    /// Append the backend's reply and clear the pending flag
    pub fn append_assistant_turn(&mut self, text: &str) -> Result<(), SubmitError> {
        self.push(Role::Assistant, text, false)
    }

    /// Append a local failure in place of a reply and clear the pending flag
    pub fn append_error_turn(&mut self, message: &str) -> Result<(), SubmitError> {
        self.push(Role::SystemError, message, false)
    }

    /// Start a fresh conversation; returns the id of the discarded one
    pub fn reset(&mut self) -> SessionId {
        let previous = self.id;
        self.id = SessionId::new();
        self.turns.clear();
        self.pending = false;
        self.next_seq = 1;
        log::info!("session {} reset, new session {}", previous, self.id);

        self.observers.notify(&SessionEvent::Reset {
            previous,
            current: self.id,
        });
        previous
    }

    /// History lines for the next request, computed from the current log
    pub fn history(&self, window: &HistoryWindow) -> Vec<String> {
        window.render(&self.turns)
    }

    fn push(&mut self, role: Role, text: &str, pending_after: bool) -> Result<(), SubmitError> {
        let was_pending = self.pending;
        let Some(turn) = Turn::new(self.next_seq, role, text) else {
            // A blank reply still ends the in-flight request
            if was_pending && !pending_after {
                self.pending = false;
                self.observers.notify(&SessionEvent::PendingCleared { session_id: self.id });
            }
            return Err(SubmitError::EmptyInput);
        };

        self.next_seq += 1;
        self.turns.push(turn.clone());
        self.pending = pending_after;

        self.observers.notify(&SessionEvent::TurnAppended {
            session_id: self.id,
            turn,
            pending: self.pending,
        });
        Ok(())
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
