//! Core types and structures for ragchat
//!
//! This crate provides the foundational types shared by every ragchat crate:
//! conversation turns, session identifiers and the error taxonomy.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

pub mod error;

pub use error::{DispatchError, SubmitError, MALFORMED_RESPONSE_MESSAGE, SERVER_ERROR_MESSAGE};

// ============================================================================
// Constants
// ============================================================================

/// Number of recent turns sent upstream with each request
pub const DEFAULT_HISTORY_SIZE: usize = 5;

/// Default chat endpoint of the RAG backend
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/chat";

// ============================================================================
// Session Identity
// ============================================================================

/// Opaque identifier of one conversation.
///
/// A fresh random id is drawn for every new session and on every reset, so an
/// id is never handed out twice within a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Turn Types
// ============================================================================

/// Author of a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
    /// A local failure rendered in place of an assistant reply
    SystemError,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::SystemError => "system_error",
        }
    }

    /// Whether turns of this role are part of the conversation proper
    pub fn is_conversational(&self) -> bool {
        !matches!(self, Role::SystemError)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One message unit in a conversation.
///
/// Turns are immutable once created. `seq` is assigned by the owning session
/// and increases by one with every appended turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TurnRecord")]
pub struct Turn {
    seq: u64,
    role: Role,
    text: String,
    created_at: DateTime<Utc>,
}

impl Turn {
    /// Build a turn, rejecting empty or whitespace-only text
    pub fn new(seq: u64, role: Role, text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return None;
        }
        Some(Self {
            seq,
            role,
            text,
            created_at: Utc::now(),
        })
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Wire shape of a turn; converted through the same check as `Turn::new`
#[derive(Deserialize)]
struct TurnRecord {
    seq: u64,
    role: Role,
    text: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<TurnRecord> for Turn {
    type Error = String;

    fn try_from(record: TurnRecord) -> Result<Self, Self::Error> {
        let mut turn = Turn::new(record.seq, record.role, record.text)
            .ok_or_else(|| format!("turn {} has empty text", record.seq))?;
        turn.created_at = record.created_at;
        Ok(turn)
    }
}
