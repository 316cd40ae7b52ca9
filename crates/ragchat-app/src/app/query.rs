use anyhow::{bail, Result};
use colored::Colorize;
use std::path::Path;

use ragchat_chat::{DispatchOutcome, RequestDispatcher, SessionState};
use ragchat_types::SubmitError;

use crate::app::transcript::Transcript;
use crate::config::AppConfig;

/// Result of a one-shot query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    /// The backend's answer
    Reply(String),
    /// The text of the error bubble
    Failed(String),
}

/// Send one message and wait for its outcome
pub async fn ask_once(dispatcher: &RequestDispatcher, session: &mut SessionState, text: &str) -> Result<QueryOutcome> {
    match dispatcher.submit(session, text).await {
        Ok(DispatchOutcome::Replied(reply)) => Ok(QueryOutcome::Reply(reply)),
        Ok(DispatchOutcome::Failed(err)) => Ok(QueryOutcome::Failed(err.user_message())),
        Ok(DispatchOutcome::Discarded { .. }) => Ok(QueryOutcome::Failed("Reply discarded".to_string())),
        Err(SubmitError::EmptyInput) => bail!("Query must not be empty"),
        Err(err) => bail!("{}", err),
    }
}

/// Ask one question in a fresh session, recording it when `log_dir` is set.
///
/// An unusable log directory only disables the transcript.
pub async fn answer_query(dispatcher: &RequestDispatcher, log_dir: Option<&Path>, text: &str) -> Result<QueryOutcome> {
    let mut session = SessionState::new();
    let transcript = Transcript::attach_optional(&mut session, log_dir).await;

    let outcome = ask_once(dispatcher, &mut session, text).await;

    if let Some(transcript) = transcript {
        transcript.detach(&mut session).await;
    }
    outcome
}

/// Run in query mode - send a single message and exit.
///
/// Returns whether the backend answered.
pub async fn run_query_mode(config: &AppConfig, text: &str) -> Result<bool> {
    let dispatcher = config.dispatcher();

    match answer_query(&dispatcher, config.log_dir.as_deref(), text).await? {
        QueryOutcome::Reply(reply) => {
            println!("{}", reply);
            Ok(true)
        }
        QueryOutcome::Failed(message) => {
            eprintln!("{} {}", "Error:".bright_red().bold(), message);
            Ok(false)
        }
    }
}
