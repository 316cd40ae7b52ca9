use anyhow::Result;
use colored::Colorize;
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use ragchat_chat::{SessionEvent, SessionState, SubscriptionId};
use ragchat_logging::ConversationLogger;

/// Feeds session events into a [`ConversationLogger`] on a background task.
///
/// Observers run synchronously, so the subscriber only forwards events over a
/// channel; the file writes happen on the task.
pub struct Transcript {
    subscription: SubscriptionId,
    file_path: PathBuf,
    task: JoinHandle<()>,
}

impl Transcript {
    pub async fn attach(session: &mut SessionState, log_dir: &Path) -> Result<Self> {
        let mut logger = ConversationLogger::new(log_dir).await?;
        let file_path = logger.file_path().to_path_buf();
        log::info!("writing transcript to {}", file_path.display());

        let (tx, mut rx) = mpsc::unbounded_channel::<SessionEvent>();
        let subscription = session.subscribe(move |event| {
            let _ = tx.send(event.clone());
        });

        let task = tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                match event {
                    SessionEvent::TurnAppended { session_id, turn, .. } => {
                        logger.log_turn(session_id, &turn).await;
                    }
                    SessionEvent::Reset { previous, current } => {
                        logger.log_reset(previous, current).await;
                    }
                    SessionEvent::PendingCleared { .. } => {}
                }
            }
            logger.shutdown().await;
        });

        Ok(Self {
            subscription,
            file_path,
            task,
        })
    }

    /// Attach when a directory is configured; a logger that cannot be created
    /// is reported and the chat continues without a transcript.
    pub async fn attach_optional(session: &mut SessionState, log_dir: Option<&Path>) -> Option<Self> {
        let dir = log_dir?;
        match Self::attach(session, dir).await {
            Ok(transcript) => Some(transcript),
            Err(e) => {
                log::warn!("transcript disabled: {:#}", e);
                eprintln!("{} Logging disabled: {:#}", "⚠️".yellow(), e);
                None
            }
        }
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Stop listening and wait until every queued event is written
    pub async fn detach(self, session: &mut SessionState) {
        session.unsubscribe(self.subscription);
        if let Err(e) = self.task.await {
            log::warn!("transcript writer stopped abnormally: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_turns_and_resets_are_written() {
        let dir = TempDir::new().unwrap();
        let mut session = SessionState::new();
        let transcript = Transcript::attach(&mut session, dir.path()).await.unwrap();
        let path = transcript.file_path().to_path_buf();

        session.append_user_turn("hello").unwrap();
        session.append_assistant_turn("hi").unwrap();
        let first_id = session.id();
        session.reset();
        session.append_user_turn("again").unwrap();
        transcript.detach(&mut session).await;

        let content = tokio::fs::read_to_string(&path).await.unwrap();
        let entries: Vec<serde_json::Value> = content
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        let roles: Vec<&str> = entries.iter().map(|e| e["role"].as_str().unwrap()).collect();
        assert_eq!(roles, vec!["user", "assistant", "session_reset", "user"]);
        assert_eq!(entries[0]["session_id"], first_id.to_string());
        assert_eq!(entries[3]["session_id"], session.id().to_string());
    }

    #[tokio::test]
    async fn test_unwritable_log_dir_disables_transcript() {
        let dir = TempDir::new().unwrap();
        let not_a_dir = dir.path().join("plain-file");
        std::fs::write(&not_a_dir, "x").unwrap();
        let mut session = SessionState::new();

        let transcript = Transcript::attach_optional(&mut session, Some(&not_a_dir)).await;

        assert!(transcript.is_none());
        session.append_user_turn("still works").unwrap();
        assert_eq!(session.turns().len(), 1);
    }

    #[tokio::test]
    async fn test_no_log_dir_means_no_transcript() {
        let mut session = SessionState::new();
        assert!(Transcript::attach_optional(&mut session, None).await.is_none());
    }

    #[tokio::test]
    async fn test_detached_transcript_ignores_later_turns() {
        let dir = TempDir::new().unwrap();
        let mut session = SessionState::new();
        let transcript = Transcript::attach(&mut session, dir.path()).await.unwrap();
        let path = transcript.file_path().to_path_buf();

        session.append_user_turn("logged").unwrap();
        transcript.detach(&mut session).await;
        session.append_assistant_turn("not logged").unwrap();

        let content = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(content.lines().count(), 1);
    }
}
