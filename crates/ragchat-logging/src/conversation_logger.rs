use anyhow::{Context, Result};
use chrono::Local;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

use ragchat_types::{SessionId, Turn};

#[derive(Serialize)]
struct LogEntry {
    timestamp: String, // ISO‑8601 Local time
    session_id: String,
    role: String,
    content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    seq: Option<u64>,
}

/// Append-only JSONL transcript of a chat run.
///
/// The transcript is never read back by the client; restarting the process
/// always begins with an empty conversation.
pub struct ConversationLogger {
    file_path: PathBuf,
    file: Option<tokio::fs::File>,
}

impl ConversationLogger {
    /// Create a new logger; generates the file name based on the current local time.
    pub async fn new(workspace: &Path) -> Result<Self> {
        let logs_dir = workspace.join("logs");
        fs::create_dir_all(&logs_dir)
            .await
            .with_context(|| format!("Failed to create logs directory {}", logs_dir.display()))?;

        let now_local = Local::now();
        let filename = format!("ragchat-{}.jsonl", now_local.format("%Y-%m-%d-%H%M%S"));
        let file_path = logs_dir.join(filename);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&file_path)
            .await
            .with_context(|| format!("Failed to open transcript {}", file_path.display()))?;
        Ok(Self { file_path, file: Some(file) })
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Append one turn of the given session
    pub async fn log_turn(&mut self, session_id: SessionId, turn: &Turn) {
        let entry = LogEntry {
            timestamp: turn.created_at().with_timezone(&Local).to_rfc3339(),
            session_id: session_id.to_string(),
            role: turn.role().as_str().to_string(),
            content: turn.text().to_string(),
            seq: Some(turn.seq()),
        };
        self.write_entry(&entry).await;
    }

    /// Record that the user started a fresh session
    pub async fn log_reset(&mut self, previous: SessionId, current: SessionId) {
        let entry = LogEntry {
            timestamp: Local::now().to_rfc3339(),
            session_id: current.to_string(),
            role: "session_reset".to_string(),
            content: format!("previous session {}", previous),
            seq: None,
        };
        self.write_entry(&entry).await;
    }

    async fn write_entry(&mut self, entry: &LogEntry) {
        let Some(file) = &mut self.file else {
            return;
        };
        let json = match serde_json::to_string(entry) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Failed to serialize transcript entry: {}", e);
                return;
            }
        };
        if let Err(e) = file.write_all(json.as_bytes()).await {
            log::warn!("[Logging error] {}", e);
        } else if let Err(e) = file.write_all(b"\n").await {
            log::warn!("[Logging error] {}", e);
        } else {
            // Flush to ensure it's written
            let _ = file.flush().await;
        }
    }

    /// Close the logger (explicit drop). Called on graceful shutdown.
    pub async fn shutdown(&mut self) {
        if let Some(file) = self.file.take() {
            let _ = file.sync_all().await;
        }
    }
}
