use clap::Parser;
use clap_complete::Shell;
use std::path::PathBuf;

use ragchat_types::{DEFAULT_ENDPOINT, DEFAULT_HISTORY_SIZE};

/// CLI arguments for ragchat
#[derive(Parser, Debug)]
#[command(name = "ragchat")]
#[command(about = "RAG Chat - terminal client for a retrieval-augmented question answering backend")]
#[command(version)]
pub struct Cli {
    /// Chat endpoint of the backend (e.g., http://localhost:8000/chat)
    /// A bare host such as http://localhost:8000 gets the /chat route appended
    #[arg(long, value_name = "URL", env = "RAGCHAT_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Number of recent turns sent with every request
    #[arg(long, value_name = "N", env = "RAGCHAT_HISTORY_SIZE", default_value_t = DEFAULT_HISTORY_SIZE)]
    pub history_size: usize,

    /// Which turns count as history (conversational, all)
    #[arg(long, value_name = "POLICY", env = "RAGCHAT_HISTORY_POLICY", default_value = "conversational")]
    pub history_policy: String,

    /// Directory for JSONL transcripts (written to <DIR>/logs/)
    #[arg(long, value_name = "DIR", env = "RAGCHAT_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Send a single message, print the reply and exit
    #[arg(long, value_name = "TEXT")]
    pub query: Option<String>,

    /// Generate shell completions
    #[arg(long, value_enum)]
    pub generate: Option<Shell>,

    /// Enable verbose debug output (shows HTTP requests, responses, headers, etc.)
    #[arg(long, short = 'v')]
    pub verbose: bool,
}
