use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use std::sync::Arc;

use ragchat_api::{normalize_endpoint, HttpChatBackend};
use ragchat_chat::{HistoryPolicy, HistoryWindow, RequestDispatcher};

use crate::cli::Cli;

/// Application configuration derived from CLI arguments and environment
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub endpoint: String,
    pub window: HistoryWindow,
    pub log_dir: Option<PathBuf>,
    pub verbose: bool,
}

impl AppConfig {
    /// Resolve and validate the settings carried by `cli`
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let endpoint = normalize_endpoint(&cli.endpoint);
        let url = reqwest::Url::parse(&endpoint)
            .with_context(|| format!("Invalid endpoint URL '{}'", cli.endpoint))?;
        if !matches!(url.scheme(), "http" | "https") {
            bail!("Unsupported endpoint scheme '{}' (expected http or https)", url.scheme());
        }

        let policy = HistoryPolicy::from_str(&cli.history_policy).with_context(|| {
            format!(
                "Unknown history policy '{}' (expected conversational or all)",
                cli.history_policy
            )
        })?;

        Ok(Self {
            endpoint,
            window: HistoryWindow::new(cli.history_size, policy),
            log_dir: cli.log_dir.clone(),
            verbose: cli.verbose,
        })
    }

    /// Build a dispatcher talking HTTP to the configured endpoint
    pub fn dispatcher(&self) -> RequestDispatcher {
        let backend = HttpChatBackend::new(self.endpoint.clone()).with_verbose(self.verbose);
        RequestDispatcher::new(Arc::new(backend), self.window)
    }
}
