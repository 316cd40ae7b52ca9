use anyhow::Result;
use clap::{CommandFactory, Parser};

use ragchat::app::{run_query_mode, run_repl_mode};
use ragchat::{init_logging, AppConfig, Cli};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if let Some(shell) = cli.generate {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
        return Ok(());
    }

    init_logging(cli.verbose);

    let config = AppConfig::from_cli(&cli)?;
    log::debug!("resolved configuration: {:?}", config);

    if let Some(query) = cli.query.as_deref() {
        if !run_query_mode(&config, query).await? {
            std::process::exit(1);
        }
        return Ok(());
    }

    run_repl_mode(&config).await
}
