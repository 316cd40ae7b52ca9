//! Terminal front end for ragchat: command line, configuration, the
//! interactive loop and the one-shot query mode.

pub mod app;
pub mod cli;
pub mod config;

pub use cli::Cli;
pub use config::AppConfig;

/// Initialise `env_logger`; `RUST_LOG` wins over the verbosity flag
pub fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}
