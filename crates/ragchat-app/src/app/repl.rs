use anyhow::Result;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use ragchat_chat::{DispatchOutcome, RequestDispatcher, SessionState};
use ragchat_types::SubmitError;

use crate::app::render::attach_renderer;
use crate::app::transcript::Transcript;
use crate::config::AppConfig;

/// A line typed at the prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand<'a> {
    Exit,
    Reset,
    History,
    Session,
    Help,
    Unknown(&'a str),
    Message(&'a str),
}

impl<'a> ReplCommand<'a> {
    /// Classify a trimmed, non-empty input line
    pub fn parse(line: &'a str) -> Self {
        match line {
            "exit" | "quit" => Self::Exit,
            "/reset" => Self::Reset,
            "/history" => Self::History,
            "/session" => Self::Session,
            "/help" => Self::Help,
            other if other.starts_with('/') => Self::Unknown(other),
            other => Self::Message(other),
        }
    }
}

fn print_help() {
    println!("{} Commands:", "💡".bright_cyan());
    println!("  /reset       - Start a new session (clears the conversation)");
    println!("  /history     - Show the history sent with the next message");
    println!("  /session     - Show the current session id and turn count");
    println!("  /help        - Show this help");
    println!("  exit, quit   - Leave the chat");
}

fn print_history(session: &SessionState, dispatcher: &RequestDispatcher) {
    let lines = session.history(dispatcher.window());
    if lines.is_empty() {
        println!("{} No history yet", "ℹ️".bright_blue());
        return;
    }
    println!(
        "{} Last {} turn(s) ({} policy):",
        "📜".bright_cyan(),
        lines.len(),
        dispatcher.window().policy().as_str()
    );
    for line in lines {
        println!("  {}", line.bright_black());
    }
}

/// Run interactive REPL mode
pub async fn run_repl_mode(config: &AppConfig) -> Result<()> {
    println!("{}", "🤖 RAG Chat".bright_cyan().bold());
    println!("{}", format!("Endpoint: {}", config.endpoint).bright_black());
    println!("{}", "Type '/help' for commands, 'exit' or 'quit' to leave\n".bright_black());

    let dispatcher = config.dispatcher();
    let mut session = SessionState::new();
    attach_renderer(&mut session);

    let transcript = Transcript::attach_optional(&mut session, config.log_dir.as_deref()).await;
    if let Some(t) = &transcript {
        println!("{}", format!("Transcript: {}", t.file_path().display()).bright_black());
    }

    let mut rl = DefaultEditor::new()?;

    loop {
        let readline = rl.readline(&format!("{} ", "You:".bright_green().bold()));

        match readline {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line);

                match ReplCommand::parse(line) {
                    ReplCommand::Exit => {
                        println!("{}", "Goodbye!".bright_cyan());
                        break;
                    }
                    ReplCommand::Reset => {
                        session.reset();
                    }
                    ReplCommand::History => print_history(&session, &dispatcher),
                    ReplCommand::Session => {
                        println!(
                            "{} Session {} ({} turns)",
                            "🧵".bright_cyan(),
                            session.id(),
                            session.turns().len()
                        );
                    }
                    ReplCommand::Help => print_help(),
                    ReplCommand::Unknown(cmd) => {
                        eprintln!("{} Unknown command '{}'. Try /help", "❌".bright_red(), cmd);
                    }
                    ReplCommand::Message(text) => match dispatcher.submit(&mut session, text).await {
                        // The renderer has already shown the reply or the error bubble
                        Ok(DispatchOutcome::Replied(_)) | Ok(DispatchOutcome::Failed(_)) => {}
                        Ok(DispatchOutcome::Discarded { session_id }) => {
                            log::debug!("reply for session {} dropped", session_id);
                        }
                        Err(SubmitError::EmptyInput) => {}
                        Err(SubmitError::Busy) => {
                            eprintln!("{} Still waiting for the previous reply", "⏳".yellow());
                        }
                    },
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "^C".bright_black());
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "Goodbye!".bright_cyan());
                break;
            }
            Err(err) => {
                eprintln!("{} {}", "Error:".bright_red().bold(), err);
                break;
            }
        }
    }

    if let Some(transcript) = transcript {
        transcript.detach(&mut session).await;
    }

    Ok(())
}
