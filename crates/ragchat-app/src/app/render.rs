use colored::Colorize;

use ragchat_chat::{SessionEvent, SessionState};
use ragchat_types::{Role, Turn};

/// Console text for a session event, if it has a visible effect.
///
/// User turns are not echoed; the line editor already shows them.
pub fn render_event(event: &SessionEvent) -> Option<String> {
    match event {
        SessionEvent::TurnAppended { turn, pending, .. } => match turn.role() {
            Role::User if *pending => Some(format!("{}", "  … thinking".bright_black())),
            Role::User => None,
            _ => Some(render_turn(turn)),
        },
        SessionEvent::PendingCleared { .. } => Some(format!("{}", "  (no reply)".bright_black())),
        SessionEvent::Reset { current, .. } => Some(format!(
            "{} {}",
            "🔄 New session".bright_cyan(),
            current.to_string().bright_black()
        )),
    }
}

/// One chat bubble
pub fn render_turn(turn: &Turn) -> String {
    match turn.role() {
        Role::User => format!("{} {}", "You:".bright_green().bold(), turn.text()),
        Role::Assistant => format!("{} {}", "Assistant:".bright_blue().bold(), turn.text()),
        Role::SystemError => format!("{} {}", "Error:".bright_red().bold(), turn.text().red()),
    }
}

/// Subscribe a console renderer to `session`
pub fn attach_renderer(session: &mut SessionState) {
    session.subscribe(|event| {
        if let Some(text) = render_event(event) {
            println!("{}", text);
        }
    });
}
