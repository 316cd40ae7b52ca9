use ragchat_types::{Role, Turn, DEFAULT_HISTORY_SIZE};

/// Which turns may be sent upstream as conversational context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryPolicy {
    /// User and assistant turns only; local error turns stay local
    #[default]
    Conversational,
    /// Every turn, error turns included (labelled as assistant output)
    All,
}

impl HistoryPolicy {
    /// Parse policy from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "conversational" | "default" => Some(Self::Conversational),
            "all" | "unfiltered" => Some(Self::All),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Conversational => "conversational",
            Self::All => "all",
        }
    }

    fn includes(&self, turn: &Turn) -> bool {
        match self {
            Self::Conversational => turn.role().is_conversational(),
            Self::All => true,
        }
    }
}

/// Bounded view of the most recent turns, oldest first.
///
/// Recomputed from the turn log on every call; nothing is cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryWindow {
    size: usize,
    policy: HistoryPolicy,
}

impl HistoryWindow {
    pub fn new(size: usize, policy: HistoryPolicy) -> Self {
        Self { size, policy }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn policy(&self) -> HistoryPolicy {
        self.policy
    }

    /// Render the last `size` eligible turns as `"<role>: <text>"` lines
    pub fn render(&self, turns: &[Turn]) -> Vec<String> {
        let mut recent: Vec<&Turn> = turns
            .iter()
            .rev()
            .filter(|turn| self.policy.includes(turn))
            .take(self.size)
            .collect();
        recent.reverse();

        recent.into_iter().map(format_turn).collect()
    }
}

impl Default for HistoryWindow {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_SIZE, HistoryPolicy::default())
    }
}

fn format_turn(turn: &Turn) -> String {
    format!("{}: {}", role_label(turn.role()), turn.text())
}

fn role_label(role: Role) -> &'static str {
    match role {
        Role::User => "user",
        // Error bubbles sit on the assistant side of the conversation
        Role::Assistant | Role::SystemError => "assistant",
    }
}
