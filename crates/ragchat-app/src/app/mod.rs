pub mod query;
pub mod render;
pub mod repl;
pub mod transcript;

pub use query::{answer_query, ask_once, run_query_mode, QueryOutcome};
pub use render::{attach_renderer, render_event, render_turn};
pub use repl::{run_repl_mode, ReplCommand};
pub use transcript::Transcript;
