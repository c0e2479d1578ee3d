//! The console view: the prompt, the transcript, and the submission path.
mod input;
mod render;

use crate::session::HistoryNavigator;

/// State and logic for the console prompt.
pub struct ConsoleMode {
    /// Navigator over previously submitted command lines.
    history: HistoryNavigator,
}

impl ConsoleMode {
    pub fn new() -> Self {
        Self {
            history: HistoryNavigator::new(),
        }
    }
}

impl Default for ConsoleMode {
    fn default() -> Self {
        Self::new()
    }
}
