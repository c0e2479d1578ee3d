//! The log view over collected tracing output.
mod input;
mod render;

use crate::session::HistoryNavigator;

pub struct LogMode {
    /// Navigator over previously entered log commands.
    history: HistoryNavigator,
}

impl LogMode {
    pub fn new() -> Self {
        Self {
            history: HistoryNavigator::new(),
        }
    }
}

impl Default for LogMode {
    fn default() -> Self {
        Self::new()
    }
}
