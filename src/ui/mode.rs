use tracing::Level;

/// The current view of the terminal UI.
#[derive(Debug, Clone)]
pub enum UIMode {
    /// The console view: transcript and prompt.
    Console,
    /// The log view over collected tracing output.
    Logs {
        /// An optional substring filter over module and message.
        filter: Option<String>,
        /// The minimum level to display.
        level: Level,
    },
}

impl Default for UIMode {
    fn default() -> Self {
        Self::Console
    }
}
