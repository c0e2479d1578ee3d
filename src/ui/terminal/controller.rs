use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{debug, error};

use crate::logging::LogBuffer;
use crate::session::{Submission, TransactionLog};
use crate::ui::{ConsoleMode, LogMode, UIEvent, UIState};

/// Owner of all mutable UI and session state. Events come in over one
/// channel; submissions go out to the transport over another.
pub struct TerminalUI {
    pub(super) state: UIState,
    pub(super) session: TransactionLog,
    pub(super) console_mode: ConsoleMode,
    pub(super) log_mode: LogMode,
    pub(super) event_rx: mpsc::UnboundedReceiver<UIEvent>,
    pub(super) outbound_tx: mpsc::UnboundedSender<Submission>,
    pub(super) log_buffer: Option<Arc<LogBuffer>>,
    pub(super) should_exit: bool,
}

impl TerminalUI {
    pub fn new(
        event_rx: mpsc::UnboundedReceiver<UIEvent>,
        outbound_tx: mpsc::UnboundedSender<Submission>,
    ) -> Self {
        Self {
            state: UIState::new(),
            session: TransactionLog::new(),
            console_mode: ConsoleMode::new(),
            log_mode: LogMode::new(),
            event_rx,
            outbound_tx,
            log_buffer: None,
            should_exit: false,
        }
    }

    pub fn set_log_buffer(&mut self, log_buffer: Arc<LogBuffer>) {
        self.log_buffer = Some(log_buffer);
    }

    /// Seeds the prompt, e.g. from the `--input` flag.
    pub fn preload_input(&mut self, text: &str) {
        self.state.set_input(text);
    }

    pub async fn run(&mut self) -> Result<()> {
        self.initialize_terminal()?;

        debug!("starting terminal UI loop");

        while let Some(event) = self.event_rx.recv().await {
            if let Err(e) = self.handle_event(event) {
                error!("error handling UI event: {}", e);
            }

            if self.should_exit {
                break;
            }

            self.render()?;
        }

        self.cleanup()
    }
}
