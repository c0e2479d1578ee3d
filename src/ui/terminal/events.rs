use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, error, info, warn};

use crate::ui::{UIEvent, UIMode};

use super::TerminalUI;

impl TerminalUI {
    pub(super) fn handle_event(&mut self, event: UIEvent) -> Result<()> {
        match event {
            UIEvent::Reply(frame) => {
                match self.session.resolve(frame.id, frame.outcome) {
                    Ok(entry) => debug!(id = entry.id, "transaction resolved"),
                    Err(e) => {
                        // Correlation faults are surfaced, never dropped: the
                        // transport and the log have desynchronized.
                        error!("correlation fault: {}", e);
                        let anchor = self.session.len();
                        self.state.add_notice(anchor, format!("protocol fault: {}", e));
                    }
                }
            }
            UIEvent::ConnectionOpened => {
                info!("connected to evaluator");
                self.state.connected = true;
                let anchor = self.session.len();
                self.state.add_notice(anchor, "connected.".to_string());
            }
            UIEvent::ConnectionClosed(reason) => {
                warn!(?reason, "connection closed");
                self.state.connected = false;
                let anchor = self.session.len();
                let text = match reason {
                    Some(reason) => format!("connection closed: {}", reason),
                    None => "connection closed.".to_string(),
                };
                self.state.add_notice(anchor, text);
            }
            UIEvent::Notice(text) => {
                let anchor = self.session.len();
                self.state.add_notice(anchor, text);
            }
            UIEvent::NewLogBatch(entries) => {
                self.state.add_log_batch(entries);
            }
            UIEvent::RefreshLogs => {
                self.state.refresh_logs();
            }
            UIEvent::KeyPress(key_event) => {
                self.handle_key_event(key_event)?;
            }
            UIEvent::Resize(width, height) => {
                self.state.terminal_size = (width, height);
            }
        }
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                self.should_exit = true;
                return Ok(());
            }
            (KeyCode::F(9), _) | (KeyCode::Char('l'), KeyModifiers::CONTROL) => {
                self.state.toggle_mode();
                if let Some(ref log_buffer) = self.log_buffer {
                    if let UIMode::Logs { level, .. } = &self.state.mode {
                        log_buffer.set_display_level(*level);
                    }
                }
                return Ok(());
            }
            _ => {}
        }

        let old_mode = self.state.mode.clone();
        match &self.state.mode {
            UIMode::Console => {
                self.console_mode.handle_key(
                    &mut self.state,
                    &mut self.session,
                    &self.outbound_tx,
                    key,
                )?;
            }
            UIMode::Logs { .. } => {
                self.log_mode.handle_key(&mut self.state, key)?;

                // A `level` command changes the mode; keep the buffer's
                // display filter in step.
                if let (
                    UIMode::Logs {
                        level: old_level, ..
                    },
                    UIMode::Logs {
                        level: new_level, ..
                    },
                ) = (&old_mode, &self.state.mode)
                {
                    if old_level != new_level {
                        if let Some(ref log_buffer) = self.log_buffer {
                            log_buffer.set_display_level(*new_level);
                        }
                    }
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{ReplyFrame, TxOutcome};
    use tokio::sync::mpsc;

    fn terminal() -> TerminalUI {
        let (_event_tx, event_rx) = mpsc::unbounded_channel();
        let (outbound_tx, _outbound_rx) = mpsc::unbounded_channel();
        TerminalUI::new(event_rx, outbound_tx)
    }

    #[test]
    fn reply_resolves_the_matching_entry() {
        let mut ui = terminal();
        let id = ui.session.submit("\\! cmd").id;

        ui.handle_event(UIEvent::Reply(ReplyFrame {
            id,
            outcome: TxOutcome::Output("ok".into()),
        }))
        .unwrap();

        let entry = ui.session.entry(id).unwrap();
        assert!(!entry.pending);
        assert_eq!(entry.result, Some(TxOutcome::Output("ok".into())));
        assert!(ui.state.notices.is_empty());
    }

    #[test]
    fn correlation_fault_becomes_a_notice() {
        let mut ui = terminal();
        ui.handle_event(UIEvent::Reply(ReplyFrame {
            id: 42,
            outcome: TxOutcome::Output("ghost".into()),
        }))
        .unwrap();

        assert_eq!(ui.state.notices.len(), 1);
        assert!(ui.state.notices[0].text.contains("protocol fault"));
    }

    #[test]
    fn duplicate_reply_is_surfaced_but_does_not_clobber() {
        let mut ui = terminal();
        let id = ui.session.submit("cmd").id;

        let reply = |payload: &str| {
            UIEvent::Reply(ReplyFrame {
                id,
                outcome: TxOutcome::Output(payload.into()),
            })
        };
        ui.handle_event(reply("first")).unwrap();
        ui.handle_event(reply("second")).unwrap();

        assert_eq!(
            ui.session.entry(id).unwrap().result,
            Some(TxOutcome::Output("first".into()))
        );
        assert_eq!(ui.state.notices.len(), 1);
    }

    #[test]
    fn connection_lifecycle_toggles_the_flag() {
        let mut ui = terminal();
        ui.handle_event(UIEvent::ConnectionOpened).unwrap();
        assert!(ui.state.connected);

        ui.handle_event(UIEvent::ConnectionClosed(None)).unwrap();
        assert!(!ui.state.connected);
        assert_eq!(ui.state.notices.len(), 2);
    }
}
