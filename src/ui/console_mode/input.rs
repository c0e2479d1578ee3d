use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::session::{Submission, TransactionLog};

use super::super::UIState;
use super::ConsoleMode;

impl ConsoleMode {
    pub fn handle_key(
        &mut self,
        state: &mut UIState,
        session: &mut TransactionLog,
        outbound_tx: &mpsc::UnboundedSender<Submission>,
        key: KeyEvent,
    ) -> Result<()> {
        match key.code {
            KeyCode::Enter => {
                // Empty submissions stop here; they never reach the log.
                if state.input_buffer.trim().is_empty() {
                    return Ok(());
                }
                let text = state.input_buffer.clone();

                let submission = session.submit(&text);
                debug!(
                    id = submission.id,
                    class = ?submission.class,
                    "submitting command"
                );
                if outbound_tx.send(submission).is_err() {
                    // The entry stays unresolved; the transport is gone.
                    warn!("transport channel closed, command not sent");
                }

                self.history.commit(&text);
                state.input_buffer.clear();
                state.cursor_pos = 0;
                state.jump_to_bottom_console();
            }
            KeyCode::Up => {
                if let Some(recalled) = self.history.recall_previous(&state.input_buffer) {
                    let text = recalled.to_string();
                    state.set_input(&text);
                }
            }
            KeyCode::Down => {
                if let Some(recalled) = self.history.recall_next() {
                    let text = recalled.to_string();
                    state.set_input(&text);
                }
            }
            KeyCode::Char(c) => {
                state.safe_insert_char(c);
            }
            KeyCode::Backspace => {
                state.safe_remove_char_before();
            }
            KeyCode::Delete => {
                state.safe_remove_char_at();
            }
            KeyCode::Left => {
                state.safe_cursor_left();
            }
            KeyCode::Right => {
                state.safe_cursor_right();
            }
            KeyCode::Home => {
                if key.modifiers.contains(KeyModifiers::CONTROL) {
                    state.horizontal_scroll_offset =
                        state.horizontal_scroll_offset.saturating_sub(10);
                } else {
                    state.safe_cursor_home();
                }
            }
            KeyCode::End => {
                if key.modifiers.contains(KeyModifiers::CONTROL) {
                    state.horizontal_scroll_offset =
                        state.horizontal_scroll_offset.saturating_add(10);
                } else {
                    state.safe_cursor_end();
                }
            }
            KeyCode::PageUp => {
                state.scroll_offset = state.scroll_offset.saturating_add(10);
                let total = Self::transcript_line_count(state, session);
                state.update_console_scroll_state(total, state.terminal_size.1 as usize);
            }
            KeyCode::PageDown => {
                state.scroll_offset = state.scroll_offset.saturating_sub(10);
                let total = Self::transcript_line_count(state, session);
                state.update_console_scroll_state(total, state.terminal_size.1 as usize);
            }
            KeyCode::Esc => {
                state.jump_to_bottom_console();
            }
            _ => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{SendClass, TxOutcome};
    use crossterm::event::{KeyEventKind, KeyEventState};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn type_line(
        mode: &mut ConsoleMode,
        state: &mut UIState,
        session: &mut TransactionLog,
        tx: &mpsc::UnboundedSender<Submission>,
        text: &str,
    ) {
        for c in text.chars() {
            mode.handle_key(state, session, tx, press(KeyCode::Char(c)))
                .unwrap();
        }
        mode.handle_key(state, session, tx, press(KeyCode::Enter))
            .unwrap();
    }

    #[test]
    fn enter_submits_commits_history_and_clears_the_prompt() {
        let mut mode = ConsoleMode::new();
        let mut state = UIState::new();
        let mut session = TransactionLog::new();
        let (tx, mut rx) = mpsc::unbounded_channel();

        type_line(&mut mode, &mut state, &mut session, &tx, "1+1");

        assert_eq!(state.input_buffer, "");
        assert_eq!(session.len(), 1);
        let sub = rx.try_recv().unwrap();
        assert_eq!(sub.id, 1);
        assert_eq!(sub.class, SendClass::Request);
        assert_eq!(sub.wire_text, "1+1");
    }

    #[test]
    fn enter_on_whitespace_is_a_noop() {
        let mut mode = ConsoleMode::new();
        let mut state = UIState::new();
        let mut session = TransactionLog::new();
        let (tx, mut rx) = mpsc::unbounded_channel();

        state.set_input("   ");
        mode.handle_key(&mut state, &mut session, &tx, press(KeyCode::Enter))
            .unwrap();

        assert!(session.is_empty());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn up_down_recall_round_trip_restores_the_draft() {
        let mut mode = ConsoleMode::new();
        let mut state = UIState::new();
        let mut session = TransactionLog::new();
        let (tx, _rx) = mpsc::unbounded_channel();

        type_line(&mut mode, &mut state, &mut session, &tx, "a");
        type_line(&mut mode, &mut state, &mut session, &tx, "b");

        state.set_input("half-typed");
        mode.handle_key(&mut state, &mut session, &tx, press(KeyCode::Up))
            .unwrap();
        assert_eq!(state.input_buffer, "b");
        mode.handle_key(&mut state, &mut session, &tx, press(KeyCode::Up))
            .unwrap();
        assert_eq!(state.input_buffer, "a");
        // At the oldest entry: no wrap.
        mode.handle_key(&mut state, &mut session, &tx, press(KeyCode::Up))
            .unwrap();
        assert_eq!(state.input_buffer, "a");

        mode.handle_key(&mut state, &mut session, &tx, press(KeyCode::Down))
            .unwrap();
        assert_eq!(state.input_buffer, "b");
        mode.handle_key(&mut state, &mut session, &tx, press(KeyCode::Down))
            .unwrap();
        assert_eq!(state.input_buffer, "half-typed");
    }

    #[test]
    fn fire_marker_ships_stripped_and_logs_verbatim() {
        let mut mode = ConsoleMode::new();
        let mut state = UIState::new();
        let mut session = TransactionLog::new();
        let (tx, mut rx) = mpsc::unbounded_channel();

        state.set_input("\\! save db");
        mode.handle_key(&mut state, &mut session, &tx, press(KeyCode::Enter))
            .unwrap();

        let sub = rx.try_recv().unwrap();
        assert_eq!(sub.class, SendClass::Fire);
        assert_eq!(sub.wire_text, "save db");

        let entry = session.entry(sub.id).unwrap();
        assert!(entry.pending);
        assert_eq!(entry.input, "\\! save db");

        session
            .resolve(sub.id, TxOutcome::Output("done".into()))
            .unwrap();
        assert!(!session.entry(sub.id).unwrap().pending);
    }
}
