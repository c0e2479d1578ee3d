use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, Level};

use super::super::{UIMode, UIState};
use super::LogMode;

impl LogMode {
    /// Handles a key event in log mode. Up/Down scroll the log view;
    /// Ctrl+Up/Down navigate the command history.
    pub fn handle_key(&mut self, state: &mut UIState, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Enter => {
                if !state.input_buffer.trim().is_empty() {
                    let input = state.input_buffer.clone();
                    self.history.commit(&input);
                    self.execute_log_command(&input, state);
                    state.input_buffer.clear();
                    state.cursor_pos = 0;
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
            KeyCode::Up => {
                if key.modifiers.contains(KeyModifiers::CONTROL) {
                    if let Some(recalled) = self.history.recall_previous(&state.input_buffer) {
                        let text = recalled.to_string();
                        state.set_input(&text);
                    }
                } else {
                    state.log_scroll_offset = state.log_scroll_offset.saturating_add(1);
                    state.update_log_scroll_state(state.terminal_size.1 as usize);
                }
            }
            KeyCode::Down => {
                if key.modifiers.contains(KeyModifiers::CONTROL) {
                    if let Some(recalled) = self.history.recall_next() {
                        let text = recalled.to_string();
                        state.set_input(&text);
                    }
                } else {
                    state.log_scroll_offset = state.log_scroll_offset.saturating_sub(1);
                    state.update_log_scroll_state(state.terminal_size.1 as usize);
                }
            }
            KeyCode::PageUp => {
                state.log_scroll_offset = state.log_scroll_offset.saturating_add(10);
                state.update_log_scroll_state(state.terminal_size.1 as usize);
            }
            KeyCode::PageDown => {
                state.log_scroll_offset = state.log_scroll_offset.saturating_sub(10);
                state.update_log_scroll_state(state.terminal_size.1 as usize);
            }
            KeyCode::Esc => {
                state.jump_to_bottom_log();
            }
            _ => {}
        }

        Ok(())
    }

    fn execute_log_command(&self, input: &str, state: &mut UIState) {
        let parts: Vec<&str> = input.trim().split_whitespace().collect();
        let Some(&command) = parts.first() else {
            return;
        };

        match command {
            "level" => {
                if let Some(level_str) = parts.get(1) {
                    let new_level = match level_str.to_lowercase().as_str() {
                        "trace" => Level::TRACE,
                        "debug" => Level::DEBUG,
                        "info" => Level::INFO,
                        "warn" => Level::WARN,
                        "error" => Level::ERROR,
                        _ => {
                            debug!("invalid log level: {}", level_str);
                            return;
                        }
                    };
                    if let UIMode::Logs { filter, .. } = state.mode.clone() {
                        state.mode = UIMode::Logs {
                            filter,
                            level: new_level,
                        };
                    }
                } else {
                    debug!("usage: level <trace|debug|info|warn|error>");
                }
            }
            "filter" => {
                if let UIMode::Logs { level, .. } = state.mode.clone() {
                    let filter = if parts.len() >= 2 {
                        Some(parts[1..].join(" "))
                    } else {
                        None
                    };
                    state.mode = UIMode::Logs { filter, level };
                }
            }
            "clear" => {
                state.logs.clear();
                state.log_scroll_offset = 0;
            }
            "help" => {
                debug!("log commands: level <level>, filter [text], clear");
            }
            _ => {
                debug!("unknown log command: {}", command);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log_state() -> UIState {
        let mut state = UIState::new();
        state.mode = UIMode::Logs {
            filter: None,
            level: Level::DEBUG,
        };
        state
    }

    #[test]
    fn level_command_updates_the_mode() {
        let mode = LogMode::new();
        let mut state = log_state();
        mode.execute_log_command("level error", &mut state);
        assert!(matches!(
            state.mode,
            UIMode::Logs {
                level: Level::ERROR,
                ..
            }
        ));
    }

    #[test]
    fn filter_command_sets_and_clears() {
        let mode = LogMode::new();
        let mut state = log_state();

        mode.execute_log_command("filter net", &mut state);
        assert!(matches!(
            &state.mode,
            UIMode::Logs { filter: Some(f), .. } if f == "net"
        ));

        mode.execute_log_command("filter", &mut state);
        assert!(matches!(&state.mode, UIMode::Logs { filter: None, .. }));
    }
}
