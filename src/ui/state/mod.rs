mod input;
mod logs;

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use tracing::Level;

use super::{log_entry::LogEntry, mode::UIMode};

/// A transcript line that carries no transaction id, e.g. connection
/// lifecycle events or surfaced correlation faults.
///
/// `anchor` is the number of transactions in the log when the notice arrived;
/// the renderer uses it to interleave notices with entries in arrival order.
#[derive(Debug, Clone)]
pub struct Notice {
    pub anchor: usize,
    pub timestamp: DateTime<Utc>,
    pub text: String,
}

#[derive(Debug)]
pub struct UIState {
    pub mode: UIMode,
    pub last_log_mode: Option<UIMode>,
    pub notices: Vec<Notice>,
    pub logs: VecDeque<LogEntry>,
    pub scroll_offset: usize,
    pub log_scroll_offset: usize,
    pub horizontal_scroll_offset: usize,
    pub is_at_bottom_console: bool,
    pub is_at_bottom_log: bool,
    pub input_buffer: String,
    pub cursor_pos: usize,
    pub terminal_size: (u16, u16),
    pub max_log_entries: usize,
    pub connected: bool,
}

impl UIState {
    pub fn new() -> Self {
        Self {
            mode: UIMode::default(),
            last_log_mode: None,
            notices: Vec::new(),
            logs: VecDeque::with_capacity(10000),
            scroll_offset: 0,
            log_scroll_offset: 0,
            horizontal_scroll_offset: 0,
            is_at_bottom_console: true,
            is_at_bottom_log: true,
            input_buffer: String::new(),
            cursor_pos: 0,
            terminal_size: (80, 24),
            max_log_entries: 10000,
            connected: false,
        }
    }

    pub fn add_notice(&mut self, anchor: usize, text: String) {
        self.notices.push(Notice {
            anchor,
            timestamp: Utc::now(),
            text,
        });

        if matches!(self.mode, UIMode::Console) && self.is_at_bottom_console {
            self.scroll_offset = 0;
        }
    }

    pub fn toggle_mode(&mut self) {
        self.mode = match &self.mode {
            UIMode::Console => match &self.last_log_mode {
                Some(UIMode::Logs { filter, level }) => UIMode::Logs {
                    filter: filter.clone(),
                    level: *level,
                },
                _ => UIMode::Logs {
                    filter: None,
                    level: Level::DEBUG,
                },
            },
            UIMode::Logs { .. } => {
                self.last_log_mode = Some(self.mode.clone());
                UIMode::Console
            }
        };

        self.scroll_offset = 0;
        self.log_scroll_offset = 0;
        self.is_at_bottom_console = true;
        self.is_at_bottom_log = true;
    }

    /// Clamps the console scroll offset against the transcript size.
    pub fn update_console_scroll_state(&mut self, total_lines: usize, terminal_height: usize) {
        let visible_lines = terminal_height.saturating_sub(3);
        let max_scroll = total_lines.saturating_sub(visible_lines);

        self.scroll_offset = self.scroll_offset.min(max_scroll);
        self.is_at_bottom_console = self.scroll_offset == 0;
    }

    pub fn jump_to_bottom_console(&mut self) {
        self.scroll_offset = 0;
        self.is_at_bottom_console = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_remove_are_char_based() {
        let mut state = UIState::new();
        for c in "héllo".chars() {
            state.safe_insert_char(c);
        }
        assert_eq!(state.input_buffer, "héllo");
        assert_eq!(state.cursor_pos, 5);

        state.safe_cursor_left();
        state.safe_cursor_left();
        assert!(state.safe_remove_char_before());
        assert_eq!(state.input_buffer, "hélo");
        assert_eq!(state.cursor_pos, 2);
    }

    #[test]
    fn cursor_stops_at_both_ends() {
        let mut state = UIState::new();
        state.safe_cursor_left();
        assert_eq!(state.cursor_pos, 0);

        state.safe_insert_char('x');
        state.safe_cursor_right();
        assert_eq!(state.cursor_pos, 1);
    }

    #[test]
    fn notices_keep_their_anchor() {
        let mut state = UIState::new();
        state.add_notice(0, "connecting...".into());
        state.add_notice(2, "connection closed.".into());
        assert_eq!(state.notices[0].anchor, 0);
        assert_eq!(state.notices[1].anchor, 2);
    }
}
