//! Transcript rendering: one block per transaction in submission order, with
//! connection notices interleaved at their arrival position.
use std::io::Write;

use anyhow::Result;
use chrono::Local;
use crossterm::{
    cursor, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
};

use crate::session::{TransactionLog, TxOutcome};

use super::super::UIState;
use super::ConsoleMode;

impl ConsoleMode {
    pub fn render(
        &self,
        stdout: &mut impl Write,
        state: &UIState,
        session: &TransactionLog,
        area: (u16, u16, u16, u16),
    ) -> Result<()> {
        let (x, y, width, height) = area;

        let lines = Self::transcript_lines(state, session);
        let total = lines.len();
        let visible_lines = height as usize;

        let start_idx = if total > visible_lines {
            if state.scroll_offset >= total {
                0
            } else {
                total.saturating_sub(visible_lines + state.scroll_offset)
            }
        } else {
            0
        };
        let end_idx = (start_idx + visible_lines).min(total);

        for (row, (text, color)) in lines[start_idx..end_idx].iter().enumerate() {
            queue!(stdout, cursor::MoveTo(x, y + row as u16))?;

            let scrolled: String = text
                .chars()
                .skip(state.horizontal_scroll_offset)
                .collect();
            let display = if scrolled.chars().count() > width as usize {
                let truncated: String = scrolled.chars().take(width as usize - 3).collect();
                format!("{}...", truncated)
            } else {
                scrolled
            };

            queue!(stdout, SetForegroundColor(*color), Print(display), ResetColor)?;
        }

        if state.scroll_offset > 0 {
            queue!(
                stdout,
                cursor::MoveTo(x + width.saturating_sub(15), y),
                SetForegroundColor(Color::Yellow),
                Print(format!("↑ +{} more", state.scroll_offset)),
                ResetColor
            )?;
        }

        Ok(())
    }

    /// Number of transcript lines, used to clamp scrolling.
    pub fn transcript_line_count(state: &UIState, session: &TransactionLog) -> usize {
        Self::transcript_lines(state, session).len()
    }

    fn transcript_lines(state: &UIState, session: &TransactionLog) -> Vec<(String, Color)> {
        let mut lines: Vec<(String, Color)> = Vec::new();
        let mut notices = state.notices.iter().peekable();

        for (pos, entry) in session.iter().enumerate() {
            while let Some(notice) = notices.peek() {
                if notice.anchor > pos {
                    break;
                }
                lines.push(notice_line(notice));
                notices.next();
            }

            lines.push((format!("{:>4}> {}", entry.id, entry.input), Color::Cyan));
            match &entry.result {
                Some(TxOutcome::Output(payload)) => {
                    for line in payload.lines() {
                        lines.push((format!("      {}", line), Color::White));
                    }
                }
                Some(TxOutcome::Failure(payload)) => {
                    for (i, line) in payload.lines().enumerate() {
                        let text = if i == 0 {
                            format!("      error: {}", line)
                        } else {
                            format!("      {}", line)
                        };
                        lines.push((text, Color::Red));
                    }
                }
                None if entry.pending => {
                    lines.push(("      ...".to_string(), Color::DarkGrey));
                }
                None => {}
            }
        }

        for notice in notices {
            lines.push(notice_line(notice));
        }

        lines
    }
}

fn notice_line(notice: &crate::ui::state::Notice) -> (String, Color) {
    let stamp = notice.timestamp.with_timezone(&Local).format("%H:%M:%S");
    (format!("[{}] {}", stamp, notice.text), Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::TransactionLog;

    #[test]
    fn pending_entries_show_a_waiting_marker() {
        let state = UIState::new();
        let mut session = TransactionLog::new();
        session.submit("\\! cmd");

        let lines = ConsoleMode::transcript_lines(&state, &session);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].0.contains("1> \\! cmd"));
        assert!(lines[1].0.contains("..."));
    }

    #[test]
    fn resolved_entries_show_their_payload() {
        let state = UIState::new();
        let mut session = TransactionLog::new();
        let id = session.submit("1+1").id;
        session.resolve(id, TxOutcome::Output("2".into())).unwrap();

        let lines = ConsoleMode::transcript_lines(&state, &session);
        assert!(lines[1].0.contains('2'));
    }

    #[test]
    fn notices_interleave_by_anchor() {
        let mut state = UIState::new();
        let mut session = TransactionLog::new();

        state.add_notice(0, "connecting...".into());
        session.submit("a");
        state.add_notice(session.len(), "connection closed.".into());

        let lines = ConsoleMode::transcript_lines(&state, &session);
        assert!(lines[0].0.contains("connecting..."));
        assert!(lines[1].0.contains("1> a"));
        assert!(lines[2].0.contains("connection closed."));
    }
}
