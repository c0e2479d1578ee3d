use std::io::{stdout, Write};

use anyhow::Result;
use crossterm::{
    cursor, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::ui::UIMode;

use super::TerminalUI;

impl TerminalUI {
    pub(super) fn render(&mut self) -> Result<()> {
        let mut stdout = stdout();

        queue!(stdout, Clear(ClearType::All), cursor::MoveTo(0, 0))?;

        let (width, height) = self.state.terminal_size;
        if height < 4 {
            return Ok(());
        }
        let view_height = height - 3;
        let status_row = view_height;
        let input_row = status_row + 1;
        let help_row = input_row + 1;

        match &self.state.mode {
            UIMode::Console => {
                self.console_mode.render(
                    &mut stdout,
                    &self.state,
                    &self.session,
                    (0, 0, width, view_height),
                )?;
            }
            UIMode::Logs { .. } => {
                self.log_mode
                    .render(&mut stdout, &self.state, (0, 0, width, view_height))?;
            }
        }

        self.render_status_line(&mut stdout, status_row, width)?;
        self.render_input_line(&mut stdout, input_row, width)?;
        self.render_help_line(&mut stdout, help_row)?;

        stdout.flush()?;
        Ok(())
    }

    fn render_status_line(&self, stdout: &mut impl Write, row: u16, width: u16) -> Result<()> {
        queue!(
            stdout,
            cursor::MoveTo(0, row),
            SetBackgroundColor(Color::DarkGrey),
            SetForegroundColor(Color::White)
        )?;

        let link = if self.state.connected {
            "connected"
        } else {
            "offline"
        };

        let status_text = match &self.state.mode {
            UIMode::Console => format!(
                " k3 console | {} | tx: {} | pending: {}",
                link,
                self.session.len(),
                self.session.pending_count()
            ),
            UIMode::Logs { filter, level } => {
                let filter_text = filter
                    .as_ref()
                    .map(|f| format!(" | filter: {}", f))
                    .unwrap_or_default();
                format!(
                    " k3 logs | level: {:?}{} | entries: {}",
                    level,
                    filter_text,
                    self.state.logs.len()
                )
            }
        };

        let display_text: String = status_text.chars().take(width as usize).collect();
        queue!(stdout, Print(&display_text))?;

        let padding = (width as usize).saturating_sub(UnicodeWidthStr::width(display_text.as_str()));
        if padding > 0 {
            queue!(stdout, Print(" ".repeat(padding)))?;
        }

        queue!(stdout, ResetColor)?;
        Ok(())
    }

    fn render_input_line(&self, stdout: &mut impl Write, row: u16, width: u16) -> Result<()> {
        queue!(stdout, cursor::MoveTo(0, row))?;

        let prompt = match &self.state.mode {
            UIMode::Console => "k3> ",
            UIMode::Logs { .. } => "log> ",
        };

        queue!(
            stdout,
            SetForegroundColor(Color::Cyan),
            Print(prompt),
            ResetColor,
            Print(&self.state.input_buffer)
        )?;

        let input_display_width: usize = self
            .state
            .input_buffer
            .chars()
            .take(self.state.cursor_pos)
            .map(|c| UnicodeWidthChar::width(c).unwrap_or(0))
            .sum();
        let cursor_x = UnicodeWidthStr::width(prompt) + input_display_width;
        if cursor_x < width as usize {
            queue!(stdout, cursor::MoveTo(cursor_x as u16, row))?;
        }

        Ok(())
    }

    fn render_help_line(&self, stdout: &mut impl Write, row: u16) -> Result<()> {
        queue!(stdout, cursor::MoveTo(0, row))?;

        let help_text = match &self.state.mode {
            UIMode::Console => {
                " ↑↓: history | PgUp/Down: scroll | \\! <cmd>: async | F9: logs | Ctrl+C: exit"
            }
            UIMode::Logs { .. } => {
                " ↑↓: scroll | Ctrl+↑↓: history | level/filter/clear | F9: console | Ctrl+C: exit"
            }
        };

        queue!(
            stdout,
            SetForegroundColor(Color::DarkGrey),
            Print(help_text),
            ResetColor
        )?;
        Ok(())
    }
}
