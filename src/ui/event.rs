use crossterm::event::KeyEvent;

use crate::session::ReplyFrame;

use super::log_entry::LogEntry;

#[derive(Debug)]
pub enum UIEvent {
    /// A decoded reply from the evaluator, to be correlated by id.
    Reply(ReplyFrame),
    /// The connection came up.
    ConnectionOpened,
    /// The connection went away, with a reason when the transport had one.
    ConnectionClosed(Option<String>),
    /// A log-like line for the transcript that carries no transaction id.
    Notice(String),
    NewLogBatch(Vec<LogEntry>),
    RefreshLogs,
    KeyPress(KeyEvent),
    Resize(u16, u16),
}
