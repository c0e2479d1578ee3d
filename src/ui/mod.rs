//! The terminal shell: event loop, key handling, and rendering around the
//! session core.
pub mod console_mode;
pub mod event;
pub mod log_entry;
pub mod log_mode;
pub mod mode;
pub mod runner;
pub mod state;
pub mod terminal;

pub use console_mode::ConsoleMode;
pub use event::UIEvent;
pub use log_entry::LogEntry;
pub use log_mode::LogMode;
pub use mode::UIMode;
pub use runner::run_tui;
pub use state::UIState;
pub use terminal::TerminalUI;
