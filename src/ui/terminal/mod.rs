//! The terminal event loop and its rendering.
mod controller;
mod events;
mod lifecycle;
mod render;

pub use controller::TerminalUI;
