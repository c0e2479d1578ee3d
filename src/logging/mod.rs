//! Logging infrastructure: a `tracing` layer that collects events into a
//! buffer and ships them to the UI in batches.
pub mod buffer;
pub mod collector;

pub use buffer::LogBuffer;
pub use collector::TuiLogCollector;
