//! The session protocol layer: transaction identifiers, reply correlation,
//! and command-history navigation.
//!
//! Everything in this module is free-standing state driven by explicit method
//! calls; the terminal shell owns the instances and the renderer only reads
//! them.
pub mod history;
pub mod transactions;
pub mod wire;

pub use history::HistoryNavigator;
pub use transactions::{
    SendClass, SessionError, Submission, TransactionEntry, TransactionLog, TxId, TxOutcome,
};
pub use wire::ReplyFrame;
