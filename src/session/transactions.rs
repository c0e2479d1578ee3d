//! The transaction log: identifier allocation, sync/async classification,
//! and correlation of evaluator replies back to their originating entry.
use std::collections::BTreeMap;

use thiserror::Error;

/// Identifier issued per submission, strictly increasing from 1.
pub type TxId = u64;

/// Prefix that marks a command as fire-and-forget when followed by a space.
pub const ASYNC_MARKER: &str = "\\!";

/// Advisory transport tag for a submission.
///
/// `Request` expects a reply in the normal course of the exchange; `Fire`
/// tells the transport not to block on one. Correlation works identically for
/// both: replies carry the transaction id either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendClass {
    Request,
    Fire,
}

impl SendClass {
    /// Wire tag for the outbound frame (0 = request, 1 = fire).
    pub fn wire_tag(self) -> u8 {
        match self {
            SendClass::Request => 0,
            SendClass::Fire => 1,
        }
    }
}

/// What the evaluator reported for a transaction: exactly one of a success
/// payload or an error payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxOutcome {
    Output(String),
    Failure(String),
}

/// One submitted command and its eventual correlated result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionEntry {
    pub id: TxId,
    /// The literal text the user submitted, async marker included.
    pub input: String,
    /// True for fire-class entries from submission until their reply lands.
    pub pending: bool,
    pub result: Option<TxOutcome>,
}

/// What `submit` hands to the transport: the allocated id, the advisory
/// class, and the text to put on the wire (marker stripped for fire-class).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub id: TxId,
    pub class: SendClass,
    pub wire_text: String,
}

/// A protocol-level fault. Both variants mean the transport and the log have
/// desynchronized; callers surface them loudly and never retry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("reply correlates to no known transaction (id {0})")]
    UnknownTransaction(TxId),
    #[error("transaction {0} was already resolved")]
    AlreadyResolved(TxId),
    #[error("undecodable reply frame: {0}")]
    BadFrame(String),
}

/// Ordered log of submitted transactions, keyed by identifier.
///
/// Entries are stored in a `BTreeMap` keyed by `TxId` so correlation is
/// always by identifier and never by physical position; ids are strictly
/// increasing, so in-order map iteration is submission order. Entries
/// accumulate for the life of the session, there is no eviction.
#[derive(Debug)]
pub struct TransactionLog {
    entries: BTreeMap<TxId, TransactionEntry>,
    next_id: TxId,
}

impl Default for TransactionLog {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionLog {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Records a new transaction for `text` and returns what the transport
    /// should send. `text` must be non-empty; the UI boundary rejects empty
    /// submissions before they reach the log.
    ///
    /// A leading `\! ` classifies the command as fire-class: the marker is
    /// stripped from the wire text and the entry starts out pending. Anything
    /// else ships verbatim as request-class.
    pub fn submit(&mut self, text: &str) -> Submission {
        let id = self.next_id;
        self.next_id += 1;

        let marked = text
            .strip_prefix(ASYNC_MARKER)
            .and_then(|rest| rest.strip_prefix(' '));
        let (class, wire_text, pending) = match marked {
            Some(rest) => (SendClass::Fire, rest.to_string(), true),
            None => (SendClass::Request, text.to_string(), false),
        };

        self.entries.insert(
            id,
            TransactionEntry {
                id,
                input: text.to_string(),
                pending,
                result: None,
            },
        );

        Submission {
            id,
            class,
            wire_text,
        }
    }

    /// Correlates an inbound reply to its entry: clears the pending flag and
    /// attaches the outcome. An unknown id or a second reply for an already
    /// resolved id is a correlation fault.
    pub fn resolve(
        &mut self,
        id: TxId,
        outcome: TxOutcome,
    ) -> Result<&TransactionEntry, SessionError> {
        let entry = self
            .entries
            .get_mut(&id)
            .ok_or(SessionError::UnknownTransaction(id))?;

        if entry.result.is_some() {
            return Err(SessionError::AlreadyResolved(id));
        }

        entry.pending = false;
        entry.result = Some(outcome);
        Ok(entry)
    }

    pub fn entry(&self, id: TxId) -> Option<&TransactionEntry> {
        self.entries.get(&id)
    }

    /// Entries in submission order.
    pub fn iter(&self) -> impl Iterator<Item = &TransactionEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of fire-class entries still waiting for a reply.
    pub fn pending_count(&self) -> usize {
        self.entries.values().filter(|e| e.pending).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_strictly_increasing_from_one() {
        let mut log = TransactionLog::new();
        let ids: Vec<TxId> = (0..5).map(|_| log.submit("cmd").id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn request_class_keeps_full_text_and_is_not_pending() {
        let mut log = TransactionLog::new();
        let sub = log.submit("cmd");
        assert_eq!(sub.class, SendClass::Request);
        assert_eq!(sub.wire_text, "cmd");
        assert_eq!(sub.class.wire_tag(), 0);

        let entry = log.entry(sub.id).unwrap();
        assert!(!entry.pending);
        assert_eq!(entry.input, "cmd");
    }

    #[test]
    fn fire_class_strips_marker_and_starts_pending() {
        let mut log = TransactionLog::new();
        let sub = log.submit("\\! cmd");
        assert_eq!(sub.class, SendClass::Fire);
        assert_eq!(sub.wire_text, "cmd");
        assert_eq!(sub.class.wire_tag(), 1);

        let entry = log.entry(sub.id).unwrap();
        assert!(entry.pending);
        // The log keeps what the user typed, marker included.
        assert_eq!(entry.input, "\\! cmd");
    }

    #[test]
    fn marker_without_space_is_request_class() {
        let mut log = TransactionLog::new();
        let sub = log.submit("\\!cmd");
        assert_eq!(sub.class, SendClass::Request);
        assert_eq!(sub.wire_text, "\\!cmd");
    }

    #[test]
    fn resolve_mutates_exactly_the_correlated_entry() {
        let mut log = TransactionLog::new();
        let a = log.submit("\\! a").id;
        let b = log.submit("\\! b").id;

        log.resolve(a, TxOutcome::Output("42".into())).unwrap();

        let resolved = log.entry(a).unwrap();
        assert!(!resolved.pending);
        assert_eq!(resolved.result, Some(TxOutcome::Output("42".into())));

        let untouched = log.entry(b).unwrap();
        assert!(untouched.pending);
        assert_eq!(untouched.result, None);
    }

    #[test]
    fn resolve_routes_error_payload_to_the_error_slot() {
        let mut log = TransactionLog::new();
        let id = log.submit("bad").id;
        log.resolve(id, TxOutcome::Failure("type error".into()))
            .unwrap();
        assert_eq!(
            log.entry(id).unwrap().result,
            Some(TxOutcome::Failure("type error".into()))
        );
    }

    #[test]
    fn second_resolve_is_a_correlation_fault() {
        let mut log = TransactionLog::new();
        let id = log.submit("\\! cmd").id;
        log.resolve(id, TxOutcome::Output("42".into())).unwrap();
        assert_eq!(
            log.resolve(id, TxOutcome::Output("43".into())),
            Err(SessionError::AlreadyResolved(id))
        );
        // The first outcome sticks.
        assert_eq!(
            log.entry(id).unwrap().result,
            Some(TxOutcome::Output("42".into()))
        );
    }

    #[test]
    fn unknown_id_is_a_correlation_fault() {
        let mut log = TransactionLog::new();
        log.submit("cmd");
        assert_eq!(
            log.resolve(99, TxOutcome::Output("?".into())),
            Err(SessionError::UnknownTransaction(99))
        );
    }

    #[test]
    fn iteration_is_submission_order() {
        let mut log = TransactionLog::new();
        log.submit("first");
        log.submit("second");
        log.submit("third");
        let inputs: Vec<&str> = log.iter().map(|e| e.input.as_str()).collect();
        assert_eq!(inputs, vec!["first", "second", "third"]);
    }

    #[test]
    fn pending_count_tracks_unresolved_fire_entries() {
        let mut log = TransactionLog::new();
        log.submit("sync");
        let a = log.submit("\\! a").id;
        log.submit("\\! b");
        assert_eq!(log.pending_count(), 2);

        log.resolve(a, TxOutcome::Output("done".into())).unwrap();
        assert_eq!(log.pending_count(), 1);
    }
}
