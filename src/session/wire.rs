//! JSON frame encoding for the evaluator connection.
//!
//! One message is one correlatable unit. Outbound frames are
//! `[id, class, text]` with class 0 for request and 1 for fire; inbound
//! frames are `[id, errorFlag, payload]` where a truthy flag routes the
//! payload to the error slot.
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::transactions::{SessionError, Submission, TxId, TxOutcome};

/// Outbound `[id, class, text]` array as the evaluator shim expects it.
#[derive(Serialize)]
struct OutboundFrame<'a>(TxId, u8, &'a str);

/// Inbound `[id, errorFlag, payload]` array. Flag and payload arrive as
/// arbitrary JSON values.
#[derive(Deserialize)]
struct InboundFrame(TxId, Value, Value);

/// A decoded inbound reply, ready to hand to `TransactionLog::resolve`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyFrame {
    pub id: TxId,
    pub outcome: TxOutcome,
}

pub fn encode_submission(sub: &Submission) -> Result<String, SessionError> {
    serde_json::to_string(&OutboundFrame(sub.id, sub.class.wire_tag(), &sub.wire_text))
        .map_err(|e| SessionError::BadFrame(e.to_string()))
}

/// Decodes an inbound reply frame.
///
/// The shim sends the flag as a number, but any truthy JSON value routes the
/// payload to the error slot. String payloads are taken verbatim; anything
/// else is rendered as its JSON text.
pub fn decode_reply(text: &str) -> Result<ReplyFrame, SessionError> {
    let InboundFrame(id, flag, payload) =
        serde_json::from_str(text).map_err(|e| SessionError::BadFrame(e.to_string()))?;

    let message = match payload {
        Value::String(s) => s,
        other => other.to_string(),
    };

    let outcome = if is_truthy(&flag) {
        TxOutcome::Failure(message)
    } else {
        TxOutcome::Output(message)
    };

    Ok(ReplyFrame { id, outcome })
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
