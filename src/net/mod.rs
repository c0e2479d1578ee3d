//! The websocket shell around the session core.
//!
//! One task owns the connection: outbound submissions arrive on a channel and
//! are written as JSON text frames; inbound frames are decoded and forwarded
//! to the UI as events. Lifecycle changes become notices; there is no
//! reconnection and no timeout for outstanding transactions.
use anyhow::Result;
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, error, info};

use crate::session::wire::{decode_reply, encode_submission};
use crate::session::Submission;
use crate::ui::UIEvent;

pub async fn run_connection(
    url: String,
    mut outbound_rx: mpsc::UnboundedReceiver<Submission>,
    event_tx: mpsc::UnboundedSender<UIEvent>,
) -> Result<()> {
    let _ = event_tx.send(UIEvent::Notice("connecting...".to_string()));

    let (socket, _) = match connect_async(url.as_str()).await {
        Ok(conn) => conn,
        Err(e) => {
            error!("failed to connect to {}: {}", url, e);
            let _ = event_tx.send(UIEvent::ConnectionClosed(Some(e.to_string())));
            return Ok(());
        }
    };

    info!("websocket connected to {}", url);
    let _ = event_tx.send(UIEvent::ConnectionOpened);

    let (mut ws_tx, mut ws_rx) = socket.split();

    loop {
        tokio::select! {
            submission = outbound_rx.recv() => {
                let Some(submission) = submission else {
                    // UI side is gone, wind down.
                    break;
                };
                let frame = match encode_submission(&submission) {
                    Ok(frame) => frame,
                    Err(e) => {
                        error!("failed to encode frame: {}", e);
                        continue;
                    }
                };
                debug!(id = submission.id, "sending frame");
                if let Err(e) = ws_tx.send(Message::Text(frame)).await {
                    let _ = event_tx.send(UIEvent::ConnectionClosed(Some(e.to_string())));
                    break;
                }
            }

            inbound = ws_rx.next() => {
                match inbound {
                    Some(Ok(Message::Text(text))) => match decode_reply(&text) {
                        Ok(reply) => {
                            debug!(id = reply.id, "reply received");
                            if event_tx.send(UIEvent::Reply(reply)).is_err() {
                                break;
                            }
                        }
                        Err(e) => {
                            // A frame we cannot decode is a protocol fault;
                            // surface it rather than dropping it.
                            error!("undecodable reply frame: {}", e);
                            let _ = event_tx.send(UIEvent::Notice(format!("protocol fault: {}", e)));
                        }
                    },
                    Some(Ok(Message::Close(_))) | None => {
                        let _ = event_tx.send(UIEvent::ConnectionClosed(None));
                        break;
                    }
                    Some(Ok(_)) => {
                        // Ping/pong and binary frames carry no replies.
                    }
                    Some(Err(e)) => {
                        let _ = event_tx.send(UIEvent::ConnectionClosed(Some(e.to_string())));
                        break;
                    }
                }
            }
        }
    }

    Ok(())
}
