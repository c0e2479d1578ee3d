//! Wires the channels together: terminal input polling, the evaluator
//! connection, and the UI event loop.
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event};
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::app::AppArgs;
use crate::logging::{LogBuffer, TuiLogCollector};
use crate::net;
use crate::session::Submission;
use crate::ui::{TerminalUI, UIEvent};

pub async fn run_tui(args: AppArgs) -> Result<()> {
    let log_buffer = Arc::new(LogBuffer::new(10000));
    if let Err(e) = TuiLogCollector::init_subscriber(log_buffer.clone()) {
        eprintln!("failed to initialize log collector: {}", e);
    }

    info!("starting k3 console, evaluator at {}", args.url);

    let (ui_event_tx, ui_event_rx) = mpsc::unbounded_channel::<UIEvent>();
    let (outbound_tx, outbound_rx) = mpsc::unbounded_channel::<Submission>();

    log_buffer.set_ui_sender(ui_event_tx.clone());

    let mut terminal_ui = TerminalUI::new(ui_event_rx, outbound_tx);
    terminal_ui.set_log_buffer(log_buffer.clone());
    if let Some(text) = &args.input {
        terminal_ui.preload_input(text);
    }

    // Evaluator connection task.
    let net_event_tx = ui_event_tx.clone();
    let url = args.url.clone();
    tokio::spawn(async move {
        if let Err(e) = net::run_connection(url, outbound_rx, net_event_tx).await {
            error!("connection task failed: {}", e);
        }
    });

    // Terminal input polling task.
    let input_event_tx = ui_event_tx.clone();
    tokio::spawn(async move {
        loop {
            if event::poll(Duration::from_millis(100)).unwrap_or(false) {
                match event::read() {
                    Ok(Event::Key(key_event)) => {
                        if input_event_tx.send(UIEvent::KeyPress(key_event)).is_err() {
                            break;
                        }
                    }
                    Ok(Event::Resize(width, height)) => {
                        if input_event_tx.send(UIEvent::Resize(width, height)).is_err() {
                            break;
                        }
                    }
                    Ok(_) => {}
                    Err(e) => {
                        debug!("failed to read terminal event: {}", e);
                        break;
                    }
                }
            }
        }
    });

    terminal_ui.run().await
}
