//! A ring buffer of log entries with batched delivery to the UI.
//!
//! Entries are always retained up to the buffer capacity; only those at or
//! above the display level are forwarded, batched on a short timer so a burst
//! of logging does not turn into a burst of redraws.
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{interval, Interval};
use tracing::Level;

use crate::ui::{LogEntry, UIEvent};

const BATCH_INTERVAL: Duration = Duration::from_millis(100);

pub struct LogBuffer {
    entries: Arc<Mutex<VecDeque<LogEntry>>>,
    max_size: usize,
    ui_sender: Arc<Mutex<Option<mpsc::UnboundedSender<UIEvent>>>>,
    display_level: Arc<Mutex<Level>>,
    pending_batch: Arc<Mutex<Vec<LogEntry>>>,
    batch_timer: Arc<Mutex<Option<Interval>>>,
}

impl LogBuffer {
    pub fn new(max_size: usize) -> Self {
        Self {
            entries: Arc::new(Mutex::new(VecDeque::with_capacity(max_size))),
            max_size,
            ui_sender: Arc::new(Mutex::new(None)),
            display_level: Arc::new(Mutex::new(Level::DEBUG)),
            pending_batch: Arc::new(Mutex::new(Vec::new())),
            batch_timer: Arc::new(Mutex::new(None)),
        }
    }

    pub fn set_ui_sender(&self, sender: mpsc::UnboundedSender<UIEvent>) {
        *self.ui_sender.lock().unwrap() = Some(sender);
    }

    /// Stores an entry and queues it for the UI if it meets the display level.
    pub fn add_entry(&self, entry: LogEntry) {
        {
            let mut entries = self.entries.lock().unwrap();
            if entries.len() >= self.max_size {
                entries.pop_front();
            }
            entries.push_back(entry.clone());
        }

        let should_notify = entry.level <= *self.display_level.lock().unwrap();
        if should_notify {
            self.pending_batch.lock().unwrap().push(entry);
            self.start_batch_timer_if_needed();
        }
    }

    pub fn set_display_level(&self, level: Level) {
        *self.display_level.lock().unwrap() = level;

        if let Some(ref sender) = *self.ui_sender.lock().unwrap() {
            let _ = sender.send(UIEvent::RefreshLogs);
        }
    }

    fn start_batch_timer_if_needed(&self) {
        let mut timer_guard = self.batch_timer.lock().unwrap();
        if timer_guard.is_some() {
            return;
        }
        *timer_guard = Some(interval(BATCH_INTERVAL));

        let ui_sender = self.ui_sender.clone();
        let pending_batch = self.pending_batch.clone();
        let batch_timer = self.batch_timer.clone();

        drop(timer_guard);

        tokio::spawn(async move {
            let mut timer = {
                let mut timer_guard = batch_timer.lock().unwrap();
                timer_guard.take().unwrap()
            };

            // The first tick completes immediately; skip it.
            timer.tick().await;

            loop {
                timer.tick().await;

                let batch = {
                    let mut pending = pending_batch.lock().unwrap();
                    if pending.is_empty() {
                        continue;
                    }
                    pending.drain(..).collect::<Vec<_>>()
                };

                match &*ui_sender.lock().unwrap() {
                    Some(sender) => {
                        if sender.send(UIEvent::NewLogBatch(batch)).is_err() {
                            break;
                        }
                    }
                    None => break,
                }
            }

            *batch_timer.lock().unwrap() = None;
        });
    }
}
