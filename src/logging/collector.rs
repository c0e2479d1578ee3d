//! A `tracing` layer that routes events into the TUI log buffer instead of
//! stdout, which the raw-mode terminal owns.
use std::sync::Arc;

use chrono::Utc;
use tracing::{Event, Subscriber};
use tracing_subscriber::{
    layer::{Context, SubscriberExt},
    registry::LookupSpan,
    Layer,
};

use super::LogBuffer;
use crate::ui::LogEntry;

pub struct TuiLogCollector {
    buffer: Arc<LogBuffer>,
}

impl TuiLogCollector {
    pub fn new(buffer: Arc<LogBuffer>) -> Self {
        Self { buffer }
    }

    /// Installs the collector as the global default subscriber.
    pub fn init_subscriber(
        buffer: Arc<LogBuffer>,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let subscriber = tracing_subscriber::registry().with(TuiLogCollector::new(buffer));
        tracing::subscriber::set_global_default(subscriber)?;
        Ok(())
    }
}

impl<S> Layer<S> for TuiLogCollector
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();

        let mut message = String::new();
        event.record(&mut MessageVisitor(&mut message));

        // Last path component keeps the log lines short.
        let module = metadata
            .module_path()
            .map(|p| p.split("::").last().unwrap_or(p).to_string())
            .unwrap_or_else(|| metadata.target().to_string());

        self.buffer.add_entry(LogEntry {
            timestamp: Utc::now(),
            level: *metadata.level(),
            module,
            message,
        });
    }
}

struct MessageVisitor<'a>(&'a mut String);

impl MessageVisitor<'_> {
    fn push_field(&mut self, name: &str, value: impl std::fmt::Display) {
        if !self.0.is_empty() {
            self.0.push(' ');
        }
        self.0.push_str(&format!("{}={}", name, value));
    }
}

impl tracing::field::Visit for MessageVisitor<'_> {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            *self.0 = format!("{:?}", value);
        } else {
            self.push_field(field.name(), format!("{:?}", value));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            *self.0 = value.to_string();
        } else {
            self.push_field(field.name(), value);
        }
    }
}
