//! Notification delivery
//!
//! The engine never renders anything. Each command may produce one
//! `NotificationPayload`, handed to the session's `NotificationSink`; the
//! host decides how to show it (toast, banner, log line).

use parking_lot::Mutex;
use shared::message::{NotificationLevel, NotificationPayload};

/// Receives notifications produced by schedule commands
pub trait NotificationSink: Send + Sync + std::fmt::Debug {
    fn notify(&self, payload: NotificationPayload);
}

/// Writes every notification to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&self, payload: NotificationPayload) {
        let data = payload.data.as_ref().map(|d| d.to_string());
        match payload.level {
            NotificationLevel::Error | NotificationLevel::Warning => {
                tracing::warn!(title = %payload.title, data = ?data, "{}", payload.message)
            }
            NotificationLevel::Info | NotificationLevel::Success => {
                tracing::info!(title = %payload.title, data = ?data, "{}", payload.message)
            }
        }
    }
}

/// Keeps notifications until the host drains them
#[derive(Debug, Default)]
pub struct MemorySink {
    queue: Mutex<Vec<NotificationPayload>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain everything received so far, oldest first
    pub fn take(&self) -> Vec<NotificationPayload> {
        std::mem::take(&mut *self.queue.lock())
    }

    pub fn len(&self) -> usize {
        self.queue.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.lock().is_empty()
    }

    /// Most recent notification, without draining
    pub fn last(&self) -> Option<NotificationPayload> {
        self.queue.lock().last().cloned()
    }
}

impl NotificationSink for MemorySink {
    fn notify(&self, payload: NotificationPayload) {
        self.queue.lock().push(payload);
    }
}

/// Drops everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl NotificationSink for NullSink {
    fn notify(&self, _payload: NotificationPayload) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_memory_sink_take_drains_in_order() {
        let sink = MemorySink::new();
        sink.notify(NotificationPayload::info("a", "first"));
        sink.notify(NotificationPayload::error("b", "second"));

        assert_eq!(sink.len(), 2);
        assert_eq!(sink.last().unwrap().message, "second");

        let taken = sink.take();
        assert_eq!(taken.len(), 2);
        assert_eq!(taken[0].message, "first");
        assert_eq!(taken[1].level, NotificationLevel::Error);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_sinks_as_trait_objects() {
        let memory = Arc::new(MemorySink::new());
        let sinks: Vec<Arc<dyn NotificationSink>> =
            vec![memory.clone(), Arc::new(TracingSink), Arc::new(NullSink)];

        for sink in &sinks {
            sink.notify(NotificationPayload::success("Saved", "ok"));
        }
        assert_eq!(memory.len(), 1);
    }
}
