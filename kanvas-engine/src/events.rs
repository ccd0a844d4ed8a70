//! Typed engine event bus
//!
//! Components that previously reacted to ambient window events (the old
//! "jump to category" signal, view refreshes after a commit) subscribe here
//! instead. Publishing never blocks; a lagged subscriber drops old events.

use tokio::sync::broadcast;

/// Events published by the engine after state-changing operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// MSL categories were replaced by an upload
    MslReplaced { categories: Vec<String> },
    /// Catalog products were upserted by an upload
    CatalogUpserted {
        added: usize,
        updated: usize,
        failed: usize,
    },
    /// Outlets were upserted by an upload
    OutletsUpserted {
        added: usize,
        updated: usize,
        failed: usize,
    },
    /// UI navigation request: focus a category in the MSL view
    JumpToCategory { category: String },
}

/// Broadcast bus for [`EngineEvent`]
///
/// Cheap to clone; all clones share the same channel.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<EngineEvent>,
}

impl EventBus {
    /// Create a bus with the given channel capacity
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Subscribe to all engine events
    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.tx.subscribe()
    }

    /// Publish an event to all current subscribers
    ///
    /// An event published with no subscribers is dropped silently; that is
    /// the expected steady state when no view is open.
    pub fn publish(&self, event: EngineEvent) {
        let receivers = self.tx.receiver_count();
        if receivers == 0 {
            tracing::debug!(?event, "Event dropped, no subscribers");
            return;
        }
        if let Err(e) = self.tx.send(event) {
            tracing::warn!("Failed to publish engine event: {e}");
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscriber_receives_published_event() {
        let bus = EventBus::new(8);
        let mut rx = bus.subscribe();

        bus.publish(EngineEvent::JumpToCategory {
            category: "GROCERY".into(),
        });

        let event = rx.recv().await.unwrap();
        assert_eq!(
            event,
            EngineEvent::JumpToCategory {
                category: "GROCERY".into()
            }
        );
    }

    #[test]
    fn publish_without_subscribers_is_noop() {
        let bus = EventBus::new(8);
        bus.publish(EngineEvent::MslReplaced { categories: vec![] });
    }
}
