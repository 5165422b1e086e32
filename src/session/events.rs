//! Dashboard Event Bus
//!
//! Asynchronous pub/sub for state-change notifications and failure
//! reporting. The bus is owned by the state owner rather than living in a
//! process-wide global, so embedders decide its lifetime.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Notifications published by the dashboard state owner
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum DashboardEvent {
    /// Candidate-ship catalog replaced after a successful lookup
    CatalogUpdated { ship_type: String, count: usize },
    /// Catalog discarded because the ship type changed or was unset
    CatalogCleared,
    /// A lookup response arrived for a superseded ship type
    StaleLookupDiscarded {
        requested: String,
        current: Option<String>,
    },
    /// A candidate-ship lookup failed; catalog left as-is
    LookupFailed { ship_type: String, error: String },
    /// Overlay replaced by a display-style fetch (vessel markers)
    OverlayDisplayed { feature_count: usize },
    /// Overlay replaced by the collision-risk region view
    OverlayRegions { has_vo: bool, has_v: bool },
    /// Risk vector replaced by a successful computation
    RiskUpdated { vo_cri: f64 },
    /// A remote computation step failed; prior state retained
    ComputationFailed { step: String, error: String },
}

pub struct EventBus {
    tx: broadcast::Sender<DashboardEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(256);
        Self { tx }
    }

    /// Publish an event to all subscribers. Dropped when nobody listens.
    pub fn publish(&self, event: DashboardEvent) {
        let _ = self.tx.send(event);
    }

    /// Create a new subscriber
    pub fn subscribe(&self) -> broadcast::Receiver<DashboardEvent> {
        self.tx.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_publish_reaches_subscriber() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();

        bus.publish(DashboardEvent::CatalogUpdated {
            ship_type: "cargo".to_string(),
            count: 3,
        });

        match rx.recv().await.unwrap() {
            DashboardEvent::CatalogUpdated { ship_type, count } => {
                assert_eq!(ship_type, "cargo");
                assert_eq!(count, 3);
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_publish_without_subscribers_is_ok() {
        let bus = EventBus::new();
        bus.publish(DashboardEvent::CatalogCleared);
    }
}
