//! Debounced Lookup Controller
//!
//! Converts rapid ship-type changes into at most one candidate-ship
//! request per quiescence period. The controller is a long-lived object
//! owning one pending timer task; a change within the window aborts and
//! replaces the pending task, so only the final value is ever requested.
//! Every request is tagged with the ship type it was issued for and the
//! response is discarded if the tag no longer matches the selection.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::engine::RiskEngine;
use crate::session::{DashboardEvent, DashboardState};

pub struct LookupController {
    engine: Arc<dyn RiskEngine>,
    state: Arc<DashboardState>,
    quiescence: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl LookupController {
    /// Construct the controller. Construction never issues a fetch; only
    /// subsequent ship-type changes do.
    pub fn new(
        engine: Arc<dyn RiskEngine>,
        state: Arc<DashboardState>,
        quiescence: Duration,
    ) -> Self {
        Self {
            engine,
            state,
            quiescence,
            pending: Mutex::new(None),
        }
    }

    /// Operator-facing ship-type setter. The catalog is discarded
    /// synchronously the instant the type changes; the candidate lookup is
    /// then debounced. An empty value clears without any remote call.
    pub async fn set_ship_type(&self, ship_type: Option<String>) {
        let normalized = ship_type.filter(|t| !t.trim().is_empty());
        if !self.state.apply_ship_type(normalized.clone()).await {
            return;
        }

        let mut pending = self.pending.lock().await;
        if let Some(previous) = pending.take() {
            previous.abort();
        }

        let Some(ship_type) = normalized else {
            return;
        };

        let engine = Arc::clone(&self.engine);
        let state = Arc::clone(&self.state);
        let quiescence = self.quiescence;
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(quiescence).await;
            debug!("fetching candidate ship ids for type {ship_type}");
            match engine.list_ship_ids(&ship_type).await {
                Ok(ids) => {
                    if !state.set_catalog_if_current(&ship_type, ids).await {
                        debug!("discarded stale ship-id response for type {ship_type}");
                    }
                }
                Err(err) => {
                    warn!("ship-id lookup failed for type {ship_type}: {err}");
                    state.events().publish(DashboardEvent::LookupFailed {
                        ship_type,
                        error: err.to_string(),
                    });
                }
            }
        }));
    }
}
