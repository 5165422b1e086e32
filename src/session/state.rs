//! Dashboard State Owner
//!
//! Single-writer cells for the selection, the candidate-ship catalog, the
//! overlay, and the latest risk assessment. Writers replace whole cells
//! under the cell lock; readers receive cloned snapshots. Catalog writes
//! are tagged with the ship type they were fetched for and discarded when
//! the tag no longer matches the current selection.

use chrono::NaiveDateTime;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::overlay::{OverlayFeature, OverlayModel};
use crate::risk::{classify, AlertBand, RiskVector};

use super::{DashboardEvent, EventBus, Selection};

/// Candidate ship ids, valid only for the ship type that produced them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShipIdCatalog {
    /// The ship type this catalog was fetched for
    pub ship_type: Option<String>,
    /// Ordered candidate ids; empty is a valid "no ships" answer
    pub ids: Vec<String>,
}

/// Latest risk vector plus the flag that distinguishes "computed safe"
/// from "never computed" (both have a non-positive index).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RiskAssessment {
    pub vector: RiskVector,
    pub result_updated: bool,
}

impl RiskAssessment {
    /// Current alert band, re-derived on every call.
    pub fn band(&self) -> Option<AlertBand> {
        classify(self.vector.vo_cri, self.result_updated)
    }
}

pub struct DashboardState {
    selection: RwLock<Selection>,
    catalog: RwLock<ShipIdCatalog>,
    overlay: RwLock<OverlayModel>,
    risk: RwLock<RiskAssessment>,
    events: EventBus,
}

impl DashboardState {
    pub fn new() -> Self {
        Self {
            selection: RwLock::new(Selection::default()),
            catalog: RwLock::new(ShipIdCatalog::default()),
            overlay: RwLock::new(OverlayModel::default()),
            risk: RwLock::new(RiskAssessment::default()),
            events: EventBus::new(),
        }
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    // ── snapshots ────────────────────────────────────────────────────────

    pub async fn selection(&self) -> Selection {
        self.selection.read().await.clone()
    }

    pub async fn catalog(&self) -> ShipIdCatalog {
        self.catalog.read().await.clone()
    }

    pub async fn overlay(&self) -> OverlayModel {
        self.overlay.read().await.clone()
    }

    pub async fn risk(&self) -> RiskAssessment {
        *self.risk.read().await
    }

    // ── selection cell ───────────────────────────────────────────────────

    /// Record a ship-type change. Synchronously discards the catalog and
    /// the now-invalid target selections; no previously selected target
    /// remains a valid candidate once the catalog is gone. Returns `false`
    /// when the value is unchanged (no clear, no event).
    pub async fn apply_ship_type(&self, ship_type: Option<String>) -> bool {
        {
            let mut selection = self.selection.write().await;
            if selection.ship_type == ship_type {
                return false;
            }
            selection.ship_type = ship_type;
            selection.target_ship_ids.clear();
        }
        {
            let mut catalog = self.catalog.write().await;
            *catalog = ShipIdCatalog::default();
        }
        self.events.publish(DashboardEvent::CatalogCleared);
        true
    }

    pub async fn set_own_ship(&self, id: Option<String>) {
        let id = id.filter(|s| !s.trim().is_empty());
        self.selection.write().await.own_ship_id = id;
    }

    /// Toggle a target-ship id and return the resulting set.
    pub async fn toggle_target(&self, id: &str) -> Vec<String> {
        let mut selection = self.selection.write().await;
        selection.toggle_target(id);
        selection.target_ship_ids.clone()
    }

    pub async fn set_observation_time(&self, at: Option<NaiveDateTime>) {
        self.selection.write().await.observation_time = at;
    }

    /// Normalize and apply raw window-length input; returns the value kept.
    pub async fn set_window_length(&self, raw: &str) -> Option<u32> {
        let mut selection = self.selection.write().await;
        selection.set_window_length(raw);
        selection.window_length
    }

    // ── catalog cell ─────────────────────────────────────────────────────

    /// Replace the catalog iff the response tag still matches the current
    /// ship type. The selection lock is held across the catalog write so a
    /// concurrent type change cannot interleave between check and set.
    /// Returns `false` when the response was stale and discarded.
    pub async fn set_catalog_if_current(&self, ship_type: &str, ids: Vec<String>) -> bool {
        let selection = self.selection.read().await;
        if selection.ship_type.as_deref() != Some(ship_type) {
            self.events.publish(DashboardEvent::StaleLookupDiscarded {
                requested: ship_type.to_string(),
                current: selection.ship_type.clone(),
            });
            return false;
        }

        let count = ids.len();
        {
            let mut catalog = self.catalog.write().await;
            *catalog = ShipIdCatalog {
                ship_type: Some(ship_type.to_string()),
                ids,
            };
        }
        self.events.publish(DashboardEvent::CatalogUpdated {
            ship_type: ship_type.to_string(),
            count,
        });
        true
    }

    // ── overlay and risk cells ───────────────────────────────────────────

    /// Replace the overlay with the vessel-marker view of a display-style
    /// fetch. Any `vo`/`v` regions from an earlier risk computation are
    /// dropped; the two views never coexist.
    pub async fn set_display_overlay(&self, features: Vec<OverlayFeature>) {
        let count = features.len();
        {
            let mut overlay = self.overlay.write().await;
            *overlay = OverlayModel::display(features);
        }
        self.events
            .publish(DashboardEvent::OverlayDisplayed { feature_count: count });
    }

    /// Replace the overlay with the region-only view of a collision-risk
    /// computation, dropping any vessel markers.
    pub async fn set_region_overlay(&self, vo: Option<Value>, v: Option<Value>) {
        let has_vo = vo.is_some();
        let has_v = v.is_some();
        {
            let mut overlay = self.overlay.write().await;
            *overlay = OverlayModel::regions(vo, v);
        }
        self.events
            .publish(DashboardEvent::OverlayRegions { has_vo, has_v });
    }

    /// Replace the risk vector and mark the first-result flag.
    pub async fn set_risk_vector(&self, vector: RiskVector) {
        {
            let mut risk = self.risk.write().await;
            *risk = RiskAssessment {
                vector,
                result_updated: true,
            };
        }
        self.events.publish(DashboardEvent::RiskUpdated {
            vo_cri: vector.vo_cri,
        });
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new()
    }
}
