//! Geospatial Overlay Module
//!
//! The normalized in-memory representation handed to the map renderer:
//! vessel markers and generic regions from display-style queries, plus the
//! velocity-obstacle (`vo`) and velocity (`v`) region sets produced by the
//! collision-risk workflow. The two views never occupy the overlay at the
//! same time.

mod feature;

pub use feature::{
    encounter_mode_label, parse_feature_collection, OverlayFeature, PositionFeature,
    RegionFeature,
};

use serde_json::Value;

/// Renderable overlay snapshot, replaced wholesale on every update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlayModel {
    /// Vessel markers and generic regions from a display-style fetch
    pub features: Vec<OverlayFeature>,
    /// Velocity-obstacle regions of the target ships (risk view only)
    pub vo: Option<Value>,
    /// Velocity region of the own ship (risk view only)
    pub v: Option<Value>,
}

impl OverlayModel {
    /// The view produced by display-style fetches: markers only.
    pub fn display(features: Vec<OverlayFeature>) -> Self {
        Self {
            features,
            vo: None,
            v: None,
        }
    }

    /// The view produced by the collision-risk workflow: regions only.
    pub fn regions(vo: Option<Value>, v: Option<Value>) -> Self {
        Self {
            features: Vec::new(),
            vo,
            v,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty() && self.vo.is_none() && self.v.is_none()
    }
}
