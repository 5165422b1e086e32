//! Session State Module
//!
//! Owns the operator's selection and the data cells it drives: the
//! candidate-ship catalog, the geospatial overlay, and the latest risk
//! assessment. Cells are replaced wholesale, never mutated in place, so the
//! render path always observes a consistent snapshot.

mod events;
mod selection;
mod state;

pub use events::{DashboardEvent, EventBus};
pub use selection::{normalize_window_length, Selection};
pub use state::{DashboardState, RiskAssessment, ShipIdCatalog};
