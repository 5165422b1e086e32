//! BridgeWatch: Maritime Collision-Risk Dashboard Client
//!
//! A Rust client for an interactive vessel-traffic dashboard:
//! - Session selection state held in single-writer cells
//! - Debounced candidate-ship lookups with stale-response discard
//! - Sequenced collision-risk computations against a remote risk engine
//! - Geospatial overlay assembly for a map renderer
//! - Risk-index classification into discrete alert bands

pub mod config;
pub mod engine;
pub mod lookup;
pub mod overlay;
pub mod render;
pub mod risk;
pub mod session;

// Re-exports for convenience
pub use config::DashboardConfig;
pub use engine::{HttpRiskEngine, RiskEngine};
pub use lookup::LookupController;
pub use overlay::OverlayModel;
pub use risk::{AlertBand, RiskOrchestrator};
pub use session::DashboardState;
