//! Risk Orchestrator
//!
//! Executes the display, own-ship-domain, and collision-risk operations
//! against the engine and keeps the overlay and risk cells coherent. The
//! collision-risk operation is an explicit three-step sequence: the
//! headline vector first, then the velocity-obstacle and velocity regions
//! as supplementary overlays that never block or race it.

use std::sync::Arc;

use chrono::{DateTime, Local, LocalResult, NaiveDateTime, TimeZone, Utc};
use thiserror::Error;
use tracing::{debug, warn};

use crate::engine::{
    DisplayQuery, DomainQuery, EngineError, RiskEngine, RiskQuery, VRegionQuery, VoRegionQuery,
};
use crate::overlay::parse_feature_collection;
use crate::session::{DashboardEvent, DashboardState, Selection};

/// Operation failures. Validation and busy abort before any network
/// traffic; engine failures are returned after the retain-prior-state
/// policy has been applied.
#[derive(Debug, Error, PartialEq)]
pub enum OrchestratorError {
    /// A required selection field is missing
    #[error("validation failure: {0}")]
    Validation(&'static str),
    /// Another operation is still outstanding
    #[error("an operation is already in flight")]
    Busy,
    /// The remote computation failed; prior state retained
    #[error("computation failed: {0}")]
    Engine(String),
}

pub struct RiskOrchestrator {
    engine: Arc<dyn RiskEngine>,
    state: Arc<DashboardState>,
    in_flight: tokio::sync::Mutex<()>,
}

impl RiskOrchestrator {
    pub fn new(engine: Arc<dyn RiskEngine>, state: Arc<DashboardState>) -> Self {
        Self {
            engine,
            state,
            in_flight: tokio::sync::Mutex::new(()),
        }
    }

    /// Fetch vessel positions for the selected type and instant, replacing
    /// the overlay with the marker view.
    pub async fn display(&self) -> Result<(), OrchestratorError> {
        let _guard = self
            .in_flight
            .try_lock()
            .map_err(|_| OrchestratorError::Busy)?;
        let selection = self.state.selection().await;
        let datetime = utc_timestamp(&selection)?;

        let query = DisplayQuery {
            ship_type: selection.ship_type.clone().unwrap_or_default(),
            datetime,
        };
        match self.engine.display_vessels(&query).await {
            Ok(raw) => {
                let features = parse_feature_collection(&raw);
                debug!("display fetch returned {} feature(s)", features.len());
                self.state.set_display_overlay(features).await;
                Ok(())
            }
            Err(err) => Err(self.report_failure("display", err)),
        }
    }

    /// Fetch the own-ship domain, replacing the overlay with the
    /// server-determined marker view.
    pub async fn own_ship_domain(&self) -> Result<(), OrchestratorError> {
        let _guard = self
            .in_flight
            .try_lock()
            .map_err(|_| OrchestratorError::Busy)?;
        let selection = self.state.selection().await;
        let datetime = utc_timestamp(&selection)?;
        let ship_id = own_ship_id(&selection)?;

        let query = DomainQuery {
            ship_type: selection.ship_type.clone().unwrap_or_default(),
            ship_id,
            datetime,
            time_length: selection.window_length,
        };
        match self.engine.own_ship_domain(&query).await {
            Ok(raw) => {
                let features = parse_feature_collection(&raw);
                self.state.set_display_overlay(features).await;
                Ok(())
            }
            Err(err) => Err(self.report_failure("os_domain", err)),
        }
    }

    /// Run the three-step collision-risk workflow:
    ///
    /// 1. risk vector; a failure here aborts the workflow with every cell
    ///    untouched;
    /// 2. velocity-obstacle region of the target ships;
    /// 3. velocity region of the own ship.
    ///
    /// Step 2/3 failures are reported and the surviving region still
    /// applied; with both regions lost the prior overlay is retained.
    pub async fn collision_risk(&self) -> Result<(), OrchestratorError> {
        let _guard = self
            .in_flight
            .try_lock()
            .map_err(|_| OrchestratorError::Busy)?;
        let selection = self.state.selection().await;
        let datetime = utc_timestamp(&selection)?;
        let ship_id = own_ship_id(&selection)?;
        let ship_type = selection.ship_type.clone().unwrap_or_default();

        let risk_query = RiskQuery {
            ship_type: ship_type.clone(),
            ship_id: ship_id.clone(),
            selected_ts_ids: selection.target_ship_ids.clone(),
            datetime: datetime.clone(),
            time_length: selection.window_length,
        };
        let vector = match self.engine.collision_risk(&risk_query).await {
            Ok(vector) => vector,
            Err(err) => return Err(self.report_failure("collision_risk", err)),
        };
        self.state.set_risk_vector(vector).await;

        let vo_query = VoRegionQuery {
            ship_type: ship_type.clone(),
            selected_ts_ids: selection.target_ship_ids.clone(),
            datetime: datetime.clone(),
            time_length: selection.window_length,
        };
        let vo = match self.engine.vo_region(&vo_query).await {
            Ok(geojson) => Some(geojson),
            Err(err) => {
                self.report_failure("vo_region", err);
                None
            }
        };

        let v_query = VRegionQuery {
            ship_type,
            ship_id,
            datetime,
            time_length: selection.window_length,
        };
        let v = match self.engine.v_region(&v_query).await {
            Ok(geojson) => Some(geojson),
            Err(err) => {
                self.report_failure("v_region", err);
                None
            }
        };

        if vo.is_some() || v.is_some() {
            self.state.set_region_overlay(vo, v).await;
        }
        Ok(())
    }

    fn report_failure(&self, step: &str, err: EngineError) -> OrchestratorError {
        warn!("{step} step failed: {err}");
        self.state.events().publish(DashboardEvent::ComputationFailed {
            step: step.to_string(),
            error: err.to_string(),
        });
        OrchestratorError::Engine(err.to_string())
    }
}

fn own_ship_id(selection: &Selection) -> Result<String, OrchestratorError> {
    selection
        .own_ship_id
        .clone()
        .ok_or(OrchestratorError::Validation("own ship is not selected"))
}

/// Serialize the observation instant for transmission: the naive-local
/// value is resolved against the local offset and emitted as ISO-8601 UTC.
fn utc_timestamp(selection: &Selection) -> Result<String, OrchestratorError> {
    let local = selection
        .observation_time
        .ok_or(OrchestratorError::Validation("observation time is not set"))?;
    Ok(format_utc(naive_to_utc_in(&Local, local)))
}

/// Resolve a timezone-naive instant in `tz` to UTC. An ambiguous local
/// time (DST fold) takes the earlier mapping; a nonexistent one falls back
/// to reading the value as UTC.
fn naive_to_utc_in<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> DateTime<Utc> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(instant) => instant.with_timezone(&Utc),
        LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        LocalResult::None => Utc.from_utc_datetime(&naive),
    }
}

fn format_utc(instant: DateTime<Utc>) -> String {
    instant.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}
