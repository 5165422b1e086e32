//! Dashboard Flow Suite
//!
//! Drives the library end to end against a scripted mock engine: operator
//! selection, debounced lookups, the three-step collision-risk workflow,
//! and the mutual exclusion of the two overlay views.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use bridgewatch::engine::{
    DisplayQuery, DomainQuery, EngineError, EngineResult, RiskQuery, VRegionQuery, VoRegionQuery,
};
use bridgewatch::risk::{AlertBand, RiskVector};
use bridgewatch::{DashboardState, LookupController, RiskEngine, RiskOrchestrator};

/// Scripted engine that records every call it receives as `(name, body)`.
#[derive(Default)]
struct ScriptedEngine {
    calls: Mutex<Vec<(String, Value)>>,
    risk_slots: Option<[f64; 5]>,
    fail_vo: bool,
}

impl ScriptedEngine {
    fn with_risk(slots: [f64; 5]) -> Self {
        Self {
            risk_slots: Some(slots),
            ..Default::default()
        }
    }

    fn record(&self, name: &str, body: Value) {
        self.calls.lock().unwrap().push((name.to_string(), body));
    }

    fn call_names(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }

    fn body_of(&self, name: &str) -> Option<Value> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .find(|(called, _)| called == name)
            .map(|(_, body)| body.clone())
    }
}

#[async_trait]
impl RiskEngine for ScriptedEngine {
    async fn list_ship_ids(&self, ship_type: &str) -> EngineResult<Vec<String>> {
        self.record("list_ship_ids", json!({"shipType": ship_type}));
        Ok(vec!["A1".to_string(), "B2".to_string(), "C3".to_string()])
    }

    async fn display_vessels(&self, query: &DisplayQuery) -> EngineResult<Value> {
        self.record("display_vessels", json!({"shipType": query.ship_type}));
        Ok(json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": {"SHIP_ID": "A1", "COG": 45.0, "MODE": "HEAD_ON"},
                "geometry": {"type": "Point", "coordinates": [129.1, 35.2]}
            }]
        }))
    }

    async fn own_ship_domain(&self, query: &DomainQuery) -> EngineResult<Value> {
        self.record(
            "own_ship_domain",
            serde_json::to_value(query).unwrap_or(Value::Null),
        );
        Ok(json!({"type": "FeatureCollection", "features": []}))
    }

    async fn collision_risk(&self, query: &RiskQuery) -> EngineResult<RiskVector> {
        self.record(
            "collision_risk",
            serde_json::to_value(query).unwrap_or(Value::Null),
        );
        match self.risk_slots {
            Some(slots) => Ok(RiskVector::from(slots)),
            None => Err(EngineError::Status(500)),
        }
    }

    async fn vo_region(&self, query: &VoRegionQuery) -> EngineResult<Value> {
        self.record(
            "vo_region",
            serde_json::to_value(query).unwrap_or(Value::Null),
        );
        if self.fail_vo {
            return Err(EngineError::Status(500));
        }
        Ok(json!({"type": "Polygon", "coordinates": [[[129.0, 35.0], [129.2, 35.0], [129.1, 35.3], [129.0, 35.0]]]}))
    }

    async fn v_region(&self, query: &VRegionQuery) -> EngineResult<Value> {
        self.record(
            "v_region",
            serde_json::to_value(query).unwrap_or(Value::Null),
        );
        Ok(json!({"type": "Polygon", "coordinates": []}))
    }
}

fn observation_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap()
}

async fn operator_session(engine: Arc<ScriptedEngine>) -> (Arc<DashboardState>, RiskOrchestrator) {
    let state = Arc::new(DashboardState::new());
    let lookup = LookupController::new(engine.clone(), state.clone(), Duration::from_millis(10));

    lookup.set_ship_type(Some("cargo".to_string())).await;
    tokio::time::sleep(Duration::from_millis(60)).await;

    state.set_own_ship(Some("A1".to_string())).await;
    state.toggle_target("B2").await;
    state.set_observation_time(Some(observation_time())).await;
    state.set_window_length("6").await;

    let orchestrator = RiskOrchestrator::new(engine, state.clone());
    (state, orchestrator)
}

#[tokio::test]
async fn test_collision_risk_scenario() {
    let engine = Arc::new(ScriptedEngine::with_risk([12.3, 45.6, 0.62, 0.081, 7.5]));
    let (state, orchestrator) = operator_session(engine.clone()).await;

    orchestrator.collision_risk().await.unwrap();

    // the three steps ran in order, after the candidate lookup
    assert_eq!(
        engine.call_names(),
        vec!["list_ship_ids", "collision_risk", "vo_region", "v_region"]
    );

    // the computation body carried the whole selection
    let body = engine.body_of("collision_risk").unwrap();
    assert_eq!(body["shipType"], "cargo");
    assert_eq!(body["shipId"], "A1");
    assert_eq!(body["selectedTsIds"], json!(["B2"]));
    assert_eq!(body["timeLength"], 6);
    let datetime = body["datetime"].as_str().unwrap();
    assert!(datetime.ends_with('Z'), "datetime must be UTC: {datetime}");

    // the vo body has no own-ship id; the v body has no target list
    let vo_body = engine.body_of("vo_region").unwrap();
    assert!(vo_body.get("shipId").is_none());
    let v_body = engine.body_of("v_region").unwrap();
    assert!(v_body.get("selectedTsIds").is_none());

    let risk = state.risk().await;
    assert!(risk.result_updated);
    assert_eq!(risk.vector.vo_cri, 0.62);
    assert_eq!(risk.vector.tcpa, 7.5);
    assert_eq!(risk.vector.tcr_percent(), 8.1);
    assert_eq!(risk.band(), Some(AlertBand::High));

    let overlay = state.overlay().await;
    assert!(overlay.features.is_empty());
    assert!(overlay.vo.is_some() && overlay.v.is_some());
}

#[tokio::test]
async fn test_display_and_risk_views_replace_each_other() {
    let engine = Arc::new(ScriptedEngine::with_risk([0.0, 0.0, 0.1, 0.0, 0.0]));
    let (state, orchestrator) = operator_session(engine.clone()).await;

    orchestrator.display().await.unwrap();
    let displayed = state.overlay().await;
    assert_eq!(displayed.features.len(), 1);
    assert!(displayed.vo.is_none() && displayed.v.is_none());

    orchestrator.collision_risk().await.unwrap();
    let regions = state.overlay().await;
    assert!(regions.features.is_empty());
    assert!(regions.vo.is_some() && regions.v.is_some());
    assert_eq!(state.risk().await.band(), Some(AlertBand::Low));

    orchestrator.display().await.unwrap();
    let redisplayed = state.overlay().await;
    assert_eq!(redisplayed.features.len(), 1);
    assert!(redisplayed.vo.is_none() && redisplayed.v.is_none());
}

#[tokio::test]
async fn test_failed_risk_step_leaves_session_consistent() {
    // no scripted slots: the computation endpoint fails
    let engine = Arc::new(ScriptedEngine::default());
    let (state, orchestrator) = operator_session(engine.clone()).await;

    orchestrator.display().await.unwrap();
    let before = state.overlay().await;

    assert!(orchestrator.collision_risk().await.is_err());

    // no region step ran, nothing changed, the session stays usable
    assert!(!engine.call_names().contains(&"vo_region".to_string()));
    assert_eq!(state.overlay().await, before);
    assert!(!state.risk().await.result_updated);
    assert_eq!(state.risk().await.band(), None);

    orchestrator.display().await.unwrap();
}

#[tokio::test]
async fn test_partial_region_overlay_after_vo_failure() {
    let engine = Arc::new(ScriptedEngine {
        risk_slots: Some([1.0, 2.0, 0.3, 0.04, 5.0]),
        fail_vo: true,
        ..Default::default()
    });
    let (state, orchestrator) = operator_session(engine.clone()).await;

    orchestrator.collision_risk().await.unwrap();

    let overlay = state.overlay().await;
    assert!(overlay.vo.is_none());
    assert!(overlay.v.is_some());
    assert_eq!(state.risk().await.band(), Some(AlertBand::Moderate));
}

#[tokio::test]
async fn test_candidate_catalog_follows_type_changes() {
    let engine = Arc::new(ScriptedEngine::default());
    let state = Arc::new(DashboardState::new());
    let lookup = LookupController::new(engine.clone(), state.clone(), Duration::from_millis(10));

    lookup.set_ship_type(Some("cargo".to_string())).await;
    tokio::time::sleep(Duration::from_millis(60)).await;
    assert_eq!(state.catalog().await.ids.len(), 3);

    // toggling twice restores the target set
    state.toggle_target("B2").await;
    state.toggle_target("C3").await;
    state.toggle_target("B2").await;
    state.toggle_target("B2").await;
    assert_eq!(
        state.selection().await.target_ship_ids,
        vec!["C3".to_string(), "B2".to_string()]
    );

    // a type change drops catalog and targets before any response
    lookup.set_ship_type(Some("passenger".to_string())).await;
    assert!(state.catalog().await.ids.is_empty());
    assert!(state.selection().await.target_ship_ids.is_empty());
}

#[tokio::test]
async fn test_window_length_normalization_through_state() {
    let state = DashboardState::new();
    assert_eq!(state.set_window_length("12").await, Some(12));
    assert_eq!(state.set_window_length("0").await, None);
    assert_eq!(state.set_window_length("-5").await, None);
    assert_eq!(state.set_window_length("abc").await, None);
}
