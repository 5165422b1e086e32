//! Risk Engine Client Module
//!
//! Typed interface to the remote computation service. The orchestration
//! layer talks to the `RiskEngine` trait; the HTTP implementation lives in
//! `http` and tests substitute recording mocks.

mod http;

pub use http::HttpRiskEngine;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::risk::RiskVector;

/// Errors surfaced by engine implementations. Transport problems and error
/// statuses are handled identically upstream: logged, prior state retained.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("engine returned status {0}")]
    Status(u16),
    #[error("unexpected response shape: {0}")]
    Decode(String),
}

pub type EngineResult<T> = Result<T, EngineError>;

/// Query for the display-vessels fetch
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DisplayQuery {
    pub ship_type: String,
    /// Observation instant, ISO-8601 UTC
    pub datetime: String,
}

/// Body of the own-ship domain computation
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DomainQuery {
    pub ship_type: String,
    pub ship_id: String,
    pub datetime: String,
    /// Count of 10-minute units; the engine falls back to its own default
    /// when omitted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_length: Option<u32>,
}

/// Body of the collision-risk computation
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RiskQuery {
    pub ship_type: String,
    pub ship_id: String,
    pub selected_ts_ids: Vec<String>,
    pub datetime: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_length: Option<u32>,
}

/// Body of the velocity-obstacle region computation
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VoRegionQuery {
    pub ship_type: String,
    pub selected_ts_ids: Vec<String>,
    pub datetime: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_length: Option<u32>,
}

/// Body of the velocity region computation
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VRegionQuery {
    pub ship_type: String,
    pub ship_id: String,
    pub datetime: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_length: Option<u32>,
}

/// The remote computation service consumed by the dashboard.
#[async_trait]
pub trait RiskEngine: Send + Sync {
    /// Ordered candidate ship ids for a vessel type
    async fn list_ship_ids(&self, ship_type: &str) -> EngineResult<Vec<String>>;

    /// GeoJSON feature collection of vessel positions at an instant
    async fn display_vessels(&self, query: &DisplayQuery) -> EngineResult<Value>;

    /// GeoJSON feature collection describing the own-ship domain
    async fn own_ship_domain(&self, query: &DomainQuery) -> EngineResult<Value>;

    /// The five-slot risk vector for an encounter
    async fn collision_risk(&self, query: &RiskQuery) -> EngineResult<RiskVector>;

    /// Velocity-obstacle region GeoJSON for the target ships
    async fn vo_region(&self, query: &VoRegionQuery) -> EngineResult<Value>;

    /// Velocity region GeoJSON for the own ship
    async fn v_region(&self, query: &VRegionQuery) -> EngineResult<Value>;
}
