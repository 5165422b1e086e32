//! HTTP Risk Engine
//!
//! `reqwest`-backed implementation of the engine interface, with a
//! per-request deadline and a configurable retry policy. The default policy
//! is a single attempt, matching the dashboard's "log and keep prior
//! state" failure contract.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::{DashboardConfig, RetryPolicy};
use crate::risk::RiskVector;

use super::{
    DisplayQuery, DomainQuery, EngineError, EngineResult, RiskEngine, RiskQuery, VRegionQuery,
    VoRegionQuery,
};

pub struct HttpRiskEngine {
    client: Client,
    base_url: String,
    retry: RetryPolicy,
}

impl HttpRiskEngine {
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            client: Client::builder()
                .timeout(config.request_timeout)
                .build()
                .unwrap_or_default(),
            base_url: config.engine_url.trim_end_matches('/').to_string(),
            retry: config.retry,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send a request, retrying per the configured policy, and decode the
    /// body as JSON. Non-2xx statuses count as failures like transport
    /// errors do.
    async fn request_json(
        &self,
        build: impl Fn() -> reqwest::RequestBuilder,
    ) -> EngineResult<Value> {
        let max_attempts = self.retry.attempts.max(1);
        let mut attempt = 0;
        loop {
            attempt += 1;
            let result = async {
                let response = build().send().await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(EngineError::Status(status.as_u16()));
                }
                Ok(response.json::<Value>().await?)
            }
            .await;

            match result {
                Ok(value) => return Ok(value),
                Err(err) if attempt < max_attempts => {
                    warn!(
                        "engine call failed on attempt {attempt}/{max_attempts}: {err}; retrying"
                    );
                    tokio::time::sleep(self.retry.backoff).await;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

#[async_trait]
impl RiskEngine for HttpRiskEngine {
    async fn list_ship_ids(&self, ship_type: &str) -> EngineResult<Vec<String>> {
        let url = format!(
            "{}/get_ship_ids?shipType={}",
            self.base_url,
            urlencoding::encode(ship_type)
        );
        debug!("listing ship ids for type {ship_type}");

        let value = self.request_json(|| self.client.get(&url)).await?;
        serde_json::from_value(value).map_err(|err| EngineError::Decode(err.to_string()))
    }

    async fn display_vessels(&self, query: &DisplayQuery) -> EngineResult<Value> {
        let url = format!(
            "{}/load_geojson_data_selected?shipType={}&datetime={}",
            self.base_url,
            urlencoding::encode(&query.ship_type),
            urlencoding::encode(&query.datetime)
        );
        debug!("fetching vessel positions for type {}", query.ship_type);

        self.request_json(|| self.client.get(&url)).await
    }

    async fn own_ship_domain(&self, query: &DomainQuery) -> EngineResult<Value> {
        let url = format!("{}/os_domain", self.base_url);
        debug!("fetching ship domain for {}", query.ship_id);

        self.request_json(|| self.client.post(&url).json(query)).await
    }

    async fn collision_risk(&self, query: &RiskQuery) -> EngineResult<RiskVector> {
        let url = format!("{}/computation", self.base_url);
        debug!(
            "computing collision risk for {} against {} target(s)",
            query.ship_id,
            query.selected_ts_ids.len()
        );

        let value = self
            .request_json(|| self.client.post(&url).json(query))
            .await?;
        let slots: Vec<f64> =
            serde_json::from_value(value).map_err(|err| EngineError::Decode(err.to_string()))?;
        RiskVector::from_slots(&slots)
            .ok_or_else(|| EngineError::Decode(format!("expected 5 risk slots, got {}", slots.len())))
    }

    async fn vo_region(&self, query: &VoRegionQuery) -> EngineResult<Value> {
        let url = format!("{}/computation_vo", self.base_url);
        self.request_json(|| self.client.post(&url).json(query)).await
    }

    async fn v_region(&self, query: &VRegionQuery) -> EngineResult<Value> {
        let url = format!("{}/computation_v", self.base_url);
        self.request_json(|| self.client.post(&url).json(query)).await
    }
}
