//! Dashboard Configuration
//!
//! Environment-driven settings for the engine client and the lookup
//! controller. The binary loads a `.env` file via `dotenv` before calling
//! `from_env`.

use std::time::Duration;

/// Configuration for the dashboard client
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Base URL of the remote risk engine
    pub engine_url: String,
    /// Per-request deadline for engine calls
    pub request_timeout: Duration,
    /// Quiescence window for candidate-ship lookups
    pub debounce_window: Duration,
    /// Retry policy for engine calls
    pub retry: RetryPolicy,
}

/// Retry policy for remote calls. One attempt means no retry, which keeps
/// the "log and retain prior state" failure contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts per call
    pub attempts: u32,
    /// Delay between attempts
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 1,
            backoff: Duration::from_millis(500),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            engine_url: "http://127.0.0.1:8080".to_string(),
            request_timeout: Duration::from_secs(30),
            debounce_window: Duration::from_millis(300),
            retry: RetryPolicy::default(),
        }
    }
}

impl DashboardConfig {
    /// Load configuration from environment variables, falling back to the
    /// defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("RISK_ENGINE_URL") {
            if !url.trim().is_empty() {
                config.engine_url = url;
            }
        }
        if let Some(secs) = parse_var("RISK_ENGINE_TIMEOUT_SECS") {
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(ms) = parse_var("LOOKUP_DEBOUNCE_MS") {
            config.debounce_window = Duration::from_millis(ms);
        }
        if let Some(attempts) = parse_var("RISK_ENGINE_ATTEMPTS") {
            config.retry.attempts = (attempts as u32).max(1);
        }
        if let Some(ms) = parse_var("RISK_ENGINE_BACKOFF_MS") {
            config.retry.backoff = Duration::from_millis(ms);
        }

        config
    }
}

fn parse_var(name: &str) -> Option<u64> {
    std::env::var(name).ok()?.trim().parse().ok()
}
