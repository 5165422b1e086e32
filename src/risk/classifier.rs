//! Risk Classifier
//!
//! Maps the collision risk index to one of four ordered alert bands. Pure
//! and evaluated on demand so the display never caches a stale band.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Ordered alert bands derived from VO-CRI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertBand {
    High,
    Moderate,
    Low,
    Safe,
}

impl AlertBand {
    /// Operator-facing alert message for this band.
    pub fn message(&self) -> &'static str {
        match self {
            AlertBand::High => {
                "Warning: High Collision Risk Index [Action of collision avoidance required]"
            }
            AlertBand::Moderate => "Warning: Moderate Collision Risk Index",
            AlertBand::Low => "Low Collision Risk Index",
            AlertBand::Safe => "Current OS is Safe with Selected TS",
        }
    }
}

impl fmt::Display for AlertBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertBand::High => write!(f, "High"),
            AlertBand::Moderate => write!(f, "Moderate"),
            AlertBand::Low => write!(f, "Low"),
            AlertBand::Safe => write!(f, "Safe"),
        }
    }
}

/// Classify a risk index into an alert band. `None` until the first
/// computation has completed, so the untouched zero index is not reported
/// as safe. The intervals are half-open, making the bands mutually
/// exclusive by construction.
pub fn classify(vo_cri: f64, result_updated: bool) -> Option<AlertBand> {
    if !result_updated {
        return None;
    }
    let band = if vo_cri >= 0.5 {
        AlertBand::High
    } else if vo_cri >= 0.25 {
        AlertBand::Moderate
    } else if vo_cri > 0.0 {
        AlertBand::Low
    } else {
        AlertBand::Safe
    };
    Some(band)
}
