//! Operator selection state.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// The operator's current choices. `None` / empty means unset.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Selection {
    /// Vessel type under inspection (e.g. "cargo", "passenger")
    pub ship_type: Option<String>,
    /// Own ship (OS): the vessel whose risk exposure is evaluated
    pub own_ship_id: Option<String>,
    /// Target ships (TS), insertion-ordered and duplicate-free. The order
    /// keeps the UI stable; the engine treats the list as unordered.
    pub target_ship_ids: Vec<String>,
    /// Observation instant, captured timezone-naive in local time
    pub observation_time: Option<NaiveDateTime>,
    /// Time window as a count of 10-minute units
    pub window_length: Option<u32>,
}

impl Selection {
    /// Toggle a target-ship id: remove it when present, append it when
    /// absent. Toggling twice restores the original set.
    pub fn toggle_target(&mut self, id: &str) {
        if let Some(pos) = self.target_ship_ids.iter().position(|t| t == id) {
            self.target_ship_ids.remove(pos);
        } else {
            self.target_ship_ids.push(id.to_string());
        }
    }

    /// Set the window length from raw operator input, normalizing per
    /// [`normalize_window_length`].
    pub fn set_window_length(&mut self, raw: &str) {
        self.window_length = normalize_window_length(raw);
    }
}

/// Normalize raw operator input to a strictly positive window length.
/// Anything that does not parse to a positive integer becomes unset rather
/// than an error.
pub fn normalize_window_length(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok().filter(|n| *n > 0)
}
