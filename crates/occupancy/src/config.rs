//! Occupancy monitor configuration

use serde::{Deserialize, Serialize};

/// Hold-period configuration for debounced transitions
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OccupancyConfig {
    /// Minimum time with no detection before an occupied table is
    /// considered vacated (seconds)
    pub vacancy_hold_seconds: f64,

    /// Minimum time after a vacate before the table is flagged for
    /// cleaning (seconds)
    pub cleaning_hold_seconds: f64,
}

impl Default for OccupancyConfig {
    fn default() -> Self {
        Self {
            vacancy_hold_seconds: 60.0,
            cleaning_hold_seconds: 300.0,
        }
    }
}

impl OccupancyConfig {
    pub fn new(vacancy_hold_seconds: f64, cleaning_hold_seconds: f64) -> Self {
        Self {
            vacancy_hold_seconds,
            cleaning_hold_seconds,
        }
    }

    /// Fast turnover config (short holds, e.g. a food court)
    pub fn fast_turnover() -> Self {
        Self {
            vacancy_hold_seconds: 20.0,
            cleaning_hold_seconds: 60.0,
        }
    }
}
