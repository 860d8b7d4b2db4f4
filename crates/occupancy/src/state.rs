//! Per-table occupancy state tracking

use serde::{Deserialize, Serialize};

/// Occupancy state of one table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableState {
    /// Nobody at the table
    #[default]
    Vacant,
    /// A detection currently (or recently, within the vacancy hold) overlaps
    /// the table's ROI
    Occupied,
    /// Vacated long enough ago that staff should clear the table
    NeedsCleaning,
}

/// Tracked state for one table (mutated only by frame processing)
#[derive(Debug, Clone, Default)]
pub struct TableRecord {
    /// Current state
    pub state: TableState,

    /// Timestamp of the most recent frame in which a detection overlapped
    /// this table's ROI (absent if never seen occupied)
    pub last_seen_occupied_ts: Option<f64>,

    /// Timestamp of the last state change (absent until the first transition)
    pub last_transition_ts: Option<f64>,

    /// Camera that produced the most recent update (diagnostic only)
    pub last_camera_id: Option<String>,
}
