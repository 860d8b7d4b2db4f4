//! Occupancy transition events

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of occupancy transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A table went from vacant or needs-cleaning to occupied
    Occupied,
    /// An occupied table stayed undetected past the vacancy hold
    Vacated,
    /// A vacated table stayed undetected past the cleaning hold
    NeedsCleaning,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::Occupied => write!(f, "occupied"),
            EventKind::Vacated => write!(f, "vacated"),
            EventKind::NeedsCleaning => write!(f, "needs_cleaning"),
        }
    }
}

/// One state transition, queued for external consumption.
///
/// Immutable once emitted. Serializes with an `event` field so downstream
/// consumers see `{"event": "occupied", "table_id": ..., ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OccupancyEvent {
    /// Transition kind
    #[serde(rename = "event")]
    pub kind: EventKind,

    /// Table that transitioned
    pub table_id: String,

    /// Timestamp of the frame that triggered the transition (seconds,
    /// caller-supplied clock)
    pub timestamp: f64,

    /// Camera whose frame triggered the transition
    pub camera_id: String,
}
