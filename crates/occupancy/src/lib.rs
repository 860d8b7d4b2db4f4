//! Table occupancy state machine
//!
//! Converts a stream of per-frame detection boxes into durable per-table
//! state and a queue of discrete transition events:
//! - Occupied / vacated / needs-cleaning tracking per table
//! - Hold-period debouncing of noisy, intermittent detection
//! - Exactly one event per transition, drained by the consumer
//!
//! The monitor never touches cameras, images, or detectors. It consumes
//! already-extracted boxes with a caller-supplied timestamp, so every
//! timer is a lazy elapsed-time check and the whole machine is
//! deterministic under synthetic clocks.

pub mod config;
pub mod event;
pub mod shared;
pub mod state;

pub use config::OccupancyConfig;
pub use event::{EventKind, OccupancyEvent};
pub use shared::SharedOccupancyMonitor;
pub use state::{TableRecord, TableState};

pub use table_regions::{Rect, RegionConfigError, RegionIndex, TableRegion};

use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};
use thiserror::Error;
use tracing::{debug, info};

/// Occupancy error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OccupancyError {
    #[error("Region configuration error: {0}")]
    Config(#[from] RegionConfigError),

    #[error("Invalid {which} hold: {value}")]
    InvalidHold { which: &'static str, value: f64 },

    #[error("Invalid frame timestamp: {0}")]
    InvalidTimestamp(f64),

    #[error("Invalid detection box at index {index}: {reason}")]
    InvalidBox { index: usize, reason: &'static str },

    #[error("Frame timestamp {ts} is earlier than last processed frame {last_ts}")]
    TimestampRegression { ts: f64, last_ts: f64 },
}

/// Per-table occupancy state machine.
///
/// One record per configured table, created at construction and never
/// destroyed. All mutation goes through [`process_frame`]; transition
/// events accumulate in an internal FIFO until drained with
/// [`get_and_clear_events`]. Instantiable multiple times (one per
/// location) with no shared state.
///
/// [`process_frame`]: OccupancyMonitor::process_frame
/// [`get_and_clear_events`]: OccupancyMonitor::get_and_clear_events
#[derive(Debug)]
pub struct OccupancyMonitor {
    index: RegionIndex,
    config: OccupancyConfig,
    records: HashMap<String, TableRecord>,
    events: VecDeque<OccupancyEvent>,
    last_frame_ts: Option<f64>,
}

impl OccupancyMonitor {
    /// Create a monitor over a configured region index.
    ///
    /// Fails if a hold period is negative or non-finite.
    pub fn new(index: RegionIndex, config: OccupancyConfig) -> Result<Self, OccupancyError> {
        for (which, value) in [
            ("vacancy", config.vacancy_hold_seconds),
            ("cleaning", config.cleaning_hold_seconds),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(OccupancyError::InvalidHold { which, value });
            }
        }

        let records = index
            .tables()
            .map(|r| (r.table_id.clone(), TableRecord::default()))
            .collect();

        info!(tables = index.len(), "Occupancy monitor created");
        Ok(Self {
            index,
            config,
            records,
            events: VecDeque::new(),
            last_frame_ts: None,
        })
    }

    /// Create a monitor straight from `(table_id, rect)` pairs
    pub fn with_tables<I, S>(pairs: I, config: OccupancyConfig) -> Result<Self, OccupancyError>
    where
        I: IntoIterator<Item = (S, Rect)>,
        S: Into<String>,
    {
        Self::new(RegionIndex::from_pairs(pairs)?, config)
    }

    /// Process one frame's worth of detections.
    ///
    /// `ts` is seconds on a caller-supplied non-decreasing clock;
    /// `camera_id` is opaque; `detected_boxes` is the external detector's
    /// output for this frame (empty means nothing detected). Tables whose
    /// ROI overlaps any box become occupied; unseen tables are checked
    /// against the hold timers. At most one event per table is queued per
    /// call.
    ///
    /// All-or-nothing: a rejected frame (bad timestamp, malformed box)
    /// mutates no record and queues no event, and later frames process
    /// normally.
    pub fn process_frame(
        &mut self,
        ts: f64,
        camera_id: &str,
        detected_boxes: &[Rect],
    ) -> Result<(), OccupancyError> {
        if !ts.is_finite() {
            return Err(OccupancyError::InvalidTimestamp(ts));
        }
        if let Some(last_ts) = self.last_frame_ts {
            if ts < last_ts {
                return Err(OccupancyError::TimestampRegression { ts, last_ts });
            }
        }
        for (index, rect) in detected_boxes.iter().enumerate() {
            if !rect.is_finite() {
                return Err(OccupancyError::InvalidBox {
                    index,
                    reason: "non-finite coordinate",
                });
            }
        }
        self.last_frame_ts = Some(ts);

        // Union of overlap sets across all boxes. Degenerate boxes and
        // boxes outside every ROI contribute nothing.
        let mut seen: HashSet<&str> = HashSet::new();
        for rect in detected_boxes {
            seen.extend(self.index.overlapping_tables(rect));
        }
        debug!(
            ts,
            camera_id,
            boxes = detected_boxes.len(),
            tables_seen = seen.len(),
            "Processing frame"
        );

        for region in self.index.tables() {
            // One record per configured table, created at construction
            let Some(record) = self.records.get_mut(&region.table_id) else {
                continue;
            };

            let emitted = if seen.contains(region.table_id.as_str()) {
                record.last_seen_occupied_ts = Some(ts);
                record.last_camera_id = Some(camera_id.to_string());
                if record.state != TableState::Occupied {
                    record.state = TableState::Occupied;
                    record.last_transition_ts = Some(ts);
                    Some(EventKind::Occupied)
                } else {
                    // Re-seen while occupied: clock refreshed, no event
                    None
                }
            } else {
                match record.state {
                    TableState::Occupied => match record.last_seen_occupied_ts {
                        Some(last_seen) if ts - last_seen >= self.config.vacancy_hold_seconds => {
                            record.state = TableState::Vacant;
                            record.last_transition_ts = Some(ts);
                            record.last_camera_id = Some(camera_id.to_string());
                            Some(EventKind::Vacated)
                        }
                        _ => None,
                    },
                    TableState::Vacant => {
                        // The cleaning timer runs from the vacated
                        // transition; a never-occupied table has no
                        // transition timestamp and stays vacant.
                        match record.last_transition_ts {
                            Some(vacated_ts)
                                if ts - vacated_ts >= self.config.cleaning_hold_seconds =>
                            {
                                record.state = TableState::NeedsCleaning;
                                record.last_transition_ts = Some(ts);
                                record.last_camera_id = Some(camera_id.to_string());
                                Some(EventKind::NeedsCleaning)
                            }
                            _ => None,
                        }
                    }
                    TableState::NeedsCleaning => None,
                }
            };

            if let Some(kind) = emitted {
                info!(table_id = %region.table_id, %kind, ts, camera_id, "Table transition");
                self.events.push_back(OccupancyEvent {
                    kind,
                    table_id: region.table_id.clone(),
                    timestamp: ts,
                    camera_id: camera_id.to_string(),
                });
            }
        }

        Ok(())
    }

    /// Drain all queued events in emission order.
    ///
    /// An empty queue yields an empty vec; consecutive calls never return
    /// the same event twice.
    pub fn get_and_clear_events(&mut self) -> Vec<OccupancyEvent> {
        self.events.drain(..).collect()
    }

    /// Current state of one table (None if unknown id)
    pub fn table_state(&self, table_id: &str) -> Option<TableState> {
        self.records.get(table_id).map(|r| r.state)
    }

    /// Full record for one table (None if unknown id)
    pub fn record(&self, table_id: &str) -> Option<&TableRecord> {
        self.records.get(table_id)
    }

    /// Number of events waiting to be drained
    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    /// State of every table, keyed by id
    pub fn snapshot(&self) -> BTreeMap<String, TableState> {
        self.records
            .iter()
            .map(|(id, r)| (id.clone(), r.state))
            .collect()
    }

    /// Configured region index
    pub fn region_index(&self) -> &RegionIndex {
        &self.index
    }

    /// Configured hold periods
    pub fn config(&self) -> &OccupancyConfig {
        &self.config
    }
}
