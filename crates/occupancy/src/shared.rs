//! Shared monitor handle for multi-camera callers

use crate::{OccupancyError, OccupancyEvent, OccupancyMonitor, TableState};
use std::sync::{Arc, Mutex, MutexGuard};
use table_regions::Rect;

/// Cloneable handle serializing access to one [`OccupancyMonitor`].
///
/// Multiple camera feed threads can call [`process_frame`] concurrently;
/// record mutation and queue drain happen under a single lock. Critical
/// sections are O(tables) and never block on I/O, so one mutex is enough.
/// Single-threaded callers should use [`OccupancyMonitor`] directly.
///
/// [`process_frame`]: SharedOccupancyMonitor::process_frame
#[derive(Debug, Clone)]
pub struct SharedOccupancyMonitor {
    inner: Arc<Mutex<OccupancyMonitor>>,
}

impl SharedOccupancyMonitor {
    pub fn new(monitor: OccupancyMonitor) -> Self {
        Self {
            inner: Arc::new(Mutex::new(monitor)),
        }
    }

    // A panicked holder must not wedge the other camera threads; the
    // monitor's all-or-nothing frame contract keeps the state consistent.
    fn lock(&self) -> MutexGuard<'_, OccupancyMonitor> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// See [`OccupancyMonitor::process_frame`]
    pub fn process_frame(
        &self,
        ts: f64,
        camera_id: &str,
        detected_boxes: &[Rect],
    ) -> Result<(), OccupancyError> {
        self.lock().process_frame(ts, camera_id, detected_boxes)
    }

    /// See [`OccupancyMonitor::get_and_clear_events`]
    pub fn get_and_clear_events(&self) -> Vec<OccupancyEvent> {
        self.lock().get_and_clear_events()
    }

    /// See [`OccupancyMonitor::table_state`]
    pub fn table_state(&self, table_id: &str) -> Option<TableState> {
        self.lock().table_state(table_id)
    }

    /// See [`OccupancyMonitor::pending_events`]
    pub fn pending_events(&self) -> usize {
        self.lock().pending_events()
    }
}

impl From<OccupancyMonitor> for SharedOccupancyMonitor {
    fn from(monitor: OccupancyMonitor) -> Self {
        Self::new(monitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EventKind, OccupancyConfig};
    use std::thread;

    fn shared() -> SharedOccupancyMonitor {
        OccupancyMonitor::with_tables(
            [
                ("T1", Rect::new(10.0, 10.0, 60.0, 60.0)),
                ("T2", Rect::new(80.0, 10.0, 130.0, 60.0)),
            ],
            OccupancyConfig::new(1.0, 2.0),
        )
        .unwrap()
        .into()
    }

    #[test]
    fn test_two_camera_threads() {
        let monitor = shared();

        let t1_cam = monitor.clone();
        let t2_cam = monitor.clone();
        let a = thread::spawn(move || {
            t1_cam
                .process_frame(10.0, "CAM_A", &[Rect::new(22.0, 22.0, 38.0, 38.0)])
                .unwrap();
        });
        let b = thread::spawn(move || {
            t2_cam
                .process_frame(10.0, "CAM_B", &[Rect::new(90.0, 22.0, 110.0, 38.0)])
                .unwrap();
        });
        a.join().unwrap();
        b.join().unwrap();

        assert_eq!(monitor.table_state("T1"), Some(TableState::Occupied));
        assert_eq!(monitor.table_state("T2"), Some(TableState::Occupied));
        let events = monitor.get_and_clear_events();
        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|e| e.kind == EventKind::Occupied));
    }

    #[test]
    fn test_drain_from_another_handle() {
        let monitor = shared();
        monitor
            .process_frame(1.0, "CAM_A", &[Rect::new(22.0, 22.0, 38.0, 38.0)])
            .unwrap();

        let consumer = monitor.clone();
        assert_eq!(consumer.get_and_clear_events().len(), 1);
        assert_eq!(monitor.pending_events(), 0);
    }
}
