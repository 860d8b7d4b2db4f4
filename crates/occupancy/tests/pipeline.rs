//! End-to-end pipeline: synthetic frames -> blob detector -> monitor
//!
//! Exercises the full caller-side composition: decode-free synthetic
//! grayscale frames, detection boxes extracted by the reference blob
//! detector, and the occupancy monitor consuming only boxes.

use face_detect::{detect_or_empty, BlobDetector, DetectError, FaceDetector};
use image::{GrayImage, Luma};
use occupancy::{EventKind, OccupancyConfig, OccupancyMonitor, Rect, TableState};

const CAM: &str = "CAM_TEST";

fn white_frame() -> GrayImage {
    GrayImage::from_pixel(150, 100, Luma([255u8]))
}

fn frame_with_guest(x0: u32, y0: u32, x1: u32, y1: u32) -> GrayImage {
    let mut frame = white_frame();
    for y in y0..y1 {
        for x in x0..x1 {
            frame.put_pixel(x, y, Luma([0u8]));
        }
    }
    frame
}

fn two_table_monitor() -> OccupancyMonitor {
    OccupancyMonitor::with_tables(
        [
            ("T1", Rect::new(10.0, 10.0, 60.0, 60.0)),
            ("T2", Rect::new(80.0, 10.0, 130.0, 60.0)),
        ],
        OccupancyConfig::new(1.0, 2.0),
    )
    .unwrap()
}

#[test]
fn full_occupancy_cycle_from_frames() {
    let detector = BlobDetector::default();
    let mut monitor = two_table_monitor();

    // Guest seated inside T1
    let boxes = detector.detect(&frame_with_guest(22, 22, 38, 38)).unwrap();
    monitor.process_frame(1000.0, CAM, &boxes).unwrap();
    let events = monitor.get_and_clear_events();
    assert!(events
        .iter()
        .any(|e| e.kind == EventKind::Occupied && e.table_id == "T1"));
    assert_eq!(monitor.table_state("T2"), Some(TableState::Vacant));

    // Empty room past the vacancy hold
    let boxes = detector.detect(&white_frame()).unwrap();
    monitor.process_frame(1002.0, CAM, &boxes).unwrap();
    let events = monitor.get_and_clear_events();
    assert!(events
        .iter()
        .any(|e| e.kind == EventKind::Vacated && e.table_id == "T1"));

    // Still empty past the cleaning hold
    let boxes = detector.detect(&white_frame()).unwrap();
    monitor.process_frame(1005.0, CAM, &boxes).unwrap();
    let events = monitor.get_and_clear_events();
    assert!(events
        .iter()
        .any(|e| e.kind == EventKind::NeedsCleaning && e.table_id == "T1"));

    // T2 never produced a single event
    assert_eq!(monitor.table_state("T2"), Some(TableState::Vacant));
}

#[test]
fn guest_between_tables_occupies_both() {
    let detector = BlobDetector::default();
    let mut monitor = two_table_monitor();

    let boxes = detector.detect(&frame_with_guest(55, 20, 85, 40)).unwrap();
    monitor.process_frame(10.0, CAM, &boxes).unwrap();

    assert_eq!(monitor.table_state("T1"), Some(TableState::Occupied));
    assert_eq!(monitor.table_state("T2"), Some(TableState::Occupied));
}

#[test]
fn detector_outage_reads_as_no_detections() {
    struct OfflineDetector;
    impl FaceDetector for OfflineDetector {
        fn detect(&self, _frame: &GrayImage) -> Result<Vec<Rect>, DetectError> {
            Err(DetectError::Detection("inference backend unreachable".into()))
        }
    }

    let mut monitor = two_table_monitor();
    monitor
        .process_frame(0.0, CAM, &[Rect::new(22.0, 22.0, 38.0, 38.0)])
        .unwrap();
    monitor.get_and_clear_events();

    // Outage frames count as "nothing detected": the vacancy hold still runs
    let boxes = detect_or_empty(&OfflineDetector, &white_frame());
    monitor.process_frame(5.0, CAM, &boxes).unwrap();
    assert_eq!(monitor.table_state("T1"), Some(TableState::Vacant));
    let events = monitor.get_and_clear_events();
    assert!(events
        .iter()
        .any(|e| e.kind == EventKind::Vacated && e.table_id == "T1"));
}
