//! Detection boundary for the occupancy pipeline
//!
//! The occupancy state machine only ever consumes detection boxes; this
//! crate supplies them:
//! - [`FaceDetector`] trait, the pluggable detection capability
//! - [`BlobDetector`], a dark-blob reference backend
//! - [`StaticDetector`], a fixed-box backend for tests and injection
//! - Frame loading from disk with decode-error mapping
//!
//! Detector failure is the caller's concern: [`detect_or_empty`] maps it
//! to "no detections" so an outage never crashes occupancy tracking.

pub mod blob;

pub use blob::BlobDetector;

use image::GrayImage;
use std::path::Path;
use table_regions::Rect;
use thiserror::Error;
use tracing::warn;

/// Detection error types
#[derive(Error, Debug)]
pub enum DetectError {
    #[error("Frame decode failed: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Detection failed: {0}")]
    Detection(String),
}

/// Pluggable detection backend.
///
/// Given one decoded grayscale frame, returns zero or more boxes in image
/// pixel coordinates. Implementations must be pure per frame (no state
/// carried between calls that affects output ordering guarantees
/// downstream).
pub trait FaceDetector {
    fn detect(&self, frame: &GrayImage) -> Result<Vec<Rect>, DetectError>;
}

/// Backend returning a fixed box list (tests, replay, hand injection)
#[derive(Debug, Clone, Default)]
pub struct StaticDetector {
    boxes: Vec<Rect>,
}

impl StaticDetector {
    pub fn new(boxes: Vec<Rect>) -> Self {
        Self { boxes }
    }
}

impl FaceDetector for StaticDetector {
    fn detect(&self, _frame: &GrayImage) -> Result<Vec<Rect>, DetectError> {
        Ok(self.boxes.clone())
    }
}

/// Load a frame from disk as grayscale.
///
/// Decode failure surfaces as [`DetectError::Decode`]; retrying is the
/// caller's responsibility.
pub fn load_gray_frame(path: impl AsRef<Path>) -> Result<GrayImage, DetectError> {
    let img = image::open(path)?;
    Ok(img.to_luma8())
}

/// Run a detector, mapping failure to an empty detection list.
///
/// A detector outage reads as "nothing detected" to the occupancy
/// monitor, never as an error.
pub fn detect_or_empty(detector: &dyn FaceDetector, frame: &GrayImage) -> Vec<Rect> {
    match detector.detect(frame) {
        Ok(boxes) => boxes,
        Err(e) => {
            warn!(error = %e, "Detector failed, treating frame as empty");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingDetector;

    impl FaceDetector for FailingDetector {
        fn detect(&self, _frame: &GrayImage) -> Result<Vec<Rect>, DetectError> {
            Err(DetectError::Detection("model offline".into()))
        }
    }

    #[test]
    fn test_static_detector_returns_injected_boxes() {
        let boxes = vec![Rect::new(22.0, 22.0, 38.0, 38.0)];
        let detector = StaticDetector::new(boxes.clone());
        let frame = GrayImage::new(150, 100);
        assert_eq!(detector.detect(&frame).unwrap(), boxes);
    }

    #[test]
    fn test_detect_or_empty_swallows_failure() {
        let frame = GrayImage::new(150, 100);
        assert!(detect_or_empty(&FailingDetector, &frame).is_empty());
    }

    #[test]
    fn test_load_missing_frame_fails_with_decode_error() {
        let result = load_gray_frame("/nonexistent/frame1.jpg");
        assert!(matches!(result.unwrap_err(), DetectError::Decode(_)));
    }
}
