//! Dark-blob reference detector
//!
//! Thresholds a grayscale frame and returns the bounding box of every
//! dark connected component above a minimum pixel count. Not a face
//! detector in any ML sense; it is the deterministic backend used for
//! synthetic frames and smoke deployments where heads read as dark blobs
//! against a bright floor.

use crate::{DetectError, FaceDetector};
use image::{GrayImage, Luma};
use imageproc::region_labelling::{connected_components, Connectivity};
use std::collections::HashMap;
use table_regions::Rect;

/// Threshold-and-label blob detector
#[derive(Debug, Clone)]
pub struct BlobDetector {
    /// Pixels strictly darker than this are foreground
    pub threshold: u8,
    /// Components with fewer pixels are discarded as noise
    pub min_pixels: u32,
}

impl Default for BlobDetector {
    fn default() -> Self {
        Self {
            threshold: 96,
            min_pixels: 25,
        }
    }
}

impl BlobDetector {
    pub fn new(threshold: u8, min_pixels: u32) -> Self {
        Self {
            threshold,
            min_pixels,
        }
    }
}

struct BlobAccumulator {
    x_min: u32,
    y_min: u32,
    x_max: u32,
    y_max: u32,
    pixels: u32,
}

impl FaceDetector for BlobDetector {
    fn detect(&self, frame: &GrayImage) -> Result<Vec<Rect>, DetectError> {
        if frame.width() == 0 || frame.height() == 0 {
            return Err(DetectError::Detection("empty frame".into()));
        }

        let mut binary = GrayImage::new(frame.width(), frame.height());
        for (x, y, pixel) in frame.enumerate_pixels() {
            if pixel[0] < self.threshold {
                binary.put_pixel(x, y, Luma([255u8]));
            }
        }

        let labels = connected_components(&binary, Connectivity::Eight, Luma([0u8]));

        let mut blobs: HashMap<u32, BlobAccumulator> = HashMap::new();
        for (x, y, label) in labels.enumerate_pixels() {
            if label[0] == 0 {
                continue;
            }
            blobs
                .entry(label[0])
                .and_modify(|b| {
                    b.x_min = b.x_min.min(x);
                    b.y_min = b.y_min.min(y);
                    b.x_max = b.x_max.max(x);
                    b.y_max = b.y_max.max(y);
                    b.pixels += 1;
                })
                .or_insert(BlobAccumulator {
                    x_min: x,
                    y_min: y,
                    x_max: x,
                    y_max: y,
                    pixels: 1,
                });
        }

        let mut boxes: Vec<Rect> = blobs
            .into_values()
            .filter(|b| b.pixels >= self.min_pixels)
            .map(|b| {
                // Exclusive max edge so a single-pixel-wide blob still has area
                Rect::new(
                    b.x_min as f64,
                    b.y_min as f64,
                    (b.x_max + 1) as f64,
                    (b.y_max + 1) as f64,
                )
            })
            .collect();
        boxes.sort_by(|a, b| {
            (a.x_min, a.y_min)
                .partial_cmp(&(b.x_min, b.y_min))
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Ok(boxes)
    }
}
