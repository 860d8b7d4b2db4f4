//! Axis-aligned rectangles in image pixel coordinates

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle (corner form)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl Rect {
    /// Create a rectangle from corner coordinates
    pub fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Self {
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    /// Rectangle area (zero for degenerate or inverted rectangles)
    pub fn area(&self) -> f64 {
        let w = (self.x_max - self.x_min).max(0.0);
        let h = (self.y_max - self.y_min).max(0.0);
        w * h
    }

    /// All coordinates finite
    pub fn is_finite(&self) -> bool {
        self.x_min.is_finite()
            && self.y_min.is_finite()
            && self.x_max.is_finite()
            && self.y_max.is_finite()
    }

    /// Finite with strictly positive area
    pub fn is_valid(&self) -> bool {
        self.is_finite() && self.x_max > self.x_min && self.y_max > self.y_min
    }

    /// Non-empty overlap on both axes.
    ///
    /// Strict inequality: rectangles that merely share an edge do not
    /// intersect, and degenerate (zero-area) rectangles intersect nothing.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x_min < other.x_max
            && other.x_min < self.x_max
            && self.y_min < other.y_max
            && other.y_min < self.y_max
    }

    /// Area of the overlapping region (zero if disjoint)
    pub fn intersection_area(&self, other: &Rect) -> f64 {
        if !self.intersects(other) {
            return 0.0;
        }
        let w = self.x_max.min(other.x_max) - self.x_min.max(other.x_min);
        let h = self.y_max.min(other.y_max) - self.y_min.max(other.y_min);
        w * h
    }
}

impl From<(f64, f64, f64, f64)> for Rect {
    fn from((x_min, y_min, x_max, y_max): (f64, f64, f64, f64)) -> Self {
        Rect::new(x_min, y_min, x_max, y_max)
    }
}
