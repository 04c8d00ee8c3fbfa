//! Axis-aligned bounding boxes in CSS pixels.

use serde::{Deserialize, Serialize};

/// A rectangle in page coordinates (origin at the top-left of the document).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BBox {
    /// Left edge
    #[serde(alias = "left")]
    pub x: f64,

    /// Top edge
    #[serde(alias = "top")]
    pub y: f64,

    /// Width
    #[serde(alias = "w")]
    pub width: f64,

    /// Height
    #[serde(alias = "h")]
    pub height: f64,
}

impl BBox {
    /// Create a new box.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge.
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Horizontal center.
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    /// Vertical center.
    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    /// Area, zero for degenerate boxes.
    pub fn area(&self) -> f64 {
        if self.is_degenerate() {
            0.0
        } else {
            self.width * self.height
        }
    }

    /// True when the box has no positive extent.
    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Area shared with another box.
    pub fn intersection_area(&self, other: &BBox) -> f64 {
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = self.right().min(other.right());
        let y2 = self.bottom().min(other.bottom());

        if x2 <= x1 || y2 <= y1 {
            return 0.0;
        }
        (x2 - x1) * (y2 - y1)
    }

    /// Intersection over Union with another box, in `[0, 1]`.
    pub fn iou(&self, other: &BBox) -> f64 {
        let intersection = self.intersection_area(other);
        if intersection <= 0.0 {
            return 0.0;
        }
        let union = self.area() + other.area() - intersection;
        if union <= 0.0 {
            0.0
        } else {
            intersection / union
        }
    }

    /// Check whether a point lies inside the box (edges included).
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }
}
