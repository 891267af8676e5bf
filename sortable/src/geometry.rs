//! Points and rectangles in client (viewport) coordinates.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use serde::{Deserialize, Serialize};

/// A point in client (viewport) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to `other`.
    #[must_use]
    pub fn distance_sq(&self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(&self, other: Point) -> f64 {
        self.distance_sq(other).sqrt()
    }

    /// Truncate both coordinates toward zero, the way layout engines report
    /// integral centers.
    #[must_use]
    pub fn truncated(&self) -> Point {
        Point { x: self.x.trunc(), y: self.y.trunc() }
    }
}

/// An axis-aligned bounding box as reported by the layout engine.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Integral center point used for candidate distances.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0).truncated()
    }

    /// Whether the box has no area.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Same size, moved so its top-left corner sits at `origin`.
    #[must_use]
    pub fn at(&self, origin: Point) -> Rect {
        Rect { left: origin.x, top: origin.y, ..*self }
    }

    #[must_use]
    pub fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    /// Clamp a top-left corner so a box of this size stays inside `bounds`.
    ///
    /// When the box is larger than `bounds` the top/left edges win.
    #[must_use]
    pub fn clamp_origin_within(&self, origin: Point, bounds: &Rect) -> Point {
        let mut x = origin.x;
        let mut y = origin.y;
        if x + self.width > bounds.right() {
            x = bounds.right() - self.width;
        }
        if x < bounds.left {
            x = bounds.left;
        }
        if y + self.height > bounds.bottom() {
            y = bounds.bottom() - self.height;
        }
        if y < bounds.top {
            y = bounds.top;
        }
        Point::new(x, y)
    }
}
