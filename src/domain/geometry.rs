//! Geometric types for selection rectangles and text layout boxes

use serde::{Deserialize, Serialize};

/// A position in viewport coordinates (CSS pixels)
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: Point) -> f32 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// Viewport-space rectangle, always normalized so `left <= right` and `top <= bottom`
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawRect")]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

/// Unvalidated edges as they appear in serialized layout data
#[derive(Deserialize)]
struct RawRect {
    left: f32,
    top: f32,
    right: f32,
    bottom: f32,
}

impl From<RawRect> for Rect {
    fn from(raw: RawRect) -> Self {
        Rect::from_corners(raw.left, raw.top, raw.right, raw.bottom)
    }
}

impl Rect {
    /// Build a rectangle from two arbitrary opposite corners
    pub fn from_corners(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        let (left, top, right, bottom) = normalize_rect(x1, y1, x2, y2);
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Build a rectangle spanning two points (gesture anchor and current point)
    pub fn from_points(a: Point, b: Point) -> Self {
        Self::from_corners(a.x, a.y, b.x, b.y)
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Open-interval overlap test: rectangles that only share an edge do not intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        other.right > self.left
            && other.left < self.right
            && other.bottom > self.top
            && other.top < self.bottom
    }

    /// Corners in top-left, top-right, bottom-left, bottom-right order
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.left, self.top),
            Point::new(self.right, self.top),
            Point::new(self.left, self.bottom),
            Point::new(self.right, self.bottom),
        ]
    }
}

/// Normalize min/max coordinates from arbitrary start/end points
#[inline]
pub fn normalize_rect(x1: f32, y1: f32, x2: f32, y2: f32) -> (f32, f32, f32, f32) {
    let (min_x, max_x) = if x1 < x2 { (x1, x2) } else { (x2, x1) };
    let (min_y, max_y) = if y1 < y2 { (y1, y2) } else { (y2, y1) };
    (min_x, min_y, max_x, max_y)
}
