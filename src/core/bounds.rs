use crate::core::geo::Point;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in screen or world-pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    /// Creates new bounds from two points
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// Creates bounds from individual coordinates
    pub fn from_coords(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self::new(Point::new(min_x, min_y), Point::new(max_x, max_y))
    }

    /// Creates bounds anchored at the origin with the given size
    pub fn from_size(width: f64, height: f64) -> Self {
        Self::from_coords(0.0, 0.0, width, height)
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }

    /// Checks if the bounds contain a point (edges inclusive)
    pub fn contains(&self, point: &Point) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Extends the bounds to include a point
    pub fn extend(&mut self, point: &Point) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
    }

    /// Divides every coordinate by `factor`
    pub fn scaled_down(&self, factor: f64) -> Bounds {
        Bounds::new(self.min.multiply(1.0 / factor), self.max.multiply(1.0 / factor))
    }

    /// Gets the four corner points, clockwise from the top-left
    pub fn corners(&self) -> [Point; 4] {
        [
            self.min,
            Point::new(self.max.x, self.min.y),
            self.max,
            Point::new(self.min.x, self.max.y),
        ]
    }

    /// Creates empty bounds (invalid bounds that can be extended)
    pub fn empty() -> Self {
        Self::new(
            Point::new(f64::INFINITY, f64::INFINITY),
            Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
        )
    }

    /// Axis-aligned box enclosing this rectangle after rotating it by
    /// `degrees` around `origin`
    pub fn rotated_bounding_box(&self, origin: &Point, degrees: f64) -> Bounds {
        let mut out = Bounds::empty();
        for corner in self.corners() {
            out.extend(&corner.rotate_around(origin, degrees));
        }
        out
    }

    /// Rounds outward to whole pixels
    pub fn round_out(&self) -> Bounds {
        Bounds::from_coords(
            self.min.x.floor(),
            self.min.y.floor(),
            self.max.x.ceil(),
            self.max.y.ceil(),
        )
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(Point::new(0.0, 0.0), Point::new(0.0, 0.0))
    }
}
