//! Surface geometry: points, sizes, and axis-aligned rectangles.
//!
//! All coordinates are surface units with the origin at the top-left and
//! `y` growing downward.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// A 2D point (or displacement) in surface coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Point) -> f32 {
        (self - other).length()
    }

    /// Magnitude when the point is read as a displacement vector.
    pub fn length(self) -> f32 {
        self.x.hypot(self.y)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Point::new(x, y)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle anchored at its top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Inclusive on every edge: a point on the border is inside.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Where the ray from the center toward `toward` crosses the border.
    ///
    /// Connectors are drawn between the anchors of their two endpoints so
    /// arrow heads land on the target's edge instead of its center.
    pub fn anchor_toward(&self, toward: Point) -> Point {
        let c = self.center();
        let d = toward - c;
        if d.x == 0.0 && d.y == 0.0 {
            return c;
        }
        let half_w = self.width / 2.0;
        let half_h = self.height / 2.0;
        let tx = if d.x != 0.0 {
            half_w / d.x.abs()
        } else {
            f32::INFINITY
        };
        let ty = if d.y != 0.0 {
            half_h / d.y.abs()
        } else {
            f32::INFINITY
        };
        let t = tx.min(ty);
        Point::new(c.x + d.x * t, c.y + d.y * t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_inclusive() {
        let r = Rect::new(10.0, 10.0, 100.0, 50.0);
        assert!(r.contains(Point::new(10.0, 10.0)));
        assert!(r.contains(Point::new(110.0, 60.0)));
        assert!(!r.contains(Point::new(110.1, 60.0)));
        assert!(!r.contains(Point::new(9.9, 30.0)));
    }

    #[test]
    fn distance_and_length() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!((a.distance(b) - 5.0).abs() < 1e-6);
        assert!(((b - a).length() - 5.0).abs() < 1e-6);
    }

    #[test]
    fn anchor_lands_on_border() {
        let r = Rect::new(0.0, 0.0, 180.0, 120.0);
        // Straight right: exits through the right edge at mid-height.
        let a = r.anchor_toward(Point::new(500.0, 60.0));
        assert!((a.x - 180.0).abs() < 1e-4);
        assert!((a.y - 60.0).abs() < 1e-4);

        // Straight up: exits through the top edge.
        let a = r.anchor_toward(Point::new(90.0, -400.0));
        assert!((a.x - 90.0).abs() < 1e-4);
        assert!(a.y.abs() < 1e-4);
    }

    #[test]
    fn anchor_toward_center_is_center() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(r.anchor_toward(Point::new(5.0, 5.0)), Point::new(5.0, 5.0));
    }
}
