//! 2D path geometry for the animated icon.
//!
//! Provides the pieces the icon is built from:
//! - CubicBezier: a single authored cubic segment
//! - PathMeasure: arc-length lookup along one contour
//! - JoinedPath: two contours walked as one over the parameter range
//! - BridgingLine: a segment spanning two joined paths at a shared parameter

mod bridge;
mod cubic;
mod joined;
mod measure;

pub use bridge::{inset_segment, BridgingLine};
pub use cubic::CubicBezier;
pub use joined::JoinedPath;
pub use measure::PathMeasure;

use std::ops::{Add, Mul, Sub};

/// A point (or offset) in pixel space. Y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Linear interpolation between `self` and `other`.
    #[inline]
    pub fn lerp(self, other: Point, t: f32) -> Point {
        Point::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    #[inline]
    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    #[inline]
    pub fn distance(self, other: Point) -> f32 {
        (other - self).length()
    }

    #[inline]
    pub fn dot(self, other: Point) -> f32 {
        self.x * other.x + self.y * other.y
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

impl Mul<f32> for Point {
    type Output = Point;

    fn mul(self, rhs: f32) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl From<[f32; 2]> for Point {
    fn from([x, y]: [f32; 2]) -> Self {
        Point::new(x, y)
    }
}

impl From<Point> for [f32; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

/// A straight line between two points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LineSegment {
    pub start: Point,
    pub end: Point,
}

impl LineSegment {
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }

    /// Direction vector from start to end (not normalized).
    pub fn vector(&self) -> Point {
        self.end - self.start
    }

    /// Mirror both endpoints across the horizontal line `y = pivot_y`.
    pub fn mirrored_y(&self, pivot_y: f32) -> LineSegment {
        let mirror = |p: Point| Point::new(p.x, 2.0 * pivot_y - p.y);
        LineSegment::new(mirror(self.start), mirror(self.end))
    }

    /// Shortest distance from `p` to any point on the segment.
    pub fn distance_to(&self, p: Point) -> f32 {
        let v = self.vector();
        let len_sq = v.dot(v);
        if len_sq <= f32::EPSILON {
            return self.start.distance(p);
        }
        let t = ((p - self.start).dot(v) / len_sq).clamp(0.0, 1.0);
        (self.start + v * t).distance(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_lerp_endpoints() {
        let a = Point::new(1.0, 2.0);
        let b = Point::new(5.0, -2.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Point::new(3.0, 0.0));
    }

    #[test]
    fn test_segment_mirror_about_pivot() {
        let seg = LineSegment::new(Point::new(0.0, 10.0), Point::new(4.0, 30.0));
        let m = seg.mirrored_y(35.0);
        assert_eq!(m.start, Point::new(0.0, 60.0));
        assert_eq!(m.end, Point::new(4.0, 40.0));
        // Mirroring twice is the identity
        assert_eq!(m.mirrored_y(35.0), seg);
    }

    #[test]
    fn test_distance_to_segment() {
        let seg = LineSegment::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        assert!((seg.distance_to(Point::new(5.0, 3.0)) - 3.0).abs() < 1e-6);
        // Beyond the end clamps to the endpoint
        assert!((seg.distance_to(Point::new(13.0, 4.0)) - 5.0).abs() < 1e-6);

        let degenerate = LineSegment::new(Point::new(1.0, 1.0), Point::new(1.0, 1.0));
        assert!((degenerate.distance_to(Point::new(4.0, 5.0)) - 5.0).abs() < 1e-6);
    }
}
