//! Cubic Bezier segments.

use super::Point;

/// Recursion cap for adaptive flattening; 2^16 segments is far beyond what
/// any icon-sized curve needs.
const MAX_FLATTEN_DEPTH: u32 = 16;

/// A cubic Bezier segment defined by four control points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    pub p0: Point,
    pub p1: Point,
    pub p2: Point,
    pub p3: Point,
}

impl CubicBezier {
    /// Create a curve from absolute control points.
    pub const fn new(p0: Point, p1: Point, p2: Point, p3: Point) -> Self {
        Self { p0, p1, p2, p3 }
    }

    /// Create a curve whose control points are offsets from `start`.
    pub fn relative(start: Point, d1: Point, d2: Point, d3: Point) -> Self {
        Self::new(start, start + d1, start + d2, start + d3)
    }

    /// Uniformly scale all control points about the origin.
    #[must_use]
    pub fn scaled(&self, factor: f32) -> Self {
        Self::new(
            self.p0 * factor,
            self.p1 * factor,
            self.p2 * factor,
            self.p3 * factor,
        )
    }

    /// Evaluate the curve at `t` (clamped to [0, 1]).
    pub fn point_at(&self, t: f32) -> Point {
        let t = t.clamp(0.0, 1.0);
        let s = 1.0 - t;
        let s2 = s * s;
        let t2 = t * t;

        self.p0 * (s2 * s) + self.p1 * (3.0 * s2 * t) + self.p2 * (3.0 * s * t2) + self.p3 * (t2 * t)
    }

    /// Split at `t` using de Casteljau's algorithm.
    pub fn split(&self, t: f32) -> (Self, Self) {
        let p01 = self.p0.lerp(self.p1, t);
        let p12 = self.p1.lerp(self.p2, t);
        let p23 = self.p2.lerp(self.p3, t);
        let p012 = p01.lerp(p12, t);
        let p123 = p12.lerp(p23, t);
        let mid = p012.lerp(p123, t);

        (
            Self::new(self.p0, p01, p012, mid),
            Self::new(mid, p123, p23, self.p3),
        )
    }

    /// Sum of the control polygon edges; an upper bound on arc length.
    pub fn control_polygon_length(&self) -> f32 {
        self.p0.distance(self.p1) + self.p1.distance(self.p2) + self.p2.distance(self.p3)
    }

    /// Whether both inner control points lie within `tolerance` of the chord.
    pub fn is_flat(&self, tolerance: f32) -> bool {
        let chord = self.p3 - self.p0;
        let chord_len = chord.length();

        if chord_len < 1e-6 {
            return self.p0.distance(self.p1) < tolerance && self.p0.distance(self.p2) < tolerance;
        }

        let dir = chord * (1.0 / chord_len);
        let off = |p: Point| {
            let v = p - self.p0;
            (v - dir * v.dot(dir)).length()
        };

        off(self.p1) < tolerance && off(self.p2) < tolerance
    }

    /// Approximate the curve with a polyline using adaptive subdivision.
    ///
    /// The result starts at `p0` and ends exactly at `p3`.
    pub fn flatten(&self, tolerance: f32) -> Vec<Point> {
        let mut points = vec![self.p0];
        self.flatten_into(tolerance, MAX_FLATTEN_DEPTH, &mut points);
        points
    }

    fn flatten_into(&self, tolerance: f32, depth: u32, out: &mut Vec<Point>) {
        if depth == 0 || self.is_flat(tolerance) {
            out.push(self.p3);
        } else {
            let (left, right) = self.split(0.5);
            left.flatten_into(tolerance, depth - 1, out);
            right.flatten_into(tolerance, depth - 1, out);
        }
    }
}
