//! Arc-length measurement along a flattened contour.

use super::{CubicBezier, Point};

/// Flatness tolerance in path units used when measuring curves.
pub const MEASURE_TOLERANCE: f32 = 0.05;

/// Arc-length lookup for a single contour.
///
/// The contour is flattened once on construction; positions are then found
/// by binary search over cumulative segment lengths and linear interpolation
/// within the hit segment.
#[derive(Debug, Clone)]
pub struct PathMeasure {
    points: Vec<Point>,
    /// `cumulative[i]` is the distance from the start to `points[i]`.
    cumulative: Vec<f32>,
}

impl PathMeasure {
    /// Measure a cubic curve.
    pub fn new(curve: &CubicBezier) -> Self {
        Self::from_polyline(curve.flatten(MEASURE_TOLERANCE))
    }

    /// Measure an already flattened contour.
    ///
    /// An empty polyline measures as a single point at the origin.
    pub fn from_polyline(points: Vec<Point>) -> Self {
        let points = if points.is_empty() { vec![Point::ZERO] } else { points };

        let mut cumulative = Vec::with_capacity(points.len());
        let mut total = 0.0f32;
        cumulative.push(0.0);
        for pair in points.windows(2) {
            total += pair[0].distance(pair[1]);
            cumulative.push(total);
        }

        Self { points, cumulative }
    }

    /// Total length of the contour.
    pub fn length(&self) -> f32 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    pub fn start(&self) -> Point {
        self.points[0]
    }

    pub fn end(&self) -> Point {
        self.points[self.points.len() - 1]
    }

    /// Point at `distance` along the contour, clamped to [0, length].
    pub fn position_at(&self, distance: f32) -> Point {
        let length = self.length();
        if length <= 0.0 || distance.is_nan() || distance <= 0.0 {
            return self.start();
        }
        if distance >= length {
            return self.end();
        }

        // First index whose cumulative distance reaches `distance`.
        let hi = self.cumulative.partition_point(|&d| d < distance);
        let lo = hi - 1;
        let span = self.cumulative[hi] - self.cumulative[lo];
        if span <= 0.0 {
            return self.points[hi];
        }
        let t = (distance - self.cumulative[lo]) / span;
        self.points[lo].lerp(self.points[hi], t)
    }
}
