//! Two contours walked as a single parametric path.

use super::{CubicBezier, PathMeasure, Point};

/// Joins two paths as if they were one: the first half of the parameter
/// range walks `first`, the second half walks `second`.
#[derive(Debug, Clone)]
pub struct JoinedPath {
    first: PathMeasure,
    second: PathMeasure,
}

impl JoinedPath {
    pub fn new(first: PathMeasure, second: PathMeasure) -> Self {
        Self { first, second }
    }

    pub fn from_curves(first: &CubicBezier, second: &CubicBezier) -> Self {
        Self::new(PathMeasure::new(first), PathMeasure::new(second))
    }

    pub fn first(&self) -> &PathMeasure {
        &self.first
    }

    pub fn second(&self) -> &PathMeasure {
        &self.second
    }

    /// Point on the joined path at `parameter` in [0, 1].
    ///
    /// At exactly 0.5 this is the end of the first path.
    pub fn point_at(&self, parameter: f32) -> Point {
        if parameter <= 0.5 {
            self.first.position_at(self.first.length() * (parameter * 2.0))
        } else {
            self.second.position_at(self.second.length() * ((parameter - 0.5) * 2.0))
        }
    }
}
