//! Line segments spanning two joined paths.

use super::{JoinedPath, LineSegment};

/// A line whose endpoints ride along two separate paths at the same
/// fractional distance.
#[derive(Debug, Clone)]
pub struct BridgingLine {
    path_a: JoinedPath,
    path_b: JoinedPath,
}

impl BridgingLine {
    pub fn new(path_a: JoinedPath, path_b: JoinedPath) -> Self {
        Self { path_a, path_b }
    }

    pub fn path_a(&self) -> &JoinedPath {
        &self.path_a
    }

    pub fn path_b(&self) -> &JoinedPath {
        &self.path_b
    }

    /// The segment between both paths at `parameter`.
    pub fn segment_at(&self, parameter: f32) -> LineSegment {
        LineSegment::new(self.path_a.point_at(parameter), self.path_b.point_at(parameter))
    }

    /// The segment at `parameter`, with both ends pulled inward by `inset`.
    ///
    /// Round caps protrude by half the stroke width; insetting by that
    /// amount makes a round-capped line cover the same extent as a butt one.
    pub fn segment_at_inset(&self, parameter: f32, inset: f32) -> LineSegment {
        inset_segment(self.segment_at(parameter), inset)
    }
}

/// Pull both endpoints of `segment` toward each other by `inset`.
///
/// A zero-length segment is returned unchanged. Insets larger than half the
/// length swap the endpoints' order, matching the plain vector formula.
pub fn inset_segment(segment: LineSegment, inset: f32) -> LineSegment {
    let a = segment.start;
    let b = segment.end;
    let v = b - a;
    let magnitude = v.length();
    if magnitude <= 0.0 {
        return segment;
    }

    let param_a = (magnitude - inset) / magnitude;
    let param_b = inset / magnitude;

    LineSegment::new(b - v * param_a, b - v * param_b)
}
