//! Authored control points for the three bars.
//!
//! Each bar is a bridging line between two joined paths. Path A carries the
//! left end of the bar, path B the right end. The first half of each joined
//! path sweeps from the drawer pose to the arrow pose, the second half
//! continues the rotation to the mirrored drawer pose.

use crate::geometry::{BridgingLine, CubicBezier, JoinedPath, Point};

/// Density the control points were authored at (pixels per dp).
pub const PATH_GEN_DENSITY: f32 = 3.0;

/// Icon side length in dp the paths were authored for.
pub const DIMEN_DP: f32 = 23.5;

/// Stroke width in dp the arrowhead was shaped for; other widths make the
/// arrowhead tips miss each other.
pub const STROKE_WIDTH_DP: f32 = 2.0;

/// One of the icon's three bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bar {
    Top,
    Middle,
    Bottom,
}

impl Bar {
    pub fn all() -> &'static [Self] {
        &[Self::Top, Self::Middle, Self::Bottom]
    }

    pub fn index(&self) -> usize {
        match self {
            Self::Top => 0,
            Self::Middle => 1,
            Self::Bottom => 2,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Middle => "middle",
            Self::Bottom => "bottom",
        }
    }

    /// The (first, second) curves of path A and path B, in authoring units.
    fn authored(&self) -> [(CubicBezier, CubicBezier); 2] {
        let p = Point::new;
        match self {
            Self::Top => [
                (
                    CubicBezier::relative(p(5.042, 20.0), p(8.125, -16.317), p(39.753, -27.851), p(55.49, -2.765)),
                    CubicBezier::relative(p(60.531, 17.235), p(11.301, 18.015), p(-3.699, 46.083), p(-23.725, 43.456)),
                ),
                (
                    CubicBezier::relative(p(64.959, 20.0), p(4.457, 16.75), p(1.512, 37.982), p(-22.557, 42.699)),
                    CubicBezier::new(p(42.402, 62.699), p(18.333, 67.418), p(8.807, 45.646), p(8.807, 32.823)),
                ),
            ],
            Self::Middle => [
                (
                    CubicBezier::new(p(5.042, 35.0), p(5.042, 20.333), p(18.625, 6.791), p(35.0, 6.791)),
                    CubicBezier::relative(p(35.0, 6.791), p(16.083, 0.0), p(26.853, 16.702), p(26.853, 28.209)),
                ),
                (
                    CubicBezier::relative(p(64.959, 35.0), p(0.0, 10.926), p(-8.709, 26.416), p(-29.958, 26.416)),
                    CubicBezier::relative(p(35.0, 61.416), p(-7.5, 0.0), p(-23.946, -8.211), p(-23.946, -26.416)),
                ),
            ],
            Self::Bottom => [
                (
                    CubicBezier::new(p(5.042, 50.0), p(2.5, 43.312), p(0.013, 26.546), p(9.475, 17.346)),
                    CubicBezier::relative(p(9.475, 17.346), p(9.462, -9.2), p(24.188, -10.353), p(27.326, -8.245)),
                ),
                (
                    CubicBezier::relative(p(64.959, 50.0), p(-7.021, 10.08), p(-20.584, 19.699), p(-37.361, 12.74)),
                    CubicBezier::relative(p(27.598, 62.699), p(-15.723, -6.521), p(-18.8, -23.543), p(-18.8, -25.642)),
                ),
            ],
        }
    }
}

/// Scale an authored curve to `density`. Curves authored at
/// [`PATH_GEN_DENSITY`] are returned untouched.
fn scale_to_density(curve: CubicBezier, density: f32) -> CubicBezier {
    if density == PATH_GEN_DENSITY {
        return curve;
    }
    curve.scaled(density / PATH_GEN_DENSITY)
}

/// Build the bridging line for `bar` at `density`.
pub fn bridging_line(bar: Bar, density: f32) -> BridgingLine {
    let [(a_first, a_second), (b_first, b_second)] = bar.authored();
    let joined = |first, second| {
        JoinedPath::from_curves(
            &scale_to_density(first, density),
            &scale_to_density(second, density),
        )
    };
    BridgingLine::new(joined(a_first, a_second), joined(b_first, b_second))
}

/// Build all three bars (top, middle, bottom) at `density`.
pub fn build_bars(density: f32) -> [BridgingLine; 3] {
    [
        bridging_line(Bar::Top, density),
        bridging_line(Bar::Middle, density),
        bridging_line(Bar::Bottom, density),
    ]
}
