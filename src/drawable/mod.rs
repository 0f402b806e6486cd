//! The drawer-arrow icon.
//!
//! A drawable that rotates between a drawer icon and a back arrow based on a
//! single parameter in [0, 1]. Rendering goes through the [`Canvas`] trait so
//! any backend (CPU raster, GPU mesh, a host toolkit) can draw it.

mod paths;
mod slide;
mod style;

pub use paths::{bridging_line, build_bars, Bar, DIMEN_DP, PATH_GEN_DENSITY, STROKE_WIDTH_DP};
pub use slide::{DrawerSlide, SlideUpdate, CLOSED_THRESHOLD, OPEN_THRESHOLD};
pub use style::{parse_hex_color, StrokeCap, StrokeStyle};

use crate::geometry::{BridgingLine, LineSegment};
use std::fmt;

/// Errors raised by drawable setters and constructors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DrawableError {
    #[error("Value must be between 1 and zero inclusive! (got {0})")]
    ParameterOutOfRange(f32),
    #[error("Density must be finite and positive (got {0})")]
    InvalidDensity(f32),
}

/// Drawing surface the icon renders onto.
pub trait Canvas {
    /// Stroke a single line segment.
    fn draw_line(&mut self, segment: &LineSegment, stroke: &StrokeStyle);
}

/// Callback invoked with the new revision whenever the icon changes.
pub type InvalidateCallback = Box<dyn Fn(u64) + Send + Sync>;

/// Icon that morphs between a drawer ("hamburger") and a back arrow.
pub struct DrawerArrowDrawable {
    bars: [BridgingLine; 3],
    density: f32,
    size: u32,
    stroke: StrokeStyle,
    flip: bool,
    parameter: f32,
    revision: u64,
    on_invalidate: Option<InvalidateCallback>,
}

impl fmt::Debug for DrawerArrowDrawable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrawerArrowDrawable")
            .field("density", &self.density)
            .field("size", &self.size)
            .field("stroke", &self.stroke)
            .field("flip", &self.flip)
            .field("parameter", &self.parameter)
            .field("revision", &self.revision)
            .finish_non_exhaustive()
    }
}

impl DrawerArrowDrawable {
    /// Create a square-capped icon for the given display density.
    pub fn new(density: f32) -> Result<Self, DrawableError> {
        Self::with_style(density, false)
    }

    /// Create an icon, with round caps when `rounded` is set.
    pub fn with_style(density: f32, rounded: bool) -> Result<Self, DrawableError> {
        if !density.is_finite() || density <= 0.0 {
            return Err(DrawableError::InvalidDensity(density));
        }

        let stroke = StrokeStyle {
            width: STROKE_WIDTH_DP * density,
            cap: if rounded { StrokeCap::Round } else { StrokeCap::Butt },
            ..Default::default()
        };
        let size = (DIMEN_DP * density) as u32;

        log::debug!(
            "Building drawer-arrow icon: density={}, size={}px, cap={:?}",
            density,
            size,
            stroke.cap
        );

        Ok(Self {
            bars: build_bars(density),
            density,
            size,
            stroke,
            flip: false,
            parameter: 0.0,
            revision: 0,
            on_invalidate: None,
        })
    }

    pub fn density(&self) -> f32 {
        self.density
    }

    pub fn intrinsic_width(&self) -> u32 {
        self.size
    }

    pub fn intrinsic_height(&self) -> u32 {
        self.size
    }

    pub fn parameter(&self) -> f32 {
        self.parameter
    }

    pub fn flip(&self) -> bool {
        self.flip
    }

    pub fn rounded(&self) -> bool {
        self.stroke.cap == StrokeCap::Round
    }

    pub fn stroke(&self) -> &StrokeStyle {
        &self.stroke
    }

    /// Number of invalidations since construction.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Register a callback fired on every invalidation.
    pub fn set_invalidate_callback(&mut self, callback: Option<InvalidateCallback>) {
        self.on_invalidate = callback;
    }

    /// Set the morph position. Usually driven by a drawer's slide offset.
    pub fn set_parameter(&mut self, parameter: f32) -> Result<(), DrawableError> {
        if parameter.is_nan() || !(0.0..=1.0).contains(&parameter) {
            return Err(DrawableError::ParameterOutOfRange(parameter));
        }
        self.parameter = parameter;
        self.invalidate();
        Ok(())
    }

    /// When false, rotates from 3 o'clock to 9 o'clock between a drawer icon
    /// and a back arrow. When true, rotates from 9 o'clock to 3 o'clock
    /// between a back arrow and a drawer icon.
    pub fn set_flip(&mut self, flip: bool) {
        self.flip = flip;
        self.invalidate();
    }

    pub fn set_stroke_color(&mut self, color: [f32; 3]) {
        self.stroke.color = color;
        self.invalidate();
    }

    pub fn set_alpha(&mut self, alpha: u8) {
        self.stroke.alpha = alpha;
        self.invalidate();
    }

    /// Switch between round and butt caps, keeping every other setting.
    pub fn set_rounded(&mut self, rounded: bool) {
        self.stroke.cap = if rounded { StrokeCap::Round } else { StrokeCap::Butt };
        self.invalidate();
    }

    /// The segment for one bar in the current state, in pixels.
    pub fn line(&self, bar: Bar) -> LineSegment {
        let bridge = &self.bars[bar.index()];
        let segment = if self.rounded() {
            bridge.segment_at_inset(self.parameter, self.stroke.half_width())
        } else {
            bridge.segment_at(self.parameter)
        };

        if self.flip {
            segment.mirrored_y(self.flip_pivot())
        } else {
            segment
        }
    }

    /// Segments for the top, middle and bottom bars.
    pub fn lines(&self) -> [LineSegment; 3] {
        [self.line(Bar::Top), self.line(Bar::Middle), self.line(Bar::Bottom)]
    }

    /// Draw all three bars onto `canvas`.
    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        for segment in self.lines() {
            canvas.draw_line(&segment, &self.stroke);
        }
    }

    /// Horizontal line the flip mirrors about (integer half height).
    fn flip_pivot(&self) -> f32 {
        (self.intrinsic_height() / 2) as f32
    }

    fn invalidate(&mut self) {
        self.revision += 1;
        if let Some(callback) = &self.on_invalidate {
            callback(self.revision);
        }
    }
}
