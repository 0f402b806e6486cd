//! Drawer Arrow
//!
//! An animated icon that morphs between a "hamburger" drawer icon and a back
//! arrow, driven by a single parameter in [0, 1].
//!
//! # Features
//!
//! - Arc-length interpolation along pre-authored cubic Bezier paths
//! - Butt or round stroke caps, color and alpha
//! - Flip mode for the reverse rotation when a drawer closes
//! - CPU rasterization to RGBA images via `image`
//! - Headless GPU rendering via wgpu
//! - Frame-sequence export to PNG, configurable from JSON
//!
//! # Example
//! ```
//! use drawer_arrow::{Bar, DrawerArrowDrawable};
//!
//! let mut icon = DrawerArrowDrawable::new(3.0).unwrap();
//! icon.set_parameter(0.5).unwrap();
//! let top = icon.line(Bar::Top);
//! assert!(top.length() > 0.0);
//! ```

pub mod drawable;
pub mod geometry;
pub mod gpu;
pub mod mesh;
pub mod pipeline;
pub mod raster;

// Re-export commonly used types
pub use drawable::{
    parse_hex_color, Bar, Canvas, DrawableError, DrawerArrowDrawable, DrawerSlide, SlideUpdate,
    StrokeCap, StrokeStyle,
};
pub use geometry::{BridgingLine, CubicBezier, JoinedPath, LineSegment, PathMeasure, Point};
pub use gpu::{GpuContext, GpuError, IconRenderConfig, IconRenderer};
pub use mesh::{tessellate, MeshCanvas, Vertex};
pub use pipeline::{
    render_sequence, render_sequence_blocking, sweep_parameters, Backend, PipelineError,
    SequenceConfig,
};
pub use raster::{rasterize, RasterCanvas};
