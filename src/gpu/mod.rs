//! GPU rendering using wgpu.
//!
//! Provides headless offscreen rendering of the icon. Backends are chosen by
//! wgpu (Metal on macOS, Vulkan or GL elsewhere); callers fall back to the
//! CPU rasterizer when no adapter is available.

pub mod context;
pub mod renderer;

pub use context::{GpuContext, GpuError};
pub use renderer::{IconRenderConfig, IconRenderer};
