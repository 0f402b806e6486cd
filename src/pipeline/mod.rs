//! Frame-sequence pipeline: sweep the icon through its animation and write
//! each frame to a PNG file.

use crate::drawable::{parse_hex_color, DrawableError, DrawerArrowDrawable, DrawerSlide};
use crate::gpu::{GpuError, IconRenderConfig, IconRenderer};
use crate::raster;
use image::RgbaImage;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Which renderer produces the frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Cpu,
    /// wgpu offscreen rendering; falls back to CPU when no adapter exists.
    Gpu,
}

/// Animation sequence configuration, loadable from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequenceConfig {
    /// Display density (pixels per dp).
    pub density: f32,
    pub rounded: bool,
    /// Stroke color as hex.
    pub color: String,
    /// Background as hex; transparent when absent.
    pub background: Option<String>,
    /// Frames per sweep.
    pub frames: u32,
    /// Also render the closing sweep (1 -> 0), which plays flipped.
    pub round_trip: bool,
    pub backend: Backend,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            density: 3.0,
            rounded: false,
            color: "#000000".to_string(),
            background: Some("#ffffff".to_string()),
            frames: 30,
            round_trip: true,
            backend: Backend::Cpu,
        }
    }
}

impl SequenceConfig {
    pub fn from_json_str(json: &str) -> Result<Self, PipelineError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, PipelineError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Build the drawable described by this config.
    pub fn to_drawable(&self) -> Result<DrawerArrowDrawable, PipelineError> {
        let color = parse_hex_color(&self.color)
            .ok_or_else(|| PipelineError::InvalidColor(self.color.clone()))?;
        let mut drawable = DrawerArrowDrawable::with_style(self.density, self.rounded)?;
        drawable.set_stroke_color(color);
        Ok(drawable)
    }

    /// Background as RGBA; transparent when unset.
    pub fn background_rgba(&self) -> Result<[f32; 4], PipelineError> {
        match &self.background {
            Some(hex) => {
                let [r, g, b] = parse_hex_color(hex)
                    .ok_or_else(|| PipelineError::InvalidColor(hex.clone()))?;
                Ok([r, g, b, 1.0])
            }
            None => Ok([0.0; 4]),
        }
    }

    /// Slide offsets for every frame, in order.
    pub fn offsets(&self) -> Vec<f32> {
        let forward = sweep_parameters(self.frames);
        if !self.round_trip {
            return forward;
        }
        let back = forward.iter().rev().skip(1).copied();
        let mut offsets = forward.clone();
        offsets.extend(back);
        offsets
    }
}

/// Errors that can occur during pipeline execution.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Drawable error: {0}")]
    Drawable(#[from] DrawableError),
    #[error("GPU error: {0}")]
    Gpu(#[from] GpuError),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
    #[error("Invalid color: {0}")]
    InvalidColor(String),
}

/// Evenly spaced parameters from 0 to 1 inclusive.
///
/// Zero frames yields nothing; one frame yields `[0.0]`.
pub fn sweep_parameters(frames: u32) -> Vec<f32> {
    match frames {
        0 => Vec::new(),
        1 => vec![0.0],
        n => (0..n).map(|i| i as f32 / (n - 1) as f32).collect(),
    }
}

/// File name for frame `index`.
pub fn frame_file_name(index: usize) -> String {
    format!("frame_{:04}.png", index)
}

enum FrameSource {
    Cpu([f32; 4]),
    Gpu(IconRenderer),
}

impl FrameSource {
    async fn create(config: &SequenceConfig, drawable: &DrawerArrowDrawable) -> Result<Self, PipelineError> {
        let background = config.background_rgba()?;
        match config.backend {
            Backend::Cpu => Ok(Self::Cpu(background)),
            Backend::Gpu => {
                let render_config = IconRenderConfig {
                    background,
                    ..IconRenderConfig::for_drawable(drawable)
                };
                match IconRenderer::new(render_config).await {
                    Ok(renderer) => {
                        log::info!("Rendering frames on GPU: {}", renderer.adapter_info().name);
                        Ok(Self::Gpu(renderer))
                    }
                    Err(GpuError::NoAdapter) => {
                        log::warn!("No GPU adapter available, falling back to CPU rasterizer");
                        Ok(Self::Cpu(background))
                    }
                    Err(e @ GpuError::TargetTooLarge { .. }) => {
                        log::warn!("{}, falling back to CPU rasterizer", e);
                        Ok(Self::Cpu(background))
                    }
                    Err(e) => Err(e.into()),
                }
            }
        }
    }

    fn render(&self, drawable: &DrawerArrowDrawable) -> Result<RgbaImage, PipelineError> {
        match self {
            Self::Cpu(background) => Ok(raster::rasterize(drawable, Some(*background))),
            Self::Gpu(renderer) => Ok(renderer.render_image(drawable)?),
        }
    }
}

/// Render the configured animation to `output_dir`, returning the written paths.
pub async fn render_sequence<P: AsRef<Path>>(
    config: &SequenceConfig,
    output_dir: P,
    progress_callback: Option<Box<dyn Fn(f32) + Send>>,
) -> Result<Vec<PathBuf>, PipelineError> {
    let output_dir = output_dir.as_ref();
    std::fs::create_dir_all(output_dir)?;

    let mut drawable = config.to_drawable()?;
    let source = FrameSource::create(config, &drawable).await?;
    let offsets = config.offsets();

    log::info!(
        "Rendering {} frames ({}x{}) to {}",
        offsets.len(),
        drawable.intrinsic_width(),
        drawable.intrinsic_height(),
        output_dir.display()
    );

    let mut slide = DrawerSlide::new();
    let mut written = Vec::with_capacity(offsets.len());

    for (index, &offset) in offsets.iter().enumerate() {
        let update = slide.apply(offset, &mut drawable)?;
        log::debug!("Frame {}: parameter={:.3}, flip={}", index, update.parameter, update.flip);

        let image = source.render(&drawable)?;
        let path = output_dir.join(frame_file_name(index));
        image.save(&path)?;
        written.push(path);

        if let Some(ref callback) = progress_callback {
            callback((index + 1) as f32 / offsets.len() as f32);
        }
    }

    log::info!("Wrote {} frames", written.len());
    Ok(written)
}

/// Blocking wrapper around [`render_sequence`].
pub fn render_sequence_blocking<P: AsRef<Path>>(
    config: &SequenceConfig,
    output_dir: P,
) -> Result<Vec<PathBuf>, PipelineError> {
    pollster::block_on(render_sequence(config, output_dir, None))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sweep_parameters() {
        assert!(sweep_parameters(0).is_empty());
        assert_eq!(sweep_parameters(1), vec![0.0]);
        assert_eq!(sweep_parameters(5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn test_round_trip_offsets() {
        let config = SequenceConfig { frames: 3, ..Default::default() };
        assert_eq!(config.offsets(), vec![0.0, 0.5, 1.0, 0.5, 0.0]);

        let one_way = SequenceConfig { frames: 3, round_trip: false, ..Default::default() };
        assert_eq!(one_way.offsets(), vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_config_from_partial_json() {
        let config = SequenceConfig::from_json_str(r#"{"density": 2.0, "rounded": true, "backend": "gpu"}"#).unwrap();
        assert_eq!(config.density, 2.0);
        assert!(config.rounded);
        assert_eq!(config.backend, Backend::Gpu);
        // Unspecified fields fall back to defaults
        assert_eq!(config.frames, 30);
        assert_eq!(config.color, "#000000");
    }

    #[test]
    fn test_invalid_config_values() {
        assert!(matches!(
            SequenceConfig::from_json_str("{\"frames\": \"many\"}"),
            Err(PipelineError::Config(_))
        ));

        let bad_color = SequenceConfig { color: "nope".to_string(), ..Default::default() };
        assert!(matches!(bad_color.to_drawable(), Err(PipelineError::InvalidColor(_))));

        let bad_density = SequenceConfig { density: 0.0, ..Default::default() };
        assert!(matches!(
            bad_density.to_drawable(),
            Err(PipelineError::Drawable(DrawableError::InvalidDensity(_)))
        ));
    }

    #[test]
    fn test_background_rgba() {
        let config = SequenceConfig::default();
        assert_eq!(config.background_rgba().unwrap(), [1.0, 1.0, 1.0, 1.0]);

        let clear = SequenceConfig { background: None, ..Default::default() };
        assert_eq!(clear.background_rgba().unwrap(), [0.0; 4]);
    }

    #[test]
    fn test_frame_file_name() {
        assert_eq!(frame_file_name(7), "frame_0007.png");
    }
}
