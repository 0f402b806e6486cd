//! Stroke paint settings.

use serde::{Deserialize, Serialize};

/// How the ends of a stroked line are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeCap {
    /// Line ends exactly at its endpoints.
    #[default]
    Butt,
    /// Semicircular end of radius half the stroke width.
    Round,
}

/// Paint used for the icon's bars.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeStyle {
    /// Stroke width in pixels.
    pub width: f32,
    pub cap: StrokeCap,
    /// RGB in 0.0 - 1.0.
    pub color: [f32; 3],
    pub alpha: u8,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            width: 2.0,
            cap: StrokeCap::Butt,
            color: [0.0, 0.0, 0.0],
            alpha: 255,
        }
    }
}

impl StrokeStyle {
    pub fn half_width(&self) -> f32 {
        self.width * 0.5
    }

    /// Premultiplied-free RGBA with alpha in 0.0 - 1.0.
    pub fn rgba(&self) -> [f32; 4] {
        [
            self.color[0],
            self.color[1],
            self.color[2],
            self.alpha as f32 / 255.0,
        ]
    }
}

/// Parse hex color to RGB floats (accepts 6-char RGB or 8-char RGBA, alpha is ignored).
pub fn parse_hex_color(hex: &str) -> Option<[f32; 3]> {
    let hex = hex.trim_start_matches('#');
    if (hex.len() != 6 && hex.len() != 8) || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()? as f32 / 255.0;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()? as f32 / 255.0;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()? as f32 / 255.0;
    Some([r, g, b])
}
