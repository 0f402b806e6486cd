//! CPU rasterization of the icon.
//!
//! Stroke coverage is computed per pixel centre from the distance to each
//! line (a capsule for round caps, an oriented rectangle for butt caps) with a
//! one-pixel anti-aliasing ramp, then blended source-over.

use image::{Rgba, RgbaImage};

use crate::drawable::{Canvas, DrawerArrowDrawable, StrokeCap, StrokeStyle};
use crate::geometry::{LineSegment, Point};

/// Canvas backed by an RGBA image.
pub struct RasterCanvas {
    image: RgbaImage,
}

impl RasterCanvas {
    /// A fully transparent canvas.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    /// A canvas filled with `background` (RGBA, 0.0 - 1.0).
    pub fn with_background(width: u32, height: u32, background: [f32; 4]) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, Rgba(to_rgba8(background))),
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    fn blend(&mut self, x: u32, y: u32, color: [f32; 3], alpha: f32) {
        let pixel = self.image.get_pixel_mut(x, y);
        let dst_a = pixel[3] as f32 / 255.0;
        let out_a = alpha + dst_a * (1.0 - alpha);
        if out_a <= 0.0 {
            return;
        }

        let mut out = [0.0f32; 4];
        for c in 0..3 {
            let dst = pixel[c] as f32 / 255.0;
            out[c] = (color[c] * alpha + dst * dst_a * (1.0 - alpha)) / out_a;
        }
        out[3] = out_a;
        *pixel = Rgba(to_rgba8(out));
    }
}

impl Canvas for RasterCanvas {
    fn draw_line(&mut self, segment: &LineSegment, stroke: &StrokeStyle) {
        let half_width = stroke.half_width();
        let length = segment.length();
        if stroke.cap == StrokeCap::Butt && length <= f32::EPSILON {
            return;
        }

        let (width, height) = self.image.dimensions();
        if width == 0 || height == 0 {
            return;
        }

        // Bounding box of everything the stroke can touch.
        let pad = half_width + 1.0;
        let min_x = (segment.start.x.min(segment.end.x) - pad).floor().max(0.0) as u32;
        let min_y = (segment.start.y.min(segment.end.y) - pad).floor().max(0.0) as u32;
        let max_x = ((segment.start.x.max(segment.end.x) + pad).ceil().max(0.0) as u32).min(width);
        let max_y = ((segment.start.y.max(segment.end.y) + pad).ceil().max(0.0) as u32).min(height);

        let base_alpha = stroke.alpha as f32 / 255.0;

        for y in min_y..max_y {
            for x in min_x..max_x {
                let centre = Point::new(x as f32 + 0.5, y as f32 + 0.5);
                let coverage = stroke_coverage(segment, length, half_width, stroke.cap, centre);
                if coverage > 0.0 {
                    self.blend(x, y, stroke.color, coverage * base_alpha);
                }
            }
        }
    }
}

/// Fraction of the pixel at `p` covered by the stroke.
fn stroke_coverage(segment: &LineSegment, length: f32, half_width: f32, cap: StrokeCap, p: Point) -> f32 {
    match cap {
        StrokeCap::Round => ramp(half_width - segment.distance_to(p)),
        StrokeCap::Butt => {
            let dir = segment.vector() * (1.0 / length);
            let rel = p - segment.start;
            let along = rel.dot(dir);
            let across = (rel.x * -dir.y + rel.y * dir.x).abs();
            ramp(half_width - across) * ramp(along.min(length - along))
        }
    }
}

/// Map a signed distance inside an edge to coverage over a one-pixel ramp.
#[inline]
fn ramp(inside: f32) -> f32 {
    (inside + 0.5).clamp(0.0, 1.0)
}

fn to_rgba8(color: [f32; 4]) -> [u8; 4] {
    color.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
}

/// Render `drawable` at its intrinsic size.
pub fn rasterize(drawable: &DrawerArrowDrawable, background: Option<[f32; 4]>) -> RgbaImage {
    let (width, height) = (drawable.intrinsic_width(), drawable.intrinsic_height());
    let mut canvas = match background {
        Some(bg) => RasterCanvas::with_background(width, height, bg),
        None => RasterCanvas::new(width, height),
    };
    drawable.draw(&mut canvas);
    canvas.into_image()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn horizontal_stroke(cap: StrokeCap) -> RgbaImage {
        let mut canvas = RasterCanvas::new(40, 20);
        let stroke = StrokeStyle { width: 4.0, cap, ..Default::default() };
        canvas.draw_line(&LineSegment::new(Point::new(10.0, 10.0), Point::new(30.0, 10.0)), &stroke);
        canvas.into_image()
    }

    #[test]
    fn test_butt_line_covers_interior_only() {
        let img = horizontal_stroke(StrokeCap::Butt);
        assert_eq!(img.get_pixel(20, 9)[3], 255);
        assert_eq!(img.get_pixel(20, 10)[3], 255);
        // Beyond the half width
        assert_eq!(img.get_pixel(20, 14)[3], 0);
        // Past the butt end
        assert_eq!(img.get_pixel(8, 10)[3], 0);
    }

    #[test]
    fn test_round_caps_protrude() {
        let butt = horizontal_stroke(StrokeCap::Butt);
        let round = horizontal_stroke(StrokeCap::Round);
        // Pixel centre (8.5, 10.5) is 1.58px from the start point
        assert_eq!(butt.get_pixel(8, 10)[3], 0);
        assert!(round.get_pixel(8, 10)[3] > 200);
    }

    #[test]
    fn test_alpha_scales_coverage() {
        let mut canvas = RasterCanvas::new(10, 10);
        let stroke = StrokeStyle { width: 4.0, alpha: 128, ..Default::default() };
        canvas.draw_line(&LineSegment::new(Point::new(0.0, 5.0), Point::new(10.0, 5.0)), &stroke);
        assert_eq!(canvas.image().get_pixel(5, 5)[3], 128);
    }

    #[test]
    fn test_blend_over_opaque_background() {
        let mut canvas = RasterCanvas::with_background(10, 10, [1.0, 1.0, 1.0, 1.0]);
        let stroke = StrokeStyle { width: 4.0, color: [1.0, 0.0, 0.0], alpha: 255, ..Default::default() };
        canvas.draw_line(&LineSegment::new(Point::new(0.0, 5.0), Point::new(10.0, 5.0)), &stroke);
        let img = canvas.into_image();
        assert_eq!(img.get_pixel(5, 5).0, [255, 0, 0, 255]);
        assert_eq!(img.get_pixel(5, 0).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_out_of_bounds_line_is_clipped() {
        let mut canvas = RasterCanvas::new(10, 10);
        let stroke = StrokeStyle { width: 2.0, ..Default::default() };
        canvas.draw_line(&LineSegment::new(Point::new(-50.0, -50.0), Point::new(-20.0, -20.0)), &stroke);
        canvas.draw_line(&LineSegment::new(Point::new(-5.0, 5.0), Point::new(50.0, 5.0)), &stroke);
        assert!(canvas.image().pixels().any(|p| p[3] > 0));
    }

    #[test]
    fn test_rasterize_uses_intrinsic_size() {
        let drawable = DrawerArrowDrawable::new(2.0).unwrap();
        let img = rasterize(&drawable, None);
        assert_eq!(img.dimensions(), (47, 47));
        assert!(img.pixels().any(|p| p[3] == 255));
    }
}
