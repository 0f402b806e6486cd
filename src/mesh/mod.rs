//! Triangle meshes for GPU line rendering.
//!
//! Each stroked segment becomes one quad (two triangles). The quad carries
//! segment-local coordinates so the fragment shader can compute exact
//! coverage for butt and round caps.

use crate::drawable::{Canvas, StrokeCap, StrokeStyle};
use crate::geometry::LineSegment;

/// Extra pixels around each quad for the anti-aliasing ramp.
pub const AA_MARGIN: f32 = 1.0;

/// Vertex data for rendering.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Clip-space position.
    pub position: [f32; 2],
    /// Pixels along (x) and across (y) the segment, origin at its start.
    pub local_pos: [f32; 2],
    /// Segment length in pixels.
    pub length: f32,
    /// Half the stroke width in pixels.
    pub half_width: f32,
}

/// Pixel-to-clip-space mapping for a render target.
struct MeshContext {
    width: f32,
    height: f32,
}

impl MeshContext {
    #[inline]
    fn to_ndc(&self, x: f32, y: f32) -> [f32; 2] {
        [(x / self.width) * 2.0 - 1.0, 1.0 - (y / self.height) * 2.0]
    }

    fn push_segment(&self, vertices: &mut Vec<Vertex>, segment: &LineSegment, stroke: &StrokeStyle) {
        let length = segment.length();
        let half_width = stroke.half_width();

        if length <= f32::EPSILON && stroke.cap == StrokeCap::Butt {
            return;
        }

        // Unit direction; a zero-length round-capped segment draws a dot.
        let (dx, dy) = if length > f32::EPSILON {
            let v = segment.vector();
            (v.x / length, v.y / length)
        } else {
            (1.0, 0.0)
        };
        let (nx, ny) = (-dy, dx);

        let cap_extent = match stroke.cap {
            StrokeCap::Butt => 0.0,
            StrokeCap::Round => half_width,
        };
        let along_min = -cap_extent - AA_MARGIN;
        let along_max = length + cap_extent + AA_MARGIN;
        let across = half_width + AA_MARGIN;

        let corner = |along: f32, side: f32| {
            let x = segment.start.x + dx * along + nx * side;
            let y = segment.start.y + dy * along + ny * side;
            Vertex {
                position: self.to_ndc(x, y),
                local_pos: [along, side],
                length,
                half_width,
            }
        };

        let quad = [
            corner(along_min, across),
            corner(along_min, -across),
            corner(along_max, across),
            corner(along_max, -across),
        ];
        let indices = [0, 1, 2, 2, 1, 3]; // Two triangles

        vertices.extend(indices.iter().map(|&i| quad[i]));
    }
}

/// Build the triangle list for `lines` on a `width` x `height` target.
pub fn tessellate(lines: &[LineSegment], stroke: &StrokeStyle, width: u32, height: u32) -> Vec<Vertex> {
    let mut canvas = MeshCanvas::new(width, height);
    for segment in lines {
        canvas.draw_line(segment, stroke);
    }
    canvas.into_vertices()
}

/// Canvas that records strokes as triangles.
pub struct MeshCanvas {
    ctx: MeshContext,
    vertices: Vec<Vertex>,
}

impl MeshCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            ctx: MeshContext {
                width: width.max(1) as f32,
                height: height.max(1) as f32,
            },
            vertices: Vec::with_capacity(3 * 6),
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn into_vertices(self) -> Vec<Vertex> {
        self.vertices
    }
}

impl Canvas for MeshCanvas {
    fn draw_line(&mut self, segment: &LineSegment, stroke: &StrokeStyle) {
        self.ctx.push_segment(&mut self.vertices, segment, stroke);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drawable::DrawerArrowDrawable;
    use crate::geometry::Point;

    fn horizontal() -> LineSegment {
        LineSegment::new(Point::new(10.0, 50.0), Point::new(90.0, 50.0))
    }

    #[test]
    fn test_six_vertices_per_segment() {
        let stroke = StrokeStyle { width: 4.0, ..Default::default() };
        let vertices = tessellate(&[horizontal(), horizontal()], &stroke, 100, 100);
        assert_eq!(vertices.len(), 12);
    }

    #[test]
    fn test_vertex_layout_is_24_bytes() {
        assert_eq!(std::mem::size_of::<Vertex>(), 24);
    }

    #[test]
    fn test_butt_quad_spans_segment_plus_margin() {
        let stroke = StrokeStyle { width: 4.0, ..Default::default() };
        let vertices = tessellate(&[horizontal()], &stroke, 100, 100);
        let along: Vec<f32> = vertices.iter().map(|v| v.local_pos[0]).collect();
        let min = along.iter().cloned().fold(f32::INFINITY, f32::min);
        let max = along.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        assert_eq!(min, -AA_MARGIN);
        assert_eq!(max, 80.0 + AA_MARGIN);
        for v in &vertices {
            assert_eq!(v.length, 80.0);
            assert_eq!(v.half_width, 2.0);
        }
    }

    #[test]
    fn test_round_quad_extends_by_half_width() {
        let stroke = StrokeStyle { width: 4.0, cap: StrokeCap::Round, ..Default::default() };
        let vertices = tessellate(&[horizontal()], &stroke, 100, 100);
        let min = vertices.iter().map(|v| v.local_pos[0]).fold(f32::INFINITY, f32::min);
        assert_eq!(min, -2.0 - AA_MARGIN);
    }

    #[test]
    fn test_positions_in_clip_space() {
        let stroke = StrokeStyle { width: 4.0, ..Default::default() };
        let vertices = tessellate(&[horizontal()], &stroke, 100, 100);
        // First corner: x = 10 - 1 = 9px, y = 50 + 3 = 53px (normal points down)
        assert!((vertices[0].position[0] - (-0.82)).abs() < 1e-5);
        assert!((vertices[0].position[1] - (-0.06)).abs() < 1e-5);
    }

    #[test]
    fn test_degenerate_segments() {
        let p = Point::new(5.0, 5.0);
        let dot = LineSegment::new(p, p);

        let butt = StrokeStyle::default();
        assert!(tessellate(&[dot], &butt, 10, 10).is_empty());

        let round = StrokeStyle { cap: StrokeCap::Round, ..Default::default() };
        assert_eq!(tessellate(&[dot], &round, 10, 10).len(), 6);
    }

    #[test]
    fn test_drawable_draws_into_mesh() {
        let drawable = DrawerArrowDrawable::new(3.0).unwrap();
        let mut canvas = MeshCanvas::new(drawable.intrinsic_width(), drawable.intrinsic_height());
        drawable.draw(&mut canvas);
        assert_eq!(canvas.vertices().len(), 18);
    }
}
