//! Offscreen GPU renderer for the drawer-arrow icon.

use super::context::{GpuContext, GpuError};
use crate::drawable::{DrawerArrowDrawable, StrokeCap};
use crate::mesh::{tessellate, Vertex};
use wgpu::{BindGroup, Buffer, RenderPipeline, Texture, TextureView};

/// Three bars, one quad each.
const MAX_VERTICES: usize = 3 * 6;

/// Uniform data for the icon shader.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct IconUniforms {
    color: [f32; 4],
    round_cap: f32,
    _padding: [f32; 3],
}

/// Configuration for offscreen icon rendering.
#[derive(Debug, Clone)]
pub struct IconRenderConfig {
    pub width: u32,
    pub height: u32,
    /// Clear color (RGBA, 0.0 - 1.0).
    pub background: [f32; 4],
}

impl Default for IconRenderConfig {
    fn default() -> Self {
        Self {
            width: 70,
            height: 70,
            background: [1.0, 1.0, 1.0, 1.0],
        }
    }
}

impl IconRenderConfig {
    /// Target sized to the drawable's intrinsic bounds.
    pub fn for_drawable(drawable: &DrawerArrowDrawable) -> Self {
        Self {
            width: drawable.intrinsic_width(),
            height: drawable.intrinsic_height(),
            ..Default::default()
        }
    }
}

/// Headless renderer producing tightly packed RGBA8 frames.
pub struct IconRenderer {
    ctx: GpuContext,
    pipeline: RenderPipeline,
    bind_group: BindGroup,
    uniform_buffer: Buffer,
    vertex_buffer: Buffer,
    render_texture: Texture,
    render_view: TextureView,
    config: IconRenderConfig,
}

impl IconRenderer {
    /// Create a new icon renderer with its own GPU context.
    pub async fn new(config: IconRenderConfig) -> Result<Self, GpuError> {
        if config.width == 0 || config.height == 0 {
            return Err(GpuError::EmptyTarget {
                width: config.width,
                height: config.height,
            });
        }

        let ctx = GpuContext::new().await?;
        let max = ctx.device.limits().max_texture_dimension_2d;
        if config.width > max || config.height > max {
            return Err(GpuError::TargetTooLarge {
                width: config.width,
                height: config.height,
                max,
            });
        }

        let format = wgpu::TextureFormat::Rgba8Unorm;

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("icon_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/icon.wgsl").into()),
        });

        let bind_group_layout = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("icon_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("icon_pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("icon_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<Vertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![
                        0 => Float32x2,
                        1 => Float32x2,
                        2 => Float32,
                        3 => Float32,
                    ],
                }],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let uniform_buffer = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("icon_uniforms"),
            size: std::mem::size_of::<IconUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let vertex_buffer = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("icon_vertices"),
            size: (std::mem::size_of::<Vertex>() * MAX_VERTICES) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("icon_bind_group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let render_texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("icon_render_target"),
            size: wgpu::Extent3d {
                width: config.width,
                height: config.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });

        let render_view = render_texture.create_view(&wgpu::TextureViewDescriptor::default());

        log::debug!(
            "Icon renderer ready: {}x{} on {}",
            config.width,
            config.height,
            ctx.adapter_info().name
        );

        Ok(Self {
            ctx,
            pipeline,
            bind_group,
            uniform_buffer,
            vertex_buffer,
            render_texture,
            render_view,
            config,
        })
    }

    /// Render the drawable's current state and read the pixels back.
    pub fn render_frame(&self, drawable: &DrawerArrowDrawable) -> Result<Vec<u8>, GpuError> {
        let stroke = drawable.stroke();
        let vertices = tessellate(&drawable.lines(), stroke, self.config.width, self.config.height);
        let vertex_count = vertices.len().min(MAX_VERTICES);

        let uniforms = IconUniforms {
            color: stroke.rgba(),
            round_cap: if stroke.cap == StrokeCap::Round { 1.0 } else { 0.0 },
            _padding: [0.0; 3],
        };
        self.ctx.queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

        if vertex_count > 0 {
            self.ctx.queue.write_buffer(
                &self.vertex_buffer,
                0,
                bytemuck::cast_slice(&vertices[..vertex_count]),
            );
        }

        let mut encoder = self.ctx.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("icon_render_encoder"),
        });

        {
            let bg = self.config.background;
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("icon_render_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.render_view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: (bg[0] * bg[3]) as f64,
                            g: (bg[1] * bg[3]) as f64,
                            b: (bg[2] * bg[3]) as f64,
                            a: bg[3] as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            render_pass.set_pipeline(&self.pipeline);
            render_pass.set_bind_group(0, &self.bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            render_pass.draw(0..vertex_count as u32, 0..1);
        }

        // Copy texture to buffer for readback
        let bytes_per_pixel = 4u32;
        let unpadded_row_bytes = self.config.width * bytes_per_pixel;
        let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
        let padded_row_bytes = unpadded_row_bytes.div_ceil(align) * align;
        let buffer_size = (padded_row_bytes * self.config.height) as u64;

        let readback_buffer = self.ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("icon_readback_buffer"),
            size: buffer_size,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture: &self.render_texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &readback_buffer,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(padded_row_bytes),
                    rows_per_image: Some(self.config.height),
                },
            },
            wgpu::Extent3d {
                width: self.config.width,
                height: self.config.height,
                depth_or_array_layers: 1,
            },
        );

        self.ctx.queue.submit(std::iter::once(encoder.finish()));

        let buffer_slice = readback_buffer.slice(..);
        let (sender, receiver) = std::sync::mpsc::channel();
        buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
            // Receiver outlives the poll below; a failed send only means it was dropped.
            let _ = sender.send(result);
        });
        self.ctx.device.poll(wgpu::PollType::wait_indefinitely())?;
        receiver.recv().map_err(|_| GpuError::ReadbackDropped)??;

        let data = buffer_slice.get_mapped_range();

        // Remove row padding if present
        let mut pixels = Vec::with_capacity((self.config.width * self.config.height * 4) as usize);
        for row in 0..self.config.height {
            let start = (row * padded_row_bytes) as usize;
            let end = start + unpadded_row_bytes as usize;
            pixels.extend_from_slice(&data[start..end]);
        }
        unpremultiply(&mut pixels);

        Ok(pixels)
    }

    /// Render into an [`image::RgbaImage`].
    pub fn render_image(&self, drawable: &DrawerArrowDrawable) -> Result<image::RgbaImage, GpuError> {
        let pixels = self.render_frame(drawable)?;
        // Length always matches width * height * 4.
        image::RgbaImage::from_raw(self.config.width, self.config.height, pixels)
            .ok_or(GpuError::EmptyTarget {
                width: self.config.width,
                height: self.config.height,
            })
    }

    /// Get the render configuration.
    pub fn config(&self) -> &IconRenderConfig {
        &self.config
    }

    /// Get GPU adapter info.
    pub fn adapter_info(&self) -> wgpu::AdapterInfo {
        self.ctx.adapter_info()
    }
}

/// Convert premultiplied RGBA8 pixels to straight alpha in place.
fn unpremultiply(pixels: &mut [u8]) {
    for px in pixels.chunks_exact_mut(4) {
        let a = px[3] as u32;
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((*c as u32 * 255 + a / 2) / a).min(255) as u8;
        }
    }
}
