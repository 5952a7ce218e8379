// src/renderer/primitive.rs
use crate::errors::DuelError;
use super::{font, Camera, Color, DrawSurface};

const CIRCLE_SEGMENTS: u32 = 32;
const MAX_VERTICES: usize = 32_768;
const MAX_INDICES: usize = MAX_VERTICES * 3;

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct PrimitiveVertex {
    position: [f32; 2],
    color: [f32; 4],
}

impl PrimitiveVertex {
    const ATTRIBS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x2,
        1 => Float32x4,
    ];

    fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<PrimitiveVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct PrimitiveUniform {
    view_proj: [[f32; 4]; 4],
}

/// Batches flat-colored triangles for one frame and draws them in a single
/// indexed call.
pub struct PrimitiveRenderer {
    render_pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,

    vertices: Vec<PrimitiveVertex>,
    indices: Vec<u16>,
    uploaded_indices: u32,
    overflowed: bool,
}

impl PrimitiveRenderer {
    pub fn new(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
    ) -> Result<Self, DuelError> {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Primitive Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/primitive.wgsl").into()),
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Primitive Uniform Buffer"),
            size: std::mem::size_of::<PrimitiveUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let uniform_bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
            label: Some("Primitive Uniform Bind Group Layout"),
        });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &uniform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
            label: Some("Primitive Uniform Bind Group"),
        });

        let render_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Primitive Render Pipeline Layout"),
            bind_group_layouts: &[&uniform_bind_group_layout],
            push_constant_ranges: &[],
        });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Primitive Render Pipeline"),
            layout: Some(&render_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                buffers: &[PrimitiveVertex::desc()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
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
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
        });

        let vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Primitive Vertex Buffer"),
            size: (MAX_VERTICES * std::mem::size_of::<PrimitiveVertex>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let index_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Primitive Index Buffer"),
            size: (MAX_INDICES * std::mem::size_of::<u16>()) as u64,
            usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Ok(Self {
            render_pipeline,
            vertex_buffer,
            index_buffer,
            uniform_buffer,
            uniform_bind_group,
            vertices: Vec::new(),
            indices: Vec::new(),
            uploaded_indices: 0,
            overflowed: false,
        })
    }

    /// Whether the batch still has room; warns once per frame when full.
    fn has_room(&mut self, vertices: usize, indices: usize) -> bool {
        let fits = self.vertices.len() + vertices <= MAX_VERTICES
            && self.indices.len() + indices <= MAX_INDICES;
        if !fits && !self.overflowed {
            self.overflowed = true;
            log::warn!("Primitive batch full, dropping the rest of this frame");
        }
        fits
    }

    fn push_quad(&mut self, corners: [[f32; 2]; 4], color: Color) {
        if !self.has_room(4, 6) {
            return;
        }
        let base = self.vertices.len() as u16;
        for position in corners {
            self.vertices.push(PrimitiveVertex { position, color });
        }
        self.indices.extend_from_slice(&[
            base, base + 1, base + 2,
            base + 2, base + 3, base,
        ]);
    }

    /// Writes the batch to the GPU. Call once per frame before `draw`.
    pub fn upload(&mut self, queue: &wgpu::Queue, camera: &Camera) {
        let view_proj = camera.get_view_projection_matrix();
        let uniform = PrimitiveUniform {
            view_proj: view_proj.to_cols_array_2d(),
        };
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[uniform]));

        self.uploaded_indices = self.indices.len() as u32;
        if self.vertices.is_empty() {
            return;
        }

        // buffer writes must be a multiple of four bytes
        if self.indices.len() % 2 == 1 {
            self.indices.push(0);
        }
        queue.write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&self.vertices));
        queue.write_buffer(&self.index_buffer, 0, bytemuck::cast_slice(&self.indices));
    }

    pub fn draw<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>) {
        if self.uploaded_indices == 0 {
            return;
        }
        render_pass.set_pipeline(&self.render_pipeline);
        render_pass.set_bind_group(0, &self.uniform_bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
        render_pass.draw_indexed(0..self.uploaded_indices, 0, 0..1);
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
        self.uploaded_indices = 0;
        self.overflowed = false;
    }
}

impl DrawSurface for PrimitiveRenderer {
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        self.push_quad(
            [[x, y], [x + width, y], [x + width, y + height], [x, y + height]],
            color,
        );
    }

    fn stroke_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, thickness: f32, color: Color) {
        let dx = x2 - x1;
        let dy = y2 - y1;
        let length = (dx * dx + dy * dy).sqrt();

        if length < 0.001 {
            return;
        }

        let half_thickness = thickness / 2.0;
        let perpx = -dy / length * half_thickness;
        let perpy = dx / length * half_thickness;

        self.push_quad(
            [
                [x1 + perpx, y1 + perpy],
                [x2 + perpx, y2 + perpy],
                [x2 - perpx, y2 - perpy],
                [x1 - perpx, y1 - perpy],
            ],
            color,
        );
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Color) {
        let segments = CIRCLE_SEGMENTS;
        if !self.has_room(segments as usize + 2, segments as usize * 3) {
            return;
        }

        let center_idx = self.vertices.len() as u16;
        self.vertices.push(PrimitiveVertex { position: [x, y], color });

        for i in 0..=segments {
            let angle = 2.0 * std::f32::consts::PI * (i as f32) / (segments as f32);
            let px = x + radius * angle.cos();
            let py = y + radius * angle.sin();
            self.vertices.push(PrimitiveVertex { position: [px, py], color });

            if i > 0 {
                self.indices.extend_from_slice(&[
                    center_idx,
                    center_idx + i as u16,
                    center_idx + i as u16 + 1,
                ]);
            }
        }
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Color) {
        for [cx, cy, w, h] in font::text_cells(text, x, y, size) {
            self.fill_rect(cx, cy, w, h, color);
        }
    }
}
