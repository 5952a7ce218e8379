// src/renderer/mod.rs
pub mod camera;
pub mod font;
pub mod primitive;
pub mod surface;

use winit::window::Window;
use crate::errors::DuelError;

pub use camera::Camera;
pub use primitive::PrimitiveRenderer;
pub use surface::{hex_color, Color, DrawCommand, DrawSurface, RecordingSurface, WHITE};

/// Window-backed drawing surface. The game draws into `primitives()` during
/// a frame; `present` clears the swapchain image and flushes the batch.
pub struct Renderer {
    surface: wgpu::Surface,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    size: winit::dpi::PhysicalSize<u32>,

    primitives: PrimitiveRenderer,
    camera: Camera,
}

impl Renderer {
    pub async fn new(window: &Window, canvas_width: f32, canvas_height: f32) -> Result<Self, DuelError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = unsafe { instance.create_surface(window) }
            .map_err(|e| DuelError::RenderError(format!("Failed to create surface: {}", e)))?;

        let adapter = instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }).await.ok_or_else(|| DuelError::RenderError("Failed to find adapter".to_string()))?;

        let (device, queue) = adapter.request_device(
            &wgpu::DeviceDescriptor {
                features: wgpu::Features::empty(),
                limits: wgpu::Limits::default(),
                label: None,
            },
            None,
        ).await.map_err(|e| DuelError::RenderError(format!("Failed to create device: {}", e)))?;

        let surface_caps = surface.get_capabilities(&adapter);
        // Hex colors are authored in sRGB; a linear target shows them as-is.
        let surface_format = surface_caps.formats.iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or_else(|| DuelError::RenderError("Surface has no supported formats".to_string()))?;
        let alpha_mode = surface_caps.alpha_modes.first().copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        let primitives = PrimitiveRenderer::new(&device, &config)?;
        let camera = Camera::new(canvas_width, canvas_height);

        log::info!("Renderer ready: {:?}, {}x{}", surface_format, config.width, config.height);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            size,
            primitives,
            camera,
        })
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    pub fn primitives(&mut self) -> &mut PrimitiveRenderer {
        &mut self.primitives
    }

    pub fn present(&mut self, clear_color: Color) -> Result<(), DuelError> {
        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                self.resize(self.size);
                self.primitives.clear();
                return Ok(());
            }
            Err(e) => {
                self.primitives.clear();
                return Err(DuelError::RenderError(format!("Failed to get surface texture: {}", e)));
            }
        };

        let view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Render Encoder"),
        });

        self.primitives.upload(&self.queue, &self.camera);
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: clear_color[0] as f64,
                            g: clear_color[1] as f64,
                            b: clear_color[2] as f64,
                            a: clear_color[3] as f64,
                        }),
                        store: true,
                    },
                })],
                depth_stencil_attachment: None,
            });
            self.primitives.draw(&mut render_pass);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        self.primitives.clear();
        Ok(())
    }
}
