//! WebGPU surface renderer
//!
//! One flat-color triangle-list pipeline; the whole court is a single
//! draw from a persistent vertex buffer rewritten each frame.

use super::vertex::{Vertex, colors};
use crate::consts::{COURT_HEIGHT, COURT_WIDTH};

/// Vertex capacity the buffer starts with; grows if a scene outruns it
const INITIAL_VERTEX_CAPACITY: u64 = 256;

/// Convert court coordinates to normalized device coordinates
///
/// Court coords have the origin at the top-left with y down; NDC is
/// -1..1 with y up. The court keeps its aspect ratio: the tighter
/// surface axis maps edge to edge and the other is letterboxed.
pub fn court_to_ndc(size: (u32, u32), x: f32, y: f32) -> (f32, f32) {
    let (w, h) = size;
    let aspect = w as f32 / h as f32;
    let court_aspect = COURT_WIDTH / COURT_HEIGHT;

    // Center the court and flip y
    let cx = (x - COURT_WIDTH / 2.0) / (COURT_WIDTH / 2.0);
    let cy = (COURT_HEIGHT / 2.0 - y) / (COURT_HEIGHT / 2.0);

    if aspect > court_aspect {
        // Surface wider than the court
        (cx * court_aspect / aspect, cy)
    } else {
        // Surface taller than the court
        (cx, cy * aspect / court_aspect)
    }
}

/// GPU state for drawing the court onto one surface
pub struct CourtRenderer {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    /// Capacity of `vertex_buffer`, in vertices
    buffer_capacity: u64,
    vertex_count: u32,
    /// Surface size in physical pixels
    pub size: (u32, u32),
}

impl CourtRenderer {
    pub async fn new(
        surface: wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
    ) -> Result<Self, wgpu::RequestDeviceError> {
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("court-device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                memory_hints: Default::default(),
                trace: Default::default(),
                experimental_features: Default::default(),
            })
            .await?;

        let caps = surface.get_capabilities(adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("court-shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
        });

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("court-pipeline-layout"),
            bind_group_layouts: &[],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("court-pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let vertex_buffer = Self::make_vertex_buffer(&device, INITIAL_VERTEX_CAPACITY);

        log::info!("render pipeline ready ({width}x{height}, {format:?})");

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            vertex_buffer,
            buffer_capacity: INITIAL_VERTEX_CAPACITY,
            vertex_count: 0,
            size: (width, height),
        })
    }

    fn make_vertex_buffer(device: &wgpu::Device, capacity: u64) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("court-vertices"),
            size: capacity * std::mem::size_of::<Vertex>() as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        if new_width > 0 && new_height > 0 {
            self.size = (new_width, new_height);
            self.config.width = new_width;
            self.config.height = new_height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Upload this frame's scene and draw it
    pub fn render(&mut self, vertices: &[Vertex]) -> Result<(), wgpu::SurfaceError> {
        // The NDC mapping happens on the CPU: the scene is a few dozen
        // quads, so there is nothing worth pushing into a uniform
        let ndc: Vec<Vertex> = vertices
            .iter()
            .map(|v| {
                let (x, y) = court_to_ndc(self.size, v.position[0], v.position[1]);
                Vertex::new(x, y, v.color)
            })
            .collect();

        if ndc.len() as u64 > self.buffer_capacity {
            self.buffer_capacity = (ndc.len() as u64).next_power_of_two();
            self.vertex_buffer = Self::make_vertex_buffer(&self.device, self.buffer_capacity);
        }
        self.queue
            .write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&ndc));
        self.vertex_count = ndc.len() as u32;

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("court-encoder"),
            });

        {
            let [r, g, b, a] = colors::BACKGROUND.map(f64::from);
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("court-pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            pass.set_pipeline(&self.pipeline);
            pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            pass.draw(0..self.vertex_count, 0..1);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        frame.present();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_court_to_ndc_exact_fit() {
        let size = (800, 500);
        assert_eq!(court_to_ndc(size, 0.0, 0.0), (-1.0, 1.0));
        assert_eq!(court_to_ndc(size, 800.0, 500.0), (1.0, -1.0));
        assert_eq!(court_to_ndc(size, 400.0, 250.0), (0.0, 0.0));
    }

    #[test]
    fn test_court_to_ndc_pillarboxes_wide_surface() {
        // Twice as wide as the court: x shrinks to the middle half
        let (x, y) = court_to_ndc((3200, 1000), 800.0, 250.0);
        assert!((x - 0.5).abs() < 0.001);
        assert!(y.abs() < 0.001);
    }

    #[test]
    fn test_court_to_ndc_letterboxes_tall_surface() {
        // Twice as tall as the court: y shrinks to the middle half
        let (x, y) = court_to_ndc((800, 1000), 400.0, 0.0);
        assert!(x.abs() < 0.001);
        assert!((y - 0.5).abs() < 0.001);
    }
}
