//! Main renderer
//!
//! Owns the camera uniform and the line renderer, and draws one frame into
//! a colour target.

use drape_core::DrawBuffers;
use glam::Mat4;
use wgpu::util::DeviceExt;

use crate::camera::CameraUniform;
use crate::config::ViewportConfig;
use crate::pipeline::create_camera_bind_group_layout;
use crate::sub_renderers::LineRenderer;

/// Main renderer
pub struct Renderer {
    camera_buffer: wgpu::Buffer,
    line_renderer: LineRenderer,
    clear_color: wgpu::Color,
    format: wgpu::TextureFormat,
}

impl Renderer {
    /// Creates a new renderer for targets of the given format.
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        config: &ViewportConfig,
    ) -> Self {
        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[CameraUniform::new(Mat4::IDENTITY)]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let camera_bind_group_layout = create_camera_bind_group_layout(device);
        let line_renderer =
            LineRenderer::new(device, format, &camera_bind_group_layout, &camera_buffer);

        Self {
            camera_buffer,
            line_renderer,
            clear_color: config.clear_color(),
            format,
        }
    }

    /// Returns the texture format used by the renderer.
    pub fn format(&self) -> wgpu::TextureFormat {
        self.format
    }

    /// Write a new view-projection matrix to the camera uniform
    pub fn update_camera(&self, queue: &wgpu::Queue, view_proj: Mat4) {
        queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[CameraUniform::new(view_proj)]),
        );
    }

    /// Replace the drawn geometry
    pub fn upload(&mut self, device: &wgpu::Device, buffers: &DrawBuffers) {
        self.line_renderer.upload(device, buffers);
    }

    /// Render the pattern into `view`.
    pub fn render(&self, encoder: &mut wgpu::CommandEncoder, view: &wgpu::TextureView) {
        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Main Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(self.clear_color),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        self.line_renderer.render(&mut render_pass);
    }
}
