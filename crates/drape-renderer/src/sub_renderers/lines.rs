//! Pattern line renderer

use drape_core::DrawBuffers;
use wgpu::util::DeviceExt;

use crate::pipeline::{PipelineConfig, create_camera_bind_group};
use crate::vertex::line_vertex_layout;

/// Renders draw buffers as line strips with primitive restart
pub struct LineRenderer {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: Option<wgpu::Buffer>,
    index_buffer: Option<wgpu::Buffer>,
    index_count: u32,
    bind_group: wgpu::BindGroup,
}

impl LineRenderer {
    /// Creates a new line renderer.
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        camera_bind_group_layout: &wgpu::BindGroupLayout,
        camera_buffer: &wgpu::Buffer,
    ) -> Self {
        let bind_group =
            create_camera_bind_group(device, camera_bind_group_layout, camera_buffer, "Lines");

        let pipeline = PipelineConfig::new(
            "Lines",
            include_str!("../shaders/lines.wgsl"),
            format,
            &[camera_bind_group_layout],
        )
        .with_vertex_layouts(vec![line_vertex_layout()])
        .with_topology(wgpu::PrimitiveTopology::LineStrip)
        .with_strip_index_format(wgpu::IndexFormat::Uint32)
        .build(device);

        Self {
            pipeline,
            vertex_buffer: None,
            index_buffer: None,
            index_count: 0,
            bind_group,
        }
    }

    /// Replace the GPU buffers with new draw buffers
    pub fn upload(&mut self, device: &wgpu::Device, buffers: &DrawBuffers) {
        if buffers.is_empty() || buffers.vertices.is_empty() {
            self.clear();
            return;
        }

        self.vertex_buffer = Some(device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Lines Vertex Buffer"),
            contents: buffers.vertex_bytes(),
            usage: wgpu::BufferUsages::VERTEX,
        }));
        self.index_buffer = Some(device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Lines Index Buffer"),
            contents: buffers.index_bytes(),
            usage: wgpu::BufferUsages::INDEX,
        }));
        self.index_count = buffers.indices.len() as u32;
        tracing::debug!(
            "Uploaded {} vertices, {} indices",
            buffers.vertices.len(),
            self.index_count
        );
    }

    /// Drop all geometry
    fn clear(&mut self) {
        self.vertex_buffer = None;
        self.index_buffer = None;
        self.index_count = 0;
    }

    /// Renders the uploaded line strips.
    pub fn render<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>) {
        let (Some(vertex_buffer), Some(index_buffer)) = (&self.vertex_buffer, &self.index_buffer)
        else {
            return;
        };
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.bind_group, &[]);
        render_pass.set_vertex_buffer(0, vertex_buffer.slice(..));
        render_pass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}
