//! Vertex layouts
//!
//! Offsets are computed with `std::mem::offset_of!` so layouts follow the
//! struct definitions.

use drape_core::DrawVertex;

/// Creates a vertex attribute with the offset calculated from the struct field.
#[macro_export]
macro_rules! vertex_attr {
    ($struct:ty, $field:ident, $location:expr, $format:ident) => {
        wgpu::VertexAttribute {
            offset: std::mem::offset_of!($struct, $field) as u64,
            shader_location: $location,
            format: wgpu::VertexFormat::$format,
        }
    };
}

/// Creates a vertex buffer layout from attributes.
pub fn vertex_buffer_layout<T>(
    attributes: &[wgpu::VertexAttribute],
    step_mode: wgpu::VertexStepMode,
) -> wgpu::VertexBufferLayout<'_> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<T>() as u64,
        step_mode,
        attributes,
    }
}

/// Attributes of a line vertex: `Float32x2` position, `Float32x4` colour
pub const LINE_VERTEX_ATTRIBUTES: &[wgpu::VertexAttribute] = &[
    vertex_attr!(DrawVertex, position, 0, Float32x2),
    vertex_attr!(DrawVertex, color, 1, Float32x4),
];

/// Buffer layout for [`DrawVertex`]
pub fn line_vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    vertex_buffer_layout::<DrawVertex>(LINE_VERTEX_ATTRIBUTES, wgpu::VertexStepMode::Vertex)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_vertex_layout() {
        let layout = line_vertex_layout();
        assert_eq!(layout.array_stride, 24);
        assert_eq!(layout.attributes[0].offset, 0);
        assert_eq!(layout.attributes[1].offset, 8);
        assert_eq!(layout.attributes[1].format, wgpu::VertexFormat::Float32x4);
    }
}
