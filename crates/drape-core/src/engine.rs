//! Geometry engine capability interface
//!
//! The viewport never touches pattern geometry directly. Everything it needs
//! (hit-testing, live previews of an edit, committing the edit, and fresh
//! draw buffers) goes through [`GeometryEngine`].

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::bbox::WorldBBox;
use crate::constants::PRIMITIVE_RESTART;
use crate::settings::ViewMode;

/// Vertex of the line draw buffer: position followed by RGBA colour
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct DrawVertex {
    /// Position in world space
    pub position: [f32; 2],
    /// Vertex colour (RGBA)
    pub color: [f32; 4],
}

impl DrawVertex {
    pub fn new(position: Vec2, color: [f32; 4]) -> Self {
        Self {
            position: position.to_array(),
            color,
        }
    }
}

/// Vertex and index data for line-strip rendering.
///
/// Indices equal to [`PRIMITIVE_RESTART`] end the current strip.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawBuffers {
    pub vertices: Vec<DrawVertex>,
    pub indices: Vec<u32>,
}

impl DrawBuffers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if nothing would be drawn
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Append a vertex and return its index
    pub fn push_vertex(&mut self, vertex: DrawVertex) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(vertex);
        index
    }

    /// End the current line strip
    pub fn end_strip(&mut self) {
        self.indices.push(PRIMITIVE_RESTART);
    }

    /// Number of line strips in the buffer
    pub fn strip_count(&self) -> usize {
        self.indices
            .iter()
            .filter(|&&i| i == PRIMITIVE_RESTART)
            .count()
    }

    /// Raw vertex bytes for GPU upload
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Raw index bytes for GPU upload
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

/// Result of a box selection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoxSelection {
    /// Keys of the matched blocks
    pub keys: Vec<String>,
    /// Union bounding box of the matched blocks in world space
    pub bbox: Option<WorldBBox>,
}

impl BoxSelection {
    /// A selection that matched nothing
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns true if nothing was matched
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty() || self.bbox.is_none()
    }
}

/// Commands and queries the viewport issues against pattern geometry.
///
/// Preview calls only change transient display state; commit calls apply the
/// previewed edit to the geometry and reset the preview.
pub trait GeometryEngine {
    /// Select blocks under a world-space point
    fn select_by_point(&mut self, point: Vec2) -> Vec<String>;

    /// Select blocks intersecting the box spanned by two world-space corners
    fn select_by_box(&mut self, p1: Vec2, p2: Vec2) -> BoxSelection;

    /// Clear the current selection
    fn reset_selection(&mut self);

    /// Preview moving the selection by `delta`
    fn preview_offset(&mut self, delta: Vec2);

    /// Apply the previewed offset
    fn commit_offset(&mut self);

    /// Preview scaling the selection about `anchor`
    fn preview_scale(&mut self, scale: Vec2, flip_x: bool, flip_y: bool, anchor: Vec2);

    /// Apply the previewed scale
    fn commit_scale(&mut self);

    /// Preview rotating the selection about `center` by `angle` radians
    fn preview_rotation(&mut self, center: Vec2, angle: f32);

    /// Apply the previewed rotation and return the new selection bounds
    fn commit_rotation(&mut self) -> Option<WorldBBox>;

    /// Switch the drawn view. Implementations reset the selection.
    fn set_view(&mut self, view: ViewMode);

    /// Build draw buffers for the current state, previews included
    fn recompute_draw_buffers(&self) -> DrawBuffers;
}
