//! Drawable entities inside a block

use glam::Vec2;
use uuid::Uuid;

use super::PatternError;
use super::document::{EntityDoc, parse_layer};
use crate::bbox::WorldBBox;
use crate::constants::CROSS_SHADE;
use crate::engine::{DrawBuffers, DrawVertex};
use crate::settings::Rgba;

/// Entity geometry type
#[derive(Debug, Clone, PartialEq)]
pub enum EntityKind {
    Point,
    Line,
    Polyline { closed: bool },
    Text { height: f32, text: String },
}

impl EntityKind {
    /// Payload type name
    pub fn type_name(&self) -> &'static str {
        match self {
            EntityKind::Point => "POINT",
            EntityKind::Line => "LINE",
            EntityKind::Polyline { .. } => "POLYLINE",
            EntityKind::Text { .. } => "TEXT",
        }
    }
}

/// A single entity in block-local coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub id: Uuid,
    pub layer: i32,
    pub kind: EntityKind,
    pub vertices: Vec<Vec2>,
}

/// Parse an entity index: 32 hex digits, dashes ignored
pub fn parse_entity_id(index: &str) -> Option<Uuid> {
    let trimmed = index.replace('-', "");
    if trimmed.len() != 32 {
        return None;
    }
    Uuid::parse_str(&trimmed).ok()
}

impl Entity {
    /// Build an entity from its payload. Entities without a layer inherit
    /// the block layer.
    pub fn from_doc(doc: &EntityDoc, block_layer: i32) -> Result<Self, PatternError> {
        let index = doc.entity_index.as_deref().unwrap_or_default();
        let id = parse_entity_id(index)
            .ok_or_else(|| PatternError::InvalidEntity(format!("invalid entity id '{}'", index)))?;

        let layer = match &doc.layer {
            Some(layer) => parse_layer(layer)?,
            None => block_layer,
        };

        let invalid = |what: &str| PatternError::InvalidEntity(format!("{} {}", what, index));

        let (kind, vertices) = match doc.entity_type.as_str() {
            "POINT" => {
                let position = doc.position.ok_or_else(|| invalid("no position defined"))?;
                (EntityKind::Point, vec![position.into()])
            }
            "LINE" | "LWLINE" => {
                let vertices = doc
                    .vertices
                    .as_ref()
                    .filter(|v| v.len() == 2)
                    .ok_or_else(|| invalid("invalid line vertices"))?;
                (EntityKind::Line, vertices.iter().map(|&v| v.into()).collect())
            }
            "POLYLINE" | "LWPOLYLINE" => {
                let vertices = doc
                    .vertices
                    .as_ref()
                    .filter(|v| !v.is_empty())
                    .ok_or_else(|| invalid("invalid polyline vertices"))?;
                (
                    EntityKind::Polyline {
                        closed: doc.shape.unwrap_or(false),
                    },
                    vertices.iter().map(|&v| v.into()).collect(),
                )
            }
            "TEXT" => match (doc.start_point, doc.text_height, &doc.text) {
                (Some(start), Some(height), Some(text)) => (
                    EntityKind::Text {
                        height,
                        text: text.clone(),
                    },
                    vec![start.into()],
                ),
                _ => return Err(invalid("invalid text entity")),
            },
            other => {
                return Err(PatternError::InvalidEntity(format!(
                    "invalid entity type {}",
                    other
                )));
            }
        };

        Ok(Self {
            id,
            layer,
            kind,
            vertices,
        })
    }

    /// Whether the outline is closed back to its first vertex
    pub fn is_closed(&self) -> bool {
        matches!(self.kind, EntityKind::Polyline { closed: true })
    }

    /// Local bounding box
    pub fn bounding_box(&self) -> Option<WorldBBox> {
        WorldBBox::from_points(self.vertices.iter().copied())
    }

    /// Replace every vertex with `f(vertex)`
    pub fn map_vertices(&mut self, f: impl Fn(Vec2) -> Vec2) {
        for v in &mut self.vertices {
            *v = f(*v);
        }
    }

    /// Append this entity to the draw buffers.
    ///
    /// Single-vertex entities are drawn as a cross; everything else as one
    /// line strip.
    pub fn draw(
        &self,
        to_world: impl Fn(Vec2) -> Vec2,
        color: Rgba,
        cross_size: f32,
        buffers: &mut DrawBuffers,
    ) {
        match self.vertices.as_slice() {
            [] => {}
            [single] => draw_cross(to_world(*single), color, cross_size, buffers),
            vertices => {
                let first = buffers.vertices.len() as u32;
                for &v in vertices {
                    let index = buffers.push_vertex(DrawVertex::new(to_world(v), color));
                    buffers.indices.push(index);
                }
                if self.is_closed() {
                    buffers.indices.push(first);
                }
                buffers.end_strip();
            }
        }
    }
}

fn shade(color: Rgba, delta: f32) -> Rgba {
    [
        (color[0] + delta).clamp(0.0, 1.0),
        (color[1] + delta).clamp(0.0, 1.0),
        (color[2] + delta).clamp(0.0, 1.0),
        color[3],
    ]
}

fn draw_cross(center: Vec2, color: Rgba, size: f32, buffers: &mut DrawBuffers) {
    let a = buffers.push_vertex(DrawVertex::new(
        center + Vec2::new(-size, -size),
        shade(color, -CROSS_SHADE),
    ));
    let b = buffers.push_vertex(DrawVertex::new(
        center + Vec2::new(size, size),
        shade(color, CROSS_SHADE),
    ));
    buffers.indices.extend([a, b]);
    buffers.end_strip();

    let c = buffers.push_vertex(DrawVertex::new(center + Vec2::new(size, -size), color));
    let d = buffers.push_vertex(DrawVertex::new(center + Vec2::new(-size, size), color));
    buffers.indices.extend([c, d]);
    buffers.end_strip();
}
