//! Named groups of entities

use glam::Vec2;

use super::document::{BlockDoc, parse_layer};
use super::entity::Entity;
use super::PatternError;
use crate::bbox::WorldBBox;
use crate::engine::DrawBuffers;
use crate::settings::DisplaySettings;

/// A block definition in local coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub name: String,
    pub layer: i32,
    pub centroid: Vec2,
    pub entities: Vec<Entity>,
    bounding_box: Option<WorldBBox>,
    highlighted: bool,
}

impl Block {
    pub fn new(name: impl Into<String>, layer: i32, centroid: Vec2) -> Self {
        Self {
            name: name.into(),
            layer,
            centroid,
            entities: Vec::new(),
            bounding_box: None,
            highlighted: false,
        }
    }

    /// Build a block from its payload, skipping invalid entities
    pub fn from_doc(name: &str, doc: &BlockDoc) -> Result<Self, PatternError> {
        let layer = parse_layer(&doc.layer)?;
        let mut block = Self::new(name, layer, doc.centroid.into());

        for entity_doc in &doc.entities {
            match Entity::from_doc(entity_doc, layer) {
                Ok(entity) => block.entities.push(entity),
                Err(e) => tracing::warn!("Skipping entity in block {}: {}", name, e),
            }
        }

        block.update_bounding_box();
        Ok(block)
    }

    /// Add an entity and refresh the bounding box
    pub fn push(&mut self, entity: Entity) {
        self.entities.push(entity);
        self.update_bounding_box();
    }

    /// Recompute the cached local bounding box
    pub fn update_bounding_box(&mut self) {
        self.bounding_box = self
            .entities
            .iter()
            .filter_map(Entity::bounding_box)
            .reduce(|a, b| a.union(&b));
    }

    /// Local bounding box, `None` for a block without geometry
    pub fn bounding_box(&self) -> Option<WorldBBox> {
        self.bounding_box
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    pub fn set_highlighted(&mut self, highlighted: bool) {
        self.highlighted = highlighted;
    }

    /// Apply `f` to every entity vertex
    pub fn map_vertices(&mut self, f: impl Fn(Vec2) -> Vec2) {
        for entity in &mut self.entities {
            entity.map_vertices(&f);
        }
        self.update_bounding_box();
    }

    /// Collect the layers used by this block and its entities into `out`
    pub fn collect_layers(&self, out: &mut Vec<i32>) {
        for layer in std::iter::once(self.layer).chain(self.entities.iter().map(|e| e.layer)) {
            if !out.contains(&layer) {
                out.push(layer);
            }
        }
    }

    /// Append the enabled entities to the draw buffers.
    ///
    /// Returns the number of entities drawn.
    pub fn draw(
        &self,
        to_world: impl Fn(Vec2) -> Vec2,
        settings: &DisplaySettings,
        buffers: &mut DrawBuffers,
    ) -> usize {
        let mut drawn = 0;
        for entity in &self.entities {
            if !settings.is_layer_enabled(entity.layer) {
                continue;
            }
            let color = settings.color_for(entity.layer, false, self.highlighted);
            entity.draw(&to_world, color, settings.cross_size, buffers);
            drawn += 1;
        }
        drawn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::HIGHLIGHT_COLOR;
    use crate::pattern::entity::EntityKind;
    use uuid::Uuid;

    fn line(layer: i32, a: Vec2, b: Vec2) -> Entity {
        Entity {
            id: Uuid::new_v4(),
            layer,
            kind: EntityKind::Line,
            vertices: vec![a, b],
        }
    }

    #[test]
    fn test_bounding_box_tracks_entities() {
        let mut block = Block::new("A", 0, Vec2::ZERO);
        assert!(block.bounding_box().is_none());

        block.push(line(0, Vec2::new(-5.0, -5.0), Vec2::new(5.0, 0.0)));
        block.push(line(0, Vec2::new(0.0, 0.0), Vec2::new(1.0, 5.0)));
        assert_eq!(
            block.bounding_box().unwrap().as_rows(),
            [[-5.0, 5.0], [-5.0, 5.0]]
        );

        block.map_vertices(|v| v * 2.0);
        assert_eq!(
            block.bounding_box().unwrap().as_rows(),
            [[-10.0, 10.0], [-10.0, 10.0]]
        );
    }

    #[test]
    fn test_draw_skips_disabled_layers() {
        let mut block = Block::new("A", 0, Vec2::ZERO);
        block.push(line(1, Vec2::ZERO, Vec2::ONE));
        block.push(line(2, Vec2::ZERO, Vec2::ONE));

        let mut settings = DisplaySettings::default();
        settings.disable_layer(2);

        let mut buffers = DrawBuffers::new();
        assert_eq!(block.draw(|v| v, &settings, &mut buffers), 1);
        assert_eq!(buffers.vertices.len(), 2);
    }

    #[test]
    fn test_highlighted_block_uses_highlight_color() {
        let mut block = Block::new("A", 0, Vec2::ZERO);
        block.push(line(0, Vec2::ZERO, Vec2::ONE));
        block.set_highlighted(true);

        let mut buffers = DrawBuffers::new();
        block.draw(|v| v, &DisplaySettings::default(), &mut buffers);
        assert!(buffers.vertices.iter().all(|v| v.color == HIGHLIGHT_COLOR));
    }

    #[test]
    fn test_collect_layers() {
        let mut block = Block::new("A", 3, Vec2::ZERO);
        block.push(line(1, Vec2::ZERO, Vec2::ONE));
        block.push(line(3, Vec2::ZERO, Vec2::ONE));
        let mut layers = Vec::new();
        block.collect_layers(&mut layers);
        assert_eq!(layers, vec![3, 1]);
    }
}
