//! In-memory pattern model and its geometry engine
//!
//! A pattern is a set of named [`Block`]s placed in the model by inserts.
//! Selection works per block: selecting highlights every entity of the
//! matched blocks, and edit previews are applied to highlighted blocks only.

mod block;
mod document;
mod entity;

pub use block::Block;
pub use document::{BlockDoc, EntityDoc, InsertDoc, PatternDoc, PatternDocument, VertexDoc, parse_layer};
pub use entity::{Entity, EntityKind, parse_entity_id};

use glam::Vec2;

use crate::bbox::WorldBBox;
use crate::engine::{BoxSelection, DrawBuffers, GeometryEngine};
use crate::highlight::HighlightTransform;
use crate::settings::{ColorError, DisplaySettings, ViewMode};

/// Pattern loading and lookup errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Invalid layer: {0}")]
    InvalidLayer(String),
    #[error("Invalid entity: {0}")]
    InvalidEntity(String),
    #[error("Unknown block: {0}")]
    UnknownBlock(String),
}

/// Placement of a block in the model view
#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    pub block: String,
    pub layer: i32,
    pub position: Vec2,
}

/// Pattern document with selection and preview state
#[derive(Debug, Clone, Default)]
pub struct Pattern {
    blocks: Vec<Block>,
    inserts: Vec<Insert>,
    settings: DisplaySettings,
    preview: HighlightTransform,
}

impl Pattern {
    /// Create an empty pattern
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a pattern from its JSON payload.
    ///
    /// Blocks and inserts with a non-integer layer, inserts of unknown
    /// blocks, and invalid entities are skipped.
    pub fn from_json(payload: &str) -> Result<Self, PatternError> {
        let document = PatternDocument::from_json(payload)?;
        let doc = document.pattern_json;
        let mut pattern = Self::new();

        // Sorted for a stable draw order
        let mut names: Vec<&String> = doc.blocks.keys().collect();
        names.sort();
        for name in names {
            match Block::from_doc(name, &doc.blocks[name]) {
                Ok(block) => pattern.blocks.push(block),
                Err(e) => tracing::warn!("Skipping block {}: {}", name, e),
            }
        }

        for insert in doc.entities.iter().filter(|e| e.entity_type == "INSERT") {
            let result = parse_layer(&insert.layer)
                .and_then(|layer| pattern.add_insert(&insert.name, layer, insert.position.into()));
            if let Err(e) = result {
                tracing::warn!("Skipping insert of {}: {}", insert.name, e);
            }
        }

        tracing::info!(
            "Loaded pattern with {} blocks, {} inserts, {} entities",
            pattern.blocks.len(),
            pattern.inserts.len(),
            pattern.entity_count()
        );
        Ok(pattern)
    }

    /// Replace the display settings
    pub fn with_settings(mut self, settings: DisplaySettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &DisplaySettings {
        &self.settings
    }

    /// Current edit preview
    pub fn preview(&self) -> &HighlightTransform {
        &self.preview
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn inserts(&self) -> &[Insert] {
        &self.inserts
    }

    /// Place an existing block in the model
    pub fn add_insert(&mut self, block: &str, layer: i32, position: Vec2) -> Result<(), PatternError> {
        if self.block(block).is_none() {
            return Err(PatternError::UnknownBlock(block.to_string()));
        }
        self.inserts.push(Insert {
            block: block.to_string(),
            layer,
            position,
        });
        Ok(())
    }

    pub fn block(&self, name: &str) -> Option<&Block> {
        self.blocks.iter().find(|b| b.name == name)
    }

    /// Model offset of a block: its first insert, or the origin if it has
    /// none. Every insert of a block moves together, so the first one
    /// stands for all of them.
    pub fn offset_for(&self, name: &str) -> Vec2 {
        self.inserts
            .iter()
            .find(|i| i.block == name)
            .map(|i| i.position)
            .unwrap_or(Vec2::ZERO)
    }

    /// Indices and offsets of the blocks drawn in the current view
    fn visible_blocks(&self) -> Vec<(usize, Vec2)> {
        match self.settings.view.block_key() {
            Some(key) => self
                .blocks
                .iter()
                .position(|b| b.name == key)
                .map(|i| vec![(i, Vec2::ZERO)])
                .unwrap_or_default(),
            None => self
                .blocks
                .iter()
                .enumerate()
                .map(|(i, b)| (i, self.offset_for(&b.name)))
                .collect(),
        }
    }

    fn highlighted_blocks(&self) -> Vec<(usize, Vec2)> {
        self.visible_blocks()
            .into_iter()
            .filter(|&(i, _)| self.blocks[i].is_highlighted())
            .collect()
    }

    /// All layers used in the pattern, sorted
    pub fn layers(&self) -> Vec<i32> {
        let mut layers = Vec::new();
        for block in &self.blocks {
            block.collect_layers(&mut layers);
        }
        layers.sort_unstable();
        layers
    }

    /// All block names, sorted
    pub fn block_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.blocks.iter().map(|b| b.name.clone()).collect();
        names.sort();
        names
    }

    /// Total number of entities across all blocks
    pub fn entity_count(&self) -> usize {
        self.blocks.iter().map(|b| b.entities.len()).sum()
    }

    /// Number of drawn entities inside the highlighted selection
    pub fn highlighted_entity_count(&self) -> usize {
        self.highlighted_blocks()
            .into_iter()
            .map(|(i, _)| {
                self.blocks[i]
                    .entities
                    .iter()
                    .filter(|e| self.settings.is_layer_enabled(e.layer))
                    .count()
            })
            .sum()
    }

    /// World bounding box of the highlighted blocks, without preview
    pub fn highlighted_bbox(&self) -> Option<WorldBBox> {
        self.highlighted_blocks()
            .into_iter()
            .filter_map(|(i, offset)| self.blocks[i].bounding_box().map(|b| b.offset(offset)))
            .reduce(|a, b| a.union(&b))
    }

    pub fn view(&self) -> &ViewMode {
        &self.settings.view
    }

    /// Switch the view, failing for a block view of an unknown block
    pub fn try_set_view(&mut self, view: ViewMode) -> Result<(), PatternError> {
        if let Some(key) = view.block_key() {
            if self.block(key).is_none() {
                return Err(PatternError::UnknownBlock(key.to_string()));
            }
        }
        tracing::debug!("View set to {}", view.name());
        self.settings.view = view;
        self.reset_selection();
        Ok(())
    }

    /// Set a layer colour from a `#RRGGBBAA` string
    pub fn set_layer_color(&mut self, layer: i32, hex: &str) -> Result<(), ColorError> {
        self.settings.set_layer_color(layer, hex)
    }

    pub fn disable_layer(&mut self, layer: i32) {
        self.settings.disable_layer(layer);
    }

    pub fn enable_layer(&mut self, layer: i32) {
        self.settings.enable_layer(layer);
    }

    fn highlight_only(&mut self, keys: &[String]) {
        for block in &mut self.blocks {
            let highlighted = keys.contains(&block.name);
            block.set_highlighted(highlighted);
        }
    }

    /// Apply a world-space mapping to the vertices of every highlighted block
    fn map_highlighted(&mut self, f: impl Fn(Vec2) -> Vec2) {
        for (i, offset) in self.highlighted_blocks() {
            self.blocks[i].map_vertices(|v| f(v + offset) - offset);
        }
    }
}

impl GeometryEngine for Pattern {
    fn select_by_point(&mut self, point: Vec2) -> Vec<String> {
        let threshold = self.settings.point_threshold;
        let keys: Vec<String> = self
            .visible_blocks()
            .into_iter()
            .filter(|&(i, offset)| {
                self.blocks[i]
                    .bounding_box()
                    .is_some_and(|b| b.contains_point(point - offset, threshold))
            })
            .map(|(i, _)| self.blocks[i].name.clone())
            .collect();

        self.highlight_only(&keys);
        tracing::debug!("Point select at {:?} matched {:?}", point, keys);
        keys
    }

    fn select_by_box(&mut self, p1: Vec2, p2: Vec2) -> BoxSelection {
        let Some(area) = WorldBBox::from_corners(p1, p2) else {
            self.highlight_only(&[]);
            return BoxSelection::empty();
        };

        let mut selection = BoxSelection::empty();
        for (i, offset) in self.visible_blocks() {
            let Some(bbox) = self.blocks[i].bounding_box().map(|b| b.offset(offset)) else {
                continue;
            };
            if bbox.intersects(&area) {
                selection.keys.push(self.blocks[i].name.clone());
                selection.bbox = Some(match selection.bbox {
                    Some(union) => union.union(&bbox),
                    None => bbox,
                });
            }
        }

        self.highlight_only(&selection.keys);
        tracing::debug!("Box select matched {:?}", selection.keys);
        selection
    }

    fn reset_selection(&mut self) {
        self.highlight_only(&[]);
        self.preview = HighlightTransform::default();
    }

    fn preview_offset(&mut self, delta: Vec2) {
        self.preview.offset = delta;
    }

    fn commit_offset(&mut self) {
        let delta = self.preview.offset;
        let model_view = self.settings.view.block_key().is_none();

        for (i, _) in self.highlighted_blocks() {
            let name = &self.blocks[i].name;
            let mut moved = false;
            if model_view {
                for insert in self.inserts.iter_mut().filter(|ins| &ins.block == name) {
                    insert.position += delta;
                    moved = true;
                }
            }
            if !moved {
                self.blocks[i].map_vertices(|v| v + delta);
            }
        }

        self.preview.reset_offset();
    }

    fn preview_scale(&mut self, scale: Vec2, flip_x: bool, flip_y: bool, anchor: Vec2) {
        self.preview.scale = scale;
        self.preview.flip_x = flip_x;
        self.preview.flip_y = flip_y;
        self.preview.anchor = anchor;
    }

    fn commit_scale(&mut self) {
        let preview = self.preview;
        self.map_highlighted(|w| preview.apply_scale(w));
        self.preview.reset_scale();
    }

    fn preview_rotation(&mut self, center: Vec2, angle: f32) {
        self.preview.rotation_center = center;
        self.preview.angle = angle;
    }

    fn commit_rotation(&mut self) -> Option<WorldBBox> {
        let preview = self.preview;
        self.map_highlighted(|w| preview.apply_rotation(w));
        self.preview.reset_rotation();
        self.highlighted_bbox()
    }

    fn set_view(&mut self, view: ViewMode) {
        if let Err(e) = self.try_set_view(view) {
            tracing::warn!("View not changed: {}", e);
        }
    }

    fn recompute_draw_buffers(&self) -> DrawBuffers {
        let mut buffers = DrawBuffers::new();
        for (i, offset) in self.visible_blocks() {
            let block = &self.blocks[i];
            let preview = block.is_highlighted().then_some(self.preview);
            block.draw(
                |v| {
                    let world = v + offset;
                    match &preview {
                        Some(p) => p.apply(world),
                        None => world,
                    }
                },
                &self.settings,
                &mut buffers,
            );
        }
        buffers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    fn square_block(name: &str, half: f32) -> String {
        format!(
            r#""{name}": {{
                "entities": [{{
                    "entity_type": "LWPOLYLINE", "layer": "1", "shape": true,
                    "entity_index": "0123456789abcdef0123456789abcdef",
                    "vertices": [
                        {{"x": -{half}, "y": -{half}}}, {{"x": {half}, "y": -{half}}},
                        {{"x": {half}, "y": {half}}}, {{"x": -{half}, "y": {half}}}
                    ]
                }}],
                "centroid": {{"x": 0.0, "y": 0.0}},
                "layer": "1"
            }}"#
        )
    }

    fn pattern_json(blocks: &[String], inserts: &str) -> String {
        format!(
            r#"{{"pattern_json": {{"blocks": {{{}}}, "entities": [{}]}}}}"#,
            blocks.join(","),
            inserts
        )
    }

    fn block1_pattern() -> Pattern {
        let json = pattern_json(
            &[square_block("block1", 5.0)],
            r#"{"entity_type": "INSERT", "name": "block1", "position": {"x": 0.0, "y": 0.0}, "layer": "1"}"#,
        );
        Pattern::from_json(&json).unwrap()
    }

    #[test]
    fn test_box_select_single_block() {
        let mut pattern = block1_pattern();
        let selection = pattern.select_by_box(Vec2::new(-10.0, -10.0), Vec2::new(10.0, 10.0));
        assert_eq!(selection.keys, vec!["block1".to_string()]);
        assert_eq!(
            selection.bbox.unwrap().as_rows(),
            [[-5.0, 5.0], [-5.0, 5.0]]
        );
        assert!(pattern.blocks()[0].is_highlighted());
        assert_eq!(pattern.highlighted_entity_count(), 1);
    }

    #[test]
    fn test_zero_area_box_selects_nothing() {
        let mut pattern = block1_pattern();
        pattern.select_by_box(Vec2::new(-10.0, -10.0), Vec2::new(10.0, 10.0));

        let p = Vec2::new(1.0, 1.0);
        let selection = pattern.select_by_box(p, p);
        assert!(selection.keys.is_empty());
        assert!(selection.bbox.is_none());
        assert!(!pattern.blocks()[0].is_highlighted());
    }

    #[test]
    fn test_select_by_point_uses_threshold_and_insert() {
        let json = pattern_json(
            &[square_block("A", 1.0), square_block("B", 1.0)],
            r#"{"entity_type": "INSERT", "name": "B", "position": {"x": 100.0, "y": 0.0}, "layer": "1"}"#,
        );
        let mut pattern = Pattern::from_json(&json).unwrap();

        assert_eq!(pattern.select_by_point(Vec2::new(4.5, 0.0)), vec!["A".to_string()]);
        assert_eq!(pattern.select_by_point(Vec2::new(100.0, 0.0)), vec!["B".to_string()]);
        assert!(pattern.select_by_point(Vec2::new(50.0, 0.0)).is_empty());
    }

    #[test]
    fn test_invalid_parts_are_skipped() {
        let bad_layer = r#""bad": {"entities": [], "centroid": {"x": 0.0, "y": 0.0}, "layer": "cut"}"#;
        let json = pattern_json(
            &[square_block("A", 1.0), bad_layer.to_string()],
            r#"{"entity_type": "INSERT", "name": "missing", "position": {"x": 1.0, "y": 0.0}, "layer": "1"}"#,
        );
        let pattern = Pattern::from_json(&json).unwrap();
        assert_eq!(pattern.block_names(), vec!["A".to_string()]);
        assert!(pattern.inserts().is_empty());
        assert_eq!(pattern.layers(), vec![1]);
        assert_eq!(pattern.entity_count(), 1);
    }

    #[test]
    fn test_malformed_payload() {
        assert!(matches!(
            Pattern::from_json("not json"),
            Err(PatternError::Parse(_))
        ));
    }

    #[test]
    fn test_draw_buffers_idempotent() {
        let mut pattern = block1_pattern();
        pattern.select_by_box(Vec2::new(-10.0, -10.0), Vec2::new(10.0, 10.0));
        pattern.preview_offset(Vec2::new(1.0, 2.0));

        let first = pattern.recompute_draw_buffers();
        let second = pattern.recompute_draw_buffers();
        assert_eq!(first, second);
        assert_eq!(first.vertices.len(), 4);
        assert_eq!(first.indices.len(), 6);
    }

    #[test]
    fn test_preview_does_not_mutate_geometry() {
        let mut pattern = block1_pattern();
        pattern.select_by_box(Vec2::new(-10.0, -10.0), Vec2::new(10.0, 10.0));
        pattern.preview_offset(Vec2::new(2.0, 3.0));

        let buffers = pattern.recompute_draw_buffers();
        assert_eq!(buffers.vertices[0].position, [-3.0, -2.0]);
        assert_eq!(
            pattern.highlighted_bbox().unwrap().as_rows(),
            [[-5.0, 5.0], [-5.0, 5.0]]
        );
    }

    #[test]
    fn test_commit_offset_moves_insert() {
        let mut pattern = block1_pattern();
        pattern.select_by_box(Vec2::new(-10.0, -10.0), Vec2::new(10.0, 10.0));
        pattern.preview_offset(Vec2::new(2.0, 3.0));
        pattern.commit_offset();

        assert_eq!(pattern.offset_for("block1"), Vec2::new(2.0, 3.0));
        assert_eq!(pattern.preview().offset, Vec2::ZERO);
        assert_eq!(
            pattern.highlighted_bbox().unwrap().as_rows(),
            [[-3.0, 7.0], [-2.0, 8.0]]
        );
    }

    #[test]
    fn test_commit_offset_moves_every_insert() {
        let json = pattern_json(
            &[square_block("block1", 5.0)],
            r#"{"entity_type": "INSERT", "name": "block1", "position": {"x": 0.0, "y": 0.0}, "layer": "1"},
               {"entity_type": "INSERT", "name": "block1", "position": {"x": 20.0, "y": 0.0}, "layer": "1"}"#,
        );
        let mut pattern = Pattern::from_json(&json).unwrap();
        pattern.select_by_box(Vec2::new(-10.0, -10.0), Vec2::new(10.0, 10.0));
        pattern.preview_offset(Vec2::new(2.0, 3.0));
        pattern.commit_offset();

        let positions: Vec<Vec2> = pattern.inserts().iter().map(|i| i.position).collect();
        assert_eq!(positions, vec![Vec2::new(2.0, 3.0), Vec2::new(22.0, 3.0)]);
        // Entities stay in block coordinates
        assert_eq!(
            pattern.block("block1").unwrap().bounding_box().unwrap().as_rows(),
            [[-5.0, 5.0], [-5.0, 5.0]]
        );
    }

    #[test]
    fn test_commit_offset_in_block_view_moves_entities() {
        let mut pattern = block1_pattern();
        pattern.try_set_view(ViewMode::Block("block1".to_string())).unwrap();
        pattern.select_by_box(Vec2::new(-10.0, -10.0), Vec2::new(10.0, 10.0));
        pattern.preview_offset(Vec2::new(1.0, 0.0));
        pattern.commit_offset();

        assert_eq!(pattern.offset_for("block1"), Vec2::ZERO);
        assert_eq!(
            pattern.blocks()[0].bounding_box().unwrap().as_rows(),
            [[-4.0, 6.0], [-5.0, 5.0]]
        );
    }

    #[test]
    fn test_commit_scale_about_anchor() {
        let json = pattern_json(
            &[square_block("block1", 5.0)],
            r#"{"entity_type": "INSERT", "name": "block1", "position": {"x": 10.0, "y": 0.0}, "layer": "1"}"#,
        );
        let mut pattern = Pattern::from_json(&json).unwrap();
        pattern.select_by_box(Vec2::new(0.0, -10.0), Vec2::new(20.0, 10.0));

        // Anchor is the world-space top-right of [[5, 15], [-5, 5]]
        pattern.preview_scale(Vec2::new(2.0, 1.0), false, false, Vec2::new(15.0, -5.0));
        pattern.commit_scale();

        let bbox = pattern.highlighted_bbox().unwrap();
        assert_relative_eq!(bbox.min.x, 2.0 * (5.0 - 15.0) + 15.0);
        assert_relative_eq!(bbox.max.x, 15.0);
        assert_relative_eq!(bbox.min.y, -5.0);
        assert_relative_eq!(bbox.max.y, 5.0);
        assert_eq!(pattern.preview().scale, Vec2::ONE);
    }

    #[test]
    fn test_commit_rotation_returns_bbox() {
        let json = pattern_json(
            &[r#""bar": {
                "entities": [{
                    "entity_type": "LINE", "entity_index": "0123456789abcdef0123456789abcdef",
                    "vertices": [{"x": 0.0, "y": 0.0}, {"x": 0.0, "y": 4.0}]
                }],
                "layer": "0"
            }"#
            .to_string()],
            "",
        );
        let mut pattern = Pattern::from_json(&json).unwrap();
        pattern.select_by_box(Vec2::new(-1.0, -1.0), Vec2::new(1.0, 1.0));
        pattern.preview_rotation(Vec2::ZERO, FRAC_PI_2);
        let bbox = pattern.commit_rotation().unwrap();

        // Clockwise quarter turn lays the bar along +x
        assert_relative_eq!(bbox.min.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(bbox.max.x, 4.0, epsilon = 1e-5);
        assert_relative_eq!(bbox.min.y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(bbox.max.y, 0.0, epsilon = 1e-5);
        assert_eq!(pattern.preview().angle, 0.0);
    }

    #[test]
    fn test_commit_rotation_without_selection() {
        let mut pattern = block1_pattern();
        assert!(pattern.commit_rotation().is_none());
    }

    #[test]
    fn test_set_view_resets_selection() {
        let mut pattern = block1_pattern();
        pattern.select_by_box(Vec2::new(-10.0, -10.0), Vec2::new(10.0, 10.0));
        pattern.set_view(ViewMode::Block("block1".to_string()));
        assert_eq!(pattern.view(), &ViewMode::Block("block1".to_string()));
        assert!(!pattern.blocks()[0].is_highlighted());

        assert!(matches!(
            pattern.try_set_view(ViewMode::Block("nope".to_string())),
            Err(PatternError::UnknownBlock(_))
        ));
        assert_eq!(pattern.view(), &ViewMode::Block("block1".to_string()));
    }

    #[test]
    fn test_disabled_layer_not_drawn() {
        let mut pattern = block1_pattern();
        pattern.disable_layer(1);
        assert!(pattern.recompute_draw_buffers().is_empty());
        pattern.enable_layer(1);
        assert!(!pattern.recompute_draw_buffers().is_empty());
    }

    #[test]
    fn test_set_layer_color() {
        let mut pattern = block1_pattern();
        pattern.set_layer_color(1, "#FF0000FF").unwrap();
        let buffers = pattern.recompute_draw_buffers();
        assert_eq!(buffers.vertices[0].color, [1.0, 0.0, 0.0, 1.0]);
        assert!(pattern.set_layer_color(1, "red").is_err());
    }
}
