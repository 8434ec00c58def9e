//! JSON pattern payload

use std::collections::HashMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::PatternError;

/// 2D vertex as it appears in the payload
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct VertexDoc {
    pub x: f32,
    pub y: f32,
}

impl From<VertexDoc> for Vec2 {
    fn from(v: VertexDoc) -> Self {
        Vec2::new(v.x, v.y)
    }
}

/// Entity inside a block definition
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityDoc {
    pub entity_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_index: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vertices: Option<Vec<VertexDoc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<VertexDoc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_point: Option<VertexDoc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_height: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Block definition
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlockDoc {
    #[serde(default)]
    pub entities: Vec<EntityDoc>,
    #[serde(default)]
    pub centroid: VertexDoc,
    pub layer: String,
}

/// Top-level entity placing a block (`INSERT`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsertDoc {
    pub entity_type: String,
    pub name: String,
    pub position: VertexDoc,
    pub layer: String,
}

/// Pattern body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatternDoc {
    #[serde(default)]
    pub blocks: HashMap<String, BlockDoc>,
    #[serde(default)]
    pub entities: Vec<InsertDoc>,
}

/// Root of the pattern payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatternDocument {
    pub pattern_json: PatternDoc,
}

impl PatternDocument {
    /// Parse a pattern payload
    pub fn from_json(payload: &str) -> Result<Self, PatternError> {
        serde_json::from_str(payload).map_err(|e| PatternError::Parse(e.to_string()))
    }
}

/// Parse a layer name into its numeric id
pub fn parse_layer(layer: &str) -> Result<i32, PatternError> {
    layer
        .trim()
        .parse::<i32>()
        .map_err(|_| PatternError::InvalidLayer(layer.to_string()))
}
