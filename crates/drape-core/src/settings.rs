//! Display settings for draw-buffer generation

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_COLOR, DEFAULT_CROSS_SIZE, DEFAULT_POINT_THRESHOLD, HIGHLIGHT_COLOR, SELECT_COLOR,
};

/// RGBA colour with components in `0.0..=1.0`
pub type Rgba = [f32; 4];

/// Separator between the view kind and the block name, e.g. `Block=>L-1`
const BLOCK_VIEW_SEPARATOR: &str = "=>";

/// Which part of the pattern is drawn
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ViewMode {
    /// All blocks at their insert positions
    #[default]
    Model,
    /// A single block, drawn at the origin
    Block(String),
}

impl ViewMode {
    /// Parse a view name. Anything that is not `Block=>NAME` is the model view.
    pub fn parse(name: &str) -> Self {
        match name.split_once(BLOCK_VIEW_SEPARATOR) {
            Some(("Block", key)) if !key.is_empty() => ViewMode::Block(key.to_string()),
            _ => ViewMode::Model,
        }
    }

    /// Name of this view as shown in view selectors
    pub fn name(&self) -> String {
        match self {
            ViewMode::Model => "Model".to_string(),
            ViewMode::Block(key) => format!("Block{}{}", BLOCK_VIEW_SEPARATOR, key),
        }
    }

    /// Block key if this view shows a single block
    pub fn block_key(&self) -> Option<&str> {
        match self {
            ViewMode::Model => None,
            ViewMode::Block(key) => Some(key),
        }
    }
}

impl From<String> for ViewMode {
    fn from(name: String) -> Self {
        Self::parse(&name)
    }
}

impl From<ViewMode> for String {
    fn from(view: ViewMode) -> Self {
        view.name()
    }
}

/// Colour parsing errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
    #[error("Hex color must be in the format #RRGGBBAA: {0}")]
    Format(String),
    #[error("Invalid {component} component in {hex}")]
    Component {
        component: &'static str,
        hex: String,
    },
}

/// Parse a `#RRGGBBAA` colour string
pub fn parse_hex_color(hex: &str) -> Result<Rgba, ColorError> {
    if hex.len() != 9 || !hex.starts_with('#') || !hex.is_ascii() {
        return Err(ColorError::Format(hex.to_string()));
    }

    let component = |range: std::ops::Range<usize>, name: &'static str| {
        u8::from_str_radix(&hex[range], 16)
            .map(|v| v as f32 / 255.0)
            .map_err(|_| ColorError::Component {
                component: name,
                hex: hex.to_string(),
            })
    };

    Ok([
        component(1..3, "red")?,
        component(3..5, "green")?,
        component(5..7, "blue")?,
        component(7..9, "alpha")?,
    ])
}

/// Settings that control how the pattern is drawn and hit-tested
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Colour for entities without a layer colour
    pub default_color: Rgba,
    /// Colour for entities in the highlighted selection
    pub highlight_color: Rgba,
    /// Colour for individually selected entities
    pub select_color: Rgba,
    /// Per-layer colour overrides
    pub layer_colors: HashMap<i32, Rgba>,
    /// Layers that are not drawn
    pub disabled_layers: Vec<i32>,
    /// Padding in model units when selecting with a single point
    pub point_threshold: f32,
    /// Half-size of the cross drawn for point entities
    pub cross_size: f32,
    /// Current view
    pub view: ViewMode,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            default_color: DEFAULT_COLOR,
            highlight_color: HIGHLIGHT_COLOR,
            select_color: SELECT_COLOR,
            layer_colors: HashMap::new(),
            disabled_layers: Vec::new(),
            point_threshold: DEFAULT_POINT_THRESHOLD,
            cross_size: DEFAULT_CROSS_SIZE,
            view: ViewMode::Model,
        }
    }
}

impl DisplaySettings {
    /// Parse settings from a JSON payload
    pub fn from_json(payload: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(payload)
    }

    /// Parse settings from a JSON payload, falling back to defaults
    pub fn from_json_or_default(payload: &str) -> Self {
        match Self::from_json(payload) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("Settings in incorrect format, using defaults: {}", e);
                Self::default()
            }
        }
    }

    /// Whether entities on `layer` are drawn
    pub fn is_layer_enabled(&self, layer: i32) -> bool {
        !self.disabled_layers.contains(&layer)
    }

    /// Disable a layer
    pub fn disable_layer(&mut self, layer: i32) {
        if !self.disabled_layers.contains(&layer) {
            self.disabled_layers.push(layer);
        }
    }

    /// Enable a layer
    pub fn enable_layer(&mut self, layer: i32) {
        self.disabled_layers.retain(|&l| l != layer);
    }

    /// Set a layer colour from a `#RRGGBBAA` string
    pub fn set_layer_color(&mut self, layer: i32, hex: &str) -> Result<(), ColorError> {
        let color = parse_hex_color(hex)?;
        self.layer_colors.insert(layer, color);
        Ok(())
    }

    /// Resolve the draw colour for an entity.
    ///
    /// Precedence: selected, highlighted, layer colour, default.
    pub fn color_for(&self, layer: i32, selected: bool, highlighted: bool) -> Rgba {
        if selected {
            self.select_color
        } else if highlighted {
            self.highlight_color
        } else {
            self.layer_colors
                .get(&layer)
                .copied()
                .unwrap_or(self.default_color)
        }
    }
}
