//! Action modes
//!
//! The viewport is either panning (pointer drags move the camera) or
//! selecting (pointer drags draw a selection box and the overlay accepts
//! its own gestures).

use serde::{Deserialize, Serialize};

use crate::overlay::OverlayWidget;

/// What pointer input on the viewport does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ActionMode {
    #[default]
    Pan,
    Select,
}

impl ActionMode {
    pub const ALL: [ActionMode; 2] = [ActionMode::Pan, ActionMode::Select];

    /// Label shown on the toolbar
    pub fn label(&self) -> &'static str {
        match self {
            ActionMode::Pan => "Pan",
            ActionMode::Select => "Select",
        }
    }
}

/// Holds the current action mode
#[derive(Debug, Clone, Default)]
pub struct ActionDispatcher {
    mode: ActionMode,
}

impl ActionDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> ActionMode {
        self.mode
    }

    /// Returns true if pointer input belongs to the selection tools
    pub fn is_selecting(&self) -> bool {
        self.mode == ActionMode::Select
    }

    /// Returns true if pointer drags pan the camera
    pub fn is_panning(&self) -> bool {
        self.mode == ActionMode::Pan
    }

    /// Switch modes. The overlay only takes its own gestures in select mode.
    pub fn set_mode<O: OverlayWidget + ?Sized>(&mut self, mode: ActionMode, overlay: &mut O) {
        if self.mode == mode {
            return;
        }
        tracing::info!("Action mode: {}", mode.label());
        self.mode = mode;
        overlay.set_interactive(mode == ActionMode::Select);
    }
}
