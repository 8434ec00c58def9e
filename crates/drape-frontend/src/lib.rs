//! Drape Frontend
//!
//! egui-based viewport for viewing and editing 2D patterns.
//!
//! Platform input is queued as [`ViewportEvent`]s on a [`ViewportContext`],
//! which owns the camera, the selection state machine, the geometry engine
//! and the transform overlay, and is advanced once per frame.

pub mod actions;
pub mod app;
pub mod config;
pub mod events;
pub mod input;
pub mod overlay;
pub mod panels;
pub mod selection;
pub mod state;

// Re-exports for convenience
pub use actions::{ActionDispatcher, ActionMode};
pub use app::{DrapeApp, StartupError};
pub use config::{AppConfig, ConfigError, ConfigManager};
pub use events::{KeyCode, ViewportEvent};
pub use input::InputHandler;
pub use overlay::{EguiOverlay, OverlayEvent, OverlayHandle, OverlayTransform, OverlayWidget, PixelRect};
pub use selection::{SelectionMachine, SelectionState};
pub use state::{FramePacket, PatternViewport, SharedViewportGpu, ViewportContext, ViewportGpu};
