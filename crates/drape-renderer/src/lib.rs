//! Drape Renderer
//!
//! Camera, screen/world coordinate mapping and wgpu line rendering for the
//! Drape viewport.
//!
//! # Module Structure
//!
//! ```text
//! drape-renderer/
//! ├── camera.rs        # Pan/zoom camera and projection
//! ├── transform.rs     # Pixel / normalized / world conversions
//! ├── config.rs        # Camera and viewport configuration
//! ├── pipeline.rs      # Pipeline utilities
//! ├── sub_renderers/   # Line renderer
//! └── renderer.rs      # Main Renderer
//! ```

pub mod camera;
pub mod config;
pub mod constants;
pub mod pipeline;
pub mod renderer;
pub mod sub_renderers;
pub mod transform;
pub mod vertex;

pub use camera::{Camera, CameraSuppression, CameraUniform, Projection};
pub use config::{CameraConfig, RendererConfig, ViewportConfig};
pub use renderer::Renderer;
pub use sub_renderers::LineRenderer;
pub use transform::{CoordinateTransform, ViewportExtents};
