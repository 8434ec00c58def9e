//! Drape Core
//!
//! Pattern model, selection geometry and the geometry engine interface
//! used by the Drape viewport.
//!
//! # Module Structure
//!
//! ```text
//! drape-core/
//! ├── bbox.rs        # World-space bounding boxes
//! ├── engine.rs      # GeometryEngine trait and draw buffers
//! ├── highlight.rs   # Edit preview transform
//! ├── input.rs       # Per-frame input snapshot
//! ├── pattern/       # In-memory pattern engine (blocks, entities, payload)
//! └── settings.rs    # Display settings and views
//! ```

pub mod bbox;
pub mod constants;
pub mod engine;
pub mod highlight;
pub mod input;
pub mod pattern;
pub mod settings;

pub use bbox::WorldBBox;
pub use engine::{BoxSelection, DrawBuffers, DrawVertex, GeometryEngine};
pub use highlight::HighlightTransform;
pub use input::{AnalogInput, DigitalInput, InputSnapshot};
pub use pattern::{Block, Entity, EntityKind, Insert, Pattern, PatternError};
pub use settings::{ColorError, DisplaySettings, Rgba, ViewMode, parse_hex_color};
