//! Built-in sub-renderers
//!
//! - [`LineRenderer`]: pattern geometry as indexed line strips

pub mod lines;

pub use lines::LineRenderer;
