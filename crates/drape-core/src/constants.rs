//! Global constants for drape-core

/// Default entity colour (black, RGBA)
pub const DEFAULT_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

/// Colour of entities inside the highlighted selection (blue, RGBA)
pub const HIGHLIGHT_COLOR: [f32; 4] = [0.0, 0.0, 1.0, 1.0];

/// Colour of individually selected entities (red, RGBA)
pub const SELECT_COLOR: [f32; 4] = [1.0, 0.0, 0.0, 1.0];

/// Padding in model units when hit-testing with a single point
pub const DEFAULT_POINT_THRESHOLD: f32 = 4.0;

/// Half-size of the cross drawn for point entities
pub const DEFAULT_CROSS_SIZE: f32 = 0.3;

/// Index value that ends a line strip
pub const PRIMITIVE_RESTART: u32 = u32::MAX;

/// Colour shift between the two strokes of a point cross
pub const CROSS_SHADE: f32 = 0.05;
