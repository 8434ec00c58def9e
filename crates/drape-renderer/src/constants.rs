//! Renderer constants

/// Camera defaults
pub mod camera {
    /// Pan speed multiplier, scaled by the camera distance
    pub const MOVEMENT_SPEED: f32 = 10.0;
    /// Speed of wheel zoom
    pub const ZOOM_SPEED: f32 = 50.0;
    /// Velocity drag coefficient in `[0, 1]`; 1 stops instantly
    pub const FRICTION: f32 = 0.99;
    /// Closest allowed camera z (negative, nearest the scene)
    pub const MIN_DISTANCE: f32 = -5.0;
    /// Farthest allowed camera z
    pub const MAX_DISTANCE: f32 = -5000.0;
    /// Zoom toward the cursor only while farther than `MIN_DISTANCE * MIN_PAN_RATIO`
    pub const MIN_PAN_RATIO: f32 = 2.0;
    /// Vertical field of view in degrees (2π/5)
    pub const FOV_DEGREES: f32 = 72.0;
    /// Usable fraction of the normalized device range
    pub const CANVAS_ADJUSTMENT: f32 = 0.95;
    /// Near clipping plane
    pub const NEAR_PLANE: f32 = 1.0;
    /// Far clipping plane
    pub const FAR_PLANE: f32 = 10000.0;
    /// Initial camera position
    pub const INITIAL_POSITION: [f32; 3] = [0.0, 0.0, -100.0];
}

/// Viewport defaults
pub mod viewport {
    /// Background clear colour
    pub const CLEAR_COLOR: wgpu::Color = wgpu::Color {
        r: 0.96,
        g: 0.96,
        b: 0.94,
        a: 1.0,
    };
    /// Colour format of the offscreen render target
    pub const TARGET_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;
}
