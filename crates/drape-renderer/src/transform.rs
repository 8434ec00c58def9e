//! Conversions between pixel, normalized device and world space
//!
//! Pixel space has its origin at the top-left of the window with y pointing
//! down. Normalized space is `[-1, 1]` in both axes with the same y
//! direction. World space has y pointing up.

use glam::Vec2;

use crate::camera::Camera;
use crate::config::CameraConfig;

/// Centre and half-size of the rendering surface in pixel space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportExtents {
    /// Centre of the surface
    pub center: Vec2,
    /// Half of the surface width and height
    pub half_size: Vec2,
}

impl ViewportExtents {
    /// Extents of a surface at `min` with the given size.
    ///
    /// Returns `None` for an empty surface.
    pub fn from_rect(min: Vec2, size: Vec2) -> Option<Self> {
        if size.x <= 0.0 || size.y <= 0.0 {
            return None;
        }
        let half_size = size * 0.5;
        Some(Self {
            center: min + half_size,
            half_size,
        })
    }

    /// Width over height
    pub fn aspect(&self) -> f32 {
        self.half_size.x / self.half_size.y
    }
}

impl Default for ViewportExtents {
    fn default() -> Self {
        Self {
            center: Vec2::ONE,
            half_size: Vec2::ONE,
        }
    }
}

/// Screen/world coordinate mapping for the current surface and camera
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateTransform {
    extents: ViewportExtents,
    sin_fov: f32,
    adjustment: f32,
}

impl CoordinateTransform {
    /// Create a transform using the camera field of view and canvas adjustment
    pub fn new(config: &CameraConfig) -> Self {
        Self {
            extents: ViewportExtents::default(),
            sin_fov: config.fov_radians().sin(),
            adjustment: config.canvas_adjustment,
        }
    }

    /// Current extents
    pub fn extents(&self) -> ViewportExtents {
        self.extents
    }

    /// Refresh the cached extents after a resize
    pub fn set_extents(&mut self, extents: ViewportExtents) {
        self.extents = extents;
    }

    /// Pixel to normalized device coordinates. Not clamped.
    pub fn to_normalized(&self, pixel: Vec2) -> Vec2 {
        (pixel - self.extents.center) / self.extents.half_size
    }

    /// Normalized device to pixel coordinates, clamping the input to `[-1, 1]`
    pub fn to_pixel(&self, normalized: Vec2) -> Vec2 {
        let n = normalized.clamp(Vec2::NEG_ONE, Vec2::ONE);
        self.extents.center + n * self.extents.half_size
    }

    /// World units per normalized unit along each axis
    fn world_per_normalized(&self, camera: &Camera) -> Vec2 {
        let (scale_x, scale_y) = camera.projection.scale();
        let factor = camera.distance() * self.sin_fov;
        Vec2::new(
            factor / (scale_x * self.adjustment),
            -factor / (scale_y * self.adjustment),
        )
    }

    /// Normalized device coordinates to world coordinates
    pub fn world_from_normalized(&self, normalized: Vec2, camera: &Camera) -> Vec2 {
        normalized * self.world_per_normalized(camera) - camera.position.truncate()
    }

    /// World coordinates to normalized device coordinates
    pub fn screen_from_world(&self, world: Vec2, camera: &Camera) -> Vec2 {
        (world + camera.position.truncate()) / self.world_per_normalized(camera)
    }

    /// Pixel coordinates to world coordinates
    pub fn world_from_pixel(&self, pixel: Vec2, camera: &Camera) -> Vec2 {
        self.world_from_normalized(self.to_normalized(pixel), camera)
    }

    /// World coordinates to pixel coordinates, clamped to the surface
    pub fn pixel_from_world(&self, world: Vec2, camera: &Camera) -> Vec2 {
        self.to_pixel(self.screen_from_world(world, camera))
    }

    /// World coordinates to pixel coordinates, possibly off the surface
    pub fn project_to_pixel(&self, world: Vec2, camera: &Camera) -> Vec2 {
        self.extents.center + self.screen_from_world(world, camera) * self.extents.half_size
    }
}
