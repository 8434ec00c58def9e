//! Renderer configuration structures
//!
//! This module provides configurable settings for the camera and viewport
//! that can be serialized and loaded from configuration files.

use serde::{Deserialize, Serialize};

use crate::constants::{camera, viewport};

/// Camera configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Pan speed multiplier, scaled by the camera distance
    pub movement_speed: f32,
    /// Wheel zoom speed
    pub zoom_speed: f32,
    /// Velocity drag coefficient in `[0, 1]`
    pub friction: f32,
    /// Closest allowed camera z (negative)
    pub min_distance: f32,
    /// Farthest allowed camera z (negative)
    pub max_distance: f32,
    /// Ratio of `min_distance` below which zoom no longer pans toward the cursor
    pub min_pan_ratio: f32,
    /// Field of view in degrees
    pub fov_degrees: f32,
    /// Usable fraction of the normalized device range
    pub canvas_adjustment: f32,
    /// Near clipping plane distance
    pub near_plane: f32,
    /// Far clipping plane distance
    pub far_plane: f32,
    /// Initial camera position
    pub initial_position: [f32; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            movement_speed: camera::MOVEMENT_SPEED,
            zoom_speed: camera::ZOOM_SPEED,
            friction: camera::FRICTION,
            min_distance: camera::MIN_DISTANCE,
            max_distance: camera::MAX_DISTANCE,
            min_pan_ratio: camera::MIN_PAN_RATIO,
            fov_degrees: camera::FOV_DEGREES,
            canvas_adjustment: camera::CANVAS_ADJUSTMENT,
            near_plane: camera::NEAR_PLANE,
            far_plane: camera::FAR_PLANE,
            initial_position: camera::INITIAL_POSITION,
        }
    }
}

impl CameraConfig {
    /// Field of view in radians
    pub fn fov_radians(&self) -> f32 {
        self.fov_degrees.to_radians()
    }

    /// Repair distance limits the camera cannot clamp against.
    ///
    /// Non-finite limits fall back to the defaults. Inverted limits are
    /// swapped so `max_distance` stays the farther (more negative) one.
    pub fn sanitized(mut self) -> Self {
        if !self.min_distance.is_finite() || !self.max_distance.is_finite() {
            tracing::warn!(
                "Invalid camera distance limits ({}, {}), using defaults",
                self.min_distance,
                self.max_distance
            );
            self.min_distance = camera::MIN_DISTANCE;
            self.max_distance = camera::MAX_DISTANCE;
        } else if self.max_distance > self.min_distance {
            tracing::warn!(
                "Camera distance limits inverted ({}, {}), swapping",
                self.min_distance,
                self.max_distance
            );
            std::mem::swap(&mut self.min_distance, &mut self.max_distance);
        }
        self
    }
}

/// Viewport rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewportConfig {
    /// Background clear color (RGBA)
    pub background_color: [f32; 4],
}

impl Default for ViewportConfig {
    fn default() -> Self {
        let c = viewport::CLEAR_COLOR;
        Self {
            background_color: [c.r as f32, c.g as f32, c.b as f32, c.a as f32],
        }
    }
}

impl ViewportConfig {
    /// Background colour as a wgpu clear colour
    pub fn clear_color(&self) -> wgpu::Color {
        let [r, g, b, a] = self.background_color;
        wgpu::Color {
            r: r as f64,
            g: g as f64,
            b: b as f64,
            a: a as f64,
        }
    }
}

/// Complete renderer configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct RendererConfig {
    /// Viewport settings
    #[serde(default)]
    pub viewport: ViewportConfig,
    /// Camera settings
    #[serde(default)]
    pub camera: CameraConfig,
}

impl RendererConfig {
    /// Create a new renderer configuration with default values
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_defaults() {
        let config = CameraConfig::default();
        assert_eq!(config.movement_speed, 10.0);
        assert_eq!(config.zoom_speed, 50.0);
        assert_eq!(config.friction, 0.99);
        assert_eq!(config.initial_position, [0.0, 0.0, -100.0]);
        assert!(config.max_distance < config.min_distance);
        assert!((config.fov_radians() - 2.0 * std::f32::consts::PI / 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_sanitized_swaps_inverted_limits() {
        let config = CameraConfig {
            min_distance: -5000.0,
            max_distance: -5.0,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(config.min_distance, -5.0);
        assert_eq!(config.max_distance, -5000.0);
    }

    #[test]
    fn test_sanitized_replaces_nan_limits() {
        let config = CameraConfig {
            min_distance: f32::NAN,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(config.min_distance, camera::MIN_DISTANCE);
        assert_eq!(config.max_distance, camera::MAX_DISTANCE);
        assert_eq!(CameraConfig::default().sanitized(), CameraConfig::default());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: RendererConfig =
            serde_json::from_str(r#"{"camera": {"zoom_speed": 20.0}}"#).unwrap();
        assert_eq!(config.camera.zoom_speed, 20.0);
        assert_eq!(config.camera.friction, 0.99);
        assert_eq!(config.viewport, ViewportConfig::default());
    }
}
