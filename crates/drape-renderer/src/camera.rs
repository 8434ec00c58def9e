//! Pan/zoom camera for the 2D viewport
//!
//! `position` is the scene offset applied by the view matrix: the world
//! point under the viewport centre is `-position.xy` and the distance to the
//! drawing plane is `-position.z`. The camera never rotates, so the basis
//! vectors of [`Camera::matrix`] stay axis-aligned.

use bytemuck::{Pod, Zeroable};
use drape_core::InputSnapshot;
use glam::{Mat4, Vec3};

use crate::config::CameraConfig;

/// Camera uniform buffer data
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    /// Combined projection and view matrix
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    /// Build the uniform from a combined view-projection matrix
    pub fn new(view_proj: Mat4) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
        }
    }
}

/// Perspective projection parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Field of view in radians
    pub fov: f32,
    /// Width over height
    pub aspect: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
}

impl Projection {
    /// Projection matrix
    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    /// Horizontal and vertical scale terms (`P[0][0]`, `P[1][1]`)
    pub fn scale(&self) -> (f32, f32) {
        let m = self.matrix();
        (m.x_axis.x, m.y_axis.y)
    }
}

/// Per-frame suppression of camera motion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CameraSuppression {
    /// Skip the zoom contribution
    pub ignore_zoom: bool,
    /// Skip the pan contribution
    pub ignore_moving: bool,
}

/// Pan/zoom camera with velocity damping
#[derive(Debug, Clone)]
pub struct Camera {
    /// Scene offset; z is the negative viewing distance
    pub position: Vec3,
    /// Current velocity in world units per second
    pub velocity: Vec3,
    /// Camera-to-world matrix
    pub matrix: Mat4,
    /// Projection parameters
    pub projection: Projection,
    config: CameraConfig,
}

impl Camera {
    /// Create a camera from configuration
    pub fn new(config: CameraConfig, aspect: f32) -> Self {
        let config = config.sanitized();
        let position = Vec3::from_array(config.initial_position);
        let projection = Projection {
            fov: config.fov_radians(),
            aspect,
            near: config.near_plane,
            far: config.far_plane,
        };
        let mut camera = Self {
            position,
            velocity: Vec3::ZERO,
            matrix: Mat4::IDENTITY,
            projection,
            config,
        };
        camera.clamp_distance();
        camera.rebuild_matrix();
        camera
    }

    /// Camera configuration
    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    /// Update aspect ratio
    pub fn update_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.projection.aspect = aspect;
        }
    }

    /// Right basis vector
    pub fn right(&self) -> Vec3 {
        self.matrix.x_axis.truncate()
    }

    /// Up basis vector
    pub fn up(&self) -> Vec3 {
        self.matrix.y_axis.truncate()
    }

    /// Back basis vector (pointing away from the scene)
    pub fn back(&self) -> Vec3 {
        self.matrix.z_axis.truncate()
    }

    /// Distance from the camera to the drawing plane
    pub fn distance(&self) -> f32 {
        -self.position.z
    }

    /// View matrix (inverse of [`Camera::matrix`])
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position)
    }

    /// Projection matrix
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection.matrix()
    }

    /// Combined projection and view matrix
    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Camera uniform data
    pub fn uniform(&self) -> CameraUniform {
        CameraUniform::new(self.view_proj())
    }

    /// Move so that `world` sits under the viewport centre, keeping the distance
    pub fn look_at(&mut self, world: glam::Vec2) {
        self.position.x = -world.x;
        self.position.y = -world.y;
        self.velocity = Vec3::ZERO;
        self.rebuild_matrix();
    }

    /// Integrate one frame of input and return the view matrix
    pub fn update(
        &mut self,
        delta_time: f32,
        input: &InputSnapshot,
        suppression: CameraSuppression,
    ) -> Mat4 {
        let sign = |positive: bool, negative: bool| (positive as i32 - negative as i32) as f32;

        let digital = &input.digital;
        let analog = &input.analog;
        let zooming = !suppression.ignore_zoom && analog.zoom != 0.0;

        let mut target = Vec3::ZERO;

        if !suppression.ignore_moving {
            target += self.right() * sign(digital.right, digital.left);
            target += self.up() * sign(digital.up, digital.down);
            target += self.right() * analog.x;
            target += self.up() * -analog.y;
        }

        if zooming {
            target += self.back() * analog.zoom;

            // Zooming in from afar drifts toward the cursor
            let zoom_in = analog.zoom < 0.0;
            let far_enough = self.position.z < self.config.min_distance * self.config.min_pan_ratio;
            let within_limit = self.position.z > self.config.max_distance;
            if zoom_in && far_enough && within_limit && !suppression.ignore_moving {
                target += self.right() * analog.mouse_x;
                target += self.up() * -analog.mouse_y;
            }
        }

        let speed = if zooming {
            self.config.zoom_speed
        } else {
            self.config.movement_speed * self.position.z.abs()
        };
        let target = target.normalize_or_zero() * speed;

        let weight = (1.0 - self.config.friction).powf(delta_time);
        self.velocity = target.lerp(self.velocity, weight);

        self.position -= self.velocity * delta_time;
        self.clamp_distance();
        self.rebuild_matrix();

        self.view_matrix()
    }

    fn clamp_distance(&mut self) {
        self.position.z = self
            .position
            .z
            .clamp(self.config.max_distance, self.config.min_distance);
    }

    fn rebuild_matrix(&mut self) {
        self.matrix = self.view_matrix().inverse();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use drape_core::{AnalogInput, DigitalInput};

    fn camera() -> Camera {
        Camera::new(CameraConfig::default(), 1.0)
    }

    fn zoom(amount: f32) -> InputSnapshot {
        InputSnapshot {
            analog: AnalogInput {
                zoom: amount,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_initial_state() {
        let camera = camera();
        assert_eq!(camera.position, Vec3::new(0.0, 0.0, -100.0));
        assert_eq!(camera.distance(), 100.0);
        assert_eq!(camera.matrix.w_axis.truncate(), Vec3::new(0.0, 0.0, 100.0));
        assert_eq!(camera.right(), Vec3::X);
        assert_eq!(camera.up(), Vec3::Y);
        assert_eq!(camera.back(), Vec3::Z);
    }

    #[test]
    fn test_inverted_distance_limits_from_config() {
        let config = CameraConfig {
            min_distance: -5000.0,
            max_distance: -5.0,
            ..Default::default()
        };
        let mut camera = Camera::new(config, 1.0);
        assert_eq!(camera.position.z, -100.0);
        for _ in 0..200 {
            camera.update(0.1, &zoom(1.0), CameraSuppression::default());
        }
        assert!(camera.position.z >= -5000.0);
        assert_eq!(camera.config().max_distance, -5000.0);
    }

    #[test]
    fn test_view_is_inverse_of_matrix() {
        let mut camera = camera();
        camera.look_at(glam::Vec2::new(3.0, -4.0));
        let product = camera.view_matrix() * camera.matrix;
        assert!(product.abs_diff_eq(Mat4::IDENTITY, 1e-5));
    }

    #[test]
    fn test_friction_decay_never_reverses() {
        let mut camera = camera();
        camera.velocity = Vec3::new(30.0, -20.0, 0.0);

        let mut previous = camera.velocity;
        for _ in 0..240 {
            camera.update(1.0 / 60.0, &InputSnapshot::default(), CameraSuppression::default());
            assert!(camera.velocity.length() < previous.length());
            assert!(camera.velocity.x >= 0.0);
            assert!(camera.velocity.y <= 0.0);
            previous = camera.velocity;
        }
        assert!(camera.velocity.length() < 1e-3);
    }

    #[test]
    fn test_zoom_clamped_to_min_distance() {
        let mut camera = camera();
        for _ in 0..2000 {
            camera.update(1.0 / 30.0, &zoom(-1.0), CameraSuppression::default());
            assert!(camera.position.z <= camera.config().min_distance);
        }
        assert_relative_eq!(camera.position.z, -5.0);
    }

    #[test]
    fn test_zoom_clamped_to_max_distance() {
        let mut camera = camera();
        for _ in 0..20000 {
            camera.update(0.1, &zoom(1.0), CameraSuppression::default());
        }
        assert!(camera.position.z >= camera.config().max_distance);
    }

    #[test]
    fn test_zoom_in_moves_closer() {
        let mut camera = camera();
        camera.update(0.1, &zoom(-1.0), CameraSuppression::default());
        assert!(camera.distance() < 100.0);
    }

    #[test]
    fn test_right_key_moves_view_right() {
        let mut camera = camera();
        let input = InputSnapshot {
            digital: DigitalInput {
                right: true,
                ..Default::default()
            },
            ..Default::default()
        };
        camera.update(0.1, &input, CameraSuppression::default());
        // World point under the centre moves right
        assert!(-camera.position.x > 0.0);
        assert_relative_eq!(camera.position.y, 0.0);
    }

    #[test]
    fn test_suppression_skips_contribution_but_keeps_friction() {
        let mut camera = camera();
        camera.velocity = Vec3::new(10.0, 0.0, 0.0);
        let input = InputSnapshot {
            digital: DigitalInput {
                up: true,
                ..Default::default()
            },
            analog: AnalogInput {
                zoom: -1.0,
                ..Default::default()
            },
        };
        let suppression = CameraSuppression {
            ignore_zoom: true,
            ignore_moving: true,
        };
        camera.update(0.1, &input, suppression);
        assert!(camera.velocity.x < 10.0 && camera.velocity.x > 0.0);
        assert_eq!(camera.velocity.y, 0.0);
        assert_eq!(camera.velocity.z, 0.0);
    }

    #[test]
    fn test_zoom_toward_cursor() {
        let mut camera = camera();
        let input = InputSnapshot {
            analog: AnalogInput {
                zoom: -1.0,
                mouse_x: 0.5,
                mouse_y: -0.5,
                ..Default::default()
            },
            ..Default::default()
        };
        camera.update(0.1, &input, CameraSuppression::default());
        // Cursor up-right of centre: view drifts up and right
        assert!(-camera.position.x > 0.0);
        assert!(-camera.position.y > 0.0);
    }

    #[test]
    fn test_no_cursor_drift_near_min_distance() {
        let config = CameraConfig {
            initial_position: [0.0, 0.0, -8.0],
            ..Default::default()
        };
        let mut camera = Camera::new(config, 1.0);
        let input = InputSnapshot {
            analog: AnalogInput {
                zoom: -1.0,
                mouse_x: 0.5,
                ..Default::default()
            },
            ..Default::default()
        };
        camera.update(0.1, &input, CameraSuppression::default());
        assert_eq!(camera.position.x, 0.0);
    }

    #[test]
    fn test_projection_scale() {
        let camera = Camera::new(CameraConfig::default(), 2.0);
        let (sx, sy) = camera.projection.scale();
        let f = 1.0 / (camera.projection.fov / 2.0).tan();
        assert_relative_eq!(sy, f, epsilon = 1e-5);
        assert_relative_eq!(sx, f / 2.0, epsilon = 1e-5);
    }
}
