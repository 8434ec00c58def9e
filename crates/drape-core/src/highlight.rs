//! Transient transform applied to highlighted geometry while an edit is previewed

use glam::{Mat2, Vec2};

/// Preview state for the highlighted selection.
///
/// Applied in order: offset, scale about `anchor` (a flip negates the
/// corresponding factor), rotation about `rotation_center`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HighlightTransform {
    pub offset: Vec2,
    pub scale: Vec2,
    pub flip_x: bool,
    pub flip_y: bool,
    pub anchor: Vec2,
    pub rotation_center: Vec2,
    /// Radians, positive rotates clockwise as seen on screen
    pub angle: f32,
}

impl Default for HighlightTransform {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            scale: Vec2::ONE,
            flip_x: false,
            flip_y: false,
            anchor: Vec2::ZERO,
            rotation_center: Vec2::ZERO,
            angle: 0.0,
        }
    }
}

impl HighlightTransform {
    /// Returns true if applying this transform changes nothing
    pub fn is_identity(&self) -> bool {
        self.offset == Vec2::ZERO && self.signed_scale() == Vec2::ONE && self.angle == 0.0
    }

    /// Scale factors with flips folded in
    pub fn signed_scale(&self) -> Vec2 {
        Vec2::new(
            if self.flip_x { -self.scale.x } else { self.scale.x },
            if self.flip_y { -self.scale.y } else { self.scale.y },
        )
    }

    /// Clockwise rotation for a y-up world
    fn rotation(&self) -> Mat2 {
        Mat2::from_angle(-self.angle)
    }

    /// Apply the offset component
    pub fn apply_offset(&self, point: Vec2) -> Vec2 {
        point + self.offset
    }

    /// Apply the scale component
    pub fn apply_scale(&self, point: Vec2) -> Vec2 {
        self.anchor + (point - self.anchor) * self.signed_scale()
    }

    /// Apply the rotation component
    pub fn apply_rotation(&self, point: Vec2) -> Vec2 {
        if self.angle == 0.0 {
            return point;
        }
        self.rotation_center + self.rotation() * (point - self.rotation_center)
    }

    /// Apply the full transform
    pub fn apply(&self, point: Vec2) -> Vec2 {
        self.apply_rotation(self.apply_scale(self.apply_offset(point)))
    }

    /// Reset the offset component
    pub fn reset_offset(&mut self) {
        self.offset = Vec2::ZERO;
    }

    /// Reset the scale component
    pub fn reset_scale(&mut self) {
        self.scale = Vec2::ONE;
        self.flip_x = false;
        self.flip_y = false;
        self.anchor = Vec2::ZERO;
    }

    /// Reset the rotation component
    pub fn reset_rotation(&mut self) {
        self.rotation_center = Vec2::ZERO;
        self.angle = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_default_is_identity() {
        let t = HighlightTransform::default();
        assert!(t.is_identity());
        assert_eq!(t.apply(Vec2::new(3.0, -4.0)), Vec2::new(3.0, -4.0));
    }

    #[test]
    fn test_scale_keeps_anchor_fixed() {
        let t = HighlightTransform {
            scale: Vec2::new(2.0, 1.0),
            anchor: Vec2::new(5.0, -5.0),
            ..Default::default()
        };
        assert_eq!(t.apply(Vec2::new(5.0, -5.0)), Vec2::new(5.0, -5.0));
        assert_eq!(t.apply(Vec2::new(-5.0, 5.0)), Vec2::new(-15.0, 5.0));
    }

    #[test]
    fn test_flip_negates_scale() {
        let t = HighlightTransform {
            flip_x: true,
            anchor: Vec2::new(1.0, 0.0),
            ..Default::default()
        };
        assert!(!t.is_identity());
        assert_eq!(t.apply(Vec2::new(3.0, 2.0)), Vec2::new(-1.0, 2.0));
    }

    #[test]
    fn test_positive_angle_rotates_clockwise() {
        let t = HighlightTransform {
            rotation_center: Vec2::new(1.0, 1.0),
            angle: FRAC_PI_2,
            ..Default::default()
        };
        // Point above the centre swings to its right
        let p = t.apply(Vec2::new(1.0, 2.0));
        assert_relative_eq!(p.x, 2.0, epsilon = 1e-5);
        assert_relative_eq!(p.y, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_resets() {
        let mut t = HighlightTransform {
            offset: Vec2::new(1.0, 1.0),
            scale: Vec2::splat(3.0),
            angle: 1.0,
            ..Default::default()
        };
        t.reset_offset();
        t.reset_scale();
        t.reset_rotation();
        assert!(t.is_identity());
    }
}
