//! Axis-aligned bounding boxes in world space.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in world space.
///
/// Serialized as `[[min_x, max_x], [min_y, max_y]]`, the row layout the
/// geometry engine reports.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[[f32; 2]; 2]", into = "[[f32; 2]; 2]")]
pub struct WorldBBox {
    /// Minimum corner of the bounding box.
    pub min: Vec2,
    /// Maximum corner of the bounding box.
    pub max: Vec2,
}

impl WorldBBox {
    /// Creates a new bounding box from min and max points.
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Creates a bounding box from `[[min_x, max_x], [min_y, max_y]]` rows.
    pub fn from_rows(rows: [[f32; 2]; 2]) -> Self {
        Self {
            min: Vec2::new(rows[0][0], rows[1][0]),
            max: Vec2::new(rows[0][1], rows[1][1]),
        }
    }

    /// Creates a bounding box spanned by two arbitrary corners.
    ///
    /// Returns `None` when the box has zero area.
    pub fn from_corners(a: Vec2, b: Vec2) -> Option<Self> {
        let bbox = Self {
            min: a.min(b),
            max: a.max(b),
        };
        (bbox.width() > 0.0 && bbox.height() > 0.0).then_some(bbox)
    }

    /// Creates the smallest bounding box containing all given points.
    ///
    /// Returns `None` for an empty iterator.
    pub fn from_points(points: impl IntoIterator<Item = Vec2>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bbox = Self::new(first, first);
        for point in iter {
            bbox = bbox.expand_to_include(point);
        }
        Some(bbox)
    }

    /// Returns the `[[min_x, max_x], [min_y, max_y]]` row layout.
    pub fn as_rows(&self) -> [[f32; 2]; 2] {
        [[self.min.x, self.max.x], [self.min.y, self.max.y]]
    }

    /// Returns the width of the box.
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Returns the height of the box.
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Returns the center of the box.
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Returns true if the point lies inside the box grown by `padding`.
    pub fn contains_point(&self, point: Vec2, padding: f32) -> bool {
        point.x >= self.min.x - padding
            && point.x <= self.max.x + padding
            && point.y >= self.min.y - padding
            && point.y <= self.max.y + padding
    }

    /// Returns true if this bounding box intersects another.
    pub fn intersects(&self, other: &WorldBBox) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    /// Returns the union of two bounding boxes.
    pub fn union(&self, other: &WorldBBox) -> WorldBBox {
        WorldBBox {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Returns a new bounding box expanded to include the given point.
    pub fn expand_to_include(&self, point: Vec2) -> WorldBBox {
        WorldBBox {
            min: self.min.min(point),
            max: self.max.max(point),
        }
    }

    /// Returns the box translated by `delta`.
    pub fn offset(&self, delta: Vec2) -> WorldBBox {
        WorldBBox {
            min: self.min + delta,
            max: self.max + delta,
        }
    }

    /// Returns the box scaled about `anchor`.
    ///
    /// Negative factors mirror the box; the result is re-normalized so that
    /// `min <= max` still holds.
    pub fn scale_about(&self, scale: Vec2, anchor: Vec2) -> WorldBBox {
        let a = anchor + (self.min - anchor) * scale;
        let b = anchor + (self.max - anchor) * scale;
        WorldBBox {
            min: a.min(b),
            max: a.max(b),
        }
    }
}

impl From<[[f32; 2]; 2]> for WorldBBox {
    fn from(rows: [[f32; 2]; 2]) -> Self {
        Self::from_rows(rows)
    }
}

impl From<WorldBBox> for [[f32; 2]; 2] {
    fn from(bbox: WorldBBox) -> Self {
        bbox.as_rows()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_corners_normalizes() {
        let bbox = WorldBBox::from_corners(Vec2::new(10.0, -10.0), Vec2::new(-10.0, 10.0)).unwrap();
        assert_eq!(bbox.min, Vec2::new(-10.0, -10.0));
        assert_eq!(bbox.max, Vec2::new(10.0, 10.0));
    }

    #[test]
    fn test_zero_area_box_is_none() {
        let p = Vec2::new(3.0, 4.0);
        assert!(WorldBBox::from_corners(p, p).is_none());
        assert!(WorldBBox::from_corners(p, Vec2::new(3.0, 9.0)).is_none());
    }

    #[test]
    fn test_rows_round_trip() {
        let rows = [[-5.0, 5.0], [-2.0, 3.0]];
        let bbox = WorldBBox::from_rows(rows);
        assert_eq!(bbox.as_rows(), rows);
        assert_eq!(bbox.width(), 10.0);
        assert_eq!(bbox.height(), 5.0);
    }

    #[test]
    fn test_serde_uses_row_layout() {
        let bbox = WorldBBox::from_rows([[-5.0, 5.0], [-5.0, 5.0]]);
        let json = serde_json::to_string(&bbox).unwrap();
        assert_eq!(json, "[[-5.0,5.0],[-5.0,5.0]]");
        let parsed: WorldBBox = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, bbox);
    }

    #[test]
    fn test_contains_point_with_padding() {
        let bbox = WorldBBox::from_rows([[0.0, 1.0], [0.0, 1.0]]);
        assert!(bbox.contains_point(Vec2::new(0.5, 0.5), 0.0));
        assert!(!bbox.contains_point(Vec2::new(1.5, 0.5), 0.0));
        assert!(bbox.contains_point(Vec2::new(1.5, 0.5), 0.5));
    }

    #[test]
    fn test_intersects_and_union() {
        let a = WorldBBox::from_rows([[0.0, 2.0], [0.0, 2.0]]);
        let b = WorldBBox::from_rows([[1.0, 3.0], [1.0, 3.0]]);
        let c = WorldBBox::from_rows([[5.0, 6.0], [5.0, 6.0]]);
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
        assert_eq!(a.union(&c).as_rows(), [[0.0, 6.0], [0.0, 6.0]]);
    }

    #[test]
    fn test_scale_about_anchor() {
        let bbox = WorldBBox::from_rows([[-5.0, 5.0], [-5.0, 5.0]]);
        let scaled = bbox.scale_about(Vec2::new(2.0, 1.0), Vec2::new(5.0, -5.0));
        // Left edge: 2 * (-5 - 5) + 5
        assert_eq!(scaled.min.x, -15.0);
        assert_eq!(scaled.max.x, 5.0);
        assert_eq!(scaled.min.y, -5.0);
        assert_eq!(scaled.max.y, 5.0);
    }

    #[test]
    fn test_scale_about_with_flip_renormalizes() {
        let bbox = WorldBBox::from_rows([[0.0, 2.0], [0.0, 1.0]]);
        let flipped = bbox.scale_about(Vec2::new(-1.0, 1.0), Vec2::ZERO);
        assert_eq!(flipped.as_rows(), [[-2.0, 0.0], [0.0, 1.0]]);
    }

    #[test]
    fn test_from_points() {
        assert!(WorldBBox::from_points(std::iter::empty()).is_none());
        let bbox = WorldBBox::from_points([
            Vec2::new(1.0, 2.0),
            Vec2::new(-1.0, 5.0),
            Vec2::new(0.0, -3.0),
        ])
        .unwrap();
        assert_eq!(bbox.as_rows(), [[-1.0, 1.0], [-3.0, 5.0]]);
    }
}
