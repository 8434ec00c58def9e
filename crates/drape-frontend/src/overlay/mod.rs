//! Selection overlay
//!
//! The overlay is a pixel-space rectangle drawn over the viewport around
//! the current selection. It can be moved, resized from eight handles and
//! rotated from a ninth, and reports those gestures as [`OverlayEvent`]s.

mod egui_overlay;

pub use egui_overlay::EguiOverlay;

use glam::Vec2;

/// Axis-aligned rectangle in pixel space (y down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    pub min: Vec2,
    pub max: Vec2,
}

impl PixelRect {
    /// Rectangle spanned by two arbitrary corners
    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }
}

/// Position of a handle along one side of the rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Start,
    Middle,
    End,
}

impl Edge {
    fn fraction(self) -> f32 {
        match self {
            Edge::Start => 0.0,
            Edge::Middle => 0.5,
            Edge::End => 1.0,
        }
    }
}

/// Part of the overlay grabbed by a gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayHandle {
    /// The rectangle itself
    Body,
    TopLeft,
    TopMiddle,
    TopRight,
    MiddleLeft,
    MiddleRight,
    BottomLeft,
    BottomMiddle,
    BottomRight,
    /// Handle above the top edge
    Rotate,
}

impl OverlayHandle {
    /// The eight resize handles
    pub const SCALE_HANDLES: [OverlayHandle; 8] = [
        OverlayHandle::TopLeft,
        OverlayHandle::TopMiddle,
        OverlayHandle::TopRight,
        OverlayHandle::MiddleLeft,
        OverlayHandle::MiddleRight,
        OverlayHandle::BottomLeft,
        OverlayHandle::BottomMiddle,
        OverlayHandle::BottomRight,
    ];

    /// Horizontal position of a resize handle, `None` for body and rotate
    pub fn horizontal(&self) -> Option<Edge> {
        match self {
            OverlayHandle::TopLeft | OverlayHandle::MiddleLeft | OverlayHandle::BottomLeft => {
                Some(Edge::Start)
            }
            OverlayHandle::TopMiddle | OverlayHandle::BottomMiddle => Some(Edge::Middle),
            OverlayHandle::TopRight | OverlayHandle::MiddleRight | OverlayHandle::BottomRight => {
                Some(Edge::End)
            }
            OverlayHandle::Body | OverlayHandle::Rotate => None,
        }
    }

    /// Vertical position of a resize handle, `None` for body and rotate
    pub fn vertical(&self) -> Option<Edge> {
        match self {
            OverlayHandle::TopLeft | OverlayHandle::TopMiddle | OverlayHandle::TopRight => {
                Some(Edge::Start)
            }
            OverlayHandle::MiddleLeft | OverlayHandle::MiddleRight => Some(Edge::Middle),
            OverlayHandle::BottomLeft | OverlayHandle::BottomMiddle | OverlayHandle::BottomRight => {
                Some(Edge::End)
            }
            OverlayHandle::Body | OverlayHandle::Rotate => None,
        }
    }

    /// Handle position as a fraction of the rectangle size from its top-left
    pub fn fraction(&self) -> Option<Vec2> {
        Some(Vec2::new(
            self.horizontal()?.fraction(),
            self.vertical()?.fraction(),
        ))
    }
}

/// Native transform state of the overlay rectangle.
///
/// `left`/`top`/`width`/`height` describe the rectangle the gesture started
/// from (after any move); the scale factors, flips and angle describe the
/// gesture on top of it. The angle is in degrees, clockwise on screen,
/// about the rectangle centre.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayTransform {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    pub flip_x: bool,
    pub flip_y: bool,
    pub angle: f32,
}

impl OverlayTransform {
    /// Untransformed state for a rectangle
    pub fn from_rect(rect: PixelRect) -> Self {
        let size = rect.size();
        Self {
            left: rect.min.x,
            top: rect.min.y,
            width: size.x,
            height: size.y,
            scale_x: 1.0,
            scale_y: 1.0,
            flip_x: false,
            flip_y: false,
            angle: 0.0,
        }
    }

    pub fn top_left(&self) -> Vec2 {
        Vec2::new(self.left, self.top)
    }

    /// Size on screen with the scale applied
    pub fn scaled_size(&self) -> Vec2 {
        Vec2::new(self.width * self.scale_x, self.height * self.scale_y)
    }

    /// Centre of the rectangle; rotation does not move it
    pub fn center(&self) -> Vec2 {
        self.top_left() + self.scaled_size() * 0.5
    }

    /// Bounds ignoring rotation
    pub fn bounds(&self) -> PixelRect {
        PixelRect {
            min: self.top_left(),
            max: self.top_left() + self.scaled_size(),
        }
    }
}

/// Gesture notifications from the overlay
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OverlayEvent {
    /// The rectangle is being moved, resized or rotated from `handle`
    Transform {
        handle: OverlayHandle,
        transform: OverlayTransform,
    },
    /// The gesture finished
    Modified { transform: OverlayTransform },
}

/// Overlay operations the viewport needs
pub trait OverlayWidget {
    /// Show the rectangle at `rect`, resetting any scale, flip or rotation
    fn create_or_move_rect(&mut self, rect: PixelRect);

    /// Remove the rectangle
    fn clear(&mut self);

    /// Allow or forbid gestures on the rectangle
    fn set_interactive(&mut self, interactive: bool);

    /// Current rectangle bounds, if shown
    fn rect(&self) -> Option<PixelRect>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_rect_from_corners() {
        let rect = PixelRect::from_corners(Vec2::new(30.0, 5.0), Vec2::new(10.0, 25.0));
        assert_eq!(rect.min, Vec2::new(10.0, 5.0));
        assert_eq!(rect.max, Vec2::new(30.0, 25.0));
        assert_eq!(rect.center(), Vec2::new(20.0, 15.0));
        assert_eq!(rect.size(), Vec2::new(20.0, 20.0));
    }

    #[test]
    fn test_handle_fractions() {
        assert_eq!(OverlayHandle::TopLeft.fraction(), Some(Vec2::ZERO));
        assert_eq!(OverlayHandle::BottomMiddle.fraction(), Some(Vec2::new(0.5, 1.0)));
        assert_eq!(OverlayHandle::MiddleRight.fraction(), Some(Vec2::new(1.0, 0.5)));
        assert_eq!(OverlayHandle::Body.fraction(), None);
        assert!(OverlayHandle::SCALE_HANDLES.iter().all(|h| h.fraction().is_some()));
        assert_eq!(OverlayHandle::Rotate.fraction(), None);
    }

    #[test]
    fn test_transform_geometry() {
        let mut transform = OverlayTransform::from_rect(PixelRect {
            min: Vec2::new(10.0, 20.0),
            max: Vec2::new(50.0, 40.0),
        });
        assert_eq!(transform.center(), Vec2::new(30.0, 30.0));

        transform.scale_x = 2.0;
        assert_eq!(transform.scaled_size(), Vec2::new(80.0, 20.0));
        assert_eq!(transform.bounds().max, Vec2::new(90.0, 40.0));
    }
}
