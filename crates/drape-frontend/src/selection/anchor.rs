//! Fixed point of a resize gesture

use glam::Vec2;

use drape_core::WorldBBox;

use crate::overlay::OverlayHandle;

/// World point held fixed while resizing from `handle`.
///
/// Corners anchor on the opposite corner. Edge handles anchor on the
/// opposite edge, with the free coordinate taken as `1.5 * near - 0.5 * far`
/// rather than the midpoint; only the scaled axis of an edge drag is
/// affected by the anchor, so the other coordinate never moves geometry.
/// Screen top is world max-y.
///
/// Returns `None` for the body and rotate handles.
pub fn scale_anchor(handle: OverlayHandle, bbox: &WorldBBox) -> Option<Vec2> {
    let (left, right) = (bbox.min.x, bbox.max.x);
    let (top, bottom) = (bbox.max.y, bbox.min.y);
    let blend_x = 1.5 * left - 0.5 * right;
    let blend_y = 1.5 * top - 0.5 * bottom;

    let anchor = match handle {
        OverlayHandle::TopLeft => Vec2::new(right, bottom),
        OverlayHandle::TopRight => Vec2::new(left, bottom),
        OverlayHandle::BottomLeft => Vec2::new(right, top),
        OverlayHandle::BottomRight => Vec2::new(left, top),
        OverlayHandle::MiddleLeft => Vec2::new(right, blend_y),
        OverlayHandle::MiddleRight => Vec2::new(left, blend_y),
        OverlayHandle::TopMiddle => Vec2::new(blend_x, bottom),
        OverlayHandle::BottomMiddle => Vec2::new(blend_x, top),
        OverlayHandle::Body | OverlayHandle::Rotate => return None,
    };
    Some(anchor)
}
