//! egui implementation of the selection overlay

use glam::Vec2;

use super::{Edge, OverlayEvent, OverlayHandle, OverlayTransform, OverlayWidget, PixelRect};

/// Half-size of a resize handle in pixels
const HANDLE_RADIUS: f32 = 5.0;

/// Distance of the rotate handle above the top edge in pixels
const ROTATE_OFFSET: f32 = 24.0;

const STROKE_COLOR: egui::Color32 = egui::Color32::from_rgb(220, 40, 40);

/// Gesture in progress
#[derive(Debug, Clone, Copy)]
struct Drag {
    handle: OverlayHandle,
    start: OverlayTransform,
    pointer_start: Vec2,
}

/// Selection rectangle painted with egui
#[derive(Debug, Clone, Default)]
pub struct EguiOverlay {
    transform: Option<OverlayTransform>,
    interactive: bool,
    drag: Option<Drag>,
    /// Surface area the handles are kept inside
    clip: Option<PixelRect>,
}

fn rotate(v: Vec2, degrees: f32) -> Vec2 {
    Vec2::from_angle(degrees.to_radians()).rotate(v)
}

fn pos(v: Vec2) -> egui::Pos2 {
    egui::pos2(v.x, v.y)
}

impl EguiOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// Keep handles reachable inside `clip` when the rectangle extends past it
    pub fn set_clip(&mut self, clip: PixelRect) {
        self.clip = Some(clip);
    }

    /// Screen position of a handle
    fn handle_position(transform: &OverlayTransform, handle: OverlayHandle) -> Vec2 {
        let size = transform.scaled_size();
        let local = match handle {
            OverlayHandle::Body => Vec2::ZERO,
            OverlayHandle::Rotate => Vec2::new(0.0, -size.y * 0.5 - ROTATE_OFFSET),
            _ => match handle.fraction() {
                Some(f) => (f - Vec2::splat(0.5)) * size,
                None => Vec2::ZERO,
            },
        };
        transform.center() + rotate(local, transform.angle)
    }

    /// Where a handle is drawn and grabbed: its true position pulled inside
    /// the clip area
    fn handle_target(&self, transform: &OverlayTransform, handle: OverlayHandle) -> Vec2 {
        let position = Self::handle_position(transform, handle);
        match self.clip {
            Some(clip) => position.clamp(clip.min, clip.max),
            None => position,
        }
    }

    /// Handle under `point`, if the overlay takes gestures
    pub fn handle_at(&self, point: Vec2) -> Option<OverlayHandle> {
        if !self.interactive {
            return None;
        }
        let transform = self.transform?;

        let near = |handle: OverlayHandle| {
            let d = (self.handle_target(&transform, handle) - point).abs();
            d.x <= HANDLE_RADIUS && d.y <= HANDLE_RADIUS
        };

        if near(OverlayHandle::Rotate) {
            return Some(OverlayHandle::Rotate);
        }
        if let Some(handle) = OverlayHandle::SCALE_HANDLES.into_iter().find(|&h| near(h)) {
            return Some(handle);
        }

        let local = rotate(point - transform.center(), -transform.angle);
        let half = transform.scaled_size().abs() * 0.5;
        (local.x.abs() <= half.x && local.y.abs() <= half.y).then_some(OverlayHandle::Body)
    }

    /// Start a gesture if `point` is on the rectangle or one of its handles
    pub fn begin_drag(&mut self, point: Vec2) -> bool {
        let (Some(handle), Some(start)) = (self.handle_at(point), self.transform) else {
            return false;
        };
        tracing::debug!("Overlay drag started on {:?}", handle);
        self.drag = Some(Drag {
            handle,
            start,
            pointer_start: point,
        });
        true
    }

    /// Continue the gesture with the pointer at `point`
    pub fn drag_to(&mut self, point: Vec2) -> Option<OverlayEvent> {
        let drag = self.drag?;
        let transform = match drag.handle {
            OverlayHandle::Body => {
                let delta = point - drag.pointer_start;
                OverlayTransform {
                    left: drag.start.left + delta.x,
                    top: drag.start.top + delta.y,
                    ..drag.start
                }
            }
            OverlayHandle::Rotate => {
                let d = point - drag.start.center();
                OverlayTransform {
                    angle: d.x.atan2(-d.y).to_degrees(),
                    ..drag.start
                }
            }
            handle => resize(&drag.start, handle, point),
        };
        self.transform = Some(transform);
        Some(OverlayEvent::Transform {
            handle: drag.handle,
            transform,
        })
    }

    /// Finish the gesture. Nothing is reported if the rectangle never changed.
    pub fn end_drag(&mut self) -> Option<OverlayEvent> {
        let drag = self.drag.take()?;
        let transform = self.transform?;
        (transform != drag.start).then_some(OverlayEvent::Modified { transform })
    }

    /// Paint the rectangle and, when interactive, its handles
    pub fn paint(&self, painter: &egui::Painter) {
        let Some(transform) = self.transform else {
            return;
        };

        let stroke = egui::Stroke::new(1.0, STROKE_COLOR);
        let corners = [
            OverlayHandle::TopLeft,
            OverlayHandle::TopRight,
            OverlayHandle::BottomRight,
            OverlayHandle::BottomLeft,
        ]
        .map(|h| pos(Self::handle_position(&transform, h)));
        painter.add(egui::Shape::closed_line(corners.to_vec(), stroke));

        if !self.interactive {
            return;
        }

        let top = pos(self.handle_target(&transform, OverlayHandle::TopMiddle));
        let knob = pos(self.handle_target(&transform, OverlayHandle::Rotate));
        painter.line_segment([top, knob], stroke);
        painter.circle(knob, HANDLE_RADIUS, egui::Color32::WHITE, stroke);

        for handle in OverlayHandle::SCALE_HANDLES {
            let center = pos(self.handle_target(&transform, handle));
            let rect = egui::Rect::from_center_size(center, egui::Vec2::splat(HANDLE_RADIUS * 2.0));
            painter.rect(rect, 0.0, egui::Color32::WHITE, stroke);
        }
    }
}

/// New transform for a resize from `handle` with the pointer at `point`.
///
/// The opposite side stays fixed. Dragging past it flips the rectangle.
fn resize(start: &OverlayTransform, handle: OverlayHandle, point: Vec2) -> OverlayTransform {
    let center = start.center();
    let local = center + rotate(point - center, -start.angle);
    let bounds = start.bounds();
    let mut transform = *start;

    let axis = |edge: Option<Edge>, min: f32, max: f32, p: f32, base: f32| match edge {
        Some(Edge::Start) => Some((max, max - p, base)),
        Some(Edge::End) => Some((min, p - min, base)),
        _ => None,
    };

    if let Some((anchor, extent, base)) =
        axis(handle.horizontal(), bounds.min.x, bounds.max.x, local.x, start.width)
    {
        if base > 0.0 {
            transform.scale_x = extent.abs() / base;
        }
        transform.flip_x = start.flip_x ^ (extent < 0.0);
        transform.left = anchor.min(local.x);
    }

    if let Some((anchor, extent, base)) =
        axis(handle.vertical(), bounds.min.y, bounds.max.y, local.y, start.height)
    {
        if base > 0.0 {
            transform.scale_y = extent.abs() / base;
        }
        transform.flip_y = start.flip_y ^ (extent < 0.0);
        transform.top = anchor.min(local.y);
    }

    transform
}

impl OverlayWidget for EguiOverlay {
    fn create_or_move_rect(&mut self, rect: PixelRect) {
        self.transform = Some(OverlayTransform::from_rect(rect));
    }

    fn clear(&mut self) {
        self.transform = None;
        self.drag = None;
    }

    fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
        if !interactive {
            self.drag = None;
        }
    }

    fn rect(&self) -> Option<PixelRect> {
        self.transform.map(|t| t.bounds())
    }
}
