//! Selection interaction state machine
//!
//! ```text
//! Idle ──pointer down──▶ BoxSelecting ──pointer up──▶ Selected ──▶ Idle
//!                              │ (nothing hit)            │
//!                              ▼                          ▼
//!                             Idle            Moving / Scaling / Rotating
//!                                              (until the overlay commits)
//! ```
//!
//! Edit notifications that arrive in the wrong state are ignored.

mod anchor;

pub use anchor::scale_anchor;

use glam::Vec2;

use drape_core::{GeometryEngine, WorldBBox};
use drape_renderer::{Camera, CameraSuppression, CoordinateTransform};

use crate::overlay::{OverlayHandle, OverlayTransform, OverlayWidget, PixelRect};

/// Pixel/world conversion for the current surface and camera
#[derive(Clone, Copy)]
pub struct ScreenMapping<'a> {
    transform: &'a CoordinateTransform,
    camera: &'a Camera,
}

impl<'a> ScreenMapping<'a> {
    pub fn new(transform: &'a CoordinateTransform, camera: &'a Camera) -> Self {
        Self { transform, camera }
    }

    pub fn world_from_pixel(&self, pixel: Vec2) -> Vec2 {
        self.transform.world_from_pixel(pixel, self.camera)
    }

    /// Pixel position of a world point, clamped to the surface
    pub fn pixel_from_world(&self, world: Vec2) -> Vec2 {
        self.transform.pixel_from_world(world, self.camera)
    }

    /// Screen rectangle covering a world box. Not clamped: a selection larger
    /// than the surface keeps its true size so gestures scale real geometry.
    pub fn pixel_rect(&self, bbox: &WorldBBox) -> PixelRect {
        let top_left = self
            .transform
            .project_to_pixel(Vec2::new(bbox.min.x, bbox.max.y), self.camera);
        let bottom_right = self
            .transform
            .project_to_pixel(Vec2::new(bbox.max.x, bbox.min.y), self.camera);
        PixelRect::from_corners(top_left, bottom_right)
    }
}

/// Edit gesture on the selection
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum EditKind {
    #[default]
    None,
    Moving,
    /// Resizing about a world-space anchor fixed when the gesture began
    Scaling { anchor: Vec2 },
    Rotating,
}

impl EditKind {
    /// Edit started by dragging `handle` of the rectangle around `bbox`
    pub fn for_handle(handle: OverlayHandle, bbox: &WorldBBox) -> Self {
        match handle {
            OverlayHandle::Body => EditKind::Moving,
            OverlayHandle::Rotate => EditKind::Rotating,
            _ => match scale_anchor(handle, bbox) {
                Some(anchor) => EditKind::Scaling { anchor },
                None => EditKind::None,
            },
        }
    }
}

/// An active selection
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionRegion {
    /// Keys reported by the engine
    pub keys: Vec<String>,
    /// Authoritative world bounds of the selection
    pub world_bbox: WorldBBox,
    /// World point under the overlay rectangle's top-left corner
    pub original_world_top_left: Vec2,
    pub edit: EditKind,
}

impl SelectionRegion {
    /// Forward the overlay state to the engine as a live preview.
    ///
    /// Returns the previewed offset for move gestures.
    fn preview<E: GeometryEngine + ?Sized>(
        &self,
        transform: &OverlayTransform,
        engine: &mut E,
        mapping: &ScreenMapping,
    ) -> Vec2 {
        match self.edit {
            EditKind::None => Vec2::ZERO,
            EditKind::Moving => {
                let top_left = mapping.world_from_pixel(transform.top_left());
                let delta = top_left - self.original_world_top_left;
                engine.preview_offset(delta);
                delta
            }
            EditKind::Scaling { anchor } => {
                engine.preview_scale(
                    Vec2::new(transform.scale_x, transform.scale_y),
                    transform.flip_x,
                    transform.flip_y,
                    anchor,
                );
                Vec2::ZERO
            }
            EditKind::Rotating => {
                let center = mapping.world_from_pixel(transform.center());
                engine.preview_rotation(center, transform.angle.to_radians());
                Vec2::ZERO
            }
        }
    }

    /// Place the overlay over the current bounds and re-anchor on it
    fn place_overlay<O: OverlayWidget + ?Sized>(&mut self, overlay: &mut O, mapping: &ScreenMapping) {
        let rect = mapping.pixel_rect(&self.world_bbox);
        overlay.create_or_move_rect(rect);
        self.original_world_top_left = mapping.world_from_pixel(rect.min);
    }
}

/// Selection state
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SelectionState {
    #[default]
    Idle,
    /// Box selection started at a world point
    BoxSelecting { down: Vec2 },
    Selected(SelectionRegion),
}

/// Drives box selection and edit gestures against a geometry engine
#[derive(Debug, Clone, Default)]
pub struct SelectionMachine {
    state: SelectionState,
}

impl SelectionMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn region(&self) -> Option<&SelectionRegion> {
        match &self.state {
            SelectionState::Selected(region) => Some(region),
            _ => None,
        }
    }

    pub fn is_box_selecting(&self) -> bool {
        matches!(self.state, SelectionState::BoxSelecting { .. })
    }

    /// Returns true while a move, scale or rotate gesture is in progress
    pub fn is_editing(&self) -> bool {
        self.region().is_some_and(|r| r.edit != EditKind::None)
    }

    /// Camera input to drop this frame so it does not fight the gesture
    pub fn camera_suppression(&self) -> CameraSuppression {
        let editing = self.is_editing();
        CameraSuppression {
            ignore_zoom: editing,
            ignore_moving: editing || self.is_box_selecting(),
        }
    }

    /// Start a box selection at world point `down`, dropping any selection
    pub fn begin_box<E, O>(&mut self, down: Vec2, engine: &mut E, overlay: &mut O)
    where
        E: GeometryEngine + ?Sized,
        O: OverlayWidget + ?Sized,
    {
        engine.reset_selection();
        overlay.clear();
        tracing::debug!("Box select started at {:?}", down);
        self.state = SelectionState::BoxSelecting { down };
    }

    /// Finish the box selection at world point `up`.
    ///
    /// Returns true if anything was selected.
    pub fn finish_box<E, O>(
        &mut self,
        up: Vec2,
        engine: &mut E,
        overlay: &mut O,
        mapping: &ScreenMapping,
    ) -> bool
    where
        E: GeometryEngine + ?Sized,
        O: OverlayWidget + ?Sized,
    {
        let SelectionState::BoxSelecting { down } = self.state else {
            tracing::debug!("Pointer up without a box selection");
            return false;
        };

        let selection = engine.select_by_box(down, up);
        let bbox = match selection.bbox {
            Some(bbox) if !selection.keys.is_empty() => bbox,
            _ => {
                tracing::debug!("Box select matched nothing");
                self.state = SelectionState::Idle;
                return false;
            }
        };

        let mut region = SelectionRegion {
            keys: selection.keys,
            world_bbox: bbox,
            original_world_top_left: Vec2::ZERO,
            edit: EditKind::None,
        };
        region.place_overlay(overlay, mapping);
        tracing::debug!("Selected {:?}, bounds {:?}", region.keys, bbox.as_rows());
        self.state = SelectionState::Selected(region);
        true
    }

    /// Abandon a box selection in progress
    pub fn cancel_box(&mut self) {
        if self.is_box_selecting() {
            tracing::debug!("Box select cancelled");
            self.state = SelectionState::Idle;
        }
    }

    /// Drop the selection
    pub fn deselect<E, O>(&mut self, engine: &mut E, overlay: &mut O)
    where
        E: GeometryEngine + ?Sized,
        O: OverlayWidget + ?Sized,
    {
        engine.reset_selection();
        overlay.clear();
        self.state = SelectionState::Idle;
    }

    /// Overlay gesture update. The first update of a gesture picks the edit
    /// kind from the grabbed handle.
    pub fn on_transform<E: GeometryEngine + ?Sized>(
        &mut self,
        handle: OverlayHandle,
        transform: &OverlayTransform,
        engine: &mut E,
        mapping: &ScreenMapping,
    ) {
        let SelectionState::Selected(region) = &mut self.state else {
            tracing::debug!("Overlay transform without a selection");
            return;
        };

        if region.edit == EditKind::None {
            region.edit = EditKind::for_handle(handle, &region.world_bbox);
            tracing::debug!("Edit started: {:?}", region.edit);
        }
        region.preview(transform, engine, mapping);
    }

    /// Overlay gesture finished: commit the edit and re-anchor the overlay
    pub fn on_modified<E, O>(
        &mut self,
        transform: &OverlayTransform,
        engine: &mut E,
        overlay: &mut O,
        mapping: &ScreenMapping,
    ) where
        E: GeometryEngine + ?Sized,
        O: OverlayWidget + ?Sized,
    {
        let SelectionState::Selected(region) = &mut self.state else {
            tracing::debug!("Overlay commit without a selection");
            return;
        };

        let edit = region.edit;
        let offset = region.preview(transform, engine, mapping);
        let bbox = match edit {
            EditKind::None => {
                tracing::debug!("Overlay commit without an edit");
                return;
            }
            EditKind::Moving => {
                engine.commit_offset();
                Some(region.world_bbox.offset(offset))
            }
            EditKind::Scaling { anchor } => {
                engine.commit_scale();
                let flip = |f: bool| if f { -1.0 } else { 1.0 };
                let scale = Vec2::new(
                    transform.scale_x * flip(transform.flip_x),
                    transform.scale_y * flip(transform.flip_y),
                );
                Some(region.world_bbox.scale_about(scale, anchor))
            }
            EditKind::Rotating => engine.commit_rotation(),
        };
        region.edit = EditKind::None;

        match bbox {
            Some(bbox) => {
                region.world_bbox = bbox;
                region.place_overlay(overlay, mapping);
                tracing::debug!("Committed {:?}, bounds {:?}", edit, bbox.as_rows());
            }
            None => {
                tracing::debug!("Commit left nothing selected");
                self.deselect(engine, overlay);
            }
        }
    }

    /// Keep the overlay over the selection after the camera moved
    pub fn follow_camera<O: OverlayWidget + ?Sized>(&mut self, overlay: &mut O, mapping: &ScreenMapping) {
        if let SelectionState::Selected(region) = &mut self.state
            && region.edit == EditKind::None
        {
            region.place_overlay(overlay, mapping);
        }
    }
}
