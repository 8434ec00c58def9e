//! Viewport state
//!
//! [`ViewportContext`] owns everything the viewport mutates: camera,
//! coordinate transform, input, action mode, selection, the geometry engine
//! and the overlay. Platform callbacks only queue [`ViewportEvent`]s; the
//! queue is applied at the start of [`ViewportContext::frame`].

mod gpu;

pub use gpu::{SharedViewportGpu, ViewportGpu};

use std::collections::VecDeque;

use glam::{Mat4, Vec2};

use drape_core::{DrawBuffers, GeometryEngine, Pattern};
use drape_renderer::{Camera, CoordinateTransform, RendererConfig, ViewportExtents};

use crate::actions::{ActionDispatcher, ActionMode};
use crate::events::ViewportEvent;
use crate::input::InputHandler;
use crate::overlay::{EguiOverlay, OverlayEvent, OverlayWidget};
use crate::selection::{ScreenMapping, SelectionMachine};

/// The viewport the application runs: the in-memory pattern engine behind
/// the egui overlay
pub type PatternViewport = ViewportContext<Pattern, EguiOverlay>;

/// Output of one frame
#[derive(Debug)]
pub struct FramePacket<'a> {
    /// View matrix returned by the camera
    pub view: Mat4,
    /// Projection times view, for the camera uniform
    pub view_proj: Mat4,
    pub buffers: &'a DrawBuffers,
    /// True if `buffers` changed since the previous frame
    pub buffers_changed: bool,
}

/// State of one interactive viewport
pub struct ViewportContext<E: GeometryEngine, O: OverlayWidget> {
    camera: Camera,
    transform: CoordinateTransform,
    input: InputHandler,
    actions: ActionDispatcher,
    selection: SelectionMachine,
    engine: Option<E>,
    overlay: O,
    events: VecDeque<ViewportEvent>,
    buffers: DrawBuffers,
    buffers_dirty: bool,
}

impl<E: GeometryEngine, O: OverlayWidget> ViewportContext<E, O> {
    /// Create a context without an engine. Engine-dependent events are
    /// ignored until [`ViewportContext::set_engine`] is called.
    pub fn new(config: &RendererConfig, mut overlay: O) -> Self {
        let transform = CoordinateTransform::new(&config.camera);
        let camera = Camera::new(config.camera.clone(), transform.extents().aspect());
        overlay.set_interactive(false);

        Self {
            camera,
            transform,
            input: InputHandler::new(),
            actions: ActionDispatcher::new(),
            selection: SelectionMachine::new(),
            engine: None,
            overlay,
            events: VecDeque::new(),
            buffers: DrawBuffers::new(),
            buffers_dirty: true,
        }
    }

    pub fn set_engine(&mut self, engine: E) {
        self.engine = Some(engine);
        self.selection = SelectionMachine::new();
        self.overlay.clear();
        self.buffers_dirty = true;
        tracing::info!("Geometry engine ready");
    }

    pub fn engine(&self) -> Option<&E> {
        self.engine.as_ref()
    }

    /// Mutable engine access; the draw buffers are rebuilt next frame
    pub fn engine_mut(&mut self) -> Option<&mut E> {
        self.buffers_dirty = true;
        self.engine.as_mut()
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn coordinate_transform(&self) -> &CoordinateTransform {
        &self.transform
    }

    pub fn overlay(&self) -> &O {
        &self.overlay
    }

    pub fn overlay_mut(&mut self) -> &mut O {
        &mut self.overlay
    }

    pub fn action_mode(&self) -> ActionMode {
        self.actions.mode()
    }

    pub fn selection(&self) -> &SelectionMachine {
        &self.selection
    }

    /// Queue an event for the next frame
    pub fn push_event(&mut self, event: impl Into<ViewportEvent>) {
        self.events.push_back(event.into());
    }

    /// Apply queued events, advance the camera and refresh draw buffers
    pub fn frame(&mut self, delta_time: f32) -> FramePacket<'_> {
        while let Some(event) = self.events.pop_front() {
            self.handle_event(event);
        }

        let input = self.input.poll();
        let suppression = self.selection.camera_suppression();
        let before = self.camera.position;
        let view = self.camera.update(delta_time, &input, suppression);
        if self.camera.position != before {
            let mapping = ScreenMapping::new(&self.transform, &self.camera);
            self.selection.follow_camera(&mut self.overlay, &mapping);
        }

        let buffers_changed = self.refresh_buffers();
        FramePacket {
            view,
            view_proj: self.camera.projection_matrix() * view,
            buffers: &self.buffers,
            buffers_changed,
        }
    }

    fn refresh_buffers(&mut self) -> bool {
        if !self.buffers_dirty {
            return false;
        }
        self.buffers_dirty = false;
        self.buffers = match &self.engine {
            Some(engine) => engine.recompute_draw_buffers(),
            None => DrawBuffers::new(),
        };
        true
    }

    fn handle_event(&mut self, event: ViewportEvent) {
        match event {
            ViewportEvent::Resize { min, size } => self.resize(min, size),
            ViewportEvent::KeyDown(key) => self.input.set_key(key, true),
            ViewportEvent::KeyUp(key) => self.input.set_key(key, false),
            ViewportEvent::PointerDown { position } => {
                self.input.pointer_down();
                if self.actions.is_selecting() {
                    self.begin_box(position);
                }
            }
            ViewportEvent::PointerUp { position } => {
                self.input.pointer_up();
                if self.actions.is_selecting() {
                    self.finish_box(position);
                }
            }
            ViewportEvent::PointerMove { position, delta } => {
                let normalized = self.transform.to_normalized(position);
                self.input
                    .pointer_move(normalized, delta, self.actions.is_panning());
            }
            ViewportEvent::Wheel { delta_y } => self.input.wheel(delta_y),
            ViewportEvent::SetActionMode(mode) => {
                self.actions.set_mode(mode, &mut self.overlay);
                if !self.actions.is_selecting() {
                    self.selection.cancel_box();
                }
            }
            ViewportEvent::SetView(view) => {
                let Some(engine) = self.engine.as_mut() else {
                    tracing::debug!("No engine, view change ignored");
                    return;
                };
                self.selection.deselect(engine, &mut self.overlay);
                engine.set_view(view);
                self.buffers_dirty = true;
            }
            ViewportEvent::Overlay(event) => self.handle_overlay_event(event),
        }
    }

    fn resize(&mut self, min: Vec2, size: Vec2) {
        let Some(extents) = ViewportExtents::from_rect(min, size) else {
            return;
        };
        if extents == self.transform.extents() {
            return;
        }
        tracing::debug!("Viewport resized to {}x{}", size.x, size.y);
        self.transform.set_extents(extents);
        self.camera.update_aspect(extents.aspect());

        let mapping = ScreenMapping::new(&self.transform, &self.camera);
        self.selection.follow_camera(&mut self.overlay, &mapping);
    }

    fn begin_box(&mut self, position: Vec2) {
        let Some(engine) = self.engine.as_mut() else {
            return;
        };
        let mapping = ScreenMapping::new(&self.transform, &self.camera);
        let down = mapping.world_from_pixel(position);
        self.selection.begin_box(down, engine, &mut self.overlay);
        self.buffers_dirty = true;
    }

    fn finish_box(&mut self, position: Vec2) {
        let Some(engine) = self.engine.as_mut() else {
            return;
        };
        let mapping = ScreenMapping::new(&self.transform, &self.camera);
        let up = mapping.world_from_pixel(position);
        self.selection
            .finish_box(up, engine, &mut self.overlay, &mapping);
        self.buffers_dirty = true;
    }

    fn handle_overlay_event(&mut self, event: OverlayEvent) {
        let Some(engine) = self.engine.as_mut() else {
            return;
        };
        let mapping = ScreenMapping::new(&self.transform, &self.camera);
        match event {
            OverlayEvent::Transform { handle, transform } => {
                self.selection
                    .on_transform(handle, &transform, engine, &mapping);
            }
            OverlayEvent::Modified { transform } => {
                self.selection
                    .on_modified(&transform, engine, &mut self.overlay, &mapping);
            }
        }
        self.buffers_dirty = true;
    }
}
