//! Pattern viewport panel

use glam::Vec2;

use crate::events::ViewportEvent;
use crate::overlay::PixelRect;
use crate::state::{PatternViewport, SharedViewportGpu};

/// Longest frame step fed to the camera
const MAX_FRAME_TIME: f32 = 0.1;

fn to_vec2(v: egui::Vec2) -> Vec2 {
    Vec2::new(v.x, v.y)
}

/// 2D pattern viewport panel
pub struct ViewportPanel {
    last_rect: Option<egui::Rect>,
    /// Primary button went down on the surface
    pointer_down: bool,
    /// Primary button went down on the overlay
    overlay_drag: bool,
}

impl ViewportPanel {
    pub fn new() -> Self {
        Self {
            last_rect: None,
            pointer_down: false,
            overlay_drag: false,
        }
    }

    /// Show the viewport, feeding this frame's input to `viewport` and
    /// rendering it through `gpu`
    pub fn ui(
        &mut self,
        ui: &mut egui::Ui,
        viewport: &mut PatternViewport,
        gpu: &SharedViewportGpu,
        render_state: &egui_wgpu::RenderState,
    ) {
        let available_size = ui.available_size();
        if available_size.x < 1.0 || available_size.y < 1.0 {
            return;
        }

        let (rect, response) = ui.allocate_exact_size(available_size, egui::Sense::click_and_drag());
        viewport.overlay_mut().set_clip(PixelRect {
            min: Vec2::new(rect.min.x, rect.min.y),
            max: Vec2::new(rect.max.x, rect.max.y),
        });
        self.handle_input(ui, &response, viewport);

        let dt = ui.input(|i| i.stable_dt).min(MAX_FRAME_TIME);
        let pixels_per_point = ui.ctx().pixels_per_point();
        let width = (rect.width() * pixels_per_point).round() as u32;
        let height = (rect.height() * pixels_per_point).round() as u32;

        let texture_id = {
            let packet = viewport.frame(dt);
            let mut state = gpu.lock();
            state.update_camera(packet.view_proj);
            if packet.buffers_changed {
                state.upload(packet.buffers);
            }
            let mut egui_renderer = render_state.renderer.write();
            let tex_id = state.ensure_texture(width, height, &mut egui_renderer);
            state.render();
            tex_id
        };

        let painter = ui.painter_at(rect);
        painter.image(
            texture_id,
            rect,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );
        viewport.overlay().paint(&painter);

        // The camera keeps gliding after input stops
        ui.ctx().request_repaint();
    }

    fn handle_input(&mut self, ui: &egui::Ui, response: &egui::Response, viewport: &mut PatternViewport) {
        let rect = response.rect;
        if self.last_rect != Some(rect) {
            self.last_rect = Some(rect);
            viewport.push_event(ViewportEvent::Resize {
                min: Vec2::new(rect.min.x, rect.min.y),
                size: to_vec2(rect.size()),
            });
        }

        let (pointer, delta, pressed, released, scroll) = ui.input(|i| {
            (
                i.pointer.latest_pos(),
                i.pointer.delta(),
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
                i.raw_scroll_delta.y,
            )
        });
        let hovered = response.contains_pointer();

        if let Some(pointer) = pointer {
            let position = Vec2::new(pointer.x, pointer.y);

            if pressed && hovered {
                let overlay = viewport.overlay_mut();
                if overlay.is_interactive() && overlay.begin_drag(position) {
                    self.overlay_drag = true;
                } else {
                    self.pointer_down = true;
                    viewport.push_event(ViewportEvent::PointerDown { position });
                }
            }

            if delta != egui::Vec2::ZERO {
                if self.overlay_drag {
                    if let Some(event) = viewport.overlay_mut().drag_to(position) {
                        viewport.push_event(event);
                    }
                } else if hovered || self.pointer_down {
                    viewport.push_event(ViewportEvent::PointerMove {
                        position,
                        delta: to_vec2(delta),
                    });
                }
            }

            if released {
                if self.overlay_drag {
                    self.overlay_drag = false;
                    if let Some(event) = viewport.overlay_mut().end_drag() {
                        viewport.push_event(event);
                    }
                } else if self.pointer_down {
                    self.pointer_down = false;
                    viewport.push_event(ViewportEvent::PointerUp { position });
                }
            }
        }

        // egui reports positive y when scrolling up
        if hovered && scroll != 0.0 {
            viewport.push_event(ViewportEvent::Wheel { delta_y: -scroll });
        }
    }
}

impl Default for ViewportPanel {
    fn default() -> Self {
        Self::new()
    }
}
