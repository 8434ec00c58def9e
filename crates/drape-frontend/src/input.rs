//! Input accumulation
//!
//! Events update an [`InputHandler`] as they are dispatched. Once per frame
//! [`InputHandler::poll`] drains the accumulated analog deltas into an
//! immutable [`InputSnapshot`] for the camera.

use glam::Vec2;

use drape_core::{AnalogInput, DigitalInput, InputSnapshot};

use crate::events::KeyCode;

/// Accumulates keyboard, pointer and wheel input between frames
#[derive(Debug, Clone, Default)]
pub struct InputHandler {
    digital: DigitalInput,
    /// Pointer movement while dragging, in pixels
    pan: Vec2,
    /// Sum of wheel directions
    zoom: f32,
    /// Last pointer position in normalized device space
    mouse: Vec2,
    touching: bool,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press or release
    pub fn set_key(&mut self, key: KeyCode, pressed: bool) {
        match key {
            KeyCode::ArrowUp => self.digital.up = pressed,
            KeyCode::ArrowDown => self.digital.down = pressed,
            KeyCode::ArrowLeft => self.digital.left = pressed,
            KeyCode::ArrowRight => self.digital.right = pressed,
        }
    }

    pub fn pointer_down(&mut self) {
        self.touching = true;
    }

    pub fn pointer_up(&mut self) {
        self.touching = false;
    }

    /// Record pointer motion.
    ///
    /// Only panning motion is tracked: outside pan mode the pointer belongs
    /// to the selection tools and the last known position is left alone.
    pub fn pointer_move(&mut self, normalized: Vec2, movement: Vec2, panning: bool) {
        if !panning {
            return;
        }
        self.mouse = normalized;
        if self.touching {
            self.pan += movement;
        }
    }

    /// Record a wheel step. Only the direction is kept, since the magnitude
    /// differs wildly between devices.
    pub fn wheel(&mut self, delta_y: f32) {
        if delta_y != 0.0 {
            self.zoom += delta_y.signum();
        }
    }

    /// Snapshot the current state and reset the accumulated deltas
    pub fn poll(&mut self) -> InputSnapshot {
        let snapshot = InputSnapshot {
            digital: self.digital,
            analog: AnalogInput {
                x: self.pan.x,
                y: self.pan.y,
                mouse_x: self.mouse.x,
                mouse_y: self.mouse.y,
                zoom: self.zoom,
                touching: self.touching,
            },
        };
        self.pan = Vec2::ZERO;
        self.zoom = 0.0;
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_drains_analog_deltas() {
        let mut input = InputHandler::new();
        input.pointer_down();
        input.pointer_move(Vec2::new(0.5, -0.25), Vec2::new(3.0, 4.0), true);
        input.pointer_move(Vec2::new(0.6, -0.25), Vec2::new(1.0, -1.0), true);
        input.wheel(120.0);
        input.wheel(3.0);

        let first = input.poll();
        assert_eq!(first.analog.x, 4.0);
        assert_eq!(first.analog.y, 3.0);
        assert_eq!(first.analog.zoom, 2.0);
        assert_eq!(first.analog.mouse_x, 0.6);
        assert!(first.analog.touching);

        let second = input.poll();
        assert_eq!(second.analog.x, 0.0);
        assert_eq!(second.analog.y, 0.0);
        assert_eq!(second.analog.zoom, 0.0);
        // Position and button state persist
        assert_eq!(second.analog.mouse_x, 0.6);
        assert_eq!(second.analog.mouse_y, -0.25);
        assert!(second.analog.touching);
    }

    #[test]
    fn test_wheel_uses_sign_only() {
        let mut input = InputHandler::new();
        input.wheel(-500.0);
        input.wheel(0.0);
        assert_eq!(input.poll().analog.zoom, -1.0);
    }

    #[test]
    fn test_movement_without_button_is_not_pan() {
        let mut input = InputHandler::new();
        input.pointer_move(Vec2::new(0.1, 0.2), Vec2::new(10.0, 10.0), true);
        let snapshot = input.poll();
        assert_eq!(snapshot.analog.x, 0.0);
        assert_eq!(snapshot.analog.mouse_x, 0.1);
        assert!(!snapshot.has_pan_intent());
    }

    #[test]
    fn test_motion_ignored_outside_pan_mode() {
        let mut input = InputHandler::new();
        input.pointer_down();
        input.pointer_move(Vec2::new(0.9, 0.9), Vec2::new(10.0, 10.0), false);
        let snapshot = input.poll();
        assert_eq!(snapshot.analog.x, 0.0);
        assert_eq!(snapshot.analog.mouse_x, 0.0);
    }

    #[test]
    fn test_keys() {
        let mut input = InputHandler::new();
        input.set_key(KeyCode::ArrowUp, true);
        input.set_key(KeyCode::ArrowLeft, true);
        input.set_key(KeyCode::ArrowLeft, false);
        let snapshot = input.poll();
        assert!(snapshot.digital.up);
        assert!(!snapshot.digital.left);
        assert!(snapshot.has_pan_intent());
    }
}
