//! Inbound viewport events
//!
//! Every platform callback (resize, keyboard, pointer, wheel, toolbar and
//! overlay gestures) is turned into a [`ViewportEvent`] and queued on the
//! [`ViewportContext`](crate::state::ViewportContext). The queue is drained
//! once per frame, in arrival order.

use glam::Vec2;

use drape_core::ViewMode;

use crate::actions::ActionMode;
use crate::overlay::OverlayEvent;

/// Direction keys the viewport reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
}

impl KeyCode {
    /// Map an egui key. Keys other than the arrows are not viewport keys.
    pub fn from_egui(key: egui::Key) -> Option<Self> {
        match key {
            egui::Key::ArrowUp => Some(Self::ArrowUp),
            egui::Key::ArrowDown => Some(Self::ArrowDown),
            egui::Key::ArrowLeft => Some(Self::ArrowLeft),
            egui::Key::ArrowRight => Some(Self::ArrowRight),
            _ => None,
        }
    }
}

/// A single inbound event. Pixel positions are in window coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewportEvent {
    /// The rendering surface moved or changed size
    Resize { min: Vec2, size: Vec2 },
    KeyDown(KeyCode),
    KeyUp(KeyCode),
    /// Primary button pressed on the surface (not on the overlay)
    PointerDown { position: Vec2 },
    /// Primary button released after a [`ViewportEvent::PointerDown`]
    PointerUp { position: Vec2 },
    /// Pointer moved by `delta` pixels to `position`
    PointerMove { position: Vec2, delta: Vec2 },
    /// Wheel scrolled; positive `delta_y` scrolls down (zooms out)
    Wheel { delta_y: f32 },
    SetActionMode(ActionMode),
    SetView(ViewMode),
    Overlay(OverlayEvent),
}

/// Remove arrow key events from `events` so egui does not act on them, and
/// return them as viewport key events. Repeats are dropped.
pub fn take_arrow_keys(events: &mut Vec<egui::Event>) -> Vec<ViewportEvent> {
    let mut keys = Vec::new();
    events.retain(|event| {
        let egui::Event::Key {
            key,
            pressed,
            repeat,
            ..
        } = event
        else {
            return true;
        };
        let Some(code) = KeyCode::from_egui(*key) else {
            return true;
        };
        if !*repeat {
            keys.push(if *pressed {
                ViewportEvent::KeyDown(code)
            } else {
                ViewportEvent::KeyUp(code)
            });
        }
        false
    });
    keys
}

impl From<OverlayEvent> for ViewportEvent {
    fn from(event: OverlayEvent) -> Self {
        Self::Overlay(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(key: egui::Key, pressed: bool, repeat: bool) -> egui::Event {
        egui::Event::Key {
            key,
            physical_key: None,
            pressed,
            repeat,
            modifiers: egui::Modifiers::NONE,
        }
    }

    #[test]
    fn test_arrow_keys_are_taken_from_egui() {
        let mut events = vec![
            key(egui::Key::ArrowLeft, true, false),
            key(egui::Key::A, true, false),
            key(egui::Key::ArrowLeft, true, true),
            egui::Event::Text("a".to_string()),
            key(egui::Key::ArrowLeft, false, false),
        ];

        let taken = take_arrow_keys(&mut events);
        assert_eq!(
            taken,
            vec![
                ViewportEvent::KeyDown(KeyCode::ArrowLeft),
                ViewportEvent::KeyUp(KeyCode::ArrowLeft),
            ]
        );
        assert_eq!(
            events,
            vec![key(egui::Key::A, true, false), egui::Event::Text("a".to_string())]
        );
    }
}
