//! Per-frame input snapshot

/// Digital input (direction keys)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DigitalInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// Analog input (pointer, wheel)
///
/// `x`, `y` and `zoom` are deltas accumulated since the previous snapshot.
/// `mouse_x` / `mouse_y` are the last known pointer position in normalized
/// device space and persist between snapshots.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnalogInput {
    pub x: f32,
    pub y: f32,
    pub mouse_x: f32,
    pub mouse_y: f32,
    pub zoom: f32,
    pub touching: bool,
}

/// Immutable snapshot of input state, produced once per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    pub digital: DigitalInput,
    pub analog: AnalogInput,
}

impl InputSnapshot {
    /// Returns true if any pan intent (keys or drag) is present.
    pub fn has_pan_intent(&self) -> bool {
        self.digital.up
            || self.digital.down
            || self.digital.left
            || self.digital.right
            || self.analog.x != 0.0
            || self.analog.y != 0.0
    }

    /// Returns true if a zoom delta was accumulated this frame.
    pub fn has_zoom_intent(&self) -> bool {
        self.analog.zoom != 0.0
    }
}
