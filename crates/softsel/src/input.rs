//! Host-agnostic input events and the key bindings the gesture listens to.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Keyboard keys the tool can be bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// A letter or digit key, uppercase
    Char(char),
    Escape,
    Enter,
    Space,
    Shift,
    Ctrl,
    Alt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerButton {
    Left,
    Middle,
    Right,
}

/// One event from the host. `time` is seconds on a monotonic clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyPress { key: Key, time: f64 },
    KeyRelease { key: Key, time: f64 },
    ButtonPress { button: PointerButton, pos: Vec2, time: f64 },
    ButtonRelease { button: PointerButton, pos: Vec2, time: f64 },
    PointerMove { pos: Vec2 },
}

/// Keys and buttons driving the radius gesture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputBindings {
    /// Held while dragging to adjust the radius; double press cancels the tool
    pub hold_key: Key,
    /// Button whose drag adjusts the radius
    pub drag_button: PointerButton,
    /// Cancels the gesture and the tool
    pub cancel_key: Key,
    /// Completes the tool
    pub confirm_key: Key,
}

impl Default for InputBindings {
    fn default() -> Self {
        Self {
            hold_key: Key::Char('B'),
            drag_button: PointerButton::Middle,
            cancel_key: Key::Escape,
            confirm_key: Key::Enter,
        }
    }
}

/// Detects press, release, press of one key inside a time window.
#[derive(Debug, Clone, Default)]
pub struct DoublePress {
    last_release: Option<f64>,
}

impl DoublePress {
    /// Record a press. Returns true when it completes a double press
    /// (strictly less than `window` seconds after the previous release).
    pub fn press(&mut self, time: f64, window: f64) -> bool {
        match self.last_release.take() {
            Some(released) => time - released < window,
            None => false,
        }
    }

    pub fn release(&mut self, time: f64) {
        self.last_release = Some(time);
    }

    pub fn reset(&mut self) {
        self.last_release = None;
    }
}
