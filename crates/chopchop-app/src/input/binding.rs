//! Binding types: map physical controls to router actions.

use bevy::prelude::*;
use chopchop_input::ActionName;

/// Device names reported in action contexts.
pub const KEYBOARD: &str = "Keyboard";
pub const MOUSE: &str = "Mouse";
pub const GAMEPAD: &str = "Gamepad";

/// A physical button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputSource {
    /// A keyboard key
    Key(KeyCode),
    /// A mouse button
    Mouse(MouseButton),
    /// A gamepad button (any connected gamepad)
    GamepadButton(GamepadButton),
}

impl InputSource {
    /// Device name this source reports as.
    pub fn device(&self) -> &'static str {
        match self {
            InputSource::Key(_) => KEYBOARD,
            InputSource::Mouse(_) => MOUSE,
            InputSource::GamepadButton(_) => GAMEPAD,
        }
    }
}

/// A button binding: press → Performed, release → Canceled.
#[derive(Clone, Debug)]
pub struct Binding {
    pub source: InputSource,
    pub action: ActionName,
    /// Value carried by the context. Zero for plain buttons; a unit
    /// direction for step bindings like arrow-key navigation.
    pub value: Vec2,
    /// Human-readable description (for the hint line)
    pub description: String,
}

impl Binding {
    pub fn key(key: KeyCode, action: ActionName, desc: impl Into<String>) -> Self {
        Self::button(InputSource::Key(key), action, desc)
    }

    pub fn mouse(button: MouseButton, action: ActionName, desc: impl Into<String>) -> Self {
        Self::button(InputSource::Mouse(button), action, desc)
    }

    pub fn gamepad(button: GamepadButton, action: ActionName, desc: impl Into<String>) -> Self {
        Self::button(InputSource::GamepadButton(button), action, desc)
    }

    fn button(source: InputSource, action: ActionName, desc: impl Into<String>) -> Self {
        Self {
            source,
            action,
            value: Vec2::ZERO,
            description: desc.into(),
        }
    }

    /// A press that reports a fixed direction (menu navigation).
    pub fn step(source: InputSource, action: ActionName, direction: Vec2, desc: impl Into<String>) -> Self {
        Self {
            source,
            action,
            value: direction,
            description: desc.into(),
        }
    }
}

/// A continuous 2D source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AxisSource {
    /// Four keys composed into a vector (WASD)
    Keys {
        up: KeyCode,
        down: KeyCode,
        left: KeyCode,
        right: KeyCode,
    },
    LeftStick,
    RightStick,
    /// Accumulated mouse delta for the frame
    MouseMotion,
}

impl AxisSource {
    pub const WASD: AxisSource = AxisSource::Keys {
        up: KeyCode::KeyW,
        down: KeyCode::KeyS,
        left: KeyCode::KeyA,
        right: KeyCode::KeyD,
    };

    pub fn device(&self) -> &'static str {
        match self {
            AxisSource::Keys { .. } => KEYBOARD,
            AxisSource::LeftStick | AxisSource::RightStick => GAMEPAD,
            AxisSource::MouseMotion => MOUSE,
        }
    }

    /// Deltas are per-frame impulses: an unchanged nonzero value is still
    /// new input. Held positions (keys, sticks) only report changes.
    pub fn is_delta(&self) -> bool {
        matches!(self, AxisSource::MouseMotion)
    }
}

/// A continuous binding: value changes → Performed, return to zero → Canceled.
#[derive(Clone, Debug)]
pub struct AxisBinding {
    pub source: AxisSource,
    pub action: ActionName,
    pub description: String,
}

impl AxisBinding {
    pub fn new(source: AxisSource, action: ActionName, desc: impl Into<String>) -> Self {
        Self {
            source,
            action,
            description: desc.into(),
        }
    }
}

/// Compose four held keys into a direction, +Y up.
pub fn key_vector(keys: &ButtonInput<KeyCode>, up: KeyCode, down: KeyCode, left: KeyCode, right: KeyCode) -> Vec2 {
    let mut v = Vec2::ZERO;
    if keys.pressed(up) {
        v.y += 1.0;
    }
    if keys.pressed(down) {
        v.y -= 1.0;
    }
    if keys.pressed(left) {
        v.x -= 1.0;
    }
    if keys.pressed(right) {
        v.x += 1.0;
    }
    v.normalize_or_zero()
}
