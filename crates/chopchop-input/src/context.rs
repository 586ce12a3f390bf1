//! Callback contexts delivered by the platform binding layer.

use glam::Vec2;

use crate::action::ActionName;

/// Lifecycle stage of an action callback.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Action is not enabled.
    Disabled,
    /// Enabled, waiting for input.
    #[default]
    Waiting,
    /// Input began but the gesture has not completed.
    Started,
    /// Gesture completed this frame.
    Performed,
    /// Gesture aborted or released.
    Canceled,
}

/// One platform callback: which action, at what phase, with what value.
///
/// Button actions carry `Vec2::ZERO`. `device` is the originating device's
/// name as the platform reports it (`"Mouse"`, `"Keyboard"`, `"Gamepad"`);
/// it is optional because synthetic or composite sources have none.
#[derive(Clone, Debug, PartialEq)]
pub struct ActionContext {
    pub action: ActionName,
    pub phase: Phase,
    pub value: Vec2,
    pub device: Option<String>,
}

impl ActionContext {
    /// A button callback with no value.
    pub fn button(action: ActionName, phase: Phase) -> Self {
        Self {
            action,
            phase,
            value: Vec2::ZERO,
            device: None,
        }
    }

    /// An axis callback carrying a 2D value.
    pub fn axis(action: ActionName, phase: Phase, value: Vec2) -> Self {
        Self {
            action,
            phase,
            value,
            device: None,
        }
    }

    /// Tag the context with its originating device name.
    pub fn with_device(mut self, device: impl Into<String>) -> Self {
        self.device = Some(device.into());
        self
    }

    /// Whether the originating device is the named pointer class.
    ///
    /// Missing identity is never a pointer.
    pub fn is_device(&self, class_name: &str) -> bool {
        self.device.as_deref() == Some(class_name)
    }
}
