//! Default bindings: the fixed binding table.
//!
//! Bindings cannot be remapped at runtime; only tuning (deadzone,
//! sensitivity) comes from `input.ron`.

use bevy::prelude::*;
use chopchop_input::ActionName;

use super::binding::{AxisBinding, AxisSource, Binding, InputSource};

/// Build the button binding table for keyboard, mouse and gamepad.
pub fn default_bindings() -> Vec<Binding> {
    let mut b = Vec::with_capacity(32);

    // ====================================================================
    // Gameplay
    // ====================================================================

    b.push(Binding::key(KeyCode::Space, ActionName::Jump, "Jump"));
    b.push(Binding::gamepad(GamepadButton::South, ActionName::Jump, "Jump"));
    b.push(Binding::mouse(MouseButton::Left, ActionName::Attack, "Attack"));
    b.push(Binding::gamepad(GamepadButton::West, ActionName::Attack, "Attack"));
    b.push(Binding::key(KeyCode::KeyE, ActionName::Interact, "Interact"));
    b.push(Binding::gamepad(GamepadButton::North, ActionName::Interact, "Interact"));
    b.push(Binding::key(KeyCode::KeyQ, ActionName::ExtraAction, "Extra action"));
    b.push(Binding::gamepad(GamepadButton::East, ActionName::ExtraAction, "Extra action"));
    b.push(Binding::key(KeyCode::Escape, ActionName::Pause, "Pause"));
    b.push(Binding::gamepad(GamepadButton::Start, ActionName::Pause, "Pause"));

    // Held: mouse drives the camera while down
    b.push(Binding::mouse(MouseButton::Right, ActionName::MouseControlCamera, "Mouse look"));

    // ====================================================================
    // Menus
    // ====================================================================

    let steps = [
        (KeyCode::ArrowUp, GamepadButton::DPadUp, Vec2::Y, "Select up"),
        (KeyCode::ArrowDown, GamepadButton::DPadDown, Vec2::NEG_Y, "Select down"),
        (KeyCode::ArrowLeft, GamepadButton::DPadLeft, Vec2::NEG_X, "Select left"),
        (KeyCode::ArrowRight, GamepadButton::DPadRight, Vec2::X, "Select right"),
    ];
    for (key, pad, dir, desc) in steps {
        b.push(Binding::step(InputSource::Key(key), ActionName::MoveSelection, dir, desc));
        b.push(Binding::step(InputSource::GamepadButton(pad), ActionName::MoveSelection, dir, desc));
    }

    b.push(Binding::mouse(MouseButton::Left, ActionName::Click, "Click"));
    b.push(Binding::key(KeyCode::Enter, ActionName::Submit, "Submit"));
    b.push(Binding::gamepad(GamepadButton::South, ActionName::Submit, "Submit"));
    b.push(Binding::key(KeyCode::Escape, ActionName::Cancel, "Back"));
    b.push(Binding::gamepad(GamepadButton::East, ActionName::Cancel, "Back"));

    b
}

/// Build the continuous binding table.
pub fn default_axis_bindings() -> Vec<AxisBinding> {
    vec![
        AxisBinding::new(AxisSource::WASD, ActionName::Move, "Move"),
        AxisBinding::new(AxisSource::LeftStick, ActionName::Move, "Move"),
        AxisBinding::new(AxisSource::MouseMotion, ActionName::RotateCamera, "Look"),
        AxisBinding::new(AxisSource::RightStick, ActionName::RotateCamera, "Look"),
        AxisBinding::new(AxisSource::MouseMotion, ActionName::MouseMove, "Point"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chopchop_input::ControlSet;
    use std::collections::HashSet;
    use strum::IntoEnumIterator;

    #[test]
    fn test_every_action_is_bound() {
        let mut bound: HashSet<ActionName> = default_bindings().iter().map(|b| b.action).collect();
        bound.extend(default_axis_bindings().iter().map(|b| b.action));

        for action in ActionName::iter() {
            assert!(bound.contains(&action), "{action} has no binding");
        }
    }

    #[test]
    fn test_no_duplicate_source_within_a_set() {
        let bindings = default_bindings();
        for (i, a) in bindings.iter().enumerate() {
            for b in &bindings[i + 1..] {
                let same_set = a.action.control_set() == b.action.control_set();
                assert!(
                    !(same_set && a.source == b.source),
                    "{:?} bound twice in {}: {} / {}",
                    a.source,
                    a.action.control_set(),
                    a.action,
                    b.action
                );
            }
        }
    }

    #[test]
    fn test_escape_pauses_and_cancels() {
        let escape: Vec<(ActionName, ControlSet)> = default_bindings()
            .iter()
            .filter(|b| b.source == InputSource::Key(KeyCode::Escape))
            .map(|b| (b.action, b.action.control_set()))
            .collect();
        assert_eq!(
            escape,
            vec![
                (ActionName::Pause, ControlSet::Gameplay),
                (ActionName::Cancel, ControlSet::Menus),
            ]
        );
    }
}
