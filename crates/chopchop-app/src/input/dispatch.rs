//! Input dispatcher: the ONE system that reads raw input and feeds the router.
//!
//! Every frame, each binding in the `InputMap` is checked against Bevy's
//! device state and turned into an `ActionContext`:
//! 1. Buttons: just pressed → Performed, just released → Canceled
//! 2. Axes: changed nonzero value → Performed, back to zero → Canceled
//!
//! Contexts go to the router in binding-table order. The router drops those
//! whose control set is disabled.

use bevy::input::mouse::AccumulatedMouseMotion;
use bevy::platform::collections::HashMap;
use bevy::prelude::*;
use chopchop_input::{ActionContext, Phase};

use super::binding::{key_vector, AxisSource, InputSource};
use super::map::InputMap;
use super::{to_glam, InputSettings, Router};

/// Last value reported per axis binding (index into `InputMap::axes`).
#[derive(Resource, Default, Debug)]
pub struct AxisState {
    last: HashMap<usize, Vec2>,
}

impl AxisState {
    /// Forget every held value so the next nonzero sample reports as new.
    pub fn clear(&mut self) {
        self.last.clear();
    }
}

/// Held axes are re-reported after leaving the menu.
pub fn forget_held_axes(mut axes: ResMut<AxisState>) {
    axes.clear();
}

/// The main input dispatch system.
pub fn dispatch_input(
    keys: Res<ButtonInput<KeyCode>>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    gamepads: Query<&Gamepad>,
    input_map: Res<InputMap>,
    settings: Res<InputSettings>,
    mut axes: ResMut<AxisState>,
    mut router: ResMut<Router>,
) {
    // --- Buttons ---
    for binding in &input_map.bindings {
        let (pressed, released) = match binding.source {
            InputSource::Key(key) => (keys.just_pressed(key), keys.just_released(key)),
            InputSource::Mouse(button) => (mouse_buttons.just_pressed(button), mouse_buttons.just_released(button)),
            InputSource::GamepadButton(button) => (
                gamepads.iter().any(|g| g.just_pressed(button)),
                gamepads.iter().any(|g| g.just_released(button)),
            ),
        };

        let device = binding.source.device();
        if pressed {
            router.handle(
                &ActionContext::axis(binding.action, Phase::Performed, to_glam(binding.value)).with_device(device),
            );
        }
        if released {
            router.handle(&ActionContext::button(binding.action, Phase::Canceled).with_device(device));
        }
    }

    // --- Axes ---
    let first_pad = gamepads.iter().next();
    for (index, binding) in input_map.axes.iter().enumerate() {
        let current = match binding.source {
            AxisSource::Keys { up, down, left, right } => key_vector(&keys, up, down, left, right),
            AxisSource::LeftStick => first_pad.map_or(Vec2::ZERO, |g| g.left_stick()),
            AxisSource::RightStick => first_pad.map_or(Vec2::ZERO, |g| g.right_stick()),
            AxisSource::MouseMotion => mouse_motion.delta,
        };
        let current = shape_axis(&settings, binding.source, current);

        let previous = axes.last.insert(index, current).unwrap_or(Vec2::ZERO);
        if let Some(phase) = axis_phase(previous, current, binding.source.is_delta()) {
            router.handle(
                &ActionContext::axis(binding.action, phase, to_glam(current)).with_device(binding.source.device()),
            );
        }
    }
}

/// Apply deadzone to sticks and sensitivity to mouse deltas.
///
/// Mouse +Y is down on screen; flip it so every axis reads +Y up.
fn shape_axis(settings: &InputSettings, source: AxisSource, raw: Vec2) -> Vec2 {
    match source {
        AxisSource::LeftStick | AxisSource::RightStick => {
            let shaped = settings.apply_deadzone(to_glam(raw));
            Vec2::new(shaped.x, shaped.y)
        }
        AxisSource::MouseMotion => Vec2::new(raw.x, -raw.y) * settings.mouse_sensitivity,
        AxisSource::Keys { .. } => raw,
    }
}

/// Phase for an axis sample given the previous one, if anything changed.
///
/// `delta` sources (mouse motion) report every nonzero frame even when the
/// value repeats.
fn axis_phase(previous: Vec2, current: Vec2, delta: bool) -> Option<Phase> {
    if current != Vec2::ZERO {
        (delta || current != previous).then_some(Phase::Performed)
    } else if previous != Vec2::ZERO {
        Some(Phase::Canceled)
    } else {
        None
    }
}
