//! InputMap resource: the binding tables the dispatcher reads.

use bevy::prelude::*;
use chopchop_input::ActionName;

use super::binding::{AxisBinding, Binding};
use super::defaults::{default_axis_bindings, default_bindings};

/// All bindings, buttons and axes.
#[derive(Resource, Clone, Debug)]
pub struct InputMap {
    pub bindings: Vec<Binding>,
    pub axes: Vec<AxisBinding>,
}

impl Default for InputMap {
    fn default() -> Self {
        Self {
            bindings: default_bindings(),
            axes: default_axis_bindings(),
        }
    }
}

impl InputMap {
    /// Human-readable name of `action`, from its first binding.
    pub fn label(&self, action: ActionName) -> Option<&str> {
        self.bindings
            .iter()
            .find(|b| b.action == action)
            .map(|b| b.description.as_str())
            .or_else(|| {
                self.axes
                    .iter()
                    .find(|a| a.action == action)
                    .map(|a| a.description.as_str())
            })
    }

    /// Physical sources bound to `action`, for the controls panel.
    pub fn describe(&self, action: ActionName) -> Vec<String> {
        let mut out: Vec<String> = self
            .bindings
            .iter()
            .filter(|b| b.action == action)
            .map(|b| format!("{:?}", b.source))
            .collect();
        out.extend(
            self.axes
                .iter()
                .filter(|a| a.action == action)
                .map(|a| format!("{:?}", a.source)),
        );
        out
    }
}
