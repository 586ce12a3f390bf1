//! Action names: the fixed vocabulary the router subscribes to.
//!
//! The platform binding layer reports callbacks keyed by these names. Names
//! are kebab-case on the wire (`"extra-action"`, `"rotate-camera"`) so they
//! line up with the binding asset the platform loads.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// A named semantic input, decoupled from the physical control behind it.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum ActionName {
    // ========================================================================
    // Gameplay
    // ========================================================================
    Jump,
    Attack,
    Interact,
    ExtraAction,
    Pause,
    /// 2D movement axis
    Move,
    /// 2D camera look axis (mouse delta or right stick)
    RotateCamera,
    /// Held button that hands camera control to the mouse
    MouseControlCamera,

    // ========================================================================
    // Menus
    // ========================================================================
    /// Directional navigation between widgets (arrows, D-pad)
    MoveSelection,
    /// Pointer motion over the menu
    MouseMove,
    /// Primary pointer button
    Click,
    Submit,
    Cancel,
}

impl ActionName {
    /// The control set this action belongs to.
    pub fn control_set(self) -> ControlSet {
        match self {
            ActionName::Jump
            | ActionName::Attack
            | ActionName::Interact
            | ActionName::ExtraAction
            | ActionName::Pause
            | ActionName::Move
            | ActionName::RotateCamera
            | ActionName::MouseControlCamera => ControlSet::Gameplay,
            ActionName::MoveSelection
            | ActionName::MouseMove
            | ActionName::Click
            | ActionName::Submit
            | ActionName::Cancel => ControlSet::Menus,
        }
    }

    /// Whether this action reports a 2D vector rather than a button.
    pub fn is_axis(self) -> bool {
        matches!(
            self,
            ActionName::Move
                | ActionName::RotateCamera
                | ActionName::MoveSelection
                | ActionName::MouseMove
        )
    }
}

/// One of the two mutually exclusive control sets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize)]
#[strum(serialize_all = "kebab-case")]
pub enum ControlSet {
    Gameplay,
    Menus,
}
