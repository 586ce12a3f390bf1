//! Action router: re-publishes platform callbacks as typed notifications.
//!
//! The platform binding layer hands the router one [`ActionContext`] per
//! callback. The router filters by phase and fans the result out on the
//! matching [`Channel`]. It never touches UI state.
//!
//! ## Phase rules
//!
//! | action                 | Performed        | Canceled          | other |
//! |------------------------|------------------|-------------------|-------|
//! | jump                   | `jump`           | `jump_canceled`   | -     |
//! | attack/interact/...    | triggered        | -                 | -     |
//! | move, rotate-camera    | value            | value             | value |
//! | mouse-control-camera   | enable           | disable           | -     |
//! | move-selection         | `move_selection` | -                 | -     |
//! | mouse-move             | value            | value             | value |
//! | click                  | held = true      | held = false      | -     |
//! | submit / cancel        | triggered        | -                 | -     |

use glam::Vec2;

use crate::action::{ActionName, ControlSet};
use crate::channel::Channel;
use crate::config::InputConfig;
use crate::context::{ActionContext, Phase};

/// Camera look delta plus where it came from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraMove {
    pub delta: Vec2,
    /// True when the originating device is the pointer (mouse deltas need
    /// different scaling than stick deflection).
    pub from_pointer: bool,
}

/// Notifications for the gameplay control set.
#[derive(Debug)]
pub struct GameplayChannels {
    pub jump: Channel<()>,
    /// Jump released early (shortens a held jump)
    pub jump_canceled: Channel<()>,
    pub attack: Channel<()>,
    pub interact: Channel<()>,
    pub extra_action: Channel<()>,
    pub pause: Channel<()>,
    pub movement: Channel<Vec2>,
    pub camera_move: Channel<CameraMove>,
    pub enable_mouse_camera: Channel<()>,
    pub disable_mouse_camera: Channel<()>,
}

impl Default for GameplayChannels {
    fn default() -> Self {
        Self {
            jump: Channel::new("jump"),
            jump_canceled: Channel::new("jump-canceled"),
            attack: Channel::new("attack"),
            interact: Channel::new("interact"),
            extra_action: Channel::new("extra-action"),
            pause: Channel::new("pause"),
            movement: Channel::new("move"),
            camera_move: Channel::new("camera-move"),
            enable_mouse_camera: Channel::new("enable-mouse-camera"),
            disable_mouse_camera: Channel::new("disable-mouse-camera"),
        }
    }
}

/// Notifications for the menu control set.
#[derive(Debug)]
pub struct MenuChannels {
    /// Directional navigation; carries the raw direction for the widget layer
    pub move_selection: Channel<Vec2>,
    /// Pointer moved over the menu
    pub mouse_move: Channel<Vec2>,
    pub submit: Channel<()>,
    pub cancel: Channel<()>,
}

impl Default for MenuChannels {
    fn default() -> Self {
        Self {
            move_selection: Channel::new("move-selection"),
            mouse_move: Channel::new("mouse-move"),
            submit: Channel::new("submit"),
            cancel: Channel::new("cancel"),
        }
    }
}

/// Enabled/disabled state of the two control sets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControlState {
    gameplay: bool,
    menus: bool,
}

impl ControlState {
    pub fn is_enabled(&self, set: ControlSet) -> bool {
        match set {
            ControlSet::Gameplay => self.gameplay,
            ControlSet::Menus => self.menus,
        }
    }

    fn set(&mut self, set: ControlSet, enabled: bool) {
        match set {
            ControlSet::Gameplay => self.gameplay = enabled,
            ControlSet::Menus => self.menus = enabled,
        }
    }
}

/// Routes platform callbacks to typed notification channels.
#[derive(Debug)]
pub struct ActionRouter {
    pointer_device_class: String,
    /// Built on first activation, then reused for the router's lifetime.
    controls: Option<ControlState>,
    init_count: u32,
    primary_held: bool,
    gameplay: GameplayChannels,
    menu: MenuChannels,
}

impl Default for ActionRouter {
    fn default() -> Self {
        Self::new(InputConfig::default().pointer_device_class)
    }
}

impl ActionRouter {
    /// Create a router that treats `pointer_device_class` as the mouse.
    pub fn new(pointer_device_class: impl Into<String>) -> Self {
        Self {
            pointer_device_class: pointer_device_class.into(),
            controls: None,
            init_count: 0,
            primary_held: false,
            gameplay: GameplayChannels::default(),
            menu: MenuChannels::default(),
        }
    }

    pub fn from_config(config: &InputConfig) -> Self {
        Self::new(config.pointer_device_class.clone())
    }

    pub fn gameplay(&self) -> &GameplayChannels {
        &self.gameplay
    }

    pub fn menu(&self) -> &MenuChannels {
        &self.menu
    }

    // ========================================================================
    // Lifecycle + control sets
    // ========================================================================

    /// Owner became active: build control sets if needed, then enter gameplay.
    pub fn on_enable(&mut self) {
        self.ensure_controls();
        self.enable_gameplay_input();
    }

    /// Owner became inactive.
    pub fn on_disable(&mut self) {
        self.disable_controls();
    }

    pub fn enable_gameplay_input(&mut self) {
        self.apply(true, false);
    }

    pub fn enable_menu_input(&mut self) {
        self.apply(false, true);
    }

    pub fn disable_controls(&mut self) {
        self.apply(false, false);
    }

    pub fn is_enabled(&self, set: ControlSet) -> bool {
        self.controls.is_some_and(|c| c.is_enabled(set))
    }

    /// Whether the primary pointer button is down, per the last `click`.
    pub fn primary_pointer_held(&self) -> bool {
        self.primary_held
    }

    fn ensure_controls(&mut self) -> &mut ControlState {
        self.controls.get_or_insert_with(|| {
            self.init_count += 1;
            tracing::debug!("constructing control sets");
            ControlState::default()
        })
    }

    fn apply(&mut self, gameplay: bool, menus: bool) {
        let controls = self.ensure_controls();
        let before = *controls;
        controls.set(ControlSet::Gameplay, gameplay);
        controls.set(ControlSet::Menus, menus);
        if before != *controls {
            tracing::debug!(gameplay, menus, "control sets changed");
        }
        if !menus {
            self.primary_held = false;
        }
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    /// Process one platform callback to completion.
    pub fn handle(&mut self, ctx: &ActionContext) {
        let set = ctx.action.control_set();
        if !self.is_enabled(set) {
            tracing::trace!(action = %ctx.action, %set, "control set disabled, dropping");
            return;
        }

        let performed = ctx.phase == Phase::Performed;
        let canceled = ctx.phase == Phase::Canceled;

        match ctx.action {
            ActionName::Jump => {
                if performed {
                    self.gameplay.jump.emit(&());
                }
                if canceled {
                    self.gameplay.jump_canceled.emit(&());
                }
            }
            ActionName::Attack if performed => self.gameplay.attack.emit(&()),
            ActionName::Interact if performed => self.gameplay.interact.emit(&()),
            ActionName::ExtraAction if performed => self.gameplay.extra_action.emit(&()),
            ActionName::Pause if performed => self.gameplay.pause.emit(&()),
            ActionName::Move => self.gameplay.movement.emit(&ctx.value),
            ActionName::RotateCamera => {
                let from_pointer = ctx.is_device(&self.pointer_device_class);
                self.gameplay.camera_move.emit(&CameraMove {
                    delta: ctx.value,
                    from_pointer,
                });
            }
            ActionName::MouseControlCamera => {
                if performed {
                    self.gameplay.enable_mouse_camera.emit(&());
                }
                if canceled {
                    self.gameplay.disable_mouse_camera.emit(&());
                }
            }
            ActionName::MoveSelection if performed => self.menu.move_selection.emit(&ctx.value),
            ActionName::MouseMove => self.menu.mouse_move.emit(&ctx.value),
            ActionName::Click => {
                if performed {
                    self.primary_held = true;
                }
                if canceled {
                    self.primary_held = false;
                }
            }
            ActionName::Submit if performed => self.menu.submit.emit(&()),
            ActionName::Cancel if performed => self.menu.cancel.emit(&()),
            _ => {}
        }
    }
}
