//! Input system: Bevy device state in, router notifications out.
//!
//! Plays the platform side of `chopchop_input`: a fixed binding table turns
//! device state into phased action contexts, the router filters them by
//! control set, and its notifications come back out as Bevy messages.
//!
//! ## Architecture
//!
//! ```text
//! Raw Input (Keyboard, Mouse, Gamepad)
//!     │
//!     ▼
//! dispatch_input        : ONE system, reads ALL raw input
//!     │                    matches bindings, builds ActionContexts
//!     ▼
//! Router (ActionRouter) : gameplay XOR menus
//!     │ channel listeners push to RouterBridge queue
//!     ▼
//! forward_notifications
//!     ├──────────────┐
//!     ▼              ▼
//! GameplayInput   MenuInput     (Bevy messages)
//!     │              │
//!     ▼              ▼
//! gameplay        menu
//! ```

pub mod binding;
pub mod defaults;
pub mod dispatch;
pub mod events;
pub mod map;

pub use events::{GameplayInput, MenuInput};

use bevy::prelude::*;
use chopchop_input::{ActionRouter, InputConfig};

/// The action router as a resource.
#[derive(Resource, Deref, DerefMut, Debug)]
pub struct Router(pub ActionRouter);

/// Loaded input tuning.
#[derive(Resource, Deref, Clone, Debug, Default)]
pub struct InputSettings(pub InputConfig);

/// SystemSet for input dispatch, runs before all domain input handling.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum InputPhase {
    /// Device state → ActionContexts → router
    Dispatch,
    /// Router notifications → GameplayInput / MenuInput
    Forward,
    /// Domain systems consume messages
    Handle,
}

/// Plugin that owns the router and its Bevy-side plumbing.
pub struct InputPlugin {
    pub config: InputConfig,
}

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        let router = ActionRouter::from_config(&self.config);
        let bridge = events::RouterBridge::attach(&router);

        app.add_message::<GameplayInput>().add_message::<MenuInput>();

        app.insert_resource(Router(router))
            .insert_resource(bridge)
            .insert_resource(InputSettings(self.config.clone()))
            .init_resource::<map::InputMap>()
            .init_resource::<dispatch::AxisState>();

        app.configure_sets(
            Update,
            (
                InputPhase::Dispatch,
                InputPhase::Forward.after(InputPhase::Dispatch),
                InputPhase::Handle.after(InputPhase::Forward),
            ),
        );

        app.add_systems(Startup, activate_router)
            .add_systems(Update, dispatch::dispatch_input.in_set(InputPhase::Dispatch))
            .add_systems(Update, events::forward_notifications.in_set(InputPhase::Forward))
            .add_systems(Last, events::disable_router_on_exit);
    }
}

/// Owner became active: build control sets and start in gameplay.
fn activate_router(mut router: ResMut<Router>) {
    router.on_enable();
    info!("input router active");
}

pub fn to_glam(v: Vec2) -> glam::Vec2 {
    glam::Vec2::new(v.x, v.y)
}

pub fn to_bevy(v: glam::Vec2) -> Vec2 {
    Vec2::new(v.x, v.y)
}
