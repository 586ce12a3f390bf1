//! Input messages: router notifications re-published as Bevy messages.
//!
//! The router calls listeners synchronously from inside `dispatch_input`.
//! Listeners only push onto a shared queue; `forward_notifications` drains
//! it into messages so domain systems stay ordinary readers.

use std::sync::Arc;

use bevy::prelude::*;
use chopchop_input::{ActionRouter, Subscription};
use parking_lot::Mutex;

use super::{to_bevy, Router};

/// Gameplay intent from the router's gameplay channels.
#[derive(Message, Clone, Debug, PartialEq)]
pub enum GameplayInput {
    Jump,
    JumpCanceled,
    Attack,
    Interact,
    ExtraAction,
    Pause,
    Move(Vec2),
    Look { delta: Vec2, from_pointer: bool },
    MouseCameraEnabled,
    MouseCameraDisabled,
}

/// Menu intent from the router's menu channels.
#[derive(Message, Clone, Debug, PartialEq)]
pub enum MenuInput {
    MoveSelection(Vec2),
    MouseMove(Vec2),
    Submit,
    Cancel,
}

#[derive(Clone, Debug)]
enum Notification {
    Gameplay(GameplayInput),
    Menu(MenuInput),
}

type Queue = Arc<Mutex<Vec<Notification>>>;

/// Listener for a unit channel that queues a fixed notification.
fn push(queue: &Queue, notification: Notification) -> impl FnMut(&()) + Send + 'static {
    let queue = queue.clone();
    move |_| queue.lock().push(notification.clone())
}

/// Listener registrations on the router. Dropping this detaches them.
#[derive(Resource)]
pub struct RouterBridge {
    queue: Queue,
    subscriptions: Vec<Subscription>,
}

impl RouterBridge {
    /// Subscribe to every channel the client consumes.
    pub fn attach(router: &ActionRouter) -> Self {
        let queue: Queue = Arc::default();
        let g = router.gameplay();
        let m = router.menu();

        let subscriptions = vec![
            g.jump.subscribe(push(&queue, Notification::Gameplay(GameplayInput::Jump))),
            g.jump_canceled.subscribe(push(&queue, Notification::Gameplay(GameplayInput::JumpCanceled))),
            g.attack.subscribe(push(&queue, Notification::Gameplay(GameplayInput::Attack))),
            g.interact.subscribe(push(&queue, Notification::Gameplay(GameplayInput::Interact))),
            g.extra_action.subscribe(push(&queue, Notification::Gameplay(GameplayInput::ExtraAction))),
            g.pause.subscribe(push(&queue, Notification::Gameplay(GameplayInput::Pause))),
            g.enable_mouse_camera.subscribe(push(&queue, Notification::Gameplay(GameplayInput::MouseCameraEnabled))),
            g.disable_mouse_camera.subscribe(push(&queue, Notification::Gameplay(GameplayInput::MouseCameraDisabled))),
            {
                let q = queue.clone();
                g.movement
                    .subscribe(move |v| q.lock().push(Notification::Gameplay(GameplayInput::Move(to_bevy(*v)))))
            },
            {
                let q = queue.clone();
                g.camera_move.subscribe(move |m| {
                    q.lock().push(Notification::Gameplay(GameplayInput::Look {
                        delta: to_bevy(m.delta),
                        from_pointer: m.from_pointer,
                    }))
                })
            },
            {
                let q = queue.clone();
                m.move_selection
                    .subscribe(move |d| q.lock().push(Notification::Menu(MenuInput::MoveSelection(to_bevy(*d)))))
            },
            {
                let q = queue.clone();
                m.mouse_move
                    .subscribe(move |d| q.lock().push(Notification::Menu(MenuInput::MouseMove(to_bevy(*d)))))
            },
            m.submit.subscribe(push(&queue, Notification::Menu(MenuInput::Submit))),
            m.cancel.subscribe(push(&queue, Notification::Menu(MenuInput::Cancel))),
        ];

        debug!("router bridge attached ({} listeners)", subscriptions.len());
        Self { queue, subscriptions }
    }

    fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.queue.lock())
    }

    pub fn listener_count(&self) -> usize {
        self.subscriptions.len()
    }
}

/// Drain queued router notifications into `GameplayInput` / `MenuInput`.
pub fn forward_notifications(
    bridge: Res<RouterBridge>,
    mut gameplay: MessageWriter<GameplayInput>,
    mut menu: MessageWriter<MenuInput>,
) {
    for notification in bridge.drain() {
        match notification {
            Notification::Gameplay(input) => {
                gameplay.write(input);
            }
            Notification::Menu(input) => {
                menu.write(input);
            }
        }
    }
}

/// Owner went away: disable control sets so nothing routes after shutdown.
pub fn disable_router_on_exit(mut exits: MessageReader<AppExit>, mut router: ResMut<Router>) {
    if exits.read().next().is_some() {
        router.on_disable();
        debug!("router disabled on exit");
    }
}
