//! Gameplay consumer: a stand-in player driven by `GameplayInput`.
//!
//! Movement and camera look are continuous: the latest value is held in
//! `PlayerIntent` until the router reports a new one. Jump is a simple
//! vertical hop whose rise is cut short when the button is released early.

use bevy::prelude::*;

use crate::input::dispatch::forget_held_axes;
use crate::input::{GameplayInput, InputPhase};
use crate::menu::AppMode;

const MOVE_SPEED: f32 = 260.0;
const JUMP_SPEED: f32 = 420.0;
const GRAVITY: f32 = 1200.0;
/// Fraction of upward speed kept when jump is released early.
const JUMP_CUT: f32 = 0.4;
const POINTER_LOOK_SCALE: f32 = 1.0;
const STICK_LOOK_SPEED: f32 = 400.0;

#[derive(Component)]
pub struct Player;

/// Latest held input for the player.
#[derive(Resource, Default, Debug, Clone, PartialEq)]
pub struct PlayerIntent {
    pub movement: Vec2,
    /// Right stick deflection, applied every frame while held
    pub stick_look: Vec2,
    /// Mouse delta accumulated this frame
    pub pointer_look: Vec2,
    /// Right mouse held: mouse deltas move the camera
    pub mouse_camera: bool,
}

/// Vertical hop state.
#[derive(Component, Default, Debug)]
pub struct Hop {
    pub height: f32,
    pub velocity: f32,
}

impl Hop {
    fn grounded(&self) -> bool {
        self.height <= 0.0 && self.velocity <= 0.0
    }

    fn start(&mut self) -> bool {
        if !self.grounded() {
            return false;
        }
        self.velocity = JUMP_SPEED;
        true
    }

    fn cut(&mut self) {
        if self.velocity > 0.0 {
            self.velocity *= JUMP_CUT;
        }
    }

    fn step(&mut self, dt: f32) {
        if self.grounded() {
            return;
        }
        self.velocity -= GRAVITY * dt;
        self.height += self.velocity * dt;
        if self.height <= 0.0 {
            self.height = 0.0;
            self.velocity = 0.0;
        }
    }
}

pub struct GameplayPlugin;

impl Plugin for GameplayPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerIntent>()
            .add_systems(Startup, spawn_player)
            .add_systems(
                Update,
                (apply_gameplay_input, (move_player, move_camera))
                    .chain()
                    .in_set(InputPhase::Handle)
                    .run_if(in_state(AppMode::Gameplay)),
            )
            .add_systems(OnEnter(AppMode::Paused), clear_intent)
            .add_systems(OnExit(AppMode::Paused), forget_held_axes);
    }
}

fn spawn_player(mut commands: Commands) {
    commands.spawn(Camera2d);
    commands.spawn((
        Player,
        Hop::default(),
        Sprite::from_color(Color::srgb(0.3, 0.7, 0.9), Vec2::splat(48.0)),
        Transform::default(),
    ));
}

fn apply_gameplay_input(
    mut reader: MessageReader<GameplayInput>,
    mut intent: ResMut<PlayerIntent>,
    mut players: Query<(&mut Hop, &mut Sprite), With<Player>>,
) {
    intent.pointer_look = Vec2::ZERO;

    for input in reader.read() {
        match input {
            GameplayInput::Move(v) => intent.movement = *v,
            GameplayInput::Look { delta, from_pointer: true } => {
                if intent.mouse_camera {
                    intent.pointer_look += *delta;
                }
            }
            GameplayInput::Look { delta, from_pointer: false } => intent.stick_look = *delta,
            GameplayInput::MouseCameraEnabled => intent.mouse_camera = true,
            GameplayInput::MouseCameraDisabled => intent.mouse_camera = false,
            GameplayInput::Jump => {
                for (mut hop, _) in &mut players {
                    if hop.start() {
                        debug!("jump");
                    }
                }
            }
            GameplayInput::JumpCanceled => {
                for (mut hop, _) in &mut players {
                    hop.cut();
                }
            }
            GameplayInput::Attack | GameplayInput::Interact | GameplayInput::ExtraAction => {
                info!("player action: {input:?}");
                for (_, mut sprite) in &mut players {
                    sprite.color = action_color(input);
                }
            }
            // Handled by the menu
            GameplayInput::Pause => {}
        }
    }
}

fn action_color(input: &GameplayInput) -> Color {
    match input {
        GameplayInput::Attack => Color::srgb(0.9, 0.3, 0.3),
        GameplayInput::Interact => Color::srgb(0.3, 0.9, 0.4),
        GameplayInput::ExtraAction => Color::srgb(0.8, 0.5, 0.9),
        _ => Color::srgb(0.3, 0.7, 0.9),
    }
}

fn move_player(
    time: Res<Time>,
    intent: Res<PlayerIntent>,
    mut players: Query<(&mut Transform, &mut Hop), With<Player>>,
    mut ground: Local<Vec2>,
) {
    let dt = time.delta_secs();
    *ground += intent.movement * MOVE_SPEED * dt;
    for (mut transform, mut hop) in &mut players {
        hop.step(dt);
        transform.translation.x = ground.x;
        transform.translation.y = ground.y + hop.height;
    }
}

fn move_camera(
    time: Res<Time>,
    intent: Res<PlayerIntent>,
    mut cameras: Query<&mut Transform, With<Camera2d>>,
) {
    let pan = intent.pointer_look * POINTER_LOOK_SCALE + intent.stick_look * STICK_LOOK_SPEED * time.delta_secs();
    if pan == Vec2::ZERO {
        return;
    }
    for mut transform in &mut cameras {
        transform.translation.x += pan.x;
        transform.translation.y += pan.y;
    }
}

/// Held input does not survive a trip through the menu.
fn clear_intent(mut intent: ResMut<PlayerIntent>) {
    *intent = PlayerIntent::default();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hop_lands() {
        let mut hop = Hop::default();
        assert!(hop.start());
        assert!(!hop.start(), "no double jump");
        for _ in 0..200 {
            hop.step(1.0 / 60.0);
        }
        assert!(hop.grounded());
        assert_eq!(hop.height, 0.0);
    }

    #[test]
    fn test_early_release_shortens_hop() {
        let peak = |cut_after: Option<usize>| {
            let mut hop = Hop::default();
            hop.start();
            let mut peak: f32 = 0.0;
            for frame in 0..200 {
                if cut_after == Some(frame) {
                    hop.cut();
                }
                hop.step(1.0 / 60.0);
                peak = peak.max(hop.height);
            }
            peak
        };
        assert!(peak(Some(3)) < peak(None));
    }

    #[test]
    fn test_cut_when_falling_is_noop() {
        let mut hop = Hop {
            height: 10.0,
            velocity: -50.0,
        };
        hop.cut();
        assert_eq!(hop.velocity, -50.0);
    }
}
