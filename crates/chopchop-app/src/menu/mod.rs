//! Pause menu: a vertical button list driven by pointer and directional input.
//!
//! Opening the menu switches the router to the menu control set and resets
//! the focus arbitrator; closing it switches back to gameplay.

pub mod focus;

use bevy::input_focus::InputFocus;
use bevy::prelude::*;
use chopchop_input::ActionName;

use crate::input::map::InputMap;
use crate::input::{GameplayInput, InputPhase, MenuInput, Router};
use focus::{Hovered, MenuFocus};

/// Whether the player is in the world or in the pause menu.
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AppMode {
    #[default]
    Gameplay,
    Paused,
}

/// What a menu button does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Resume,
    Controls,
    Quit,
}

impl MenuAction {
    const ALL: [MenuAction; 3] = [MenuAction::Resume, MenuAction::Controls, MenuAction::Quit];

    fn label(self) -> &'static str {
        match self {
            MenuAction::Resume => "Resume",
            MenuAction::Controls => "Controls",
            MenuAction::Quit => "Quit",
        }
    }
}

/// A menu button and its position in the list.
#[derive(Component, Debug, Clone, Copy)]
pub struct MenuButton {
    pub action: MenuAction,
    pub index: usize,
}

/// Root of the menu UI tree.
#[derive(Component)]
struct MenuRoot;

/// Binding help text, toggled by the Controls button.
#[derive(Component)]
struct ControlsPanel;

/// A button was activated, by click or by submit.
#[derive(Message, Debug, Clone, Copy)]
pub struct MenuActivated(pub MenuAction);

const NORMAL: Color = Color::srgb(0.15, 0.15, 0.18);
const HOVERED: Color = Color::srgb(0.25, 0.25, 0.32);
const FOCUSED_BORDER: Color = Color::srgb(0.95, 0.8, 0.3);

pub struct MenuPlugin {
    pub start_in_menu: bool,
}

impl Plugin for MenuPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<AppMode>()
            .init_resource::<InputFocus>()
            .init_resource::<MenuFocus>()
            .add_message::<MenuActivated>();

        if self.start_in_menu {
            app.add_systems(Startup, |mut next: ResMut<NextState<AppMode>>| next.set(AppMode::Paused));
        }

        app.add_systems(OnEnter(AppMode::Paused), open_menu)
            .add_systems(OnExit(AppMode::Paused), close_menu);

        app.add_systems(
            Update,
            (
                pause_on_request.run_if(in_state(AppMode::Gameplay)),
                (
                    handle_menu_input,
                    focus::deliver_synthetic_exits,
                    focus::track_directional_selection,
                    handle_activation,
                )
                    .chain()
                    .run_if(in_state(AppMode::Paused)),
            )
                .in_set(InputPhase::Handle),
        );

        app.add_systems(
            PostUpdate,
            (focus::apply_cursor_visibility, paint_buttons),
        );
    }
}

// ============================================================================
// Lifecycle
// ============================================================================

fn pause_on_request(mut reader: MessageReader<GameplayInput>, mut next: ResMut<NextState<AppMode>>) {
    if reader.read().any(|input| *input == GameplayInput::Pause) {
        next.set(AppMode::Paused);
    }
}

fn open_menu(
    mut commands: Commands,
    mut router: ResMut<Router>,
    mut menu: ResMut<MenuFocus>,
    mut input_focus: ResMut<InputFocus>,
    input_map: Res<InputMap>,
) {
    router.enable_menu_input();
    menu.reset();

    let root = commands
        .spawn((
            MenuRoot,
            Node {
                width: percent(100),
                height: percent(100),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                row_gap: px(12),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.6)),
        ))
        .id();

    let mut first = None;
    for (index, action) in MenuAction::ALL.into_iter().enumerate() {
        let button = commands
            .spawn((
                Button,
                MenuButton { action, index },
                Hovered::default(),
                Node {
                    width: px(240),
                    height: px(56),
                    border: UiRect::all(px(3)),
                    justify_content: JustifyContent::Center,
                    align_items: AlignItems::Center,
                    ..default()
                },
                BackgroundColor(NORMAL),
                BorderColor::all(NORMAL),
                children![(Text::new(action.label()), Pickable::IGNORE)],
            ))
            .observe(focus::on_pointer_over)
            .observe(focus::on_pointer_out)
            .observe(on_button_click)
            .id();
        commands.entity(root).add_child(button);
        first.get_or_insert(button);
    }

    let help = controls_help(&input_map);
    let panel = commands
        .spawn((
            ControlsPanel,
            Text::new(help),
            TextFont {
                font_size: 14.0,
                ..default()
            },
            Node {
                margin: UiRect::top(px(16)),
                ..default()
            },
            Visibility::Hidden,
        ))
        .id();
    commands.entity(root).add_child(panel);

    input_focus.0 = first;
    info!("menu opened");
}

fn close_menu(
    mut commands: Commands,
    roots: Query<Entity, With<MenuRoot>>,
    mut router: ResMut<Router>,
    mut menu: ResMut<MenuFocus>,
    mut input_focus: ResMut<InputFocus>,
) {
    for root in &roots {
        commands.entity(root).despawn();
    }
    input_focus.0 = None;
    menu.reset();
    router.enable_gameplay_input();
    info!("menu closed");
}

fn controls_help(input_map: &InputMap) -> String {
    [
        ActionName::Move,
        ActionName::Jump,
        ActionName::Attack,
        ActionName::Interact,
        ActionName::ExtraAction,
        ActionName::MouseControlCamera,
        ActionName::Pause,
    ]
    .into_iter()
    .map(|action| {
        let label = input_map.label(action).map_or_else(|| action.to_string(), str::to_string);
        format!("{label}: {}", input_map.describe(action).join(" / "))
    })
    .collect::<Vec<_>>()
    .join("\n")
}

// ============================================================================
// Input
// ============================================================================

fn handle_menu_input(
    mut reader: MessageReader<MenuInput>,
    mut menu: ResMut<MenuFocus>,
    mut input_focus: ResMut<InputFocus>,
    router: Res<Router>,
    buttons: Query<(Entity, &MenuButton)>,
    mut activated: MessageWriter<MenuActivated>,
    mut next: ResMut<NextState<AppMode>>,
) {
    let held = router.primary_pointer_held();

    for input in reader.read() {
        match input {
            MenuInput::MoveSelection(direction) => {
                let list: Vec<(Entity, usize)> = buttons.iter().map(|(e, b)| (e, b.index)).collect();
                move_selection(&mut menu, &mut input_focus, held, &list, *direction);
            }
            MenuInput::MouseMove(_) => {
                focus::transition(&mut menu, &mut input_focus, held, |m| m.pointer_moved());
            }
            MenuInput::Submit => {
                focus::transition(&mut menu, &mut input_focus, held, |_| {});
                if !menu.allows_submit() {
                    debug!("submit suppressed: pointer held over another button");
                    continue;
                }
                if let Some((_, button)) = input_focus.0.and_then(|e| buttons.get(e).ok()) {
                    activated.write(MenuActivated(button.action));
                }
            }
            MenuInput::Cancel => next.set(AppMode::Gameplay),
        }
    }
}

fn on_button_click(
    click: On<Pointer<Click>>,
    buttons: Query<&MenuButton>,
    mut activated: MessageWriter<MenuActivated>,
) {
    if let Ok(button) = buttons.get(click.entity) {
        activated.write(MenuActivated(button.action));
    }
}

fn handle_activation(
    mut reader: MessageReader<MenuActivated>,
    mut next: ResMut<NextState<AppMode>>,
    mut panel: Query<&mut Visibility, With<ControlsPanel>>,
    mut exit: MessageWriter<AppExit>,
) {
    for MenuActivated(action) in reader.read() {
        debug!("menu action {action:?}");
        match action {
            MenuAction::Resume => next.set(AppMode::Gameplay),
            MenuAction::Controls => {
                for mut visibility in &mut panel {
                    visibility.toggle_visible_hidden();
                }
            }
            MenuAction::Quit => {
                exit.write(AppExit::Success);
            }
        }
    }
}

/// Navigate, then move focus to the neighbor in `direction`.
///
/// The new selection is recorded immediately so a second step in the same
/// frame starts from it.
fn move_selection(
    menu: &mut MenuFocus,
    input_focus: &mut InputFocus,
    held: bool,
    buttons: &[(Entity, usize)],
    direction: Vec2,
) {
    focus::transition(menu, input_focus, held, |m| m.navigate());

    let current = input_focus
        .0
        .and_then(|e| buttons.iter().find(|(b, _)| *b == e))
        .map(|(_, index)| *index);
    let target = neighbor(current, buttons.len(), direction);
    input_focus.0 = buttons
        .iter()
        .find(|(_, index)| Some(*index) == target)
        .map(|(e, _)| *e);

    if let Some(entity) = input_focus.0 {
        menu.set_directional_selection(Some(entity));
    }
}

/// Index to select after a step in `direction` from `current` (vertical list).
fn neighbor(current: Option<usize>, len: usize, direction: Vec2) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let Some(i) = current else {
        return Some(0);
    };
    let i = if direction.y > 0.5 {
        i.saturating_sub(1)
    } else if direction.y < -0.5 {
        (i + 1).min(len - 1)
    } else {
        i
    };
    Some(i)
}

// ============================================================================
// Presentation
// ============================================================================

fn paint_buttons(
    input_focus: Res<InputFocus>,
    mut buttons: Query<(Entity, &Hovered, &mut BackgroundColor, &mut BorderColor), With<MenuButton>>,
) {
    for (entity, hovered, mut background, mut border) in &mut buttons {
        let bg = if hovered.0 { HOVERED } else { NORMAL };
        if background.0 != bg {
            background.0 = bg;
        }
        let edge = if input_focus.0 == Some(entity) { FOCUSED_BORDER } else { bg };
        let wanted = BorderColor::all(edge);
        if *border != wanted {
            *border = wanted;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighbor_clamps() {
        assert_eq!(neighbor(Some(0), 3, Vec2::Y), Some(0));
        assert_eq!(neighbor(Some(0), 3, Vec2::NEG_Y), Some(1));
        assert_eq!(neighbor(Some(2), 3, Vec2::NEG_Y), Some(2));
        assert_eq!(neighbor(Some(2), 3, Vec2::Y), Some(1));
    }

    #[test]
    fn test_neighbor_from_nothing_selects_first() {
        assert_eq!(neighbor(None, 3, Vec2::NEG_Y), Some(0));
        assert_eq!(neighbor(None, 0, Vec2::NEG_Y), None);
    }

    #[test]
    fn test_horizontal_step_stays() {
        assert_eq!(neighbor(Some(1), 3, Vec2::X), Some(1));
    }

    #[test]
    fn test_consecutive_moves_track_selection() {
        let mut world = World::new();
        let list: Vec<(Entity, usize)> = (0..3).map(|i| (world.spawn_empty().id(), i)).collect();
        let mut menu = MenuFocus::default();
        let mut input_focus = InputFocus(Some(list[0].0));
        menu.set_directional_selection(Some(list[0].0));

        move_selection(&mut menu, &mut input_focus, false, &list, Vec2::NEG_Y);
        assert_eq!(input_focus.0, Some(list[1].0));
        assert_eq!(menu.directional_selection(), Some(&list[1].0));

        move_selection(&mut menu, &mut input_focus, false, &list, Vec2::NEG_Y);
        assert_eq!(input_focus.0, Some(list[2].0));
        assert_eq!(menu.directional_selection(), Some(&list[2].0));
    }

    #[test]
    fn test_controls_help_lists_bindings() {
        let help = controls_help(&InputMap::default());
        assert!(help.contains("Jump:"));
        assert!(help.contains("Space"));
        assert_eq!(help.lines().count(), 7);
    }
}
