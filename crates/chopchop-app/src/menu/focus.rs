//! Menu focus: the arbitrator wired to Bevy's `InputFocus` and cursor.
//!
//! `InputFocus` is the framework's single focus slot. The arbitrator works
//! on a `MirrorSurface`: each transition copies the live slot in, runs, and
//! copies the result back. Cursor visibility and synthetic exits are applied
//! afterwards by ordinary systems.
//!
//! Every move of `InputFocus` onto a widget is recorded as the directional
//! selection, the way a widget reports being selected. Focus dropping to
//! nothing is not a selection and leaves the record alone.

use bevy::input_focus::InputFocus;
use bevy::prelude::*;
use bevy::window::{CursorOptions, PrimaryWindow};
use chopchop_input::{FocusArbitrator, MirrorSurface};

use crate::input::Router;

pub type MenuArbiter = FocusArbitrator<Entity, MirrorSurface<Entity>>;

/// The menu's focus arbitrator.
#[derive(Resource, Deref, DerefMut)]
pub struct MenuFocus(pub MenuArbiter);

impl Default for MenuFocus {
    fn default() -> Self {
        Self(FocusArbitrator::new(MirrorSurface::default()))
    }
}

/// Pointer currently over this widget (drives the hover highlight).
#[derive(Component, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hovered(pub bool);

/// Run one arbitrator transition against the live focus slot.
pub fn transition(
    menu: &mut MenuFocus,
    input_focus: &mut InputFocus,
    primary_held: bool,
    f: impl FnOnce(&mut MenuArbiter),
) {
    let surface = menu.surface_mut();
    surface.focused = input_focus.0;
    surface.primary_held = primary_held;

    f(&mut menu.0);

    let focused = menu.surface().focused;
    if input_focus.0 != focused {
        input_focus.0 = focused;
    }
}

// ============================================================================
// Pointer observers (attached to each menu button)
// ============================================================================

pub fn on_pointer_over(
    over: On<Pointer<Over>>,
    mut menu: ResMut<MenuFocus>,
    mut input_focus: ResMut<InputFocus>,
    router: Res<Router>,
    mut hovered: Query<&mut Hovered>,
) {
    let entity = over.entity;
    if let Ok(mut h) = hovered.get_mut(entity) {
        h.0 = true;
    }
    transition(&mut menu, &mut input_focus, router.primary_pointer_held(), |m| {
        m.pointer_enter(entity)
    });
}

pub fn on_pointer_out(
    out: On<Pointer<Out>>,
    mut menu: ResMut<MenuFocus>,
    mut input_focus: ResMut<InputFocus>,
    router: Res<Router>,
    mut hovered: Query<&mut Hovered>,
) {
    let entity = out.entity;
    if let Ok(mut h) = hovered.get_mut(entity) {
        h.0 = false;
    }
    transition(&mut menu, &mut input_focus, router.primary_pointer_held(), |m| {
        m.pointer_exit(&entity)
    });
}

// ============================================================================
// Surface application
// ============================================================================

/// Record framework focus moves as the directional selection.
pub fn track_directional_selection(input_focus: Res<InputFocus>, mut menu: ResMut<MenuFocus>) {
    if input_focus.is_changed() {
        record_selection(&mut menu, &input_focus);
    }
}

fn record_selection(menu: &mut MenuFocus, input_focus: &InputFocus) {
    if let Some(entity) = input_focus.0 {
        menu.set_directional_selection(Some(entity));
    }
}

/// Deliver synthetic exits: drop the hover highlight. Focus was already
/// settled by the arbitrator, so the exit does not go back through it.
pub fn deliver_synthetic_exits(mut menu: ResMut<MenuFocus>, mut hovered: Query<&mut Hovered>) {
    for entity in menu.surface_mut().drain_exits() {
        debug!("synthetic pointer exit on {entity:?}");
        if let Ok(mut h) = hovered.get_mut(entity) {
            h.0 = false;
        }
    }
}

/// Mirror the requested cursor visibility onto the primary window.
pub fn apply_cursor_visibility(
    menu: Res<MenuFocus>,
    mut cursor: Query<&mut CursorOptions, With<PrimaryWindow>>,
) {
    let visible = menu.surface().cursor_visible;
    for mut options in &mut cursor {
        if options.visible != visible {
            options.visible = visible;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chopchop_input::Authority;

    fn entities() -> (Entity, Entity) {
        let mut world = World::new();
        (world.spawn_empty().id(), world.spawn_empty().id())
    }

    #[test]
    fn test_transition_writes_back_focus() {
        let (a, _) = entities();
        let mut menu = MenuFocus::default();
        let mut focus = InputFocus::default();

        transition(&mut menu, &mut focus, false, |m| m.pointer_enter(a));
        assert_eq!(focus.0, Some(a));
        assert_eq!(menu.authority(), Authority::Pointer);
    }

    #[test]
    fn test_transition_reads_live_focus() {
        let (a, b) = entities();
        let mut menu = MenuFocus::default();
        let mut focus = InputFocus::default();

        transition(&mut menu, &mut focus, false, |m| m.pointer_enter(a));
        // Framework moved focus between transitions.
        focus.0 = Some(b);
        menu.set_directional_selection(Some(b));
        transition(&mut menu, &mut focus, false, |m| m.navigate());

        assert_eq!(focus.0, Some(b));
        assert_eq!(menu.surface_mut().drain_exits(), vec![b]);
    }

    #[test]
    fn test_primary_held_reaches_submit_gate() {
        let (a, b) = entities();
        let mut menu = MenuFocus::default();
        let mut focus = InputFocus::default();

        transition(&mut menu, &mut focus, true, |m| {
            m.pointer_enter(a);
            m.set_directional_selection(Some(b));
        });
        assert!(!menu.allows_submit());

        transition(&mut menu, &mut focus, false, |_| {});
        assert!(menu.allows_submit());
    }

    #[test]
    fn test_leaving_a_button_keeps_directional_selection() {
        let (_, quit) = entities();
        let mut menu = MenuFocus::default();
        let mut focus = InputFocus::default();

        transition(&mut menu, &mut focus, false, |m| m.pointer_enter(quit));
        record_selection(&mut menu, &focus);
        transition(&mut menu, &mut focus, false, |m| m.pointer_exit(&quit));
        assert_eq!(focus.0, None);
        record_selection(&mut menu, &focus);
        assert_eq!(menu.directional_selection(), Some(&quit));

        transition(&mut menu, &mut focus, false, |m| m.navigate());
        assert_eq!(focus.0, Some(quit));
    }
}
