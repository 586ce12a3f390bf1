//! End-to-end menu scenarios: router notifications driving the focus
//! arbitrator against a recording surface.
//!
//! The surface here plays the UI framework: it owns the focus slot, keeps a
//! log of synthetic exits, and reads the primary button from the router.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use chopchop_input::{
    ActionContext, ActionName, ActionRouter, Authority, FocusArbitrator, FocusSurface, Phase,
};
use glam::Vec2;
use parking_lot::Mutex;

// ============================================================================
// Shared test setup
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Widget {
    Resume,
    Options,
    Quit,
}

#[derive(Default)]
struct RecordingSurface {
    focused: Option<Widget>,
    cursor_visible: Option<bool>,
    exits: Vec<Widget>,
    primary_held: bool,
}

impl FocusSurface<Widget> for RecordingSurface {
    fn focused(&self) -> Option<Widget> {
        self.focused
    }

    fn set_focused(&mut self, element: Option<Widget>) {
        self.focused = element;
    }

    fn dispatch_pointer_exit(&mut self, element: &Widget) {
        self.exits.push(*element);
    }

    fn set_cursor_visible(&mut self, visible: bool) {
        self.cursor_visible = Some(visible);
    }

    fn primary_pointer_held(&self) -> bool {
        self.primary_held
    }
}

fn menu_router() -> ActionRouter {
    let mut router = ActionRouter::default();
    router.on_enable();
    router.enable_menu_input();
    router
}

// ============================================================================
// Focus scenarios
// ============================================================================

#[test]
fn test_hover_then_navigate_moves_focus_to_directional() {
    let mut menu = FocusArbitrator::new(RecordingSurface::default());
    menu.set_directional_selection(Some(Widget::Options));

    menu.pointer_enter(Widget::Resume);
    assert_eq!(menu.surface().focused, Some(Widget::Resume));
    assert_eq!(menu.surface().cursor_visible, Some(true));

    menu.navigate();
    assert_eq!(menu.surface().focused, Some(Widget::Options));
    assert_eq!(menu.surface().cursor_visible, Some(false));
    assert_ne!(menu.pointer_selection(), Some(&Widget::Resume));
    assert_eq!(menu.authority(), Authority::Directional);
}

#[test]
fn test_navigate_on_directional_focus_clears_hover_highlight() {
    let mut menu = FocusArbitrator::new(RecordingSurface::default());
    menu.set_directional_selection(Some(Widget::Options));
    menu.surface_mut().focused = Some(Widget::Options);

    menu.navigate();
    assert_eq!(menu.surface().exits, vec![Widget::Options]);
    assert_eq!(menu.surface().focused, Some(Widget::Options));
    assert_eq!(menu.pointer_selection(), Some(&Widget::Options));
}

#[test]
fn test_mouse_leaving_after_navigate_clears_focus() {
    let mut menu = FocusArbitrator::new(RecordingSurface::default());
    menu.set_directional_selection(Some(Widget::Options));
    menu.pointer_enter(Widget::Options);

    menu.navigate();
    assert_eq!(menu.surface().exits, vec![Widget::Options]);

    menu.pointer_exit(&Widget::Options);
    assert_eq!(menu.surface().focused, None);
    assert_eq!(menu.pointer_selection(), None);
}

#[test]
fn test_submit_refused_while_dragging_elsewhere() {
    let mut router = menu_router();
    let mut menu = FocusArbitrator::new(RecordingSurface::default());

    menu.set_directional_selection(Some(Widget::Quit));
    menu.pointer_enter(Widget::Resume);
    // Framework re-asserts the keyboard selection.
    menu.set_directional_selection(Some(Widget::Quit));

    router.handle(&ActionContext::button(ActionName::Click, Phase::Performed));
    menu.surface_mut().primary_held = router.primary_pointer_held();
    assert!(!menu.allows_submit());

    router.handle(&ActionContext::button(ActionName::Click, Phase::Canceled));
    menu.surface_mut().primary_held = router.primary_pointer_held();
    assert!(menu.allows_submit());
}

#[test]
fn test_jump_performed_then_canceled() {
    let mut router = ActionRouter::default();
    router.on_enable();

    let jumps = Arc::new(AtomicU32::new(0));
    let cancels = Arc::new(AtomicU32::new(0));
    let j = jumps.clone();
    let _jump = router.gameplay().jump.subscribe(move |_| {
        j.fetch_add(1, Ordering::Relaxed);
    });
    let c = cancels.clone();
    let _cancel = router.gameplay().jump_canceled.subscribe(move |_| {
        c.fetch_add(1, Ordering::Relaxed);
    });

    router.handle(&ActionContext::button(ActionName::Jump, Phase::Performed));
    assert_eq!(jumps.load(Ordering::Relaxed), 1);
    assert_eq!(cancels.load(Ordering::Relaxed), 0);

    router.handle(&ActionContext::button(ActionName::Jump, Phase::Canceled));
    assert_eq!(jumps.load(Ordering::Relaxed), 1);
    assert_eq!(cancels.load(Ordering::Relaxed), 1);
}

// ============================================================================
// Router → arbitrator wiring
// ============================================================================

#[test]
fn test_menu_notifications_drive_authority() {
    let mut router = menu_router();
    let menu = Arc::new(Mutex::new(FocusArbitrator::new(RecordingSurface::default())));
    menu.lock().set_directional_selection(Some(Widget::Resume));

    let m = menu.clone();
    let _nav = router.menu().move_selection.subscribe(move |_| m.lock().navigate());
    let m = menu.clone();
    let _mouse = router.menu().mouse_move.subscribe(move |_| m.lock().pointer_moved());

    router.handle(&ActionContext::axis(ActionName::MouseMove, Phase::Performed, Vec2::new(4.0, 0.0)));
    assert_eq!(menu.lock().authority(), Authority::Pointer);
    assert_eq!(menu.lock().surface().cursor_visible, Some(true));

    router.handle(&ActionContext::axis(ActionName::MoveSelection, Phase::Performed, Vec2::NEG_Y));
    assert_eq!(menu.lock().authority(), Authority::Directional);
    assert_eq!(menu.lock().surface().cursor_visible, Some(false));
    assert_eq!(menu.lock().surface().focused, Some(Widget::Resume));
}

#[test]
fn test_gameplay_drops_menu_notifications() {
    let mut router = ActionRouter::default();
    router.on_enable();
    let menu = Arc::new(Mutex::new(FocusArbitrator::new(RecordingSurface::default())));

    let m = menu.clone();
    let _nav = router.menu().move_selection.subscribe(move |_| m.lock().navigate());

    menu.lock().pointer_enter(Widget::Quit);
    router.handle(&ActionContext::axis(ActionName::MoveSelection, Phase::Performed, Vec2::Y));
    assert_eq!(menu.lock().authority(), Authority::Pointer);
}

#[test]
fn test_dropped_subscription_stops_navigation() {
    let mut router = menu_router();
    let navigations = Arc::new(AtomicU32::new(0));

    let n = navigations.clone();
    let sub = router.menu().move_selection.subscribe(move |_| {
        n.fetch_add(1, Ordering::Relaxed);
    });
    router.handle(&ActionContext::axis(ActionName::MoveSelection, Phase::Performed, Vec2::X));
    drop(sub);
    router.handle(&ActionContext::axis(ActionName::MoveSelection, Phase::Performed, Vec2::X));

    assert_eq!(navigations.load(Ordering::Relaxed), 1);
    assert_eq!(router.menu().move_selection.listener_count(), 0);
}
