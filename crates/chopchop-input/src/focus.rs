//! Focus arbitration between pointer hover and directional navigation.
//!
//! Menus can be driven by two competing modalities: the mouse hovering
//! widgets, and keyboard/gamepad moving a selection. The UI framework has a
//! single "currently focused" slot. [`FocusArbitrator`] decides who writes to
//! it, keeps the cursor visible only while the pointer is in charge, and
//! answers whether a submit gesture should be honored.
//!
//! ```text
//!            pointer_enter / pointer_moved
//!        ┌─────────────────────────────────────┐
//!        │                                     ▼
//! ┌──────────────┐                    ┌─────────────────┐
//! │ Directional  │                    │     Pointer     │
//! │ cursor hidden│                    │ cursor visible  │
//! └──────────────┘                    └─────────────────┘
//!        ▲                                     │
//!        └─────────────────────────────────────┘
//!                        navigate
//! ```
//!
//! The focus slot is owned by the host through [`FocusSurface`]. The host may
//! change it between calls (e.g. a click); every transition re-reads it.

use std::fmt;

/// The UI framework's side of the contract: the shared focus slot, the
/// cursor, and synthetic pointer-exit delivery.
pub trait FocusSurface<E> {
    /// Element currently holding global focus.
    fn focused(&self) -> Option<E>;

    fn set_focused(&mut self, element: Option<E>);

    /// Deliver a pointer-exit to `element` so it drops its hover highlight.
    ///
    /// Presentation only: the arbitrator has already settled focus, so the
    /// host must not route this exit back into [`FocusArbitrator::pointer_exit`].
    /// The surface is borrowed for the call, so it cannot re-enter directly.
    fn dispatch_pointer_exit(&mut self, element: &E);

    fn set_cursor_visible(&mut self, visible: bool);

    /// Whether the primary pointer button is currently held.
    fn primary_pointer_held(&self) -> bool;
}

impl<E, S: FocusSurface<E> + ?Sized> FocusSurface<E> for &mut S {
    fn focused(&self) -> Option<E> {
        (**self).focused()
    }

    fn set_focused(&mut self, element: Option<E>) {
        (**self).set_focused(element);
    }

    fn dispatch_pointer_exit(&mut self, element: &E) {
        (**self).dispatch_pointer_exit(element);
    }

    fn set_cursor_visible(&mut self, visible: bool) {
        (**self).set_cursor_visible(visible);
    }

    fn primary_pointer_held(&self) -> bool {
        (**self).primary_pointer_held()
    }
}

/// Which modality currently drives global focus.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Authority {
    /// Cursor visible, hovered element drives focus.
    Pointer,
    /// Cursor hidden, keyboard/gamepad selection drives focus.
    #[default]
    Directional,
}

/// Plain-data surface: holds the slot and cursor flag itself and queues
/// synthetic exits for the host to deliver later.
///
/// Hosts that cannot lend their own state for the duration of a call (ECS
/// resources, tests) mirror into this before a transition and copy back out
/// after it.
#[derive(Clone, Debug, PartialEq)]
pub struct MirrorSurface<E> {
    pub focused: Option<E>,
    pub cursor_visible: bool,
    pub primary_held: bool,
    /// Synthetic exits in dispatch order, drained by the host.
    pub exits: Vec<E>,
}

impl<E> Default for MirrorSurface<E> {
    fn default() -> Self {
        Self {
            focused: None,
            cursor_visible: false,
            primary_held: false,
            exits: Vec::new(),
        }
    }
}

impl<E> MirrorSurface<E> {
    /// Take the queued synthetic exits.
    pub fn drain_exits(&mut self) -> Vec<E> {
        std::mem::take(&mut self.exits)
    }
}

impl<E: Clone> FocusSurface<E> for MirrorSurface<E> {
    fn focused(&self) -> Option<E> {
        self.focused.clone()
    }

    fn set_focused(&mut self, element: Option<E>) {
        self.focused = element;
    }

    fn dispatch_pointer_exit(&mut self, element: &E) {
        self.exits.push(element.clone());
    }

    fn set_cursor_visible(&mut self, visible: bool) {
        self.cursor_visible = visible;
    }

    fn primary_pointer_held(&self) -> bool {
        self.primary_held
    }
}

/// Reconciles pointer and directional focus into one selection.
///
/// `directional_selection` is what keyboard/gamepad navigation last chose;
/// `pointer_selection` is what the mouse is over. Both are only changed by
/// the transition methods.
pub struct FocusArbitrator<E, S> {
    surface: S,
    directional: Option<E>,
    pointer: Option<E>,
    authority: Authority,
}

impl<E, S> FocusArbitrator<E, S>
where
    E: Clone + PartialEq + fmt::Debug,
    S: FocusSurface<E>,
{
    /// Wrap `surface`. Starts directional, with no selections and the cursor
    /// left as the surface has it until the first transition.
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            directional: None,
            pointer: None,
            authority: Authority::Directional,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn directional_selection(&self) -> Option<&E> {
        self.directional.as_ref()
    }

    pub fn pointer_selection(&self) -> Option<&E> {
        self.pointer.as_ref()
    }

    pub fn authority(&self) -> Authority {
        self.authority
    }

    /// Cursor visibility this arbitrator last requested.
    pub fn cursor_visible(&self) -> bool {
        self.authority == Authority::Pointer
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    /// Pointer entered `element`: it takes focus and the cursor shows.
    pub fn pointer_enter(&mut self, element: E) {
        self.pointer = Some(element.clone());
        self.surface.set_focused(Some(element));
        self.set_authority(Authority::Pointer);
    }

    /// Pointer left `element`. Ignored unless `element` still holds focus.
    pub fn pointer_exit(&mut self, element: &E) {
        if self.surface.focused().as_ref() != Some(element) {
            return;
        }

        self.pointer = None;
        self.surface.set_focused(None);
    }

    /// Pointer moved over the menu: pointer takes authority back and, if it
    /// is still over a widget, that widget regains focus.
    pub fn pointer_moved(&mut self) {
        if let Some(pointer) = self.pointer.clone() {
            self.surface.set_focused(Some(pointer));
        }
        self.set_authority(Authority::Pointer);
    }

    /// Keyboard/gamepad navigation happened.
    ///
    /// Runs before the framework moves focus to the neighbor; afterwards the
    /// focus slot is never empty while a directional selection exists.
    pub fn navigate(&mut self) {
        self.set_authority(Authority::Directional);

        let focused = self.surface.focused();
        if focused == self.directional {
            // The mouse was parked on the directional selection: drop its
            // hover highlight but keep it selected.
            self.pointer = self.directional.clone();
            if let Some(current) = focused {
                self.surface.dispatch_pointer_exit(&current);
            }
            self.surface.set_focused(self.directional.clone());
        } else {
            // Hover-owned focus yields to the directional track.
            if focused.is_some() && focused == self.pointer {
                self.surface.set_focused(None);
            }
            self.pointer = None;
        }

        if self.surface.focused().is_none() {
            self.surface.set_focused(self.pointer.clone());
        }

        if self.surface.focused().is_none() {
            self.pointer = self.directional.clone();
            self.surface.set_focused(self.directional.clone());
        }

        tracing::trace!(
            focused = ?self.surface.focused(),
            directional = ?self.directional,
            pointer = ?self.pointer,
            "navigated"
        );
    }

    /// The framework moved focus on its own; record it as the directional
    /// selection.
    pub fn set_directional_selection(&mut self, element: Option<E>) {
        self.directional = element;
    }

    /// Forget both selections and hand authority back to navigation.
    pub fn reset(&mut self) {
        self.directional = None;
        self.pointer = None;
        self.authority = Authority::Directional;
        self.surface.set_cursor_visible(false);
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Whether a submit gesture on the directional selection should proceed.
    ///
    /// Refused only while the primary button is held over a different
    /// element than the one navigation selected.
    pub fn allows_submit(&self) -> bool {
        if !self.surface.primary_pointer_held() {
            return true;
        }
        match &self.pointer {
            Some(pointer) => self.directional.as_ref() == Some(pointer),
            None => true,
        }
    }

    fn set_authority(&mut self, authority: Authority) {
        if self.authority != authority {
            tracing::debug!(?authority, "focus authority changed");
        }
        self.authority = authority;
        self.surface.set_cursor_visible(authority == Authority::Pointer);
    }
}

impl<E: fmt::Debug, S> fmt::Debug for FocusArbitrator<E, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FocusArbitrator")
            .field("directional", &self.directional)
            .field("pointer", &self.pointer)
            .field("authority", &self.authority)
            .finish()
    }
}
