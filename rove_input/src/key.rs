// Copyright 2025 the Rove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard event model consumed by the focus controllers.

/// Keys the focus controllers react to.
///
/// Anything else arrives as [`Key::Other`] and is ignored by navigation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Tab (direction comes from the shift modifier).
    Tab,
    /// Home.
    Home,
    /// End.
    End,
    /// Page up.
    PageUp,
    /// Page down.
    PageDown,
    /// Enter.
    Enter,
    /// Space bar.
    Space,
    /// Escape.
    Escape,
    /// Any key the focus layer does not interpret.
    Other,
}

/// Modifier state at event time.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    /// Shift held.
    pub shift: bool,
    /// Control held.
    pub ctrl: bool,
    /// Alt/Option held.
    pub alt: bool,
    /// Meta/Command/Windows held.
    pub meta: bool,
}

impl Modifiers {
    /// Shift only.
    pub const SHIFT: Self = Self {
        shift: true,
        ctrl: false,
        alt: false,
        meta: false,
    };
}

/// Caret snapshot for the focused text-editing element at event time.
///
/// Used to decide whether an arrow key should edit text or move focus: focus
/// only moves when the caret already sits at the boundary in the direction of
/// travel and nothing is selected.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CaretInfo {
    /// Caret position in characters from the start of the value.
    pub position: usize,
    /// Total length of the value in characters.
    pub length: usize,
    /// Number of selected characters (0 when the selection is collapsed).
    pub selection: usize,
}

impl CaretInfo {
    /// Caret at the very start of the value with no selection.
    pub fn at_start(&self) -> bool {
        self.position == 0 && self.selection == 0
    }

    /// Caret at the very end of the value with no selection.
    pub fn at_end(&self) -> bool {
        self.position == self.length && self.selection == 0
    }
}

/// A keyboard event as delivered by the host.
///
/// `default_prevented` mirrors the host's own handler chain: when a
/// user-supplied handler has already claimed the event, the focus layer does
/// not process it further.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key.
    pub key: Key,
    /// Modifier state.
    pub modifiers: Modifiers,
    /// Whether an earlier handler already claimed this event.
    pub default_prevented: bool,
    /// Caret snapshot when focus is on a text-editing element.
    pub caret: Option<CaretInfo>,
}

impl KeyEvent {
    /// A plain, unclaimed key press with no modifiers and no caret.
    pub fn plain(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::default(),
            default_prevented: false,
            caret: None,
        }
    }

    /// Same as [`KeyEvent::plain`] but with modifiers.
    pub fn with_modifiers(key: Key, modifiers: Modifiers) -> Self {
        Self {
            key,
            modifiers,
            default_prevented: false,
            caret: None,
        }
    }
}
