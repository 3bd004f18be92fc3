// Copyright 2025 the Rove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The focus trap controller.
//!
//! ## Overview
//!
//! A [`FocusTrap`] constrains focus to one container: sequential navigation
//! wraps at the edges through sentinel bumper nodes, focus and clicks
//! escaping the container are intercepted while the trap is top of the
//! [`FocusStack`], and the element focused before activation is restored on
//! deactivation.
//!
//! Like the zone controllers, a trap only computes. Interception methods
//! return the node the host must refocus; the host performs the platform
//! focus call and cancels the offending event.

use rove_tree::{NodeId, Tree};

use crate::stack::{FocusStack, TrapId};

/// A caller-supplied filter over nodes, consulted at decision time.
pub type NodeFilter = fn(&Tree, NodeId) -> bool;

/// Immutable per-trap policy, fixed at activation.
#[derive(Copy, Clone, Debug, Default)]
pub struct TrapConfig {
    /// A disabled trap performs no containment and never takes the stack.
    pub disabled: bool,
    /// Intercept focus landing outside the container while top of stack.
    pub force_focus_inside: bool,
    /// Let clicks outside the container through even while trapping focus.
    pub clickable_outside: bool,
    /// Skip focus restoration on deactivation.
    pub ignore_external_focusing: bool,
    /// On activation, prefer the element that last held focus inside the
    /// trap over the first tabbable child.
    pub focus_previously_focused_inner: bool,
    /// Do not move focus on activation at all.
    pub disable_first_focus: bool,
    /// Restoration target override; falls back to whatever held focus at
    /// activation time.
    pub element_to_focus_on_dismiss: Option<NodeId>,
    /// Narrows the initial focus to the first tabbable descendant matching
    /// this filter.
    pub first_focus_filter: Option<NodeFilter>,
    /// The two sentinel nodes rendered as first and last children, when the
    /// host uses bumper-based Tab wraparound.
    pub bumpers: Option<[NodeId; 2]>,
}

impl TrapConfig {
    /// Containment on, everything else off.
    pub fn containing() -> Self {
        Self {
            force_focus_inside: true,
            ..Self::default()
        }
    }
}

/// Focus containment controller for one container.
///
/// ## Usage
///
/// - [`FocusTrap::activate`] when the trapping surface opens; focus the
///   returned initial target.
/// - Route bubbling focus events through [`FocusTrap::on_inner_focus`] and
///   capture-phase focus/click events through [`FocusTrap::intercept_focus`]
///   and [`FocusTrap::intercept_click`].
/// - When a bumper reports focus, refocus the node returned by
///   [`FocusTrap::on_bumper_focus`].
/// - [`FocusTrap::deactivate`] on teardown; focus the returned restoration
///   target, if any.
#[derive(Debug)]
pub struct FocusTrap {
    id: TrapId,
    root: NodeId,
    config: TrapConfig,
    previously_focused_outside: Option<NodeId>,
    previously_focused_inside: Option<NodeId>,
}

impl FocusTrap {
    /// Activate a trap on `root`.
    ///
    /// Captures the restoration reference from `currently_focused` (or the
    /// configured override), pushes the trap onto the stack, and returns the
    /// controller together with the node that should receive initial focus,
    /// if any. Returns `None` for a stale root.
    pub fn activate(
        stack: &mut FocusStack,
        tree: &Tree,
        root: NodeId,
        config: TrapConfig,
        currently_focused: Option<NodeId>,
    ) -> Option<(Self, Option<NodeId>)> {
        if !tree.is_alive(root) {
            return None;
        }
        let id = if config.disabled {
            stack.allocate()
        } else {
            stack.push()
        };
        let trap = Self {
            id,
            root,
            config,
            previously_focused_outside: config.element_to_focus_on_dismiss.or(currently_focused),
            previously_focused_inside: None,
        };
        let initial = if config.disabled || config.disable_first_focus {
            None
        } else {
            trap.initial_focus(tree)
        };
        Some((trap, initial))
    }

    /// This trap's stack identity.
    pub fn id(&self) -> TrapId {
        self.id
    }

    /// The trapping container.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The element that last held focus inside the trap, if any.
    pub fn previously_focused_inside(&self) -> Option<NodeId> {
        self.previously_focused_inside
    }

    /// Record a focus landing inside the trap. Bumpers are sentinels, not
    /// content, and are never recorded.
    pub fn on_inner_focus(&mut self, tree: &Tree, target: NodeId) {
        if self.is_bumper(target) || !tree.contains(self.root, target) {
            return;
        }
        self.previously_focused_inside = Some(target);
    }

    /// Redirect focus that landed on a bumper.
    ///
    /// The leading bumper is reached by Shift+Tab off the first element, so
    /// it wraps to the last tabbable child; the trailing bumper wraps to the
    /// first. Returns `None` when the node is not one of this trap's bumpers
    /// or the trap has no content.
    pub fn on_bumper_focus(&self, tree: &Tree, bumper: NodeId) -> Option<NodeId> {
        let [first, last] = self.config.bumpers?;
        if bumper == first {
            self.last_inner_tabbable(tree)
        } else if bumper == last {
            self.first_inner_tabbable(tree)
        } else {
            None
        }
    }

    /// Capture-phase check for a focus event targeting `target`.
    ///
    /// Returns the node the host must refocus when the event moves focus
    /// outside the container while this trap is enforcing containment and is
    /// top of the stack. `None` means let the event proceed.
    pub fn intercept_focus(
        &self,
        stack: &FocusStack,
        tree: &Tree,
        target: NodeId,
    ) -> Option<NodeId> {
        if self.config.disabled || !self.config.force_focus_inside || !stack.is_top(self.id) {
            return None;
        }
        if tree.contains(self.root, target) {
            return None;
        }
        self.refocus_target(tree)
    }

    /// Capture-phase check for a click on `target`. Same containment rule as
    /// [`FocusTrap::intercept_focus`], unless outside clicks are allowed.
    pub fn intercept_click(
        &self,
        stack: &FocusStack,
        tree: &Tree,
        target: NodeId,
    ) -> Option<NodeId> {
        if self.config.clickable_outside {
            return None;
        }
        self.intercept_focus(stack, tree, target)
    }

    /// Deactivate the trap, removing it from the stack by identity.
    ///
    /// Returns the node focus should be restored to: the captured outside
    /// reference, but only when restoration is not suppressed, focus is
    /// still inside the trap or nowhere (`currently_focused` is `None`), and
    /// the target still accepts focus. Restoring never steals focus from a
    /// legitimate target the user moved to in the meantime.
    pub fn deactivate(
        self,
        stack: &mut FocusStack,
        tree: &Tree,
        currently_focused: Option<NodeId>,
    ) -> Option<NodeId> {
        stack.remove(self.id);
        if self.config.ignore_external_focusing {
            return None;
        }
        let still_ours = match currently_focused {
            None => true,
            Some(cur) => tree.contains(self.root, cur),
        };
        if !still_ours {
            return None;
        }
        self.previously_focused_outside
            .filter(|&n| tree.is_focusable(n))
    }

    // --- internals ---

    /// Initial focus per activation policy: the remembered inner element,
    /// else the first filter match, else the first tabbable child.
    fn initial_focus(&self, tree: &Tree) -> Option<NodeId> {
        if self.config.focus_previously_focused_inner
            && let Some(prev) = self.previously_focused_inside
            && tree.contains(self.root, prev)
            && tree.is_focusable(prev)
        {
            return Some(prev);
        }
        if let Some(filter) = self.config.first_focus_filter {
            let mut cur = self.first_inner_tabbable(tree);
            while let Some(n) = cur {
                if filter(tree, n) {
                    return Some(n);
                }
                cur = self.next_inner_tabbable(tree, n);
            }
        }
        self.first_inner_tabbable(tree)
    }

    /// Where escaping focus is sent back to.
    fn refocus_target(&self, tree: &Tree) -> Option<NodeId> {
        if let Some(prev) = self.previously_focused_inside
            && tree.contains(self.root, prev)
            && tree.is_focusable(prev)
        {
            return Some(prev);
        }
        self.first_inner_tabbable(tree)
    }

    fn is_bumper(&self, node: NodeId) -> bool {
        self.config
            .bumpers
            .is_some_and(|[a, b]| node == a || node == b)
    }

    fn first_inner_tabbable(&self, tree: &Tree) -> Option<NodeId> {
        let mut cur = tree.first_tabbable(self.root);
        while let Some(n) = cur {
            if !self.is_bumper(n) {
                return Some(n);
            }
            cur = tree.next_tabbable(self.root, n, false);
        }
        None
    }

    fn last_inner_tabbable(&self, tree: &Tree) -> Option<NodeId> {
        let mut cur = tree.last_tabbable(self.root);
        while let Some(n) = cur {
            if !self.is_bumper(n) {
                return Some(n);
            }
            cur = tree.prev_tabbable(self.root, n, false);
        }
        None
    }

    fn next_inner_tabbable(&self, tree: &Tree, from: NodeId) -> Option<NodeId> {
        let mut cur = tree.next_tabbable(self.root, from, false);
        while let Some(n) = cur {
            if !self.is_bumper(n) {
                return Some(n);
            }
            cur = tree.next_tabbable(self.root, n, false);
        }
        None
    }
}
