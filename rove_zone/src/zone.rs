// Copyright 2025 the Rove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The focus zone controller.
//!
//! ## Overview
//!
//! One [`FocusZone`] is attached per container node. It tracks the active
//! descendant, maintains the roving tab-index attributes across the
//! container's focusable stops, and routes keyboard and mouse input to the
//! navigation engine.
//!
//! The controller only computes: every operation returns a [`ZoneResponse`]
//! whose [`ZoneEvent`]s tell the host what to do (perform a platform focus,
//! activate an element, hand a move over to a nested zone's controller). The
//! controller never invokes callbacks itself.
//!
//! ## States
//!
//! A zone is [`ZonePhase::Idle`] until focus enters it, [`ZonePhase::Active`]
//! while a descendant is active, and [`ZonePhase::Parked`] while the
//! container root holds focus because no focusable descendant exists.

use alloc::vec::Vec;

use rove_input::{Key, KeyEvent, NavQuiet};
use rove_nav::{Alignment, Axis, Direction, move_focus, refresh_alignment};
use rove_tree::{NodeFlags, NodeId, Tree};

use crate::config::{TabHandling, ZoneConfig};
use crate::registry::{ZoneId, ZoneRegistry};

/// An instruction for the host, produced by a zone operation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ZoneEvent {
    /// The zone's active element changed. `current` is `None` when the
    /// previous active element disappeared without a successor.
    ActiveElementChanged {
        /// The element that was active before, if any.
        previous: Option<NodeId>,
        /// The element that is active now, if any.
        current: Option<NodeId>,
    },
    /// The host must perform a platform focus on this node.
    FocusRequested(NodeId),
    /// Enter/Space activation of the focused element; the host invokes the
    /// element's action.
    Activated(NodeId),
    /// The move belongs to another zone's controller: call `focus` on it
    /// (`target` is `None`) or `focus_element(target)`.
    Delegated {
        /// The controller that owns the move.
        zone: ZoneId,
        /// Element to focus within that zone, or `None` for its default.
        target: Option<NodeId>,
    },
}

/// Outcome of a zone operation.
///
/// `handled` tells the host whether to suppress the platform's default
/// behavior for the triggering input; `events` carry the work to perform.
#[derive(Debug, Default)]
pub struct ZoneResponse {
    /// Whether the zone consumed the input.
    pub handled: bool,
    /// Instructions for the host, in order.
    pub events: Vec<ZoneEvent>,
}

impl ZoneResponse {
    fn ignored() -> Self {
        Self::default()
    }

    fn handled(events: Vec<ZoneEvent>) -> Self {
        Self {
            handled: true,
            events,
        }
    }
}

/// Lifecycle phase of a zone.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ZonePhase {
    /// No focus within the zone.
    Idle,
    /// A descendant is active and carries the roving stop.
    Active,
    /// The container root holds focus because it has no focusable
    /// descendants.
    Parked,
}

/// Roving-tabindex controller for one container.
///
/// ## Usage
///
/// - [`FocusZone::attach`] once per container; keep the returned controller
///   alongside the host's view state and [`FocusZone::detach`] it on
///   teardown.
/// - Route the host's focus, key, and mouse events through
///   [`FocusZone::on_focus_in`], [`FocusZone::on_key_down`], and
///   [`FocusZone::on_mouse_down`], and apply the returned [`ZoneEvent`]s.
/// - Call [`FocusZone::update_tab_indexes`] after children are added,
///   removed, or re-rendered, and [`FocusZone::on_tick`] once per host tick
///   to drain deferred work.
#[derive(Debug)]
pub struct FocusZone {
    id: ZoneId,
    root: NodeId,
    config: ZoneConfig,
    active: Option<NodeId>,
    alignment: Alignment,
    parked: bool,
    /// Root tab-index attribute saved while parked, restored on unpark.
    saved_root_tab_index: Option<Option<i8>>,
    is_inner: bool,
    quiet: NavQuiet,
    deferred: rove_input::Deferred<NodeId>,
}

impl FocusZone {
    /// Attach a controller to `root`, marking it as a zone root and
    /// registering its nesting with the registry. Returns `None` for a stale
    /// root.
    pub fn attach(
        tree: &mut Tree,
        registry: &mut ZoneRegistry,
        root: NodeId,
        config: ZoneConfig,
    ) -> Option<Self> {
        let flags = tree.flags(root)?;
        let id = registry.register(tree, root);
        tree.set_flags(root, flags | NodeFlags::ZONE_ROOT);
        let mut zone = Self {
            id,
            root,
            config,
            active: None,
            alignment: Alignment::default(),
            parked: false,
            saved_root_tab_index: None,
            is_inner: registry.parent_of(id).is_some(),
            quiet: NavQuiet::new(),
            deferred: rove_input::Deferred::new(),
        };
        let _ = zone.update_tab_indexes(tree);
        Some(zone)
    }

    /// Detach the controller: unregister, drop the zone-root marker, restore
    /// a parked root's tab index, and cancel pending deferred work.
    pub fn detach(mut self, tree: &mut Tree, registry: &mut ZoneRegistry) {
        self.deferred.cancel();
        self.quiet.reset();
        if self.parked {
            self.unpark(tree);
        }
        if let Some(flags) = tree.flags(self.root) {
            tree.set_flags(self.root, flags - NodeFlags::ZONE_ROOT);
        }
        registry.unregister(self.id);
    }

    /// This zone's registry identifier.
    pub fn id(&self) -> ZoneId {
        self.id
    }

    /// The container root.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The active descendant, if any.
    pub fn active_element(&self) -> Option<NodeId> {
        self.active
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> ZonePhase {
        if self.parked {
            ZonePhase::Parked
        } else if self.active.is_some() {
            ZonePhase::Active
        } else {
            ZonePhase::Idle
        }
    }

    /// Whether this zone is nested inside another registered zone.
    pub fn is_inner(&self) -> bool {
        self.is_inner
    }

    /// Give focus to the zone.
    ///
    /// Without `force_first`, an inner zone whose root is itself focusable
    /// hands the request to its enclosing zone (so the outer roving stop
    /// stays consistent), and a remembered active element is preferred over
    /// the default. With `force_first`, the default element is focused
    /// directly.
    pub fn focus(&mut self, tree: &mut Tree, registry: &ZoneRegistry, force_first: bool) -> ZoneResponse {
        if self.config.disabled {
            return ZoneResponse::ignored();
        }
        if !force_first
            && self.is_inner
            && tree
                .flags(self.root)
                .is_some_and(|f| f.contains(NodeFlags::FOCUSABLE))
            && let Some(parent) = registry.parent_of(self.id)
        {
            return ZoneResponse::handled(alloc::vec![ZoneEvent::Delegated {
                zone: parent,
                target: Some(self.root),
            }]);
        }
        if !force_first
            && let Some(active) = self.active
            && tree.contains(self.root, active)
            && tree.is_focusable(active)
        {
            return ZoneResponse::handled(alloc::vec![ZoneEvent::FocusRequested(active)]);
        }
        if let Some(first) = self.default_target(tree) {
            return self.focus_element(tree, first);
        }
        if tree
            .flags(self.root)
            .is_some_and(|f| f.contains(NodeFlags::FOCUSABLE))
        {
            let mut events = Vec::new();
            self.park(tree, &mut events);
            return ZoneResponse::handled(events);
        }
        ZoneResponse::ignored()
    }

    /// Make `node` the active element and request a platform focus on it.
    ///
    /// Fails silently for stale, outside, or vetoed nodes. A node that is
    /// still rendering (contained but not yet focusable) is retried on the
    /// next [`FocusZone::on_tick`].
    pub fn focus_element(&mut self, tree: &mut Tree, node: NodeId) -> ZoneResponse {
        if self.config.disabled || !tree.contains(self.root, node) {
            return ZoneResponse::ignored();
        }
        if !tree.is_focusable(node) {
            // Children may appear focusable only after the host finishes the
            // current render pass.
            self.deferred.arm(node);
            return ZoneResponse::ignored();
        }
        if let Some(pred) = self.config.should_receive_focus
            && !pred(tree, node)
        {
            return ZoneResponse::ignored();
        }
        let mut events = Vec::new();
        self.set_active(tree, node, &mut events);
        if let Some(rect) = tree.bounds(node) {
            self.alignment = Alignment::from_rect(rect);
        }
        events.push(ZoneEvent::FocusRequested(node));
        ZoneResponse::handled(events)
    }

    /// Re-derive roving tab indexes across the container.
    ///
    /// Call after children are added, removed, or re-rendered. Clears a
    /// stale active element, parks the zone when an active element vanished
    /// and no focusable descendant remains, and unparks when children
    /// reappear.
    pub fn update_tab_indexes(&mut self, tree: &mut Tree) -> ZoneResponse {
        let mut events = Vec::new();
        let stops = self.focusable_stops(tree);
        let candidates = self.stop_candidates(tree);
        if self.config.disabled {
            for &n in &candidates {
                tree.set_tab_index(n, Some(-1));
            }
            return ZoneResponse {
                handled: false,
                events,
            };
        }
        let had_active = self.active.is_some();
        if let Some(active) = self.active
            && !(tree.contains(self.root, active) && tree.is_focusable(active))
        {
            self.active = None;
            events.push(ZoneEvent::ActiveElementChanged {
                previous: Some(active),
                current: None,
            });
        }
        if stops.is_empty() {
            for &n in &candidates {
                tree.set_tab_index(n, Some(-1));
            }
            if had_active
                && !self.parked
                && tree
                    .flags(self.root)
                    .is_some_and(|f| f.contains(NodeFlags::FOCUSABLE))
            {
                self.park(tree, &mut events);
            }
            let handled = !events.is_empty();
            return ZoneResponse { handled, events };
        }
        if self.parked {
            self.unpark(tree);
        }
        let chosen = self.active.or_else(|| {
            // Only a top-level zone plants a default stop; an inner zone is
            // reached through its root, which roves in the outer zone.
            if self.is_inner {
                None
            } else {
                self.default_target(tree)
            }
        });
        for &n in &candidates {
            let value = if Some(n) == chosen { 0 } else { -1 };
            tree.set_tab_index(n, Some(value));
        }
        let handled = !events.is_empty();
        ZoneResponse { handled, events }
    }

    /// Handle a focus event bubbling from inside the container.
    ///
    /// Only immediate stops of this zone update the active element: when the
    /// target sits inside a nested zone, the nested zone's root becomes this
    /// zone's active element and the rest is the inner controller's concern.
    pub fn on_focus_in(
        &mut self,
        tree: &mut Tree,
        registry: &ZoneRegistry,
        target: NodeId,
    ) -> ZoneResponse {
        if self.config.disabled {
            return ZoneResponse::ignored();
        }
        if target == self.root {
            // Root focus is only meaningful while parked.
            return ZoneResponse {
                handled: self.parked,
                events: Vec::new(),
            };
        }
        let Some(stop) = self.immediate_stop(tree, registry, target) else {
            return ZoneResponse::ignored();
        };
        if !tree.is_focusable(stop) {
            return ZoneResponse::ignored();
        }
        let mut events = Vec::new();
        self.set_active(tree, stop, &mut events);
        if let Some(rect) = tree.bounds(stop) {
            self.alignment = Alignment::from_rect(rect);
        }
        ZoneResponse::handled(events)
    }

    /// Handle a key press while focus is inside the zone.
    ///
    /// `now_ms` is the host's monotonic timestamp, used to suppress
    /// hover-driven focus while keyboard navigation is in flight.
    pub fn on_key_down(
        &mut self,
        tree: &mut Tree,
        registry: &ZoneRegistry,
        event: KeyEvent,
        now_ms: u64,
    ) -> ZoneResponse {
        if self.config.disabled || event.default_prevented {
            return ZoneResponse::ignored();
        }
        // Alt/Meta chords are reserved for the platform.
        if event.modifiers.alt || event.modifiers.meta {
            return ZoneResponse::ignored();
        }
        let Some(active) = self.active else {
            return ZoneResponse::ignored();
        };
        let in_text_input = tree
            .flags(active)
            .is_some_and(|f| f.contains(NodeFlags::TEXT_INPUT));

        if matches!(event.key, Key::Enter | Key::Space) {
            if in_text_input {
                return ZoneResponse::ignored();
            }
            return ZoneResponse::handled(alloc::vec![ZoneEvent::Activated(active)]);
        }

        let vertical = matches!(self.config.axis, Axis::Vertical | Axis::Bidirectional);
        let horizontal = matches!(self.config.axis, Axis::Horizontal | Axis::Bidirectional);
        let direction = match event.key {
            Key::Tab => match self.config.handle_tab {
                TabHandling::None => return ZoneResponse::ignored(),
                TabHandling::InputOnly if !in_text_input => return ZoneResponse::ignored(),
                TabHandling::All | TabHandling::InputOnly => {
                    if event.modifiers.shift {
                        Direction::Prev
                    } else {
                        Direction::Next
                    }
                }
            },
            Key::Up if vertical => Direction::Up,
            Key::Down if vertical => Direction::Down,
            Key::Left if horizontal => Direction::Left,
            Key::Right if horizontal => Direction::Right,
            Key::PageUp if vertical => Direction::PageUp,
            Key::PageDown if vertical => Direction::PageDown,
            Key::Home => Direction::Home,
            Key::End => Direction::End,
            _ => return ZoneResponse::ignored(),
        };

        // Inside a text input, horizontal travel edits text until the caret
        // reaches the boundary in the direction of travel.
        if in_text_input
            && let Some(caret) = event.caret
        {
            let at_boundary = match direction {
                Direction::Left | Direction::Home => caret.at_start(),
                Direction::Right | Direction::End => caret.at_end(),
                _ => true,
            };
            if !at_boundary {
                return ZoneResponse::ignored();
            }
        }

        self.quiet.note_navigation(now_ms);
        let Some(candidate) = move_focus(
            tree,
            self.root,
            active,
            direction,
            self.alignment,
            &self.config.nav_options(),
        ) else {
            return ZoneResponse::ignored();
        };

        let mut events = Vec::new();
        if let Some(inner) = registry.zone_at(candidate).filter(|&z| z != self.id) {
            let enter = self
                .config
                .should_enter_inner_zone
                .is_none_or(|pred| pred(tree, candidate));
            self.set_active(tree, candidate, &mut events);
            if enter {
                events.push(ZoneEvent::Delegated {
                    zone: inner,
                    target: None,
                });
            } else {
                events.push(ZoneEvent::FocusRequested(candidate));
            }
            return ZoneResponse::handled(events);
        }

        if let Some(pred) = self.config.should_receive_focus
            && !pred(tree, candidate)
        {
            return ZoneResponse::ignored();
        }
        self.set_active(tree, candidate, &mut events);
        if let Some(rect) = tree.bounds(candidate) {
            self.alignment = refresh_alignment(direction, rect, self.alignment);
        }
        events.push(ZoneEvent::FocusRequested(candidate));
        ZoneResponse::handled(events)
    }

    /// Handle a mouse press on `target`.
    ///
    /// The innermost focusable node on the path from the target to the
    /// container becomes active, stopping at the first nested zone boundary
    /// (that zone root becomes the stop; the inner controller handles the
    /// rest of the click itself). The platform focuses on press, so no
    /// [`ZoneEvent::FocusRequested`] is emitted.
    pub fn on_mouse_down(
        &mut self,
        tree: &mut Tree,
        registry: &ZoneRegistry,
        target: NodeId,
    ) -> ZoneResponse {
        if self.config.disabled || target == self.root {
            return ZoneResponse::ignored();
        }
        let Some(path) = tree.path_to_ancestor(target, self.root) else {
            return ZoneResponse::ignored();
        };
        let mut chosen = None;
        // Outermost first, root excluded.
        for &node in path.iter().rev().skip(1) {
            if registry.zone_at(node).is_some() {
                chosen = Some(node);
                break;
            }
            if tree.is_focusable(node) {
                chosen = Some(node);
            }
        }
        let Some(stop) = chosen.filter(|&n| tree.is_focusable(n)) else {
            return ZoneResponse::ignored();
        };
        let mut events = Vec::new();
        self.set_active(tree, stop, &mut events);
        if let Some(rect) = tree.bounds(stop) {
            self.alignment = Alignment::from_rect(rect);
        }
        ZoneResponse::handled(events)
    }

    /// Handle a hover event that would move focus (hover-to-focus hosts).
    ///
    /// Suppressed while keyboard navigation happened within the quiet
    /// period, so a pointer resting over the list does not fight the arrows.
    pub fn on_hover(
        &mut self,
        tree: &mut Tree,
        registry: &ZoneRegistry,
        target: NodeId,
        now_ms: u64,
    ) -> ZoneResponse {
        if self.config.disabled || !self.quiet.allows_hover_focus(now_ms) {
            return ZoneResponse::ignored();
        }
        if self.immediate_stop(tree, registry, target) != Some(target) {
            return ZoneResponse::ignored();
        }
        self.focus_element(tree, target)
    }

    /// Drain deferred work; call once per host tick.
    pub fn on_tick(&mut self, tree: &mut Tree) -> ZoneResponse {
        let Some(node) = self.deferred.take() else {
            return ZoneResponse::ignored();
        };
        if !(tree.contains(self.root, node) && tree.is_focusable(node)) {
            return ZoneResponse::ignored();
        }
        self.focus_element(tree, node)
    }

    // --- internals ---

    /// Make `node` the active element, maintaining the roving invariant.
    fn set_active(&mut self, tree: &mut Tree, node: NodeId, events: &mut Vec<ZoneEvent>) {
        if self.parked {
            self.unpark(tree);
        }
        let previous = self.active;
        if previous == Some(node) {
            return;
        }
        if let Some(prev) = previous {
            tree.set_tab_index(prev, Some(-1));
        }
        tree.set_tab_index(node, Some(0));
        self.active = Some(node);
        events.push(ZoneEvent::ActiveElementChanged {
            previous,
            current: Some(node),
        });
    }

    fn park(&mut self, tree: &mut Tree, events: &mut Vec<ZoneEvent>) {
        debug_assert!(!self.parked, "parking an already parked zone");
        self.parked = true;
        self.active = None;
        self.saved_root_tab_index = Some(tree.tab_index(self.root));
        tree.set_tab_index(self.root, Some(-1));
        events.push(ZoneEvent::FocusRequested(self.root));
    }

    fn unpark(&mut self, tree: &mut Tree) {
        if let Some(saved) = self.saved_root_tab_index.take() {
            tree.set_tab_index(self.root, saved);
        }
        self.parked = false;
    }

    /// The stop of this zone the event target maps to: the outermost nested
    /// zone root on the path, or the target itself. `None` when the target
    /// is outside the container.
    fn immediate_stop(
        &self,
        tree: &Tree,
        registry: &ZoneRegistry,
        target: NodeId,
    ) -> Option<NodeId> {
        let path = tree.path_to_ancestor(target, self.root)?;
        for &node in path.iter().rev().skip(1) {
            if registry.zone_at(node).is_some() {
                return Some(node);
            }
        }
        Some(target)
    }

    /// All focusable stops of the container, in document order.
    fn focusable_stops(&self, tree: &Tree) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut cur = tree.first_focusable(self.root);
        while let Some(n) = cur {
            out.push(n);
            cur = tree.next_focusable(self.root, n, false);
        }
        out
    }

    /// The stops plus disabled-but-otherwise-focusable nodes, in document
    /// order. Tab-index writes cover these too, so a disabled control holds
    /// −1 instead of a stale order when it is re-enabled.
    fn stop_candidates(&self, tree: &Tree) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut cur = tree.next_focus_candidate(self.root, self.root, false);
        while let Some(n) = cur {
            out.push(n);
            cur = tree.next_focus_candidate(self.root, n, false);
        }
        out
    }

    /// The element the initial roving stop should land on.
    fn default_target(&self, tree: &Tree) -> Option<NodeId> {
        if let Some(pred) = self.config.default_tabbable {
            let mut cur = tree.first_focusable(self.root);
            while let Some(n) = cur {
                if pred(tree, n) {
                    return Some(n);
                }
                cur = tree.next_focusable(self.root, n, false);
            }
        }
        tree.first_focusable(self.root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use kurbo::Rect;
    use rove_input::{CaretInfo, Modifiers};
    use rove_tree::FocusableNode;

    fn leaf(x: f64, y: f64) -> FocusableNode {
        FocusableNode {
            bounds: Rect::new(x, y, x + 50.0, y + 50.0),
            flags: NodeFlags::VISIBLE | NodeFlags::FOCUSABLE,
            ..FocusableNode::default()
        }
    }

    fn container(x: f64, y: f64, w: f64, h: f64) -> FocusableNode {
        FocusableNode {
            bounds: Rect::new(x, y, x + w, y + h),
            flags: NodeFlags::VISIBLE,
            ..FocusableNode::default()
        }
    }

    /// Exactly one stop carries tab index 0; every other stop carries −1.
    fn assert_roving(tree: &Tree, root: NodeId, expected: NodeId) {
        let mut cur = tree.first_focusable(root);
        let mut zeroes = Vec::new();
        while let Some(n) = cur {
            match tree.tab_index(n) {
                Some(0) => zeroes.push(n),
                Some(-1) => {}
                other => panic!("stop {n:?} has unexpected tab index {other:?}"),
            }
            cur = tree.next_focusable(root, n, false);
        }
        assert_eq!(zeroes, vec![expected]);
    }

    fn focus_requested(response: &ZoneResponse) -> Option<NodeId> {
        response.events.iter().find_map(|e| match e {
            ZoneEvent::FocusRequested(n) => Some(*n),
            _ => None,
        })
    }

    #[test]
    fn attach_plants_default_roving_stop() {
        let mut tree = Tree::new();
        let root = tree.insert(None, container(0.0, 0.0, 200.0, 50.0));
        let a = tree.insert(Some(root), leaf(0.0, 0.0));
        let b = tree.insert(
            Some(root),
            FocusableNode {
                flags: NodeFlags::VISIBLE | NodeFlags::FOCUSABLE | NodeFlags::DISABLED,
                ..leaf(50.0, 0.0)
            },
        );
        let _c = tree.insert(Some(root), leaf(100.0, 0.0));

        let mut registry = ZoneRegistry::new();
        let zone = FocusZone::attach(&mut tree, &mut registry, root, ZoneConfig::default()).unwrap();

        assert_eq!(zone.phase(), ZonePhase::Idle);
        assert_roving(&tree, root, a);
        assert_eq!(
            tree.tab_index(b),
            Some(-1),
            "a disabled child still gets parked out of the tab order"
        );
        assert!(tree.flags(root).unwrap().contains(NodeFlags::ZONE_ROOT));
    }

    #[test]
    fn arrow_navigation_skips_disabled_and_roves() {
        let mut tree = Tree::new();
        let root = tree.insert(None, container(0.0, 0.0, 200.0, 50.0));
        let a = tree.insert(Some(root), leaf(0.0, 0.0));
        let _b = tree.insert(
            Some(root),
            FocusableNode {
                flags: NodeFlags::VISIBLE | NodeFlags::FOCUSABLE | NodeFlags::DISABLED,
                ..leaf(50.0, 0.0)
            },
        );
        let c = tree.insert(Some(root), leaf(100.0, 0.0));

        let mut registry = ZoneRegistry::new();
        let config = ZoneConfig {
            axis: Axis::Horizontal,
            ..ZoneConfig::default()
        };
        let mut zone = FocusZone::attach(&mut tree, &mut registry, root, config).unwrap();
        let _ = zone.on_focus_in(&mut tree, &registry, a);
        assert_eq!(zone.phase(), ZonePhase::Active);

        let response = zone.on_key_down(&mut tree, &registry, KeyEvent::plain(Key::Right), 0);
        assert!(response.handled);
        assert_eq!(focus_requested(&response), Some(c));
        assert_eq!(zone.active_element(), Some(c));
        assert_roving(&tree, root, c);
    }

    #[test]
    fn axis_gates_arrow_keys() {
        let mut tree = Tree::new();
        let root = tree.insert(None, container(0.0, 0.0, 50.0, 200.0));
        let a = tree.insert(Some(root), leaf(0.0, 0.0));
        let b = tree.insert(Some(root), leaf(0.0, 50.0));

        let mut registry = ZoneRegistry::new();
        let config = ZoneConfig {
            axis: Axis::Vertical,
            ..ZoneConfig::default()
        };
        let mut zone = FocusZone::attach(&mut tree, &mut registry, root, config).unwrap();
        let _ = zone.on_focus_in(&mut tree, &registry, a);

        let right = zone.on_key_down(&mut tree, &registry, KeyEvent::plain(Key::Right), 0);
        assert!(!right.handled, "horizontal keys are off in a vertical zone");

        let down = zone.on_key_down(&mut tree, &registry, KeyEvent::plain(Key::Down), 0);
        assert_eq!(focus_requested(&down), Some(b));
    }

    #[test]
    fn modified_and_claimed_keys_are_ignored() {
        let mut tree = Tree::new();
        let root = tree.insert(None, container(0.0, 0.0, 200.0, 50.0));
        let a = tree.insert(Some(root), leaf(0.0, 0.0));
        let _b = tree.insert(Some(root), leaf(50.0, 0.0));

        let mut registry = ZoneRegistry::new();
        let mut zone =
            FocusZone::attach(&mut tree, &mut registry, root, ZoneConfig::default()).unwrap();
        let _ = zone.on_focus_in(&mut tree, &registry, a);

        let alt = Modifiers {
            alt: true,
            ..Modifiers::default()
        };
        let response =
            zone.on_key_down(&mut tree, &registry, KeyEvent::with_modifiers(Key::Right, alt), 0);
        assert!(!response.handled);

        let mut claimed = KeyEvent::plain(Key::Right);
        claimed.default_prevented = true;
        let response = zone.on_key_down(&mut tree, &registry, claimed, 0);
        assert!(!response.handled);
        assert_eq!(zone.active_element(), Some(a));
    }

    #[test]
    fn tab_handling_modes() {
        let mut tree = Tree::new();
        let root = tree.insert(None, container(0.0, 0.0, 200.0, 50.0));
        let a = tree.insert(Some(root), leaf(0.0, 0.0));
        let b = tree.insert(Some(root), leaf(50.0, 0.0));

        let mut registry = ZoneRegistry::new();

        // None: the platform keeps Tab.
        let mut zone =
            FocusZone::attach(&mut tree, &mut registry, root, ZoneConfig::default()).unwrap();
        let _ = zone.on_focus_in(&mut tree, &registry, a);
        assert!(!zone.on_key_down(&mut tree, &registry, KeyEvent::plain(Key::Tab), 0).handled);
        zone.detach(&mut tree, &mut registry);

        // All: Tab roves within the zone, Shift+Tab reverses.
        let config = ZoneConfig {
            handle_tab: TabHandling::All,
            ..ZoneConfig::default()
        };
        let mut zone = FocusZone::attach(&mut tree, &mut registry, root, config).unwrap();
        let _ = zone.on_focus_in(&mut tree, &registry, a);
        let forward = zone.on_key_down(&mut tree, &registry, KeyEvent::plain(Key::Tab), 0);
        assert_eq!(focus_requested(&forward), Some(b));
        let back = zone.on_key_down(
            &mut tree,
            &registry,
            KeyEvent::with_modifiers(Key::Tab, Modifiers::SHIFT),
            0,
        );
        assert_eq!(focus_requested(&back), Some(a));
        zone.detach(&mut tree, &mut registry);

        // InputOnly: Tab is intercepted only while a text input is active.
        let config = ZoneConfig {
            handle_tab: TabHandling::InputOnly,
            ..ZoneConfig::default()
        };
        let mut zone = FocusZone::attach(&mut tree, &mut registry, root, config).unwrap();
        let _ = zone.on_focus_in(&mut tree, &registry, a);
        assert!(!zone.on_key_down(&mut tree, &registry, KeyEvent::plain(Key::Tab), 0).handled);
        tree.set_flags(
            a,
            NodeFlags::VISIBLE | NodeFlags::FOCUSABLE | NodeFlags::TEXT_INPUT,
        );
        let response = zone.on_key_down(&mut tree, &registry, KeyEvent::plain(Key::Tab), 0);
        assert_eq!(focus_requested(&response), Some(b));
    }

    #[test]
    fn caret_boundary_gates_horizontal_moves() {
        let mut tree = Tree::new();
        let root = tree.insert(None, container(0.0, 0.0, 200.0, 50.0));
        let before = tree.insert(Some(root), leaf(0.0, 0.0));
        let input = tree.insert(
            Some(root),
            FocusableNode {
                flags: NodeFlags::VISIBLE | NodeFlags::FOCUSABLE | NodeFlags::TEXT_INPUT,
                ..leaf(50.0, 0.0)
            },
        );

        let mut registry = ZoneRegistry::new();
        let config = ZoneConfig {
            axis: Axis::Horizontal,
            ..ZoneConfig::default()
        };
        let mut zone = FocusZone::attach(&mut tree, &mut registry, root, config).unwrap();
        let _ = zone.on_focus_in(&mut tree, &registry, input);

        // Caret in the middle: Left edits text, focus stays.
        let mut mid = KeyEvent::plain(Key::Left);
        mid.caret = Some(CaretInfo {
            position: 2,
            length: 5,
            selection: 0,
        });
        assert!(!zone.on_key_down(&mut tree, &registry, mid, 0).handled);
        assert_eq!(zone.active_element(), Some(input));

        // Caret at the start: Left now moves focus.
        let mut at_start = KeyEvent::plain(Key::Left);
        at_start.caret = Some(CaretInfo {
            position: 0,
            length: 5,
            selection: 0,
        });
        let response = zone.on_key_down(&mut tree, &registry, at_start, 0);
        assert_eq!(focus_requested(&response), Some(before));
    }

    #[test]
    fn enter_activates_the_focused_element() {
        let mut tree = Tree::new();
        let root = tree.insert(None, container(0.0, 0.0, 200.0, 50.0));
        let a = tree.insert(Some(root), leaf(0.0, 0.0));

        let mut registry = ZoneRegistry::new();
        let mut zone =
            FocusZone::attach(&mut tree, &mut registry, root, ZoneConfig::default()).unwrap();
        let _ = zone.on_focus_in(&mut tree, &registry, a);

        let response = zone.on_key_down(&mut tree, &registry, KeyEvent::plain(Key::Enter), 0);
        assert!(response.handled);
        assert_eq!(response.events, vec![ZoneEvent::Activated(a)]);
    }

    #[test]
    fn mouse_down_marks_innermost_focusable() {
        let mut tree = Tree::new();
        let root = tree.insert(None, container(0.0, 0.0, 200.0, 50.0));
        let row = tree.insert(Some(root), leaf(0.0, 0.0));
        // A non-focusable wrapper inside the row, and a plain label inside it.
        let wrapper = tree.insert(Some(row), container(0.0, 0.0, 40.0, 40.0));
        let label = tree.insert(Some(wrapper), container(0.0, 0.0, 30.0, 30.0));

        let mut registry = ZoneRegistry::new();
        let mut zone =
            FocusZone::attach(&mut tree, &mut registry, root, ZoneConfig::default()).unwrap();

        let response = zone.on_mouse_down(&mut tree, &registry, label);
        assert!(response.handled);
        assert_eq!(zone.active_element(), Some(row));
        assert_roving(&tree, root, row);
    }

    #[test]
    fn mouse_down_stops_at_nested_zone_boundary() {
        let mut tree = Tree::new();
        let root = tree.insert(None, container(0.0, 0.0, 400.0, 50.0));
        let _a = tree.insert(Some(root), leaf(0.0, 0.0));
        let inner_root = tree.insert(
            Some(root),
            FocusableNode {
                flags: NodeFlags::VISIBLE | NodeFlags::FOCUSABLE,
                bounds: Rect::new(50.0, 0.0, 250.0, 50.0),
                tab_index: None,
            },
        );
        let inner_child = tree.insert(Some(inner_root), leaf(60.0, 0.0));

        let mut registry = ZoneRegistry::new();
        let mut outer =
            FocusZone::attach(&mut tree, &mut registry, root, ZoneConfig::default()).unwrap();
        let inner =
            FocusZone::attach(&mut tree, &mut registry, inner_root, ZoneConfig::default()).unwrap();
        assert!(inner.is_inner());

        // Click deep inside the nested zone: the outer zone's stop is the
        // nested zone root, not the clicked leaf.
        let response = outer.on_mouse_down(&mut tree, &registry, inner_child);
        assert!(response.handled);
        assert_eq!(outer.active_element(), Some(inner_root));
    }

    #[test]
    fn directional_move_delegates_into_inner_zone() {
        let mut tree = Tree::new();
        let root = tree.insert(None, container(0.0, 0.0, 400.0, 50.0));
        let a = tree.insert(Some(root), leaf(0.0, 0.0));
        let inner_root = tree.insert(
            Some(root),
            FocusableNode {
                flags: NodeFlags::VISIBLE | NodeFlags::FOCUSABLE,
                bounds: Rect::new(50.0, 0.0, 250.0, 50.0),
                tab_index: None,
            },
        );
        let _inner_child = tree.insert(Some(inner_root), leaf(60.0, 0.0));

        let mut registry = ZoneRegistry::new();
        let config = ZoneConfig {
            axis: Axis::Horizontal,
            ..ZoneConfig::default()
        };
        let mut outer = FocusZone::attach(&mut tree, &mut registry, root, config).unwrap();
        let inner =
            FocusZone::attach(&mut tree, &mut registry, inner_root, ZoneConfig::default()).unwrap();

        let _ = outer.on_focus_in(&mut tree, &registry, a);
        let response = outer.on_key_down(&mut tree, &registry, KeyEvent::plain(Key::Right), 0);
        assert!(response.handled);
        assert!(
            response.events.contains(&ZoneEvent::Delegated {
                zone: inner.id(),
                target: None,
            }),
            "landing on a nested zone root hands the move to its controller"
        );
        assert_eq!(outer.active_element(), Some(inner_root));
    }

    #[test]
    fn inner_zone_focus_delegates_to_parent() {
        let mut tree = Tree::new();
        let root = tree.insert(None, container(0.0, 0.0, 400.0, 50.0));
        let inner_root = tree.insert(
            Some(root),
            FocusableNode {
                flags: NodeFlags::VISIBLE | NodeFlags::FOCUSABLE,
                bounds: Rect::new(50.0, 0.0, 250.0, 50.0),
                tab_index: None,
            },
        );
        let inner_child = tree.insert(Some(inner_root), leaf(60.0, 0.0));

        let mut registry = ZoneRegistry::new();
        let outer =
            FocusZone::attach(&mut tree, &mut registry, root, ZoneConfig::default()).unwrap();
        let mut inner =
            FocusZone::attach(&mut tree, &mut registry, inner_root, ZoneConfig::default()).unwrap();

        let response = inner.focus(&mut tree, &registry, false);
        assert_eq!(
            response.events,
            vec![ZoneEvent::Delegated {
                zone: outer.id(),
                target: Some(inner_root),
            }]
        );

        // Forced: the inner zone focuses its own first element directly.
        let response = inner.focus(&mut tree, &registry, true);
        assert_eq!(focus_requested(&response), Some(inner_child));
    }

    #[test]
    fn focus_prefers_remembered_active_element() {
        let mut tree = Tree::new();
        let root = tree.insert(None, container(0.0, 0.0, 200.0, 50.0));
        let a = tree.insert(Some(root), leaf(0.0, 0.0));
        let b = tree.insert(Some(root), leaf(50.0, 0.0));

        let mut registry = ZoneRegistry::new();
        let mut zone =
            FocusZone::attach(&mut tree, &mut registry, root, ZoneConfig::default()).unwrap();
        let _ = zone.on_focus_in(&mut tree, &registry, b);

        let response = zone.focus(&mut tree, &registry, false);
        assert_eq!(focus_requested(&response), Some(b));

        let response = zone.focus(&mut tree, &registry, true);
        assert_eq!(focus_requested(&response), Some(a));
    }

    #[test]
    fn should_receive_focus_vetoes_moves() {
        fn not_second(tree: &Tree, node: NodeId) -> bool {
            tree.bounds(node).is_some_and(|r| r.x0 < 50.0)
        }

        let mut tree = Tree::new();
        let root = tree.insert(None, container(0.0, 0.0, 200.0, 50.0));
        let a = tree.insert(Some(root), leaf(0.0, 0.0));
        let b = tree.insert(Some(root), leaf(50.0, 0.0));

        let mut registry = ZoneRegistry::new();
        let config = ZoneConfig {
            should_receive_focus: Some(not_second),
            ..ZoneConfig::default()
        };
        let mut zone = FocusZone::attach(&mut tree, &mut registry, root, config).unwrap();
        let _ = zone.on_focus_in(&mut tree, &registry, a);

        assert!(!zone.focus_element(&mut tree, b).handled);
        let response = zone.on_key_down(&mut tree, &registry, KeyEvent::plain(Key::Right), 0);
        assert!(!response.handled);
        assert_eq!(zone.active_element(), Some(a));
    }

    #[test]
    fn parking_saves_and_restores_root_tab_index() {
        let mut tree = Tree::new();
        let root = tree.insert(
            None,
            FocusableNode {
                flags: NodeFlags::VISIBLE | NodeFlags::FOCUSABLE,
                bounds: Rect::new(0.0, 0.0, 200.0, 50.0),
                tab_index: Some(0),
            },
        );
        let a = tree.insert(Some(root), leaf(0.0, 0.0));

        let mut registry = ZoneRegistry::new();
        let mut zone =
            FocusZone::attach(&mut tree, &mut registry, root, ZoneConfig::default()).unwrap();
        let _ = zone.on_focus_in(&mut tree, &registry, a);

        // The only child disappears: the zone parks on its root.
        tree.remove(a);
        let response = zone.update_tab_indexes(&mut tree);
        assert_eq!(zone.phase(), ZonePhase::Parked);
        assert_eq!(focus_requested(&response), Some(root));
        assert_eq!(tree.tab_index(root), Some(-1));

        // A child reappears: unpark restores the saved root tab index.
        let b = tree.insert(Some(root), leaf(0.0, 0.0));
        let _ = zone.update_tab_indexes(&mut tree);
        assert_eq!(zone.phase(), ZonePhase::Idle);
        assert_eq!(tree.tab_index(root), Some(0));
        assert_roving(&tree, root, b);
    }

    #[test]
    fn disabled_zone_forces_children_out_of_tab_order() {
        let mut tree = Tree::new();
        let root = tree.insert(None, container(0.0, 0.0, 200.0, 50.0));
        let a = tree.insert(Some(root), leaf(0.0, 0.0));
        let b = tree.insert(Some(root), leaf(50.0, 0.0));

        let mut registry = ZoneRegistry::new();
        let config = ZoneConfig {
            disabled: true,
            ..ZoneConfig::default()
        };
        let mut zone = FocusZone::attach(&mut tree, &mut registry, root, config).unwrap();

        assert_eq!(tree.tab_index(a), Some(-1));
        assert_eq!(tree.tab_index(b), Some(-1));
        assert!(!zone.on_key_down(&mut tree, &registry, KeyEvent::plain(Key::Right), 0).handled);
        assert!(!zone.focus(&mut tree, &registry, false).handled);
    }

    #[test]
    fn sub_zone_content_cannot_become_active() {
        let mut tree = Tree::new();
        let root = tree.insert(None, container(0.0, 0.0, 300.0, 50.0));
        let a = tree.insert(Some(root), leaf(0.0, 0.0));
        let sub = tree.insert(
            Some(root),
            FocusableNode {
                flags: NodeFlags::VISIBLE | NodeFlags::SUB_ZONE,
                bounds: Rect::new(50.0, 0.0, 150.0, 50.0),
                tab_index: Some(0),
            },
        );
        let hidden = tree.insert(Some(sub), leaf(60.0, 0.0));

        let mut registry = ZoneRegistry::new();
        let mut zone =
            FocusZone::attach(&mut tree, &mut registry, root, ZoneConfig::default()).unwrap();

        assert!(!zone.focus_element(&mut tree, hidden).handled);
        // The deferred re-read drops it too: still not focusable.
        assert!(!zone.on_tick(&mut tree).handled);
        assert!(!zone.on_mouse_down(&mut tree, &registry, hidden).handled);
        assert_eq!(zone.active_element(), None);
        assert_roving(&tree, root, a);
    }

    #[test]
    fn stale_active_element_is_cleared_on_update() {
        let mut tree = Tree::new();
        let root = tree.insert(None, container(0.0, 0.0, 200.0, 50.0));
        let a = tree.insert(Some(root), leaf(0.0, 0.0));
        let b = tree.insert(Some(root), leaf(50.0, 0.0));

        let mut registry = ZoneRegistry::new();
        let mut zone =
            FocusZone::attach(&mut tree, &mut registry, root, ZoneConfig::default()).unwrap();
        let _ = zone.on_focus_in(&mut tree, &registry, a);

        tree.remove(a);
        let response = zone.update_tab_indexes(&mut tree);
        assert_eq!(zone.active_element(), None);
        assert!(response.events.contains(&ZoneEvent::ActiveElementChanged {
            previous: Some(a),
            current: None,
        }));
        // The remaining stop becomes the default.
        assert_roving(&tree, root, b);
    }

    #[test]
    fn hover_focus_respects_navigation_quiet_period() {
        let mut tree = Tree::new();
        let root = tree.insert(None, container(0.0, 0.0, 200.0, 50.0));
        let a = tree.insert(Some(root), leaf(0.0, 0.0));
        let b = tree.insert(Some(root), leaf(50.0, 0.0));

        let mut registry = ZoneRegistry::new();
        let config = ZoneConfig {
            axis: Axis::Horizontal,
            ..ZoneConfig::default()
        };
        let mut zone = FocusZone::attach(&mut tree, &mut registry, root, config).unwrap();
        let _ = zone.on_focus_in(&mut tree, &registry, b);

        // Keyboard move at t=1000; hover right after is suppressed.
        let _ = zone.on_key_down(&mut tree, &registry, KeyEvent::plain(Key::Left), 1_000);
        assert!(!zone.on_hover(&mut tree, &registry, b, 1_050).handled);

        // After the quiet period the hover focuses normally.
        let response = zone.on_hover(&mut tree, &registry, b, 2_000);
        assert_eq!(focus_requested(&response), Some(b));
        assert_eq!(zone.active_element(), Some(b));
        // `a` was the active element before the hover.
        assert_roving(&tree, root, b);
        assert_eq!(tree.tab_index(a), Some(-1));
    }

    #[test]
    fn deferred_focus_lands_on_next_tick() {
        let mut tree = Tree::new();
        let root = tree.insert(None, container(0.0, 0.0, 200.0, 50.0));
        // Still rendering: zero-size bounds, not yet focusable.
        let pending = tree.insert(
            Some(root),
            FocusableNode {
                bounds: Rect::ZERO,
                flags: NodeFlags::VISIBLE | NodeFlags::FOCUSABLE,
                ..FocusableNode::default()
            },
        );

        let mut registry = ZoneRegistry::new();
        let mut zone =
            FocusZone::attach(&mut tree, &mut registry, root, ZoneConfig::default()).unwrap();

        assert!(!zone.focus_element(&mut tree, pending).handled);
        // The host finishes layout before its tick.
        tree.set_bounds(pending, Rect::new(0.0, 0.0, 50.0, 50.0));
        let response = zone.on_tick(&mut tree);
        assert_eq!(focus_requested(&response), Some(pending));
        assert_eq!(zone.active_element(), Some(pending));

        // Nothing further pending.
        assert!(!zone.on_tick(&mut tree).handled);
    }

    #[test]
    fn detach_restores_root_marker() {
        let mut tree = Tree::new();
        let root = tree.insert(None, container(0.0, 0.0, 200.0, 50.0));
        let _a = tree.insert(Some(root), leaf(0.0, 0.0));

        let mut registry = ZoneRegistry::new();
        let zone =
            FocusZone::attach(&mut tree, &mut registry, root, ZoneConfig::default()).unwrap();
        let id = zone.id();
        zone.detach(&mut tree, &mut registry);

        assert!(!tree.flags(root).unwrap().contains(NodeFlags::ZONE_ROOT));
        assert_eq!(registry.root_of(id), None);
        assert!(registry.is_empty());
    }
}
