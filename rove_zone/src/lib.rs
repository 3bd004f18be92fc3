// Copyright 2025 the Rove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rove Zone: roving-tabindex focus zone controllers.
//!
//! A [`FocusZone`] manages keyboard focus among the descendants of one
//! container node: exactly one descendant stays in the sequential tab order
//! (tab index 0) while arrow keys move an active-element marker between the
//! rest (tab index −1). Geometry-aware moves are decided by `rove_nav`;
//! the node graph lives in a caller-owned `rove_tree::Tree`.
//!
//! Zones nest. Each controller registers with a host-owned [`ZoneRegistry`]
//! at attach time, which records the enclosing zone so that moves landing on
//! a nested zone root can be handed to the inner controller, and an inner
//! zone's own focus request can be routed through its outer zone.
//!
//! Controllers compute, hosts act: every operation returns [`ZoneEvent`]s
//! describing the platform focus calls, activations, and delegations the
//! host must perform. Nothing here touches a real platform.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::Rect;
//! use rove_input::{Key, KeyEvent};
//! use rove_tree::{FocusableNode, NodeFlags, Tree};
//! use rove_zone::{FocusZone, ZoneConfig, ZoneEvent, ZoneRegistry};
//!
//! let mut tree = Tree::new();
//! let root = tree.insert(None, FocusableNode::default());
//! let item = |x: f64| FocusableNode {
//!     bounds: Rect::new(x, 0.0, x + 50.0, 50.0),
//!     flags: NodeFlags::VISIBLE | NodeFlags::FOCUSABLE,
//!     ..FocusableNode::default()
//! };
//! let first = tree.insert(Some(root), item(0.0));
//! let second = tree.insert(Some(root), item(50.0));
//!
//! let mut registry = ZoneRegistry::new();
//! let mut zone = FocusZone::attach(&mut tree, &mut registry, root, ZoneConfig::default()).unwrap();
//!
//! // Focus enters the zone, then an arrow key roves to the second item.
//! zone.on_focus_in(&mut tree, &registry, first);
//! let response = zone.on_key_down(&mut tree, &registry, KeyEvent::plain(Key::Right), 0);
//! assert!(response.events.contains(&ZoneEvent::FocusRequested(second)));
//! assert_eq!(tree.tab_index(second), Some(0));
//! assert_eq!(tree.tab_index(first), Some(-1));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod registry;
mod zone;

pub use config::{NodePredicate, TabHandling, ZoneConfig};
pub use registry::{ZoneId, ZoneRegistry};
pub use zone::{FocusZone, ZoneEvent, ZonePhase, ZoneResponse};
