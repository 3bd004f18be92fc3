// Copyright 2025 the Rove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rove Trap: focus containment for modal surfaces.
//!
//! A [`FocusTrap`] keeps keyboard focus inside one container of a caller-owned
//! `rove_tree::Tree` until it is released: sequential navigation wraps at the
//! container edges through sentinel bumper nodes, focus or clicks landing
//! outside are intercepted and sent back in, and on release focus is restored
//! to the element that held it before the trap opened.
//!
//! Concurrently active traps order themselves through a host-owned
//! [`FocusStack`]; only the most recently activated trap intercepts, so
//! nested modal surfaces compose without fighting each other.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::Rect;
//! use rove_tree::{FocusableNode, NodeFlags, Tree};
//! use rove_trap::{FocusStack, FocusTrap, TrapConfig};
//!
//! let mut tree = Tree::new();
//! let doc = tree.insert(None, FocusableNode::default());
//! let item = |x: f64| FocusableNode {
//!     bounds: Rect::new(x, 0.0, x + 50.0, 50.0),
//!     flags: NodeFlags::VISIBLE | NodeFlags::FOCUSABLE,
//!     ..FocusableNode::default()
//! };
//! let button = tree.insert(Some(doc), item(0.0));
//! let dialog = tree.insert(Some(doc), FocusableNode::default());
//! let ok = tree.insert(Some(dialog), item(100.0));
//!
//! let mut stack = FocusStack::new();
//! let (trap, initial) = FocusTrap::activate(
//!     &mut stack,
//!     &tree,
//!     dialog,
//!     TrapConfig::containing(),
//!     Some(button),
//! )
//! .unwrap();
//! assert_eq!(initial, Some(ok));
//!
//! // Focus trying to leave the dialog is sent back in…
//! assert_eq!(trap.intercept_focus(&stack, &tree, button), Some(ok));
//! // …and closing the dialog restores the original focus.
//! assert_eq!(trap.deactivate(&mut stack, &tree, Some(ok)), Some(button));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod stack;
mod trap;

pub use stack::{FocusStack, TrapId};
pub use trap::{FocusTrap, NodeFilter, TrapConfig};
