// Copyright 2025 the Rove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rove Tree: a caller-owned tree of focusable nodes.
//!
//! This crate is the geometry-and-attributes layer underneath the Rove focus
//! controllers. It models a rendered UI as a tree of nodes, each carrying a
//! bounding rectangle, focusability flags, and an optional tab-index
//! attribute, and answers the queries focus management needs:
//!
//! - **Tabbability**: [`Tree::is_focusable`] / [`Tree::is_tabbable`] derive
//!   eligibility from visibility, disabled state, rendered size, and the
//!   tab-index attribute.
//! - **Document-order traversal**: [`Tree::next_focusable`],
//!   [`Tree::prev_focusable`] and friends walk the tree in depth-first
//!   document order, treating a nested zone root as a single stop and
//!   skipping sub-zone subtrees entirely.
//! - **Containment**: [`Tree::contains`] and [`Tree::path_to_ancestor`]
//!   resolve ancestry through an explicit logical-parent override map, so a
//!   node rendered elsewhere in the tree (a portal) still resolves to its
//!   logical ancestor zone.
//! - **Roving tab index**: [`Tree::set_tab_index`] / [`Tree::tab_index`] are
//!   the attribute surface the zone controllers rewrite.
//!
//! ## Ownership
//!
//! Nodes are owned by the rendering layer: the host inserts, updates, and
//! removes them as it re-renders. Identifiers are generational, so a stale
//! [`NodeId`] held by a controller across a re-render is detected and treated
//! as "nothing happened" rather than touching a reused slot. No query ever
//! panics on a stale id.
//!
//! ## Not a layout engine
//!
//! This crate performs no layout and no rendering. The host computes
//! positions and sizes with whatever layout system it uses and writes the
//! resulting rectangles here; all rectangles within one tree share a single
//! coordinate space.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod tree;
mod types;

pub use tree::{NodePath, Tree};
pub use types::{FocusableNode, NodeFlags, NodeId};
