// Copyright 2025 the Rove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the focus tree: node identifiers, flags, and per-node data.

use kurbo::Rect;

/// Identifier for a node in the tree (generational).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Node flags controlling focusability and traversal.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// Node is visible. Hidden nodes are never focusable.
        const VISIBLE    = 0b0000_0001;
        /// Node is natively focusable (button, input, link, ...), independent
        /// of any explicit tab-index attribute.
        const FOCUSABLE  = 0b0000_0010;
        /// Node is disabled. Disabled nodes are skipped during traversal.
        const DISABLED   = 0b0000_0100;
        /// Node is the root of a nested focus zone. Traversal treats the
        /// subtree as a single stop: the root is a candidate, its descendants
        /// are managed by the inner zone and never visited from outside.
        const ZONE_ROOT  = 0b0000_1000;
        /// Node is the root of a nested zone that is not independently
        /// focusable. The entire subtree is skipped during traversal, as if
        /// absent.
        const SUB_ZONE   = 0b0001_0000;
        /// Node is a text-editing element. Arrow keys may edit text before
        /// they move focus (see the caret boundary rule in `rove_zone`).
        const TEXT_INPUT = 0b0010_0000;
    }
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self::VISIBLE
    }
}

/// Per-node data owned by the rendering layer.
///
/// `bounds` is the node's bounding rectangle in the single shared coordinate
/// space of its [`Tree`](crate::Tree), valid at query time. A node with empty
/// bounds is treated as not rendered and is never focusable.
#[derive(Clone, Debug)]
pub struct FocusableNode {
    /// Bounding rectangle in the tree's shared coordinate space.
    pub bounds: Rect,
    /// Focusability and traversal flags.
    pub flags: NodeFlags,
    /// Explicit tab-index attribute, if any. Roving-tabindex controllers
    /// rewrite this; `Some(-1)` keeps a node focusable programmatically but
    /// removes it from the sequential tab order.
    pub tab_index: Option<i8>,
}

impl Default for FocusableNode {
    fn default() -> Self {
        Self {
            bounds: Rect::ZERO,
            flags: NodeFlags::default(),
            tab_index: None,
        }
    }
}
