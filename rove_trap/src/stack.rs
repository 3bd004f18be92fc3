// Copyright 2025 the Rove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The trap stack: host-owned ordering of concurrently active traps.
//!
//! Traps push themselves on activation and are removed by identity on
//! deactivation. Only the top entry intercepts escaping focus and clicks, so
//! a dialog opened from within another dialog takes precedence without the
//! outer trap fighting it. Removal is by identity rather than strict LIFO:
//! any trap may deactivate independent of order.

use alloc::vec::Vec;

/// Identifier for an activated trap. Never reused within one stack.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TrapId(u64);

/// Host-owned stack of active traps, most recent last.
#[derive(Debug, Default)]
pub struct FocusStack {
    next: u64,
    stack: Vec<TrapId>,
}

impl FocusStack {
    /// Create an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate an identity without putting it on the stack. Used by
    /// disabled traps, which exist but never intercept.
    pub fn allocate(&mut self) -> TrapId {
        self.next += 1;
        TrapId(self.next)
    }

    /// Allocate an identity and push it on top of the stack.
    pub fn push(&mut self) -> TrapId {
        let id = self.allocate();
        self.stack.push(id);
        id
    }

    /// Remove a trap wherever it sits in the stack. No-op for ids that were
    /// never pushed or were already removed.
    pub fn remove(&mut self, id: TrapId) {
        self.stack.retain(|&t| t != id);
    }

    /// Whether `id` is the most recently activated trap still on the stack.
    pub fn is_top(&self, id: TrapId) -> bool {
        self.stack.last() == Some(&id)
    }

    /// The currently intercepting trap, if any.
    pub fn top(&self) -> Option<TrapId> {
        self.stack.last().copied()
    }

    /// Number of traps on the stack.
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    /// Whether the stack is empty.
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}
