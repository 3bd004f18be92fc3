// Copyright 2025 the Rove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The zone registry: explicit nesting topology for zone-to-zone delegation.
//!
//! Zones register their root node here at attach time; the registry records
//! which already-registered zone (if any) encloses it. Controllers consult
//! this topology instead of re-discovering nesting by walking node attributes
//! at event time.
//!
//! The registry is plain data owned by the host and passed to controllers by
//! reference. All mutation happens on the single event-processing thread.

use hashbrown::HashMap;
use rove_tree::{NodeId, Tree};

/// Identifier for a registered zone. Stays unique for the registry's
/// lifetime; ids of unregistered zones are never reused.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ZoneId(u64);

#[derive(Copy, Clone, Debug)]
struct ZoneRecord {
    root: NodeId,
    parent: Option<ZoneId>,
}

/// Host-owned registry of attached zones.
#[derive(Debug, Default)]
pub struct ZoneRegistry {
    next: u64,
    zones: HashMap<ZoneId, ZoneRecord>,
    by_root: HashMap<NodeId, ZoneId>,
}

impl ZoneRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a zone rooted at `root`, recording its nearest enclosing
    /// registered zone as its parent. Ancestry follows logical parents, so a
    /// portaled zone nests under its logical ancestor.
    pub fn register(&mut self, tree: &Tree, root: NodeId) -> ZoneId {
        let parent = tree
            .effective_parent(root)
            .and_then(|p| self.owning_zone(tree, p));
        self.next += 1;
        let id = ZoneId(self.next);
        self.zones.insert(id, ZoneRecord { root, parent });
        self.by_root.insert(root, id);
        id
    }

    /// Remove a zone. Children registered under it keep their parent link;
    /// [`ZoneRegistry::parent_of`] filters out unregistered parents.
    pub fn unregister(&mut self, id: ZoneId) {
        if let Some(record) = self.zones.remove(&id) {
            // Only clear the root mapping if it still points at this zone; a
            // replacement zone may have been registered on the same node.
            if self.by_root.get(&record.root) == Some(&id) {
                self.by_root.remove(&record.root);
            }
        }
    }

    /// The zone whose root is exactly `root`, if one is registered.
    pub fn zone_at(&self, root: NodeId) -> Option<ZoneId> {
        self.by_root.get(&root).copied()
    }

    /// The root node of a registered zone.
    pub fn root_of(&self, id: ZoneId) -> Option<NodeId> {
        self.zones.get(&id).map(|r| r.root)
    }

    /// The nearest enclosing zone recorded at registration, if it is still
    /// registered.
    pub fn parent_of(&self, id: ZoneId) -> Option<ZoneId> {
        let parent = self.zones.get(&id)?.parent?;
        self.zones.contains_key(&parent).then_some(parent)
    }

    /// The innermost registered zone containing `node` (including a zone
    /// rooted at `node` itself), walking logical-then-physical ancestry.
    pub fn owning_zone(&self, tree: &Tree, node: NodeId) -> Option<ZoneId> {
        let mut cur = Some(node);
        while let Some(n) = cur {
            if let Some(&id) = self.by_root.get(&n) {
                return Some(id);
            }
            cur = tree.effective_parent(n);
        }
        None
    }

    /// Number of registered zones.
    pub fn len(&self) -> usize {
        self.zones.len()
    }

    /// Whether no zones are registered.
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}
