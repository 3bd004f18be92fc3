// Copyright 2025 the Rove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: structure, attribute updates, traversal queries.

use alloc::vec::Vec;
use hashbrown::HashMap;
use kurbo::Rect;
use smallvec::SmallVec;

use crate::types::{FocusableNode, NodeFlags, NodeId};

/// A short root→node path. Most UI trees are shallow.
pub type NodePath = SmallVec<[NodeId; 8]>;

/// Caller-owned tree of focusable nodes.
///
/// The tree stores structure, bounding rectangles, flags, and tab-index
/// attributes for a rendered UI. It performs no layout and no rendering: the
/// host writes geometry into it and the focus controllers read candidates and
/// write roving tab-index attributes back.
///
/// Identifiers are generational: a [`NodeId`] for a removed node goes stale
/// and every accessor returns `None` (or a no-op) for it, so controllers can
/// hold ids across re-renders without dangling references.
///
/// ## Example
///
/// ```rust
/// use kurbo::Rect;
/// use rove_tree::{FocusableNode, NodeFlags, Tree};
///
/// let mut tree = Tree::new();
/// let root = tree.insert(None, FocusableNode::default());
/// let button = tree.insert(
///     Some(root),
///     FocusableNode {
///         bounds: Rect::new(0.0, 0.0, 40.0, 20.0),
///         flags: NodeFlags::VISIBLE | NodeFlags::FOCUSABLE,
///         ..FocusableNode::default()
///     },
/// );
///
/// assert!(tree.is_tabbable(button));
/// assert_eq!(tree.first_tabbable(root), Some(button));
/// ```
#[derive(Default)]
pub struct Tree {
    /// slots
    nodes: Vec<Option<Node>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
    /// Portal indirection: node → logical ancestor. Consulted by containment
    /// checks before the physical parent chain.
    logical_parents: HashMap<NodeId, NodeId>,
}

impl core::fmt::Debug for Tree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        f.debug_struct("Tree")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &self.free_list.len())
            .field("logical_parents", &self.logical_parents.len())
            .finish()
    }
}

#[derive(Clone, Debug)]
struct Node {
    generation: u32,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    data: FocusableNode,
}

impl Node {
    fn new(generation: u32, data: FocusableNode) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            data,
        }
    }
}

impl Tree {
    /// Create a new empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new node as the last child of `parent` (or as a root if `None`).
    ///
    /// Document order is child-list order, depth first.
    pub fn insert(&mut self, parent: Option<NodeId>, data: FocusableNode) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, data));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, data)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        let id = NodeId::new(idx, generation);
        if let Some(p) = parent {
            self.link_parent(id, p);
        }
        id
    }

    /// Remove a node and its subtree. Ids into the subtree become stale.
    pub fn remove(&mut self, id: NodeId) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(parent) = self.node(id).parent {
            self.unlink_parent(id, parent);
        }
        let children = self.node(id).children.clone();
        for child in children {
            self.remove(child);
        }
        self.logical_parents.remove(&id);
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    /// Reparent `id` under `new_parent` (append as last child).
    pub fn reparent(&mut self, id: NodeId, new_parent: Option<NodeId>) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(parent) = self.node(id).parent {
            self.unlink_parent(id, parent);
        }
        if let Some(p) = new_parent {
            self.link_parent(id, p);
        }
    }

    /// Returns true if `id` refers to a live node.
    ///
    /// A `NodeId` is considered live if its slot exists and its generation
    /// matches the current generation stored in that slot.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .map(|n| n.generation == id.1)
            .unwrap_or(false)
    }

    /// Returns the physical parent of a node, or `None` for roots and stale ids.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        if !self.is_alive(id) {
            return None;
        }
        self.node(id).parent
    }

    /// Get the children of a node, or an empty slice if the node is stale.
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        if !self.is_alive(id) {
            return &[];
        }
        &self.node(id).children
    }

    /// Returns the flags of a node if the identifier is live.
    pub fn flags(&self, id: NodeId) -> Option<NodeFlags> {
        if !self.is_alive(id) {
            return None;
        }
        Some(self.node(id).data.flags)
    }

    /// Update node flags. No-op for stale ids.
    pub fn set_flags(&mut self, id: NodeId, flags: NodeFlags) {
        if let Some(n) = self.node_opt_mut(id) {
            n.data.flags = flags;
        }
    }

    /// Returns the bounding rectangle of a live node.
    pub fn bounds(&self, id: NodeId) -> Option<Rect> {
        if !self.is_alive(id) {
            return None;
        }
        Some(self.node(id).data.bounds)
    }

    /// Update the bounding rectangle. No-op for stale ids.
    pub fn set_bounds(&mut self, id: NodeId, bounds: Rect) {
        if let Some(n) = self.node_opt_mut(id) {
            n.data.bounds = bounds;
        }
    }

    /// Read the tab-index attribute of a live node.
    pub fn tab_index(&self, id: NodeId) -> Option<i8> {
        if !self.is_alive(id) {
            return None;
        }
        self.node(id).data.tab_index
    }

    /// Write (or with `None`, remove) the tab-index attribute. No-op for
    /// stale ids.
    pub fn set_tab_index(&mut self, id: NodeId, value: Option<i8>) {
        if let Some(n) = self.node_opt_mut(id) {
            n.data.tab_index = value;
        }
    }

    /// Declare a logical ancestor for a node rendered elsewhere in the tree
    /// (a portal). Containment checks consult this before the physical
    /// parent chain. Pass `None` to clear.
    pub fn set_logical_parent(&mut self, id: NodeId, logical_parent: Option<NodeId>) {
        if !self.is_alive(id) {
            return;
        }
        match logical_parent {
            Some(p) => {
                self.logical_parents.insert(id, p);
            }
            None => {
                self.logical_parents.remove(&id);
            }
        }
    }

    /// The parent used for containment: the logical parent when one is
    /// declared and still live, otherwise the physical parent.
    pub fn effective_parent(&self, id: NodeId) -> Option<NodeId> {
        if !self.is_alive(id) {
            return None;
        }
        if let Some(&p) = self.logical_parents.get(&id)
            && self.is_alive(p)
        {
            return Some(p);
        }
        self.node(id).parent
    }

    /// Returns true if `node` is `ancestor` or a (logical) descendant of it.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        if !self.is_alive(ancestor) || !self.is_alive(node) {
            return false;
        }
        let mut cur = node;
        loop {
            if cur == ancestor {
                return true;
            }
            match self.effective_parent(cur) {
                Some(p) => cur = p,
                None => return false,
            }
        }
    }

    /// The node→ancestor chain through effective parents, inclusive at both
    /// ends. `None` if `ancestor` does not contain `node`.
    pub fn path_to_ancestor(&self, node: NodeId, ancestor: NodeId) -> Option<NodePath> {
        if !self.is_alive(ancestor) || !self.is_alive(node) {
            return None;
        }
        let mut path = NodePath::new();
        let mut cur = node;
        loop {
            path.push(cur);
            if cur == ancestor {
                return Some(path);
            }
            cur = self.effective_parent(cur)?;
        }
    }

    // --- focusability ---

    /// Returns true if the node could receive focus were it enabled:
    /// visible, rendered with non-empty bounds, not a sub-zone and not
    /// inside a sub-zone subtree, and either natively focusable or carrying
    /// an explicit tab-index attribute.
    ///
    /// Roving controllers rewrite tab-index attributes across candidates
    /// including disabled ones, so a control re-enabled between updates
    /// holds −1 rather than a stale order.
    pub fn is_focus_candidate(&self, id: NodeId) -> bool {
        let Some(n) = self.node_opt(id) else {
            return false;
        };
        let f = n.data.flags;
        f.contains(NodeFlags::VISIBLE)
            && !f.contains(NodeFlags::SUB_ZONE)
            && n.data.bounds.width() > 0.0
            && n.data.bounds.height() > 0.0
            && (f.contains(NodeFlags::FOCUSABLE) || n.data.tab_index.is_some())
            && !self.in_sub_zone(id)
    }

    /// Returns true if the node can receive focus at all: a focus candidate
    /// that is not disabled.
    ///
    /// Roving controllers navigate focusable nodes; a tab index of −1 keeps a
    /// node focusable while removing it from the sequential tab order.
    pub fn is_focusable(&self, id: NodeId) -> bool {
        self.is_focus_candidate(id)
            && self
                .flags(id)
                .is_some_and(|f| !f.contains(NodeFlags::DISABLED))
    }

    /// Returns true if the node participates in sequential (Tab) navigation:
    /// focusable, and its tab-index attribute (when present) is non-negative.
    pub fn is_tabbable(&self, id: NodeId) -> bool {
        self.is_focusable(id) && self.tab_index(id).is_none_or(|t| t >= 0)
    }

    // --- document-order traversal ---

    /// The next focusable node after `from` in document order within `root`'s
    /// subtree, or `from` itself when `include_from` is set and it qualifies.
    ///
    /// Traversal never descends into nested zones: a [`NodeFlags::ZONE_ROOT`]
    /// is itself a candidate but its descendants belong to the inner zone,
    /// and a [`NodeFlags::SUB_ZONE`] subtree is skipped entirely.
    pub fn next_focusable(
        &self,
        root: NodeId,
        from: NodeId,
        include_from: bool,
    ) -> Option<NodeId> {
        self.scan(root, from, include_from, Step::Forward, Self::is_focusable)
    }

    /// The previous focusable node before `from` in document order. See
    /// [`Tree::next_focusable`] for the nested-zone skip rules.
    pub fn prev_focusable(
        &self,
        root: NodeId,
        from: NodeId,
        include_from: bool,
    ) -> Option<NodeId> {
        self.scan(root, from, include_from, Step::Backward, Self::is_focusable)
    }

    /// The next tabbable node after `from` in document order within `root`.
    pub fn next_tabbable(&self, root: NodeId, from: NodeId, include_from: bool) -> Option<NodeId> {
        self.scan(root, from, include_from, Step::Forward, Self::is_tabbable)
    }

    /// The previous tabbable node before `from` in document order within `root`.
    pub fn prev_tabbable(&self, root: NodeId, from: NodeId, include_from: bool) -> Option<NodeId> {
        self.scan(root, from, include_from, Step::Backward, Self::is_tabbable)
    }

    /// The first focusable descendant of `root` in document order.
    pub fn first_focusable(&self, root: NodeId) -> Option<NodeId> {
        self.next_focusable(root, root, false)
    }

    /// The last focusable descendant of `root` in document order.
    pub fn last_focusable(&self, root: NodeId) -> Option<NodeId> {
        let last = self.deep_last(root, root)?;
        if last == root {
            return None;
        }
        self.prev_focusable(root, last, true)
    }

    /// The next focus candidate after `from` in document order within
    /// `root`, including disabled nodes. Used when rewriting roving
    /// tab-index attributes across a container.
    pub fn next_focus_candidate(
        &self,
        root: NodeId,
        from: NodeId,
        include_from: bool,
    ) -> Option<NodeId> {
        self.scan(root, from, include_from, Step::Forward, Self::is_focus_candidate)
    }

    /// The first tabbable descendant of `root` in document order.
    pub fn first_tabbable(&self, root: NodeId) -> Option<NodeId> {
        self.next_tabbable(root, root, false)
    }

    /// The last tabbable descendant of `root` in document order.
    pub fn last_tabbable(&self, root: NodeId) -> Option<NodeId> {
        let last = self.deep_last(root, root)?;
        if last == root {
            return None;
        }
        self.prev_tabbable(root, last, true)
    }

    // --- internals ---

    fn scan(
        &self,
        root: NodeId,
        from: NodeId,
        include_from: bool,
        step: Step,
        pred: fn(&Self, NodeId) -> bool,
    ) -> Option<NodeId> {
        if !self.is_alive(root) || !self.contains(root, from) {
            return None;
        }
        if include_from && from != root && pred(self, from) {
            return Some(from);
        }
        let mut cur = from;
        loop {
            cur = match step {
                Step::Forward => self.next_in_order(root, cur)?,
                Step::Backward => self.prev_in_order(root, cur)?,
            };
            if cur == root {
                return None;
            }
            if pred(self, cur) {
                return Some(cur);
            }
        }
    }

    /// Whether any (logical) ancestor marks `id` as sub-zone content.
    fn in_sub_zone(&self, id: NodeId) -> bool {
        let mut cur = self.effective_parent(id);
        while let Some(p) = cur {
            if self.flags(p).is_some_and(|f| f.contains(NodeFlags::SUB_ZONE)) {
                return true;
            }
            cur = self.effective_parent(p);
        }
        false
    }

    /// Whether document-order traversal may descend into `id`'s children.
    /// The container root itself is always entered.
    fn descends(&self, root: NodeId, id: NodeId) -> bool {
        if id == root {
            return true;
        }
        let f = self.node(id).data.flags;
        !f.intersects(NodeFlags::ZONE_ROOT | NodeFlags::SUB_ZONE)
    }

    fn next_in_order(&self, root: NodeId, current: NodeId) -> Option<NodeId> {
        if self.descends(root, current)
            && let Some(&first) = self.node(current).children.first()
        {
            return Some(first);
        }
        let mut node = current;
        while node != root {
            if let Some(sib) = self.next_sibling(node) {
                return Some(sib);
            }
            node = self.parent_of(node)?;
        }
        None
    }

    fn prev_in_order(&self, root: NodeId, current: NodeId) -> Option<NodeId> {
        if current == root {
            return None;
        }
        if let Some(prev) = self.prev_sibling(current) {
            return self.deep_last(root, prev);
        }
        self.parent_of(current)
    }

    /// The last node of `id`'s subtree in document order, honoring the
    /// nested-zone descent rules. Returns `id` itself for opaque or leaf
    /// nodes; the traversal root is always entered.
    fn deep_last(&self, root: NodeId, id: NodeId) -> Option<NodeId> {
        if !self.is_alive(id) {
            return None;
        }
        let mut node = id;
        loop {
            if !self.descends(root, node) {
                return Some(node);
            }
            match self.node(node).children.last() {
                Some(&last) => node = last,
                None => return Some(node),
            }
        }
    }

    fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.parent_of(node)?;
        let siblings = &self.node(parent).children;
        let pos = siblings.iter().position(|&id| id == node)?;
        siblings.get(pos + 1).copied()
    }

    fn prev_sibling(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.parent_of(node)?;
        let siblings = &self.node(parent).children;
        let pos = siblings.iter().position(|&id| id == node)?;
        if pos > 0 { siblings.get(pos - 1).copied() } else { None }
    }

    fn node(&self, id: NodeId) -> &Node {
        self.nodes[id.idx()].as_ref().expect("dangling NodeId")
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes[id.idx()].as_mut().expect("dangling NodeId")
    }

    fn node_opt(&self, id: NodeId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    fn node_opt_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    fn link_parent(&mut self, id: NodeId, parent: NodeId) {
        let parent_node = self.node_mut(parent);
        parent_node.children.push(id);
        self.node_mut(id).parent = Some(parent);
    }

    fn unlink_parent(&mut self, id: NodeId, parent: NodeId) {
        let p = self.node_mut(parent);
        p.children.retain(|c| *c != id);
        self.node_mut(id).parent = None;
    }
}

#[derive(Copy, Clone)]
enum Step {
    Forward,
    Backward,
}
