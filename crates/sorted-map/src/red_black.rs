//! Red-black link surgery over an index arena.
//!
//! Nodes live in `nodes`, addressed by [`NodeId`]. Id `0` is the sentinel:
//! reading its color yields black and reading its links yields the sentinel
//! again, so rotations and fix-up never test for a missing node. Nothing here
//! ever writes to the sentinel.

use tracing::trace;

use crate::error::SortedMapError;
use crate::node::{Color, Node, NodeId};

/// Which child slot of a parent a node hangs from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

#[derive(Clone, Debug)]
pub(crate) struct Arena<K, V> {
    nodes: Vec<Node<K, V>>,
    pub(crate) root: NodeId,
}

impl<K, V> Arena<K, V> {
    pub(crate) fn new() -> Self {
        Self {
            nodes: Vec::new(),
            root: NodeId::SENTINEL,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = NodeId::SENTINEL;
    }

    /// Moves a node into the arena. The node keeps whatever links it carries.
    /// Nothing is stored when the id space is exhausted.
    pub(crate) fn alloc(&mut self, node: Node<K, V>) -> Result<NodeId, SortedMapError> {
        let id = NodeId::from_slot(self.nodes.len())
            .ok_or(SortedMapError::CapacityExceeded(self.nodes.len()))?;
        self.nodes.push(node);
        Ok(id)
    }

    /// The stored node behind a live id; `None` for the sentinel or an id
    /// this arena never handed out.
    #[inline]
    pub(crate) fn get(&self, id: NodeId) -> Option<&Node<K, V>> {
        id.live().and_then(|id| self.nodes.get(id.slot()))
    }

    #[inline]
    pub(crate) fn node(&self, id: NodeId) -> &Node<K, V> {
        &self.nodes[id.slot()]
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node<K, V> {
        &mut self.nodes[id.slot()]
    }

    #[inline]
    pub(crate) fn color(&self, id: NodeId) -> Color {
        if id.is_sentinel() {
            Color::Black
        } else {
            self.node(id).color
        }
    }

    #[inline]
    pub(crate) fn is_red(&self, id: NodeId) -> bool {
        self.color(id).is_red()
    }

    #[inline]
    pub(crate) fn left(&self, id: NodeId) -> NodeId {
        if id.is_sentinel() {
            NodeId::SENTINEL
        } else {
            self.node(id).left
        }
    }

    #[inline]
    pub(crate) fn right(&self, id: NodeId) -> NodeId {
        if id.is_sentinel() {
            NodeId::SENTINEL
        } else {
            self.node(id).right
        }
    }

    #[inline]
    pub(crate) fn parent(&self, id: NodeId) -> NodeId {
        if id.is_sentinel() {
            NodeId::SENTINEL
        } else {
            self.node(id).parent
        }
    }

    #[inline]
    pub(crate) fn set_color(&mut self, id: NodeId, color: Color) {
        self.node_mut(id).color = color;
    }

    /// Hangs a freshly allocated red node `z` under `parent`, or makes it the
    /// root when `parent` is the sentinel.
    pub(crate) fn link(&mut self, z: NodeId, parent: NodeId, side: Side) {
        {
            let node = self.node_mut(z);
            node.parent = parent;
            node.left = NodeId::SENTINEL;
            node.right = NodeId::SENTINEL;
            node.color = Color::Red;
        }
        if parent.is_sentinel() {
            self.root = z;
            return;
        }
        match side {
            Side::Left => self.node_mut(parent).left = z,
            Side::Right => self.node_mut(parent).right = z,
        }
    }

    /// Replaces `x` by `y` in the slot `x` occupies under its parent (or as
    /// the root).
    fn replace_child(&mut self, x: NodeId, y: NodeId) {
        let xp = self.parent(x);
        self.node_mut(y).parent = xp;
        if xp.is_sentinel() {
            self.root = y;
        } else if self.left(xp) == x {
            self.node_mut(xp).left = y;
        } else {
            self.node_mut(xp).right = y;
        }
    }

    //          xp              xp
    //          |               |
    //          x               y
    //         / \             / \
    //        a   y    ->     x   c
    //           / \         / \
    //          b   c       a   b
    pub(crate) fn rotate_left(&mut self, x: NodeId) {
        let y = self.right(x);
        debug_assert!(!y.is_sentinel(), "rotate_left needs a right child");

        let b = self.left(y);
        self.node_mut(x).right = b;
        if !b.is_sentinel() {
            self.node_mut(b).parent = x;
        }

        self.replace_child(x, y);

        self.node_mut(y).left = x;
        self.node_mut(x).parent = y;
    }

    pub(crate) fn rotate_right(&mut self, x: NodeId) {
        let y = self.left(x);
        debug_assert!(!y.is_sentinel(), "rotate_right needs a left child");

        let b = self.right(y);
        self.node_mut(x).left = b;
        if !b.is_sentinel() {
            self.node_mut(b).parent = x;
        }

        self.replace_child(x, y);

        self.node_mut(y).right = x;
        self.node_mut(x).parent = y;
    }

    /// Restores "no red node has a red parent" and black-height balance after
    /// `z` was linked in red.
    pub(crate) fn insert_fixup(&mut self, mut z: NodeId) {
        while z != self.root && self.is_red(self.parent(z)) {
            let p = self.parent(z);
            // A red parent is never the root, so the grandparent is live.
            let g = self.parent(p);
            if p == self.left(g) {
                let uncle = self.right(g);
                if self.is_red(uncle) {
                    trace!(case = 1, node = z.index(), "recolor");
                    self.set_color(p, Color::Black);
                    self.set_color(uncle, Color::Black);
                    self.set_color(g, Color::Red);
                    z = g;
                } else {
                    if z == self.right(p) {
                        trace!(case = 2, node = z.index(), "rotate left");
                        z = p;
                        self.rotate_left(z);
                    }
                    trace!(case = 3, node = z.index(), "rotate right");
                    let p = self.parent(z);
                    let g = self.parent(p);
                    self.set_color(p, Color::Black);
                    self.set_color(g, Color::Red);
                    self.rotate_right(g);
                }
            } else {
                let uncle = self.left(g);
                if self.is_red(uncle) {
                    trace!(case = 1, node = z.index(), "recolor");
                    self.set_color(p, Color::Black);
                    self.set_color(uncle, Color::Black);
                    self.set_color(g, Color::Red);
                    z = g;
                } else {
                    if z == self.left(p) {
                        trace!(case = 2, node = z.index(), "rotate right");
                        z = p;
                        self.rotate_right(z);
                    }
                    trace!(case = 3, node = z.index(), "rotate left");
                    let p = self.parent(z);
                    let g = self.parent(p);
                    self.set_color(p, Color::Black);
                    self.set_color(g, Color::Red);
                    self.rotate_left(g);
                }
            }
        }
        let root = self.root;
        self.set_color(root, Color::Black);
    }
}
