use std::cmp::Ordering;
use std::fmt;
use std::mem;

use tracing::{debug, trace};

use crate::compare::{CmpOutput, Comparator, FnComparator, Natural};
use crate::error::{ComparisonError, SortedMapError};
use crate::node::{Color, Node, NodeId};
use crate::red_black::{Arena, Side};
use crate::util;

/// Where a key sits, or would sit, in the tree.
enum Slot {
    Occupied(NodeId),
    Vacant { parent: NodeId, side: Side },
}

/// Ordered key-value map backed by a red-black tree.
///
/// Keys are ordered by the comparator `C` fixed at construction. Because a
/// comparator may fail, every operation that compares keys returns a
/// `Result`; a failed comparison leaves the map exactly as it was.
///
/// Nodes are never removed individually: [`remove`](Self::remove) is
/// rejected with [`SortedMapError::NotImplemented`].
#[derive(Clone)]
pub struct SortedMap<K, V, C = Natural> {
    comparator: C,
    arena: Arena<K, V>,
    length: usize,
}

impl<K, V> SortedMap<K, V, Natural>
where
    K: PartialOrd,
{
    pub fn new() -> Self {
        Self::with_order(Natural)
    }
}

impl<K, V> Default for SortedMap<K, V, Natural>
where
    K: PartialOrd,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, F> SortedMap<K, V, FnComparator<F>> {
    /// Orders keys with `f(a, b)`: negative means `a` sorts first, positive
    /// means `b` does, zero means the keys are the same key.
    pub fn with_comparator<R>(f: F) -> Self
    where
        F: Fn(&K, &K) -> R,
        R: CmpOutput,
    {
        Self::with_order(FnComparator::new(f))
    }
}

impl<K, V, C> SortedMap<K, V, C> {
    pub fn with_order(comparator: C) -> Self {
        Self {
            comparator,
            arena: Arena::new(),
            length: 0,
        }
    }

    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    pub fn len(&self) -> usize {
        self.length
    }

    pub fn size(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Drops every node.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.length = 0;
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn height(&self) -> usize {
        util::height(&self.arena, self.arena.root)
    }

    pub fn root(&self) -> Option<NodeRef<'_, K, V>> {
        self.node(self.arena.root)
    }

    /// Read-only view of a live node; `None` for the sentinel.
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_, K, V>> {
        self.arena.get(id).map(|_| NodeRef {
            arena: &self.arena,
            id,
        })
    }

    /// Calls `f` on every live node, parents before children.
    pub fn visit<F>(&self, mut f: F)
    where
        F: FnMut(NodeRef<'_, K, V>),
    {
        let mut stack = vec![self.arena.root];
        while let Some(id) = stack.pop() {
            if id.is_sentinel() {
                continue;
            }
            stack.push(self.arena.right(id));
            stack.push(self.arena.left(id));
            f(NodeRef {
                arena: &self.arena,
                id,
            });
        }
    }

    /// Deleting keys is not supported.
    pub fn remove(&mut self, _key: &K) -> Result<Option<V>, SortedMapError> {
        Err(SortedMapError::NotImplemented("deleting a key"))
    }

    pub(crate) fn arena(&self) -> &Arena<K, V> {
        &self.arena
    }

    #[cfg(test)]
    pub(crate) fn arena_mut(&mut self) -> &mut Arena<K, V> {
        &mut self.arena
    }
}

impl<K, V, C> SortedMap<K, V, C>
where
    C: Comparator<K>,
{
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Result<Ordering, ComparisonError> {
        self.comparator.compare(a, b)
    }

    fn locate(&self, key: &K) -> Result<Slot, ComparisonError> {
        let mut parent = NodeId::SENTINEL;
        let mut side = Side::Left;
        let mut curr = self.arena.root;
        while !curr.is_sentinel() {
            parent = curr;
            match self.compare(key, &self.arena.node(curr).key)? {
                Ordering::Less => {
                    side = Side::Left;
                    curr = self.arena.left(curr);
                }
                Ordering::Greater => {
                    side = Side::Right;
                    curr = self.arena.right(curr);
                }
                Ordering::Equal => return Ok(Slot::Occupied(curr)),
            }
        }
        Ok(Slot::Vacant { parent, side })
    }

    fn find_node(&self, key: &K) -> Result<Option<NodeId>, SortedMapError> {
        match self.locate(key) {
            Ok(Slot::Occupied(id)) => Ok(Some(id)),
            Ok(Slot::Vacant { .. }) => Ok(None),
            Err(err) => {
                debug!(%err, "lookup aborted");
                Err(err.into())
            }
        }
    }

    /// Inserts `key`, or replaces the value of the key already comparing
    /// equal to it and returns the old value. A replaced entry keeps its
    /// original key.
    pub fn put(&mut self, key: K, value: V) -> Result<Option<V>, SortedMapError> {
        self.put_node(Node::new(key, value))
    }

    /// Inserts a detached node, taking ownership of it.
    pub fn put_node(&mut self, node: Node<K, V>) -> Result<Option<V>, SortedMapError> {
        let slot = match self.locate(&node.key) {
            Ok(slot) => slot,
            Err(err) => {
                debug!(%err, "put aborted");
                return Err(err.into());
            }
        };

        match slot {
            Slot::Occupied(id) => {
                trace!(node = id.index(), "replace value");
                let (_, value) = node.into_parts();
                Ok(Some(mem::replace(&mut self.arena.node_mut(id).value, value)))
            }
            Slot::Vacant { parent, side } => {
                let z = self.arena.alloc(node)?;
                self.arena.link(z, parent, side);
                self.length += 1;
                trace!(node = z.index(), len = self.length, "insert");
                self.arena.insert_fixup(z);
                Ok(None)
            }
        }
    }

    /// `Ok(None)` when no key compares equal to `key`.
    pub fn get(&self, key: &K) -> Result<Option<&V>, SortedMapError> {
        Ok(self.find_node(key)?.map(|id| &self.arena.node(id).value))
    }

    pub fn get_mut(&mut self, key: &K) -> Result<Option<&mut V>, SortedMapError> {
        match self.find_node(key)? {
            Some(id) => Ok(Some(&mut self.arena.node_mut(id).value)),
            None => Ok(None),
        }
    }

    /// Stored key and value for the key comparing equal to `key`.
    pub fn get_key_value(&self, key: &K) -> Result<Option<(&K, &V)>, SortedMapError> {
        Ok(self.find_node(key)?.map(|id| {
            let node = self.arena.node(id);
            (&node.key, &node.value)
        }))
    }

    pub fn contains(&self, key: &K) -> Result<bool, SortedMapError> {
        Ok(self.find_node(key)?.is_some())
    }

    /// Id of the node holding `key`, for embedders walking the tree.
    pub fn find(&self, key: &K) -> Result<Option<NodeId>, SortedMapError> {
        self.find_node(key)
    }
}

impl<K, V, C> fmt::Debug for SortedMap<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortedMap")
            .field("len", &self.length)
            .field("root", &self.arena.root)
            .finish()
    }
}

/// Borrowed view of one live node, exposing its links for tree walks.
pub struct NodeRef<'a, K, V> {
    arena: &'a Arena<K, V>,
    id: NodeId,
}

impl<K, V> Clone for NodeRef<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for NodeRef<'_, K, V> {}

impl<'a, K, V> NodeRef<'a, K, V> {
    fn at(&self, id: NodeId) -> Option<NodeRef<'a, K, V>> {
        id.live().map(|id| NodeRef {
            arena: self.arena,
            id,
        })
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn key(&self) -> &'a K {
        &self.arena.node(self.id).key
    }

    pub fn value(&self) -> &'a V {
        &self.arena.node(self.id).value
    }

    pub fn color(&self) -> Color {
        self.arena.color(self.id)
    }

    pub fn left_id(&self) -> NodeId {
        self.arena.left(self.id)
    }

    pub fn right_id(&self) -> NodeId {
        self.arena.right(self.id)
    }

    pub fn parent_id(&self) -> NodeId {
        self.arena.parent(self.id)
    }

    pub fn left(&self) -> Option<NodeRef<'a, K, V>> {
        self.at(self.left_id())
    }

    pub fn right(&self) -> Option<NodeRef<'a, K, V>> {
        self.at(self.right_id())
    }

    pub fn parent(&self) -> Option<NodeRef<'a, K, V>> {
        self.at(self.parent_id())
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for NodeRef<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("key", self.key())
            .field("value", self.value())
            .field("color", &self.color())
            .field("left", &self.left_id())
            .field("right", &self.right_id())
            .field("parent", &self.parent_id())
            .finish()
    }
}
