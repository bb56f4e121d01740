use std::fmt;

/// Arena handle of a tree node.
///
/// Id `0` never names a stored node: it is the shared sentinel that stands in
/// for every missing child and for the parent of the root. It is always
/// black and its links are never written.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub const SENTINEL: NodeId = NodeId(0);

    #[inline]
    pub fn is_sentinel(self) -> bool {
        self.0 == 0
    }

    /// `None` for the sentinel, the id itself otherwise.
    #[inline]
    pub fn live(self) -> Option<NodeId> {
        if self.is_sentinel() {
            None
        } else {
            Some(self)
        }
    }

    /// Raw arena index, `0` being the sentinel.
    #[inline]
    pub fn index(self) -> u32 {
        self.0
    }

    /// Id of arena slot `slot`, or `None` once ids would run past `u32`.
    #[inline]
    pub(crate) fn from_slot(slot: usize) -> Option<Self> {
        let id = slot.checked_add(1)?;
        u32::try_from(id).ok().map(NodeId)
    }

    #[inline]
    pub(crate) fn slot(self) -> usize {
        debug_assert!(!self.is_sentinel(), "sentinel has no arena slot");
        self.0 as usize - 1
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_sentinel() {
            f.write_str("Sentinel")
        } else {
            write!(f, "NodeId({})", self.0)
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Black,
}

impl Color {
    #[inline]
    pub fn is_red(self) -> bool {
        matches!(self, Color::Red)
    }

    #[inline]
    pub fn is_black(self) -> bool {
        matches!(self, Color::Black)
    }
}

/// One key/value record of the tree.
///
/// A node built with [`Node::new`] is detached: red, with sentinel links.
/// Handing it to [`SortedMap::put_node`](crate::SortedMap::put_node) moves it
/// into the map's arena for good.
#[derive(Clone, Debug)]
pub struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) color: Color,
    pub(crate) left: NodeId,
    pub(crate) right: NodeId,
    pub(crate) parent: NodeId,
}

impl<K, V> Node<K, V> {
    pub fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            color: Color::Red,
            left: NodeId::SENTINEL,
            right: NodeId::SENTINEL,
            parent: NodeId::SENTINEL,
        }
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn left(&self) -> NodeId {
        self.left
    }

    pub fn right(&self) -> NodeId {
        self.right
    }

    pub fn parent(&self) -> NodeId {
        self.parent
    }

    pub fn into_parts(self) -> (K, V) {
        (self.key, self.value)
    }
}
