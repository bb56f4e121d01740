use crate::node::NodeId;
use crate::red_black::Arena;

/// Leftmost node under `root`, or the sentinel for an empty subtree.
pub(crate) fn first<K, V>(arena: &Arena<K, V>, root: NodeId) -> NodeId {
    let mut curr = root;
    if curr.is_sentinel() {
        return curr;
    }
    loop {
        let l = arena.left(curr);
        if l.is_sentinel() {
            return curr;
        }
        curr = l;
    }
}

/// In-order successor, or the sentinel after the last node.
pub(crate) fn next<K, V>(arena: &Arena<K, V>, mut curr: NodeId) -> NodeId {
    let r = arena.right(curr);
    if !r.is_sentinel() {
        return first(arena, r);
    }

    let mut p = arena.parent(curr);
    while !p.is_sentinel() && arena.right(p) == curr {
        curr = p;
        p = arena.parent(p);
    }
    p
}

/// Longest root-to-leaf path, counted in nodes.
pub(crate) fn height<K, V>(arena: &Arena<K, V>, root: NodeId) -> usize {
    if root.is_sentinel() {
        return 0;
    }
    1 + height(arena, arena.left(root)).max(height(arena, arena.right(root)))
}
