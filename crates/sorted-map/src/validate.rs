use std::cmp::Ordering;

use crate::compare::Comparator;
use crate::node::NodeId;
use crate::red_black::Arena;
use crate::sorted_map::SortedMap;
use crate::util::{first, next};

impl<K, V, C> SortedMap<K, V, C>
where
    C: Comparator<K>,
{
    /// Checks every red-black invariant and the integrity of the links:
    ///
    /// - keys are strictly increasing in order under the map's comparator,
    /// - the root and the sentinel are black,
    /// - no red node has a red parent,
    /// - every path down to the sentinel crosses the same number of black
    ///   nodes,
    /// - child and parent links agree, and the count matches the node total.
    pub fn assert_valid(&self) -> Result<(), String> {
        let arena = self.arena();

        if !arena.color(NodeId::SENTINEL).is_black() {
            return Err("sentinel is not black".to_string());
        }

        let root = arena.root;
        if root.is_sentinel() {
            if self.len() != 0 {
                return Err(format!("empty tree reports length {}", self.len()));
            }
            return Ok(());
        }
        if !arena.parent(root).is_sentinel() {
            return Err(format!("root {root:?} has a parent"));
        }
        if !arena.color(root).is_black() {
            return Err(format!("root {root:?} is red"));
        }

        let (_, count) = check_subtree(arena, root)?;
        if count != self.len() {
            return Err(format!(
                "tree holds {count} nodes but length is {}",
                self.len()
            ));
        }
        if count != arena.len() {
            return Err(format!(
                "tree reaches {count} nodes but the arena holds {}",
                arena.len()
            ));
        }

        let mut prev = first(arena, root);
        let mut curr = next(arena, prev);
        while !curr.is_sentinel() {
            let ord = self
                .comparator()
                .compare(&arena.node(prev).key, &arena.node(curr).key)
                .map_err(|err| format!("comparator failed while validating: {err}"))?;
            if ord != Ordering::Less {
                return Err(format!(
                    "in-order keys out of order at {prev:?} -> {curr:?} ({ord:?})"
                ));
            }
            prev = curr;
            curr = next(arena, curr);
        }

        Ok(())
    }
}

/// Returns `(black_height, node_count)` of the subtree under `id`.
fn check_subtree<K, V>(arena: &Arena<K, V>, id: NodeId) -> Result<(usize, usize), String> {
    if id.is_sentinel() {
        return Ok((1, 0));
    }

    let l = arena.left(id);
    let r = arena.right(id);
    for child in [l, r] {
        if child.is_sentinel() {
            continue;
        }
        if arena.parent(child) != id {
            return Err(format!(
                "{child:?} points at parent {:?} instead of {id:?}",
                arena.parent(child)
            ));
        }
        if arena.is_red(id) && arena.is_red(child) {
            return Err(format!("red node {child:?} has red parent {id:?}"));
        }
    }

    let (lh, lc) = check_subtree(arena, l)?;
    let (rh, rc) = check_subtree(arena, r)?;
    if lh != rh {
        return Err(format!(
            "black height mismatch under {id:?}: left {lh}, right {rh}"
        ));
    }

    let own = usize::from(arena.color(id).is_black());
    Ok((lh + own, lc + rc + 1))
}

#[cfg(test)]
mod tests {
    use crate::node::Color;
    use crate::SortedMap;

    fn filled() -> SortedMap<i32, ()> {
        let mut map = SortedMap::new();
        for k in [50, 20, 80, 10, 30, 70, 90, 25] {
            map.put(k, ()).unwrap();
        }
        map
    }

    #[test]
    fn balanced_tree_passes() {
        let map = filled();
        assert_eq!(map.assert_valid(), Ok(()));
        assert_eq!(SortedMap::<i32, ()>::new().assert_valid(), Ok(()));
    }

    #[test]
    fn red_root_is_reported() {
        let mut map = filled();
        let root = map.root().unwrap().id();
        map.arena_mut().set_color(root, Color::Red);
        let err = map.assert_valid().unwrap_err();
        assert!(err.contains("is red"), "{err}");
    }

    #[test]
    fn red_red_is_reported() {
        let mut map = filled();
        // 25 hangs red under 30; painting 30 red breaks the red rule.
        let n30 = map.find(&30).unwrap().unwrap();
        let n25 = map.find(&25).unwrap().unwrap();
        assert_eq!(map.node(n25).unwrap().color(), Color::Red);
        map.arena_mut().set_color(n30, Color::Red);
        let err = map.assert_valid().unwrap_err();
        assert!(err.contains("red parent"), "{err}");
    }

    #[test]
    fn black_height_mismatch_is_reported() {
        let mut map = filled();
        let n25 = map.find(&25).unwrap().unwrap();
        map.arena_mut().set_color(n25, Color::Black);
        let err = map.assert_valid().unwrap_err();
        assert!(err.contains("black height"), "{err}");
    }
}
