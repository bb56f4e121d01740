//! Text dump of a tree, one node per line.
//!
//! ```text
//! SortedMap
//! └─ [B] 20 = "b"
//!    ← [R] 10 = "a"
//!    → [R] 30 = "c"
//! ```

use std::fmt::Debug;

use crate::node::{Color, NodeId};
use crate::red_black::Arena;
use crate::sorted_map::SortedMap;

/// Child printer callback used by [`print_binary`]. Receives the indentation
/// for the child's own children.
pub type PrintChild<'a> = dyn Fn(&str) -> String + 'a;

/// Renders up to two children below a node, left marked `←`, right `→`.
pub fn print_binary(tab: &str, children: [Option<&PrintChild<'_>>; 2]) -> String {
    let [left, right] = children;

    let mut out = String::new();
    for (arrow, child) in [("← ", left), ("→ ", right)] {
        if let Some(child) = child {
            let child_tab = format!("{tab}  ");
            out.push('\n');
            out.push_str(tab);
            out.push_str(arrow);
            out.push_str(&child(&child_tab));
        }
    }
    out
}

fn color_tag(color: Color) -> &'static str {
    match color {
        Color::Red => "[R]",
        Color::Black => "[B]",
    }
}

fn print_node<K: Debug, V: Debug>(arena: &Arena<K, V>, id: NodeId, tab: &str) -> String {
    let node = arena.node(id);
    let left = |tab: &str| print_node(arena, node.left, tab);
    let right = |tab: &str| print_node(arena, node.right, tab);
    let children: [Option<&PrintChild<'_>>; 2] = [
        (!node.left.is_sentinel()).then_some(&left as &PrintChild<'_>),
        (!node.right.is_sentinel()).then_some(&right as &PrintChild<'_>),
    ];
    format!(
        "{} {:?} = {:?}{}",
        color_tag(node.color),
        node.key,
        node.value,
        print_binary(tab, children)
    )
}

impl<K: Debug, V: Debug, C> SortedMap<K, V, C> {
    pub fn print(&self, tab: &str) -> String {
        let root = self.arena().root;
        if root.is_sentinel() {
            return "SortedMap ∅".to_string();
        }
        let child_tab = format!("{tab}   ");
        format!(
            "SortedMap\n{tab}└─ {}",
            print_node(self.arena(), root, &child_tab)
        )
    }
}
