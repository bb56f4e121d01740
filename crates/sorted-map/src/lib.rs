//! Ordered key-value map on an arena-allocated red-black tree.
//!
//! Nodes live in a `Vec` and refer to each other by [`NodeId`]. Id `0` is a
//! shared black sentinel standing in for every absent child and for the
//! root's parent. Keys are ordered by a [`Comparator`] that may fail; a
//! failed comparison aborts the operation without touching the tree.
//!
//! ```
//! use sorted_map::{Color, SortedMap};
//!
//! let mut map = SortedMap::new();
//! for (k, v) in [(10, "a"), (20, "b"), (30, "c")] {
//!     map.put(k, v).unwrap();
//! }
//! let root = map.root().unwrap();
//! assert_eq!(*root.key(), 20);
//! assert_eq!(root.color(), Color::Black);
//! assert_eq!(map.get(&30), Ok(Some(&"c")));
//! ```

pub mod compare;
pub mod dynamic;
pub mod error;
pub mod node;
pub mod print;

mod red_black;
mod sorted_map;
mod util;
mod validate;

pub use compare::{CmpOutput, Comparator, FnComparator, Natural, Reverse};
pub use dynamic::{CmpArg, DynOrder, DynSortedMap, ValueOrder};
pub use error::{ComparisonError, SortedMapError};
pub use node::{Color, Node, NodeId};
pub use sorted_map::{NodeRef, SortedMap};
