//! Self-balancing binary search tree over unique integer keys where the heights of the two child
//! subtrees of any node differ by at most one.

mod bound;
mod node;
mod set;
mod tree;

pub use self::bound::{min_nodes_for_height, try_min_nodes_for_height, MAX_HEIGHT};
pub use self::set::{AvlTree, AvlTreeIter, NOT_FOUND};
