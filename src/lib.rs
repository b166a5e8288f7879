//! An arena-backed avl tree over unique `i32` keys.
//!
//! # Examples
//! ```
//! use avl_collections::avl_tree::{min_nodes_for_height, AvlTree};
//!
//! let mut tree = AvlTree::from_slice(&[50, 30, 70, 20, 40, 60, 80]);
//! assert!(tree.delete(50));
//! assert_eq!(tree.contains(60), 0);
//! assert!(tree.size() as u64 >= min_nodes_for_height(tree.height() as u32));
//! ```

pub mod arena;
pub mod avl_tree;
mod error;

pub use crate::avl_tree::{AvlTree, AvlTreeIter};
pub use crate::error::{Error, Result};
