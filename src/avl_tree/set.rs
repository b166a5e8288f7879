use crate::arena::DEFAULT_CHUNK_SIZE;
use crate::avl_tree::tree::Tree;
use crate::error::{Error, Result};
use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use std::fmt;
use std::iter::FromIterator;
use std::result;
use std::vec;

/// Depth reported by `AvlTree::contains` for a key that is not in the tree.
pub const NOT_FOUND: i32 = -1;

/// An ordered set of unique `i32` keys implemented using an avl tree.
///
/// An avl tree is a self-balancing binary search tree that maintains the invariant that the
/// heights of the two child subtrees of any node differ by at most one. Nodes are stored in an
/// arena and keep a back-reference to their parent, which is used to walk upward while
/// rebalancing.
///
/// # Examples
/// ```
/// use avl_collections::avl_tree::AvlTree;
///
/// let mut tree = AvlTree::new();
/// assert!(tree.add(10));
/// assert!(tree.add(20));
/// assert!(tree.add(30));
/// assert!(!tree.add(20));
///
/// assert_eq!(tree.size(), 3);
/// assert_eq!(tree.contains(20), 0);
/// assert_eq!(tree.contains(10), 1);
/// assert_eq!(tree.contains(15), -1);
///
/// assert!(tree.delete(20));
/// assert!(!tree.delete(20));
/// assert_eq!(tree.iter().collect::<Vec<i32>>(), vec![10, 30]);
/// ```
pub struct AvlTree {
    tree: Tree,
    size: usize,
}

impl AvlTree {
    /// Constructs a new, empty `AvlTree`.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlTree;
    ///
    /// let tree = AvlTree::new();
    /// assert!(tree.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::with_chunk_size(DEFAULT_CHUNK_SIZE)
    }

    /// Constructs a new, empty `AvlTree` whose node storage grows `chunk_size` nodes at a time.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is zero.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlTree;
    ///
    /// let tree = AvlTree::with_chunk_size(64);
    /// assert_eq!(tree.chunk_size(), 64);
    /// ```
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        AvlTree {
            tree: Tree::new(chunk_size),
            size: 0,
        }
    }

    /// Constructs a tree holding every distinct key of `keys`. Repeated keys after the first
    /// occurrence are skipped.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlTree;
    ///
    /// let tree = AvlTree::from_slice(&[3, 1, 3, 2]);
    /// assert_eq!(tree.size(), 3);
    /// ```
    pub fn from_slice(keys: &[i32]) -> Self {
        keys.iter().cloned().collect()
    }

    /// Returns the number of nodes reserved each time node storage grows.
    pub fn chunk_size(&self) -> usize {
        self.tree.chunk_size()
    }

    /// Inserts a key into the tree. Returns `true` if the key was inserted and `false` if it was
    /// already present, in which case the tree is left untouched.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// assert!(tree.add(1));
    /// assert!(!tree.add(1));
    /// ```
    pub fn add(&mut self, key: i32) -> bool {
        let inserted = self.tree.insert(key);
        if inserted {
            self.size += 1;
        }
        inserted
    }

    /// Removes a key from the tree. Returns `true` if the key was removed and `false` if it was
    /// not present.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// tree.add(1);
    /// assert!(tree.delete(1));
    /// assert!(!tree.delete(1));
    /// ```
    pub fn delete(&mut self, key: i32) -> bool {
        let removed = self.tree.remove(key);
        if removed {
            self.size -= 1;
        }
        removed
    }

    /// Returns the depth of the node holding `key`, where the root has depth 0, or `NOT_FOUND`
    /// if the key is not in the tree.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::{AvlTree, NOT_FOUND};
    ///
    /// let tree = AvlTree::from_slice(&[2, 1, 3]);
    /// assert_eq!(tree.contains(2), 0);
    /// assert_eq!(tree.contains(3), 1);
    /// assert_eq!(tree.contains(4), NOT_FOUND);
    /// ```
    pub fn contains(&self, key: i32) -> i32 {
        match self.depth(key) {
            Some(depth) => depth as i32,
            None => NOT_FOUND,
        }
    }

    /// Returns the depth of the node holding `key`, or `None` if the key is not in the tree.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlTree;
    ///
    /// let tree = AvlTree::from_slice(&[2, 1, 3]);
    /// assert_eq!(tree.depth(1), Some(1));
    /// assert_eq!(tree.depth(0), None);
    /// ```
    pub fn depth(&self, key: i32) -> Option<usize> {
        self.tree.depth(key)
    }

    /// Returns the number of keys in the tree.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the number of keys in the tree.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// tree.add(1);
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if the tree holds no keys.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Removes every key from the tree.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::from_slice(&[1, 2]);
    /// tree.clear();
    /// assert!(tree.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.tree.clear();
        self.size = 0;
    }

    /// Returns the height of the tree: 0 for a single node and -1 for an empty tree.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlTree;
    ///
    /// assert_eq!(AvlTree::new().height(), -1);
    /// assert_eq!(AvlTree::from_slice(&[1, 2, 3]).height(), 1);
    /// ```
    pub fn height(&self) -> i32 {
        self.tree.height()
    }

    /// Returns the minimum key of the tree. Returns `None` if the tree is empty.
    pub fn min(&self) -> Option<i32> {
        self.tree.min()
    }

    /// Returns the maximum key of the tree. Returns `None` if the tree is empty.
    pub fn max(&self) -> Option<i32> {
        self.tree.max()
    }

    /// Returns an iterator over the keys of the tree in ascending order.
    ///
    /// The keys are collected when this is called, so the iterator does not borrow the tree and
    /// is unaffected by later changes to it.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::from_slice(&[3, 1, 2]);
    /// let keys = tree.iter();
    /// tree.add(0);
    /// assert_eq!(keys.collect::<Vec<i32>>(), vec![1, 2, 3]);
    /// ```
    pub fn iter(&self) -> AvlTreeIter {
        AvlTreeIter {
            keys: self.tree.in_order().into_iter(),
        }
    }

    /// Checks every structural invariant of the tree: key ordering, the avl balance condition,
    /// cached heights and balance factors, parent back-references and the key count.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlTree;
    ///
    /// let tree = AvlTree::from_slice(&[5, 4, 3, 2, 1]);
    /// assert!(tree.validate().is_ok());
    /// ```
    pub fn validate(&self) -> Result<()> {
        self.tree.validate()?;
        if self.tree.node_count() != self.size {
            return Err(Error::SizeMismatch {
                expected: self.size,
                actual: self.tree.node_count(),
            });
        }
        Ok(())
    }
}

impl Clone for AvlTree {
    /// Builds an independent copy by inserting every key into a fresh tree.
    fn clone(&self) -> Self {
        let mut tree = AvlTree::with_chunk_size(self.chunk_size());
        tree.extend(self.iter());
        tree
    }
}

impl Default for AvlTree {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for AvlTree {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl PartialEq for AvlTree {
    fn eq(&self, other: &AvlTree) -> bool {
        self.size == other.size && self.iter().eq(other.iter())
    }
}

impl Eq for AvlTree {}

impl Extend<i32> for AvlTree {
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = i32>,
    {
        for key in iter {
            self.add(key);
        }
    }
}

impl FromIterator<i32> for AvlTree {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = i32>,
    {
        let mut tree = AvlTree::new();
        tree.extend(iter);
        tree
    }
}

impl<'a> From<&'a [i32]> for AvlTree {
    fn from(keys: &'a [i32]) -> Self {
        AvlTree::from_slice(keys)
    }
}

impl From<Vec<i32>> for AvlTree {
    fn from(keys: Vec<i32>) -> Self {
        keys.into_iter().collect()
    }
}

impl IntoIterator for AvlTree {
    type Item = i32;
    type IntoIter = AvlTreeIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> IntoIterator for &'a AvlTree {
    type Item = i32;
    type IntoIter = AvlTreeIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Serialize for AvlTree {
    fn serialize<S>(&self, serializer: S) -> result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.iter())
    }
}

impl<'de> Deserialize<'de> for AvlTree {
    fn deserialize<D>(deserializer: D) -> result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Vec::<i32>::deserialize(deserializer).map(AvlTree::from)
    }
}

/// An iterator for `AvlTree`.
///
/// This iterator owns a snapshot of the keys taken in-order when it was created.
pub struct AvlTreeIter {
    keys: vec::IntoIter<i32>,
}

impl Iterator for AvlTreeIter {
    type Item = i32;

    fn next(&mut self) -> Option<Self::Item> {
        self.keys.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.keys.size_hint()
    }
}

impl DoubleEndedIterator for AvlTreeIter {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.keys.next_back()
    }
}

impl ExactSizeIterator for AvlTreeIter {}
