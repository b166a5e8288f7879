use crate::arena::{Arena, Handle};
use crate::avl_tree::node::{Branch, Node};
use crate::error::{Error, Result};
use log::{debug, trace};
use std::cmp::{self, Ordering};

/// The arena-backed core of an avl tree.
///
/// Every node lives in `arena`; links between nodes are handles. `root` is the only handle
/// held outside of a node.
pub struct Tree {
    arena: Arena<Node>,
    root: Option<Handle>,
}

impl Tree {
    pub fn new(chunk_size: usize) -> Self {
        Tree {
            arena: Arena::new(chunk_size),
            root: None,
        }
    }

    pub fn chunk_size(&self) -> usize {
        self.arena.chunk_size()
    }

    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
    }

    fn height_of(&self, node: Option<Handle>) -> i32 {
        match node {
            None => -1,
            Some(handle) => self.arena[handle].height,
        }
    }

    // an absent node reports -1, the same as an empty subtree's height
    fn balance_of(&self, node: Option<Handle>) -> i32 {
        match node {
            None => -1,
            Some(handle) => self.arena[handle].balance,
        }
    }

    pub fn height(&self) -> i32 {
        self.height_of(self.root)
    }

    // recomputes the cached height and balance of a node from its children
    fn update(&mut self, handle: Handle) {
        let (left, right) = {
            let node = &self.arena[handle];
            (node.left, node.right)
        };
        let left_height = self.height_of(left);
        let right_height = self.height_of(right);
        let node = &mut self.arena[handle];
        node.height = cmp::max(left_height, right_height) + 1;
        node.balance = right_height - left_height;
    }

    fn branch(&self, handle: Handle) -> Branch {
        match self.arena[handle].parent {
            None => Branch::Root,
            Some(parent) => {
                if self.arena[parent].left == Some(handle) {
                    Branch::Left
                } else {
                    Branch::Right
                }
            },
        }
    }

    // hangs `child` from `parent` on the given side and points the child back at its parent
    fn attach(&mut self, parent: Option<Handle>, branch: Branch, child: Option<Handle>) {
        match (parent, branch) {
            (Some(parent), Branch::Left) => self.arena[parent].left = child,
            (Some(parent), Branch::Right) => self.arena[parent].right = child,
            (None, Branch::Root) => self.root = child,
            _ => unreachable!(),
        }
        if let Some(child) = child {
            self.arena[child].parent = parent;
        }
    }

    fn rotate_left(&mut self, handle: Handle) -> Handle {
        let branch = self.branch(handle);
        let parent = self.arena[handle].parent;
        let child = match self.arena[handle].right {
            Some(child) => child,
            None => unreachable!(),
        };

        let inner = self.arena[child].left;
        self.arena[handle].right = inner;
        if let Some(inner) = inner {
            self.arena[inner].parent = Some(handle);
        }
        self.arena[child].left = Some(handle);
        self.arena[handle].parent = Some(child);
        self.attach(parent, branch, Some(child));

        self.update(handle);
        self.update(child);
        trace!("rotated left at {}, promoted {}", self.arena[handle].value, self.arena[child].value);
        child
    }

    fn rotate_right(&mut self, handle: Handle) -> Handle {
        let branch = self.branch(handle);
        let parent = self.arena[handle].parent;
        let child = match self.arena[handle].left {
            Some(child) => child,
            None => unreachable!(),
        };

        let inner = self.arena[child].right;
        self.arena[handle].left = inner;
        if let Some(inner) = inner {
            self.arena[inner].parent = Some(handle);
        }
        self.arena[child].right = Some(handle);
        self.arena[handle].parent = Some(child);
        self.attach(parent, branch, Some(child));

        self.update(handle);
        self.update(child);
        trace!("rotated right at {}, promoted {}", self.arena[handle].value, self.arena[child].value);
        child
    }

    fn rotate_left_right(&mut self, handle: Handle) -> Handle {
        let left = match self.arena[handle].left {
            Some(left) => left,
            None => unreachable!(),
        };
        self.rotate_left(left);
        self.rotate_right(handle)
    }

    fn rotate_right_left(&mut self, handle: Handle) -> Handle {
        let right = match self.arena[handle].right {
            Some(right) => right,
            None => unreachable!(),
        };
        self.rotate_right(right);
        self.rotate_left(handle)
    }

    fn child_value(&self, child: Option<Handle>) -> i32 {
        match child {
            Some(child) => self.arena[child].value,
            None => unreachable!(),
        }
    }

    fn find(&self, key: i32) -> Option<(Handle, usize)> {
        let mut curr = self.root;
        let mut depth = 0;
        while let Some(handle) = curr {
            let node = &self.arena[handle];
            match node.value.cmp(&key) {
                Ordering::Greater => curr = node.left,
                Ordering::Less => curr = node.right,
                Ordering::Equal => return Some((handle, depth)),
            }
            depth += 1;
        }
        None
    }

    pub fn depth(&self, key: i32) -> Option<usize> {
        self.find(key).map(|(_, depth)| depth)
    }

    pub fn insert(&mut self, key: i32) -> bool {
        let mut parent = None;
        let mut branch = Branch::Root;
        let mut curr = self.root;
        while let Some(handle) = curr {
            let node = &self.arena[handle];
            parent = Some(handle);
            match key.cmp(&node.value) {
                Ordering::Less => {
                    branch = Branch::Left;
                    curr = node.left;
                },
                Ordering::Greater => {
                    branch = Branch::Right;
                    curr = node.right;
                },
                Ordering::Equal => return false,
            }
        }

        let leaf = self.arena.allocate(Node::new(key, parent));
        self.attach(parent, branch, Some(leaf));
        trace!("allocated leaf {}", key);
        self.rebalance_after_insert(parent, key);
        true
    }

    // A single insertion can unbalance at most one ancestor, so only the first ancestor found
    // out of balance is rotated. Heights are still recomputed all the way up.
    fn rebalance_after_insert(&mut self, mut curr: Option<Handle>, key: i32) {
        let mut rotated = false;
        while let Some(handle) = curr {
            self.update(handle);
            let mut top = handle;
            if !rotated {
                let balance = self.arena[handle].balance;
                match balance {
                    -2 => {
                        top = if key < self.child_value(self.arena[handle].left) {
                            self.rotate_right(handle)
                        } else {
                            self.rotate_left_right(handle)
                        };
                        rotated = true;
                    },
                    2 => {
                        top = if key > self.child_value(self.arena[handle].right) {
                            self.rotate_left(handle)
                        } else {
                            self.rotate_right_left(handle)
                        };
                        rotated = true;
                    },
                    _ => {},
                }
                if rotated {
                    debug!(
                        "rebalanced after inserting {}, subtree root is now {}",
                        key,
                        self.arena[top].value,
                    );
                }
            }
            curr = self.arena[top].parent;
        }
    }

    fn leftmost(&self, mut handle: Handle) -> Handle {
        while let Some(left) = self.arena[handle].left {
            handle = left;
        }
        handle
    }

    fn rightmost(&self, mut handle: Handle) -> Handle {
        while let Some(right) = self.arena[handle].right {
            handle = right;
        }
        handle
    }

    pub fn min(&self) -> Option<i32> {
        self.root.map(|root| self.arena[self.leftmost(root)].value)
    }

    pub fn max(&self) -> Option<i32> {
        self.root.map(|root| self.arena[self.rightmost(root)].value)
    }

    pub fn remove(&mut self, key: i32) -> bool {
        let target = match self.find(key) {
            Some((handle, _)) => handle,
            None => return false,
        };

        // a node with two children takes its successor's key and the successor is removed instead
        let (left, right) = (self.arena[target].left, self.arena[target].right);
        let removed = match (left, right) {
            (Some(_), Some(right)) => {
                let successor = self.leftmost(right);
                self.arena[target].value = self.arena[successor].value;
                successor
            },
            _ => target,
        };

        let parent = self.unlink(removed);
        self.rebalance_after_remove(parent, key);
        true
    }

    // precondition: the node has at most one child
    fn unlink(&mut self, handle: Handle) -> Option<Handle> {
        let branch = self.branch(handle);
        let node = self.arena.free(handle);
        let child = match (node.left, node.right) {
            (Some(_), Some(_)) => unreachable!(),
            (left, None) => left,
            (None, right) => right,
        };
        self.attach(node.parent, branch, child);
        node.parent
    }

    // Unlike insertion, a removal can unbalance every ancestor on the way up.
    fn rebalance_after_remove(&mut self, mut curr: Option<Handle>, key: i32) {
        while let Some(handle) = curr {
            self.update(handle);
            let balance = self.arena[handle].balance;
            let top = match balance {
                2 => {
                    if self.balance_of(self.arena[handle].right) == -1 {
                        self.rotate_right_left(handle)
                    } else {
                        self.rotate_left(handle)
                    }
                },
                -2 => {
                    if self.balance_of(self.arena[handle].left) == 1 {
                        self.rotate_left_right(handle)
                    } else {
                        self.rotate_right(handle)
                    }
                },
                _ => handle,
            };
            if top != handle {
                debug!(
                    "rebalanced after removing {}, subtree root is now {}",
                    key,
                    self.arena[top].value,
                );
            }
            curr = self.arena[top].parent;
        }
    }

    pub fn in_order(&self) -> Vec<i32> {
        let mut keys = Vec::with_capacity(self.arena.len());
        let mut stack = Vec::new();
        let mut curr = self.root;
        loop {
            while let Some(handle) = curr {
                stack.push(handle);
                curr = self.arena[handle].left;
            }
            match stack.pop() {
                Some(handle) => {
                    keys.push(self.arena[handle].value);
                    curr = self.arena[handle].right;
                },
                None => return keys,
            }
        }
    }

    /// Recomputes every cached field and link from the live shape of the tree.
    pub fn validate(&self) -> Result<()> {
        if let Some(root) = self.root {
            if self.arena[root].parent.is_some() {
                return Err(Error::InvariantViolated {
                    value: self.arena[root].value,
                    reason: "root has a parent",
                });
            }
            self.validate_subtree(root, None, None)?;
        }
        Ok(())
    }

    fn validate_child(
        &self,
        parent: Handle,
        child: Option<Handle>,
        lower: Option<i32>,
        upper: Option<i32>,
    ) -> Result<i32> {
        match child {
            None => Ok(-1),
            Some(child) => {
                if self.arena[child].parent != Some(parent) {
                    return Err(Error::InvariantViolated {
                        value: self.arena[child].value,
                        reason: "parent link does not match structural parent",
                    });
                }
                self.validate_subtree(child, lower, upper)
            },
        }
    }

    fn validate_subtree(&self, handle: Handle, lower: Option<i32>, upper: Option<i32>) -> Result<i32> {
        let node = &self.arena[handle];
        let violation = |reason: &'static str| Error::InvariantViolated {
            value: node.value,
            reason,
        };

        let above_lower = lower.map_or(true, |lower| node.value > lower);
        let below_upper = upper.map_or(true, |upper| node.value < upper);
        if !above_lower || !below_upper {
            return Err(violation("key is out of order"));
        }

        let left_height = self.validate_child(handle, node.left, lower, Some(node.value))?;
        let right_height = self.validate_child(handle, node.right, Some(node.value), upper)?;
        if node.height != cmp::max(left_height, right_height) + 1 {
            return Err(violation("cached height is stale"));
        }
        if node.balance != right_height - left_height {
            return Err(violation("cached balance is stale"));
        }
        if node.balance.abs() > 1 {
            return Err(violation("subtree heights differ by more than one"));
        }
        if node.is_leaf() && node.height != 0 {
            return Err(violation("leaf has non-zero height"));
        }
        Ok(node.height)
    }
}

#[cfg(test)]
mod tests {
    use super::Tree;
    use crate::arena::Handle;

    fn value(tree: &Tree, handle: Option<Handle>) -> Option<i32> {
        handle.map(|handle| tree.arena[handle].value)
    }

    fn build(keys: &[i32]) -> Tree {
        let mut tree = Tree::new(16);
        for key in keys {
            assert!(tree.insert(*key));
            assert_eq!(tree.validate(), Ok(()));
        }
        tree
    }

    #[test]
    fn test_rotate_left() {
        let tree = build(&[10, 20, 30]);
        let root = tree.root.unwrap();
        assert_eq!(tree.arena[root].value, 20);
        assert_eq!(value(&tree, tree.arena[root].left), Some(10));
        assert_eq!(value(&tree, tree.arena[root].right), Some(30));
        assert_eq!(tree.arena[root].height, 1);
        assert_eq!(tree.arena[root].balance, 0);
    }

    #[test]
    fn test_rotate_right() {
        let tree = build(&[30, 20, 10]);
        let root = tree.root.unwrap();
        assert_eq!(tree.arena[root].value, 20);
        assert_eq!(value(&tree, tree.arena[root].left), Some(10));
        assert_eq!(value(&tree, tree.arena[root].right), Some(30));
    }

    #[test]
    fn test_rotate_left_right() {
        let tree = build(&[30, 10, 20]);
        let root = tree.root.unwrap();
        assert_eq!(tree.arena[root].value, 20);
        assert_eq!(value(&tree, tree.arena[root].left), Some(10));
        assert_eq!(value(&tree, tree.arena[root].right), Some(30));
    }

    #[test]
    fn test_rotate_right_left() {
        let tree = build(&[10, 30, 20]);
        let root = tree.root.unwrap();
        assert_eq!(tree.arena[root].value, 20);
        assert_eq!(value(&tree, tree.arena[root].left), Some(10));
        assert_eq!(value(&tree, tree.arena[root].right), Some(30));
    }

    #[test]
    fn test_rotation_below_root() {
        let tree = build(&[50, 40, 60, 70, 80]);
        let root = tree.root.unwrap();
        assert_eq!(tree.arena[root].value, 50);
        let right = tree.arena[root].right.unwrap();
        assert_eq!(tree.arena[right].value, 70);
        assert_eq!(tree.arena[right].parent, Some(root));
        assert_eq!(value(&tree, tree.arena[right].left), Some(60));
        assert_eq!(value(&tree, tree.arena[right].right), Some(80));
    }

    #[test]
    fn test_insert_duplicate() {
        let mut tree = build(&[2, 1, 3]);
        assert!(!tree.insert(1));
        assert_eq!(tree.node_count(), 3);
        assert_eq!(tree.in_order(), vec![1, 2, 3]);
    }

    #[test]
    fn test_depth() {
        let tree = build(&[50, 30, 70, 20]);
        assert_eq!(tree.depth(50), Some(0));
        assert_eq!(tree.depth(30), Some(1));
        assert_eq!(tree.depth(70), Some(1));
        assert_eq!(tree.depth(20), Some(2));
        assert_eq!(tree.depth(25), None);
    }

    #[test]
    fn test_remove_two_children_copies_successor() {
        let mut tree = build(&[50, 30, 70, 20, 40, 60, 80]);
        let root = tree.root.unwrap();
        assert!(tree.remove(50));
        assert_eq!(tree.root, Some(root));
        assert_eq!(tree.arena[root].value, 60);
        assert_eq!(tree.node_count(), 6);
        assert_eq!(tree.validate(), Ok(()));
    }

    #[test]
    fn test_remove_leaf_and_single_child() {
        let mut tree = build(&[20, 10, 30, 25]);
        assert!(tree.remove(10));
        assert_eq!(tree.validate(), Ok(()));
        assert_eq!(value(&tree, tree.root), Some(25));
        assert!(tree.remove(30));
        assert!(tree.remove(25));
        assert_eq!(tree.in_order(), vec![20]);
        assert!(tree.remove(20));
        assert_eq!(tree.root, None);
        assert_eq!(tree.height(), -1);
    }

    #[test]
    fn test_remove_double_rotation() {
        let mut tree = build(&[20, 10, 30, 15]);
        assert!(tree.remove(30));
        assert_eq!(value(&tree, tree.root), Some(15));
        assert_eq!(tree.validate(), Ok(()));
    }

    #[test]
    fn test_remove_cascading_rotations() {
        // sparsest tree of height 4; removing from the shallow side rotates at two levels
        let mut tree = build(&[8, 5, 11, 3, 7, 10, 12, 2, 4, 6, 9, 1]);
        assert_eq!(tree.height(), 4);
        assert!(tree.remove(12));
        assert_eq!(tree.validate(), Ok(()));
        assert_eq!(tree.height(), 3);
        assert_eq!(tree.in_order(), vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11]);
    }

    #[test]
    fn test_remove_missing() {
        let mut tree = build(&[1, 2, 3]);
        assert!(!tree.remove(4));
        assert_eq!(tree.in_order(), vec![1, 2, 3]);
    }

    #[test]
    fn test_min_max() {
        let tree = build(&[5, 1, 9, 3]);
        assert_eq!(tree.min(), Some(1));
        assert_eq!(tree.max(), Some(9));
        assert_eq!(Tree::new(16).min(), None);
    }

    #[test]
    fn test_validate_detects_stale_height() {
        let mut tree = build(&[2, 1, 3]);
        let root = tree.root.unwrap();
        tree.arena[root].height = 5;
        assert!(tree.validate().is_err());
    }
}
