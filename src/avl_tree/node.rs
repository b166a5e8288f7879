use crate::arena::Handle;

/// A struct representing an internal node of an avl tree.
///
/// Children are owned by the tree's arena; `parent` is a back-reference used only to walk
/// upward while rebalancing.
pub struct Node {
    pub value: i32,
    pub height: i32,
    pub balance: i32,
    pub parent: Option<Handle>,
    pub left: Option<Handle>,
    pub right: Option<Handle>,
}

impl Node {
    pub fn new(value: i32, parent: Option<Handle>) -> Self {
        Node {
            value,
            height: 0,
            balance: 0,
            parent,
            left: None,
            right: None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// The side of its parent a node hangs from.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Branch {
    Left,
    Right,
    Root,
}
