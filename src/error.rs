use thiserror::Error;

/// Errors reported by the fallible operations of this crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A minimum node count was requested for a negative height.
    #[error("height must be non-negative, got {0}")]
    NegativeHeight(i32),

    /// The closed form is no longer exact in double precision past this height.
    #[error("height {0} exceeds the supported maximum of {max}", max = crate::avl_tree::MAX_HEIGHT)]
    HeightTooLarge(i32),

    /// A structural check found a node that breaks a tree invariant.
    #[error("invariant violated at node {value}: {reason}")]
    InvariantViolated {
        /// Key of the offending node
        value: i32,
        /// Which invariant failed
        reason: &'static str,
    },

    /// The key counter disagrees with the number of nodes actually stored.
    #[error("tree records {expected} keys but stores {actual} nodes")]
    SizeMismatch {
        /// Number of keys the tree believes it holds
        expected: usize,
        /// Number of nodes found in storage
        actual: usize,
    },
}

/// A specialized `Result` type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
