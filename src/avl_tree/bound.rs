use crate::error::{Error, Result};

/// The largest height `min_nodes_for_height` accepts. Past it the closed form loses exactness
/// in double precision.
pub const MAX_HEIGHT: u32 = 60;

/// Returns the minimum number of nodes an avl tree of height `height` can have.
///
/// The sparsest avl tree of height `h` has a root, a sparsest subtree of height `h - 1` and a
/// sparsest subtree of height `h - 2`, so the counts grow like the Fibonacci numbers. This
/// evaluates the closed form of that recurrence, `round((sqrt(5) + 2) / sqrt(5) * phi^h - 1)`.
///
/// # Panics
///
/// Panics if `height` is greater than `MAX_HEIGHT`.
///
/// # Examples
/// ```
/// use avl_collections::avl_tree::min_nodes_for_height;
///
/// assert_eq!(min_nodes_for_height(0), 1);
/// assert_eq!(min_nodes_for_height(1), 2);
/// assert_eq!(min_nodes_for_height(2), 4);
/// assert_eq!(min_nodes_for_height(3), 7);
/// ```
pub fn min_nodes_for_height(height: u32) -> u64 {
    assert!(
        height <= MAX_HEIGHT,
        "Error: height {} exceeds the supported maximum of {}.",
        height,
        MAX_HEIGHT,
    );
    let sqrt_5 = 5f64.sqrt();
    let golden_ratio = (1.0 + sqrt_5) / 2.0;
    ((sqrt_5 + 2.0) / sqrt_5 * golden_ratio.powi(height as i32) - 1.0).round() as u64
}

/// Checked variant of `min_nodes_for_height` for signed heights.
///
/// # Examples
/// ```
/// use avl_collections::avl_tree::try_min_nodes_for_height;
/// use avl_collections::Error;
///
/// assert_eq!(try_min_nodes_for_height(4), Ok(12));
/// assert_eq!(try_min_nodes_for_height(-1), Err(Error::NegativeHeight(-1)));
/// ```
pub fn try_min_nodes_for_height(height: i32) -> Result<u64> {
    if height < 0 {
        return Err(Error::NegativeHeight(height));
    }
    if height as u32 > MAX_HEIGHT {
        return Err(Error::HeightTooLarge(height));
    }
    Ok(min_nodes_for_height(height as u32))
}
