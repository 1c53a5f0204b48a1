//! Node-order remapping for endpoint arrays.

use core::fmt;
use core::hash::Hash;
use std::collections::HashMap;

use super::EndpointMatrix;
use crate::error::{Error, Result};

impl EndpointMatrix {
    /// Permute rows and columns from `current` node order to `target`.
    ///
    /// Cell `(i, j)` of the result refers to nodes `target[i]` and `target[j]`,
    /// so every node pair keeps its endpoints.
    ///
    /// # Errors
    ///
    /// - [`Error::ShapeMismatch`] if either order's length differs from the matrix dimension
    /// - [`Error::InvalidNodeOrder`] if an order repeats a node or `target` names a node
    ///   missing from `current`
    ///
    /// # Examples
    ///
    /// ```
    /// use causal_endpoints::EndpointMatrix;
    ///
    /// // x -> y
    /// let matrix = EndpointMatrix::from_rows(vec![vec![0, 1], vec![-1, 0]]).unwrap();
    /// let swapped = matrix.reorder(&["x", "y"], &["y", "x"]).unwrap();
    ///
    /// assert_eq!(swapped.to_rows(), vec![vec![0, -1], vec![1, 0]]);
    /// ```
    pub fn reorder<N>(&self, current: &[N], target: &[N]) -> Result<Self>
    where
        N: Eq + Hash + fmt::Debug,
    {
        let index = index_of(current, self.dim())?;
        if target.len() != self.dim() {
            return Err(Error::shape(
                format!("{} nodes in the new order", self.dim()),
                format!("{} nodes", target.len()),
            ));
        }

        let mut seen = vec![false; self.dim()];
        let mut permutation = Vec::with_capacity(target.len());
        for node in target {
            let idx = *index.get(node).ok_or_else(|| {
                Error::InvalidNodeOrder(format!("{:?} is not in the current node order", node))
            })?;
            if seen[idx] {
                return Err(Error::InvalidNodeOrder(format!(
                    "{:?} appears more than once",
                    node
                )));
            }
            seen[idx] = true;
            permutation.push(idx);
        }

        let mut reordered = EndpointMatrix::zeros(self.dim());
        for (i, &old_i) in permutation.iter().enumerate() {
            for (j, &old_j) in permutation.iter().enumerate() {
                reordered.set(i, j, self.get(old_i, old_j));
            }
        }
        Ok(reordered)
    }
}

/// Map each node of `order` to its position, checking the order names `dim`
/// distinct nodes.
pub(crate) fn index_of<N>(order: &[N], dim: usize) -> Result<HashMap<&N, usize>>
where
    N: Eq + Hash + fmt::Debug,
{
    if order.len() != dim {
        return Err(Error::shape(
            format!("{} node names, one per array row/column", dim),
            format!("{} node names", order.len()),
        ));
    }

    let mut index = HashMap::with_capacity(order.len());
    for (idx, node) in order.iter().enumerate() {
        if index.insert(node, idx).is_some() {
            return Err(Error::InvalidNodeOrder(format!(
                "{:?} appears more than once",
                node
            )));
        }
    }
    Ok(index)
}
