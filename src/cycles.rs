//! Cycle detection over the directed edges of a mixed-edge graph.
//!
//! Only [`EdgeType::Directed`] edges take part. Bidirected, undirected and
//! circle edges never close a cycle.
//!
//! ```
//! use causal_endpoints::{EdgeType, MixedEdgeGraph};
//!
//! let mut graph = MixedEdgeGraph::admg();
//! graph.add_edge(1, 2, EdgeType::Directed).unwrap();
//! graph.add_edge(2, 1, EdgeType::Bidirected).unwrap();
//! assert!(!graph.has_cycle());
//! ```

use core::fmt;
use core::hash::Hash;

use crate::graph::{EdgeType, MixedEdgeGraph};

impl<N> MixedEdgeGraph<N>
where
    N: Clone + Eq + Hash + fmt::Debug,
{
    /// Check if the directed edges contain a cycle.
    ///
    /// # Examples
    ///
    /// ```
    /// use causal_endpoints::{EdgeType, MixedEdgeGraph};
    ///
    /// let mut graph = MixedEdgeGraph::admg();
    /// graph.add_edge("a", "b", EdgeType::Directed).unwrap();
    /// graph.add_edge("b", "a", EdgeType::Directed).unwrap();  // Creates a cycle!
    ///
    /// assert!(graph.has_cycle());
    /// ```
    pub fn has_cycle(&self) -> bool {
        let children = self.directed_children();
        let mut visited = vec![false; self.nodes.len()];
        let mut rec_stack = vec![false; self.nodes.len()];

        for i in 0..self.nodes.len() {
            if Self::has_cycle_util(&children, i, &mut visited, &mut rec_stack) {
                return true;
            }
        }
        false
    }

    /// Helper function for cycle detection using DFS.
    fn has_cycle_util(
        children: &[Vec<usize>],
        idx: usize,
        visited: &mut [bool],
        rec_stack: &mut [bool],
    ) -> bool {
        if rec_stack[idx] {
            return true;
        }
        if visited[idx] {
            return false;
        }

        visited[idx] = true;
        rec_stack[idx] = true;

        for &child in &children[idx] {
            if Self::has_cycle_util(children, child, visited, rec_stack) {
                return true;
            }
        }

        rec_stack[idx] = false;
        false
    }

    /// Find a directed cycle.
    ///
    /// Returns the nodes along the cycle in edge order, if one exists.
    pub fn find_cycle(&self) -> Option<Vec<N>> {
        let children = self.directed_children();
        let mut visited = vec![false; self.nodes.len()];

        for i in 0..self.nodes.len() {
            let mut path = Vec::new();
            if let Some(cycle) = self.find_cycle_from(&children, i, &mut visited, &mut path) {
                return Some(cycle);
            }
        }
        None
    }

    fn find_cycle_from(
        &self,
        children: &[Vec<usize>],
        start_idx: usize,
        visited: &mut [bool],
        path: &mut Vec<usize>,
    ) -> Option<Vec<N>> {
        if let Some(cycle_start) = path.iter().position(|&idx| idx == start_idx) {
            return Some(
                path[cycle_start..]
                    .iter()
                    .map(|&idx| self.nodes[idx].clone())
                    .collect(),
            );
        }
        // Fully explored from an earlier root without closing a cycle.
        if visited[start_idx] {
            return None;
        }

        visited[start_idx] = true;
        path.push(start_idx);

        for &child in &children[start_idx] {
            if let Some(cycle) = self.find_cycle_from(children, child, visited, path) {
                return Some(cycle);
            }
        }

        path.pop();
        None
    }

    fn directed_children(&self) -> Vec<Vec<usize>> {
        let mut children = vec![Vec::new(); self.nodes.len()];
        for (from, to) in self.directed_edge_indices() {
            children[from].push(to);
        }
        children
    }

    fn directed_edge_indices(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.edges[EdgeType::Directed as usize].iter().copied()
    }
}
