//! Mixed-edge causal graph.
//!
//! A [`MixedEdgeGraph`] holds a fixed set of nodes and up to four kinds of edges
//! between them. Each graph is tagged with a [`GraphVariant`] that decides which
//! edge types it accepts.
//!
//! ## Edge orientation
//!
//! - [`EdgeType::Directed`] and [`EdgeType::Circle`] edges are ordered. A circle
//!   edge `u -> v` places the circle mark at `v`, so `u o-o v` is two circle
//!   edges and `u o-> v` is a directed edge `u -> v` plus a circle edge `v -> u`.
//! - [`EdgeType::Bidirected`] and [`EdgeType::Undirected`] edges are unordered.
//!
//! ## Performance Characteristics
//!
//! - **Node/Edge Insertion**: O(log E) with ordered edge sets
//! - **Neighbor Lookups**: cached adjacency sets, no edge scan
//! - **Node→Index Mapping**: O(1) via HashMap

use core::fmt;
use core::hash::Hash;
use core::str::FromStr;
use std::collections::{BTreeSet, HashMap};

use tracing::debug;

use crate::error::{Error, Result};

/// The four edge kinds a causal graph can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum EdgeType {
    /// `u -> v`
    Directed,
    /// `u <-> v`
    Bidirected,
    /// `u -- v`
    Undirected,
    /// `u -o v`
    Circle,
}

impl EdgeType {
    pub const ALL: [EdgeType; 4] = [
        EdgeType::Directed,
        EdgeType::Bidirected,
        EdgeType::Undirected,
        EdgeType::Circle,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            EdgeType::Directed => "directed",
            EdgeType::Bidirected => "bidirected",
            EdgeType::Undirected => "undirected",
            EdgeType::Circle => "circle",
        }
    }

    /// Whether `u - v` and `v - u` are the same edge.
    pub const fn is_symmetric(self) -> bool {
        matches!(self, EdgeType::Bidirected | EdgeType::Undirected)
    }

    const fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for EdgeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EdgeType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        EdgeType::ALL
            .into_iter()
            .find(|edge_type| edge_type.name() == s)
            .ok_or_else(|| {
                Error::UnsupportedEdgeSet(format!(
                    "unrecognized edge type '{}', use one of 'directed', 'bidirected', \
                     'undirected', 'circle'",
                    s
                ))
            })
    }
}

/// The class of causal graph being built or read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum GraphVariant {
    /// Directed acyclic graph: directed edges only.
    ///
    /// `add_edge` checks edge types but not acyclicity; cycles are rejected by
    /// [`MixedEdgeGraph::to_directed`] and when decoding a `dag` array.
    Dag,
    /// Acyclic directed mixed graph: directed, bidirected and undirected edges.
    Admg,
    /// Completed partially directed acyclic graph: directed and undirected edges.
    Cpdag,
    /// Partial ancestral graph: every edge type, including circle marks.
    Pag,
}

impl GraphVariant {
    pub const ALL: [GraphVariant; 4] = [
        GraphVariant::Dag,
        GraphVariant::Admg,
        GraphVariant::Cpdag,
        GraphVariant::Pag,
    ];

    pub const fn tag(self) -> &'static str {
        match self {
            GraphVariant::Dag => "dag",
            GraphVariant::Admg => "admg",
            GraphVariant::Cpdag => "cpdag",
            GraphVariant::Pag => "pag",
        }
    }

    /// Whether graphs of this variant may hold edges of `edge_type`.
    ///
    /// # Examples
    ///
    /// ```
    /// use causal_endpoints::{EdgeType, GraphVariant};
    ///
    /// assert!(GraphVariant::Pag.allows(EdgeType::Circle));
    /// assert!(!GraphVariant::Cpdag.allows(EdgeType::Bidirected));
    /// ```
    pub const fn allows(self, edge_type: EdgeType) -> bool {
        match self {
            GraphVariant::Dag => matches!(edge_type, EdgeType::Directed),
            GraphVariant::Admg => !matches!(edge_type, EdgeType::Circle),
            GraphVariant::Cpdag => {
                matches!(edge_type, EdgeType::Directed | EdgeType::Undirected)
            }
            GraphVariant::Pag => true,
        }
    }
}

impl fmt::Display for GraphVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for GraphVariant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        GraphVariant::ALL
            .into_iter()
            .find(|variant| variant.tag() == s)
            .ok_or_else(|| Error::InvalidGraphVariant(s.to_string()))
    }
}

/// A causal graph with directed, bidirected, undirected and circle edges.
///
/// # Examples
///
/// ```
/// use causal_endpoints::{EdgeType, MixedEdgeGraph};
///
/// let mut graph = MixedEdgeGraph::pag();
/// graph.add_edge("x", "y", EdgeType::Directed).unwrap();
/// graph.add_edge("y", "x", EdgeType::Circle).unwrap();
///
/// assert!(graph.has_edge(&"x", &"y", EdgeType::Directed));
/// assert_eq!(
///     graph.edge_types(&"x", &"y"),
///     vec![EdgeType::Directed, EdgeType::Circle]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct MixedEdgeGraph<N> {
    pub(crate) variant: GraphVariant,
    pub(crate) nodes: Vec<N>,
    pub(crate) id_to_index: HashMap<N, usize>,
    // One ordered edge set per `EdgeType`. Symmetric types store (min, max).
    pub(crate) edges: [BTreeSet<(usize, usize)>; 4],
    pub(crate) adjacency: Vec<BTreeSet<usize>>,
}

impl<N> MixedEdgeGraph<N>
where
    N: Clone + Eq + Hash + fmt::Debug,
{
    /// Create an empty graph of the given variant.
    pub fn new(variant: GraphVariant) -> Self {
        Self {
            variant,
            nodes: Vec::new(),
            id_to_index: HashMap::new(),
            edges: Default::default(),
            adjacency: Vec::new(),
        }
    }

    pub fn dag() -> Self {
        Self::new(GraphVariant::Dag)
    }

    pub fn admg() -> Self {
        Self::new(GraphVariant::Admg)
    }

    pub fn cpdag() -> Self {
        Self::new(GraphVariant::Cpdag)
    }

    pub fn pag() -> Self {
        Self::new(GraphVariant::Pag)
    }

    /// Create a graph with the given nodes and no edges.
    pub fn with_nodes(variant: GraphVariant, nodes: impl IntoIterator<Item = N>) -> Self {
        let mut graph = Self::new(variant);
        for node in nodes {
            graph.add_node(node);
        }
        graph
    }

    pub fn variant(&self) -> GraphVariant {
        self.variant
    }

    /// Add a node and return its index. Adding an existing node is a no-op.
    pub fn add_node(&mut self, node: N) -> usize {
        if let Some(&idx) = self.id_to_index.get(&node) {
            return idx;
        }
        let idx = self.nodes.len();
        self.id_to_index.insert(node.clone(), idx);
        self.nodes.push(node);
        self.adjacency.push(BTreeSet::new());
        idx
    }

    /// Add an edge of `edge_type` from `u` to `v`.
    ///
    /// Missing nodes are created. Adding an edge that already exists is a no-op.
    ///
    /// # Errors
    ///
    /// - [`Error::EdgeNotAllowed`] if the graph's variant does not accept `edge_type`
    /// - [`Error::SelfLoop`] if `u == v`
    pub fn add_edge(&mut self, u: N, v: N, edge_type: EdgeType) -> Result<()> {
        if !self.variant.allows(edge_type) {
            return Err(Error::EdgeNotAllowed {
                edge_type,
                variant: self.variant,
            });
        }
        if u == v {
            return Err(Error::SelfLoop(format!("{:?}", u)));
        }

        let udx = self.ensure_node_exists(u);
        let vdx = self.ensure_node_exists(v);
        self.edges[edge_type.slot()].insert(Self::edge_key(udx, vdx, edge_type));
        self.adjacency[udx].insert(vdx);
        self.adjacency[vdx].insert(udx);
        Ok(())
    }

    fn ensure_node_exists(&mut self, node: N) -> usize {
        if !self.id_to_index.contains_key(&node) {
            debug!(node = ?node, "auto-creating node for edge endpoint");
        }
        self.add_node(node)
    }

    #[inline]
    fn edge_key(udx: usize, vdx: usize, edge_type: EdgeType) -> (usize, usize) {
        if edge_type.is_symmetric() && udx > vdx {
            (vdx, udx)
        } else {
            (udx, vdx)
        }
    }

    pub fn nodes(&self) -> &[N] {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn contains_node(&self, node: &N) -> bool {
        self.id_to_index.contains_key(node)
    }

    #[inline]
    pub fn node_index(&self, node: &N) -> Option<usize> {
        self.id_to_index.get(node).copied()
    }

    /// Nodes sharing at least one edge of any type with `node`, in index order.
    pub fn neighbors(&self, node: &N) -> Vec<&N> {
        match self.node_index(node) {
            Some(idx) => self.adjacency[idx]
                .iter()
                .map(|&other| &self.nodes[other])
                .collect(),
            None => Vec::new(),
        }
    }

    /// Check for an edge of `edge_type` from `u` to `v`.
    ///
    /// Symmetric edge types match in either direction.
    pub fn has_edge(&self, u: &N, v: &N, edge_type: EdgeType) -> bool {
        match (self.node_index(u), self.node_index(v)) {
            (Some(udx), Some(vdx)) => self.has_edge_idx(udx, vdx, edge_type),
            _ => false,
        }
    }

    #[inline]
    pub(crate) fn has_edge_idx(&self, udx: usize, vdx: usize, edge_type: EdgeType) -> bool {
        self.edges[edge_type.slot()].contains(&Self::edge_key(udx, vdx, edge_type))
    }

    /// Edge types present between `u` and `v` in either direction, sorted.
    pub fn edge_types(&self, u: &N, v: &N) -> Vec<EdgeType> {
        match (self.node_index(u), self.node_index(v)) {
            (Some(udx), Some(vdx)) => self.edge_types_idx(udx, vdx),
            _ => Vec::new(),
        }
    }

    pub(crate) fn edge_types_idx(&self, udx: usize, vdx: usize) -> Vec<EdgeType> {
        EdgeType::ALL
            .into_iter()
            .filter(|&edge_type| {
                self.has_edge_idx(udx, vdx, edge_type) || self.has_edge_idx(vdx, udx, edge_type)
            })
            .collect()
    }

    /// All edges of `edge_type` as `(from, to)` pairs.
    ///
    /// Symmetric edges are reported once, lower-indexed node first.
    pub fn edges(&self, edge_type: EdgeType) -> Vec<(&N, &N)> {
        self.edges[edge_type.slot()]
            .iter()
            .map(|&(udx, vdx)| (&self.nodes[udx], &self.nodes[vdx]))
            .collect()
    }

    pub fn edge_count(&self, edge_type: EdgeType) -> usize {
        self.edges[edge_type.slot()].len()
    }

    /// Total number of edges across all types.
    pub fn total_edge_count(&self) -> usize {
        self.edges.iter().map(BTreeSet::len).sum()
    }

    /// Convert to a [`GraphVariant::Dag`] graph holding only the directed edges.
    ///
    /// # Errors
    ///
    /// - [`Error::EdgeNotAllowed`] if any non-directed edge is present
    /// - [`Error::Cycle`] if the directed edges form a cycle
    pub fn to_directed(&self) -> Result<Self> {
        if let Some(edge_type) = EdgeType::ALL
            .into_iter()
            .find(|&edge_type| edge_type != EdgeType::Directed && self.edge_count(edge_type) > 0)
        {
            return Err(Error::EdgeNotAllowed {
                edge_type,
                variant: GraphVariant::Dag,
            });
        }
        if let Some(cycle) = self.find_cycle() {
            return Err(Error::Cycle(format!("{:?}", cycle)));
        }

        let mut dag = self.clone();
        dag.variant = GraphVariant::Dag;
        Ok(dag)
    }
}
