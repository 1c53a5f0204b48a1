//! Dense endpoint arrays in the causal-learn layout.
//!
//! An [`EndpointMatrix`] is an `n x n` grid of [`Endpoint`](crate::Endpoint)
//! codes paired with a node order naming its rows and columns. Cell `(i, j)`
//! holds the endpoint at node `j` on the edge between nodes `i` and `j`, so a
//! directed edge `i -> j` is stored as `(i, j) = ARROW` and `(j, i) = TAIL`.
//!
//! - [`graph_to_array`] / [`graph_to_array_ordered`] encode a graph
//! - [`array_to_graph`] decodes an array back into a graph of a chosen variant
//! - [`EndpointMatrix::reorder`] permutes rows and columns to a new node order

mod export;
mod import;
mod order;

pub use export::{graph_to_array, graph_to_array_ordered};
pub use import::array_to_graph;

use crate::endpoint::Endpoint;
use crate::error::{Error, Result};

/// Square matrix of raw endpoint codes, stored row-major.
///
/// Values are kept as plain integers so that arrays produced elsewhere can be
/// loaded first and validated when decoded.
///
/// # Examples
///
/// ```
/// use causal_endpoints::{Endpoint, EndpointMatrix};
///
/// let matrix = EndpointMatrix::from_rows(vec![vec![0, 1], vec![-1, 0]]).unwrap();
/// assert_eq!(matrix.get(0, 1), 1);
/// assert_eq!(matrix.endpoint(1, 0).unwrap(), Endpoint::Tail);
///
/// assert!(EndpointMatrix::from_rows(vec![vec![0, 1, 0], vec![-1, 0, 0]]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<Vec<i32>>", into = "Vec<Vec<i32>>")
)]
pub struct EndpointMatrix {
    n: usize,
    data: Vec<i32>,
}

impl EndpointMatrix {
    /// An `n x n` matrix with no edges.
    pub fn zeros(n: usize) -> Self {
        Self {
            n,
            data: vec![Endpoint::Null.code(); n * n],
        }
    }

    /// Build a matrix from rows.
    ///
    /// # Errors
    ///
    /// [`Error::ShapeMismatch`] unless every row is as long as there are rows.
    pub fn from_rows(rows: Vec<Vec<i32>>) -> Result<Self> {
        let n = rows.len();
        let mut data = Vec::with_capacity(n * n);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != n {
                return Err(Error::shape(
                    format!("square array with {} columns in row {}", n, i),
                    format!("{} columns", row.len()),
                ));
            }
            data.extend(row);
        }
        Ok(Self { n, data })
    }

    /// Number of rows (and columns).
    pub fn dim(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> i32 {
        self.data[row * self.n + col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, code: i32) {
        self.data[row * self.n + col] = code;
    }

    /// Cell `(row, col)` parsed as an [`Endpoint`].
    pub fn endpoint(&self, row: usize, col: usize) -> Result<Endpoint> {
        Endpoint::from_code(self.get(row, col))
    }

    pub(crate) fn set_endpoint(&mut self, row: usize, col: usize, endpoint: Endpoint) {
        self.set(row, col, endpoint.code());
    }

    pub fn row(&self, row: usize) -> &[i32] {
        &self.data[row * self.n..(row + 1) * self.n]
    }

    pub fn to_rows(&self) -> Vec<Vec<i32>> {
        (0..self.n).map(|row| self.row(row).to_vec()).collect()
    }

    /// Distinct values in the matrix, ascending.
    pub fn unique_codes(&self) -> Vec<i32> {
        let mut codes = self.data.clone();
        codes.sort_unstable();
        codes.dedup();
        codes
    }
}

impl TryFrom<Vec<Vec<i32>>> for EndpointMatrix {
    type Error = Error;

    fn try_from(rows: Vec<Vec<i32>>) -> Result<Self> {
        EndpointMatrix::from_rows(rows)
    }
}

impl From<EndpointMatrix> for Vec<Vec<i32>> {
    fn from(matrix: EndpointMatrix) -> Self {
        matrix.to_rows()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{EdgeType, GraphVariant, MixedEdgeGraph};
    use proptest::prelude::*;

    #[test]
    fn test_zeros() {
        let matrix = EndpointMatrix::zeros(3);
        assert_eq!(matrix.dim(), 3);
        assert_eq!(matrix.unique_codes(), vec![0]);
    }

    #[test]
    fn test_rows_round_trip() {
        let rows = vec![vec![0, 1, 0], vec![-1, 0, 2], vec![0, 2, 0]];
        let matrix = EndpointMatrix::from_rows(rows.clone()).unwrap();

        assert_eq!(matrix.row(1), &[-1, 0, 2]);
        assert_eq!(matrix.to_rows(), rows);
        assert_eq!(matrix.unique_codes(), vec![-1, 0, 1, 2]);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let err = EndpointMatrix::from_rows(vec![vec![0, 1], vec![0]]).unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { .. }));
    }

    #[test]
    fn test_empty_matrix() {
        let matrix = EndpointMatrix::from_rows(Vec::new()).unwrap();
        assert_eq!(matrix.dim(), 0);
        assert!(matrix.unique_codes().is_empty());
    }

    #[test]
    fn test_directed_edge_scenario() {
        let mut graph = MixedEdgeGraph::admg();
        graph.add_edge("u", "v", EdgeType::Directed).unwrap();

        let (matrix, order) = graph_to_array(&graph).unwrap();
        assert_eq!(matrix.endpoint(0, 1).unwrap(), Endpoint::Arrow);
        assert_eq!(matrix.endpoint(1, 0).unwrap(), Endpoint::Tail);

        let decoded = array_to_graph(&matrix, &order, GraphVariant::Admg).unwrap();
        assert_eq!(decoded.edges(EdgeType::Directed), vec![(&"u", &"v")]);
        assert_eq!(decoded.total_edge_count(), 1);
    }

    #[test]
    fn test_bidirected_edge_scenario() {
        let mut graph = MixedEdgeGraph::admg();
        graph.add_edge("u", "v", EdgeType::Bidirected).unwrap();

        let (matrix, order) = graph_to_array(&graph).unwrap();
        assert_eq!(matrix.to_rows(), vec![vec![0, 1], vec![1, 0]]);

        let decoded = array_to_graph(&matrix, &order, GraphVariant::Admg).unwrap();
        assert!(decoded.has_edge(&"v", &"u", EdgeType::Bidirected));
        assert_eq!(decoded.total_edge_count(), 1);
    }

    #[test]
    fn test_reordered_export_decodes_to_same_graph() {
        let mut graph = MixedEdgeGraph::pag();
        graph.add_edge("a", "b", EdgeType::Directed).unwrap();
        graph.add_edge("b", "a", EdgeType::Circle).unwrap();
        graph.add_edge("c", "b", EdgeType::Undirected).unwrap();
        graph.add_edge("c", "a", EdgeType::Bidirected).unwrap();

        let (matrix, order) =
            graph_to_array_ordered(&graph, Some(&["c", "a", "b"][..])).unwrap();
        let decoded = array_to_graph(&matrix, &order, GraphVariant::Pag).unwrap();

        for u in graph.nodes() {
            for v in graph.nodes() {
                for edge_type in EdgeType::ALL {
                    assert_eq!(
                        decoded.has_edge(u, v, edge_type),
                        graph.has_edge(u, v, edge_type),
                        "{} {} {}",
                        u,
                        v,
                        edge_type
                    );
                }
            }
        }
    }

    /// Endpoint pairs `(at u, at v)` each variant can hold between `u < v`.
    fn legal_pairs(variant: GraphVariant) -> Vec<(Endpoint, Endpoint)> {
        use Endpoint::*;

        let mut pairs = vec![(Null, Null), (Tail, Arrow)];
        if variant == GraphVariant::Dag {
            // Pointing from lower to higher index keeps the graph acyclic.
            return pairs;
        }
        pairs.extend([(Arrow, Tail), (Tail, Tail)]);
        if variant == GraphVariant::Cpdag {
            return pairs;
        }
        pairs.extend([
            (Arrow, Arrow),
            (TailAndArrow, ArrowAndArrow),
            (ArrowAndArrow, TailAndArrow),
            (TailAndTail, TailAndArrow),
            (TailAndArrow, TailAndTail),
            (TailAndArrow, TailAndArrow),
        ]);
        if variant == GraphVariant::Pag {
            pairs.extend([
                (Circle, Circle),
                (Circle, Arrow),
                (Arrow, Circle),
                (Circle, Tail),
                (Tail, Circle),
            ]);
        }
        pairs
    }

    fn build_matrix(n: usize, pairs: &[(Endpoint, Endpoint)], picks: &[usize]) -> EndpointMatrix {
        let mut matrix = EndpointMatrix::zeros(n);
        let mut picks = picks.iter();
        for u in 0..n {
            for v in u + 1..n {
                let (at_u, at_v) = pairs[picks.next().copied().unwrap_or(0) % pairs.len()];
                matrix.set_endpoint(u, v, at_v);
                matrix.set_endpoint(v, u, at_u);
            }
        }
        matrix
    }

    fn check_array_round_trip(variant: GraphVariant, n: usize, picks: &[usize]) {
        let matrix = build_matrix(n, &legal_pairs(variant), picks);
        let order: Vec<usize> = (0..n).collect();

        let graph = array_to_graph(&matrix, &order, variant).unwrap();
        assert_eq!(graph.variant(), variant);

        let (encoded, encoded_order) = graph_to_array(&graph).unwrap();
        assert_eq!(encoded_order, order);
        assert_eq!(encoded, matrix);
    }

    /// Edge sets `(u -> v?, type)` a PAG pair can hold and encode losslessly.
    const PAIR_EDGES: &[&[(bool, EdgeType)]] = &[
        &[],
        &[(true, EdgeType::Directed)],
        &[(false, EdgeType::Directed)],
        &[(true, EdgeType::Bidirected)],
        &[(true, EdgeType::Undirected)],
        &[(true, EdgeType::Circle), (false, EdgeType::Circle)],
        &[(true, EdgeType::Directed), (true, EdgeType::Bidirected)],
        &[(false, EdgeType::Directed), (true, EdgeType::Bidirected)],
        &[(true, EdgeType::Directed), (true, EdgeType::Undirected)],
        &[(false, EdgeType::Directed), (false, EdgeType::Undirected)],
        &[(true, EdgeType::Bidirected), (true, EdgeType::Undirected)],
        &[(true, EdgeType::Directed), (false, EdgeType::Circle)],
        &[(false, EdgeType::Directed), (true, EdgeType::Circle)],
        &[(true, EdgeType::Undirected), (true, EdgeType::Circle)],
        &[(true, EdgeType::Undirected), (false, EdgeType::Circle)],
    ];

    fn build_graph(n: usize, picks: &[usize]) -> MixedEdgeGraph<usize> {
        let mut graph = MixedEdgeGraph::with_nodes(GraphVariant::Pag, 0..n);
        let mut picks = picks.iter();
        for u in 0..n {
            for v in u + 1..n {
                let edges = PAIR_EDGES[picks.next().copied().unwrap_or(0) % PAIR_EDGES.len()];
                for &(forward, edge_type) in edges {
                    let (from, to) = if forward { (u, v) } else { (v, u) };
                    graph.add_edge(from, to, edge_type).unwrap();
                }
            }
        }
        graph
    }

    fn picks_strategy() -> impl Strategy<Value = (usize, Vec<usize>)> {
        (0usize..7).prop_flat_map(|n| (Just(n), prop::collection::vec(0usize..64, n * n)))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_array_round_trip_dag((n, picks) in picks_strategy()) {
            check_array_round_trip(GraphVariant::Dag, n, &picks);
        }

        #[test]
        fn prop_array_round_trip_cpdag((n, picks) in picks_strategy()) {
            check_array_round_trip(GraphVariant::Cpdag, n, &picks);
        }

        #[test]
        fn prop_array_round_trip_admg((n, picks) in picks_strategy()) {
            check_array_round_trip(GraphVariant::Admg, n, &picks);
        }

        #[test]
        fn prop_array_round_trip_pag((n, picks) in picks_strategy()) {
            check_array_round_trip(GraphVariant::Pag, n, &picks);
        }

        #[test]
        fn prop_graph_round_trip((n, picks) in picks_strategy()) {
            let graph = build_graph(n, &picks);
            let (matrix, order) = graph_to_array(&graph).unwrap();
            let decoded = array_to_graph(&matrix, &order, GraphVariant::Pag).unwrap();

            prop_assert_eq!(decoded.nodes(), graph.nodes());
            for edge_type in EdgeType::ALL {
                prop_assert_eq!(decoded.edges(edge_type), graph.edges(edge_type));
            }
        }

        #[test]
        fn prop_nonzero_cells_mark_adjacency((n, picks) in picks_strategy()) {
            let graph = build_graph(n, &picks);
            let (matrix, order) = graph_to_array(&graph).unwrap();

            for i in 0..n {
                prop_assert_eq!(matrix.get(i, i), 0);
                for j in 0..n {
                    if i == j {
                        continue;
                    }
                    let adjacent = !graph.edge_types(&order[i], &order[j]).is_empty();
                    prop_assert_eq!(matrix.get(i, j) != 0, adjacent);
                    prop_assert_eq!(matrix.get(j, i) != 0, adjacent);
                }
            }
        }

        #[test]
        fn prop_reorder_keeps_pair_semantics((n, picks) in picks_strategy(), seed in any::<u64>()) {
            let graph = build_graph(n, &picks);
            let (matrix, order) = graph_to_array(&graph).unwrap();

            // Rotate the order by a seed-dependent amount, then reverse it.
            let mut target = order.clone();
            if n > 0 {
                target.rotate_left((seed as usize) % n);
            }
            target.reverse();
            let reordered = matrix.reorder(&order, &target).unwrap();

            for (i, u) in target.iter().enumerate() {
                for (j, v) in target.iter().enumerate() {
                    prop_assert_eq!(reordered.get(i, j), matrix.get(*u, *v));
                }
            }
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_checks_shape() {
        let matrix: EndpointMatrix = serde_json::from_str("[[0,1],[-1,0]]").unwrap();
        assert_eq!(matrix.get(0, 1), 1);
        assert_eq!(serde_json::to_string(&matrix).unwrap(), "[[0,1],[-1,0]]");

        assert!(serde_json::from_str::<EndpointMatrix>("[[0,1,0],[-1,0,0]]").is_err());
    }
}
