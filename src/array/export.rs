//! Graph to endpoint-array encoding.
//!
//! Each adjacent pair `(u, v)` is reduced to the pair of endpoints it shows at
//! `u` and at `v`. One edge type maps to simple endpoints; two edge types share
//! a pair through the compound codes:
//!
//! | Edges            | at `u`           | at `v`            |
//! |------------------|------------------|-------------------|
//! | `u -> v`         | tail             | arrow             |
//! | `u <-> v`        | arrow            | arrow             |
//! | `u -- v`         | tail             | tail              |
//! | `u o-o v`        | circle           | circle            |
//! | `u -> v`, `u <-> v` | tail-and-arrow | arrow-and-arrow  |
//! | `u -> v`, `u -- v`  | tail-and-tail  | tail-and-arrow   |
//! | `u <-> v`, `u -- v` | tail-and-arrow | tail-and-arrow   |
//! | `u o-> v`        | circle           | arrow             |
//! | `u o-- v`        | circle           | tail              |
//!
//! Causal-learn has no "tail and tail" endpoint; it is added here so a directed
//! edge can coexist with an undirected one. Three edge types on one pair cannot
//! be encoded.

use core::fmt;
use core::hash::Hash;

use tracing::{debug, trace};

use super::EndpointMatrix;
use crate::endpoint::Endpoint;
use crate::error::{Error, Result};
use crate::graph::{EdgeType, MixedEdgeGraph};

/// Encode `graph` as an endpoint array.
///
/// Rows and columns follow the graph's node insertion order, which is returned
/// alongside the matrix.
///
/// # Errors
///
/// [`Error::UnsupportedEdgeSet`] if a pair carries more than two edge types or
/// a combination with no endpoint encoding.
///
/// # Examples
///
/// ```
/// use causal_endpoints::{graph_to_array, EdgeType, Endpoint, MixedEdgeGraph};
///
/// let mut graph = MixedEdgeGraph::admg();
/// graph.add_edge("x", "y", EdgeType::Directed).unwrap();
///
/// let (matrix, order) = graph_to_array(&graph).unwrap();
/// assert_eq!(order, vec!["x", "y"]);
/// assert_eq!(matrix.endpoint(0, 1).unwrap(), Endpoint::Arrow);
/// assert_eq!(matrix.endpoint(1, 0).unwrap(), Endpoint::Tail);
/// ```
pub fn graph_to_array<N>(graph: &MixedEdgeGraph<N>) -> Result<(EndpointMatrix, Vec<N>)>
where
    N: Clone + Eq + Hash + fmt::Debug,
{
    let n = graph.node_count();
    let mut matrix = EndpointMatrix::zeros(n);

    for udx in 0..n {
        for &vdx in graph.adjacency[udx].range(udx + 1..) {
            let (at_u, at_v) = pair_endpoints(graph, udx, vdx)?;
            trace!(
                u = ?graph.nodes[udx],
                v = ?graph.nodes[vdx],
                %at_u,
                %at_v,
                "encoded pair"
            );
            matrix.set_endpoint(udx, vdx, at_v);
            matrix.set_endpoint(vdx, udx, at_u);
        }
    }

    debug!(
        nodes = n,
        edges = graph.total_edge_count(),
        variant = %graph.variant(),
        "encoded graph as endpoint array"
    );
    Ok((matrix, graph.nodes().to_vec()))
}

/// Encode `graph`, optionally permuting the result into `node_order`.
///
/// # Errors
///
/// Everything [`graph_to_array`] reports, plus the node order errors of
/// [`EndpointMatrix::reorder`].
///
/// # Examples
///
/// ```
/// use causal_endpoints::{graph_to_array_ordered, EdgeType, MixedEdgeGraph};
///
/// let mut graph = MixedEdgeGraph::admg();
/// graph.add_edge("x", "y", EdgeType::Directed).unwrap();
///
/// let (matrix, order) = graph_to_array_ordered(&graph, Some(&["y", "x"][..])).unwrap();
/// assert_eq!(order, vec!["y", "x"]);
/// assert_eq!(matrix.to_rows(), vec![vec![0, -1], vec![1, 0]]);
/// ```
pub fn graph_to_array_ordered<N>(
    graph: &MixedEdgeGraph<N>,
    node_order: Option<&[N]>,
) -> Result<(EndpointMatrix, Vec<N>)>
where
    N: Clone + Eq + Hash + fmt::Debug,
{
    let (matrix, arr_idx) = graph_to_array(graph)?;
    match node_order {
        Some(order) => Ok((matrix.reorder(&arr_idx, order)?, order.to_vec())),
        None => Ok((matrix, arr_idx)),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Orientation {
    /// `u -> v`
    Forward,
    /// `u <- v`
    Backward,
}

/// Endpoints at `u` and at `v` for the edges between them.
fn pair_endpoints<N>(graph: &MixedEdgeGraph<N>, udx: usize, vdx: usize) -> Result<(Endpoint, Endpoint)>
where
    N: Clone + Eq + Hash + fmt::Debug,
{
    use Orientation::{Backward, Forward};

    let orient = |edge_type| orientation(graph, udx, vdx, edge_type);
    let types = graph.edge_types_idx(udx, vdx);

    let endpoints = match types.as_slice() {
        [EdgeType::Directed] => match orient(EdgeType::Directed)? {
            Forward => (Endpoint::Tail, Endpoint::Arrow),
            Backward => (Endpoint::Arrow, Endpoint::Tail),
        },
        [EdgeType::Bidirected] => (Endpoint::Arrow, Endpoint::Arrow),
        [EdgeType::Undirected] => (Endpoint::Tail, Endpoint::Tail),
        // A lone circle edge still reads as `o-o`.
        [EdgeType::Circle] => (Endpoint::Circle, Endpoint::Circle),
        [EdgeType::Directed, EdgeType::Bidirected] => match orient(EdgeType::Directed)? {
            Forward => (Endpoint::TailAndArrow, Endpoint::ArrowAndArrow),
            Backward => (Endpoint::ArrowAndArrow, Endpoint::TailAndArrow),
        },
        [EdgeType::Directed, EdgeType::Undirected] => match orient(EdgeType::Directed)? {
            Forward => (Endpoint::TailAndTail, Endpoint::TailAndArrow),
            Backward => (Endpoint::TailAndArrow, Endpoint::TailAndTail),
        },
        [EdgeType::Bidirected, EdgeType::Undirected] => {
            (Endpoint::TailAndArrow, Endpoint::TailAndArrow)
        }
        // The circle mark sits at the circle edge's head, the arrowhead at the
        // directed edge's head; the two must be at opposite nodes.
        [EdgeType::Directed, EdgeType::Circle] => {
            match (orient(EdgeType::Directed)?, orient(EdgeType::Circle)?) {
                (Forward, Backward) => (Endpoint::Circle, Endpoint::Arrow),
                (Backward, Forward) => (Endpoint::Arrow, Endpoint::Circle),
                _ => {
                    return Err(unsupported(
                        graph,
                        udx,
                        vdx,
                        "a directed and a circle edge pointing at the same node",
                    ));
                }
            }
        }
        [EdgeType::Undirected, EdgeType::Circle] => match orient(EdgeType::Circle)? {
            Forward => (Endpoint::Tail, Endpoint::Circle),
            Backward => (Endpoint::Circle, Endpoint::Tail),
        },
        [EdgeType::Bidirected, EdgeType::Circle] => {
            return Err(unsupported(
                graph,
                udx,
                vdx,
                "bidirected and circle edges have no shared endpoint encoding",
            ));
        }
        _ => {
            return Err(unsupported(
                graph,
                udx,
                vdx,
                &format!(
                    "{} edge types ({:?}), at most two are supported",
                    types.len(),
                    types
                ),
            ));
        }
    };
    Ok(endpoints)
}

/// Direction of the single `edge_type` edge between `u` and `v`.
fn orientation<N>(
    graph: &MixedEdgeGraph<N>,
    udx: usize,
    vdx: usize,
    edge_type: EdgeType,
) -> Result<Orientation>
where
    N: Clone + Eq + Hash + fmt::Debug,
{
    match (
        graph.has_edge_idx(udx, vdx, edge_type),
        graph.has_edge_idx(vdx, udx, edge_type),
    ) {
        (true, false) => Ok(Orientation::Forward),
        (false, true) => Ok(Orientation::Backward),
        _ => Err(unsupported(
            graph,
            udx,
            vdx,
            &format!("{} edges in both directions", edge_type),
        )),
    }
}

fn unsupported<N>(graph: &MixedEdgeGraph<N>, udx: usize, vdx: usize, reason: &str) -> Error
where
    N: fmt::Debug,
{
    Error::UnsupportedEdgeSet(format!(
        "{:?} and {:?}: {}",
        graph.nodes[udx], graph.nodes[vdx], reason
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(graph: &MixedEdgeGraph<&'static str>) -> Vec<Vec<i32>> {
        graph_to_array(graph).unwrap().0.to_rows()
    }

    const T: i32 = -1;
    const A: i32 = 1;
    const C: i32 = 2;
    const TA: i32 = 4;
    const AA: i32 = 5;
    const TT: i32 = 6;

    #[test]
    fn test_directed_edge() {
        let mut graph = MixedEdgeGraph::admg();
        graph.add_edge("u", "v", EdgeType::Directed).unwrap();
        assert_eq!(encode(&graph), vec![vec![0, A], vec![T, 0]]);

        let mut graph = MixedEdgeGraph::admg();
        graph.add_node("u");
        graph.add_edge("v", "u", EdgeType::Directed).unwrap();
        assert_eq!(encode(&graph), vec![vec![0, T], vec![A, 0]]);
    }

    #[test]
    fn test_single_symmetric_edges() {
        let mut graph = MixedEdgeGraph::pag();
        graph.add_edge("a", "b", EdgeType::Bidirected).unwrap();
        graph.add_edge("b", "c", EdgeType::Undirected).unwrap();
        graph.add_edge("c", "a", EdgeType::Circle).unwrap();
        graph.add_edge("a", "c", EdgeType::Circle).unwrap();

        assert_eq!(
            encode(&graph),
            vec![vec![0, A, C], vec![A, 0, T], vec![C, T, 0]]
        );
    }

    #[test]
    fn test_directed_with_bidirected() {
        let mut graph = MixedEdgeGraph::admg();
        graph.add_edge("u", "v", EdgeType::Directed).unwrap();
        graph.add_edge("u", "v", EdgeType::Bidirected).unwrap();
        // at u: tail-and-arrow, at v: arrow-and-arrow
        assert_eq!(encode(&graph), vec![vec![0, AA], vec![TA, 0]]);

        let mut graph = MixedEdgeGraph::admg();
        graph.add_node("u");
        graph.add_edge("v", "u", EdgeType::Directed).unwrap();
        graph.add_edge("u", "v", EdgeType::Bidirected).unwrap();
        assert_eq!(encode(&graph), vec![vec![0, TA], vec![AA, 0]]);
    }

    #[test]
    fn test_directed_with_undirected() {
        let mut graph = MixedEdgeGraph::admg();
        graph.add_edge("u", "v", EdgeType::Directed).unwrap();
        graph.add_edge("v", "u", EdgeType::Undirected).unwrap();
        // at u: tail-and-tail, at v: tail-and-arrow
        assert_eq!(encode(&graph), vec![vec![0, TA], vec![TT, 0]]);
    }

    #[test]
    fn test_bidirected_with_undirected() {
        let mut graph = MixedEdgeGraph::admg();
        graph.add_edge("u", "v", EdgeType::Bidirected).unwrap();
        graph.add_edge("u", "v", EdgeType::Undirected).unwrap();
        assert_eq!(encode(&graph), vec![vec![0, TA], vec![TA, 0]]);
    }

    #[test]
    fn test_circle_with_directed() {
        // u o-> v
        let mut graph = MixedEdgeGraph::pag();
        graph.add_edge("u", "v", EdgeType::Directed).unwrap();
        graph.add_edge("v", "u", EdgeType::Circle).unwrap();
        assert_eq!(encode(&graph), vec![vec![0, A], vec![C, 0]]);

        // u <-o v
        let mut graph = MixedEdgeGraph::pag();
        graph.add_node("u");
        graph.add_edge("v", "u", EdgeType::Directed).unwrap();
        graph.add_edge("u", "v", EdgeType::Circle).unwrap();
        assert_eq!(encode(&graph), vec![vec![0, C], vec![A, 0]]);
    }

    #[test]
    fn test_circle_with_undirected() {
        // u --o v
        let mut graph = MixedEdgeGraph::pag();
        graph.add_edge("u", "v", EdgeType::Undirected).unwrap();
        graph.add_edge("u", "v", EdgeType::Circle).unwrap();
        assert_eq!(encode(&graph), vec![vec![0, C], vec![T, 0]]);
    }

    #[test]
    fn test_three_edge_types_rejected() {
        let mut graph = MixedEdgeGraph::admg();
        graph.add_edge("u", "v", EdgeType::Directed).unwrap();
        graph.add_edge("u", "v", EdgeType::Bidirected).unwrap();
        graph.add_edge("u", "v", EdgeType::Undirected).unwrap();

        assert!(matches!(
            graph_to_array(&graph),
            Err(Error::UnsupportedEdgeSet(_))
        ));
    }

    #[test]
    fn test_unencodable_pairs_rejected() {
        let mut two_cycle = MixedEdgeGraph::admg();
        two_cycle.add_edge("u", "v", EdgeType::Directed).unwrap();
        two_cycle.add_edge("v", "u", EdgeType::Directed).unwrap();

        let mut same_head = MixedEdgeGraph::pag();
        same_head.add_edge("u", "v", EdgeType::Directed).unwrap();
        same_head.add_edge("u", "v", EdgeType::Circle).unwrap();

        let mut bidirected_circle = MixedEdgeGraph::pag();
        bidirected_circle.add_edge("u", "v", EdgeType::Bidirected).unwrap();
        bidirected_circle.add_edge("u", "v", EdgeType::Circle).unwrap();

        let mut undirected_two_circles = MixedEdgeGraph::pag();
        undirected_two_circles.add_edge("u", "v", EdgeType::Undirected).unwrap();
        undirected_two_circles.add_edge("u", "v", EdgeType::Circle).unwrap();
        undirected_two_circles.add_edge("v", "u", EdgeType::Circle).unwrap();

        for graph in [two_cycle, same_head, bidirected_circle, undirected_two_circles] {
            assert!(matches!(
                graph_to_array(&graph),
                Err(Error::UnsupportedEdgeSet(_))
            ));
        }
    }

    #[test]
    fn test_edgeless_pairs_stay_null() {
        let mut graph = MixedEdgeGraph::cpdag();
        graph.add_node("a");
        graph.add_edge("b", "c", EdgeType::Undirected).unwrap();

        let (matrix, order) = graph_to_array(&graph).unwrap();
        assert_eq!(order, vec!["a", "b", "c"]);
        assert_eq!(matrix.row(0), &[0, 0, 0]);
        assert_eq!(matrix.get(1, 2), T);
        assert_eq!(matrix.get(2, 1), T);
    }

    #[test]
    fn test_ordered_export() {
        let mut graph = MixedEdgeGraph::admg();
        graph.add_edge("a", "b", EdgeType::Directed).unwrap();
        graph.add_edge("b", "c", EdgeType::Bidirected).unwrap();

        let order = ["c", "b", "a"];
        let (matrix, arr_idx) = graph_to_array_ordered(&graph, Some(&order[..])).unwrap();
        assert_eq!(arr_idx, vec!["c", "b", "a"]);
        // a -> b: arrow at b in (a, b), tail at a in (b, a)
        assert_eq!(matrix.get(2, 1), A);
        assert_eq!(matrix.get(1, 2), T);
        assert_eq!(matrix.get(0, 1), A);
        assert_eq!(matrix.get(1, 0), A);

        let (_, default_order) = graph_to_array_ordered(&graph, None).unwrap();
        assert_eq!(default_order, vec!["a", "b", "c"]);

        assert!(graph_to_array_ordered(&graph, Some(&["a", "b"][..])).is_err());
    }
}
