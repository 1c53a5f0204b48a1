//! Endpoint-array to graph decoding.
//!
//! The inverse of the encoding in [`super::graph_to_array`]. Only the upper
//! triangle is walked; for each pair `(u, v)` the endpoint at `v` is read from
//! cell `(u, v)` and the endpoint at `u` from cell `(v, u)`.

use core::fmt;
use core::hash::Hash;

use tracing::{debug, trace};

use super::EndpointMatrix;
use super::order::index_of;
use crate::endpoint::Endpoint;
use crate::error::{Error, Result};
use crate::graph::{EdgeType, GraphVariant, MixedEdgeGraph};

/// Decode an endpoint array into a graph of `variant`.
///
/// `arr_idx` names the node of each row/column. A [`GraphVariant::Dag`] is decoded
/// as an ADMG first and then converted with [`MixedEdgeGraph::to_directed`].
///
/// # Errors
///
/// - [`Error::ShapeMismatch`] if `arr_idx` is not as long as the matrix dimension
/// - [`Error::InvalidNodeOrder`] if `arr_idx` repeats a node
/// - [`Error::InvalidEndpointCode`] if any cell holds an unknown code
/// - [`Error::InvalidEndpointPair`] if two codes do not describe an edge set, or the
///   diagonal is not null
/// - [`Error::EdgeNotAllowed`] if a decoded edge is illegal in `variant`
/// - [`Error::Cycle`] if a `dag` has a directed cycle
///
/// # Examples
///
/// ```
/// use causal_endpoints::{array_to_graph, EdgeType, EndpointMatrix, GraphVariant};
///
/// // x -> y
/// let matrix = EndpointMatrix::from_rows(vec![vec![0, 1], vec![-1, 0]]).unwrap();
/// let graph = array_to_graph(&matrix, &["x", "y"], GraphVariant::Admg).unwrap();
///
/// assert!(graph.has_edge(&"x", &"y", EdgeType::Directed));
/// assert_eq!(graph.total_edge_count(), 1);
/// ```
pub fn array_to_graph<N>(
    matrix: &EndpointMatrix,
    arr_idx: &[N],
    variant: GraphVariant,
) -> Result<MixedEdgeGraph<N>>
where
    N: Clone + Eq + Hash + fmt::Debug,
{
    let n = matrix.dim();
    index_of(arr_idx, n)?;
    for code in matrix.unique_codes() {
        Endpoint::from_code(code)?;
    }

    let builder_variant = match variant {
        GraphVariant::Dag => GraphVariant::Admg,
        other => other,
    };
    let mut graph = MixedEdgeGraph::with_nodes(builder_variant, arr_idx.iter().cloned());

    for (idx, node) in arr_idx.iter().enumerate() {
        let endpoint = matrix.endpoint(idx, idx)?;
        if endpoint != Endpoint::Null {
            return Err(invalid_pair(node, node, endpoint, endpoint));
        }
    }

    for udx in 0..n {
        for vdx in udx + 1..n {
            let at_v = matrix.endpoint(udx, vdx)?;
            let at_u = matrix.endpoint(vdx, udx)?;
            let (u, v) = (&arr_idx[udx], &arr_idx[vdx]);

            let edges = decode_pair(at_u, at_v).ok_or_else(|| invalid_pair(u, v, at_u, at_v))?;
            for &(forward, edge_type) in edges {
                trace!(?u, ?v, forward, %edge_type, "decoded edge");
                // Checked against the requested variant, not the builder's.
                if !variant.allows(edge_type) {
                    return Err(Error::EdgeNotAllowed { edge_type, variant });
                }
                if forward {
                    graph.add_edge(u.clone(), v.clone(), edge_type)?;
                } else {
                    graph.add_edge(v.clone(), u.clone(), edge_type)?;
                }
            }
        }
    }

    debug!(
        nodes = n,
        edges = graph.total_edge_count(),
        %variant,
        "decoded endpoint array"
    );
    match variant {
        GraphVariant::Dag => graph.to_directed(),
        _ => Ok(graph),
    }
}

/// Edges encoded by the endpoints at `u` and at `v`, as `(u -> v?, type)`.
///
/// `None` when the two endpoints do not form a valid pair.
fn decode_pair(at_u: Endpoint, at_v: Endpoint) -> Option<&'static [(bool, EdgeType)]> {
    use Endpoint::{Arrow, ArrowAndArrow, Circle, Null, Tail, TailAndArrow, TailAndTail};

    const FORWARD: bool = true;
    const BACKWARD: bool = false;

    let edges: &'static [(bool, EdgeType)] = match (at_u, at_v) {
        (Null, Null) => &[],

        // u -> v and u <-> v
        (TailAndArrow, ArrowAndArrow) => &[
            (FORWARD, EdgeType::Directed),
            (FORWARD, EdgeType::Bidirected),
        ],
        // u <- v and u <-> v
        (ArrowAndArrow, TailAndArrow) => &[
            (BACKWARD, EdgeType::Directed),
            (FORWARD, EdgeType::Bidirected),
        ],
        // u -> v and u -- v
        (TailAndTail, TailAndArrow) => &[
            (FORWARD, EdgeType::Directed),
            (FORWARD, EdgeType::Undirected),
        ],
        // u <- v and u -- v
        (TailAndArrow, TailAndTail) => &[
            (BACKWARD, EdgeType::Directed),
            (FORWARD, EdgeType::Undirected),
        ],
        // u <-> v and u -- v
        (TailAndArrow, TailAndArrow) => &[
            (FORWARD, EdgeType::Bidirected),
            (FORWARD, EdgeType::Undirected),
        ],
        (TailAndArrow | ArrowAndArrow | TailAndTail, _)
        | (_, TailAndArrow | ArrowAndArrow | TailAndTail) => return None,

        (Null, _) | (_, Null) => return None,

        (Arrow, Arrow) => &[(FORWARD, EdgeType::Bidirected)],
        (Tail, Arrow) => &[(FORWARD, EdgeType::Directed)],
        (Arrow, Tail) => &[(BACKWARD, EdgeType::Directed)],
        (Tail, Tail) => &[(FORWARD, EdgeType::Undirected)],

        // With a circle each side is read on its own: the mark at v comes from
        // an edge u -> v, the mark at u from an edge v -> u.
        (Circle, Circle) => &[(FORWARD, EdgeType::Circle), (BACKWARD, EdgeType::Circle)],
        (Circle, Arrow) => &[(BACKWARD, EdgeType::Circle), (FORWARD, EdgeType::Directed)],
        (Arrow, Circle) => &[(FORWARD, EdgeType::Circle), (BACKWARD, EdgeType::Directed)],
        (Circle, Tail) => &[(BACKWARD, EdgeType::Circle), (FORWARD, EdgeType::Undirected)],
        (Tail, Circle) => &[(FORWARD, EdgeType::Circle), (FORWARD, EdgeType::Undirected)],
    };
    Some(edges)
}

fn invalid_pair<N: fmt::Debug>(u: &N, v: &N, at_u: Endpoint, at_v: Endpoint) -> Error {
    Error::InvalidEndpointPair {
        u: format!("{:?}", u),
        v: format!("{:?}", v),
        at_u,
        at_v,
    }
}
