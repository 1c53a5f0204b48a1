//! # causal-endpoints
//!
//! Convert mixed-edge causal graphs to and from the dense endpoint arrays used
//! by `causal-learn`.
//!
//! ## Features
//!
//! - **Four edge types**: directed, bidirected, undirected and circle-marked edges
//! - **Four graph variants**: DAG, ADMG, CPDAG and PAG, each checking its edge types
//! - **Two edges per pair**: overlaid edges use compound endpoint codes
//! - **DOT output**: draw any graph for Graphviz, with optional pinned positions
//!
//! ## Quick Start
//!
//! ```rust
//! use causal_endpoints::{array_to_graph, graph_to_array, EdgeType, GraphVariant, MixedEdgeGraph};
//!
//! let mut graph = MixedEdgeGraph::pag();
//! graph.add_edge("x", "y", EdgeType::Directed).unwrap();
//! graph.add_edge("y", "x", EdgeType::Circle).unwrap(); // x o-> y
//! graph.add_edge("y", "z", EdgeType::Bidirected).unwrap();
//!
//! let (matrix, order) = graph_to_array(&graph).unwrap();
//! assert_eq!(matrix.to_rows(), vec![vec![0, 1, 0], vec![2, 0, 1], vec![0, 1, 0]]);
//!
//! let decoded = array_to_graph(&matrix, &order, GraphVariant::Pag).unwrap();
//! assert!(decoded.has_edge(&"x", &"y", EdgeType::Directed));
//! assert!(decoded.has_edge(&"y", &"x", EdgeType::Circle));
//! assert!(decoded.has_edge(&"z", &"y", EdgeType::Bidirected));
//! ```
//!
//! ## Variant tags
//!
//! ```rust
//! use causal_endpoints::{array_to_graph, EndpointMatrix, Error, GraphVariant};
//!
//! let variant: GraphVariant = "cpdag".parse().unwrap();
//! let matrix = EndpointMatrix::from_rows(vec![vec![0, -1], vec![-1, 0]]).unwrap();
//! let graph = array_to_graph(&matrix, &["a", "b"], variant).unwrap();
//! assert_eq!(graph.total_edge_count(), 1);
//!
//! assert!(matches!("mag".parse::<GraphVariant>(), Err(Error::InvalidGraphVariant(_))));
//! ```

pub mod array;
pub mod cycles;
pub mod endpoint;
pub mod error;
pub mod graph;
pub mod render;

pub use array::{EndpointMatrix, array_to_graph, graph_to_array, graph_to_array_ordered};
pub use endpoint::Endpoint;
pub use error::{Error, Result};
pub use graph::{EdgeType, GraphVariant, MixedEdgeGraph};
