//! Error types for graph/array conversion.
//!
//! Every failure is an input-contract violation detected synchronously; nothing
//! here is transient or retryable.

use thiserror::Error;

use crate::endpoint::Endpoint;
use crate::graph::{EdgeType, GraphVariant};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// More than two edge types between a pair, an edge combination with no
    /// endpoint encoding, or an unrecognized edge type label.
    #[error("Unsupported edge set: {0}")]
    UnsupportedEdgeSet(String),

    #[error("Shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch { expected: String, actual: String },

    #[error("Invalid endpoint code: {0}")]
    InvalidEndpointCode(i32),

    #[error("Unrecognized graph variant '{0}', expected one of 'dag', 'admg', 'cpdag', 'pag'")]
    InvalidGraphVariant(String),

    /// Two individually valid codes that do not describe any edge set together.
    #[error("Invalid endpoint pair between {u} and {v}: {at_u} at {u}, {at_v} at {v}")]
    InvalidEndpointPair {
        u: String,
        v: String,
        at_u: Endpoint,
        at_v: Endpoint,
    },

    #[error("{edge_type} edges are not allowed in {variant} graphs")]
    EdgeNotAllowed {
        edge_type: EdgeType,
        variant: GraphVariant,
    },

    #[error("Self loop on node {0}")]
    SelfLoop(String),

    #[error("Invalid node order: {0}")]
    InvalidNodeOrder(String),

    #[error("Directed cycle: {0}")]
    Cycle(String),
}

impl Error {
    pub(crate) fn shape(expected: impl ToString, actual: impl ToString) -> Self {
        Error::ShapeMismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }
}
