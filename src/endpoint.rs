//! Endpoint codes stored in an endpoint array.
//!
//! The integer values follow causal-learn's `Endpoint` numbering, extended with
//! [`Endpoint::TailAndTail`] for a directed edge overlaid on an undirected one.
//! Value `3` (causal-learn's "star") has no meaning here and is rejected.

use core::fmt;

use crate::error::{Error, Result};

/// The mark at one end of the edge (or edges) between two nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "i32", into = "i32"))]
pub enum Endpoint {
    Tail,
    /// No edge.
    Null,
    Arrow,
    Circle,
    /// A tail and an arrowhead overlaid at the same node.
    TailAndArrow,
    /// Two arrowheads overlaid at the same node.
    ArrowAndArrow,
    /// Two tails overlaid at the same node.
    TailAndTail,
}

impl Endpoint {
    pub const ALL: [Endpoint; 7] = [
        Endpoint::Tail,
        Endpoint::Null,
        Endpoint::Arrow,
        Endpoint::Circle,
        Endpoint::TailAndArrow,
        Endpoint::ArrowAndArrow,
        Endpoint::TailAndTail,
    ];

    /// Integer value written into the array.
    pub const fn code(self) -> i32 {
        match self {
            Endpoint::Tail => -1,
            Endpoint::Null => 0,
            Endpoint::Arrow => 1,
            Endpoint::Circle => 2,
            Endpoint::TailAndArrow => 4,
            Endpoint::ArrowAndArrow => 5,
            Endpoint::TailAndTail => 6,
        }
    }

    /// Look up the endpoint for an array value.
    ///
    /// # Examples
    ///
    /// ```
    /// use causal_endpoints::Endpoint;
    ///
    /// assert_eq!(Endpoint::from_code(1).unwrap(), Endpoint::Arrow);
    /// assert!(Endpoint::from_code(3).is_err());
    /// ```
    pub fn from_code(code: i32) -> Result<Self> {
        match code {
            -1 => Ok(Endpoint::Tail),
            0 => Ok(Endpoint::Null),
            1 => Ok(Endpoint::Arrow),
            2 => Ok(Endpoint::Circle),
            4 => Ok(Endpoint::TailAndArrow),
            5 => Ok(Endpoint::ArrowAndArrow),
            6 => Ok(Endpoint::TailAndTail),
            other => Err(Error::InvalidEndpointCode(other)),
        }
    }

    /// True for codes that overlay two edge types at one node.
    pub const fn is_compound(self) -> bool {
        matches!(
            self,
            Endpoint::TailAndArrow | Endpoint::ArrowAndArrow | Endpoint::TailAndTail
        )
    }
}

impl TryFrom<i32> for Endpoint {
    type Error = Error;

    fn try_from(code: i32) -> Result<Self> {
        Endpoint::from_code(code)
    }
}

impl From<Endpoint> for i32 {
    fn from(endpoint: Endpoint) -> i32 {
        endpoint.code()
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Endpoint::Tail => "tail",
            Endpoint::Null => "null",
            Endpoint::Arrow => "arrow",
            Endpoint::Circle => "circle",
            Endpoint::TailAndArrow => "tail-and-arrow",
            Endpoint::ArrowAndArrow => "arrow-and-arrow",
            Endpoint::TailAndTail => "tail-and-tail",
        };
        f.write_str(name)
    }
}
