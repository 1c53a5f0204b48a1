//! Rendering for mixed-edge graph visualization.
//!
//! This module turns a [`MixedEdgeGraph`](crate::MixedEdgeGraph) into Graphviz DOT
//! text. Laying out and rasterizing the output is left to Graphviz.

pub mod dot;

pub use dot::{DrawOptions, draw, draw_to};
