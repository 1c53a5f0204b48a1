//! Graphviz DOT rendering.
//!
//! Edge types map onto DOT edge attributes:
//!
//! | Edge       | DOT                          |
//! |------------|------------------------------|
//! | `u -> v`   | `u -> v`                     |
//! | `u <-> v`  | `u -> v [dir=both]`          |
//! | `u -- v`   | `u -> v [dir=none]`          |
//! | `u -o v`   | `u -> v [arrowhead=odot]`    |
//!
//! Nodes with a fixed position get a pinned `pos="x,y!"` attribute, which the
//! `neato` and `fdp` engines honor.

use core::fmt::{self, Display};
use core::hash::Hash;
use std::collections::HashMap;

use crate::graph::{EdgeType, MixedEdgeGraph};

/// Options for [`draw`].
///
/// # Examples
///
/// ```
/// use causal_endpoints::render::DrawOptions;
///
/// let options = DrawOptions::new()
///     .with_name("g")
///     .with_position("x", 0.0, 0.0)
///     .with_position("y", 1.0, 0.5);
/// assert_eq!(options.position(&"y"), Some((1.0, 0.5)));
/// ```
#[derive(Debug, Clone)]
pub struct DrawOptions<N> {
    name: Option<String>,
    positions: HashMap<N, (f64, f64)>,
}

impl<N> Default for DrawOptions<N> {
    fn default() -> Self {
        Self {
            name: None,
            positions: HashMap::new(),
        }
    }
}

impl<N: Eq + Hash> DrawOptions<N> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name written after the `digraph` keyword.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Pin `node` at `(x, y)`.
    pub fn with_position(mut self, node: N, x: f64, y: f64) -> Self {
        self.positions.insert(node, (x, y));
        self
    }

    /// Pin several nodes at once. Later entries win.
    pub fn with_positions(mut self, positions: impl IntoIterator<Item = (N, (f64, f64))>) -> Self {
        self.positions.extend(positions);
        self
    }

    pub fn position(&self, node: &N) -> Option<(f64, f64)> {
        self.positions.get(node).copied()
    }
}

/// Render `graph` as Graphviz DOT text.
///
/// Positions given for nodes that are not in the graph are ignored.
///
/// # Examples
///
/// ```
/// use causal_endpoints::render::{draw, DrawOptions};
/// use causal_endpoints::{EdgeType, MixedEdgeGraph};
///
/// let mut graph = MixedEdgeGraph::admg();
/// graph.add_edge("x", "y", EdgeType::Directed).unwrap();
/// graph.add_edge("z", "y", EdgeType::Bidirected).unwrap();
///
/// let dot = draw(&graph, &DrawOptions::new().with_position("x", 0.0, 0.0));
/// assert!(dot.starts_with("digraph {"));
/// assert!(dot.contains("\tx [label=x pos=\"0,0!\"]"));
/// assert!(dot.contains("\tz -> y [dir=both]") || dot.contains("\ty -> z [dir=both]"));
/// ```
pub fn draw<N>(graph: &MixedEdgeGraph<N>, options: &DrawOptions<N>) -> String
where
    N: Clone + Eq + Hash + fmt::Debug + Display,
{
    let mut buf = String::with_capacity(estimate_size(graph));
    draw_to(graph, options, &mut buf);
    buf
}

/// Render `graph` into a provided buffer.
pub fn draw_to<N>(graph: &MixedEdgeGraph<N>, options: &DrawOptions<N>, output: &mut String)
where
    N: Clone + Eq + Hash + fmt::Debug + Display,
{
    write_dot(graph, options, output);
}

fn write_dot<N>(graph: &MixedEdgeGraph<N>, options: &DrawOptions<N>, out: &mut String)
where
    N: Clone + Eq + Hash + fmt::Debug + Display,
{
    out.push_str("digraph ");
    if let Some(name) = &options.name {
        write_id(out, name);
        out.push(' ');
    }
    out.push_str("{\n");

    for node in graph.nodes() {
        let id = node.to_string();
        out.push('\t');
        write_id(out, &id);
        out.push_str(" [label=");
        write_id(out, &id);
        if let Some((x, y)) = options.position(node) {
            out.push_str(&format!(" pos=\"{},{}!\"", x, y));
        }
        out.push_str("]\n");
    }

    for edge_type in EdgeType::ALL {
        for (u, v) in graph.edges(edge_type) {
            out.push('\t');
            write_id(out, &u.to_string());
            out.push_str(" -> ");
            write_id(out, &v.to_string());
            match edge_type {
                EdgeType::Directed => {}
                EdgeType::Bidirected => out.push_str(" [dir=both]"),
                EdgeType::Undirected => out.push_str(" [dir=none]"),
                EdgeType::Circle => out.push_str(" [arrowhead=odot]"),
            }
            out.push('\n');
        }
    }

    out.push_str("}\n");
}

/// Write a DOT identifier, quoting it unless it is a plain word or number.
fn write_id(out: &mut String, id: &str) {
    let plain_word = id
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    let number = !id.is_empty() && id.chars().all(|c| c.is_ascii_digit());

    if plain_word || number {
        out.push_str(id);
    } else {
        out.push('"');
        for c in id.chars() {
            if c == '"' || c == '\\' {
                out.push('\\');
            }
            out.push(c);
        }
        out.push('"');
    }
}

fn estimate_size<N>(graph: &MixedEdgeGraph<N>) -> usize
where
    N: Clone + Eq + Hash + fmt::Debug,
{
    graph.node_count() * 32 + graph.total_edge_count() * 24 + 16
}
