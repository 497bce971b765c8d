//! Error types for graph construction and mutation.
//!
//! All recoverable errors surface at the call that caused them; nothing is
//! stashed in global state. Bad node indices are programmer errors and panic
//! instead (see the `graph` module).

use thiserror::Error;

use crate::graph::NodeId;

/// Errors raised while building an [`ArGraph`](crate::ArGraph) from a loader.
///
/// A failed build never leaks a half-constructed graph: the attributes pulled
/// so far are dropped along with the construction temporaries.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// The loader reported a successor id outside `[0, node_count)`.
    #[error("node {node}: successor {succ} is out of range (graph has {node_count} nodes)")]
    SuccessorOutOfRange {
        node: NodeId,
        succ: NodeId,
        node_count: usize,
    },

    /// The loader reported the same directed edge twice; the graph is
    /// multigraph-free.
    #[error("duplicate edge ({from}, {to})")]
    DuplicateEdge { from: NodeId, to: NodeId },
}

/// Errors raised by the mutating attribute setters on a built graph.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// `set_edge_attr` was asked to replace the attribute of an edge that
    /// does not exist.
    #[error("no edge ({from}, {to})")]
    NoSuchEdge { from: NodeId, to: NodeId },
}
