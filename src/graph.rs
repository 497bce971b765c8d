//! Immutable attributed relational graph storage.
//!
//! The representation is tuned for the matching engine: per-node successor
//! and predecessor lists sorted by node id, so edge lookups are a binary
//! search and neighbor enumeration is a slice walk. Graphs are immutable
//! after construction except for attribute replacement.

use crate::attr::AttrComparator;
use crate::error::{BuildError, GraphError};
use crate::loader::GraphLoader;

/// A node index in `[0, node_count)`. "No node" is `Option::None` wherever a
/// slot or cursor may be empty.
pub type NodeId = u32;

type BoxedComparator<A> = Box<dyn AttrComparator<A> + Send + Sync>;

/// An immutable directed graph whose nodes and edges carry attributes of
/// types `N` and `E`.
///
/// Each edge attribute is owned by the out-side adjacency of its tail node;
/// the in-side adjacency stores the position of the edge in that list, so
/// both directions observe the same attribute and it is dropped exactly once
/// when the graph goes away. Replacing an attribute returns the previous
/// value — dropping the return value is the caller's decision to destroy it.
///
/// Querying with an out-of-range node id panics: those are programmer errors,
/// not recoverable conditions.
pub struct ArGraph<N, E> {
    node_attrs: Vec<N>,
    /// Successors of each node, strictly ascending by id.
    succs: Vec<Vec<NodeId>>,
    /// Edge attributes parallel to `succs`; the owning side.
    succ_attrs: Vec<Vec<E>>,
    /// Predecessors of each node, strictly ascending by id, each with the
    /// position of the shared edge in the predecessor's successor list.
    preds: Vec<Vec<(NodeId, u32)>>,
    node_comparator: Option<BoxedComparator<N>>,
    edge_comparator: Option<BoxedComparator<E>>,
}

impl<N: std::fmt::Debug, E: std::fmt::Debug> std::fmt::Debug for ArGraph<N, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArGraph")
            .field("node_attrs", &self.node_attrs)
            .field("succs", &self.succs)
            .field("succ_attrs", &self.succ_attrs)
            .field("preds", &self.preds)
            .field("node_comparator", &self.node_comparator.is_some())
            .field("edge_comparator", &self.edge_comparator.is_some())
            .finish()
    }
}

impl<N, E> ArGraph<N, E> {
    /// Builds a graph by pulling the loader dry.
    ///
    /// Successor rows delivered out of order are re-sorted together with
    /// their attributes; out-of-range successor ids and duplicate edges fail
    /// the build. In-adjacency is derived from the out rows with a counting
    /// pass, never asked of the loader.
    pub fn from_loader<L>(mut loader: L) -> Result<Self, BuildError>
    where
        L: GraphLoader<NodeAttr = N, EdgeAttr = E>,
    {
        let n = loader.node_count();

        let mut node_attrs = Vec::with_capacity(n);
        for i in 0..n {
            node_attrs.push(loader.node_attr(i as NodeId));
        }

        let mut succs: Vec<Vec<NodeId>> = Vec::with_capacity(n);
        let mut succ_attrs: Vec<Vec<E>> = Vec::with_capacity(n);
        let mut in_degree = vec![0usize; n];
        for u in 0..n {
            let d = loader.out_edge_count(u as NodeId);
            let mut row: Vec<(NodeId, E)> = Vec::with_capacity(d);
            for k in 0..d {
                row.push(loader.out_edge(u as NodeId, k));
            }
            if !row.is_sorted_by_key(|(v, _)| *v) {
                row.sort_by_key(|(v, _)| *v);
            }

            let mut ids: Vec<NodeId> = Vec::with_capacity(d);
            let mut attrs: Vec<E> = Vec::with_capacity(d);
            for (v, attr) in row {
                if (v as usize) >= n {
                    return Err(BuildError::SuccessorOutOfRange {
                        node: u as NodeId,
                        succ: v,
                        node_count: n,
                    });
                }
                if ids.last() == Some(&v) {
                    return Err(BuildError::DuplicateEdge {
                        from: u as NodeId,
                        to: v,
                    });
                }
                in_degree[v as usize] += 1;
                ids.push(v);
                attrs.push(attr);
            }
            succs.push(ids);
            succ_attrs.push(attrs);
        }

        // Walking sources in ascending order keeps every predecessor list
        // sorted as it fills.
        let mut preds: Vec<Vec<(NodeId, u32)>> =
            in_degree.iter().map(|&d| Vec::with_capacity(d)).collect();
        for u in 0..n {
            for (slot, &v) in succs[u].iter().enumerate() {
                preds[v as usize].push((u as NodeId, slot as u32));
            }
        }

        Ok(ArGraph {
            node_attrs,
            succs,
            succ_attrs,
            preds,
            node_comparator: None,
            edge_comparator: None,
        })
    }

    pub fn node_count(&self) -> usize {
        self.node_attrs.len()
    }

    pub fn node_attr(&self, i: NodeId) -> &N {
        &self.node_attrs[i as usize]
    }

    /// Replaces the attribute of node `i`, returning the previous value.
    pub fn set_node_attr(&mut self, i: NodeId, attr: N) -> N {
        std::mem::replace(&mut self.node_attrs[i as usize], attr)
    }

    /// Position of `v` in `u`'s successor list, by binary search.
    fn out_slot(&self, u: NodeId, v: NodeId) -> Option<usize> {
        self.succs[u as usize].binary_search(&v).ok()
    }

    pub fn has_edge(&self, u: NodeId, v: NodeId) -> bool {
        self.out_slot(u, v).is_some()
    }

    /// The attribute of edge `(u, v)`, or `None` if there is no such edge.
    pub fn edge_attr(&self, u: NodeId, v: NodeId) -> Option<&E> {
        self.out_slot(u, v).map(|k| &self.succ_attrs[u as usize][k])
    }

    /// Replaces the attribute of edge `(u, v)`, returning the previous value.
    ///
    /// The attribute has a single owned slot read by both adjacency
    /// directions, so the replacement is observed via `in_edge` as well.
    pub fn set_edge_attr(&mut self, u: NodeId, v: NodeId, attr: E) -> Result<E, GraphError> {
        match self.out_slot(u, v) {
            Some(k) => Ok(std::mem::replace(&mut self.succ_attrs[u as usize][k], attr)),
            None => Err(GraphError::NoSuchEdge { from: u, to: v }),
        }
    }

    pub fn out_degree(&self, i: NodeId) -> usize {
        self.succs[i as usize].len()
    }

    pub fn in_degree(&self, i: NodeId) -> usize {
        self.preds[i as usize].len()
    }

    pub fn degree(&self, i: NodeId) -> usize {
        self.in_degree(i) + self.out_degree(i)
    }

    /// The `k`-th outgoing neighbor of `i` with the edge attribute.
    pub fn out_edge(&self, i: NodeId, k: usize) -> (NodeId, &E) {
        (self.succs[i as usize][k], &self.succ_attrs[i as usize][k])
    }

    /// The `k`-th incoming neighbor of `i` with the edge attribute.
    pub fn in_edge(&self, i: NodeId, k: usize) -> (NodeId, &E) {
        let (p, slot) = self.preds[i as usize][k];
        (p, &self.succ_attrs[p as usize][slot as usize])
    }

    /// Outgoing edges of `i` as `(tail, head, attr)`, ascending by head.
    pub fn out_edges(&self, i: NodeId) -> impl Iterator<Item = (NodeId, NodeId, &E)> {
        self.succs[i as usize]
            .iter()
            .zip(&self.succ_attrs[i as usize])
            .map(move |(&v, attr)| (i, v, attr))
    }

    /// Incoming edges of `i` as `(tail, head, attr)`, ascending by tail.
    pub fn in_edges(&self, i: NodeId) -> impl Iterator<Item = (NodeId, NodeId, &E)> {
        self.preds[i as usize]
            .iter()
            .map(move |&(p, slot)| (p, i, &self.succ_attrs[p as usize][slot as usize]))
    }

    /// All edges touching `i`: incoming first, then outgoing.
    pub fn edges(&self, i: NodeId) -> impl Iterator<Item = (NodeId, NodeId, &E)> {
        self.in_edges(i).chain(self.out_edges(i))
    }

    /// Registers the node-attribute comparator; replaces any previous one.
    pub fn set_node_comparator<C>(&mut self, comparator: C)
    where
        C: AttrComparator<N> + Send + Sync + 'static,
    {
        self.node_comparator = Some(Box::new(comparator));
    }

    /// Registers the edge-attribute comparator; replaces any previous one.
    pub fn set_edge_comparator<C>(&mut self, comparator: C)
    where
        C: AttrComparator<E> + Send + Sync + 'static,
    {
        self.edge_comparator = Some(Box::new(comparator));
    }

    /// True iff no node comparator is registered or it accepts the pair.
    pub fn compatible_node(&self, pattern: &N, target: &N) -> bool {
        match &self.node_comparator {
            Some(cmp) => cmp.compatible(pattern, target),
            None => true,
        }
    }

    /// True iff no edge comparator is registered or it accepts the pair.
    pub fn compatible_edge(&self, pattern: &E, target: &E) -> bool {
        match &self.edge_comparator {
            Some(cmp) => cmp.compatible(pattern, target),
            None => true,
        }
    }
}
