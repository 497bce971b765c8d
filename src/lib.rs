//! Graph and subgraph matching on attributed relational graphs.
//!
//! An [`ArGraph`] is an immutable directed graph whose nodes and edges carry
//! user-supplied attributes; it is built once from a [`GraphLoader`] and then
//! only queried. The matching engine enumerates mappings between two graphs
//! under one of three relations ([`MatchMode`]) with the VF-family
//! state-space search: a [`MatchState`] is one node of the search tree, and
//! [`enumerate`] walks the tree depth-first, reporting every complete
//! mapping to a visitor.
//!
//! ```
//! use argmatch::{GraphBuilder, Matcher, Config, MatchMode};
//!
//! // A triangle matched against itself has its three rotations.
//! let mut b = GraphBuilder::<(), ()>::new();
//! for _ in 0..3 {
//!     b.add_node(());
//! }
//! b.add_edge(0, 1, ());
//! b.add_edge(1, 2, ());
//! b.add_edge(2, 0, ());
//! let g = b.build().unwrap();
//!
//! let matcher = Matcher::with_config(&g, &g, Config::for_mode(MatchMode::Isomorphism));
//! assert_eq!(matcher.count(), 3);
//! ```
//!
//! Attribute compatibility is pluggable per graph via [`AttrComparator`];
//! with no comparator registered every pair of attributes is compatible.
//! Attributes are owned by the graph and dropped with it, exactly once each.

mod attr;
mod error;
mod graph;
mod loader;
mod mapping;
mod matcher;
mod search;
mod state;
mod vf;
mod vf2;

pub use attr::{AttrComparator, EqComparator};
pub use error::{BuildError, GraphError};
pub use graph::{ArGraph, NodeId};
pub use loader::{GraphBuilder, GraphLoader};
pub use mapping::Mapping;
pub use matcher::{
    Algorithm, Config, MatchMode, Matcher, find_isomorphisms, find_monomorphisms,
    find_subgraph_isomorphisms,
};
pub use search::{Visit, enumerate};
pub use state::MatchState;
pub use vf::VfState;
pub use vf2::Vf2State;
