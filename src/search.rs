//! Depth-first enumeration over a match-state search tree.

use tracing::trace;

use crate::mapping::Mapping;
use crate::state::MatchState;

/// Visitor verdict after seeing a complete mapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visit {
    /// Keep enumerating.
    Continue,
    /// Unwind the whole search.
    Stop,
}

/// Exhausts the search tree rooted at `state`, invoking `visit` on every
/// complete mapping in the deterministic candidate order.
///
/// Each feasible pair is committed on a clone of the current state, so a
/// frame's own state is untouched when a branch retracts; the live states
/// are bounded by the recursion depth. Returns [`Visit::Stop`] as soon as
/// the visitor asks to stop, [`Visit::Continue`] when the tree is exhausted.
pub fn enumerate<S, V>(state: &S, visit: &mut V) -> Visit
where
    S: MatchState,
    V: FnMut(&Mapping) -> Visit,
{
    if state.is_goal() {
        let mapping = state.mapping();
        trace!("mapping found: {} pairs", mapping.len());
        return visit(&mapping);
    }
    if state.is_dead() {
        return Visit::Continue;
    }

    let mut prev = None;
    while let Some((n1, n2)) = state.next_pair(prev) {
        if state.is_feasible(n1, n2) {
            let mut child = state.clone();
            child.add_pair(n1, n2);
            if enumerate(&child, visit) == Visit::Stop {
                return Visit::Stop;
            }
        }
        prev = Some((n1, n2));
    }
    Visit::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{ArGraph, NodeId};
    use crate::loader::GraphBuilder;
    use crate::matcher::MatchMode;
    use crate::vf2::Vf2State;

    fn graph(n: usize, edges: &[(NodeId, NodeId)]) -> ArGraph<(), ()> {
        let mut b = GraphBuilder::new();
        for _ in 0..n {
            b.add_node(());
        }
        for &(u, v) in edges {
            b.add_edge(u, v, ());
        }
        b.build().unwrap()
    }

    #[test]
    fn stop_unwinds_after_the_first_mapping() {
        let g = graph(3, &[(0, 1), (1, 2), (2, 0)]);
        let state = Vf2State::new(&g, &g, MatchMode::Isomorphism);
        let mut seen = 0;
        let outcome = enumerate(&state, &mut |_| {
            seen += 1;
            Visit::Stop
        });
        assert_eq!(outcome, Visit::Stop);
        assert_eq!(seen, 1);
    }

    #[test]
    fn exhaustion_without_mappings_is_not_an_error() {
        let g1 = graph(2, &[(0, 1)]);
        let g2 = graph(2, &[]);
        let state = Vf2State::new(&g1, &g2, MatchMode::Isomorphism);
        let mut seen = 0;
        let outcome = enumerate(&state, &mut |_| {
            seen += 1;
            Visit::Continue
        });
        assert_eq!(outcome, Visit::Continue);
        assert_eq!(seen, 0);
    }

    #[test]
    fn empty_graphs_yield_exactly_the_empty_mapping() {
        let g = graph(0, &[]);
        let state = Vf2State::new(&g, &g, MatchMode::Isomorphism);
        let mut mappings = Vec::new();
        enumerate(&state, &mut |m| {
            mappings.push(m.clone());
            Visit::Continue
        });
        assert_eq!(mappings, vec![Mapping::default()]);
    }
}
