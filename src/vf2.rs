//! The VF2 match state: full one- and two-level look-ahead.

use crate::graph::{ArGraph, NodeId};
use crate::mapping::Mapping;
use crate::matcher::MatchMode;
use crate::state::{MatchState, SearchCore};

/// VF2 state over a pattern/target pair.
///
/// Feasibility combines the pairwise consistency checks with both look-ahead
/// rules: the terminal-set tallies (1-look-ahead) and the fresh-neighbor
/// tallies (2-look-ahead). For [`MatchMode::Isomorphism`] the tallies must
/// agree exactly; the subgraph relations allow the target side to dominate,
/// with monomorphism using the combined bound because its extra target edges
/// can promote fresh neighbors into the terminal sets.
pub struct Vf2State<'g, N, E> {
    core: SearchCore<'g, N, E>,
}

impl<'g, N, E> Vf2State<'g, N, E> {
    /// Roots a search on `(g1, g2)`; `g1` is the pattern.
    pub fn new(g1: &'g ArGraph<N, E>, g2: &'g ArGraph<N, E>, mode: MatchMode) -> Self {
        Vf2State {
            core: SearchCore::new(g1, g2, mode),
        }
    }
}

impl<N, E> Clone for Vf2State<'_, N, E> {
    fn clone(&self) -> Self {
        Vf2State {
            core: self.core.clone(),
        }
    }
}

impl<N, E> MatchState for Vf2State<'_, N, E> {
    fn next_pair(&self, prev: Option<(NodeId, NodeId)>) -> Option<(NodeId, NodeId)> {
        self.core.next_pair(prev)
    }

    fn is_feasible(&self, n1: NodeId, n2: NodeId) -> bool {
        let Some((la1, la2)) = self.core.pair_counts(n1, n2) else {
            return false;
        };
        match self.core.mode() {
            MatchMode::Isomorphism => {
                la1.term_in == la2.term_in
                    && la1.term_out == la2.term_out
                    && la1.fresh == la2.fresh
            }
            MatchMode::SubgraphIsomorphism => {
                la1.term_in <= la2.term_in
                    && la1.term_out <= la2.term_out
                    && la1.fresh <= la2.fresh
            }
            MatchMode::Monomorphism => {
                la1.term_in <= la2.term_in
                    && la1.term_out <= la2.term_out
                    && la1.total() <= la2.total()
            }
        }
    }

    fn add_pair(&mut self, n1: NodeId, n2: NodeId) {
        self.core.add_pair(n1, n2);
    }

    fn is_goal(&self) -> bool {
        self.core.is_goal()
    }

    fn is_dead(&self) -> bool {
        self.core.is_dead()
    }

    fn core_len(&self) -> usize {
        self.core.core_len()
    }

    fn mapping(&self) -> Mapping {
        self.core.mapping()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::GraphBuilder;

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
    fn fresh_neighbor_tallies_prune_isomorphism_candidates() {
        // Pattern node 0 has one fresh neighbor, target node 0 has two.
        let g1 = graph(3, &[(0, 1), (1, 2)]);
        let g2 = graph(3, &[(0, 1), (0, 2)]);
        let state = Vf2State::new(&g1, &g2, MatchMode::Isomorphism);
        assert!(!state.is_feasible(0, 0));
        // The same pair is fine once the target may dominate.
        let state = Vf2State::new(&g1, &g2, MatchMode::SubgraphIsomorphism);
        assert!(state.is_feasible(0, 0));
    }

    #[test]
    fn dead_states_are_recognized_before_expansion() {
        let g1 = graph(2, &[(0, 1)]);
        let g2 = graph(3, &[(0, 1), (1, 2)]);
        let iso = Vf2State::new(&g1, &g2, MatchMode::Isomorphism);
        assert!(iso.is_dead());
        let sub = Vf2State::new(&g1, &g2, MatchMode::SubgraphIsomorphism);
        assert!(!sub.is_dead());
        let reversed = Vf2State::new(&g2, &g1, MatchMode::SubgraphIsomorphism);
        assert!(reversed.is_dead());
    }

    #[test]
    fn goal_requires_full_pattern_coverage() {
        let g = graph(1, &[]);
        let mut state = Vf2State::new(&g, &g, MatchMode::Isomorphism);
        assert!(!state.is_goal());
        state.add_pair(0, 0);
        assert!(state.is_goal());
    }
}
