//! The VF match state: the original variant without the 2-look-ahead.

use crate::graph::{ArGraph, NodeId};
use crate::mapping::Mapping;
use crate::matcher::MatchMode;
use crate::state::{MatchState, SearchCore};

/// VF state over a pattern/target pair.
///
/// Candidate generation, commit bookkeeping and the pairwise consistency
/// checks are the ones VF2 uses; feasibility stops at the terminal-set
/// tallies. The search explores more of the tree than [`Vf2State`] but
/// enumerates exactly the same mappings.
///
/// [`Vf2State`]: crate::Vf2State
pub struct VfState<'g, N, E> {
    core: SearchCore<'g, N, E>,
}

impl<'g, N, E> VfState<'g, N, E> {
    /// Roots a search on `(g1, g2)`; `g1` is the pattern.
    pub fn new(g1: &'g ArGraph<N, E>, g2: &'g ArGraph<N, E>, mode: MatchMode) -> Self {
        VfState {
            core: SearchCore::new(g1, g2, mode),
        }
    }
}

impl<N, E> Clone for VfState<'_, N, E> {
    fn clone(&self) -> Self {
        VfState {
            core: self.core.clone(),
        }
    }
}

impl<N, E> MatchState for VfState<'_, N, E> {
    fn next_pair(&self, prev: Option<(NodeId, NodeId)>) -> Option<(NodeId, NodeId)> {
        self.core.next_pair(prev)
    }

    fn is_feasible(&self, n1: NodeId, n2: NodeId) -> bool {
        let Some((la1, la2)) = self.core.pair_counts(n1, n2) else {
            return false;
        };
        match self.core.mode() {
            MatchMode::Isomorphism => {
                la1.term_in == la2.term_in && la1.term_out == la2.term_out
            }
            MatchMode::SubgraphIsomorphism | MatchMode::Monomorphism => {
                la1.term_in <= la2.term_in && la1.term_out <= la2.term_out
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

    #[test]
    fn vf_accepts_pairs_vf2_would_only_reject_by_lookahead() {
        let mut b1 = GraphBuilder::<(), ()>::new();
        for _ in 0..3 {
            b1.add_node(());
        }
        b1.add_edge(0, 1, ());
        b1.add_edge(1, 2, ());
        let g1 = b1.build().unwrap();

        let mut b2 = GraphBuilder::<(), ()>::new();
        for _ in 0..3 {
            b2.add_node(());
        }
        b2.add_edge(0, 1, ());
        b2.add_edge(0, 2, ());
        let g2 = b2.build().unwrap();

        // Fresh-neighbor counts differ (1 vs 2), which only VF2 inspects.
        let vf = VfState::new(&g1, &g2, MatchMode::Isomorphism);
        assert!(vf.is_feasible(0, 0));
        let vf2 = crate::vf2::Vf2State::new(&g1, &g2, MatchMode::Isomorphism);
        assert!(!vf2.is_feasible(0, 0));
    }
}
