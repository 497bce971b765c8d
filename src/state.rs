//! The match-state capability and the bookkeeping shared by the VF-family
//! state implementations.
//!
//! A state is one node of the search tree: the partial pattern-to-target
//! correspondence plus the terminal-set memberships the feasibility rules
//! look ahead through. States are cloned into each recursive frame, so
//! committing a pair never needs an undo log.

use crate::graph::{ArGraph, NodeId};
use crate::mapping::Mapping;
use crate::matcher::MatchMode;

/// One node of the matching search tree.
///
/// `Clone` produces an independent copy usable for recursion without
/// disturbing the parent frame.
pub trait MatchState: Clone {
    /// The next candidate pair after `prev`, or `None` when the current
    /// extension frontier is exhausted. `None` as `prev` starts the frontier.
    ///
    /// The candidate order is a deterministic total order, and only one
    /// pattern endpoint is ever produced per search frame — fixing the first
    /// eligible pattern node loses no mappings and prunes sibling branches
    /// that would only permute the discovery order.
    fn next_pair(&self, prev: Option<(NodeId, NodeId)>) -> Option<(NodeId, NodeId)>;

    /// Whether extending the mapping by `(n1, n2)` preserves every constraint
    /// of the relation being searched.
    fn is_feasible(&self, n1: NodeId, n2: NodeId) -> bool;

    /// Commits `(n1, n2)`. Callers must have established `is_feasible`.
    fn add_pair(&mut self, n1: NodeId, n2: NodeId);

    /// Terminal accept: the mapping is complete for the relation.
    fn is_goal(&self) -> bool;

    /// Terminal prune: no extension of this state can reach a goal.
    fn is_dead(&self) -> bool;

    /// Number of committed pairs.
    fn core_len(&self) -> usize;

    /// Extracts the current partial mapping.
    fn mapping(&self) -> Mapping;
}

const CORE: u8 = 0x01;
const TERM_IN: u8 = 0x02;
const TERM_OUT: u8 = 0x04;

/// Which extension sets the current frontier draws candidate pairs from.
#[derive(Clone, Copy)]
enum Frontier {
    Out,
    In,
    All,
}

fn in_frontier(frontier: Frontier, flags: u8) -> bool {
    match frontier {
        Frontier::Out => flags & CORE == 0 && flags & TERM_OUT != 0,
        Frontier::In => flags & CORE == 0 && flags & TERM_IN != 0,
        Frontier::All => flags & CORE == 0,
    }
}

/// Unmapped-neighbor tallies gathered while scanning one endpoint of a
/// candidate pair, bucketed by terminal membership.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct LookAhead {
    pub(crate) term_in: usize,
    pub(crate) term_out: usize,
    pub(crate) fresh: usize,
}

impl LookAhead {
    fn tally(&mut self, flags: u8) {
        if flags & TERM_IN != 0 {
            self.term_in += 1;
        }
        if flags & TERM_OUT != 0 {
            self.term_out += 1;
        }
        if flags & (TERM_IN | TERM_OUT) == 0 {
            self.fresh += 1;
        }
    }

    pub(crate) fn total(&self) -> usize {
        self.term_in + self.term_out + self.fresh
    }
}

/// The working data every VF-family state carries: the mutual-inverse core
/// arrays, per-node membership flags for the four terminal sets, and the
/// cached set cardinalities.
pub(crate) struct SearchCore<'g, N, E> {
    g1: &'g ArGraph<N, E>,
    g2: &'g ArGraph<N, E>,
    mode: MatchMode,
    core_1: Vec<Option<NodeId>>,
    core_2: Vec<Option<NodeId>>,
    flags_1: Vec<u8>,
    flags_2: Vec<u8>,
    core_len: usize,
    t1in_len: usize,
    t1out_len: usize,
    t2in_len: usize,
    t2out_len: usize,
}

impl<N, E> Clone for SearchCore<'_, N, E> {
    fn clone(&self) -> Self {
        SearchCore {
            g1: self.g1,
            g2: self.g2,
            mode: self.mode,
            core_1: self.core_1.clone(),
            core_2: self.core_2.clone(),
            flags_1: self.flags_1.clone(),
            flags_2: self.flags_2.clone(),
            core_len: self.core_len,
            t1in_len: self.t1in_len,
            t1out_len: self.t1out_len,
            t2in_len: self.t2in_len,
            t2out_len: self.t2out_len,
        }
    }
}

impl<'g, N, E> SearchCore<'g, N, E> {
    pub(crate) fn new(g1: &'g ArGraph<N, E>, g2: &'g ArGraph<N, E>, mode: MatchMode) -> Self {
        SearchCore {
            g1,
            g2,
            mode,
            core_1: vec![None; g1.node_count()],
            core_2: vec![None; g2.node_count()],
            flags_1: vec![0; g1.node_count()],
            flags_2: vec![0; g2.node_count()],
            core_len: 0,
            t1in_len: 0,
            t1out_len: 0,
            t2in_len: 0,
            t2out_len: 0,
        }
    }

    fn n1(&self) -> usize {
        self.core_1.len()
    }

    fn n2(&self) -> usize {
        self.core_2.len()
    }

    pub(crate) fn mode(&self) -> MatchMode {
        self.mode
    }

    pub(crate) fn core_len(&self) -> usize {
        self.core_len
    }

    pub(crate) fn mapping(&self) -> Mapping {
        let pairs = self
            .core_1
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.map(|j| (i as NodeId, j)))
            .collect();
        Mapping::from_pairs(pairs)
    }

    pub(crate) fn is_goal(&self) -> bool {
        match self.mode {
            MatchMode::Isomorphism => self.core_len == self.n1() && self.core_len == self.n2(),
            MatchMode::SubgraphIsomorphism | MatchMode::Monomorphism => self.core_len == self.n1(),
        }
    }

    pub(crate) fn is_dead(&self) -> bool {
        match self.mode {
            MatchMode::Isomorphism => {
                self.n1() != self.n2()
                    || self.t1in_len != self.t2in_len
                    || self.t1out_len != self.t2out_len
            }
            MatchMode::SubgraphIsomorphism | MatchMode::Monomorphism => {
                self.n1() > self.n2()
                    || self.t1in_len > self.t2in_len
                    || self.t1out_len > self.t2out_len
            }
        }
    }

    pub(crate) fn next_pair(&self, prev: Option<(NodeId, NodeId)>) -> Option<(NodeId, NodeId)> {
        let frontier = if self.t1out_len > 0 && self.t2out_len > 0 {
            Frontier::Out
        } else if self.t1in_len > 0 && self.t2in_len > 0 {
            Frontier::In
        } else {
            Frontier::All
        };

        let (start1, start2) = match prev {
            Some((p1, p2)) => (p1 as usize, p2 as usize + 1),
            None => (0, 0),
        };

        // The pattern endpoint is pinned for the whole frame: the first
        // frontier member at or after the previous candidate.
        let n1 = (start1..self.n1()).find(|&i| in_frontier(frontier, self.flags_1[i]))?;
        let n2 = (start2..self.n2()).find(|&j| in_frontier(frontier, self.flags_2[j]))?;
        Some((n1 as NodeId, n2 as NodeId))
    }

    #[contracts::debug_requires(
        self.core_1[n1 as usize].is_none() && self.core_2[n2 as usize].is_none(),
        "pair endpoints are unmapped"
    )]
    #[contracts::debug_ensures(self.core_1[n1 as usize] == Some(n2))]
    #[contracts::debug_ensures(self.core_2[n2 as usize] == Some(n1))]
    pub(crate) fn add_pair(&mut self, n1: NodeId, n2: NodeId) {
        self.core_1[n1 as usize] = Some(n2);
        self.core_2[n2 as usize] = Some(n1);
        self.core_len += 1;

        // The endpoints leave their terminal sets on entering the core.
        let f1 = self.flags_1[n1 as usize];
        if f1 & TERM_IN != 0 {
            self.t1in_len -= 1;
        }
        if f1 & TERM_OUT != 0 {
            self.t1out_len -= 1;
        }
        self.flags_1[n1 as usize] = f1 | CORE;

        let f2 = self.flags_2[n2 as usize];
        if f2 & TERM_IN != 0 {
            self.t2in_len -= 1;
        }
        if f2 & TERM_OUT != 0 {
            self.t2out_len -= 1;
        }
        self.flags_2[n2 as usize] = f2 | CORE;

        // Unmapped predecessors of a newly mapped node become terminal-in,
        // unmapped successors terminal-out; counters bump on first entry.
        for (p, _, _) in self.g1.in_edges(n1) {
            let f = &mut self.flags_1[p as usize];
            if *f & (CORE | TERM_IN) == 0 {
                *f |= TERM_IN;
                self.t1in_len += 1;
            }
        }
        for (_, s, _) in self.g1.out_edges(n1) {
            let f = &mut self.flags_1[s as usize];
            if *f & (CORE | TERM_OUT) == 0 {
                *f |= TERM_OUT;
                self.t1out_len += 1;
            }
        }
        for (p, _, _) in self.g2.in_edges(n2) {
            let f = &mut self.flags_2[p as usize];
            if *f & (CORE | TERM_IN) == 0 {
                *f |= TERM_IN;
                self.t2in_len += 1;
            }
        }
        for (_, s, _) in self.g2.out_edges(n2) {
            let f = &mut self.flags_2[s as usize];
            if *f & (CORE | TERM_OUT) == 0 {
                *f |= TERM_OUT;
                self.t2out_len += 1;
            }
        }
    }

    /// Runs the pairwise consistency checks (node compatibility, edge
    /// preservation on mapped neighbors, self-loops) and gathers the
    /// look-ahead tallies for both endpoints. `None` means some hard check
    /// failed and the pair is infeasible regardless of variant.
    pub(crate) fn pair_counts(&self, n1: NodeId, n2: NodeId) -> Option<(LookAhead, LookAhead)> {
        if !self
            .g1
            .compatible_node(self.g1.node_attr(n1), self.g2.node_attr(n2))
        {
            return None;
        }
        let la1 = self.scan_pattern(n1, n2)?;
        let la2 = self.scan_target(n1, n2)?;
        Some((la1, la2))
    }

    /// Scans the pattern endpoint: every mapped neighbor of `n1` must carry
    /// its edge over to `n2`'s side with a compatible attribute; unmapped
    /// neighbors are tallied.
    fn scan_pattern(&self, n1: NodeId, n2: NodeId) -> Option<LookAhead> {
        let mut la = LookAhead::default();
        for (p, _, attr) in self.g1.in_edges(n1) {
            if p == n1 {
                let attr2 = self.g2.edge_attr(n2, n2)?;
                if !self.g1.compatible_edge(attr, attr2) {
                    return None;
                }
            } else if let Some(image) = self.core_1[p as usize] {
                let attr2 = self.g2.edge_attr(image, n2)?;
                if !self.g1.compatible_edge(attr, attr2) {
                    return None;
                }
            } else {
                la.tally(self.flags_1[p as usize]);
            }
        }
        for (_, s, attr) in self.g1.out_edges(n1) {
            if s == n1 {
                let attr2 = self.g2.edge_attr(n2, n2)?;
                if !self.g1.compatible_edge(attr, attr2) {
                    return None;
                }
            } else if let Some(image) = self.core_1[s as usize] {
                let attr2 = self.g2.edge_attr(n2, image)?;
                if !self.g1.compatible_edge(attr, attr2) {
                    return None;
                }
            } else {
                la.tally(self.flags_1[s as usize]);
            }
        }
        Some(la)
    }

    /// Scans the target endpoint. For the induced relations a mapped
    /// neighbor of `n2` must map back to a neighbor of `n1`; monomorphism
    /// tolerates extra target edges and only tallies.
    fn scan_target(&self, n1: NodeId, n2: NodeId) -> Option<LookAhead> {
        let induced = self.mode.induced();
        let mut la = LookAhead::default();
        for (p, _, attr2) in self.g2.in_edges(n2) {
            if p == n2 {
                if induced {
                    let attr1 = self.g1.edge_attr(n1, n1)?;
                    if !self.g1.compatible_edge(attr1, attr2) {
                        return None;
                    }
                }
            } else if let Some(pre) = self.core_2[p as usize] {
                if induced {
                    let attr1 = self.g1.edge_attr(pre, n1)?;
                    if !self.g1.compatible_edge(attr1, attr2) {
                        return None;
                    }
                }
            } else {
                la.tally(self.flags_2[p as usize]);
            }
        }
        for (_, s, attr2) in self.g2.out_edges(n2) {
            if s == n2 {
                if induced {
                    let attr1 = self.g1.edge_attr(n1, n1)?;
                    if !self.g1.compatible_edge(attr1, attr2) {
                        return None;
                    }
                }
            } else if let Some(pre) = self.core_2[s as usize] {
                if induced {
                    let attr1 = self.g1.edge_attr(n1, pre)?;
                    if !self.g1.compatible_edge(attr1, attr2) {
                        return None;
                    }
                }
            } else {
                la.tally(self.flags_2[s as usize]);
            }
        }
        Some(la)
    }
}
