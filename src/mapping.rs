//! Extracted correspondences between pattern and target nodes.

use crate::graph::NodeId;

/// A correspondence extracted from a match state: the set of currently
/// paired `(pattern, target)` nodes, ascending by pattern node.
///
/// Complete mappings handed to visitors cover every pattern node; partial
/// ones (from [`MatchState::mapping`](crate::MatchState::mapping) on an
/// interior state) cover the mapped prefix of the search.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Mapping {
    pairs: Vec<(NodeId, NodeId)>,
}

impl Mapping {
    #[contracts::debug_requires(
        pairs.windows(2).all(|w| w[0].0 < w[1].0),
        "pairs ascend by pattern node"
    )]
    pub(crate) fn from_pairs(pairs: Vec<(NodeId, NodeId)>) -> Self {
        Self { pairs }
    }

    /// Number of paired nodes.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// The pairs, ascending by pattern node.
    pub fn pairs(&self) -> &[(NodeId, NodeId)] {
        &self.pairs
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, NodeId)> {
        self.pairs.iter().copied()
    }

    /// The target node the pattern node `n1` is paired with.
    pub fn image_of(&self, n1: NodeId) -> Option<NodeId> {
        self.pairs
            .binary_search_by_key(&n1, |&(p, _)| p)
            .ok()
            .map(|k| self.pairs[k].1)
    }

    /// The pattern node paired with the target node `n2`.
    pub fn preimage_of(&self, n2: NodeId) -> Option<NodeId> {
        self.pairs.iter().find(|&&(_, t)| t == n2).map(|&(p, _)| p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_are_inverse_of_each_other() {
        let m = Mapping::from_pairs(vec![(0, 2), (1, 0), (3, 1)]);
        assert_eq!(m.len(), 3);
        assert_eq!(m.image_of(1), Some(0));
        assert_eq!(m.image_of(2), None);
        assert_eq!(m.preimage_of(2), Some(0));
        assert_eq!(m.preimage_of(3), None);
        for (p, t) in m.iter() {
            assert_eq!(m.image_of(p), Some(t));
            assert_eq!(m.preimage_of(t), Some(p));
        }
    }

    #[test]
    fn empty_mapping_is_a_valid_goal_for_empty_graphs() {
        let m = Mapping::default();
        assert!(m.is_empty());
        assert_eq!(m.image_of(0), None);
    }
}
