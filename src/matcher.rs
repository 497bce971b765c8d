//! The front door: configuration and the collecting search entry points.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::graph::ArGraph;
use crate::mapping::Mapping;
use crate::search::{Visit, enumerate};
use crate::vf::VfState;
use crate::vf2::Vf2State;

/// The relation the search enumerates. `g1` is always the pattern.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchMode {
    /// Edge- and attribute-preserving bijection between the two graphs.
    #[default]
    Isomorphism,
    /// Injection of the pattern onto an induced subgraph of the target:
    /// target edges between mapped nodes must exist in the pattern too.
    SubgraphIsomorphism,
    /// Injection preserving pattern edges only; the target may have extra
    /// edges among the mapped nodes.
    Monomorphism,
}

impl MatchMode {
    /// Whether target edges between mapped nodes must map back to the
    /// pattern.
    pub(crate) fn induced(self) -> bool {
        !matches!(self, MatchMode::Monomorphism)
    }
}

/// Which state implementation drives the search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    /// Terminal-set look-ahead only.
    Vf,
    /// Terminal-set plus fresh-neighbor look-ahead.
    #[default]
    Vf2,
}

/// Search configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Config {
    pub mode: MatchMode,
    pub algorithm: Algorithm,
}

impl Config {
    pub fn new(mode: MatchMode, algorithm: Algorithm) -> Self {
        Self { mode, algorithm }
    }

    /// VF2 search for the given relation.
    pub fn for_mode(mode: MatchMode) -> Self {
        Self {
            mode,
            algorithm: Algorithm::Vf2,
        }
    }
}

/// A configured search over one pattern/target pair.
///
/// The graphs are borrowed read-only for the lifetime of the matcher, so
/// several matchers may run over the same graphs at once (from separate
/// threads too, provided the registered comparators are `Sync` — the borrow
/// checker enforces exactly that).
pub struct Matcher<'g, N, E> {
    pattern: &'g ArGraph<N, E>,
    target: &'g ArGraph<N, E>,
    config: Config,
}

impl<'g, N, E> Matcher<'g, N, E> {
    /// A matcher with the default configuration (VF2 isomorphism).
    pub fn new(pattern: &'g ArGraph<N, E>, target: &'g ArGraph<N, E>) -> Self {
        Self::with_config(pattern, target, Config::default())
    }

    pub fn with_config(
        pattern: &'g ArGraph<N, E>,
        target: &'g ArGraph<N, E>,
        config: Config,
    ) -> Self {
        Matcher {
            pattern,
            target,
            config,
        }
    }

    /// Runs the search, handing every complete mapping to `visit`. The
    /// visitor's verdict is propagated: `Stop` unwinds immediately.
    pub fn visit<V>(&self, visit: &mut V) -> Visit
    where
        V: FnMut(&Mapping) -> Visit,
    {
        match self.config.algorithm {
            Algorithm::Vf => {
                let state = VfState::new(self.pattern, self.target, self.config.mode);
                enumerate(&state, visit)
            }
            Algorithm::Vf2 => {
                let state = Vf2State::new(self.pattern, self.target, self.config.mode);
                enumerate(&state, visit)
            }
        }
    }

    /// Collects every mapping, in the deterministic search order.
    pub fn find_all(&self) -> Vec<Mapping> {
        debug!(
            "starting {:?}/{:?} search: pattern nodes: {}, target nodes: {}",
            self.config.mode,
            self.config.algorithm,
            self.pattern.node_count(),
            self.target.node_count()
        );
        let mut mappings = Vec::new();
        self.visit(&mut |m| {
            mappings.push(m.clone());
            Visit::Continue
        });
        debug!("search complete: {} mappings", mappings.len());
        mappings
    }

    /// Stops at the first mapping, if any.
    pub fn find_first(&self) -> Option<Mapping> {
        let mut found = None;
        self.visit(&mut |m| {
            found = Some(m.clone());
            Visit::Stop
        });
        found
    }

    /// Number of mappings, without keeping them.
    pub fn count(&self) -> usize {
        let mut n = 0;
        self.visit(&mut |_| {
            n += 1;
            Visit::Continue
        });
        n
    }
}

/// All isomorphisms between `g1` and `g2` under VF2.
pub fn find_isomorphisms<N, E>(g1: &ArGraph<N, E>, g2: &ArGraph<N, E>) -> Vec<Mapping> {
    Matcher::with_config(g1, g2, Config::for_mode(MatchMode::Isomorphism)).find_all()
}

/// All induced embeddings of `pattern` into `target` under VF2.
pub fn find_subgraph_isomorphisms<N, E>(
    pattern: &ArGraph<N, E>,
    target: &ArGraph<N, E>,
) -> Vec<Mapping> {
    Matcher::with_config(pattern, target, Config::for_mode(MatchMode::SubgraphIsomorphism))
        .find_all()
}

/// All monomorphisms from `pattern` into `target` under VF2.
pub fn find_monomorphisms<N, E>(pattern: &ArGraph<N, E>, target: &ArGraph<N, E>) -> Vec<Mapping> {
    Matcher::with_config(pattern, target, Config::for_mode(MatchMode::Monomorphism)).find_all()
}
