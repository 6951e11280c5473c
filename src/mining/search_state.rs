use smallvec::SmallVec;

use crate::dataset::position_index::{PositionList, PresenceMap};

/// Pattern items, most recently added first (which is also left-to-right
/// transaction order, since every extension occurs before the current
/// match).
pub type Pattern = SmallVec<[u32; 8]>;

/// One collection's view of a search node.
///
/// `matches[t]` holds the positions at which the current pattern starts a
/// valid gap-bounded match in local transaction `t`; `presence` uses the same
/// transaction axis. `matches` is `None` at the root, where the pattern is
/// empty and every transaction is still in play.
#[derive(Debug, Clone)]
pub struct SideIndex {
    pub(crate) presence: PresenceMap,
    pub(crate) matches: Option<Box<[PositionList]>>,
}

impl SideIndex {
    pub fn new(presence: PresenceMap, matches: Option<Box<[PositionList]>>) -> Self {
        if let Some(m) = &matches {
            debug_assert_eq!(m.len(), presence.transactions());
        }
        Self { presence, matches }
    }

    pub fn presence(&self) -> &PresenceMap {
        &self.presence
    }

    pub fn matches(&self) -> Option<&[PositionList]> {
        self.matches.as_deref()
    }

    /// Transactions still matching the pattern.
    pub fn support(&self) -> usize {
        self.presence.transactions()
    }
}

/// Immutable identity of one node of the search tree.
///
/// Created once by a successful expansion (or as the root) and never mutated
/// afterwards; owners and thieves read it concurrently.
#[derive(Debug, Clone)]
pub struct SearchState {
    pattern: Pattern,
    positive: SideIndex,
    negative: SideIndex,
}

impl SearchState {
    /// Root state over the load-time presence maps, with an empty pattern.
    pub fn root(positive: PresenceMap, negative: PresenceMap) -> Self {
        Self {
            pattern: Pattern::new(),
            positive: SideIndex::new(positive, None),
            negative: SideIndex::new(negative, None),
        }
    }

    pub(crate) fn from_parts(pattern: Pattern, positive: SideIndex, negative: SideIndex) -> Self {
        Self {
            pattern,
            positive,
            negative,
        }
    }

    pub fn pattern(&self) -> &[u32] {
        &self.pattern
    }

    /// Pattern length; 0 at the root.
    pub fn level(&self) -> usize {
        self.pattern.len()
    }

    pub fn positive(&self) -> &SideIndex {
        &self.positive
    }

    pub fn negative(&self) -> &SideIndex {
        &self.negative
    }

    /// Candidate extension items in ascending order.
    pub fn extensions(&self) -> Vec<u32> {
        self.positive.presence.sorted_items()
    }
}
