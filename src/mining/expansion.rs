//! Extension of a search state by one candidate item.
//!
//! One call decides, in a single pass, whether `item + pattern` is
//! infrequent, emerging, a dead end or a frequent node to explore, and in the
//! last case builds the successor state.
//!
//! # Expansion Steps
//!
//! 1. Positive matching: gap-bounded intersection of the item's positions
//!    with the current match positions, per surviving transaction
//! 2. Abort as soon as the positive support cannot reach the lower bound
//! 3. Negative matching, stopped as soon as the negative support is at or
//!    below the upper bound (the candidate is then emerging)
//! 4. Emerging candidates go to the results collector and are never expanded
//! 5. Candidate pruning: every item is restricted to occurrences before the
//!    last matched position of each surviving transaction, and dropped when
//!    it can no longer be positive-frequent (resp. negative-infrequent)
//! 6. Items denied by emerging siblings are removed
//! 7. Compaction into the successor state

use hashbrown::HashSet;
use std::sync::{Mutex, PoisonError};

use crate::dataset::position_index::{PositionList, PresenceMap, TransactionLists};
use crate::mining::search_state::{Pattern, SearchState, SideIndex};
use crate::mining::stats::MiningStats;
use crate::results::collector::{EmergingStatus, ResultsCollector};

/// Run-wide bounds, fixed for the whole search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    /// A pattern is frequent when its positive support is `>=` this.
    pub pos_min_support: usize,
    /// An emerging pattern has negative support `<=` this.
    pub neg_max_support: usize,
    /// Maximum number of positions skipped between consecutive pattern items.
    pub max_gap: u32,
}

/// Verdict of one expansion attempt.
#[derive(Debug)]
pub enum Outcome {
    /// Frequent, not emerging, with candidates left: explore the child.
    Frequent(SearchState),
    /// Positive support below the lower bound.
    Infrequent,
    /// Frequent and not emerging, but no candidate survives pruning.
    DeadEnd,
    /// Emerging and new; reported.
    Emerging,
    /// Emerging but contains an already reported pattern; reported.
    EmergingWithExpansion,
    /// Emerging and already known; dropped.
    EmergingAncestor,
}

impl Outcome {
    /// Whether the extended pattern itself qualified as emerging.
    pub fn is_emerging(&self) -> bool {
        matches!(
            self,
            Outcome::Emerging | Outcome::EmergingWithExpansion | Outcome::EmergingAncestor
        )
    }
}

/// Positions of `occurrences` that can precede one of `anchors` within the
/// gap.
///
/// An occurrence `q` is kept when some anchor `p > q` satisfies
/// `p - 1 - max_gap <= q`, i.e. `q` lies in the window `[p-1-max_gap, p)`.
/// Both inputs are ascending; once the occurrences pass the last anchor the
/// scan stops.
///
/// # Returns
///
/// `None` when no occurrence matches.
///
/// # Examples
///
/// ```
/// # use gapmine::mining::expansion::gap_bounded_intersection;
/// // Adjacent only.
/// assert_eq!(gap_bounded_intersection(&[5], &[3, 4], 0).unwrap().as_slice(), &[4]);
/// // Window [2, 5) before anchor 5.
/// assert_eq!(gap_bounded_intersection(&[5], &[1, 2, 4], 2).unwrap().as_slice(), &[2, 4]);
/// assert!(gap_bounded_intersection(&[5], &[6, 7], 3).is_none());
/// ```
pub fn gap_bounded_intersection(
    anchors: &[u32],
    occurrences: &[u32],
    max_gap: u32,
) -> Option<PositionList> {
    let mut anchors = anchors.iter().copied();
    let mut window_end = anchors.next()?;
    let mut matched = Vec::new();

    'occurrences: for &q in occurrences {
        while q >= window_end {
            match anchors.next() {
                Some(next) => window_end = next,
                None => break 'occurrences,
            }
        }
        if q >= window_end.saturating_sub(max_gap).saturating_sub(1) {
            matched.push(q);
        }
    }
    PositionList::from_sorted(matched)
}

/// Restricts every item of `presence` to the surviving transactions and to
/// occurrences before the last matched position in each.
///
/// `survivors` lists `(old local index, last matched position)` in order; the
/// new transaction axis is their enumeration order. Items rejected by
/// `wanted` are skipped, and `keep` decides on the restricted support.
fn restrict_presence(
    presence: &PresenceMap,
    survivors: &[(usize, u32)],
    wanted: impl Fn(u32) -> bool,
    keep: impl Fn(usize) -> bool,
) -> PresenceMap {
    let mut restricted = PresenceMap::with_capacity(survivors.len(), presence.len());
    for (item, lists) in presence.iter() {
        if !wanted(item) {
            continue;
        }
        let mut support = 0;
        let narrowed: TransactionLists = survivors
            .iter()
            .map(|&(t, last)| {
                let list = lists[t].as_ref().and_then(|l| l.trimmed_before(last));
                if list.is_some() {
                    support += 1;
                }
                list
            })
            .collect();
        if keep(support) {
            restricted.insert(item, narrowed);
        }
    }
    restricted
}

fn survivors(expanded: &[Option<PositionList>]) -> Vec<(usize, u32)> {
    expanded
        .iter()
        .enumerate()
        .filter_map(|(t, m)| m.as_ref().map(|m| (t, m.last())))
        .collect()
}

fn compact(expanded: Vec<Option<PositionList>>) -> Box<[PositionList]> {
    expanded.into_iter().flatten().collect()
}

/// Matches of `item + pattern` in one transaction.
#[inline]
fn match_transaction(
    side: &SideIndex,
    t: usize,
    occurrences: Option<&PositionList>,
    max_gap: u32,
) -> Option<PositionList> {
    let occurrences = occurrences?;
    match side.matches() {
        // Empty pattern: every occurrence starts a match.
        None => Some(occurrences.clone()),
        Some(anchors) => {
            gap_bounded_intersection(anchors[t].as_slice(), occurrences.as_slice(), max_gap)
        }
    }
}

/// Stateless apart from the run's collector and counters; shared by every
/// worker.
pub struct ExpansionEngine<'a> {
    thresholds: Thresholds,
    collector: &'a dyn ResultsCollector,
    stats: MiningStats,
}

impl<'a> ExpansionEngine<'a> {
    pub fn new(thresholds: Thresholds, collector: &'a dyn ResultsCollector) -> Self {
        Self {
            thresholds,
            collector,
            stats: MiningStats::default(),
        }
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    pub fn stats(&self) -> &MiningStats {
        &self.stats
    }

    /// Extends `state` with `item` (prepended to the pattern).
    ///
    /// # Arguments
    ///
    /// * `state` - Node being expanded; only read
    /// * `item` - Candidate, one of `state`'s positive presence keys
    /// * `denied` - Items that emerging siblings ruled out for this level
    ///
    /// # Returns
    ///
    /// The verdict, carrying the successor state for [`Outcome::Frequent`].
    pub fn expand(&self, state: &SearchState, item: u32, denied: &Mutex<HashSet<u32>>) -> Outcome {
        let outcome = self.expand_inner(state, item, denied);
        self.stats.record(&outcome);
        outcome
    }

    fn expand_inner(&self, state: &SearchState, item: u32, denied: &Mutex<HashSet<u32>>) -> Outcome {
        let Thresholds {
            pos_min_support,
            neg_max_support,
            max_gap,
        } = self.thresholds;

        // Positive side, aborting as soon as support cannot be reached.
        let Some(pos_lists) = state.positive().presence().get(item) else {
            return Outcome::Infrequent;
        };
        let mut pos_support = pos_lists.len();
        if pos_support < pos_min_support {
            return Outcome::Infrequent;
        }
        let mut pos_expanded: Vec<Option<PositionList>> = Vec::with_capacity(pos_lists.len());
        for (t, occurrences) in pos_lists.iter().enumerate() {
            let matched = match_transaction(state.positive(), t, occurrences.as_ref(), max_gap);
            if matched.is_none() {
                pos_support -= 1;
                if pos_support < pos_min_support {
                    return Outcome::Infrequent;
                }
            }
            pos_expanded.push(matched);
        }

        // Negative side, stopping once the candidate is known to emerge.
        let mut neg_expanded: Vec<Option<PositionList>> = Vec::new();
        let emerging = match state.negative().presence().get(item) {
            None => true,
            Some(neg_lists) => {
                let mut neg_support = neg_lists.len();
                let mut emerging = neg_support <= neg_max_support;
                neg_expanded.reserve(neg_lists.len());
                for (t, occurrences) in neg_lists.iter().enumerate() {
                    if emerging {
                        break;
                    }
                    let matched =
                        match_transaction(state.negative(), t, occurrences.as_ref(), max_gap);
                    if matched.is_none() {
                        neg_support -= 1;
                        emerging = neg_support <= neg_max_support;
                    }
                    neg_expanded.push(matched);
                }
                emerging
            }
        };

        if emerging {
            return match self.collector.collect(state.pattern(), item) {
                EmergingStatus::NewEmerging => Outcome::Emerging,
                EmergingStatus::EmergingWithExpansion => Outcome::EmergingWithExpansion,
                // The negative scan may have been cut short, so no successor
                // can be built either way.
                EmergingStatus::EmergingWithoutExpansion | EmergingStatus::NotEmerging => {
                    Outcome::EmergingAncestor
                }
            };
        }

        // Successor candidates.
        let pos_survivors = survivors(&pos_expanded);
        let mut positive = restrict_presence(
            state.positive().presence(),
            &pos_survivors,
            |_| true,
            |support| support >= pos_min_support,
        );
        if positive.is_empty() {
            self.collector.dead_end(state.pattern(), item);
            return Outcome::DeadEnd;
        }
        {
            let denied = denied.lock().unwrap_or_else(PoisonError::into_inner);
            if !denied.is_empty() {
                positive.remove_all(&denied);
            }
        }
        // The negative side only tracks candidates; a candidate missing
        // from it is emerging.
        let neg_survivors = survivors(&neg_expanded);
        let negative = restrict_presence(
            state.negative().presence(),
            &neg_survivors,
            |candidate| positive.contains(candidate),
            |support| support > neg_max_support,
        );

        let mut pattern = Pattern::with_capacity(state.level() + 1);
        pattern.push(item);
        pattern.extend_from_slice(state.pattern());

        Outcome::Frequent(SearchState::from_parts(
            pattern,
            SideIndex::new(positive, Some(compact(pos_expanded))),
            SideIndex::new(negative, Some(compact(neg_expanded))),
        ))
    }
}
