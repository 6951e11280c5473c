//! Initial load: frequency counting, filtering, rebasing and construction of
//! the root presence maps.
//!
//! # Load Steps
//!
//! 1. Count positive support (one count per transaction, duplicates ignored)
//!    and drop items below the positive lower bound
//! 2. Count negative support of the surviving items
//! 3. Items at or below the negative upper bound are emerging by themselves:
//!    they are reported directly and leave the universe
//! 4. Sort the remaining items by (negative support, positive support, id)
//!    and rebase them to `0..U`
//! 5. Build both presence maps in one pass per collection

use hashbrown::{HashMap, HashSet};

use crate::dataset::position_index::{PositionList, PresenceMap, TransactionLists};
use crate::dataset::rebasing::Rebasing;

/// Summary of a load, independent of the search that follows it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatasetInfo {
    pub positive_transactions: usize,
    pub negative_transactions: usize,
    /// Items whose positive support reaches the lower bound.
    pub positive_frequent_items: usize,
    /// Items emerging as length-1 patterns.
    pub emerging_items: usize,
    /// Size of the rebased universe handed to the search.
    pub universe_size: usize,
}

impl std::fmt::Display for DatasetInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "  Positive transactions: {}", self.positive_transactions)?;
        writeln!(f, "  Negative transactions: {}", self.negative_transactions)?;
        writeln!(f, "  Positive-frequent items: {}", self.positive_frequent_items)?;
        writeln!(f, "  Emerging single items: {}", self.emerging_items)?;
        write!(f, "  Search universe: {} items", self.universe_size)
    }
}

/// Everything the search needs from the input collections.
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    /// Root positive presence map, keyed by rebased id.
    pub positive: PresenceMap,
    /// Root negative presence map, keyed by rebased id.
    pub negative: PresenceMap,
    pub rebasing: Rebasing,
    /// Original ids of the items emerging by themselves, ascending.
    pub emerging_items: Vec<u32>,
    pub info: DatasetInfo,
}

/// Counts in how many transactions each item occurs.
///
/// When `restrict_to` is given, items outside it are not counted.
fn count_support(
    transactions: &[Vec<u32>],
    restrict_to: Option<&HashMap<u32, usize>>,
) -> HashMap<u32, usize> {
    let mut counts: HashMap<u32, usize> = HashMap::new();
    let mut seen: HashSet<u32> = HashSet::new();
    for transaction in transactions {
        seen.clear();
        for &item in transaction {
            if let Some(allowed) = restrict_to {
                if !allowed.contains_key(&item) {
                    continue;
                }
            }
            if seen.insert(item) {
                *counts.entry(item).or_insert(0) += 1;
            }
        }
    }
    counts
}

/// Builds the presence map of one collection for the retained items.
///
/// Positions are token indices in the original transaction, so discarded
/// items still occupy positions for the gap constraint.
fn build_presence_map(transactions: &[Vec<u32>], rebasing: &Rebasing) -> PresenceMap {
    let universe = rebasing.len();
    let mut raw: Vec<Vec<Option<Vec<u32>>>> = (0..universe)
        .map(|_| vec![None; transactions.len()])
        .collect();
    let mut present = vec![false; universe];

    for (tid, transaction) in transactions.iter().enumerate() {
        for (position, &original) in transaction.iter().enumerate() {
            if let Some(item) = rebasing.rebased(original) {
                present[item as usize] = true;
                raw[item as usize][tid]
                    .get_or_insert_with(Vec::new)
                    .push(position as u32);
            }
        }
    }

    let mut map = PresenceMap::with_capacity(transactions.len(), universe);
    for (item, lists) in raw.into_iter().enumerate() {
        if !present[item] {
            continue;
        }
        let lists: TransactionLists = lists
            .into_iter()
            .map(|positions| positions.and_then(PositionList::from_sorted))
            .collect();
        map.insert(item as u32, lists);
    }
    map
}

/// Runs the full initial load over already parsed collections.
///
/// # Arguments
///
/// * `positive` - Positive transactions (original ids)
/// * `negative` - Negative transactions (original ids)
/// * `pos_min_support` - Minimum positive support of a pattern (`>=`)
/// * `neg_max_support` - Maximum negative support of an emerging pattern (`<=`)
///
/// # Examples
///
/// ```
/// # use gapmine::dataset::loader::load_transactions;
/// let positive = vec![vec![1, 2, 3], vec![1, 3], vec![2, 3]];
/// let negative = vec![vec![2]];
/// let loaded = load_transactions(&positive, &negative, 2, 0);
/// assert_eq!(loaded.emerging_items, vec![1, 3]);
/// assert_eq!(loaded.rebasing.len(), 1);
/// ```
pub fn load_transactions(
    positive: &[Vec<u32>],
    negative: &[Vec<u32>],
    pos_min_support: usize,
    neg_max_support: usize,
) -> LoadedDataset {
    let mut pos_counts = count_support(positive, None);
    pos_counts.retain(|_, support| *support >= pos_min_support);
    let positive_frequent_items = pos_counts.len();

    let neg_counts = count_support(negative, Some(&pos_counts));

    let mut emerging_items = Vec::new();
    let mut kept: Vec<(usize, usize, u32)> = Vec::with_capacity(pos_counts.len());
    for (&item, &pos_support) in &pos_counts {
        let neg_support = neg_counts.get(&item).copied().unwrap_or(0);
        if neg_support <= neg_max_support {
            emerging_items.push(item);
        } else {
            kept.push((neg_support, pos_support, item));
        }
    }
    emerging_items.sort_unstable();
    kept.sort_unstable();

    let rebasing = Rebasing::from_ordered(kept.into_iter().map(|(_, _, item)| item).collect());
    let positive_map = build_presence_map(positive, &rebasing);
    let negative_map = build_presence_map(negative, &rebasing);

    let info = DatasetInfo {
        positive_transactions: positive.len(),
        negative_transactions: negative.len(),
        positive_frequent_items,
        emerging_items: emerging_items.len(),
        universe_size: rebasing.len(),
    };

    LoadedDataset {
        positive: positive_map,
        negative: negative_map,
        rebasing,
        emerging_items,
        info,
    }
}
