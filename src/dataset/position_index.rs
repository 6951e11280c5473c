//! Per-item occurrence positions, restricted to the transactions that still
//! match the pattern being grown.
//!
//! A [`PositionList`] is a cheap view over an immutable, reference-counted
//! slice of positions. Deriving a narrower list (trimming trailing
//! occurrences) never copies or edits the underlying storage, so every
//! search state below the root shares its position data with the load-time
//! index.
//!
//! ```text
//! PresenceMap
//! └── item id ──► TransactionLists  (one slot per local transaction)
//!                 ├── Some(PositionList [0, 4, 9])
//!                 ├── None                         (item absent)
//!                 └── Some(PositionList [2])
//! ```

use hashbrown::{HashMap, HashSet};
use std::sync::Arc;

/// Ascending occurrence positions of one item inside one transaction.
///
/// Always non-empty: an item that does not occur in a transaction has no
/// list at all (`None` in its [`TransactionLists`]).
#[derive(Clone, PartialEq, Eq)]
pub struct PositionList {
    positions: Arc<[u32]>,
    len: u32,
}

impl PositionList {
    /// Wraps positions already sorted in ascending order.
    ///
    /// Returns `None` for an empty vector, since empty lists are represented
    /// by absence.
    pub fn from_sorted(positions: Vec<u32>) -> Option<Self> {
        if positions.is_empty() {
            return None;
        }
        debug_assert!(positions.windows(2).all(|w| w[0] < w[1]));
        let len = positions.len() as u32;
        Some(Self {
            positions: Arc::from(positions),
            len,
        })
    }

    #[inline]
    pub fn as_slice(&self) -> &[u32] {
        &self.positions[..self.len as usize]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub fn last(&self) -> u32 {
        self.positions[self.len as usize - 1]
    }

    /// Shares the storage but keeps only occurrences strictly before `bound`.
    ///
    /// Returns `None` when no occurrence lies before `bound`.
    pub fn trimmed_before(&self, bound: u32) -> Option<Self> {
        let keep = self.as_slice().partition_point(|&p| p < bound);
        if keep == 0 {
            None
        } else {
            Some(Self {
                positions: Arc::clone(&self.positions),
                len: keep as u32,
            })
        }
    }
}

impl std::fmt::Debug for PositionList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Position lists of one item across the local transaction axis.
pub type TransactionLists = Box<[Option<PositionList>]>;

/// Item id → per-transaction occurrence positions for one collection.
///
/// Built once at load time for the root state; every later map is a
/// compacted derivative owned by exactly one search state.
#[derive(Debug, Clone, Default)]
pub struct PresenceMap {
    transactions: usize,
    items: HashMap<u32, TransactionLists>,
}

impl PresenceMap {
    /// Creates an empty map over `transactions` local transactions.
    pub fn with_capacity(transactions: usize, items: usize) -> Self {
        Self {
            transactions,
            items: HashMap::with_capacity(items),
        }
    }

    /// Length of the transaction axis shared by every entry.
    pub fn transactions(&self) -> usize {
        self.transactions
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, item: u32) -> Option<&TransactionLists> {
        self.items.get(&item)
    }

    pub fn contains(&self, item: u32) -> bool {
        self.items.contains_key(&item)
    }

    /// Inserts the lists of `item`.
    ///
    /// # Panics
    ///
    /// Panics in debug builds when `lists` does not span the map's
    /// transaction axis.
    pub fn insert(&mut self, item: u32, lists: TransactionLists) {
        debug_assert_eq!(lists.len(), self.transactions);
        self.items.insert(item, lists);
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &TransactionLists)> {
        self.items.iter().map(|(&item, lists)| (item, lists))
    }

    /// Item ids in ascending order.
    pub fn sorted_items(&self) -> Vec<u32> {
        let mut items: Vec<u32> = self.items.keys().copied().collect();
        items.sort_unstable();
        items
    }

    /// Drops every item contained in `denied`.
    pub fn remove_all(&mut self, denied: &HashSet<u32>) {
        if denied.len() < self.items.len() {
            for item in denied {
                self.items.remove(item);
            }
        } else {
            self.items.retain(|item, _| !denied.contains(item));
        }
    }

    /// Number of local transactions in which `item` occurs.
    pub fn support(&self, item: u32) -> usize {
        self.items
            .get(&item)
            .map(|lists| lists.iter().filter(|l| l.is_some()).count())
            .unwrap_or(0)
    }
}
