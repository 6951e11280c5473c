// Test module organization for dataset
// This module is only compiled during testing via #[cfg(test)] in dataset/mod.rs

use crate::dataset::loader::load_transactions;
use crate::dataset::parser::{parse_transaction_bytes, parse_transactions};
use crate::dataset::position_index::{PositionList, PresenceMap, TransactionLists};
use crate::dataset::rebasing::Rebasing;

use hashbrown::HashSet;


/// Original ids in rebased order.
fn originals(rebasing: &Rebasing) -> Vec<u32> {
    (0..rebasing.len() as u32)
        .map(|i| rebasing.original(i).unwrap())
        .collect()
}

/// Shorthand for a position list built from a literal.
fn list(positions: &[u32]) -> PositionList {
    PositionList::from_sorted(positions.to_vec()).unwrap()
}
