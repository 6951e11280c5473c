// Test module organization for mining
// This module is only compiled during testing via #[cfg(test)] in mining/mod.rs

use crate::dataset::loader::{load_transactions, LoadedDataset};
use crate::mining::expansion::{gap_bounded_intersection, ExpansionEngine, Outcome, Thresholds};
use crate::mining::scheduler::WorkStealingScheduler;
use crate::mining::search_node::{NextStep, SearchNode};
use crate::mining::search_state::SearchState;
use crate::results::collector::ResultsCollector;
use crate::results::post_filtering::PostFilteringCollector;

use hashbrown::HashSet;
use std::sync::Mutex;

mod expansion_tests;
mod scheduler_tests;

fn thresholds(pos_min_support: usize, neg_max_support: usize, max_gap: u32) -> Thresholds {
    Thresholds {
        pos_min_support,
        neg_max_support,
        max_gap,
    }
}

fn root_state(loaded: &LoadedDataset) -> SearchState {
    SearchState::root(loaded.positive.clone(), loaded.negative.clone())
}

/// Collector wired to the dataset's rebasing, as the library does it.
fn collector_for(loaded: &LoadedDataset) -> PostFilteringCollector {
    let mut collector = PostFilteringCollector::new();
    collector.set_rebasing(loaded.rebasing.clone());
    collector.set_emerging_items(loaded.emerging_items.clone());
    collector
}

fn rebased(loaded: &LoadedDataset, original: u32) -> u32 {
    loaded.rebasing.rebased(original).unwrap()
}

fn no_denial() -> Mutex<HashSet<u32>> {
    Mutex::new(HashSet::new())
}

fn expect_frequent(outcome: Outcome) -> SearchState {
    match outcome {
        Outcome::Frequent(state) => state,
        other => panic!("expected a frequent child, got {:?}", other),
    }
}

fn match_positions(state: &SearchState, positive: bool) -> Vec<Vec<u32>> {
    let side = if positive { state.positive() } else { state.negative() };
    side.matches()
        .unwrap()
        .iter()
        .map(|m| m.as_slice().to_vec())
        .collect()
}
