// Test module organization for results
// This module is only compiled during testing via #[cfg(test)] in results/mod.rs

use crate::dataset::rebasing::Rebasing;
use crate::results::collector::{is_subsequence, EmergingStatus, ResultsCollector};
use crate::results::post_filtering::PostFilteringCollector;

use std::sync::Arc;
use std::thread;


/// Identity rebasing over `0..n`.
fn identity(n: u32) -> Rebasing {
    Rebasing::from_ordered((0..n).collect())
}
