//! Thread-safe collector that records every emerging candidate and filters
//! non-minimal ones once the search is over.
//!
//! Discovery order depends on scheduling, so a pattern can be recorded
//! before one of its own subsequences. Filtering at the end makes the output
//! independent of thread count and timing.

use dashmap::DashSet;

use crate::dataset::rebasing::Rebasing;
use crate::mining::search_state::Pattern;
use crate::results::collector::{is_subsequence, EmergingStatus, ResultsCollector};

#[derive(Debug, Default)]
pub struct PostFilteringCollector {
    rebasing: Rebasing,
    emerging_items: Vec<u32>,
    patterns: DashSet<Pattern>,
    keep_dead_ends: bool,
    dead_ends: DashSet<Pattern>,
}

/// Final, un-rebased output of a collector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectedPatterns {
    /// Minimal emerging patterns in original ids, sorted by length then ids.
    pub minimal: Vec<Vec<u32>>,
    /// Every emerging candidate recorded before filtering.
    pub recorded: usize,
    /// Frequent terminal patterns, when recording was enabled.
    pub dead_ends: Vec<Vec<u32>>,
}

fn candidate(pattern: &[u32], extension: u32) -> Pattern {
    let mut full = Pattern::with_capacity(pattern.len() + 1);
    full.push(extension);
    full.extend_from_slice(pattern);
    full
}

fn sort_patterns(patterns: &mut [Vec<u32>]) {
    patterns.sort_unstable_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
}

impl PostFilteringCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also keep frequent terminal patterns (off by default).
    pub fn with_dead_ends(mut self, keep: bool) -> Self {
        self.keep_dead_ends = keep;
        self
    }

    /// Number of emerging candidates recorded so far (before filtering).
    pub fn recorded(&self) -> usize {
        self.patterns.len()
    }

    /// Keeps only patterns with no strict recorded subsequence, adds the
    /// single emerging items and translates everything to original ids.
    pub fn finish(self) -> CollectedPatterns {
        let recorded = self.patterns.len();
        let mut by_length: Vec<Pattern> = self.patterns.into_iter().collect();
        by_length.sort_unstable_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));

        let mut kept: Vec<Pattern> = Vec::with_capacity(by_length.len());
        for pattern in by_length {
            // Shorter patterns come first, and equal lengths cannot be strict
            // subsequences of each other.
            let dominated = kept
                .iter()
                .take_while(|k| k.len() < pattern.len())
                .any(|k| is_subsequence(k, &pattern));
            if !dominated {
                kept.push(pattern);
            }
        }

        let mut minimal: Vec<Vec<u32>> = self.emerging_items.iter().map(|&i| vec![i]).collect();
        minimal.extend(kept.iter().filter_map(|p| self.rebasing.unrebase(p)));
        sort_patterns(&mut minimal);

        let mut dead_ends: Vec<Vec<u32>> = self
            .dead_ends
            .iter()
            .filter_map(|p| self.rebasing.unrebase(p.key()))
            .collect();
        sort_patterns(&mut dead_ends);

        CollectedPatterns {
            minimal,
            recorded,
            dead_ends,
        }
    }
}

impl ResultsCollector for PostFilteringCollector {
    fn set_rebasing(&mut self, rebasing: Rebasing) {
        self.rebasing = rebasing;
    }

    fn set_emerging_items(&mut self, items: Vec<u32>) {
        self.emerging_items = items;
    }

    fn collect(&self, pattern: &[u32], extension: u32) -> EmergingStatus {
        let full = candidate(pattern, extension);
        if self.patterns.contains(&full) {
            return EmergingStatus::EmergingWithoutExpansion;
        }
        let extends_known = self
            .patterns
            .iter()
            .any(|known| known.len() < full.len() && is_subsequence(known.key(), &full));
        if !self.patterns.insert(full) {
            // Another worker recorded the same candidate in between.
            return EmergingStatus::EmergingWithoutExpansion;
        }
        if extends_known {
            EmergingStatus::EmergingWithExpansion
        } else {
            EmergingStatus::NewEmerging
        }
    }

    fn dead_end(&self, pattern: &[u32], extension: u32) {
        if self.keep_dead_ends {
            self.dead_ends.insert(candidate(pattern, extension));
        }
    }
}
