//! Run telemetry. Counters are advisory: nothing in the search reads them.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::mining::expansion::Outcome;

/// Expansion counters shared by every worker.
#[derive(Debug, Default)]
pub struct MiningStats {
    expansions: AtomicU64,
    frequent: AtomicU64,
    infrequent: AtomicU64,
    dead_ends: AtomicU64,
    emerging: AtomicU64,
    emerging_with_expansion: AtomicU64,
    emerging_ancestors: AtomicU64,
}

/// Plain copy of [`MiningStats`] taken after the run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutcomeCounts {
    pub expansions: u64,
    pub frequent: u64,
    pub infrequent: u64,
    pub dead_ends: u64,
    pub emerging: u64,
    pub emerging_with_expansion: u64,
    pub emerging_ancestors: u64,
}

impl MiningStats {
    pub fn record(&self, outcome: &Outcome) {
        self.expansions.fetch_add(1, Ordering::Relaxed);
        let counter = match outcome {
            Outcome::Frequent(_) => &self.frequent,
            Outcome::Infrequent => &self.infrequent,
            Outcome::DeadEnd => &self.dead_ends,
            Outcome::Emerging => &self.emerging,
            Outcome::EmergingWithExpansion => &self.emerging_with_expansion,
            Outcome::EmergingAncestor => &self.emerging_ancestors,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> OutcomeCounts {
        OutcomeCounts {
            expansions: self.expansions.load(Ordering::Relaxed),
            frequent: self.frequent.load(Ordering::Relaxed),
            infrequent: self.infrequent.load(Ordering::Relaxed),
            dead_ends: self.dead_ends.load(Ordering::Relaxed),
            emerging: self.emerging.load(Ordering::Relaxed),
            emerging_with_expansion: self.emerging_with_expansion.load(Ordering::Relaxed),
            emerging_ancestors: self.emerging_ancestors.load(Ordering::Relaxed),
        }
    }
}

/// Per-worker scheduling counters, summed after join.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerStats {
    /// Children pushed after a successful expansion.
    pub nodes_explored: u64,
    /// Successful steals.
    pub steals: u64,
}

impl WorkerStats {
    pub fn merge(&mut self, other: &WorkerStats) {
        self.nodes_explored += other.nodes_explored;
        self.steals += other.steals;
    }
}

/// Summary of one mining run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MiningReport {
    pub threads: usize,
    pub outcomes: OutcomeCounts,
    pub workers: WorkerStats,
    /// Emerging candidates recorded before minimality filtering.
    pub recorded_candidates: usize,
    pub elapsed: Duration,
}

impl std::fmt::Display for MiningReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let o = &self.outcomes;
        writeln!(f, "  Threads: {}", self.threads)?;
        writeln!(f, "  Expansions: {}", o.expansions)?;
        writeln!(
            f,
            "    frequent: {}, infrequent: {}, dead ends: {}",
            o.frequent, o.infrequent, o.dead_ends
        )?;
        writeln!(
            f,
            "    emerging: {} new, {} with expansion, {} known",
            o.emerging, o.emerging_with_expansion, o.emerging_ancestors
        )?;
        writeln!(f, "  Nodes explored: {}", self.workers.nodes_explored)?;
        writeln!(f, "  Steals: {}", self.workers.steals)?;
        writeln!(f, "  Recorded candidates: {}", self.recorded_candidates)?;
        write!(f, "  Elapsed: {:.3}s", self.elapsed.as_secs_f64())
    }
}
