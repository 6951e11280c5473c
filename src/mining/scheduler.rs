//! Depth-first, work-stealing exploration of the search tree.
//!
//! # Architecture
//!
//! ```text
//!    worker 0          worker 1          worker 2
//!   ┌─────────┐       ┌─────────┐       ┌─────────┐
//!   │ node    │ top   │ node    │       │ (empty) │
//!   │ node    │       │ node    │       └────┬────┘
//!   │ node    │ bottom│ node ◄──┼────────────┘ steal
//!   └─────────┘       └─────────┘
//! ```
//!
//! - Each worker owns a LIFO stack of shared nodes behind a reader/writer
//!   lock. Only the owner writes it (push/pop at the top).
//! - The owner repeatedly asks its top node for the next expanded candidate:
//!   a child is pushed, an exhausted node is popped.
//! - A worker with an empty stack scans the other stacks from bottom to top
//!   under their read locks and claims one candidate of the first node that
//!   still has one. The node stays where it is; the thief pushes it onto its
//!   own stack too, so both keep draining its cursor.
//! - Locks cover structural access only; no lock is held while expanding.
//! - A worker that finds nothing to steal exits. The run ends when every
//!   worker has exited.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Arc, PoisonError, RwLock};
use std::thread;

use crate::mining::expansion::ExpansionEngine;
use crate::mining::search_node::{NextStep, SearchNode};
use crate::mining::stats::WorkerStats;

/// One worker's stack of pending nodes.
#[derive(Debug, Default)]
struct WorkerStack {
    jobs: RwLock<Vec<Arc<SearchNode>>>,
}

impl WorkerStack {
    fn push(&self, node: Arc<SearchNode>) {
        self.jobs
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(node);
    }

    fn pop(&self) {
        self.jobs.write().unwrap_or_else(PoisonError::into_inner).pop();
    }

    fn top(&self) -> Option<Arc<SearchNode>> {
        self.jobs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    /// Claims a candidate from the bottom-most node that still has one.
    fn steal_from(&self) -> Option<(Arc<SearchNode>, u32)> {
        let jobs = self.jobs.read().unwrap_or_else(PoisonError::into_inner);
        jobs.iter()
            .filter(|node| !node.is_exhausted())
            .find_map(|node| node.claim().map(|item| (Arc::clone(node), item)))
    }
}

/// Fixed pool of OS threads exploring one search tree.
pub struct WorkStealingScheduler {
    threads: usize,
}

impl WorkStealingScheduler {
    /// A thread count of 0 is treated as 1.
    pub fn new(threads: usize) -> Self {
        Self {
            threads: threads.max(1),
        }
    }

    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Explores the whole tree below `root`.
    ///
    /// # Returns
    ///
    /// Scheduling counters summed over all workers.
    ///
    /// # Errors
    ///
    /// Returns an error if a worker thread cannot be spawned or panics.
    pub fn run(
        &self,
        root: SearchNode,
        engine: &ExpansionEngine<'_>,
    ) -> Result<WorkerStats, Box<dyn std::error::Error + Send + Sync>> {
        let stacks: Vec<WorkerStack> = (0..self.threads).map(|_| WorkerStack::default()).collect();
        stacks[0].push(Arc::new(root));
        let stacks = &stacks;

        thread::scope(|scope| {
            let mut handles = Vec::with_capacity(self.threads);
            for worker_id in 0..self.threads {
                let handle = thread::Builder::new()
                    .name(format!("mining-{}", worker_id))
                    .spawn_scoped(scope, move || run_worker(worker_id, stacks, engine))?;
                handles.push(handle);
            }

            let mut total = WorkerStats::default();
            for (worker_id, handle) in handles.into_iter().enumerate() {
                let stats = handle
                    .join()
                    .map_err(|_| format!("Mining worker {} panicked", worker_id))?;
                total.merge(&stats);
            }
            Ok(total)
        })
    }
}

/// Main loop of one worker.
fn run_worker(worker_id: usize, stacks: &[WorkerStack], engine: &ExpansionEngine<'_>) -> WorkerStats {
    let own = &stacks[worker_id];
    let mut stats = WorkerStats::default();
    let mut rng = StdRng::seed_from_u64(worker_id as u64);

    loop {
        if let Some(node) = own.top() {
            match node.try_next(engine) {
                NextStep::Child(child) => {
                    stats.nodes_explored += 1;
                    own.push(Arc::new(child));
                }
                NextStep::NoChild => {}
                NextStep::Exhausted => own.pop(),
            }
            continue;
        }

        let Some((victim_node, item)) = steal(worker_id, stacks, &mut rng) else {
            break;
        };
        stats.steals += 1;
        own.push(Arc::clone(&victim_node));
        if let NextStep::Child(child) = victim_node.expand_claimed(item, engine) {
            stats.nodes_explored += 1;
            own.push(Arc::new(child));
        }
    }
    stats
}

/// Scans every other worker once, starting at a random victim.
fn steal(worker_id: usize, stacks: &[WorkerStack], rng: &mut StdRng) -> Option<(Arc<SearchNode>, u32)> {
    let workers = stacks.len();
    if workers < 2 {
        return None;
    }
    let start = rng.random_range(0..workers);
    (0..workers)
        .map(|offset| (start + offset) % workers)
        .filter(|&victim| victim != worker_id)
        .find_map(|victim| stacks[victim].steal_from())
}
