use super::*;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Runs a full search and returns the minimal patterns plus the number of
/// nodes pushed.
fn run(loaded: &LoadedDataset, t: Thresholds, threads: usize, deny: bool) -> (Vec<Vec<u32>>, u64) {
    let collector = collector_for(loaded);
    let engine = ExpansionEngine::new(t, &collector);
    let root = SearchNode::new(root_state(loaded)).with_sibling_denial(deny);
    let workers = WorkStealingScheduler::new(threads).run(root, &engine).unwrap();
    drop(engine);
    (collector.finish().minimal, workers.nodes_explored)
}

fn random_dataset(seed: u64, alphabet: u32, transactions: usize, max_len: usize) -> LoadedDataset {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut generate = |count: usize| -> Vec<Vec<u32>> {
        (0..count)
            .map(|_| {
                let len = rng.random_range(1..=max_len);
                (0..len).map(|_| rng.random_range(0..alphabet)).collect()
            })
            .collect()
    };
    let positive = generate(transactions);
    let negative = generate(transactions);
    load_transactions(&positive, &negative, 3, 1)
}

#[test]
fn test_scheduler_clamps_threads() {
    assert_eq!(WorkStealingScheduler::new(0).threads(), 1);
    assert_eq!(WorkStealingScheduler::new(6).threads(), 6);
}

#[test]
fn test_scheduler_basic_example() {
    let positive = vec![vec![1, 2, 3], vec![1, 3], vec![2, 3]];
    let negative = vec![vec![2]];
    let loaded = load_transactions(&positive, &negative, 2, 0);
    for threads in [1, 4] {
        let (patterns, _) = run(&loaded, thresholds(2, 0, 0), threads, true);
        assert_eq!(patterns, vec![vec![1], vec![3]]);
    }
}

#[test]
fn test_scheduler_empty_universe() {
    let loaded = load_transactions(&[vec![1], vec![2]], &[], 2, 0);
    let (patterns, nodes) = run(&loaded, thresholds(2, 0, 0), 3, true);
    assert!(patterns.is_empty());
    assert_eq!(nodes, 0);
}

#[test]
fn test_scheduler_finds_reversed_pair() {
    let positive = vec![vec![1, 2], vec![1, 2], vec![5, 1, 2]];
    let negative = vec![vec![2, 1], vec![2, 1], vec![2, 5, 1]];
    let loaded = load_transactions(&positive, &negative, 2, 0);
    let (patterns, _) = run(&loaded, thresholds(2, 0, 0), 2, true);
    assert_eq!(patterns, vec![vec![1, 2]]);
}

#[test]
fn test_scheduler_thread_count_does_not_change_output() {
    for seed in 0..6 {
        let loaded = random_dataset(seed, 5, 14, 9);
        for gap in 0..3 {
            let t = thresholds(3, 1, gap);
            let (single, single_nodes) = run(&loaded, t, 1, false);
            for threads in [2, 4, 8] {
                let (patterns, nodes) = run(&loaded, t, threads, false);
                assert_eq!(patterns, single, "seed {} gap {} threads {}", seed, gap, threads);
                // Without denial the explored tree is fixed.
                assert_eq!(nodes, single_nodes, "seed {} gap {} threads {}", seed, gap, threads);

                let (denied, _) = run(&loaded, t, threads, true);
                assert_eq!(denied, single, "seed {} gap {} threads {}", seed, gap, threads);
            }
        }
    }
}
