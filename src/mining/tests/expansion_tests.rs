use super::*;

#[test]
fn test_intersection_adjacent_only() {
    let matched = gap_bounded_intersection(&[2, 6], &[0, 1, 4, 5], 0).unwrap();
    assert_eq!(matched.as_slice(), &[1, 5]);
}

#[test]
fn test_intersection_windows_across_anchors() {
    let matched = gap_bounded_intersection(&[3, 10], &[0, 1, 2, 3, 7, 8, 9, 11], 1).unwrap();
    assert_eq!(matched.as_slice(), &[1, 2, 8, 9]);
}

#[test]
fn test_intersection_occurrence_at_anchor_not_kept() {
    assert!(gap_bounded_intersection(&[4], &[4], 10).is_none());
}

#[test]
fn test_intersection_huge_gap_keeps_everything_before() {
    let matched = gap_bounded_intersection(&[2, 9], &[0, 1, 5, 12], u32::MAX).unwrap();
    assert_eq!(matched.as_slice(), &[0, 1, 5]);
}

#[test]
fn test_intersection_empty_inputs() {
    assert!(gap_bounded_intersection(&[], &[1, 2], 3).is_none());
    assert!(gap_bounded_intersection(&[5], &[], 3).is_none());
}

/// Positive: two transactions with 1 2 3 and one reversed.
fn ordered_dataset() -> LoadedDataset {
    let positive = vec![vec![1, 2, 3], vec![1, 2, 3], vec![3, 2, 1]];
    let negative = vec![vec![1, 2, 3], vec![1, 2, 3]];
    load_transactions(&positive, &negative, 2, 1)
}

#[test]
fn test_expand_root_builds_child() {
    let loaded = ordered_dataset();
    let collector = collector_for(&loaded);
    let engine = ExpansionEngine::new(thresholds(2, 1, 0), &collector);
    let root = root_state(&loaded);

    let child = expect_frequent(engine.expand(&root, rebased(&loaded, 3), &no_denial()));
    assert_eq!(child.pattern(), &[rebased(&loaded, 3)]);
    assert_eq!(child.positive().support(), 3);
    assert_eq!(child.negative().support(), 2);
    assert_eq!(match_positions(&child, true), vec![vec![2], vec![2], vec![0]]);

    // Nothing precedes 3 in the reversed transaction; 3 itself has no
    // earlier occurrence anywhere.
    let mut expected = vec![rebased(&loaded, 1), rebased(&loaded, 2)];
    expected.sort_unstable();
    assert_eq!(child.extensions(), expected);
    assert_eq!(child.positive().presence().support(rebased(&loaded, 1)), 2);
    assert!(child.negative().presence().contains(rebased(&loaded, 2)));
}

#[test]
fn test_expand_chain_to_dead_end() {
    let loaded = ordered_dataset();
    let collector = collector_for(&loaded);
    let engine = ExpansionEngine::new(thresholds(2, 1, 0), &collector);
    let root = root_state(&loaded);

    let three = expect_frequent(engine.expand(&root, rebased(&loaded, 3), &no_denial()));
    let two_three = expect_frequent(engine.expand(&three, rebased(&loaded, 2), &no_denial()));
    assert_eq!(
        two_three.pattern(),
        &[rebased(&loaded, 2), rebased(&loaded, 3)]
    );
    assert_eq!(two_three.positive().support(), 2);
    assert_eq!(match_positions(&two_three, true), vec![vec![1], vec![1]]);
    assert_eq!(two_three.extensions(), vec![rebased(&loaded, 1)]);

    let outcome = engine.expand(&two_three, rebased(&loaded, 1), &no_denial());
    assert!(matches!(outcome, Outcome::DeadEnd), "{:?}", outcome);
}

#[test]
fn test_expand_gap_decides_frequency() {
    let loaded = ordered_dataset();
    let collector = collector_for(&loaded);
    let root = root_state(&loaded);

    // 1 _ 3 needs one skipped position.
    let strict = ExpansionEngine::new(thresholds(2, 1, 0), &collector);
    let three = expect_frequent(strict.expand(&root, rebased(&loaded, 3), &no_denial()));
    let outcome = strict.expand(&three, rebased(&loaded, 1), &no_denial());
    assert!(matches!(outcome, Outcome::Infrequent), "{:?}", outcome);

    let loose = ExpansionEngine::new(thresholds(2, 1, 1), &collector);
    let outcome = loose.expand(&three, rebased(&loaded, 1), &no_denial());
    assert!(matches!(outcome, Outcome::DeadEnd), "{:?}", outcome);
}

#[test]
fn test_expand_unknown_item_is_infrequent() {
    let loaded = ordered_dataset();
    let collector = collector_for(&loaded);
    let engine = ExpansionEngine::new(thresholds(2, 1, 0), &collector);
    let outcome = engine.expand(&root_state(&loaded), 1000, &no_denial());
    assert!(matches!(outcome, Outcome::Infrequent));
}

/// `1 2` is common in the positive collection, only `2 1` in the negative.
fn reversed_dataset() -> LoadedDataset {
    let positive = vec![vec![1, 2], vec![1, 2]];
    let negative = vec![vec![2, 1], vec![2, 1]];
    load_transactions(&positive, &negative, 2, 0)
}

#[test]
fn test_expand_emerging_is_collected() {
    let loaded = reversed_dataset();
    let collector = collector_for(&loaded);
    let engine = ExpansionEngine::new(thresholds(2, 0, 0), &collector);

    let two = expect_frequent(engine.expand(&root_state(&loaded), rebased(&loaded, 2), &no_denial()));
    // Item 1 never precedes 2 in the negative collection.
    assert!(two.negative().presence().is_empty());

    let outcome = engine.expand(&two, rebased(&loaded, 1), &no_denial());
    assert!(matches!(outcome, Outcome::Emerging), "{:?}", outcome);
    assert!(outcome.is_emerging());

    // Same candidate again is already known.
    let outcome = engine.expand(&two, rebased(&loaded, 1), &no_denial());
    assert!(matches!(outcome, Outcome::EmergingAncestor), "{:?}", outcome);

    assert_eq!(engine.stats().snapshot().emerging, 1);
    drop(engine);
    assert_eq!(collector.finish().minimal, vec![vec![1, 2]]);
}

#[test]
fn test_expand_emerging_over_known_subsequence() {
    let loaded = reversed_dataset();
    let collector = collector_for(&loaded);
    collector.collect(&[], rebased(&loaded, 1));
    let engine = ExpansionEngine::new(thresholds(2, 0, 0), &collector);

    let two = expect_frequent(engine.expand(&root_state(&loaded), rebased(&loaded, 2), &no_denial()));
    let outcome = engine.expand(&two, rebased(&loaded, 1), &no_denial());
    assert!(matches!(outcome, Outcome::EmergingWithExpansion), "{:?}", outcome);
}

#[test]
fn test_negative_retention_is_strict() {
    let positive = vec![vec![1, 2], vec![1, 2]];
    // After matching 2, item 1 precedes it in exactly one negative transaction.
    let negative = vec![vec![1, 2], vec![2, 1], vec![2, 1]];
    let loaded = load_transactions(&positive, &negative, 2, 1);
    let collector = collector_for(&loaded);
    let engine = ExpansionEngine::new(thresholds(2, 1, 0), &collector);

    let two = expect_frequent(engine.expand(&root_state(&loaded), rebased(&loaded, 2), &no_denial()));
    assert!(two.positive().presence().contains(rebased(&loaded, 1)));
    assert!(!two.negative().presence().contains(rebased(&loaded, 1)));

    let outcome = engine.expand(&two, rebased(&loaded, 1), &no_denial());
    assert!(outcome.is_emerging(), "{:?}", outcome);
}

#[test]
fn test_negative_retention_keeps_above_bound() {
    let positive = vec![vec![1, 2], vec![1, 2]];
    let negative = vec![vec![1, 2], vec![1, 2], vec![2, 1]];
    let loaded = load_transactions(&positive, &negative, 2, 1);
    let collector = collector_for(&loaded);
    let engine = ExpansionEngine::new(thresholds(2, 1, 0), &collector);

    let two = expect_frequent(engine.expand(&root_state(&loaded), rebased(&loaded, 2), &no_denial()));
    assert_eq!(two.negative().presence().support(rebased(&loaded, 1)), 2);

    let outcome = engine.expand(&two, rebased(&loaded, 1), &no_denial());
    assert!(matches!(outcome, Outcome::DeadEnd), "{:?}", outcome);
}

#[test]
fn test_expand_removes_denied_items() {
    let loaded = ordered_dataset();
    let collector = collector_for(&loaded);
    let engine = ExpansionEngine::new(thresholds(2, 1, 0), &collector);

    let denied = no_denial();
    denied.lock().unwrap().insert(rebased(&loaded, 1));
    let child = expect_frequent(engine.expand(&root_state(&loaded), rebased(&loaded, 3), &denied));
    assert_eq!(child.extensions(), vec![rebased(&loaded, 2)]);
    assert!(!child.negative().presence().contains(rebased(&loaded, 1)));
}

#[test]
fn test_expand_keeps_expansion_item_as_candidate() {
    let positive = vec![vec![4, 4, 4], vec![4, 4, 4]];
    let negative = vec![vec![4, 4], vec![4, 4]];
    let loaded = load_transactions(&positive, &negative, 2, 1);
    let collector = collector_for(&loaded);
    let engine = ExpansionEngine::new(thresholds(2, 1, 0), &collector);
    let four = rebased(&loaded, 4);

    let single = expect_frequent(engine.expand(&root_state(&loaded), four, &no_denial()));
    assert_eq!(single.extensions(), vec![four]);

    let double = expect_frequent(engine.expand(&single, four, &no_denial()));
    assert_eq!(double.pattern(), &[four, four]);
    assert_eq!(match_positions(&double, true), vec![vec![0, 1], vec![0, 1]]);
    assert_eq!(match_positions(&double, false), vec![vec![0], vec![0]]);
    assert!(double.negative().presence().is_empty());

    // Only the positive collection holds 4 4 4.
    let outcome = engine.expand(&double, four, &no_denial());
    assert!(matches!(outcome, Outcome::Emerging), "{:?}", outcome);
    drop(engine);
    assert_eq!(collector.finish().minimal, vec![vec![4, 4, 4]]);
}

#[test]
fn test_stats_count_every_expansion() {
    let loaded = ordered_dataset();
    let collector = collector_for(&loaded);
    let engine = ExpansionEngine::new(thresholds(2, 1, 0), &collector);
    let root = root_state(&loaded);

    for item in root.extensions() {
        engine.expand(&root, item, &no_denial());
    }
    let counts = engine.stats().snapshot();
    assert_eq!(counts.expansions, 3);
    assert_eq!(
        counts.frequent + counts.infrequent + counts.dead_ends + counts.emerging
            + counts.emerging_with_expansion + counts.emerging_ancestors,
        3
    );
}
