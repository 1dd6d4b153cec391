//! End-to-end merge scenarios over integer tokens.

use rstate::{Level, Range, RepairedState, RepairedStateBuilder, Section, UNREPAIRED};

fn range(left: i64, right: i64) -> Range<i64> {
    Range::new(left, right).expect("test range must be ordered")
}

/// Pairs of tokens, `(a, b, c, d)` -> `[(a,b], (c,d]]`.
fn ranges(tokens: &[i64]) -> Vec<Range<i64>> {
    assert!(tokens.len() % 2 == 0, "tokens come in pairs");
    tokens.chunks(2).map(|pair| range(pair[0], pair[1])).collect()
}

fn level(ranges: Vec<Range<i64>>, repaired_at: u64) -> Level<i64> {
    Level::new(ranges, repaired_at).expect("valid test level")
}

fn sect(left: i64, right: i64, repaired_at: u64) -> Section<i64> {
    Section::new(range(left, right), repaired_at)
}

fn finalise(levels: Vec<(Vec<Range<i64>>, u64)>) -> RepairedState<i64> {
    let mut repairs = RepairedStateBuilder::new();
    for (ranges, repaired_at) in levels {
        repairs
            .store_initial_level(ranges, repaired_at)
            .expect("valid initial level");
    }
    repairs.finalise_initial_levels()
}

#[test]
fn merge_overlapping() {
    let repairs = finalise(vec![(ranges(&[100, 300]), 5), (ranges(&[200, 400]), 6)]);

    let state = repairs.state();
    assert_eq!(
        state.levels(),
        &[level(ranges(&[200, 400]), 6), level(ranges(&[100, 200]), 5)]
    );
    assert_eq!(state.sections(), &[sect(100, 200, 5), sect(200, 400, 6)]);
    assert_eq!(state.covered(), ranges(&[100, 400]).as_slice());
}

#[test]
fn merge_same_range() {
    let repairs = finalise(vec![(ranges(&[100, 400]), 5), (ranges(&[100, 400]), 6)]);

    let state = repairs.state();
    assert_eq!(state.levels(), &[level(ranges(&[100, 400]), 6)]);
    assert_eq!(state.sections(), &[sect(100, 400, 6)]);
    assert_eq!(state.covered(), ranges(&[100, 400]).as_slice());
}

#[test]
fn merge_large_range() {
    let repairs = finalise(vec![(ranges(&[200, 300]), 5), (ranges(&[100, 400]), 6)]);

    let state = repairs.state();
    assert_eq!(state.levels(), &[level(ranges(&[100, 400]), 6)]);
    assert_eq!(state.sections(), &[sect(100, 400, 6)]);
    assert_eq!(state.covered(), ranges(&[100, 400]).as_slice());
}

#[test]
fn merge_small_range() {
    let repairs = finalise(vec![(ranges(&[100, 400]), 5), (ranges(&[200, 300]), 6)]);

    let state = repairs.state();
    assert_eq!(
        state.levels(),
        &[
            level(ranges(&[200, 300]), 6),
            level(ranges(&[100, 200, 300, 400]), 5),
        ]
    );
    assert_eq!(
        state.sections(),
        &[sect(100, 200, 5), sect(200, 300, 6), sect(300, 400, 5)]
    );
    assert_eq!(state.covered(), ranges(&[100, 400]).as_slice());
}

#[test]
fn repaired_at() {
    let repairs = finalise(vec![(ranges(&[100, 300]), 5), (ranges(&[200, 400]), 6)]);

    assert_eq!(repairs.min_repaired_at(&ranges(&[150, 250])), 5);
    assert_eq!(repairs.min_repaired_at(&ranges(&[150, 160])), 5);
    assert_eq!(repairs.min_repaired_at(&ranges(&[100, 200])), 5);
    assert_eq!(repairs.min_repaired_at(&ranges(&[200, 400])), 6);
    assert_eq!(repairs.min_repaired_at(&ranges(&[200, 401])), UNREPAIRED);
    assert_eq!(repairs.min_repaired_at(&ranges(&[99, 200])), UNREPAIRED);
    assert_eq!(repairs.min_repaired_at(&ranges(&[50, 450])), UNREPAIRED);
    assert_eq!(repairs.min_repaired_at(&ranges(&[50, 60])), UNREPAIRED);
    assert_eq!(repairs.min_repaired_at(&ranges(&[450, 460])), UNREPAIRED);
}

#[test]
fn finalise_single_level_is_idempotent() {
    let input = level(ranges(&[100, 200, 300, 400, 400, 500]), 5);
    let repairs = finalise(vec![(ranges(&[100, 200, 300, 400, 400, 500]), 5)]);

    let state = repairs.state();
    assert_eq!(state.levels(), &[input]);
    assert_eq!(
        state.sections(),
        &[sect(100, 200, 5), sect(300, 400, 5), sect(400, 500, 5)]
    );
    assert_eq!(state.covered(), ranges(&[100, 200, 300, 500]).as_slice());
}

#[test]
fn finalise_without_levels_is_empty() {
    let repairs = finalise(vec![]);

    let state = repairs.state();
    assert!(state.levels().is_empty());
    assert!(state.sections().is_empty());
    assert!(state.covered().is_empty());
    assert_eq!(repairs.min_repaired_at(&ranges(&[100, 200])), UNREPAIRED);
}

#[test]
fn incremental_add_matches_initial_merge() {
    let initial = finalise(vec![(ranges(&[100, 300]), 5), (ranges(&[200, 400]), 6)]);
    let incremental = RepairedState::new();
    incremental.add(ranges(&[100, 300]), 5).expect("valid level");
    incremental.add(ranges(&[200, 400]), 6).expect("valid level");

    assert_eq!(*incremental.state(), *initial.state());
}

#[test]
fn later_repair_refreshes_part_of_the_ring() {
    let repairs = finalise(vec![(ranges(&[0, 1000]), 10)]);
    repairs.add(ranges(&[250, 500]), 20).expect("valid level");

    assert_eq!(repairs.min_repaired_at(&ranges(&[250, 500])), 20);
    assert_eq!(repairs.min_repaired_at(&ranges(&[0, 1000])), 10);
    assert_eq!(
        repairs.state().sections(),
        &[sect(0, 250, 10), sect(250, 500, 20), sect(500, 1000, 10)]
    );
}
