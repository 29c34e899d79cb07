//! Integration tests for transform chains, windowing and merging

use rand::{rngs::StdRng, Rng, SeedableRng};
use seqflow::sequence::source;
use seqflow::{merge, merge_by, ErrorKind, FloatKey};
use std::cell::Cell;
use std::rc::Rc;

fn random_vec(rng: &mut StdRng, max_len: usize) -> Vec<i32> {
    let len = rng.gen_range(0..=max_len);
    (0..len).map(|_| rng.gen_range(-50..50)).collect()
}

#[test]
fn test_window_matches_contiguous_slices() {
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..50 {
        let input = random_vec(&mut rng, 40);
        let n = rng.gen_range(1..8);

        let windows = source::from_iter(input.clone()).window(n).unwrap().to_vec();
        let expected: Vec<Vec<i32>> = input.windows(n).map(<[i32]>::to_vec).collect();

        assert_eq!(windows.len(), (input.len() + 1).saturating_sub(n));
        assert_eq!(windows, expected);
    }
}

#[test]
fn test_chunk_concatenation_restores_input() {
    let mut rng = StdRng::seed_from_u64(2);
    for _ in 0..50 {
        let input = random_vec(&mut rng, 40);
        let n = rng.gen_range(1..8);

        let chunks = source::from_iter(input.clone()).chunk(n).unwrap().to_vec();
        let flat: Vec<i32> = chunks.iter().flatten().copied().collect();
        assert_eq!(flat, input);

        if let Some((last, full)) = chunks.split_last() {
            assert!(full.iter().all(|c| c.len() == n));
            let tail = if input.len() % n == 0 { n } else { input.len() % n };
            assert_eq!(last.len(), tail);
        }
    }
}

#[test]
fn test_window_and_chunk_scenarios() {
    let windows = source::from_iter(vec![1, 2, 3, 4, 5]).window(3).unwrap().to_vec();
    assert_eq!(windows, vec![vec![1, 2, 3], vec![2, 3, 4], vec![3, 4, 5]]);

    let chunks = source::from_iter(vec![1, 2, 3, 4, 5]).chunk(2).unwrap().to_vec();
    assert_eq!(chunks, vec![vec![1, 2], vec![3, 4], vec![5]]);
}

#[test]
fn test_validation_happens_before_pulling() {
    let pulls = Rc::new(Cell::new(0));
    let counter = pulls.clone();
    let seq = source::from_iter((0..).inspect(move |_| counter.set(counter.get() + 1)));

    let err = seq.window(0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(pulls.get(), 0);

    assert_eq!(source::range(0, 10, 0).unwrap_err().kind(), ErrorKind::Validation);
    assert!(source::range_f64(0.0, 1.0, f64::INFINITY).is_err());
}

#[test]
fn test_merge_sorted_property() {
    let mut rng = StdRng::seed_from_u64(3);
    for k in 0..10 {
        let sources: Vec<Vec<i32>> = (0..k)
            .map(|_| {
                let mut v = random_vec(&mut rng, 25);
                v.sort();
                v
            })
            .collect();
        let total: usize = sources.iter().map(Vec::len).sum();

        let merged = merge(sources).to_vec();
        assert_eq!(merged.len(), total);
        assert!(merged.windows(2).all(|w| w[0] <= w[1]));
    }
}

#[test]
fn test_merge_scenario_and_custom_order() {
    assert_eq!(
        merge(vec![vec![1, 3, 5], vec![2, 4, 6]]).to_vec(),
        vec![1, 2, 3, 4, 5, 6]
    );

    let by_len = merge_by(
        |a: &&str, b: &&str| a.len().cmp(&b.len()),
        vec![vec!["a", "ccc"], vec!["bb", "dddd"]],
    )
    .to_vec();
    assert_eq!(by_len, vec!["a", "bb", "ccc", "dddd"]);
}

#[test]
fn test_merge_feeds_further_stages() {
    let out = merge(vec![source::range(0, 20, 3).unwrap(), source::range(1, 20, 5).unwrap()])
        .distinct()
        .chunk(4)
        .unwrap()
        .to_vec();
    assert_eq!(out, vec![vec![0, 1, 3, 6], vec![9, 11, 12, 15], vec![16, 18]]);
}

#[test]
fn test_long_chain_over_infinite_source() {
    let out = source::generate(1u64, |x| x + 1)
        .map(|x| x * x)
        .filter(|x| x % 2 == 1)
        .scan(0u64, |acc, x| acc + x)
        .take_while(|total| *total < 500)
        .enumerate()
        .to_vec();
    assert_eq!(out, vec![(0, 1), (1, 10), (2, 35), (3, 84), (4, 165), (5, 286), (6, 455)]);
}

#[test]
fn test_distinct_by_float_key_and_intersperse() {
    let out = source::from_iter(vec![1.0, -0.0, 0.0, 1.0, 2.5])
        .distinct_by(|v| FloatKey::new(*v))
        .intersperse(f64::NAN)
        .to_vec();
    assert_eq!(out.len(), 5);
    assert_eq!(out[0], 1.0);
    assert!(out[1].is_nan());
    assert_eq!(out[2], 0.0);
    assert_eq!(out[4], 2.5);
}

#[test]
fn test_try_map_feeds_result_collect() {
    let parsed: Result<Vec<i32>, _> = source::from_iter(vec!["4", "8", "15"])
        .try_map(|s| s.parse::<i32>())
        .collect();
    assert_eq!(parsed.unwrap(), vec![4, 8, 15]);

    let failed: Result<Vec<i32>, _> = source::from_iter(vec!["4", "eight", "15"])
        .try_map(|s| s.parse::<i32>())
        .collect();
    assert_eq!(failed.unwrap_err().kind(), ErrorKind::Operation);
}

#[test]
fn test_buffering_stage_drains_only_when_pulled() {
    let pulls = Rc::new(Cell::new(0));
    let counter = pulls.clone();
    let mut sorted = source::from_iter(vec![3, 1, 2].into_iter().inspect(move |_| {
        counter.set(counter.get() + 1)
    }))
    .sort_by_key(|x| std::cmp::Reverse(*x));

    assert_eq!(pulls.get(), 0);
    assert_eq!(sorted.next(), Some(3));
    assert_eq!(pulls.get(), 3);
    assert_eq!(sorted.to_vec(), vec![2, 1]);
}

#[test]
fn test_terminals_stop_early() {
    let pulls = Rc::new(Cell::new(0));
    let counter = pulls.clone();
    let third = source::from_iter((0..).inspect(move |_| counter.set(counter.get() + 1)))
        .map(|x| x * 3)
        .element_at(2)
        .unwrap();
    assert_eq!(third, 6);
    assert_eq!(pulls.get(), 3);
}
