//! Universal properties: every aggregator must agree with a from-scratch
//! recomputation over each window slice, and the drivers must obey the
//! length and extend laws.

use proptest::prelude::*;

use rollwin_api::prelude::*;
use rollwin_core::ops::{Max, Mean, Median, Min, Std, Sum, Var};

fn ok<T>(iter: impl Iterator<Item = Result<T>>) -> Vec<T> {
    iter.map(|item| item.unwrap()).collect()
}

fn assert_all_close(got: &[f64], want: &[f64]) {
    assert_eq!(got.len(), want.len());
    for (g, w) in got.iter().zip(want) {
        let tol = 1e-9 * w.abs().max(1.0);
        assert!((g - w).abs() <= tol, "{g} != {w}");
    }
}

fn naive_median(window: &[f64]) -> f64 {
    let mut sorted = window.to_vec();
    sorted.sort_by(f64::total_cmp);
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

fn naive_var(window: &[f64]) -> f64 {
    let n = window.len() as f64;
    let mean = window.iter().sum::<f64>() / n;
    window.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n
}

proptest! {
    #[test]
    fn prop_sum_matches_naive(
        input in prop::collection::vec(-1_000i64..1_000, 0..50),
        size in 1usize..8,
    ) {
        let got = ok(input.clone().rolling_sum(size, WindowKind::Fixed).unwrap());
        let want: Vec<i64> = input.windows(size).map(|w| w.iter().sum()).collect();
        prop_assert_eq!(got, want);
    }

    #[test]
    fn prop_min_and_heap_match_naive(
        input in prop::collection::vec(-500i64..500, 0..50),
        size in 1usize..8,
    ) {
        let want: Vec<i64> = input
            .windows(size)
            .map(|w| *w.iter().min().unwrap())
            .collect();
        let deque = ok(input.clone().rolling_min(size, WindowKind::Fixed).unwrap());
        let heap = ok(input.clone().rolling_min_heap(size, WindowKind::Fixed).unwrap());
        prop_assert_eq!(&deque, &want);
        prop_assert_eq!(&heap, &want);
    }

    #[test]
    fn prop_max_matches_naive(
        input in prop::collection::vec(-500i64..500, 0..50),
        size in 1usize..8,
    ) {
        let got = ok(input.clone().rolling_max(size, WindowKind::Fixed).unwrap());
        let want: Vec<i64> = input
            .windows(size)
            .map(|w| *w.iter().max().unwrap())
            .collect();
        prop_assert_eq!(got, want);
    }

    #[test]
    fn prop_mean_matches_naive(
        input in prop::collection::vec(-1e6f64..1e6, 0..50),
        size in 1usize..8,
    ) {
        let got = ok(input.clone().rolling_mean(size, WindowKind::Fixed).unwrap());
        let want: Vec<f64> = input
            .windows(size)
            .map(|w| w.iter().sum::<f64>() / w.len() as f64)
            .collect();
        assert_all_close(&got, &want);
    }

    #[test]
    fn prop_var_and_std_match_naive(
        input in prop::collection::vec(-1e3f64..1e3, 0..50),
        size in 1usize..8,
    ) {
        let vars = ok(input.clone().rolling(Var::new(), WindowSpec::fixed(size)).unwrap());
        let stds = ok(input.clone().rolling(Std::new(), WindowSpec::fixed(size)).unwrap());
        let want: Vec<f64> = input.windows(size).map(naive_var).collect();
        assert_all_close(&vars, &want);
        let want_std: Vec<f64> = want.iter().map(|v| v.max(0.0).sqrt()).collect();
        assert_all_close(&stds, &want_std);
    }

    #[test]
    fn prop_median_matches_naive(
        input in prop::collection::vec(-1e6f64..1e6, 0..50),
        size in 1usize..8,
    ) {
        let got = ok(input.clone().rolling_median(size, WindowKind::Fixed).unwrap());
        let want: Vec<f64> = input.windows(size).map(|w| naive_median(w)).collect();
        assert_all_close(&got, &want);
    }

    #[test]
    fn prop_nunique_matches_naive(
        input in prop::collection::vec(0u8..6, 0..50),
        size in 1usize..8,
    ) {
        let got = ok(input.clone().rolling_nunique(size, WindowKind::Fixed).unwrap());
        let want: Vec<usize> = input
            .windows(size)
            .map(|w| {
                let mut v = w.to_vec();
                v.sort_unstable();
                v.dedup();
                v.len()
            })
            .collect();
        prop_assert_eq!(got, want);
    }

    #[test]
    fn prop_fixed_length_law(
        n in 0usize..60,
        size in 1usize..10,
    ) {
        let input: Vec<i64> = (0..n as i64).collect();
        let out = ok(input.rolling_sum(size, WindowKind::Fixed).unwrap());
        prop_assert_eq!(out.len(), (n + 1).saturating_sub(size));
    }

    #[test]
    fn prop_variable_length_law(
        n in 0usize..60,
        size in 1usize..10,
    ) {
        let input: Vec<i64> = (0..n as i64).collect();
        let out = ok(input.rolling_sum(size, WindowKind::Variable).unwrap());
        let expected = if n == 0 { 0 } else { n + n.min(size) - 1 };
        prop_assert_eq!(out.len(), expected);
    }

    #[test]
    fn prop_extend_law_fixed(
        input in prop::collection::vec(-1_000i64..1_000, 0..40),
        split in 0usize..40,
        size in 1usize..6,
    ) {
        let split = split.min(input.len());
        let (a, b) = input.split_at(split);

        let want = ok(input.clone().rolling_sum(size, WindowKind::Fixed).unwrap());
        // Extending before consumption begins is exactly input chaining.
        let mut roll = a.to_vec().rolling_sum(size, WindowKind::Fixed).unwrap();
        roll.extend(b.to_vec());
        let got = ok(roll);
        prop_assert_eq!(got, want);
    }

    #[test]
    fn prop_extend_law_variable(
        input in prop::collection::vec(-1_000i64..1_000, 0..40),
        split in 0usize..40,
        size in 1usize..6,
    ) {
        let split = split.min(input.len());
        let (a, b) = input.split_at(split);

        let want = ok(input.clone().rolling_sum(size, WindowKind::Variable).unwrap());
        let mut roll = a.to_vec().rolling_sum(size, WindowKind::Variable).unwrap();
        roll.extend(b.to_vec());
        let got = ok(roll);
        prop_assert_eq!(got, want);
    }

    #[test]
    fn prop_indexed_emits_once_per_input(
        gaps in prop::collection::vec(0i64..5, 0..40),
        span in 1i64..6,
    ) {
        let mut index = 0i64;
        let pairs: Vec<(i64, i64)> = gaps
            .iter()
            .map(|&gap| {
                index += gap;
                (index, gap)
            })
            .collect();
        let count = pairs.len();
        let roll = RollingIndexed::new(Sum::new(), pairs, span).unwrap();
        prop_assert_eq!(ok(roll).len(), count);
    }

    #[test]
    fn prop_indexed_matches_naive_span_filter(
        gaps in prop::collection::vec(0i64..5, 0..40),
        span in 1i64..6,
    ) {
        let mut index = 0i64;
        let pairs: Vec<(i64, i64)> = gaps
            .iter()
            .enumerate()
            .map(|(value, &gap)| {
                index += gap;
                (index, value as i64)
            })
            .collect();

        let got = ok(RollingIndexed::new(Sum::new(), pairs.clone(), span).unwrap());
        let want: Vec<i64> = pairs
            .iter()
            .enumerate()
            .map(|(i, &(newest, _))| {
                pairs[..=i]
                    .iter()
                    .filter(|(idx, _)| newest - idx < span)
                    .map(|&(_, v)| v)
                    .sum()
            })
            .collect();
        prop_assert_eq!(got, want);
    }
}

// Keep the deque Min honest against the heap Min on adversarial patterns
// outside proptest's numeric ranges: sorted runs force the heap to grow.
#[test]
fn test_min_variants_agree_on_sorted_runs() {
    let mut input: Vec<i64> = (0..30).collect();
    input.extend((0..30).rev());
    for size in [1usize, 2, 5, 9] {
        let deque = ok(input.clone().rolling_min(size, WindowKind::Fixed).unwrap());
        let heap = ok(input
            .clone()
            .rolling_min_heap(size, WindowKind::Fixed)
            .unwrap());
        assert_eq!(deque, heap, "size {size}");
    }
}

#[test]
fn test_mean_min_max_agree_on_variable_windows() {
    let input = vec![4.0, -2.0, 7.5, 0.0, 3.25];
    let means = ok(input
        .clone()
        .rolling(Mean::new(), WindowSpec::variable(3))
        .unwrap());
    let mins = ok(input
        .clone()
        .rolling(Min::new(), WindowSpec::variable(3))
        .unwrap());
    let maxs = ok(input
        .clone()
        .rolling(Max::new(), WindowSpec::variable(3))
        .unwrap());
    let medians = ok(input
        .clone()
        .rolling(Median::new(3), WindowSpec::variable(3))
        .unwrap());
    // All variable drivers emit the same schedule of windows.
    assert_eq!(means.len(), input.len() + 2);
    assert_eq!(mins.len(), means.len());
    assert_eq!(maxs.len(), means.len());
    assert_eq!(medians.len(), means.len());
    for i in 0..means.len() {
        assert!(mins[i] <= means[i] && means[i] <= maxs[i]);
        assert!(mins[i] <= medians[i] && medians[i] <= maxs[i]);
    }
}

// Min is PartialOrd-only, so floats work without a wrapper.
#[test]
fn test_min_works_on_floats() {
    let out = ok(vec![3.5, 1.25, 4.0]
        .rolling(Min::new(), WindowSpec::fixed(2))
        .unwrap());
    assert_eq!(out, vec![1.25, 1.25]);
}
