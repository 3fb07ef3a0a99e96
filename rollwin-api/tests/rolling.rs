use rollwin_api::prelude::*;
use rollwin_core::ops::{
    Apply, ApplyPairwise, Entropy, JaccardIndex, Match, ModeCount, PolynomialHash, Std, Var,
};

fn ok<T>(iter: impl Iterator<Item = Result<T>>) -> Vec<T> {
    iter.map(|item| item.unwrap()).collect()
}

// ── the concrete end-to-end scenarios ─────────────────────────────────────

#[test]
fn test_max_fixed_window() {
    let out = ok(vec![3, 1, 4, 1, 5, 9, 2]
        .rolling_max(5, WindowKind::Fixed)
        .unwrap());
    assert_eq!(out, vec![5, 9, 9]);
}

#[test]
fn test_sum_fixed_window() {
    let out = ok(vec![1i64, 5, 2, 0, 3]
        .rolling_sum(3, WindowKind::Fixed)
        .unwrap());
    assert_eq!(out, vec![8, 7, 5]);
}

#[test]
fn test_all_fixed_window() {
    let out = ok(vec![true, true, false, true, true]
        .rolling_all(3, WindowKind::Fixed)
        .unwrap());
    assert_eq!(out, vec![false, false, false]);
}

#[test]
fn test_apply_variable_window() {
    let out = ok(vec![3, 1, 4, 1, 5, 9, 2]
        .rolling_apply(3, WindowKind::Variable, |w: &[i32]| w.to_vec())
        .unwrap());
    assert_eq!(
        out,
        vec![
            vec![3],
            vec![3, 1],
            vec![3, 1, 4],
            vec![1, 4, 1],
            vec![4, 1, 5],
            vec![1, 5, 9],
            vec![5, 9, 2],
            vec![9, 2],
            vec![2],
        ]
    );
}

#[test]
fn test_apply_indexed_window() {
    let pairs: Vec<(i64, i32)> = vec![0, 1, 2, 6, 7, 11, 15]
        .into_iter()
        .zip(vec![3, 1, 4, 1, 5, 9, 2])
        .collect();
    let roll = RollingIndexed::new(Apply::new(|w: &[i32]| w.to_vec()), pairs, 3i64).unwrap();
    let out = ok(roll);
    assert_eq!(
        out,
        vec![
            vec![3],
            vec![3, 1],
            vec![3, 1, 4],
            vec![1],
            vec![1, 5],
            vec![9],
            vec![2],
        ]
    );
}

#[test]
fn test_median_fixed_window() {
    let out = ok(vec![1.0, 3.0, 2.0, 5.0, 4.0]
        .rolling_median(3, WindowKind::Fixed)
        .unwrap());
    assert_eq!(out, vec![2.0, 3.0, 4.0]);
}

// ── parameterised aggregators through the generic surface ─────────────────

#[test]
fn test_var_with_ddof_over_variable_window() {
    let mut roll = vec![2.0, 4.0, 6.0]
        .rolling(Var::with_ddof(1), WindowSpec::variable(3))
        .unwrap();
    // One observation: sample variance undefined.
    assert!(matches!(
        roll.next().unwrap(),
        Err(Error::InsufficientData { .. })
    ));
    assert_eq!(roll.next().unwrap().unwrap(), 2.0);
    assert_eq!(roll.next().unwrap().unwrap(), 4.0);
}

#[test]
fn test_std_is_sqrt_of_var() {
    let input = vec![1.0, 4.0, 2.0, 8.0, 5.0, 7.0];
    let stds = ok(input
        .clone()
        .rolling(Std::new(), WindowSpec::fixed(4))
        .unwrap());
    let vars = ok(input.rolling(Var::new(), WindowSpec::fixed(4)).unwrap());
    for (s, v) in stds.iter().zip(vars) {
        assert!((s - v.sqrt()).abs() < 1e-12);
    }
}

#[test]
fn test_mode_with_count() {
    let out = ok("aabba"
        .chars()
        .collect::<Vec<_>>()
        .rolling(ModeCount::new(), WindowSpec::fixed(3))
        .unwrap());
    assert_eq!(out[0].1, 2); // "aab": a twice
    assert!(out[0].0.contains(&'a'));
    assert_eq!(out[1].1, 2); // "abb": b twice
    assert!(out[1].0.contains(&'b'));
}

#[test]
fn test_entropy_fixed_window_in_bits() {
    let out = ok("aabb"
        .chars()
        .collect::<Vec<_>>()
        .rolling(Entropy::with_base(2, 2.0).unwrap(), WindowSpec::fixed(2))
        .unwrap());
    // Windows: "aa" (0 bits), "ab" (1 bit), "bb" (0 bits).
    assert!((out[0] - 0.0).abs() < 1e-12);
    assert!((out[1] - 1.0).abs() < 1e-12);
    assert!((out[2] - 0.0).abs() < 1e-12);
}

#[test]
fn test_entropy_rejects_variable_window() {
    let err = "abc"
        .chars()
        .collect::<Vec<_>>()
        .rolling(Entropy::new(3).unwrap(), WindowSpec::variable(3))
        .err()
        .unwrap();
    assert!(matches!(
        err,
        Error::WindowType {
            kind: WindowKind::Variable,
            ..
        }
    ));
}

#[test]
fn test_match_over_text() {
    let target: Vec<char> = "rem".chars().collect();
    let agg = Match::new(target);
    let size = agg.target_len();
    let out = ok("loremipsum"
        .chars()
        .collect::<Vec<_>>()
        .rolling(agg, WindowSpec::fixed(size))
        .unwrap());
    assert_eq!(
        out,
        vec![false, false, true, false, false, false, false, false]
    );
}

#[test]
fn test_polynomial_hash_repeated_window_repeats() {
    let bytes: Vec<u64> = b"abcxyabc".iter().map(|&b| b as u64).collect();
    let out = ok(bytes
        .rolling(
            PolynomialHash::with_params(31, 9967).unwrap(),
            WindowSpec::fixed(3),
        )
        .unwrap());
    assert_eq!(out.len(), 6);
    assert_eq!(out.first(), out.last());
    // Distinct windows should (here) hash distinctly.
    assert_ne!(out[0], out[1]);
}

#[test]
fn test_jaccard_against_target_set() {
    let out = ok((1..=9)
        .collect::<Vec<i32>>()
        .rolling(JaccardIndex::new([2, 3, 5, 7, 11]), WindowSpec::fixed(4))
        .unwrap());
    assert!((out[0] - 2.0 / 7.0).abs() < 1e-12);
    assert!((out[1] - 0.5).abs() < 1e-12);
    assert!((out[5] - 0.125).abs() < 1e-12);
}

#[test]
fn test_pairwise_difference_of_means() {
    let agg = ApplyPairwise::new(|a: &[f64], b: &[f64]| {
        let ma = a.iter().sum::<f64>() / a.len() as f64;
        let mb = b.iter().sum::<f64>() / b.len() as f64;
        ma - mb
    });
    let roll = RollingPairwise::new(
        agg,
        vec![1.0, 2.0, 3.0, 4.0],
        vec![1.0, 0.0, 1.0, 0.0],
        WindowSpec::fixed(2),
    )
    .unwrap();
    let out = ok(roll);
    assert_eq!(out, vec![1.0, 2.0, 3.0]);
}

// ── extend across the api surface ─────────────────────────────────────────

#[test]
fn test_extend_resumes_after_drain() {
    let mut roll = vec![1i64, 2, 3]
        .rolling_sum(2, WindowKind::Fixed)
        .unwrap();
    assert_eq!(ok(&mut roll), vec![3, 5]);
    assert_eq!(roll.phase(), Phase::Drained);

    roll.extend(vec![10]);
    assert_eq!(roll.phase(), Phase::Active);
    assert_eq!(roll.next().unwrap().unwrap(), 13);
}

#[test]
fn test_extend_equals_chained_input() {
    let a = vec![5i64, 1, 8, 2];
    let b = vec![9i64, 4];
    let mut chained = a.clone();
    chained.extend_from_slice(&b);

    let want = ok(chained.rolling_sum(3, WindowKind::Variable).unwrap());
    let mut roll = a.rolling_sum(3, WindowKind::Variable).unwrap();
    roll.extend(b);
    assert_eq!(ok(roll), want);
}

// ── driver misuse ─────────────────────────────────────────────────────────

#[test]
fn test_indexed_order_violation_surfaces() {
    let mut roll =
        RollingIndexed::new(Apply::new(|w: &[i32]| w.len()), vec![(3i64, 1), (1i64, 2)], 5i64)
            .unwrap();
    assert!(roll.next().unwrap().is_ok());
    assert_eq!(roll.next().unwrap(), Err(Error::IndexOrder));
}

#[test]
fn test_pairwise_length_mismatch_surfaces() {
    let agg = ApplyPairwise::new(|a: &[i32], _: &[i32]| a.len());
    let mut roll = RollingPairwise::new(
        agg,
        vec![1, 2, 3, 4],
        vec![1, 2, 3],
        WindowSpec::fixed(2),
    )
    .unwrap();
    assert_eq!(roll.next().unwrap().unwrap(), 2);
    assert_eq!(roll.next().unwrap().unwrap(), 2);
    assert_eq!(roll.next().unwrap(), Err(Error::StreamMismatch));
}

#[test]
fn test_all_fixed_with_variable_all_prefix() {
    // The variable window's priming prefix sees partial windows.
    let out = ok(vec![true, true, false]
        .rolling_all(2, WindowKind::Variable)
        .unwrap());
    assert_eq!(out, vec![true, true, false, false]);
}
