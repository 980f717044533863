//! Black-box checks of the invariants listed in the engine's
//! specification (spec.md §8), run against both built-in matchers and a
//! handful of hand-built fuzzy matrices.

use bumpalo::Bump;
use flcs_core::{Engine, EqualityMatcher};
use itertools::Itertools;

fn check_invariants(width: usize, height: usize, total_match: f32, matches: &[(usize, usize, f32)], num_evals: usize) {
    // Invariant 1: numEvals <= W*H.
    assert!(num_evals <= width * height);

    // Invariant 2: totalMatch = sum(matches) within 1e-3.
    let sum: f32 = matches.iter().map(|(_, _, v)| v).sum();
    assert!((sum - total_match).abs() <= 1e-3, "sum {sum} vs total {total_match}");

    // Invariant 3: strictly increasing i and j.
    for (a, b) in matches.iter().tuple_windows() {
        assert!(b.0 > a.0, "i not strictly increasing: {:?}", matches);
        assert!(b.1 > a.1, "j not strictly increasing: {:?}", matches);
    }

    // Invariant 4: every match_val in (0, 1].
    for &(_, _, v) in matches {
        assert!(v > 0.0 && v <= 1.0, "match_val {v} out of (0, 1]");
    }
}

#[test]
fn equality_matcher_on_random_strings() {
    let cases: &[(&[u8], &[u8])] = &[
        (b"ABCBDAB", b"BDCABA"),
        (b"AGCAT", b"GAC"),
        (b"", b"ABC"),
        (b"SAME", b"SAME"),
        (b"XYZ", b"ABC"),
    ];
    for &(a, b) in cases {
        if a.is_empty() || b.is_empty() {
            continue; // width/height must be positive per the engine's contract.
        }
        let arena = Bump::new();
        let matcher = EqualityMatcher::new(a, b);
        let mut engine = Engine::with_branch_threshold(&arena, a.len(), b.len(), matcher, 1.0);
        let result = engine.run();
        let matches: Vec<_> = result.matches.iter().map(|m| (m.i, m.j, m.match_val)).collect();
        check_invariants(a.len(), b.len(), result.total_match, &matches, engine.num_evals());
    }
}

#[test]
fn fuzzy_matrices_satisfy_invariants() {
    let matrices: &[(usize, usize, fn(usize, usize) -> f32)] = &[
        (3, 3, |i, j| if i == j { 0.5 } else { 0.0 }),
        (4, 4, |i, j| if j == i + 1 { 1.0 } else { 0.0 }),
        (5, 5, |i, j| ((i + j) % 3 == 0) as u8 as f32 * 0.3),
        (6, 3, |i, j| if i / 2 == j { 0.7 } else { 0.0 }),
    ];
    for &(w, h, f) in matrices {
        let arena = Bump::new();
        let mut engine = Engine::with_branch_threshold(&arena, w, h, f, 1.0);
        let result = engine.run();
        let matches: Vec<_> = result.matches.iter().map(|m| (m.i, m.j, m.match_val)).collect();
        check_invariants(w, h, result.total_match, &matches, engine.num_evals());
    }
}

/// Invariant 6: repeated construction+run with a deterministic matcher is
/// bit-identical.
#[test]
fn repeated_runs_are_identical() {
    let matcher = |i: usize, j: usize| if (i + j) % 2 == 0 { 0.4 } else { 0.0 };
    let mut results = Vec::new();
    for _ in 0..3 {
        let arena = Bump::new();
        let mut engine = Engine::with_branch_threshold(&arena, 7, 6, matcher, 0.9);
        let result = engine.run();
        results.push((
            result.total_match,
            result.matches.iter().map(|m| (m.i, m.j, m.match_val)).collect::<Vec<_>>(),
        ));
    }
    assert!(results.windows(2).all(|w| w[0] == w[1]));
}

/// A well-matched run should do far less work than the full W*H fill.
#[test]
fn well_matched_input_prunes_aggressively() {
    let n = 200;
    let arena = Bump::new();
    let matcher = |i: usize, j: usize| if i == j { 1.0 } else { 0.0 };
    let mut engine = Engine::with_branch_threshold(&arena, n, n, matcher, 1.0);
    let result = engine.run();
    assert_eq!(result.total_match, n as f32);
    assert!(
        engine.num_evals() < n * n,
        "expected substantially less than a full fill, got {} evals for {}x{}",
        engine.num_evals(),
        n,
        n
    );
}
