//! Property-based coverage over small random match matrices: for every
//! generated case, the reconstructed path must satisfy invariants 2-4 and
//! (at `branch_threshold = 1.0`) match a brute-force oracle.

use bumpalo::Bump;
use flcs_core::Engine;
use proptest::prelude::*;

fn brute_force_best(width: usize, height: usize, cells: &[f32]) -> f32 {
    let mut best = vec![vec![0.0f32; height]; width];
    for i in 0..width {
        for j in 0..height {
            let f = cells[i * height + j];
            let mut carry = 0.0f32;
            if i > 0 {
                carry = carry.max(best[i - 1][j]);
            }
            if j > 0 {
                carry = carry.max(best[i][j - 1]);
            }
            let mut consume = f;
            if i > 0 && j > 0 {
                consume = best[i - 1][j - 1] + f;
            }
            best[i][j] = carry.max(consume);
        }
    }
    best[width - 1][height - 1]
}

fn quantized_score() -> impl Strategy<Value = f32> {
    (0u32..=4).prop_map(|n| n as f32 * 0.25)
}

/// Generates (width, height, cells) where `cells.len() == width * height`.
fn dims_and_cells() -> impl Strategy<Value = (usize, usize, Vec<f32>)> {
    (1usize..7, 1usize..7).prop_flat_map(|(w, h)| {
        proptest::collection::vec(quantized_score(), w * h).prop_map(move |cells| (w, h, cells))
    })
}

proptest! {
    #[test]
    fn invariants_and_optimality_hold((width, height, cells) in dims_and_cells()) {
        let arena = Bump::new();
        let f = |i: usize, j: usize| cells[i * height + j];
        let mut engine = Engine::with_branch_threshold(&arena, width, height, f, 1.0);
        let result = engine.run();

        let matches: Vec<_> = result.matches.iter().map(|m| (m.i, m.j, m.match_val)).collect();

        // Invariant 2.
        let sum: f32 = matches.iter().map(|(_, _, v)| v).sum();
        prop_assert!((sum - result.total_match).abs() <= 1e-3);

        // Invariant 3.
        for w in matches.windows(2) {
            prop_assert!(w[1].0 > w[0].0);
            prop_assert!(w[1].1 > w[0].1);
        }

        // Invariant 4.
        for &(_, _, v) in &matches {
            prop_assert!(v > 0.0 && v <= 1.0);
        }

        // Invariant 7.
        let expected = brute_force_best(width, height, &cells);
        prop_assert!((result.total_match - expected).abs() <= 1e-3);
    }
}
