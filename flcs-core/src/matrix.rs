use bumpalo::collections::Vec as BumpVec;
use bumpalo::Bump;

use crate::result::ResultMatch;

/// Absolute tolerance used when checking the diagonal-predecessor equality
/// `diag.eval == cur.best - diag.best` during reconstruction.
const RECON_TOLERANCE: f32 = 1e-3;

/// One entry of the W×H match matrix.
///
/// `eval` is the lazily-computed match value; `None` is the "unevaluated"
/// sentinel. `best` is the highest cumulative score of any path discovered
/// so far ending at this cell; `None` is "no path yet". Neither field ever
/// regresses once set (`eval` is write-once; `best` only increases).
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Cell {
    pub eval: Option<f32>,
    pub best: Option<f32>,
}

/// Flat, row-major W×H grid: `(i, j) -> i * width + j`. Allocated once at
/// construction from the caller's arena; cells are updated in place, never
/// resized.
pub(crate) struct Matrix<'a> {
    width: usize,
    height: usize,
    cells: BumpVec<'a, Cell>,
}

impl<'a> Matrix<'a> {
    pub fn new(arena: &'a Bump, width: usize, height: usize) -> Self {
        debug_assert!(width > 0 && height > 0, "matrix dimensions must be positive");
        let mut cells = BumpVec::with_capacity_in(width * height, arena);
        cells.resize(width * height, Cell::default());
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn index(&self, i: usize, j: usize) -> usize {
        debug_assert!(i < self.width && j < self.height, "({i}, {j}) out of bounds");
        i * self.width + j
    }

    pub fn get(&self, i: usize, j: usize) -> &Cell {
        &self.cells[self.index(i, j)]
    }

    pub fn get_mut(&mut self, i: usize, j: usize) -> &mut Cell {
        let idx = self.index(i, j);
        &mut self.cells[idx]
    }

    /// Walks back from `best_res` to the origin, emitting the matched
    /// pairs in forward path order. Returns an empty vector when
    /// `best_res` is `None` (no path with positive score was ever found).
    pub fn reconstruct(&self, arena: &'a Bump, best_res: Option<(usize, usize)>) -> BumpVec<'a, ResultMatch> {
        let mut out = BumpVec::new_in(arena);

        let Some((mut i, mut j)) = best_res else {
            return out;
        };

        let terminal = self.get(i, j);
        debug_assert!(
            terminal.best.is_some(),
            "best_res must name a cell with a recorded best score"
        );
        if let Some(eval) = terminal.eval {
            if eval > 0.0 {
                out.push(ResultMatch {
                    i,
                    j,
                    match_val: eval,
                });
            }
        }

        loop {
            if i == 0 || j == 0 {
                break;
            }
            let cur = self
                .get(i, j)
                .best
                .expect("every cell on the reconstructed path has a recorded best");

            if self.get(i - 1, j).best == Some(cur) {
                i -= 1;
                continue;
            }
            if self.get(i, j - 1).best == Some(cur) {
                j -= 1;
                continue;
            }

            let diag = self.get(i - 1, j - 1);
            let diag_best = diag
                .best
                .expect("a diagonal predecessor on the path must have a recorded best");
            let diag_eval = diag
                .eval
                .expect("a diagonal predecessor must have been evaluated");
            debug_assert!(diag_best < cur);
            debug_assert!(
                (diag_eval - (cur - diag_best)).abs() <= RECON_TOLERANCE,
                "reconstruction mismatch at ({}, {}): eval {} vs delta {}",
                i - 1,
                j - 1,
                diag_eval,
                cur - diag_best
            );
            out.push(ResultMatch {
                i: i - 1,
                j: j - 1,
                match_val: diag_eval,
            });
            i -= 1;
            j -= 1;
        }

        out.reverse();
        out
    }
}
