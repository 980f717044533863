use bumpalo::Bump;
use log::{debug, trace};

use crate::frontier::Frontier;
use crate::matcher::Matcher;
use crate::matrix::Matrix;
use crate::result::FlcsResult;

/// Above this match level, a cell is "good enough" that skipping its row
/// or column is unlikely to improve the best path, so the right/down
/// branches are suppressed there. At `1.0` the search is exact; below
/// `1.0` it trades optimality for speed.
pub const DEFAULT_BRANCH_THRESHOLD: f32 = 0.95;

/// Best-first branch-and-bound search over a lazily evaluated W×H match
/// matrix. See the crate-level documentation for the algorithm.
pub struct Engine<'a, M: Matcher> {
    arena: &'a Bump,
    matrix: Matrix<'a>,
    frontier: Frontier<'a>,
    matcher: M,
    branch_threshold: f32,
    best_match: f32,
    best_res: Option<(usize, usize)>,
    num_steps: usize,
    num_evals: usize,
}

impl<'a, M: Matcher> Engine<'a, M> {
    /// Constructs an engine for a `width`×`height` match problem, using
    /// [`DEFAULT_BRANCH_THRESHOLD`].
    ///
    /// `arena` must outlive both the engine and the [`FlcsResult`] it
    /// eventually returns: the match matrix, the candidate pool, and the
    /// result buffer are all allocated from it.
    pub fn new(arena: &'a Bump, width: usize, height: usize, matcher: M) -> Self {
        Self::with_branch_threshold(arena, width, height, matcher, DEFAULT_BRANCH_THRESHOLD)
    }

    pub fn with_branch_threshold(
        arena: &'a Bump,
        width: usize,
        height: usize,
        matcher: M,
        branch_threshold: f32,
    ) -> Self {
        debug_assert!(width > 0 && height > 0, "dimensions must be positive");
        debug_assert!(branch_threshold <= 1.0, "branch_threshold must be <= 1.0");

        let mut frontier = Frontier::new(arena, width, height);
        frontier.insert(0, 0, 0.0);

        Self {
            arena,
            matrix: Matrix::new(arena, width, height),
            frontier,
            matcher,
            branch_threshold,
            best_match: 0.0,
            best_res: None,
            num_steps: 0,
            num_evals: 0,
        }
    }

    pub fn width(&self) -> usize {
        self.matrix.width()
    }

    pub fn height(&self) -> usize {
        self.matrix.height()
    }

    pub fn num_steps(&self) -> usize {
        self.num_steps
    }

    pub fn num_evals(&self) -> usize {
        self.num_evals
    }

    /// Performs one frontier expansion. Returns `false` iff the frontier
    /// was already empty, in which case the search is complete.
    pub fn step(&mut self) -> bool {
        let Some(c) = self.frontier.pop() else {
            return false;
        };
        self.num_steps += 1;
        let (i, j, score) = (c.i, c.j, c.score);

        let prior_best = self.matrix.get(i, j).best;
        if let Some(best) = prior_best {
            if best >= score + 1.0 {
                trace!("step {}: ({i}, {j}) dominated, best={best} score={score}", self.num_steps);
                return true;
            }
        }

        let eval = match self.matrix.get(i, j).eval {
            Some(v) => v,
            None => {
                let v = self.matcher.eval(i, j);
                debug_assert!(
                    (0.0..=1.0).contains(&v),
                    "matcher returned {v} outside [0, 1] at ({i}, {j})"
                );
                self.matrix.get_mut(i, j).eval = Some(v);
                self.num_evals += 1;
                v
            }
        };
        let new_score = score + eval;

        trace!("step {}: ({i}, {j}) eval={eval} score={score} new_score={new_score}", self.num_steps);

        if prior_best.map_or(true, |best| new_score > best) {
            self.matrix.get_mut(i, j).best = Some(new_score);

            if eval > 0.0 {
                self.add_candidate(new_score, i, j, 1, 1);
                self.frontier.prune(new_score);
            }
            if eval < self.branch_threshold {
                self.add_candidate(score, i, j, 1, 0);
                self.add_candidate(score, i, j, 0, 1);
            }
        }

        true
    }

    fn add_candidate(&mut self, score: f32, i: usize, j: usize, di: usize, dj: usize) {
        let ni = i + di;
        let nj = j + dj;

        if ni >= self.width() || nj >= self.height() {
            if score > self.best_match {
                self.best_match = score;
                self.best_res = Some((i, j));
            }
            return;
        }

        let ub = crate::frontier::upper_bound(self.width(), self.height(), ni, nj, score);
        if ub > self.best_match {
            self.frontier.insert(ni, nj, score);
        }
    }

    /// Drives the search to completion, then reconstructs and returns the
    /// best path found.
    pub fn run(&mut self) -> FlcsResult<'a> {
        while self.step() {}
        self.finish()
    }

    /// Reconstructs the best path from the matrix state as it currently
    /// stands. Only meaningful once the frontier is empty (i.e. after
    /// `step` has returned `false`, or via [`Engine::run`]).
    pub fn finish(&self) -> FlcsResult<'a> {
        debug!(
            "finished: steps={} evals={} best_match={}",
            self.num_steps, self.num_evals, self.best_match
        );
        let matches = self.matrix.reconstruct(self.arena, self.best_res);
        FlcsResult {
            total_match: self.best_match,
            matches,
        }
    }
}
