//! A best-first branch-and-bound solver for the fuzzy longest common
//! subsequence (FLCS) problem.
//!
//! Given two sequences of lengths `width` and `height` and an opaque
//! match function `f(i, j) -> [0, 1]` (a [`Matcher`]), [`Engine`] finds a
//! monotonically increasing index-pair path maximising the sum of
//! `f(i, j)` over points where `f > 0`. Unlike classical LCS (binary
//! equality over a discrete alphabet), each pair carries a continuous
//! match weight.
//!
//! The engine evaluates `f` at most once per cell, uses branch-and-bound
//! pruning against the best path found so far, and in the well-matched
//! case does far less than the `width * height` work of a classical
//! dynamic-programming fill.
//!
//! ```
//! use bumpalo::Bump;
//! use flcs_core::Engine;
//!
//! let arena = Bump::new();
//! let a = b"ABCBDAB";
//! let b = b"BDCABA";
//! let matcher = |i: usize, j: usize| if a[i] == b[j] { 1.0 } else { 0.0 };
//! let mut engine = Engine::with_branch_threshold(&arena, a.len(), b.len(), matcher, 1.0);
//! let result = engine.run();
//! assert_eq!(result.total_match, 4.0);
//! ```

mod engine;
mod frontier;
mod matcher;
mod matrix;
mod result;

pub use engine::{Engine, DEFAULT_BRANCH_THRESHOLD};
pub use matcher::{ClosureMatcher, EqualityMatcher, Matcher};
pub use result::{FlcsResult, ResultMatch};
