use bumpalo::collections::Vec as BumpVec;

/// One matched pair on the reconstructed path.
///
/// `match_val` is always in `(0, 1]`; `i` and `j` are strictly increasing
/// across successive entries of [`FlcsResult::matches`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResultMatch {
    pub i: usize,
    pub j: usize,
    pub match_val: f32,
}

/// The outcome of a completed engine run.
///
/// `matches` is allocated from the same arena the engine was constructed
/// with, so its lifetime is tied to that arena rather than to the engine
/// itself.
pub struct FlcsResult<'a> {
    pub total_match: f32,
    pub matches: BumpVec<'a, ResultMatch>,
}
