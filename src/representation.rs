//! Sum type over the two storage representations.
//!
//! An estimator is in exactly one representation at a time. Promotion from
//! sparse to dense replaces the variant and is one-way within an instance;
//! only `reset` returns to sparse.

use enum_dispatch::enum_dispatch;

use crate::dense::Registers;
use crate::estimate::RankHistogram;
use crate::sparse::SparseList;

/// Operations both representations support.
#[enum_dispatch(Representation)]
pub(crate) trait RepresentationTrait {
    /// Record one mixed hash value.
    fn insert_hash(&mut self, hash: u64);
    /// Histogram of register ranks, at the representation's own precision.
    fn rank_histogram(&self) -> RankHistogram;
    /// Memory footprint in bytes.
    fn size_of(&self) -> usize;
}

#[enum_dispatch]
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Representation {
    Sparse(SparseList),
    Dense(Registers),
}
