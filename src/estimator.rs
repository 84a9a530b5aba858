//! The `HyperLogLogPP` estimator front type.
//!
//! Holds the immutable configuration (precision and mixer) and the current
//! representation, and drives the state machine: inserts route to whichever
//! representation is active, the sparse store promotes to dense registers
//! once it outgrows `m / 4` entries, and merges compose two estimators of
//! equal precision while promoting as needed.

use std::fmt::{Debug, Formatter};
use std::mem::size_of;
use std::ops::AddAssign;

use crate::bias;
use crate::dense::Registers;
use crate::encoding::{decode, M_PRIME};
use crate::error::Error;
use crate::estimate::{ertl_estimate, linear_counting, raw_estimate};
use crate::mixers::{murmur3_finalizer, Mixer};
use crate::representation::{Representation, RepresentationTrait};
use crate::sparse::SparseList;

/// Smallest supported precision.
pub const MIN_PRECISION: u8 = 4;
/// Largest supported precision; the empirical correction tables stop here.
pub const MAX_PRECISION: u8 = 18;

const DEFAULT_PRECISION: u8 = 12;

/// HyperLogLog++ cardinality estimator over a stream of 64-bit keys.
///
/// Precision `p` fixes the number of dense registers at `m = 2^p` and the
/// relative error at roughly `1.04 / sqrt(m)`. New estimators start in the
/// sparse representation, which keeps one 32-bit encoding per observed
/// sparse index and estimates via linear counting at the higher sparse
/// precision of 25 bits.
#[derive(Clone)]
pub struct HyperLogLogPP {
    p: u8,
    mixer: Mixer,
    representation: Representation,
}

impl HyperLogLogPP {
    /// Create an estimator with the given precision, starting sparse and
    /// mixing keys with the MurmurHash3 finalizer.
    pub fn new(precision: u8) -> Result<Self, Error> {
        Self::with_mixer(precision, true, murmur3_finalizer)
    }

    /// Create an estimator with full control over the starting
    /// representation and the bit mixer.
    pub fn with_mixer(precision: u8, sparse: bool, mixer: Mixer) -> Result<Self, Error> {
        if !(MIN_PRECISION..=MAX_PRECISION).contains(&precision) {
            return Err(Error::InvalidPrecision { precision });
        }
        Ok(Self::new_unchecked(precision, sparse, mixer))
    }

    fn new_unchecked(p: u8, sparse: bool, mixer: Mixer) -> Self {
        let representation = if sparse {
            Representation::Sparse(SparseList::new(p))
        } else {
            Representation::Dense(Registers::new(p))
        };
        Self {
            p,
            mixer,
            representation,
        }
    }

    /// Configured precision.
    #[inline]
    pub fn precision(&self) -> u8 {
        self.p
    }

    /// Whether the sparse representation is currently active.
    #[inline]
    pub fn is_sparse(&self) -> bool {
        matches!(self.representation, Representation::Sparse(_))
    }

    /// Number of dense registers, `m = 2^p`.
    #[inline]
    fn m(&self) -> usize {
        1 << self.p
    }

    /// Observe one key.
    #[inline]
    pub fn add(&mut self, key: u64) {
        let hash = (self.mixer)(key);
        self.representation.insert_hash(hash);

        if let Representation::Sparse(list) = &self.representation {
            if list.len() > self.m() / 4 {
                let registers = list.to_dense();
                self.representation = Representation::Dense(registers);
            }
        }
    }

    /// Observe a batch of keys.
    pub fn add_many(&mut self, keys: &[u64]) {
        for &key in keys {
            self.add(key);
        }
    }

    /// Merge another estimator of equal precision into this one.
    ///
    /// Merging is lossless: the result is the summary the combined key
    /// streams would have produced, up to the timing of promotion. On a
    /// precision mismatch nothing is modified.
    pub fn merge(&mut self, other: &Self) -> Result<(), Error> {
        if self.p != other.p {
            return Err(Error::PrecisionMismatch {
                lhs: self.p,
                rhs: other.p,
            });
        }

        let m = self.m();
        let promoted = match (&mut self.representation, &other.representation) {
            (Representation::Sparse(lhs), Representation::Sparse(rhs)) => {
                if lhs.len() + rhs.len() > m {
                    // The true union may be smaller, so this can promote
                    // earlier than strictly necessary.
                    let mut registers = lhs.to_dense();
                    for encoded in rhs.iter() {
                        let (idx, rank) = decode(encoded, self.p);
                        registers.update(idx, rank);
                    }
                    Some(registers)
                } else {
                    for encoded in rhs.iter() {
                        lhs.insert(encoded);
                    }
                    None
                }
            }
            (Representation::Dense(lhs), Representation::Sparse(rhs)) => {
                for encoded in rhs.iter() {
                    let (idx, rank) = decode(encoded, self.p);
                    lhs.update(idx, rank);
                }
                None
            }
            (Representation::Sparse(lhs), Representation::Dense(rhs)) => {
                let mut registers = lhs.to_dense();
                registers.merge(rhs);
                Some(registers)
            }
            (Representation::Dense(lhs), Representation::Dense(rhs)) => {
                lhs.merge(rhs);
                None
            }
        };

        if let Some(registers) = promoted {
            self.representation = Representation::Dense(registers);
        }
        Ok(())
    }

    /// Cardinality estimate of Heule et al., 2013.
    ///
    /// Sparse estimators use linear counting at the sparse precision. Dense
    /// estimators use linear counting while zero registers keep the estimate
    /// under the per-precision threshold, then the raw estimate, corrected
    /// by the empirical bias tables while it is below `5m`.
    pub fn cardinality(&self) -> u64 {
        match &self.representation {
            Representation::Sparse(list) => {
                linear_counting(M_PRIME, M_PRIME - list.len()).round() as u64
            }
            Representation::Dense(registers) => {
                let m = registers.len();
                let zeros = registers.zeros();
                if zeros != 0 {
                    let lc_estimate = linear_counting(m, zeros);
                    if lc_estimate <= f64::from(bias::threshold(self.p)) {
                        return lc_estimate.round() as u64;
                    }
                }

                let mut estimate = raw_estimate(registers.as_slice());
                if estimate <= 5.0 * m as f64 {
                    let correction = bias::estimate_bias(estimate, self.p);
                    debug_assert!(correction < estimate);
                    estimate -= correction;
                }
                estimate.round() as u64
            }
        }
    }

    /// Improved cardinality estimate of Ertl, 2017.
    ///
    /// Derives a register histogram from the active representation and
    /// applies the sigma/tau corrections; needs neither the empirical bias
    /// tables nor a switch to linear counting.
    pub fn ertl_cardinality(&self) -> u64 {
        let histogram = self.representation.rank_histogram();
        ertl_estimate(&histogram).round() as u64
    }

    /// Clear all state and return to the initial sparse representation.
    pub fn reset(&mut self) {
        self.representation = Representation::Sparse(SparseList::new(self.p));
    }

    /// Memory footprint in bytes.
    pub fn size_of(&self) -> usize {
        size_of::<Self>() + self.representation.size_of()
    }
}

impl Default for HyperLogLogPP {
    fn default() -> Self {
        Self::new_unchecked(DEFAULT_PRECISION, true, murmur3_finalizer)
    }
}

impl PartialEq for HyperLogLogPP {
    /// Equality over precision and accumulated state; the mixer is not part
    /// of the comparison.
    fn eq(&self, other: &Self) -> bool {
        self.p == other.p && self.representation == other.representation
    }
}

impl AddAssign<&HyperLogLogPP> for HyperLogLogPP {
    /// Combine-assign form of [`HyperLogLogPP::merge`].
    ///
    /// # Panics
    ///
    /// Panics if the operands have unequal precisions.
    fn add_assign(&mut self, other: &HyperLogLogPP) {
        if let Err(error) = self.merge(other) {
            panic!("{error}");
        }
    }
}

impl Debug for HyperLogLogPP {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{ representation: {}, estimate: {}, size: {} }}",
            if self.is_sparse() { "Sparse" } else { "Dense" },
            self.cardinality(),
            self.size_of()
        )
    }
}
