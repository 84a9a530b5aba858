//! `hllpp` estimates the number of distinct 64-bit keys in a stream or
//! dataset using HyperLogLog++ with a sparse low-cardinality representation.
//!
//! # Design
//!
//! An estimator is configured with a precision `p` in `[4, 18]` and holds one
//! of two representations:
//!
//! - **Sparse**: below `2^p / 4` observed sparse indices, hashes are kept as
//!   32-bit encodings carrying 25 index bits plus rank information. Estimates
//!   come from linear counting at the 25-bit sparse precision, which is far
//!   more accurate than `2^p` registers at low cardinalities.
//! - **Dense**: `2^p` byte registers, each holding the maximum observed rank
//!   for its index. The sparse store promotes to dense once it outgrows its
//!   cap; promotion is lossless and one-way.
//!
//! Two estimation pipelines are available:
//!
//! - [`HyperLogLogPP::cardinality`]: the estimator of Heule et al., 2013.
//!   Linear counting below a per-precision threshold, otherwise the raw
//!   harmonic-mean estimate corrected by empirical bias tables up to `5m`.
//! - [`HyperLogLogPP::ertl_cardinality`]: the improved estimator of Ertl,
//!   2017. Sigma/tau corrections over a register histogram, with no
//!   empirical data and no estimator switching.
//!
//! Estimators of equal precision merge losslessly, so streams can be counted
//! in parallel on per-thread instances and combined at the end.
//!
//! # Example
//!
//! ```
//! use hllpp::HyperLogLogPP;
//!
//! let mut left = HyperLogLogPP::new(14)?;
//! let mut right = HyperLogLogPP::new(14)?;
//!
//! for key in 0..75_000u64 {
//!     left.add(key);
//! }
//! for key in 50_000..100_000u64 {
//!     right.add(key);
//! }
//!
//! left.merge(&right)?;
//! let estimate = left.cardinality();
//! assert!((98_000..=102_000).contains(&estimate));
//! # Ok::<(), hllpp::Error>(())
//! ```
//!
//! Keys are mixed by an injected avalanche function (see [`mixers`]), so any
//! 64-bit identifier can be fed directly; feeding the same key twice never
//! changes the state.

mod bias;
mod dense;
mod encoding;
mod error;
mod estimate;
mod estimator;
pub mod mixers;
mod representation;
mod sparse;

pub use error::Error;
pub use estimator::{HyperLogLogPP, MAX_PRECISION, MIN_PRECISION};
