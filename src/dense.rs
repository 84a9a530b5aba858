//! Dense representation: one byte-sized register per index.
//!
//! Register `i` holds the maximum rank ever observed for a key whose mixed
//! hash has index `i`. Updates and merges are max-operations, so insertion
//! order never affects the final state.

use std::mem::size_of;

use crate::encoding;
use crate::estimate::RankHistogram;
use crate::representation::RepresentationTrait;

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Registers {
    p: u8,
    registers: Vec<u8>,
}

impl Registers {
    pub(crate) fn new(p: u8) -> Self {
        Self {
            p,
            registers: vec![0; 1 << p],
        }
    }

    /// Number of registers, `m = 2^p`.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.registers.len()
    }

    #[inline]
    pub(crate) fn as_slice(&self) -> &[u8] {
        &self.registers
    }

    /// Raise register `idx` to `rank` if larger.
    #[inline]
    pub(crate) fn update(&mut self, idx: u32, rank: u8) {
        debug_assert!(rank <= 64 - self.p + 1);
        let register = &mut self.registers[idx as usize];
        if rank > *register {
            *register = rank;
        }
    }

    /// Elementwise max with another register array of equal precision.
    pub(crate) fn merge(&mut self, other: &Registers) {
        debug_assert_eq!(self.p, other.p);
        for (register, &other_register) in self.registers.iter_mut().zip(&other.registers) {
            if other_register > *register {
                *register = other_register;
            }
        }
    }

    /// Number of registers still at zero.
    #[inline]
    pub(crate) fn zeros(&self) -> usize {
        self.registers.iter().filter(|&&r| r == 0).count()
    }
}

impl RepresentationTrait for Registers {
    #[inline]
    fn insert_hash(&mut self, hash: u64) {
        let idx = encoding::index(hash, self.p);
        let rank = encoding::rank(hash, self.p);
        self.update(idx, rank);
    }

    fn rank_histogram(&self) -> RankHistogram {
        let q = 64 - self.p;
        let mut counts = vec![0u32; q as usize + 2];
        for &register in &self.registers {
            counts[register as usize] += 1;
        }
        debug_assert_eq!(
            counts.iter().map(|&c| c as usize).sum::<usize>(),
            self.len()
        );
        RankHistogram {
            m: self.len(),
            q,
            counts,
        }
    }

    fn size_of(&self) -> usize {
        size_of::<Self>() + self.registers.len()
    }
}
