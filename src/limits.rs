// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Per-bit search domains and the safety modes that fix some of them.
//!
//! In SAFETY and FINITEWORDS mode the last letter is an end-of-word marker.
//! It may never drive a transition except the terminal self-loop, where it is
//! always enabled. The ordinary letters of the terminal self-loop are then all
//! enabled (SAFETY: the terminal state is a rejecting sink) or all disabled
//! (FINITEWORDS: only the end-of-word marker can repeat forever).

use crate::chain::ChainLength;
use std::fmt;
use strum_macros::Display;

/// Acceptance discipline for the learned chains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum SafetyMode {
    #[default]
    Liveness,
    Safety,
    FiniteWords,
}

/// Inclusive value range of one assignment position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitRange {
    pub lo: u32,
    pub hi: u32,
}

impl BitRange {
    /// Unconstrained bit.
    pub const FREE: BitRange = BitRange { lo: 0, hi: 1 };

    /// Create a range; `lo` must not exceed `hi`.
    pub fn new(lo: u32, hi: u32) -> Self {
        assert!(lo <= hi, "Empty range {}..={}", lo, hi);
        Self { lo, hi }
    }

    /// Range holding exactly `value`.
    pub const fn fixed(value: u32) -> Self {
        Self {
            lo: value,
            hi: value,
        }
    }

    /// Number of values in the range.
    pub fn width(self) -> usize {
        (self.hi - self.lo) as usize + 1
    }

    pub fn is_fixed(self) -> bool {
        self.lo == self.hi
    }

    pub fn contains(self, value: u32) -> bool {
        (self.lo..=self.hi).contains(&value)
    }
}

impl fmt::Display for BitRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.lo, self.hi)
    }
}

/// One [`BitRange`] per assignment position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DomainLimits(Vec<BitRange>);

impl DomainLimits {
    /// `width` unconstrained bits.
    pub fn free(width: usize) -> Self {
        Self(vec![BitRange::FREE; width])
    }

    pub fn from_ranges(ranges: Vec<BitRange>) -> Self {
        Self(ranges)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, position: usize) -> BitRange {
        self.0[position]
    }

    pub fn fix(&mut self, position: usize, value: u32) {
        self.0[position] = BitRange::fixed(value);
    }

    pub fn iter(&self) -> impl Iterator<Item = BitRange> + '_ {
        self.0.iter().copied()
    }

    /// Whether `values` has the right width and every value is in range.
    pub fn admits(&self, values: &[u32]) -> bool {
        values.len() == self.len() && self.iter().zip(values).all(|(range, &v)| range.contains(v))
    }

    /// Number of positions left free to the search.
    pub fn free_positions(&self) -> usize {
        self.iter().filter(|range| !range.is_fixed()).count()
    }
}

/// Build the search domain for chains of `length` over `nof_letters`.
///
/// Positions follow the chain layout: `segment * nof_letters + letter`, where
/// the value is 1 when the transition is absent.
pub fn build_limits(length: ChainLength, nof_letters: usize, mode: SafetyMode) -> DomainLimits {
    let mut limits = DomainLimits::free(length.bits(nof_letters));
    if mode == SafetyMode::Liveness {
        return limits;
    }
    let Some(end_of_word) = nof_letters.checked_sub(1) else {
        return limits;
    };

    let terminal_segment = length.terminal_segment();
    for segment in 0..terminal_segment {
        limits.fix(segment * nof_letters + end_of_word, 1);
    }

    let ordinary = if mode == SafetyMode::FiniteWords { 1 } else { 0 };
    for letter in 0..end_of_word {
        limits.fix(terminal_segment * nof_letters + letter, ordinary);
    }
    limits.fix(terminal_segment * nof_letters + end_of_word, 0);

    limits
}
