// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Candidate UVW chains as packed bit-vectors.
//!
//! A chain of length `L` over `n` letters is stored as `2L-1` segments of `n`
//! bits each:
//!
//! ```text
//! segment:  0       1        2       3        ...  2L-2
//! meaning:  loop 0  fwd 0->1 loop 1  fwd 1->2 ...  loop L-1 (terminal)
//! ```
//!
//! Bit `segment * n + letter` is **1 when the transition is absent** and 0 when
//! it is present. That polarity is what the enumerator minimizes over, so the
//! raw bits stay internal; everything else goes through the named accessors
//! ([`CandidateChain::self_loop_enabled`], [`CandidateChain::forward_enabled`],
//! [`CandidateChain::terminal_loop_enabled`]).
//!
//! # Examples
//!
//! ```
//! use uvw_learner::chain::{CandidateChain, ChainLength};
//!
//! let length = ChainLength::new(2).unwrap();
//! let mut chain = CandidateChain::all_disabled(length, 2);
//! chain.set_forward(0, 1, true);
//! chain.set_self_loop(1, 0, true);
//!
//! assert!(chain.forward_enabled(0, 1));
//! assert!(!chain.forward_enabled(0, 0));
//! assert!(chain.terminal_loop_enabled(0));
//! assert!(!chain.is_degenerate());
//! ```

pub mod reachability;

pub use reachability::{LassoReachability, ReachabilitySet};

use crate::errors::LearnError;
use crate::problem::Letter;
use std::fmt;

/// Largest supported chain length; reachability sets are one `u64`.
pub const MAX_CHAIN_LENGTH: u32 = 63;

/// Number of states in a chain, validated to `1..=MAX_CHAIN_LENGTH`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChainLength(u32);

impl ChainLength {
    /// Validate a chain length.
    ///
    /// Lengths beyond [`MAX_CHAIN_LENGTH`] are a fatal error rather than being
    /// truncated.
    pub fn new(states: u32) -> Result<Self, LearnError> {
        if states == 0 {
            return Err(LearnError::EmptyChain);
        }
        if states > MAX_CHAIN_LENGTH {
            return Err(LearnError::ChainTooLong {
                length: states,
                max: MAX_CHAIN_LENGTH,
            });
        }
        Ok(Self(states))
    }

    /// Number of states.
    pub fn states(self) -> usize {
        self.0 as usize
    }

    /// Index of the terminal (rejecting) state.
    pub fn terminal(self) -> usize {
        self.states() - 1
    }

    /// Number of segments, `2L-1`.
    pub fn segments(self) -> usize {
        2 * self.states() - 1
    }

    /// Segment holding the terminal self-loop, `2L-2`.
    pub fn terminal_segment(self) -> usize {
        self.segments() - 1
    }

    /// Total bit count for an alphabet of `nof_letters`.
    pub fn bits(self, nof_letters: usize) -> usize {
        self.segments() * nof_letters
    }
}

impl fmt::Display for ChainLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A candidate chain: which self-loop and forward transitions exist, per letter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CandidateChain {
    length: ChainLength,
    nof_letters: usize,
    /// Bit i set means transition i is disabled.
    words: Vec<u64>,
}

impl CandidateChain {
    /// A chain with every transition present.
    pub fn all_enabled(length: ChainLength, nof_letters: usize) -> Self {
        let bits = length.bits(nof_letters);
        Self {
            length,
            nof_letters,
            words: vec![0; bits.div_ceil(64)],
        }
    }

    /// A chain with every transition absent.
    pub fn all_disabled(length: ChainLength, nof_letters: usize) -> Self {
        let mut chain = Self::all_enabled(length, nof_letters);
        for index in 0..chain.bit_count() {
            chain.set_disabled(index, true);
        }
        chain
    }

    /// Decode an enumerator assignment (one value per bit; non-zero = disabled).
    ///
    /// # Panics
    ///
    /// Panics if `values` does not have exactly `length.bits(nof_letters)` entries.
    pub fn from_assignment(length: ChainLength, nof_letters: usize, values: &[u32]) -> Self {
        assert_eq!(
            values.len(),
            length.bits(nof_letters),
            "Assignment width does not match a chain of length {} over {} letters",
            length,
            nof_letters
        );
        let mut chain = Self::all_enabled(length, nof_letters);
        for (index, &value) in values.iter().enumerate() {
            if value != 0 {
                chain.set_disabled(index, true);
            }
        }
        chain
    }

    /// Encode as an enumerator assignment (1 = disabled).
    pub fn to_assignment(&self) -> Vec<u32> {
        (0..self.bit_count())
            .map(|index| u32::from(self.is_disabled(index)))
            .collect()
    }

    pub fn length(&self) -> ChainLength {
        self.length
    }

    pub fn nof_letters(&self) -> usize {
        self.nof_letters
    }

    /// Number of bits, `nof_letters * (2L-1)`.
    pub fn bit_count(&self) -> usize {
        self.length.bits(self.nof_letters)
    }

    fn index(&self, segment: usize, letter: Letter) -> usize {
        debug_assert!(
            segment < self.length.segments(),
            "Segment out of range: {} >= {}",
            segment,
            self.length.segments()
        );
        debug_assert!(
            letter < self.nof_letters,
            "Letter out of range: {} >= {}",
            letter,
            self.nof_letters
        );
        segment * self.nof_letters + letter
    }

    fn is_disabled(&self, index: usize) -> bool {
        (self.words[index / 64] >> (index % 64)) & 1 != 0
    }

    fn set_disabled(&mut self, index: usize, disabled: bool) {
        let mask = 1u64 << (index % 64);
        if disabled {
            self.words[index / 64] |= mask;
        } else {
            self.words[index / 64] &= !mask;
        }
    }

    /// Whether state `state` loops on `letter`.
    pub fn self_loop_enabled(&self, state: usize, letter: Letter) -> bool {
        !self.is_disabled(self.index(2 * state, letter))
    }

    /// Whether `state` moves to `state + 1` on `letter`.
    ///
    /// The terminal state has no forward segment; asking for it is a bug.
    pub fn forward_enabled(&self, state: usize, letter: Letter) -> bool {
        debug_assert!(
            state < self.length.terminal(),
            "Terminal state {} has no forward transition",
            state
        );
        !self.is_disabled(self.index(2 * state + 1, letter))
    }

    /// Whether the terminal state loops on `letter`.
    pub fn terminal_loop_enabled(&self, letter: Letter) -> bool {
        self.self_loop_enabled(self.length.terminal(), letter)
    }

    pub fn set_self_loop(&mut self, state: usize, letter: Letter, enabled: bool) {
        let index = self.index(2 * state, letter);
        self.set_disabled(index, !enabled);
    }

    pub fn set_forward(&mut self, state: usize, letter: Letter, enabled: bool) {
        debug_assert!(state < self.length.terminal());
        let index = self.index(2 * state + 1, letter);
        self.set_disabled(index, !enabled);
    }

    /// Enabled flags of one segment, in letter order.
    pub fn segment_enabled(&self, segment: usize) -> impl Iterator<Item = bool> + '_ {
        (0..self.nof_letters).map(move |letter| !self.is_disabled(self.index(segment, letter)))
    }

    /// Whether any letter enables a transition in `segment`.
    pub fn segment_has_enabled(&self, segment: usize) -> bool {
        self.segment_enabled(segment).any(|enabled| enabled)
    }

    /// A chain is degenerate when some forward segment, or the terminal
    /// self-loop segment, has no enabled letter.
    ///
    /// Such a chain can never reach (or never stay in) its terminal state, so it
    /// rejects nothing.
    pub fn is_degenerate(&self) -> bool {
        let forward_empty =
            (0..self.length.terminal()).any(|state| !self.segment_has_enabled(2 * state + 1));
        forward_empty || !self.segment_has_enabled(self.length.terminal_segment())
    }

    /// Whether every transition of `self` is also present in `other`.
    ///
    /// Both chains must have the same shape.
    pub fn is_restriction_of(&self, other: &CandidateChain) -> bool {
        self.length == other.length
            && self.nof_letters == other.nof_letters
            && self
                .words
                .iter()
                .zip(&other.words)
                .all(|(mine, theirs)| theirs & !mine == 0)
    }
}

impl fmt::Display for CandidateChain {
    /// Segments as raw bits, `1` = disabled, separated by `|`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in 0..self.length.segments() {
            if segment > 0 {
                write!(f, "|")?;
            }
            for enabled in self.segment_enabled(segment) {
                write!(f, "{}", if enabled { '0' } else { '1' })?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn length(states: u32) -> ChainLength {
        ChainLength::new(states).unwrap()
    }

    #[test]
    fn test_chain_length_bounds() {
        assert!(matches!(ChainLength::new(0), Err(LearnError::EmptyChain)));
        assert_eq!(ChainLength::new(63).unwrap().states(), 63);
        assert!(matches!(
            ChainLength::new(64),
            Err(LearnError::ChainTooLong { length: 64, max: 63 })
        ));
    }

    #[test]
    fn test_chain_length_geometry() {
        let l = length(3);
        assert_eq!(l.terminal(), 2);
        assert_eq!(l.segments(), 5);
        assert_eq!(l.terminal_segment(), 4);
        assert_eq!(l.bits(4), 20);
    }

    #[test]
    fn test_segment_index_layout() {
        // Three states, three letters: 15 bits.
        let l = length(3);
        let mut values = vec![0u32; 15];
        values[3 + 2] = 1; // forward 0->1 on letter 2
        values[6 + 1] = 1; // loop at state 1 on letter 1
        values[12] = 1; // terminal loop on letter 0
        let chain = CandidateChain::from_assignment(l, 3, &values);

        assert!(!chain.forward_enabled(0, 2));
        assert!(chain.forward_enabled(0, 1));
        assert!(!chain.self_loop_enabled(1, 1));
        assert!(chain.self_loop_enabled(1, 0));
        assert!(!chain.terminal_loop_enabled(0));
        assert!(chain.terminal_loop_enabled(1));
        assert_eq!(chain.to_assignment(), values);
    }

    #[test]
    fn test_wide_alphabet_spans_words() {
        let l = length(2);
        let mut chain = CandidateChain::all_enabled(l, 50);
        assert_eq!(chain.bit_count(), 150);
        chain.set_self_loop(1, 49, false);
        assert!(!chain.terminal_loop_enabled(49));
        assert!(chain.terminal_loop_enabled(48));
        assert!(chain.forward_enabled(0, 49));
    }

    #[test]
    fn test_degenerate() {
        let l = length(2);
        let mut chain = CandidateChain::all_disabled(l, 2);
        assert!(chain.is_degenerate());

        chain.set_self_loop(1, 0, true);
        assert!(chain.is_degenerate()); // forward segment still empty

        chain.set_forward(0, 1, true);
        assert!(!chain.is_degenerate());

        // Self-loops of non-terminal states are not required.
        assert!(!chain.segment_has_enabled(0));
    }

    #[test]
    fn test_restriction_order() {
        let l = length(1);
        let all = CandidateChain::all_enabled(l, 2);
        let mut some = CandidateChain::all_enabled(l, 2);
        some.set_self_loop(0, 1, false);

        assert!(some.is_restriction_of(&all));
        assert!(!all.is_restriction_of(&some));
        assert!(some.is_restriction_of(&some));
    }

    #[test]
    fn test_display_raw_bits() {
        let l = length(2);
        let mut chain = CandidateChain::all_enabled(l, 2);
        chain.set_forward(0, 0, false);
        assert_eq!(chain.to_string(), "00|10|00");
    }
}
