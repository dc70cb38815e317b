// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Reachable-state sets of a chain along a lasso word.
//!
//! States are packed into a single `u64`, which is what bounds chain length to
//! [`MAX_CHAIN_LENGTH`](super::MAX_CHAIN_LENGTH).

use super::CandidateChain;
use crate::problem::{LassoExample, Letter};
use std::fmt;

/// A set of chain states as a bitset; bit k is state k.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ReachabilitySet(u64);

impl ReachabilitySet {
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Only the initial state.
    pub const fn initial() -> Self {
        Self(1)
    }

    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    pub fn bits(self) -> u64 {
        self.0
    }

    pub fn contains(self, state: usize) -> bool {
        (self.0 >> state) & 1 != 0
    }

    pub fn insert(&mut self, state: usize) {
        self.0 |= 1 << state;
    }

    pub fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub fn is_subset(self, other: Self) -> bool {
        self.0 & !other.0 == 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// States in ascending order.
    pub fn iter(self) -> impl Iterator<Item = usize> {
        let mut bits = self.0;
        std::iter::from_fn(move || {
            if bits == 0 {
                return None;
            }
            let state = bits.trailing_zeros() as usize;
            bits &= bits - 1;
            Some(state)
        })
    }
}

impl fmt::Display for ReachabilitySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, state) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", state)?;
        }
        write!(f, "}}")
    }
}

/// Reachability of one example: after the prefix, and saturated over the cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LassoReachability {
    /// States reachable right after the prefix.
    pub after_prefix: ReachabilitySet,
    /// Union of the sets reached at every cycle boundary (including the first).
    pub in_cycle: ReachabilitySet,
}

/// States reachable from `reached` after reading one `letter`.
///
/// A state survives if its self-loop allows the letter; its successor becomes
/// reachable if the forward transition allows it.
pub fn step(chain: &CandidateChain, reached: ReachabilitySet, letter: Letter) -> ReachabilitySet {
    let terminal = chain.length().terminal();
    let mut next = ReachabilitySet::empty();
    for state in reached.iter() {
        if chain.self_loop_enabled(state, letter) {
            next.insert(state);
        }
        if state < terminal && chain.forward_enabled(state, letter) {
            next.insert(state + 1);
        }
    }
    next
}

/// States reachable after reading all of `word` from `start`.
///
/// Only the final set is kept; intermediate sets are not accumulated.
pub fn after_word(
    chain: &CandidateChain,
    start: ReachabilitySet,
    word: &[Letter],
) -> ReachabilitySet {
    word.iter()
        .fold(start, |reached, &letter| step(chain, reached, letter))
}

/// Union of all sets reached at cycle boundaries, starting from `start`.
///
/// Runs whole passes over `cycle` until a pass adds nothing to the union. The
/// union can only grow and is bounded by the chain's states, so this takes at
/// most `L + 1` passes.
pub fn saturate_cycle(
    chain: &CandidateChain,
    start: ReachabilitySet,
    cycle: &[Letter],
) -> ReachabilitySet {
    let mut union = start;
    if start.is_empty() {
        return union;
    }
    let mut current = start;
    loop {
        current = after_word(chain, current, cycle);
        let grown = union.union(current);
        if grown == union {
            return union;
        }
        union = grown;
    }
}

/// Run a whole example through the chain, starting from state 0.
pub fn lasso_reachability(chain: &CandidateChain, example: &LassoExample) -> LassoReachability {
    let after_prefix = after_word(chain, ReachabilitySet::initial(), example.prefix());
    let in_cycle = saturate_cycle(chain, after_prefix, example.cycle());
    LassoReachability {
        after_prefix,
        in_cycle,
    }
}
