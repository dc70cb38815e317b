// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The model-checking predicate.
//!
//! A chain rejects a lasso word when some run can reach the terminal state
//! after the prefix and then stay there forever. Positive examples must not be
//! rejected.
//!
//! The predicate is upward-closed in the disabled bits: turning a transition
//! off can shrink reachable sets and create escapes, never the opposite. The
//! Pareto enumerator depends on this.

use crate::chain::reachability::lasso_reachability;
use crate::chain::CandidateChain;
use crate::problem::{LassoExample, Letter};

/// Whether the terminal state is forced out on some letter of the cycle.
///
/// If the terminal self-loop is missing for any cycle letter, no run can stay
/// in the terminal state forever, so the example cannot be rejected.
pub fn escapes_terminal(chain: &CandidateChain, cycle: &[Letter]) -> bool {
    cycle
        .iter()
        .any(|&letter| !chain.terminal_loop_enabled(letter))
}

/// Whether `chain` rejects `example`.
pub fn rejects(chain: &CandidateChain, example: &LassoExample) -> bool {
    if escapes_terminal(chain, example.cycle()) {
        return false;
    }
    lasso_reachability(chain, example)
        .in_cycle
        .contains(chain.length().terminal())
}

/// Index of the first example `chain` rejects, if any.
pub fn first_rejected(chain: &CandidateChain, examples: &[LassoExample]) -> Option<usize> {
    examples.iter().position(|example| rejects(chain, example))
}

/// Whether `chain` accepts every example.
pub fn is_consistent(chain: &CandidateChain, examples: &[LassoExample]) -> bool {
    first_rejected(chain, examples).is_none()
}
