// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Simulation of one chain by another, by search over product states.
//!
//! `old` simulates `candidate` when every transition the candidate can take is
//! matched by `old`: a candidate self-loop by an `old` self-loop, a candidate
//! forward move either by an `old` self-loop (old waits) or by an `old` forward
//! move (both advance). The relation is not symmetric. `old` may wait while the
//! candidate advances, but the candidate never waits for `old`.
//!
//! Product state `(p, q)` pairs candidate state `p` with `old` state `q`. The
//! candidate is simulated when `(L-1, L'-1)` is reachable and the terminal
//! loops are compatible.

use crate::chain::CandidateChain;
use std::collections::VecDeque;

/// Whether `old` matches the candidate's terminal loop on every letter.
fn terminal_compatible(candidate: &CandidateChain, old: &CandidateChain) -> bool {
    (0..candidate.nof_letters())
        .all(|letter| !candidate.terminal_loop_enabled(letter) || old.terminal_loop_enabled(letter))
}

/// Candidate self-loops at `p` are all matched by `old` self-loops at `q`.
fn stay_feasible(candidate: &CandidateChain, p: usize, old: &CandidateChain, q: usize) -> bool {
    (0..candidate.nof_letters())
        .all(|letter| !candidate.self_loop_enabled(p, letter) || old.self_loop_enabled(q, letter))
}

/// Candidate forward moves at `p` are matched by `old` looping at `q`.
fn wait_feasible(candidate: &CandidateChain, p: usize, old: &CandidateChain, q: usize) -> bool {
    (0..candidate.nof_letters())
        .all(|letter| !candidate.forward_enabled(p, letter) || old.self_loop_enabled(q, letter))
}

/// Candidate forward moves at `p` are matched by `old` moving forward at `q`.
fn advance_feasible(candidate: &CandidateChain, p: usize, old: &CandidateChain, q: usize) -> bool {
    (0..candidate.nof_letters())
        .all(|letter| !candidate.forward_enabled(p, letter) || old.forward_enabled(q, letter))
}

/// Whether `old` simulates `candidate`.
///
/// Both chains must be over the same alphabet; their lengths may differ.
pub fn simulates(old: &CandidateChain, candidate: &CandidateChain) -> bool {
    debug_assert_eq!(
        old.nof_letters(),
        candidate.nof_letters(),
        "Chains over different alphabets"
    );
    if !terminal_compatible(candidate, old) {
        return false;
    }

    let candidate_terminal = candidate.length().terminal();
    let old_terminal = old.length().terminal();
    let old_states = old.length().states();
    let target = (candidate_terminal, old_terminal);

    let mut visited = vec![false; candidate.length().states() * old_states];
    let mut todo = VecDeque::new();
    visited[0] = true;
    todo.push_back((0usize, 0usize));

    while let Some((p, q)) = todo.pop_front() {
        if (p, q) == target {
            return true;
        }
        if p == candidate_terminal || !stay_feasible(candidate, p, old, q) {
            continue;
        }

        let mut successors = [None, None];
        if wait_feasible(candidate, p, old, q) {
            successors[0] = Some((p + 1, q));
        }
        if q < old_terminal && advance_feasible(candidate, p, old, q) {
            successors[1] = Some((p + 1, q + 1));
        }
        for (next_p, next_q) in successors.into_iter().flatten() {
            let slot = next_p * old_states + next_q;
            if !visited[slot] {
                visited[slot] = true;
                todo.push_back((next_p, next_q));
            }
        }
    }
    false
}
