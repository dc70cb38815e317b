// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Position-by-position assignment with Pareto pruning.

use crate::context::SearchContext;
use crate::engine::{Predicate, PredicateResult};

/// Fixes assignment position `round` on each round, lowest value first.
///
/// Before offering choices for a position, the prefix fixed so far is checked
/// twice:
/// - the completion with every free position at its maximum must satisfy the
///   membership test, otherwise no completion can (membership is upward-closed);
/// - the completion with every free position at its minimum must not be
///   dominated by a reported front element, otherwise every completion is.
///
/// Once every position is fixed the same two checks decide whether the
/// assignment is a new front element.
#[derive(Debug, Default)]
pub struct AssignPositionsPredicate;

impl AssignPositionsPredicate {
    pub fn new() -> Self {
        Self
    }
}

impl Predicate for AssignPositionsPredicate {
    fn try_pred(&mut self, ctx: &mut SearchContext<'_>, round: usize) -> PredicateResult {
        if ctx.lower_completion_dominated(round) || !ctx.upper_completion_satisfies(round) {
            return PredicateResult::Failure;
        }
        if round == ctx.width() {
            PredicateResult::Success
        } else {
            PredicateResult::Choices(ctx.limits().get(round).width())
        }
    }

    fn retry_pred(
        &mut self,
        ctx: &mut SearchContext<'_>,
        round: usize,
        choice: usize,
    ) -> PredicateResult {
        let value = ctx.limits().get(round).lo + choice as u32;
        ctx.assign(round, value);
        PredicateResult::SuccessSamePredicate
    }

    fn name(&self) -> &str {
        "AssignPositions"
    }
}
