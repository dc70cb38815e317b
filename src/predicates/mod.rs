// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Search predicates.
//!
//! The Pareto-front program is three predicates run by the
//! [`SearchEngine`](crate::engine::SearchEngine):
//!
//! - [`AssignPositionsPredicate`]: fixes one position per round, pruning
//!   prefixes that cannot lead to a new front element
//! - [`ReportFrontPredicate`]: reports the complete assignment
//! - [`FailPredicate`]: forces backtracking into the next alternative

pub mod assignment;
pub mod front;

pub use assignment::AssignPositionsPredicate;
pub use front::ReportFrontPredicate;

use crate::context::SearchContext;
use crate::engine::{Predicate, PredicateResult, TerminalPredicate};

/// Built-in fail predicate (Prolog's `fail.`).
///
/// Ending a program with `FailPredicate` makes the engine explore every
/// alternative before returning.
#[derive(Debug)]
pub struct FailPredicate;

impl Predicate for FailPredicate {
    fn try_pred(&mut self, _ctx: &mut SearchContext<'_>, _round: usize) -> PredicateResult {
        PredicateResult::Failure
    }

    fn name(&self) -> &str {
        "Fail"
    }
}

impl TerminalPredicate for FailPredicate {}
