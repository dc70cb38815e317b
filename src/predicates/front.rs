// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

use crate::context::SearchContext;
use crate::engine::{Predicate, PredicateResult};

/// Reports the current (complete) assignment as a Pareto-front element.
#[derive(Debug)]
pub struct ReportFrontPredicate;

impl Predicate for ReportFrontPredicate {
    fn try_pred(&mut self, ctx: &mut SearchContext<'_>, _round: usize) -> PredicateResult {
        ctx.report_front();
        PredicateResult::Success
    }

    fn name(&self) -> &str {
        "ReportFront"
    }
}
