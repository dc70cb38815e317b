// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Redundancy filter over learned chains.
//!
//! Every Pareto-front chain passes through [`SimulationFilter::admit`], which
//! decides whether it is reported. The filter keeps every non-subsumed chain it
//! has seen, across chain lengths, so longer chains are compared against
//! shorter ones.

mod product;

pub use product::simulates;

use crate::chain::CandidateChain;
use tracing::trace;

/// Outcome of admitting a chain to the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Some forward segment or the terminal loop has no enabled letter. The
    /// chain is kept for later comparisons but not reported.
    Degenerate,
    /// The retained chain at index `by` simulates this one. Nothing is kept.
    Subsumed { by: usize },
    /// A new chain: kept and reported.
    Reported,
}

impl Admission {
    pub fn is_reported(self) -> bool {
        self == Admission::Reported
    }
}

/// The set of chains retained so far.
#[derive(Debug, Default, Clone)]
pub struct SimulationFilter {
    retained: Vec<CandidateChain>,
}

impl SimulationFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify `candidate` and update the retained set.
    ///
    /// Degenerate chains are checked first, so they are retained even when an
    /// existing chain would simulate them.
    pub fn admit(&mut self, candidate: CandidateChain) -> Admission {
        if candidate.is_degenerate() {
            trace!(chain = %candidate, "degenerate");
            self.retained.push(candidate);
            return Admission::Degenerate;
        }
        if let Some(by) = self
            .retained
            .iter()
            .position(|old| simulates(old, &candidate))
        {
            trace!(chain = %candidate, by, "subsumed");
            return Admission::Subsumed { by };
        }
        self.retained.push(candidate);
        Admission::Reported
    }

    /// Chains kept so far, in admission order.
    pub fn retained(&self) -> &[CandidateChain] {
        &self.retained
    }

    pub fn len(&self) -> usize {
        self.retained.len()
    }

    pub fn is_empty(&self) -> bool {
        self.retained.is_empty()
    }
}
