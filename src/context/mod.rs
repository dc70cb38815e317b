// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Search context for one Pareto-front enumeration.
//!
//! The context combines two kinds of state:
//! - Fixed for the whole enumeration: the per-position [`DomainLimits`] and the
//!   two caller callbacks (membership test and front sink).
//! - Mutable under backtracking: the partial assignment, whose writes all go
//!   through the [`Trail`] so the engine can restore it.
//!
//! The front found so far only ever grows, so it is not trailed.

use crate::limits::DomainLimits;
use crate::statistics::{Counters, Statistics};
use crate::trail::Trail;

/// Membership test over complete assignments.
pub type Membership<'a> = &'a mut dyn FnMut(&[u32]) -> bool;

/// Sink for Pareto-front elements.
pub type FrontSink<'a> = &'a mut dyn FnMut(&[u32]);

/// Mutable state threaded through the engine's predicates.
pub struct SearchContext<'a> {
    limits: &'a DomainLimits,

    /// Records assignment writes for backtracking.
    pub trail: Trail,

    /// Current values. Positions not yet fixed hold their domain minimum.
    assignment: Vec<u32>,

    front: Vec<Vec<u32>>,
    membership: Membership<'a>,
    on_front: FrontSink<'a>,

    pub statistics: Statistics,

    /// Reused buffer for completions passed to `membership`.
    scratch: Vec<u32>,
}

impl<'a> SearchContext<'a> {
    pub fn new(
        limits: &'a DomainLimits,
        membership: Membership<'a>,
        on_front: FrontSink<'a>,
    ) -> Self {
        let assignment: Vec<u32> = limits.iter().map(|range| range.lo).collect();
        Self {
            limits,
            trail: Trail::new(),
            scratch: Vec::with_capacity(assignment.len()),
            assignment,
            front: Vec::new(),
            membership,
            on_front,
            statistics: Statistics::new(),
        }
    }

    /// Number of assignment positions.
    pub fn width(&self) -> usize {
        self.assignment.len()
    }

    pub fn limits(&self) -> &DomainLimits {
        self.limits
    }

    pub fn assignment(&self) -> &[u32] {
        &self.assignment
    }

    /// Front elements reported so far, in report order.
    pub fn front(&self) -> &[Vec<u32>] {
        &self.front
    }

    /// Set `position` to `value`, recording the old value on the trail.
    pub fn assign(&mut self, position: usize, value: u32) {
        debug_assert!(
            self.limits.get(position).contains(value),
            "Value {} outside {} at position {}",
            value,
            self.limits.get(position),
            position
        );
        self.trail.maybe_set(&mut self.assignment, position, value);
    }

    /// Undo every assignment made after trail length `checkpoint`.
    pub fn rewind_to(&mut self, checkpoint: usize) {
        self.trail.rewind_to(checkpoint, &mut self.assignment);
    }

    /// Run the membership test on the first `fixed` positions, completed with
    /// each free position's maximum.
    ///
    /// With an upward-closed membership test, a `false` here means no
    /// completion of the prefix can satisfy it.
    pub fn upper_completion_satisfies(&mut self, fixed: usize) -> bool {
        self.scratch.clear();
        self.scratch.extend_from_slice(&self.assignment[..fixed]);
        self.scratch
            .extend(self.limits.iter().skip(fixed).map(|range| range.hi));
        self.statistics.increment(Counters::MembershipQueries);
        (self.membership)(&self.scratch)
    }

    /// Whether some reported front element is pointwise `<=` the first
    /// `fixed` positions completed with each free position's minimum.
    ///
    /// Every completion of the prefix is then dominated too.
    pub fn lower_completion_dominated(&self, fixed: usize) -> bool {
        self.front.iter().any(|point| {
            point.iter().enumerate().all(|(position, &value)| {
                let lower = if position < fixed {
                    self.assignment[position]
                } else {
                    self.limits.get(position).lo
                };
                value <= lower
            })
        })
    }

    /// Report the current assignment as a front element.
    pub fn report_front(&mut self) {
        self.statistics.increment(Counters::FrontAssignments);
        (self.on_front)(&self.assignment);
        self.front.push(self.assignment.clone());
    }

    pub fn into_statistics(self) -> Statistics {
        self.statistics
    }
}

impl std::fmt::Debug for SearchContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchContext")
            .field("assignment", &self.assignment)
            .field("trail_len", &self.trail.len())
            .field("front", &self.front)
            .finish_non_exhaustive()
    }
}
