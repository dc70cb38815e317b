// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Pareto-front enumeration over bounded integer assignments.
//!
//! Given per-position ranges and an upward-closed membership test, the front
//! is the set of satisfying assignments that are minimal under the pointwise
//! order: no other satisfying assignment is `<=` in every position and
//! different.
//!
//! # Examples
//!
//! ```
//! use uvw_learner::limits::DomainLimits;
//! use uvw_learner::pareto::{BacktrackingEnumerator, ParetoEnumerator};
//!
//! let limits = DomainLimits::free(2);
//! let mut front = Vec::new();
//! BacktrackingEnumerator.enumerate(
//!     &limits,
//!     &mut |values| values.contains(&1),
//!     &mut |values| front.push(values.to_vec()),
//! );
//! assert_eq!(front, vec![vec![0, 1], vec![1, 0]]);
//! ```

use crate::context::SearchContext;
use crate::engine::EngineBuilder;
use crate::limits::DomainLimits;
use crate::predicates::{AssignPositionsPredicate, FailPredicate, ReportFrontPredicate};
use crate::statistics::Statistics;
use tracing::debug;

/// Enumerates the Pareto front of a membership test.
pub trait ParetoEnumerator {
    /// Call `on_front` once for each minimal assignment within `limits` that
    /// satisfies `membership`.
    ///
    /// `membership` must be upward-closed: if it holds for an assignment, it
    /// holds for every pointwise-larger one.
    fn enumerate(
        &self,
        limits: &DomainLimits,
        membership: &mut dyn FnMut(&[u32]) -> bool,
        on_front: &mut dyn FnMut(&[u32]),
    ) -> Statistics;
}

/// Depth-first enumerator built on the backtracking [engine](crate::engine).
///
/// Positions are fixed in index order, lowest value first, so front elements
/// are reported in lexicographic order.
#[derive(Debug, Default, Clone, Copy)]
pub struct BacktrackingEnumerator;

impl ParetoEnumerator for BacktrackingEnumerator {
    fn enumerate(
        &self,
        limits: &DomainLimits,
        membership: &mut dyn FnMut(&[u32]) -> bool,
        on_front: &mut dyn FnMut(&[u32]),
    ) -> Statistics {
        let mut ctx = SearchContext::new(limits, membership, on_front);
        let engine = EngineBuilder::new()
            .add(Box::new(AssignPositionsPredicate::new()))
            .add(Box::new(ReportFrontPredicate))
            .terminal(Box::new(FailPredicate))
            .build();

        if let Some(engine) = engine.search(&mut ctx) {
            // No predicate in this program suspends.
            let (tries, retries) = engine.statistics();
            debug!(tries, retries, "enumeration suspended unexpectedly");
        }
        debug!(
            width = ctx.width(),
            front = ctx.front().len(),
            "Pareto enumeration complete"
        );
        ctx.into_statistics()
    }
}

/// Whether `a` is pointwise `<=` `b`.
pub fn dominates(a: &[u32], b: &[u32]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x <= y)
}

/// Remove duplicates and every point dominated by another point.
///
/// The surviving points keep their original relative order.
pub fn clean_pareto_front(points: Vec<Vec<u32>>) -> Vec<Vec<u32>> {
    let mut kept: Vec<Vec<u32>> = Vec::with_capacity(points.len());
    for (i, point) in points.iter().enumerate() {
        let beaten = points.iter().enumerate().any(|(j, other)| {
            j != i && dominates(other, point) && (other != point || j < i)
        });
        if !beaten {
            kept.push(point.clone());
        }
    }
    kept
}
