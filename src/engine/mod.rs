// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Non-deterministic search engine.
//!
//! This module implements a backtracking search engine that runs predicates
//! in sequence. The engine coordinates with the trail in the
//! [`SearchContext`] to restore the assignment on backtracking.
//!
//! # Architecture
//!
//! The engine maintains a stack of predicate execution states. Each stack entry tracks:
//! - Which predicate is executing
//! - Current round number (for predicates that execute multiple times)
//! - Whether it is still to be called, is iterating over choices, or has
//!   already succeeded deterministically
//! - The trail checkpoint to rewind to
//!
//! The execution model is WAM-like:
//! 1. Call try_pred(round) on each predicate
//! 2. If Success: advance to next predicate
//! 3. If SuccessSamePredicate: increment round, stay at same predicate
//! 4. If Choices(n): enter choice mode, call retry_pred(round, 0..n-1)
//! 5. If Failure: backtrack to the most recent entry with choices left
//! 6. If Suspend: pause and return control to caller
//!
//! # Example
//!
//! ```
//! use uvw_learner::context::SearchContext;
//! use uvw_learner::engine::{EngineBuilder, Predicate, PredicateResult};
//! use uvw_learner::limits::DomainLimits;
//! use uvw_learner::predicates::FailPredicate;
//!
//! #[derive(Debug)]
//! struct Report;
//!
//! impl Predicate for Report {
//!     fn try_pred(&mut self, ctx: &mut SearchContext<'_>, _round: usize) -> PredicateResult {
//!         ctx.report_front();
//!         PredicateResult::Success
//!     }
//! }
//!
//! let limits = DomainLimits::free(2);
//! let mut membership = |_: &[u32]| true;
//! let mut count = 0;
//! let mut sink = |_: &[u32]| count += 1;
//! let mut ctx = SearchContext::new(&limits, &mut membership, &mut sink);
//!
//! let engine = EngineBuilder::new()
//!     .add(Box::new(Report))
//!     .terminal(Box::new(FailPredicate))
//!     .build();
//! assert!(engine.search(&mut ctx).is_none());
//! drop(ctx);
//! assert_eq!(count, 1);
//! ```

pub mod predicate;

pub use predicate::{Predicate, PredicateResult, TerminalPredicate};

use crate::context::SearchContext;
use tracing::trace;

/// Initial capacity of the predicate stack.
const INITIAL_STACK_SIZE: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryMode {
    /// `try_pred` has not been called yet.
    Call,
    /// Iterating over the choices offered by `try_pred`.
    Choice { next: usize, count: usize },
    /// `try_pred` succeeded without offering choices; nothing left to retry.
    Done,
}

/// Stack entry tracking the state of one predicate execution.
#[derive(Debug)]
struct StackEntry {
    /// Index of the predicate in the predicates list.
    predicate_index: usize,

    /// Current round number (incremented by SuccessSamePredicate).
    round: usize,

    mode: EntryMode,

    /// Trail checkpoint for this stack entry.
    trail_checkpoint: usize,
}

/// Search engine that coordinates predicate execution and backtracking.
pub struct SearchEngine {
    /// List of predicates to execute in sequence.
    predicates: Vec<Box<dyn Predicate>>,

    /// Stack of predicate execution states.
    stack: Vec<StackEntry>,

    /// Statistics: number of try_pred calls.
    try_count: u64,

    /// Statistics: number of retry_pred calls.
    retry_count: u64,
}

impl SearchEngine {
    /// Create a new search engine with the given predicates.
    ///
    /// Prefer [`EngineBuilder`], which checks that the sequence ends in a
    /// [`TerminalPredicate`].
    pub fn new(predicates: Vec<Box<dyn Predicate>>) -> Self {
        Self {
            predicates,
            stack: Vec::with_capacity(INITIAL_STACK_SIZE),
            try_count: 0,
            retry_count: 0,
        }
    }

    /// Run the search.
    ///
    /// Consumes the engine and returns:
    /// - `Some(engine)` if a predicate suspended; calling `search` again resumes
    /// - `None` once every alternative has been exhausted
    ///
    /// Results are delivered through side effects on `ctx`.
    ///
    /// # Panics
    ///
    /// Panics if the last predicate returns Success (the program has no
    /// terminal predicate), or if `retry_pred` returns Choices or Suspend.
    pub fn search(mut self, ctx: &mut SearchContext<'_>) -> Option<Self> {
        if self.stack.is_empty() {
            if self.predicates.is_empty() {
                return None;
            }
            self.push_entry(0, 0, ctx);
        }

        while let Some(entry) = self.stack.last_mut() {
            ctx.rewind_to(entry.trail_checkpoint);
            let predicate_index = entry.predicate_index;
            let round = entry.round;

            let result = match entry.mode {
                EntryMode::Call => {
                    self.try_count += 1;
                    let result = self.predicates[predicate_index].try_pred(ctx, round);
                    match result {
                        PredicateResult::Choices(count) => {
                            entry.mode = EntryMode::Choice { next: 0, count };
                            entry.trail_checkpoint = ctx.trail.len();
                            continue;
                        }
                        PredicateResult::Suspend => {
                            // Resuming backtracks from here.
                            entry.mode = EntryMode::Done;
                            return Some(self);
                        }
                        _ => {
                            entry.mode = EntryMode::Done;
                            result
                        }
                    }
                }
                EntryMode::Choice { next, count } if next < count => {
                    entry.mode = EntryMode::Choice {
                        next: next + 1,
                        count,
                    };
                    self.retry_count += 1;
                    let result = self.predicates[predicate_index].retry_pred(ctx, round, next);
                    if matches!(
                        result,
                        PredicateResult::Choices(_) | PredicateResult::Suspend
                    ) {
                        panic!("retry_pred returned invalid result: {:?}", result);
                    }
                    result
                }
                EntryMode::Choice { .. } | EntryMode::Done => {
                    self.stack.pop();
                    continue;
                }
            };

            match result {
                PredicateResult::Success => {
                    let next_index = predicate_index + 1;
                    if next_index >= self.predicates.len() {
                        panic!(
                            "Invalid predicate sequence: reached end without FAIL or SUSPEND. \
                             All programs must terminate with a terminal predicate."
                        );
                    }
                    self.push_entry(next_index, 0, ctx);
                }
                PredicateResult::SuccessSamePredicate => {
                    self.push_entry(predicate_index, round + 1, ctx);
                }
                PredicateResult::Failure => {
                    trace!(
                        predicate = self.predicates[predicate_index].name(),
                        round,
                        "backtrack"
                    );
                }
                PredicateResult::Choices(_) | PredicateResult::Suspend => {
                    unreachable!("handled above")
                }
            }
        }
        None
    }

    fn push_entry(&mut self, predicate_index: usize, round: usize, ctx: &SearchContext<'_>) {
        self.stack.push(StackEntry {
            predicate_index,
            round,
            mode: EntryMode::Call,
            trail_checkpoint: ctx.trail.len(),
        });
    }

    /// Returns (try_count, retry_count): how many times predicates were
    /// tried and retried.
    pub fn statistics(&self) -> (u64, u64) {
        (self.try_count, self.retry_count)
    }
}

/// Builds a predicate sequence that is guaranteed to end in a terminal
/// predicate.
#[derive(Default)]
pub struct EngineBuilder {
    predicates: Vec<Box<dyn Predicate>>,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, predicate: Box<dyn Predicate>) -> Self {
        self.predicates.push(predicate);
        self
    }

    /// Close the sequence with its terminal predicate.
    pub fn terminal<T: TerminalPredicate + 'static>(
        mut self,
        predicate: Box<T>,
    ) -> TerminatedEngineBuilder {
        self.predicates.push(predicate);
        TerminatedEngineBuilder {
            predicates: self.predicates,
        }
    }
}

/// A complete predicate sequence, ready to build.
pub struct TerminatedEngineBuilder {
    predicates: Vec<Box<dyn Predicate>>,
}

impl TerminatedEngineBuilder {
    pub fn build(self) -> SearchEngine {
        SearchEngine::new(self.predicates)
    }
}
