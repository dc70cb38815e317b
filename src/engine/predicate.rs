// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Predicate trait for non-deterministic search.
//!
//! The search engine works by trying predicates in sequence. Each predicate
//! represents a choice point in the search space. Predicates can succeed,
//! fail, or offer a number of alternatives.
//!
//! # Example
//!
//! ```
//! use uvw_learner::engine::{Predicate, PredicateResult};
//! use uvw_learner::context::SearchContext;
//!
//! #[derive(Debug)]
//! struct FirstBit;
//!
//! impl Predicate for FirstBit {
//!     fn try_pred(&mut self, _ctx: &mut SearchContext<'_>, _round: usize) -> PredicateResult {
//!         PredicateResult::Choices(2)
//!     }
//!
//!     fn retry_pred(
//!         &mut self,
//!         ctx: &mut SearchContext<'_>,
//!         _round: usize,
//!         choice: usize,
//!     ) -> PredicateResult {
//!         ctx.assign(0, choice as u32);
//!         PredicateResult::Success
//!     }
//! }
//! ```

use crate::context::SearchContext;
use std::fmt::Debug;

/// Result of attempting a predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredicateResult {
    /// Predicate succeeded. Move to next predicate in sequence.
    Success,

    /// Predicate succeeded but stay at same predicate with next round.
    /// Lets a single predicate run once per assignment position.
    SuccessSamePredicate,

    /// Predicate has no (more) valid choices. Backtrack to previous predicate.
    Failure,

    /// Predicate has `n` choices; the engine calls `retry_pred` for `0..n`.
    Choices(usize),

    /// Suspend execution. Engine returns control with state preserved.
    Suspend,
}

/// A predicate that ends a program.
///
/// Terminal predicates fail or suspend; they never return Success. The
/// [`EngineBuilder`](super::EngineBuilder) only builds sequences ending in one.
pub trait TerminalPredicate: Predicate {}

/// Trait for search predicates in the non-deterministic engine.
///
/// # Lifecycle
///
/// 1. Engine calls `try_pred` when first encountering the predicate
/// 2. If Success: engine advances to next predicate
/// 3. If Failure: engine backtracks to previous predicate
/// 4. If Choices(n): engine calls `retry_pred` for each choice in turn,
///    advancing on success and moving to the next choice on failure
///
/// # Trail Integration
///
/// Writes made through [`SearchContext::assign`] are recorded on the trail.
/// The engine rewinds to the entry's checkpoint before every call, so a
/// retried choice starts from the state `try_pred` left behind.
pub trait Predicate: Debug {
    /// Try this predicate for a given round.
    ///
    /// The round starts at 0 and increments each time the predicate returns
    /// `SuccessSamePredicate`.
    fn try_pred(&mut self, ctx: &mut SearchContext<'_>, round: usize) -> PredicateResult;

    /// Retry this predicate with a specific choice.
    ///
    /// Called after `try_pred` returned `Choices(n)`, for each choice in
    /// `0..n`. May not return `Choices` or `Suspend`.
    #[allow(unused)]
    fn retry_pred(
        &mut self,
        ctx: &mut SearchContext<'_>,
        round: usize,
        choice: usize,
    ) -> PredicateResult {
        // Predicates that return Choices must implement this.
        panic!("{}::retry_pred should never be called", self.name());
    }

    /// Name for logging. Defaults to the type name.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}
