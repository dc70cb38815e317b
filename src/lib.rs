// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Learning minimal UVW chains from positive lasso-word examples.
//!
//! A UVW chain is a linear sequence of states `0..L` where each state has a
//! per-letter self-loop and (except the last) a per-letter forward transition
//! to its successor. The last state is rejecting: a positive example must never
//! be able to reach it and then stay there forever. The learner searches, for
//! each chain length up to a configured bound, for the chains with the most
//! transitions enabled that still accept every example.
//!
//! # Architecture
//!
//! ## Core
//!
//! - [`chain`]: the packed candidate encoding and the 64-bit reachability engine
//! - [`check`]: the model-checking predicate over all examples
//! - [`limits`]: per-bit domain restriction for each [`SafetyMode`]
//! - [`simulation`]: the simulation-preorder redundancy filter and its store
//!
//! ## Search
//!
//! Candidates are produced by a Pareto-front enumerator ([`pareto`]). The
//! shipped implementation is a predicate program run by the backtracking
//! [`engine`], with its assignment stored in a [`context::SearchContext`] and
//! restored on backtrack by the [`trail`].
//!
//! ## Outer layers
//!
//! - [`problem`]: the learning-problem file format
//! - [`learner`]: the driver looping over chain lengths
//! - [`output`]: the `LEARNING`/`CHAIN`/`END` protocol and Graphviz rendering
//! - [`statistics`]: run counters
//!
//! # Example
//!
//! ```
//! use uvw_learner::{Learner, LearnerConfig, LearningProblem, ProblemOptions};
//!
//! let text = "Learning problem with character width: 1\nNof characters: 2\n0 1\n";
//! let problem = LearningProblem::parse(text, ProblemOptions::default()).unwrap();
//! let config = LearnerConfig { max_chain_length: 1, ..LearnerConfig::default() };
//!
//! let mut out = Vec::new();
//! Learner::new(&problem, config).run(&mut out).unwrap();
//! assert_eq!(
//!     String::from_utf8(out).unwrap(),
//!     "LEARNING 1 2\nCHAIN 10\nCHAIN 01\nEND\n"
//! );
//! ```

pub mod chain;
pub mod check;
pub mod context;
pub mod engine;
pub mod errors;
pub mod learner;
pub mod limits;
pub mod output;
pub mod pareto;
pub mod predicates;
pub mod problem;
pub mod simulation;
pub mod statistics;
pub mod trail;

// Re-export commonly used types
pub use chain::{CandidateChain, ChainLength, MAX_CHAIN_LENGTH};
pub use errors::LearnError;
pub use learner::{Learner, LearnerConfig};
pub use limits::{build_limits, DomainLimits, SafetyMode};
pub use pareto::{BacktrackingEnumerator, ParetoEnumerator};
pub use problem::{LassoExample, LearningProblem, Letter, ProblemError, ProblemOptions};
pub use simulation::{Admission, SimulationFilter};
