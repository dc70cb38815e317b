// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Errors raised while learning.

use crate::problem::ProblemError;
use thiserror::Error;

/// Fatal errors of a learning run.
///
/// None of these are recovered internally; the run stops and reports nothing
/// further.
#[derive(Debug, Error)]
pub enum LearnError {
    /// Reachability sets are packed into one 64-bit word.
    #[error("chain length {length} is not supported: at most {max} states fit in a 64-bit word")]
    ChainTooLong { length: u32, max: u32 },

    /// A chain needs at least its terminal state.
    #[error("chain length must be at least 1")]
    EmptyChain,

    /// Writing the learning transcript failed.
    #[error("failed to write learning output: {0}")]
    Output(#[from] std::io::Error),

    /// The learning problem could not be loaded.
    #[error(transparent)]
    Problem(#[from] ProblemError),
}
