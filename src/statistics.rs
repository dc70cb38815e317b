// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Statistics
//!
//! Counters are kept in the search context while an enumeration runs, and
//! merged into the learner's totals afterwards.

use std::fmt;
use strum::{EnumCount, IntoEnumIterator};
use strum_macros::{Display, EnumCount as EnumCountMacro, EnumIter};

#[derive(Debug, EnumCountMacro, EnumIter, Display, Copy, Clone, PartialEq, Eq)]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum Counters {
    /// Calls to the model-checking predicate.
    MembershipQueries,
    /// Assignments reported as Pareto-front elements.
    FrontAssignments,
    DegenerateChains,
    SubsumedChains,
    ReportedChains,
}

const COUNT: usize = Counters::COUNT;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Statistics {
    stats: [u64; COUNT],
}

impl Statistics {
    pub fn new() -> Self {
        Statistics::default()
    }

    /// Increment the specified counter by 1.
    pub fn increment(&mut self, counter: Counters) {
        self.stats[counter as usize] += 1;
    }

    /// Get the current value of the specified counter.
    pub fn get(&self, counter: Counters) -> u64 {
        self.stats[counter as usize]
    }

    /// Add every counter of `other` into `self`.
    pub fn merge(&mut self, other: &Statistics) {
        for (mine, theirs) in self.stats.iter_mut().zip(other.stats.iter()) {
            *mine += theirs;
        }
    }
}

impl fmt::Display for Statistics {
    /// One `name=value` pair per counter, space separated.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, counter) in Counters::iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}={}", counter, self.get(counter))?;
        }
        Ok(())
    }
}
