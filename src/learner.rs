// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The learning driver.
//!
//! For each chain length `1..=max_chain_length` the learner enumerates the
//! Pareto front of chains consistent with every example, and passes each
//! front element through the [`SimulationFilter`]. Chains the filter reports
//! are written to the transcript as they are found.

use crate::chain::{CandidateChain, ChainLength};
use crate::check::first_rejected;
use crate::errors::LearnError;
use crate::limits::{build_limits, SafetyMode};
use crate::output::{write_chain, write_end, write_header, ChainReport, LearningHeader};
use crate::pareto::{BacktrackingEnumerator, ParetoEnumerator};
use crate::problem::LearningProblem;
use crate::simulation::{Admission, SimulationFilter};
use crate::statistics::{Counters, Statistics};
use std::io::{self, Write};
use tracing::{debug, info, trace};

/// Learning parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LearnerConfig {
    /// Longest chain to learn. Zero learns nothing.
    pub max_chain_length: u32,
    pub safety_mode: SafetyMode,
}

impl Default for LearnerConfig {
    fn default() -> Self {
        Self {
            max_chain_length: 2,
            safety_mode: SafetyMode::default(),
        }
    }
}

/// Runs the learning loop over one problem.
///
/// The retained chains persist across calls to [`Learner::learn`], so chains
/// of a given length are compared against every shorter chain kept so far.
#[derive(Debug)]
pub struct Learner<'p, E: ParetoEnumerator = BacktrackingEnumerator> {
    problem: &'p LearningProblem,
    config: LearnerConfig,
    enumerator: E,
    filter: SimulationFilter,
    /// Indexes into the filter's retained chains.
    reported: Vec<usize>,
    statistics: Statistics,
}

impl<'p> Learner<'p> {
    pub fn new(problem: &'p LearningProblem, config: LearnerConfig) -> Self {
        Self::with_enumerator(problem, config, BacktrackingEnumerator)
    }
}

impl<'p, E: ParetoEnumerator> Learner<'p, E> {
    pub fn with_enumerator(
        problem: &'p LearningProblem,
        config: LearnerConfig,
        enumerator: E,
    ) -> Self {
        Self {
            problem,
            config,
            enumerator,
            filter: SimulationFilter::new(),
            reported: Vec::new(),
            statistics: Statistics::new(),
        }
    }

    /// Write the complete transcript: header, every reported chain, `END`.
    pub fn run<W: Write + ?Sized>(&mut self, out: &mut W) -> Result<(), LearnError> {
        self.check_max_length()?;
        write_header(out, &LearningHeader::from(self.problem))?;
        self.learn_all(out)?;
        write_end(out)?;
        out.flush()?;
        info!(statistics = %self.statistics, "learning complete");
        Ok(())
    }

    /// Learn every length from 1 to the configured maximum.
    pub fn learn_all<W: Write + ?Sized>(&mut self, out: &mut W) -> Result<(), LearnError> {
        self.check_max_length()?;
        for length in 1..=self.config.max_chain_length {
            self.learn(length, out)?;
        }
        Ok(())
    }

    fn check_max_length(&self) -> Result<(), LearnError> {
        if self.config.max_chain_length > 0 {
            ChainLength::new(self.config.max_chain_length)?;
        }
        Ok(())
    }

    /// Learn the chains of one length, writing each reported chain to `out`.
    pub fn learn<W: Write + ?Sized>(&mut self, length: u32, out: &mut W) -> Result<(), LearnError> {
        let length = ChainLength::new(length)?;
        let nof_letters = self.problem.nof_letters();
        let limits = build_limits(length, nof_letters, self.config.safety_mode);
        info!(
            %length,
            mode = %self.config.safety_mode,
            free = limits.free_positions(),
            "learning chains"
        );

        let examples = self.problem.examples();
        let filter = &mut self.filter;
        let reported = &mut self.reported;
        let mut counts = Statistics::new();
        let mut write_error: Option<io::Error> = None;

        let mut membership = |values: &[u32]| {
            let chain = CandidateChain::from_assignment(length, nof_letters, values);
            let rejected = first_rejected(&chain, examples);
            trace!(%chain, ?rejected, "membership query");
            rejected.is_none()
        };

        let mut on_front = |values: &[u32]| {
            let chain = CandidateChain::from_assignment(length, nof_letters, values);
            let report = ChainReport::from(&chain);
            match filter.admit(chain) {
                Admission::Degenerate => {
                    debug!(%report, "degenerate chain retained");
                    counts.increment(Counters::DegenerateChains);
                }
                Admission::Subsumed { by } => {
                    debug!(%report, by, "chain subsumed");
                    counts.increment(Counters::SubsumedChains);
                }
                Admission::Reported => {
                    debug!(%report, "chain reported");
                    counts.increment(Counters::ReportedChains);
                    reported.push(filter.len() - 1);
                    if write_error.is_none() {
                        if let Err(error) = write_chain(out, &report) {
                            write_error = Some(error);
                        }
                    }
                }
            }
        };

        let search = self
            .enumerator
            .enumerate(&limits, &mut membership, &mut on_front);
        if let Some(error) = write_error {
            return Err(error.into());
        }

        info!(
            %length,
            front = search.get(Counters::FrontAssignments),
            reported = counts.get(Counters::ReportedChains),
            retained = self.filter.len(),
            "chain length done"
        );
        self.statistics.merge(&search);
        self.statistics.merge(&counts);
        Ok(())
    }

    /// Every chain kept by the filter, reported or not.
    pub fn retained(&self) -> &[CandidateChain] {
        self.filter.retained()
    }

    /// The reported chains, in report order.
    pub fn reported(&self) -> impl Iterator<Item = &CandidateChain> + '_ {
        let retained = self.filter.retained();
        self.reported.iter().map(move |&index| &retained[index])
    }

    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    pub fn config(&self) -> &LearnerConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::{LassoExample, ProblemOptions};

    fn transcript(problem: &LearningProblem, config: LearnerConfig) -> String {
        let mut out = Vec::new();
        Learner::new(problem, config).run(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_no_examples_single_state() {
        let problem = LearningProblem::new(1, 2, vec![]).unwrap();
        let config = LearnerConfig {
            max_chain_length: 1,
            ..LearnerConfig::default()
        };
        // With nothing to reject, the universal chain is the only front element.
        assert_eq!(
            transcript(&problem, config),
            "LEARNING 1 2\nCHAIN 11\nEND\n"
        );
    }

    #[test]
    fn test_longer_chains_subsumed_without_examples() {
        let problem = LearningProblem::new(1, 2, vec![]).unwrap();
        let mut learner = Learner::new(&problem, LearnerConfig::default());
        let mut out = Vec::new();
        learner.run(&mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "LEARNING 1 2\nCHAIN 11\nEND\n"
        );
        assert_eq!(learner.retained().len(), 1);
        assert_eq!(learner.statistics().get(Counters::SubsumedChains), 1);
    }

    #[test]
    fn test_two_incomparable_chains() {
        let text = "Learning problem with character width: 1\nNof characters: 2\n0 1\n";
        let problem = LearningProblem::parse(text, ProblemOptions::default()).unwrap();
        let config = LearnerConfig {
            max_chain_length: 1,
            ..LearnerConfig::default()
        };
        let mut learner = Learner::new(&problem, config);
        let mut out = Vec::new();
        learner.run(&mut out).unwrap();

        let reported: Vec<String> = learner.reported().map(|c| c.to_string()).collect();
        assert_eq!(reported, vec!["01", "10"]);
        assert_eq!(learner.statistics().get(Counters::ReportedChains), 2);
    }

    #[test]
    fn test_chain_too_long_fails_before_output() {
        let problem = LearningProblem::new(1, 1, vec![LassoExample::new(vec![], vec![0])]).unwrap();
        let config = LearnerConfig {
            max_chain_length: 64,
            ..LearnerConfig::default()
        };
        let mut out = Vec::new();
        let result = Learner::new(&problem, config).run(&mut out);
        assert!(matches!(
            result,
            Err(LearnError::ChainTooLong { length: 64, max: 63 })
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn test_zero_length_learns_nothing() {
        let problem = LearningProblem::new(1, 2, vec![]).unwrap();
        let config = LearnerConfig {
            max_chain_length: 0,
            ..LearnerConfig::default()
        };
        assert_eq!(transcript(&problem, config), "LEARNING 1 2\nEND\n");
    }
}
