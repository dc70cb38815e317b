// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Property tests for the checking predicate, the simulation filter and the
//! Pareto enumerator.

mod common;

use common::length;
use proptest::prelude::*;
use std::cell::RefCell;
use uvw_learner::chain::reachability::lasso_reachability;
use uvw_learner::check::{is_consistent, rejects};
use uvw_learner::limits::{BitRange, DomainLimits};
use uvw_learner::pareto::dominates;
use uvw_learner::simulation::simulates;
use uvw_learner::statistics::Statistics;
use uvw_learner::{
    Admission, BacktrackingEnumerator, CandidateChain, LassoExample, Learner, LearnerConfig,
    LearningProblem, ParetoEnumerator, SafetyMode, SimulationFilter,
};

fn example_strategy(nof_letters: usize) -> impl Strategy<Value = LassoExample> {
    (
        prop::collection::vec(0..nof_letters, 0..4),
        prop::collection::vec(0..nof_letters, 1..4),
    )
        .prop_map(|(prefix, cycle)| LassoExample::new(prefix, cycle))
}

/// A chain of 1..=3 states over `nof_letters`, plus a same-shaped mask.
fn chain_pair(nof_letters: usize) -> impl Strategy<Value = (CandidateChain, Vec<u32>)> {
    (1u32..=3).prop_flat_map(move |states| {
        let bits = length(states).bits(nof_letters);
        (
            prop::collection::vec(0u32..=1, bits),
            prop::collection::vec(0u32..=1, bits),
        )
            .prop_map(move |(values, mask)| {
                (
                    CandidateChain::from_assignment(length(states), nof_letters, &values),
                    mask,
                )
            })
    })
}

/// `chain` with every bit set in `mask` additionally disabled.
fn restrict(chain: &CandidateChain, mask: &[u32]) -> CandidateChain {
    let values: Vec<u32> = chain
        .to_assignment()
        .iter()
        .zip(mask)
        .map(|(v, m)| v | m)
        .collect();
    CandidateChain::from_assignment(chain.length(), chain.nof_letters(), &values)
}

fn problem_strategy() -> impl Strategy<Value = LearningProblem> {
    (1usize..=2).prop_flat_map(|nof_letters| {
        prop::collection::vec(example_strategy(nof_letters), 0..4).prop_map(move |examples| {
            LearningProblem::new(1, nof_letters, examples).expect("letters fit one bit")
        })
    })
}

/// Brute-force Pareto front, in lexicographic order.
fn brute_force_front(limits: &DomainLimits, membership: impl Fn(&[u32]) -> bool) -> Vec<Vec<u32>> {
    let mut points: Vec<Vec<u32>> = vec![vec![]];
    for range in limits.iter() {
        points = points
            .into_iter()
            .flat_map(|prefix| {
                (range.lo..=range.hi).map(move |value| {
                    let mut point = prefix.clone();
                    point.push(value);
                    point
                })
            })
            .collect();
    }
    let satisfying: Vec<Vec<u32>> = points.into_iter().filter(|p| membership(p)).collect();
    satisfying
        .iter()
        .filter(|p| !satisfying.iter().any(|q| q != *p && dominates(q, p)))
        .cloned()
        .collect()
}

fn enumerate_front(limits: &DomainLimits, membership: impl Fn(&[u32]) -> bool) -> Vec<Vec<u32>> {
    let mut front = Vec::new();
    BacktrackingEnumerator.enumerate(
        limits,
        &mut |values| membership(values),
        &mut |values| front.push(values.to_vec()),
    );
    front
}

/// Delegates to the backtracking enumerator, recording every front element.
struct RecordingEnumerator<'r> {
    fronts: &'r RefCell<Vec<Vec<Vec<u32>>>>,
}

impl ParetoEnumerator for RecordingEnumerator<'_> {
    fn enumerate(
        &self,
        limits: &DomainLimits,
        membership: &mut dyn FnMut(&[u32]) -> bool,
        on_front: &mut dyn FnMut(&[u32]),
    ) -> Statistics {
        let mut front = Vec::new();
        let stats = BacktrackingEnumerator.enumerate(limits, membership, &mut |values| {
            front.push(values.to_vec());
            on_front(values);
        });
        self.fronts.borrow_mut().push(front);
        stats
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    #[test]
    fn consistency_is_deterministic(
        (chain, _) in chain_pair(2),
        examples in prop::collection::vec(example_strategy(2), 0..5),
    ) {
        prop_assert_eq!(is_consistent(&chain, &examples), is_consistent(&chain.clone(), &examples));
    }

    #[test]
    fn disabling_transitions_only_shrinks_reachability(
        (chain, mask) in chain_pair(3),
        example in example_strategy(3),
    ) {
        let smaller = restrict(&chain, &mask);
        prop_assert!(smaller.is_restriction_of(&chain));
        let big = lasso_reachability(&chain, &example);
        let small = lasso_reachability(&smaller, &example);
        prop_assert!(small.after_prefix.is_subset(big.after_prefix));
        prop_assert!(small.in_cycle.is_subset(big.in_cycle));

        if rejects(&smaller, &example) {
            prop_assert!(rejects(&chain, &example));
        }
    }

    #[test]
    fn consistency_is_upward_closed(
        (chain, mask) in chain_pair(2),
        examples in prop::collection::vec(example_strategy(2), 0..4),
    ) {
        let smaller = restrict(&chain, &mask);
        prop_assert!(smaller.is_restriction_of(&chain));
        if is_consistent(&chain, &examples) {
            prop_assert!(is_consistent(&smaller, &examples));
        }
    }

    #[test]
    fn every_chain_simulates_itself((chain, _) in chain_pair(2)) {
        prop_assert!(simulates(&chain, &chain));
    }

    #[test]
    fn readmitting_a_chain_is_subsumed((chain, _) in chain_pair(2)) {
        let mut filter = SimulationFilter::new();
        let first = filter.admit(chain.clone());
        let second = filter.admit(chain.clone());
        if chain.is_degenerate() {
            prop_assert_eq!(first, Admission::Degenerate);
            prop_assert_eq!(second, Admission::Degenerate);
        } else {
            prop_assert_eq!(first, Admission::Reported);
            prop_assert_eq!(second, Admission::Subsumed { by: 0 });
        }
    }

    #[test]
    fn filter_grows_by_at_most_one(
        chains in prop::collection::vec(chain_pair(2), 1..8),
    ) {
        let mut filter = SimulationFilter::new();
        for (chain, _) in chains {
            let before = filter.len();
            let admission = filter.admit(chain);
            let grown = filter.len() - before;
            match admission {
                Admission::Subsumed { by } => {
                    prop_assert_eq!(grown, 0);
                    prop_assert!(by < before);
                }
                _ => prop_assert_eq!(grown, 1),
            }
        }
    }

    #[test]
    fn enumerator_matches_brute_force(
        generators in prop::collection::vec(prop::collection::vec(0u32..=2, 5), 0..4),
        fixed in prop::collection::vec(prop::option::of(0u32..=2), 5),
    ) {
        let limits = DomainLimits::from_ranges(
            fixed
                .iter()
                .map(|value| value.map_or(BitRange::new(0, 2), BitRange::fixed))
                .collect(),
        );
        let membership = |point: &[u32]| generators.iter().any(|g| dominates(g, point));
        prop_assert_eq!(
            enumerate_front(&limits, membership),
            brute_force_front(&limits, membership)
        );
    }

    #[test]
    fn learner_front_is_minimal_consistent_set(
        problem in problem_strategy(),
        liveness in any::<bool>(),
    ) {
        let mode = if liveness || problem.nof_letters() < 2 {
            SafetyMode::Liveness
        } else {
            SafetyMode::FiniteWords
        };
        let config = LearnerConfig { max_chain_length: 2, safety_mode: mode };
        let fronts = RefCell::new(Vec::new());
        let mut learner = Learner::with_enumerator(
            &problem,
            config,
            RecordingEnumerator { fronts: &fronts },
        );
        learner.run(&mut std::io::sink()).expect("learning succeeds");
        drop(learner);

        for (i, front) in fronts.into_inner().into_iter().enumerate() {
            let chain_length = length(i as u32 + 1);
            let limits = uvw_learner::build_limits(chain_length, problem.nof_letters(), mode);
            let expected = brute_force_front(&limits, |values| {
                let chain =
                    CandidateChain::from_assignment(chain_length, problem.nof_letters(), values);
                is_consistent(&chain, problem.examples())
            });
            prop_assert_eq!(front, expected);
        }
    }

    #[test]
    fn learning_is_deterministic(problem in problem_strategy()) {
        let run = || {
            let mut out = Vec::new();
            Learner::new(&problem, LearnerConfig::default())
                .run(&mut out)
                .expect("learning succeeds");
            out
        };
        prop_assert_eq!(run(), run());
    }
}
